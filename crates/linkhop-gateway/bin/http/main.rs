mod cli;

use crate::cli::{GeneratorArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use linkhop_cache::{CachedRepository, MokaLinkCache};
use linkhop_core::{Repository, Shortener, Token};
use linkhop_gateway::{App, AppState};
use linkhop_generator::{RandomGenerator, SeqGenerator};
use linkhop_shortener::LinkService;
use linkhop_storage::{InMemoryRepository, SqliteRepository};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    linkhop_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        generator = %config.generator,
        cache_capacity = config.cache_capacity,
        "starting linkhop gateway"
    );

    let shortener = build_shortener(&config).await?;
    let state = AppState::new(shortener, config.base_url.clone());

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gracefully exited");
    Ok(())
}

async fn build_shortener(config: &CLI) -> anyhow::Result<Arc<dyn Shortener>> {
    match config.storage {
        // the repository already is memory; a cache in front of it buys nothing
        StorageBackendArg::InMemory => Ok(with_generator(InMemoryRepository::new(), config, &[])),
        StorageBackendArg::Sqlite => {
            let dsn = config
                .sqlite_dsn
                .as_deref()
                .context("sqlite dsn is required when storage backend is sqlite")?;
            let repository = SqliteRepository::connect(dsn).await?;
            let links = repository.count().await?;
            info!(links, "opened link store");

            // resume the counter past tokens issued by earlier runs
            let issued = match config.generator {
                GeneratorArg::Seq => {
                    repository
                        .tokens_with_prefix(&config.generator_prefix)
                        .await?
                }
                GeneratorArg::Random => Vec::new(),
            };

            if config.cache_capacity == 0 {
                Ok(with_generator(repository, config, &issued))
            } else {
                let cache = MokaLinkCache::with_capacity(config.cache_capacity);
                Ok(with_generator(
                    CachedRepository::new(repository, cache),
                    config,
                    &issued,
                ))
            }
        }
    }
}

fn with_generator<R: Repository>(
    repository: R,
    config: &CLI,
    issued: &[Token],
) -> Arc<dyn Shortener> {
    match config.generator {
        GeneratorArg::Random => Arc::new(LinkService::new(
            repository,
            RandomGenerator::builder()
                .length(usize::from(config.token_length))
                .build(),
        )),
        GeneratorArg::Seq => Arc::new(LinkService::new(
            repository,
            SeqGenerator::resume(
                config.generator_prefix.clone(),
                issued.iter().map(Token::as_str),
            ),
        )),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
