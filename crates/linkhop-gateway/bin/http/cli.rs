use clap::{Parser, ValueEnum};
use linkhop_gateway::app::RESERVED_PATHS;
use linkhop_generator::SeqGenerator;
use linkhop_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "LINKHOP_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "LINKHOP_GATEWAY_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "LINKHOP_GATEWAY_STORAGE_BACKEND";
pub const SQLITE_DSN_ENV: &str = "LINKHOP_GATEWAY_SQLITE_DSN";
pub const CACHE_CAPACITY_ENV: &str = "LINKHOP_GATEWAY_CACHE_CAPACITY";
pub const GENERATOR_ENV: &str = "LINKHOP_GATEWAY_GENERATOR";
pub const TOKEN_LENGTH_ENV: &str = "LINKHOP_GATEWAY_TOKEN_LENGTH";
pub const GENERATOR_PREFIX_ENV: &str = "LINKHOP_GATEWAY_GENERATOR_PREFIX";
pub const LOG_FORMAT_ENV: &str = "LINKHOP_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_TOKEN_LENGTH: u8 = 7;
pub const DEFAULT_GENERATOR_PREFIX: &str = "lh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    /// Fixed-length random base58 tokens.
    #[value(name = "random")]
    Random,
    /// Prefix plus base58 counter; reveals issuance order.
    #[value(name = "seq")]
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "linkhop-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public prefix of the returned short links.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_DSN_ENV, required_if_eq("storage", "sqlite"))]
    pub sqlite_dsn: Option<String>,

    /// Mappings kept in the read-through cache; 0 disables it.
    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: u64,

    #[arg(
        long,
        env = GENERATOR_ENV,
        value_enum,
        default_value_t = GeneratorArg::Random
    )]
    pub generator: GeneratorArg,

    #[arg(
        long,
        env = TOKEN_LENGTH_ENV,
        default_value_t = DEFAULT_TOKEN_LENGTH,
        value_parser = clap::value_parser!(u8).range(1..=64),
    )]
    pub token_length: u8,

    #[arg(
        long,
        env = GENERATOR_PREFIX_ENV,
        default_value = DEFAULT_GENERATOR_PREFIX,
        value_parser = parse_generator_prefix,
    )]
    pub generator_prefix: String,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Accepts only prefixes whose every token is well-formed and reachable.
fn parse_generator_prefix(prefix: &str) -> Result<String, String> {
    SeqGenerator::validate_prefix(prefix).map_err(|e| format!("invalid prefix: {e}"))?;

    if let Some(path) = RESERVED_PATHS
        .iter()
        .find(|path| SeqGenerator::can_produce(prefix, path))
    {
        return Err(format!("prefix can generate the reserved path '/{path}'"));
    }

    Ok(prefix.to_string())
}
