use crate::error::{AppError, Result};
use crate::model::LinkPayload;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkhop_core::{validate_link, Destination};
use tracing::debug;

/// `POST /link`: validates the link, mints a token and returns the short URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<LinkPayload>,
) -> Result<Json<LinkPayload>> {
    let destination = validate_link(&request.link)?;
    let token = state.shortener().create_link(destination).await?;

    Ok(Json(LinkPayload {
        link: token.to_url(state.base_url()),
    }))
}

/// `GET /{token}`: permanent redirect to the destination.
///
/// 301 lets clients and caches remember the mapping, which is sound only
/// because mappings never change.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let destination = state
        .shortener()
        .get_real_link(&token)
        .await?
        .ok_or(AppError::NotFound)?;

    debug!(token = %token, destination = %destination, "redirecting");
    permanent_redirect(&destination)
}

fn permanent_redirect(destination: &Destination) -> Result<Response> {
    let location = HeaderValue::from_bytes(destination.as_str().as_bytes())
        .map_err(|_| AppError::MalformedDestination(destination.to_string()))?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
