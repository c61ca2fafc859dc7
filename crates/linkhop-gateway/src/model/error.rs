use serde::{Deserialize, Serialize};

/// Body of every 4xx response produced by the gateway.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
