use serde::{Deserialize, Serialize};

/// Request and response body of `POST /link`.
///
/// The request carries the destination to shorten; the response carries
/// the public short URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPayload {
    pub link: String,
}
