//! Response envelope types.
//!
//! Every body this service returns carries an explicit `ok` boolean and,
//! for message-only responses, a human-readable `message`.

use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiMessage {
    pub ok: bool,
    pub message: String,
}

impl ApiMessage {
    /// Successful message-only response
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}
