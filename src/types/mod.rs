//! Shared types.

mod response;

pub use response::ApiMessage;
