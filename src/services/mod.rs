//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod token;

pub use auth_service::{AuthService, Authenticator, LoginSession};
pub use token::{Claims, TokenIssuer};
