//! Tower Layer implementations for agent invocations

pub mod auth;
pub mod validation;

pub use auth::{AuthCredentials, AuthLayer, AuthService};
pub use validation::{ValidationLayer, ValidationService};
