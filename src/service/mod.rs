//! Tower Service implementations

pub mod core;
pub mod request;
pub mod response;

pub use core::InvocationService;
pub use request::{InvocationRequest, RequestContext, DEFAULT_NAMESPACE};
pub use response::InvocationResponse;
