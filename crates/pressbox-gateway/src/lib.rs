//! HTTP gateway: PDF upload, retrieval-augmented chat, session clearing,
//! and health reporting over a single in-memory document session.

pub mod error;
mod handlers;
pub mod pipeline;
mod router;
pub mod server;
pub mod session;

pub use error::{ApiError, GatewayError};
pub use pipeline::Pipeline;
pub use server::GatewayServer;
pub use session::DocumentSession;
