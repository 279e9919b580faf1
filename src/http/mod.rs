//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, path id validation, payload parsing)
//!     → [routing selects the handler by path and verb]
//!     → [handlers run the store operation]
//!     → response.rs (envelope, status code)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, ApiResult, Envelope};
pub use server::{AppState, HttpServer};
