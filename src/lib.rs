//! REST API over the sample movie database.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod resource;
pub mod routing;
pub mod store;

pub use config::schema::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resource::ObjectId;
pub use store::{MemoryStore, Store};
