//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (path lookup under /api)
//!     → dispatch.rs (verb → handler, or 405 envelope)
//!     → handlers
//!
//! No path match:
//!     → dispatch::route_not_found (404 envelope)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same method and path always reach the same outcome
//! - Dispatch holds no state between requests

pub mod dispatch;
pub mod router;

pub use dispatch::{Dispatch, Verb};
pub use router::{api_routes, API_PREFIX};
