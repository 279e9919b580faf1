//! Resource addressing.
//!
//! # Data Flow
//! ```text
//! raw path segment
//!     → id.rs (ObjectId::parse, rejects malformed input)
//!     → locator.rs (Scope + ObjectId → Filter / Query)
//!     → store
//! ```
//!
//! # Design Decisions
//! - Validation is pure and never touches the store
//! - Nested resources carry their parent in a `Scope`, not in ad-hoc filters

pub mod id;
pub mod locator;

pub use id::{InvalidId, ObjectId};
pub use locator::{Filter, Parent, Query, Scope, LIST_LIMIT};
