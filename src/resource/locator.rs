//! Resolve validated identifiers into store filters.
//!
//! # Responsibilities
//! - Build single-document filters from a resource id
//! - Conjoin the parent reference for nested resources
//! - Bound collection listings by `LIST_LIMIT`
//!
//! # Design Decisions
//! - Filters only accept `ObjectId`, so unvalidated strings cannot reach a query
//! - Clauses combine with AND semantics; an empty filter matches everything
//! - A child whose parent reference differs fails the filter (not-found)

use serde_json::Value;

use crate::resource::ObjectId;
use crate::store::{Document, ID_FIELD};

/// Maximum documents returned by any listing.
pub const LIST_LIMIT: usize = 10;

/// Conjunction of `field == id` clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(&'static str, ObjectId)>,
}

impl Filter {
    /// Filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a document's own identifier.
    pub fn by_id(id: ObjectId) -> Self {
        Self::all().and(ID_FIELD, id)
    }

    /// Add a clause.
    pub fn and(mut self, field: &'static str, id: ObjectId) -> Self {
        self.clauses.push((field, id));
        self
    }

    pub fn clauses(&self) -> &[(&'static str, ObjectId)] {
        &self.clauses
    }

    /// The `_id` clause, if any.
    pub fn id(&self) -> Option<ObjectId> {
        self.clauses
            .iter()
            .find(|(field, _)| *field == ID_FIELD)
            .map(|(_, id)| *id)
    }

    /// True if every clause holds for `doc`.
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|(field, id)| match doc.get(*field) {
            Some(Value::String(s)) => ObjectId::parse(s).map(|v| v == *id).unwrap_or(false),
            _ => false,
        })
    }
}

/// Parent reference of a nested resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent {
    /// Field on the child holding the parent id.
    pub field: &'static str,
    pub id: ObjectId,
}

/// Where a request addresses documents: top-level or under a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scope {
    parent: Option<Parent>,
}

impl Scope {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn nested(field: &'static str, id: ObjectId) -> Self {
        Self {
            parent: Some(Parent { field, id }),
        }
    }

    pub fn parent(&self) -> Option<Parent> {
        self.parent
    }

    /// Filter selecting the single document `id` within this scope.
    pub fn one(&self, id: ObjectId) -> Filter {
        self.restrict(Filter::by_id(id))
    }

    /// Listing query within this scope.
    pub fn many(&self) -> Query {
        Query {
            filter: self.restrict(Filter::all()),
            limit: LIST_LIMIT,
        }
    }

    /// Stamp the parent reference onto a document about to be written.
    pub fn stamp(&self, doc: &mut Document) {
        if let Some(parent) = self.parent {
            doc.insert(parent.field.to_string(), Value::String(parent.id.to_hex()));
        }
    }

    fn restrict(&self, filter: Filter) -> Filter {
        match self.parent {
            Some(parent) => filter.and(parent.field, parent.id),
            None => filter,
        }
    }
}

/// A bounded multi-document query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub filter: Filter,
    pub limit: usize,
}
