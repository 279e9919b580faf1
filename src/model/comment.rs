use serde::{Deserialize, Serialize};

use crate::model::{Resource, ResourceKind, COMMENTS};

/// Field on a comment referencing its movie.
pub const PARENT_FIELD: &str = "movie_id";

/// A comment on a movie.
///
/// The parent reference is not part of the payload; it is stamped from the
/// request path when the comment is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub email: String,
    pub text: String,
    /// RFC 3339 timestamp.
    pub date: String,
}

impl Resource for Comment {
    const KIND: ResourceKind = COMMENTS;

    fn sample() -> Self {
        Self {
            name: "Arbi Tazeur".to_string(),
            email: "arbi.tazeur@fqdn.com".to_string(),
            text: "Film incroyable, un lore de qualité totalement respecté. ps: On veut plus de Nekron"
                .to_string(),
            date: "2025-04-11T08:57:05.000Z".to_string(),
        }
    }

    fn sample_revision() -> Self {
        Self {
            text: "Film incroyable, un lore de qualité totalement respecté. Edit: toujours plus de Nekron"
                .to_string(),
            date: "2025-04-12T10:00:00.000Z".to_string(),
            ..Self::sample()
        }
    }
}
