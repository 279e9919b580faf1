use serde::{Deserialize, Serialize};

use crate::model::{Resource, ResourceKind, MOVIES};

/// A movie document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

impl Resource for Movie {
    const KIND: ResourceKind = MOVIES;

    fn sample() -> Self {
        Self {
            title: "Warhammer New Days".to_string(),
            year: 2026,
            director: Some("Arbi Tazeur".to_string()),
            genre: vec!["action".to_string(), "drame".to_string()],
            plot: Some("...The last day of Humanity has come".to_string()),
        }
    }

    fn sample_revision() -> Self {
        Self {
            plot: Some(
                "...The last day of Humanity has come...Never mind Humanity will survive".to_string(),
            ),
            ..Self::sample()
        }
    }
}
