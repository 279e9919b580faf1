use serde::{Deserialize, Serialize};

use crate::model::{Resource, ResourceKind, THEATERS};

/// A theater document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theater {
    #[serde(rename = "theaterId", default, skip_serializing_if = "Option::is_none")]
    pub theater_id: Option<i64>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: Address,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(alias = "street")]
    pub street1: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// GeoJSON point; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl Geo {
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }
}

impl Resource for Theater {
    const KIND: ResourceKind = THEATERS;

    fn sample() -> Self {
        Self {
            theater_id: None,
            location: Location {
                address: Address {
                    street1: "340 W Market".to_string(),
                    city: "Bloomington".to_string(),
                    state: "MN".to_string(),
                    zipcode: "55425".to_string(),
                },
                geo: Geo::point(-93.24565, 44.85466),
            },
        }
    }

    fn sample_revision() -> Self {
        Self {
            theater_id: None,
            location: Location {
                address: Address {
                    street1: "123 New Street".to_string(),
                    city: "Bordeaux".to_string(),
                    state: "IL".to_string(),
                    zipcode: "33000".to_string(),
                },
                geo: Geo::point(-89.605, 39.7817),
            },
        }
    }
}
