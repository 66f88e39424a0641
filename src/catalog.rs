use crate::models::{Coordinates, Location};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read pool catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse pool catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pool #{index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },
    #[error("duplicate pool id '{0}'")]
    DuplicateId(String),
    #[error("no pools configured")]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    List(Vec<RawLocation>),
    Wrapped { pools: Vec<RawLocation> },
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    id: Option<String>,
    name: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    stamp: Option<String>,
    suburb: Option<String>,
    location: Option<String>,
    area: Option<String>,
}

impl RawLocation {
    fn validate(self, index: usize) -> Result<Location, CatalogError> {
        let invalid = |reason: &str| CatalogError::Invalid {
            index,
            reason: reason.to_string(),
        };

        let id = non_blank(self.id).ok_or_else(|| invalid("missing id"))?;
        let name = non_blank(self.name).ok_or_else(|| invalid("missing name"))?;
        let lat = self.lat.ok_or_else(|| invalid("missing lat"))?;
        let lng = self.lng.ok_or_else(|| invalid("missing lng"))?;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("lat out of range"));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("lng out of range"));
        }

        Ok(Location {
            id,
            name,
            coordinates: Coordinates { lat, lng },
            stamp: non_blank(self.stamp),
            area: non_blank(self.suburb)
                .or_else(|| non_blank(self.location))
                .or_else(|| non_blank(self.area)),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Location>, CatalogError> {
    let raw = match serde_json::from_slice::<RawCatalog>(bytes)? {
        RawCatalog::List(pools) | RawCatalog::Wrapped { pools } => pools,
    };
    if raw.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    let mut pools = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let location = entry.validate(index)?;
        if !seen.insert(location.id.clone()) {
            return Err(CatalogError::DuplicateId(location.id));
        }
        pools.push(location);
    }
    Ok(pools)
}

pub async fn load_catalog(path: &Path) -> Result<Vec<Location>, CatalogError> {
    let bytes = fs::read(path).await?;
    parse_catalog(&bytes)
}
