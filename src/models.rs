use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A pool from the catalog. Only built by [`crate::catalog`] after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub stamp: Option<String>,
    pub area: Option<String>,
}

impl Location {
    pub fn stamp_src(&self) -> String {
        match &self.stamp {
            Some(stamp) => stamp.clone(),
            None => format!("stamps/{}.png", self.id),
        }
    }

    pub fn area_label(&self) -> &str {
        self.area.as_deref().unwrap_or("Stamped")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub done: bool,
    #[serde(default)]
    pub date: String,
}

impl VisitRecord {
    pub fn visited_on(date: impl Into<String>) -> Self {
        Self {
            done: true,
            date: date.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub index: Option<i64>,
    pub step: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct PageDeltaRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct StampsQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub visited: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolStatusResponse {
    pub id: String,
    pub name: String,
    pub visited: bool,
    pub date: Option<String>,
    pub date_display: Option<String>,
    pub summary: SummaryResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub visited: bool,
    pub date_display: Option<String>,
    pub map_url: String,
    pub summary: SummaryResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StampCard {
    pub id: String,
    pub name: String,
    pub stamp_src: String,
    pub label: String,
    pub date: String,
    pub date_display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StampPageResponse {
    pub items: Vec<StampCard>,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}
