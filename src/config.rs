use crate::paginator::DEFAULT_PAGE_SIZE;
use std::{env, path::PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub catalog_path: PathBuf,
    pub stamps_per_page: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8080),
            data_path: path_var("APP_DATA_PATH", "data/state.json"),
            catalog_path: path_var("APP_CATALOG_PATH", "data/pools.json"),
            stamps_per_page: stamps_per_page(env::var("STAMPS_PER_PAGE").ok().as_deref()),
        }
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn stamps_per_page(raw: Option<&str>) -> usize {
    match raw.map(|value| value.trim().parse::<usize>()) {
        None => DEFAULT_PAGE_SIZE,
        Some(Ok(size)) if size > 0 => size,
        Some(_) => {
            warn!("invalid STAMPS_PER_PAGE, using {DEFAULT_PAGE_SIZE}");
            DEFAULT_PAGE_SIZE
        }
    }
}
