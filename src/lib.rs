pub mod app;
pub mod catalog;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod maps;
pub mod models;
pub mod paginator;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use session::Session;
pub use state::AppState;
pub use storage::{load_data, MemoryStore};
