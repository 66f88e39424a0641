use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/selection", get(handlers::get_selection).post(handlers::select))
        .route("/api/pools/:id/toggle", post(handlers::toggle))
        .route("/api/pools/:id/date", post(handlers::set_date))
        .route("/api/stamps", get(handlers::get_stamps))
        .route("/api/stamps/page", post(handlers::change_stamps_page))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
