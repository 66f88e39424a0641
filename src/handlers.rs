use crate::dates::{format_display, parse_user_date, today_string};
use crate::errors::AppError;
use crate::maps::native_map_url;
use crate::models::{
    DateRequest, PageDeltaRequest, PoolStatusResponse, SelectionRequest, SelectionResponse,
    StampCard, StampPageResponse, StampsQuery, SummaryResponse,
};
use crate::session::Session;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::{header::USER_AGENT, HeaderMap},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    let (visited, total) = session.visited_summary();
    Html(render_index(visited, total))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let session = state.session.lock().await;
    Json(summary(&session))
}

pub async fn get_selection(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SelectionResponse>, AppError> {
    let session = state.session.lock().await;
    Ok(Json(selection_response(&session, user_agent(&headers))?))
}

pub async fn select(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    let moved = match (payload.index, payload.step) {
        (Some(index), None) => session.select_index(index).is_some(),
        (None, Some(step)) => session.move_selection(step).is_some(),
        _ => return Err(AppError::bad_request("send exactly one of 'index' or 'step'")),
    };
    if !moved {
        return Err(AppError::not_found("no pools configured"));
    }

    save(&state, &mut session).await?;
    Ok(Json(selection_response(&session, user_agent(&headers))?))
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PoolStatusResponse>, AppError> {
    let mut session = state.session.lock().await;
    require_pool(&session, &id)?;

    session.toggle_stamp(&id, &today_string());
    save(&state, &mut session).await?;

    Ok(Json(pool_status(&session, &id)))
}

pub async fn set_date(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DateRequest>,
) -> Result<Json<PoolStatusResponse>, AppError> {
    let date = parse_user_date(&payload.date)
        .ok_or_else(|| AppError::bad_request("Please use DD/MM/YYYY format (e.g. 16/12/2025)."))?;

    let mut session = state.session.lock().await;
    require_pool(&session, &id)?;

    session.set_stamp_date(&id, &date);
    save(&state, &mut session).await?;

    Ok(Json(pool_status(&session, &id)))
}

pub async fn get_stamps(
    State(state): State<AppState>,
    Query(query): Query<StampsQuery>,
) -> Result<Json<StampPageResponse>, AppError> {
    let mut session = state.session.lock().await;
    if let Some(page) = query.page {
        session.open_stamps_page(page);
        save(&state, &mut session).await?;
    }
    Ok(Json(stamp_page(&session)))
}

pub async fn change_stamps_page(
    State(state): State<AppState>,
    Json(payload): Json<PageDeltaRequest>,
) -> Result<Json<StampPageResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.change_stamps_page(payload.delta);
    save(&state, &mut session).await?;
    Ok(Json(stamp_page(&session)))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.reset_stamps();
    save(&state, &mut session).await?;
    Ok(Json(summary(&session)))
}

async fn save(state: &AppState, session: &mut Session) -> Result<(), AppError> {
    if session.needs_save() {
        persist_data(&state.data_path, session.store()).await?;
        session.mark_saved();
    }
    Ok(())
}

fn require_pool(session: &Session, id: &str) -> Result<(), AppError> {
    match session.location(id) {
        Some(_) => Ok(()),
        None => Err(AppError::not_found(format!("unknown pool '{id}'"))),
    }
}

fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn summary(session: &Session) -> SummaryResponse {
    let (visited, total) = session.visited_summary();
    SummaryResponse { visited, total }
}

fn pool_status(session: &Session, id: &str) -> PoolStatusResponse {
    let name = session
        .location(id)
        .map(|location| location.name.clone())
        .unwrap_or_default();
    let date = session.ledger().record(id).map(|record| record.date.clone());

    PoolStatusResponse {
        id: id.to_string(),
        name,
        visited: date.is_some(),
        date_display: date.as_deref().map(format_display),
        date,
        summary: summary(session),
    }
}

fn selection_response(session: &Session, user_agent: &str) -> Result<SelectionResponse, AppError> {
    let location = session
        .selected()
        .ok_or_else(|| AppError::not_found("no pools configured"))?;
    let record = session.ledger().record(&location.id);

    Ok(SelectionResponse {
        index: session.selected_index(),
        id: location.id.clone(),
        name: location.name.clone(),
        lat: location.coordinates.lat,
        lng: location.coordinates.lng,
        visited: record.is_some(),
        date_display: record.map(|record| format_display(&record.date)),
        map_url: native_map_url(location, user_agent),
        summary: summary(session),
    })
}

fn stamp_page(session: &Session) -> StampPageResponse {
    let page = session.stamps();
    let ledger = session.ledger();
    let items = page
        .items
        .iter()
        .map(|location| {
            let date = ledger.date_of(&location.id).to_string();
            StampCard {
                id: location.id.clone(),
                name: location.name.clone(),
                stamp_src: location.stamp_src(),
                label: location.area_label().to_string(),
                date_display: format_display(&date),
                date,
            }
        })
        .collect();

    StampPageResponse {
        items,
        page: page.page,
        total_pages: page.total_pages,
        has_prev: page.has_prev(),
        has_next: page.has_next(),
    }
}
