use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/data/notices.json", get(handlers::notices_file))
        .route("/sections/:name", post(handlers::select_section))
        .route("/notices/more", post(handlers::show_notice_list))
        .route("/notices/back", post(handlers::show_notice_list))
        .route("/notices/search", post(handlers::search_notices))
        .route("/notices/:id/open", post(handlers::open_notice))
        .route("/drawer/open", post(handlers::open_drawer))
        .route("/drawer/close", post(handlers::close_drawer))
        .route("/call/toggle", post(handlers::toggle_call))
        .route("/call/:index/tooltip", post(handlers::toggle_call_tooltip))
        .route("/api/page", get(handlers::get_page))
        .route("/api/notices", get(handlers::get_notices))
        .route("/api/notices/search", post(handlers::search_api))
        .route("/api/notices/:id/open", post(handlers::open_notice_api))
        .with_state(state)
}
