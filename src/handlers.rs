use crate::dom::Action;
use crate::errors::AppError;
use crate::models::{
    NoticeId, NoticeRowResponse, OpenNoticeResponse, PageResponse, SearchForm, SearchRequest,
    SearchResponse,
};
use crate::page::{Outcome, Page};
use crate::state::AppState;
use crate::storage::persist_profile;
use crate::ui::render_page;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use tokio::fs;
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let page = state.page.lock().await;
    Html(render_page(&page))
}

pub async fn notices_file(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = fs::read(&state.notices_path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::not_found("notices.json not found")
        } else {
            AppError::internal(err)
        }
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes))
}

pub async fn select_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    apply(&state, Action::SelectMenu(name)).await?;
    Ok(Redirect::to("/"))
}

pub async fn open_notice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    apply(&state, Action::OpenNotice(NoticeId::new(id))).await?;
    Ok(Redirect::to("/"))
}

pub async fn show_notice_list(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Action::ShowNoticeList).await?;
    Ok(Redirect::to("/"))
}

pub async fn search_notices(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Redirect, AppError> {
    apply(&state, Action::Search(form.q)).await?;
    Ok(Redirect::to("/"))
}

pub async fn open_drawer(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Action::OpenDrawer).await?;
    Ok(Redirect::to("/"))
}

pub async fn close_drawer(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Action::CloseDrawer).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_call(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Action::ToggleCallActions).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_call_tooltip(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply(&state, Action::ToggleCallTooltip(index)).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_page(State(state): State<AppState>) -> Json<PageResponse> {
    let page = state.page.lock().await;
    Json(page.snapshot())
}

pub async fn get_notices(State(state): State<AppState>) -> Json<Vec<NoticeRowResponse>> {
    let page = state.page.lock().await;
    Json(to_rows(&page))
}

pub async fn open_notice_api(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OpenNoticeResponse>, AppError> {
    match apply(&state, Action::OpenNotice(NoticeId::new(id.clone()))).await? {
        Outcome::Opened(opened) => Ok(Json(OpenNoticeResponse {
            id: opened.id,
            views: opened.views,
            prev: opened.prev,
            next: opened.next,
        })),
        _ => Err(AppError::not_found(format!("no notice with id {id}"))),
    }
}

pub async fn search_api(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let mut page = state.page.lock().await;
    let visible = page.search(&payload.query);
    Json(SearchResponse {
        query: payload.query,
        visible,
    })
}

/// Applies one page event while holding the page lock, writing the profile
/// back when the event changed it.
async fn apply(state: &AppState, action: Action) -> Result<Outcome, AppError> {
    let mut page = state.page.lock().await;
    let outcome = page.dispatch(action);

    if outcome.touches_profile() {
        if let Err(err) = persist_profile(&state.profile_path, &page.profile).await {
            error!("failed to persist profile: {}", err.message);
            return Err(err);
        }
    }

    Ok(outcome)
}

fn to_rows(page: &Page) -> Vec<NoticeRowResponse> {
    page.document
        .notice_list
        .iter()
        .map(|row| NoticeRowResponse {
            id: row.id.clone(),
            title: row.title.clone(),
            author: row.author.clone(),
            date: row.date.clone(),
            views: row.views,
            visible: row.visible,
        })
        .collect()
}
