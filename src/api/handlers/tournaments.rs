use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use log::{info, warn};
use std::sync::Arc;

use super::{session_from_headers, AppState, TableParams, UploadParams};
use crate::api::models::{CreateTournamentRequest, ErrorResponse, TournamentDetail};
use crate::database;
use crate::errors::{AuthError, UploadError};
use crate::services::UploadService;
use crate::stats::{apply_query, SortOrder, StatKind, TableQuery};

pub async fn list_tournaments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::tournaments::list_summaries(&mut conn) {
        Ok(summaries) => Json(summaries).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateTournamentRequest>,
) -> impl IntoResponse {
    if let Err(e) = authorize(&headers, &state) {
        return unauthorized(e);
    }

    let name = request.name.trim();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Tournament name is required").into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::tournaments::insert_tournament(&mut conn, name) {
        Ok(tournament) => {
            info!("Created tournament {} '{}'", tournament.id, tournament.name);
            (StatusCode::CREATED, Json(detail(tournament, None, &TableQuery::default()))).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Insert Error: {}", e)).into_response(),
    }
}

pub async fn get_tournament(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<TableParams>,
) -> impl IntoResponse {
    let kind = match params.kind.as_deref().map(str::parse::<StatKind>).transpose() {
        Ok(kind) => kind,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };
    let query = TableQuery {
        sort_by: params.sort_by,
        order: match params.order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        },
        name_contains: params.filter,
        position: params.pos,
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::tournaments::find_by_id(&mut conn, id) {
        Ok(Some(tournament)) => Json(detail(tournament, kind, &query)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Tournament not found").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn delete_tournament(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    if let Err(e) = authorize(&headers, &state) {
        return unauthorized(e);
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::tournaments::delete_tournament(&mut conn, id) {
        Ok(true) => {
            info!("Deleted tournament {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => (StatusCode::NOT_FOUND, "Tournament not found").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Delete Error: {}", e)).into_response(),
    }
}

/// Raw CSV body; the file name comes from the query string
pub async fn upload_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> impl IntoResponse {
    let session = match session_from_headers(&headers, &state.config) {
        Ok(session) => session,
        Err(e) => return upload_error(UploadError::from(e)),
    };
    let filename = params.filename.unwrap_or_default();

    let service = UploadService::new(state.pool.clone(), &state.config);
    match service.ingest(&session, id, &filename, &body) {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            warn!("Upload '{}' to tournament {} rejected: {}", filename, id, e);
            upload_error(e)
        }
    }
}

fn authorize(headers: &HeaderMap, state: &AppState) -> Result<(), AuthError> {
    session_from_headers(headers, &state.config)?.require_authorized()
}

fn unauthorized(e: AuthError) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(e))).into_response()
}

fn upload_error(e: UploadError) -> Response {
    let status = match &e {
        UploadError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        UploadError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::DuplicateFile => StatusCode::CONFLICT,
        UploadError::TournamentNotFound(_) => StatusCode::NOT_FOUND,
        UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        UploadError::InvalidFileType(_) | UploadError::MissingColumns { .. } | UploadError::NoDataRows => {
            StatusCode::BAD_REQUEST
        }
    };
    let category = e.category();
    (status, Json(ErrorResponse::with_category(e, category))).into_response()
}

fn detail(
    tournament: database::TournamentRecord,
    kind: Option<StatKind>,
    query: &TableQuery,
) -> TournamentDetail {
    let wants = |k: StatKind| kind.is_none_or(|selected| selected == k);

    TournamentDetail {
        id: tournament.id,
        name: tournament.name,
        upload_count: tournament.file_hashes.len(),
        created_at: tournament.created_at,
        updated_at: tournament.updated_at,
        batting: wants(StatKind::Batting).then(|| apply_query(&tournament.batting, query)),
        pitching: wants(StatKind::Pitching).then(|| apply_query(&tournament.pitching, query)),
    }
}
