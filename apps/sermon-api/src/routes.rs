use axum::{
	Json, Router,
	extract::{Path, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use sermon_service::{
	AddCommentRequest, ChurchDashboard, ChurchProfile, CommentView, CreateNoteRequest,
	CreateNoteResponse, Error, FeedPage, FeedRequest, FollowResponse, LegacyMigrationReport,
	MigrateLegacyRequest, NoteDetail, NotificationView, PraiseResponse, ProfileOverview,
	ProfileView, RegisterProfileRequest, SearchRequest, SearchResponse, TrendingTagView,
	UpdateProfileRequest, Viewer,
};

use crate::state::AppState;

pub const HEADER_VIEWER_ID: &str = "x-viewer-id";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/feed", post(feed))
		.route("/v1/notes", post(create_note))
		.route("/v1/notes/{id}", get(get_note).delete(delete_note))
		.route("/v1/notes/{id}/moderate_remove", post(moderate_remove_note))
		.route("/v1/notes/{id}/praise", post(toggle_praise))
		.route("/v1/notes/{id}/comments", get(list_comments).post(add_comment))
		.route("/v1/profiles", post(register_profile))
		.route("/v1/profiles/me", axum::routing::patch(update_profile))
		.route("/v1/profiles/by_username/{username}", get(resolve_username))
		.route("/v1/profiles/{id}", get(profile_overview))
		.route("/v1/profiles/{id}/follow", post(follow).delete(unfollow))
		.route("/v1/churches/dashboard", get(church_dashboard))
		.route("/v1/churches/membership", axum::routing::delete(leave_church))
		.route("/v1/churches/{id}", get(church_profile))
		.route("/v1/churches/{id}/membership", post(join_church))
		.route("/v1/notifications", get(unread_notifications))
		.route("/v1/notifications/{id}/read", post(mark_notification_read))
		.route("/v1/tags/trending", get(trending_tags))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/migrate_legacy_content", post(migrate_legacy_content))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn feed(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<FeedRequest>,
) -> Result<Json<FeedPage>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.feed(&viewer, payload).await?;

	Ok(Json(response))
}

async fn create_note(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<CreateNoteRequest>,
) -> Result<Json<CreateNoteResponse>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.create_note(&viewer, payload).await?;

	Ok(Json(response))
}

async fn get_note(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(note_id): Path<Uuid>,
) -> Result<Json<NoteDetail>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.get_note(&viewer, note_id).await?;

	Ok(Json(response))
}

async fn delete_note(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(note_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
	let viewer = viewer_from_headers(&headers)?;

	state.service.delete_note(&viewer, note_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn moderate_remove_note(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(note_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
	let viewer = viewer_from_headers(&headers)?;

	state.service.moderate_remove_note(&viewer, note_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn toggle_praise(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(note_id): Path<Uuid>,
) -> Result<Json<PraiseResponse>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.toggle_praise(&viewer, note_id).await?;

	Ok(Json(response))
}

async fn list_comments(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(note_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.list_comments(&viewer, note_id).await?;

	Ok(Json(response))
}

async fn add_comment(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(note_id): Path<Uuid>,
	Json(payload): Json<AddCommentRequest>,
) -> Result<Json<CommentView>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.add_comment(&viewer, note_id, payload).await?;

	Ok(Json(response))
}

async fn register_profile(
	State(state): State<AppState>,
	Json(payload): Json<RegisterProfileRequest>,
) -> Result<Json<ProfileView>, ApiError> {
	let response = state.service.register_profile(payload).await?;

	Ok(Json(response))
}

async fn update_profile(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.update_profile(&viewer, payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ResolvedUsername {
	id: Uuid,
}

async fn resolve_username(
	State(state): State<AppState>,
	Path(username): Path<String>,
) -> Result<Json<ResolvedUsername>, ApiError> {
	let id = state.service.resolve_username(&username).await?;

	Ok(Json(ResolvedUsername { id }))
}

async fn profile_overview(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileOverview>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.profile_overview(&viewer, profile_id).await?;

	Ok(Json(response))
}

async fn follow(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(profile_id): Path<Uuid>,
) -> Result<Json<FollowResponse>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.follow(&viewer, profile_id).await?;

	Ok(Json(response))
}

async fn unfollow(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(profile_id): Path<Uuid>,
) -> Result<Json<FollowResponse>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.unfollow(&viewer, profile_id).await?;

	Ok(Json(response))
}

async fn church_profile(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(church_id): Path<Uuid>,
) -> Result<Json<ChurchProfile>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.church_profile(&viewer, church_id).await?;

	Ok(Json(response))
}

async fn church_dashboard(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<ChurchDashboard>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.church_dashboard(&viewer).await?;

	Ok(Json(response))
}

async fn join_church(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(church_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
	let viewer = viewer_from_headers(&headers)?;

	state.service.join_church(&viewer, church_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn leave_church(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
	let viewer = viewer_from_headers(&headers)?;

	state.service.leave_church(&viewer).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn unread_notifications(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
	let viewer = viewer_from_headers(&headers)?;
	let response = state.service.unread_notifications(&viewer).await?;

	Ok(Json(response))
}

async fn mark_notification_read(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
	let viewer = viewer_from_headers(&headers)?;

	state.service.mark_notification_read(&viewer, notification_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn trending_tags(
	State(state): State<AppState>,
) -> Result<Json<Vec<TrendingTagView>>, ApiError> {
	let response = state.service.trending_tags().await?;

	Ok(Json(response))
}

async fn migrate_legacy_content(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<MigrateLegacyRequest>,
) -> Result<Json<LegacyMigrationReport>, ApiError> {
	require_admin_token(&state, &headers)?;

	let response = state.service.migrate_legacy_content(payload).await?;

	Ok(Json(response))
}

/// Reads the viewer from `x-viewer-id`. A missing header means an anonymous viewer.
fn viewer_from_headers(headers: &HeaderMap) -> Result<Viewer, ApiError> {
	let Some(raw) = headers.get(HEADER_VIEWER_ID) else {
		return Ok(Viewer::anonymous());
	};
	let profile_id = raw
		.to_str()
		.ok()
		.and_then(|value| Uuid::parse_str(value.trim()).ok())
		.ok_or_else(|| {
			json_error(
				StatusCode::BAD_REQUEST,
				"INVALID_REQUEST",
				format!("{HEADER_VIEWER_ID} must be a UUID."),
			)
		})?;

	Ok(Viewer::signed_in(profile_id))
}

fn require_admin_token(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
	let Some(expected) = state.service.cfg.security.admin_auth_token.as_deref() else {
		return Ok(());
	};
	let provided = headers
		.get(axum::http::header::AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.strip_prefix("Bearer "))
		.map(str::trim);

	if provided != Some(expected) {
		return Err(json_error(
			StatusCode::UNAUTHORIZED,
			"UNAUTHENTICATED",
			"A valid admin bearer token is required.",
		));
	}

	Ok(())
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			Error::NotFound { message } => json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			Error::Remote { message } => {
				tracing::error!(error = %message, "Remote failure while serving a request.");

				json_error(
					StatusCode::SERVICE_UNAVAILABLE,
					"REMOTE_UNAVAILABLE",
					"A backing service is unavailable. Try again shortly.",
				)
			},
			Error::Unauthenticated => json_error(
				StatusCode::UNAUTHORIZED,
				"UNAUTHENTICATED",
				"A signed-in viewer is required.",
			),
			Error::Forbidden { message } => json_error(StatusCode::FORBIDDEN, "FORBIDDEN", message),
			Error::Conflict { message } => json_error(StatusCode::CONFLICT, "CONFLICT", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}
