use crate::application::http::query_params::MemberSearchQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Query, State};
use roster_core::domain::member::ports::MemberService;
use roster_core::domain::member::value_objects::AgeStats;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetMemberStatsResponse {
    pub data: AgeStats,
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "member",
    summary = "Age statistics",
    description = "Count, sum, average, max and min age of the members matching the filters.",
    params(MemberSearchQuery),
    responses(
        (status = 200, body = GetMemberStatsResponse)
    ),
)]
pub async fn get_member_stats(
    Query(query): Query<MemberSearchQuery>,
    State(state): State<AppState>,
) -> Result<Response<GetMemberStatsResponse>, ApiError> {
    let stats = state
        .service
        .age_stats(query.condition())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetMemberStatsResponse { data: stats }))
}
