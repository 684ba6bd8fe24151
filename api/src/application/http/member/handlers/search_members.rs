use crate::application::http::query_params::MemberSearchQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Query, State};
use roster_core::domain::member::entities::MemberTeamDto;
use roster_core::domain::member::ports::MemberService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SearchMembersResponse {
    pub data: Vec<MemberTeamDto>,
}

#[utoipa::path(
    get,
    path = "/v1/members",
    tag = "member",
    summary = "Search members",
    description = "Returns every member matching the filters, joined with its team, in insertion order.",
    params(MemberSearchQuery),
    responses(
        (status = 200, body = SearchMembersResponse)
    ),
)]
pub async fn search_members(
    Query(query): Query<MemberSearchQuery>,
    State(state): State<AppState>,
) -> Result<Response<SearchMembersResponse>, ApiError> {
    let members = state
        .service
        .search(query.condition())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SearchMembersResponse { data: members }))
}
