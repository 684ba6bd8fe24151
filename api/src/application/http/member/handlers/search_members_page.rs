use crate::application::http::query_params::MemberSearchQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Query, State};
use roster_core::domain::member::entities::MemberTeamDto;
use roster_core::domain::member::ports::MemberService;
use roster_core::domain::member::value_objects::{CountStrategy, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchMembersPageResponse {
    pub data: Vec<MemberTeamDto>,
    pub offset: i64,
    pub limit: i64,
    pub count: i64,
    /// Zero-based page index, `offset / limit`.
    pub page: i64,
    pub total_pages: i64,
    pub has_next: bool,
}

impl From<Paginated<MemberTeamDto>> for SearchMembersPageResponse {
    fn from(page: Paginated<MemberTeamDto>) -> Self {
        let page_number = page.page_number();
        let total_pages = page.total_pages();
        let has_next = page.has_next();

        Self {
            data: page.items,
            offset: page.offset,
            limit: page.limit,
            count: page.count,
            page: page_number,
            total_pages,
            has_next,
        }
    }
}

async fn search_page(
    state: AppState,
    query: MemberSearchQuery,
    strategy: CountStrategy,
) -> Result<Response<SearchMembersPageResponse>, ApiError> {
    let page = state
        .service
        .search_page(query.condition(), query.pagination().into(), strategy)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SearchMembersPageResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/v2/members",
    tag = "member",
    summary = "Search members, paged",
    description = "One page of matching members. The total count query always runs.",
    params(MemberSearchQuery),
    responses(
        (status = 200, body = SearchMembersPageResponse)
    ),
)]
pub async fn search_members_page_simple(
    Query(query): Query<MemberSearchQuery>,
    State(state): State<AppState>,
) -> Result<Response<SearchMembersPageResponse>, ApiError> {
    search_page(state, query, CountStrategy::Simple).await
}

#[utoipa::path(
    get,
    path = "/v3/members",
    tag = "member",
    summary = "Search members, paged with count skipping",
    description = "One page of matching members. The total count query is skipped when the page proves the total.",
    params(MemberSearchQuery),
    responses(
        (status = 200, body = SearchMembersPageResponse)
    ),
)]
pub async fn search_members_page_optimized(
    Query(query): Query<MemberSearchQuery>,
    State(state): State<AppState>,
) -> Result<Response<SearchMembersPageResponse>, ApiError> {
    search_page(state, query, CountStrategy::Optimized).await
}
