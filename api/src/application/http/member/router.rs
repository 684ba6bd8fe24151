use super::handlers::create_member::{__path_create_member, create_member};
use super::handlers::get_member::{__path_get_member, get_member};
use super::handlers::get_member_stats::{__path_get_member_stats, get_member_stats};
use super::handlers::search_members::{__path_search_members, search_members};
use super::handlers::search_members_page::{
    __path_search_members_page_optimized, __path_search_members_page_simple,
    search_members_page_optimized, search_members_page_simple,
};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_member, get_member, get_member_stats))]
pub struct MemberApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    search_members,
    search_members_page_simple,
    search_members_page_optimized
))]
pub struct MemberSearchApiDoc;

pub fn member_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/members"), post(create_member))
        .route(&format!("{root_path}/members/stats"), get(get_member_stats))
        .route(
            &format!("{root_path}/members/{{member_id}}"),
            get(get_member),
        )
        .route(&format!("{root_path}/v1/members"), get(search_members))
        .route(
            &format!("{root_path}/v2/members"),
            get(search_members_page_simple),
        )
        .route(
            &format!("{root_path}/v3/members"),
            get(search_members_page_optimized),
        )
}
