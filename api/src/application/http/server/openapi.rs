use crate::application::http::{
    member::router::{MemberApiDoc, MemberSearchApiDoc},
    team::router::TeamApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API"
    ),
    nest(
        (path = "/teams", api = TeamApiDoc),
        (path = "/members", api = MemberApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document: the nested resources plus the versioned search endpoints,
/// which live outside the `/members` prefix.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi().merge_from(MemberSearchApiDoc::openapi())
}
