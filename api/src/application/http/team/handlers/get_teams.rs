use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use roster_core::domain::team::entities::Team;
use roster_core::domain::team::ports::TeamService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetTeamsResponse {
    pub data: Vec<Team>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "team",
    summary = "Get teams",
    responses(
        (status = 200, body = GetTeamsResponse)
    ),
)]
pub async fn get_teams(
    State(state): State<AppState>,
) -> Result<Response<GetTeamsResponse>, ApiError> {
    let teams = state.service.get_teams().await.map_err(ApiError::from)?;

    Ok(Response::OK(GetTeamsResponse { data: teams }))
}
