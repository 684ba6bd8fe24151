use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use roster_core::domain::member::ports::MemberService;
use roster_core::domain::member::value_objects::TeamAgeAverage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetTeamAgeAveragesResponse {
    pub data: Vec<TeamAgeAverage>,
}

#[utoipa::path(
    get,
    path = "/age-averages",
    tag = "team",
    summary = "Average member age per team",
    description = "Groups members by team name. Teams without members are omitted.",
    responses(
        (status = 200, body = GetTeamAgeAveragesResponse)
    ),
)]
pub async fn get_team_age_averages(
    State(state): State<AppState>,
) -> Result<Response<GetTeamAgeAveragesResponse>, ApiError> {
    let averages = state
        .service
        .team_age_averages()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetTeamAgeAveragesResponse { data: averages }))
}
