use tracing::info;

use crate::domain::{
    common::entities::app_errors::CoreError,
    member::{ports::MemberService, value_objects::CreateMemberInput},
    team::{ports::TeamService, value_objects::CreateTeamInput},
};

pub const SAMPLE_TEAMS: [&str; 2] = ["teamA", "teamB"];
pub const SAMPLE_MEMBER_COUNT: i32 = 100;

/// Inserts `teamA`, `teamB` and members `member0..member99` whose age is
/// their index, alternating between the two teams.
pub async fn seed_sample_data<S>(service: &S) -> Result<(), CoreError>
where
    S: MemberService + TeamService,
{
    for name in SAMPLE_TEAMS {
        service
            .create_team(CreateTeamInput {
                name: name.to_string(),
            })
            .await?;
    }

    for i in 0..SAMPLE_MEMBER_COUNT {
        let team_name = SAMPLE_TEAMS[(i % 2) as usize];
        service
            .create_member(CreateMemberInput {
                username: format!("member{i}"),
                age: i,
                team_name: Some(team_name.to_string()),
            })
            .await?;
    }

    info!(
        teams = SAMPLE_TEAMS.len(),
        members = SAMPLE_MEMBER_COUNT,
        "sample data seeded"
    );
    Ok(())
}
