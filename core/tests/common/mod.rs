use roster_core::{
    application::{RosterService, service_from_connection},
    domain::{
        member::{CreateMemberInput, MemberService},
        team::{TeamService, value_objects::CreateTeamInput},
    },
    infrastructure::db::schema::create_schema,
};
use sea_orm::{ConnectOptions, Database};

/// Fresh in-memory database with the schema created. A single pooled
/// connection keeps every query on the same in-memory instance.
pub async fn empty_service() -> RosterService {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    create_schema(&db).await.unwrap();

    service_from_connection(db)
}

/// teamA: member1 (10), member2 (20); teamB: member3 (30), member4 (40).
pub async fn four_member_service() -> RosterService {
    let service = empty_service().await;

    for name in ["teamA", "teamB"] {
        service
            .create_team(CreateTeamInput {
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    for (username, age, team) in [
        ("member1", 10, "teamA"),
        ("member2", 20, "teamA"),
        ("member3", 30, "teamB"),
        ("member4", 40, "teamB"),
    ] {
        service
            .create_member(CreateMemberInput {
                username: username.to_string(),
                age,
                team_name: Some(team.to_string()),
            })
            .await
            .unwrap();
    }

    service
}
