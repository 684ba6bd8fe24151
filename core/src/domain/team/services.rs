use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    member::ports::MemberRepository,
    team::{
        entities::Team,
        ports::{TeamRepository, TeamService},
        value_objects::CreateTeamInput,
    },
};

impl<M, T> TeamService for Service<M, T>
where
    M: MemberRepository,
    T: TeamRepository,
{
    async fn create_team(&self, input: CreateTeamInput) -> Result<Team, CoreError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid_argument("team name must not be blank"));
        }
        if self.team_repository.get_by_name(name.to_string()).await?.is_some() {
            return Err(CoreError::invalid_argument(format!(
                "team {name} already exists"
            )));
        }

        self.team_repository.create_team(name.to_string()).await
    }

    async fn get_teams(&self) -> Result<Vec<Team>, CoreError> {
        self.team_repository.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{member::ports::MockMemberRepository, team::ports::MockTeamRepository};

    #[tokio::test]
    async fn test_create_team_trims_name() {
        let mut teams = MockTeamRepository::new();
        teams
            .expect_get_by_name()
            .withf(|name| name == "teamA")
            .times(1)
            .returning(|_| Box::pin(async { Ok(None) }));
        teams
            .expect_create_team()
            .withf(|name| name == "teamA")
            .times(1)
            .returning(|name| Box::pin(async move { Ok(Team { id: 1, name }) }));

        let service = Service::new(MockMemberRepository::new(), teams);
        let team = service
            .create_team(CreateTeamInput {
                name: "  teamA ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(team.name, "teamA");
    }

    #[tokio::test]
    async fn test_create_team_rejects_blank_name() {
        let mut teams = MockTeamRepository::new();
        teams.expect_create_team().never();

        let service = Service::new(MockMemberRepository::new(), teams);
        let result = service
            .create_team(CreateTeamInput {
                name: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_create_team_rejects_duplicate_name() {
        let mut teams = MockTeamRepository::new();
        teams.expect_get_by_name().times(1).returning(|name| {
            Box::pin(async move { Ok(Some(Team { id: 1, name })) })
        });
        teams.expect_create_team().never();

        let service = Service::new(MockMemberRepository::new(), teams);
        let result = service
            .create_team(CreateTeamInput {
                name: "teamA".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }
}
