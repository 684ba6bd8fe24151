use tracing::debug;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    member::{
        entities::{Member, MemberTeamDto, NewMember},
        ports::{MemberRepository, MemberService},
        predicates::search_predicate,
        value_objects::{
            AgeStats, CountStrategy, CreateMemberInput, MemberSearchCondition, OffsetLimit,
            Paginated, TeamAgeAverage,
        },
    },
    query::{Assignment, Field, FieldValue, JoinKind, OrderSpec, Predicate, SelectQuery},
    team::ports::TeamRepository,
};

/// Bulk statements run against the member table alone, so they cannot
/// reference team columns.
fn ensure_bulk_statement(predicate: &Predicate, assignments: &[Assignment]) -> Result<(), CoreError> {
    predicate.validate()?;
    if predicate.references_team() {
        return Err(CoreError::invalid_argument(
            "bulk statements cannot filter on team fields",
        ));
    }
    assignments.iter().try_for_each(Assignment::validate)
}

impl<M, T> MemberService for Service<M, T>
where
    M: MemberRepository,
    T: TeamRepository,
{
    async fn create_member(&self, input: CreateMemberInput) -> Result<Member, CoreError> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(CoreError::invalid_argument("username must not be blank"));
        }
        if input.age < 0 {
            return Err(CoreError::invalid_argument("age must be >= 0"));
        }

        let team_id = match input.team_name.as_deref().map(str::trim) {
            Some(team_name) if !team_name.is_empty() => {
                let team = self
                    .team_repository
                    .get_by_name(team_name.to_string())
                    .await?
                    .ok_or(CoreError::NotFound)?;
                Some(team.id)
            }
            _ => None,
        };

        self.member_repository
            .create_member(NewMember {
                username: username.to_string(),
                age: input.age,
                team_id,
            })
            .await
    }

    async fn get_member(&self, member_id: i64) -> Result<Member, CoreError> {
        self.member_repository
            .get_by_id(member_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn get_members(&self) -> Result<Vec<Member>, CoreError> {
        self.member_repository.find_all().await
    }

    async fn find_by_username(&self, username: String) -> Result<Vec<Member>, CoreError> {
        self.member_repository.find_by_username(username).await
    }

    async fn find_by_field(&self, field: Field, value: FieldValue) -> Result<Vec<Member>, CoreError> {
        let predicate = Predicate::from(field.equals(value));
        predicate.validate()?;

        let join = if field.is_team_field() {
            JoinKind::Inner
        } else {
            JoinKind::Left
        };

        self.member_repository
            .select_members(SelectQuery::new(predicate).join(join))
            .await
    }

    async fn find_members(
        &self,
        predicate: Predicate,
        order: Vec<OrderSpec>,
    ) -> Result<Vec<Member>, CoreError> {
        predicate.validate()?;

        let query = SelectQuery {
            predicate,
            order,
            ..Default::default()
        };

        self.member_repository.select_members(query).await
    }

    async fn find_one(&self, predicate: Predicate) -> Result<Member, CoreError> {
        predicate.validate()?;

        let mut members = self
            .member_repository
            .select_members(SelectQuery::new(predicate).limit(2))
            .await?;

        match members.len() {
            0 => Err(CoreError::NotFound),
            1 => Ok(members.remove(0)),
            n => Err(CoreError::NonUniqueResult(n)),
        }
    }

    async fn find_member_teams(&self, query: SelectQuery) -> Result<Vec<MemberTeamDto>, CoreError> {
        query.predicate.validate()?;
        query.join_on.validate()?;

        self.member_repository.select_member_teams(query).await
    }

    async fn search(&self, condition: MemberSearchCondition) -> Result<Vec<MemberTeamDto>, CoreError> {
        let predicate = search_predicate(&condition);

        self.member_repository
            .select_member_teams(SelectQuery::new(predicate))
            .await
    }

    async fn search_page(
        &self,
        condition: MemberSearchCondition,
        pagination: OffsetLimit,
        strategy: CountStrategy,
    ) -> Result<Paginated<MemberTeamDto>, CoreError> {
        pagination.validate()?;

        let predicate = search_predicate(&condition);
        let query = SelectQuery::new(predicate.clone())
            .offset(pagination.offset as u64)
            .limit(pagination.limit as u64);

        let (items, count) = match strategy {
            CountStrategy::Simple => {
                let (items, count) = futures::try_join!(
                    self.member_repository.select_member_teams(query),
                    self.member_repository.count(predicate, JoinKind::Left),
                )?;
                (items, count as i64)
            }
            CountStrategy::Optimized => {
                let items = self.member_repository.select_member_teams(query).await?;
                let count = match pagination.total_from_short_page(items.len()) {
                    Some(total) => {
                        debug!(total, "last page reached, count query skipped");
                        total
                    }
                    None => self.member_repository.count(predicate, JoinKind::Left).await? as i64,
                };
                (items, count)
            }
        };

        Ok(Paginated {
            items,
            offset: pagination.offset,
            limit: pagination.limit,
            count,
        })
    }

    async fn bulk_update_username(
        &self,
        new_username: String,
        age_less_than: i32,
    ) -> Result<u64, CoreError> {
        let predicate = Predicate::from(Field::Age.less_than(age_less_than));
        let assignments = vec![Assignment::Set(Field::Username, new_username.into())];
        ensure_bulk_statement(&predicate, &assignments)?;

        self.member_repository
            .update_many(predicate, assignments)
            .await
    }

    async fn bulk_increment_age(&self, delta: i32) -> Result<u64, CoreError> {
        let assignments = vec![Assignment::Add(Field::Age, delta as i64)];
        ensure_bulk_statement(&Predicate::all(), &assignments)?;

        self.member_repository
            .update_many(Predicate::all(), assignments)
            .await
    }

    async fn bulk_delete(&self, age_greater_than: i32) -> Result<u64, CoreError> {
        let predicate = Predicate::from(Field::Age.greater_than(age_greater_than));
        ensure_bulk_statement(&predicate, &[])?;

        self.member_repository.delete_many(predicate).await
    }

    async fn age_stats(&self, condition: MemberSearchCondition) -> Result<AgeStats, CoreError> {
        self.member_repository
            .age_stats(search_predicate(&condition))
            .await
    }

    async fn team_age_averages(&self) -> Result<Vec<TeamAgeAverage>, CoreError> {
        let totals = self.member_repository.team_age_totals().await?;

        Ok(totals.into_iter().map(TeamAgeAverage::from).collect())
    }

    async fn oldest_members(&self) -> Result<Vec<Member>, CoreError> {
        let stats = self.member_repository.age_stats(Predicate::all()).await?;

        let Some(max) = stats.max else {
            return Ok(Vec::new());
        };

        self.member_repository
            .select_members(SelectQuery::new(Field::Age.equals(max).into()))
            .await
    }

    async fn members_at_or_above_average_age(&self) -> Result<Vec<Member>, CoreError> {
        let stats = self.member_repository.age_stats(Predicate::all()).await?;

        let Some(average) = stats.average else {
            return Ok(Vec::new());
        };

        // Ages are integral, so `age >= avg` is `age >= ceil(avg)`.
        let threshold = average.ceil() as i64;

        self.member_repository
            .select_members(SelectQuery::new(Field::Age.at_least(threshold).into()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        member::ports::MockMemberRepository,
        team::{entities::Team, ports::MockTeamRepository},
    };

    fn dto(member_id: i64, age: i32, team_name: &str) -> MemberTeamDto {
        MemberTeamDto {
            member_id,
            username: format!("member{member_id}"),
            age,
            team_id: Some(if team_name == "teamA" { 1 } else { 2 }),
            team_name: Some(team_name.to_string()),
        }
    }

    fn member(id: i64, age: i32) -> Member {
        Member {
            id,
            username: format!("member{id}"),
            age,
            team_id: None,
        }
    }

    fn service(members: MockMemberRepository) -> Service<MockMemberRepository, MockTeamRepository> {
        Service::new(members, MockTeamRepository::new())
    }

    fn expect_page(members: &mut MockMemberRepository, rows: Vec<MemberTeamDto>) {
        members
            .expect_select_member_teams()
            .times(1)
            .returning(move |_| {
                let rows = rows.clone();
                Box::pin(async move { Ok(rows) })
            });
    }

    #[tokio::test]
    async fn test_search_passes_built_predicate() {
        let mut members = MockMemberRepository::new();
        members
            .expect_select_member_teams()
            .withf(|query| {
                query.predicate.clauses().len() == 3
                    && query.join == JoinKind::Left
                    && query.offset.is_none()
                    && query.limit.is_none()
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![dto(4, 40, "teamB")]) }));

        let condition = MemberSearchCondition::default()
            .with_age_goe(35)
            .with_age_loe(40)
            .with_team_name("teamB");

        let result = service(members).search(condition).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].username, "member4");
    }

    #[tokio::test]
    async fn test_find_member_teams_forwards_join_restriction() {
        let mut members = MockMemberRepository::new();
        members
            .expect_select_member_teams()
            .withf(|query| {
                query.predicate.is_match_all() && query.join_on.clauses().len() == 1
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![dto(1, 10, "teamA")]) }));

        let query =
            SelectQuery::new(Predicate::all()).join_on(Field::TeamName.equals("teamA").into());
        let rows = service(members).find_member_teams(query).await.unwrap();

        assert_eq!(rows, vec![dto(1, 10, "teamA")]);
    }

    #[tokio::test]
    async fn test_find_member_teams_rejects_malformed_join_restriction() {
        let mut members = MockMemberRepository::new();
        members.expect_select_member_teams().never();

        let query = SelectQuery::new(Predicate::all()).join_on(Field::TeamName.equals(7).into());
        let result = service(members).find_member_teams(query).await;

        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_optimized_first_short_page_skips_count() {
        let mut members = MockMemberRepository::new();
        expect_page(&mut members, vec![dto(1, 10, "teamA"), dto(2, 20, "teamA")]);
        members.expect_count().never();

        let page = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(0, 3),
                CountStrategy::Optimized,
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.count, 2);
    }

    #[tokio::test]
    async fn test_optimized_later_short_page_skips_count() {
        let mut members = MockMemberRepository::new();
        expect_page(&mut members, vec![dto(4, 40, "teamB")]);
        members.expect_count().never();

        let page = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(3, 3),
                CountStrategy::Optimized,
            )
            .await
            .unwrap();

        assert_eq!(page.count, 4);
        assert_eq!(page.offset, 3);
    }

    #[tokio::test]
    async fn test_optimized_full_page_runs_count() {
        let mut members = MockMemberRepository::new();
        expect_page(
            &mut members,
            vec![dto(1, 10, "teamA"), dto(2, 20, "teamA"), dto(3, 30, "teamB")],
        );
        members
            .expect_count()
            .withf(|predicate, join| predicate.is_match_all() && *join == JoinKind::Left)
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(4) }));

        let page = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(0, 3),
                CountStrategy::Optimized,
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.count, 4);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_optimized_empty_page_past_end_runs_count() {
        let mut members = MockMemberRepository::new();
        expect_page(&mut members, vec![]);
        members
            .expect_count()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(4) }));

        let page = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(10, 3),
                CountStrategy::Optimized,
            )
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.count, 4);
    }

    #[tokio::test]
    async fn test_simple_always_counts() {
        let mut members = MockMemberRepository::new();
        expect_page(&mut members, vec![dto(1, 10, "teamA")]);
        members
            .expect_count()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(1) }));

        let page = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(0, 3),
                CountStrategy::Simple,
            )
            .await
            .unwrap();

        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn test_non_positive_limit_is_rejected_before_querying() {
        let mut members = MockMemberRepository::new();
        members.expect_select_member_teams().never();
        members.expect_count().never();

        let result = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(0, 0),
                CountStrategy::Optimized,
            )
            .await;

        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_storage_error_fails_whole_page() {
        let mut members = MockMemberRepository::new();
        expect_page(
            &mut members,
            vec![dto(1, 10, "teamA"), dto(2, 20, "teamA")],
        );
        members.expect_count().times(1).returning(|_, _| {
            Box::pin(async { Err(CoreError::StorageError("connection reset".to_string())) })
        });

        let result = service(members)
            .search_page(
                MemberSearchCondition::default(),
                OffsetLimit::new(0, 2),
                CountStrategy::Simple,
            )
            .await;

        assert_eq!(
            result,
            Err(CoreError::StorageError("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn test_bulk_update_username() {
        let mut members = MockMemberRepository::new();
        members
            .expect_update_many()
            .withf(|predicate, assignments| {
                *predicate == Predicate::from(Field::Age.less_than(28))
                    && assignments
                        == &vec![Assignment::Set(
                            Field::Username,
                            FieldValue::Text("guest".to_string()),
                        )]
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(2) }));

        let affected = service(members)
            .bulk_update_username("guest".to_string(), 28)
            .await
            .unwrap();

        assert_eq!(affected, 2);
    }

    #[tokio::test]
    async fn test_bulk_increment_and_delete() {
        let mut members = MockMemberRepository::new();
        members
            .expect_update_many()
            .withf(|predicate, assignments| {
                predicate.is_match_all() && assignments == &vec![Assignment::Add(Field::Age, 1)]
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(4) }));
        members
            .expect_delete_many()
            .withf(|predicate| *predicate == Predicate::from(Field::Age.greater_than(18)))
            .times(1)
            .returning(|_| Box::pin(async { Ok(3) }));

        let service = service(members);
        assert_eq!(service.bulk_increment_age(1).await.unwrap(), 4);
        assert_eq!(service.bulk_delete(18).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_one() {
        let mut members = MockMemberRepository::new();
        members
            .expect_select_members()
            .withf(|query| query.limit == Some(2))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![member(1, 10)]) }));
        let found = service(members)
            .find_one(Field::Username.equals("member1").into())
            .await
            .unwrap();
        assert_eq!(found.id, 1);

        let mut members = MockMemberRepository::new();
        members
            .expect_select_members()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        let missing = service(members)
            .find_one(Field::Username.equals("nobody").into())
            .await;
        assert_eq!(missing, Err(CoreError::NotFound));

        let mut members = MockMemberRepository::new();
        members
            .expect_select_members()
            .returning(|_| Box::pin(async { Ok(vec![member(1, 10), member(2, 10)]) }));
        let many = service(members).find_one(Field::Age.equals(10).into()).await;
        assert_eq!(many, Err(CoreError::NonUniqueResult(2)));
    }

    #[tokio::test]
    async fn test_find_members_rejects_malformed_predicate() {
        let mut members = MockMemberRepository::new();
        members.expect_select_members().never();

        let result = service(members)
            .find_members(Field::Age.equals("old").into(), vec![])
            .await;

        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_find_by_team_field_uses_inner_join() {
        let mut members = MockMemberRepository::new();
        members
            .expect_select_members()
            .withf(|query| query.join == JoinKind::Inner && query.predicate.references_team())
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![member(3, 30)]) }));

        let result = service(members)
            .find_by_field(Field::TeamName, "teamB".into())
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_create_member_with_unknown_team() {
        let mut teams = MockTeamRepository::new();
        teams
            .expect_get_by_name()
            .returning(|_| Box::pin(async { Ok(None) }));
        let mut members = MockMemberRepository::new();
        members.expect_create_member().never();

        let result = Service::new(members, teams)
            .create_member(CreateMemberInput {
                username: "member1".to_string(),
                age: 10,
                team_name: Some("teamZ".to_string()),
            })
            .await;

        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn test_create_member_resolves_team() {
        let mut teams = MockTeamRepository::new();
        teams.expect_get_by_name().returning(|name| {
            Box::pin(async move { Ok(Some(Team { id: 7, name })) })
        });
        let mut members = MockMemberRepository::new();
        members
            .expect_create_member()
            .withf(|new| new.team_id == Some(7) && new.username == "member1")
            .returning(|new| {
                Box::pin(async move {
                    Ok(Member {
                        id: 1,
                        username: new.username,
                        age: new.age,
                        team_id: new.team_id,
                    })
                })
            });

        let created = Service::new(members, teams)
            .create_member(CreateMemberInput {
                username: "member1".to_string(),
                age: 10,
                team_name: Some("teamA".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(created.team_id, Some(7));
    }

    #[tokio::test]
    async fn test_members_at_or_above_average_age() {
        let mut members = MockMemberRepository::new();
        members.expect_age_stats().returning(|_| {
            Box::pin(async {
                Ok(AgeStats {
                    count: 4,
                    sum: 101,
                    average: Some(25.25),
                    max: Some(40),
                    min: Some(10),
                })
            })
        });
        members
            .expect_select_members()
            .withf(|query| query.predicate == Predicate::from(Field::Age.at_least(26)))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![member(3, 30), member(4, 40)]) }));

        let result = service(members)
            .members_at_or_above_average_age()
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_oldest_members_on_empty_table() {
        let mut members = MockMemberRepository::new();
        members
            .expect_age_stats()
            .returning(|_| Box::pin(async { Ok(AgeStats::default()) }));
        members.expect_select_members().never();

        let result = service(members).oldest_members().await.unwrap();
        assert!(result.is_empty());
    }
}
