use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select,
};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    member::{
        entities::{Member, MemberTeamDto, NewMember},
        ports::MemberRepository,
        value_objects::{AgeStats, TeamAgeTotals},
    },
    query::{Assignment, JoinKind, Predicate, SelectQuery},
};
use crate::entity::{
    members::{self, ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as MemberEntity},
    teams::Column as TeamColumn,
};
use crate::infrastructure::member::{
    conditions::{apply_order, assignment_expr, to_condition},
    mappers::{AgeAggregateRow, MemberTeamRow, TeamTotalsRow},
};

#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pub db: DatabaseConnection,
}

impl PostgresMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Members joined with their team and filtered, without ordering or paging.
    /// `on` is added to the join condition rather than the WHERE clause.
    fn filtered(
        predicate: &Predicate,
        join: JoinKind,
        on: &Predicate,
    ) -> Result<Select<MemberEntity>, CoreError> {
        let mut relation = members::Relation::Teams.def();
        if !on.is_match_all() {
            let on_condition = to_condition(on)?;
            relation = relation.on_condition(move |_, _| on_condition.clone());
        }

        Ok(MemberEntity::find()
            .join(join.into(), relation)
            .filter(to_condition(predicate)?))
    }

    fn paged(query: Select<MemberEntity>, select: &SelectQuery) -> Select<MemberEntity> {
        let mut query = apply_order(query, &select.order);

        if let Some(offset) = select.offset {
            query = query.offset(offset);
        }

        if let Some(limit) = select.limit {
            query = query.limit(limit);
        }

        query
    }
}

fn storage_error(action: &str, e: sea_orm::DbErr) -> CoreError {
    error!("Failed to {}: {}", action, e);
    CoreError::StorageError(e.to_string())
}

impl MemberRepository for PostgresMemberRepository {
    async fn create_member(&self, member: NewMember) -> Result<Member, CoreError> {
        let active_model = MemberActiveModel {
            id: NotSet,
            username: Set(member.username),
            age: Set(member.age),
            team_id: Set(member.team_id),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| storage_error("create member", e))?;

        Ok(Member::from(model))
    }

    async fn get_by_id(&self, member_id: i64) -> Result<Option<Member>, CoreError> {
        let member = MemberEntity::find_by_id(member_id)
            .one(&self.db)
            .await
            .map_err(|e| storage_error("get member by id", e))?
            .map(Member::from);

        Ok(member)
    }

    async fn find_all(&self) -> Result<Vec<Member>, CoreError> {
        let members = MemberEntity::find()
            .order_by_asc(MemberColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("fetch members", e))?
            .into_iter()
            .map(Member::from)
            .collect::<Vec<Member>>();

        Ok(members)
    }

    async fn find_by_username(&self, username: String) -> Result<Vec<Member>, CoreError> {
        let members = MemberEntity::find()
            .filter(MemberColumn::Username.eq(username))
            .order_by_asc(MemberColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("fetch members by username", e))?
            .into_iter()
            .map(Member::from)
            .collect::<Vec<Member>>();

        Ok(members)
    }

    async fn select_members(&self, query: SelectQuery) -> Result<Vec<Member>, CoreError> {
        let filtered = Self::filtered(&query.predicate, query.join, &query.join_on)?;
        let select = Self::paged(filtered, &query);

        let members = select
            .all(&self.db)
            .await
            .map_err(|e| storage_error("select members", e))?
            .into_iter()
            .map(Member::from)
            .collect::<Vec<Member>>();

        Ok(members)
    }

    async fn select_member_teams(&self, query: SelectQuery) -> Result<Vec<MemberTeamDto>, CoreError> {
        let select = Self::filtered(&query.predicate, query.join, &query.join_on)?
            .select_only()
            .column_as(MemberColumn::Id, "member_id")
            .column(MemberColumn::Username)
            .column(MemberColumn::Age)
            .column_as(TeamColumn::Id, "team_id")
            .column_as(TeamColumn::Name, "team_name");

        let rows = Self::paged(select, &query)
            .into_model::<MemberTeamRow>()
            .all(&self.db)
            .await
            .map_err(|e| storage_error("select member teams", e))?;

        Ok(rows.into_iter().map(MemberTeamDto::from).collect())
    }

    async fn count(&self, predicate: Predicate, join: JoinKind) -> Result<u64, CoreError> {
        Self::filtered(&predicate, join, &Predicate::all())?
            .count(&self.db)
            .await
            .map_err(|e| storage_error("count members", e))
    }

    async fn update_many(
        &self,
        predicate: Predicate,
        assignments: Vec<Assignment>,
    ) -> Result<u64, CoreError> {
        if predicate.references_team() {
            return Err(CoreError::invalid_argument(
                "bulk statements cannot filter on team fields",
            ));
        }
        if assignments.is_empty() {
            return Ok(0);
        }

        let mut update = MemberEntity::update_many().filter(to_condition(&predicate)?);
        for assignment in &assignments {
            let (column, expr) = assignment_expr(assignment)?;
            update = update.col_expr(column, expr);
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| storage_error("update members", e))?;

        Ok(result.rows_affected)
    }

    async fn delete_many(&self, predicate: Predicate) -> Result<u64, CoreError> {
        if predicate.references_team() {
            return Err(CoreError::invalid_argument(
                "bulk statements cannot filter on team fields",
            ));
        }

        let result = MemberEntity::delete_many()
            .filter(to_condition(&predicate)?)
            .exec(&self.db)
            .await
            .map_err(|e| storage_error("delete members", e))?;

        Ok(result.rows_affected)
    }

    async fn age_stats(&self, predicate: Predicate) -> Result<AgeStats, CoreError> {
        let row = Self::filtered(&predicate, JoinKind::Left, &Predicate::all())?
            .select_only()
            .column_as(MemberColumn::Id.count(), "member_count")
            .column_as(MemberColumn::Age.sum(), "age_sum")
            .column_as(MemberColumn::Age.max(), "age_max")
            .column_as(MemberColumn::Age.min(), "age_min")
            .into_model::<AgeAggregateRow>()
            .one(&self.db)
            .await
            .map_err(|e| storage_error("aggregate member ages", e))?;

        let Some(row) = row else {
            return Ok(AgeStats::default());
        };

        let sum = row.age_sum.unwrap_or(0);
        let average = (row.member_count > 0).then(|| sum as f64 / row.member_count as f64);

        Ok(AgeStats {
            count: row.member_count,
            sum,
            average,
            max: row.age_max,
            min: row.age_min,
        })
    }

    async fn team_age_totals(&self) -> Result<Vec<TeamAgeTotals>, CoreError> {
        let rows = MemberEntity::find()
            .select_only()
            .column_as(TeamColumn::Name, "team_name")
            .column_as(MemberColumn::Id.count(), "member_count")
            .column_as(MemberColumn::Age.sum(), "age_sum")
            .join(JoinType::InnerJoin, members::Relation::Teams.def())
            .group_by(TeamColumn::Name)
            .order_by_asc(TeamColumn::Name)
            .into_model::<TeamTotalsRow>()
            .all(&self.db)
            .await
            .map_err(|e| storage_error("aggregate ages per team", e))?;

        Ok(rows
            .into_iter()
            .map(|row| TeamAgeTotals {
                team_name: row.team_name,
                member_count: row.member_count,
                age_sum: row.age_sum.unwrap_or(0),
            })
            .collect())
    }
}
