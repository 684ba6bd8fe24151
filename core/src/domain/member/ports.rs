use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    member::{
        entities::{Member, MemberTeamDto, NewMember},
        value_objects::{
            AgeStats, CountStrategy, CreateMemberInput, MemberSearchCondition, OffsetLimit,
            Paginated, TeamAgeAverage, TeamAgeTotals,
        },
    },
    query::{Assignment, Field, FieldValue, JoinKind, OrderSpec, Predicate, SelectQuery},
};

pub trait MemberService: Send + Sync {
    fn create_member(
        &self,
        input: CreateMemberInput,
    ) -> impl Future<Output = Result<Member, CoreError>> + Send;

    fn get_member(&self, member_id: i64) -> impl Future<Output = Result<Member, CoreError>> + Send;

    fn get_members(&self) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    /// Direct lookup on the username column.
    fn find_by_username(
        &self,
        username: String,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    /// Single equality lookup that skips the search-condition builder.
    fn find_by_field(
        &self,
        field: Field,
        value: FieldValue,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn find_members(
        &self,
        predicate: Predicate,
        order: Vec<OrderSpec>,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn find_one(&self, predicate: Predicate)
    -> impl Future<Output = Result<Member, CoreError>> + Send;

    /// Member/team rows for a fully specified query, including any extra
    /// restriction on the team join.
    fn find_member_teams(
        &self,
        query: SelectQuery,
    ) -> impl Future<Output = Result<Vec<MemberTeamDto>, CoreError>> + Send;

    fn search(
        &self,
        condition: MemberSearchCondition,
    ) -> impl Future<Output = Result<Vec<MemberTeamDto>, CoreError>> + Send;

    fn search_page(
        &self,
        condition: MemberSearchCondition,
        pagination: OffsetLimit,
        strategy: CountStrategy,
    ) -> impl Future<Output = Result<Paginated<MemberTeamDto>, CoreError>> + Send;

    fn bulk_update_username(
        &self,
        new_username: String,
        age_less_than: i32,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn bulk_increment_age(&self, delta: i32) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn bulk_delete(
        &self,
        age_greater_than: i32,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn age_stats(
        &self,
        condition: MemberSearchCondition,
    ) -> impl Future<Output = Result<AgeStats, CoreError>> + Send;

    fn team_age_averages(
        &self,
    ) -> impl Future<Output = Result<Vec<TeamAgeAverage>, CoreError>> + Send;

    /// Members whose age equals the maximum age.
    fn oldest_members(&self) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn members_at_or_above_average_age(
        &self,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;
}

/// Storage port for members. Listing, counting and bulk statements all take
/// a [`Predicate`]; the adapter translates it to its own query language.
#[cfg_attr(test, mockall::automock)]
pub trait MemberRepository: Send + Sync {
    fn create_member(
        &self,
        member: NewMember,
    ) -> impl Future<Output = Result<Member, CoreError>> + Send;

    fn get_by_id(
        &self,
        member_id: i64,
    ) -> impl Future<Output = Result<Option<Member>, CoreError>> + Send;

    /// All members in insertion order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn find_by_username(
        &self,
        username: String,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn select_members(
        &self,
        query: SelectQuery,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn select_member_teams(
        &self,
        query: SelectQuery,
    ) -> impl Future<Output = Result<Vec<MemberTeamDto>, CoreError>> + Send;

    fn count(
        &self,
        predicate: Predicate,
        join: JoinKind,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    /// Returns the number of affected rows.
    fn update_many(
        &self,
        predicate: Predicate,
        assignments: Vec<Assignment>,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    /// Returns the number of affected rows.
    fn delete_many(&self, predicate: Predicate)
    -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn age_stats(
        &self,
        predicate: Predicate,
    ) -> impl Future<Output = Result<AgeStats, CoreError>> + Send;

    /// Member count and age sum per team name, teams without members omitted.
    fn team_age_totals(
        &self,
    ) -> impl Future<Output = Result<Vec<TeamAgeTotals>, CoreError>> + Send;
}
