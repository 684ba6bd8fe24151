use sea_orm::FromQueryResult;

use crate::domain::member::entities::{Member, MemberTeamDto};
use crate::entity::members::Model as MemberModel;

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: model.id,
            username: model.username,
            age: model.age,
            team_id: model.team_id,
        }
    }
}

/// Row shape of the member/team projection.
#[derive(Debug, FromQueryResult)]
pub struct MemberTeamRow {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamDto {
    fn from(row: MemberTeamRow) -> Self {
        MemberTeamDto {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct AgeAggregateRow {
    pub member_count: i64,
    pub age_sum: Option<i64>,
    pub age_max: Option<i32>,
    pub age_min: Option<i32>,
}

#[derive(Debug, FromQueryResult)]
pub struct TeamTotalsRow {
    pub team_name: String,
    pub member_count: i64,
    pub age_sum: Option<i64>,
}
