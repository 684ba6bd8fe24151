use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
}

/// Member row flattened with the columns of its team. Read-only projection,
/// produced by listing queries and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Member fields needed to insert a new row; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
}
