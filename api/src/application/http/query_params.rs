use roster_core::domain::member::value_objects::{MemberSearchCondition, OffsetLimit};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub offset: i64,
    pub limit: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PaginationParams {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

impl From<PaginationParams> for OffsetLimit {
    fn from(params: PaginationParams) -> Self {
        OffsetLimit::new(params.offset, params.limit)
    }
}

/// Query string shared by the member search endpoints. Every filter is
/// optional; `offset`/`limit` only matter for the paged versions.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MemberSearchQuery {
    /// Exact username
    pub username: Option<String>,
    /// Exact team name
    pub team_name: Option<String>,
    /// Minimum age, inclusive
    pub age_goe: Option<i32>,
    /// Maximum age, inclusive
    pub age_loe: Option<i32>,
    /// Rows to skip, default 0
    pub offset: Option<i64>,
    /// Page size, default 20, max 100
    pub limit: Option<i64>,
}

impl MemberSearchQuery {
    pub fn condition(&self) -> MemberSearchCondition {
        MemberSearchCondition {
            username: self.username.clone(),
            team_name: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.offset, self.limit)
    }
}
