use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Optional search criteria. Every absent field leaves the result unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMemberInput {
    pub username: String,
    pub age: i32,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OffsetLimit {
    pub offset: i64,
    pub limit: i64,
}

impl Default for OffsetLimit {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

impl OffsetLimit {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.offset < 0 {
            return Err(CoreError::invalid_argument("offset must be >= 0"));
        }
        if self.limit <= 0 {
            return Err(CoreError::invalid_argument("limit must be > 0"));
        }
        Ok(())
    }

    /// Total row count implied by a page that came back short, if it proves
    /// anything. An empty page past the first one does not: the offset may
    /// simply overshoot the end.
    pub fn total_from_short_page(&self, fetched: usize) -> Option<i64> {
        let fetched = fetched as i64;
        if fetched >= self.limit {
            return None;
        }
        if self.offset == 0 {
            return Some(fetched);
        }
        if fetched > 0 {
            return Some(self.offset + fetched);
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum CountStrategy {
    /// Always run the count query.
    #[default]
    Simple,
    /// Skip the count query when the fetched page is provably the last one.
    Optimized,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub offset: i64,
    pub limit: i64,
    pub count: i64,
}

impl<T> Paginated<T> {
    pub fn total_pages(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        (self.count + self.limit - 1) / self.limit
    }

    pub fn page_number(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        self.offset / self.limit
    }

    pub fn has_next(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.count
    }
}

/// Aggregates over the `age` column of a filtered member set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AgeStats {
    pub count: i64,
    pub sum: i64,
    pub average: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

/// Raw per-team totals as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAgeTotals {
    pub team_name: String,
    pub member_count: i64,
    pub age_sum: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub member_count: i64,
    pub average_age: f64,
}

impl From<TeamAgeTotals> for TeamAgeAverage {
    fn from(totals: TeamAgeTotals) -> Self {
        let average_age = if totals.member_count == 0 {
            0.0
        } else {
            totals.age_sum as f64 / totals.member_count as f64
        };

        Self {
            team_name: totals.team_name,
            member_count: totals.member_count,
            average_age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_limit_validate() {
        assert!(OffsetLimit::new(0, 3).validate().is_ok());
        assert!(matches!(
            OffsetLimit::new(0, 0).validate(),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(OffsetLimit::new(0, -5).validate().is_err());
        assert!(OffsetLimit::new(-1, 10).validate().is_err());
    }

    #[test]
    fn test_total_from_short_page() {
        let first = OffsetLimit::new(0, 3);
        assert_eq!(first.total_from_short_page(2), Some(2));
        assert_eq!(first.total_from_short_page(0), Some(0));
        assert_eq!(first.total_from_short_page(3), None);

        let later = OffsetLimit::new(6, 3);
        assert_eq!(later.total_from_short_page(1), Some(7));
        assert_eq!(later.total_from_short_page(0), None);
        assert_eq!(later.total_from_short_page(3), None);
    }

    #[test]
    fn test_page_helpers() {
        let page = Paginated {
            items: vec![1, 2, 3],
            offset: 0,
            limit: 3,
            count: 4,
        };
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.page_number(), 0);
        assert!(page.has_next());

        let last = Paginated {
            items: vec![4],
            offset: 3,
            limit: 3,
            count: 4,
        };
        assert_eq!(last.page_number(), 1);
        assert!(!last.has_next());
    }

    #[test]
    fn test_team_average() {
        let average = TeamAgeAverage::from(TeamAgeTotals {
            team_name: "teamA".to_string(),
            member_count: 2,
            age_sum: 30,
        });
        assert_eq!(average.average_age, 15.0);
    }
}
