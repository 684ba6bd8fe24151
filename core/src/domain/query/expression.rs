use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Queryable fields of a member row joined with its team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Text,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::MemberId => "member.id",
            Field::Username => "member.username",
            Field::Age => "member.age",
            Field::TeamId => "team.id",
            Field::TeamName => "team.name",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::MemberId | Field::Age | Field::TeamId => FieldKind::Int,
            Field::Username | Field::TeamName => FieldKind::Text,
        }
    }

    /// Fields that only resolve when the team relation is joined.
    pub fn is_team_field(&self) -> bool {
        matches!(self, Field::TeamId | Field::TeamName)
    }

    pub fn equals(self, value: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Eq(value.into()))
    }

    pub fn not_equals(self, value: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Ne(value.into()))
    }

    pub fn less_than(self, value: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Lt(value.into()))
    }

    pub fn at_most(self, value: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Lte(value.into()))
    }

    pub fn greater_than(self, value: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Gt(value.into()))
    }

    pub fn at_least(self, value: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Gte(value.into()))
    }

    /// Inclusive on both ends.
    pub fn between(self, low: impl Into<FieldValue>, high: impl Into<FieldValue>) -> Clause {
        Clause::new(self, Comparison::Between(low.into(), high.into()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Eq(FieldValue),
    Ne(FieldValue),
    Lt(FieldValue),
    Lte(FieldValue),
    Gt(FieldValue),
    Gte(FieldValue),
    Between(FieldValue, FieldValue),
}

impl Comparison {
    fn values(&self) -> Vec<&FieldValue> {
        match self {
            Comparison::Eq(v)
            | Comparison::Ne(v)
            | Comparison::Lt(v)
            | Comparison::Lte(v)
            | Comparison::Gt(v)
            | Comparison::Gte(v) => vec![v],
            Comparison::Between(low, high) => vec![low, high],
        }
    }
}

/// A single `field <op> value` restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: Field,
    pub comparison: Comparison,
}

impl Clause {
    pub fn new(field: Field, comparison: Comparison) -> Self {
        Self { field, comparison }
    }

    pub fn and(self, other: Clause) -> Predicate {
        Predicate::all().and(self).and(other)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let expected = self.field.kind();
        for value in self.comparison.values() {
            if value.kind() != expected {
                return Err(CoreError::invalid_argument(format!(
                    "{} expects a {:?} value, got {:?}",
                    self.field, expected, value
                )));
            }
        }
        Ok(())
    }
}

/// Conjunction of clauses. An empty predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn all() -> Self {
        Self::default()
    }

    /// Appends a clause. `None` leaves the predicate untouched, which lets
    /// optional criteria be chained without branching at the call site.
    pub fn and(mut self, clause: impl Into<Option<Clause>>) -> Self {
        if let Some(clause) = clause.into() {
            self.clauses.push(clause);
        }
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn references_team(&self) -> bool {
        self.clauses.iter().any(|c| c.field.is_team_field())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.clauses.iter().try_for_each(Clause::validate)
    }
}

impl From<Clause> for Predicate {
    fn from(clause: Clause) -> Self {
        Predicate::all().and(clause)
    }
}

/// Column assignment of a bulk update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Set(Field, FieldValue),
    /// `field = field + delta`
    Add(Field, i64),
}

impl Assignment {
    pub fn field(&self) -> Field {
        match self {
            Assignment::Set(field, _) | Assignment::Add(field, _) => *field,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let field = self.field();
        if field.is_team_field() || field == Field::MemberId {
            return Err(CoreError::invalid_argument(format!(
                "{field} cannot be assigned by a bulk update"
            )));
        }
        match self {
            Assignment::Set(_, value) if value.kind() != field.kind() => {
                Err(CoreError::invalid_argument(format!(
                    "{field} expects a {:?} value, got {value:?}",
                    field.kind()
                )))
            }
            Assignment::Add(_, _) if field.kind() != FieldKind::Int => Err(
                CoreError::invalid_argument(format!("{field} is not numeric")),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_predicate_matches_all() {
        let predicate = Predicate::all().and(None::<Clause>).and(None::<Clause>);
        assert!(predicate.is_match_all());
        assert_eq!(predicate, Predicate::default());
    }

    #[test]
    fn test_clause_and_keeps_order() {
        let predicate = Field::Age
            .between(20, 40)
            .and(Field::Username.not_equals("member1"));

        assert_eq!(predicate.clauses().len(), 2);
        assert_eq!(predicate.clauses()[0].field, Field::Age);
        assert_eq!(
            predicate.clauses()[1].comparison,
            Comparison::Ne(FieldValue::Text("member1".to_string()))
        );
        assert!(!predicate.references_team());
    }

    #[test]
    fn test_references_team() {
        let predicate = Predicate::from(Field::TeamName.equals("teamA"));
        assert!(predicate.references_team());
    }

    #[test]
    fn test_validate_rejects_type_mismatch() {
        let predicate = Predicate::from(Field::Age.equals("ten"));
        assert!(matches!(
            predicate.validate(),
            Err(CoreError::InvalidArgument(_))
        ));

        let between = Predicate::from(Field::Username.between("a", 3));
        assert!(between.validate().is_err());
    }

    #[test]
    fn test_assignment_validation() {
        assert!(Assignment::Set(Field::Username, "guest".into())
            .validate()
            .is_ok());
        assert!(Assignment::Add(Field::Age, 1).validate().is_ok());
        assert!(Assignment::Add(Field::Username, 1).validate().is_err());
        assert!(Assignment::Set(Field::TeamName, "teamA".into())
            .validate()
            .is_err());
        assert!(Assignment::Set(Field::MemberId, 1.into()).validate().is_err());
    }
}
