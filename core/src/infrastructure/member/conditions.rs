use sea_orm::{
    ColumnTrait, Condition, JoinType, Order, QueryOrder, Value,
    sea_query::{Expr, NullOrdering, SimpleExpr},
};

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        Assignment, Clause, Comparison, Field, FieldValue, JoinKind, NullsOrder, OrderSpec,
        Predicate, SortDirection,
    },
};
use crate::entity::{members, teams};

impl From<JoinKind> for JoinType {
    fn from(kind: JoinKind) -> Self {
        match kind {
            JoinKind::Left => JoinType::LeftJoin,
            JoinKind::Inner => JoinType::InnerJoin,
        }
    }
}

/// Binds a field value with the column's own SQL type.
fn to_value(field: Field, value: &FieldValue) -> Result<Value, CoreError> {
    match (field, value) {
        (Field::Age, FieldValue::Int(v)) => i32::try_from(*v)
            .map(Value::from)
            .map_err(|_| CoreError::invalid_argument(format!("{field} value {v} is out of range"))),
        (Field::MemberId | Field::TeamId, FieldValue::Int(v)) => Ok(Value::from(*v)),
        (Field::Username | Field::TeamName, FieldValue::Text(v)) => Ok(Value::from(v.clone())),
        _ => Err(CoreError::invalid_argument(format!(
            "{field} expects a {:?} value, got {value:?}",
            field.kind()
        ))),
    }
}

fn compare<C: ColumnTrait>(
    column: C,
    field: Field,
    comparison: &Comparison,
) -> Result<SimpleExpr, CoreError> {
    let value = |v: &FieldValue| to_value(field, v);

    let expr = match comparison {
        Comparison::Eq(v) => column.eq(value(v)?),
        Comparison::Ne(v) => column.ne(value(v)?),
        Comparison::Lt(v) => column.lt(value(v)?),
        Comparison::Lte(v) => column.lte(value(v)?),
        Comparison::Gt(v) => column.gt(value(v)?),
        Comparison::Gte(v) => column.gte(value(v)?),
        Comparison::Between(low, high) => column.between(value(low)?, value(high)?),
    };

    Ok(expr)
}

fn clause_expr(clause: &Clause) -> Result<SimpleExpr, CoreError> {
    let field = clause.field;
    let comparison = &clause.comparison;

    match field {
        Field::MemberId => compare(members::Column::Id, field, comparison),
        Field::Username => compare(members::Column::Username, field, comparison),
        Field::Age => compare(members::Column::Age, field, comparison),
        Field::TeamId => compare(teams::Column::Id, field, comparison),
        Field::TeamName => compare(teams::Column::Name, field, comparison),
    }
}

/// AND of every clause. An empty predicate yields an empty condition, which
/// renders as `WHERE TRUE`.
pub fn to_condition(predicate: &Predicate) -> Result<Condition, CoreError> {
    predicate
        .clauses()
        .iter()
        .try_fold(Condition::all(), |condition, clause| {
            Ok(condition.add(clause_expr(clause)?))
        })
}

fn column_expr(field: Field) -> SimpleExpr {
    match field {
        Field::MemberId => Expr::col((members::Entity, members::Column::Id)).into(),
        Field::Username => Expr::col((members::Entity, members::Column::Username)).into(),
        Field::Age => Expr::col((members::Entity, members::Column::Age)).into(),
        Field::TeamId => Expr::col((teams::Entity, teams::Column::Id)).into(),
        Field::TeamName => Expr::col((teams::Entity, teams::Column::Name)).into(),
    }
}

/// Applies the requested ordering, then member id ascending as tie-breaker
/// so that offset paging is stable.
pub fn apply_order<Q: QueryOrder>(mut query: Q, order: &[OrderSpec]) -> Q {
    for spec in order {
        let direction = match spec.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        query = match spec.nulls {
            NullsOrder::Default => query.order_by(column_expr(spec.field), direction),
            NullsOrder::First => {
                query.order_by_with_nulls(column_expr(spec.field), direction, NullOrdering::First)
            }
            NullsOrder::Last => {
                query.order_by_with_nulls(column_expr(spec.field), direction, NullOrdering::Last)
            }
        };
    }

    if !order.iter().any(|spec| spec.field == Field::MemberId) {
        query = query.order_by(column_expr(Field::MemberId), Order::Asc);
    }

    query
}

/// Column and value expression of one bulk update assignment.
pub fn assignment_expr(assignment: &Assignment) -> Result<(members::Column, SimpleExpr), CoreError> {
    assignment.validate()?;

    match assignment {
        Assignment::Set(Field::Username, value) => Ok((
            members::Column::Username,
            Expr::value(to_value(Field::Username, value)?),
        )),
        Assignment::Set(Field::Age, value) => Ok((
            members::Column::Age,
            Expr::value(to_value(Field::Age, value)?),
        )),
        Assignment::Add(Field::Age, delta) => {
            let delta = i32::try_from(*delta)
                .map_err(|_| CoreError::invalid_argument(format!("age delta {delta} is out of range")))?;
            Ok((members::Column::Age, Expr::col(members::Column::Age).add(delta)))
        }
        other => Err(CoreError::invalid_argument(format!(
            "{} cannot be assigned by a bulk update",
            other.field()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QuerySelect, QueryTrait, RelationTrait};

    fn sql(predicate: &Predicate) -> String {
        members::Entity::find()
            .join(JoinType::LeftJoin, members::Relation::Teams.def())
            .filter(to_condition(predicate).unwrap())
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_predicate_renders_where_true() {
        let sql = sql(&Predicate::all());
        assert!(sql.ends_with("WHERE TRUE"), "{sql}");
        assert!(!sql.contains(r#""members"."age" "#), "{sql}");
        assert!(!sql.contains(r#""teams"."name" ="#), "{sql}");
    }

    #[test]
    fn test_clauses_are_anded() {
        let predicate = Field::TeamName
            .equals("teamB")
            .and(Field::Age.between(35, 40));

        let sql = sql(&predicate);
        assert!(sql.contains(r#""teams"."name" = 'teamB'"#), "{sql}");
        assert!(sql.contains(r#""members"."age" BETWEEN 35 AND 40"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_mismatched_value_is_rejected() {
        let result = to_condition(&Predicate::from(Field::Username.equals(3)));
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));

        let overflow = to_condition(&Predicate::from(Field::Age.equals(i64::MAX)));
        assert!(overflow.is_err());
    }

    #[test]
    fn test_order_appends_id_tiebreaker() {
        let sql = apply_order(members::Entity::find(), &[Field::Age.desc().nulls_last()])
            .build(DbBackend::Postgres)
            .to_string();

        assert!(
            sql.contains(r#"ORDER BY "members"."age" DESC NULLS LAST, "members"."id" ASC"#),
            "{sql}"
        );
    }

    #[test]
    fn test_assignment_rejects_team_field() {
        let result = assignment_expr(&Assignment::Set(Field::TeamName, "teamA".into()));
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }
}
