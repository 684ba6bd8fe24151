use crate::domain::{
    member::value_objects::MemberSearchCondition,
    query::{Clause, Field, Predicate},
};

/// Turns a search condition into a predicate, one clause per present
/// criterion, in a fixed order. Blank strings count as absent.
pub fn search_predicate(condition: &MemberSearchCondition) -> Predicate {
    Predicate::all()
        .and(username_eq(condition.username.as_deref()))
        .and(team_name_eq(condition.team_name.as_deref()))
        .and(age_goe(condition.age_goe))
        .and(age_loe(condition.age_loe))
}

fn username_eq(username: Option<&str>) -> Option<Clause> {
    non_blank(username).map(|username| Field::Username.equals(username))
}

fn team_name_eq(team_name: Option<&str>) -> Option<Clause> {
    non_blank(team_name).map(|team_name| Field::TeamName.equals(team_name))
}

fn age_goe(age: Option<i32>) -> Option<Clause> {
    age.map(|age| Field::Age.at_least(age))
}

fn age_loe(age: Option<i32>) -> Option<Clause> {
    age.map(|age| Field::Age.at_most(age))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
