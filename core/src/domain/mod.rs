pub mod common;
pub mod member;
pub mod query;
pub mod team;
