pub mod member;
pub mod query_params;
pub mod server;
pub mod team;
