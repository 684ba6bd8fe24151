pub mod mappers;
pub mod repositories;

pub use repositories::team_repository::PostgresTeamRepository;
