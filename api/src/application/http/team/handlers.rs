pub mod create_team;
pub mod get_team_age_averages;
pub mod get_teams;
