use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    team::{entities::Team, value_objects::CreateTeamInput},
};

pub trait TeamService: Send + Sync {
    fn create_team(
        &self,
        input: CreateTeamInput,
    ) -> impl Future<Output = Result<Team, CoreError>> + Send;

    fn get_teams(&self) -> impl Future<Output = Result<Vec<Team>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait TeamRepository: Send + Sync {
    fn create_team(&self, name: String) -> impl Future<Output = Result<Team, CoreError>> + Send;

    fn get_by_name(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<Team>, CoreError>> + Send;

    /// All teams in insertion order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Team>, CoreError>> + Send;
}
