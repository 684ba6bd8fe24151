use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    team::{entities::Team, ports::TeamRepository},
};
use crate::entity::teams::{
    ActiveModel as TeamActiveModel, Column as TeamColumn, Entity as TeamEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pub db: DatabaseConnection,
}

impl PostgresTeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TeamRepository for PostgresTeamRepository {
    async fn create_team(&self, name: String) -> Result<Team, CoreError> {
        let model = TeamActiveModel {
            id: NotSet,
            name: Set(name),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create team: {}", e);
            CoreError::StorageError(e.to_string())
        })?;

        Ok(Team::from(model))
    }

    async fn get_by_name(&self, name: String) -> Result<Option<Team>, CoreError> {
        let team = TeamEntity::find()
            .filter(TeamColumn::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get team by name: {}", e);
                CoreError::StorageError(e.to_string())
            })?
            .map(Team::from);

        Ok(team)
    }

    async fn find_all(&self) -> Result<Vec<Team>, CoreError> {
        let teams = TeamEntity::find()
            .order_by_asc(TeamColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch teams: {}", e);
                CoreError::StorageError(e.to_string())
            })?
            .into_iter()
            .map(Team::from)
            .collect::<Vec<Team>>();

        Ok(teams)
    }
}
