use sea_orm::DatabaseConnection;
use tracing::info;

use crate::domain::common::{RosterConfig, services::Service};
use crate::infrastructure::{
    db::{
        postgres::{Postgres, PostgresConfig},
        schema::create_schema,
    },
    member::PostgresMemberRepository,
    team::PostgresTeamRepository,
};

pub mod seed;

pub use seed::seed_sample_data;

pub type RosterService = Service<PostgresMemberRepository, PostgresTeamRepository>;

pub async fn create_service(config: RosterConfig) -> Result<RosterService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    if config.database.bootstrap_schema {
        create_schema(&postgres.get_db()).await?;
    }

    info!("roster service ready");
    Ok(service_from_connection(postgres.get_db()))
}

/// Wires the repositories over an existing connection.
pub fn service_from_connection(db: DatabaseConnection) -> RosterService {
    Service::new(
        PostgresMemberRepository::new(db.clone()),
        PostgresTeamRepository::new(db),
    )
}
