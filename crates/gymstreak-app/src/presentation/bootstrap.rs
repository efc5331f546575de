use std::sync::Arc;
use tracing::info;

use super::state::{AppState, CommandHandlers, Queries, Repositories, Runtime, Services};
use crate::application::commands::handlers::*;
use crate::application::queries::StreakQueries;
use crate::application::services::{RotationScheduler, StreakService};
use gymstreak_domain::check_in::CheckInRepository;
use gymstreak_domain::events::EventBus;
use gymstreak_domain::schedule::ScheduleRepository;
use gymstreak_domain::shared::{Clock, DomainError};
use gymstreak_domain::streak::StreakEngine;
use gymstreak_domain::user::UserRepository;
use gymstreak_infrastructure::events::InMemoryEventBus;
use gymstreak_infrastructure::persistence::repositories::{
    SqliteCheckInRepository, SqliteScheduleRepository, SqliteUserRepository,
};
use gymstreak_infrastructure::{AppConfig, Database, SystemClock};

/// Open the configured database, migrate it, and wire the application
pub async fn bootstrap(config: &AppConfig) -> Result<AppState, DomainError> {
    let db = Database::new(&config.database_path_str()).await?;
    let clock = SystemClock::with_offset_minutes(config.utc_offset_minutes)?;
    bootstrap_with_database(db, Arc::new(clock), config).await
}

/// Wire the application over an already opened database and a given clock
pub async fn bootstrap_with_database(
    db: Database,
    clock: Arc<dyn Clock>,
    config: &AppConfig,
) -> Result<AppState, DomainError> {
    db.run_migrations().await?;
    info!("Database migrations applied");

    let db = Arc::new(db);
    let pool = db.pool();
    let event_bus: Arc<dyn EventBus> = Arc::new(InMemoryEventBus::new());

    let repositories = Repositories {
        user: Arc::new(SqliteUserRepository::new(pool.clone())) as Arc<dyn UserRepository>,
        schedule: Arc::new(SqliteScheduleRepository::new(pool.clone()))
            as Arc<dyn ScheduleRepository>,
        check_in: Arc::new(SqliteCheckInRepository::new(pool)) as Arc<dyn CheckInRepository>,
    };

    let engine = Arc::new(StreakEngine::new(
        repositories.user.clone(),
        repositories.schedule.clone(),
        repositories.check_in.clone(),
        clock.clone(),
    ));
    let streak_service = Arc::new(StreakService::new(
        engine.clone(),
        repositories.user.clone(),
        event_bus.clone(),
    ));

    let command_handlers = CommandHandlers {
        register_user: Arc::new(RegisterUserCommandHandler::new(repositories.user.clone())),
        log_check_in: Arc::new(LogCheckInCommandHandler::new(
            repositories.user.clone(),
            repositories.check_in.clone(),
            streak_service.clone(),
            clock.clone(),
            event_bus.clone(),
        )),
        create_schedule: Arc::new(CreateScheduleCommandHandler::new(
            repositories.user.clone(),
            repositories.schedule.clone(),
            clock.clone(),
            event_bus.clone(),
        )),
        deactivate_schedule: Arc::new(DeactivateScheduleCommandHandler::new(
            repositories.schedule.clone(),
        )),
        advance_rotation: Arc::new(AdvanceRotationCommandHandler::new(
            repositories.schedule.clone(),
            clock.clone(),
            event_bus.clone(),
        )),
    };

    let offset = SystemClock::with_offset_minutes(config.utc_offset_minutes)?.offset();
    let scheduler = Arc::new(RotationScheduler::new(
        command_handlers.advance_rotation.clone(),
        streak_service.clone(),
        offset,
        config.rotation_advance_hour,
        config.rotation_advance_minute,
    ));

    let queries = Queries {
        streak: Arc::new(StreakQueries::new(
            engine.clone(),
            repositories.user.clone(),
            repositories.schedule.clone(),
            clock.clone(),
        )),
    };

    info!("Application state initialized");

    Ok(AppState {
        runtime: Runtime {
            db,
            event_bus,
            clock,
        },
        repositories,
        services: Services {
            engine,
            streak: streak_service,
            scheduler,
        },
        command_handlers,
        queries,
    })
}
