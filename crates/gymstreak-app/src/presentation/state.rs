use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::StreakQueries;
use crate::application::services::{RotationScheduler, StreakService};
use gymstreak_domain::check_in::CheckInRepository;
use gymstreak_domain::events::EventBus;
use gymstreak_domain::schedule::ScheduleRepository;
use gymstreak_domain::shared::Clock;
use gymstreak_domain::streak::StreakEngine;
use gymstreak_domain::user::UserRepository;
use gymstreak_infrastructure::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub register_user: Arc<RegisterUserCommandHandler>,
    pub log_check_in: Arc<LogCheckInCommandHandler>,
    pub create_schedule: Arc<CreateScheduleCommandHandler>,
    pub deactivate_schedule: Arc<DeactivateScheduleCommandHandler>,
    pub advance_rotation: Arc<AdvanceRotationCommandHandler>,
}

pub struct Runtime {
    pub db: Arc<Database>,
    pub event_bus: Arc<dyn EventBus>,
    pub clock: Arc<dyn Clock>,
}

pub struct Repositories {
    pub user: Arc<dyn UserRepository>,
    pub schedule: Arc<dyn ScheduleRepository>,
    pub check_in: Arc<dyn CheckInRepository>,
}

pub struct Services {
    pub engine: Arc<StreakEngine>,
    pub streak: Arc<StreakService>,
    pub scheduler: Arc<RotationScheduler>,
}

pub struct Queries {
    pub streak: Arc<StreakQueries>,
}

/// Everything an outer surface (HTTP, CLI) needs to serve requests
pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub command_handlers: CommandHandlers,
    pub queries: Queries,
}
