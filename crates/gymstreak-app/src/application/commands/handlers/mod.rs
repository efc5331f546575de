mod log_check_in_handler;
mod register_user_handler;
mod schedule_handlers;


pub use log_check_in_handler::LogCheckInCommandHandler;
pub use register_user_handler::RegisterUserCommandHandler;
pub use schedule_handlers::{
    AdvanceRotationCommandHandler, CreateScheduleCommandHandler, DeactivateScheduleCommandHandler,
};
