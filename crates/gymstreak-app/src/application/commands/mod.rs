pub mod check_in_commands;
pub mod command_handler;
pub mod handlers;
pub mod schedule_commands;
pub mod user_commands;

pub use command_handler::{Command, CommandHandler};
