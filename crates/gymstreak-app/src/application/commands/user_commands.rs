use crate::application::commands::command_handler::Command;

/// Register user command
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
}

impl Command for RegisterUserCommand {}

/// Register user command result
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user_id: String,
}
