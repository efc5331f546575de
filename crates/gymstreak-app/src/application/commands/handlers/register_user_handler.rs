use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::user_commands::*;
use gymstreak_domain::shared::DomainError;
use gymstreak_domain::user::{User, UserRepository};

pub struct RegisterUserCommandHandler {
    user_repo: Arc<dyn UserRepository>,
}

impl RegisterUserCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl CommandHandler<RegisterUserCommand> for RegisterUserCommandHandler {
    type Result = RegisterUserResult;

    async fn handle(&self, cmd: RegisterUserCommand) -> Result<Self::Result, DomainError> {
        let user = User::new(cmd.username)?;
        self.user_repo.save(&user).await?;

        info!(
            "[user] registered user_id={} username={}",
            user.id(),
            user.username()
        );

        Ok(RegisterUserResult {
            user_id: user.id().as_str().to_string(),
        })
    }
}
