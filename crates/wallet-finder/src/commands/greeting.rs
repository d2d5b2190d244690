//! Static replies: /start and /help

use async_trait::async_trait;
use finder_core::{Command, CommandCall, CommandSpec, Result};

pub const WELCOME_REPLY: &str = "👋 Welcome to Wallet Finder Bot! Use /help to see commands.";

pub struct StartCommand;

#[async_trait]
impl Command for StartCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec {
            name: "start".into(),
            description: "Welcome message".into(),
            args: vec![],
            listed: false,
        }
    }

    async fn execute(&self, _call: &CommandCall) -> Result<String> {
        Ok(WELCOME_REPLY.into())
    }
}

/// Replies with the command list rendered once at startup
pub struct HelpCommand {
    text: String,
}

impl HelpCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn spec(&self) -> CommandSpec {
        CommandSpec {
            name: "help".into(),
            description: "Show available commands".into(),
            args: vec![],
            listed: false,
        }
    }

    async fn execute(&self, _call: &CommandCall) -> Result<String> {
        Ok(self.text.clone())
    }
}
