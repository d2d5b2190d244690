//! Command System
//!
//! Chat commands are registered at startup and looked up by verb.
//! `CommandRegistry::dispatch` is the single recovery boundary: whatever a
//! handler does, the caller gets a reply string back.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CommandError, Result};

/// A parsed inbound command
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCall {
    /// Verb without the leading slash, lowercased
    pub name: String,

    /// Whitespace-separated arguments after the verb
    pub args: Vec<String>,

    /// Transport-level identity of the sender
    pub caller_id: i64,

    /// Bot named in `/verb@botname`, if any
    #[serde(default)]
    pub addressee: Option<String>,
}

impl CommandCall {
    pub fn new(name: impl Into<String>, args: Vec<String>, caller_id: i64) -> Self {
        Self {
            name: name.into(),
            args,
            caller_id,
            addressee: None,
        }
    }

    /// Parse `/<verb>[@bot] arg1 arg2 ...`. Returns `None` for plain text.
    pub fn parse(text: &str, caller_id: i64) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;

        // Group chats address commands as /verb@botname
        let (verb, addressee) = match head.split_once('@') {
            Some((verb, bot)) => (verb, Some(bot.to_string())),
            None => (head, None),
        };
        if verb.is_empty() {
            return None;
        }

        Some(Self {
            name: verb.to_lowercase(),
            args: tokens.map(str::to_string).collect(),
            caller_id,
            addressee,
        })
    }

    /// True unless the command names a different bot. Usernames compare
    /// case-insensitively.
    pub fn is_addressed_to(&self, username: &str) -> bool {
        self.addressee
            .as_deref()
            .is_none_or(|bot| bot.eq_ignore_ascii_case(username))
    }

    /// Positional argument as text
    pub fn arg(&self, index: usize) -> Result<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CommandError::InvalidArguments(format!("missing argument #{}", index + 1)))
    }

    /// Positional argument parsed as an integer
    pub fn arg_i64(&self, index: usize) -> Result<i64> {
        let raw = self.arg(index)?;
        raw.parse::<i64>().map_err(|_| {
            CommandError::InvalidArguments(format!("argument #{} is not an integer: {}", index + 1, raw))
        })
    }
}

/// Argument type, checked before the handler runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    Text,
    Integer,
}

/// Positional argument definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Placeholder shown in usage, e.g. `network`
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ArgKind,
}

impl ArgSpec {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ArgKind::Text,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ArgKind::Integer,
        }
    }
}

/// Command definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Verb, without the slash
    pub name: String,

    /// One-line description used in help output
    pub description: String,

    /// Required positional arguments
    pub args: Vec<ArgSpec>,

    /// Listed by `/help`
    #[serde(default)]
    pub listed: bool,
}

impl CommandSpec {
    /// `/add_address <network> <wallet_address>`
    pub fn usage(&self) -> String {
        let mut usage = format!("/{}", self.name);
        for arg in &self.args {
            usage.push_str(&format!(" <{}>", arg.name));
        }
        usage
    }
}

/// Command trait - implement to add a bot verb
#[async_trait]
pub trait Command: Send + Sync {
    /// Verb, arguments and help line
    fn spec(&self) -> CommandSpec;

    /// Produce the reply text
    async fn execute(&self, call: &CommandCall) -> Result<String>;

    /// Structural validation: argument count and integer arguments.
    /// Extra trailing arguments are ignored.
    fn validate(&self, call: &CommandCall) -> Result<()> {
        let spec = self.spec();

        if call.args.len() < spec.args.len() {
            return Err(CommandError::InvalidArguments(format!(
                "expected {} argument(s), got {}",
                spec.args.len(),
                call.args.len()
            )));
        }

        for (index, arg) in spec.args.iter().enumerate() {
            if arg.kind == ArgKind::Integer {
                call.arg_i64(index)?;
            }
        }

        Ok(())
    }
}

/// Registry of available commands, in registration order
pub struct CommandRegistry {
    commands: IndexMap<String, Arc<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    /// Register a new command
    pub fn register<C: Command + 'static>(&mut self, command: C) {
        let spec = command.spec();
        self.commands.insert(spec.name, Arc::new(command));
    }

    /// Get a command by verb
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Registered verbs
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// One `usage - description` line per listed command
    pub fn help_text(&self) -> String {
        self.commands
            .values()
            .map(|c| c.spec())
            .filter(|spec| spec.listed)
            .map(|spec| format!("{} - {}", spec.usage(), spec.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Handle one inbound command.
    ///
    /// Returns `None` only for verbs nobody registered. For a known verb a
    /// reply is always produced: the handler's text, the generic failure
    /// message for store faults, or the usage line for anything else.
    pub async fn dispatch(&self, call: &CommandCall) -> Option<String> {
        let Some(command) = self.get(&call.name) else {
            tracing::debug!(command = %call.name, "Ignoring unknown command");
            return None;
        };
        let spec = command.spec();

        tracing::info!(command = %spec.name, caller = call.caller_id, args = call.args.len(), "Handling command");

        let outcome = match command.validate(call) {
            Ok(()) => AssertUnwindSafe(command.execute(call))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(CommandError::Internal(panic_message(panic.as_ref())))),
            Err(e) => Err(e),
        };

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                if e.is_internal() {
                    tracing::error!(command = %spec.name, caller = call.caller_id, kind = e.kind(), "Command failed: {}", e);
                } else {
                    tracing::debug!(command = %spec.name, caller = call.caller_id, kind = e.kind(), "Command rejected: {}", e);
                }
                e.user_message(&spec.usage())
            }
        };

        Some(reply)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".into()
    }
}
