//! # finder-core
//!
//! Transport-agnostic command handling for chat front ends.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   text    ┌──────────────┐  CommandCall  ┌──────────────────┐
//! │  Transport   │──────────▶│ CommandCall  │──────────────▶│ CommandRegistry  │
//! │ (Telegram,   │           │   ::parse    │               │  validate        │
//! │  HTTP, ...)  │◀──────────│              │◀──────────────│  execute         │
//! └──────────────┘   reply   └──────────────┘    String     │  recover         │
//!                                                           └──────────────────┘
//! ```
//!
//! The transport never sees an error: `CommandRegistry::dispatch` turns every
//! failure into either the command's usage line or a generic failure reply.

pub mod command;
pub mod error;

pub use command::{ArgKind, ArgSpec, Command, CommandCall, CommandRegistry, CommandSpec};
pub use error::{CommandError, Result, GENERIC_FAILURE_REPLY};
