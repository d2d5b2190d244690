//! Telegram Transport
//!
//! Long polling via teloxide. Each text message from a user is parsed as a
//! command and answered in the same chat.

use std::sync::Arc;

use finder_core::CommandCall;
use teloxide::prelude::*;

use crate::state::AppState;

/// This bot's `@username`, used to skip commands meant for other bots
#[derive(Clone)]
struct BotName(Option<Arc<str>>);

/// Poll for updates until Ctrl-C
pub async fn run(bot: Bot, state: AppState) -> Result<(), teloxide::RequestError> {
    let me = bot.get_me().await?;
    let name = BotName(me.user.username.as_deref().map(Arc::from));
    tracing::info!(username = ?name.0, "Connected to Telegram");

    let handler = Update::filter_message().endpoint(on_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state, name])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(bot: Bot, msg: Message, state: AppState, name: BotName) -> ResponseResult<()> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };

    let Ok(caller_id) = i64::try_from(user.id.0) else {
        tracing::warn!(user_id = user.id.0, "Telegram user id out of range");
        return Ok(());
    };

    let Some(call) = CommandCall::parse(text, caller_id) else {
        return Ok(());
    };

    if let Some(username) = name.0.as_deref() {
        if !call.is_addressed_to(username) {
            tracing::debug!(command = %call.name, addressee = ?call.addressee, "Command addressed to another bot");
            return Ok(());
        }
    }

    if let Some(reply) = state.registry.dispatch(&call).await {
        bot.send_message(msg.chat.id, reply).await?;
    }

    Ok(())
}
