//! Telegram transport: long polling, dispatch and reply delivery.
//!
//! Everything chat-specific lives here. The query handler only sees a user
//! id and the message text and hands back a list of replies.

use crate::state::AppState;
use catalogbot_types::{Markup, Reply};
use std::sync::Arc;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{BotCommand, ParseMode, ReplyParameters, Update},
};

/// Register the command menu and poll for updates until ctrl-c.
pub async fn run(bot: Bot, state: Arc<AppState>) {
    register_commands(&bot).await;

    let handler = Update::filter_message().endpoint(handle_message);

    tracing::info!(target: "catalogbot::startup", "Starting dispatcher with long polling");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            tracing::debug!(target: "catalogbot::bot", "Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in message handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!(target: "catalogbot::startup", "Dispatcher stopped");
}

fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Начать работу с ботом"),
        BotCommand::new("help", "Как искать журналы"),
        BotCommand::new("show_top", "Показать первые N журналов из последнего списка"),
    ]
}

/// The menu is cosmetic; a failure here must not stop the bot.
async fn register_commands(bot: &Bot) {
    match bot.set_my_commands(bot_commands()).await {
        Ok(_) => tracing::debug!(target: "catalogbot::startup", "Registered bot commands"),
        Err(e) => tracing::warn!(target: "catalogbot::startup", "Failed to register bot commands: {}", e),
    }
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0;

    tracing::info!(
        target: "catalogbot::bot",
        user_id,
        chat_id = msg.chat.id.0,
        "Received message: {}",
        text
    );

    let replies = state.handler.handle(user_id, text).await;
    for reply in replies {
        send_reply(&bot, &msg, reply).await?;
    }
    Ok(())
}

async fn send_reply(bot: &Bot, msg: &Message, reply: Reply) -> ResponseResult<()> {
    if reply.text.trim().is_empty() {
        return Ok(());
    }

    let request = bot
        .send_message(msg.chat.id, reply.text)
        .reply_parameters(ReplyParameters::new(msg.id));
    match reply.markup {
        Markup::MarkdownV2 => request.parse_mode(ParseMode::MarkdownV2).await?,
        Markup::Plain => request.await?,
    };
    Ok(())
}
