//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_start_command;
use super::types::{HandlerDeps, HandlerError};
use super::{admin, flows};
use crate::dialog::DialogState;
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema is used in production and in tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps.clone();

    dptree::entry()
        // Command handler must come before the free-form message handler
        .branch(command_handler(deps_commands))
        // Message handler: dialog steps that expect typed input
        .branch(message_handler(deps_messages))
        // Callback query handler (inline keyboard buttons)
        .branch(callback_handler(deps_callback))
}

/// Handler for bot commands (/start)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => {
                        handle_start_command(bot, msg, deps)
                            .await
                            .map_err(|e| Box::new(e) as HandlerError)?;
                    }
                }
                Ok(())
            }
        },
    ))
}

/// Handler for regular messages.
///
/// Routing is driven entirely by the chat's dialog state: steps that expect
/// typed input get the message, button-driven steps ignore free input, and
/// with no dialog in progress text falls through to keyword routing.
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let deps = deps.clone();
        async move {
            let result = match deps.dialogs.get(msg.chat.id.0) {
                Some(DialogState::SupportAwaitingQuestion) => {
                    flows::handle_support_question(&bot, &msg, &deps).await
                }
                Some(DialogState::LeadContact { class, goal, time_pref }) => {
                    flows::handle_lead_contact(&bot, &msg, &deps, class, goal, time_pref).await
                }
                Some(DialogState::HwPayload { class, topic }) => {
                    flows::handle_homework_payload(&bot, &msg, &deps, class, topic).await
                }
                Some(DialogState::AdminAwaitingHwComment { homework_id }) => {
                    admin::handle_comment_message(&bot, &msg, &deps, homework_id).await
                }
                // Кнопочные шаги: экран уже показан, свободный ввод игнорируем.
                Some(_) => Ok(()),
                None => {
                    if msg.text().is_some() {
                        flows::handle_free_text(&bot, &msg, &deps).await
                    } else {
                        Ok(())
                    }
                }
            };
            result.map_err(|e| Box::new(e) as HandlerError)
        }
    })
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            match flows::handle_callback(bot, q, deps).await {
                Ok(()) => Ok(()),
                Err(e) => Err(Box::new(e) as HandlerError),
            }
        }
    })
}
