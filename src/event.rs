//! The Serenity crate we're using for the Discord API is designed around callbacks to handle
//! events.  However, this does not mesh well with our plugin framework here.  To resolve this,
//! this module translates the callbacks into a distinct Event enum.

use crate::{context::Context, event::EventHandled::*, log_internal};
use serenity::all::{Message, Ready};

/// A Discord event
pub enum Event {
    Ready(Ready),
    Message(Message),
}

impl Event {
    // When an event occurs, iterate over all the plugins to see if any can/should handle it.
    pub async fn handle(self, ctx: Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match plugin.handle(&ctx, &self).await {
                Ok(Yes) => return,
                Ok(No) => continue,
                Err(err) => log_internal!("Error in plugin {}: {}", plugin.name(), err),
            }
        }
    }

    // Check if a message should be interpreted as a special bot command.
    //
    // These are typically prefixed with a semicolon, e.g. `;cmd foo bar baz`.
    // Returns the message and whatever text followed the command word.
    pub async fn is_bot_cmd<'a>(
        &'a self,
        ctx: &Context<'_>,
        cmd: &str,
    ) -> Option<(&'a Message, &'a str)> {
        let Event::Message(msg) = self else {
            return None;
        };

        let content = msg.content.trim();
        let (first, rest) = match content.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim_start()),
            None => (content, ""),
        };

        let prefix = &ctx.cfg.read().await.general.command_prefix;
        let matches = first
            .strip_prefix(prefix.as_str())
            .is_some_and(|word| word == cmd);

        matches.then_some((msg, rest))
    }
}

pub enum EventHandled {
    Yes,
    No,
}
