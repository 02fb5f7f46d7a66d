use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Swallows every bot-authored message, including the bot's own, before any
/// command or LLM plugin sees it.
pub struct IgnoreBots;

#[serenity::async_trait]
impl Plugin for IgnoreBots {
    fn name(&self) -> &'static str {
        "ignore_bots"
    }

    async fn usage(&self, _ctx: &Context<'_>) -> Option<String> {
        None
    }

    async fn handle(&self, _ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Message(msg) if msg.author.bot => Ok(EventHandled::Yes),
            _ => Ok(EventHandled::No),
        }
    }
}
