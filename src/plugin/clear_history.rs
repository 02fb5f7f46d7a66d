use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Forgets the conversation history of the current channel
pub struct ClearHistory;

#[serenity::async_trait]
impl Plugin for ClearHistory {
    fn name(&self) -> &'static str {
        "clear"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - forget this channel's conversation history",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        ctx.vstate.write().await.history.clear(msg.channel_id);
        msg.reply(
            ctx.cache_http,
            "Conversation history for this channel has been cleared.",
        )
        .await?;
        Ok(EventHandled::Yes)
    }
}
