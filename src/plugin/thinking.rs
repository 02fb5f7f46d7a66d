use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Toggles whether the local model's reasoning text is shown or stripped
pub struct Thinking;

#[serenity::async_trait]
impl Plugin for Thinking {
    fn name(&self) -> &'static str {
        "thinking"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - toggle showing the model's reasoning",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let enabled = {
            let mut vstate = ctx.vstate.write().await;
            vstate.prompt.thinking = !vstate.prompt.thinking;
            vstate.prompt.thinking
        };

        let reply = if enabled {
            "Thinking is now visible in replies."
        } else {
            "Thinking is now hidden from replies."
        };
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
