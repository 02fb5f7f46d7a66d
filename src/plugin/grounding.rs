use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Toggles search grounding for the Gemini backend
pub struct Grounding;

#[serenity::async_trait]
impl Plugin for Grounding {
    fn name(&self) -> &'static str {
        "grounding"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - toggle web-search grounding",
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
            vstate.prompt.grounding = !vstate.prompt.grounding;
            vstate.prompt.grounding
        };

        let reply = if enabled {
            "Search grounding is now on."
        } else {
            "Search grounding is now off."
        };
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
