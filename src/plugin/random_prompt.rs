use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Toggles random-prompt mode, where each reply uses a randomly chosen preset
pub struct RandomPrompt;

#[serenity::async_trait]
impl Plugin for RandomPrompt {
    fn name(&self) -> &'static str {
        "random"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - toggle random preset-prompt mode",
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
            vstate.prompt.random_mode = !vstate.prompt.random_mode;
            vstate.prompt.random_mode
        };

        let reply = if enabled {
            "Random prompt mode is now on; each reply uses a randomly chosen preset."
        } else {
            "Random prompt mode is now off; replies use the active system prompt."
        };
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
