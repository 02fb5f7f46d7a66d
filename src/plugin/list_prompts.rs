use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Lists the preset prompts loaded at startup
pub struct ListPrompts;

#[serenity::async_trait]
impl Plugin for ListPrompts {
    fn name(&self) -> &'static str {
        "prompts"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - list the available preset prompts",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let cfg = ctx.cfg.read().await;
        if cfg.presets.is_empty() {
            msg.reply(ctx.cache_http, "No preset prompts are configured.")
                .await?;
            return Ok(EventHandled::Yes);
        }

        let mut reply = String::new();
        reply.push_str("```\n");
        reply.push_str("Available system prompts:\n");
        for (name, text) in &cfg.presets {
            let preview: String = text.chars().take(100).collect();
            reply.push_str(&format!("{} - {}\n", name, preview));
        }
        reply.push_str("```\n");

        msg.reply(ctx.cache_http, &reply).await?;
        Ok(EventHandled::Yes)
    }
}
