use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Shows the active system prompt
pub struct ShowPrompt;

#[serenity::async_trait]
impl Plugin for ShowPrompt {
    fn name(&self) -> &'static str {
        "prompt"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - show the current system prompt",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let reply = {
            let vstate = ctx.vstate.read().await;
            let mut reply = format!(
                "**Current system prompt:**\n```\n{}\n```",
                vstate.prompt.active
            );
            if vstate.prompt.random_mode {
                match &vstate.prompt.last_random {
                    Some(last) => reply.push_str(&format!(
                        "\nRandom mode is on; the last randomly chosen prompt was:\n```\n{}\n```",
                        last
                    )),
                    None => reply.push_str("\nRandom mode is on."),
                }
            }
            reply
        };

        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
