use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Changes the active system prompt, either to a named preset or to custom
/// text typed after the command.
pub struct SetPrompt;

#[serenity::async_trait]
impl Plugin for SetPrompt {
    fn name(&self) -> &'static str {
        "setprompt"
    }

    async fn usage(&self, ctx: &Context<'_>) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} <name|text> - set the system prompt to a preset or custom text",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        if args.is_empty() {
            msg.reply(
                ctx.cache_http,
                "Tell me which prompt to use: a preset name, or your own prompt text.",
            )
            .await?;
            return Ok(EventHandled::Yes);
        }

        let cfg = ctx.cfg.read().await;
        let reply = match cfg.presets.get(args) {
            Some(text) => {
                ctx.vstate.write().await.prompt.active = text.clone();
                format!("System prompt changed to **{}**.", args)
            }
            None => {
                ctx.vstate.write().await.prompt.active = args.to_string();
                "Custom system prompt has been set.".to_string()
            }
        };

        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
