use crate::{
    context::Context,
    event::*,
    filter::contains_banned_word,
    helper::{split_message, MessageHelper, DISCORD_MESSAGE_LIMIT},
    llm::LlmRequest,
    plugin::*,
};
use anyhow::Result;
use rand::Rng;

const EMPTY_PROMPT_NOTICE: &str = "You mentioned me, but didn't ask anything! How can I help?";
const NO_RESPONSE_NOTICE: &str = "Sorry, I couldn't get a response from the model.";
const PROMPT_BLOCKED_NOTICE: &str = "That message contains a word I'm not allowed to discuss.";
const RESPONSE_BLOCKED_NOTICE: &str =
    "The model's reply contained a word I'm not allowed to repeat, so I've discarded it.";

/// Answers messages addressed to the bot with an LLM completion
pub struct LlmReply;

#[serenity::async_trait]
impl Plugin for LlmReply {
    fn name(&self) -> &'static str {
        "llm_reply"
    }

    async fn usage(&self, _ctx: &Context<'_>) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        // Only respond if the message is to the bot
        if !msg.is_to_me(ctx).await? {
            return Ok(EventHandled::No);
        }

        let bot_id = ctx.cache.current_user().id;
        let stripped = msg.strip_my_mentions(bot_id);
        if stripped.is_empty() {
            msg.reply(ctx.cache_http, EMPTY_PROMPT_NOTICE).await?;
            return Ok(EventHandled::Yes);
        }

        // The request may take a while; show as "typing" until the reply is
        // out.
        let typing = msg.channel_id.start_typing(ctx.http);

        // When replying to an earlier message, hand the model that context
        // too.  Best-effort; the prompt works without it.
        let prompt = match msg.reply_annotation(ctx).await {
            Some(annotation) => format!("{}\n{}", annotation, stripped),
            None => stripped,
        };

        let cfg = ctx.cfg.read().await;
        if contains_banned_word(&prompt, &cfg.banned_words) {
            typing.stop();
            msg.reply(ctx.cache_http, PROMPT_BLOCKED_NOTICE).await?;
            return Ok(EventHandled::Yes);
        }

        let (system_prompt, history, thinking_enabled, grounding_enabled) = {
            let mut vstate = ctx.vstate.write().await;
            let pick = match cfg.presets.len() {
                0 => 0,
                n => rand::rng().random_range(0..n),
            };
            let system_prompt = vstate.prompt.effective_system_prompt(&cfg.presets, pick);
            let history = vstate.history.get(msg.channel_id).to_vec();
            (
                system_prompt,
                history,
                vstate.prompt.thinking,
                vstate.prompt.grounding,
            )
        };

        let request = LlmRequest {
            prompt: &prompt,
            system_prompt: &system_prompt,
            history: &history,
            thinking_enabled,
            grounding_enabled,
        };
        let response = cfg.llm.provider.generate(&cfg.llm, &request).await;
        typing.stop();

        let Some(text) = response else {
            msg.reply(ctx.cache_http, NO_RESPONSE_NOTICE).await?;
            return Ok(EventHandled::Yes);
        };

        // Same filter on the way out; a blocked reply is dropped without
        // entering history.
        if contains_banned_word(&text, &cfg.banned_words) {
            msg.reply(ctx.cache_http, RESPONSE_BLOCKED_NOTICE).await?;
            return Ok(EventHandled::Yes);
        }
        drop(cfg);

        ctx.vstate
            .write()
            .await
            .history
            .record_exchange(msg.channel_id, prompt, text.clone());

        for chunk in split_message(&text, DISCORD_MESSAGE_LIMIT) {
            msg.channel_id.say(ctx.cache_http, chunk).await?;
        }

        Ok(EventHandled::Yes)
    }
}
