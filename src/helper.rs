//! Miscellaneous convenience methods

use crate::context::Context;
use crate::log_internal;
use anyhow::Result;
use serenity::all::{GuildId, UserId};

/// Discord's maximum message length in characters.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

#[serenity::async_trait]
pub trait UserHelper {
    async fn nick_in_guild(&self, ctx: &Context<'_>, guild_id: Option<GuildId>) -> String;
}

#[serenity::async_trait]
impl UserHelper for serenity::all::User {
    async fn nick_in_guild(&self, ctx: &Context<'_>, guild_id: Option<GuildId>) -> String {
        let nick_in_guild = match guild_id {
            Some(guild_id) => self.nick_in(ctx.cache_http, guild_id).await,
            None => None,
        };

        // May not be in a guild, e.g. DM.  Fall back to global username.
        match nick_in_guild {
            Some(nick_in_guild) => nick_in_guild,
            None => self.name.clone(),
        }
    }
}

#[serenity::async_trait]
pub trait MessageHelper {
    async fn is_to_me(&self, ctx: &Context<'_>) -> Result<bool>;
    fn strip_my_mentions(&self, bot_id: UserId) -> String;
    async fn reply_annotation(&self, ctx: &Context<'_>) -> Option<String>;
}

#[serenity::async_trait]
impl MessageHelper for serenity::all::Message {
    /// A message is "to me" if it mentions the bot directly, or replies to a
    /// message the bot wrote.
    async fn is_to_me(&self, ctx: &Context<'_>) -> Result<bool> {
        if self.mentions_me(ctx.cache_http).await? {
            return Ok(true);
        }

        let my_id = ctx.cache.current_user().id;
        if let Some(reference) = &self.message_reference {
            if let Some(msg_id) = reference.message_id {
                if self
                    .channel_id
                    .message(ctx.cache_http, msg_id)
                    .await?
                    .author
                    .id
                    == my_id
                {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// The message text with the bot's own mention tokens removed.
    fn strip_my_mentions(&self, bot_id: UserId) -> String {
        strip_mentions(&self.content, bot_id)
    }

    /// If this message replies to another, a bracketed annotation naming the
    /// replied-to author and text.  Best-effort: a failed fetch is logged and
    /// the prompt proceeds without the annotation.
    async fn reply_annotation(&self, ctx: &Context<'_>) -> Option<String> {
        let reference = self.message_reference.as_ref()?;
        let msg_id = reference.message_id?;

        match self.channel_id.message(ctx.cache_http, msg_id).await {
            Ok(referenced) => {
                let author = referenced
                    .author
                    .nick_in_guild(ctx, referenced.guild_id)
                    .await;
                Some(format!("[In reply to {}: \"{}\"]", author, referenced.content))
            }
            Err(e) => {
                log_internal!("Could not fetch replied-to message: {}", e);
                None
            }
        }
    }
}

fn strip_mentions(content: &str, bot_id: UserId) -> String {
    content
        .replace(&format!("<@!{}>", bot_id), "")
        .replace(&format!("<@{}>", bot_id), "")
        .trim()
        .to_string()
}

/// Split `text` into sequential chunks of at most `limit` characters.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_both_mention_forms() {
        let bot_id = UserId::new(42);
        assert_eq!(strip_mentions("<@42> hello", bot_id), "hello");
        assert_eq!(strip_mentions("<@!42> hello", bot_id), "hello");
        assert_eq!(strip_mentions("hello <@42> there", bot_id), "hello  there");
    }

    #[test]
    fn other_mentions_are_left_alone() {
        let bot_id = UserId::new(42);
        assert_eq!(strip_mentions("<@99> hi", bot_id), "<@99> hi");
    }

    #[test]
    fn mention_only_message_strips_to_empty() {
        assert_eq!(strip_mentions("<@42>", UserId::new(42)), "");
        assert_eq!(strip_mentions("  <@!42>  ", UserId::new(42)), "");
    }

    #[test]
    fn short_message_is_one_chunk() {
        let text = "a".repeat(2000);
        let chunks = split_message(&text, 2000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chars().count(), 2000);
    }

    #[test]
    fn long_message_splits_in_order() {
        let text = "x".repeat(4001);
        let chunks = split_message(&text, 2000);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![2000, 2000, 1]);
    }

    #[test]
    fn splitting_counts_characters_not_bytes() {
        let text = "é".repeat(2001);
        let chunks = split_message(&text, 2000);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![2000, 1]);
    }

    #[test]
    fn chunks_reassemble_to_the_original() {
        let text = "abc".repeat(1500);
        assert_eq!(split_message(&text, 2000).concat(), text);
    }
}
