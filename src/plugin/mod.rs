use crate::context::Context;
use crate::event::EventHandled;
use anyhow::Result;

mod clear_history;
mod debug;
mod grounding;
mod help;
mod ignore_bots;
mod list_prompts;
mod llm_reply;
mod random_prompt;
mod set_prompt;
mod show_prompt;
mod thinking;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Used for debug, and as the command word for command
    /// plugins
    fn name(&self) -> &'static str;
    /// Help message line.  None if no help message
    async fn usage(&self, ctx: &Context<'_>) -> Option<String>;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context<'_>, event: &crate::event::Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    use crate::plugin::*;

    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ignore_bots::IgnoreBots),
        Box::new(help::Help),
        // Prompt and toggle commands
        Box::new(set_prompt::SetPrompt),
        Box::new(show_prompt::ShowPrompt),
        Box::new(list_prompts::ListPrompts),
        Box::new(random_prompt::RandomPrompt),
        Box::new(thinking::Thinking),
        Box::new(grounding::Grounding),
        Box::new(clear_history::ClearHistory),
        // LLM fallback, used if no other plugin handles the event.
        // Keep last.
        Box::new(llm_reply::LlmReply),
    ]
}
