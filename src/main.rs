mod config;
mod context;
mod event;
mod filter;
mod handler;
mod helper;
mod llm;
mod logging;
mod plugin;
mod volatile_state;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file; already-set environment variables win.
    dotenvy::dotenv().ok();

    let cfg = crate::config::Config::load().await?;
    let token = cfg.general.discord_token.clone();
    let vstate = crate::volatile_state::VolatileState::new(&cfg);
    let handler = handler::Handler::new(cfg, vstate);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
