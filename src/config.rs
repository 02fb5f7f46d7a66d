use crate::llm::Provider;
use crate::log_internal;
use anyhow::{anyhow, Context, Result};
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::PathBuf;

const CONFIG_DIR_REL_HOME: &str = ".config/promptbot";
const PROMPTS_FILE: &str = "prompts.json";
const BANNED_WORDS_FILE: &str = "banned_words.txt";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Bot configuration.  Environment variables supply the scalar settings (a
/// `.env` file is honored); the preset prompts and banned-word list come from
/// optional files in the config directory.  Everything here is read-only for
/// the lifetime of the process.
pub struct Config {
    pub general: General,
    pub llm: Llm,
    pub history: History,
    /// Preset name -> system prompt text.
    pub presets: BTreeMap<String, String>,
    /// Lowercase words the bot refuses to read or repeat.
    pub banned_words: HashSet<String>,
}

pub struct General {
    pub discord_token: String,
    pub command_prefix: String,
}

pub struct Llm {
    pub provider: Provider,
    pub lmstudio_url: String,
    /// Forwarded as the model label; LM Studio ignores it.
    pub lmstudio_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

pub struct History {
    /// Cap counted in user/assistant exchange pairs; the stored turn count is
    /// twice this.
    pub max_turn_pairs: usize,
}

impl Config {
    pub async fn load() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| anyhow!("DISCORD_BOT_TOKEN is not set"))?;

        let max_turn_pairs = match std::env::var("HISTORY_MAX_TURNS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Could not parse HISTORY_MAX_TURNS `{}`", value))?,
            Err(_) => 20,
        };

        let config = Config {
            general: General {
                discord_token,
                command_prefix: env_or("COMMAND_PREFIX", ";"),
            },
            llm: Llm {
                provider: Provider::from_selector(&env_or("LLM_PROVIDER", "lmstudio")),
                lmstudio_url: env_or("LM_STUDIO_API_URL", "http://localhost:1234/v1"),
                lmstudio_model: env_or("LM_STUDIO_MODEL", "local-model"),
                gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
                gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash"),
            },
            history: History { max_turn_pairs },
            presets: load_presets().await,
            banned_words: load_banned_words().await,
        };

        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn config_path(file: &str) -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(CONFIG_DIR_REL_HOME).join(file))
        .ok_or(anyhow!("Could not find home directory"))
}

fn default_presets() -> BTreeMap<String, String> {
    BTreeMap::from([("default".to_string(), DEFAULT_SYSTEM_PROMPT.to_string())])
}

/// Load the preset prompt map.  A missing or unreadable file is not fatal;
/// the bot runs with the built-in default prompt only.
async fn load_presets() -> BTreeMap<String, String> {
    let path = match config_path(PROMPTS_FILE) {
        Ok(path) => path,
        Err(e) => {
            log_internal!("{}; using default prompt only", e);
            return default_presets();
        }
    };

    match tokio::fs::read(&path).await {
        Ok(data) => match serde_json::from_slice(&data) {
            Ok(presets) => presets,
            Err(e) => {
                log_internal!(
                    "Could not parse `{}`: {}; using default prompt only",
                    path.to_string_lossy(),
                    e
                );
                default_presets()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log_internal!(
                "No prompt presets at `{}`; using default prompt only",
                path.to_string_lossy()
            );
            default_presets()
        }
        Err(e) => {
            log_internal!(
                "Could not read `{}`: {}; using default prompt only",
                path.to_string_lossy(),
                e
            );
            default_presets()
        }
    }
}

/// Load the banned-word list, one word per line.  Blank lines and `#`
/// comments are skipped; words are lowercased on the way in.
async fn load_banned_words() -> HashSet<String> {
    let path = match config_path(BANNED_WORDS_FILE) {
        Ok(path) => path,
        Err(e) => {
            log_internal!("{}; banned-word filtering disabled", e);
            return HashSet::new();
        }
    };

    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log_internal!(
                "No banned-word list at `{}`; filtering disabled",
                path.to_string_lossy()
            );
            HashSet::new()
        }
        Err(e) => {
            log_internal!(
                "Could not read `{}`: {}; filtering disabled",
                path.to_string_lossy(),
                e
            );
            HashSet::new()
        }
    }
}
