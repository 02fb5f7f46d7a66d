use crate::config::{Config, DEFAULT_SYSTEM_PROMPT};
use crate::llm::{ChatTurn, Role};
use serenity::all::ChannelId;
use std::collections::{BTreeMap, HashMap};

/// State which is lost across sessions
pub struct VolatileState {
    pub history: History,
    pub prompt: PromptState,
}

impl VolatileState {
    pub fn new(cfg: &Config) -> Self {
        Self {
            history: History::new(cfg.history.max_turn_pairs),
            prompt: PromptState::new(&cfg.presets),
        }
    }
}

/// Per-channel conversation history, created lazily on the first exchange in
/// a channel.  Never expires; only the `clear` command empties it.
pub struct History {
    channels: HashMap<ChannelId, Vec<ChatTurn>>,
    /// Maximum stored turns per channel: two per exchange pair.
    max_turns: usize,
}

impl History {
    pub fn new(max_turn_pairs: usize) -> Self {
        Self {
            channels: HashMap::new(),
            max_turns: max_turn_pairs * 2,
        }
    }

    pub fn get(&self, channel_id: ChannelId) -> &[ChatTurn] {
        self.channels
            .get(&channel_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Record one accepted exchange, evicting the oldest turns if the channel
    /// is over its cap.
    pub fn record_exchange(&mut self, channel_id: ChannelId, prompt: String, response: String) {
        let history = self.channels.entry(channel_id).or_default();
        history.push(ChatTurn::new(Role::user, prompt));
        history.push(ChatTurn::new(Role::assistant, response));

        while history.len() > self.max_turns {
            history.remove(0);
        }
    }

    pub fn clear(&mut self, channel_id: ChannelId) {
        self.channels.remove(&channel_id);
    }
}

/// The mutable prompt settings the command plugins toggle.
pub struct PromptState {
    /// The persistent system prompt; survives random-mode calls untouched.
    pub active: String,
    pub random_mode: bool,
    /// The preset text the last random-mode call used.
    pub last_random: Option<String>,
    pub thinking: bool,
    pub grounding: bool,
}

impl PromptState {
    pub fn new(presets: &BTreeMap<String, String>) -> Self {
        Self {
            active: presets
                .get("default")
                .cloned()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            random_mode: false,
            last_random: None,
            thinking: false,
            grounding: false,
        }
    }

    /// Resolve the system prompt for one request.  In random mode `pick`
    /// indexes into the preset values (callers draw it uniformly); the chosen
    /// text is cached as last-random and used for this call only.
    pub fn effective_system_prompt(
        &mut self,
        presets: &BTreeMap<String, String>,
        pick: usize,
    ) -> String {
        if !self.random_mode || presets.is_empty() {
            return self.active.clone();
        }

        let value = presets
            .values()
            .nth(pick % presets.len())
            .cloned()
            .unwrap_or_else(|| self.active.clone());
        self.last_random = Some(value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> ChannelId {
        ChannelId::new(1)
    }

    #[test]
    fn unknown_channel_has_empty_history() {
        let history = History::new(20);
        assert!(history.get(channel()).is_empty());
    }

    #[test]
    fn exchanges_are_stored_in_order() {
        let mut history = History::new(20);
        history.record_exchange(channel(), "q1".into(), "a1".into());
        history.record_exchange(channel(), "q2".into(), "a2".into());

        let turns = history.get(channel());
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::user);
        assert_eq!(turns[0].content, "q1");
        assert_eq!(turns[1].role, Role::assistant);
        assert_eq!(turns[1].content, "a1");
        assert_eq!(turns[3].content, "a2");
    }

    #[test]
    fn cap_evicts_oldest_exchanges_first() {
        let cap = 3;
        let total = 10;
        let mut history = History::new(cap);
        for i in 0..total {
            history.record_exchange(channel(), format!("q{}", i), format!("a{}", i));
        }

        let turns = history.get(channel());
        assert_eq!(turns.len(), cap * 2);
        // The survivors are the most recent `cap` exchanges, oldest first.
        assert_eq!(turns[0].content, format!("q{}", total - cap));
        assert_eq!(turns[turns.len() - 1].content, format!("a{}", total - 1));
    }

    #[test]
    fn channels_do_not_share_history() {
        let mut history = History::new(20);
        history.record_exchange(ChannelId::new(1), "q".into(), "a".into());
        assert!(history.get(ChannelId::new(2)).is_empty());
    }

    #[test]
    fn clear_drops_a_channel() {
        let mut history = History::new(20);
        history.record_exchange(channel(), "q".into(), "a".into());
        history.clear(channel());
        assert!(history.get(channel()).is_empty());
    }

    fn presets() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("a".to_string(), "A-text".to_string()),
            ("b".to_string(), "B-text".to_string()),
        ])
    }

    #[test]
    fn active_prompt_defaults_from_presets() {
        let presets = BTreeMap::from([("default".to_string(), "from file".to_string())]);
        assert_eq!(PromptState::new(&presets).active, "from file");
        assert_eq!(PromptState::new(&BTreeMap::new()).active, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn random_mode_off_uses_active_prompt() {
        let mut state = PromptState::new(&presets());
        state.active = "persistent".to_string();
        assert_eq!(state.effective_system_prompt(&presets(), 1), "persistent");
        assert!(state.last_random.is_none());
    }

    #[test]
    fn random_mode_picks_preset_without_touching_active() {
        let mut state = PromptState::new(&presets());
        state.active = "persistent".to_string();
        state.random_mode = true;

        assert_eq!(state.effective_system_prompt(&presets(), 1), "B-text");
        assert_eq!(state.active, "persistent");
        assert_eq!(state.last_random.as_deref(), Some("B-text"));
    }

    #[test]
    fn random_mode_with_no_presets_falls_back_to_active() {
        let mut state = PromptState::new(&BTreeMap::new());
        state.random_mode = true;
        assert_eq!(
            state.effective_system_prompt(&BTreeMap::new(), 0),
            DEFAULT_SYSTEM_PROMPT
        );
        assert!(state.last_random.is_none());
    }
}
