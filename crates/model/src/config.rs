use alloc::string::String;
use core::num::NonZeroU64;
use serde::{Deserialize, Serialize};

/// Per-guild settings, with fallbacks applied when a guild has none stored.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GuildConfig {
    /// Text members must put in front of a command name.
    pub prefix: String,
    /// Channel trivia is restricted to, if the guild chose one.
    pub channel: Option<NonZeroU64>,
}

impl Default for GuildConfig {
    fn default() -> Self {
        Self { prefix: String::from("!"), channel: None }
    }
}
