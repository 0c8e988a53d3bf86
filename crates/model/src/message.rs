use alloc::string::String;
use core::num::NonZeroU64;
use serde::{Deserialize, Serialize};

/// Chat message event pushed to us by the gateway relay.
///
/// The relay re-encodes the upstream API's stringified snowflakes as plain
/// integers before forwarding, so every identifier here is numeric. Fields
/// we have no use for are simply ignored during deserialization.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
    /// Account that typed the message.
    pub author: Author,
    /// Guild the message was sent in; absent for direct messages.
    #[serde(default)]
    pub guild_id: Option<NonZeroU64>,
    /// Channel the message was sent in.
    pub channel_id: NonZeroU64,
    /// Raw text content.
    pub content: String,
}

/// Author details carried with each message event.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Author {
    pub id: NonZeroU64,
    /// Whether the author is a bot account (including ourselves).
    #[serde(default)]
    pub bot: bool,
}
