//! Shared doubles for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::HashMap,
    num::NonZeroU64,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use trivium_bot::{
    db::error,
    model::{
        config::GuildConfig,
        message::{Author, Message},
    },
    Bot, ConfigStore, Messenger, Pacing, QuestionBank, SendError,
};
use twilight_model::id::{marker::ChannelMarker, Id};

pub const GUILD: u64 = 100;
pub const CHANNEL: u64 = 200;
pub const ALICE: u64 = 11;
pub const BELLA: u64 = 12;

pub const TWO_QUESTIONS: &str = r#"[
    { "prompt": "Q1", "answers": ["A1"] },
    { "prompt": "Q2", "answers": ["A2"] }
]"#;

pub const ONE_QUESTION: &str = r#"[
    { "prompt": "Q1", "answers": ["A1"] }
]"#;

/// Captures every outbound message so tests can assert on the transcript.
pub struct TestChat {
    outbox: UnboundedSender<(u64, String)>,
}

impl TestChat {
    pub fn new() -> (Self, UnboundedReceiver<(u64, String)>) {
        let (outbox, transcript) = mpsc::unbounded_channel();
        (Self { outbox }, transcript)
    }
}

#[async_trait]
impl Messenger for TestChat {
    async fn send(&self, channel: Id<ChannelMarker>, text: &str) -> Result<(), SendError> {
        // The receiver may be gone when a test only cares about side effects.
        let _ = self.outbox.send((channel.get(), String::from(text)));
        Ok(())
    }
}

/// Fails every delivery.
pub struct DeadChat;

#[async_trait]
impl Messenger for DeadChat {
    async fn send(&self, _: Id<ChannelMarker>, _: &str) -> Result<(), SendError> {
        Err(SendError)
    }
}

/// Records like `TestChat`, but holds any announcement starting with the
/// given text in flight for a while before delivering it.
pub struct StallingChat {
    outbox: UnboundedSender<(u64, String)>,
    held: &'static str,
    delay: Duration,
}

impl StallingChat {
    pub fn new(held: &'static str, delay: Duration) -> (Self, UnboundedReceiver<(u64, String)>) {
        let (outbox, transcript) = mpsc::unbounded_channel();
        (Self { outbox, held, delay }, transcript)
    }
}

#[async_trait]
impl Messenger for StallingChat {
    async fn send(&self, channel: Id<ChannelMarker>, text: &str) -> Result<(), SendError> {
        if text.starts_with(self.held) {
            tokio::time::sleep(self.delay).await;
        }
        let _ = self.outbox.send((channel.get(), String::from(text)));
        Ok(())
    }
}

/// View into a `TestStore` that stays with the test after the store itself
/// moves into the bot.
#[derive(Clone, Default)]
pub struct StoreProbe {
    pub configs: Arc<Mutex<HashMap<u64, GuildConfig>>>,
    pub playing: Arc<Mutex<Vec<(u64, bool)>>>,
}

/// In-memory settings store recording every mutation.
pub struct TestStore {
    state: StoreProbe,
}

impl TestStore {
    pub fn new() -> (Self, StoreProbe) {
        let state = StoreProbe::default();
        (Self { state: state.clone() }, state)
    }

    pub fn with_config(guild: u64, config: GuildConfig) -> (Self, StoreProbe) {
        let (store, probe) = Self::new();
        probe.configs.lock().unwrap().insert(guild, config);
        (store, probe)
    }
}

#[async_trait]
impl ConfigStore for TestStore {
    async fn guild_config(&self, guild: NonZeroU64) -> error::Result<Option<GuildConfig>> {
        Ok(self.state.configs.lock().unwrap().get(&guild.get()).cloned())
    }

    async fn set_prefix(&self, guild: NonZeroU64, prefix: &str) -> error::Result<()> {
        self.state.configs.lock().unwrap().entry(guild.get()).or_default().prefix = String::from(prefix);
        Ok(())
    }

    async fn set_channel(&self, guild: NonZeroU64, channel: NonZeroU64) -> error::Result<()> {
        self.state.configs.lock().unwrap().entry(guild.get()).or_default().channel = Some(channel);
        Ok(())
    }

    async fn set_playing(&self, guild: NonZeroU64, playing: bool) -> error::Result<()> {
        self.state.playing.lock().unwrap().push((guild.get(), playing));
        Ok(())
    }
}

/// Fails every settings operation.
pub struct FailingStore;

#[async_trait]
impl ConfigStore for FailingStore {
    async fn guild_config(&self, _: NonZeroU64) -> error::Result<Option<GuildConfig>> {
        Err(error::Error::Fatal)
    }

    async fn set_prefix(&self, _: NonZeroU64, _: &str) -> error::Result<()> {
        Err(error::Error::Fatal)
    }

    async fn set_channel(&self, _: NonZeroU64, _: NonZeroU64) -> error::Result<()> {
        Err(error::Error::Fatal)
    }

    async fn set_playing(&self, _: NonZeroU64, _: bool) -> error::Result<()> {
        Err(error::Error::Fatal)
    }
}

pub fn message(guild: u64, user: u64, channel: u64, content: &str) -> Message {
    Message {
        author: Author { id: NonZeroU64::new(user).unwrap(), bot: false },
        guild_id: NonZeroU64::new(guild),
        channel_id: NonZeroU64::new(channel).unwrap(),
        content: String::from(content),
    }
}

pub fn channel_message(user: u64, channel: u64, content: &str) -> Message {
    message(GUILD, user, channel, content)
}

pub fn guild_message(user: u64, content: &str) -> Message {
    channel_message(user, CHANNEL, content)
}

pub fn direct_message(user: u64, content: &str) -> Message {
    Message {
        author: Author { id: NonZeroU64::new(user).unwrap(), bot: false },
        guild_id: None,
        channel_id: NonZeroU64::new(300).unwrap(),
        content: String::from(content),
    }
}

pub fn bot_message(content: &str) -> Message {
    let mut message = guild_message(ALICE, content);
    message.author.bot = true;
    message
}

pub fn bank_file(name: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("trivium-test-{}-{name}.json", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

/// A bot over the two-question bank with recording chat and settings.
pub fn game_bot(
    name: &str,
    pacing: Pacing,
) -> (Bot<TestChat, TestStore>, UnboundedReceiver<(u64, String)>, StoreProbe) {
    let (chat, transcript) = TestChat::new();
    let (store, probe) = TestStore::new();
    let bank = QuestionBank::new(bank_file(name, TWO_QUESTIONS));
    (Bot::from_parts(chat, store, bank, pacing), transcript, probe)
}
