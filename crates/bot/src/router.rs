//! Inbound message routing.

use crate::{
    bank::QuestionBank,
    chat::{announce, Discord, Messenger},
    error::{Error, Result},
    session::{registry::Registry, Event, Pacing},
    store::ConfigStore,
};
use db::{Database, GuildConfig};
use model::message::Message;
use std::sync::Arc;
use twilight_model::id::{
    marker::{ChannelMarker, GuildMarker},
    Id,
};

pub(crate) struct Inner<S, C> {
    pub chat: S,
    pub store: C,
    pub bank: QuestionBank,
    pub games: Registry,
    pub pacing: Pacing,
}

/// The bot: owns the shared components and routes every relayed message
/// event to a command handler or a running game.
pub struct Bot<S, C> {
    pub(crate) inner: Arc<Inner<S, C>>,
}

impl<S, C> Clone for Bot<S, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl Bot<Discord, Database> {
    /// Assembles the production bot from a Discord bot token.
    pub fn new(token: String, store: Database, bank: QuestionBank, pacing: Pacing) -> Self {
        Self::from_parts(Discord::from(twilight_http::Client::new(token)), store, bank, pacing)
    }
}

impl<S: Messenger, C: ConfigStore> Bot<S, C> {
    pub fn from_parts(chat: S, store: C, bank: QuestionBank, pacing: Pacing) -> Self {
        Self { inner: Arc::new(Inner { chat, store, bank, games: Registry::default(), pacing }) }
    }

    /// Entry point for every message event delivered by the relay.
    pub async fn on_message(&self, message: Message) {
        // Bot accounts do not play trivia; this also covers our own messages.
        if message.author.bot {
            return;
        }
        let channel: Id<ChannelMarker> = Id::from(message.channel_id);
        let Some(guild_id) = message.guild_id else {
            log::debug!("turning away a direct message from user {}", message.author.id);
            announce(&self.inner.chat, channel, &Error::DirectMessage.to_string()).await;
            return;
        };
        let guild: Id<GuildMarker> = Id::from(guild_id);

        let config = match self.inner.store.guild_config(guild_id).await {
            Ok(Some(config)) => config,
            Ok(None) => GuildConfig::default(),
            Err(err) => {
                // A settings-store blip must not mute a running game.
                log::error!("settings lookup failed for guild {guild}, using defaults: {err:?}");
                GuildConfig::default()
            }
        };

        if let Some(rest) = message.content.strip_prefix(config.prefix.as_str()) {
            let mut words = rest.split_whitespace();
            let Some(name) = words.next() else {
                announce(&self.inner.chat, channel, &Error::NoCommand.to_string()).await;
                return;
            };
            let name = name.to_ascii_lowercase();
            let args: Vec<&str> = words.collect();
            log::debug!("user {} invoked \"{name}\" in guild {guild}", message.author.id);
            if let Err(err) = self.dispatch(&name, &args, &message, guild, channel, &config).await {
                if let Error::Store = err {
                    log::error!("command \"{name}\" in guild {guild} failed on the settings store");
                }
                announce(&self.inner.chat, channel, &err.to_string()).await;
            }
        } else {
            self.inner.games.submit(
                guild,
                channel,
                Event::Guess { user: Id::from(message.author.id), text: message.content.into_boxed_str() },
            );
        }
    }

    /// Two-tier command table: settings and help work from any channel,
    /// while game commands are confined to the trivia channel once one is
    /// configured.
    async fn dispatch(
        &self,
        name: &str,
        args: &[&str],
        message: &Message,
        guild: Id<GuildMarker>,
        channel: Id<ChannelMarker>,
        config: &GuildConfig,
    ) -> Result<()> {
        match name {
            "help" => return self.help(channel, config).await,
            "set-prefix" => return self.set_prefix(guild, channel, args).await,
            "set-channel" => return self.set_channel(guild, channel, args).await,
            _ => {}
        }
        if let Some(home) = config.channel {
            if Id::<ChannelMarker>::from(home) != channel {
                return Err(Error::ChannelRestricted);
            }
        }
        match name {
            "start" => self.start(message, guild, channel).await,
            "stop" => self.stop(guild, channel).await,
            "scores" => self.scores(guild).await,
            _ => Err(Error::UnknownCommand),
        }
    }
}
