//! Command handlers.

use crate::{
    chat::{announce, Messenger},
    error::{Error, Result},
    router::Bot,
    session::{self, Event},
    store::ConfigStore,
};
use db::GuildConfig;
use model::message::Message;
use std::{num::NonZeroU64, sync::Arc};
use tokio::sync::mpsc;
use twilight_model::id::{
    marker::{ChannelMarker, GuildMarker},
    Id,
};

impl<S: Messenger, C: ConfigStore> Bot<S, C> {
    pub(crate) async fn help(
        &self,
        channel: Id<ChannelMarker>,
        config: &GuildConfig,
    ) -> Result<()> {
        let prefix = config.prefix.as_str();
        let text = format!(
            "Here's everything I answer to:\n\
             `{prefix}start` - begin a trivia game in this channel\n\
             `{prefix}stop` - call off the current game\n\
             `{prefix}scores` - show the current standings\n\
             `{prefix}set-channel [#channel]` - pick the channel trivia may run in\n\
             `{prefix}set-prefix <prefix>` - change my command prefix\n\
             `{prefix}help` - show this message"
        );
        announce(&self.inner.chat, channel, &text).await;
        Ok(())
    }

    pub(crate) async fn set_prefix(
        &self,
        guild: Id<GuildMarker>,
        channel: Id<ChannelMarker>,
        args: &[&str],
    ) -> Result<()> {
        let Some(prefix) = args.first() else {
            return Err(Error::InvalidParams);
        };
        self.inner.store.set_prefix(guild.into_nonzero(), prefix).await?;
        announce(&self.inner.chat, channel, &format!("Done! My prefix here is now \"{prefix}\".")).await;
        Ok(())
    }

    pub(crate) async fn set_channel(
        &self,
        guild: Id<GuildMarker>,
        channel: Id<ChannelMarker>,
        args: &[&str],
    ) -> Result<()> {
        let target = match args.first() {
            Some(arg) => parse_channel(arg).ok_or(Error::InvalidParams)?,
            None => channel.into_nonzero(),
        };
        self.inner.store.set_channel(guild.into_nonzero(), target).await?;
        announce(&self.inner.chat, channel, &format!("Got it, trivia now lives in <#{target}>.")).await;
        Ok(())
    }

    pub(crate) async fn start(
        &self,
        message: &Message,
        guild: Id<GuildMarker>,
        channel: Id<ChannelMarker>,
    ) -> Result<()> {
        if self.inner.games.is_active(guild) {
            return Err(Error::AlreadyActive);
        }
        let questions = self.inner.bank.load().await?;
        let (feed, inbox) = mpsc::unbounded_channel();
        // Claiming may still lose a race against another starter.
        let Some(ticket) = self.inner.games.claim(guild, channel, feed) else {
            return Err(Error::AlreadyActive);
        };
        log::info!("starting a game in guild {guild} for user {}", message.author.id);
        if let Err(err) = self.inner.store.set_playing(guild.into_nonzero(), true).await {
            log::warn!("could not persist the in-progress marker for guild {guild}: {err:?}");
        }
        announce(&self.inner.chat, channel, "Let's play some trivia! First question coming up.").await;
        tokio::spawn(session::run(Arc::clone(&self.inner), guild, channel, questions, inbox, ticket));
        Ok(())
    }

    pub(crate) async fn stop(
        &self,
        guild: Id<GuildMarker>,
        channel: Id<ChannelMarker>,
    ) -> Result<()> {
        if !self.inner.games.retire(guild) {
            return Err(Error::NoActiveGame);
        }
        log::info!("game in guild {guild} was called off");
        if let Err(err) = self.inner.store.set_playing(guild.into_nonzero(), false).await {
            log::warn!("could not clear the in-progress marker for guild {guild}: {err:?}");
        }
        announce(&self.inner.chat, channel, "Okay, the game is over. Start a new one whenever you're ready.")
            .await;
        Ok(())
    }

    pub(crate) async fn scores(&self, guild: Id<GuildMarker>) -> Result<()> {
        if self.inner.games.send(guild, Event::Standings) {
            Ok(())
        } else {
            Err(Error::NoActiveGame)
        }
    }
}

/// Accepts a raw channel id or the `<#id>` mention form.
fn parse_channel(arg: &str) -> Option<NonZeroU64> {
    let raw = arg.strip_prefix("<#").and_then(|rest| rest.strip_suffix('>')).unwrap_or(arg);
    raw.parse().ok()
}
