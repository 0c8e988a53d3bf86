//! One live game per guild.

use super::Event;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use twilight_model::id::{
    marker::{ChannelMarker, GuildMarker},
    Id,
};

/// A running game: the channel it plays in, the sender side of its inbox,
/// and the ticket its session was handed at claim time. Dropping the sender
/// is how the game learns it was retired.
struct Live {
    channel: Id<ChannelMarker>,
    feed: mpsc::UnboundedSender<Event>,
    ticket: u64,
}

#[derive(Default)]
pub(crate) struct Registry {
    games: DashMap<Id<GuildMarker>, Live>,
    tickets: AtomicU64,
}

impl Registry {
    pub fn is_active(&self, guild: Id<GuildMarker>) -> bool {
        self.games.contains_key(&guild)
    }

    /// Atomically installs a game for the guild and hands back the ticket
    /// that `conclude` later checks. Fails when a game is already running,
    /// leaving the existing game untouched.
    pub fn claim(
        &self,
        guild: Id<GuildMarker>,
        channel: Id<ChannelMarker>,
        feed: mpsc::UnboundedSender<Event>,
    ) -> Option<u64> {
        match self.games.entry(guild) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
                slot.insert(Live { channel, feed, ticket });
                Some(ticket)
            }
        }
    }

    /// Forwards an event to the guild's game, provided it originated in the
    /// channel the game is playing in.
    pub fn submit(&self, guild: Id<GuildMarker>, channel: Id<ChannelMarker>, event: Event) {
        if let Some(live) = self.games.get(&guild) {
            if live.channel == channel {
                let _ = live.feed.send(event);
            }
        }
    }

    /// Forwards an event regardless of which channel asked.
    pub fn send(&self, guild: Id<GuildMarker>, event: Event) -> bool {
        match self.games.get(&guild) {
            Some(live) => live.feed.send(event).is_ok(),
            None => false,
        }
    }

    /// Removes the guild's game, if any. Idempotent.
    pub fn retire(&self, guild: Id<GuildMarker>) -> bool {
        self.games.remove(&guild).is_some()
    }

    /// Removes the guild's game only while `ticket` matches the live claim.
    /// A finished session retires itself this way; a successor claimed in
    /// the meantime is left in place.
    pub fn conclude(&self, guild: Id<GuildMarker>, ticket: u64) -> bool {
        self.games.remove_if(&guild, |_, live| live.ticket == ticket).is_some()
    }
}
