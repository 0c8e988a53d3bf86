//! Per-guild game sessions.

pub(crate) mod registry;
mod state;

use crate::{
    chat::{announce, Messenger},
    router::Inner,
    store::ConfigStore,
};
use model::question::Question;
use state::GameState;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{self, error::TryRecvError},
    time,
};
use twilight_model::id::{
    marker::{ChannelMarker, GuildMarker, UserMarker},
    Id,
};

/// Pauses between announcements: `short` between a question's outcome and
/// the next prompt, `long` for the answer window itself.
#[derive(Clone, Copy)]
pub struct Pacing {
    short: Duration,
    long: Duration,
}

impl Pacing {
    pub fn from_secs(short: u64, long: u64) -> Self {
        Self { short: Duration::from_secs(short), long: Duration::from_secs(long) }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_secs(5, 10)
    }
}

/// What the router may feed into a running game.
pub(crate) enum Event {
    /// Candidate answer typed in the game's channel.
    Guess { user: Id<UserMarker>, text: Box<str> },
    /// Request to announce the standings so far.
    Standings,
}

/// Drives one guild's game from the first question to the final standings.
/// The state never leaves this task; the rest of the service reaches the
/// game only through its inbox.
pub(crate) async fn run<S, C>(
    inner: Arc<Inner<S, C>>,
    guild: Id<GuildMarker>,
    channel: Id<ChannelMarker>,
    questions: Box<[Question]>,
    mut inbox: mpsc::UnboundedReceiver<Event>,
    ticket: u64,
) where
    S: Messenger,
    C: ConfigStore,
{
    let mut game = GameState::new(questions);
    loop {
        time::sleep(inner.pacing.short).await;

        // Catch up on requests that queued while we slept. A disconnected
        // inbox means the game was retired: exit without another word.
        loop {
            match inbox.try_recv() {
                Ok(Event::Standings) => announce(&inner.chat, channel, &standings_text(&game)).await,
                Ok(Event::Guess { .. }) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        let Some((prompt, reveal)) = game
            .current_question()
            .map(|question| (question.prompt.clone(), String::from(question.canonical())))
        else {
            break;
        };

        game.open_window();
        announce(&inner.chat, channel, &prompt).await;

        let mut window = core::pin::pin!(time::sleep(inner.pacing.long));
        let winner = loop {
            tokio::select! {
                biased;
                event = inbox.recv() => match event {
                    Some(Event::Guess { user, text }) => {
                        // The first correct answer closes the window; the
                        // rest of the queue is ignored.
                        if game.accepting() && game.check_answer(&text) {
                            game.close_window();
                            game.record_correct(user);
                            break Some(user);
                        }
                    }
                    Some(Event::Standings) => announce(&inner.chat, channel, &standings_text(&game)).await,
                    None => return,
                },
                _ = &mut window => break None,
            }
        };

        match winner {
            Some(user) => {
                announce(&inner.chat, channel, &format!("Correct, <@{user}>! The answer was \"{reveal}\".")).await;
            }
            None => {
                game.close_window();
                announce(&inner.chat, channel, &format!("Time's up! The answer was \"{reveal}\".")).await;
            }
        }
        game.advance();
    }

    log::info!("game in guild {guild} ran out of questions");
    announce(&inner.chat, channel, &final_text(&game)).await;
    // The guild may have been handed to a new game while that announcement
    // was in flight; clean up only a claim that is still ours.
    if inner.games.conclude(guild, ticket) {
        if let Err(err) = inner.store.set_playing(guild.into_nonzero(), false).await {
            log::warn!("could not clear the in-progress marker for guild {guild}: {err:?}");
        }
    }
}

fn standings_text(game: &GameState) -> String {
    let ranked = game.ranked();
    if ranked.is_empty() {
        return String::from("Nobody has scored yet.");
    }
    let mut lines = Vec::with_capacity(ranked.len());
    for ((user, count), place) in ranked.into_iter().zip(1..) {
        let noun = if count == 1 { "point" } else { "points" };
        lines.push(format!("{place}. <@{user}> with {count} {noun}"));
    }
    lines.join("\n")
}

fn final_text(game: &GameState) -> String {
    format!("That's the last question, the game is over!\n{}", standings_text(game))
}

#[cfg(test)]
mod tests {
    use super::{final_text, standings_text, state::GameState, Id};
    use model::question::Question;

    #[test]
    fn standings_cover_the_empty_and_plural_cases() {
        let questions =
            vec![Question { prompt: String::from("?"), answers: vec![String::from("!")] }].into_boxed_slice();
        let mut game = GameState::new(questions);
        assert_eq!(standings_text(&game), "Nobody has scored yet.");
        game.record_correct(Id::new(7));
        assert_eq!(standings_text(&game), "1. <@7> with 1 point");
        game.record_correct(Id::new(7));
        game.record_correct(Id::new(9));
        assert_eq!(standings_text(&game), "1. <@7> with 2 points\n2. <@9> with 1 point");
        assert!(final_text(&game).starts_with("That's the last question"));
    }
}
