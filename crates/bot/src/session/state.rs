//! State owned by a single running game.

use model::question::Question;
use twilight_model::id::{marker::UserMarker, Id};

struct Tally {
    user: Id<UserMarker>,
    count: u32,
    /// Value of `correct_total` when this participant last scored.
    reached: u32,
}

pub(crate) struct GameState {
    questions: Box<[Question]>,
    index: usize,
    accepting: bool,
    correct_total: u32,
    scores: Vec<Tally>,
}

impl GameState {
    pub fn new(questions: Box<[Question]>) -> Self {
        Self { questions, index: 0, accepting: false, correct_total: 0, scores: Vec::new() }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Moves to the next question, stopping at the end of the bank.
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.index += 1;
        }
    }

    pub fn open_window(&mut self) {
        self.accepting = true;
    }

    pub fn close_window(&mut self) {
        self.accepting = false;
    }

    pub fn accepting(&self) -> bool {
        self.accepting
    }

    /// Compares a guess against every accepted answer of the current
    /// question. Surrounding whitespace is ignored and matching is
    /// case-insensitive, but otherwise the text must match exactly.
    pub fn check_answer(&self, guess: &str) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let guess = guess.trim().to_lowercase();
        question.answers.iter().any(|answer| answer.trim().to_lowercase() == guess)
    }

    pub fn record_correct(&mut self, user: Id<UserMarker>) {
        self.correct_total += 1;
        match self.scores.iter_mut().find(|tally| tally.user == user) {
            Some(tally) => {
                tally.count += 1;
                tally.reached = self.correct_total;
            }
            None => self.scores.push(Tally { user, count: 1, reached: self.correct_total }),
        }
    }

    /// Standings ordered by points; on ties, whoever reached the count
    /// first places higher.
    pub fn ranked(&self) -> Vec<(Id<UserMarker>, u32)> {
        let mut order: Vec<_> = self.scores.iter().collect();
        order.sort_by(|a, b| b.count.cmp(&a.count).then(a.reached.cmp(&b.reached)));
        order.into_iter().map(|tally| (tally.user, tally.count)).collect()
    }
}
