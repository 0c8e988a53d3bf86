//! Core of the trivia game service: routing of relayed message events,
//! per-guild game sessions, and the signature-checked endpoint feeding us.

mod bank;
mod chat;
mod commands;
mod error;
pub mod relay;
mod router;
mod session;
mod store;

pub use bank::QuestionBank;
pub use chat::{Discord, Messenger, SendError};
pub use ed25519_dalek::VerifyingKey;
pub use router::Bot;
pub use session::Pacing;
pub use store::ConfigStore;

pub use db;
pub use model;
