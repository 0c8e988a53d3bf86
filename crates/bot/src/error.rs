use core::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    DirectMessage,
    AlreadyActive,
    NoActiveGame,
    NoQuestions,
    ChannelRestricted,
    NoCommand,
    UnknownCommand,
    InvalidParams,
    Store,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DirectMessage => {
                "Sorry, I don't host private trivia sessions. Find me in a server if you want to play."
            }
            Self::AlreadyActive => "A game is already running in this server. Jump in!",
            Self::NoActiveGame => "There's no trivia game running right now. Use the \"start\" command to begin one.",
            Self::NoQuestions => "I couldn't find any questions to ask. Please try again later.",
            Self::ChannelRestricted => "I can't run that here. Please use the server's trivia channel.",
            Self::NoCommand => "You didn't give me a command. Try \"help\" to see what I can do.",
            Self::UnknownCommand => "I don't know that command. Try \"help\" to see what I can do.",
            Self::InvalidParams => "I couldn't make sense of those arguments.",
            Self::Store => "Oops! We hit an unexpected error on our end. Please try again later.",
        })
    }
}

impl From<db::error::Error> for Error {
    fn from(err: db::error::Error) -> Self {
        match err {
            db::error::Error::BadInput => Self::InvalidParams,
            db::error::Error::Fatal => Self::Store,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
