#[derive(Debug)]
pub enum Error {
    /// The caller handed us a value the schema rejects.
    BadInput,
    /// Unrecoverable error.
    Fatal,
}

pub type Result<T> = core::result::Result<T, Error>;
