use thiserror::Error;

/// The result type of fallible cursor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised by a cursor operation.
///
/// Looking up or erasing a missing key is not an error; those operations report absence through
/// `Option` or the end cursor instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// The cursor was moved or dereferenced past either end of the map.
    #[error("cursor out of range")]
    OutOfRange,
    /// The cursor refers to an entry that is no longer in the map.
    #[error("cursor does not refer to a live entry")]
    InvalidCursor,
}
