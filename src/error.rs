/// An error that can occur when building or querying a search index.
#[derive(Debug)]
pub enum Error {
    /// A zero-length text or pattern was given where a non-empty one is required.
    Length,
    /// An index, row, or iterator position fell outside the valid range.
    OutOfRange,
    /// A superblock rank (or some other counter) would have exceeded its
    /// storage width during construction.
    Overflow,
    /// A deserialised byte stream failed one of its structural sanity checks.
    Format,
    /// An I/O failure while reading or writing a serialised byte stream.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Length => write!(f, "expected a non-empty text or pattern"),
            Error::OutOfRange => write!(f, "index out of range"),
            Error::Overflow => write!(f, "counter overflowed its storage width"),
            Error::Format => write!(f, "malformed serialised data"),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// The result type returned by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;
