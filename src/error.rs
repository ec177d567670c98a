/// An error that can occur when building, loading or storing a tunneled index.
#[derive(Debug)]
pub enum Error {
    /// An index or side file could not be read or written.
    Io(std::io::Error),
    /// A serialized index could not be encoded or decoded.
    Serialization(bincode::Error),
    /// A `.din`/`.dout` side file does not hold exactly one bit more than the
    /// last column has symbols.
    DimensionMismatch {
        /// Number of symbols in the last column.
        symbols: usize,
        /// Number of bits provided by the side file.
        bits: usize,
    },
    /// The numbers of outgoing-edge blocks and incoming-edge blocks disagree,
    /// so the loaded data cannot describe a valid tunnel structure.
    BlockCountMismatch {
        /// Number of ones in `dout`.
        dout: usize,
        /// Number of ones in `din`.
        din: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o failure: {}", err),
            Error::Serialization(err) => write!(f, "serialization failure: {}", err),
            Error::DimensionMismatch { symbols, bits } => write!(
                f,
                "bitvector holds {} bits but the last column has {} symbols (expected {} bits)",
                bits,
                symbols,
                symbols + 1,
            ),
            Error::BlockCountMismatch { dout, din } => write!(
                f,
                "found {} outgoing-edge blocks but {} incoming-edge blocks",
                dout, din,
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err)
    }
}
