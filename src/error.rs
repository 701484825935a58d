use thiserror::Error;

/// Error handling during edge matching configuration and template decoding.
#[derive(Error, Debug)]
pub enum RidgeMatchError {
    /// A tolerance parameter is outside its documented valid range.
    ///
    /// Raised when constructing a [`crate::MatcherConfig`]; out-of-range
    /// tolerances are rejected up front, never clamped.
    #[error("Invalid matcher configuration: {0}")]
    Configuration(String),

    /// The first four bytes of a template record are not the compact
    /// template magic.
    ///
    /// The associated array holds the bytes actually found.
    #[error("Not a compact fingerprint template, bad magic: {0:02x?}")]
    BadMagic([u8; 4]),

    /// The template version byte is outside the supported range.
    ///
    /// Version 1 and 2 records are accepted; anything else is rejected
    /// before any minutia data is read.
    #[error("Unsupported template version: {0}")]
    UnsupportedVersion(u8),

    /// A template record is structurally malformed.
    ///
    /// This covers truncated records, short reads and invalid field values
    /// discovered during decode. The associated string provides additional
    /// context about the error.
    #[error("Malformed template: {0}")]
    Format(String),

    /// A star handed to the matcher violates its sort precondition.
    ///
    /// Stars must be sorted ascending by edge length. The associated value
    /// is the index of the first out-of-order edge.
    #[error("Star edges not sorted ascending by length at index {0}")]
    UnsortedStar(usize),

    /// An I/O error occurred at the codec's stream boundary.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
