//! Error types for `UAssetHeader`

use thiserror::Error;

/// The error type for package header decoding.
///
/// Every variant records the absolute byte offset at which the problem was
/// detected. Decoding never recovers: the first error aborts the whole parse.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// Short read, truncated stream, or failure opening the source.
    #[error("IO error at offset {offset}: {source}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Offset of the read that failed.
        offset: u64,
    },

    // ==================== Header Errors ====================
    /// The package tag is wrong, or the header points outside the file.
    #[error("malformed package header at offset {offset}: {reason}")]
    MalformedHeader {
        /// What is wrong with the header.
        reason: String,
        /// Offset of the offending field.
        offset: u64,
    },

    /// The package tag is byte-swapped (big-endian package).
    #[error("byte-swapped package at offset {offset}: big-endian packages are not supported")]
    UnsupportedEndianness {
        /// Offset of the package tag.
        offset: u64,
    },

    /// The legacy file version predates UE4.
    #[error("unsupported legacy file version {version} at offset {offset} (UE3 packages cannot be loaded)")]
    UnsupportedVersion {
        /// The legacy file version found in the file.
        version: i32,
        /// Offset of the legacy file version field.
        offset: u64,
    },

    /// The custom version container uses an unknown on-disk layout.
    #[error("no custom version container format for legacy file version {legacy_version} at offset {offset}")]
    UnsupportedFormat {
        /// The legacy file version that selected no layout.
        legacy_version: i32,
        /// Offset of the custom version container.
        offset: u64,
    },

    /// The package uses a feature this decoder rejects.
    #[error("unsupported feature at offset {offset}: {feature}")]
    UnsupportedFeature {
        /// Description of the feature.
        feature: String,
        /// Offset where the feature was detected.
        offset: u64,
    },

    // ==================== Primitive Errors ====================
    /// A string is wide-character (negative length) or not valid UTF-8.
    #[error("unsupported string encoding at offset {offset} (length {length})")]
    UnsupportedEncoding {
        /// The serialized string length.
        length: i32,
        /// Offset of the length prefix.
        offset: u64,
    },

    /// A boolean was stored as something other than 0 or 1.
    #[error("invalid boolean value {value} at offset {offset}")]
    InvalidBoolean {
        /// The raw 32-bit value.
        value: i32,
        /// Offset of the boolean.
        offset: u64,
    },

    /// A name reference points outside the name table.
    #[error("name index {index} out of range (name table has {len} entries) at offset {offset}")]
    OutOfRange {
        /// The name table index that was read.
        index: i32,
        /// Length of the name table.
        len: usize,
        /// Offset of the name reference.
        offset: u64,
    },

    /// A sequence or table count is negative or exceeds the configured limit.
    #[error("invalid element count {count} at offset {offset}")]
    InvalidLength {
        /// The count that was rejected.
        count: i64,
        /// Offset of the count field.
        offset: u64,
    },
}

impl Error {
    /// Byte offset at which the error was detected.
    #[must_use]
    pub fn offset(&self) -> u64 {
        match self {
            Error::Io { offset, .. }
            | Error::MalformedHeader { offset, .. }
            | Error::UnsupportedEndianness { offset }
            | Error::UnsupportedVersion { offset, .. }
            | Error::UnsupportedFormat { offset, .. }
            | Error::UnsupportedFeature { offset, .. }
            | Error::UnsupportedEncoding { offset, .. }
            | Error::InvalidBoolean { offset, .. }
            | Error::OutOfRange { offset, .. }
            | Error::InvalidLength { offset, .. } => *offset,
        }
    }
}

/// A specialized Result type for package header decoding.
pub type Result<T> = std::result::Result<T, Error>;
