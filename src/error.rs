//! Error types for tellstick.conf parsing and serialization.
//!
//! Parsing text is lenient by default, so most variants only show up at the
//! file boundary or when strict block checking is turned on through
//! [`ConfOptions::strict`](crate::ConfOptions::strict).
//!
//! ## Error Categories
//!
//! - **I/O Errors**: the config file could not be read or written
//! - **Structure Errors**: no `controller {` block, or (strict mode only)
//!   unbalanced braces, nesting past `device { parameters { } }`, device
//!   fields listed after the parameters block, and settings left outside
//!   every block once the first block has opened
//!
//! ## Examples
//!
//! ```rust
//! use serde_tellstick::{from_str, Error};
//!
//! let result = from_str("device {\n  id = 1\n}\n");
//! assert!(matches!(result, Err(Error::MissingController)));
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing a config.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The input file could not be read
    #[error("failed to read {}: {msg}", path.display())]
    Read { path: PathBuf, msg: String },

    /// The output file could not be written
    #[error("failed to write {}: {msg}", path.display())]
    Write { path: PathBuf, msg: String },

    /// IO error on a reader or writer that is not backed by a path
    #[error("IO error: {0}")]
    Io(String),

    /// Input bytes are not valid UTF-8
    #[error("invalid UTF-8 in config: {0}")]
    Utf8(String),

    /// No line opens a controller block
    #[error("missing controller block: no line contains both `controller` and `{{`")]
    MissingController,

    /// A closing brace without an open block, or a block never closed
    #[error("unbalanced braces at line {line}")]
    UnbalancedBraces { line: usize },

    /// A block opened deeper than `device { parameters { } }`
    #[error("block nested {depth} levels deep at line {line}, at most 2 are allowed")]
    NestingTooDeep { line: usize, depth: usize },

    /// A device field that follows the device's closed parameters block
    #[error("device field `{key}` at line {line} follows the parameters block\nHelp: move it above `parameters {{`")]
    FieldAfterParameters { line: usize, key: String },

    /// A `key = value` line outside every block, after the first block opened
    #[error("setting `{key}` at line {line} is outside any block\nHelp: move top-level settings above the first block")]
    FieldOutsideBlock { line: usize, key: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a read error for `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::Error;
    /// use std::io;
    ///
    /// let err = Error::read("/etc/tellstick.conf", &io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.to_string().starts_with("failed to read /etc/tellstick.conf"));
    /// ```
    pub fn read<P: AsRef<Path>>(path: P, err: &io::Error) -> Self {
        Error::Read {
            path: path.as_ref().to_path_buf(),
            msg: err.to_string(),
        }
    }

    /// Creates a write error for `path`.
    pub fn write<P: AsRef<Path>>(path: P, err: &io::Error) -> Self {
        Error::Write {
            path: path.as_ref().to_path_buf(),
            msg: err.to_string(),
        }
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an error for a device field found after its parameters block.
    pub fn field_after_parameters(line: usize, key: &str) -> Self {
        Error::FieldAfterParameters {
            line,
            key: key.to_string(),
        }
    }

    /// Creates an error for a setting found between or after blocks.
    pub fn field_outside_block(line: usize, key: &str) -> Self {
        Error::FieldOutsideBlock {
            line,
            key: key.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the 1-based source line the error points at, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnbalancedBraces { line }
            | Error::NestingTooDeep { line, .. }
            | Error::FieldAfterParameters { line, .. }
            | Error::FieldOutsideBlock { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = Error::read(
            "/nope/tellstick.conf",
            &io::Error::from(io::ErrorKind::NotFound),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nope/tellstick.conf"));
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_line_accessor() {
        assert_eq!(Error::UnbalancedBraces { line: 7 }.line(), Some(7));
        assert_eq!(Error::field_after_parameters(12, "name").line(), Some(12));
        assert_eq!(Error::field_outside_block(4, "stray").line(), Some(4));
        assert_eq!(Error::MissingController.line(), None);
    }

    #[test]
    fn test_field_after_parameters_message() {
        let err = Error::field_after_parameters(9, "protocol");
        let msg = err.to_string();
        assert!(msg.contains("`protocol`"));
        assert!(msg.contains("line 9"));
        assert!(msg.contains("Help:"));
    }
}
