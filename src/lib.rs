//! # serde_tellstick
//!
//! A parser and serializer for `tellstick.conf`, the configuration file of
//! Telldus TellStick controllers and the radio devices they drive.
//!
//! ## The Format
//!
//! ```text
//! user = "nobody"
//! group = "plugdev"
//! controller {
//!   id = 1
//!   type = 2
//! }
//! device {
//!   id = 1
//!   name = "Lamp"
//!   protocol = "arctech"
//!   parameters {
//!     house = 12
//!     unit = 1
//!   }
//! }
//! # device {
//! #   id = 2
//! # }
//! ```
//!
//! Settings before the controller block land in [`Config::root`], the
//! controller block in [`Config::controller`], each device block in
//! [`Config::devices`] and every line holding a `#` in
//! [`Config::commented_devices`].
//!
//! Values are numbers or strings. Quotes are removed on read and anything
//! numeric becomes a number, so `startupfiles = "1"` reads as `1` and is
//! written back as `startupfiles = 1`.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_tellstick::{from_str, to_string, Value};
//!
//! let text = "\
//! controller {
//!   id = 1
//! }
//! device {
//!   id = 1
//!   name = \"Lamp\"
//!   parameters {
//!     house = 12
//!   }
//! }
//! ";
//!
//! let config = from_str(text).unwrap();
//! assert_eq!(config.devices[0].name(), Some("Lamp"));
//! assert_eq!(config.devices[0].parameters.get("house"), Some(&Value::Number(12.0)));
//!
//! assert_eq!(to_string(&config), text);
//! ```
//!
//! ## Files
//!
//! [`from_path`] and [`to_path`] wrap the text functions with a single
//! read or write and report failures as [`Error::Read`] / [`Error::Write`].
//!
//! ```rust,no_run
//! use serde_tellstick::{from_path, to_path};
//!
//! let mut config = from_path("/etc/tellstick.conf").unwrap();
//! config.root.insert("deviceNode", "/dev/tellstick".into());
//! to_path(&config, "/etc/tellstick.conf").unwrap();
//! ```
//!
//! ## Strictness
//!
//! The default parser never rejects a file for its layout except when the
//! controller block is missing. [`ConfOptions::strict`] adds brace and
//! nesting checks; see [`de`] for the details.

pub mod config;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use config::{Config, Device};
pub use de::Parser;
pub use error::{Error, Result};
pub use map::ConfMap;
pub use options::ConfOptions;
pub use ser::Serializer;
pub use value::Value;

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Parses tellstick.conf text into a [`Config`].
///
/// # Examples
///
/// ```rust
/// use serde_tellstick::from_str;
///
/// let config = from_str("controller {\n  id = 1\n}\n# device {\n").unwrap();
/// assert_eq!(config.commented_devices, vec!["# device {"]);
/// ```
///
/// # Errors
///
/// Returns [`Error::MissingController`] if no line opens a controller block.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Config> {
    from_str_with_options(s, ConfOptions::default())
}

/// Parses tellstick.conf text with custom options.
///
/// # Errors
///
/// Returns [`Error::MissingController`], and in strict mode the block
/// structure errors described in [`de`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ConfOptions) -> Result<Config> {
    Parser::new(s, options).parse()
}

/// Parses tellstick.conf from bytes.
///
/// # Errors
///
/// Returns [`Error::Utf8`] if the bytes are not valid UTF-8, or any error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Config> {
    let s = std::str::from_utf8(v).map_err(|e| Error::Utf8(e.to_string()))?;
    from_str(s)
}

/// Parses tellstick.conf from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_tellstick::from_reader;
/// use std::io::Cursor;
///
/// let config = from_reader(Cursor::new(b"controller {\n  id = 1\n}\n")).unwrap();
/// assert_eq!(config.controller.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or any error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Config>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Reads and parses the config file at `path`.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read, or any error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::read(path, &e))?;
    debug!(path = %path.display(), bytes = text.len(), "read tellstick config");
    from_str(&text)
}

/// Serializes a [`Config`] to tellstick.conf text.
///
/// Commented-out lines are not written; use [`to_string_with_options`] with
/// [`ConfOptions::with_comments`] to keep them.
///
/// The format has no escapes, so a string value holding `#`, `"` or a line
/// break does not survive a round trip. `"Lamp #2"` is written as is, and
/// reading it back files the whole line under
/// [`Config::commented_devices`]. The serializer logs such entries with a
/// `warn!` event.
#[must_use]
pub fn to_string(config: &Config) -> String {
    to_string_with_options(config, ConfOptions::default())
}

/// Serializes a [`Config`] to tellstick.conf text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tellstick::{from_str, to_string_with_options, ConfOptions};
///
/// let config = from_str("#user = \"old\"\ncontroller {\n}\n").unwrap();
/// let text = to_string_with_options(&config, ConfOptions::new().with_comments(true));
/// assert_eq!(text, "controller {\n}\n#user = \"old\"\n");
/// ```
#[must_use]
pub fn to_string_with_options(config: &Config, options: ConfOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.serialize_config(config);
    serializer.into_inner()
}

/// Serializes a [`Config`] to a writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, config: &Config) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, config, ConfOptions::default())
}

/// Serializes a [`Config`] to a writer with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tellstick::{from_str, to_writer_with_options, ConfOptions};
///
/// let config = from_str("controller {\n}\n#device {\n").unwrap();
/// let mut buffer = Vec::new();
/// to_writer_with_options(&mut buffer, &config, ConfOptions::new().with_comments(true)).unwrap();
/// assert_eq!(buffer, b"controller {\n}\n#device {\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, config: &Config, options: ConfOptions) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string_with_options(config, options).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Serializes a [`Config`] and writes it to `path`, replacing the file.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    to_path_with_options(config, path, ConfOptions::default())
}

/// Serializes a [`Config`] with custom options and writes it to `path`.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_path_with_options<P: AsRef<Path>>(
    config: &Config,
    path: P,
    options: ConfOptions,
) -> Result<()> {
    let path = path.as_ref();
    let text = to_string_with_options(config, options);
    fs::write(path, &text).map_err(|e| Error::write(path, &e))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote tellstick config");
    Ok(())
}
