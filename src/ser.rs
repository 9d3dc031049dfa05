//! tellstick.conf serialization.
//!
//! This module provides the [`Serializer`] that writes a [`Config`] back out
//! in the brace grammar:
//!
//! ```text
//! key = value
//! controller {
//!   key = value
//! }
//! device {
//!   key = value
//!   parameters {
//!     key = value
//!   }
//! }
//! ```
//!
//! Every line, closing braces included, ends with `\n`. Values are printed
//! with [`Value`]'s `Display`, so numeric-looking strings lose their quotes.
//! Commented-out lines are dropped unless
//! [`ConfOptions::with_comments`] asks for them.
//!
//! The format has no escapes. A key holding `=` or a string value holding
//! `#`, `"` or a line break is written as is and does not read back the same:
//! a `#` turns the whole line into a comment, quotes are stripped and a line
//! break splits the entry. Such entries are logged with `warn!`.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_tellstick::{conf_map, Config, ConfOptions, Serializer};
//!
//! let mut config = Config::new();
//! config.controller = conf_map! { "id" => 1 };
//!
//! let mut serializer = Serializer::new(ConfOptions::new().with_indent(4));
//! serializer.serialize_config(&config);
//! assert_eq!(serializer.into_inner(), "controller {\n    id = 1\n}\n");
//! ```

use crate::{ConfMap, ConfOptions, Config, Device, Value};
use tracing::warn;

/// Returns `true` if a `key = value` line holding this key reads back as the same key.
fn key_reads_back(key: &str) -> bool {
    !key.contains(|c: char| matches!(c, '=' | '#' | '\n' | '\r'))
}

/// Returns `true` if this value reads back unchanged.
fn value_reads_back(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => !s.contains(|c: char| matches!(c, '#' | '"' | '\n' | '\r')),
    }
}

/// The tellstick.conf serializer.
pub struct Serializer {
    output: String,
    options: ConfOptions,
}

impl Serializer {
    pub fn new(options: ConfOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the text of `config`.
    pub fn serialize_config(&mut self, config: &Config) {
        self.write_entries(0, &config.root);

        self.write_line(0, "controller {");
        self.write_entries(1, &config.controller);
        self.write_line(0, "}");

        for device in &config.devices {
            self.serialize_device(device);
        }

        if self.options.comments {
            for comment in &config.commented_devices {
                self.output.push_str(comment.trim_end_matches('\r'));
                self.output.push('\n');
            }
        }
    }

    fn serialize_device(&mut self, device: &Device) {
        self.write_line(0, "device {");
        self.write_entries(1, &device.fields);
        self.write_line(1, "parameters {");
        self.write_entries(2, &device.parameters);
        self.write_line(1, "}");
        self.write_line(0, "}");
    }

    fn write_entries(&mut self, level: usize, map: &ConfMap) {
        for (key, value) in map {
            self.write_entry(level, key, value);
        }
    }

    fn write_entry(&mut self, level: usize, key: &str, value: &Value) {
        if !key_reads_back(key) || !value_reads_back(value) {
            warn!(key, value = %value, "entry cannot be read back as written");
        }
        self.write_indent(level);
        self.output.push_str(key);
        self.output.push_str(" = ");
        self.output.push_str(&value.to_string());
        self.output.push('\n');
    }

    fn write_line(&mut self, level: usize, text: &str) {
        self.write_indent(level);
        self.output.push_str(text);
        self.output.push('\n');
    }

    #[inline]
    fn write_indent(&mut self, level: usize) {
        for _ in 0..level * self.options.indent {
            self.output.push(' ');
        }
    }
}
