//! Options for parsing and writing tellstick.conf files.
//!
//! [`ConfOptions`] is shared by both directions: `strict` only affects the
//! parser, `indent` and `comments` only affect the serializer.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tellstick::{from_str_with_options, ConfOptions};
//!
//! let text = "controller {\n  id = 1\n}\n}\n";
//! assert!(from_str_with_options(text, ConfOptions::strict()).is_err());
//! assert!(from_str_with_options(text, ConfOptions::new()).is_ok());
//! ```

/// Configuration options for tellstick.conf parsing and serialization.
///
/// # Examples
///
/// ```rust
/// use serde_tellstick::ConfOptions;
///
/// let options = ConfOptions::new()
///     .with_indent(4)
///     .with_comments(true);
/// assert_eq!(options.indent, 4);
/// assert!(options.comments);
/// assert!(!options.strict);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfOptions {
    /// Spaces per nesting level in written output.
    pub indent: usize,
    /// Append commented-out lines after the last device when writing.
    pub comments: bool,
    /// Validate braces and parameters placement when parsing.
    pub strict: bool,
}

impl Default for ConfOptions {
    fn default() -> Self {
        ConfOptions {
            indent: 2,
            comments: false,
            strict: false,
        }
    }
}

impl ConfOptions {
    /// Creates default options (lenient parsing, 2-space indent, comments dropped on write).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::ConfOptions;
    ///
    /// let options = ConfOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.strict);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with strict block validation turned on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::ConfOptions;
    ///
    /// assert!(ConfOptions::strict().strict);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        ConfOptions {
            strict: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets whether commented-out lines are written back after the devices.
    #[must_use]
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Sets whether the parser validates block structure.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
