//! tellstick.conf parsing.
//!
//! This module provides the [`Parser`] that turns the text of a config file
//! into a [`Config`].
//!
//! ## Overview
//!
//! Parsing is line based and lenient. Blocks are found from their opening
//! lines alone, braces are never matched:
//!
//! - every line containing `#` is set aside verbatim and takes no further part
//! - the first line containing `controller` and `{` starts the controller block
//! - every line containing `device` and `{` starts a device block, which runs
//!   until the next one or the end of input
//! - a line inside a device naming `parameters` starts the parameters block,
//!   which takes every remaining `key = value` line of that device
//! - `key = value` lines before the controller are top-level settings
//!
//! A missing controller block is the one structural problem that is always
//! reported. With [`ConfOptions::strict`] the parser also checks that:
//!
//! - braces balance and nest no deeper than `device { parameters { } }`
//! - no device field follows its parameters block, including a block written
//!   on one line as `parameters {}`
//! - no `key = value` line sits outside every block once the first block has
//!   opened
//!
//! Braces on `key = value` lines belong to the value and are never counted.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tellstick::from_str;
//!
//! let config = from_str("user = \"nobody\"\ncontroller {\n  id = 1\n}\n").unwrap();
//! assert_eq!(config.root.get("user").and_then(|v| v.as_str()), Some("nobody"));
//! assert!(config.devices.is_empty());
//! ```

use crate::{ConfMap, ConfOptions, Config, Device, Error, Result, Value};
use tracing::{debug, warn};

/// Deepest brace nesting the format allows: `device { parameters { } }`.
const MAX_DEPTH: usize = 2;

/// A source line that takes part in structural parsing.
#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    /// 1-based line number in the input.
    number: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    /// Splits `key = value` on the first `=`, trimming both sides.
    fn pair(&self) -> Option<(&'a str, &'a str)> {
        self.text
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    }

    /// Counts the `{` and `}` characters on the line.
    fn braces(&self) -> (usize, usize) {
        self.text.chars().fold((0, 0), |(opens, closes), ch| match ch {
            '{' => (opens + 1, closes),
            '}' => (opens, closes + 1),
            _ => (opens, closes),
        })
    }

    /// Returns `true` if the line opens a block named by `token`.
    fn opens(&self, token: &str) -> bool {
        self.text.contains(token) && self.text.contains('{')
    }
}

/// Inserts every `key = value` line of `lines` into a new map, in order.
fn collect_pairs(lines: &[Line<'_>]) -> ConfMap {
    lines
        .iter()
        .filter_map(Line::pair)
        .map(|(key, value)| (key.to_string(), Value::coerce(value)))
        .collect()
}

/// The tellstick.conf parser.
///
/// Created via [`Parser::new`] or [`Parser::from_str`], consumed by
/// [`Parser::parse`].
pub struct Parser<'a> {
    lines: Vec<Line<'a>>,
    comments: Vec<&'a str>,
    options: ConfOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: ConfOptions) -> Self {
        let mut lines = Vec::new();
        let mut comments = Vec::new();

        for (i, text) in input.split('\n').enumerate() {
            if text.contains('#') {
                comments.push(text);
            } else {
                lines.push(Line { number: i + 1, text });
            }
        }

        Parser {
            lines,
            comments,
            options,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Self::new(input, ConfOptions::default())
    }

    /// Parses the input into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingController`] if no controller block exists, and
    /// in strict mode [`Error::UnbalancedBraces`], [`Error::NestingTooDeep`] or
    /// [`Error::FieldAfterParameters`] for malformed blocks.
    pub fn parse(self) -> Result<Config> {
        if self.options.strict {
            self.check_braces()?;
        }

        let controller = self
            .find_controller_index()
            .ok_or(Error::MissingController)?;
        let device_indexes = self.find_device_indexes();

        let first_device = device_indexes
            .first()
            .copied()
            .unwrap_or(self.lines.len());
        if first_device < controller {
            warn!(
                line = self.lines[first_device].number,
                "device block before the controller block, its fields are read as top-level settings"
            );
        }

        let config = Config {
            root: collect_pairs(&self.lines[..controller]),
            controller: collect_pairs(&self.lines[controller..first_device.max(controller)]),
            devices: self.parse_devices(&device_indexes)?,
            commented_devices: self.comments.iter().map(|s| s.to_string()).collect(),
        };

        debug!(
            devices = config.devices.len(),
            commented = config.commented_devices.len(),
            "parsed tellstick config"
        );
        Ok(config)
    }

    fn find_controller_index(&self) -> Option<usize> {
        self.lines.iter().position(|line| line.opens("controller"))
    }

    fn find_device_indexes(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.opens("device"))
            .map(|(i, _)| i)
            .collect()
    }

    fn parse_devices(&self, indexes: &[usize]) -> Result<Vec<Device>> {
        indexes
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = indexes.get(i + 1).copied().unwrap_or(self.lines.len());
                self.parse_device(&self.lines[start..end])
            })
            .collect()
    }

    /// Parses one device block, from its `device {` line up to the next device.
    fn parse_device(&self, lines: &[Line<'a>]) -> Result<Device> {
        let mut device = Device::new();

        for (j, line) in lines.iter().enumerate() {
            if let Some((key, value)) = line.pair() {
                device.fields.insert(key, Value::coerce(value));
            } else if line.text.contains("parameters") {
                device.parameters = self.parse_parameters(line, &lines[j + 1..])?;
                break;
            }
        }

        Ok(device)
    }

    /// Collects every `key = value` line left in the device as a parameter.
    ///
    /// `marker` is the line naming `parameters`; the block is closed once the
    /// braces counted from it return to zero.
    fn parse_parameters(&self, marker: &Line<'a>, lines: &[Line<'a>]) -> Result<ConfMap> {
        let mut parameters = ConfMap::new();
        let (opens, closes) = marker.braces();
        let mut depth = opens as isize - closes as isize;
        let mut opened = opens > 0;
        let mut closed = opened && depth <= 0;

        for line in lines {
            match line.pair() {
                Some((key, value)) => {
                    if closed {
                        if self.options.strict {
                            return Err(Error::field_after_parameters(line.number, key));
                        }
                        warn!(
                            line = line.number,
                            key, "device field after the parameters block is read as a parameter"
                        );
                    }
                    parameters.insert(key, Value::coerce(value));
                }
                None => {
                    let (opens, closes) = line.braces();
                    depth += opens as isize - closes as isize;
                    opened |= opens > 0;
                    closed |= opened && depth <= 0;
                }
            }
        }

        Ok(parameters)
    }

    /// Checks that braces on block lines balance and nest at most [`MAX_DEPTH`] deep,
    /// and that no setting sits outside every block after the first one opens.
    ///
    /// Lines holding `=` are values and never count as braces.
    fn check_braces(&self) -> Result<()> {
        let mut open: Vec<usize> = Vec::new();
        let mut seen_block = false;

        for line in &self.lines {
            if let Some((key, _)) = line.pair() {
                if seen_block && open.is_empty() {
                    return Err(Error::field_outside_block(line.number, key));
                }
                continue;
            }
            for ch in line.text.chars() {
                match ch {
                    '{' => {
                        seen_block = true;
                        open.push(line.number);
                        if open.len() > MAX_DEPTH {
                            return Err(Error::NestingTooDeep {
                                line: line.number,
                                depth: open.len(),
                            });
                        }
                    }
                    '}' => {
                        if open.pop().is_none() {
                            return Err(Error::UnbalancedBraces { line: line.number });
                        }
                    }
                    _ => {}
                }
            }
        }

        match open.last() {
            Some(&line) => Err(Error::UnbalancedBraces { line }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Line<'_> {
        Line { number: 1, text }
    }

    #[test]
    fn test_pair_splits_on_first_equals() {
        assert_eq!(line("  a = b = c ").pair(), Some(("a", "b = c")));
        assert_eq!(line("key=value").pair(), Some(("key", "value")));
        assert_eq!(line("controller {").pair(), None);
    }

    #[test]
    fn test_comment_lines_are_set_aside_with_numbers_kept() {
        let parser = Parser::from_str("a = 1\n# b = 2\nc = 3 # trailing\nd = 4");
        assert_eq!(parser.comments, vec!["# b = 2", "c = 3 # trailing"]);
        let numbers: Vec<_> = parser.lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[test]
    fn test_find_indexes() {
        let parser = Parser::from_str("x = 1\ncontroller {\n}\ndevice {\n}\ndevice{\n}\n");
        assert_eq!(parser.find_controller_index(), Some(1));
        assert_eq!(parser.find_device_indexes(), vec![3, 5]);
    }

    #[test]
    fn test_missing_controller() {
        let err = Parser::from_str("a = 1\ndevice {\n}\n").parse().unwrap_err();
        assert!(matches!(err, Error::MissingController));
    }

    #[test]
    fn test_controller_runs_to_end_without_devices() {
        let config = Parser::from_str("controller {\n  id = 1\n}\ntrailing = 2\n")
            .parse()
            .unwrap();
        assert_eq!(config.controller.len(), 2);
        assert_eq!(config.controller.get("trailing"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_device_before_controller_does_not_panic() {
        let config = Parser::from_str("device {\n  id = 1\n}\ncontroller {\n  id = 2\n}\n")
            .parse()
            .unwrap();
        assert_eq!(config.root.get("id"), Some(&Value::Number(1.0)));
        assert!(config.controller.is_empty());
        assert_eq!(config.devices.len(), 1);
    }

    #[test]
    fn test_parameters_take_rest_of_device() {
        let text = "controller {\n}\ndevice {\n  id = 1\n  parameters {\n    house = 1\n  }\n  name = \"late\"\n}\n";
        let config = Parser::from_str(text).parse().unwrap();
        let device = &config.devices[0];
        assert_eq!(device.fields.len(), 1);
        assert_eq!(
            device.parameters.get("name"),
            Some(&Value::String("late".into()))
        );
    }

    #[test]
    fn test_strict_rejects_field_after_parameters() {
        let text = "controller {\n}\ndevice {\n  id = 1\n  parameters {\n    house = 1\n  }\n  name = \"late\"\n}\n";
        let err = Parser::new(text, ConfOptions::strict()).parse().unwrap_err();
        match err {
            Error::FieldAfterParameters { line, key } => {
                assert_eq!(line, 8);
                assert_eq!(key, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_field_after_one_line_parameters() {
        let text = "controller {\n}\ndevice {\n  parameters {}\n  name = \"late\"\n}\n";

        let lenient = Parser::from_str(text).parse().unwrap();
        assert_eq!(
            lenient.devices[0].parameters.get("name"),
            Some(&Value::String("late".into()))
        );

        let err = Parser::new(text, ConfOptions::strict()).parse().unwrap_err();
        match err {
            Error::FieldAfterParameters { line, key } => {
                assert_eq!(line, 5);
                assert_eq!(key, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_accepts_parameters_brace_on_next_line() {
        let text = "controller {\n}\ndevice {\n  parameters\n  {\n    house = 1\n  }\n}\n";
        let config = Parser::new(text, ConfOptions::strict()).parse().unwrap();
        assert_eq!(config.devices[0].parameters.get("house"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_strict_rejects_setting_outside_blocks() {
        let text = "controller {\n  id = 1\n}\nstray = 2\n";

        let lenient = Parser::from_str(text).parse().unwrap();
        assert_eq!(lenient.controller.get("stray"), Some(&Value::Number(2.0)));

        let err = Parser::new(text, ConfOptions::strict()).parse().unwrap_err();
        match err {
            Error::FieldOutsideBlock { line, key } => {
                assert_eq!(line, 4);
                assert_eq!(key, "stray");
            }
            other => panic!("unexpected error: {other}"),
        }

        let after_device = "controller {\n}\ndevice {\n  id = 1\n}\nname = \"x\"\n";
        let err = Parser::new(after_device, ConfOptions::strict())
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::FieldOutsideBlock { line: 6, .. }));
    }

    #[test]
    fn test_strict_brace_checks() {
        let stray = Parser::new("controller {\n}\n}\n", ConfOptions::strict()).parse();
        assert!(matches!(stray, Err(Error::UnbalancedBraces { line: 3 })));

        let unclosed = Parser::new("controller {\n  id = 1\n", ConfOptions::strict()).parse();
        assert!(matches!(unclosed, Err(Error::UnbalancedBraces { line: 1 })));

        let deep = Parser::new(
            "controller {\n}\ndevice {\n  parameters {\n    extra {\n    }\n  }\n}\n",
            ConfOptions::strict(),
        )
        .parse();
        assert!(matches!(
            deep,
            Err(Error::NestingTooDeep { line: 5, depth: 3 })
        ));
    }

    #[test]
    fn test_strict_ignores_braces_inside_values() {
        let text = "controller {\n  name = \"{odd\"\n}\n";
        let config = Parser::new(text, ConfOptions::strict()).parse().unwrap();
        assert_eq!(
            config.controller.get("name"),
            Some(&Value::String("{odd".into()))
        );
    }
}
