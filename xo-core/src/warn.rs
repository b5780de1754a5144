//! Advisory warnings for shape mismatches and format-string anomalies.
//!
//! Warnings never abort emission; they exist purely so a caller running
//! with `HandleFlags::WARN` can catch bugs in their own instrumentation.
//! Grounded on the common practice of routing diagnostics through `log`
//! while still writing a human-readable line for direct consumption.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A brace field's modifiers named more than one style letter
    /// (`D`/`L`/`P`/`T`/`V`); the last one wins.
    MultipleStyles { fmt: String },
    /// A brace field's modifiers contained a character not in the
    /// recognized set.
    UnknownModifier { fmt: String, modifier: char },
    /// A `close_*` call arrived with the structural stack already at
    /// depth 0.
    CloseWithEmptyStack { name: String },
    /// A `close_*` call's name did not match the name recorded when the
    /// matching frame was opened.
    IncorrectClose { got: String, want: String },
    /// A `close_list`/`close_container`/`close_instance` call's `LIST` bit
    /// did not match the frame it is closing.
    ListCloseConflict { name: String },
    /// As above, for the `INSTANCE` bit.
    InstanceCloseConflict { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MultipleStyles { fmt: s } => {
                write!(f, "format string uses multiple styles: {s}")
            }
            Warning::UnknownModifier { fmt: s, modifier } => {
                write!(f, "format string uses unknown modifier '{modifier}': {s}")
            }
            Warning::CloseWithEmptyStack { name } => {
                write!(f, "xo: close with empty stack: '{name}'")
            }
            Warning::IncorrectClose { got, want } => {
                write!(f, "xo: incorrect close: '{got}' .vs. '{want}'")
            }
            Warning::ListCloseConflict { name } => {
                write!(f, "xo: list close on list conflict: '{name}'")
            }
            Warning::InstanceCloseConflict { name } => {
                write!(f, "xo: list close on instance conflict: '{name}'")
            }
        }
    }
}

/// Default warning sink: one line to stderr, and forwarded to `log::warn!`
/// for hosts that have a logging backend installed.
pub fn default_warn_sink(warning: &Warning) {
    eprintln!("{warning}");
    log::warn!("{warning}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incorrect_close_message_matches_scenario() {
        let w = Warning::IncorrectClose { got: "b".into(), want: "a".into() };
        assert_eq!(w.to_string(), "xo: incorrect close: 'b' .vs. 'a'");
    }
}
