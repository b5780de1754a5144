//! Output style selection and the independent-boolean flag sets.

use bitflags::bitflags;
use strum::{Display, EnumString};

/// The four renderer targets. Fixed per handle, but mutable between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "xml")]
    Xml,
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "html")]
    Html,
}

impl Default for Style {
    fn default() -> Self {
        Style::Text
    }
}

bitflags! {
    /// Per-handle independent booleans.
    ///
    /// `DIV_OPEN` tracks whether an HTML line-div is currently open; it is
    /// mutated only by the HTML renderer and is not meant to be set by
    /// callers, so `HandleFlags::default()`/the public constructors never
    /// include it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HandleFlags: u16 {
        /// Insert indentation and newlines between structural elements.
        const PRETTY   = 1 << 0;
        /// Report shape mismatches via the warning sink.
        const WARN     = 1 << 1;
        /// Include an XPath-like breadcrumb in HTML `data-xpath` attributes.
        const XPATH    = 1 << 2;
        /// Emit `data-type`/`data-help` attributes in HTML from the info table.
        const INFO     = 1 << 3;
        /// The sink owns its underlying file and must be closed on drop.
        const CLOSE_FP = 1 << 4;
        /// Internal: an HTML line-div is currently open.
        const DIV_OPEN = 1 << 5;
    }
}

bitflags! {
    /// Per-field booleans parsed from brace-field modifiers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct FieldFlags: u8 {
        /// Append a `:` decoration after the field.
        const COLON    = 1 << 0;
        /// Append a single space of padding after the field.
        const WS       = 1 << 1;
        /// Hide this field from text output.
        const HIDE     = 1 << 2;
        /// Force quoting of the value in JSON.
        const QUOTE    = 1 << 3;
        /// Force no quoting of the value in JSON.
        const NO_QUOTE = 1 << 4;
    }
}

/// Per-frame booleans tracked on the structural stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameFlags(u8);

impl FrameFlags {
    pub const NOT_FIRST: FrameFlags = FrameFlags(1 << 0);
    pub const LIST: FrameFlags = FrameFlags(1 << 1);
    pub const INSTANCE: FrameFlags = FrameFlags(1 << 2);
    pub const EMPTY: FrameFlags = FrameFlags(0);

    pub fn contains(self, other: FrameFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: FrameFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for FrameFlags {
    type Output = FrameFlags;
    fn bitor(self, rhs: FrameFlags) -> FrameFlags {
        FrameFlags(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_round_trips_through_strum() {
        assert_eq!("json".parse::<Style>().unwrap(), Style::Json);
        assert_eq!(Style::Html.to_string(), "html");
    }

    #[test]
    fn handle_flags_set_clear_are_idempotent() {
        let mut flags = HandleFlags::PRETTY;
        flags.insert(HandleFlags::PRETTY);
        assert_eq!(flags, HandleFlags::PRETTY);
        flags.remove(HandleFlags::WARN);
        assert_eq!(flags, HandleFlags::PRETTY);
    }

    #[test]
    fn frame_flags_contains() {
        let f = FrameFlags::LIST | FrameFlags::NOT_FIRST;
        assert!(f.contains(FrameFlags::LIST));
        assert!(!f.contains(FrameFlags::INSTANCE));
    }
}
