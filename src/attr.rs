// src/attr.rs

//! Visual attributes for a terminal cell: colors, styling flags, and an
//! optional hyperlink id.
//!
//! [`TextAttribute`] is the value type stored per column by
//! [`AttrRow`](crate::AttrRow). It is a small `Copy` struct with value
//! equality, which is what lets run-length encoding collapse a whole row of
//! uniformly-styled cells into a single run.

use bitflags::bitflags;

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's configured default for the ground it is used on.
    #[default]
    Default,
    /// An entry of the 256-color palette.
    Indexed(u8),
    /// A direct 24-bit color.
    Rgb(u8, u8, u8),
}

bitflags! {
    /// SGR styling flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u16 {
        const BOLD          = 0x0001;
        const FAINT         = 0x0002;
        const ITALIC        = 0x0004;
        const UNDERLINE     = 0x0008;
        const BLINK         = 0x0010;
        const REVERSE       = 0x0020;
        const HIDDEN        = 0x0040;
        const STRIKETHROUGH = 0x0080;
    }
}

/// The full set of visual attributes applied to one screen cell.
///
/// A `hyperlink_id` of zero means the cell is not part of a hyperlink; ids
/// are assigned by whoever owns the hyperlink table (typically the screen
/// buffer), the row only stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextAttribute {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Styling flags (bold, italic, underline, ...).
    pub flags: AttrFlags,
    hyperlink_id: u16,
}

impl TextAttribute {
    /// An attribute with the given colors and no styling.
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            flags: AttrFlags::empty(),
            hyperlink_id: 0,
        }
    }

    /// The same attribute with `flags` substituted.
    #[must_use]
    pub fn with_flags(mut self, flags: AttrFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The same attribute marked as part of hyperlink `id` (zero clears it).
    #[must_use]
    pub fn with_hyperlink(mut self, id: u16) -> Self {
        self.hyperlink_id = id;
        self
    }

    /// The hyperlink id, zero when none.
    pub fn hyperlink_id(&self) -> u16 {
        self.hyperlink_id
    }

    /// Whether the cell belongs to a hyperlink.
    pub fn is_hyperlinked(&self) -> bool {
        self.hyperlink_id != 0
    }
}
