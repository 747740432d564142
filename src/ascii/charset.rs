//! Glyph set definitions.
//!
//! Every ramp is ordered from densest (darkest) to emptiest (lightest):
//! intensity 0 maps to the first glyph, intensity 255 to the last.

use serde::Deserialize;

/// Standard density ramp (10 levels).
pub const STANDARD_GLYPHS: &[char] = &['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Detailed density ramp (70 levels).
pub const DETAILED_GLYPHS: &[char] = &[
    '$', '@', 'B', '%', '8', '&', 'W', 'M', '#', '*', 'o', 'a', 'h', 'k', 'b', 'd', 'p', 'q',
    'w', 'm', 'Z', 'O', '0', 'Q', 'L', 'C', 'J', 'U', 'Y', 'X', 'z', 'c', 'v', 'u', 'n', 'x',
    'r', 'j', 'f', 't', '/', '\\', '|', '(', ')', '1', '{', '}', '[', ']', '?', '-', '_', '+',
    '~', '<', '>', 'i', '!', 'l', 'I', ';', ':', ',', '"', '^', '`', '\'', '.', ' ',
];

/// Simple ramp (5 levels).
pub const SIMPLE_GLYPHS: &[char] = &['#', '+', '-', '.', ' '];

/// Two-level ramp.
pub const BINARY_GLYPHS: &[char] = &['#', ' '];

/// Glyph set selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// 10-level density ramp
    #[default]
    Standard,
    /// 70-level density ramp
    Detailed,
    /// 5-level ramp for a clean look
    Simple,
    /// Foreground/blank only
    Binary,
    /// Unicode Braille dot cells (2x4 pixels per character)
    Braille,
}

impl GlyphSet {
    /// All glyph sets, in cycling order.
    pub const ALL: [GlyphSet; 5] = [
        GlyphSet::Standard,
        GlyphSet::Detailed,
        GlyphSet::Simple,
        GlyphSet::Binary,
        GlyphSet::Braille,
    ];

    /// Default glyph ramp for this set.
    ///
    /// Braille returns an empty slice since dot packing doesn't use a ramp.
    pub fn glyphs(&self) -> &'static [char] {
        match self {
            GlyphSet::Standard => STANDARD_GLYPHS,
            GlyphSet::Detailed => DETAILED_GLYPHS,
            GlyphSet::Simple => SIMPLE_GLYPHS,
            GlyphSet::Binary => BINARY_GLYPHS,
            GlyphSet::Braille => &[],
        }
    }

    /// Cycle to the next glyph set.
    ///
    /// Order: Standard -> Detailed -> Simple -> Binary -> Braille -> Standard
    pub fn next(&self) -> Self {
        match self {
            GlyphSet::Standard => GlyphSet::Detailed,
            GlyphSet::Detailed => GlyphSet::Simple,
            GlyphSet::Simple => GlyphSet::Binary,
            GlyphSet::Binary => GlyphSet::Braille,
            GlyphSet::Braille => GlyphSet::Standard,
        }
    }

    /// Identifier used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            GlyphSet::Standard => "standard",
            GlyphSet::Detailed => "detailed",
            GlyphSet::Simple => "simple",
            GlyphSet::Binary => "binary",
            GlyphSet::Braille => "braille",
        }
    }

    /// Look up a glyph set by identifier (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|set| set.name() == name)
    }

    /// Check if this set renders through the Braille packer.
    pub fn is_braille(&self) -> bool {
        matches!(self, GlyphSet::Braille)
    }
}

impl std::fmt::Display for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
