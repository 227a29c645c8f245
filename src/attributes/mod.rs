//! Figure styling attributes and their persistence codec
//!
//! Attributes are key/value pairs attached to a figure: colors, fonts, line
//! styles and the like. The key set is a closed enumeration; values are a
//! closed tagged union. The map round-trips through the token stream with a
//! `"attributes"` marker block.

pub mod map;
pub mod value;

pub use map::{AttributeMap, DiagnosticSink, LogSink};
pub use value::{ArrowTip, AttributeValue, Color, StorableValue, TransientValue};

/// The closed set of recognized stylable figure properties.
///
/// Readers tolerate names outside this set by consuming and dropping the
/// entry; see [`AttributeMap::read_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    FrameColor,
    FillColor,
    TextColor,
    FontName,
    FontSize,
    FontStyle,
    LineWidth,
    LineStyle,
    ArrowMode,
    Url,
    Locked,
    PopupMenu,
}

impl AttributeKey {
    /// Every key, in serialization order
    pub const ALL: [AttributeKey; 12] = [
        AttributeKey::FrameColor,
        AttributeKey::FillColor,
        AttributeKey::TextColor,
        AttributeKey::FontName,
        AttributeKey::FontSize,
        AttributeKey::FontStyle,
        AttributeKey::LineWidth,
        AttributeKey::LineStyle,
        AttributeKey::ArrowMode,
        AttributeKey::Url,
        AttributeKey::Locked,
        AttributeKey::PopupMenu,
    ];

    /// The wire name of this key
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKey::FrameColor => "FrameColor",
            AttributeKey::FillColor => "FillColor",
            AttributeKey::TextColor => "TextColor",
            AttributeKey::FontName => "FontName",
            AttributeKey::FontSize => "FontSize",
            AttributeKey::FontStyle => "FontStyle",
            AttributeKey::LineWidth => "LineWidth",
            AttributeKey::LineStyle => "LineStyle",
            AttributeKey::ArrowMode => "ArrowMode",
            AttributeKey::Url => "Url",
            AttributeKey::Locked => "Locked",
            AttributeKey::PopupMenu => "PopupMenu",
        }
    }

    /// Look a wire name up in the registry
    pub fn from_name(name: &str) -> Option<AttributeKey> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }
}
