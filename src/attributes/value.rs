//! Attribute value kinds and their per-kind codecs

use crate::geometry::Insets;
use crate::store::{StoreError, TokenReader, TokenWriter};

/// An RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    channels[i] = v * 16 + v;
                }
                Some(Color::new(channels[0], channels[1], channels[2]))
            }
            6 => {
                let parse = |s: &str| u8::from_str_radix(s, 16).ok();
                Some(Color::new(
                    parse(&digits[0..2])?,
                    parse(&digits[2..4])?,
                    parse(&digits[4..6])?,
                ))
            }
            _ => None,
        }
    }

    pub fn write_to(&self, w: &mut TokenWriter) {
        w.write_int(self.red as i32);
        w.write_int(self.green as i32);
        w.write_int(self.blue as i32);
    }

    pub fn read_from(r: &mut TokenReader) -> Result<Color, StoreError> {
        Ok(Color::new(
            read_channel(r)?,
            read_channel(r)?,
            read_channel(r)?,
        ))
    }
}

fn read_channel(r: &mut TokenReader) -> Result<u8, StoreError> {
    let value = r.read_int()?;
    u8::try_from(value).map_err(|_| StoreError::UnexpectedToken {
        expected: "a color channel in 0..=255",
        found: value.to_string(),
        span: r.last_span(),
    })
}

/// A line-end decoration: an arrow head described by its opening angle and
/// outer/inner radii
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowTip {
    pub angle: i32,
    pub outer_radius: i32,
    pub inner_radius: i32,
}

impl ArrowTip {
    pub fn new(angle: i32, outer_radius: i32, inner_radius: i32) -> Self {
        Self {
            angle,
            outer_radius,
            inner_radius,
        }
    }
}

/// Nested serializable payloads. Each variant owns its wire format: a
/// type-name token followed by the type's fields.
#[derive(Debug, Clone, PartialEq)]
pub enum StorableValue {
    ArrowTip(ArrowTip),
    Insets(Insets),
}

impl StorableValue {
    pub fn write_to(&self, w: &mut TokenWriter) {
        match self {
            StorableValue::ArrowTip(tip) => {
                w.write_string("ArrowTip");
                w.write_int(tip.angle);
                w.write_int(tip.outer_radius);
                w.write_int(tip.inner_radius);
            }
            StorableValue::Insets(insets) => {
                w.write_string("Insets");
                w.write_int(insets.top);
                w.write_int(insets.left);
                w.write_int(insets.bottom);
                w.write_int(insets.right);
            }
        }
    }

    pub fn read_from(r: &mut TokenReader) -> Result<StorableValue, StoreError> {
        let name = r.read_string()?;
        match name.as_str() {
            "ArrowTip" => Ok(StorableValue::ArrowTip(ArrowTip::new(
                r.read_int()?,
                r.read_int()?,
                r.read_int()?,
            ))),
            "Insets" => Ok(StorableValue::Insets(Insets::new(
                r.read_int()?,
                r.read_int()?,
                r.read_int()?,
                r.read_int()?,
            ))),
            _ => Err(StoreError::UnknownType {
                name,
                span: r.last_span(),
            }),
        }
    }
}

/// Runtime-only attribute payloads. These never survive a write; see
/// [`crate::attributes::AttributeMap::write_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransientValue {
    /// A context menu attached by the host application, identified by name.
    /// Persisted as a bare sentinel tag with no payload.
    PopupMenu(String),
    /// Arbitrary application state with a diagnostic label. Persisted as the
    /// `"UNKNOWN"` placeholder; the value itself is dropped.
    Runtime(String),
}

impl TransientValue {
    pub fn label(&self) -> &str {
        match self {
            TransientValue::PopupMenu(id) => id,
            TransientValue::Runtime(label) => label,
        }
    }
}

/// One attribute value, a closed union over the storable kinds plus the
/// transient runtime kinds
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Color(Color),
    Bool(bool),
    Text(String),
    Int(i32),
    Storable(StorableValue),
    Transient(TransientValue),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_six_digits() {
        assert_eq!(Color::from_hex("#2196f3"), Some(Color::new(33, 150, 243)));
    }

    #[test]
    fn test_hex_three_digits() {
        assert_eq!(Color::from_hex("#f00"), Some(Color::new(255, 0, 0)));
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(Color::from_hex("red"), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_color_codec_round_trip() {
        let mut w = TokenWriter::new();
        Color::new(10, 20, 30).write_to(&mut w);
        let text = w.into_string();
        let mut r = TokenReader::new(&text);
        assert_eq!(Color::read_from(&mut r).unwrap(), Color::new(10, 20, 30));
    }

    #[test]
    fn test_color_channel_out_of_range() {
        let mut r = TokenReader::new("300 0 0");
        let err = Color::read_from(&mut r).unwrap_err();
        assert!(matches!(err, StoreError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_storable_round_trip() {
        let original = StorableValue::ArrowTip(ArrowTip::new(45, 10, 8));
        let mut w = TokenWriter::new();
        original.write_to(&mut w);
        let text = w.into_string();
        let mut r = TokenReader::new(&text);
        assert_eq!(StorableValue::read_from(&mut r).unwrap(), original);
    }

    #[test]
    fn test_storable_unknown_type() {
        let mut r = TokenReader::new("\"Wormhole\" 1 2 3");
        let err = StorableValue::read_from(&mut r).unwrap_err();
        assert!(matches!(err, StoreError::UnknownType { .. }));
    }
}
