//! The attribute map and its stream codec

use std::collections::BTreeMap;

use super::value::{AttributeValue, Color, StorableValue, TransientValue};
use super::AttributeKey;
use crate::store::{StoreError, TokenReader, TokenWriter};

/// Marker opening every serialized attribute block
const MARKER: &str = "attributes";

/// Placeholder tag for values with no persistent form
const UNKNOWN_TAG: &str = "UNKNOWN";

/// Sentinel tag for an attached popup menu; carries no payload
const POPUP_MENU_TAG: &str = "PopupMenu";

/// Receiver for codec diagnostics, injected so the codec never writes to a
/// global output stream
pub trait DiagnosticSink {
    /// A value with no persistent form was downgraded to the `"UNKNOWN"`
    /// placeholder and dropped from the stream
    fn unpersistable(&mut self, key: AttributeKey, label: &str);
}

/// Default sink forwarding to the `tracing` subscriber
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn unpersistable(&mut self, key: AttributeKey, label: &str) {
        tracing::warn!(
            key = key.name(),
            label,
            "dropping attribute value with no persistent form"
        );
    }
}

/// A figure's styling attributes, keyed by [`AttributeKey`].
///
/// A present key always maps to a value; setting `None` removes the key.
/// Entries serialize in key order, so the wire form is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a key, or `None` if the key is not defined
    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.entries.get(&key)
    }

    /// Set a key, overwriting any previous value. Setting `None` removes the
    /// key instead of storing an empty entry.
    pub fn set(&mut self, key: AttributeKey, value: Option<AttributeValue>) {
        match value {
            Some(value) => {
                self.entries.insert(key, value);
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    /// Tests if an attribute is defined
    pub fn contains(&self, key: AttributeKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Serialize with the default [`LogSink`]
    pub fn write_to(&self, w: &mut TokenWriter) {
        self.write_with(w, &mut LogSink)
    }

    /// Serialize the map as a tagged stream: marker, count, then per entry
    /// the key name, a type tag and the type-specific payload.
    ///
    /// The catch-all arm is the only place the `"UNKNOWN"` placeholder is
    /// produced: a [`TransientValue::Runtime`] value is dropped from the
    /// stream and reported through `diagnostics`. This is designed, lossy
    /// behavior, not an error.
    pub fn write_with(&self, w: &mut TokenWriter, diagnostics: &mut dyn DiagnosticSink) {
        w.write_string(MARKER);
        w.write_int(self.entries.len() as i32);
        for (key, value) in &self.entries {
            w.write_string(key.name());
            match value {
                AttributeValue::Text(text) => {
                    w.write_string("String");
                    w.write_string(text);
                }
                AttributeValue::Color(color) => {
                    w.write_string("Color");
                    color.write_to(w);
                }
                AttributeValue::Bool(flag) => {
                    w.write_string("Boolean");
                    w.write_string(if *flag { "TRUE" } else { "FALSE" });
                }
                AttributeValue::Int(value) => {
                    w.write_string("Int");
                    w.write_int(*value);
                }
                AttributeValue::Storable(storable) => {
                    w.write_string("Storable");
                    storable.write_to(w);
                }
                AttributeValue::Transient(TransientValue::PopupMenu(_)) => {
                    w.write_string(POPUP_MENU_TAG);
                }
                AttributeValue::Transient(transient) => {
                    diagnostics.unpersistable(*key, transient.label());
                    w.write_string(UNKNOWN_TAG);
                }
            }
        }
    }

    /// Decode an attribute block from the stream.
    ///
    /// The leading marker is matched case-insensitively; a mismatch aborts
    /// the read with [`StoreError::BadMarker`] and no partial map. Entries
    /// whose key is not a recognized [`AttributeKey`] are consumed in full
    /// and silently dropped so the stream stays aligned. The placeholder and
    /// sentinel tags are consumed without producing an entry. Any other
    /// unrecognized tag is fatal.
    pub fn read_from(r: &mut TokenReader) -> Result<AttributeMap, StoreError> {
        let marker = r.read_string()?;
        if !marker.eq_ignore_ascii_case(MARKER) {
            return Err(StoreError::BadMarker {
                expected: MARKER,
                found: marker,
                span: r.last_span(),
            });
        }

        let mut map = AttributeMap::new();
        let count = r.read_int()?;
        for _ in 0..count {
            let key_name = r.read_string()?;
            let tag = r.read_string()?;
            let value = match tag.as_str() {
                "Color" => Some(AttributeValue::Color(Color::read_from(r)?)),
                // The literal token text decides the flag, as written
                "Boolean" => Some(AttributeValue::Bool(
                    r.read_string()?.eq_ignore_ascii_case("true"),
                )),
                "String" => Some(AttributeValue::Text(r.read_string()?)),
                "Int" => Some(AttributeValue::Int(r.read_int()?)),
                "Storable" => Some(AttributeValue::Storable(StorableValue::read_from(r)?)),
                POPUP_MENU_TAG | UNKNOWN_TAG => None,
                _ => {
                    return Err(StoreError::UnknownType {
                        name: tag,
                        span: r.last_span(),
                    })
                }
            };
            if let Some(value) = value {
                if let Some(key) = AttributeKey::from_name(&key_name) {
                    map.set(key, Some(value));
                }
            }
        }
        Ok(map)
    }
}
