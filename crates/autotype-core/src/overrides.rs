//! User-supplied character → chord overrides.
//!
//! Overrides arrive as a JSON object with one entry per character. Each
//! value is either a compact string `"KEYNAME[+shift][+altgr]"` (modifier
//! order does not matter, case does not matter, duplicates are ignored) or
//! an object `{"key": "KEYNAME", "shift": bool, "altgr": bool}`.
//!
//! Parsing validates *shape* only: keys must be exactly one character and
//! values must be one of the two forms above. Whether a referenced key name
//! actually exists in the sink's key space is deliberately left to the
//! resolver, so an override for an unsupported key degrades softly instead
//! of failing the run up front.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::layout::{KeyStep, LayoutTable};

/// Error raised for a malformed override document.
///
/// All variants are reported before any device state is touched.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// The document is not valid JSON or is not a JSON object.
    #[error("invalid override JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value must be an object.
    #[error("override document must be a JSON object")]
    NotAnObject,

    /// Override keys must be exactly one character.
    #[error("override key must be a single character, got {0:?}")]
    KeyNotSingleChar(String),

    /// The value is neither a key string nor a chord object.
    #[error("override value for {0:?} must be a \"KEYNAME[+shift][+altgr]\" string or an object with a \"key\" field")]
    ValueShape(char),

    /// The chord object is missing or mistypes a field.
    #[error("invalid override object for {ch:?}: {source}")]
    ChordObject {
        ch: char,
        #[source]
        source: serde_json::Error,
    },

    /// The key name part of a string-form override is empty.
    #[error("override for {0:?} has an empty key name")]
    EmptyKeyName(char),

    /// A modifier token other than `shift` / `altgr` was supplied.
    #[error("unknown modifier {token:?} in override for {ch:?} (expected shift or altgr)")]
    UnknownModifier { ch: char, token: String },
}

/// Parsed overrides: one single-step chord per character.
pub type OverrideMap = BTreeMap<char, KeyStep>;

#[derive(Debug, Deserialize)]
struct ChordObject {
    key: String,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    altgr: bool,
}

/// Parses the JSON override document.
///
/// # Errors
///
/// Returns [`OverrideError`] when the document is not valid JSON, a key is
/// not exactly one character, or a value has the wrong shape.
pub fn parse_overrides(json: &str) -> Result<OverrideMap, OverrideError> {
    let doc: Value = serde_json::from_str(json)?;
    let Value::Object(entries) = doc else {
        return Err(OverrideError::NotAnObject);
    };

    let mut out = OverrideMap::new();
    for (raw_key, value) in entries {
        let mut chars = raw_key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(OverrideError::KeyNotSingleChar(raw_key));
        };

        let step = match value {
            Value::String(spec) => parse_chord_spec(ch, &spec)?,
            Value::Object(_) => {
                let chord: ChordObject = serde_json::from_value(value)
                    .map_err(|source| OverrideError::ChordObject { ch, source })?;
                if chord.key.is_empty() {
                    return Err(OverrideError::EmptyKeyName(ch));
                }
                KeyStep {
                    key_name: chord.key,
                    shift: chord.shift,
                    altgr: chord.altgr,
                }
            }
            _ => return Err(OverrideError::ValueShape(ch)),
        };
        out.insert(ch, step);
    }
    Ok(out)
}

/// Parses the compact `"KEYNAME[+shift][+altgr]"` form.
fn parse_chord_spec(ch: char, spec: &str) -> Result<KeyStep, OverrideError> {
    let mut parts = spec.split('+');
    let key_name = parts.next().unwrap_or_default();
    if key_name.is_empty() {
        return Err(OverrideError::EmptyKeyName(ch));
    }

    let mut shift = false;
    let mut altgr = false;
    for token in parts {
        match token.to_ascii_lowercase().as_str() {
            "shift" => shift = true,
            "altgr" => altgr = true,
            _ => {
                return Err(OverrideError::UnknownModifier {
                    ch,
                    token: token.to_string(),
                })
            }
        }
    }

    Ok(KeyStep {
        key_name: key_name.to_string(),
        shift,
        altgr,
    })
}

/// Replaces every overridden character's entry in `table` wholesale.
///
/// The override's single step becomes the character's entire sequence;
/// fields are never merged with the layout's chord.
pub fn apply_overrides(table: &mut LayoutTable, overrides: &OverrideMap) {
    for (ch, step) in overrides {
        table.set(*ch, step.clone());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build_layout, Layout};

    #[test]
    fn test_parse_string_form_with_shift() {
        let overrides = parse_overrides(r#"{"a": "KEY_B+shift"}"#).unwrap();
        assert_eq!(overrides[&'a'], KeyStep::shifted("KEY_B"));
    }

    #[test]
    fn test_parse_object_form_with_both_modifiers() {
        let overrides =
            parse_overrides(r#"{"b": {"key": "KEY_C", "shift": true, "altgr": true}}"#).unwrap();
        assert_eq!(overrides[&'b'], KeyStep::altgr("KEY_C", true));
    }

    #[test]
    fn test_parse_object_form_defaults_modifiers_to_false() {
        let overrides = parse_overrides(r#"{"x": {"key": "KEY_F"}}"#).unwrap();
        assert_eq!(overrides[&'x'], KeyStep::plain("KEY_F"));
    }

    #[test]
    fn test_modifiers_are_case_and_order_insensitive() {
        let overrides = parse_overrides(r#"{"{": "KEY_8+ALTGR+Shift+shift"}"#).unwrap();
        assert_eq!(overrides[&'{'], KeyStep::altgr("KEY_8", true));
    }

    #[test]
    fn test_multi_character_key_is_rejected() {
        let err = parse_overrides(r#"{"ab": "KEY_B"}"#).unwrap_err();
        assert!(matches!(err, OverrideError::KeyNotSingleChar(k) if k == "ab"));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = parse_overrides(r#"{"": "KEY_B"}"#).unwrap_err();
        assert!(matches!(err, OverrideError::KeyNotSingleChar(k) if k.is_empty()));
    }

    #[test]
    fn test_numeric_value_is_rejected() {
        let err = parse_overrides(r#"{"a": 123}"#).unwrap_err();
        assert!(matches!(err, OverrideError::ValueShape('a')));
    }

    #[test]
    fn test_object_without_key_field_is_rejected() {
        let err = parse_overrides(r#"{"a": {"shift": true}}"#).unwrap_err();
        assert!(matches!(err, OverrideError::ChordObject { ch: 'a', .. }));
    }

    #[test]
    fn test_unknown_modifier_is_rejected() {
        let err = parse_overrides(r#"{"a": "KEY_B+meta"}"#).unwrap_err();
        assert!(matches!(
            err,
            OverrideError::UnknownModifier { ch: 'a', token } if token == "meta"
        ));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            parse_overrides("not json"),
            Err(OverrideError::Json(_))
        ));
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        assert!(matches!(
            parse_overrides(r#"["KEY_A"]"#),
            Err(OverrideError::NotAnObject)
        ));
    }

    #[test]
    fn test_unknown_key_names_parse_fine() {
        // Validation against the sink's key space happens at resolution
        let overrides = parse_overrides(r#"{"a": "KEY_DOES_NOT_EXIST"}"#).unwrap();
        assert_eq!(overrides[&'a'].key_name, "KEY_DOES_NOT_EXIST");
    }

    #[test]
    fn test_apply_overrides_replaces_entry_wholesale() {
        let mut table = build_layout(Layout::Us);
        let overrides = parse_overrides(r#"{"a": "KEY_B+altgr"}"#).unwrap();

        apply_overrides(&mut table, &overrides);

        assert_eq!(table.get('a'), Some(&[KeyStep::altgr("KEY_B", false)][..]));
        // untouched characters keep their layout chord
        assert_eq!(table.get('b'), Some(&[KeyStep::plain("KEY_B")][..]));
    }
}
