//! Card options, as supplied by the embedding host in JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub const DEFAULT_PRE_TEXT: &str = "Scratch here";
pub const DEFAULT_POST_TEXT: &str = "You won!";
pub const DEFAULT_CLEAR_PERCENTAGE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Label shown while the card is still covered.
    #[serde(deserialize_with = "null_as_default")]
    pub pre_text: String,
    /// Label after the win; also stands in for the prize when `bg` is empty.
    #[serde(deserialize_with = "null_as_default")]
    pub post_text: String,
    /// Prize image under the cover. Empty for none.
    #[serde(deserialize_with = "null_as_default")]
    pub bg: String,
    /// Cover texture. Empty selects the built-in texture.
    #[serde(deserialize_with = "null_as_default")]
    pub fg: String,
    /// Percentage of cleared pixels that wins the card.
    pub clear_percentage: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            pre_text: DEFAULT_PRE_TEXT.to_string(),
            post_text: DEFAULT_POST_TEXT.to_string(),
            bg: String::new(),
            fg: String::new(),
            clear_percentage: DEFAULT_CLEAR_PERCENTAGE,
        }
    }
}

impl CardConfig {
    /// Lay the keys of a JSON object over this config. Keys the object
    /// doesn't mention keep their current value; unknown keys are ignored.
    ///
    /// `self` is never modified: on any parse or type error the caller
    /// still holds the previous config.
    pub fn merge_json(&self, raw: &str) -> Result<CardConfig> {
        let overrides = match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            other => return Err(Error::ConfigShape(json_kind(&other).to_string())),
        };

        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(base) = &mut merged {
            base.extend(overrides);
        }
        Ok(serde_json::from_value(merged)?)
    }

    pub fn prize_image(&self) -> Option<&str> {
        non_empty(&self.bg)
    }

    pub fn cover_texture(&self) -> Option<&str> {
        non_empty(&self.fg)
    }
}

/// `null` reads as the field's default (`"bg": null` means no prize image).
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_card() {
        let cfg = CardConfig::default();
        assert_eq!(cfg.pre_text, "Scratch here");
        assert_eq!(cfg.post_text, "You won!");
        assert_eq!(cfg.clear_percentage, 50.0);
        assert_eq!(cfg.prize_image(), None);
        assert_eq!(cfg.cover_texture(), None);
    }

    #[test]
    fn merge_overrides_only_given_keys() {
        let base = CardConfig { pre_text: "Try me".into(), ..CardConfig::default() };
        let merged = base
            .merge_json(r#"{"clear_percentage": 70, "bg": "prize.png"}"#)
            .unwrap();

        assert_eq!(merged.pre_text, "Try me");
        assert_eq!(merged.post_text, "You won!");
        assert_eq!(merged.clear_percentage, 70.0);
        assert_eq!(merged.prize_image(), Some("prize.png"));
    }

    #[test]
    fn merge_ignores_unknown_keys() {
        let merged = CardConfig::default()
            .merge_json(r#"{"theme": "dark", "post_text": "Jackpot"}"#)
            .unwrap();
        assert_eq!(merged.post_text, "Jackpot");
    }

    #[test]
    fn null_text_fields_read_as_empty() {
        let base = CardConfig { bg: "old.png".into(), fg: "foil.png".into(), ..CardConfig::default() };
        let merged = base
            .merge_json(r#"{"bg": null, "fg": null, "post_text": "Prize!"}"#)
            .unwrap();
        assert_eq!(merged.prize_image(), None);
        assert_eq!(merged.cover_texture(), None);
        assert_eq!(merged.post_text, "Prize!");
    }

    #[test]
    fn null_threshold_is_rejected() {
        let err = CardConfig::default()
            .merge_json(r#"{"clear_percentage": null}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = CardConfig::default().merge_json("{pre_text: oops").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = CardConfig::default().merge_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::ConfigShape(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn wrongly_typed_field_is_rejected() {
        let err = CardConfig::default()
            .merge_json(r#"{"clear_percentage": "half"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
