use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Ordered labels a coach attaches to a swing section, persisted as a JSON list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromJsonQueryResult))]
#[serde(transparent)]
pub struct SwingTags(pub Vec<String>);

impl From<Vec<String>> for SwingTags {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

/// One time range of a reviewed video, as submitted by the coach
#[derive(Debug, Clone, Deserialize)]
pub struct NewSwingSection {
    pub start_sec: Decimal,
    pub end_sec: Decimal,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: SwingTags,
    /// Drawing/markup blob; must be a JSON object when present
    pub markup: Option<JsonValue>,
    pub coach_comment: Option<String>,
    pub coach_comment_summary: Option<String>,
}

impl NewSwingSection {
    pub fn new(start_sec: Decimal, end_sec: Decimal) -> Self {
        Self {
            start_sec,
            end_sec,
            image_url: None,
            tags: SwingTags::default(),
            markup: None,
            coach_comment: None,
            coach_comment_summary: None,
        }
    }

    pub fn markup_is_valid(&self) -> bool {
        self.markup.as_ref().is_none_or(JsonValue::is_object)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_keep_their_order() {
        let tags: SwingTags = serde_json::from_value(json!(["grip", "backswing", "grip"])).unwrap();
        assert_eq!(tags.0, vec!["grip", "backswing", "grip"]);
        assert_eq!(serde_json::to_value(&tags).unwrap(), json!(["grip", "backswing", "grip"]));
    }

    #[test]
    fn test_markup_must_be_an_object() {
        let mut section = NewSwingSection::new(Decimal::ZERO, Decimal::ONE);
        assert!(section.markup_is_valid());

        section.markup = Some(json!({ "lines": [[0, 0, 10, 10]] }));
        assert!(section.markup_is_valid());

        section.markup = Some(json!([1, 2, 3]));
        assert!(!section.markup_is_valid());
    }
}
