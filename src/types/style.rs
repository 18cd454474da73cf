use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// CSS-like text style: property name to value.
///
/// Kept ordered so [`TextStyle::css_text`] is deterministic and two styles
/// with the same properties render identical text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextStyle(BTreeMap<String, String>);

impl TextStyle {
    pub const EMPTY: TextStyle = TextStyle(BTreeMap::new());

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn set(mut self, property: &str, value: &str) -> Self {
        self.0.insert(property.to_string(), value.to_string());
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `other` on top of `self`; properties in `other` win.
    #[must_use]
    pub fn merge(&self, other: &TextStyle) -> TextStyle {
        let mut merged = self.0.clone();
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        TextStyle(merged)
    }

    /// Properties present in both styles with equal values.
    #[must_use]
    pub fn intersect(&self, other: &TextStyle) -> TextStyle {
        TextStyle(
            self.0
                .iter()
                .filter(|(k, v)| other.0.get(*k) == Some(*v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Render as an inline `style` attribute value.
    pub fn css_text(&self) -> String {
        let mut css = String::new();
        for (property, value) in &self.0 {
            css.push_str(property);
            css.push_str(": ");
            css.push_str(value);
            css.push(';');
        }
        css
    }

    /// Append pixel width and height.
    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.set("width", &format!("{width}px"))
            .set("height", &format!("{height}px"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_other_wins() {
        let base = TextStyle::new().set("color", "black").set("font-weight", "normal");
        let over = TextStyle::new().set("color", "red");
        let merged = base.merge(&over);
        assert_eq!(merged.get("color"), Some("red"));
        assert_eq!(merged.get("font-weight"), Some("normal"));
    }

    #[test]
    fn test_css_text_is_sorted() {
        let style = TextStyle::new().set("width", "10px").set("color", "red");
        assert_eq!(style.css_text(), "color: red;width: 10px;");
    }

    #[test]
    fn test_intersect_keeps_equal_values() {
        let a = TextStyle::new().set("color", "red").set("font-style", "italic");
        let b = TextStyle::new().set("color", "red").set("font-style", "normal");
        assert_eq!(a.intersect(&b), TextStyle::new().set("color", "red"));
    }
}
