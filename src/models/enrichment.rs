// file: src/models/enrichment.rs
// description: category and polished description produced for a repository
// reference: internal data structures

use serde::{Deserialize, Deserializer, Serialize};

pub const UNCLASSIFIED: &str = "Unclassified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enhanced_description: String,
}

fn default_category() -> String {
    UNCLASSIFIED.to_string()
}

fn category_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

/// Reads an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EnrichmentResult {
    pub fn new(category: impl Into<String>, enhanced_description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            enhanced_description: enhanced_description.into(),
        }
    }

    /// Result used whenever enrichment is skipped or fails: the upstream
    /// description passes through untouched.
    pub fn fallback(description: Option<&str>) -> Self {
        Self::new(UNCLASSIFIED, description.unwrap_or_default())
    }

    /// Trims both fields and maps a blank category to [`UNCLASSIFIED`].
    pub fn normalized(mut self) -> Self {
        let category = self.category.trim();
        self.category = if category.is_empty() {
            UNCLASSIFIED.to_string()
        } else {
            category.to_string()
        };
        self.enhanced_description = self.enhanced_description.trim().to_string();
        self
    }

    pub fn is_unclassified(&self) -> bool {
        self.category == UNCLASSIFIED
    }
}

impl Default for EnrichmentResult {
    fn default() -> Self {
        Self::fallback(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_passes_description_through() {
        let result = EnrichmentResult::fallback(Some("A tool"));
        assert_eq!(result.category, "Unclassified");
        assert_eq!(result.enhanced_description, "A tool");

        let result = EnrichmentResult::fallback(None);
        assert_eq!(result.enhanced_description, "");
        assert!(result.is_unclassified());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let result: EnrichmentResult = serde_json::from_str(r#"{"category": "Web"}"#).unwrap();
        assert_eq!(result, EnrichmentResult::new("Web", ""));

        let result: EnrichmentResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, EnrichmentResult::default());
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let result: EnrichmentResult =
            serde_json::from_str(r#"{"category": "AI", "enhanced_description": null}"#).unwrap();
        assert_eq!(result, EnrichmentResult::new("AI", ""));

        let result: EnrichmentResult =
            serde_json::from_str(r#"{"category": null, "enhanced_description": "Does things."}"#)
                .unwrap();
        assert_eq!(result, EnrichmentResult::new("Unclassified", "Does things."));
    }

    #[test]
    fn test_normalized_blank_category() {
        let result = EnrichmentResult::new("  ", " Does things. ").normalized();
        assert_eq!(result.category, "Unclassified");
        assert_eq!(result.enhanced_description, "Does things.");
    }
}
