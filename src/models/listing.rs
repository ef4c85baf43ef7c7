// file: src/models/listing.rs
// description: repositories grouped by category for rendering
// reference: internal data structures

use crate::models::{EnrichmentResult, RepositoryRecord};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl ListingEntry {
    /// An empty enhanced description falls back to the upstream one.
    pub fn from_parts(record: &RepositoryRecord, enrichment: &EnrichmentResult) -> Self {
        let description = if enrichment.enhanced_description.is_empty() {
            record.description.clone().unwrap_or_default()
        } else {
            enrichment.enhanced_description.clone()
        };

        Self {
            name: record.name.clone(),
            url: record.url.clone(),
            description,
        }
    }
}

/// Categories iterate in lexicographic order; entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedListing {
    categories: BTreeMap<String, Vec<ListingEntry>>,
}

impl CategorizedListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: &str, entry: ListingEntry) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .push(entry);
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[ListingEntry])> {
        self.categories
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            url: format!("https://x/{}", name),
            description: String::new(),
        }
    }

    #[test]
    fn test_categories_sorted_entries_in_order() {
        let mut listing = CategorizedListing::new();
        listing.push("Web", entry("zeta"));
        listing.push("AI", entry("beta"));
        listing.push("Web", entry("alpha"));

        let categories: Vec<&str> = listing.categories().map(|(name, _)| name).collect();
        assert_eq!(categories, vec!["AI", "Web"]);

        let (_, web) = listing.categories().nth(1).unwrap();
        let names: Vec<&str> = web.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        assert_eq!(listing.len(), 3);
        assert_eq!(listing.category_count(), 2);
    }

    #[test]
    fn test_entry_falls_back_to_upstream_description() {
        let record = RepositoryRecord::new("alpha", Some("A tool"), "https://x/alpha");
        let entry = ListingEntry::from_parts(&record, &EnrichmentResult::new("Tools", ""));
        assert_eq!(entry.description, "A tool");

        let entry =
            ListingEntry::from_parts(&record, &EnrichmentResult::new("Tools", "A simple tool."));
        assert_eq!(entry.description, "A simple tool.");
    }
}
