//! # City Table
//!
//! Static relocation metrics keyed by city name, plus the fuzzy lookup used
//! to map free-form user input onto a table entry.

pub mod metrics;
mod table;

pub use metrics::{CityEntry, CityMetrics, RiskLevel};

use serde::Serialize;

/// Outcome of resolving free-form input against the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCity {
    /// Table key that matched (canonical name or alias), or the trimmed input
    /// when nothing matched
    pub key: String,
    pub metrics: CityMetrics,
    /// False when `metrics` are the fallback defaults
    pub known: bool,
}

/// Read-only view over the built-in city table
#[derive(Debug, Clone, Copy)]
pub struct CityTable {
    entries: &'static [CityEntry],
}

impl Default for CityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CityTable {
    /// The hand-authored table shipped with the crate
    pub fn builtin() -> Self {
        Self {
            entries: table::CITIES,
        }
    }

    pub fn entries(&self) -> &'static [CityEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-insensitive) lookup by canonical name or alias
    pub fn get(&self, name: &str) -> Option<&'static CityEntry> {
        let entries: &'static [CityEntry] = self.entries;
        entries.iter().find(|e| e.is_named(name))
    }

    /// Map user input to a table entry.
    ///
    /// Keys are tried in table order, canonical name before aliases. A key
    /// matches when it contains the input, or when the input contains the
    /// key's city part (text before the first comma). First match wins.
    pub fn resolve(&self, input: &str) -> ResolvedCity {
        let needle = input.trim().to_lowercase();
        if !needle.is_empty() {
            for entry in self.entries {
                for key in entry.keys() {
                    let key_lower = key.to_lowercase();
                    let city_part = key_lower.split(',').next().unwrap_or_default();
                    if key_lower.contains(&needle) || needle.contains(city_part) {
                        return ResolvedCity {
                            key: key.to_string(),
                            metrics: entry.metrics,
                            known: true,
                        };
                    }
                }
            }
        }

        ResolvedCity {
            key: input.trim().to_string(),
            metrics: CityMetrics::FALLBACK,
            known: false,
        }
    }

    /// Entries whose canonical name or alias contains `filter`
    pub fn search(&self, filter: &str) -> Vec<&'static CityEntry> {
        let needle = filter.trim().to_lowercase();
        let entries: &'static [CityEntry] = self.entries;
        entries
            .iter()
            .filter(|e| needle.is_empty() || e.keys().any(|k| k.to_lowercase().contains(&needle)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_populated() {
        let table = CityTable::builtin();
        assert_eq!(table.len(), 143);
        assert!(table.get("Berlin, Germany").is_some());
        assert!(table.get("bengaluru").is_some());
    }

    #[test]
    fn test_resolve_short_name_to_canonical() {
        let table = CityTable::builtin();
        let resolved = table.resolve("  Lisbon ");
        assert_eq!(resolved.key, "Lisbon, Portugal");
        assert!(resolved.known);
        assert_eq!(resolved.metrics.wealth_multiplier_5, 1.68);
    }

    #[test]
    fn test_resolve_input_containing_city_part() {
        let table = CityTable::builtin();
        let resolved = table.resolve("Tokyo, Japan (Shibuya)");
        assert_eq!(resolved.key, "Tokyo, Japan");
    }

    #[test]
    fn test_resolve_alias_keeps_matched_key() {
        let table = CityTable::builtin();
        let resolved = table.resolve("Gurugram");
        assert_eq!(resolved.key, "Gurugram, India");
        assert_eq!(resolved.metrics.hidden_costs, 3600.0);

        let resolved = table.resolve("Bengaluru");
        assert_eq!(resolved.key, "Bengaluru, India");
        assert_eq!(resolved.metrics, table.get("Bangalore").map(|e| e.metrics).unwrap());

        assert_eq!(table.resolve("Gurgaon").key, "Gurgaon, India");
    }

    #[test]
    fn test_resolve_unknown_city_uses_fallback() {
        let table = CityTable::builtin();
        let resolved = table.resolve("Atlantis");
        assert_eq!(resolved.key, "Atlantis");
        assert!(!resolved.known);
        assert_eq!(resolved.metrics, CityMetrics::FALLBACK);
    }

    #[test]
    fn test_resolve_blank_input_is_unknown() {
        let resolved = CityTable::builtin().resolve("   ");
        assert!(!resolved.known);
        assert_eq!(resolved.key, "");
    }

    #[test]
    fn test_search_filters_by_substring() {
        let table = CityTable::builtin();
        let hits = table.search("india");
        assert!(hits.iter().all(|e| e.keys().any(|k| k.to_lowercase().contains("india"))));
        assert!(hits.len() > 10);
        assert_eq!(table.search("").len(), table.len());
    }
}
