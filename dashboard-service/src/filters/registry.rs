//! Static catalog of valid filter values and their display labels.

use std::collections::HashMap;

/// Category names understood by [`FilterRegistry::category`].
pub const CATEGORIES: [&str; 5] = ["vendors", "programs", "cities", "statuses", "regions"];

const EMPTY: &[&str] = &[];

/// Single source of truth for valid filter values per category.
///
/// Every category begins with the sentinel `"all"`, meaning no restriction.
/// Built once at startup and shared read-only; handlers do not enforce
/// membership, so the registry is authoritative for the UI and for the
/// filter-options product, not a gatekeeper.
#[derive(Debug)]
pub struct FilterRegistry {
    catalog: Vec<(&'static str, Vec<&'static str>)>,
    display_names: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        let catalog = vec![
            ("vendors", vec!["all", "PTHWI", "PTNOK", "PTERI", "PTZTE"]),
            ("programs", vec!["all", "5G_NSA", "5G_SA", "MM_EXPANSION"]),
            (
                "cities",
                vec!["all", "JAKARTA", "SURABAYA", "BANDUNG", "MEDAN", "MAKASSAR"],
            ),
            (
                "statuses",
                vec!["all", "mos_done", "installed", "integrated", "on_air"],
            ),
            ("regions", vec!["all", "WESTERN", "CENTRAL", "EASTERN"]),
        ];

        // Partial by design: unmapped values display as-is.
        let display_names = HashMap::from([
            (
                "vendors",
                HashMap::from([
                    ("PTHWI", "Huawei"),
                    ("PTNOK", "Nokia"),
                    ("PTERI", "Ericsson"),
                    ("PTZTE", "ZTE"),
                ]),
            ),
            (
                "programs",
                HashMap::from([
                    ("5G_NSA", "5G Non-Standalone"),
                    ("5G_SA", "5G Standalone"),
                    ("MM_EXPANSION", "Massive MIMO Expansion"),
                ]),
            ),
            (
                "cities",
                HashMap::from([
                    ("JAKARTA", "Jakarta"),
                    ("SURABAYA", "Surabaya"),
                    ("BANDUNG", "Bandung"),
                    ("MEDAN", "Medan"),
                    ("MAKASSAR", "Makassar"),
                ]),
            ),
            (
                "statuses",
                HashMap::from([
                    ("mos_done", "MOS Done"),
                    ("installed", "Installed"),
                    ("integrated", "Integrated"),
                    ("on_air", "On Air"),
                ]),
            ),
            (
                "regions",
                HashMap::from([
                    ("WESTERN", "Western"),
                    ("CENTRAL", "Central"),
                    ("EASTERN", "Eastern"),
                ]),
            ),
        ]);

        Self {
            catalog,
            display_names,
        }
    }

    /// Valid values for a category, `"all"` first. Unknown categories yield
    /// an empty slice.
    pub fn category(&self, name: &str) -> &[&'static str] {
        self.catalog
            .iter()
            .find(|(category, _)| *category == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(EMPTY)
    }

    /// Human-readable label for a raw value, or the raw value unchanged when
    /// no mapping exists.
    pub fn display_name<'a>(&self, category: &str, raw: &'a str) -> &'a str {
        self.display_names
            .get(category)
            .and_then(|names| names.get(raw))
            .copied()
            .unwrap_or(raw)
    }

    /// Category names in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog.iter().map(|(category, _)| *category)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_starts_with_the_all_sentinel() {
        let registry = FilterRegistry::new();
        for name in CATEGORIES {
            assert_eq!(registry.category(name).first(), Some(&"all"), "{name}");
        }
    }

    #[test]
    fn unknown_category_fails_closed() {
        let registry = FilterRegistry::new();
        assert!(registry.category("districts").is_empty());
    }

    #[test]
    fn display_name_maps_known_values() {
        let registry = FilterRegistry::new();
        assert_eq!(registry.display_name("vendors", "PTHWI"), "Huawei");
        assert_eq!(registry.display_name("statuses", "on_air"), "On Air");
    }

    #[test]
    fn display_name_falls_back_to_raw_value() {
        let registry = FilterRegistry::new();
        assert_eq!(registry.display_name("vendors", "UNKNOWN"), "UNKNOWN");
        assert_eq!(registry.display_name("districts", "PTHWI"), "PTHWI");
    }
}
