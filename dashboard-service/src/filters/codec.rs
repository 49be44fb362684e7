//! Codec between [`FilterSelection`] and its flat query-string form.
//!
//! Multi-valued fields use repeated keys (`vendor_name=PTHWI&vendor_name=PTNOK`)
//! with input order preserved. Both directions are total: encoding skips empty
//! elements, decoding maps anything malformed or absent to empty defaults.

use serde::{Deserialize, Serialize};

pub const PARAM_SEARCH: &str = "q";
pub const PARAM_VENDOR: &str = "vendor_name";
pub const PARAM_PROGRAM: &str = "program_report";
pub const PARAM_IMP_TTP: &str = "imp_ttp";

/// A user's current multi-select filter state.
///
/// Multi-valued fields preserve insertion order and carry no uniqueness
/// invariant. Values are not validated against the catalog here; unknown
/// values pass through to the data source unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub search_text: String,
    pub vendor_names: Vec<String>,
    pub program_reports: Vec<String>,
    pub imp_ttps: Vec<String>,
}

impl FilterSelection {
    /// Serialize into ordered `(key, value)` pairs.
    ///
    /// `q` appears only when the search text is non-empty; empty elements of
    /// the multi-valued fields are dropped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if !self.search_text.is_empty() {
            pairs.push((PARAM_SEARCH.to_string(), self.search_text.clone()));
        }

        for (key, values) in [
            (PARAM_VENDOR, &self.vendor_names),
            (PARAM_PROGRAM, &self.program_reports),
            (PARAM_IMP_TTP, &self.imp_ttps),
        ] {
            for value in values.iter().filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), value.clone()));
            }
        }

        pairs
    }

    /// Percent-encoded query string without a leading `?`.
    pub fn encode(&self) -> String {
        serde_urlencoded::to_string(self.to_query_pairs()).unwrap_or_default()
    }

    /// Exact inverse of [`encode`](Self::encode) for selections whose array
    /// elements are non-empty. Unknown keys are ignored; a repeated `q`
    /// keeps its first occurrence.
    pub fn decode(query: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

        let mut search_text = None;
        let mut selection = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                PARAM_SEARCH => {
                    search_text.get_or_insert(value);
                }
                PARAM_VENDOR => selection.vendor_names.push(value),
                PARAM_PROGRAM => selection.program_reports.push(value),
                PARAM_IMP_TTP => selection.imp_ttps.push(value),
                _ => {}
            }
        }

        selection.search_text = search_text.unwrap_or_default();
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(
        search: &str,
        vendors: &[&str],
        programs: &[&str],
        ttps: &[&str],
    ) -> FilterSelection {
        FilterSelection {
            search_text: search.to_string(),
            vendor_names: vendors.iter().map(|s| s.to_string()).collect(),
            program_reports: programs.iter().map(|s| s.to_string()).collect(),
            imp_ttps: ttps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn encode_empty_selection_produces_no_parameters() {
        let empty = FilterSelection::default();
        assert!(empty.to_query_pairs().is_empty());
        assert_eq!(empty.encode(), "");
    }

    #[test]
    fn encode_repeats_keys_in_input_order() {
        let s = selection("", &["PTHWI", "PTNOK", "PTERI"], &[], &["W32"]);
        assert_eq!(
            s.encode(),
            "vendor_name=PTHWI&vendor_name=PTNOK&vendor_name=PTERI&imp_ttp=W32"
        );
    }

    #[test]
    fn encode_skips_empty_elements_and_omits_blank_search() {
        let s = selection("", &["PTHWI", "", "PTNOK"], &[""], &[]);
        assert_eq!(s.encode(), "vendor_name=PTHWI&vendor_name=PTNOK");
    }

    #[test]
    fn encode_percent_encodes_reserved_characters() {
        let s = selection("site 42&up", &[], &[], &[]);
        assert_eq!(s.encode(), "q=site+42%26up");
    }

    #[test]
    fn decode_empty_query_yields_defaults() {
        assert_eq!(FilterSelection::decode(""), FilterSelection::default());
    }

    #[test]
    fn decode_collects_repeated_keys_in_order() {
        let s = FilterSelection::decode(
            "vendor_name=PTHWI&program_report=5G_SA&vendor_name=PTNOK&q=alpha",
        );
        assert_eq!(s.search_text, "alpha");
        assert_eq!(s.vendor_names, vec!["PTHWI", "PTNOK"]);
        assert_eq!(s.program_reports, vec!["5G_SA"]);
        assert!(s.imp_ttps.is_empty());
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let s = FilterSelection::decode("page=3&vendor_name=PTHWI&sort=desc");
        assert_eq!(s.vendor_names, vec!["PTHWI"]);
        assert_eq!(s.search_text, "");
    }

    #[test]
    fn decode_keeps_first_search_occurrence() {
        let s = FilterSelection::decode("q=first&q=second");
        assert_eq!(s.search_text, "first");
    }

    #[test]
    fn round_trip_preserves_non_empty_selections() {
        let cases = [
            FilterSelection::default(),
            selection("jakarta north", &["PTHWI"], &[], &[]),
            selection("", &["PTHWI", "PTNOK"], &["5G_NSA", "5G_SA"], &["W30", "W31"]),
            selection("site&42=x", &["PT HWI"], &["a+b"], &[]),
        ];

        for original in cases {
            let decoded = FilterSelection::decode(&original.encode());
            assert_eq!(decoded, original);
        }
    }
}
