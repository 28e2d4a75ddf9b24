//! Candidate extraction from OCR text.
//!
//! A vision/OCR step returns free text that may hold several card numbers.
//! Full serials all start with the carrier code, so those are pulled out
//! first. Only when the text holds none do we fall back to bare suffixes
//! (a leading `0` followed by 8 or 9 digits), and those are kept only when
//! they resolve, since a stray number in OCR text is more likely noise than a
//! card.

use crate::api::{self, MatchResult, Options};
use crate::engine::CatalogSnapshot;
use serde::Serialize;
use std::collections::HashSet;

/// Issuer identifier every full serial in the catalog starts with.
pub const CARRIER_CODE: &str = "8954";

/// One number found in a text block and what it resolved to.
///
/// Tagging a detection with where the text came from (a filename, a request
/// id) is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub detected: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Full serials in `text`: the carrier code followed by at least nine digits.
/// Distinct, in first-seen order.
pub fn extract_serials(text: &str) -> Vec<String> {
    distinct(regex!(r"8954[0-9]{9,}").find_iter(text).map(|m| m.as_str()))
}

/// Bare suffixes in `text`: a whole word of `0` plus eight or nine digits.
/// Distinct, in first-seen order.
pub fn extract_suffixes(text: &str) -> Vec<String> {
    distinct(regex!(r"\b0[0-9]{8,9}\b").find_iter(text).map(|m| m.as_str()))
}

/// Resolve every candidate number in `text`.
///
/// Full serials are always reported, found or not. Suffixes are only
/// consulted when no full serial was seen, and only found ones are reported.
pub fn scan_text(snapshot: &CatalogSnapshot, text: &str, options: &Options) -> Vec<Detection> {
    let serials = extract_serials(text);
    if !serials.is_empty() {
        tracing::debug!(count = serials.len(), "full serials detected");
        return serials.into_iter().map(|detected| detect(snapshot, detected, options)).collect();
    }

    let suffixes = extract_suffixes(text);
    tracing::debug!(count = suffixes.len(), "no full serials, trying suffixes");
    suffixes
        .into_iter()
        .map(|detected| detect(snapshot, detected, options))
        .filter(|detection| detection.result.is_found())
        .collect()
}

fn detect(snapshot: &CatalogSnapshot, detected: String, options: &Options) -> Detection {
    let result = api::lookup_with(snapshot, &detected, options);
    Detection { detected, result }
}

fn distinct<'t>(matches: impl Iterator<Item = &'t str>) -> Vec<String> {
    let mut seen = HashSet::new();
    matches.filter(|m| seen.insert(*m)).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Record, Strategy};
    use pretty_assertions::assert_eq;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::build(vec![
            Record::new("8954318224056426839").with_linea("1127067248").with_estado("ASIGNADA"),
            Record::new("8954318224056426847").with_estado("EXTRAVIADA"),
        ])
    }

    #[test]
    fn extracts_distinct_serials_in_order() {
        let text = "8954318224056426847\n8954318224056426839\nserie: 8954318224056426847";
        assert_eq!(extract_serials(text), vec!["8954318224056426847", "8954318224056426839"]);
    }

    #[test]
    fn serials_need_nine_digits_after_the_carrier_code() {
        assert!(extract_serials("89541234567").is_empty());
        assert_eq!(extract_serials("x8954123456789y"), vec!["8954123456789"]);
    }

    #[test]
    fn extracts_whole_word_suffixes_only() {
        let text = "abajo 056426839 0 y 0564268470, no 1056426839 ni 05642";
        assert_eq!(extract_suffixes(text), vec!["056426839", "0564268470"]);
    }

    #[test]
    fn full_serials_are_reported_found_or_not() {
        let text = "8954318224056426839\n8954318224099999999";
        let detections = scan_text(&snapshot(), text, &Options::default());

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].detected, "8954318224056426839");
        assert_eq!(detections[0].result.strategy(), Some(Strategy::ExactSerie));
        assert_eq!(
            detections[1].result,
            MatchResult::NotFound { number: "8954318224099999999".to_string() }
        );
    }

    #[test]
    fn suffixes_are_a_fallback_and_drop_misses() {
        let text = "arriba 8954318224\nabajo 056426847 0\notro 012345678";
        let detections = scan_text(&snapshot(), text, &Options::default());

        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].detected, "056426847");
        assert_eq!(
            detections[0].result.record().map(|r| r.serie.as_str()),
            Some("8954318224056426847")
        );
    }

    #[test]
    fn suffixes_are_ignored_when_a_full_serial_is_present() {
        let text = "8954318224056426839 and 056426847";
        let detections = scan_text(&snapshot(), text, &Options::default());
        let detected: Vec<&str> = detections.iter().map(|d| d.detected.as_str()).collect();
        assert_eq!(detected, vec!["8954318224056426839"]);
    }

    #[test]
    fn detection_serializes_flat() {
        let detections = scan_text(&snapshot(), "8954318224056426839", &Options::default());
        let value = serde_json::to_value(&detections[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "detected": "8954318224056426839",
                "found": true,
                "serie": "8954318224056426839",
                "linea": "1127067248",
                "estado": "ASIGNADA",
                "strategy": "exact_serie",
            })
        );
    }

    #[test]
    fn empty_text_detects_nothing() {
        assert!(scan_text(&snapshot(), "", &Options::default()).is_empty());
    }
}
