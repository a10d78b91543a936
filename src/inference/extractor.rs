use crate::catalog::HealthCatalog;
use crate::models::Symptom;

/// Scan free text against the lexicon and return every symptom with at
/// least one keyword variant contained in the text.
///
/// Matching is case-insensitive substring containment — no tokenization,
/// no stemming. Intentionally permissive: downstream ratio thresholding
/// filters the noise. Pure and total; results keep lexicon declaration
/// order and contain no duplicates.
pub fn extract<'a>(catalog: &'a HealthCatalog, text: &str) -> Vec<&'a Symptom> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    catalog
        .symptoms()
        .iter()
        .filter(|symptom| {
            symptom
                .keywords
                .iter()
                .any(|keyword| lower.contains(&keyword.to_lowercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(found: &[&Symptom]) -> Vec<String> {
        found.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn finds_keyword_embedded_in_sentence() {
        let catalog = HealthCatalog::bundled();
        let found = extract(&catalog, "I have a headache and fever since yesterday");
        assert_eq!(ids(&found), vec!["fever", "headache"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = HealthCatalog::bundled();
        let found = extract(&catalog, "TERRIBLE HEADACHE and Fever!!");
        assert_eq!(ids(&found), vec!["fever", "headache"]);
    }

    #[test]
    fn matches_multilingual_variants() {
        let catalog = HealthCatalog::bundled();
        assert_eq!(ids(&extract(&catalog, "tengo fiebre y tos")), vec!["fever", "cough"]);
        assert_eq!(ids(&extract(&catalog, "ich habe kopfschmerzen")), vec!["headache"]);
        assert_eq!(ids(&extract(&catalog, "我发烧了")), vec!["fever"]);
    }

    #[test]
    fn multi_word_keyword_matches_as_substring() {
        let catalog = HealthCatalog::bundled();
        let found = extract(&catalog, "my sore throat got worse overnight");
        assert_eq!(ids(&found), vec!["sore_throat"]);
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let catalog = HealthCatalog::bundled();
        assert!(extract(&catalog, "").is_empty());
        assert!(extract(&catalog, "   ").is_empty());
    }

    #[test]
    fn unknown_text_yields_empty_set() {
        let catalog = HealthCatalog::bundled();
        assert!(extract(&catalog, "my bicycle needs a new chain").is_empty());
    }

    #[test]
    fn result_has_no_duplicates_for_multiple_variant_hits() {
        let catalog = HealthCatalog::bundled();
        // "fever" and "temperature" are both variants of the same symptom.
        let found = extract(&catalog, "fever with a high temperature");
        assert_eq!(ids(&found), vec!["fever"]);
    }
}
