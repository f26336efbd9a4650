use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

use crate::util::meaningful_text;

use super::catalog::{LocalizedText, Proposer, WordCatalog, WordRecord};
use super::parse::{RawText, RawWord, parse_content_document, parse_leading_year};

pub fn load_word_catalog(path: &Path) -> Result<WordCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read content file {}", path.display()))?;
    let catalog = catalog_from_json(&raw)
        .with_context(|| format!("failed to parse content file {}", path.display()))?;

    info!(
        path = %path.display(),
        words = catalog.len(),
        "loaded word catalog"
    );
    Ok(catalog)
}

pub fn catalog_from_json(raw: &str) -> Result<WordCatalog> {
    let raw_words = parse_content_document(raw)?;

    let mut seen = HashSet::with_capacity(raw_words.len());
    let mut records = Vec::with_capacity(raw_words.len());
    for (index, raw_word) in raw_words.into_iter().enumerate() {
        let Some(id) = raw_word.id.as_word_id() else {
            warn!(index, "skipping word entry without a numeric id");
            continue;
        };
        if !seen.insert(id) {
            warn!(word_id = id, "skipping duplicate word id");
            continue;
        }
        records.push(word_record(id, raw_word));
    }

    if records.is_empty() {
        return Err(anyhow!("content file contains no usable words"));
    }

    Ok(WordCatalog::new(records))
}

fn word_record(id: i64, raw: RawWord) -> WordRecord {
    let related_ids = raw
        .related_terms
        .iter()
        .filter_map(|related| related.id.as_word_id())
        .collect();

    let proposers = raw
        .proposers
        .into_iter()
        .filter_map(|proposer| {
            let (name, original_name) = localized(proposer.name);
            if name.zh.is_none() && name.en.is_none() && original_name.is_none() {
                None
            } else {
                Some(Proposer {
                    name,
                    original_name,
                })
            }
        })
        .collect();

    let (term, _) = localized(raw.term);
    let (brief_definition, _) = localized(raw.brief_definition);

    WordRecord {
        id,
        country_code: raw
            .proposing_country
            .as_deref()
            .and_then(meaningful_text)
            .unwrap_or_default()
            .to_owned(),
        proposed_year: raw.proposing_time.as_ref().and_then(parse_leading_year),
        term,
        term_original: owned_text(raw.term_original.as_deref()),
        proposers,
        related_ids,
        brief_definition,
    }
}

fn owned_text(value: Option<&str>) -> Option<String> {
    value.and_then(meaningful_text).map(str::to_owned)
}

fn localized(raw: RawText) -> (LocalizedText, Option<String>) {
    match raw {
        RawText::Plain(text) => (
            LocalizedText {
                zh: owned_text(Some(&text)),
                en: None,
            },
            None,
        ),
        RawText::Localized { zh, en, ori } => (
            LocalizedText {
                zh: owned_text(zh.as_deref()),
                en: owned_text(en.as_deref()),
            },
            owned_text(ori.as_deref()),
        ),
        RawText::Missing => (LocalizedText::default(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Language;

    const SAMPLE: &str = r#"{
        "about": {},
        "words": [
            {"id": 17, "term": {"zh": "熵", "en": "entropy"}, "termOri": "Entropie",
             "proposers": [{"name": {"zh": "克劳修斯", "en": "Clausius", "ori": "Rudolf Clausius"}}],
             "proposing_country": "DE", "proposing_time": "1865",
             "related_terms": [{"id": "18"}, {"id": "not-a-number"}]},
            {"id": 18, "term": {"zh": "TODO：词条", "en": "enthalpy"},
             "proposers": [{"name": {"zh": "TODO：提出者", "en": "TODO: proposer"}}],
             "proposing_country": "TODO: country", "proposing_time": "TODO: time"},
            {"id": "x"},
            {"id": 17, "term": "dup"}
        ]
    }"#;

    #[test]
    fn converts_raw_words_into_records() {
        let catalog = catalog_from_json(SAMPLE).expect("sample loads");
        assert_eq!(catalog.len(), 2);

        let entropy = catalog.get(17).expect("word 17");
        assert_eq!(entropy.country_code, "DE");
        assert_eq!(entropy.proposed_year, Some(1865));
        assert_eq!(entropy.related_ids, vec![18]);
        assert_eq!(entropy.term_original.as_deref(), Some("Entropie"));
        assert_eq!(entropy.label(Language::En), "entropy");
        assert_eq!(
            entropy.proposers[0].original_name.as_deref(),
            Some("Rudolf Clausius")
        );
    }

    #[test]
    fn placeholders_become_missing_values() {
        let catalog = catalog_from_json(SAMPLE).expect("sample loads");
        let enthalpy = catalog.get(18).expect("word 18");
        assert_eq!(enthalpy.country_code, "");
        assert_eq!(enthalpy.proposed_year, None);
        assert!(enthalpy.proposers.is_empty());
        assert_eq!(enthalpy.label(Language::Zh), "enthalpy");
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert!(catalog_from_json(r#"{"words": [{"id": "x"}]}"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_word_catalog(Path::new("/nonexistent/data.json"))
            .expect_err("missing file fails");
        assert!(format!("{error:#}").contains("/nonexistent/data.json"));
    }
}
