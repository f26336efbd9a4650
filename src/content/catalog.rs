use std::collections::{HashMap, HashSet};

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::years::period_index;

pub type WordId = i64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Zh => "中文",
            Self::En => "English",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Zh => Self::En,
            Self::En => Self::Zh,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub zh: Option<String>,
    pub en: Option<String>,
}

impl LocalizedText {
    /// Preferred language first, then whichever variant exists.
    pub fn get(&self, language: Language) -> Option<&str> {
        let (preferred, fallback) = match language {
            Language::Zh => (&self.zh, &self.en),
            Language::En => (&self.en, &self.zh),
        };
        preferred.as_deref().or(fallback.as_deref())
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.zh.as_deref().into_iter().chain(self.en.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Proposer {
    pub name: LocalizedText,
    pub original_name: Option<String>,
}

impl Proposer {
    fn match_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.name
            .variants()
            .chain(self.original_name.as_deref())
            .map(|name| name.trim().to_lowercase())
    }
}

/// A dictionary entry as supplied by the content store. The layout core only
/// reads `id`, `country_code` and `proposed_year`; the rest feeds panels,
/// search and relation lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordRecord {
    pub id: WordId,
    pub country_code: String,
    pub proposed_year: Option<i32>,
    pub term: LocalizedText,
    pub term_original: Option<String>,
    pub proposers: Vec<Proposer>,
    pub related_ids: Vec<WordId>,
    pub brief_definition: LocalizedText,
}

impl WordRecord {
    pub fn label(&self, language: Language) -> &str {
        self.term.get(language).unwrap_or("?")
    }

    pub fn year_period(&self) -> usize {
        period_index(self.proposed_year)
    }
}

#[derive(Clone, Debug, Default)]
pub struct WordCatalog {
    words: Vec<WordRecord>,
    index_by_id: HashMap<WordId, usize>,
    proposer_keys: Vec<HashSet<String>>,
}

impl WordCatalog {
    /// Later records with an id already seen are ignored.
    pub fn new(records: Vec<WordRecord>) -> Self {
        let mut words = Vec::with_capacity(records.len());
        let mut index_by_id = HashMap::with_capacity(records.len());
        for record in records {
            if index_by_id.contains_key(&record.id) {
                continue;
            }
            index_by_id.insert(record.id, words.len());
            words.push(record);
        }

        let proposer_keys = words
            .iter()
            .map(|word| {
                word.proposers
                    .iter()
                    .flat_map(Proposer::match_keys)
                    .filter(|key| !key.is_empty())
                    .collect::<HashSet<_>>()
            })
            .collect();

        Self {
            words,
            index_by_id,
            proposer_keys,
        }
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn get(&self, id: WordId) -> Option<&WordRecord> {
        self.index_by_id.get(&id).map(|&index| &self.words[index])
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.index_by_id.contains_key(&id)
    }

    /// Explicit related-terms list without self references or repeats.
    pub fn concept_related(&self, id: WordId) -> Vec<WordId> {
        let Some(word) = self.get(id) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        word.related_ids
            .iter()
            .copied()
            .filter(|&related| related != id && seen.insert(related))
            .collect()
    }

    /// Every other word sharing at least one proposer name, in catalog order.
    pub fn co_proposers(&self, id: WordId) -> Vec<WordId> {
        let Some(&index) = self.index_by_id.get(&id) else {
            return Vec::new();
        };
        let keys = &self.proposer_keys[index];
        if keys.is_empty() {
            return Vec::new();
        }

        self.words
            .iter()
            .zip(&self.proposer_keys)
            .filter(|(other, other_keys)| other.id != id && !keys.is_disjoint(other_keys))
            .map(|(other, _)| other.id)
            .collect()
    }

    /// Fuzzy search over terms, original terms, definitions and proposers.
    /// An empty query lists every word.
    pub fn search(&self, query: &str, limit: usize) -> Vec<WordId> {
        let query = query.trim();
        if query.is_empty() {
            return self.words.iter().take(limit).map(|word| word.id).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .words
            .iter()
            .enumerate()
            .filter_map(|(order, word)| {
                search_fields(word)
                    .filter_map(|text| fuzzy_match_score(&matcher, text, query))
                    .max()
                    .map(|score| (score, order, word.id))
            })
            .collect::<Vec<_>>();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.truncate(limit);
        scored.into_iter().map(|(_, _, id)| id).collect()
    }
}

fn search_fields(word: &WordRecord) -> impl Iterator<Item = &str> {
    word.term
        .variants()
        .chain(word.term_original.as_deref())
        .chain(word.brief_definition.variants())
        .chain(word.proposers.iter().flat_map(|proposer| {
            proposer
                .name
                .variants()
                .chain(proposer.original_name.as_deref())
        }))
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}
