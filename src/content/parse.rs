use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(untagged)]
pub(super) enum RawText {
    Plain(String),
    Localized {
        #[serde(default)]
        zh: Option<String>,
        #[serde(default)]
        en: Option<String>,
        #[serde(default)]
        ori: Option<String>,
    },
    #[default]
    Missing,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    pub(super) fn as_word_id(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawYear {
    Number(i64),
    Text(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawProposer {
    #[serde(default)]
    pub(super) name: RawText,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawRelatedTerm {
    pub(super) id: RawId,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawWord {
    pub(super) id: RawId,
    #[serde(default)]
    pub(super) term: RawText,
    #[serde(default, rename = "termOri")]
    pub(super) term_original: Option<String>,
    #[serde(default)]
    pub(super) proposers: Vec<RawProposer>,
    #[serde(default)]
    pub(super) proposing_country: Option<String>,
    #[serde(default)]
    pub(super) proposing_time: Option<RawYear>,
    #[serde(default)]
    pub(super) related_terms: Vec<RawRelatedTerm>,
    #[serde(default)]
    pub(super) brief_definition: RawText,
}

/// Accepts either the published `{ "about": ..., "words": [...] }` document
/// or a bare array of words.
pub(super) fn parse_content_document(raw: &str) -> Result<Vec<RawWord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in content file")?;

    let items = match parsed {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("words") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(anyhow!("\"words\" is not an array")),
            None => return Err(anyhow!("content document has no \"words\" array")),
        },
        _ => return Err(anyhow!("unexpected JSON type in content file")),
    };

    let mut parsed_words = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let word = RawWord::deserialize(item)
            .with_context(|| format!("invalid word entry at index {index}"))?;
        parsed_words.push(word);
    }

    Ok(parsed_words)
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
pub(super) fn parse_leading_year(raw: &RawYear) -> Option<i32> {
    let text = match raw {
        RawYear::Number(value) => return i32::try_from(*value).ok(),
        RawYear::Text(text) => text.trim_start(),
    };

    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let end = digits
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i32>().ok().map(|value| value * sign)
}
