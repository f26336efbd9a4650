use eframe::egui::Pos2;

use crate::content::{WordCatalog, WordId};

mod wave;

use self::wave::{LinePath, WaveKey, WavePathCache};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationKind {
    ConceptRelated,
    CoProposer,
}

impl RelationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::ConceptRelated => "Concept related",
            Self::CoProposer => "Co-proposer",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::ConceptRelated => "concept",
            Self::CoProposer => "co-proposer",
        }
    }

    /// `(base, variation)` of the per-piece wave amplitude in pixels.
    fn amplitude_range(self) -> (f32, f32) {
        match self {
            Self::ConceptRelated => (20.0, 10.0),
            Self::CoProposer => (0.0, 25.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelationConfig {
    /// Lines shorter than this on screen are drawn straight.
    pub straight_line_distance: f32,
    /// Screen length of one wave piece at first draw.
    pub segment_length: f32,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self {
            straight_line_distance: 50.0,
            segment_length: 60.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationTarget {
    pub id: WordId,
    pub kind: RelationKind,
}

/// Concept-related words first, then co-proposers, never the word itself.
pub fn collect_relations(catalog: &WordCatalog, focused: WordId) -> Vec<RelationTarget> {
    let concept = catalog
        .concept_related(focused)
        .into_iter()
        .map(|id| RelationTarget {
            id,
            kind: RelationKind::ConceptRelated,
        });
    let co_proposers = catalog
        .co_proposers(focused)
        .into_iter()
        .map(|id| RelationTarget {
            id,
            kind: RelationKind::CoProposer,
        });

    concept
        .chain(co_proposers)
        .filter(|target| target.id != focused)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelationLine {
    pub source: WordId,
    pub target: WordId,
    pub kind: RelationKind,
    pub start: Pos2,
    pub end: Pos2,
    pub path: LinePath,
}

impl RelationLine {
    pub fn straight_path(&self) -> LinePath {
        LinePath::straight(self.start, self.end)
    }
}

#[derive(Debug, Default)]
pub struct RelationRenderer {
    config: RelationConfig,
    cache: WavePathCache,
}

impl RelationRenderer {
    pub fn new(config: RelationConfig) -> Self {
        Self {
            config,
            cache: WavePathCache::default(),
        }
    }

    /// Lines from the focused word to each target. Targets without a screen
    /// position are skipped.
    pub fn layout(
        &mut self,
        focused: WordId,
        targets: &[RelationTarget],
        position_of: impl Fn(WordId) -> Option<Pos2>,
    ) -> Vec<RelationLine> {
        let Some(start) = position_of(focused) else {
            return Vec::new();
        };

        targets
            .iter()
            .filter_map(|target| {
                let end = position_of(target.id)?;
                let key = WaveKey {
                    source: focused,
                    target: target.id,
                    kind: target.kind,
                };
                let path = self.cache.path(
                    key,
                    start,
                    end,
                    self.config.straight_line_distance,
                    self.config.segment_length,
                );
                Some(RelationLine {
                    source: focused,
                    target: target.id,
                    kind: target.kind,
                    start,
                    end,
                    path,
                })
            })
            .collect()
    }

    #[cfg(test)]
    pub fn cached_lines(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use eframe::egui::pos2;

    use super::*;
    use crate::content::catalog_from_json;

    fn catalog() -> WordCatalog {
        catalog_from_json(
            r#"{"words": [
                {"id": 1, "term": "a", "related_terms": [{"id": 2}, {"id": 1}],
                 "proposers": [{"name": {"en": "Ada"}}]},
                {"id": 2, "term": "b"},
                {"id": 3, "term": "c", "proposers": [{"name": {"en": "ada"}}]},
                {"id": 4, "term": "d", "proposers": [{"name": {"en": "Grace"}}]}
            ]}"#,
        )
        .expect("catalog loads")
    }

    #[test]
    fn collects_both_relation_kinds_without_self_loops() {
        let targets = collect_relations(&catalog(), 1);
        assert_eq!(
            targets,
            vec![
                RelationTarget {
                    id: 2,
                    kind: RelationKind::ConceptRelated,
                },
                RelationTarget {
                    id: 3,
                    kind: RelationKind::CoProposer,
                },
            ]
        );
    }

    #[test]
    fn missing_endpoints_are_skipped() {
        let positions = HashMap::from([(1, pos2(0.0, 0.0)), (3, pos2(400.0, 0.0))]);
        let mut renderer = RelationRenderer::new(RelationConfig::default());
        let targets = collect_relations(&catalog(), 1);

        let lines = renderer.layout(1, &targets, |id| positions.get(&id).copied());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].target, 3);
        assert_eq!(lines[0].kind, RelationKind::CoProposer);
        assert!(!lines[0].path.is_straight());
        assert!(lines[0].straight_path().is_straight());

        let none = renderer.layout(2, &targets, |id| positions.get(&id).copied());
        assert!(none.is_empty());
    }

    #[test]
    fn layout_reuses_cached_wave_parameters() {
        let positions = HashMap::from([(1, pos2(0.0, 0.0)), (3, pos2(400.0, 0.0))]);
        let mut renderer = RelationRenderer::new(RelationConfig::default());
        let targets = collect_relations(&catalog(), 1);

        let first = renderer.layout(1, &targets, |id| positions.get(&id).copied());
        let second = renderer.layout(1, &targets, |id| positions.get(&id).copied());
        assert_eq!(first, second);
        assert_eq!(renderer.cached_lines(), 1);
    }
}
