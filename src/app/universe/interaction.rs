use std::time::Instant;

use eframe::egui::{self, Pos2, Rect, Ui};
use tracing::{debug, info};

use crate::content::{WordId, YEAR_PERIODS, visible_at_cutoff};

use super::super::ViewModel;
use super::super::focus::NodeProjection;
use super::super::relations::collect_relations;
use super::super::viewport::ZoomDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum NavigationSource {
    NodeClick,
    Search,
    Random,
    RelationLine,
    DetailLink,
    Home,
}

impl NavigationSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::NodeClick => "node_click",
            Self::Search => "search",
            Self::Random => "random",
            Self::RelationLine => "relation_line",
            Self::DetailLink => "detail_link",
            Self::Home => "home",
        }
    }
}

impl ViewModel {
    /// One zoom step per frame with wheel input. Returns `true` when the
    /// scale changed and focus should be re-evaluated.
    pub(in crate::app) fn handle_universe_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) -> bool {
        if !response.hovered() {
            return false;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return false;
        }

        let direction = if scroll > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let target = self.viewport.wheel_target_scale(direction);
        self.viewport
            .zoom_at(Pos2::ZERO + (pointer - rect.min), target);
        true
    }

    /// Returns `true` when a drag just ended.
    pub(in crate::app) fn handle_universe_pan(&mut self, response: &egui::Response) -> bool {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.viewport.pan_by(response.drag_delta());
        }
        response.drag_stopped()
    }

    /// Nearest-to-centre focus scan. Entering focus snaps the new word to
    /// the viewport centre. Returns `true` when the transform moved.
    pub(in crate::app) fn rescan_focus(&mut self, projections: &[NodeProjection]) -> bool {
        let entered = self.focus.resolve(&self.viewport, projections);
        let moved = entered.is_some_and(|id| self.center_on_word(id));
        self.process_focus_events();
        moved
    }

    pub(in crate::app) fn navigate_to(&mut self, id: WordId, source: NavigationSource) {
        if !self.catalog.contains(id) || self.allocation.get(id).is_none() {
            debug!(word_id = id, source = source.as_str(), "ignoring navigation to unplaced word");
            return;
        }

        let year = self.catalog.get(id).and_then(|word| word.proposed_year);
        if !visible_at_cutoff(year, self.year_cutoff) {
            self.year_cutoff = YEAR_PERIODS.len() - 1;
        }

        info!(word_id = id, source = source.as_str(), "navigate to word");
        self.focus.navigate(id);
        self.center_on_word(id);
        self.process_focus_events();
    }

    fn center_on_word(&mut self, id: WordId) -> bool {
        let Some(placement) = self.allocation.get(id) else {
            return false;
        };
        let before = (self.viewport.scale, self.viewport.pan);
        let threshold = self.viewport.max_scale();
        self.viewport.center_on(placement.cell.ratio(), threshold);
        before != (self.viewport.scale, self.viewport.pan)
    }

    /// Forwards focus transitions to the view tracker and refreshes the
    /// relation targets of the focused word.
    pub(in crate::app) fn process_focus_events(&mut self) {
        let events = self.focus.drain_events();
        if events.is_empty() {
            return;
        }

        let finished = self
            .view_tracker
            .consume(&events, self.language, Instant::now());
        if let Some(record) = finished.last() {
            self.last_view = Some(*record);
        }
        self.hovered_relation = None;
        self.relation_targets = self
            .focus
            .focused()
            .map(|id| collect_relations(&self.catalog, id))
            .unwrap_or_default();
    }

    /// Recentres the focused word after the universe rect changed size.
    pub(in crate::app) fn recenter_focused(&mut self) {
        if let Some(id) = self.focus.focused() {
            self.center_on_word(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadedUniverse;
    use crate::app::analytics::ViewEndReason;
    use crate::app::relations::{RelationKind, RelationTarget};
    use crate::config::UniverseConfig;
    use crate::content::{CountryBoxes, catalog_from_json};
    use crate::layout::GridAllocator;

    fn model() -> ViewModel {
        let config = UniverseConfig {
            layout_seed: 7,
            ..UniverseConfig::default()
        };
        let catalog = catalog_from_json(
            r#"{"words": [
                {"id": 1, "term": "a", "proposing_country": "EG", "proposing_time": 1990,
                 "related_terms": [{"id": 2}]},
                {"id": 2, "term": "b", "proposing_country": "EG"},
                {"id": 3, "term": "c", "proposing_country": "EG"}
            ]}"#,
        )
        .expect("catalog loads");
        let boxes = CountryBoxes::builtin();
        let allocation =
            GridAllocator::new(config.grid, &boxes, config.layout_seed).allocate(catalog.words());
        ViewModel::new(
            config,
            LoadedUniverse {
                catalog,
                allocation,
            },
        )
    }

    fn screen_of(model: &ViewModel, id: WordId) -> Pos2 {
        let placement = model.allocation.get(id).expect("word is placed");
        model.viewport.world_to_screen(placement.cell.ratio())
    }

    #[test]
    fn navigating_to_unknown_word_changes_nothing() {
        let mut model = model();
        let before = (model.viewport.scale, model.viewport.pan);

        model.navigate_to(404, NavigationSource::Search);

        assert_eq!(model.focus.focused(), None);
        assert_eq!((model.viewport.scale, model.viewport.pan), before);
        assert!(model.relation_targets.is_empty());
        assert_eq!(model.last_view, None);
    }

    #[test]
    fn navigation_zooms_to_threshold_and_centres_the_word() {
        let mut model = model();

        model.navigate_to(1, NavigationSource::Search);

        assert_eq!(model.focus.focused(), Some(1));
        assert_eq!(model.viewport.scale, model.viewport.max_scale());
        assert!(screen_of(&model, 1).distance(model.viewport.center()) < 0.5);
        assert_eq!(
            model.relation_targets,
            vec![RelationTarget {
                id: 2,
                kind: RelationKind::ConceptRelated,
            }]
        );
    }

    #[test]
    fn navigating_to_a_filtered_word_resets_the_year_filter() {
        let mut model = model();
        model.year_cutoff = 1;

        model.navigate_to(1, NavigationSource::RelationLine);

        assert_eq!(model.year_cutoff, YEAR_PERIODS.len() - 1);
        assert_eq!(model.focus.focused(), Some(1));
    }

    #[test]
    fn zooming_out_releases_focus_and_clears_relations() {
        let mut model = model();
        model.navigate_to(1, NavigationSource::Home);

        let center = model.viewport.center();
        model.viewport.zoom_at(center, 1.0);
        model.rescan_focus(&[]);

        assert_eq!(model.focus.focused(), None);
        assert!(model.relation_targets.is_empty());
        let view = model.last_view.expect("view recorded");
        assert_eq!(view.word_id, 1);
        assert_eq!(view.reason, ViewEndReason::Released);
    }

    #[test]
    fn switching_words_records_a_switch() {
        let mut model = model();
        model.navigate_to(1, NavigationSource::Search);
        model.navigate_to(2, NavigationSource::DetailLink);

        assert_eq!(model.focus.focused(), Some(2));
        let view = model.last_view.expect("view recorded");
        assert_eq!(view.word_id, 1);
        assert_eq!(view.reason, ViewEndReason::Switch);
    }

    #[test]
    fn rescan_focuses_the_word_at_the_centre() {
        let mut model = model();
        let ratio = model.allocation.get(3).expect("word is placed").cell.ratio();
        let scale = model.viewport.max_scale();
        model.viewport.center_on(ratio, scale);

        let projections = [1, 3].map(|id| NodeProjection {
            id,
            screen: screen_of(&model, id),
        });
        model.rescan_focus(&projections);

        assert_eq!(model.focus.focused(), Some(3));
    }
}
