use eframe::egui::{self, RichText, Ui};
use rand::seq::IndexedRandom;

use crate::content::{WordId, YEAR_PERIODS, visible_at_cutoff};
use crate::util::format_word_number;

use super::super::universe::NavigationSource;
use super::super::viewport::ZoomLevel;
use super::super::{SearchCache, ViewModel};

const SEARCH_RESULT_LIMIT: usize = 30;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Navigate");
        ui.add_space(6.0);

        let mut pending = None;
        ui.horizontal(|ui| {
            if ui.button("Home").clicked() {
                pending = Some((self.config.home_word_id, NavigationSource::Home));
            }
            if ui.button("Random word").clicked() {
                pending = self
                    .random_word()
                    .map(|id| (id, NavigationSource::Random));
            }
        });

        ui.separator();
        self.draw_zoom_controls(ui);

        ui.separator();
        self.draw_year_filter(ui);

        ui.separator();
        ui.label(RichText::new("Search").strong());
        let search_response = ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("term, proposer, definition"),
        );
        if search_response.changed() {
            self.search_cache = None;
        }

        if !self.search.trim().is_empty() {
            let results = self.search_results().to_vec();
            if results.is_empty() {
                ui.label("No matching words.");
            }
            egui::ScrollArea::vertical()
                .id_salt("search_results_scroll")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for id in results {
                        let Some(word) = self.catalog.get(id) else {
                            continue;
                        };
                        let label = format!("{}  {}", format_word_number(id), word.label(self.language));
                        if ui.link(label).clicked() {
                            pending = Some((id, NavigationSource::Search));
                        }
                    }
                });
        }

        if let Some((id, source)) = pending {
            self.navigate_to(id, source);
        }
    }

    fn draw_zoom_controls(&mut self, ui: &mut Ui) {
        let level = self.viewport.zoom_level();
        ui.label(RichText::new("Zoom").strong());

        let mut position = self.viewport.indicator_position();
        let response = ui.add(
            egui::Slider::new(&mut position, 1.0..=5.0)
                .show_value(false)
                .text(format!("×{:.1}", self.viewport.scale)),
        );
        if response.changed() {
            let target = self.viewport.scale_for_indicator(position);
            let center = self.viewport.center();
            self.viewport.zoom_at(center, target);
            self.focus_scan_requested = true;
        }

        ui.horizontal(|ui| {
            for tick in ZoomLevel::ALL {
                let text = RichText::new(tick.number().to_string()).small();
                let text = if tick == level { text.strong() } else { text.weak() };
                ui.label(text).on_hover_text(tick.label());
            }
        });
    }

    fn draw_year_filter(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Proposed before").strong());

        let last = YEAR_PERIODS.len() - 1;
        let mut cutoff = self.year_cutoff.min(last);
        let (name, year) = YEAR_PERIODS[cutoff];
        let label = if name.is_empty() {
            format!("≤ {year}")
        } else {
            name.to_owned()
        };
        let response = ui.add(
            egui::Slider::new(&mut cutoff, 0..=last)
                .show_value(false)
                .text(label),
        );
        if !response.changed() || cutoff == self.year_cutoff {
            return;
        }

        self.year_cutoff = cutoff;
        let focused_hidden = self
            .focus
            .focused()
            .and_then(|id| self.catalog.get(id))
            .is_some_and(|word| !visible_at_cutoff(word.proposed_year, cutoff));
        if focused_hidden {
            self.focus.clear();
            self.process_focus_events();
        }
    }

    fn search_results(&mut self) -> &[WordId] {
        let query = self.search.trim();
        if self
            .search_cache
            .as_ref()
            .is_none_or(|cache| cache.query != query)
        {
            self.search_cache = Some(SearchCache {
                query: query.to_owned(),
                results: self.catalog.search(query, SEARCH_RESULT_LIMIT),
            });
        }

        self.search_cache
            .as_ref()
            .map(|cache| cache.results.as_slice())
            .unwrap_or_default()
    }

    /// A placed, currently visible word other than the focused one.
    fn random_word(&mut self) -> Option<WordId> {
        let focused = self.focus.focused();
        let candidates = self
            .catalog
            .words()
            .iter()
            .filter(|word| Some(word.id) != focused)
            .filter(|word| visible_at_cutoff(word.proposed_year, self.year_cutoff))
            .filter(|word| self.allocation.get(word.id).is_some())
            .map(|word| word.id)
            .collect::<Vec<_>>();
        candidates.choose(&mut self.random).copied()
    }
}
