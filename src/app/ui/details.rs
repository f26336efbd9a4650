use eframe::egui::{self, RichText, Ui};

use crate::content::Language;
use crate::util::format_word_number;

use super::super::ViewModel;
use super::super::universe::NavigationSource;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Word Details");
        ui.add_space(6.0);

        let Some(focused_id) = self.focus.focused() else {
            ui.label("Zoom in on a word or pick one from search.");
            return;
        };

        let Some(word) = self.catalog.get(focused_id) else {
            ui.label("Focused word no longer exists in the catalog.");
            return;
        };
        let language = self.language;
        let mut pending = None;

        ui.label(RichText::new(format!("No. {}", format_word_number(word.id))).weak());
        ui.label(RichText::new(word.label(language)).size(24.0).strong());
        if let Some(other) = word.term.get(language.toggled())
            && other != word.label(language)
        {
            ui.label(other);
        }
        if let Some(original) = &word.term_original {
            ui.label(RichText::new(original).italics());
        }
        ui.add_space(6.0);

        egui::Grid::new("word_facts")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Proposed");
                ui.label(
                    word.proposed_year
                        .map(|year| year.to_string())
                        .unwrap_or_else(|| "unknown".to_owned()),
                );
                ui.end_row();

                ui.label("Country");
                ui.label(if word.country_code.is_empty() {
                    "unknown"
                } else {
                    word.country_code.as_str()
                });
                ui.end_row();

                if let Some(placement) = self.allocation.get(word.id) {
                    ui.label("Position");
                    ui.label(format!(
                        "{:.1}°, {:.1}°",
                        placement.latitude, placement.longitude
                    ));
                    ui.end_row();
                }
            });

        if !word.proposers.is_empty() {
            ui.separator();
            ui.label(RichText::new("Proposers").strong());
            for proposer in &word.proposers {
                let name = proposer
                    .name
                    .get(language)
                    .or(proposer.original_name.as_deref())
                    .unwrap_or("?");
                match proposer.original_name.as_deref() {
                    Some(original) if original != name => {
                        ui.label(format!("{name} ({original})"));
                    }
                    _ => {
                        ui.label(name);
                    }
                }
            }
        }

        if let Some(definition) = word.brief_definition.get(language) {
            ui.separator();
            ui.label(RichText::new(definition_heading(language)).strong());
            ui.label(definition);
        }

        ui.separator();
        ui.label(RichText::new("Related words").strong());
        if self.relation_targets.is_empty() {
            ui.label("No related words.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("related_words_scroll")
                .max_height(320.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for target in &self.relation_targets {
                        let Some(related) = self.catalog.get(target.id) else {
                            continue;
                        };
                        let label = format!("{}  {}", target.kind.label(), related.label(language));
                        let placed = self.allocation.get(target.id).is_some();
                        let response = ui.add_enabled(placed, egui::Link::new(label));
                        if response.clicked() {
                            pending = Some(target.id);
                        }
                    }
                });
        }

        if let Some(id) = pending {
            self.navigate_to(id, NavigationSource::DetailLink);
        }
    }
}

fn definition_heading(language: Language) -> &'static str {
    match language {
        Language::Zh => "简介",
        Language::En => "Brief definition",
    }
}
