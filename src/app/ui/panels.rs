use eframe::egui::{self, Align, Context, Layout, vec2};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::UniverseConfig;
use crate::content::YEAR_PERIODS;
use crate::util::{format_word_number, mix64};

use super::super::analytics::ViewDurationTracker;
use super::super::focus::FocusResolver;
use super::super::relations::RelationRenderer;
use super::super::viewport::ViewportState;
use super::super::{LoadedUniverse, ViewModel};

/// Reports once when a side panel's slide animation comes to rest.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::app) struct PanelTransition {
    last_progress: Option<f32>,
    in_flight: bool,
}

impl PanelTransition {
    /// Feeds this frame's animation progress in `[0, 1]`. Returns `true` on
    /// the frame the panel settles after moving.
    pub(in crate::app) fn update(&mut self, progress: f32) -> bool {
        let settled = progress <= 0.0 || progress >= 1.0;
        let jumped = self
            .last_progress
            .is_some_and(|last| (last - progress).abs() > f32::EPSILON);
        self.last_progress = Some(progress);

        if !settled {
            self.in_flight = true;
            return false;
        }

        let finished = self.in_flight || jumped;
        self.in_flight = false;
        finished
    }
}

impl ViewModel {
    pub(in crate::app) fn new(config: UniverseConfig, loaded: LoadedUniverse) -> Self {
        let viewport = ViewportState::new(vec2(1280.0, 800.0), config.viewport);
        let relations = RelationRenderer::new(config.relations);
        let random = SmallRng::seed_from_u64(mix64(config.layout_seed));

        Self {
            catalog: loaded.catalog,
            allocation: loaded.allocation,
            language: Default::default(),
            viewport,
            focus: FocusResolver::default(),
            relations,
            relation_targets: Vec::new(),
            hovered_relation: None,
            view_tracker: ViewDurationTracker::default(),
            last_view: None,
            search: String::new(),
            search_cache: None,
            year_cutoff: YEAR_PERIODS.len() - 1,
            show_details: true,
            details_transition: PanelTransition::default(),
            focus_scan_requested: false,
            random,
            config,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Word Universe");
                    ui.separator();
                    ui.label(format!("words: {}", self.catalog.len()));
                    ui.label(format!("placed: {}", self.allocation.len()));
                    if !self.allocation.dropped.is_empty() {
                        ui.label(format!("unplaced: {}", self.allocation.dropped.len()));
                    }
                    if let Some(word) = self.focus.focused().and_then(|id| self.catalog.get(id)) {
                        ui.separator();
                        ui.label(format!(
                            "{}  {}",
                            format_word_number(word.id),
                            word.label(self.language)
                        ));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(self.language.toggled().label()).clicked() {
                            self.language = self.language.toggled();
                            self.search_cache = None;
                        }
                        ui.toggle_value(&mut self.show_details, "Details");
                        let level = self.viewport.zoom_level();
                        ui.label(format!("level {} · {}", level.number(), level.label()));
                        if let Some(view) = self.last_view {
                            ui.separator();
                            ui.label(
                                egui::RichText::new(format!(
                                    "last view {} {:.1}s ({})",
                                    format_word_number(view.word_id),
                                    view.duration.as_secs_f32(),
                                    view.reason.as_str()
                                ))
                                .weak(),
                            );
                        }
                    });
                });
            });

        egui::SidePanel::left("navigation")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        let details_open = self.show_details && self.focus.focused().is_some();
        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show_animated(ctx, details_open, |ui| self.draw_details(ui));
        let progress = ctx.animate_bool(egui::Id::new("details-panel-transition"), details_open);
        let panel_settled = self.details_transition.update(progress);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_universe(ui));

        if panel_settled {
            self.recenter_focused();
            ctx.request_repaint();
        } else if progress > 0.0 && progress < 1.0 {
            ctx.request_repaint();
        }
    }
}
