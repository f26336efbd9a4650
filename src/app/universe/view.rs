use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, vec2};

use crate::content::{WordId, visible_at_cutoff};

use super::super::ViewModel;
use super::super::focus::NodeProjection;
use super::super::relations::{RelationKind, RelationLine};
use super::super::render_utils::{
    LINE_COLOR, LINE_HOVER_COLOR, blend_color, circle_visible, draw_map_background, edge_visible,
    period_color, with_opacity,
};
use super::super::viewport::ZoomLevel;
use super::{NavigationSource, ProjectedWord};

const DIMMED_OPACITY: f32 = 0.2;
const LINE_HIT_DISTANCE: f32 = 7.5;

impl ViewModel {
    fn project_words(&self) -> Vec<ProjectedWord> {
        self.catalog
            .words()
            .iter()
            .filter(|word| visible_at_cutoff(word.proposed_year, self.year_cutoff))
            .filter_map(|word| {
                let placement = self.allocation.get(word.id)?;
                Some(ProjectedWord {
                    id: word.id,
                    local: self.viewport.world_to_screen(placement.cell.ratio()),
                    period: word.year_period(),
                })
            })
            .collect()
    }

    fn node_radius(&self) -> f32 {
        (2.5 + self.viewport.scale * 0.8).clamp(3.0, 12.0)
    }

    pub(in crate::app) fn draw_universe(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        if (rect.size() - self.viewport.viewport_size).length_sq() > 0.25 {
            self.viewport.resize(rect.size());
        }
        let painter = ui.painter_at(rect);

        let zoomed = self.handle_universe_zoom(ui, rect, &response);
        let drag_ended = self.handle_universe_pan(&response);

        let scan_requested = std::mem::take(&mut self.focus_scan_requested);
        let mut words = self.project_words();
        if zoomed || drag_ended || scan_requested {
            let projections = words
                .iter()
                .map(|word| NodeProjection {
                    id: word.id,
                    screen: word.local,
                })
                .collect::<Vec<_>>();
            if self.rescan_focus(&projections) {
                words = self.project_words();
            }
        }

        if response.dragged() {
            ui.ctx().request_repaint();
        }

        draw_map_background(&painter, rect, &self.viewport);

        let screen_by_id = words
            .iter()
            .map(|word| (word.id, rect.min + word.local.to_vec2()))
            .collect::<HashMap<WordId, Pos2>>();
        let focused = self.focus.focused();
        let lines = match focused {
            Some(id) => self
                .relations
                .layout(id, &self.relation_targets, |target| {
                    screen_by_id.get(&target).copied()
                }),
            None => Vec::new(),
        };

        let radius = self.node_radius();
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer));
        let hovered_word = pointer.and_then(|pointer| {
            words
                .iter()
                .filter_map(|word| {
                    let distance = screen_by_id.get(&word.id)?.distance(pointer);
                    (distance <= radius + 4.0).then_some((word.id, distance))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(id, _)| id)
        });
        let hovered_line = match (pointer, hovered_word) {
            (Some(pointer), None) => lines
                .iter()
                .find(|line| line.path.distance_to(pointer) <= LINE_HIT_DISTANCE),
            _ => None,
        };
        self.hovered_relation = hovered_line.map(|line| (line.target, line.kind));

        for line in &lines {
            if !edge_visible(rect, line.start, line.end, 40.0) {
                continue;
            }
            let hovered = self.hovered_relation == Some((line.target, line.kind));
            Self::draw_relation_line(&painter, line, hovered);
        }

        let show_labels = self.viewport.zoom_level() >= ZoomLevel::Region;
        let mut focus_animating = false;
        for word in &words {
            let position = rect.min + word.local.to_vec2();
            if !circle_visible(rect, position, radius + 120.0) {
                continue;
            }

            let is_focused = focused == Some(word.id);
            let is_hovered = hovered_word == Some(word.id);
            let opacity = if focused.is_some() && !is_focused {
                DIMMED_OPACITY
            } else {
                1.0
            };

            let mut color = period_color(word.period);
            if is_hovered {
                color = blend_color(color, Color32::WHITE, 0.35);
            }

            let focus_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("word-focus", word.id)),
                is_focused,
            );
            if focus_mix > 0.0 && focus_mix < 1.0 {
                focus_animating = true;
            }

            let node_radius = radius * (1.0 + focus_mix * 0.6);
            painter.circle_filled(position, node_radius, with_opacity(color, opacity));
            if focus_mix > 0.0 {
                painter.circle_stroke(
                    position,
                    node_radius + 3.0 + (1.0 - focus_mix) * 6.0,
                    Stroke::new(1.5, with_opacity(LINE_HOVER_COLOR, focus_mix)),
                );
            }

            if show_labels || is_focused || is_hovered {
                let Some(record) = self.catalog.get(word.id) else {
                    continue;
                };
                let font_size = if is_focused { 20.0 } else { 12.0 };
                painter.text(
                    position + vec2(node_radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    record.label(self.language),
                    FontId::proportional(font_size),
                    with_opacity(Color32::from_gray(236), opacity),
                );
            }
        }

        if focus_animating {
            ui.ctx().request_repaint();
        }

        if hovered_word.is_some() || hovered_line.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let response = match hovered_line.and_then(|line| {
            self.catalog
                .get(line.target)
                .map(|target| format!("{}: {}", line.kind.label(), target.label(self.language)))
        }) {
            Some(text) => response.on_hover_text_at_pointer(text),
            None => response,
        };

        if response.clicked_by(egui::PointerButton::Primary) {
            if let Some(id) = hovered_word {
                self.navigate_to(id, NavigationSource::NodeClick);
            } else if let Some((target, _)) = self.hovered_relation {
                self.navigate_to(target, NavigationSource::RelationLine);
            }
        }
    }

    fn draw_relation_line(painter: &egui::Painter, line: &RelationLine, hovered: bool) {
        let (width, dashed) = match line.kind {
            RelationKind::ConceptRelated => (1.8, true),
            RelationKind::CoProposer => (1.4, false),
        };

        if hovered {
            let points = line.straight_path().flatten();
            painter.add(Shape::line(
                points,
                Stroke::new(width * 1.8, LINE_HOVER_COLOR),
            ));
            return;
        }

        let points = line.path.flatten();
        let stroke = Stroke::new(width, LINE_COLOR);
        if dashed {
            painter.extend(Shape::dashed_line(&points, stroke, 6.0, 5.0));
        } else {
            painter.add(Shape::line(points, stroke));
        }
    }
}
