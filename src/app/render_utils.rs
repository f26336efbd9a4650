use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, vec2};

use super::viewport::ViewportState;

const PERIOD_COLORS: [Color32; 6] = [
    Color32::from_rgb(142, 124, 195),
    Color32::from_rgb(98, 160, 234),
    Color32::from_rgb(87, 196, 173),
    Color32::from_rgb(176, 214, 98),
    Color32::from_rgb(246, 196, 84),
    Color32::from_rgb(240, 128, 96),
];

pub(super) const LINE_COLOR: Color32 = Color32::from_rgb(255, 252, 244);
pub(super) const LINE_HOVER_COLOR: Color32 = Color32::from_rgb(255, 225, 53);

/// Latitudes of the equator and both tropics.
const REFERENCE_LATITUDES: [f32; 3] = [23.5, 0.0, -23.5];

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

pub(super) fn period_color(period: usize) -> Color32 {
    PERIOD_COLORS[period.min(PERIOD_COLORS.len() - 1)]
}

/// Time-zone columns labelled `-11..=+12` plus the equator and tropics,
/// drawn under the current transform.
pub(super) fn draw_map_background(painter: &Painter, rect: Rect, viewport: &ViewportState) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(12, 14, 22));

    let columns = viewport.config.grid_columns.max(1.0) as usize;
    let content = viewport.content_size();
    let column_width = content.x / columns as f32;
    let label_font = FontId::proportional((10.0 + viewport.scale).min(16.0));
    let column_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(70, 80, 104, 60));

    for column in 0..=columns {
        let x = rect.left() + viewport.pan.x + column as f32 * column_width;
        if x < rect.left() - column_width || x > rect.right() + column_width {
            continue;
        }

        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            column_stroke,
        );

        if column < columns {
            let offset = column as i32 - 11;
            let label = if offset > 0 {
                format!("+{offset}")
            } else {
                offset.to_string()
            };
            painter.text(
                Pos2::new(x + column_width * 0.5, rect.top() + 8.0),
                Align2::CENTER_TOP,
                label,
                label_font.clone(),
                Color32::from_rgba_unmultiplied(150, 160, 184, 120),
            );
        }
    }

    for latitude in REFERENCE_LATITUDES {
        let ratio = (90.0 - latitude) / 180.0;
        let y = rect.top() + viewport.pan.y + ratio * content.y;
        if y < rect.top() || y > rect.bottom() {
            continue;
        }

        let stroke = if latitude == 0.0 {
            Stroke::new(1.2, Color32::from_rgba_unmultiplied(120, 132, 160, 90))
        } else {
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(120, 132, 160, 50))
        };
        painter.add(eframe::egui::Shape::dashed_line(
            &[Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
            6.0,
            6.0,
        ));
    }

    painter.text(
        rect.left_bottom() + vec2(10.0, -10.0),
        Align2::LEFT_BOTTOM,
        format!("{} ×{:.2}", viewport.zoom_level().label(), viewport.scale),
        FontId::proportional(12.0),
        Color32::from_gray(170),
    );
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}
