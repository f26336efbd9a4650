use eframe::egui::{Pos2, Vec2, pos2, vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Map columns (time zones) laid across one viewport width at scale 1.
    pub grid_columns: f32,
    /// Scale at which focus engages. Also the maximum scale.
    pub scale_threshold: f32,
    pub zoom_step: f32,
    /// Lower bounds of zoom levels 2, 3 and 4. Level 5 starts at the threshold.
    pub level_breaks: [f32; 3],
    /// Capture radius is `viewport height / capture_divisor`.
    pub capture_divisor: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            grid_columns: 24.0,
            scale_threshold: 11.0,
            zoom_step: 0.28,
            level_breaks: [1.5, 5.0, 10.0],
            capture_divisor: 4.0,
        }
    }
}

impl ViewportConfig {
    /// Moves the focus threshold and rescales the level breaks so every
    /// zoom level keeps its relative share of the scale range.
    pub fn with_scale_threshold(self, threshold: f32) -> Self {
        let default = Self::default();
        let factor = (threshold - 1.0) / (default.scale_threshold - 1.0);
        Self {
            scale_threshold: threshold,
            level_breaks: default
                .level_breaks
                .map(|level_break| 1.0 + (level_break - 1.0) * factor),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ZoomLevel {
    World = 1,
    Continent = 2,
    Region = 3,
    Approach = 4,
    Word = 5,
}

impl ZoomLevel {
    pub const ALL: [Self; 5] = [
        Self::World,
        Self::Continent,
        Self::Region,
        Self::Approach,
        Self::Word,
    ];

    pub fn from_scale(scale: f32, config: &ViewportConfig) -> Self {
        let [continent, region, approach] = config.level_breaks;
        if scale < continent {
            Self::World
        } else if scale < region {
            Self::Continent
        } else if scale < approach {
            Self::Region
        } else if scale < config.scale_threshold {
            Self::Approach
        } else {
            Self::Word
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::World => "World",
            Self::Continent => "Continent",
            Self::Region => "Region",
            Self::Approach => "Approach",
            Self::Word => "Word",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Scale and pan over the world map. Screen coordinates are local to the
/// viewport rectangle, origin at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub scale: f32,
    pub pan: Vec2,
    pub base_width: f32,
    pub base_height: f32,
    pub viewport_size: Vec2,
    pub config: ViewportConfig,
}

impl ViewportState {
    pub fn new(viewport_size: Vec2, config: ViewportConfig) -> Self {
        let mut state = Self {
            scale: 1.0,
            pan: Vec2::ZERO,
            base_width: 0.0,
            base_height: 0.0,
            viewport_size,
            config,
        };
        state.resize(viewport_size);
        state
    }

    /// One map column is `width / grid_columns`; the map is one viewport high.
    pub fn resize(&mut self, viewport_size: Vec2) {
        let viewport_size = viewport_size.max(Vec2::splat(1.0));
        self.viewport_size = viewport_size;
        self.base_width = viewport_size.x / self.config.grid_columns.max(1.0);
        self.base_height = viewport_size.y;
        self.scale = self.clamp_scale(self.scale);
        self.pan = self.clamp_pan(self.pan);
    }

    pub fn max_scale(&self) -> f32 {
        self.config.scale_threshold.max(1.0)
    }

    pub fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(1.0, self.max_scale())
        } else {
            1.0
        }
    }

    pub fn content_size(&self) -> Vec2 {
        vec2(
            self.base_width * self.scale * self.config.grid_columns,
            self.base_height * self.scale,
        )
    }

    fn clamp_axis(value: f32, content: f32, viewport: f32) -> f32 {
        let min_pan = (viewport - content).min(0.0);
        value.clamp(min_pan, 0.0)
    }

    pub fn clamp_pan_x(&self, x: f32) -> f32 {
        Self::clamp_axis(x, self.content_size().x, self.viewport_size.x)
    }

    pub fn clamp_pan_y(&self, y: f32) -> f32 {
        Self::clamp_axis(y, self.content_size().y, self.viewport_size.y)
    }

    pub fn clamp_pan(&self, pan: Vec2) -> Vec2 {
        vec2(self.clamp_pan_x(pan.x), self.clamp_pan_y(pan.y))
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan = self.clamp_pan(self.pan + delta);
    }

    /// Keeps the world point under `screen` fixed while changing scale.
    pub fn zoom_at(&mut self, screen: Pos2, new_scale: f32) {
        let old_scale = self.scale.max(1.0);
        let new_scale = self.clamp_scale(new_scale);
        let factor = new_scale / old_scale;
        let screen = screen.to_vec2();

        self.pan = screen - (screen - self.pan) * factor;
        self.scale = new_scale;
        self.pan = self.clamp_pan(self.pan);
    }

    pub fn center(&self) -> Pos2 {
        (self.viewport_size * 0.5).to_pos2()
    }

    /// Sets `scale` and pans so the map point at `ratio` sits at the
    /// viewport centre, as far as the pan clamp allows.
    pub fn center_on(&mut self, ratio: Vec2, scale: f32) {
        self.scale = self.clamp_scale(scale);
        let content = self.content_size();
        let target = self.center().to_vec2() - vec2(ratio.x * content.x, ratio.y * content.y);
        self.pan = self.clamp_pan(target);
    }

    pub fn world_to_screen(&self, ratio: Vec2) -> Pos2 {
        let content = self.content_size();
        pos2(
            ratio.x * content.x + self.pan.x,
            ratio.y * content.y + self.pan.y,
        )
    }

    #[cfg(test)]
    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        let content = self.content_size();
        vec2(
            (screen.x - self.pan.x) / content.x.max(f32::EPSILON),
            (screen.y - self.pan.y) / content.y.max(f32::EPSILON),
        )
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        ZoomLevel::from_scale(self.scale, &self.config)
    }

    pub fn focus_engaged(&self) -> bool {
        self.scale >= self.config.scale_threshold
    }

    pub fn capture_radius(&self) -> f32 {
        self.viewport_size.y / self.config.capture_divisor.max(1.0)
    }

    /// Target scale for one wheel notch. Levels 4 and 5 jump straight
    /// across the focus boundary instead of interpolating through it.
    pub fn wheel_target_scale(&self, direction: ZoomDirection) -> f32 {
        let delta = match direction {
            ZoomDirection::In => self.config.zoom_step,
            ZoomDirection::Out => -self.config.zoom_step,
        };
        let stepped = self.clamp_scale(self.scale + delta);

        match (self.zoom_level(), direction) {
            (ZoomLevel::Approach | ZoomLevel::Word, ZoomDirection::In) => self.max_scale(),
            (ZoomLevel::Word, ZoomDirection::Out) => {
                self.clamp_scale(self.config.level_breaks[2])
            }
            _ => stepped,
        }
    }

    /// Slider indicator position in `[1, 5]`.
    pub fn indicator_position(&self) -> f32 {
        let span = (self.config.scale_threshold - 1.0).max(f32::EPSILON);
        ((self.scale - 1.0) * 4.0 / span + 1.0).clamp(1.0, 5.0)
    }

    pub fn scale_for_indicator(&self, position: f32) -> f32 {
        let t = ((position - 1.0) / 4.0).clamp(0.0, 1.0);
        self.clamp_scale(1.0 + t * (self.config.scale_threshold - 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport(width: f32, height: f32) -> ViewportState {
        ViewportState::new(vec2(width, height), ViewportConfig::default())
    }

    #[test]
    fn content_fills_viewport_at_scale_one() {
        let view = viewport(1200.0, 800.0);
        assert_eq!(view.content_size(), vec2(1200.0, 800.0));
        assert_eq!(view.clamp_pan_x(-300.0), 0.0);
        assert_eq!(view.clamp_pan_y(50.0), 0.0);
    }

    #[test]
    fn pan_clamp_stops_at_far_edge() {
        let mut view = viewport(1000.0, 800.0);
        view.scale = 3.0;
        assert!((view.clamp_pan_x(-5000.0) + 2000.0).abs() < 1e-2);
        assert!((view.clamp_pan_y(-5000.0) + 1600.0).abs() < 1e-2);
        assert_eq!(view.clamp_pan_x(40.0), 0.0);
        assert_eq!(view.clamp_pan_x(-1234.0), -1234.0);
    }

    #[test]
    fn zoom_to_cursor_scenario() {
        let mut view = viewport(1000.0, 1000.0);
        view.zoom_at(pos2(500.0, 500.0), 2.0);
        assert_eq!(view.scale, 2.0);
        assert_eq!(view.pan, vec2(-500.0, -500.0));
    }

    #[test]
    fn scale_never_drops_below_one() {
        let mut view = viewport(1000.0, 800.0);
        view.scale = 0.0;
        view.zoom_at(pos2(10.0, 10.0), 0.0);
        assert_eq!(view.scale, 1.0);
        assert!(view.pan.x.is_finite() && view.pan.y.is_finite());

        view.zoom_at(pos2(10.0, 10.0), f32::NAN);
        assert_eq!(view.scale, 1.0);
    }

    #[test]
    fn zoom_levels_follow_breaks() {
        let config = ViewportConfig::default();
        assert_eq!(ZoomLevel::from_scale(1.0, &config), ZoomLevel::World);
        assert_eq!(ZoomLevel::from_scale(1.5, &config), ZoomLevel::Continent);
        assert_eq!(ZoomLevel::from_scale(9.99, &config), ZoomLevel::Region);
        assert_eq!(ZoomLevel::from_scale(10.5, &config), ZoomLevel::Approach);
        assert_eq!(ZoomLevel::from_scale(11.0, &config), ZoomLevel::Word);
    }

    #[test]
    fn lower_threshold_keeps_levels_ordered() {
        let config = ViewportConfig::default().with_scale_threshold(6.0);
        assert_eq!(config.level_breaks, [1.25, 3.0, 5.5]);
        assert_eq!(ZoomLevel::from_scale(5.7, &config), ZoomLevel::Approach);
        assert_eq!(ZoomLevel::from_scale(6.0, &config), ZoomLevel::Word);

        let mut view = ViewportState::new(vec2(1000.0, 800.0), config);
        view.scale = 6.0;
        assert_eq!(view.wheel_target_scale(ZoomDirection::Out), 5.5);
    }

    #[test]
    fn wheel_snaps_across_the_focus_boundary() {
        let mut view = viewport(1000.0, 800.0);

        view.scale = 1.0;
        assert!((view.wheel_target_scale(ZoomDirection::In) - 1.28).abs() < 1e-6);
        assert_eq!(view.wheel_target_scale(ZoomDirection::Out), 1.0);

        view.scale = 10.2;
        assert_eq!(view.wheel_target_scale(ZoomDirection::In), 11.0);
        assert!((view.wheel_target_scale(ZoomDirection::Out) - 9.92).abs() < 1e-5);

        view.scale = 11.0;
        assert_eq!(view.wheel_target_scale(ZoomDirection::In), 11.0);
        assert_eq!(view.wheel_target_scale(ZoomDirection::Out), 10.0);
    }

    #[test]
    fn center_on_places_point_at_viewport_center() {
        let mut view = viewport(1000.0, 800.0);
        view.center_on(vec2(0.5, 0.5), 11.0);
        let screen = view.world_to_screen(vec2(0.5, 0.5));
        assert!((screen - view.center()).length() < 1e-2);
        assert!(view.focus_engaged());
    }

    #[test]
    fn center_on_respects_pan_clamp_at_map_edges() {
        let mut view = viewport(1000.0, 800.0);
        view.center_on(vec2(0.0, 0.0), 11.0);
        assert_eq!(view.pan, Vec2::ZERO);
    }

    #[test]
    fn indicator_maps_scale_range_onto_five_ticks() {
        let mut view = viewport(1000.0, 800.0);
        assert_eq!(view.indicator_position(), 1.0);
        view.scale = 11.0;
        assert_eq!(view.indicator_position(), 5.0);
        view.scale = 6.0;
        assert_eq!(view.indicator_position(), 3.0);
        assert_eq!(view.scale_for_indicator(3.0), 6.0);
    }

    #[test]
    fn resize_keeps_pan_inside_new_bounds() {
        let mut view = viewport(1000.0, 800.0);
        view.scale = 2.0;
        view.pan = vec2(-1000.0, -800.0);
        view.resize(vec2(1600.0, 800.0));
        assert_eq!(view.pan.x, view.clamp_pan_x(view.pan.x));
        assert!(view.pan.x >= -(view.content_size().x - 1600.0));
    }

    proptest! {
        #[test]
        fn pan_clamp_is_idempotent(
            scale in 1.0f32..11.0,
            x in -1.0e6f32..1.0e6,
            y in -1.0e6f32..1.0e6,
        ) {
            let mut view = viewport(1280.0, 720.0);
            view.scale = scale;
            let once_x = view.clamp_pan_x(x);
            let once_y = view.clamp_pan_y(y);
            prop_assert_eq!(view.clamp_pan_x(once_x), once_x);
            prop_assert_eq!(view.clamp_pan_y(once_y), once_y);
        }

        #[test]
        fn zoom_in_keeps_cursor_point_fixed(
            scale in 1.0f32..6.0,
            factor in 1.0f32..1.8,
            pan_t in 0.0f32..1.0,
            sx in 0.0f32..1280.0,
            sy in 0.0f32..720.0,
        ) {
            let mut view = viewport(1280.0, 720.0);
            view.scale = scale;
            let content = view.content_size();
            view.pan = vec2(
                -(content.x - 1280.0) * pan_t,
                -(content.y - 720.0) * pan_t,
            );

            let cursor = pos2(sx, sy);
            let world = view.screen_to_world(cursor);
            view.zoom_at(cursor, scale * factor);
            let back = view.world_to_screen(world);

            prop_assert!((back.x - cursor.x).abs() < 0.05, "x drift {}", back.x - cursor.x);
            prop_assert!((back.y - cursor.y).abs() < 0.05, "y drift {}", back.y - cursor.y);
        }
    }
}
