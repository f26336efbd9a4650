use eframe::egui::Pos2;

use crate::content::WordId;

mod interaction;
mod view;

pub(in crate::app) use self::interaction::NavigationSource;

/// A placed, year-visible word projected into the current frame.
#[derive(Clone, Copy, Debug)]
struct ProjectedWord {
    id: WordId,
    /// Viewport-local position, origin at the universe rect's top-left.
    local: Pos2,
    period: usize,
}
