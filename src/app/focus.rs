use eframe::egui::Pos2;

use crate::content::WordId;

use super::viewport::ViewportState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused(WordId),
}

impl FocusState {
    pub fn word_id(self) -> Option<WordId> {
        match self {
            Self::Unfocused => None,
            Self::Focused(id) => Some(id),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusEvent {
    Entered(WordId),
    Exited(WordId),
}

/// Screen-space position of a rendered node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeProjection {
    pub id: WordId,
    pub screen: Pos2,
}

/// Nearest projection to `center` strictly inside `capture_radius`.
/// Ties keep the earlier projection.
pub fn nearest_to_center(
    center: Pos2,
    projections: &[NodeProjection],
    capture_radius: f32,
) -> Option<NodeProjection> {
    let mut best: Option<(NodeProjection, f32)> = None;
    for projection in projections {
        let distance = projection.screen.distance(center);
        if distance >= capture_radius {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((*projection, distance));
        }
    }
    best.map(|(projection, _)| projection)
}

/// Single-focus state machine. A change of focus is always reported as
/// `Exited(old)` followed by `Entered(new)`.
#[derive(Debug, Default)]
pub struct FocusResolver {
    state: FocusState,
    events: Vec<FocusEvent>,
}

impl FocusResolver {
    pub fn focused(&self) -> Option<WordId> {
        self.state.word_id()
    }

    /// Explicit navigation. Returns `false` when `id` is already focused.
    pub fn navigate(&mut self, id: WordId) -> bool {
        if self.state == FocusState::Focused(id) {
            return false;
        }
        self.clear();
        self.state = FocusState::Focused(id);
        self.events.push(FocusEvent::Entered(id));
        true
    }

    pub fn clear(&mut self) {
        if let FocusState::Focused(previous) = self.state {
            self.state = FocusState::Unfocused;
            self.events.push(FocusEvent::Exited(previous));
        }
    }

    /// Re-evaluates focus after the view settles. Below the scale threshold
    /// focus is released. Above it, the node nearest the viewport centre
    /// within the capture radius takes focus. Returns the newly entered id.
    ///
    /// With nothing inside the radius the current focus is kept, so a
    /// focused word panned off-centre stays focused until the scale drops
    /// below the threshold or another word is captured or navigated to.
    pub fn resolve(
        &mut self,
        viewport: &ViewportState,
        projections: &[NodeProjection],
    ) -> Option<WordId> {
        if !viewport.focus_engaged() {
            self.clear();
            return None;
        }

        let nearest = nearest_to_center(viewport.center(), projections, viewport.capture_radius())?;
        self.navigate(nearest.id).then_some(nearest.id)
    }

    pub fn drain_events(&mut self) -> Vec<FocusEvent> {
        std::mem::take(&mut self.events)
    }
}
