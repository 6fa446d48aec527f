//! Pointer dragging and color selection
//!
//! `InputController` is a two-state machine, `Idle` and `Dragging`. Pressing the
//! pointer inside one or more bodies grabs all of them. While held, moving the
//! pointer sets each body's velocity to the pointer offset scaled by the drag
//! gain; the integrator does not move held bodies, so the velocity only takes
//! effect on release and the body is thrown.

use log::debug;

use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Palette, System};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Indices into `System::bodies` of every grabbed body
    Dragging(Vec<usize>),
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    pub state: DragState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Grab every body whose disc contains `p`. Overlapping bodies are all grabbed.
    ///
    /// A press while already dragging (a release that never arrived) first
    /// lets go of the previous grab.
    pub fn pointer_down(&mut self, sys: &mut System, p: NVec2) {
        if self.is_dragging() {
            self.pointer_up(sys);
        }

        let held: Vec<usize> = sys
            .bodies()
            .iter()
            .enumerate()
            .filter(|(_, b)| (p - b.x).norm() < b.radius())
            .map(|(i, _)| i)
            .collect();

        if held.is_empty() {
            return;
        }
        for &i in &held {
            sys.bodies_mut()[i].dragging = true;
        }
        debug!("grabbed bodies {held:?} at ({:.1}, {:.1})", p.x, p.y);
        self.state = DragState::Dragging(held);
    }

    /// Spring-like follow: v = (p - x) * gain for every held body
    pub fn pointer_move(&mut self, sys: &mut System, p: NVec2, params: &Parameters) {
        let DragState::Dragging(held) = &self.state else {
            return;
        };
        for &i in held {
            if let Some(b) = sys.bodies_mut().get_mut(i) {
                b.v = (p - b.x) * params.drag_gain;
            }
        }
    }

    /// Release every held body, keeping its last velocity
    pub fn pointer_up(&mut self, sys: &mut System) {
        if let DragState::Dragging(held) = std::mem::take(&mut self.state) {
            for i in held {
                if let Some(b) = sys.bodies_mut().get_mut(i) {
                    b.dragging = false;
                }
            }
        }
    }
}

/// Globally selected color, adopted by every body each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSelector {
    pub selected: Option<Palette>,
}

impl ColorSelector {
    pub fn select(&mut self, color: Palette) {
        self.selected = Some(color);
    }

    pub fn apply(&self, sys: &mut System) {
        if let Some(color) = self.selected {
            for b in sys.bodies_mut() {
                b.set_color(color);
            }
        }
    }
}
