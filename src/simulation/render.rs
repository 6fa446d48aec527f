//! Render sink contract
//!
//! Anything that can fill a circle given center, radius and color can draw the
//! simulation. `render` only reads the system.

use crate::simulation::states::{NVec2, Palette, System};

pub trait RenderSink {
    fn fill_circle(&mut self, center: NVec2, radius: f64, color: Palette);
}

/// One recorded fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCommand {
    pub center: NVec2,
    pub radius: f64,
    pub color: Palette,
}

/// Sink that records fills for a later consumer (the Bevy viewer, tests)
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<CircleCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSink for DrawList {
    fn fill_circle(&mut self, center: NVec2, radius: f64, color: Palette) {
        self.commands.push(CircleCommand { center, radius, color });
    }
}

/// Draw every body once, in index order
pub fn render(sys: &System, sink: &mut impl RenderSink) {
    for b in sys.bodies() {
        sink.fill_circle(b.x, b.radius(), b.color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::Parameters;
    use crate::simulation::states::Body;

    #[test]
    fn one_fill_per_body_in_order() {
        let p = Parameters::default();
        let sys = System::new(vec![
            Body::new(NVec2::new(50.0, 60.0), NVec2::zeros(), 12.0, Palette::Yellow, &p).unwrap(),
            Body::new(NVec2::new(300.0, 90.0), NVec2::zeros(), 25.0, Palette::Purple, &p).unwrap(),
        ]);
        let mut list = DrawList::default();
        render(&sys, &mut list);
        assert_eq!(list.commands.len(), 2);
        assert_eq!(list.commands[0].center, NVec2::new(50.0, 60.0));
        assert_eq!(list.commands[1].radius, 25.0);
        assert_eq!(list.commands[1].color, Palette::Purple);
    }
}
