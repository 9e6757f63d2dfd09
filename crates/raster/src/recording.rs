//! A draw target that records the calls it receives.

use crate::math::DevicePoint;
use crate::target::{DrawTarget, FillRule, PolygonRegion};

/// A call received by a [`Recorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    FillPolygon {
        points: Vec<DevicePoint>,
        fill_rule: FillRule,
    },
    DrawPolyline {
        points: Vec<DevicePoint>,
    },
    FillRegion {
        region: PolygonRegion,
    },
    SetClipRegion {
        region: PolygonRegion,
    },
    PushClip,
    PopClip,
}

/// A [`DrawTarget`] that does not draw anything but keeps the list of calls it
/// received.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder {
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl DrawTarget for Recorder {
    type Region = PolygonRegion;

    fn fill_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            fill_rule,
        });
    }

    fn draw_polyline(&mut self, points: &[DevicePoint]) {
        self.commands.push(DrawCommand::DrawPolyline {
            points: points.to_vec(),
        });
    }

    fn fill_region(&mut self, region: &PolygonRegion) {
        self.commands.push(DrawCommand::FillRegion {
            region: region.clone(),
        });
    }

    fn set_clip_region(&mut self, region: &PolygonRegion) {
        self.commands.push(DrawCommand::SetClipRegion {
            region: region.clone(),
        });
    }

    fn push_clip(&mut self) {
        self.commands.push(DrawCommand::PushClip);
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }
}

#[test]
fn records_in_order() {
    use crate::math::point;

    let mut recorder = Recorder::new();
    recorder.push_clip();
    recorder.draw_polyline(&[point(0, 0), point(4, 4)]);
    recorder.pop_clip();

    assert_eq!(
        recorder.commands(),
        &[
            DrawCommand::PushClip,
            DrawCommand::DrawPolyline {
                points: vec![point(0, 0), point(4, 4)]
            },
            DrawCommand::PopClip,
        ]
    );

    recorder.clear();
    assert!(recorder.is_empty());
}
