use crate::aspects::AspectMatch;
use crate::layout::LocatedPoint;

/// Which wheel a set of points belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartLayer {
    Radix,
    Transit,
}

/// Drawing surface the engine hands its results to.
///
/// Implementations own every shape primitive; the engine only decides where
/// things go.
pub trait ChartRenderer {
    /// Bodies at their display positions. Called once per static render and
    /// once per animation frame.
    fn draw_points(&mut self, layer: ChartLayer, points: &[LocatedPoint]);

    /// Aspects sorted most exact first
    fn draw_aspects(&mut self, aspects: &[AspectMatch]);

    /// Rotate the cusp wheel by an accumulated, unwrapped angle
    fn rotate_cusps(&mut self, rotation: f64);

    /// Drop any rotation and draw the cusp wheel at an absolute angle
    fn snap_cusps(&mut self, angle: f64);
}

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Points(ChartLayer, Vec<LocatedPoint>),
    Aspects(Vec<AspectMatch>),
    RotateCusps(f64),
    SnapCusps(f64),
}

/// Renderer that keeps every call, for hosts that draw later and for tests
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points from the most recent `draw_points` call
    pub fn last_points(&self) -> Option<&[LocatedPoint]> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Points(_, points) => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn point_frames(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Points(..)))
            .count()
    }

    pub fn rotations(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::RotateCusps(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn draw_points(&mut self, layer: ChartLayer, points: &[LocatedPoint]) {
        self.calls.push(RenderCall::Points(layer, points.to_vec()));
    }

    fn draw_aspects(&mut self, aspects: &[AspectMatch]) {
        self.calls.push(RenderCall::Aspects(aspects.to_vec()));
    }

    fn rotate_cusps(&mut self, rotation: f64) {
        self.calls.push(RenderCall::RotateCusps(rotation));
    }

    fn snap_cusps(&mut self, angle: f64) {
        self.calls.push(RenderCall::SnapCusps(angle));
    }
}
