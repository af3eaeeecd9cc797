//! Scatter Chart Model
//! Labeled points per projection, the live chart registry and the 3D orbit view.

use crate::data::ResultSet;
use std::collections::HashMap;
use std::ops::Range;

/// One of the three projection charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    OneD,
    TwoD,
    ThreeD,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::OneD, ChartKind::TwoD, ChartKind::ThreeD];

    /// Identifier used by download actions and file names.
    pub fn id(self) -> &'static str {
        match self {
            ChartKind::OneD => "1d",
            ChartKind::TwoD => "2d",
            ChartKind::ThreeD => "3d",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::OneD => "1D Projection",
            ChartKind::TwoD => "2D Projection",
            ChartKind::ThreeD => "3D Projection",
        }
    }

    pub fn image_file_name(self) -> String {
        format!("chart-{}.png", self.id())
    }
}

/// A point in chart space with the text it came from.
///
/// Unused trailing coordinates are zero: 1D is `[x, 0, 0]`, 2D is `[x, y, 0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub position: [f64; 3],
    pub label: String,
}

/// A rendered scatter chart: one labeled point per input line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ScatterChart {
    /// Pair each projected coordinate with its source text by position.
    pub fn from_result_set(kind: ChartKind, result: &ResultSet) -> Self {
        let positions: Vec<[f64; 3]> = match kind {
            ChartKind::OneD => result.one_d().iter().map(|p| [p[0], 0.0, 0.0]).collect(),
            ChartKind::TwoD => result.two_d().iter().map(|p| [p[0], p[1], 0.0]).collect(),
            ChartKind::ThreeD => result.three_d().to_vec(),
        };

        let points = positions
            .into_iter()
            .zip(result.texts())
            .map(|(position, text)| ChartPoint {
                position,
                label: text.clone(),
            })
            .collect();

        Self { kind, points }
    }

    /// Padded value range along one axis.
    pub fn axis_range(&self, axis: usize) -> Range<f64> {
        padded_range(self.points.iter().map(|p| p.position[axis]))
    }

    /// Mean position, used as the orbit pivot.
    pub fn centroid(&self) -> [f64; 3] {
        if self.points.is_empty() {
            return [0.0; 3];
        }
        let n = self.points.len() as f64;
        let mut sum = [0.0; 3];
        for p in &self.points {
            for (acc, v) in sum.iter_mut().zip(p.position) {
                *acc += v;
            }
        }
        sum.map(|v| v / n)
    }
}

/// One projected axis guide, drawn from the minimum corner of the data box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGuide {
    pub name: &'static str,
    pub from: [f64; 2],
    pub to: [f64; 2],
}

/// Screen-plane geometry of the 3D chart for one camera position.
///
/// Shared by the interactive view and the PNG export so both show the same picture.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLayout {
    pub guides: [AxisGuide; 3],
    /// Projected point positions, index-aligned with `ScatterChart::points`
    pub points: Vec<[f64; 2]>,
}

impl OrbitLayout {
    /// Padded extent of everything drawn, as (horizontal, vertical) ranges.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let coords = || {
            self.points
                .iter()
                .copied()
                .chain(self.guides.iter().flat_map(|g| [g.from, g.to]))
        };
        (
            padded_range(coords().map(|p| p[0])),
            padded_range(coords().map(|p| p[1])),
        )
    }
}

impl ScatterChart {
    /// Project points and axis guides through `view`, pivoting on the centroid.
    pub fn orbit_layout(&self, view: &OrbitView) -> OrbitLayout {
        let pivot = self.centroid();
        let ranges = [self.axis_range(0), self.axis_range(1), self.axis_range(2)];
        let origin = [ranges[0].start, ranges[1].start, ranges[2].start];

        let guides = [("X", 0), ("Y", 1), ("Z", 2)].map(|(name, axis)| {
            let mut end = origin;
            end[axis] = ranges[axis].end;
            AxisGuide {
                name,
                from: view.project(origin, pivot),
                to: view.project(end, pivot),
            }
        });

        let points = self
            .points
            .iter()
            .map(|p| view.project(p.position, pivot))
            .collect();

        OrbitLayout { guides, points }
    }
}

/// Range covering all values with 10% padding; degenerate inputs get a unit span.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return -1.0..1.0;
    }
    let span = max - min;
    let pad = if span == 0.0 {
        (min.abs() * 0.1).max(0.5)
    } else {
        span * 0.1
    };
    (min - pad)..(max + pad)
}

/// Live chart instances keyed by kind. Replaced wholesale on each analysis.
#[derive(Debug, Clone, Default)]
pub struct ChartSet {
    charts: HashMap<ChartKind, ScatterChart>,
}

impl ChartSet {
    pub fn from_result_set(result: &ResultSet) -> Self {
        let charts = ChartKind::ALL
            .into_iter()
            .map(|kind| (kind, ScatterChart::from_result_set(kind, result)))
            .collect();
        Self { charts }
    }

    pub fn get(&self, kind: ChartKind) -> Option<&ScatterChart> {
        self.charts.get(&kind)
    }

    /// Look up a chart by its identifier (`1d`, `2d`, `3d`).
    pub fn find(&self, id: &str) -> Option<&ScatterChart> {
        ChartKind::from_id(id).and_then(|kind| self.get(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Orthographic camera orbiting the 3D chart. Z is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitView {
    /// Rotation about the vertical axis, radians
    pub yaw: f64,
    /// Elevation above the XY plane, radians
    pub pitch: f64,
}

impl Default for OrbitView {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.35,
        }
    }
}

impl OrbitView {
    pub const MAX_PITCH: f64 = std::f64::consts::FRAC_PI_2;

    /// Rotate by a drag delta (radians), keeping pitch within [-90°, 90°].
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f64::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    /// Project a point relative to `pivot` onto the screen plane.
    pub fn project(&self, point: [f64; 3], pivot: [f64; 3]) -> [f64; 2] {
        let [x, y, z] = [
            point[0] - pivot[0],
            point[1] - pivot[1],
            point[2] - pivot[2],
        ];
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        let right = x * cos_yaw - y * sin_yaw;
        let forward = x * sin_yaw + y * cos_yaw;
        let up = z * cos_pitch - forward * sin_pitch;
        [right, up]
    }
}
