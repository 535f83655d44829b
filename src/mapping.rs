use itertools::Itertools;

use crate::{
    editor::Point,
    error::{InvalidInput, RowError},
};

pub const DEFAULT_SCALE_MAX: f64 = 150.0;
/// Upper bound on ticks per axis, finer steps are refused.
pub const MAX_TICKS: f64 = 200.0;

/// Which logical coordinates a point may take.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum DomainPolicy {
    /// `[0, scale_max]` on both axes, scaled onto the plotting area.
    Bounded {
        #[serde(default = "default_scale_max")]
        scale_max: f64,
    },
    /// One logical unit per pixel, measured from the plot origin, no bounds.
    Unbounded,
}

fn default_scale_max() -> f64 {
    DEFAULT_SCALE_MAX
}

impl Default for DomainPolicy {
    fn default() -> Self {
        DomainPolicy::Bounded {
            scale_max: DEFAULT_SCALE_MAX,
        }
    }
}

impl DomainPolicy {
    /// `false` for a bounded policy whose `scale_max` is not a positive finite number.
    pub fn is_valid(&self) -> bool {
        match self {
            DomainPolicy::Bounded { scale_max } => *scale_max > 0.0 && scale_max.is_finite(),
            DomainPolicy::Unbounded => true,
        }
    }

    pub fn default_tick_step(&self) -> f64 {
        match self {
            DomainPolicy::Bounded { .. } => 25.0,
            DomainPolicy::Unbounded => 100.0,
        }
    }
}

/// Maps between canvas pixels (origin top left, y down) and logical
/// coordinates (origin at the bottom left corner of the plotting area, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: f64,
    height: f64,
    margin: f64,
    policy: DomainPolicy,
    tick_step: f64,
    hover_tolerance: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(800.0, 600.0, 40.0, DomainPolicy::default())
    }
}

impl CoordinateMapper {
    /// An invalid `policy` is replaced by the default one.
    pub fn new(width: f64, height: f64, margin: f64, policy: DomainPolicy) -> Self {
        let policy = if policy.is_valid() {
            policy
        } else {
            DomainPolicy::default()
        };
        // keep at least one pixel of plotting area so the scale stays finite
        let margin = margin.max(0.0).min((width.min(height) - 1.0) / 2.0).max(0.0);
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            margin,
            policy,
            tick_step: policy.default_tick_step(),
            hover_tolerance: 7.0,
        }
    }

    /// Keeps the current step when `tick_step` would exceed [`MAX_TICKS`].
    pub fn with_tick_step(mut self, tick_step: f64) -> Self {
        if self.accepts_tick_step(tick_step) {
            self.tick_step = tick_step;
        }
        self
    }

    pub fn accepts_tick_step(&self, tick_step: f64) -> bool {
        let (ex, ey) = self.extent();
        tick_step > 0.0 && tick_step.is_finite() && ex.max(ey) / tick_step <= MAX_TICKS
    }

    pub fn tick_step(&self) -> f64 {
        self.tick_step
    }

    pub fn with_hover_tolerance(mut self, hover_tolerance: f64) -> Self {
        self.hover_tolerance = hover_tolerance.max(0.0);
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn policy(&self) -> DomainPolicy {
        self.policy
    }

    fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    /// Largest logical value shown on each axis.
    pub fn extent(&self) -> (f64, f64) {
        match self.policy {
            DomainPolicy::Bounded { scale_max } => (scale_max, scale_max),
            DomainPolicy::Unbounded => (self.plot_width(), self.plot_height()),
        }
    }

    // multiply before dividing so the domain corners map exactly
    fn raw_logical(&self, px: f64, py: f64) -> Point {
        let (ex, ey) = self.extent();
        Point::new(
            (px - self.margin) * ex / self.plot_width(),
            (self.height - self.margin - py) * ey / self.plot_height(),
        )
    }

    /// Pixel to logical coordinates, rejecting positions outside the domain.
    pub fn to_logical(&self, px: f64, py: f64) -> Result<Point, InvalidInput> {
        let point = self.raw_logical(px, py);
        self.validate(point)
    }

    /// Like [`Self::to_logical`] but rounds to whole logical units before
    /// validating, the way clicks on the canvas are committed.
    pub fn snap_to_logical(&self, px: f64, py: f64) -> Result<Point, InvalidInput> {
        let Point { x, y } = self.raw_logical(px, py);
        // adding zero turns a rounded -0.0 into 0.0
        self.validate(Point::new(x.round() + 0.0, y.round() + 0.0))
    }

    pub fn to_pixel(&self, point: Point) -> (f64, f64) {
        let (ex, ey) = self.extent();
        (
            self.margin + point.x * self.plot_width() / ex,
            self.height - self.margin - point.y * self.plot_height() / ey,
        )
    }

    pub fn validate(&self, point: Point) -> Result<Point, InvalidInput> {
        match self.policy {
            DomainPolicy::Bounded { scale_max } => {
                let inside = |v: f64| (0.0..=scale_max).contains(&v);
                if inside(point.x) && inside(point.y) {
                    Ok(point)
                } else {
                    Err(InvalidInput::OutOfDomain {
                        x: point.x,
                        y: point.y,
                        max: scale_max,
                    })
                }
            }
            DomainPolicy::Unbounded => {
                if point.x.is_finite() && point.y.is_finite() {
                    Ok(point)
                } else {
                    Err(InvalidInput::NotFinite {
                        x: point.x,
                        y: point.y,
                    })
                }
            }
        }
    }

    /// Domain check for a single typed value, used when committing table rows.
    pub fn validate_value(&self, value: f64) -> Result<f64, RowError> {
        match self.policy {
            DomainPolicy::Bounded { scale_max } if !(0.0..=scale_max).contains(&value) => {
                Err(RowError::OutsideDomain(format!("0-{}", scale_max)))
            }
            _ => Ok(value),
        }
    }

    /// Tick values from 0 up to the extent of each axis.
    pub fn ticks(&self) -> (Vec<f64>, Vec<f64>) {
        let (ex, ey) = self.extent();
        let ticks_up_to = |extent: f64| {
            let count = (extent / self.tick_step + 1e-9).floor() as usize;
            (0..=count)
                .map(|i| i as f64 * self.tick_step)
                .collect_vec()
        };
        (ticks_up_to(ex), ticks_up_to(ey))
    }

    /// Index of the first point drawn within the hover tolerance of the pointer.
    pub fn hit_test(&self, points: &[Point], px: f64, py: f64) -> Option<usize> {
        points.iter().position(|point| {
            let (x, y) = self.to_pixel(*point);
            (x - px).abs() < self.hover_tolerance && (y - py).abs() < self.hover_tolerance
        })
    }
}
