//! Ellipse vertex generator.
//!
//! Port of `agg_ellipse.h` — generates vertices approximating an ellipse
//! as a regular polygon, suitable for use as a VertexSource.

use crate::basics::{
    uround, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CCW, PATH_FLAGS_CLOSE, PI,
};

/// Ellipse vertex generator.
///
/// Generates a closed polygon approximating an ellipse. The number of
/// steps is either specified explicitly or calculated automatically from
/// the approximation scale.
///
/// Port of C++ `agg::ellipse`.
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    scale: f64,
    num: u32,
    step: u32,
    cw: bool,
}

impl Ellipse {
    /// Create a new ellipse with automatic step calculation.
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) -> Self {
        let mut e = Self {
            x,
            y,
            rx,
            ry,
            scale: 1.0,
            num: num_steps,
            step: 0,
            cw,
        };
        if e.num == 0 {
            e.calc_num_steps();
        }
        e
    }

    /// Create a default ellipse (unit circle at origin).
    pub fn default_new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rx: 1.0,
            ry: 1.0,
            scale: 1.0,
            num: 4,
            step: 0,
            cw: false,
        }
    }

    /// Re-initialize with new parameters.
    pub fn init(&mut self, x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) {
        self.x = x;
        self.y = y;
        self.rx = rx;
        self.ry = ry;
        self.num = num_steps;
        self.step = 0;
        self.cw = cw;
        if self.num == 0 {
            self.calc_num_steps();
        }
    }

    /// Set approximation scale (affects automatic step count).
    pub fn set_approximation_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.calc_num_steps();
    }

    /// Calculate step count from radii and approximation scale.
    fn calc_num_steps(&mut self) {
        let ra = (self.rx.abs() + self.ry.abs()) / 2.0;
        let da = (ra / (ra + 0.125 / self.scale)).acos() * 2.0;
        self.num = uround(2.0 * PI / da);
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step == self.num {
            self.step += 1;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE | PATH_FLAGS_CCW;
        }
        if self.step > self.num {
            return PATH_CMD_STOP;
        }
        let mut angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        if self.cw {
            angle = 2.0 * PI - angle;
        }
        *x = self.x + angle.cos() * self.rx;
        *y = self.y + angle.sin() * self.ry;
        self.step += 1;
        if self.step == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
