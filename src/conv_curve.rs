//! Curve flattening converter.
//!
//! Port of `agg_conv_curve.h` — converts `PATH_CMD_CURVE3` and `PATH_CMD_CURVE4`
//! commands into sequences of `line_to` vertices by approximating the curves
//! with straight line segments.

use crate::basics::{is_stop, VertexSource, PATH_CMD_CURVE3, PATH_CMD_CURVE4, PATH_CMD_LINE_TO};
use crate::curves::{Curve3, Curve4};

// ============================================================================
// ConvCurve
// ============================================================================

/// Curve flattening converter.
///
/// Wraps a `VertexSource` and replaces `curve3`/`curve4` commands with
/// sequences of `line_to` vertices computed by the `Curve3`/`Curve4` classes.
///
/// Port of C++ `conv_curve<VertexSource>`.
pub struct ConvCurve<VS: VertexSource> {
    source: VS,
    last_x: f64,
    last_y: f64,
    curve3: Curve3,
    curve4: Curve4,
}

impl<VS: VertexSource> ConvCurve<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            source,
            last_x: 0.0,
            last_y: 0.0,
            curve3: Curve3::new(),
            curve4: Curve4::new(),
        }
    }

    pub fn source(&self) -> &VS {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut VS {
        &mut self.source
    }

    /// Set the approximation scale for both curve types.
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.curve3.set_approximation_scale(s);
        self.curve4.set_approximation_scale(s);
    }

    pub fn approximation_scale(&self) -> f64 {
        self.curve4.approximation_scale()
    }

    /// Set the angle tolerance for both curve types.
    pub fn set_angle_tolerance(&mut self, v: f64) {
        self.curve3.set_angle_tolerance(v);
        self.curve4.set_angle_tolerance(v);
    }

    pub fn angle_tolerance(&self) -> f64 {
        self.curve4.angle_tolerance()
    }

    /// Set the cusp limit (curve4 only — curve3 does not support cusp limit).
    pub fn set_cusp_limit(&mut self, v: f64) {
        self.curve4.set_cusp_limit(v);
    }

    pub fn cusp_limit(&self) -> f64 {
        self.curve4.cusp_limit()
    }
}

impl<VS: VertexSource> VertexSource for ConvCurve<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
        self.last_x = 0.0;
        self.last_y = 0.0;
        self.curve3.reset();
        self.curve4.reset();
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        // First check if curve3 has pending vertices
        if !is_stop(self.curve3.vertex(x, y)) {
            self.last_x = *x;
            self.last_y = *y;
            return PATH_CMD_LINE_TO;
        }

        // Then check if curve4 has pending vertices
        if !is_stop(self.curve4.vertex(x, y)) {
            self.last_x = *x;
            self.last_y = *y;
            return PATH_CMD_LINE_TO;
        }

        // Read next source vertex
        let mut cmd = self.source.vertex(x, y);

        match cmd {
            PATH_CMD_CURVE3 => {
                // Read the endpoint (control point is in x,y)
                let (mut end_x, mut end_y) = (0.0, 0.0);
                self.source.vertex(&mut end_x, &mut end_y);

                self.curve3
                    .init(self.last_x, self.last_y, *x, *y, end_x, end_y);

                // First vertex() call returns move_to (skip it)
                self.curve3.vertex(x, y);
                // Second call is the first curve vertex
                self.curve3.vertex(x, y);
                cmd = PATH_CMD_LINE_TO;
            }
            PATH_CMD_CURVE4 => {
                // Read the second control point and endpoint
                let (mut ct2_x, mut ct2_y) = (0.0, 0.0);
                let (mut end_x, mut end_y) = (0.0, 0.0);
                self.source.vertex(&mut ct2_x, &mut ct2_y);
                self.source.vertex(&mut end_x, &mut end_y);

                self.curve4
                    .init(self.last_x, self.last_y, *x, *y, ct2_x, ct2_y, end_x, end_y);

                // First vertex() call returns move_to (skip it)
                self.curve4.vertex(x, y);
                // Second call is the first curve vertex
                self.curve4.vertex(x, y);
                cmd = PATH_CMD_LINE_TO;
            }
            _ => {}
        }

        self.last_x = *x;
        self.last_y = *y;
        cmd
    }
}

// ============================================================================
// Tests
// ============================================================================
