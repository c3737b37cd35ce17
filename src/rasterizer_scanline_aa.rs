//! High-level polygon scanline rasterizer with anti-aliasing.
//!
//! Port of `agg_rasterizer_scanline_aa.h` — the heart of AGG's
//! rendering pipeline. Accepts polygon contours (move_to/line_to/close),
//! rasterizes them into anti-aliased scanlines, and feeds the scanlines
//! to a renderer.
//!
//! Raw cell coverage is folded by the filling rule and then passed through
//! a 256-entry gamma LUT (identity by default) before being handed to the
//! scanline container.

use crate::basics::{
    is_close, is_move_to, is_stop, is_vertex, FillingRule, VertexSource, POLY_SUBPIXEL_SHIFT,
};
use crate::gamma::GammaLut;
use crate::rasterizer_cells_aa::{RasterizerCellsAa, ScanlineHitTest};
use crate::rasterizer_sl_clip::{poly_coord, RasterizerSlClipInt};

// ============================================================================
// AA scale constants
// ============================================================================

const AA_SHIFT: u32 = 8;
const AA_SCALE: u32 = 1 << AA_SHIFT;
const AA_MASK: u32 = AA_SCALE - 1;
const AA_SCALE2: u32 = AA_SCALE * 2;
const AA_MASK2: u32 = AA_SCALE2 - 1;

// ============================================================================
// Scanline trait — the interface that sweep_scanline feeds data into
// ============================================================================

/// Trait for scanline containers that accumulate coverage data.
///
/// Implementations include `ScanlineU8` (unpacked per-pixel coverage),
/// `ScanlineP8` (packed/RLE), and `ScanlineBin` (binary, no coverage).
pub trait Scanline {
    /// Prepare for a new scanline, clearing all span data.
    fn reset_spans(&mut self);

    /// Add a single cell at position `x` with coverage `cover`.
    fn add_cell(&mut self, x: i32, cover: u32);

    /// Add `len` pixels starting at `x`, each with its own coverage value
    /// from `covers[..len]`.
    fn add_cells(&mut self, x: i32, len: u32, covers: &[u8]);

    /// Add a horizontal span of `len` pixels starting at `x`, all with `cover`.
    fn add_span(&mut self, x: i32, len: u32, cover: u32);

    /// Finalize the scanline at the given Y coordinate.
    fn finalize(&mut self, y: i32);

    /// Number of spans in this scanline (0 means empty).
    fn num_spans(&self) -> u32;

    /// The Y coordinate of this scanline.
    fn y(&self) -> i32;
}

// ============================================================================
// RasterizerScanlineAa — the high-level polygon rasterizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// High-level polygon rasterizer with anti-aliased output.
///
/// Port of C++ `rasterizer_scanline_aa_nogamma<rasterizer_sl_clip_int>`.
///
/// Usage:
/// 1. Optionally set `filling_rule()` and `clip_box()`
/// 2. Define contours with `move_to_d()` / `line_to_d()` or `add_path()`
/// 3. Call `rewind_scanlines()` then repeatedly `sweep_scanline()` to extract AA data
pub struct RasterizerScanlineAa {
    outline: RasterizerCellsAa,
    clipper: RasterizerSlClipInt,
    filling_rule: FillingRule,
    auto_close: bool,
    start_x: i32,
    start_y: i32,
    status: Status,
    scan_y: i32,
    gamma: GammaLut,
}

impl RasterizerScanlineAa {
    pub fn new() -> Self {
        Self {
            outline: RasterizerCellsAa::new(),
            clipper: RasterizerSlClipInt::new(),
            filling_rule: FillingRule::NonZero,
            auto_close: true,
            start_x: 0,
            start_y: 0,
            status: Status::Initial,
            scan_y: 0,
            gamma: GammaLut::new(),
        }
    }

    /// Reset the rasterizer, discarding all polygon data.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    /// Set the filling rule (non-zero winding or even-odd).
    pub fn filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }

    /// Install a gamma LUT applied to coverage after the filling-rule fold.
    /// Defaults to identity.
    pub fn gamma(&mut self, gamma: GammaLut) {
        self.gamma = gamma;
    }

    /// Enable or disable automatic polygon closing on move_to.
    pub fn auto_close(&mut self, flag: bool) {
        self.auto_close = flag;
    }

    /// Set the clipping rectangle in floating-point coordinates.
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.reset();
        self.clipper.clip_box(
            poly_coord(x1),
            poly_coord(y1),
            poly_coord(x2),
            poly_coord(y2),
        );
    }

    /// Disable clipping.
    pub fn reset_clipping(&mut self) {
        self.reset();
        self.clipper.reset_clipping();
    }

    // ========================================================================
    // Path building
    // ========================================================================

    /// Close the current polygon contour.
    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.clipper
                .line_to(&mut self.outline, self.start_x, self.start_y);
            self.status = Status::Closed;
        }
    }

    /// Move to a new position in 24.8 fixed-point coordinates.
    pub fn move_to(&mut self, x: i32, y: i32) {
        if self.outline.sorted() {
            self.reset();
        }
        if self.auto_close {
            self.close_polygon();
        }
        // For ras_conv_int, downscale is identity
        self.start_x = x;
        self.start_y = y;
        self.clipper.move_to(x, y);
        self.status = Status::MoveTo;
    }

    /// Line to in 24.8 fixed-point coordinates.
    pub fn line_to(&mut self, x: i32, y: i32) {
        self.clipper.line_to(&mut self.outline, x, y);
        self.status = Status::LineTo;
    }

    /// Move to a new position in floating-point coordinates.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        if self.auto_close {
            self.close_polygon();
        }
        let sx = poly_coord(x);
        let sy = poly_coord(y);
        self.start_x = sx;
        self.start_y = sy;
        self.clipper.move_to(sx, sy);
        self.status = Status::MoveTo;
    }

    /// Line to in floating-point coordinates.
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.clipper
            .line_to(&mut self.outline, poly_coord(x), poly_coord(y));
        self.status = Status::LineTo;
    }

    /// Add a vertex (dispatches to move_to, line_to, or close based on command).
    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        if is_move_to(cmd) {
            self.move_to_d(x, y);
        } else if is_vertex(cmd) {
            self.line_to_d(x, y);
        } else if is_close(cmd) {
            self.close_polygon();
        }
    }

    /// Add a single edge in 24.8 fixed-point coordinates.
    pub fn edge(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if self.outline.sorted() {
            self.reset();
        }
        self.clipper.move_to(x1, y1);
        self.clipper.line_to(&mut self.outline, x2, y2);
        self.status = Status::MoveTo;
    }

    /// Add a single edge in floating-point coordinates.
    pub fn edge_d(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.clipper.move_to(poly_coord(x1), poly_coord(y1));
        self.clipper
            .line_to(&mut self.outline, poly_coord(x2), poly_coord(y2));
        self.status = Status::MoveTo;
    }

    /// Add all vertices from a vertex source.
    pub fn add_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let mut x = 0.0;
        let mut y = 0.0;

        vs.rewind(path_id);
        if self.outline.sorted() {
            self.reset();
        }
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.add_vertex(x, y, cmd);
        }
    }

    // ========================================================================
    // Bounding box
    // ========================================================================

    pub fn min_x(&self) -> i32 {
        self.outline.min_x()
    }
    pub fn min_y(&self) -> i32 {
        self.outline.min_y()
    }
    pub fn max_x(&self) -> i32 {
        self.outline.max_x()
    }
    pub fn max_y(&self) -> i32 {
        self.outline.max_y()
    }

    // ========================================================================
    // Scanline sweeping
    // ========================================================================

    /// Sort cells and prepare for scanline sweeping.
    /// Returns `false` if there are no cells (nothing to render).
    pub fn rewind_scanlines(&mut self) -> bool {
        if self.auto_close {
            self.close_polygon();
        }
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }
        self.scan_y = self.outline.min_y();
        true
    }

    /// Navigate to a specific scanline Y (for random access).
    pub fn navigate_scanline(&mut self, y: i32) -> bool {
        if self.auto_close {
            self.close_polygon();
        }
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 || y < self.outline.min_y() || y > self.outline.max_y() {
            return false;
        }
        self.scan_y = y;
        true
    }

    /// Sort cells (explicit sort without starting a sweep).
    pub fn sort(&mut self) {
        if self.auto_close {
            self.close_polygon();
        }
        self.outline.sort_cells();
    }

    /// Calculate alpha (coverage) from accumulated area.
    ///
    /// Folds by the filling rule first, then passes the result through the
    /// gamma LUT (identity unless `gamma()` was called).
    #[inline]
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let mut cover = area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT);

        if cover < 0 {
            cover = -cover;
        }
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= AA_MASK2 as i32;
            if cover > AA_SCALE as i32 {
                cover = AA_SCALE2 as i32 - cover;
            }
        }
        if cover > AA_MASK as i32 {
            cover = AA_MASK as i32;
        }
        self.gamma.dir(cover as u8) as u32
    }

    /// Extract the next scanline of anti-aliased coverage data.
    ///
    /// This is THE CORE function of the rasterizer. It iterates sorted cells
    /// for the current scanline Y, accumulates coverage, and feeds spans
    /// to the scanline object.
    ///
    /// Returns `false` when all scanlines have been consumed.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        loop {
            if self.scan_y > self.outline.max_y() {
                return false;
            }
            sl.reset_spans();

            let cell_indices = self.outline.scanline_cells(self.scan_y as u32);
            let mut num_cells = cell_indices.len();
            let mut idx = 0;
            let mut cover: i32 = 0;

            while num_cells > 0 {
                let cur_idx = cell_indices[idx];
                let cur_cell = self.outline.cell(cur_idx);
                let x = cur_cell.x;
                let mut area = cur_cell.area;

                cover += cur_cell.cover;

                // Accumulate all cells with the same X
                num_cells -= 1;
                idx += 1;
                while num_cells > 0 {
                    let next_cell = self.outline.cell(cell_indices[idx]);
                    if next_cell.x != x {
                        break;
                    }
                    area += next_cell.area;
                    cover += next_cell.cover;
                    num_cells -= 1;
                    idx += 1;
                }

                if area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sl.add_cell(x, alpha);
                    }
                    // The partial cell at x has been handled; next span starts at x+1
                    let x_next = x + 1;

                    if num_cells > 0 {
                        let next_cell = self.outline.cell(cell_indices[idx]);
                        if next_cell.x > x_next {
                            let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                            if alpha != 0 {
                                sl.add_span(x_next, (next_cell.x - x_next) as u32, alpha);
                            }
                        }
                    }
                } else if num_cells > 0 {
                    let next_cell = self.outline.cell(cell_indices[idx]);
                    if next_cell.x > x {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(x, (next_cell.x - x) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }

    /// Test if a specific pixel coordinate is inside the rasterized polygon.
    pub fn hit_test(&mut self, tx: i32, ty: i32) -> bool {
        if !self.navigate_scanline(ty) {
            return false;
        }
        let mut sl = ScanlineHitTest::new(tx);
        self.sweep_scanline_hit_test(&mut sl);
        sl.hit()
    }

    /// Specialized sweep for ScanlineHitTest (avoids trait object overhead).
    fn sweep_scanline_hit_test(&mut self, sl: &mut ScanlineHitTest) -> bool {
        if self.scan_y > self.outline.max_y() {
            return false;
        }
        sl.reset_spans();

        let cell_indices = self.outline.scanline_cells(self.scan_y as u32);
        let mut num_cells = cell_indices.len();
        let mut idx = 0;
        let mut cover: i32 = 0;

        while num_cells > 0 {
            let cur_cell = self.outline.cell(cell_indices[idx]);
            let x = cur_cell.x;
            let mut area = cur_cell.area;

            cover += cur_cell.cover;

            num_cells -= 1;
            idx += 1;
            while num_cells > 0 {
                let next_cell = self.outline.cell(cell_indices[idx]);
                if next_cell.x != x {
                    break;
                }
                area += next_cell.area;
                cover += next_cell.cover;
                num_cells -= 1;
                idx += 1;
            }

            if area != 0 {
                let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                if alpha != 0 {
                    sl.add_cell(x, alpha);
                }
                let x_next = x + 1;
                if num_cells > 0 {
                    let next_cell = self.outline.cell(cell_indices[idx]);
                    if next_cell.x > x_next {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(x_next, (next_cell.x - x_next) as u32, alpha);
                        }
                    }
                }
            } else if num_cells > 0 {
                let next_cell = self.outline.cell(cell_indices[idx]);
                if next_cell.x > x {
                    let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                    if alpha != 0 {
                        sl.add_span(x, (next_cell.x - x) as u32, alpha);
                    }
                }
            }
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

impl Default for RasterizerScanlineAa {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
