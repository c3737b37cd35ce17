//! # rastercore
//!
//! A 2D anti-aliased vector graphics rasterizer, descended from Anti-Grain
//! Geometry (AGG) 2.6.
//!
//! This crate is the vector graphics core of a larger PDF rendering stack:
//! the path model, curve flattening, affine transforms, the anti-aliased
//! polygon rasterizer, scanline containers, and the pixel-format blend
//! surface. Glyph/outline rendering, codestream decoding, and PDF
//! content-stream interpretation live in layers above this crate and consume
//! it through the vertex-source / pixel-format / pixel-memory contracts.
//!
//! ## Architecture
//!
//! Data flows through five stages:
//!
//! 1. **Vertex source** — [`PathStorage`](path_storage::PathStorage) and the
//!    shape generators ([`Arc`](arc::Arc), [`Ellipse`](ellipse::Ellipse),
//!    [`RoundedRect`](rounded_rect::RoundedRect)) produce `(x, y, command)`
//!    triples.
//! 2. **Coordinate conversion** — [`TransAffine`](trans_affine::TransAffine)
//!    maps vertices; [`ConvCurve`](conv_curve::ConvCurve) flattens
//!    `curve3`/`curve4` commands into line segments via
//!    [`Curve3`](curves::Curve3)/[`Curve4`](curves::Curve4).
//! 3. **Scanline rasterizer** —
//!    [`RasterizerScanlineAa`](rasterizer_scanline_aa::RasterizerScanlineAa)
//!    accumulates anti-aliased coverage cells ([`rasterizer_cells_aa`]) and
//!    sweeps them into scanlines.
//! 4. **Scanline container** — [`ScanlineU8`](scanline_u::ScanlineU8),
//!    [`ScanlineP8`](scanline_p::ScanlineP8), or
//!    [`ScanlineBin`](scanline_bin::ScanlineBin) absorb the per-row spans.
//! 5. **Renderer** — [`RendererBase`](renderer_base::RendererBase) over a
//!    [`PixelFormat`](pixfmt_rgba::PixelFormat)
//!    ([`PixfmtGray8`](pixfmt_gray::PixfmtGray8),
//!    [`PixfmtRgb24`](pixfmt_rgb::PixfmtRgb24),
//!    [`PixfmtRgba32`](pixfmt_rgba::PixfmtRgba32)) blends spans into a
//!    [`RenderingBuffer`](rendering_buffer).
//!
//! See [`errors::GraphicsError`] for the small set of hard invariant
//! violations the pipeline surfaces; everything else (degenerate input,
//! numeric-limit cases, out-of-buffer writes) is handled silently per
//! component.

// Primitives
pub mod array;
pub mod basics;
pub mod math;

// Error handling
pub mod errors;

// AffineTransform
pub mod trans_affine;

// PathStore
pub mod arc;
pub mod bezier_arc;
pub mod bounding_rect;
pub mod ellipse;
pub mod path_storage;
pub mod rounded_rect;

// CurveFlattener
pub mod conv_curve;
pub mod curves;

// Rasterizer
pub mod clip_liang_barsky;
pub mod dda_line;
pub mod rasterizer_cells_aa;
pub mod rasterizer_scanline_aa;
pub mod rasterizer_sl_clip;

// Scanlines
pub mod scanline_bin;
pub mod scanline_p;
pub mod scanline_u;

// BlendSurface
pub mod color;
pub mod gamma;
pub mod pixfmt_gray;
pub mod pixfmt_rgb;
pub mod pixfmt_rgba;
pub mod renderer_base;
pub mod renderer_scanline;
pub mod rendering_buffer;
