// otsvg-kit/src/renderer.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renders OT-SVG glyph documents with resvg.
//!
//! This module is deliberately free of FreeType types: the hooks hand it a
//! [`SvgGlyphDocument`] describing one glyph's document and placement, and it
//! hands back a rendered surface plus the geometry the glyph slot needs. All
//! parsing, layout, and path rendering happen inside usvg/resvg; everything
//! here is unit conversion and surface bookkeeping.

use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};
use usvg::fontdb;

use crate::error::SvgRenderError;

/// Surfaces larger than this on either axis are rejected rather than
/// allocated. Matches no particular FreeType limit; it exists to keep a
/// malformed transform from requesting gigabytes.
const MAX_SURFACE_DIMENSION: i32 = 16384;

/// One glyph's SVG document and placement parameters, as FreeType describes
/// them (with fixed-point values already widened to floats).
pub struct SvgGlyphDocument<'a> {
    /// The raw document bytes. May be gzip-compressed; usvg decompresses
    /// transparently.
    pub data: &'a [u8],
    /// Design units per em of the face, used as the viewport for documents
    /// that declare no dimensions of their own.
    pub units_per_em: u16,
    /// Pixels per em the glyph is being rendered at.
    pub x_ppem: u16,
    pub y_ppem: u16,
    /// The font's document transform, in document units with y pointing up
    /// already folded into the matrix signs.
    pub transform: Transform,
    /// The font's translation, in (y-up) device pixels.
    pub delta: Vector2F,
    /// When the document covers a range of glyphs, the glyph ID whose
    /// `glyph<N>` element should be rendered; `None` renders the whole
    /// document.
    pub glyph_fragment: Option<u32>,
}

/// The result of rendering one glyph document: a surface covering the
/// transformed viewport, its position in device space, and the tight bounds
/// of the pixels actually touched.
pub struct RenderedGlyph {
    /// Premultiplied RGBA surface covering the transformed viewport.
    pub pixmap: Pixmap,
    /// Device-space position of the surface's top-left corner.
    pub canvas_origin: Vector2I,
    /// Tight device-space bounds of the inked pixels. Zero-sized when the
    /// document paints nothing.
    pub ink_rect: RectI,
}

impl RenderedGlyph {
    fn empty() -> RenderedGlyph {
        RenderedGlyph {
            pixmap: Pixmap::new(1, 1).expect("1x1 pixmap"),
            canvas_origin: Vector2I::zero(),
            ink_rect: RectI::new(Vector2I::zero(), Vector2I::zero()),
        }
    }
}

/// Renders glyph documents against a shared font database.
///
/// One renderer lives inside each hook context; building one is relatively
/// expensive because the system font list is enumerated for documents that
/// contain text elements.
pub struct SvgRenderer {
    fontdb: Arc<fontdb::Database>,
}

impl SvgRenderer {
    /// Creates a renderer with the system fonts loaded.
    pub fn new() -> SvgRenderer {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        SvgRenderer::with_fontdb(Arc::new(db))
    }

    /// Creates a renderer over a caller-supplied font database.
    pub fn with_fontdb(fontdb: Arc<fontdb::Database>) -> SvgRenderer {
        SvgRenderer { fontdb }
    }

    /// Parses and renders one glyph document.
    ///
    /// The device transform is assembled the way FreeType's reference OT-SVG
    /// port does: the ppem/viewport scale is applied last, after the font's
    /// document transform and its delta (mapped back into document units).
    pub fn render_glyph(
        &self,
        document: &SvgGlyphDocument,
    ) -> Result<RenderedGlyph, SvgRenderError> {
        let mut options = usvg::Options::default();
        // Dimensionless documents span the em square.
        if let Some(size) = usvg::Size::from_wh(
            f32::from(document.units_per_em),
            f32::from(document.units_per_em),
        ) {
            options.default_size = size;
        }
        options.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_data(document.data, &options)?;
        let doc_size = tree.size();
        let (doc_width, doc_height) = (doc_size.width(), doc_size.height());

        let x_scale = f32::from(document.x_ppem) / doc_width;
        let y_scale = f32::from(document.y_ppem) / doc_height;

        // The delta arrives in device pixels but applies before the
        // ppem/viewport scale, so map it back into document units first.
        let x0 = document.delta.x() * doc_width / f32::from(document.x_ppem);
        let y0 = -document.delta.y() * doc_height / f32::from(document.y_ppem);

        let transform = Transform::from_scale(x_scale, y_scale)
            .pre_concat(document.transform.post_translate(x0, y0));

        let canvas_rect = match device_bounds(transform, doc_width, doc_height)? {
            Some(canvas_rect) => canvas_rect,
            None => return Ok(RenderedGlyph::empty()),
        };
        let canvas_origin = canvas_rect.origin();

        let mut pixmap = Pixmap::new(canvas_rect.width() as u32, canvas_rect.height() as u32)
            .ok_or(SvgRenderError::OutOfMemory)?;
        let to_canvas = transform.post_translate(
            -(canvas_origin.x() as f32),
            -(canvas_origin.y() as f32),
        );

        match document.glyph_fragment {
            Some(glyph_id) => {
                let id = format!("glyph{}", glyph_id);
                match tree.node_by_id(&id) {
                    Some(node) => {
                        // `render_node` shifts the element's bounding box to
                        // the surface origin; shift back so the element keeps
                        // its document-space position.
                        if let Some(bbox) = node.abs_layer_bounding_box() {
                            let node_transform = to_canvas.pre_translate(bbox.x(), bbox.y());
                            let _ = resvg::render_node(node, node_transform, &mut pixmap.as_mut());
                        }
                    }
                    None => {
                        warn!(
                            "glyph document declares a range but has no `{}` element; \
                             rendering the whole document",
                            id
                        );
                        resvg::render(&tree, to_canvas, &mut pixmap.as_mut());
                    }
                }
            }
            None => resvg::render(&tree, to_canvas, &mut pixmap.as_mut()),
        }

        let ink_rect = match ink_extents(&pixmap) {
            Some(local_ink) => RectI::new(local_ink.origin() + canvas_origin, local_ink.size()),
            None => RectI::new(Vector2I::zero(), Vector2I::zero()),
        };

        Ok(RenderedGlyph {
            pixmap,
            canvas_origin,
            ink_rect,
        })
    }
}

impl Default for SvgRenderer {
    fn default() -> SvgRenderer {
        SvgRenderer::new()
    }
}

/// Returns the integer device-space bounding box of the document viewport
/// under `transform`, or `None` if it is degenerate.
fn device_bounds(
    transform: Transform,
    doc_width: f32,
    doc_height: f32,
) -> Result<Option<RectI>, SvgRenderError> {
    let corners = [
        (0.0, 0.0),
        (doc_width, 0.0),
        (0.0, doc_height),
        (doc_width, doc_height),
    ];
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &(x, y) in &corners {
        let device_x = transform.sx * x + transform.kx * y + transform.tx;
        let device_y = transform.ky * x + transform.sy * y + transform.ty;
        min_x = min_x.min(device_x);
        min_y = min_y.min(device_y);
        max_x = max_x.max(device_x);
        max_y = max_y.max(device_y);
    }
    if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
        return Ok(None);
    }

    let origin = Vector2I::new(min_x.floor() as i32, min_y.floor() as i32);
    let size = Vector2I::new(
        (max_x.ceil() as i32) - origin.x(),
        (max_y.ceil() as i32) - origin.y(),
    );
    if size.x() <= 0 || size.y() <= 0 {
        return Ok(None);
    }
    if size.x() > MAX_SURFACE_DIMENSION || size.y() > MAX_SURFACE_DIMENSION {
        return Err(SvgRenderError::SurfaceTooLarge(size.x(), size.y()));
    }
    Ok(Some(RectI::new(origin, size)))
}

/// Scans a rendered surface for the tight bounds of nonzero coverage, the
/// pixel-surface equivalent of cairo's recording-surface ink extents.
fn ink_extents(pixmap: &Pixmap) -> Option<RectI> {
    let width = pixmap.width() as i32;
    let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
    let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
    for (index, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let (x, y) = (index as i32 % width, index as i32 / width);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if min_x > max_x {
        return None;
    }
    Some(RectI::new(
        Vector2I::new(min_x, min_y),
        Vector2I::new(max_x - min_x + 1, max_y - min_y + 1),
    ))
}
