// otsvg-kit/src/hooks.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The OT-SVG hook table FreeType invokes while loading SVG glyphs.
//!
//! FreeType drives the hooks in a fixed sequence: `init` once per library
//! when the first SVG glyph is seen, `preset_slot` with `cache` unset during
//! `FT_Load_Glyph` (metrics only), `preset_slot` with `cache` set followed by
//! `render` during `FT_Render_Glyph`, and `free` when the library is torn
//! down. Each hook is a synchronous pass-through to the renderer module plus
//! the pointer casts and fixed-point conversions the slot contract requires.

use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::cmp;
use std::ptr;
use std::slice;
use tiny_skia::Transform;

use crate::canvas::{Blit, BlitSwapRB};
use crate::error::SvgRenderError;
use crate::ffi::{
    FT_Bool, FT_Error, FT_GlyphSlot, FT_Library, FT_Pointer, FT_Pos, FT_Property_Set, FT_String,
    FT_SVG_DocumentRec, SVG_RendererHooks, FT_ERR_ARRAY_TOO_LARGE, FT_ERR_INVALID_ARGUMENT,
    FT_ERR_INVALID_SVG_DOCUMENT, FT_ERR_OK, FT_ERR_OUT_OF_MEMORY, FT_GLYPH_FORMAT_BITMAP,
    FT_PIXEL_MODE_BGRA,
};
use crate::renderer::{RenderedGlyph, SvgGlyphDocument, SvgRenderer};
use crate::utils::{ft_fixed_16_16_to_f32, ft_fixed_26_6_to_f32};

/// The hook table to register with `FT_Property_Set(library, "ot-svg",
/// "svg-hooks", …)`.
pub static RENDERER_HOOKS: SVG_RendererHooks = SVG_RendererHooks {
    init_svg: otsvg_init,
    free_svg: otsvg_free,
    render_svg: otsvg_render,
    preset_slot: otsvg_preset_slot,
};

/// Registers [`RENDERER_HOOKS`] with a FreeType library.
///
/// Returns FreeType's status: nonzero on libraries older than 2.12, which
/// lack the `ot-svg` module.
pub unsafe fn register_hooks(library: FT_Library) -> FT_Error {
    FT_Property_Set(
        library,
        b"ot-svg\0".as_ptr() as *const FT_String,
        b"svg-hooks\0".as_ptr() as *const FT_String,
        &RENDERER_HOOKS as *const SVG_RendererHooks as *const _,
    )
}

/// Per-context hook state, created by `init` and torn down by `free`.
///
/// Between a `preset_slot(cache=true)` call and the `render` that follows it,
/// this holds the rendered surface and the translation that maps it into the
/// slot's bitmap. A metrics-only preset discards both.
struct RenderState {
    renderer: SvgRenderer,
    rec_surface: Option<RenderedGlyph>,
    x: f32,
    y: f32,
}

impl RenderState {
    fn new() -> RenderState {
        RenderState {
            renderer: SvgRenderer::new(),
            rec_surface: None,
            x: 0.0,
            y: 0.0,
        }
    }
}

fn ft_error_for(error: &SvgRenderError) -> FT_Error {
    match *error {
        SvgRenderError::Parse(_) => FT_ERR_INVALID_SVG_DOCUMENT,
        SvgRenderError::SurfaceTooLarge(..) => FT_ERR_ARRAY_TOO_LARGE,
        SvgRenderError::OutOfMemory => FT_ERR_OUT_OF_MEMORY,
    }
}

/// `init` hook: allocates the per-context state.
pub unsafe extern "C" fn otsvg_init(data_pointer: *mut FT_Pointer) -> FT_Error {
    if data_pointer.is_null() {
        return FT_ERR_INVALID_ARGUMENT;
    }
    *data_pointer = Box::into_raw(Box::new(RenderState::new())) as FT_Pointer;
    FT_ERR_OK
}

/// `free` hook: tears down the state and nulls the context pointer.
pub unsafe extern "C" fn otsvg_free(data_pointer: *mut FT_Pointer) {
    if data_pointer.is_null() || (*data_pointer).is_null() {
        return;
    }
    drop(Box::from_raw(*data_pointer as *mut RenderState));
    *data_pointer = ptr::null_mut();
}

/// `preset_slot` hook: parses and renders the slot's SVG document, then
/// fills in the bitmap and glyph metrics.
///
/// With `cache` unset this is a metrics-only pass and the rendered surface is
/// discarded; with it set the surface is retained for the `render` call that
/// FreeType issues next.
pub unsafe extern "C" fn otsvg_preset_slot(
    slot: FT_GlyphSlot,
    cache: FT_Bool,
    data_pointer: *mut FT_Pointer,
) -> FT_Error {
    if slot.is_null() || data_pointer.is_null() || (*data_pointer).is_null() {
        return FT_ERR_INVALID_ARGUMENT;
    }
    let state = &mut *(*data_pointer as *mut RenderState);
    let slot = &mut *slot;

    let document = slot.other as *const FT_SVG_DocumentRec;
    if document.is_null() {
        return FT_ERR_INVALID_SVG_DOCUMENT;
    }
    let document = &*document;
    if document.svg_document.is_null() || document.svg_document_length == 0 {
        return FT_ERR_INVALID_SVG_DOCUMENT;
    }
    let data = slice::from_raw_parts(
        document.svg_document as *const u8,
        document.svg_document_length as usize,
    );

    // 16.16 to float, flipping the cross terms between the font's y-up
    // convention and the renderer's y-down one. The delta's y flips inside
    // the renderer, where it is also mapped back into document units.
    let transform = Transform::from_row(
        ft_fixed_16_16_to_f32(document.transform.xx as i64),
        -ft_fixed_16_16_to_f32(document.transform.yx as i64),
        -ft_fixed_16_16_to_f32(document.transform.xy as i64),
        ft_fixed_16_16_to_f32(document.transform.yy as i64),
        0.0,
        0.0,
    );
    let delta = Vector2F::new(
        ft_fixed_26_6_to_f32(document.delta.x as i64),
        ft_fixed_26_6_to_f32(document.delta.y as i64),
    );

    let glyph_document = SvgGlyphDocument {
        data,
        units_per_em: document.units_per_EM,
        x_ppem: document.metrics.x_ppem,
        y_ppem: document.metrics.y_ppem,
        transform,
        delta,
        // A multi-glyph document contributes only its `glyph<N>` element.
        glyph_fragment: if document.start_glyph_id < document.end_glyph_id {
            Some(slot.glyph_index)
        } else {
            None
        },
    };

    let rendered = match state.renderer.render_glyph(&glyph_document) {
        Ok(rendered) => rendered,
        Err(error) => {
            warn!(
                "failed to render OT-SVG glyph {}: {}",
                slot.glyph_index, error
            );
            return ft_error_for(&error);
        }
    };

    let ink = rendered.ink_rect;
    slot.bitmap_left = ink.origin().x();
    slot.bitmap_top = -ink.origin().y();
    slot.bitmap.rows = ink.height() as u32;
    slot.bitmap.width = ink.width() as u32;
    slot.bitmap.pitch = ink.width() * 4;
    slot.bitmap.pixel_mode = FT_PIXEL_MODE_BGRA;

    let metrics = &mut slot.metrics;
    metrics.width = (ink.width() as FT_Pos) * 64;
    metrics.height = (ink.height() as FT_Pos) * 64;
    metrics.horiBearingX = (ink.origin().x() as FT_Pos) * 64;
    metrics.horiBearingY = (-ink.origin().y() as FT_Pos) * 64;
    metrics.vertBearingX = metrics.horiBearingX - metrics.horiAdvance / 2;
    metrics.vertBearingY = (metrics.vertAdvance - metrics.height) / 2;
    if metrics.vertAdvance == 0 {
        metrics.vertAdvance = (metrics.height as f32 * 1.2) as FT_Pos;
    }

    if cache == 0 {
        state.rec_surface = None;
        state.x = 0.0;
        state.y = 0.0;
    } else {
        state.x = ink.origin().x() as f32;
        state.y = ink.origin().y() as f32;
        state.rec_surface = Some(rendered);
    }
    FT_ERR_OK
}

/// `render` hook: replays the surface retained by the preceding
/// `preset_slot(cache=true)` into the bitmap buffer FreeType allocated,
/// translated by the negated stored offset and converted from premultiplied
/// RGBA to premultiplied BGRA.
pub unsafe extern "C" fn otsvg_render(slot: FT_GlyphSlot, data_pointer: *mut FT_Pointer) -> FT_Error {
    if slot.is_null() || data_pointer.is_null() || (*data_pointer).is_null() {
        return FT_ERR_INVALID_ARGUMENT;
    }
    let state = &mut *(*data_pointer as *mut RenderState);
    let slot = &mut *slot;

    let rendered = match state.rec_surface {
        Some(ref rendered) => rendered,
        None => return FT_ERR_INVALID_SVG_DOCUMENT,
    };

    let bitmap = &mut slot.bitmap;
    if bitmap.width > 0 && bitmap.rows > 0 {
        if bitmap.buffer.is_null() || bitmap.pitch <= 0 {
            return FT_ERR_INVALID_ARGUMENT;
        }
        let offset =
            Vector2I::new(state.x as i32, state.y as i32) - rendered.canvas_origin;
        if offset.x() < 0 || offset.y() < 0 {
            return FT_ERR_INVALID_ARGUMENT;
        }
        let canvas_width = rendered.pixmap.width() as i32;
        let canvas_height = rendered.pixmap.height() as i32;
        let width = cmp::min(bitmap.width as i32, canvas_width - offset.x());
        let rows = cmp::min(bitmap.rows as i32, canvas_height - offset.y());
        let data = rendered.pixmap.data();
        let pitch = bitmap.pitch as usize;
        if width > 0 {
            for y in 0..cmp::max(rows, 0) {
                let src_start = (((y + offset.y()) * canvas_width + offset.x()) * 4) as usize;
                let src_row = &data[src_start..src_start + width as usize * 4];
                let dest_row = slice::from_raw_parts_mut(
                    bitmap.buffer.add(y as usize * pitch),
                    width as usize * 4,
                );
                BlitSwapRB::blit(dest_row, src_row);
            }
        }
    }

    bitmap.pixel_mode = FT_PIXEL_MODE_BGRA;
    bitmap.num_grays = 256;
    slot.format = FT_GLYPH_FORMAT_BITMAP;
    FT_ERR_OK
}
