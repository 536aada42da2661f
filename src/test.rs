// otsvg-kit/src/test.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::mem;
use std::os::raw::c_void;
use std::ptr;
use tiny_skia::Transform;

use crate::canvas::{Canvas, Format};
use crate::error::FontLoadingError;
use crate::ffi;
use crate::file_type::FileType;
use crate::hooks;
use crate::renderer::{SvgGlyphDocument, SvgRenderer};
use crate::utils;

static RECT_DOCUMENT: &[u8] = b"<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'>\
                                <rect x='10' y='20' width='30' height='40' fill='#f00'/></svg>";

static TWO_GLYPH_DOCUMENT: &[u8] = b"<svg xmlns='http://www.w3.org/2000/svg' \
                                     viewBox='0 0 100 100'>\
                                     <rect id='glyph1' x='10' y='10' width='20' height='20'/>\
                                     <rect id='glyph2' x='50' y='50' width='20' height='20'/>\
                                     </svg>";

static EMPTY_DOCUMENT: &[u8] =
    b"<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'></svg>";

static DIMENSIONLESS_DOCUMENT: &[u8] = b"<svg xmlns='http://www.w3.org/2000/svg'>\
                                         <rect x='100' y='100' width='800' height='800'/></svg>";

fn rect_i(x: i32, y: i32, width: i32, height: i32) -> RectI {
    RectI::new(Vector2I::new(x, y), Vector2I::new(width, height))
}

fn glyph_document(data: &[u8], ppem: u16) -> SvgGlyphDocument {
    SvgGlyphDocument {
        data,
        units_per_em: 1000,
        x_ppem: ppem,
        y_ppem: ppem,
        transform: Transform::identity(),
        delta: Vector2F::zero(),
        glyph_fragment: None,
    }
}

#[test]
pub fn fixed_point_conversions() {
    assert_eq!(utils::ft_fixed_26_6_to_f32(160 * 64), 160.0);
    assert_eq!(utils::f32_to_ft_fixed_26_6(160.0), 160 * 64);
    assert_eq!(utils::f32_to_ft_fixed_26_6(0.5), 32);
    assert_eq!(utils::ft_fixed_16_16_to_f32(1 << 16), 1.0);
    assert_eq!(utils::ft_fixed_16_16_to_f32(-(1 << 15)), -0.5);
    assert_eq!(utils::div_round_up(7, 8), 1);
    assert_eq!(utils::div_round_up(8, 8), 1);
    assert_eq!(utils::div_round_up(9, 8), 2);
}

#[test]
pub fn analyze_sfnt_headers() {
    assert_eq!(
        FileType::analyze(&[0x00, 0x01, 0x00, 0x00, 0, 0, 0, 0]).unwrap(),
        FileType::Single
    );
    assert_eq!(
        FileType::analyze(b"OTTO\x00\x00\x00\x00").unwrap(),
        FileType::Single
    );
    assert_eq!(
        FileType::analyze(b"ttcf\x00\x01\x00\x00\x00\x00\x00\x02").unwrap(),
        FileType::Collection(2)
    );
    match FileType::analyze(b"<svg") {
        Err(FontLoadingError::UnknownFormat) => {}
        result => panic!("expected UnknownFormat, got {:?}", result.ok()),
    }
    match FileType::analyze(&[]) {
        Err(FontLoadingError::UnknownFormat) => {}
        result => panic!("expected UnknownFormat, got {:?}", result.ok()),
    }
}

#[test]
pub fn blit_a8_to_rgb24() {
    let mut canvas = Canvas::new(Vector2I::new(2, 1), Format::Rgb24);
    canvas.blit_from(&[0x40, 0x80], Vector2I::new(2, 1), 2, Format::A8);
    assert_eq!(canvas.pixels, vec![0x40, 0x40, 0x40, 0x80, 0x80, 0x80]);
}

#[test]
pub fn blit_swaps_red_and_blue() {
    let mut canvas = Canvas::new(Vector2I::new(1, 1), Format::Rgba32);
    canvas.blit_from(
        &[0x10, 0x20, 0x30, 0x40],
        Vector2I::new(1, 1),
        4,
        Format::Bgra32,
    );
    assert_eq!(canvas.pixels, vec![0x30, 0x20, 0x10, 0x40]);

    let mut canvas = Canvas::new(Vector2I::new(1, 1), Format::Bgra32);
    canvas.blit_from(
        &[0x10, 0x20, 0x30, 0x40],
        Vector2I::new(1, 1),
        4,
        Format::Rgba32,
    );
    assert_eq!(canvas.pixels, vec![0x30, 0x20, 0x10, 0x40]);
}

#[test]
pub fn blit_clamps_to_destination() {
    let mut canvas = Canvas::new(Vector2I::new(2, 2), Format::A8);
    let src = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    canvas.blit_from(&src, Vector2I::new(3, 3), 3, Format::A8);
    assert_eq!(canvas.pixels, vec![1, 2, 4, 5]);
}

#[test]
pub fn blit_1bpp_expands_bits() {
    let mut canvas = Canvas::new(Vector2I::new(10, 1), Format::A8);
    canvas.blit_from_bitmap_1bpp(&[0b1010_0001, 0b1000_0000], Vector2I::new(10, 1), 2);
    assert_eq!(
        canvas.pixels,
        vec![0xff, 0, 0xff, 0, 0, 0, 0, 0xff, 0xff, 0]
    );
}

#[test]
pub fn canvas_to_pixmap() {
    let mut canvas = Canvas::new(Vector2I::new(1, 1), Format::Bgra32);
    canvas.pixels.copy_from_slice(&[0x00, 0x00, 0x80, 0x80]);
    let pixmap = canvas.to_pixmap().unwrap();
    assert_eq!(pixmap.data(), &[0x80, 0x00, 0x00, 0x80]);

    let mut canvas = Canvas::new(Vector2I::new(1, 1), Format::A8);
    canvas.pixels[0] = 0x7f;
    let pixmap = canvas.to_pixmap().unwrap();
    assert_eq!(pixmap.data(), &[0, 0, 0, 0x7f]);
}

#[test]
pub fn render_rect_document_at_document_scale() {
    let renderer = SvgRenderer::new();
    let document = glyph_document(RECT_DOCUMENT, 100);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.canvas_origin, Vector2I::zero());
    assert_eq!(rendered.pixmap.width(), 100);
    assert_eq!(rendered.pixmap.height(), 100);
    assert_eq!(rendered.ink_rect, rect_i(10, 20, 30, 40));
}

#[test]
pub fn render_scales_by_ppem() {
    let renderer = SvgRenderer::new();
    let document = glyph_document(RECT_DOCUMENT, 200);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect, rect_i(20, 40, 60, 80));
}

#[test]
pub fn render_applies_delta() {
    let renderer = SvgRenderer::new();
    let mut document = glyph_document(RECT_DOCUMENT, 100);
    // +x moves right; +y is up in font space, so the ink moves toward
    // smaller device y.
    document.delta = Vector2F::new(5.0, 4.0);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect, rect_i(15, 16, 30, 40));
}

#[test]
pub fn render_rotated_document() {
    let renderer = SvgRenderer::new();
    let mut document = glyph_document(RECT_DOCUMENT, 100);
    // Quarter turn: (x, y) -> (-y, x).
    document.transform = Transform::from_row(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.canvas_origin, Vector2I::new(-100, 0));
    assert_eq!(rendered.ink_rect, rect_i(-60, 10, 40, 30));
}

#[test]
pub fn render_glyph_fragment_only() {
    let renderer = SvgRenderer::new();
    let mut document = glyph_document(TWO_GLYPH_DOCUMENT, 100);
    document.glyph_fragment = Some(1);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect, rect_i(10, 10, 20, 20));

    document.glyph_fragment = Some(2);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect, rect_i(50, 50, 20, 20));
}

#[test]
pub fn render_missing_fragment_falls_back_to_document() {
    let renderer = SvgRenderer::new();
    let mut document = glyph_document(TWO_GLYPH_DOCUMENT, 100);
    document.glyph_fragment = Some(7);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect, rect_i(10, 10, 60, 60));
}

#[test]
pub fn render_blank_document() {
    let renderer = SvgRenderer::new();
    let document = glyph_document(EMPTY_DOCUMENT, 100);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect.size(), Vector2I::zero());
}

#[test]
pub fn render_dimensionless_document_spans_em_square() {
    let renderer = SvgRenderer::new();
    let document = glyph_document(DIMENSIONLESS_DOCUMENT, 100);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect, rect_i(10, 10, 80, 80));
}

#[test]
pub fn render_zero_ppem_is_empty() {
    let renderer = SvgRenderer::new();
    let document = glyph_document(RECT_DOCUMENT, 0);
    let rendered = renderer.render_glyph(&document).unwrap();
    assert_eq!(rendered.ink_rect.size(), Vector2I::zero());
}

#[test]
pub fn render_garbage_document_fails() {
    let renderer = SvgRenderer::new();
    let document = glyph_document(b"not an svg document", 100);
    assert!(renderer.render_glyph(&document).is_err());
}

unsafe fn zeroed_slot_with_document(
    document: *mut ffi::FT_SVG_DocumentRec,
) -> ffi::FT_GlyphSlotRec {
    let mut slot: ffi::FT_GlyphSlotRec = mem::zeroed();
    slot.glyph_index = 1;
    slot.format = ffi::FT_GLYPH_FORMAT_SVG;
    slot.other = document as *mut c_void;
    slot
}

fn rect_document_rec() -> ffi::FT_SVG_DocumentRec {
    let mut metrics: ffi::FT_Size_Metrics = unsafe { mem::zeroed() };
    metrics.x_ppem = 100;
    metrics.y_ppem = 100;
    ffi::FT_SVG_DocumentRec {
        svg_document: RECT_DOCUMENT.as_ptr() as *mut ffi::FT_Byte,
        svg_document_length: RECT_DOCUMENT.len() as ffi::FT_ULong,
        metrics,
        units_per_EM: 1000,
        start_glyph_id: 1,
        end_glyph_id: 1,
        transform: ffi::FT_Matrix {
            xx: 1 << 16,
            xy: 0,
            yx: 0,
            yy: 1 << 16,
        },
        delta: ffi::FT_Vector { x: 0, y: 0 },
    }
}

#[test]
pub fn hooks_preset_then_render() {
    unsafe {
        let mut state: ffi::FT_Pointer = ptr::null_mut();
        assert_eq!(hooks::otsvg_init(&mut state), ffi::FT_ERR_OK);
        assert!(!state.is_null());

        let mut document = rect_document_rec();
        let mut slot = zeroed_slot_with_document(&mut document);

        assert_eq!(
            hooks::otsvg_preset_slot(&mut slot, 1, &mut state),
            ffi::FT_ERR_OK
        );
        assert_eq!(slot.bitmap_left, 10);
        assert_eq!(slot.bitmap_top, -20);
        assert_eq!(slot.bitmap.width, 30);
        assert_eq!(slot.bitmap.rows, 40);
        assert_eq!(slot.bitmap.pitch, 120);
        assert_eq!(slot.bitmap.pixel_mode, ffi::FT_PIXEL_MODE_BGRA);
        assert_eq!(slot.metrics.width, 30 * 64);
        assert_eq!(slot.metrics.height, 40 * 64);
        assert_eq!(slot.metrics.horiBearingX, 10 * 64);
        assert_eq!(slot.metrics.horiBearingY, -20 * 64);
        assert_eq!(slot.metrics.vertBearingY, -(40 * 64) / 2);
        // No vertical advance in the "font", so the 1.2 × height fallback applies.
        assert_eq!(slot.metrics.vertAdvance, 3072);

        // FreeType allocates the bitmap between preset and render.
        let mut buffer = vec![0; 120 * 40];
        slot.bitmap.buffer = buffer.as_mut_ptr();

        assert_eq!(hooks::otsvg_render(&mut slot, &mut state), ffi::FT_ERR_OK);
        assert_eq!(slot.format, ffi::FT_GLYPH_FORMAT_BITMAP);
        assert_eq!(slot.bitmap.num_grays, 256);
        // The rect is opaque red: premultiplied BGRA 00 00 ff ff, at both the
        // top-left and bottom-right corners of the ink box.
        assert_eq!(&buffer[0..4], &[0x00, 0x00, 0xff, 0xff]);
        assert_eq!(
            &buffer[39 * 120 + 29 * 4..39 * 120 + 29 * 4 + 4],
            &[0x00, 0x00, 0xff, 0xff]
        );

        hooks::otsvg_free(&mut state);
        assert!(state.is_null());
    }
}

#[test]
pub fn hooks_metrics_only_preset_discards_surface() {
    unsafe {
        let mut state: ffi::FT_Pointer = ptr::null_mut();
        assert_eq!(hooks::otsvg_init(&mut state), ffi::FT_ERR_OK);

        let mut document = rect_document_rec();
        let mut slot = zeroed_slot_with_document(&mut document);

        assert_eq!(
            hooks::otsvg_preset_slot(&mut slot, 0, &mut state),
            ffi::FT_ERR_OK
        );
        assert_eq!(slot.bitmap.width, 30);

        // No surface was retained, so render has nothing to replay.
        let mut buffer = vec![0; 120 * 40];
        slot.bitmap.buffer = buffer.as_mut_ptr();
        assert_eq!(
            hooks::otsvg_render(&mut slot, &mut state),
            ffi::FT_ERR_INVALID_SVG_DOCUMENT
        );

        hooks::otsvg_free(&mut state);
    }
}

#[test]
pub fn hooks_reject_broken_documents() {
    unsafe {
        let mut state: ffi::FT_Pointer = ptr::null_mut();
        assert_eq!(hooks::otsvg_init(&mut state), ffi::FT_ERR_OK);

        let mut document = rect_document_rec();
        document.svg_document = b"junk".as_ptr() as *mut ffi::FT_Byte;
        document.svg_document_length = 4;
        let mut slot = zeroed_slot_with_document(&mut document);
        assert_eq!(
            hooks::otsvg_preset_slot(&mut slot, 1, &mut state),
            ffi::FT_ERR_INVALID_SVG_DOCUMENT
        );

        let mut slot = zeroed_slot_with_document(ptr::null_mut());
        assert_eq!(
            hooks::otsvg_preset_slot(&mut slot, 1, &mut state),
            ffi::FT_ERR_INVALID_SVG_DOCUMENT
        );

        hooks::otsvg_free(&mut state);
    }
}

#[test]
pub fn hook_table_is_fully_populated() {
    assert_eq!(
        mem::size_of::<ffi::SVG_RendererHooks>(),
        4 * mem::size_of::<usize>()
    );
    let hooks_table = hooks::RENDERER_HOOKS;
    assert_eq!(hooks_table.init_svg as usize, hooks::otsvg_init as usize);
    assert_eq!(
        hooks_table.preset_slot as usize,
        hooks::otsvg_preset_slot as usize
    );
}
