// otsvg-kit/tests/render.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// General tests.

use otsvg_kit::canvas::{Canvas, Format, RasterizationOptions};
use otsvg_kit::face::{Face, HintingOptions};
use otsvg_kit::file_type::FileType;
use otsvg_kit::renderer::{SvgGlyphDocument, SvgRenderer};
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::env;
use std::sync::Arc;
use tiny_skia::Transform;

static CIRCLE_DOCUMENT: &[u8] = b"<svg xmlns='http://www.w3.org/2000/svg' \
                                  viewBox='0 0 1000 1000'>\
                                  <circle cx='500' cy='500' r='400' fill='#08f'/></svg>";

/// Set this to the path of a font carrying an `SVG ` table (for example
/// TrajanColor-Concept.otf or a Noto Color Emoji build) to exercise the whole
/// FreeType pipeline.
static TEST_FONT_ENV_VAR: &str = "OTSVG_KIT_TEST_FONT";

#[test]
fn render_circle_document() {
    let renderer = SvgRenderer::new();
    let document = SvgGlyphDocument {
        data: CIRCLE_DOCUMENT,
        units_per_em: 1000,
        x_ppem: 100,
        y_ppem: 100,
        transform: Transform::identity(),
        delta: Vector2F::zero(),
        glyph_fragment: None,
    };
    let rendered = renderer.render_glyph(&document).unwrap();
    // The circle spans document units 100..900, so a tenth of that in device
    // pixels.
    assert_eq!(rendered.ink_rect.origin(), Vector2I::new(10, 10));
    assert_eq!(rendered.ink_rect.size(), Vector2I::new(80, 80));

    // The center is opaque premultiplied blue-ish; the corners are clear.
    let pixmap = &rendered.pixmap;
    let center = pixmap.pixel(50, 50).unwrap();
    assert_eq!(center.alpha(), 0xff);
    assert_eq!(center.blue(), 0xff);
    let corner = pixmap.pixel(1, 1).unwrap();
    assert_eq!(corner.alpha(), 0);
}

#[test]
fn analyze_collection_bytes() {
    let data = b"ttcf\x00\x02\x00\x00\x00\x00\x00\x03rest".to_vec();
    assert_eq!(
        Face::analyze_bytes(Arc::new(data)).unwrap(),
        FileType::Collection(3)
    );
}

#[test]
fn render_svg_glyph_end_to_end() {
    let font_path = match env::var(TEST_FONT_ENV_VAR) {
        Ok(font_path) => font_path,
        // Without a test font there is nothing to drive FreeType with.
        Err(_) => return,
    };

    let face = Face::from_path(&font_path, 0).unwrap();
    assert!(face.has_svg_glyphs());
    face.set_size(64.0).unwrap();

    let glyph_id = face.glyph_for_char('A').expect("no glyph for 'A'");
    let raster_rect = face
        .raster_bounds(glyph_id, HintingOptions::None, RasterizationOptions::Color)
        .unwrap();
    assert!(raster_rect.width() > 0);
    assert!(raster_rect.height() > 0);

    let mut canvas = Canvas::new(raster_rect.size(), Format::Bgra32);
    face.rasterize_glyph(
        &mut canvas,
        glyph_id,
        HintingOptions::None,
        RasterizationOptions::Color,
    )
    .unwrap();
    assert!(canvas.pixels.chunks(4).any(|pixel| pixel[3] != 0));

    // The same glyph rasterized without color support must still produce
    // coverage via the regular outline path, if the font carries one, or a
    // blank bitmap otherwise; either way it must not error out.
    let mut gray_canvas = Canvas::new(raster_rect.size(), Format::A8);
    face.rasterize_glyph(
        &mut gray_canvas,
        glyph_id,
        HintingOptions::None,
        RasterizationOptions::GrayscaleAa,
    )
    .unwrap();
}
