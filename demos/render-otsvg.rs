// otsvg-kit/demos/render-otsvg.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renders one OT-SVG glyph and composites three overlapping copies of it
//! into a PNG, for visual inspection of the hook pipeline.

extern crate clap;
extern crate env_logger;
extern crate otsvg_kit;
extern crate tiny_skia;

use clap::{Arg, ArgMatches, Command};
use otsvg_kit::canvas::{Canvas, Format, RasterizationOptions};
use otsvg_kit::face::{Face, HintingOptions};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

fn get_args() -> ArgMatches {
    let font_arg = Arg::new("FONT")
        .help("Path to a font with an SVG table (e.g. TrajanColor-Concept.otf)")
        .required(true)
        .index(1);
    let glyph_arg = Arg::new("GLYPH")
        .help("Character to render")
        .default_value("A")
        .index(2);
    let size_arg = Arg::new("SIZE")
        .help("Font size in pixels per em")
        .default_value("160")
        .index(3);
    let output_arg = Arg::new("output")
        .help("Path of the PNG to write")
        .short('o')
        .long("output")
        .default_value("ot-svg-demo.png");
    Command::new("render-otsvg")
        .version("0.1")
        .about("Renders an OT-SVG glyph through FreeType and writes a composited PNG")
        .arg(font_arg)
        .arg(glyph_arg)
        .arg(size_arg)
        .arg(output_arg)
        .get_matches()
}

fn main() {
    env_logger::init();
    let matches = get_args();

    let font_path = matches.get_one::<String>("FONT").unwrap();
    let character = matches
        .get_one::<String>("GLYPH")
        .unwrap()
        .chars()
        .next()
        .unwrap();
    let size: f32 = matches.get_one::<String>("SIZE").unwrap().parse().unwrap();
    let output = matches.get_one::<String>("output").unwrap();

    let face = Face::from_path(font_path, 0).unwrap();
    println!(
        "{} ({})",
        face.family_name(),
        face.postscript_name().unwrap_or_else(|| "?".to_string())
    );
    if !face.has_svg_glyphs() {
        eprintln!("note: this face has no SVG table; expect an ordinary monochrome glyph");
    }

    face.set_size(size).unwrap();
    let glyph_id = face.glyph_for_char(character).expect("no glyph for character");
    let raster_rect = face
        .raster_bounds(glyph_id, HintingOptions::None, RasterizationOptions::Color)
        .unwrap();
    println!(
        "glyph {}: {}x{} px at ({}, {})",
        glyph_id,
        raster_rect.width(),
        raster_rect.height(),
        raster_rect.origin().x(),
        raster_rect.origin().y()
    );

    let mut canvas = Canvas::new(raster_rect.size(), Format::Bgra32);
    face.rasterize_glyph(
        &mut canvas,
        glyph_id,
        HintingOptions::None,
        RasterizationOptions::Color,
    )
    .unwrap();

    let glyph = match canvas.to_pixmap() {
        Some(glyph) => glyph,
        None => {
            eprintln!("glyph {} is blank; nothing to composite", glyph_id);
            return;
        }
    };

    // Three overlapping copies across a double-width surface, so alpha
    // compositing is visible in the output.
    let width = glyph.width() as i32;
    let mut surface =
        Pixmap::new(glyph.width() * 2, glyph.height()).expect("surface allocation failed");
    let paint = PixmapPaint::default();
    for &x in &[0, width / 2, width] {
        surface.draw_pixmap(x, 0, glyph.as_ref(), &paint, Transform::identity(), None);
    }
    surface.save_png(output).unwrap();
    println!("wrote {}", output);
}
