// otsvg-kit/demos/render-glyph.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Prints a glyph as shaded ASCII art, for a quick terminal check of the
//! rasterization modes (including OT-SVG color glyphs via their alpha).

extern crate clap;
extern crate colored;
extern crate env_logger;
extern crate otsvg_kit;

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use colored::Colorize;
use otsvg_kit::canvas::{Canvas, Format, RasterizationOptions};
use otsvg_kit::face::{Face, HintingOptions};
use std::fmt::Write;

fn get_args() -> ArgMatches {
    let font_arg = Arg::new("FONT")
        .help("Path to the font file")
        .required(true)
        .index(1);
    let glyph_arg = Arg::new("GLYPH")
        .help("Character to render")
        .default_value("A")
        .index(2);
    let size_arg = Arg::new("SIZE")
        .help("Font size in pixels per em")
        .default_value("32")
        .index(3);
    let grayscale_arg = Arg::new("grayscale")
        .long("grayscale")
        .help("Use grayscale antialiasing (default)");
    let bilevel_arg = Arg::new("bilevel")
        .help("Use bilevel (black & white) rasterization")
        .short('b')
        .long("bilevel")
        .action(ArgAction::SetTrue);
    let subpixel_arg = Arg::new("subpixel")
        .help("Use subpixel (LCD) rasterization")
        .short('s')
        .long("subpixel")
        .action(ArgAction::SetTrue);
    let color_arg = Arg::new("color")
        .help("Use color (OT-SVG) rasterization; shades by alpha")
        .short('c')
        .long("color")
        .action(ArgAction::SetTrue);
    let hinting_value_parser =
        clap::builder::PossibleValuesParser::new(["none", "vertical", "full"]);
    let hinting_arg = Arg::new("hinting")
        .help("Select hinting type")
        .short('H')
        .long("hinting")
        .value_parser(hinting_value_parser)
        .value_names(["TYPE"]);
    let rasterization_mode_group =
        ArgGroup::new("rasterization-mode").args(["grayscale", "bilevel", "subpixel", "color"]);
    Command::new("render-glyph")
        .version("0.1")
        .about("Simple example tool to render glyphs with `otsvg-kit`")
        .arg(font_arg)
        .arg(glyph_arg)
        .arg(size_arg)
        .arg(grayscale_arg)
        .arg(bilevel_arg)
        .arg(subpixel_arg)
        .arg(color_arg)
        .group(rasterization_mode_group)
        .arg(hinting_arg)
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

    let (canvas_format, rasterization_options) = if matches.get_flag("bilevel") {
        (Format::A8, RasterizationOptions::Bilevel)
    } else if matches.get_flag("subpixel") {
        (Format::Rgb24, RasterizationOptions::SubpixelAa)
    } else if matches.get_flag("color") {
        (Format::Bgra32, RasterizationOptions::Color)
    } else {
        (Format::A8, RasterizationOptions::GrayscaleAa)
    };

    let hinting_options = match matches.get_one::<String>("hinting").map(|s| s.as_str()) {
        Some("vertical") => HintingOptions::Vertical,
        Some("full") => HintingOptions::Full,
        _ => HintingOptions::None,
    };

    let face = Face::from_path(font_path, 0).unwrap();
    face.set_size(size).unwrap();
    let glyph_id = face.glyph_for_char(character).expect("no glyph for character");

    let raster_rect = face
        .raster_bounds(glyph_id, hinting_options, rasterization_options)
        .unwrap();

    let mut canvas = Canvas::new(raster_rect.size(), canvas_format);
    face.rasterize_glyph(&mut canvas, glyph_id, hinting_options, rasterization_options)
        .unwrap();

    println!("glyph {}:", glyph_id);
    for y in 0..raster_rect.height() {
        let mut line = String::new();
        let (row_start, row_end) = (y as usize * canvas.stride, (y + 1) as usize * canvas.stride);
        let row = &canvas.pixels[row_start..row_end];
        for x in 0..raster_rect.width() {
            match canvas.format {
                Format::Rgba32 | Format::Bgra32 => {
                    let shade = shade(row[x as usize * 4 + 3]);
                    line.push(shade);
                    line.push(shade);
                }
                Format::Rgb24 => {
                    write!(
                        &mut line,
                        "{}{}{}",
                        shade(row[x as usize * 3]).to_string().red(),
                        shade(row[x as usize * 3 + 1]).to_string().green(),
                        shade(row[x as usize * 3 + 2]).to_string().blue()
                    )
                    .unwrap();
                }
                Format::A8 => {
                    let shade = shade(row[x as usize]);
                    line.push(shade);
                    line.push(shade);
                }
            }
        }
        println!("{}", line);
    }
}

fn shade(value: u8) -> char {
    match value {
        0 => ' ',
        1..=84 => '░',
        85..=169 => '▒',
        170..=254 => '▓',
        _ => '█',
    }
}
