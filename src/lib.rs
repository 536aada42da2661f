// otsvg-kit/src/lib.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! OT-SVG glyph rendering for FreeType.
//!
//! FreeType 2.12 introduced the `ot-svg` module: instead of rendering SVG
//! glyph documents itself, it calls out to a table of four hooks (`init`,
//! `free`, `render`, `preset_slot`) registered by the client. This crate
//! provides that table, backed by `resvg` for SVG parsing and rendering and
//! `tiny-skia` for pixel surfaces, along with a small safe wrapper for
//! loading faces and rasterizing glyphs to an in-memory canvas.
//!
//! The hooks are registered automatically for every face created through
//! [`face::Face`]. Clients that manage their own `FT_Library` can register
//! [`hooks::RENDERER_HOOKS`] themselves with `FT_Property_Set`.

extern crate byteorder;
extern crate memmap2;
extern crate pathfinder_geometry;
extern crate resvg;
extern crate thiserror;
extern crate tiny_skia;
extern crate usvg;

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

extern crate freetype;

pub mod canvas;
pub mod error;
pub mod face;
pub mod ffi;
pub mod file_type;
pub mod hooks;
pub mod renderer;

mod utils;

#[cfg(test)]
pub mod test;
