// otsvg-kit/src/error.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `otsvg-kit` can return.

use std::io;
use thiserror::Error;

/// Reasons why a face might fail to load.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The data was of a format FreeType didn't recognize.
    #[error("unknown format")]
    UnknownFormat,

    /// Attempted to load an invalid index in a TrueType or OpenType font collection.
    ///
    /// For example, if a `.ttc` file has 2 fonts in it, and you ask for the 5th one, you'll get
    /// this error.
    #[error("no such font in the collection")]
    NoSuchFontInCollection,

    /// Attempted to load a malformed or corrupted font.
    #[error("parse error")]
    Parse,

    /// A disk or similar I/O error occurred while attempting to load the font.
    #[error("I/O error")]
    Io(#[from] io::Error),
}

/// Reasons why a face might fail to load a glyph.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GlyphLoadingError {
    /// The font didn't contain a glyph with that ID.
    #[error("no such glyph")]
    NoSuchGlyph,

    /// FreeType returned an error the crate doesn't represent more precisely.
    #[error("platform error")]
    PlatformError,
}

/// Reasons why an OT-SVG glyph document might fail to render.
#[derive(Debug, Error)]
pub enum SvgRenderError {
    /// The embedded SVG document could not be parsed.
    #[error("invalid SVG document: {0}")]
    Parse(#[from] usvg::Error),

    /// The transformed document would require an unreasonably large surface.
    #[error("raster area of {0}x{1} exceeds the surface limit")]
    SurfaceTooLarge(i32, i32),

    /// A pixel surface could not be allocated.
    #[error("surface allocation failed")]
    OutOfMemory,
}
