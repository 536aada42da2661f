// otsvg-kit/src/file_type.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The type of a font file: either a single font or a TrueType/OpenType collection.

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::FontLoadingError;

const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;
const SFNT_VERSION_OPENTYPE: u32 = 0x4f54_544f; // 'OTTO'
const SFNT_VERSION_APPLE_TRUETYPE: u32 = 0x7472_7565; // 'true'
const SFNT_VERSION_POSTSCRIPT: u32 = 0x7479_7031; // 'typ1'
const TTC_TAG: u32 = 0x7474_6366; // 'ttcf'
const WOFF_SIGNATURE: u32 = 0x774f_4646; // 'wOFF'
const WOFF2_SIGNATURE: u32 = 0x774f_4632; // 'wOF2'

/// The type of a font file: either a single font or a TrueType/OpenType collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FileType {
    /// The font file represents a single font (`.ttf`, `.otf`, `.woff`, etc.)
    Single,
    /// The font file represents a collection of fonts (`.ttc`, `.otc`, etc.)
    Collection(u32),
}

impl FileType {
    /// Determines whether a blob of raw font data represents a supported font, and, if so,
    /// whether it is a single font or a collection.
    pub fn analyze(mut font_data: &[u8]) -> Result<FileType, FontLoadingError> {
        let version = font_data
            .read_u32::<BigEndian>()
            .map_err(|_| FontLoadingError::UnknownFormat)?;
        match version {
            SFNT_VERSION_TRUETYPE
            | SFNT_VERSION_OPENTYPE
            | SFNT_VERSION_APPLE_TRUETYPE
            | SFNT_VERSION_POSTSCRIPT
            | WOFF_SIGNATURE
            | WOFF2_SIGNATURE => Ok(FileType::Single),
            TTC_TAG => {
                // Skip the collection version; the font count follows it.
                font_data
                    .read_u32::<BigEndian>()
                    .and_then(|_| font_data.read_u32::<BigEndian>())
                    .map(FileType::Collection)
                    .map_err(|_| FontLoadingError::UnknownFormat)
            }
            _ => Err(FontLoadingError::UnknownFormat),
        }
    }
}
