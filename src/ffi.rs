// otsvg-kit/src/ffi.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Declarations for the FreeType OT-SVG interface.
//!
//! The `freetype` crate's bindings predate FreeType 2.12, which added the
//! `ot-svg` module, so everything that interface touches is declared here
//! against the FreeType 2.12+ ABI. The hooks can only ever be invoked by a
//! FreeType new enough to carry these definitions.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

use std::os::raw::{c_char, c_int, c_long, c_short, c_uchar, c_uint, c_ulong, c_ushort, c_void};

pub type FT_Bool = c_uchar;
pub type FT_Byte = c_uchar;
pub type FT_Error = c_int;
pub type FT_F26Dot6 = c_long;
pub type FT_Fixed = c_long;
pub type FT_Glyph_Format = c_uint;
pub type FT_Int = c_int;
pub type FT_Long = c_long;
pub type FT_Pointer = *mut c_void;
pub type FT_Pos = c_long;
pub type FT_Short = c_short;
pub type FT_String = c_char;
pub type FT_UInt = c_uint;
pub type FT_ULong = c_ulong;
pub type FT_UShort = c_ushort;

/// An `FT_Library` handle, opaque on this side of the boundary.
pub type FT_Library = *mut c_void;
/// An `FT_Face` handle, opaque on this side of the boundary.
pub type FT_Face = *mut c_void;

pub const FT_ERR_OK: FT_Error = 0x00;
pub const FT_ERR_INVALID_ARGUMENT: FT_Error = 0x06;
pub const FT_ERR_ARRAY_TOO_LARGE: FT_Error = 0x0A;
pub const FT_ERR_OUT_OF_MEMORY: FT_Error = 0x40;
pub const FT_ERR_INVALID_SVG_DOCUMENT: FT_Error = 0xB8;

pub const FT_PIXEL_MODE_NONE: u8 = 0;
pub const FT_PIXEL_MODE_MONO: u8 = 1;
pub const FT_PIXEL_MODE_GRAY: u8 = 2;
pub const FT_PIXEL_MODE_LCD: u8 = 5;
pub const FT_PIXEL_MODE_LCD_V: u8 = 6;
pub const FT_PIXEL_MODE_BGRA: u8 = 7;

const FT_RENDER_MODE_NORMAL: u32 = 0;
const FT_RENDER_MODE_LIGHT: u32 = 1;
const FT_RENDER_MODE_MONO: u32 = 2;
const FT_RENDER_MODE_LCD: u32 = 3;

pub const FT_LOAD_TARGET_NORMAL: u32 = (FT_RENDER_MODE_NORMAL & 15) << 16;
pub const FT_LOAD_TARGET_LIGHT: u32 = (FT_RENDER_MODE_LIGHT & 15) << 16;
pub const FT_LOAD_TARGET_MONO: u32 = (FT_RENDER_MODE_MONO & 15) << 16;
pub const FT_LOAD_TARGET_LCD: u32 = (FT_RENDER_MODE_LCD & 15) << 16;

pub const FT_FACE_FLAG_SVG: FT_Long = 1 << 16;

bitflags! {
    /// The subset of the `FT_LOAD_*` bits this crate drives glyph loading with.
    ///
    /// The `FT_LOAD_TARGET_*` values occupy bits 16–19 and are ORed in
    /// separately, as FreeType defines them.
    pub struct LoadFlags: u32 {
        const NO_SCALE = 1 << 0;
        const NO_HINTING = 1 << 1;
        const RENDER = 1 << 2;
        const NO_BITMAP = 1 << 3;
        const MONOCHROME = 1 << 12;
        const COLOR = 1 << 20;
        const NO_SVG = 1 << 24;
    }
}

const fn ft_image_tag(a: u8, b: u8, c: u8, d: u8) -> FT_Glyph_Format {
    ((a as u32) << 24) | ((b as u32) << 16) | ((c as u32) << 8) | (d as u32)
}

pub const FT_GLYPH_FORMAT_NONE: FT_Glyph_Format = 0;
pub const FT_GLYPH_FORMAT_BITMAP: FT_Glyph_Format = ft_image_tag(b'b', b'i', b't', b's');
pub const FT_GLYPH_FORMAT_OUTLINE: FT_Glyph_Format = ft_image_tag(b'o', b'u', b't', b'l');
pub const FT_GLYPH_FORMAT_SVG: FT_Glyph_Format = ft_image_tag(b'S', b'V', b'G', b' ');

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FT_Vector {
    pub x: FT_Pos,
    pub y: FT_Pos,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FT_Matrix {
    pub xx: FT_Fixed,
    pub xy: FT_Fixed,
    pub yx: FT_Fixed,
    pub yy: FT_Fixed,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FT_Generic {
    pub data: *mut c_void,
    pub finalizer: Option<unsafe extern "C" fn(*mut c_void)>,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FT_Glyph_Metrics {
    pub width: FT_Pos,
    pub height: FT_Pos,
    pub horiBearingX: FT_Pos,
    pub horiBearingY: FT_Pos,
    pub horiAdvance: FT_Pos,
    pub vertBearingX: FT_Pos,
    pub vertBearingY: FT_Pos,
    pub vertAdvance: FT_Pos,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FT_Bitmap {
    pub rows: c_uint,
    pub width: c_uint,
    pub pitch: c_int,
    pub buffer: *mut c_uchar,
    pub num_grays: c_ushort,
    pub pixel_mode: c_uchar,
    pub palette_mode: c_uchar,
    pub palette: *mut c_void,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FT_Outline {
    pub n_contours: c_short,
    pub n_points: c_short,
    pub points: *mut FT_Vector,
    pub tags: *mut c_char,
    pub contours: *mut c_short,
    pub flags: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FT_Size_Metrics {
    pub x_ppem: FT_UShort,
    pub y_ppem: FT_UShort,
    pub x_scale: FT_Fixed,
    pub y_scale: FT_Fixed,
    pub ascender: FT_Pos,
    pub descender: FT_Pos,
    pub height: FT_Pos,
    pub max_advance: FT_Pos,
}

/// The glyph slot record, with the modern (FreeType 2.10+) layout.
#[repr(C)]
pub struct FT_GlyphSlotRec {
    pub library: FT_Library,
    pub face: FT_Face,
    pub next: FT_GlyphSlot,
    pub glyph_index: FT_UInt,
    pub generic: FT_Generic,
    pub metrics: FT_Glyph_Metrics,
    pub linearHoriAdvance: FT_Fixed,
    pub linearVertAdvance: FT_Fixed,
    pub advance: FT_Vector,
    pub format: FT_Glyph_Format,
    pub bitmap: FT_Bitmap,
    pub bitmap_left: FT_Int,
    pub bitmap_top: FT_Int,
    pub outline: FT_Outline,
    pub num_subglyphs: FT_UInt,
    pub subglyphs: *mut c_void,
    pub control_data: *mut c_void,
    pub control_len: c_long,
    pub lsb_delta: FT_Pos,
    pub rsb_delta: FT_Pos,
    pub other: *mut c_void,
    pub internal: *mut c_void,
}

pub type FT_GlyphSlot = *mut FT_GlyphSlotRec;

/// The OT-SVG document record FreeType stores in `slot->other` while a glyph
/// with SVG representation is loaded.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct FT_SVG_DocumentRec {
    /// The SVG document bytes. Not NUL-terminated, possibly gzip-compressed.
    pub svg_document: *mut FT_Byte,
    pub svg_document_length: FT_ULong,
    /// Metrics of the size the glyph is being rendered at.
    pub metrics: FT_Size_Metrics,
    pub units_per_EM: FT_UShort,
    /// First and last glyph ID covered by this document. When the range spans
    /// more than one glyph, only the `glyph<N>` element of the document is to
    /// be rendered.
    pub start_glyph_id: FT_UShort,
    pub end_glyph_id: FT_UShort,
    /// Transform to apply to the document, in 16.16 fixed point.
    pub transform: FT_Matrix,
    /// Translation to apply to the document, in 26.6 fixed point.
    pub delta: FT_Vector,
}

pub type FT_SVG_Document = *mut FT_SVG_DocumentRec;

pub type SVG_Lib_Init_Func = unsafe extern "C" fn(data_pointer: *mut FT_Pointer) -> FT_Error;
pub type SVG_Lib_Free_Func = unsafe extern "C" fn(data_pointer: *mut FT_Pointer);
pub type SVG_Lib_Render_Func =
    unsafe extern "C" fn(slot: FT_GlyphSlot, data_pointer: *mut FT_Pointer) -> FT_Error;
pub type SVG_Lib_Preset_Slot_Func = unsafe extern "C" fn(
    slot: FT_GlyphSlot,
    cache: FT_Bool,
    data_pointer: *mut FT_Pointer,
) -> FT_Error;

/// The hook table registered with `FT_Property_Set(library, "ot-svg",
/// "svg-hooks", &hooks)`. FreeType copies the table, so it need not outlive
/// the call.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SVG_RendererHooks {
    pub init_svg: SVG_Lib_Init_Func,
    pub free_svg: SVG_Lib_Free_Func,
    pub render_svg: SVG_Lib_Render_Func,
    pub preset_slot: SVG_Lib_Preset_Slot_Func,
}

extern "C" {
    pub fn FT_Property_Set(
        library: FT_Library,
        module_name: *const FT_String,
        property_name: *const FT_String,
        value: *const c_void,
    ) -> FT_Error;
}
