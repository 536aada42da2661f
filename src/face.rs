// otsvg-kit/src/face.rs
//
// Copyright © 2026 The otsvg-kit Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A safe wrapper over FreeType faces with the OT-SVG hooks installed.
//!
//! Every face created here shares a per-thread `FT_Library` that has the
//! crate's OT-SVG hook table registered, so loading a glyph with
//! [`RasterizationOptions::Color`] renders SVG glyph documents through resvg
//! without any further setup.

use freetype::freetype::{FT_Done_Face, FT_Face, FT_Get_Char_Index, FT_Get_Postscript_Name};
use freetype::freetype::{FT_Get_Sfnt_Table, FT_Init_FreeType, FT_Library, FT_Load_Glyph};
use freetype::freetype::{FT_Long, FT_New_Memory_Face, FT_Reference_Face, FT_Set_Char_Size};
use freetype::freetype::{FT_Sfnt_Tag, FT_ULong};
use freetype::tt_os2::TT_OS2;
use memmap2::Mmap;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::ffi::CStr;
use std::fmt::{self, Debug, Formatter};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::ops::Deref;
use std::path::Path;
use std::ptr;
use std::slice;
use std::sync::Arc;

use crate::canvas::{Canvas, Format, RasterizationOptions};
use crate::error::{FontLoadingError, GlyphLoadingError};
use crate::ffi::{self, LoadFlags};
use crate::file_type::FileType;
use crate::hooks;
use crate::utils::{f32_to_ft_fixed_26_6, ft_fixed_26_6_to_f32};

thread_local! {
    static FREETYPE_LIBRARY: FT_Library = {
        unsafe {
            let mut library = ptr::null_mut();
            assert_eq!(FT_Init_FreeType(&mut library), 0);
            if hooks::register_hooks(library as ffi::FT_Library) != 0 {
                warn!(
                    "the linked FreeType lacks the ot-svg module (needs 2.12+); \
                     SVG glyphs will not render"
                );
            }
            library
        }
    };
}

/// The handle that the FreeType API natively uses to represent a font.
pub type NativeFont = FT_Face;

/// Specifies how much grid fitting FreeType applies when loading a glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HintingOptions {
    /// No hinting is performed unless absolutely necessary to assemble the glyph.
    None,
    /// Hinting is performed only in the vertical direction (FreeType's light
    /// hinting mode).
    Vertical,
    /// Hinting is performed in both directions (FreeType's normal hinting
    /// mode).
    Full,
}

/// Various metrics that apply to the entire font.
///
/// For OpenType fonts, these mostly come from the `OS/2` table.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    /// The number of font units per em.
    ///
    /// Font sizes are usually expressed in pixels per em; e.g. `12px` means 12 pixels per em.
    pub units_per_em: u32,
    /// The maximum amount the font rises above the baseline, in font units.
    pub ascent: f32,
    /// The maximum amount the font descends below the baseline, in font units.
    ///
    /// This is typically a negative value to match the definition of `sTypoDescender` in the
    /// `OS/2` table in the OpenType specification.
    pub descent: f32,
    /// Distance between baselines, in font units.
    pub line_gap: f32,
    /// The suggested distance of the top of the underline from the baseline, in font units.
    pub underline_position: f32,
    /// A suggested value for the underline thickness, in font units.
    pub underline_thickness: f32,
    /// The maximum height of a capital letter above the baseline, in font units.
    pub cap_height: f32,
    /// The height of a lowercase letter above the baseline, in font units.
    pub x_height: f32,
}

/// A font face backed by FreeType, with the OT-SVG hooks installed.
pub struct Face {
    freetype_face: FT_Face,
    font_data: FontData,
}

impl Face {
    /// Loads a face from raw font data (the contents of a `.ttf`/`.otf`/etc. file).
    ///
    /// If the data represents a collection (`.ttc`/`.otc`/etc.), `font_index` specifies the index
    /// of the font to load from it. If the data represents a single font, pass 0 for `font_index`.
    pub fn from_bytes(font_data: Arc<Vec<u8>>, font_index: u32) -> Result<Face, FontLoadingError> {
        FREETYPE_LIBRARY.with(|freetype_library| unsafe {
            let mut freetype_face = ptr::null_mut();
            if FT_New_Memory_Face(
                *freetype_library,
                (*font_data).as_ptr(),
                font_data.len() as FT_Long,
                font_index as FT_Long,
                &mut freetype_face,
            ) != 0
            {
                return Err(FontLoadingError::Parse);
            }

            setup_freetype_face(freetype_face);

            Ok(Face {
                freetype_face,
                font_data: FontData::Memory(font_data),
            })
        })
    }

    /// Loads a face from a `.ttf`/`.otf`/etc. file.
    ///
    /// If the file is a collection (`.ttc`/`.otc`/etc.), `font_index` specifies the index of the
    /// font to load from it. If the file represents a single font, pass 0 for `font_index`.
    pub fn from_file(file: &mut File, font_index: u32) -> Result<Face, FontLoadingError> {
        unsafe {
            let mmap = Mmap::map(&*file)?;
            FREETYPE_LIBRARY.with(|freetype_library| {
                let mut freetype_face = ptr::null_mut();
                if FT_New_Memory_Face(
                    *freetype_library,
                    (*mmap).as_ptr(),
                    mmap.len() as FT_Long,
                    font_index as FT_Long,
                    &mut freetype_face,
                ) != 0
                {
                    return Err(FontLoadingError::Parse);
                }

                setup_freetype_face(freetype_face);

                Ok(Face {
                    freetype_face,
                    font_data: FontData::File(Arc::new(mmap)),
                })
            })
        }
    }

    /// Loads a face from the path to a `.ttf`/`.otf`/etc. file.
    ///
    /// If the file is a collection (`.ttc`/`.otc`/etc.), `font_index` specifies the index of the
    /// font to load from it. If the file represents a single font, pass 0 for `font_index`.
    #[inline]
    pub fn from_path<P>(path: P, font_index: u32) -> Result<Face, FontLoadingError>
    where
        P: AsRef<Path>,
    {
        Face::from_file(&mut File::open(path)?, font_index)
    }

    /// Determines whether a blob of raw font data represents a supported font, and, if so, what
    /// type of font it is.
    pub fn analyze_bytes(font_data: Arc<Vec<u8>>) -> Result<FileType, FontLoadingError> {
        FileType::analyze(&font_data)
    }

    /// Determines whether a file represents a supported font, and, if so, what type of font it is.
    pub fn analyze_file(file: &mut File) -> Result<FileType, FontLoadingError> {
        let mut header = [0; 12];
        file.seek(SeekFrom::Start(0))?;
        file.read_exact(&mut header)
            .map_err(|_| FontLoadingError::UnknownFormat)?;
        FileType::analyze(&header)
    }

    /// Determines whether a path points to a supported font, and, if so, what type of font it is.
    #[inline]
    pub fn analyze_path<P>(path: P) -> Result<FileType, FontLoadingError>
    where
        P: AsRef<Path>,
    {
        Face::analyze_file(&mut File::open(path)?)
    }

    /// Returns the wrapped native font handle.
    ///
    /// This function increments the reference count of the FreeType face before returning it.
    /// Therefore, it is the caller's responsibility to free it with `FT_Done_Face`.
    pub fn native_font(&self) -> NativeFont {
        unsafe {
            assert_eq!(FT_Reference_Face(self.freetype_face), 0);
            self.freetype_face
        }
    }

    /// Returns the PostScript name of the font, if the font has one.
    pub fn postscript_name(&self) -> Option<String> {
        unsafe {
            let postscript_name = FT_Get_Postscript_Name(self.freetype_face);
            if postscript_name.is_null() {
                return None;
            }
            Some(CStr::from_ptr(postscript_name).to_string_lossy().into_owned())
        }
    }

    /// Returns the name of the font family.
    pub fn family_name(&self) -> String {
        unsafe {
            let family_name = (*self.freetype_face).family_name;
            if family_name.is_null() {
                return String::new();
            }
            CStr::from_ptr(family_name).to_string_lossy().into_owned()
        }
    }

    /// Returns true if and only if the face has glyphs with SVG representations.
    pub fn has_svg_glyphs(&self) -> bool {
        unsafe { (*self.freetype_face).face_flags & (ffi::FT_FACE_FLAG_SVG as i64) != 0 }
    }

    /// Returns the usual glyph ID for a Unicode character.
    ///
    /// Be careful with this function; typographically correct character-to-glyph mapping must be
    /// done using a *shaper* such as HarfBuzz. This function is only useful for best-effort simple
    /// use cases like "what does character X look like on its own".
    pub fn glyph_for_char(&self, character: char) -> Option<u32> {
        unsafe {
            let glyph = FT_Get_Char_Index(self.freetype_face, character as FT_ULong);
            if glyph == 0 {
                None
            } else {
                Some(glyph)
            }
        }
    }

    /// Sets the size subsequent glyphs are loaded at, in pixels per em.
    pub fn set_size(&self, size: f32) -> Result<(), GlyphLoadingError> {
        unsafe {
            if FT_Set_Char_Size(self.freetype_face, f32_to_ft_fixed_26_6(size), 0, 0, 0) != 0 {
                return Err(GlyphLoadingError::PlatformError);
            }
            Ok(())
        }
    }

    /// Returns the distance from the origin of the glyph with the given ID to the next, in device
    /// pixels at the current size.
    pub fn advance(&self, glyph_id: u32) -> Result<Vector2F, GlyphLoadingError> {
        unsafe {
            if FT_Load_Glyph(self.freetype_face, glyph_id, LoadFlags::NO_HINTING.bits() as i32)
                != 0
            {
                return Err(GlyphLoadingError::NoSuchGlyph);
            }

            let advance = (*self.glyph_slot()).advance;
            Ok(Vector2F::new(
                ft_fixed_26_6_to_f32(advance.x as i64),
                ft_fixed_26_6_to_f32(advance.y as i64),
            ))
        }
    }

    /// Retrieves various metrics that apply to the entire font.
    pub fn metrics(&self) -> Metrics {
        let os2_table = self.get_os2_table();
        unsafe {
            let ascender = (*self.freetype_face).ascender;
            let descender = (*self.freetype_face).descender;
            let underline_position = (*self.freetype_face).underline_position;
            let underline_thickness = (*self.freetype_face).underline_thickness;
            Metrics {
                units_per_em: (*self.freetype_face).units_per_EM as u32,
                ascent: ascender as f32,
                descent: descender as f32,
                line_gap: ((*self.freetype_face).height + descender - ascender) as f32,
                underline_position: (underline_position + underline_thickness / 2) as f32,
                underline_thickness: underline_thickness as f32,
                cap_height: os2_table
                    .map(|table| (*table).sCapHeight as f32)
                    .unwrap_or(0.0),
                x_height: os2_table
                    .map(|table| (*table).sxHeight as f32)
                    .unwrap_or(0.0),
            }
        }
    }

    /// Returns the pixel boundaries that the glyph will take up when rendered at the current size,
    /// relative to the pen origin with y pointing down.
    pub fn raster_bounds(
        &self,
        glyph_id: u32,
        hinting_options: HintingOptions,
        rasterization_options: RasterizationOptions,
    ) -> Result<RectI, GlyphLoadingError> {
        unsafe {
            let slot = self.load_rendered_glyph(glyph_id, hinting_options, rasterization_options)?;
            let bitmap = &(*slot).bitmap;
            let mut width = bitmap.width as i32;
            let mut rows = bitmap.rows as i32;
            // LCD bitmaps triple the subpixel axis.
            match bitmap.pixel_mode {
                ffi::FT_PIXEL_MODE_LCD => width /= 3,
                ffi::FT_PIXEL_MODE_LCD_V => rows /= 3,
                _ => {}
            }
            Ok(RectI::new(
                Vector2I::new((*slot).bitmap_left, -(*slot).bitmap_top),
                Vector2I::new(width, rows),
            ))
        }
    }

    /// Rasterizes a glyph into a canvas at the current size.
    ///
    /// Format conversion is performed if the canvas format does not match the glyph's pixel mode:
    /// an OT-SVG or other color glyph arrives as premultiplied BGRA and may be blitted into a
    /// BGRA or RGBA canvas, grayscale coverage into an A8 canvas, and so on.
    pub fn rasterize_glyph(
        &self,
        canvas: &mut Canvas,
        glyph_id: u32,
        hinting_options: HintingOptions,
        rasterization_options: RasterizationOptions,
    ) -> Result<(), GlyphLoadingError> {
        unsafe {
            let slot = self.load_rendered_glyph(glyph_id, hinting_options, rasterization_options)?;
            let bitmap = &(*slot).bitmap;
            if bitmap.width == 0 || bitmap.rows == 0 {
                return Ok(());
            }
            if bitmap.buffer.is_null() || bitmap.pitch <= 0 {
                return Err(GlyphLoadingError::PlatformError);
            }

            let bitmap_stride = bitmap.pitch as usize;
            let bitmap_size = Vector2I::new(bitmap.width as i32, bitmap.rows as i32);
            let buffer = slice::from_raw_parts(
                bitmap.buffer as *const u8,
                bitmap_stride * bitmap.rows as usize,
            );

            match bitmap.pixel_mode {
                ffi::FT_PIXEL_MODE_GRAY => {
                    canvas.blit_from(buffer, bitmap_size, bitmap_stride, Format::A8)
                }
                ffi::FT_PIXEL_MODE_LCD | ffi::FT_PIXEL_MODE_LCD_V => {
                    canvas.blit_from(buffer, bitmap_size, bitmap_stride, Format::Rgb24)
                }
                ffi::FT_PIXEL_MODE_BGRA => {
                    canvas.blit_from(buffer, bitmap_size, bitmap_stride, Format::Bgra32)
                }
                ffi::FT_PIXEL_MODE_MONO => {
                    canvas.blit_from_bitmap_1bpp(buffer, bitmap_size, bitmap_stride)
                }
                _ => return Err(GlyphLoadingError::PlatformError),
            }
            Ok(())
        }
    }

    /// Attempts to return the raw font data (contents of the font file).
    ///
    /// If this font is a member of a collection, this function returns the data for the entire
    /// collection.
    pub fn copy_font_data(&self) -> Option<Arc<Vec<u8>>> {
        match self.font_data {
            FontData::File(ref file) => Some(Arc::new((*file).to_vec())),
            FontData::Memory(ref memory) => Some((*memory).clone()),
        }
    }

    unsafe fn load_rendered_glyph(
        &self,
        glyph_id: u32,
        hinting_options: HintingOptions,
        rasterization_options: RasterizationOptions,
    ) -> Result<*mut ffi::FT_GlyphSlotRec, GlyphLoadingError> {
        let load_flags = load_flags_for(hinting_options, rasterization_options);
        if FT_Load_Glyph(self.freetype_face, glyph_id, load_flags as i32) != 0 {
            return Err(GlyphLoadingError::NoSuchGlyph);
        }
        Ok(self.glyph_slot())
    }

    unsafe fn glyph_slot(&self) -> *mut ffi::FT_GlyphSlotRec {
        (*self.freetype_face).glyph as *mut ffi::FT_GlyphSlotRec
    }

    fn get_os2_table(&self) -> Option<*const TT_OS2> {
        unsafe {
            let table = FT_Get_Sfnt_Table(self.freetype_face, FT_Sfnt_Tag::FT_SFNT_OS2);
            if table.is_null() {
                None
            } else {
                Some(table as *const TT_OS2)
            }
        }
    }
}

impl Clone for Face {
    fn clone(&self) -> Face {
        unsafe {
            assert_eq!(FT_Reference_Face(self.freetype_face), 0);
            Face {
                freetype_face: self.freetype_face,
                font_data: self.font_data.clone(),
            }
        }
    }
}

impl Drop for Face {
    fn drop(&mut self) {
        unsafe {
            if !self.freetype_face.is_null() {
                assert_eq!(FT_Done_Face(self.freetype_face), 0);
            }
        }
    }
}

impl Debug for Face {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        self.family_name().fmt(fmt)
    }
}

#[derive(Clone)]
enum FontData {
    Memory(Arc<Vec<u8>>),
    File(Arc<Mmap>),
}

impl Deref for FontData {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        match *self {
            FontData::File(ref mmap) => &***mmap,
            FontData::Memory(ref data) => &***data,
        }
    }
}

fn load_flags_for(
    hinting_options: HintingOptions,
    rasterization_options: RasterizationOptions,
) -> u32 {
    let mut flags = LoadFlags::RENDER;
    match rasterization_options {
        RasterizationOptions::Bilevel => flags |= LoadFlags::MONOCHROME,
        RasterizationOptions::Color => flags |= LoadFlags::COLOR,
        RasterizationOptions::GrayscaleAa | RasterizationOptions::SubpixelAa => {}
    }
    if hinting_options == HintingOptions::None {
        flags |= LoadFlags::NO_HINTING;
    }
    let target = match (rasterization_options, hinting_options) {
        (RasterizationOptions::Bilevel, _) => ffi::FT_LOAD_TARGET_MONO,
        (RasterizationOptions::SubpixelAa, _) => ffi::FT_LOAD_TARGET_LCD,
        (_, HintingOptions::Vertical) => ffi::FT_LOAD_TARGET_LIGHT,
        (_, HintingOptions::None) | (_, HintingOptions::Full) => ffi::FT_LOAD_TARGET_NORMAL,
    };
    flags.bits() | target
}

unsafe fn setup_freetype_face(face: FT_Face) {
    reset_freetype_face_char_size(face);
}

unsafe fn reset_freetype_face_char_size(face: FT_Face) {
    // Apple Color Emoji has 0 units per em. Whee!
    let units_per_em = (*face).units_per_EM as i64;
    if units_per_em > 0 {
        assert_eq!(
            FT_Set_Char_Size(face, ((*face).units_per_EM as i64) << 6, 0, 0, 0),
            0
        );
    }
}
