use crate::{
    error::{MeasureError, TableError},
    refs::{ObjectReferences, RefType},
    units::Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TTF or OTF font. The whole font file is embedded in the generated PDF.
///
/// Fonts are added to a [`Document`](crate::Document), which hands back an
/// [`Id`](id_arena::Id) used to name the font in table columns and flow settings.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, TableError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn lookup_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.lookup_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.lookup_name(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The advance width of `text` at `size`. Every character must have a glyph.
    pub fn width(&self, text: &str, size: Pt) -> Result<Pt, MeasureError> {
        let face = self.face();
        let advances = text
            .chars()
            .map(|ch| {
                let gid = face
                    .glyph_index(ch)
                    .ok_or_else(|| self.missing_glyph(ch))?;
                Ok(face.glyph_hor_advance(gid).unwrap_or_default())
            })
            .collect::<Result<Vec<u16>, MeasureError>>()?;
        Ok(self.scaling(size) * total_advance(&advances))
    }

    /// Line height at `size`: the height of the font's global bounding box, so
    /// that the tallest ascender of one line never touches the deepest descender
    /// of the line above.
    pub fn line_height(&self, size: Pt) -> Pt {
        let bbox = self.face().global_bounding_box();
        self.scaling(size) * (bbox.y_max as f32 - bbox.y_min as f32)
    }

    /// Glyph ids for `text`, as written into a content stream
    pub(crate) fn encode(&self, text: &str) -> Result<Vec<u16>, MeasureError> {
        text.chars()
            .map(|ch| self.glyph_id(ch).ok_or_else(|| self.missing_glyph(ch)))
            .collect()
    }

    fn missing_glyph(&self, ch: char) -> MeasureError {
        MeasureError::MissingGlyph {
            ch,
            font: self.name().unwrap_or_else(|| "unnamed font".to_string()),
        }
    }

    /// Every glyph reachable from a unicode cmap, with the first char that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }

        map
    }

    /// Advance widths in glyph space (1000 units per em), keyed by glyph id
    fn glyph_widths(&self, glyphs: &BTreeMap<u16, char>) -> BTreeMap<u16, f32> {
        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        glyphs
            .keys()
            .filter_map(|&gid| {
                face.glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.allocate(RefType::Font(font_index));
        let glyphs = self.glyph_chars();
        let widths = self.glyph_widths(&glyphs);

        let cid_font_id = self.write_cid(refs, font_index, &widths, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
        log::debug!("embedded font {font_index} with {} glyphs", glyphs.len());
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        widths: &BTreeMap<u16, f32>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, widths, writer);
        let id = refs.allocate(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);

        // runs of consecutive glyph ids share one widths entry
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for (&gid, &width) in widths.iter() {
            if let Some((start, run)) = runs.last_mut() {
                if *start as usize + run.len() == gid as usize {
                    run.push(width);
                    continue;
                }
            }
            runs.push((gid, vec![width]));
        }

        let mut cid_widths = cid_font.widths();
        for (start, run) in runs {
            cid_widths.consecutive(start, run);
        }
        cid_widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        widths: &BTreeMap<u16, f32>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.allocate(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let max_width = widths.values().copied().fold(0.0, f32::max);
        let avg_width = if widths.is_empty() {
            0.0
        } else {
            widths.values().sum::<f32>() / widths.len() as f32
        };
        let bbox = face.global_bounding_box();

        let id = refs.allocate(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scaling);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.allocate(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}

/// Sum of glyph advances in font units
fn total_advance(advances: &[u16]) -> f32 {
    advances.iter().map(|&advance| advance as f32).sum()
}
