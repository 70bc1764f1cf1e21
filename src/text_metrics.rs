use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Advance width of a single line of `text`, or `None` when no font for the
/// family stack could be loaded.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    let face = guard.face(font_family)?;
    Some(face.advance(text) * font_size / face.units_per_em as f32)
}

/// Distance from ascender to descender at `font_size`.
pub fn line_extent(font_family: &str, font_size: f32) -> Option<f32> {
    if font_size <= 0.0 {
        return None;
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    let face = guard.face(font_family)?;
    let units = (face.ascender - face.descender).max(1) as f32;
    Some(units * font_size / face.units_per_em as f32)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn face(&mut self, font_family: &str) -> Option<&mut FontFace> {
        let key = font_family.trim().to_string();
        if !self.faces.contains_key(&key) {
            let face = self.load_face(&key);
            self.faces.insert(key.clone(), face);
        }
        self.faces.get_mut(&key).and_then(|face| face.as_mut())
    }

    fn load_face(&mut self, font_family: &str) -> Option<FontFace> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" => Family::SansSerif,
                "monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                _ => Family::Name(name),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::parse(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    advances: HashMap<char, u16>,
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let ascender = face.ascender();
        let descender = face.descender();
        Some(Self {
            data,
            index,
            units_per_em,
            ascender,
            descender,
            advances: HashMap::new(),
        })
    }

    /// Sum of glyph advances in font units. Missing glyphs count as a
    /// little over half an em.
    fn advance(&mut self, text: &str) -> f32 {
        let fallback = self.units_per_em as f32 * 0.56;
        let missing: Vec<char> = text
            .chars()
            .filter(|ch| *ch != '\n' && !self.advances.contains_key(ch))
            .collect();
        if !missing.is_empty()
            && let Ok(face) = Face::parse(&self.data, self.index)
        {
            for ch in missing {
                let advance = face
                    .glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(0);
                self.advances.insert(ch, advance);
            }
        }

        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| match self.advances.get(&ch) {
                Some(advance) if *advance > 0 => *advance as f32,
                _ => fallback,
            })
            .sum()
    }
}
