use pdf_writer::{Name, Pdf, Ref};

use crate::format::Emphasis;

/// Windows-1252 code points 0x80..=0x9F that differ from Latin-1.
/// Everything else in 0x20..=0xFF maps to the same Unicode scalar.
const WINANSI_HIGH: [(u8, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'), // bullet
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Encode text for a WinAnsi simple font. Characters with no WinAnsi code are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F | 0x00A0..=0x00FF => Some(c as u8),
            _ => WINANSI_HIGH
                .iter()
                .find(|(_, mapped)| *mapped == c)
                .map(|(byte, _)| *byte),
        })
        .collect()
}

/// A standard-14 face referenced from every page's resources.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: &'static [u8],
    pub(crate) font_ref: Ref,
}

pub(crate) struct BaseFonts {
    pub(crate) regular: FontEntry,
    pub(crate) bold: FontEntry,
}

impl BaseFonts {
    pub(crate) fn for_emphasis(&self, emphasis: Emphasis) -> &FontEntry {
        match emphasis {
            Emphasis::Bold => &self.bold,
            Emphasis::Normal => &self.regular,
        }
    }

    pub(crate) fn entries(&self) -> [&FontEntry; 2] {
        [&self.regular, &self.bold]
    }
}

fn register_type1(pdf: &mut Pdf, font_ref: Ref, base_font: &[u8]) {
    pdf.type1_font(font_ref)
        .base_font(Name(base_font))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
}

/// Write Helvetica and Helvetica-Bold font objects. No embedding: viewers supply
/// the standard-14 metrics.
pub(crate) fn register_base_fonts(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> BaseFonts {
    let regular = FontEntry { pdf_name: b"F1", font_ref: alloc() };
    let bold = FontEntry { pdf_name: b"F2", font_ref: alloc() };
    register_type1(pdf, regular.font_ref, b"Helvetica");
    register_type1(pdf, bold.font_ref, b"Helvetica-Bold");
    BaseFonts { regular, bold }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_latin1_pass_through() {
        assert_eq!(to_winansi_bytes("BP 120/80"), b"BP 120/80");
        assert_eq!(to_winansi_bytes("café"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn windows_1252_extras_are_remapped() {
        assert_eq!(to_winansi_bytes("\u{2019}\u{2014}\u{20AC}"), vec![0x92, 0x97, 0x80]);
    }

    #[test]
    fn unmappable_chars_are_dropped() {
        assert_eq!(to_winansi_bytes("a\u{4E2D}b"), b"ab");
    }
}
