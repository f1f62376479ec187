//! Advance widths of the built-in Helvetica faces.
//!
//! The cell pipeline writes with PDF base fonts, which carry no metrics of their own, so
//! right-aligned and centered cells are positioned with the standard Helvetica AFM widths.

/// Widths in 1/1000 em for the printable ASCII range, starting at U+0020.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Maps Latin-1 letters with diacritics onto their base letter, which shares the same width in
/// the Helvetica metrics.
fn base_letter(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        '°' => 'o',
        other => other,
    }
}

fn glyph_width(ch: char, bold: bool) -> u16 {
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    let code = base_letter(ch) as u32;
    match code.checked_sub(0x20) {
        Some(index) if (index as usize) < table.len() => table[index as usize],
        // Anything outside the table is measured like a digit.
        _ => 556,
    }
}

/// Width of `text` in millimetres when set in Helvetica at `font_size` points. The oblique faces
/// share the widths of their upright counterparts.
pub fn text_width_mm(text: &str, font_size: u8, bold: bool) -> f64 {
    let units: u32 = text.chars().map(|ch| u32::from(glyph_width(ch, bold))).sum();
    f64::from(units) / 1000.0 * f64::from(font_size) * MM_PER_POINT
}

/// Converts a font size in points to millimetres.
pub fn points_to_mm(points: u8) -> f64 {
    f64::from(points) * MM_PER_POINT
}

#[cfg(test)]
mod tests {
    use super::{glyph_width, text_width_mm};

    #[test]
    fn digits_are_half_an_em_wide() {
        // 1000 units at 72pt is exactly one inch.
        let width = text_width_mm("0", 72, false);
        assert!((width - 25.4 * 0.556).abs() < 1e-9);
    }

    #[test]
    fn accented_letters_use_their_base_width() {
        assert_eq!(glyph_width('é', false), glyph_width('e', false));
        assert_eq!(glyph_width('É', true), glyph_width('E', true));
    }

    #[test]
    fn bold_text_is_not_narrower() {
        let text = "TOTAL TTC: 2220.00 EUR";
        assert!(text_width_mm(text, 10, true) >= text_width_mm(text, 10, false));
    }

    #[test]
    fn tilde_is_the_last_table_entry() {
        assert_eq!(glyph_width('~', false), 584);
        assert_eq!(glyph_width('\u{2603}', false), 556);
    }
}
