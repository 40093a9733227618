use super::metrics::{char_width, units_to_mm, FontFace};

/// Splits `text` into lines no wider than `max_width_mm`.
///
/// Explicit newlines always break. Words are packed greedily; a single word
/// wider than the line is broken between characters. Empty input yields one
/// empty line.
pub fn wrap_text(text: &str, max_width_mm: f32, face: FontFace, size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(
            paragraph.trim_end_matches('\r'),
            max_width_mm,
            face,
            size_pt,
            &mut lines,
        );
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f32,
    face: FontFace,
    size_pt: f32,
    lines: &mut Vec<String>,
) {
    let start = lines.len();
    let fits = |units: u32| units_to_mm(units, size_pt) <= max_width;
    let space = u32::from(char_width(' ', face));
    let mut line = Line::default();

    for word in paragraph.split_whitespace() {
        let word_units = text_units(word, face);
        if !line.text.is_empty() {
            if fits(line.units + space + word_units) {
                line.text.push(' ');
                line.text.push_str(word);
                line.units += space + word_units;
                continue;
            }
            lines.push(line.take());
        }

        if fits(word_units) {
            line.text.push_str(word);
            line.units = word_units;
        } else {
            // Character-level fallback; the tail stays on `line` so following
            // words can continue on it.
            for ch in word.chars() {
                let units = u32::from(char_width(ch, face));
                if !line.text.is_empty() && !fits(line.units + units) {
                    lines.push(line.take());
                }
                line.text.push(ch);
                line.units += units;
            }
        }
    }

    if !line.text.is_empty() || lines.len() == start {
        lines.push(line.text);
    }
}

fn text_units(text: &str, face: FontFace) -> u32 {
    text.chars().map(|ch| u32::from(char_width(ch, face))).sum()
}

#[derive(Default)]
struct Line {
    text: String,
    units: u32,
}

impl Line {
    fn take(&mut self) -> String {
        self.units = 0;
        std::mem::take(&mut self.text)
    }
}
