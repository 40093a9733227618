use engine_logging::engine_debug;
use qa_core::QaRecord;
use serde::{Deserialize, Serialize};

use super::metrics::FontFace;
use super::wrap::wrap_text;

pub const DOCUMENT_TITLE: &str = "Academic Q&A Results";

/// Appended to the option that is the record's answer.
const SELECTED_MARKER: &str = " (correct)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Rgb,
}

/// Fixed page geometry and typography of the exported document.
///
/// Lengths are millimetres measured from the top-left corner of the page;
/// vertical positions are text baselines. Defaults describe an A4 page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left edge of every text line.
    pub margin_left: f32,
    pub title_y: f32,
    /// Baseline of the "Generated:" line.
    pub generated_y: f32,
    /// Baseline of the "Total Q&A Pairs:" line.
    pub count_y: f32,
    /// Cursor after the header block on page 1.
    pub content_start_y: f32,
    /// An entry starting with the cursor past this line goes to a new page.
    pub page_break_y: f32,
    /// Lowest baseline still printed. A line that would sit below it moves
    /// to a continuation page.
    pub overflow_y: f32,
    /// Cursor at the top of every continuation page.
    pub top_margin: f32,
    /// Maximum rendered width of a line.
    pub content_width: f32,
    /// Cursor advance per wrapped question line.
    pub question_line_height: f32,
    /// Cursor advance per wrapped answer line. Smaller than the question
    /// advance because answers use a smaller font.
    pub answer_line_height: f32,
    /// Extra space after each entry.
    pub entry_gap: f32,
    pub title_font: FontSpec,
    pub metadata_font: FontSpec,
    pub question_font: FontSpec,
    pub answer_font: FontSpec,
    pub selected_font: FontSpec,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 14.0,
            title_y: 20.0,
            generated_y: 30.0,
            count_y: 35.0,
            content_start_y: 45.0,
            page_break_y: 270.0,
            overflow_y: 287.0,
            top_margin: 20.0,
            content_width: 180.0,
            question_line_height: 7.0,
            answer_line_height: 5.0,
            entry_gap: 15.0,
            title_font: FontSpec {
                face: FontFace::Regular,
                size_pt: 22.0,
                color: Rgb(66, 133, 244),
            },
            metadata_font: FontSpec {
                face: FontFace::Regular,
                size_pt: 10.0,
                color: Rgb(100, 100, 100),
            },
            question_font: FontSpec {
                face: FontFace::Bold,
                size_pt: 12.0,
                color: Rgb(66, 133, 244),
            },
            answer_font: FontSpec {
                face: FontFace::Regular,
                size_pt: 10.0,
                color: Rgb(60, 60, 60),
            },
            selected_font: FontSpec {
                face: FontFace::Bold,
                size_pt: 10.0,
                color: Rgb(52, 168, 83),
            },
        }
    }
}

impl LayoutConfig {
    pub fn font(&self, style: TextStyle) -> FontSpec {
        match style {
            TextStyle::Title => self.title_font,
            TextStyle::Metadata => self.metadata_font,
            TextStyle::Question => self.question_font,
            TextStyle::Answer | TextStyle::Option => self.answer_font,
            TextStyle::SelectedOption => self.selected_font,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Metadata,
    Question,
    Answer,
    Option,
    SelectedOption,
}

/// One laid-out line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage {
    pub blocks: Vec<TextBlock>,
    /// Next free vertical offset.
    pub cursor: f32,
}

impl DocumentPage {
    fn new(cursor: f32) -> Self {
        Self {
            blocks: Vec::new(),
            cursor,
        }
    }

    fn place(&mut self, x: f32, y: f32, style: TextStyle, text: impl Into<String>) {
        self.blocks.push(TextBlock {
            x,
            y,
            style,
            text: text.into(),
        });
    }
}

/// Finished pages plus the one being filled.
struct PageBuilder<'a> {
    config: &'a LayoutConfig,
    done: Vec<DocumentPage>,
    page: DocumentPage,
}

impl<'a> PageBuilder<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            done: Vec::new(),
            page: DocumentPage::new(config.title_y),
        }
    }

    fn page_number(&self) -> usize {
        self.done.len() + 1
    }

    fn start_page(&mut self) {
        let full = std::mem::replace(&mut self.page, DocumentPage::new(self.config.top_margin));
        self.done.push(full);
    }

    /// Writes lines downward from the cursor, one `line_height` apart.
    fn write_lines(&mut self, x: f32, lines: Vec<(TextStyle, String)>, line_height: f32) {
        for (style, text) in lines {
            if self.page.cursor > self.config.overflow_y {
                self.start_page();
                engine_debug!("Entry continues on page {}", self.page_number());
            }
            let y = self.page.cursor;
            self.page.place(x, y, style, text);
            self.page.cursor += line_height;
        }
    }

    fn finish(mut self) -> DocumentLayout {
        self.done.push(self.page);
        DocumentLayout { pages: self.done }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<DocumentPage>,
}

/// Reflows `records` into fixed-size pages.
///
/// An entry only moves to a fresh page as a whole: before it is written, a
/// cursor past `page_break_y` starts a new page. Once started, an entry keeps
/// its heading and first lines together; only lines that would fall below
/// `overflow_y` carry on at the top of a continuation page.
pub fn layout_document(
    records: &[QaRecord],
    generated_at: &str,
    config: &LayoutConfig,
) -> DocumentLayout {
    let x = config.margin_left;
    let mut pages = PageBuilder::new(config);

    pages.page.place(x, config.title_y, TextStyle::Title, DOCUMENT_TITLE);
    pages.page.place(
        x,
        config.generated_y,
        TextStyle::Metadata,
        format!("Generated: {generated_at}"),
    );
    pages.page.place(
        x,
        config.count_y,
        TextStyle::Metadata,
        format!("Total Q&A Pairs: {}", records.len()),
    );
    pages.page.cursor = config.content_start_y;

    for (index, record) in records.iter().enumerate() {
        if pages.page.cursor > config.page_break_y {
            pages.start_page();
            engine_debug!("Entry {} starts page {}", index + 1, pages.page_number());
        }

        let question = format!("Q{}: {}", index + 1, record.question);
        let question_lines = wrap_styled(&question, TextStyle::Question, config);
        pages.write_lines(x, question_lines, config.question_line_height);

        let answer_lines = answer_lines(record, config);
        pages.write_lines(x, answer_lines, config.answer_line_height);

        pages.page.cursor += config.entry_gap;
    }

    pages.finish()
}

fn wrap_styled(text: &str, style: TextStyle, config: &LayoutConfig) -> Vec<(TextStyle, String)> {
    let font = config.font(style);
    wrap_text(text, config.content_width, font.face, font.size_pt)
        .into_iter()
        .map(|line| (style, line))
        .collect()
}

fn answer_lines(record: &QaRecord, config: &LayoutConfig) -> Vec<(TextStyle, String)> {
    let Some(options) = &record.options else {
        return wrap_styled(&record.answer, TextStyle::Answer, config);
    };

    let mut lines = Vec::new();
    for (key, text) in options {
        let (style, label) = if record.is_selected(key) {
            (TextStyle::SelectedOption, format!("{key}. {text}{SELECTED_MARKER}"))
        } else {
            (TextStyle::Option, format!("{key}. {text}"))
        };
        lines.extend(wrap_styled(&label, style, config));
    }
    if !record.answer_in_options() {
        lines.extend(wrap_styled(
            &format!("Answer: {}", record.answer),
            TextStyle::Answer,
            config,
        ));
    }
    lines
}
