use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::layout::{DocumentLayout, LayoutConfig, TextBlock, DOCUMENT_TITLE};
use super::metrics::FontFace;
use super::ExportError;

const PT_PER_MM: f32 = 72.0 / 25.4;
const SUBJECT: &str = "Questions and Answers generated from PDF";
const CREATOR: &str = "PDF Q&A Service";

/// Serializes a laid-out document into PDF bytes.
///
/// Text uses the standard Helvetica faces, so no fonts are embedded. Nothing
/// time- or randomness-dependent is written: equal layouts give equal bytes.
pub fn render_pdf(layout: &DocumentLayout, config: &LayoutConfig) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let operations: Vec<Operation> = page
            .blocks
            .iter()
            .flat_map(|block| text_operations(block, config))
            .collect();
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(config.page_width * PT_PER_MM),
            Object::Real(config.page_height * PT_PER_MM),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(DOCUMENT_TITLE),
        "Subject" => Object::string_literal(SUBJECT),
        "Creator" => Object::string_literal(CREATOR),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn text_operations(block: &TextBlock, config: &LayoutConfig) -> Vec<Operation> {
    let font = config.font(block.style);
    let x = block.x * PT_PER_MM;
    // PDF user space grows upward from the bottom edge.
    let y = (config.page_height - block.y) * PT_PER_MM;
    let channel = |value: u8| Object::Real(f32::from(value) / 255.0);

    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font.face.resource_name().as_bytes().to_vec()),
                Object::Real(font.size_pt),
            ],
        ),
        Operation::new(
            "rg",
            vec![channel(font.color.0), channel(font.color.1), channel(font.color.2)],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&block.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Maps text onto WinAnsiEncoding; unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            _ => b'?',
        })
        .collect()
}
