use lopdf::content::Content;
use lopdf::Document;
use pretty_assertions::assert_eq;
use qa_core::QaRecord;
use qa_engine::{export_document, layout_document, LayoutConfig, TextStyle};

fn short_records(count: usize) -> Vec<QaRecord> {
    (1..=count)
        .map(|i| QaRecord::free_text(format!("Question {i}?"), format!("Answer {i}")))
        .collect()
}

/// Every `Tj` string of every page, in page order.
fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).expect("valid pdf");
    doc.get_pages()
        .values()
        .map(|page_id| {
            let raw = doc.get_page_content(*page_id).expect("page content");
            Content::decode(&raw)
                .expect("content stream")
                .operations
                .into_iter()
                .filter(|op| op.operator == "Tj")
                .map(|op| String::from_utf8_lossy(op.operands[0].as_str().unwrap()).into_owned())
                .collect()
        })
        .collect()
}

#[test]
fn entry_starting_exactly_on_break_line_stays_on_page() {
    // Each short entry advances 7 + 5 + 15 = 27mm; eight of them from 54
    // leave the cursor at exactly 270.
    let config = LayoutConfig {
        content_start_y: 54.0,
        ..LayoutConfig::default()
    };
    let layout = layout_document(&short_records(10), "t", &config);

    assert_eq!(layout.pages.len(), 2);
    let first_questions: Vec<_> = layout.pages[0]
        .blocks
        .iter()
        .filter(|b| b.style == TextStyle::Question)
        .collect();
    assert_eq!(first_questions.len(), 9);
    assert_eq!(first_questions[8].y, 270.0);

    let second = &layout.pages[1];
    assert_eq!(second.blocks[0].text, "Q10: Question 10?");
    assert_eq!(second.blocks[0].y, 20.0);
    assert_eq!(second.blocks[1].y, 27.0);
}

#[test]
fn overlong_entry_continues_on_next_page() {
    let long_answer = vec!["line"; 60].join("\n");
    let records = vec![
        QaRecord::free_text("Long?", long_answer),
        QaRecord::free_text("Next?", "after"),
    ];
    let config = LayoutConfig::default();
    let layout = layout_document(&records, "t", &config);

    assert_eq!(layout.pages.len(), 2);
    let first = &layout.pages[0];
    // Header, question and the answer lines from 52mm down to 287mm.
    assert_eq!(first.blocks.len(), 3 + 1 + 48);
    assert_eq!(first.blocks.last().unwrap().y, 287.0);
    for page in &layout.pages {
        assert!(page.blocks.iter().all(|b| b.y <= config.overflow_y));
    }

    let second = &layout.pages[1];
    assert_eq!(second.blocks[0].text, "line");
    assert_eq!(second.blocks[0].y, 20.0);
    let next = second
        .blocks
        .iter()
        .find(|b| b.style == TextStyle::Question)
        .unwrap();
    assert_eq!(next.text, "Q2: Next?");
    assert_eq!(next.y, 20.0 + 12.0 * 5.0 + 15.0);
}

#[test]
fn parentheses_and_backslashes_survive_rendering() {
    let records = vec![QaRecord::free_text(r"Why (a) or b) \ c(?", "x ((( y")];
    let bytes = export_document(&records, "t", &LayoutConfig::default()).unwrap();
    let pages = page_texts(&bytes);

    assert_eq!(
        pages[0][3..],
        [r"Q1: Why (a) or b) \ c(?".to_string(), "x ((( y".to_string()]
    );
}

#[test]
fn header_appears_only_on_first_page() {
    let bytes = export_document(&short_records(12), "2024-05-01 09:30", &LayoutConfig::default())
        .unwrap();
    let pages = page_texts(&bytes);

    assert_eq!(pages.len(), 2);
    assert_eq!(
        &pages[0][..3],
        &[
            "Academic Q&A Results".to_string(),
            "Generated: 2024-05-01 09:30".to_string(),
            "Total Q&A Pairs: 12".to_string(),
        ]
    );
    assert!(!pages[1].iter().any(|t| t.starts_with("Generated:")));
    assert_eq!(pages[1][0], "Q10: Question 10?");
}

#[test]
fn identical_inputs_render_identical_bytes() {
    let records = vec![
        QaRecord::free_text("Q1?", "A1"),
        QaRecord::multiple_choice("Q2?", [("A", "x"), ("B", "y")], "B"),
    ];
    let config = LayoutConfig::default();

    let first = export_document(&records, "2024-01-01 00:00", &config).unwrap();
    let second = export_document(&records, "2024-01-01 00:00", &config).unwrap();

    assert!(first.starts_with(b"%PDF-"));
    assert_eq!(first, second);
}

#[test]
fn selected_option_is_marked_in_the_document() {
    let records = vec![QaRecord::multiple_choice(
        "Which letter?",
        [("A", "x"), ("B", "y")],
        "B",
    )];
    let bytes = export_document(&records, "t", &LayoutConfig::default()).unwrap();
    let pages = page_texts(&bytes);

    assert_eq!(
        pages[0][3..],
        [
            "Q1: Which letter?".to_string(),
            "A. x".to_string(),
            "B. y (correct)".to_string(),
        ]
    );
}

#[test]
fn empty_result_set_renders_header_only() {
    let bytes = export_document(&[], "t", &LayoutConfig::default()).unwrap();
    let pages = page_texts(&bytes);

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].len(), 3);
    assert_eq!(pages[0][2], "Total Q&A Pairs: 0");
}
