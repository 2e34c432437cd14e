use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, ObjectId, Stream, StringFormat,
};

use crate::errors::{AppError, AppResult};

// US Letter in points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 54;
const FONT_SIZE: i64 = 12;
const LEADING: i64 = 15;
// Helvetica averages ~0.5em per glyph
const CHARS_PER_LINE: usize = ((PAGE_WIDTH - 2 * MARGIN) * 2 / FONT_SIZE) as usize;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Lays `text` out on Letter pages in 12pt Helvetica and returns the PDF bytes.
///
/// Lines are word-wrapped and paginated. Characters outside WinAnsiEncoding are
/// printed as `?`.
pub fn render_pdf(text: &str) -> AppResult<Vec<u8>> {
    let lines = wrap_lines(text, CHARS_PER_LINE);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![&[]]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    for chunk in chunks {
        let page_id = add_page(&mut doc, pages_id, resources_id, chunk)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box(),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::InternalError(format!("Failed to write PDF: {}", e)))?;

    log::debug!("Rendered {} lines into {} byte PDF", lines.len(), buffer.len());
    Ok(buffer)
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    lines: &[String],
) -> AppResult<ObjectId> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - FONT_SIZE).into()]),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| AppError::InternalError(format!("Failed to encode page content: {}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => media_box(),
    }))
}

fn media_box() -> Vec<Object> {
    vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()]
}

/// Splits on newlines, then greedily word-wraps each line to `width` chars.
/// Words longer than a line are hard-broken.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let raw_line = raw_line.replace('\t', "    ");
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let word: String = word.into_iter().collect();
            let current_len = current.chars().count();
            if current_len > 0 && current_len + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn encode_win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_starts_with_pdf_header() {
        let bytes = render_pdf("Hello, study notes!").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn unicode_text_renders() {
        let bytes = render_pdf("Ünïcödé — “quotes”, 数学 and emoji 🎓").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn empty_text_still_produces_a_page() {
        let bytes = render_pdf("").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn long_text_paginates() {
        let text = (0..LINES_PER_PAGE * 2 + 5)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");

        let doc = Document::load_mem(&render_pdf(&text).unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn wrap_respects_width_and_breaks_long_words() {
        let lines = wrap_lines("aaa bbb ccc\n\ndddddddddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc", "", "ddddddd", "ddd"]);
    }

    #[test]
    fn win_ansi_maps_latin1_and_replaces_the_rest() {
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("“x”"), vec![0x93, b'x', 0x94]);
        assert_eq!(encode_win_ansi("数"), vec![b'?']);
    }
}
