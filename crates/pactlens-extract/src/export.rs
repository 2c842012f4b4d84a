//! Plain-text export to PDF and DOCX
//!
//! Each input line becomes one paragraph. PDF output is A4 with a single
//! Helvetica face; long lines wrap at word boundaries.

use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use pactlens_core::{Error, Result};
use std::io::Cursor;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const FONT_SIZE: i64 = 11;
const LEADING: i64 = 14;

/// Characters per wrapped line at 11pt Helvetica on the A4 text width
const WRAP_CHARS: usize = 90;

const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Render text as a PDF document
pub fn export_pdf(text: &str) -> Result<Vec<u8>> {
    let lines: Vec<String> = paragraphs(text).flat_map(wrap).collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let mut chunks: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }
    for page_lines in chunks {
        let page_id = add_page(&mut doc, pages_id, resources_id, page_lines)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| Error::export(format!("PDF write failed: {}", e)))?;
    Ok(out)
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    lines: &[String],
) -> Result<ObjectId> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE)]),
        Operation::new("TL", vec![Object::Integer(LEADING)]),
        Operation::new(
            "Td",
            vec![
                Object::Integer(MARGIN),
                Object::Integer(PAGE_HEIGHT - MARGIN - FONT_SIZE),
            ],
        ),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| Error::export(format!("PDF content encoding failed: {}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Resources" => resources_id,
        "Contents" => content_id,
    }))
}

/// Render text as a DOCX document
pub fn export_docx(text: &str) -> Result<Vec<u8>> {
    let docx = paragraphs(text).fold(Docx::new(), |docx, line| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
    });

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| Error::export(format!("DOCX write failed: {}", e)))?;
    Ok(cursor.into_inner())
}

/// Input lines, tolerating CRLF from browser form posts
fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.trim_end_matches('\r'))
}

/// Greedy word wrap; an empty paragraph stays one blank line
fn wrap(paragraph: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let mut word = word;
        // split words longer than a whole line
        while word.chars().count() > WRAP_CHARS {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let cut = word
                .char_indices()
                .nth(WRAP_CHARS)
                .map_or(word.len(), |(i, _)| i);
            lines.push(word[..cut].to_string());
            word = &word[cut..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
        if current.chars().count() + needed > WRAP_CHARS {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Single-byte encoding for the standard Helvetica face
fn win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}
