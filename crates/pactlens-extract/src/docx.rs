//! DOCX paragraph extraction

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use pactlens_core::{Error, Result};

/// Body paragraphs with text, one per line. Tables are skipped.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| Error::extraction(format!("DOCX read failed: {}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for item in &run.children {
                    match item {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}
