//! Multi-format text extraction

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FileType;

/// Text extractor for the supported upload formats
///
/// Exactly one strategy runs per call, chosen by [`FileType`]. There is no
/// fallback between strategies.
pub struct FileParser;

impl FileParser {
    /// Read a stored file and extract its text
    pub fn extract_file(path: &Path, file_type: FileType) -> Result<String> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        if !file_type.is_supported() {
            return Err(Error::UnsupportedFileType(filename));
        }

        let data = std::fs::read(path)
            .map_err(|e| Error::file_parse(&filename, format!("Failed to read file: {}", e)))?;

        Self::extract(&filename, file_type, &data)
    }

    /// Extract text from in-memory file content
    ///
    /// A zero-length input is an empty document and yields an empty string.
    pub fn extract(filename: &str, file_type: FileType, data: &[u8]) -> Result<String> {
        if !file_type.is_supported() {
            return Err(Error::UnsupportedFileType(filename.to_string()));
        }
        if data.is_empty() {
            return Ok(String::new());
        }

        match file_type {
            FileType::Pdf => Self::extract_pdf(filename, data),
            FileType::Docx => Self::extract_docx(filename, data),
            FileType::Txt => Self::extract_text(filename, data),
            FileType::Unknown => Err(Error::UnsupportedFileType(filename.to_string())),
        }
    }

    /// Extract PDF text page by page
    ///
    /// Pages without extractable text (scanned images, unsupported fonts)
    /// contribute an empty string. Only an unreadable document is an error.
    fn extract_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let mut content = String::new();
        for page_number in doc.get_pages().into_keys() {
            content.push_str(&Self::pdf_page_text(&doc, page_number));
            content.push('\n');
        }

        Ok(content.trim().to_string())
    }

    /// Text of one page without lopdf's trailing newline
    fn pdf_page_text(doc: &lopdf::Document, page_number: u32) -> String {
        match doc.extract_text(&[page_number]) {
            Ok(text) => {
                let text = text.replace('\0', "");
                text.strip_suffix('\n').unwrap_or(&text).to_string()
            }
            Err(e) => {
                tracing::debug!("No text extracted from page {}: {}", page_number, e);
                String::new()
            }
        }
    }

    /// Extract DOCX body paragraphs
    ///
    /// Tables, headers and footers are not visited.
    fn extract_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to open DOCX: {}", e)))?;

        let mut content = String::new();
        for child in &doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                push_paragraph_text(&paragraph.children, &mut content);
                content.push('\n');
            }
        }

        Ok(content.trim().to_string())
    }

    /// Decode plain text as strict UTF-8
    fn extract_text(filename: &str, data: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::file_parse(filename, format!("Invalid UTF-8: {}", e)))?;
        Ok(text.trim().to_string())
    }
}

fn push_paragraph_text(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, out),
            docx_rs::ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}

fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            docx_rs::RunChild::Break(br) if is_line_break(br) => out.push('\n'),
            docx_rs::RunChild::CarriageReturn(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Only text-wrapping breaks end a line; page and column breaks add nothing
fn is_line_break(br: &docx_rs::Break) -> bool {
    *br == docx_rs::Break::new(docx_rs::BreakType::TextWrapping)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Document builders shared by the ingestion tests

    use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// DOCX with one body paragraph per entry
    pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut doc = Docx::new();
        for text in paragraphs {
            doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        pack(doc)
    }

    /// DOCX with a paragraph followed by a one-cell table
    pub fn docx_with_table(paragraph: &str, cell: &str) -> Vec<u8> {
        let table = Table::new(vec![TableRow::new(vec![TableCell::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(cell)))])]);
        let doc = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph)))
            .add_table(table);
        pack(doc)
    }

    /// DOCX with one paragraph whose two runs are split by a break
    pub fn docx_with_break(before: &str, break_type: BreakType, after: &str) -> Vec<u8> {
        let run = Run::new()
            .add_text(before)
            .add_break(break_type)
            .add_text(after);
        pack(Docx::new().add_paragraph(Paragraph::new().add_run(run)))
    }

    fn pack(doc: Docx) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        doc.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    /// PDF with one page per entry; an empty entry yields a page without text
    pub fn pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_trimmed() {
        let text = FileParser::extract("notes.txt", FileType::Txt, b"Hello\n\nWorld  ").unwrap();
        assert_eq!(text, "Hello\n\nWorld");
    }

    #[test]
    fn test_plain_text_keeps_inner_whitespace() {
        let input = "  line one\n\tline two\t\n\n";
        let text = FileParser::extract("a.txt", FileType::Txt, input.as_bytes()).unwrap();
        assert_eq!(text, input.trim());
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let result = FileParser::extract("bad.txt", FileType::Txt, &[0x66, 0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(Error::FileParse { .. })));
    }

    #[test]
    fn test_empty_input_is_empty_document() {
        for file_type in FileType::EXTRACTABLE {
            assert_eq!(FileParser::extract("empty", file_type, b"").unwrap(), "");
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = FileParser::extract("data.csv", FileType::Unknown, b"a,b");
        assert!(matches!(result, Err(Error::UnsupportedFileType(_))));
    }

    #[test]
    fn test_docx_paragraphs_in_order() {
        let data = fixtures::docx(&["First paragraph", "", "Second paragraph"]);
        let text = FileParser::extract("doc.docx", FileType::Docx, &data).unwrap();
        assert_eq!(text, "First paragraph\n\nSecond paragraph");
    }

    #[test]
    fn test_docx_without_paragraphs() {
        let data = fixtures::docx(&[]);
        let text = FileParser::extract("empty.docx", FileType::Docx, &data).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_docx_skips_tables() {
        let data = fixtures::docx_with_table("Body text", "Cell text");
        let text = FileParser::extract("table.docx", FileType::Docx, &data).unwrap();
        assert_eq!(text, "Body text");
    }

    #[test]
    fn test_docx_line_break_becomes_newline() {
        let data = fixtures::docx_with_break("Hi", docx_rs::BreakType::TextWrapping, "There");
        let text = FileParser::extract("br.docx", FileType::Docx, &data).unwrap();
        assert_eq!(text, "Hi\nThere");
    }

    #[test]
    fn test_docx_page_and_column_breaks_add_nothing() {
        for break_type in [docx_rs::BreakType::Page, docx_rs::BreakType::Column] {
            let data = fixtures::docx_with_break("Hi", break_type, "There");
            let text = FileParser::extract("br.docx", FileType::Docx, &data).unwrap();
            assert_eq!(text, "HiThere");
        }
    }

    #[test]
    fn test_corrupt_docx_fails() {
        let result = FileParser::extract("broken.docx", FileType::Docx, b"not a zip archive");
        assert!(matches!(result, Err(Error::FileParse { .. })));
    }

    #[test]
    fn test_pdf_pages_in_order() {
        let data = fixtures::pdf(&["Hello World", "", "Last page"]);
        let text = FileParser::extract("doc.pdf", FileType::Pdf, &data).unwrap();

        assert_eq!(text, "Hello World\n\nLast page");
    }

    #[test]
    fn test_pdf_pages_separated_by_single_newline() {
        let data = fixtures::pdf(&["A", "B"]);
        let text = FileParser::extract("two.pdf", FileType::Pdf, &data).unwrap();
        assert_eq!(text, "A\nB");
    }

    #[test]
    fn test_pdf_without_text_is_empty() {
        let data = fixtures::pdf(&["", ""]);
        let text = FileParser::extract("scan.pdf", FileType::Pdf, &data).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_corrupt_pdf_fails() {
        let result = FileParser::extract("broken.pdf", FileType::Pdf, b"this is not a pdf");
        assert!(matches!(result, Err(Error::FileParse { .. })));
    }

    #[test]
    fn test_extract_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "  stored text \n").unwrap();

        let text = FileParser::extract_file(&path, FileType::Txt).unwrap();
        assert_eq!(text, "stored text");
    }

    #[test]
    fn test_extract_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileParser::extract_file(&dir.path().join("gone.pdf"), FileType::Pdf);
        assert!(matches!(result, Err(Error::FileParse { .. })));
    }
}
