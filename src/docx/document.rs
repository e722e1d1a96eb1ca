use super::error::{DocxError, Result};
use super::package::Package;
use super::tags;
use super::xml::{Element, XmlDocument};
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// A word-processing document opened for in-place editing.
#[derive(Debug)]
pub struct Document {
    package: Package,
    xml: XmlDocument,
    styles: Vec<StyleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StyleEntry {
    id: String,
    name: String,
}

impl Document {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_package(Package::open(path)?)
    }

    fn from_package(package: Package) -> Result<Self> {
        let bytes = package
            .part(DOCUMENT_PART)
            .ok_or_else(|| DocxError::MissingPart(DOCUMENT_PART.to_string()))?;
        let xml = parse_part(DOCUMENT_PART, bytes)?;
        if !xml.root.is(tags::DOCUMENT) {
            return Err(DocxError::MissingElement(tags::DOCUMENT));
        }
        if xml.root.child(tags::BODY).is_none() {
            return Err(DocxError::MissingElement(tags::BODY));
        }

        let styles = match package.part(STYLES_PART) {
            Some(bytes) => read_styles(&parse_part(STYLES_PART, bytes)?),
            None => Vec::new(),
        };

        Ok(Self {
            package,
            xml,
            styles,
        })
    }

    #[cfg(test)]
    pub fn body(&self) -> Result<&Element> {
        self.xml
            .root
            .child(tags::BODY)
            .ok_or(DocxError::MissingElement(tags::BODY))
    }

    pub fn body_mut(&mut self) -> Result<&mut Element> {
        self.xml
            .root
            .child_mut(tags::BODY)
            .ok_or(DocxError::MissingElement(tags::BODY))
    }

    /// Style id of the style whose display name is `name`, if the catalog has one.
    pub fn style_id(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|style| style.name == name)
            .map(|style| style.id.as_str())
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.package.set_part(DOCUMENT_PART, self.xml.to_bytes());
        self.package.save(path)
    }
}

fn parse_part(part: &str, bytes: &[u8]) -> Result<XmlDocument> {
    XmlDocument::parse(bytes).map_err(|message| DocxError::Xml {
        part: part.to_string(),
        message,
    })
}

fn read_styles(styles: &XmlDocument) -> Vec<StyleEntry> {
    if !styles.root.is(tags::STYLES) {
        return Vec::new();
    }
    styles
        .root
        .elements()
        .filter(|element| element.is(tags::STYLE))
        .filter_map(|style| {
            let id = style.attr(tags::STYLE_ID)?;
            let name = style.child(tags::NAME)?.attr(tags::VAL)?;
            Some(StyleEntry {
                id: id.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::fixtures;
    use crate::docx::paragraph;
    use tempfile::tempdir;

    #[test]
    fn opens_body_paragraphs() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("report.docx");
        let body = format!("{}{}", fixtures::paragraph("one"), fixtures::paragraph("two"));
        fixtures::write_docx(&path, &body, None);

        let document = Document::open(&path).expect("open");
        let texts: Vec<String> = document
            .body()
            .expect("body")
            .elements()
            .filter(|e| e.is(tags::PARAGRAPH))
            .map(paragraph::text)
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(document.style_id("Table Grid"), None);
    }

    #[test]
    fn resolves_style_by_display_name() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("styled.docx");
        fixtures::write_docx(&path, "", Some(fixtures::TABLE_GRID_STYLES));

        let document = Document::open(&path).expect("open");
        assert_eq!(document.style_id("Table Grid"), Some("TableGrid"));
        assert_eq!(document.style_id("Normal"), Some("Normal"));
    }

    #[test]
    fn save_round_trips_edits() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("report.docx");
        fixtures::write_docx(&path, &fixtures::paragraph("before"), None);

        let mut document = Document::open(&path).expect("open");
        let body = document.body_mut().expect("body");
        let first = body.child_mut(tags::PARAGRAPH).expect("paragraph");
        paragraph::set_text(first, "after");
        document.save(&path).expect("save");

        let reopened = Document::open(&path).expect("reopen");
        let first = reopened
            .body()
            .expect("body")
            .child(tags::PARAGRAPH)
            .expect("paragraph");
        assert_eq!(paragraph::text(first), "after");
    }

    #[test]
    fn missing_document_part() {
        let mut package = Package::default();
        package.set_part("word/other.xml", b"<x/>".to_vec());
        let err = Document::from_package(package).expect_err("error");
        assert!(matches!(err, DocxError::MissingPart(_)));
    }

    #[test]
    fn wrong_root_element() {
        let mut package = Package::default();
        package.set_part(DOCUMENT_PART, b"<w:styles/>".to_vec());
        let err = Document::from_package(package).expect_err("error");
        assert!(matches!(err, DocxError::MissingElement(tags::DOCUMENT)));
    }

    #[test]
    fn malformed_document_part() {
        let mut package = Package::default();
        package.set_part(DOCUMENT_PART, b"<w:document><w:body></w:document>".to_vec());
        let err = Document::from_package(package).expect_err("error");
        assert!(matches!(err, DocxError::Xml { .. }));
    }
}
