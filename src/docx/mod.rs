//! Just enough of the WordprocessingML package model to edit a report
//! template in place: open the zip package, mutate `word/document.xml` as an
//! element tree, write everything back.

mod document;
mod error;
mod package;
pub mod paragraph;
pub mod table;
mod xml;

pub use document::Document;
pub use error::Result;
pub use xml::{Element, Node, illegal_char};

/// Qualified names, assuming the conventional `w` prefix for the main namespace.
pub mod tags {
    pub const DOCUMENT: &str = "w:document";
    pub const BODY: &str = "w:body";
    pub const PARAGRAPH: &str = "w:p";
    pub const PARAGRAPH_PROPERTIES: &str = "w:pPr";
    pub const RUN: &str = "w:r";
    pub const RUN_PROPERTIES: &str = "w:rPr";
    pub const TEXT: &str = "w:t";
    pub const TAB: &str = "w:tab";
    pub const BREAK: &str = "w:br";
    pub const CARRIAGE_RETURN: &str = "w:cr";
    pub const BOLD: &str = "w:b";
    pub const JUSTIFICATION: &str = "w:jc";
    pub const DELETED: &str = "w:del";
    pub const DRAWING: &str = "w:drawing";
    pub const PICTURE: &str = "w:pict";
    pub const ALTERNATE_CONTENT: &str = "mc:AlternateContent";

    pub const TABLE: &str = "w:tbl";
    pub const TABLE_PROPERTIES: &str = "w:tblPr";
    pub const TABLE_STYLE: &str = "w:tblStyle";
    pub const TABLE_WIDTH: &str = "w:tblW";
    pub const TABLE_BORDERS: &str = "w:tblBorders";
    pub const TABLE_GRID: &str = "w:tblGrid";
    pub const GRID_COLUMN: &str = "w:gridCol";
    pub const TABLE_ROW: &str = "w:tr";
    pub const TABLE_CELL: &str = "w:tc";
    pub const CELL_PROPERTIES: &str = "w:tcPr";
    pub const CELL_WIDTH: &str = "w:tcW";
    pub const SHADING: &str = "w:shd";

    pub const STRUCTURED_DOCUMENT_TAG: &str = "w:sdt";
    pub const SDT_CONTENT: &str = "w:sdtContent";

    pub const STYLES: &str = "w:styles";
    pub const STYLE: &str = "w:style";
    pub const STYLE_ID: &str = "w:styleId";
    pub const NAME: &str = "w:name";

    pub const VAL: &str = "w:val";
    pub const TYPE: &str = "w:type";
    pub const WIDTH: &str = "w:w";
    pub const SIZE: &str = "w:sz";
    pub const SPACE: &str = "w:space";
    pub const COLOR: &str = "w:color";
    pub const FILL: &str = "w:fill";
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

    pub const TABLE_GRID_STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/></w:style></w:styles>"#;

    pub fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    pub fn paragraph(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    pub fn write_docx(path: &Path, body: &str, styles: Option<&str>) {
        let file = File::create(path).expect("create docx");
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).expect("start");
        zip.write_all(CONTENT_TYPES.as_bytes()).expect("write");
        zip.start_file("_rels/.rels", options).expect("start");
        zip.write_all(ROOT_RELS.as_bytes()).expect("write");
        zip.start_file("word/document.xml", options).expect("start");
        zip.write_all(document_xml(body).as_bytes()).expect("write");
        if let Some(styles) = styles {
            zip.start_file("word/styles.xml", options).expect("start");
            zip.write_all(styles.as_bytes()).expect("write");
        }
        zip.finish().expect("finish");
    }
}
