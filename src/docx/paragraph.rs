//! Paragraph (`w:p`) text access and rewriting.

use super::tags;
use super::xml::{Element, Node};

/// `w:jc` value for justified text.
pub const JUSTIFY: &str = "both";

/// Elements that follow `w:jc` inside `w:pPr` in schema order.
const JUSTIFICATION_SUCCESSORS: &[&str] = &[
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

pub fn empty() -> Element {
    Element::new(tags::PARAGRAPH)
}

pub fn with_run(text: &str, bold: bool) -> Element {
    let properties = bold.then(|| Element::new(tags::RUN_PROPERTIES).with_child(Element::new(tags::BOLD)));
    empty().with_child(run(text, properties))
}

/// Visible text: run text, tabs as `\t`, line breaks as `\n`.
pub fn text(paragraph: &Element) -> String {
    let mut out = String::new();
    collect_text(paragraph, &mut out);
    out
}

fn collect_text(element: &Element, out: &mut String) {
    for child in element.elements() {
        match child.name.as_str() {
            tags::TEXT => out.push_str(&child.text()),
            tags::TAB => out.push('\t'),
            tags::BREAK => {
                if child
                    .attr(tags::TYPE)
                    .is_none_or(|kind| kind == "textWrapping")
                {
                    out.push('\n');
                }
            }
            tags::CARRIAGE_RETURN => out.push('\n'),
            tags::PARAGRAPH_PROPERTIES
            | tags::RUN_PROPERTIES
            | tags::DELETED
            | tags::DRAWING
            | tags::PICTURE
            | tags::ALTERNATE_CONTENT => {}
            _ => collect_text(child, out),
        }
    }
}

/// Replace the paragraph content with a single run holding `text`.
///
/// Paragraph properties survive, and so does the character formatting of the
/// first run. Everything else inline (other runs, hyperlinks, bookmarks) is
/// dropped.
pub fn set_text(paragraph: &mut Element, text: &str) {
    let run_properties = first_run_properties(paragraph).cloned();
    paragraph.children.retain(
        |node| matches!(node, Node::Element(element) if element.is(tags::PARAGRAPH_PROPERTIES)),
    );
    paragraph.push(run(text, run_properties));
}

fn first_run_properties(element: &Element) -> Option<&Element> {
    for child in element.elements() {
        if child.is(tags::RUN) {
            return child.child(tags::RUN_PROPERTIES);
        }
        if child.is(tags::PARAGRAPH_PROPERTIES) {
            continue;
        }
        if let Some(found) = first_run_properties(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
pub fn alignment(paragraph: &Element) -> Option<&str> {
    paragraph
        .child(tags::PARAGRAPH_PROPERTIES)?
        .child(tags::JUSTIFICATION)?
        .attr(tags::VAL)
}

pub fn set_alignment(paragraph: &mut Element, value: &str) {
    paragraph.update_leading_child(tags::PARAGRAPH_PROPERTIES, |properties| {
        properties.upsert_child(
            Element::new(tags::JUSTIFICATION).with_attr(tags::VAL, value),
            JUSTIFICATION_SUCCESSORS,
        );
    });
}

/// Build a `w:r`, mapping `\t` to `w:tab` and `\n` to `w:br`.
pub fn run(text: &str, properties: Option<Element>) -> Element {
    let mut run = Element::new(tags::RUN);
    if let Some(properties) = properties {
        run.push(properties);
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    for (line_index, line) in normalized.split('\n').enumerate() {
        if line_index > 0 {
            run.push(Element::new(tags::BREAK));
        }
        for (segment_index, segment) in line.split('\t').enumerate() {
            if segment_index > 0 {
                run.push(Element::new(tags::TAB));
            }
            if !segment.is_empty() {
                run.push(
                    Element::new(tags::TEXT)
                        .with_attr("xml:space", "preserve")
                        .with_text(segment),
                );
            }
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_run(text: &str) -> Element {
        Element::new(tags::RUN).with_child(Element::new(tags::TEXT).with_text(text))
    }

    #[test]
    fn text_spans_runs_tabs_and_breaks() {
        let paragraph = empty()
            .with_child(text_run("Re"))
            .with_child(
                Element::new(tags::RUN)
                    .with_child(Element::new(tags::TEXT).with_text("port"))
                    .with_child(Element::new(tags::TAB))
                    .with_child(Element::new(tags::BREAK))
                    .with_child(Element::new(tags::BREAK).with_attr(tags::TYPE, "page")),
            )
            .with_child(Element::new("w:hyperlink").with_child(text_run("!")));
        assert_eq!(text(&paragraph), "Report\t\n!");
    }

    #[test]
    fn marker_split_across_runs_is_visible() {
        let paragraph = empty()
            .with_child(text_run("{mon"))
            .with_child(text_run("th}"));
        assert!(text(&paragraph).contains("{month}"));
    }

    #[test]
    fn deleted_text_is_ignored() {
        let paragraph = empty().with_child(text_run("kept")).with_child(
            Element::new(tags::DELETED).with_child(text_run("gone")),
        );
        assert_eq!(text(&paragraph), "kept");
    }

    #[test]
    fn set_text_keeps_paragraph_and_first_run_properties() {
        let mut paragraph = empty()
            .with_child(
                Element::new(tags::PARAGRAPH_PROPERTIES)
                    .with_child(Element::new("w:pStyle").with_attr(tags::VAL, "Heading1")),
            )
            .with_child(
                Element::new(tags::RUN)
                    .with_child(
                        Element::new(tags::RUN_PROPERTIES).with_child(Element::new("w:i")),
                    )
                    .with_child(Element::new(tags::TEXT).with_text("{month}")),
            )
            .with_child(text_run(" tail"));

        set_text(&mut paragraph, "March tail");

        assert_eq!(text(&paragraph), "March tail");
        let names: Vec<&str> = paragraph.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![tags::PARAGRAPH_PROPERTIES, tags::RUN]);
        let run = paragraph.child(tags::RUN).expect("run");
        assert!(
            run.child(tags::RUN_PROPERTIES)
                .and_then(|props| props.child("w:i"))
                .is_some()
        );
    }

    #[test]
    fn set_text_maps_tabs_and_newlines() {
        let mut paragraph = empty().with_child(text_run("x"));
        set_text(&mut paragraph, "a\tb\r\nc");
        assert_eq!(text(&paragraph), "a\tb\nc");
        let run = paragraph.child(tags::RUN).expect("run");
        let names: Vec<&str> = run.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![tags::TEXT, tags::TAB, tags::TEXT, tags::BREAK, tags::TEXT]
        );
    }

    #[test]
    fn set_alignment_creates_and_replaces_jc() {
        let mut paragraph = empty().with_child(text_run("x"));
        assert_eq!(alignment(&paragraph), None);
        set_alignment(&mut paragraph, "center");
        assert_eq!(alignment(&paragraph), Some("center"));
        set_alignment(&mut paragraph, JUSTIFY);
        assert_eq!(alignment(&paragraph), Some(JUSTIFY));
        let properties = paragraph.child(tags::PARAGRAPH_PROPERTIES).expect("pPr");
        assert_eq!(properties.elements().count(), 1);
        assert!(paragraph.elements().next().is_some_and(|e| e.is(tags::PARAGRAPH_PROPERTIES)));
    }

    #[test]
    fn set_alignment_lands_before_run_properties() {
        let mut paragraph = empty().with_child(
            Element::new(tags::PARAGRAPH_PROPERTIES)
                .with_child(Element::new("w:spacing"))
                .with_child(Element::new(tags::RUN_PROPERTIES)),
        );
        set_alignment(&mut paragraph, JUSTIFY);
        let properties = paragraph.child(tags::PARAGRAPH_PROPERTIES).expect("pPr");
        let names: Vec<&str> = properties.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:spacing", tags::JUSTIFICATION, tags::RUN_PROPERTIES]);
    }

    #[test]
    fn bold_run_paragraph() {
        let paragraph = with_run("ACTIVIDADES", true);
        let run = paragraph.child(tags::RUN).expect("run");
        assert!(
            run.child(tags::RUN_PROPERTIES)
                .and_then(|props| props.child(tags::BOLD))
                .is_some()
        );
        assert_eq!(text(&paragraph), "ACTIVIDADES");
    }
}
