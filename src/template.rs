//! Monthly report template filling.
//!
//! A template is an ordinary word-processing document containing literal,
//! brace-delimited markers. Text markers are substituted inside the
//! paragraph that holds them; a paragraph holding a table marker is
//! replaced by an empty anchor paragraph followed by a generated table.
//!
//! The walk visits blocks in document order and recomputes its position
//! after every structural edit, so several table markers in one container
//! keep their relative order. Generated tables are stepped over and never
//! scanned themselves.

use crate::docx::paragraph::{self, JUSTIFY};
use crate::docx::table::{Column, TableBuilder, inches};
use crate::docx::{self, Document, Element, Node, tags};
use serde::Deserialize;
use tracing::debug;

/// Display name of the built-in style used for generated tables when present.
pub const GRID_STYLE_NAME: &str = "Table Grid";

pub const TITLE_COLUMNS: [Column<'static>; 2] = [
    Column {
        header: "ACTIVIDADES",
        width: inches(4.5),
    },
    Column {
        header: "MESES",
        width: inches(1.5),
    },
];

pub const DESCRIPTION_COLUMNS: [Column<'static>; 3] = [
    Column {
        header: "Actividad Planificada",
        width: inches(2.5),
    },
    Column {
        header: "Actividad Ejecutada",
        width: inches(3.0),
    },
    Column {
        header: "Verificador",
        width: inches(1.5),
    },
];

/// Markers replaced by plain text, in substitution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMarker {
    Activities,
    Month,
    Conclusions,
    Recommendations,
}

impl TextMarker {
    pub const ALL: [TextMarker; 4] = [
        TextMarker::Activities,
        TextMarker::Month,
        TextMarker::Conclusions,
        TextMarker::Recommendations,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            TextMarker::Activities => "{activities}",
            TextMarker::Month => "{month}",
            TextMarker::Conclusions => "{conclusions}",
            TextMarker::Recommendations => "{recommendations}",
        }
    }

    /// Whether substituting this marker justifies the surrounding text.
    pub fn justifies(self) -> bool {
        !matches!(self, TextMarker::Month)
    }
}

/// Markers replaced by a generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMarker {
    TitleActivities,
    DescriptionActivities,
}

impl TableMarker {
    pub fn literal(self) -> &'static str {
        match self {
            TableMarker::TitleActivities => "{titleActivities}",
            TableMarker::DescriptionActivities => "{descriptionActivities}",
        }
    }

    /// The title marker wins when a paragraph holds both.
    fn find(text: &str) -> Option<Self> {
        [TableMarker::TitleActivities, TableMarker::DescriptionActivities]
            .into_iter()
            .find(|marker| text.contains(marker.literal()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleRow {
    #[serde(alias = "actividad")]
    pub activity: String,
    #[serde(alias = "mes")]
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptionRow {
    #[serde(alias = "actividad")]
    pub activity: String,
    #[serde(alias = "descripcion")]
    pub description: String,
    #[serde(alias = "verificador")]
    pub verifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
    pub month: String,
    pub activities: String,
    pub conclusions: String,
    pub recommendations: String,
    pub title_rows: Vec<TitleRow>,
    pub description_rows: Vec<DescriptionRow>,
}

impl TemplateValues {
    fn text_for(&self, marker: TextMarker) -> &str {
        match marker {
            TextMarker::Activities => &self.activities,
            TextMarker::Month => &self.month,
            TextMarker::Conclusions => &self.conclusions,
            TextMarker::Recommendations => &self.recommendations,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub tables_inserted: usize,
    pub paragraphs_updated: usize,
    pub cells_updated: usize,
}

impl FillSummary {
    pub fn modified(&self) -> bool {
        self.tables_inserted + self.paragraphs_updated + self.cells_updated > 0
    }
}

/// Replace every marker in the document body. The document is only
/// mutated in memory; saving is up to the caller.
pub fn fill(document: &mut Document, values: &TemplateValues) -> docx::Result<FillSummary> {
    let grid_style = document.style_id(GRID_STYLE_NAME).map(str::to_owned);
    let mut filler = Filler {
        values,
        grid_style,
        summary: FillSummary::default(),
    };
    filler.fill_blocks(document.body_mut()?, Scope::Body);
    Ok(filler.summary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Body,
    Cell,
}

#[derive(Debug, Default)]
struct BlockOutcome {
    substituted: bool,
    justify: bool,
}

struct Filler<'a> {
    values: &'a TemplateValues,
    grid_style: Option<String>,
    summary: FillSummary,
}

impl Filler<'_> {
    fn fill_blocks(&mut self, container: &mut Element, scope: Scope) -> BlockOutcome {
        let mut outcome = BlockOutcome::default();
        let mut index = 0;
        while index < container.children.len() {
            let Node::Element(block) = &mut container.children[index] else {
                index += 1;
                continue;
            };

            if block.is(tags::PARAGRAPH) {
                let text = paragraph::text(block);
                if let Some(marker) = TableMarker::find(&text) {
                    let table = self.build_table(marker);
                    container.children[index] = Node::Element(paragraph::empty());
                    container.children.insert(index + 1, Node::Element(table));
                    self.summary.tables_inserted += 1;
                    debug!(marker = marker.literal(), position = index, "table inserted");
                    index += 2;
                    continue;
                }
                if let Some(justify) = self.substitute(block, text) {
                    outcome.substituted = true;
                    match scope {
                        Scope::Body => {
                            self.summary.paragraphs_updated += 1;
                            if justify {
                                paragraph::set_alignment(block, JUSTIFY);
                            }
                        }
                        Scope::Cell => outcome.justify |= justify,
                    }
                }
            } else if block.is(tags::TABLE) {
                self.fill_table(block);
            } else if block.is(tags::STRUCTURED_DOCUMENT_TAG)
                && let Some(content) = block.child_mut(tags::SDT_CONTENT)
            {
                let inner = self.fill_blocks(content, scope);
                outcome.substituted |= inner.substituted;
                outcome.justify |= inner.justify;
            }
            index += 1;
        }
        outcome
    }

    fn fill_table(&mut self, table: &mut Element) {
        for row in table.elements_mut().filter(|element| element.is(tags::TABLE_ROW)) {
            for cell in row.elements_mut().filter(|element| element.is(tags::TABLE_CELL)) {
                self.fill_cell(cell);
            }
        }
    }

    fn fill_cell(&mut self, cell: &mut Element) {
        let outcome = self.fill_blocks(cell, Scope::Cell);
        if outcome.substituted {
            self.summary.cells_updated += 1;
        }
        if outcome.justify {
            justify_blocks(cell);
        }
        // A cell must end with a paragraph.
        if cell
            .elements()
            .last()
            .is_some_and(|element| element.is(tags::TABLE))
        {
            cell.push(paragraph::empty());
        }
    }

    /// Substitute text markers in order on the evolving text. Returns whether
    /// a justifying marker was replaced, or `None` if nothing matched.
    fn substitute(&self, block: &mut Element, original: String) -> Option<bool> {
        if !TextMarker::ALL
            .iter()
            .any(|marker| original.contains(marker.literal()))
        {
            return None;
        }

        let mut text = original;
        let mut justify = false;
        for marker in TextMarker::ALL {
            if text.contains(marker.literal()) {
                text = text.replace(marker.literal(), self.values.text_for(marker));
                justify |= marker.justifies();
                debug!(marker = marker.literal(), "marker replaced");
            }
        }
        paragraph::set_text(block, &text);
        Some(justify)
    }

    fn build_table(&self, marker: TableMarker) -> Element {
        let grid_style = self.grid_style.as_deref();
        match marker {
            TableMarker::TitleActivities => {
                let mut builder = TableBuilder::new(&TITLE_COLUMNS).grid_style(grid_style);
                for row in &self.values.title_rows {
                    builder.row([row.activity.as_str(), row.month.as_str()]);
                }
                builder.build()
            }
            TableMarker::DescriptionActivities => {
                let mut builder = TableBuilder::new(&DESCRIPTION_COLUMNS).grid_style(grid_style);
                for row in &self.values.description_rows {
                    builder.row([
                        row.activity.as_str(),
                        row.description.as_str(),
                        row.verifier.as_str(),
                    ]);
                }
                builder.build()
            }
        }
    }
}

/// Justify every block paragraph of `container`, content controls included.
/// Nested tables are left alone; their cells are filled on their own.
fn justify_blocks(container: &mut Element) {
    for block in container.elements_mut() {
        if block.is(tags::PARAGRAPH) {
            paragraph::set_alignment(block, JUSTIFY);
        } else if block.is(tags::STRUCTURED_DOCUMENT_TAG)
            && let Some(content) = block.child_mut(tags::SDT_CONTENT)
        {
            justify_blocks(content);
        }
    }
}
