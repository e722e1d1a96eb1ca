//! Generated tables: bold shaded header row, fixed column widths, centered.

use super::paragraph;
use super::tags;
use super::xml::Element;

/// Header cell background, hex RGB.
pub const HEADER_FILL: &str = "F4F4F4";
/// Border line color used when no grid style is available.
pub const BORDER_COLOR: &str = "BCBCBC";
/// Border width in eighths of a point.
pub const BORDER_SIZE: u32 = 5;

const BORDER_EDGES: [&str; 6] = [
    "w:top",
    "w:left",
    "w:bottom",
    "w:right",
    "w:insideH",
    "w:insideV",
];

const TWIPS_PER_INCH: f64 = 1440.0;

/// Width in twentieths of a point.
pub const fn inches(value: f64) -> u32 {
    (value * TWIPS_PER_INCH) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    pub header: &'a str,
    pub width: u32,
}

pub struct TableBuilder<'a> {
    columns: &'a [Column<'a>],
    grid_style: Option<&'a str>,
    rows: Vec<Vec<String>>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(columns: &'a [Column<'a>]) -> Self {
        Self {
            columns,
            grid_style: None,
            rows: Vec::new(),
        }
    }

    /// Reference a table style by id instead of drawing explicit borders.
    pub fn grid_style(mut self, style_id: Option<&'a str>) -> Self {
        self.grid_style = style_id;
        self
    }

    /// Append a data row. Extra values are ignored, missing ones left blank.
    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn build(&self) -> Element {
        let mut table = Element::new(tags::TABLE)
            .with_child(self.properties())
            .with_child(self.grid());
        table.push(self.header_row());
        for cells in &self.rows {
            table.push(self.data_row(cells));
        }
        table
    }

    fn properties(&self) -> Element {
        let mut properties = Element::new(tags::TABLE_PROPERTIES);
        if let Some(style_id) = self.grid_style {
            properties.push(Element::new(tags::TABLE_STYLE).with_attr(tags::VAL, style_id));
        }
        properties.push(
            Element::new(tags::TABLE_WIDTH)
                .with_attr(tags::WIDTH, "0")
                .with_attr(tags::TYPE, "auto"),
        );
        properties.push(Element::new(tags::JUSTIFICATION).with_attr(tags::VAL, "center"));
        if self.grid_style.is_none() {
            properties.push(borders());
        }
        properties
    }

    fn grid(&self) -> Element {
        let mut grid = Element::new(tags::TABLE_GRID);
        for column in self.columns {
            grid.push(
                Element::new(tags::GRID_COLUMN).with_attr(tags::WIDTH, column.width.to_string()),
            );
        }
        grid
    }

    fn header_row(&self) -> Element {
        let mut row = Element::new(tags::TABLE_ROW);
        for column in self.columns {
            let properties = cell_properties(column.width).with_child(
                Element::new(tags::SHADING)
                    .with_attr(tags::VAL, "clear")
                    .with_attr(tags::COLOR, "auto")
                    .with_attr(tags::FILL, HEADER_FILL),
            );
            row.push(
                Element::new(tags::TABLE_CELL)
                    .with_child(properties)
                    .with_child(paragraph::with_run(column.header, true)),
            );
        }
        row
    }

    fn data_row(&self, cells: &[String]) -> Element {
        let mut row = Element::new(tags::TABLE_ROW);
        for (index, column) in self.columns.iter().enumerate() {
            let text = cells.get(index).map(String::as_str).unwrap_or("");
            row.push(
                Element::new(tags::TABLE_CELL)
                    .with_child(cell_properties(column.width))
                    .with_child(paragraph::with_run(text, false)),
            );
        }
        row
    }
}

fn cell_properties(width: u32) -> Element {
    Element::new(tags::CELL_PROPERTIES).with_child(
        Element::new(tags::CELL_WIDTH)
            .with_attr(tags::WIDTH, width.to_string())
            .with_attr(tags::TYPE, "dxa"),
    )
}

fn borders() -> Element {
    let mut borders = Element::new(tags::TABLE_BORDERS);
    for edge in BORDER_EDGES {
        borders.push(
            Element::new(edge)
                .with_attr(tags::VAL, "single")
                .with_attr(tags::SIZE, BORDER_SIZE.to_string())
                .with_attr(tags::SPACE, "0")
                .with_attr(tags::COLOR, BORDER_COLOR),
        );
    }
    borders
}

/// Cell texts per row, header included.
#[cfg(test)]
pub fn row_texts(table: &Element) -> Vec<Vec<String>> {
    table
        .elements()
        .filter(|element| element.is(tags::TABLE_ROW))
        .map(|row| {
            row.elements()
                .filter(|element| element.is(tags::TABLE_CELL))
                .map(|cell| {
                    cell.elements()
                        .filter(|element| element.is(tags::PARAGRAPH))
                        .map(paragraph::text)
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [Column<'static>; 2] = [
        Column {
            header: "ACTIVIDADES",
            width: inches(4.5),
        },
        Column {
            header: "MESES",
            width: inches(1.5),
        },
    ];

    #[test]
    fn inch_conversion() {
        assert_eq!(inches(4.5), 6480);
        assert_eq!(inches(1.5), 2160);
        assert_eq!(inches(2.5), 3600);
        assert_eq!(inches(3.0), 4320);
    }

    #[test]
    fn header_and_rows() {
        let mut builder = TableBuilder::new(&COLUMNS);
        builder.row(["A", "March"]);
        builder.row(["B", "April"]);
        let table = builder.build();

        assert_eq!(
            row_texts(&table),
            vec![
                vec!["ACTIVIDADES".to_string(), "MESES".to_string()],
                vec!["A".to_string(), "March".to_string()],
                vec!["B".to_string(), "April".to_string()],
            ]
        );
    }

    #[test]
    fn header_cells_are_bold_and_shaded() {
        let table = TableBuilder::new(&COLUMNS).build();
        let header = table.child(tags::TABLE_ROW).expect("header row");
        for cell in header.elements().filter(|e| e.is(tags::TABLE_CELL)) {
            let properties = cell.child(tags::CELL_PROPERTIES).expect("tcPr");
            assert_eq!(
                properties.child(tags::SHADING).and_then(|s| s.attr(tags::FILL)),
                Some(HEADER_FILL)
            );
            let run = cell
                .child(tags::PARAGRAPH)
                .and_then(|p| p.child(tags::RUN))
                .expect("run");
            assert!(
                run.child(tags::RUN_PROPERTIES)
                    .and_then(|props| props.child(tags::BOLD))
                    .is_some()
            );
        }
    }

    #[test]
    fn widths_on_grid_and_every_cell() {
        let mut builder = TableBuilder::new(&COLUMNS);
        builder.row(["A", "March"]);
        let table = builder.build();

        let grid: Vec<&str> = table
            .child(tags::TABLE_GRID)
            .expect("grid")
            .elements()
            .filter_map(|col| col.attr(tags::WIDTH))
            .collect();
        assert_eq!(grid, vec!["6480", "2160"]);

        for row in table.elements().filter(|e| e.is(tags::TABLE_ROW)) {
            let widths: Vec<&str> = row
                .elements()
                .filter_map(|cell| cell.child(tags::CELL_PROPERTIES))
                .filter_map(|props| props.child(tags::CELL_WIDTH))
                .filter_map(|width| width.attr(tags::WIDTH))
                .collect();
            assert_eq!(widths, vec!["6480", "2160"]);
        }
    }

    #[test]
    fn explicit_borders_without_grid_style() {
        let table = TableBuilder::new(&COLUMNS).build();
        let properties = table.child(tags::TABLE_PROPERTIES).expect("tblPr");
        assert!(properties.child(tags::TABLE_STYLE).is_none());
        assert_eq!(
            properties.child(tags::JUSTIFICATION).and_then(|jc| jc.attr(tags::VAL)),
            Some("center")
        );
        let edges: Vec<&str> = properties
            .child(tags::TABLE_BORDERS)
            .expect("borders")
            .elements()
            .map(|edge| edge.name.as_str())
            .collect();
        assert_eq!(edges, BORDER_EDGES.to_vec());
    }

    #[test]
    fn grid_style_replaces_borders() {
        let table = TableBuilder::new(&COLUMNS)
            .grid_style(Some("TableGrid"))
            .build();
        let properties = table.child(tags::TABLE_PROPERTIES).expect("tblPr");
        assert_eq!(
            properties.child(tags::TABLE_STYLE).and_then(|s| s.attr(tags::VAL)),
            Some("TableGrid")
        );
        assert!(properties.child(tags::TABLE_BORDERS).is_none());
        let first = properties.elements().next().expect("first property");
        assert!(first.is(tags::TABLE_STYLE));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut builder = TableBuilder::new(&COLUMNS);
        builder.row(["only"]);
        let rows = row_texts(&builder.build());
        assert_eq!(rows[1], vec!["only".to_string(), String::new()]);
    }
}
