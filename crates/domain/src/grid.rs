/// A single grid position as produced by an external spreadsheet decoder.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Cell {
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl Cell {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Absent | Cell::Number(_) => None,
        }
    }

    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(text) => text.trim().parse().ok(),
            Cell::Absent => None,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Absent => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(f64::from(value))
    }
}

/// An ordered sequence of rows of cells. Rows may have differing lengths.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

static ABSENT: Cell = Cell::Absent;

impl Grid {
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Cells outside the stored rows and columns are absent.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&ABSENT)
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}
