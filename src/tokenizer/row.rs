//! Row of raw cells

use serde::Serialize;

/// Ordered cells of one CSV line, in source column order.
///
/// Rows of a document may have different lengths. A missing trailing cell is
/// "absent", which is distinct from a present empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Creates a row from owned cells
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Number of cells present
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `index`, or `None` when the row is too short
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Iterates over the cells
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(String::as_str)
    }

    /// Borrow the cells
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Take ownership of the cells
    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }

    /// Indices of every cell equal to `value`
    pub fn positions_of<'a>(&'a self, value: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.as_str() == value)
            .map(|(i, _)| i)
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
