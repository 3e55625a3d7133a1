//! Sheet and cell model handed to workbook writers.

use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
    Empty,
}

impl Cell {
    /// A text cell, or [`Cell::Empty`] for an empty string.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Empty => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_i64(*n),
            Self::Empty => serializer.serialize_str(""),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

/// A named grid of rows. Rows may differ in width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// A sheet whose first row is `title`.
    pub fn new(name: impl Into<String>, title: &str) -> Self {
        Self {
            name: name.into(),
            rows: vec![vec![Cell::text(title)]],
        }
    }

    pub fn row<I, C>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// A one-cell row.
    pub fn line(&mut self, text: impl Into<Cell>) -> &mut Self {
        self.rows.push(vec![text.into()]);
        self
    }

    /// A label/value row.
    pub fn pair(&mut self, label: &str, value: impl Into<Cell>) -> &mut Self {
        self.rows.push(vec![Cell::text(label), value.into()]);
        self
    }

    /// An empty separator row.
    pub fn blank(&mut self) -> &mut Self {
        self.rows.push(vec![Cell::Empty]);
        self
    }

    /// Whether any cell in the sheet has exactly this text.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|cell| cell.as_text() == Some(needle))
    }
}

/// An ordered set of sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
