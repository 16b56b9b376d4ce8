use std::fmt;

use palette::Srgb;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Coerce the cell to a finite-or-infinite number, the way a lenient
    /// numeric conversion would: text is parsed after trimming, bools count
    /// as 1/0, and anything unparsable (or NaN) yields `None`.
    pub fn to_numeric(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Null => return None,
        };
        (!v.is_nan()).then_some(v)
    }
}

// ---------------------------------------------------------------------------
// Table – named columns of cells
// ---------------------------------------------------------------------------

/// One named column of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Numeric values of the column with non-numeric cells dropped.
    ///
    /// Positions are not preserved: two columns filtered this way only line
    /// up again if their drops happened at the same rows.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(CellValue::to_numeric).collect()
    }
}

/// A parsed tabular file: ordered columns, as a dataframe would hold them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Column names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows (length of the longest column).
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// SpectrumSeries – one loaded dataset handed to the annotator
// ---------------------------------------------------------------------------

/// One dataset to plot: a name (usually the file name), its table, and the
/// colour its curve is drawn with.
#[derive(Debug, Clone)]
pub struct SpectrumSeries {
    pub name: String,
    pub table: Table,
    pub color: Srgb<u8>,
}

impl SpectrumSeries {
    pub fn new(name: impl Into<String>, table: Table, color: Srgb<u8>) -> Self {
        Self {
            name: name.into(),
            table,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_numeric_coerces_like_a_lenient_parser() {
        assert_eq!(CellValue::Integer(4000).to_numeric(), Some(4000.0));
        assert_eq!(CellValue::Float(92.5).to_numeric(), Some(92.5));
        assert_eq!(CellValue::String(" 87.1 ".into()).to_numeric(), Some(87.1));
        assert_eq!(CellValue::Bool(true).to_numeric(), Some(1.0));
        assert_eq!(CellValue::String("n/a".into()).to_numeric(), None);
        assert_eq!(CellValue::Float(f64::NAN).to_numeric(), None);
        assert_eq!(CellValue::Null.to_numeric(), None);
    }

    #[test]
    fn numeric_values_drop_bad_cells_without_keeping_positions() {
        let col = Column::new(
            "%T",
            vec![
                CellValue::Float(90.0),
                CellValue::String("oops".into()),
                CellValue::Null,
                CellValue::Integer(80),
            ],
        );
        assert_eq!(col.numeric_values(), vec![90.0, 80.0]);
    }

    #[test]
    fn table_len_is_longest_column() {
        let table = Table::new(vec![
            Column::new("a", vec![CellValue::Null; 3]),
            Column::new("b", vec![CellValue::Null; 5]),
        ]);
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
        assert!(Table::default().is_empty());
    }
}
