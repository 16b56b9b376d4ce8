use super::model::{Column, Table};

// ---------------------------------------------------------------------------
// Column roles: which columns hold wavenumber and transmittance
// ---------------------------------------------------------------------------

/// The column a role is missing for, reported when resolution fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingColumns {
    Wavenumber,
    Intensity,
    Both,
}

/// Result of matching a table's column names against the two roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnRoles<'a> {
    Found {
        wavenumber: &'a Column,
        intensity: &'a Column,
    },
    NotFound(MissingColumns),
}

/// Whether a header names the wavenumber axis (`"cm"`, case-insensitive).
pub fn is_wavenumber_header(name: &str) -> bool {
    name.to_lowercase().contains("cm")
}

/// Whether a header names the transmittance axis (`"%t"` or `"trans"`).
pub fn is_intensity_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("%t") || lower.contains("trans")
}

/// Pick the first matching column for each role.
///
/// Both roles are matched independently, so a single column whose name
/// satisfies both patterns may be used for both axes.
pub fn resolve(table: &Table) -> ColumnRoles<'_> {
    let wavenumber = table.columns.iter().find(|c| is_wavenumber_header(&c.name));
    let intensity = table.columns.iter().find(|c| is_intensity_header(&c.name));

    match (wavenumber, intensity) {
        (Some(wavenumber), Some(intensity)) => ColumnRoles::Found {
            wavenumber,
            intensity,
        },
        (None, Some(_)) => ColumnRoles::NotFound(MissingColumns::Wavenumber),
        (Some(_), None) => ColumnRoles::NotFound(MissingColumns::Intensity),
        (None, None) => ColumnRoles::NotFound(MissingColumns::Both),
    }
}

/// Numeric `(x, y)` vectors for the resolved columns.
///
/// Each column drops its own non-numeric cells, then both are cut to the
/// shorter length. Pairing is by position after the drops.
pub fn numeric_pair(wavenumber: &Column, intensity: &Column) -> (Vec<f64>, Vec<f64>) {
    let mut x = wavenumber.numeric_values();
    let mut y = intensity.numeric_values();
    let n = x.len().min(y.len());
    x.truncate(n);
    y.truncate(n);
    (x, y)
}
