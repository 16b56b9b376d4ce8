use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Detected peaks table
// ---------------------------------------------------------------------------

pub const RANGE_HEADER: &str = "Wavenumber Range (cm⁻¹)";
pub const GROUP_HEADER: &str = "Functional Group";

/// One labelled region of one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedPeak {
    #[serde(rename = "Wavenumber Range (cm⁻¹)")]
    pub range: String,
    #[serde(rename = "Functional Group")]
    pub label: String,
}

/// The two-column table of labelled regions, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PeakTable {
    pub rows: Vec<DetectedPeak>,
}

impl PeakTable {
    pub fn push(&mut self, range: String, label: &str) {
        self.rows.push(DetectedPeak {
            range,
            label: label.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV with the two column headers.
    ///
    /// An empty table still gets its header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if self.rows.is_empty() {
            wtr.write_record([RANGE_HEADER, GROUP_HEADER])
                .context("writing CSV header")?;
        }
        for row in &self.rows {
            wtr.serialize(row).context("writing CSV row")?;
        }
        wtr.flush().context("flushing CSV")?;
        Ok(())
    }

    /// Write the table as a JSON array of records.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("writing JSON")
    }
}

impl fmt::Display for PeakTable {
    /// Plain aligned text, for terminals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.range.chars().count())
            .chain(std::iter::once(RANGE_HEADER.chars().count()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{RANGE_HEADER:<width$}  {GROUP_HEADER}")?;
        for row in &self.rows {
            writeln!(f, "{:<width$}  {}", row.range, row.label)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Label placement
// ---------------------------------------------------------------------------

/// Greedy label collision check for one render.
///
/// Every accepted label x position is remembered; a new candidate closer
/// than `spacing` to any of them is refused.  The outcome depends on the
/// order candidates arrive in.
#[derive(Debug, Clone)]
pub struct LabelPlacer {
    spacing: f64,
    used: Vec<f64>,
}

impl LabelPlacer {
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            used: Vec::new(),
        }
    }

    /// Claim `x` if it is free; returns whether the label may be drawn.
    pub fn try_place(&mut self, x: f64) -> bool {
        if self.used.iter().any(|&u| (x - u).abs() < self.spacing) {
            return false;
        }
        self.used.push(x);
        true
    }

    #[cfg(test)]
    fn placed(&self) -> &[f64] {
        &self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PeakTable {
        let mut table = PeakTable::default();
        table.push("1680-1750".into(), "C=O");
        table.push("2850-3000".into(), "C-H");
        table
    }

    #[test]
    fn placer_refuses_nearby_positions() {
        let mut placer = LabelPlacer::new(100.0);
        assert!(placer.try_place(1715.0));
        assert!(!placer.try_place(1650.0));
        assert!(!placer.try_place(1715.0));
        assert!(placer.try_place(1525.0));
        // Exactly `spacing` away is allowed.
        assert!(placer.try_place(1425.0));
        assert_eq!(placer.placed(), &[1715.0, 1525.0, 1425.0]);
    }

    #[test]
    fn csv_uses_the_two_column_headers() {
        let mut out = Vec::new();
        sample_table().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Wavenumber Range (cm⁻¹),Functional Group\n1680-1750,C=O\n2850-3000,C-H\n"
        );
    }

    #[test]
    fn empty_csv_still_has_a_header() {
        let mut out = Vec::new();
        PeakTable::default().write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Wavenumber Range (cm⁻¹),Functional Group\n"
        );
    }

    #[test]
    fn json_is_an_array_of_records() {
        let mut out = Vec::new();
        sample_table().write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["Functional Group"], "C=O");
        assert_eq!(value[1]["Wavenumber Range (cm⁻¹)"], "2850-3000");
    }

    #[test]
    fn display_lists_every_row() {
        let text = sample_table().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(RANGE_HEADER));
        assert!(lines[1].starts_with("1680-1750") && lines[1].ends_with("C=O"));
    }
}
