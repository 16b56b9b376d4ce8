//! Spectrum annotation: smooth each series, shade and label the
//! functional-group regions it absorbs in, and collect the detected peaks.
//!
//! ```text
//!   [SpectrumSeries]
//!        │  resolve columns → numeric (x, y) → Savitzky–Golay
//!        ▼
//!   ┌──────────┐   regions below threshold   ┌─────────────┐
//!   │  Curve    │ ──────────────────────────▶ │ LabelPlacer │ (one per call)
//!   └──────────┘                              └─────────────┘
//!        │                                          │
//!        ▼                                          ▼
//!     Figure  ◀──── spans, labels ────────────  PeakTable
//! ```

pub mod figure;
pub mod peaks;
pub mod regions;

use thiserror::Error;

use crate::config::AnnotatorConfig;
use crate::data::columns::{self, ColumnRoles, MissingColumns};
use crate::data::model::SpectrumSeries;
use crate::smoothing::{self, SmoothingError};

use self::figure::{Curve, Figure, Span, TextLabel};
use self::peaks::{LabelPlacer, PeakTable};
use self::regions::PEAK_REGIONS;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Why a series contributed nothing to the figure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no wavenumber column (name containing \"cm\")")]
    MissingWavenumber,

    #[error("no transmittance column (name containing \"%T\" or \"trans\")")]
    MissingIntensity,

    #[error("no wavenumber or transmittance column")]
    MissingColumns,

    #[error("no numeric data after conversion")]
    EmptyData,

    #[error("smoothing failed: {0}")]
    Smoothing(#[from] SmoothingError),
}

impl From<MissingColumns> for SkipReason {
    fn from(missing: MissingColumns) -> Self {
        match missing {
            MissingColumns::Wavenumber => SkipReason::MissingWavenumber,
            MissingColumns::Intensity => SkipReason::MissingIntensity,
            MissingColumns::Both => SkipReason::MissingColumns,
        }
    }
}

/// A non-fatal problem with one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesWarning {
    pub series: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for SeriesWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error processing {}: {}", self.series, self.reason)
    }
}

/// Everything one call to [`annotate`] produces.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub figure: Figure,
    pub peaks: PeakTable,
    pub warnings: Vec<SeriesWarning>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Annotate all series in order.  Never fails: a series that cannot be
/// processed is reported in [`Annotation::warnings`] and skipped.
///
/// Label collisions are tracked across the whole call, so a region already
/// labelled for an earlier series is not labelled (or tabulated) again for a
/// later one.
pub fn annotate(series: &[SpectrumSeries], config: &AnnotatorConfig) -> Annotation {
    let mut out = Annotation::default();
    let mut placer = LabelPlacer::new(config.label_spacing);

    for s in series {
        match smoothed_curve(s, config) {
            Ok(curve) => {
                annotate_regions(&curve, config, &mut placer, &mut out);
                out.figure.curves.push(curve);
            }
            Err(reason) => {
                let warning = SeriesWarning {
                    series: s.name.clone(),
                    reason,
                };
                log::warn!("{warning}");
                out.warnings.push(warning);
            }
        }
    }

    log::info!(
        "Annotated {} of {} series, {} labelled regions",
        out.figure.curves.len(),
        series.len(),
        out.peaks.len()
    );
    out
}

/// Resolve, coerce, and smooth one series into a plottable curve.
fn smoothed_curve(series: &SpectrumSeries, config: &AnnotatorConfig) -> Result<Curve, SkipReason> {
    let (wavenumber, intensity) = match columns::resolve(&series.table) {
        ColumnRoles::Found {
            wavenumber,
            intensity,
        } => (wavenumber, intensity),
        ColumnRoles::NotFound(missing) => return Err(missing.into()),
    };

    let (x, y) = columns::numeric_pair(wavenumber, intensity);
    if x.is_empty() || y.is_empty() {
        return Err(SkipReason::EmptyData);
    }

    let window = smoothing::window_length(y.len(), config.smoothing_window);
    let y_smooth = smoothing::savgol(&y, window, config.polynomial_order)?;
    log::debug!(
        "{}: {} points, window {window}, columns {:?} / {:?}",
        series.name,
        y.len(),
        wavenumber.name,
        intensity.name
    );

    Ok(Curve {
        name: series.name.clone(),
        color: series.color,
        points: x.into_iter().zip(y_smooth).collect(),
    })
}

/// Shade every region the curve dips into and label those that still have
/// room.
fn annotate_regions(
    curve: &Curve,
    config: &AnnotatorConfig,
    placer: &mut LabelPlacer,
    out: &mut Annotation,
) {
    for region in &PEAK_REGIONS {
        let window_max = curve
            .points
            .iter()
            .filter(|(x, _)| region.contains(*x))
            .map(|&(_, y)| y)
            .reduce(f64::max);

        let Some(window_max) = window_max else {
            continue;
        };
        if window_max >= config.transmittance_threshold {
            continue;
        }

        let color = region.color();
        out.figure.spans.push(Span {
            lower: f64::from(region.end),
            upper: f64::from(region.start),
            color,
            alpha: config.span_alpha,
        });

        let x = region.midpoint();
        if !placer.try_place(x) {
            log::debug!(
                "{}: {} at {x} suppressed by a nearby label",
                curve.name,
                region.label
            );
            continue;
        }

        out.figure.labels.push(TextLabel {
            x,
            y: window_max * config.label_lift,
            text: region.label.to_string(),
            color,
        });
        out.peaks.push(region.range_label(), region.label);
    }
}
