//! FTIR spectrum annotation: load tabular spectra, smooth them, shade and
//! label functional-group absorption regions, and export the plot as PNG.

pub mod annotate;
pub mod color;
pub mod config;
pub mod data;
pub mod render;
pub mod smoothing;

pub use annotate::{Annotation, SeriesWarning, SkipReason, annotate};
pub use config::{AnnotatorConfig, FigureConfig};
pub use data::model::{CellValue, Column, SpectrumSeries, Table};
