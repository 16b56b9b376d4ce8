//! Drives the public API the way the command-line tool does: files on disk
//! → series → annotation → peak table and PNG.

use std::path::PathBuf;

use ftir_annotator::annotate::peaks::PeakTable;
use ftir_annotator::data::loader;
use ftir_annotator::{AnnotatorConfig, FigureConfig, SkipReason, annotate, color, render};

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ftir-e2e-{}-{test}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// 200 points sweeping 4000 → 400 cm⁻¹, 98 %T baseline, dip to 40 %T at
/// 1700 cm⁻¹.
fn carbonyl_csv() -> String {
    let mut text = String::from("Wavenumber (cm-1),%Transmittance\n");
    for i in 0..200 {
        let x = 4000.0 - i as f64 * 3600.0 / 199.0;
        let y = 98.0 - 58.0 * (-(x - 1700.0f64).powi(2) / (2.0 * 60.0f64.powi(2))).exp();
        text.push_str(&format!("{x:.3},{y:.3}\n"));
    }
    text
}

#[test]
fn carbonyl_spectrum_end_to_end() {
    let dir = scratch_dir("carbonyl");
    let path = dir.join("ketone.csv");
    std::fs::write(&path, carbonyl_csv()).unwrap();

    let series = loader::load_series(&path, color::BLACK).unwrap();
    let annotation = annotate(&[series], &AnnotatorConfig::default());

    assert!(annotation.warnings.is_empty());
    assert!(
        annotation
            .peaks
            .rows
            .iter()
            .any(|r| r.label == "C=O" && r.range == "1680-1750")
    );

    let curve = &annotation.figure.curves[0];
    assert_eq!(curve.name, "ketone.csv");
    assert_eq!(curve.points.len(), 200);
    let (min_x, min_y) = curve.minimum().unwrap();
    assert!((min_x - 1700.0).abs() < 20.0, "minimum at {min_x}");
    assert!(min_y < 60.0);

    let mut csv = Vec::new();
    annotation.peaks.write_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("Wavenumber Range (cm⁻¹),Functional Group\n"));
    assert!(csv.contains("1680-1750,C=O\n"));

    let out = dir.join("FTIR_Spectrum.png");
    render::save_png(&annotation.figure, &FigureConfig::default(), &out).unwrap();
    let png = std::fs::read(&out).unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn unusable_file_is_a_warning_not_a_failure() {
    let dir = scratch_dir("unusable");
    let good = dir.join("good.csv");
    let bad = dir.join("absorbance.csv");
    std::fs::write(&good, carbonyl_csv()).unwrap();
    std::fs::write(&bad, "x,Absorbance\n4000,0.1\n3000,0.2\n").unwrap();

    let series = vec![
        loader::load_series(&bad, color::BLACK).unwrap(),
        loader::load_series(&good, color::BLACK).unwrap(),
    ];
    let annotation = annotate(&series, &AnnotatorConfig::default());

    assert_eq!(annotation.figure.curves.len(), 1);
    assert_eq!(annotation.warnings.len(), 1);
    assert_eq!(annotation.warnings[0].series, "absorbance.csv");
    assert_eq!(annotation.warnings[0].reason, SkipReason::MissingColumns);
    assert!(!annotation.peaks.is_empty());
}

#[test]
fn nothing_usable_still_renders_an_empty_figure() {
    let dir = scratch_dir("empty");
    let bad = dir.join("notes.json");
    std::fs::write(&bad, r#"[{"comment": "no data"}]"#).unwrap();

    let series = loader::load_series(&bad, color::BLACK).unwrap();
    let annotation = annotate(&[series], &AnnotatorConfig::default());

    assert!(annotation.figure.curves.is_empty());
    assert_eq!(annotation.peaks, PeakTable::default());

    let png = render::render_png(&annotation.figure, &FigureConfig::default()).unwrap();
    assert!(!png.is_empty());
}
