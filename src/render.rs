use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::{ImageFormat, RgbImage};
use palette::Srgb;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use crate::annotate::figure::{Figure, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::config::FigureConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("figure size {width}x{height} has no pixels")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

/// Render the figure and encode it as PNG bytes.
pub fn render_png(figure: &Figure, config: &FigureConfig) -> Result<Vec<u8>, RenderError> {
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    draw(figure, config, &mut buffer)?;

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Draw("pixel buffer does not match figure size".into()))?;
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}

/// Render the figure straight to a PNG file.
pub fn save_png(figure: &Figure, config: &FigureConfig, path: &Path) -> anyhow::Result<()> {
    let bytes = render_png(figure, config).context("rendering figure")?;
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn rgb(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

/// Axis extents `(x_min, x_max, y_min, y_max)` with a little headroom.
/// An empty figure gets the usual mid-IR frame.
fn axis_ranges(figure: &Figure) -> (f64, f64, f64, f64) {
    match figure.bounds() {
        Some((x0, x1, y0, y1)) => {
            let (x0, x1) = if x1 > x0 { (x0, x1) } else { (x0 - 1.0, x1 + 1.0) };
            let pad = ((y1 - y0) * 0.05).max(1.0);
            (x0, x1, y0 - pad, y1 + pad)
        }
        None => (400.0, 4000.0, 0.0, 100.0),
    }
}

/// Draw into an RGB buffer.  The chart runs on negated wavenumbers so the
/// axis reads high-to-low from left to right; tick labels undo the sign.
fn draw(figure: &Figure, config: &FigureConfig, buffer: &mut [u8]) -> Result<(), RenderError> {
    let root = BitMapBackend::with_buffer(buffer, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let (x_min, x_max, y_min, y_max) = axis_ranges(figure);
    let font = config.font_family.as_str();

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-x_max..-x_min, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_AXIS_TITLE)
        .y_desc(Y_AXIS_TITLE)
        .axis_desc_style((font, config.axis_font_size))
        .x_label_formatter(&|v: &f64| format!("{:.0}", -v))
        .draw()
        .map_err(draw_err)?;

    for span in &figure.spans {
        let fill = rgb(span.color).mix(span.alpha).filled();
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(-span.upper, y_min), (-span.lower, y_max)],
                fill,
            )))
            .map_err(draw_err)?;
    }

    for curve in &figure.curves {
        let color = rgb(curve.color);
        chart
            .draw_series(LineSeries::new(
                curve.points.iter().map(|&(x, y)| (-x, y)),
                color.stroke_width(config.line_width),
            ))
            .map_err(draw_err)?
            .label(curve.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    let label_font = (font, config.label_font_size).into_font();
    for label in &figure.labels {
        let style = label_font
            .color(&rgb(label.color))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(std::iter::once(Text::new(
                label.text.clone(),
                (-label.x, label.y),
                style,
            )))
            .map_err(draw_err)?;
    }

    if !figure.curves.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .label_font((font, config.legend_font_size))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}
