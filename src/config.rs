// ---------------------------------------------------------------------------
// Annotation and figure settings
// ---------------------------------------------------------------------------

/// Thresholds and filter parameters used by [`crate::annotate::annotate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatorConfig {
    /// A region is labelled when its highest smoothed %T stays below this.
    pub transmittance_threshold: f64,
    /// Minimum distance (cm⁻¹) between two label x positions.
    pub label_spacing: f64,
    /// Label y position as a multiple of the window maximum.
    pub label_lift: f64,
    /// Largest smoothing window; shorter signals use a smaller odd window.
    pub smoothing_window: usize,
    pub polynomial_order: usize,
    /// Opacity of the shaded region bands.
    pub span_alpha: f64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            transmittance_threshold: 90.0,
            label_spacing: 100.0,
            label_lift: 1.05,
            smoothing_window: 11,
            polynomial_order: 2,
            span_alpha: 0.2,
        }
    }
}

/// Pixel size and typography of the exported image.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub axis_font_size: u32,
    pub label_font_size: u32,
    pub legend_font_size: u32,
    pub line_width: u32,
}

impl Default for FigureConfig {
    /// A 10 × 6 inch figure at 100 dpi.
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            font_family: "sans-serif".to_string(),
            axis_font_size: 16,
            label_font_size: 12,
            legend_font_size: 13,
            line_width: 1,
        }
    }
}
