use palette::Srgb;

// ---------------------------------------------------------------------------
// Figure – what the renderer draws
// ---------------------------------------------------------------------------

pub const X_AXIS_TITLE: &str = "Wavenumber (cm⁻¹)";
pub const Y_AXIS_TITLE: &str = "% Transmittance";

/// One smoothed spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub color: Srgb<u8>,
    /// `(wavenumber, smoothed %T)` in file order.
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    /// The point with the lowest transmittance (deepest absorption).
    pub fn minimum(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// A shaded vertical band over a wavenumber window.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub lower: f64,
    pub upper: f64,
    pub color: Srgb<u8>,
    pub alpha: f64,
}

/// Text drawn centred at `(x, y)` in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Srgb<u8>,
}

/// Backend-independent description of the annotated plot.
///
/// The x axis is drawn inverted (wavenumber decreasing to the right) and the
/// legend sits in the lower-left corner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub curves: Vec<Curve>,
    pub spans: Vec<Span>,
    pub labels: Vec<TextLabel>,
}

impl Figure {
    /// Data bounds `(x_min, x_max, y_min, y_max)` over curves and labels,
    /// or `None` for an empty figure.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let points = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().copied())
            .chain(self.labels.iter().map(|l| (l.x, l.y)))
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        points.fold(None, |acc, (x, y)| match acc {
            None => Some((x, x, y, y)),
            Some((x0, x1, y0, y1)) => Some((x0.min(x), x1.max(x), y0.min(y), y1.max(y))),
        })
    }
}
