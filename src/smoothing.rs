use thiserror::Error;

// ---------------------------------------------------------------------------
// Savitzky–Golay smoothing
// ---------------------------------------------------------------------------

/// Reasons the filter cannot run on a given input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmoothingError {
    #[error("window length {window} must be odd")]
    EvenWindow { window: usize },

    #[error("window length {window} must exceed polynomial order {order}")]
    WindowTooSmall { window: usize, order: usize },

    #[error("window length {window} exceeds the {len} available points")]
    WindowTooLong { window: usize, len: usize },

    #[error("least-squares system for window {window}, order {order} is singular")]
    Singular { window: usize, order: usize },
}

/// Window length used for a signal of `len` points.
///
/// `cap` points when the signal has at least that many, otherwise one less
/// than the signal length; an even result is bumped up to the next odd
/// number.
pub fn window_length(len: usize, cap: usize) -> usize {
    let window = if len >= cap { cap } else { len.saturating_sub(1) };
    if window % 2 == 0 { window + 1 } else { window }
}

/// Smooth `y` with a Savitzky–Golay filter.
///
/// Interior points use the centred convolution weights.  The first and last
/// `window / 2` points are evaluated from a polynomial fitted to the first
/// and last full window respectively, so the output has the same length as
/// the input and follows the signal up to its edges.
pub fn savgol(y: &[f64], window: usize, order: usize) -> Result<Vec<f64>, SmoothingError> {
    if window % 2 == 0 {
        return Err(SmoothingError::EvenWindow { window });
    }
    if window <= order {
        return Err(SmoothingError::WindowTooSmall { window, order });
    }
    if window > y.len() {
        return Err(SmoothingError::WindowTooLong {
            window,
            len: y.len(),
        });
    }

    let half = window / 2;
    let n = y.len();
    let singular = || SmoothingError::Singular { window, order };

    let centre = weights(window, order, 0.0).ok_or_else(singular)?;
    let mut out: Vec<f64> = Vec::with_capacity(n);

    // Leading edge: fit on y[0..window], evaluate at offsets -half..0.
    for i in 0..half {
        let w = weights(window, order, i as f64 - half as f64).ok_or_else(singular)?;
        out.push(dot(&w, &y[..window]));
    }

    for i in half..n - half {
        out.push(dot(&centre, &y[i - half..=i + half]));
    }

    // Trailing edge: fit on the last window, evaluate at offsets 1..=half.
    let tail = &y[n - window..];
    for k in 1..=half {
        let w = weights(window, order, k as f64).ok_or_else(singular)?;
        out.push(dot(&w, tail));
    }

    Ok(out)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}

/// Weights that, dotted with a window of samples, give the least-squares
/// polynomial of `order` evaluated at offset `at` from the window centre.
///
/// With design matrix `A[j][k] = z_j^k` (z_j = j - half), the fitted value
/// at `at` is `v(at)ᵀ (AᵀA)⁻¹ Aᵀ y`, so the weight of sample j is
/// `Σ_k b_k z_j^k` where `(AᵀA) b = v(at)`.
fn weights(window: usize, order: usize, at: f64) -> Option<Vec<f64>> {
    let half = (window / 2) as f64;
    let terms = order + 1;
    let z: Vec<f64> = (0..window).map(|j| j as f64 - half).collect();

    let mut normal = vec![vec![0.0; terms]; terms];
    for (r, row) in normal.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = z.iter().map(|zj| zj.powi((r + c) as i32)).sum();
        }
    }
    let rhs: Vec<f64> = (0..terms).map(|k| at.powi(k as i32)).collect();
    let b = solve(normal, rhs)?;

    Some(
        z.iter()
            .map(|zj| b.iter().enumerate().map(|(k, bk)| bk * zj.powi(k as i32)).sum())
            .collect(),
    )
}

/// Gaussian elimination with partial pivoting on a small dense system.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}
