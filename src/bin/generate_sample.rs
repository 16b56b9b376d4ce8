use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// %T trace: a flat baseline with Gaussian absorption dips and noise.
fn generate_transmittance(
    wavenumbers: &[f64],
    dips: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut StdRng,
) -> Vec<f64> {
    wavenumbers
        .iter()
        .map(|&wn| {
            let absorbed: f64 = dips
                .iter()
                .map(|&(mu, sigma, depth)| gaussian(wn, mu, sigma, depth))
                .sum();
            (98.0 - absorbed + normal(rng, noise_level)).clamp(0.0, 100.0)
        })
        .collect()
}

/// Zero-mean normal sample (Box–Muller).
fn normal(rng: &mut StdRng, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.r#gen();
    std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);

    // Wavenumbers: 4000 → 400, step 2
    let wavenumbers: Vec<f64> = (0..=1800).map(|i| 4000.0 - i as f64 * 2.0).collect();

    // (centre cm⁻¹, width, depth in %T)
    let samples: Vec<(&str, Vec<(f64, f64, f64)>)> = vec![
        (
            "acetone",
            vec![(2965.0, 25.0, 20.0), (1715.0, 18.0, 60.0), (1365.0, 15.0, 35.0), (1220.0, 20.0, 40.0)],
        ),
        (
            "ethanol",
            vec![(3340.0, 120.0, 55.0), (2970.0, 30.0, 30.0), (1050.0, 25.0, 60.0), (880.0, 15.0, 25.0)],
        ),
        (
            "toluene",
            vec![(3030.0, 20.0, 25.0), (2920.0, 20.0, 20.0), (1495.0, 15.0, 35.0), (730.0, 15.0, 55.0)],
        ),
    ];

    for (name, dips) in &samples {
        let transmittance = generate_transmittance(&wavenumbers, dips, 0.4, &mut rng);

        let path = out_dir.join(format!("{name}.csv"));
        let mut writer =
            csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(["Wavenumber (cm-1)", "%Transmittance"])?;
        for (wn, t) in wavenumbers.iter().zip(&transmittance) {
            writer.write_record([format!("{wn:.1}"), format!("{t:.3}")])?;
        }
        writer.flush()?;

        println!(
            "Wrote {} ({} points, {} absorption bands)",
            path.display(),
            wavenumbers.len(),
            dips.len()
        );
    }

    Ok(())
}
