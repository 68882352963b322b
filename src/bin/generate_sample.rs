//! Write a synthetic RELION `postprocess.star` with a known FSC fall-off.
//!
//! Usage: `generate_sample [output.star]` (default `sample_postprocess.star`).

use std::fmt::Write as _;

use anyhow::{Context, Result};

const BOX_SIZE: usize = 256;
const PIXEL_SIZE: f64 = 1.06;
/// Spatial frequency (1/Å) from which phases are randomised.
const RANDOMIZE_FROM: f64 = 0.1;
const MASK_FRACTION: f64 = 0.35;

/// Logistic FSC fall-off: 0.5 at spatial frequency `s_half` (1/Å).
fn fsc_model(s: f64, s_half: f64, width: f64) -> f64 {
    1.0 / (1.0 + ((s - s_half) / width).exp())
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn render(rng: &mut SimpleRng) -> Result<String> {
    let mut out = String::new();
    let shells = BOX_SIZE / 2 + 1;

    writeln!(out, "\n# version 30001\n\ndata_general\n")?;
    writeln!(out, "_rlnFinalResolution                          3.800000")?;
    writeln!(out, "_rlnBfactorUsedForSharpening               -95.000000")?;

    writeln!(out, "\n# version 30001\n\ndata_fsc\n\nloop_ ")?;
    let columns = [
        "SpectralIndex",
        "Resolution",
        "AngstromResolution",
        "FourierShellCorrelationCorrected",
        "FourierShellCorrelationParticleMaskFraction",
        "FourierShellCorrelationUnmaskedMaps",
        "FourierShellCorrelationMaskedMaps",
        "CorrectedFourierShellCorrelationPhaseRandomizedMaskedMaps",
    ];
    for (i, c) in columns.iter().enumerate() {
        writeln!(out, "_rln{c} #{}", i + 1)?;
    }

    for i in 0..shells {
        let s = i as f64 / (BOX_SIZE as f64 * PIXEL_SIZE);
        let angstrom = if i == 0 { 999.0 } else { 1.0 / s };
        let noise = rng.gauss(0.0, 0.01);

        let masked = (fsc_model(s, 0.22, 0.012) + noise).clamp(-0.1, 1.0);
        let unmasked = (fsc_model(s, 0.18, 0.015) + noise).clamp(-0.1, 1.0);
        // Phase randomisation beyond RANDOMIZE_FROM leaves only mask correlation.
        let randomized = if s < RANDOMIZE_FROM {
            masked
        } else {
            0.3 * fsc_model(s, RANDOMIZE_FROM + 0.02, 0.01) + rng.gauss(0.0, 0.005)
        };
        let corrected = if s < RANDOMIZE_FROM || randomized >= 1.0 {
            masked
        } else {
            (masked - randomized) / (1.0 - randomized)
        };

        writeln!(
            out,
            "{i:6} {s:12.6} {angstrom:12.6} {corrected:12.6} {MASK_FRACTION:12.6} {unmasked:12.6} {masked:12.6} {randomized:12.6}"
        )?;
    }

    writeln!(out, "\n\n# version 30001\n\ndata_guinier\n\nloop_ ")?;
    writeln!(out, "_rlnResolutionSquared #1\n_rlnLogAmplitudesOriginal #2")?;
    for i in 1..shells {
        let s = i as f64 / (BOX_SIZE as f64 * PIXEL_SIZE);
        writeln!(out, "{:12.6} {:12.6}", s * s, -10.0 - 20.0 * s * s)?;
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_postprocess.star".to_string());

    let mut rng = SimpleRng::new(42);
    let text = render(&mut rng)?;
    std::fs::write(&output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} FSC shells ({}px box, {PIXEL_SIZE} Å/px) to {output_path}",
        BOX_SIZE / 2 + 1,
        BOX_SIZE
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_one_row_per_shell_between_markers() {
        let text = render(&mut SimpleRng::new(7)).unwrap();
        let start = text.find("data_fsc").unwrap();
        let end = text.find("data_guinier").unwrap();
        let rows = text[start..end]
            .lines()
            .filter(|l| l.trim_start().starts_with(|c: char| c.is_ascii_digit()))
            .count();
        assert_eq!(rows, BOX_SIZE / 2 + 1);
    }

    #[test]
    fn model_is_half_at_s_half() {
        assert!((fsc_model(0.2, 0.2, 0.01) - 0.5).abs() < 1e-12);
    }
}
