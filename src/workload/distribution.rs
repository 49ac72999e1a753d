//! Random number generators for synthetic workloads, plus a terminal
//! histogram to eyeball what they produce.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt::Write;

use rand::Rng;

/// Normal sample via the Box-Muller transform.
pub fn box_muller<R: Rng>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    // ln(0) would blow up
    let u1 = rng.random::<f64>().max(f64::EPSILON);
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + sd * z
}

/// Poisson sample using Knuth's multiplication method.
pub fn poisson_knuth<R: Rng>(rng: &mut R, lambda: f64) -> u64 {
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut p = 1.0;
    loop {
        k += 1;
        p *= rng.random::<f64>();
        if p <= limit {
            return k - 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    /// Uniform bin index in `0..=bins`.
    Uniform { bins: u32 },
    Normal { mean: f64, sd: f64 },
    Poisson { lambda: f64 },
    /// Sum of two six-sided dice.
    Dice,
}

impl Distribution {
    pub fn title(&self) -> &'static str {
        match self {
            Distribution::Uniform { .. } => "Random Number Distribution",
            Distribution::Normal { .. } => "Normal Distribution",
            Distribution::Poisson { .. } => "Poisson Distribution",
            Distribution::Dice => "Die Number Distribution",
        }
    }

    /// Draws one sample, already rounded to its histogram bin.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        match *self {
            Distribution::Uniform { bins } => {
                (rng.random::<f64>() * f64::from(bins)).round() as i64
            }
            Distribution::Normal { mean, sd } => box_muller(rng, mean, sd).round() as i64,
            Distribution::Poisson { lambda } => poisson_knuth(rng, lambda) as i64,
            Distribution::Dice => rng.random_range(1..=6) + rng.random_range(1..=6),
        }
    }

    pub fn histogram<R: Rng>(&self, rng: &mut R, samples: usize) -> Histogram {
        let mut histogram = Histogram::default();
        for _ in 0..samples {
            histogram.add(self.sample(rng));
        }
        histogram
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Histogram {
    bins: BTreeMap<i64, u64>,
}

impl Histogram {
    pub fn add(&mut self, bin: i64) {
        *self.bins.entry(bin).or_default() += 1;
    }

    pub fn count(&self, bin: i64) -> u64 {
        self.bins.get(&bin).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.bins.values().sum()
    }

    pub fn range(&self) -> Option<(i64, i64)> {
        let lo = *self.bins.keys().next()?;
        let hi = *self.bins.keys().next_back()?;
        Some((lo, hi))
    }

    /// Horizontal bar chart, one row per bin between the smallest and largest
    /// sample, bars scaled so the tallest spans `width` columns.
    pub fn render(&self, title: &str, width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{title}");
        let Some((lo, hi)) = self.range() else {
            let _ = writeln!(out, "(no samples)");
            return out;
        };

        let peak = self.bins.values().copied().max().unwrap_or(1).max(1);
        let label_width = lo.to_string().len().max(hi.to_string().len());
        for bin in lo..=hi {
            let count = self.count(bin);
            let bar = (count as usize * width).div_ceil(peak as usize);
            let _ = writeln!(
                out,
                "{bin:>label_width$} | {}{}{count}",
                "#".repeat(bar),
                if bar > 0 { " " } else { "" },
            );
        }
        out
    }
}
