use rand::Rng;

use super::distribution::box_muller;
use crate::sim::JobSpec;

// Inter-arrival gap, N(75, 20)
const GAP_MEAN: f64 = 75.0;
const GAP_SD: f64 = 20.0;
// Floors keep every generated record loadable
const MIN_SIZE: f64 = 1.0;
const MIN_GAP: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mixture {
    /// Every job N(150, 20).
    Gaussian,
    /// 20% large N(250, 15), 80% small N(50, 10).
    MostlySmall,
    /// 80% large N(250, 15), 20% small N(50, 10).
    MostlyLarge,
}

impl Mixture {
    pub const ALL: [Mixture; 3] = [Mixture::Gaussian, Mixture::MostlySmall, Mixture::MostlyLarge];

    /// Description lines written above a report for this mixture.
    pub fn label_lines(&self) -> &'static [&'static str] {
        match self {
            Mixture::Gaussian => &["Gaussian,Mean: 150, SD: 20"],
            Mixture::MostlySmall => &["20% larger,Mean: 250, SD: 15", "80% smaller,Mean: 50, SD: 10"],
            Mixture::MostlyLarge => &["80% larger,Mean: 250, SD: 15", "20% smaller,Mean: 50, SD: 10"],
        }
    }

    fn large_share(&self) -> Option<f64> {
        match self {
            Mixture::Gaussian => None,
            Mixture::MostlySmall => Some(0.2),
            Mixture::MostlyLarge => Some(0.8),
        }
    }

    fn sample_size<R: Rng>(&self, rng: &mut R) -> f64 {
        let size = match self.large_share() {
            None => box_muller(rng, 150.0, 20.0),
            Some(share) if rng.random::<f64>() < share => box_muller(rng, 250.0, 15.0),
            Some(_) => box_muller(rng, 50.0, 10.0),
        };
        size.max(MIN_SIZE)
    }

    /// `count` jobs whose arrivals accumulate N(75, 20) gaps starting from 0.
    pub fn generate<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<JobSpec> {
        let mut arrival_time = 0.0;
        (0..count)
            .map(|_| {
                let size = self.sample_size(rng);
                arrival_time += box_muller(rng, GAP_MEAN, GAP_SD).max(MIN_GAP);
                // Round as written so a reloaded file replays identically
                JobSpec::new(round2(size).max(MIN_SIZE), round2(arrival_time))
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn arrivals_never_go_backwards() {
        let mut rng = StdRng::seed_from_u64(1);
        for mixture in Mixture::ALL {
            let jobs = mixture.generate(&mut rng, 500);
            assert_eq!(jobs.len(), 500);
            assert!(jobs.windows(2).all(|w| w[0].arrival_time <= w[1].arrival_time));
            assert!(jobs.iter().all(|j| j.size >= MIN_SIZE));
        }
    }

    #[test]
    fn large_share_shifts_mean_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let mean = |jobs: Vec<JobSpec>| jobs.iter().map(|j| j.size).sum::<f64>() / jobs.len() as f64;
        let small = mean(Mixture::MostlySmall.generate(&mut rng, 2000));
        let gaussian = mean(Mixture::Gaussian.generate(&mut rng, 2000));
        let large = mean(Mixture::MostlyLarge.generate(&mut rng, 2000));

        // Expected means: 90, 150, 210
        assert!((small - 90.0).abs() < 8.0, "small mean {small}");
        assert!((gaussian - 150.0).abs() < 3.0, "gaussian mean {gaussian}");
        assert!((large - 210.0).abs() < 8.0, "large mean {large}");
    }

    #[test]
    fn same_seed_same_workload() {
        let a = Mixture::MostlyLarge.generate(&mut StdRng::seed_from_u64(9), 50);
        let b = Mixture::MostlyLarge.generate(&mut StdRng::seed_from_u64(9), 50);
        assert_eq!(a, b);
    }
}
