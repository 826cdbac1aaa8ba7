use crate::{error::DetectionError, vocabulary::Vocabulary};
use compact_str::CompactString;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

/// Estimator tunables. Deserializable as a flat configuration bag with
/// per-field defaults; setting names follow the original plugin
/// (`number_of_trials`, `alpha_width`, `max`, ...).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Bayesian smoothing constant.
    pub alpha: f64,
    /// Standard deviation of the per-trial smoothing jitter.
    pub alpha_width: f64,
    #[serde(rename = "number_of_trials")]
    pub trials: u32,
    /// Upper bound on a trial's iterations; bounds worst-case work at
    /// `trials * iteration_limit` vocabulary lookups.
    pub iteration_limit: u32,
    /// Languages at or below this probability are dropped from results.
    pub prob_threshold: f64,
    /// A trial stops once one language holds more than this mass.
    pub conv_threshold: f64,
    pub base_freq: u32,
    /// RNG seed; fixed by default so detection is reproducible.
    pub seed: u64,
    #[serde(rename = "max")]
    pub max_results: Option<usize>,
    #[serde(skip)]
    prior: Option<Vec<f64>>,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            alpha_width: 0.05,
            trials: 7,
            iteration_limit: 10_000,
            prob_threshold: 0.1,
            conv_threshold: 0.99999,
            base_freq: 10_000,
            seed: 0,
            max_results: None,
            prior: None,
        }
    }
}

impl EstimatorParams {
    /// Sets prior language probabilities, aligned to the vocabulary's
    /// language order. Rejected priors leave the previous one untouched.
    pub fn set_prior(&mut self, prior: Vec<f64>) -> Result<(), DetectionError> {
        if prior.iter().any(|&p| p < 0.0) {
            return Err(DetectionError::InvalidPrior(
                "prior probability must be non-negative",
            ));
        }
        let sum: f64 = prior.iter().sum();
        if sum <= 0.0 {
            return Err(DetectionError::InvalidPrior(
                "at least one prior probability must be non-zero",
            ));
        }
        self.prior = Some(prior.into_iter().map(|p| p / sum).collect());
        Ok(())
    }

    pub fn clear_prior(&mut self) {
        self.prior = None;
    }

    fn init_prob(&self, languages: usize) -> Vec<f64> {
        match &self.prior {
            Some(prior) => {
                debug_assert_eq!(prior.len(), languages);
                prior.clone()
            }
            None => vec![1.0 / languages as f64; languages],
        }
    }
}

/// Monte-Carlo Bayesian estimation over extracted grams.
///
/// Runs `trials` independent trials and averages them. Each trial starts
/// from the prior (or uniform), draws a smoothing jitter, then repeatedly
/// picks a random gram and multiplies every language's probability by
/// `alpha/base_freq + p(gram|language)`, renormalizing every 5th iteration
/// until one language exceeds `conv_threshold` or `iteration_limit` is hit.
///
/// One RNG stream is seeded per call, not per trial, and the draw order is
/// fixed (one Gaussian per trial start, one uniform index per iteration),
/// so the output is bit-reproducible for fixed inputs.
pub fn estimate(
    grams: &[CompactString],
    vocabulary: &Vocabulary,
    params: &EstimatorParams,
) -> Result<Vec<f64>, DetectionError> {
    if grams.is_empty() {
        return Err(DetectionError::NoFeatures);
    }

    let languages = vocabulary.languages().len();
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let mut result = vec![0.0; languages];

    for _ in 0..params.trials {
        let mut prob = params.init_prob(languages);
        let a = params.alpha + gaussian(&mut rng) * params.alpha_width;
        let weight = a / params.base_freq as f64;

        let mut i: u32 = 0;
        loop {
            let r = rng.random_range(0..grams.len());
            if let Some(row) = vocabulary.prob(&grams[r]) {
                for (p, v) in prob.iter_mut().zip(row) {
                    *p *= weight + v;
                }
            }
            if i % 5 == 0
                && (normalize_prob(&mut prob) > params.conv_threshold
                    || i >= params.iteration_limit)
            {
                break;
            }
            i += 1;
        }

        for (acc, p) in result.iter_mut().zip(&prob) {
            *acc += p / params.trials as f64;
        }
    }

    Ok(result)
}

/// Normalizes `prob` to sum 1 and returns its max component. A zero sum
/// leaves every component 0 instead of dividing by zero.
fn normalize_prob(prob: &mut [f64]) -> f64 {
    let sum: f64 = prob.iter().sum();
    if sum == 0.0 {
        prob.fill(0.0);
        return 0.0;
    }
    let mut max = 0.0;
    for p in prob.iter_mut() {
        *p /= sum;
        if *p > max {
            max = *p;
        }
    }
    max
}

/// Standard normal sample via Box-Muller. Exactly two uniform draws per
/// sample, so the per-trial RNG stream layout never varies.
fn gaussian(rng: &mut ChaCha8Rng) -> f64 {
    let u1 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
