//! Sources for the synthesized quality-control values.

use rand::Rng;
use rand::rngs::ThreadRng;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::config::QcConfig;

/// Supplies the copper and pH readings printed in the results table.
pub trait QcSampler {
    /// Copper content in percent, rounded to 2 decimal places.
    fn copper_percent(&mut self) -> Decimal;

    /// pH of a 10% solution, rounded to 1 decimal place.
    fn ph(&mut self) -> Decimal;
}

/// Draws each reading uniformly from its configured range.
#[derive(Debug, Clone)]
pub struct UniformQcSampler<R> {
    rng: R,
    ranges: QcConfig,
}

impl UniformQcSampler<ThreadRng> {
    /// Unseeded sampler backed by the thread-local generator.
    pub fn from_thread_rng(ranges: QcConfig) -> Result<Self> {
        Self::new(rand::rng(), ranges)
    }
}

impl Default for UniformQcSampler<ThreadRng> {
    fn default() -> Self {
        Self {
            rng: rand::rng(),
            ranges: QcConfig::default(),
        }
    }
}

impl<R: Rng> UniformQcSampler<R> {
    /// Fails with a config error when a range is inverted or not finite.
    pub fn new(rng: R, ranges: QcConfig) -> Result<Self> {
        ranges.validate()?;
        Ok(Self { rng, ranges })
    }

    fn sample(&mut self, min: f64, max: f64, dp: u32) -> Decimal {
        let value = self.rng.random_range(min..=max);
        Decimal::from_f64_retain(value)
            .unwrap_or_default()
            .round_dp(dp)
    }
}

impl<R: Rng> QcSampler for UniformQcSampler<R> {
    fn copper_percent(&mut self) -> Decimal {
        self.sample(self.ranges.copper_min, self.ranges.copper_max, 2)
    }

    fn ph(&mut self) -> Decimal {
        self.sample(self.ranges.ph_min, self.ranges.ph_max, 1)
    }
}

/// Returns the same readings every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedQcSampler {
    pub copper_percent: Decimal,
    pub ph: Decimal,
}

impl QcSampler for FixedQcSampler {
    fn copper_percent(&mut self) -> Decimal {
        self.copper_percent
    }

    fn ph(&mut self) -> Decimal {
        self.ph
    }
}
