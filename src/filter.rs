//! Per-channel filter: parameters in, one sample out.
//!
//! Setters only record the new value and flag the coefficients as stale. The trigonometry runs at
//! most once per processed sample, on the first [`AudioFilter::process_sample()`] after a change,
//! so several parameters can change within one control tick for the price of one recompute.

use nih_plug::nih_debug_assert;

use crate::algorithm::FilterAlgorithm;
use crate::biquad::{Biquad, Coefficients, Topology};
use crate::coefficients::{self, FilterSettings};

/// Substituted for any Q that is not strictly positive.
pub const DEFAULT_Q: f64 = 0.707;

/// Whether the biquad's coefficients still reflect the stored parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone)]
pub struct AudioFilter {
    biquad: Biquad,
    /// `None` is an unrecognized selector, designed as a pass-through.
    algorithm: Option<FilterAlgorithm>,
    settings: FilterSettings,
    state: CoefficientState,
}

impl Default for AudioFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioFilter {
    pub fn new() -> Self {
        Self {
            biquad: Biquad::new(),
            algorithm: Some(FilterAlgorithm::Lpf1),
            settings: FilterSettings::default(),
            state: CoefficientState::Dirty,
        }
    }

    /// Stores the sample rate, clears the history and brings the coefficients up to date. Call
    /// this before the first sample.
    pub fn prepare(&mut self, sample_rate: f64) {
        nih_debug_assert!(sample_rate > 0.0, "sample rate must be positive");

        self.settings.sample_rate = sample_rate;
        self.biquad.reset();
        self.state = CoefficientState::Dirty;
        self.update_coefficients();
    }

    /// Clears the delay history. Parameters and coefficients are kept.
    pub fn reset(&mut self) {
        self.biquad.reset();
    }

    pub fn set_algorithm(&mut self, algorithm: FilterAlgorithm) {
        self.select(Some(algorithm));
    }

    /// Selects by raw host index. Indices that name no algorithm turn the filter into a wire.
    pub fn set_algorithm_index(&mut self, index: usize) {
        self.select(FilterAlgorithm::from_repr(index));
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f64) {
        if replace(&mut self.settings.cutoff_hz, cutoff_hz) {
            self.state = CoefficientState::Dirty;
        }
    }

    pub fn set_q(&mut self, q: f64) {
        let q = if q > 0.0 { q } else { DEFAULT_Q };
        if replace(&mut self.settings.q, q) {
            self.state = CoefficientState::Dirty;
        }
    }

    pub fn set_gain_db(&mut self, gain_db: f64) {
        if replace(&mut self.settings.gain_db, gain_db) {
            self.state = CoefficientState::Dirty;
        }
    }

    /// Switches the biquad realization. The delay registers are cleared on an actual change
    /// because their meaning differs between topologies.
    pub fn set_topology(&mut self, topology: Topology) {
        if self.biquad.topology() != topology {
            self.biquad.set_topology(topology);
            self.biquad.reset();
        }
    }

    /// Recomputes the coefficients if a parameter changed since the last design.
    pub fn update_coefficients(&mut self) {
        if self.state == CoefficientState::Clean {
            return;
        }

        // A non-positive (or NaN) rate cannot be designed for. Keep whatever is loaded and stay
        // dirty until a valid rate arrives.
        let valid_rate = self.settings.sample_rate > 0.0;
        if !valid_rate {
            return;
        }

        let coefficients = coefficients::design(self.algorithm, &self.settings);
        self.biquad.set_coefficients(coefficients);
        self.state = CoefficientState::Clean;
    }

    #[must_use]
    #[inline]
    pub fn process_sample(&mut self, x: f64) -> f64 {
        self.update_coefficients();

        let Coefficients { c0: wet, d0: dry, .. } = self.biquad.coefficients();
        dry * x + wet * self.biquad.process_sample(x)
    }

    /// Filters `samples` in place.
    pub fn process_block(&mut self, samples: &mut [f64]) {
        for sample in samples.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Linear magnitude of the complete response (mix included) at `freq_hz`.
    ///
    /// This reads the loaded coefficients as they are. Call
    /// [`update_coefficients()`](Self::update_coefficients) first if parameters were changed
    /// since the last processed sample.
    pub fn magnitude_response(&self, freq_hz: f64) -> f64 {
        self.biquad
            .coefficients()
            .frequency_response(freq_hz / self.settings.sample_rate)
            .norm()
    }

    pub fn algorithm(&self) -> Option<FilterAlgorithm> {
        self.algorithm
    }

    pub fn cutoff(&self) -> f64 {
        self.settings.cutoff_hz
    }

    pub fn q(&self) -> f64 {
        self.settings.q
    }

    pub fn gain_db(&self) -> f64 {
        self.settings.gain_db
    }

    pub fn sample_rate(&self) -> f64 {
        self.settings.sample_rate
    }

    pub fn topology(&self) -> Topology {
        self.biquad.topology()
    }

    pub fn state(&self) -> CoefficientState {
        self.state
    }

    /// The loaded coefficients, `c0`/`d0` being the wet/dry weights.
    pub fn coefficients(&self) -> Coefficients {
        self.biquad.coefficients()
    }

    fn select(&mut self, algorithm: Option<FilterAlgorithm>) {
        if self.algorithm != algorithm {
            self.algorithm = algorithm;
            self.state = CoefficientState::Dirty;
        }
    }
}

/// Stores `value` in `slot`, returning whether it differed bit-for-bit.
fn replace(slot: &mut f64, value: f64) -> bool {
    let changed = slot.to_bits() != value.to_bits();
    *slot = value;
    changed
}
