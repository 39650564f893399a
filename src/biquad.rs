use nih_plug::prelude::Enum;
use num_complex::Complex64;
use std::f64::consts::TAU;

/// The recursive structure used to realize a coefficient set. All four compute the same transfer
/// function; they differ in how round-off and intermediate gain build up inside the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Enum)]
#[repr(usize)]
pub enum Topology {
    #[default]
    #[name = "Direct"]
    Direct,
    #[name = "Canonical"]
    Canonical,
    #[name = "Transposed Direct"]
    TransposeDirect,
    #[name = "Transposed Canonical"]
    TransposeCanonical,
}

/// A complete coefficient set.
///
/// `a0..a2` feed forward, `b1`/`b2` feed back (`b0` is normalized to 1). `c0` and `d0` are the
/// wet and dry weights applied around the section by [`AudioFilter`](crate::filter::AudioFilter);
/// the section itself never reads them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
    pub b1: f64,
    pub b2: f64,
    pub c0: f64,
    pub d0: f64,
}

impl Coefficients {
    /// Unity wire: `y = x`, fully wet.
    pub const PASS_THROUGH: Self = Self {
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
        b1: 0.0,
        b2: 0.0,
        c0: 1.0,
        d0: 0.0,
    };

    pub fn is_finite(&self) -> bool {
        [self.a0, self.a1, self.a2, self.b1, self.b2, self.c0, self.d0]
            .iter()
            .all(|c| c.is_finite())
    }

    /// Complex response of `d0 + c0 * H(z)` on the unit circle. `normalized_freq` is the frequency
    /// divided by the sample rate, so 0.5 is Nyquist.
    pub fn frequency_response(&self, normalized_freq: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -TAU * normalized_freq);
        let z2 = z1 * z1;

        let numerator = z1 * self.a1 + z2 * self.a2 + self.a0;
        let denominator = z1 * self.b1 + z2 * self.b2 + 1.0;

        (numerator / denominator) * self.c0 + self.d0
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::PASS_THROUGH
    }
}

/// Delay registers. What each slot holds depends on the active [`Topology`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct History {
    x_z1: f64,
    x_z2: f64,
    y_z1: f64,
    y_z2: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Biquad {
    coefficients: Coefficients,
    history: History,
    topology: Topology,
}

impl Biquad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history = History::default();
    }

    /// Replaces the whole coefficient set. Stability is not checked.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Switches the realization without touching the delay registers. The registers mean
    /// different things per topology, so call [`reset()`](Self::reset) when continuity matters.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The registers as `[x_z1, x_z2, y_z1, y_z2]`.
    pub fn history(&self) -> [f64; 4] {
        let h = &self.history;
        [h.x_z1, h.x_z2, h.y_z1, h.y_z2]
    }

    #[must_use]
    #[inline]
    pub fn process_sample(&mut self, x: f64) -> f64 {
        let c = &self.coefficients;
        let s = &mut self.history;

        match self.topology {
            Topology::Direct => {
                let y = c.a0 * x + c.a1 * s.x_z1 + c.a2 * s.x_z2 - c.b1 * s.y_z1 - c.b2 * s.y_z2;
                s.x_z2 = s.x_z1;
                s.x_z1 = x;
                s.y_z2 = s.y_z1;
                s.y_z1 = y;
                y
            }
            Topology::Canonical => {
                let w = x - c.b1 * s.x_z1 - c.b2 * s.x_z2;
                let y = c.a0 * w + c.a1 * s.x_z1 + c.a2 * s.x_z2;
                s.x_z2 = s.x_z1;
                s.x_z1 = w;
                y
            }
            Topology::TransposeDirect => {
                // Poles first (y_z*), then zeros (x_z*), each in transposed form
                let w = x + s.y_z1;
                let y = c.a0 * w + s.x_z1;
                s.y_z1 = s.y_z2 - c.b1 * w;
                s.y_z2 = -c.b2 * w;
                s.x_z1 = s.x_z2 + c.a1 * w;
                s.x_z2 = c.a2 * w;
                y
            }
            Topology::TransposeCanonical => {
                let y = c.a0 * x + s.x_z1;
                s.x_z1 = c.a1 * x - c.b1 * y + s.x_z2;
                s.x_z2 = c.a2 * x - c.b2 * y;
                y
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPOLOGIES: [Topology; 4] = [
        Topology::Direct,
        Topology::Canonical,
        Topology::TransposeDirect,
        Topology::TransposeCanonical,
    ];

    // 2nd order lowpass at 1 kHz / 48 kHz, Q = 0.707
    const LOWPASS: Coefficients = Coefficients {
        a0: 0.003_916_076_683_699_476_5,
        a1: 0.007_832_153_367_398_953,
        a2: 0.003_916_076_683_699_476_5,
        b1: -1.815_317_915_674_214_7,
        b2: 0.830_982_222_409_012_6,
        c0: 1.0,
        d0: 0.0,
    };

    fn impulse_response(biquad: &mut Biquad, len: usize) -> Vec<f64> {
        (0..len)
            .map(|n| biquad.process_sample(if n == 0 { 1.0 } else { 0.0 }))
            .collect()
    }

    #[test]
    fn default_section_is_a_wire() {
        for topology in TOPOLOGIES {
            let mut biquad = Biquad::new();
            biquad.set_topology(topology);
            for x in [0.25, -1.0, 3.5, 0.0] {
                assert_eq!(biquad.process_sample(x), x);
            }
        }
    }

    #[test]
    fn direct_form_matches_hand_computed_response() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(Coefficients {
            a0: 0.5,
            a1: 0.25,
            a2: 0.0,
            b1: -0.5,
            b2: 0.0,
            ..Coefficients::PASS_THROUGH
        });

        let response = impulse_response(&mut biquad, 4);
        assert_eq!(response, vec![0.5, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn topologies_agree_on_impulse_response() {
        let mut reference = Biquad::new();
        reference.set_coefficients(LOWPASS);
        let expected = impulse_response(&mut reference, 512);

        for topology in TOPOLOGIES {
            let mut biquad = Biquad::new();
            biquad.set_coefficients(LOWPASS);
            biquad.set_topology(topology);
            let actual = impulse_response(&mut biquad, 512);

            for (n, (a, b)) in expected.iter().zip(&actual).enumerate() {
                assert!(
                    (a - b).abs() < 1e-9,
                    "{topology:?} diverges from direct form at sample {n}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn reset_clears_history_only() {
        for topology in TOPOLOGIES {
            let mut biquad = Biquad::new();
            biquad.set_coefficients(LOWPASS);
            biquad.set_topology(topology);
            let _ = impulse_response(&mut biquad, 8);
            assert_ne!(biquad.history(), [0.0; 4]);

            biquad.reset();
            assert_eq!(biquad.history(), [0.0; 4]);
            assert_eq!(biquad.coefficients(), LOWPASS);
            assert_eq!(biquad.topology(), topology);
        }
    }

    #[test]
    fn reset_reproduces_fresh_output() {
        let input: Vec<f64> = (0..64).map(|n| ((n * 7) % 11) as f64 / 11.0 - 0.5).collect();

        let mut fresh = Biquad::new();
        fresh.set_coefficients(LOWPASS);
        let expected: Vec<f64> = input.iter().map(|&x| fresh.process_sample(x)).collect();

        let mut used = Biquad::new();
        used.set_coefficients(LOWPASS);
        for &x in &input {
            let _ = used.process_sample(x * 3.0);
        }
        used.reset();
        let actual: Vec<f64> = input.iter().map(|&x| used.process_sample(x)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn set_topology_keeps_history() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(LOWPASS);
        let _ = impulse_response(&mut biquad, 3);
        let before = biquad.history();

        biquad.set_topology(Topology::TransposeCanonical);
        assert_eq!(biquad.history(), before);
    }

    #[test]
    fn garbage_propagates_without_panicking() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(LOWPASS);
        assert!(biquad.process_sample(f64::NAN).is_nan());
        assert!(biquad.process_sample(0.0).is_nan());
    }

    #[test]
    fn frequency_response_of_wire_is_flat() {
        for f in [0.0, 0.1, 0.25, 0.5] {
            let h = Coefficients::PASS_THROUGH.frequency_response(f);
            assert!((h.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn frequency_response_applies_mix_weights() {
        let dry_only = Coefficients {
            c0: 0.0,
            d0: 0.5,
            ..LOWPASS
        };
        assert!((dry_only.frequency_response(0.3).norm() - 0.5).abs() < 1e-12);
        // Lowpass has unity gain at DC
        assert!((LOWPASS.frequency_response(0.0).norm() - 1.0).abs() < 1e-9);
    }
}
