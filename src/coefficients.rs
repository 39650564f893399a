//! Closed-form coefficient design for every [`FilterAlgorithm`].
//!
//! Each design maps `(cutoff, Q, gain, sample rate)` to a [`Coefficients`] set. The biquad terms
//! come from the usual analog prototypes (bilinear transform, impulse invariance, or Vicanek's
//! matched fits); the wet/dry pair always starts at fully wet and only the dry-blending shelf and
//! EQ types override it afterwards.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use crate::algorithm::FilterAlgorithm;
use crate::biquad::Coefficients;

/// Upper bound for bandwidth-derived `tan()` arguments, keeps them clear of the pole at pi/2.
const TAN_ARG_LIMIT: f64 = 0.95 * FRAC_PI_2;

/// The continuous parameters a design depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    pub cutoff_hz: f64,
    pub q: f64,
    pub gain_db: f64,
    pub sample_rate: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            cutoff_hz: 1000.0,
            q: 0.707,
            gain_db: 0.0,
            sample_rate: 44_100.0,
        }
    }
}

impl FilterSettings {
    /// Digital cutoff angle `2 pi fc / fs`.
    fn theta_c(&self) -> f64 {
        2.0 * PI * self.cutoff_hz / self.sample_rate
    }

    /// Bilinear pre-warp term `tan(pi fc / fs)`.
    fn k(&self) -> f64 {
        (PI * self.cutoff_hz / self.sample_rate).tan()
    }

    /// Half-bandwidth angle `pi (fc / Q) / fs`, clamped below pi/2.
    fn bandwidth_angle(&self) -> f64 {
        let bandwidth = self.cutoff_hz / self.q;
        (PI * bandwidth / self.sample_rate).min(TAN_ARG_LIMIT)
    }

    /// Linear gain `10^(dB/20)`.
    fn mu(&self) -> f64 {
        10.0f64.powf(self.gain_db / 20.0)
    }
}

/// Derives the coefficient set for `algorithm`. `None` designs a unity pass-through.
pub fn design(algorithm: Option<FilterAlgorithm>, settings: &FilterSettings) -> Coefficients {
    let Some(algorithm) = algorithm else {
        return Coefficients::PASS_THROUGH;
    };

    let s = settings;
    let mut coefficients = match algorithm {
        FilterAlgorithm::Lpf1p => lpf1p(s),
        FilterAlgorithm::Lpf1 => first_order(s, false),
        FilterAlgorithm::Hpf1 => first_order(s, true),
        FilterAlgorithm::Lpf2 => second_order(s, false),
        FilterAlgorithm::Hpf2 => second_order(s, true),
        FilterAlgorithm::Bpf2 => bpf2(s),
        FilterAlgorithm::Bsf2 => bsf2(s),
        FilterAlgorithm::ButterLpf2 => butter_lpf2(s),
        FilterAlgorithm::ButterHpf2 => butter_hpf2(s),
        FilterAlgorithm::ButterBpf2 => butter_bpf2(s),
        FilterAlgorithm::ButterBsf2 => butter_bsf2(s),
        FilterAlgorithm::MmaLpf2 => mma_lpf2(s, true),
        FilterAlgorithm::MmaLpf2b => mma_lpf2(s, false),
        FilterAlgorithm::LowShelf => low_shelf(s),
        FilterAlgorithm::HiShelf => high_shelf(s),
        FilterAlgorithm::NcqParaEq => ncq_para_eq(s),
        FilterAlgorithm::CqParaEq => cq_para_eq(s),
        FilterAlgorithm::LwrLpf2 => linkwitz_riley(s, false),
        FilterAlgorithm::LwrHpf2 => linkwitz_riley(s, true),
        FilterAlgorithm::Apf1 => apf1(s),
        FilterAlgorithm::Apf2 => apf2(s),
        FilterAlgorithm::ResonA => resonator(s, false),
        FilterAlgorithm::ResonB => resonator(s, true),
        FilterAlgorithm::MatchLp2a => match_lp2_tight(s),
        FilterAlgorithm::MatchLp2b => match_lp2_loose(s),
        FilterAlgorithm::MatchBp2a => match_bp2_tight(s),
        FilterAlgorithm::MatchBp2b => match_bp2_loose(s),
        FilterAlgorithm::ImpInvLp1 => imp_inv_lp1(s),
        FilterAlgorithm::ImpInvLp2 => imp_inv_lp2(s),
    };

    if algorithm.mixes_dry_signal() {
        coefficients.c0 = s.mu() - 1.0;
        coefficients.d0 = 1.0;
    }

    coefficients
}

/// A fully wet section with the given biquad terms.
fn section(a0: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> Coefficients {
    Coefficients {
        a0,
        a1,
        a2,
        b1,
        b2,
        ..Coefficients::PASS_THROUGH
    }
}

fn lpf1p(s: &FilterSettings) -> Coefficients {
    let gamma = 2.0 - s.theta_c().cos();
    let b1 = (gamma * gamma - 1.0).sqrt() - gamma;
    section(1.0 + b1, 0.0, 0.0, b1, 0.0)
}

fn first_order(s: &FilterSettings, highpass: bool) -> Coefficients {
    let theta_c = s.theta_c();
    let gamma = theta_c.cos() / (1.0 + theta_c.sin());

    if highpass {
        let a0 = (1.0 + gamma) / 2.0;
        section(a0, -a0, 0.0, -gamma, 0.0)
    } else {
        let a0 = (1.0 - gamma) / 2.0;
        section(a0, a0, 0.0, -gamma, 0.0)
    }
}

fn second_order(s: &FilterSettings, highpass: bool) -> Coefficients {
    let theta_c = s.theta_c();
    let half_d_sin = (1.0 / s.q) / 2.0 * theta_c.sin();

    let beta = 0.5 * (1.0 - half_d_sin) / (1.0 + half_d_sin);
    let gamma = (0.5 + beta) * theta_c.cos();

    if highpass {
        let alpha = (0.5 + beta + gamma) / 2.0;
        section(alpha, -2.0 * alpha, alpha, -2.0 * gamma, 2.0 * beta)
    } else {
        let alpha = (0.5 + beta - gamma) / 2.0;
        section(alpha, 2.0 * alpha, alpha, -2.0 * gamma, 2.0 * beta)
    }
}

fn bpf2(s: &FilterSettings) -> Coefficients {
    let (k, q) = (s.k(), s.q);
    let delta = k * k * q + k + q;
    section(
        k / delta,
        0.0,
        -k / delta,
        2.0 * q * (k * k - 1.0) / delta,
        (k * k * q - k + q) / delta,
    )
}

fn bsf2(s: &FilterSettings) -> Coefficients {
    let (k, q) = (s.k(), s.q);
    let delta = k * k * q + k + q;
    let a0 = q * (1.0 + k * k) / delta;
    let a1 = 2.0 * q * (k * k - 1.0) / delta;
    section(a0, a1, a0, a1, (k * k * q - k + q) / delta)
}

fn butter_lpf2(s: &FilterSettings) -> Coefficients {
    let c = 1.0 / s.k();
    let a0 = 1.0 / (1.0 + SQRT_2 * c + c * c);
    section(
        a0,
        2.0 * a0,
        a0,
        2.0 * a0 * (1.0 - c * c),
        a0 * (1.0 - SQRT_2 * c + c * c),
    )
}

fn butter_hpf2(s: &FilterSettings) -> Coefficients {
    let c = s.k();
    let a0 = 1.0 / (1.0 + SQRT_2 * c + c * c);
    section(
        a0,
        -2.0 * a0,
        a0,
        2.0 * a0 * (c * c - 1.0),
        a0 * (1.0 - SQRT_2 * c + c * c),
    )
}

fn butter_bpf2(s: &FilterSettings) -> Coefficients {
    let c = 1.0 / s.bandwidth_angle().tan();
    let d = 2.0 * s.theta_c().cos();
    let a0 = 1.0 / (1.0 + c);
    section(a0, 0.0, -a0, -a0 * c * d, a0 * (c - 1.0))
}

fn butter_bsf2(s: &FilterSettings) -> Coefficients {
    let c = s.bandwidth_angle().tan();
    let d = 2.0 * s.theta_c().cos();
    let a0 = 1.0 / (1.0 + c);
    section(a0, -a0 * d, a0, -a0 * d, a0 * (1.0 - c))
}

/// Resonant two-pole lowpass. Above Butterworth Q the analog resonance peak is placed explicitly;
/// `compensate_gain` pulls the passband down by half the peak (in dB) so loudness tracks Q less.
fn mma_lpf2(s: &FilterSettings, compensate_gain: bool) -> Coefficients {
    let theta_c = s.theta_c();
    let q = s.q;

    let resonance_db = if q > 0.707 {
        let peak = q * q / (q * q - 0.25).sqrt();
        20.0 * peak.log10()
    } else {
        0.0
    };

    let (sin, cos) = theta_c.sin_cos();
    let radius = (cos + sin * (10.0f64.powf(resonance_db / 10.0) - 1.0).sqrt())
        / (10.0f64.powf(resonance_db / 20.0) * sin + 1.0);
    let g = if compensate_gain {
        10.0f64.powf(-resonance_db / 40.0)
    } else {
        1.0
    };

    let b1 = -2.0 * radius * cos;
    let b2 = radius * radius;
    section(g * (1.0 + b1 + b2), 0.0, 0.0, b1, b2)
}

fn low_shelf(s: &FilterSettings) -> Coefficients {
    let beta = 4.0 / (1.0 + s.mu());
    let delta = beta * (s.theta_c() / 2.0).tan();
    let gamma = (1.0 - delta) / (1.0 + delta);

    let a0 = (1.0 - gamma) / 2.0;
    section(a0, a0, 0.0, -gamma, 0.0)
}

fn high_shelf(s: &FilterSettings) -> Coefficients {
    let beta = (1.0 + s.mu()) / 4.0;
    let delta = beta * (s.theta_c() / 2.0).tan();
    let gamma = (1.0 - delta) / (1.0 + delta);

    let a0 = (1.0 + gamma) / 2.0;
    section(a0, -a0, 0.0, -gamma, 0.0)
}

/// Non-constant-Q peaking EQ: a bandpass that gets blended with the dry signal.
fn ncq_para_eq(s: &FilterSettings) -> Coefficients {
    let theta_c = s.theta_c();
    let tan_arg = (theta_c / (2.0 * s.q)).min(TAN_ARG_LIMIT);

    let zeta = 4.0 / (1.0 + s.mu());
    let zeta_tan = zeta * tan_arg.tan();
    let beta = 0.5 * (1.0 - zeta_tan) / (1.0 + zeta_tan);
    let gamma = (0.5 + beta) * theta_c.cos();
    let alpha = 0.5 - beta;

    section(alpha, 0.0, -alpha, -2.0 * gamma, 2.0 * beta)
}

/// Constant-Q peaking EQ. Boost and cut are mirror images, so the cut branch swaps the roles of
/// `Q` and `Vo * Q` in the denominator.
fn cq_para_eq(s: &FilterSettings) -> Coefficients {
    let k = s.k();
    let k2 = k * k;
    let q = s.q;
    let vo = s.mu();

    let d0 = 1.0 + k / q + k2;
    let e0 = 1.0 + k / (vo * q) + k2;
    let alpha = 1.0 + (vo / q) * k + k2;
    let beta = 2.0 * (k2 - 1.0);
    let gamma = 1.0 - (vo / q) * k + k2;
    let delta = 1.0 - k / q + k2;
    let eta = 1.0 - k / (vo * q) + k2;

    if s.gain_db >= 0.0 {
        section(alpha / d0, beta / d0, gamma / d0, beta / d0, delta / d0)
    } else {
        section(d0 / e0, beta / e0, delta / e0, beta / e0, eta / e0)
    }
}

fn linkwitz_riley(s: &FilterSettings, highpass: bool) -> Coefficients {
    let omega_c = PI * s.cutoff_hz;
    let theta_c = PI * s.cutoff_hz / s.sample_rate;

    let k = omega_c / theta_c.tan();
    let denominator = k * k + omega_c * omega_c + 2.0 * k * omega_c;
    let b1 = (-2.0 * k * k + 2.0 * omega_c * omega_c) / denominator;
    let b2 = (-2.0 * k * omega_c + k * k + omega_c * omega_c) / denominator;

    if highpass {
        let a0 = k * k / denominator;
        section(a0, -2.0 * a0, a0, b1, b2)
    } else {
        let a0 = omega_c * omega_c / denominator;
        section(a0, 2.0 * a0, a0, b1, b2)
    }
}

fn apf1(s: &FilterSettings) -> Coefficients {
    let k = s.k();
    let alpha = (k - 1.0) / (k + 1.0);
    section(alpha, 1.0, 0.0, alpha, 0.0)
}

fn apf2(s: &FilterSettings) -> Coefficients {
    let tan = s.bandwidth_angle().tan();
    let alpha = (tan - 1.0) / (tan + 1.0);
    let beta = -s.theta_c().cos();
    section(-alpha, beta * (1.0 - alpha), 1.0, beta * (1.0 - alpha), -alpha)
}

/// Two-pole resonator with bandwidth `fc / Q`. The B form adds zeros at DC and Nyquist.
fn resonator(s: &FilterSettings, with_zeros: bool) -> Coefficients {
    let bandwidth = s.cutoff_hz / s.q;
    let b2 = (-2.0 * PI * bandwidth / s.sample_rate).exp();
    let b1 = (-4.0 * b2 / (1.0 + b2)) * s.theta_c().cos();

    if with_zeros {
        let a0 = 1.0 - b2.sqrt();
        section(a0, 0.0, -a0, b1, b2)
    } else {
        let a0 = (1.0 - b2) * (1.0 - b1 * b1 / (4.0 * b2)).sqrt();
        section(a0, 0.0, 0.0, b1, b2)
    }
}

/// Impulse-invariant pole pair `(b1, b2)` shared by the matched designs. Underdamped poles
/// (`zeta <= 1`) oscillate, overdamped ones decay along `cosh`.
fn matched_poles(theta_c: f64, zeta: f64) -> (f64, f64) {
    let decay = (-zeta * theta_c).exp();
    let b2 = decay * decay;
    let b1 = if zeta <= 1.0 {
        -2.0 * decay * ((1.0 - zeta * zeta).sqrt() * theta_c).cos()
    } else {
        -2.0 * decay * ((zeta * zeta - 1.0).sqrt() * theta_c).cosh()
    };
    (b1, b2)
}

/// Squared-magnitude basis terms `(B0, B1, B2)` and `(phi0, phi1, phi2)` of the tight fits.
fn tight_fit_terms(b1: f64, b2: f64, theta_c: f64) -> ([f64; 3], [f64; 3]) {
    let big_b = [
        (1.0 + b1 + b2).powi(2),
        (1.0 - b1 + b2).powi(2),
        -4.0 * b2,
    ];

    let phi1 = (theta_c / 2.0).sin().powi(2);
    let phi0 = 1.0 - phi1;
    (big_b, [phi0, phi1, 4.0 * phi0 * phi1])
}

/// `(f0, |H_analog|` denominator `)` for the loose fits, with `f0` as a fraction of Nyquist.
fn loose_fit_terms(theta_c: f64, q: f64) -> (f64, f64) {
    let f0 = theta_c / PI;
    let denominator = ((1.0 - f0 * f0).powi(2) + (f0 * f0) / (q * q)).sqrt();
    (f0, denominator)
}

fn match_lp2_tight(s: &FilterSettings) -> Coefficients {
    let theta_c = s.theta_c();
    let (b1, b2) = matched_poles(theta_c, 1.0 / (2.0 * s.q));
    let ([big_b0, big_b1, big_b2], [phi0, phi1, phi2]) = tight_fit_terms(b1, b2, theta_c);

    let r1 = (big_b0 * phi0 + big_b1 * phi1 + big_b2 * phi2) * (s.q * s.q);
    let big_a0 = big_b0;
    let big_a1 = (r1 - big_a0 * phi0) / phi1;

    let (sqrt_a0, sqrt_a1) = (big_a0.max(0.0).sqrt(), big_a1.max(0.0).sqrt());
    let a0 = 0.5 * (sqrt_a0 + sqrt_a1);
    section(a0, sqrt_a0 - a0, 0.0, b1, b2)
}

fn match_lp2_loose(s: &FilterSettings) -> Coefficients {
    let theta_c = s.theta_c();
    let (b1, b2) = matched_poles(theta_c, 1.0 / (2.0 * s.q));
    let (f0, denominator) = loose_fit_terms(theta_c, s.q);

    let r0 = 1.0 + b1 + b2;
    let r1 = (1.0 - b1 + b2) * f0 * f0 / denominator;

    let a0 = (r0 + r1) / 2.0;
    section(a0, r0 - a0, 0.0, b1, b2)
}

fn match_bp2_tight(s: &FilterSettings) -> Coefficients {
    let theta_c = s.theta_c();
    let (b1, b2) = matched_poles(theta_c, 1.0 / (2.0 * s.q));
    let ([big_b0, big_b1, big_b2], [phi0, phi1, phi2]) = tight_fit_terms(b1, b2, theta_c);

    let r1 = big_b0 * phi0 + big_b1 * phi1 + big_b2 * phi2;
    let r2 = -big_b0 + big_b1 + 4.0 * (phi0 - phi1) * big_b2;

    let big_a2 = (r1 - r2 * phi1) / (4.0 * phi1 * phi1);
    let big_a1 = r2 + 4.0 * (phi1 - phi0) * big_a2;

    let a1 = -0.5 * big_a1.sqrt();
    let a0 = 0.5 * ((big_a2 + a1 * a1).sqrt() - a1);
    section(a0, a1, -a0 - a1, b1, b2)
}

fn match_bp2_loose(s: &FilterSettings) -> Coefficients {
    let theta_c = s.theta_c();
    let (b1, b2) = matched_poles(theta_c, 1.0 / (2.0 * s.q));
    let (f0, denominator) = loose_fit_terms(theta_c, s.q);

    let r0 = (1.0 + b1 + b2) / (PI * f0 * s.q);
    let r1 = (1.0 - b1 + b2) * (f0 / s.q) / denominator;

    let a1 = -r1 / 2.0;
    let a0 = (r0 - a1) / 2.0;
    section(a0, a1, -a0 - a1, b1, b2)
}

fn imp_inv_lp1(s: &FilterSettings) -> Coefficients {
    let e_t = (-2.0 * PI * s.cutoff_hz / s.sample_rate).exp();
    // normalized to unity DC gain
    section(1.0 - e_t, 0.0, 0.0, -e_t, 0.0)
}

/// Maps the analog pole pair `p = -alpha/2Q +/- j alpha sqrt(1 - zeta^2)` through `exp()`. The
/// residue is purely imaginary, so the numerator reduces to a single `z^-1` term.
fn imp_inv_lp2(s: &FilterSettings) -> Coefficients {
    let alpha = s.theta_c();
    let zeta = 1.0 / (2.0 * s.q);
    let damped = (1.0 - zeta * zeta).sqrt();

    let p_re = -alpha / (2.0 * s.q);
    let p_im = alpha * damped;
    let c_im = alpha / (2.0 * damped);

    let e_re = p_re.exp();
    section(
        0.0,
        -2.0 * c_im * p_im.sin() * e_re,
        0.0,
        -2.0 * e_re * p_im.cos(),
        e_re * e_re,
    )
}
