//! Cross-checks the cookbook-equivalent designs against the `biquad` crate.

use biquad::{Biquad as _, Coefficients as Reference, DirectForm1, Hertz, Type};
use iir_filters::{AudioFilter, Coefficients, FilterAlgorithm};

const SAMPLE_RATE: f64 = 48_000.0;

fn reference(filter_type: Type<f64>, cutoff_hz: f64, q: f64) -> Reference<f64> {
    let fs = Hertz::<f64>::from_hz(SAMPLE_RATE).unwrap();
    let f0 = Hertz::<f64>::from_hz(cutoff_hz).unwrap();
    Reference::<f64>::from_params(filter_type, fs, f0, q).unwrap()
}

fn designed(algorithm: FilterAlgorithm, cutoff_hz: f64, q: f64) -> (AudioFilter, Coefficients) {
    let mut filter = AudioFilter::new();
    filter.set_algorithm(algorithm);
    filter.set_cutoff(cutoff_hz);
    filter.set_q(q);
    filter.prepare(SAMPLE_RATE);
    let coefficients = filter.coefficients();
    (filter, coefficients)
}

fn assert_same_section(ours: &Coefficients, theirs: &Reference<f64>, what: &str) {
    // Our feed-forward terms are a0..a2 and the feedback terms b1/b2, the reverse of theirs
    let pairs = [
        (ours.a0, theirs.b0),
        (ours.a1, theirs.b1),
        (ours.a2, theirs.b2),
        (ours.b1, theirs.a1),
        (ours.b2, theirs.a2),
    ];
    for (n, (a, b)) in pairs.iter().enumerate() {
        assert!((a - b).abs() < 1e-6, "{what}: term {n} differs, {a} vs {b}");
    }
}

#[test]
fn lpf2_matches_cookbook_lowpass() {
    for (cutoff_hz, q) in [(100.0, 0.707), (1000.0, 2.0), (8000.0, 0.5)] {
        let (_, ours) = designed(FilterAlgorithm::Lpf2, cutoff_hz, q);
        assert_same_section(&ours, &reference(Type::LowPass, cutoff_hz, q), "LPF2");
    }
}

#[test]
fn hpf2_matches_cookbook_highpass() {
    for (cutoff_hz, q) in [(100.0, 0.707), (1000.0, 2.0), (8000.0, 0.5)] {
        let (_, ours) = designed(FilterAlgorithm::Hpf2, cutoff_hz, q);
        assert_same_section(&ours, &reference(Type::HighPass, cutoff_hz, q), "HPF2");
    }
}

#[test]
fn bsf2_matches_cookbook_notch() {
    for (cutoff_hz, q) in [(60.0, 10.0), (1000.0, 2.0)] {
        let (_, ours) = designed(FilterAlgorithm::Bsf2, cutoff_hz, q);
        assert_same_section(&ours, &reference(Type::Notch, cutoff_hz, q), "BSF2");
    }
}

#[test]
fn processed_output_matches_reference_direct_form() {
    let (mut filter, _) = designed(FilterAlgorithm::Lpf2, 1200.0, 1.0);
    let mut theirs = DirectForm1::<f64>::new(reference(Type::LowPass, 1200.0, 1.0));

    for n in 0..2048 {
        let x = ((n * 37) % 101) as f64 / 50.0 - 1.0;
        let ours = filter.process_sample(x);
        let expected = theirs.run(x);
        assert!((ours - expected).abs() < 1e-6, "sample {n}: {ours} vs {expected}");
    }
}
