use nih_plug::prelude::*;

use crate::algorithm::FilterAlgorithm;
use crate::biquad::Topology;

/// Smoothing time for the continuous controls.
const SMOOTHING_MS: f32 = 10.0;

#[derive(Params)]
pub struct IirFilterParams {
    #[id = "type"]
    pub filter_type: EnumParam<FilterAlgorithm>,

    #[id = "cutoff"]
    pub cutoff: FloatParam,
    #[id = "q"]
    pub q: FloatParam,
    #[id = "gain"]
    pub gain: FloatParam,

    #[id = "topology"]
    pub topology: EnumParam<Topology>,
}

impl Default for IirFilterParams {
    fn default() -> Self {
        Self {
            filter_type: EnumParam::new("Filter Type", FilterAlgorithm::Lpf2),

            cutoff: FloatParam::new(
                "Cutoff",
                1000.0,
                FloatRange::Skewed {
                    min: 20.0,
                    max: 20_000.0,
                    factor: FloatRange::skew_factor(-2.0),
                },
            )
            .with_smoother(SmoothingStyle::Logarithmic(SMOOTHING_MS))
            .with_value_to_string(formatters::v2s_f32_hz_then_khz(1))
            .with_string_to_value(formatters::s2v_f32_hz_then_khz()),

            q: FloatParam::new("Q", 0.707, FloatRange::Linear { min: 0.1, max: 18.0 })
                .with_smoother(SmoothingStyle::Linear(SMOOTHING_MS))
                .with_step_size(0.01)
                .with_value_to_string(formatters::v2s_f32_rounded(2)),

            gain: FloatParam::new(
                "Gain",
                0.0,
                FloatRange::Linear {
                    min: -24.0,
                    max: 24.0,
                },
            )
            .with_smoother(SmoothingStyle::Linear(SMOOTHING_MS))
            .with_step_size(0.1)
            .with_unit(" dB")
            .with_value_to_string(formatters::v2s_f32_rounded(1)),

            topology: EnumParam::new("Topology", Topology::Direct),
        }
    }
}
