//! A family of first- and second-order IIR filters behind a nih-plug effect.
//!
//! The numeric engine is usable on its own: [`AudioFilter`] turns a [`FilterAlgorithm`] plus
//! cutoff, Q and gain into [`biquad::Coefficients`] and runs them through a [`Biquad`] in any of
//! its four [`Topology`] realizations. [`IirFilter`] is the plugin wrapper, one `AudioFilter` per
//! channel.

use nih_plug::prelude::*;

pub mod algorithm;
pub mod biquad;
pub mod coefficients;
pub mod filter;
mod params;
mod processor;

pub use algorithm::FilterAlgorithm;
pub use biquad::{Biquad, Coefficients, Topology};
pub use coefficients::FilterSettings;
pub use filter::{AudioFilter, CoefficientState};
pub use processor::IirFilter;

nih_export_clap!(IirFilter);
nih_export_vst3!(IirFilter);
