use nih_plug::prelude::*;
use std::sync::Arc;

use crate::biquad::Topology;
use crate::filter::AudioFilter;
use crate::params::IirFilterParams;

pub struct IirFilter {
    params: Arc<IirFilterParams>,

    sample_rate: f32,
    // One independent filter per channel, sized in `initialize()`
    filters: Vec<AudioFilter>,
    current_topology: Topology,
}

impl IirFilter {
    /// Pushes the discrete selectors into every channel. Only a real topology change touches the
    /// filters' history.
    fn sync_selectors(&mut self) {
        let algorithm = self.params.filter_type.value();
        let topology = self.params.topology.value();

        for filter in self.filters.iter_mut() {
            filter.set_algorithm(algorithm);
        }

        if topology != self.current_topology {
            self.current_topology = topology;
            for filter in self.filters.iter_mut() {
                filter.set_topology(topology);
            }
        }
    }
}

impl Default for IirFilter {
    fn default() -> Self {
        Self {
            params: Arc::new(IirFilterParams::default()),

            sample_rate: 44100.0,
            filters: Vec::new(),
            current_topology: Topology::Direct,
        }
    }
}

impl Plugin for IirFilter {
    const NAME: &'static str = "IIR Filters";
    const VENDOR: &'static str = "wpdsp";
    const URL: &'static str = "";
    const EMAIL: &'static str = "";

    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            ..AudioIOLayout::const_default()
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            ..AudioIOLayout::const_default()
        },
    ];

    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        self.sample_rate = buffer_config.sample_rate;

        let channels = audio_io_layout
            .main_output_channels
            .map(NonZeroU32::get)
            .unwrap_or(0) as usize;

        let algorithm = self.params.filter_type.value();
        self.current_topology = self.params.topology.value();

        self.filters.clear();
        self.filters.resize_with(channels, AudioFilter::new);
        for filter in self.filters.iter_mut() {
            filter.set_algorithm(algorithm);
            filter.set_topology(self.current_topology);
            filter.set_cutoff(self.params.cutoff.value() as f64);
            filter.set_q(self.params.q.value() as f64);
            filter.set_gain_db(self.params.gain.value() as f64);
            filter.prepare(self.sample_rate as f64);
        }

        nih_log!(
            "initialized {} channel(s) at {} Hz: {} / {}",
            channels,
            self.sample_rate,
            algorithm.name(),
            Topology::variants()[self.current_topology as usize]
        );

        true
    }

    fn reset(&mut self) {
        for filter in self.filters.iter_mut() {
            filter.reset();
        }
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        nih_debug_assert!(self.filters.len() >= buffer.channels());

        self.sync_selectors();

        for channel_samples in buffer.iter_samples() {
            // Settled smoothers repeat the same value, which the filters treat as no change
            let cutoff = self.params.cutoff.smoothed.next() as f64;
            let q = self.params.q.smoothed.next() as f64;
            let gain_db = self.params.gain.smoothed.next() as f64;

            for (sample, filter) in channel_samples.into_iter().zip(self.filters.iter_mut()) {
                filter.set_cutoff(cutoff);
                filter.set_q(q);
                filter.set_gain_db(gain_db);

                *sample = filter.process_sample(*sample as f64) as f32;
            }
        }

        ProcessStatus::Normal
    }
}

impl ClapPlugin for IirFilter {
    const CLAP_ID: &'static str = "com.wpdsp.iir-filters";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("First- and second-order IIR filters, shelves and parametric EQs");
    const CLAP_MANUAL_URL: Option<&'static str> = Some(Self::URL);
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Mono,
        ClapFeature::Filter,
        ClapFeature::Equalizer,
    ];
}

impl Vst3Plugin for IirFilter {
    const VST3_CLASS_ID: [u8; 16] = *b"IirFiltersWpdsp1";
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Filter, Vst3SubCategory::Eq];
}
