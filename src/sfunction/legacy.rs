//! First generation FAST gateway
//!
//! A single parameter, the FAST input file, handed to the engine at start.
//! The engine is not sized: the block has one input, one output and a fixed
//! sample time.

use super::{BlockSizes, Lifecycle, Phase, SFunction, ThisResult};
use crate::{
    engine::LegacyEngine, host::Host, io::OutputChannels, status::ErrLevel, Parameters,
};

/// Sample time of the first generation gateway [s]
pub const LEGACY_SAMPLE_TIME: f64 = 0.01;

pub struct LegacyGateway<E: LegacyEngine> {
    engine: E,
    lifecycle: Lifecycle,
    input_file: String,
    channels: OutputChannels,
}
impl<E: LegacyEngine> LegacyGateway<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            lifecycle: Lifecycle::new(ErrLevel::Fatal),
            input_file: String::new(),
            channels: OutputChannels::default(),
        }
    }
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: LegacyEngine> SFunction for LegacyGateway<E> {
    fn configure<H: Host>(
        &mut self,
        _host: &mut H,
        parameters: &Parameters,
    ) -> ThisResult<BlockSizes> {
        self.lifecycle.require("configure", Phase::Unconfigured)?;
        self.input_file = parameters.input_file.clone();
        let block = BlockSizes {
            input_width: 1,
            output_width: 1,
            sample_time: LEGACY_SAMPLE_TIME,
            offset_time: 0f64,
        };
        self.lifecycle.configured(block);
        Ok(block)
    }
    fn start<H: Host>(&mut self, host: &mut H) -> ThisResult<&mut Self> {
        self.lifecycle.allocate()?;
        log::info!("starting FAST with {}", self.input_file);
        let report = self
            .engine
            .start(&self.input_file, self.lifecycle.abort_level);
        self.lifecycle.abort_level = report.value;
        self.lifecycle.check(host, report.status)?;
        self.lifecycle.started();
        Ok(self)
    }
    fn step<H: Host>(&mut self, host: &mut H, inputs: &[f64]) -> ThisResult<&mut Self> {
        let engine = &mut self.engine;
        self.lifecycle
            .step(host, inputs, |u, y| engine.update(u, y))?;
        Ok(self)
    }
    fn outputs(&self) -> ThisResult<&[f64]> {
        self.lifecycle.outputs()
    }
    fn terminate(&mut self) {
        if self.lifecycle.terminate() {
            self.engine.end();
        }
    }
    fn phase(&self) -> Phase {
        self.lifecycle.phase
    }
    fn steps(&self) -> u64 {
        self.lifecycle.steps
    }
    fn channels(&self) -> &OutputChannels {
        &self.channels
    }
}

impl<E: LegacyEngine> Drop for LegacyGateway<E> {
    fn drop(&mut self) {
        // configuring does not reach the engine
        if matches!(self.lifecycle.phase, Phase::Started | Phase::Aborted) {
            log::warn!("FAST gateway dropped without terminate");
            self.terminate();
        }
    }
}
