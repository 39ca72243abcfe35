//!
//! # FAST S-Function
//!
//! Gateway block taking three parameters: the FAST input file, the maximum
//! simulation time and the number of inputs added to the fixed FAST inputs.
//! At configuration the engine reports its time step and output channels,
//! which are also published to the host workspace as `DT` and `OutList`.

use super::{BlockSizes, Lifecycle, Phase, SFunction, ThisResult};
use crate::{
    engine::Engine,
    host::{Host, Variable, DT, OUT_LIST},
    io::OutputChannels,
    status::{ErrLevel, Status},
    GatewayError, Parameters, MAXIMUM_OUTPUTS,
};

pub struct FastSFunc<E: Engine> {
    engine: E,
    lifecycle: Lifecycle,
    channels: OutputChannels,
    restarted: bool,
}
impl<E: Engine> FastSFunc<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            lifecycle: Lifecycle::new(ErrLevel::Fatal),
            channels: OutputChannels::default(),
            restarted: false,
        }
    }
    pub fn engine(&self) -> &E {
        &self.engine
    }
    /// Returns the block characteristics once configured
    pub fn sizes(&self) -> Option<BlockSizes> {
        self.lifecycle.sizes
    }
    /// Status of the last engine call
    pub fn last_status(&self) -> &Status {
        &self.lifecycle.last_status
    }
    pub fn abort_level(&self) -> ErrLevel {
        self.lifecycle.abort_level
    }
    fn publish<H: Host>(&mut self, host: &mut H, name: &str, value: Variable) -> ThisResult<()> {
        match host.put_variable(name, value) {
            Ok(()) => Ok(()),
            Err(message) => Err(self.lifecycle.fail(
                host,
                GatewayError::Workspace {
                    name: name.to_owned(),
                    message,
                },
            )),
        }
    }
}

impl<E: Engine> SFunction for FastSFunc<E> {
    fn configure<H: Host>(
        &mut self,
        host: &mut H,
        parameters: &Parameters,
    ) -> ThisResult<BlockSizes> {
        self.lifecycle.require("configure", Phase::Unconfigured)?;
        let input_width = match parameters.validate() {
            Ok(n) => n,
            Err(e) => {
                host.set_error_status(e.to_string());
                return Err(e);
            }
        };
        let report = match &parameters.checkpoint {
            Some(root) => {
                log::info!("restarting FAST from {}", root);
                self.engine.restart(root)
            }
            None => {
                log::info!("sizing FAST model {}", parameters.input_file);
                self.engine.sizes(
                    parameters.t_max,
                    &parameters.init_inputs,
                    &parameters.input_file,
                )
            }
        };
        self.lifecycle.abort_level = report.value.abort_level;
        self.lifecycle.check(host, report.status)?;
        let sizes = report.value;
        if sizes.num_outputs > MAXIMUM_OUTPUTS {
            return Err(self
                .lifecycle
                .fail(host, GatewayError::OutputCount(sizes.num_outputs)));
        }
        self.restarted = parameters.checkpoint.is_some();
        if !self.restarted && sizes.channel_names.len() != sizes.num_outputs {
            return Err(self.lifecycle.fail(
                host,
                GatewayError::ChannelCount {
                    outputs: sizes.num_outputs,
                    names: sizes.channel_names.len(),
                },
            ));
        }
        // the host sample time is set from DT
        self.publish(host, DT, Variable::Scalar(sizes.dt))?;
        self.publish(
            host,
            OUT_LIST,
            Variable::CellColumn(sizes.channel_names.clone()),
        )?;
        self.channels = sizes.channel_names.into();
        let block = BlockSizes {
            input_width,
            output_width: sizes.num_outputs,
            sample_time: sizes.dt,
            offset_time: 0f64,
        };
        self.lifecycle.configured(block);
        Ok(block)
    }
    fn start<H: Host>(&mut self, host: &mut H) -> ThisResult<&mut Self> {
        self.lifecycle.allocate()?;
        if self.restarted {
            log::info!("FAST restarted from a checkpoint, skipping start");
        } else {
            let lifecycle = &mut self.lifecycle;
            let status = self
                .engine
                .start(&lifecycle.input_work, &mut lifecycle.output_work);
            lifecycle.check(host, status)?;
        }
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
    fn checkpoint<H: Host>(&mut self, host: &mut H, root: &str) -> ThisResult<&mut Self> {
        self.lifecycle.require("checkpoint", Phase::Started)?;
        log::info!("writing FAST checkpoint {}", root);
        let status = self.engine.create_checkpoint(root);
        self.lifecycle.check(host, status)?;
        Ok(self)
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

impl<E: Engine> Drop for FastSFunc<E> {
    fn drop(&mut self) {
        if self.lifecycle.engine_touched() {
            log::warn!("FAST gateway dropped without terminate");
            self.terminate();
        }
    }
}
