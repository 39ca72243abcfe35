use super::{BlockSizes, Phase, ThisResult};
use crate::{
    host::Host,
    status::{check_error, ErrLevel, Status},
    GatewayError,
};

/// Phase, buffers and step counter shared by the gateways
#[derive(Debug)]
pub(crate) struct Lifecycle {
    pub phase: Phase,
    pub abort_level: ErrLevel,
    pub last_status: Status,
    pub sizes: Option<BlockSizes>,
    /// Engine input buffer
    pub input_work: Vec<f64>,
    /// Engine output buffer
    pub output_work: Vec<f64>,
    /// Outputs handed to the host
    pub outputs: Vec<f64>,
    pub steps: u64,
}
impl Lifecycle {
    pub fn new(abort_level: ErrLevel) -> Self {
        Self {
            phase: Phase::Unconfigured,
            abort_level,
            last_status: Status::ok(),
            sizes: None,
            input_work: Vec::new(),
            output_work: Vec::new(),
            outputs: Vec::new(),
            steps: 0,
        }
    }
    pub fn require(&self, operation: &'static str, phase: Phase) -> ThisResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GatewayError::OutOfOrder {
                operation,
                phase: self.phase,
            })
        }
    }
    /// Applies the error policy to an engine status, latching the abort
    pub fn check<H: Host>(&mut self, host: &mut H, status: Status) -> ThisResult<()> {
        let result = check_error(host, &status, self.abort_level);
        self.last_status = status;
        if result.is_err() {
            self.phase = Phase::Aborted;
        }
        result
    }
    /// Reports a gateway error through the host error channel and aborts the run
    pub fn fail<H: Host>(&mut self, host: &mut H, error: GatewayError) -> GatewayError {
        log::error!("{}", error);
        host.set_error_status(error.to_string());
        self.phase = Phase::Aborted;
        error
    }
    pub fn configured(&mut self, sizes: BlockSizes) {
        log::info!(
            "block sizes: {} inputs, {} outputs, sample time {}s",
            sizes.input_width,
            sizes.output_width,
            sizes.sample_time
        );
        self.sizes = Some(sizes);
        self.phase = Phase::Configured;
    }
    /// Allocates zeroed work buffers for the configured widths
    pub fn allocate(&mut self) -> ThisResult<()> {
        self.require("start", Phase::Configured)?;
        let sizes = self.sizes.ok_or(GatewayError::OutOfOrder {
            operation: "start",
            phase: Phase::Unconfigured,
        })?;
        self.input_work = vec![0f64; sizes.input_width];
        self.output_work = vec![0f64; sizes.output_width];
        self.outputs = vec![0f64; sizes.output_width];
        Ok(())
    }
    /// Publishes the engine initial outputs and resets the step counter
    pub fn started(&mut self) {
        self.outputs.copy_from_slice(&self.output_work);
        self.steps = 0;
        self.phase = Phase::Started;
    }
    /// Runs one engine update on the host inputs
    pub fn step<H, F>(&mut self, host: &mut H, inputs: &[f64], update: F) -> ThisResult<()>
    where
        H: Host,
        F: FnOnce(&[f64], &mut [f64]) -> Status,
    {
        if self.phase == Phase::Aborted {
            log::debug!("run aborted, step ignored");
            return Ok(());
        }
        self.require("step", Phase::Started)?;
        if inputs.len() != self.input_work.len() {
            return Err(GatewayError::InputWidth {
                expected: self.input_work.len(),
                actual: inputs.len(),
            });
        }
        self.input_work.copy_from_slice(inputs);
        let status = update(&self.input_work, &mut self.output_work);
        self.steps += 1;
        self.check(host, status)?;
        self.outputs.copy_from_slice(&self.output_work);
        Ok(())
    }
    pub fn outputs(&self) -> ThisResult<&[f64]> {
        match self.phase {
            Phase::Started => Ok(&self.outputs),
            Phase::Aborted if !self.outputs.is_empty() => Ok(&self.outputs),
            phase => Err(GatewayError::OutOfOrder {
                operation: "read outputs",
                phase,
            }),
        }
    }
    /// Moves to `Terminated`, returns `true` if the engine must be ended
    pub fn terminate(&mut self) -> bool {
        if self.phase == Phase::Terminated {
            log::debug!("already terminated");
            return false;
        }
        log::info!(
            "terminating after {} steps ({} was the last FAST status)",
            self.steps,
            self.last_status.level
        );
        self.phase = Phase::Terminated;
        true
    }
    /// Checks if a dropped gateway left the engine running
    pub fn engine_touched(&self) -> bool {
        !matches!(self.phase, Phase::Unconfigured | Phase::Terminated)
    }
}
