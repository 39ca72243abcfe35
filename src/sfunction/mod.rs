//! FAST gateway blocks
//!
//! Both gateways mirror the host simulation lifecycle onto the FAST engine:
//! configure (sizes and sample time), start, step once per sample time and
//! terminate. Outputs are read back from the last step without calling the
//! engine, so the host may ask for them as often as it needs.

use crate::{host::Host, io::OutputChannels, GatewayError, Parameters};
use serde::Serialize;
use std::fmt;

mod lifecycle;
pub(crate) use lifecycle::Lifecycle;

pub mod fast_sfunc;
pub use fast_sfunc::FastSFunc;
pub mod legacy;
pub use legacy::LegacyGateway;

type ThisResult<T> = Result<T, GatewayError>;

/// Gateway lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Unconfigured,
    Configured,
    Started,
    /// The engine reported an error at or above the abort level
    Aborted,
    Terminated,
}
impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Phase::Unconfigured => "unconfigured",
            Phase::Configured => "configured",
            Phase::Started => "started",
            Phase::Aborted => "aborted",
            Phase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Block characteristics handed to the host scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockSizes {
    pub input_width: usize,
    pub output_width: usize,
    /// Discrete sample time [s]
    pub sample_time: f64,
    pub offset_time: f64,
}

/// Host facing gateway interface
pub trait SFunction {
    /// Sizes the block from its parameters
    fn configure<H: Host>(&mut self, host: &mut H, parameters: &Parameters)
        -> ThisResult<BlockSizes>;
    /// Starts the engine
    fn start<H: Host>(&mut self, host: &mut H) -> ThisResult<&mut Self>;
    /// Advances the engine by one sample time with `inputs`
    ///
    /// Once the run is aborted, stepping does nothing.
    fn step<H: Host>(&mut self, host: &mut H, inputs: &[f64]) -> ThisResult<&mut Self>;
    /// Returns the outputs of the last step
    fn outputs(&self) -> ThisResult<&[f64]>;
    /// Writes an engine checkpoint `<root>`
    fn checkpoint<H: Host>(&mut self, _host: &mut H, _root: &str) -> ThisResult<&mut Self> {
        Err(GatewayError::Unsupported("checkpoint"))
    }
    /// Shuts the engine down, only the first call reaches the engine
    fn terminate(&mut self);
    fn phase(&self) -> Phase;
    /// Number of engine updates since start
    fn steps(&self) -> u64;
    fn channels(&self) -> &OutputChannels;
}
