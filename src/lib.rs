//! FAST gateway for block-diagram simulation hosts
//!
//! The gateway sizes, starts, steps, checkpoints and ends a FAST wind turbine
//! simulation on behalf of a host that only knows about input and output
//! ports and a sample time.
//! [`FastSFunc`] is the current gateway and [`LegacyGateway`] the first
//! generation one; both are driven through the [`SFunction`] trait, either by
//! a real host implementing [`Host`] or by the headless [`Runner`].

pub mod engine;
pub mod error;
pub mod host;
pub mod io;
pub mod parameters;
pub mod runner;
pub mod sfunction;
pub mod status;
#[cfg(test)]
mod testing;

pub use engine::{Engine, FastLibrary, FastLibraryError, LegacyEngine, Sizes};
pub use error::GatewayError;
pub use host::{HeadlessHost, Host, Variable};
pub use io::{FixedInput, InputFrame, OutputChannels, NUM_FIXED_INPUTS};
pub use parameters::Parameters;
pub use runner::{Inputs, Record, Runner, RunnerError};
pub use sfunction::{BlockSizes, FastSFunc, LegacyGateway, Phase, SFunction};
pub use status::{ErrLevel, Report, Status};

/// Size of the character buffers exchanged with the FAST library
pub const INTERFACE_STRING_LENGTH: usize = 1025;
/// Number of blades in the fixed input layout
pub const MAXIMUM_BLADES: usize = 3;
/// Largest number of output channels FAST may report
pub const MAXIMUM_OUTPUTS: usize = 1000;
/// Width of an output channel name
pub const CHANNEL_LENGTH: usize = 10;
/// Number of initialization inputs passed to FAST
pub const MAX_INIT_INPUTS: usize = 10;
