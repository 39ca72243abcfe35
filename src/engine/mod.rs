//! FAST engine interface
//!
//! The calls the gateway makes into the FAST library. The engine owns the
//! turbine model; the gateway hands it buffers on every call and reads back
//! the call status.

use crate::status::{ErrLevel, Report, Status};

pub mod fast;
pub use fast::{FastLibrary, FastLibraryError};

/// FAST model dimensions returned at sizing time
#[derive(Debug, Clone, PartialEq)]
pub struct Sizes {
    /// Error level at and above which the simulation must stop
    pub abort_level: ErrLevel,
    pub num_outputs: usize,
    /// Engine time step [s]
    pub dt: f64,
    /// Output channel names, empty on restart
    pub channel_names: Vec<String>,
}
impl Default for Sizes {
    fn default() -> Self {
        Self {
            abort_level: ErrLevel::Fatal,
            num_outputs: 0,
            dt: 0f64,
            channel_names: Vec::new(),
        }
    }
}

pub trait Engine {
    /// Reads the input file and returns the model dimensions
    fn sizes(&mut self, t_max: f64, init_inputs: &[f64], input_file: &str) -> Report<Sizes>;
    /// Restores the model from a checkpoint instead of sizing it from an input file
    fn restart(&mut self, checkpoint_root: &str) -> Report<Sizes>;
    /// Initializes the model and writes the initial outputs
    fn start(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status;
    /// Advances the model by one time step
    fn update(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status;
    fn create_checkpoint(&mut self, checkpoint_root: &str) -> Status;
    /// Shuts the model down; there is no status
    fn end(&mut self);
}

/// Engine of the first generation gateway: no sizing, start takes the input file
pub trait LegacyEngine {
    /// Starts the model; the engine may return a lower abort level
    fn start(&mut self, input_file: &str, abort_level: ErrLevel) -> Report<ErrLevel>;
    fn update(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status;
    fn end(&mut self);
}
