//! Gateway block parameters
//!
//! The three parameters of the FAST block (input file, maximum simulation
//! time, number of additional inputs) plus the optional initial inputs and
//! restart checkpoint.

use super::{io::NUM_FIXED_INPUTS, GatewayError, MAX_INIT_INPUTS};
use serde::{Deserialize, Serialize};
use std::os::raw::c_int;

type ThisResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// FAST primary input file
    pub input_file: String,
    /// Maximum simulation time [s]
    pub t_max: f64,
    /// Number of inputs appended to the fixed FAST inputs
    #[serde(default)]
    pub additional_inputs: i64,
    /// Initial values handed to FAST at sizing time
    #[serde(default)]
    pub init_inputs: Vec<f64>,
    /// Checkpoint root name to restart from instead of the input file
    #[serde(default)]
    pub checkpoint: Option<String>,
}
impl Parameters {
    pub fn new<S: Into<String>>(input_file: S) -> Self {
        Self {
            input_file: input_file.into(),
            t_max: 0f64,
            additional_inputs: 0,
            init_inputs: Vec::new(),
            checkpoint: None,
        }
    }
    /// Builds the parameters from the raw block dialog values
    ///
    /// The number of additional inputs comes from the host as a real number and is
    /// rounded to the nearest integer.
    pub fn from_block(input_file: &str, t_max: f64, additional_inputs: f64) -> ThisResult<Self> {
        if !additional_inputs.is_finite() {
            return Err(GatewayError::InvalidAdditionalInputs);
        }
        let parameters = Self::new(input_file)
            .t_max(t_max)
            .additional_inputs(additional_inputs.round() as i64);
        parameters.validate()?;
        Ok(parameters)
    }
    pub fn t_max(self, t_max: f64) -> Self {
        Self { t_max, ..self }
    }
    pub fn additional_inputs(self, additional_inputs: i64) -> Self {
        Self {
            additional_inputs,
            ..self
        }
    }
    pub fn init_inputs(self, init_inputs: Vec<f64>) -> Self {
        Self {
            init_inputs,
            ..self
        }
    }
    /// Restarts FAST from the checkpoint files `<root>.chkp`
    pub fn restart_from<S: Into<String>>(self, checkpoint_root: S) -> Self {
        Self {
            checkpoint: Some(checkpoint_root.into()),
            ..self
        }
    }
    /// Checks the parameters and returns the width of the block input port
    pub fn validate(&self) -> ThisResult<usize> {
        if !self.t_max.is_finite() {
            return Err(GatewayError::InvalidTMax(self.t_max));
        }
        if self.additional_inputs < 0 {
            return Err(GatewayError::NegativeAdditionalInputs(self.additional_inputs));
        }
        // the engine counts its inputs with a C int
        let max = c_int::MAX as i64 - NUM_FIXED_INPUTS as i64;
        if self.additional_inputs > max {
            return Err(GatewayError::TooManyAdditionalInputs {
                given: self.additional_inputs,
                max,
            });
        }
        if self.init_inputs.len() > MAX_INIT_INPUTS {
            return Err(GatewayError::TooManyInitInputs {
                given: self.init_inputs.len(),
                max: MAX_INIT_INPUTS,
            });
        }
        Ok(NUM_FIXED_INPUTS + self.additional_inputs as usize)
    }
    /// Returns the width of the block input port
    pub fn input_width(&self) -> ThisResult<usize> {
        self.validate()
    }
}
