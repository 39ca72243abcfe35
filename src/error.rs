use super::{sfunction::Phase, status::ErrLevel};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("number of additional inputs must not be negative (got {0})")]
    NegativeAdditionalInputs(i64),
    #[error("number of additional inputs is not a number")]
    InvalidAdditionalInputs,
    #[error("too many additional inputs: {given} given, at most {max}")]
    TooManyAdditionalInputs { given: i64, max: i64 },
    #[error("maximum simulation time must be finite (got {0})")]
    InvalidTMax(f64),
    #[error("too many initial inputs: {given} given, at most {max}")]
    TooManyInitInputs { given: usize, max: usize },
    #[error("cannot {operation} while {phase}")]
    OutOfOrder {
        operation: &'static str,
        phase: Phase,
    },
    #[error("expected {expected} inputs, got {actual}")]
    InputWidth { expected: usize, actual: usize },
    #[error("FAST {level}: {message}")]
    Engine { level: ErrLevel, message: String },
    #[error("FAST reported {0} outputs, more than the interface supports")]
    OutputCount(usize),
    #[error("FAST reported {outputs} outputs but {names} channel names")]
    ChannelCount { outputs: usize, names: usize },
    #[error("error copying {name} to the host workspace: {message}")]
    Workspace { name: String, message: String },
    #[error("{0} is not supported by this gateway")]
    Unsupported(&'static str),
}
