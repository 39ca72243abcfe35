//! Gateway inputs/outputs
//!
//! The input port of the FAST block starts with a fixed set of turbine
//! control inputs followed by the additional inputs requested by the user.
//! Outputs are described by the channel names FAST reports at sizing time.

use super::MAXIMUM_BLADES;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum IOError {
    #[error("{input} takes {expected} values, got {actual}")]
    Width {
        input: &'static str,
        expected: usize,
        actual: usize,
    },
}

type ThisResult<T> = Result<T, IOError>;

macro_rules! build_inputs {
    ($($variant:ident : $width:expr => $doc:expr),+) => {
        /// FAST fixed inputs, in input port order
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum FixedInput {
            $(#[doc = $doc] $variant),+
        }
        impl FixedInput {
            /// All the fixed inputs, in input port order
            pub const ALL: &'static [FixedInput] = &[$(FixedInput::$variant),+];
            /// Number of values taken by the input
            pub fn width(self) -> usize {
                match self {
                    $(FixedInput::$variant => $width),+
                }
            }
            /// Position of the first value of the input in the input port
            pub fn offset(self) -> usize {
                FixedInput::ALL
                    .iter()
                    .take_while(|x| **x != self)
                    .map(|x| x.width())
                    .sum()
            }
            pub fn name(self) -> &'static str {
                match self {
                    $(FixedInput::$variant => stringify!($variant)),+
                }
            }
        }
        /// Number of fixed inputs of the FAST block
        pub const NUM_FIXED_INPUTS: usize = 0 $(+ $width)+;
        paste::paste! {
            impl InputFrame {
                $(
                    #[doc = "Sets the " $doc]
                    pub fn [<$variant:snake>](self, values: &[f64]) -> ThisResult<Self> {
                        self.set(FixedInput::$variant, values)
                    }
                )+
            }
        }
    };
}

/// One sample of the FAST block input port
#[derive(Debug, Clone, PartialEq)]
pub struct InputFrame {
    values: Vec<f64>,
}
impl InputFrame {
    /// Zeroed inputs with room for `additional_inputs` values after the fixed inputs
    pub fn new(additional_inputs: usize) -> Self {
        Self {
            values: vec![0f64; NUM_FIXED_INPUTS + additional_inputs],
        }
    }
    fn set(mut self, input: FixedInput, values: &[f64]) -> ThisResult<Self> {
        if values.len() != input.width() {
            return Err(IOError::Width {
                input: input.name(),
                expected: input.width(),
                actual: values.len(),
            });
        }
        let i = input.offset();
        self.values[i..i + values.len()].copy_from_slice(values);
        Ok(self)
    }
    /// Sets the additional inputs
    pub fn additional(mut self, values: &[f64]) -> ThisResult<Self> {
        let n = self.values.len() - NUM_FIXED_INPUTS;
        if values.len() != n {
            return Err(IOError::Width {
                input: "additional inputs",
                expected: n,
                actual: values.len(),
            });
        }
        self.values[NUM_FIXED_INPUTS..].copy_from_slice(values);
        Ok(self)
    }
    pub fn get(&self, input: FixedInput) -> &[f64] {
        let i = input.offset();
        &self.values[i..i + input.width()]
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

build_inputs!(
    GenTrq: 1 => "generator torque [N-m]",
    ElecPwr: 1 => "electrical power [W]",
    YawPosCom: 1 => "yaw position command [rad]",
    YawRateCom: 1 => "yaw rate command [rad/s]",
    BlPitchCom: MAXIMUM_BLADES => "blade pitch commands [rad]",
    HssBrFrac: 1 => "high-speed shaft brake fraction [-]"
);

/// FAST output channel names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputChannels(Vec<String>);
impl OutputChannels {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn names(&self) -> &[String] {
        &self.0
    }
    /// Returns the position of the channel `name` in the output port
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|x| x == name)
    }
    /// Picks the value of the channel `name` from a sample of the output port
    pub fn select(&self, name: &str, outputs: &[f64]) -> Option<f64> {
        self.index_of(name).and_then(|i| outputs.get(i).copied())
    }
}
impl From<Vec<String>> for OutputChannels {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_inputs() {
        assert_eq!(NUM_FIXED_INPUTS, 2 + 2 + MAXIMUM_BLADES + 1);
        assert_eq!(FixedInput::GenTrq.offset(), 0);
        assert_eq!(FixedInput::BlPitchCom.offset(), 4);
        assert_eq!(FixedInput::HssBrFrac.offset(), 7);
        assert_eq!(FixedInput::BlPitchCom.width(), 3);
    }

    #[test]
    fn input_frame() {
        let frame = InputFrame::new(2)
            .gen_trq(&[4e4])
            .unwrap()
            .bl_pitch_com(&[0.1, 0.2, 0.3])
            .unwrap()
            .additional(&[7., 8.])
            .unwrap();
        assert_eq!(frame.get(FixedInput::BlPitchCom), &[0.1, 0.2, 0.3]);
        assert_eq!(
            frame.into_vec(),
            vec![4e4, 0., 0., 0., 0.1, 0.2, 0.3, 0., 7., 8.]
        );
    }

    #[test]
    fn input_frame_width() {
        let err = InputFrame::new(0).bl_pitch_com(&[0.1]).unwrap_err();
        assert_eq!(
            err,
            IOError::Width {
                input: "BlPitchCom",
                expected: 3,
                actual: 1
            }
        );
        assert!(InputFrame::new(1).additional(&[]).is_err());
    }

    #[test]
    fn output_channels() {
        let channels = OutputChannels::from(vec!["Time".to_owned(), "GenPwr".to_owned()]);
        assert_eq!(channels.index_of("GenPwr"), Some(1));
        assert_eq!(channels.select("GenPwr", &[0.5, 1.5e6]), Some(1.5e6));
        assert_eq!(channels.select("RotSpeed", &[0.5, 1.5e6]), None);
    }
}
