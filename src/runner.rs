//!
//! # Headless runner
//!
//! Plays the part of the simulation host: configures and starts a gateway,
//! steps it at its sample time up to the maximum simulation time and records
//! the outputs.

use crate::{host::HeadlessHost, io::InputFrame, sfunction::SFunction, GatewayError, Parameters};
use serde::{Deserialize, Serialize};
use serde_pickle as pkl;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("FAST gateway failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("file not found")]
    FileNotFound(#[from] std::io::Error),
    #[error("pickle reader/writer failed")]
    Pickle(#[from] pkl::Error),
    #[error("invalid sample time: {0}s")]
    SampleTime(f64),
    #[error("too many samples from 0 to {t_max}s every {dt}s")]
    SampleCount { t_max: f64, dt: f64 },
    #[error("no input samples")]
    EmptyInputs,
}

type ThisResult<T> = Result<T, RunnerError>;

/// Block input port samples
#[derive(Debug, Clone)]
pub enum Inputs {
    /// Same inputs at every step
    Constant(Vec<f64>),
    /// One row per step, the last row is held once the series is exhausted
    Series(Vec<Vec<f64>>),
}
impl Inputs {
    pub fn constant(frame: InputFrame) -> Self {
        Inputs::Constant(frame.into_vec())
    }
    pub fn series(series: Vec<Vec<f64>>) -> ThisResult<Self> {
        if series.is_empty() {
            Err(RunnerError::EmptyInputs)
        } else {
            Ok(Inputs::Series(series))
        }
    }
    /// Reads the input series from a pickle file
    pub fn from_pickle<P: AsRef<Path>>(path: P) -> ThisResult<Self> {
        let f = File::open(path)?;
        let r = BufReader::new(f);
        let v: pkl::Value = pkl::from_reader(r)?;
        Self::series(pkl::from_value(v)?)
    }
    /// Returns the inputs of step `k`
    ///
    /// An empty series has no inputs, which the gateway rejects as a width mismatch.
    pub fn at(&self, k: usize) -> &[f64] {
        match self {
            Inputs::Constant(u) => u,
            Inputs::Series(series) => series
                .get(k)
                .or_else(|| series.last())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }
}

/// Outputs of a run
#[derive(Debug, Serialize, Deserialize)]
pub struct Record {
    pub parameters: Parameters,
    pub channels: Vec<String>,
    /// Sample time [s]
    pub dt: f64,
    pub time: Vec<f64>,
    pub outputs: Vec<Vec<f64>>,
}
impl Record {
    /// Returns the time series of channel `name`
    pub fn channel(&self, name: &str) -> Option<Vec<f64>> {
        let i = self.channels.iter().position(|x| x == name)?;
        self.outputs.iter().map(|y| y.get(i).copied()).collect()
    }
    pub fn to_pickle<P: AsRef<Path>>(&self, path: P) -> ThisResult<()> {
        let mut f = BufWriter::new(File::create(path)?);
        pkl::to_writer(&mut f, self, true)?;
        Ok(())
    }
}

/// Number of samples from 0 to `t_max`, both included
///
/// Returns `None` if the count does not fit a `usize`.
pub fn n_samples(t_max: f64, dt: f64) -> Option<usize> {
    let n = (t_max / dt + 1e-9).floor().max(0f64);
    if n.is_finite() && n < usize::MAX as f64 {
        (n as usize).checked_add(1)
    } else {
        None
    }
}

pub struct Runner<S: SFunction> {
    sfunc: S,
    host: HeadlessHost,
    checkpoint: Option<(String, u64)>,
}
impl<S: SFunction> Runner<S> {
    pub fn new(sfunc: S) -> Self {
        Self {
            sfunc,
            host: HeadlessHost::new(),
            checkpoint: None,
        }
    }
    /// Writes a checkpoint `<root>.<step>` every `n_step` steps
    pub fn checkpoint_every<T: Into<String>>(self, root: T, n_step: u64) -> Self {
        Self {
            checkpoint: if n_step > 0 {
                Some((root.into(), n_step))
            } else {
                None
            },
            ..self
        }
    }
    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }
    pub fn sfunc(&self) -> &S {
        &self.sfunc
    }
    /// Runs the gateway from 0 to `parameters.t_max`
    ///
    /// The gateway is terminated whether the run succeeds or not.
    pub fn run(&mut self, parameters: &Parameters, inputs: &Inputs) -> ThisResult<Record> {
        let record = self.simulate(parameters, inputs);
        self.sfunc.terminate();
        record
    }
    fn simulate(&mut self, parameters: &Parameters, inputs: &Inputs) -> ThisResult<Record> {
        let sizes = self.sfunc.configure(&mut self.host, parameters)?;
        let dt = sizes.sample_time;
        if !(dt.is_finite() && dt > 0f64) {
            return Err(RunnerError::SampleTime(dt));
        }
        let n = n_samples(parameters.t_max, dt).ok_or(RunnerError::SampleCount {
            t_max: parameters.t_max,
            dt,
        })?;
        log::info!("running {} samples of {}s", n, dt);
        self.sfunc.start(&mut self.host)?;
        let mut record = Record {
            parameters: parameters.clone(),
            channels: self.sfunc.channels().names().to_vec(),
            dt,
            time: Vec::new(),
            outputs: Vec::new(),
        };
        for k in 0..n {
            record.time.push(k as f64 * dt);
            record.outputs.push(self.sfunc.outputs()?.to_vec());
            self.sfunc.step(&mut self.host, inputs.at(k))?;
            if let Some((root, n_step)) = &self.checkpoint {
                let step = self.sfunc.steps();
                if step % n_step == 0 {
                    self.sfunc
                        .checkpoint(&mut self.host, &format!("{}.{}", root, step))?;
                }
            }
        }
        Ok(record)
    }
}
