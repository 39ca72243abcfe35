//! Scripted engines for the gateway tests

use crate::engine::{Engine, LegacyEngine, Sizes};
use crate::status::{ErrLevel, Report, Status};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Output 0 is the number of updates, output `i` echoes input `i-1`
fn fill(outputs: &mut [f64], inputs: &[f64], updates: usize) {
    for (i, y) in outputs.iter_mut().enumerate() {
        *y = if i == 0 {
            updates as f64
        } else {
            inputs.get(i - 1).copied().unwrap_or(0f64)
        };
    }
}

#[derive(Debug)]
pub struct MockEngine {
    pub sizes: Sizes,
    pub sizes_status: Status,
    pub start_status: Status,
    pub update_statuses: VecDeque<Status>,
    pub checkpoint_status: Status,
    pub calls: Vec<&'static str>,
    pub updates: usize,
    pub last_inputs: Vec<f64>,
    pub checkpoints: Vec<String>,
    /// Shared so that tests can see `end` calls made while dropping a gateway
    pub ends: Rc<Cell<usize>>,
}
impl MockEngine {
    pub fn new(num_outputs: usize, dt: f64) -> Self {
        Self {
            sizes: Sizes {
                abort_level: ErrLevel::Fatal,
                num_outputs,
                dt,
                channel_names: (0..num_outputs).map(|i| format!("Chan{}", i)).collect(),
            },
            sizes_status: Status::ok(),
            start_status: Status::ok(),
            update_statuses: VecDeque::new(),
            checkpoint_status: Status::ok(),
            calls: Vec::new(),
            updates: 0,
            last_inputs: Vec::new(),
            checkpoints: Vec::new(),
            ends: Rc::new(Cell::new(0)),
        }
    }
    /// Status returned by the next update calls, in order
    pub fn then_update(mut self, status: Status) -> Self {
        self.update_statuses.push_back(status);
        self
    }
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|x| **x == call).count()
    }
}
impl Engine for MockEngine {
    fn sizes(&mut self, _t_max: f64, _init_inputs: &[f64], _input_file: &str) -> Report<Sizes> {
        self.calls.push("sizes");
        Report::new(self.sizes.clone(), self.sizes_status.clone())
    }
    fn restart(&mut self, _checkpoint_root: &str) -> Report<Sizes> {
        self.calls.push("restart");
        Report::new(
            Sizes {
                channel_names: Vec::new(),
                ..self.sizes.clone()
            },
            Status::ok(),
        )
    }
    fn start(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status {
        self.calls.push("start");
        fill(outputs, inputs, 0);
        self.start_status.clone()
    }
    fn update(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status {
        self.calls.push("update");
        self.updates += 1;
        self.last_inputs = inputs.to_vec();
        fill(outputs, inputs, self.updates);
        self.update_statuses.pop_front().unwrap_or_default()
    }
    fn create_checkpoint(&mut self, checkpoint_root: &str) -> Status {
        self.calls.push("create_checkpoint");
        self.checkpoints.push(checkpoint_root.to_owned());
        self.checkpoint_status.clone()
    }
    fn end(&mut self) {
        self.calls.push("end");
        self.ends.set(self.ends.get() + 1);
    }
}

#[derive(Debug)]
pub struct MockLegacyEngine {
    pub abort_level: ErrLevel,
    pub start_status: Status,
    pub update_statuses: VecDeque<Status>,
    pub input_file: Option<String>,
    pub calls: Vec<&'static str>,
    pub updates: usize,
    pub ends: Rc<Cell<usize>>,
}
impl MockLegacyEngine {
    pub fn new() -> Self {
        Self {
            abort_level: ErrLevel::Fatal,
            start_status: Status::ok(),
            update_statuses: VecDeque::new(),
            input_file: None,
            calls: Vec::new(),
            updates: 0,
            ends: Rc::new(Cell::new(0)),
        }
    }
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|x| **x == call).count()
    }
}
impl LegacyEngine for MockLegacyEngine {
    fn start(&mut self, input_file: &str, _abort_level: ErrLevel) -> Report<ErrLevel> {
        self.calls.push("start");
        self.input_file = Some(input_file.to_owned());
        Report::new(self.abort_level, self.start_status.clone())
    }
    fn update(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status {
        self.calls.push("update");
        self.updates += 1;
        fill(outputs, inputs, self.updates);
        self.update_statuses.pop_front().unwrap_or_default()
    }
    fn end(&mut self) {
        self.calls.push("end");
        self.ends.set(self.ends.get() + 1);
    }
}
