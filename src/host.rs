//!
//! # Simulation host
//!
//! The block-diagram host the gateway reports to: a shared workspace for
//! published variables, an error channel that stops the simulation, a warning
//! channel and a console.

use serde::Serialize;
use std::collections::BTreeMap;

/// Workspace variable holding the engine sample time
pub const DT: &str = "DT";
/// Workspace variable holding the output channel names
pub const OUT_LIST: &str = "OutList";

/// Host workspace values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Variable {
    Scalar(f64),
    /// A column of strings, one per row
    CellColumn(Vec<String>),
}

pub trait Host {
    /// Writes `value` into the shared workspace under `name`
    fn put_variable(&mut self, name: &str, value: Variable) -> Result<(), String>;
    /// Stops the simulation with `message`
    ///
    /// The host takes ownership of the message and may keep it after the call returns.
    fn set_error_status(&mut self, message: String);
    fn warning(&mut self, message: &str);
    fn print(&mut self, message: &str);
}

/// Host without a graphical front end
///
/// Keeps the workspace in memory and records every message it is handed.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    workspace: BTreeMap<String, Variable>,
    error_status: Option<String>,
    warnings: Vec<String>,
    console: Vec<String>,
    read_only: bool,
}
impl HeadlessHost {
    pub fn new() -> Self {
        Default::default()
    }
    /// Rejects every workspace write
    pub fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.workspace.get(name)
    }
    /// Returns the published sample time
    pub fn dt(&self) -> Option<f64> {
        match self.variable(DT) {
            Some(Variable::Scalar(dt)) => Some(*dt),
            _ => None,
        }
    }
    /// Returns the published output channel names
    pub fn out_list(&self) -> Option<&[String]> {
        match self.variable(OUT_LIST) {
            Some(Variable::CellColumn(names)) => Some(names.as_slice()),
            _ => None,
        }
    }
    pub fn error_status(&self) -> Option<&str> {
        self.error_status.as_deref()
    }
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
    pub fn console(&self) -> &[String] {
        &self.console
    }
}
impl Host for HeadlessHost {
    fn put_variable(&mut self, name: &str, value: Variable) -> Result<(), String> {
        if self.read_only {
            return Err("workspace is read-only".to_owned());
        }
        log::debug!("workspace {} = {:?}", name, value);
        self.workspace.insert(name.to_owned(), value);
        Ok(())
    }
    fn set_error_status(&mut self, message: String) {
        self.error_status = Some(message);
    }
    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_owned());
    }
    fn print(&mut self, message: &str) {
        println!("{}", message);
        self.console.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace() {
        let mut host = HeadlessHost::new();
        host.put_variable(DT, Variable::Scalar(0.05)).unwrap();
        host.put_variable(OUT_LIST, Variable::CellColumn(vec!["Time".into()]))
            .unwrap();
        assert_eq!(host.dt(), Some(0.05));
        assert_eq!(host.out_list(), Some(&["Time".to_owned()][..]));
    }

    #[test]
    fn read_only_workspace() {
        let mut host = HeadlessHost::new().read_only();
        assert!(host.put_variable(DT, Variable::Scalar(0.05)).is_err());
        assert!(host.dt().is_none());
    }
}
