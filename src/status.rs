//! FAST error levels and per-call status
//!
//! Every engine call reports an error level and a message. The level decides
//! what the gateway does with the message: nothing, print it, warn, or abort.

use super::host::Host;
use super::GatewayError;
use serde::Serialize;
use std::fmt;

/// FAST error levels, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ErrLevel {
    None = 0,
    Info = 1,
    Warn = 2,
    Severe = 3,
    Fatal = 4,
}
impl ErrLevel {
    /// Converts an engine error code into an `ErrLevel`
    ///
    /// Codes above `Fatal` are treated as fatal, negative codes as no error.
    pub fn from_code(code: i32) -> Self {
        match code {
            i32::MIN..=0 => ErrLevel::None,
            1 => ErrLevel::Info,
            2 => ErrLevel::Warn,
            3 => ErrLevel::Severe,
            _ => ErrLevel::Fatal,
        }
    }
    /// Returns the engine error code
    pub fn code(self) -> i32 {
        self as i32
    }
}
impl Default for ErrLevel {
    fn default() -> Self {
        ErrLevel::None
    }
}
impl fmt::Display for ErrLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrLevel::None => "none",
            ErrLevel::Info => "info",
            ErrLevel::Warn => "warning",
            ErrLevel::Severe => "severe error",
            ErrLevel::Fatal => "fatal error",
        };
        f.write_str(name)
    }
}

/// Error level and message returned by an engine call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub level: ErrLevel,
    pub message: String,
}
impl Status {
    pub fn ok() -> Self {
        Self::default()
    }
    pub fn new<S: Into<String>>(level: ErrLevel, message: S) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self::new(ErrLevel::Info, message)
    }
    pub fn warn<S: Into<String>>(message: S) -> Self {
        Self::new(ErrLevel::Warn, message)
    }
    pub fn severe<S: Into<String>>(message: S) -> Self {
        Self::new(ErrLevel::Severe, message)
    }
    pub fn fatal<S: Into<String>>(message: S) -> Self {
        Self::new(ErrLevel::Fatal, message)
    }
    /// Checks if the status must stop the run for the given abort level
    ///
    /// Severe and fatal errors always abort; an engine may lower the abort
    /// level below `Severe` to make warnings fatal as well.
    pub fn aborts(&self, abort_level: ErrLevel) -> bool {
        self.level != ErrLevel::None && (self.level >= abort_level || self.level >= ErrLevel::Severe)
    }
}

/// Value returned by an engine call together with the call status
#[derive(Debug, Clone, PartialEq)]
pub struct Report<T> {
    pub value: T,
    pub status: Status,
}
impl<T> Report<T> {
    pub fn new(value: T, status: Status) -> Self {
        Self { value, status }
    }
    pub fn ok(value: T) -> Self {
        Self::new(value, Status::ok())
    }
}

/// Dispatches a status to the host
///
/// Returns an error if the status aborts the run; the message is handed over to the host
/// error channel as an owned `String`.
pub fn check_error<H: Host>(
    host: &mut H,
    status: &Status,
    abort_level: ErrLevel,
) -> Result<(), GatewayError> {
    if status.aborts(abort_level) {
        log::error!("FAST {}: {}", status.level, status.message);
        host.set_error_status(status.message.clone());
        return Err(GatewayError::Engine {
            level: status.level,
            message: status.message.clone(),
        });
    }
    match status.level {
        ErrLevel::None => (),
        ErrLevel::Info => {
            log::info!("FAST: {}", status.message);
            host.print(&status.message);
        }
        _ => {
            log::warn!("FAST {}: {}", status.level, status.message);
            host.warning(&status.message);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;

    #[test]
    fn error_codes() {
        assert_eq!(ErrLevel::from_code(0), ErrLevel::None);
        assert_eq!(ErrLevel::from_code(2), ErrLevel::Warn);
        assert_eq!(ErrLevel::from_code(4), ErrLevel::Fatal);
        assert_eq!(ErrLevel::from_code(17), ErrLevel::Fatal);
        assert_eq!(ErrLevel::from_code(-1), ErrLevel::None);
        assert_eq!(ErrLevel::Severe.code(), 3);
        assert!(ErrLevel::Warn < ErrLevel::Severe);
    }

    #[test]
    fn abort_threshold() {
        assert!(!Status::warn("w").aborts(ErrLevel::Fatal));
        assert!(Status::severe("s").aborts(ErrLevel::Fatal));
        assert!(Status::warn("w").aborts(ErrLevel::Warn));
        assert!(!Status::ok().aborts(ErrLevel::None));
    }

    #[test]
    fn info_goes_to_console() {
        let mut host = HeadlessHost::new();
        check_error(&mut host, &Status::info("hello"), ErrLevel::Fatal).unwrap();
        assert_eq!(host.console(), &["hello".to_owned()]);
        assert!(host.warnings().is_empty());
        assert!(host.error_status().is_none());
    }

    #[test]
    fn warning_does_not_abort() {
        let mut host = HeadlessHost::new();
        check_error(&mut host, &Status::warn("careful"), ErrLevel::Fatal).unwrap();
        assert_eq!(host.warnings(), &["careful".to_owned()]);
        assert!(host.error_status().is_none());
    }

    #[test]
    fn severe_aborts() {
        let mut host = HeadlessHost::new();
        let err = check_error(&mut host, &Status::severe("blade broke"), ErrLevel::Fatal)
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Engine {
                level: ErrLevel::Severe,
                ..
            }
        ));
        assert_eq!(host.error_status(), Some("blade broke"));
    }

    #[test]
    fn none_is_silent() {
        let mut host = HeadlessHost::new();
        check_error(&mut host, &Status::ok(), ErrLevel::Fatal).unwrap();
        assert!(host.console().is_empty());
        assert!(host.warnings().is_empty());
    }
}
