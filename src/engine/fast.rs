//!
//! # FAST library bindings
//!
//! The only place where the gateway talks to foreign code. Strings cross the
//! boundary as NUL padded fixed size buffers and every argument is passed by
//! reference, as the library expects. Everything leaving this module is owned
//! Rust data.

use super::{Engine, Sizes};
use crate::status::{ErrLevel, Report, Status};
use crate::{CHANNEL_LENGTH, INTERFACE_STRING_LENGTH, MAXIMUM_OUTPUTS, MAX_INIT_INPUTS};
use std::convert::TryFrom;
use std::os::raw::{c_char, c_int};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

type StepFn = unsafe extern "C" fn(*mut c_int, *mut c_int, *mut f64, *mut f64, *mut c_int, *mut c_char);

extern "C" {
    fn FAST_Sizes(
        t_max: *mut f64,
        init_input_ary: *mut f64,
        input_file_name: *mut c_char,
        abort_err_lev: *mut c_int,
        num_outs: *mut c_int,
        dt: *mut f64,
        err_stat: *mut c_int,
        err_msg: *mut c_char,
        channel_names: *mut c_char,
    );
    fn FAST_Restart(
        checkpoint_root_name: *mut c_char,
        abort_err_lev: *mut c_int,
        num_outs: *mut c_int,
        dt: *mut f64,
        err_stat: *mut c_int,
        err_msg: *mut c_char,
    );
    fn FAST_Start(
        num_inputs_c: *mut c_int,
        num_outputs_c: *mut c_int,
        input_ary: *mut f64,
        output_ary: *mut f64,
        err_stat: *mut c_int,
        err_msg: *mut c_char,
    );
    fn FAST_Update(
        num_inputs_c: *mut c_int,
        num_outputs_c: *mut c_int,
        input_ary: *mut f64,
        output_ary: *mut f64,
        err_stat: *mut c_int,
        err_msg: *mut c_char,
    );
    fn FAST_CreateCheckpoint(
        checkpoint_root_name: *mut c_char,
        err_stat: *mut c_int,
        err_msg: *mut c_char,
    );
    fn FAST_End();
}

/// Set while a `FastLibrary` handle is alive: the library keeps a single model per process
static CLAIMED: AtomicBool = AtomicBool::new(false);

#[derive(Error, Debug)]
pub enum FastLibraryError {
    #[error("the FAST library is already in use in this process")]
    Busy,
}

/// Copies `text` into a NUL padded buffer of the library string length
fn to_c_buffer(text: &str, what: &str) -> Result<Vec<u8>, Status> {
    if text.contains('\0') {
        return Err(Status::fatal(format!("{} contains a NUL character", what)));
    }
    if text.len() >= INTERFACE_STRING_LENGTH {
        return Err(Status::fatal(format!(
            "{} is longer than {} characters",
            what,
            INTERFACE_STRING_LENGTH - 1
        )));
    }
    let mut buffer = vec![0u8; INTERFACE_STRING_LENGTH];
    buffer[..text.len()].copy_from_slice(text.as_bytes());
    Ok(buffer)
}

/// Reads a NUL terminated string out of a library buffer
fn from_c_buffer(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).trim_end().to_owned()
}

/// Splits the packed, blank padded channel names
fn channel_names(buffer: &[u8], n: usize) -> Vec<String> {
    buffer
        .chunks(CHANNEL_LENGTH)
        .take(n)
        .map(|name| {
            String::from_utf8_lossy(name)
                .trim_end_matches(|c: char| c == ' ' || c == '\0')
                .to_owned()
        })
        .collect()
}

fn count(n: usize, what: &str) -> Result<c_int, Status> {
    c_int::try_from(n).map_err(|_| Status::fatal(format!("too many {}: {}", what, n)))
}

fn num_outputs(num_outs: c_int) -> Result<usize, Status> {
    usize::try_from(num_outs)
        .map_err(|_| Status::fatal(format!("FAST reported {} outputs", num_outs)))
}

/// FAST engine library handle
///
/// Only one handle may exist at a time in a process.
pub struct FastLibrary {
    inputs: Vec<f64>,
    err_msg: Vec<u8>,
}
impl FastLibrary {
    /// Claims the FAST library for this process
    pub fn open() -> Result<Self, FastLibraryError> {
        if CLAIMED.swap(true, Ordering::SeqCst) {
            return Err(FastLibraryError::Busy);
        }
        Ok(Self {
            inputs: Vec::new(),
            err_msg: vec![0u8; INTERFACE_STRING_LENGTH],
        })
    }
    fn err_msg_ptr(&mut self) -> *mut c_char {
        self.err_msg.iter_mut().for_each(|c| *c = 0);
        self.err_msg.as_mut_ptr() as *mut c_char
    }
    fn status(&self, err_stat: c_int) -> Status {
        Status::new(ErrLevel::from_code(err_stat), from_c_buffer(&self.err_msg))
    }
    fn step(&mut self, call: StepFn, inputs: &[f64], outputs: &mut [f64]) -> Status {
        let (mut n_u, mut n_y) = match (count(inputs.len(), "inputs"), count(outputs.len(), "outputs")) {
            (Ok(n_u), Ok(n_y)) => (n_u, n_y),
            (Err(status), _) | (_, Err(status)) => return status,
        };
        // the library takes the inputs by mutable reference but never writes them
        self.inputs.clear();
        self.inputs.extend_from_slice(inputs);
        let mut err_stat: c_int = 0;
        let err_msg = self.err_msg_ptr();
        unsafe {
            call(
                &mut n_u,
                &mut n_y,
                self.inputs.as_mut_ptr(),
                outputs.as_mut_ptr(),
                &mut err_stat,
                err_msg,
            );
        }
        self.status(err_stat)
    }
}
impl Drop for FastLibrary {
    fn drop(&mut self) {
        CLAIMED.store(false, Ordering::SeqCst);
    }
}

impl Engine for FastLibrary {
    fn sizes(&mut self, t_max: f64, init_inputs: &[f64], input_file: &str) -> Report<Sizes> {
        let mut input_file = match to_c_buffer(input_file, "input file name") {
            Ok(buffer) => buffer,
            Err(status) => return Report::new(Sizes::default(), status),
        };
        if init_inputs.len() > MAX_INIT_INPUTS {
            return Report::new(
                Sizes::default(),
                Status::fatal(format!("at most {} initial inputs", MAX_INIT_INPUTS)),
            );
        }
        let mut init_input_ary = vec![0f64; MAX_INIT_INPUTS];
        init_input_ary[..init_inputs.len()].copy_from_slice(init_inputs);
        let mut t_max = t_max;
        let mut abort_level = ErrLevel::Fatal.code() as c_int;
        let mut num_outs: c_int = 0;
        let mut dt = 0f64;
        let mut err_stat: c_int = 0;
        let mut names = vec![b' '; CHANNEL_LENGTH * MAXIMUM_OUTPUTS + 1];
        let err_msg = self.err_msg_ptr();
        unsafe {
            FAST_Sizes(
                &mut t_max,
                init_input_ary.as_mut_ptr(),
                input_file.as_mut_ptr() as *mut c_char,
                &mut abort_level,
                &mut num_outs,
                &mut dt,
                &mut err_stat,
                err_msg,
                names.as_mut_ptr() as *mut c_char,
            );
        }
        let status = self.status(err_stat);
        match num_outputs(num_outs) {
            Ok(n) => Report::new(
                Sizes {
                    abort_level: ErrLevel::from_code(abort_level),
                    num_outputs: n,
                    dt,
                    channel_names: channel_names(&names, n),
                },
                status,
            ),
            Err(invalid) if status.level < invalid.level => Report::new(Sizes::default(), invalid),
            Err(_) => Report::new(Sizes::default(), status),
        }
    }
    fn restart(&mut self, checkpoint_root: &str) -> Report<Sizes> {
        let mut root = match to_c_buffer(checkpoint_root, "checkpoint root name") {
            Ok(buffer) => buffer,
            Err(status) => return Report::new(Sizes::default(), status),
        };
        let mut abort_level = ErrLevel::Fatal.code() as c_int;
        let mut num_outs: c_int = 0;
        let mut dt = 0f64;
        let mut err_stat: c_int = 0;
        let err_msg = self.err_msg_ptr();
        unsafe {
            FAST_Restart(
                root.as_mut_ptr() as *mut c_char,
                &mut abort_level,
                &mut num_outs,
                &mut dt,
                &mut err_stat,
                err_msg,
            );
        }
        let status = self.status(err_stat);
        match num_outputs(num_outs) {
            Ok(n) => Report::new(
                Sizes {
                    abort_level: ErrLevel::from_code(abort_level),
                    num_outputs: n,
                    dt,
                    channel_names: Vec::new(),
                },
                status,
            ),
            Err(invalid) if status.level < invalid.level => Report::new(Sizes::default(), invalid),
            Err(_) => Report::new(Sizes::default(), status),
        }
    }
    fn start(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status {
        self.step(FAST_Start, inputs, outputs)
    }
    fn update(&mut self, inputs: &[f64], outputs: &mut [f64]) -> Status {
        self.step(FAST_Update, inputs, outputs)
    }
    fn create_checkpoint(&mut self, checkpoint_root: &str) -> Status {
        let mut root = match to_c_buffer(checkpoint_root, "checkpoint root name") {
            Ok(buffer) => buffer,
            Err(status) => return status,
        };
        let mut err_stat: c_int = 0;
        let err_msg = self.err_msg_ptr();
        unsafe {
            FAST_CreateCheckpoint(root.as_mut_ptr() as *mut c_char, &mut err_stat, err_msg);
        }
        self.status(err_stat)
    }
    fn end(&mut self) {
        log::debug!("FAST_End");
        unsafe { FAST_End() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_buffer() {
        let buffer = to_c_buffer("Test01.fst", "input file name").unwrap();
        assert_eq!(buffer.len(), INTERFACE_STRING_LENGTH);
        assert_eq!(&buffer[..10], b"Test01.fst");
        assert!(buffer[10..].iter().all(|&c| c == 0));
        assert_eq!(from_c_buffer(&buffer), "Test01.fst");
    }

    #[test]
    fn c_buffer_rejects_long_or_nul_text() {
        let long = "x".repeat(INTERFACE_STRING_LENGTH);
        assert_eq!(to_c_buffer(&long, "path").unwrap_err().level, ErrLevel::Fatal);
        assert!(to_c_buffer(&long[1..], "path").is_ok());
        assert!(to_c_buffer("a\0b", "path").is_err());
    }

    #[test]
    fn error_message_is_trimmed() {
        let mut buffer = b"FAST_Update:Fatal error   ".to_vec();
        buffer.extend_from_slice(&[0, b'x', b'y']);
        assert_eq!(from_c_buffer(&buffer), "FAST_Update:Fatal error");
        assert_eq!(from_c_buffer(b"no terminator"), "no terminator");
    }

    #[test]
    fn packed_channel_names() {
        let mut buffer = b"Time      RotSpeed  GenPwr    ".to_vec();
        buffer.push(0);
        assert_eq!(
            channel_names(&buffer, 3),
            vec!["Time".to_owned(), "RotSpeed".to_owned(), "GenPwr".to_owned()]
        );
        assert_eq!(channel_names(&buffer, 2).len(), 2);
        let blank = vec![b' '; CHANNEL_LENGTH];
        assert_eq!(channel_names(&blank, 1), vec![String::new()]);
    }

    #[test]
    fn negative_output_count() {
        assert_eq!(num_outputs(-3).unwrap_err().level, ErrLevel::Fatal);
        assert_eq!(num_outputs(12).unwrap(), 12);
    }
}
