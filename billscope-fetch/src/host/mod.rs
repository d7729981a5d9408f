//! Host APIs for billscope cost sources.
//!
//! - [`process`] - Subprocess execution for the billing CLI

pub mod process;

pub use process::{ProcessOutput, ProcessRunner};
