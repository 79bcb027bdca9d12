pub mod runner;

pub use runner::{ProbeOutput, ProbeRunner};
