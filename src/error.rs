// src/error.rs

use std::fmt;

/// Errors raised around the kernels: by name lookup, the benchmark harness,
/// result persistence and configuration. The kernels themselves never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// No routine is registered under this name.
    UnknownKernel(String),

    /// A benchmark was asked to run zero times.
    InvalidIterations,

    /// A command-line or config argument is missing or malformed.
    InvalidArgument(String),

    /// Two variants of the same problem returned different results.
    ResultMismatch(String),

    /// The routine has no optimized (or direct) variant to compare against.
    NoCounterpart(String),

    /// Reading or writing a results file failed.
    Io(String),

    /// A results file could not be encoded or decoded.
    Serialization(String),

    /// Configuration could not be loaded.
    Config(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKernel(name) => write!(f, "unknown kernel: {name}"),
            Self::InvalidIterations => write!(f, "iterations must be at least 1"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::ResultMismatch(msg) => write!(f, "results differ: {msg}"),
            Self::NoCounterpart(name) => write!(f, "kernel {name} has no variant to compare against"),
            Self::Io(msg) => write!(f, "i/o error: {msg}"),
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for KernelError {}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        KernelError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KernelError {
    fn from(err: serde_json::Error) -> Self {
        KernelError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for KernelError {
    fn from(err: config::ConfigError) -> Self {
        KernelError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
