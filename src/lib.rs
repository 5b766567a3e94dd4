// src/lib.rs

pub mod benchmark;
pub mod config;
pub mod error;
pub mod kernels;
pub mod registry;

pub use error::{KernelError, Result};
pub use kernels::Kernel;
pub use registry::{KernelId, KernelOutput};
