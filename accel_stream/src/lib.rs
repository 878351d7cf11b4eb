//! Fixed-rate LIS3DH sampling into a framed serial byte stream.
//!
//! A timer interrupt sets a [`ReadyFlag`]; the main loop drives a
//! [`SamplingScheduler`] that checks the status register, burst-reads the
//! three axes, converts them with the active [`ResolutionMode`] and hands a
//! fixed-length frame to a [`FrameSink`].

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod conversion;
pub mod frame;
pub mod ready_flag;
pub mod scheduler;
pub mod startup;

pub use config::SamplerConfig;
pub use conversion::{OutputRepresentation, ResolutionMode, ScaledSample};
pub use frame::{FrameEncoder, FRAME_FOOTER, FRAME_HEADER};
pub use ready_flag::{ReadyFlag, ReadyToken};
pub use scheduler::{CycleOutcome, Error, FrameSink, SamplingScheduler, SamplingStats, State};
pub use startup::StartupReport;
