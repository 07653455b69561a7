//! Plan execution.
//!
//! [`passes::execute_plan`] walks a [`crate::compile::plan::Plan`] and forwards each operation to
//! a [`passes::PlanBackend`]. [`cpu::CpuBackend`] is the native backend built on
//! [`crate::magick`].

pub mod cpu;
pub mod passes;
