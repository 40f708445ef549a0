//! Fine-tuning console operations.
//!
//! Two surfaces mirror the console's two API generations:
//!
//! | Module | Routes |
//! |--------|--------|
//! | [`legacy`] | one route per operation under `/wenxinworkshop/finetune` |
//! | [`v2`] | a single `/v2/finetuning` route, operation picked by the `Action` query |
//!
//! The functions in those modules only build a [`ConsoleRequest`](crate::types::ConsoleRequest).
//! [`FineTune`] and [`FineTuneV2`] pair each builder with a
//! [`ConsoleTransport`](crate::transport::ConsoleTransport) and send the result.
//!
//! Passthrough `extra` keys are written into the body first, so a named
//! argument always wins over an `extra` key of the same name.

mod body;
mod client;
pub mod legacy;
pub mod v2;

pub use client::{FineTune, FineTuneV2};
pub use v2::{CreateJobOptions, CreateTaskOptions, JobListOptions, TaskListOptions};
