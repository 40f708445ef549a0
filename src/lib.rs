//! # qianfan-finetune
//!
//! Typed request builders for the Qianfan fine-tuning console API, plus an
//! HTTP transport to send them.
//!
//! ## Overview
//!
//! Every console operation is a pure function that turns typed arguments into
//! a [`ConsoleRequest`]: method, route, query and JSON body. Sending is left
//! to a [`ConsoleTransport`], injected into the [`FineTune`] client. The crate
//! ships [`HttpTransport`] (over `reqwest`); tests and embedders can provide
//! their own.
//!
//! - **Legacy surface**: [`finetune::legacy`], one route per operation
//! - **V2 surface**: [`finetune::v2`], one route with an `Action` query
//! - **Local validation**: enum-or-string arguments and required configs are
//!   checked before anything is sent
//! - **Errors**: one [`Error`] type; console error codes classified in [`error_code`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qianfan_finetune::{FineTune, JobListOptions};
//! use qianfan_finetune::consts::TrainMode;
//!
//! #[tokio::main]
//! async fn main() -> qianfan_finetune::Result<()> {
//!     // QIANFAN_BEARER_TOKEN and friends are read from the environment.
//!     let finetune = FineTune::from_env()?;
//!
//!     let jobs = finetune
//!         .v2()
//!         .job_list(JobListOptions {
//!             train_mode: Some(TrainMode::Sft.into()),
//!             max_keys: Some(10),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{}", jobs.result());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`finetune`] | Request builders and the dispatching client |
//! | [`transport`] | Dispatch trait and the HTTP implementation |
//! | [`types`] | Request/response descriptors and argument types |
//! | [`consts`] | Routes, actions and wire enumerations |
//! | [`config`] | Environment-driven connection settings |
//! | [`error_code`] | Console error code classification |

pub mod config;
pub mod consts;
pub mod error_code;
pub mod finetune;
pub mod transport;
pub mod types;

pub use config::ConsoleConfig;
pub use finetune::{
    CreateJobOptions, CreateTaskOptions, FineTune, FineTuneV2, JobListOptions, TaskListOptions,
};
pub use transport::{ConsoleTransport, HttpTransport};
pub use types::{ConsoleRequest, ConsoleResponse, Extra, HttpMethod, JsonObject};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
