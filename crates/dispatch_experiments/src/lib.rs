//! Parameter sweeps over the partner dispatch pipeline.
//!
//! Each point of a [`ParameterSpace`] configures a latency-free
//! [`dispatch_core::MatchingService`] and matches a batch of riders through
//! it. The per-rider outcomes are summarized into an [`ExperimentResult`]:
//! how often someone accepted, how many pipeline passes it took, which rank
//! accepted and how far the pickup was.
//!
//! # Quick Start
//!
//! ```no_run
//! use dispatch_experiments::{run_parallel_experiments, ParameterSpace};
//!
//! let parameter_sets = ParameterSpace::grid()
//!     .accept_probability(vec![0.25, 0.5, 0.75])
//!     .max_attempts(vec![1, 5, 10])
//!     .generate();
//!
//! let results = run_parallel_experiments(parameter_sets, None).unwrap();
//! ```
//!
//! - [`parameters`]: the grid builder
//! - [`runner`]: parallel execution using rayon
//! - [`metrics`]: per-set aggregation
//! - [`export`]: CSV and JSON output

pub mod export;
pub mod metrics;
pub mod parameters;
pub mod runner;

pub use export::{export_to_csv, export_to_json};
pub use metrics::{ExperimentResult, TrialOutcome};
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_single_experiment};
