//! JSON problem and result formats.
//!
//! ## Purpose
//!
//! This module defines the file formats understood by the `lazyfit` runner and
//! the glue that solves a decoded problem:
//!
//! * [`CovarianceProblem`]: `{"dim": 2, "data": [..]}`, solved to the rows of
//!   the covariance matrix.
//! * [`CircleProblem`]: `{"settings": {"iterations": 30, "step-size": 0.25},
//!   "init-params": {"cx": .., "cy": .., "r": ..}, "points": [[x, y], ..]}`,
//!   solved to the fitted `{"cx", "cy", "r"}`.
//!
//! Either problem may be wrapped as `{"data": <problem>}` ([`ProblemFile`]).
//! [`run`] solves a problem twice, once as a warm-up and once timed, and
//! returns a [`RunReport`] serialized as
//! `{"time-seconds": .., "output": .., "dry-output": ..}`.
//!
//! ## Non-goals
//!
//! * This module does not read or write files (handled by the runner binary).

// External dependencies
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

// Internal dependencies
use crate::api::{materialize_covariance, CircleFitBuilder, CircleParams, FitError};
use crate::engine::optimizer::{DEFAULT_ITERATIONS, DEFAULT_STEP_SIZE};

// ============================================================================
// Problem Trait
// ============================================================================

/// A decoded problem that can be solved into a serializable output.
pub trait Problem: DeserializeOwned {
    /// Serializable solution.
    type Output: Serialize;

    /// Short name used in log messages.
    const NAME: &'static str;

    /// Solve the problem.
    fn solve(&self) -> Result<Self::Output, FitError>;
}

/// A problem as stored on disk: bare, or wrapped in `{"data": ..}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProblemFile<P> {
    /// The problem object itself.
    Bare(P),
    /// The problem under a `data` key.
    Wrapped {
        /// Wrapped problem.
        data: P,
    },
}

impl<P> ProblemFile<P> {
    /// Unwrap the problem.
    pub fn into_problem(self) -> P {
        match self {
            Self::Bare(p) | Self::Wrapped { data: p } => p,
        }
    }
}

// ============================================================================
// Covariance
// ============================================================================

/// Sample covariance of `data`, `dim` features per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CovarianceProblem {
    /// Features per sample.
    pub dim: usize,
    /// Sample-major feature values.
    pub data: Vec<f64>,
}

impl Problem for CovarianceProblem {
    type Output = Vec<Vec<f64>>;
    const NAME: &'static str = "covariance";

    fn solve(&self) -> Result<Self::Output, FitError> {
        Ok(materialize_covariance(self.dim, &self.data)?.to_rows())
    }
}

// ============================================================================
// Circle Fit
// ============================================================================

/// Optimizer settings of a circle problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleSettings {
    /// Number of gradient-descent iterations.
    pub iterations: usize,
    /// Gradient-descent step size.
    #[serde(rename = "step-size")]
    pub step_size: f64,
}

impl Default for CircleSettings {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

/// Circle fit of `points` starting from `init_params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircleProblem {
    /// Optimizer settings; defaults apply when the key is absent.
    #[serde(default)]
    pub settings: CircleSettings,
    /// Initial guess.
    #[serde(rename = "init-params")]
    pub init_params: CircleParams<f64>,
    /// Points to fit.
    pub points: Vec<[f64; 2]>,
}

impl CircleProblem {
    /// Points as a flat `(x, y)` buffer.
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flatten().copied().collect()
    }
}

impl Problem for CircleProblem {
    type Output = CircleParams<f64>;
    const NAME: &'static str = "circle";

    fn solve(&self) -> Result<Self::Output, FitError> {
        let fitter = CircleFitBuilder::new()
            .step_size(self.settings.step_size)
            .iterations(self.settings.iterations)
            .build()?;
        Ok(fitter.fit(&self.flat_points(), self.init_params)?.params)
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Timed result of a problem run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport<O> {
    /// Wall-clock time of the timed run.
    #[serde(rename = "time-seconds")]
    pub time_seconds: f64,
    /// Output of the timed run.
    pub output: O,
    /// Output of the warm-up run.
    #[serde(rename = "dry-output")]
    pub dry_output: O,
}

/// Solve `problem` once as a warm-up, then once timed.
pub fn run<P: Problem>(problem: &P) -> Result<RunReport<P::Output>, FitError> {
    debug!("{}: dry run", P::NAME);
    let dry_output = problem.solve()?;

    debug!("{}: timed run", P::NAME);
    let start = Instant::now();
    let output = problem.solve()?;
    let time_seconds = start.elapsed().as_secs_f64();

    debug!("{}: solved in {:.6} s", P::NAME, time_seconds);

    Ok(RunReport {
        time_seconds,
        output,
        dry_output,
    })
}
