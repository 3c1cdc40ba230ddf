#![forbid(unsafe_code)]

//! ftk runtime: execution mode and the structured logging conventions
//! shared by every crate in the workspace.
//!
//! ## Module layout
//!
//! | Module | Contents                                   |
//! |--------|--------------------------------------------|
//! | `mode` | [`RuntimeMode`] enum (Strict / Hardened)   |
//!
//! The crate root carries [`TestLogEntry`] (one JSON line per test case or
//! pipeline step) and the tolerance assertions used by the transform tests,
//! which compare real or complex samples through [`TolerantSample`].

pub mod mode;

pub use mode::RuntimeMode;

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use num_complex::{Complex32, Complex64};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, saturating to zero on clock skew.
#[must_use]
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

// ═══════════════════════════════════════════════════════════════════
// Structured log entries
// ═══════════════════════════════════════════════════════════════════

/// Structured log entry for forensic comparison across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLogEntry {
    pub test_id: String,
    pub timestamp_ms: u64,
    pub level: TestLogLevel,
    pub module: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RuntimeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abs_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TestResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl TestResult {
    #[must_use]
    pub const fn from_pass(pass: bool) -> Self {
        if pass { Self::Pass } else { Self::Fail }
    }
}

impl TestLogEntry {
    #[must_use]
    pub fn new(
        test_id: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            timestamp_ms: now_unix_ms(),
            level: TestLogLevel::Info,
            module: module.into(),
            message: message.into(),
            seed: None,
            n: None,
            mode: None,
            max_abs_error: None,
            result: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: TestLogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: TestResult) -> Self {
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_len(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_max_abs_error(mut self, error: f64) -> Self {
        self.max_abs_error = Some(error);
        self
    }

    /// Serialize to JSON line for structured logging.
    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Write the entry to stderr as a single JSON line.
    pub fn emit(&self) {
        eprintln!("{}", self.to_json_line());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Tolerance helpers
// ═══════════════════════════════════════════════════════════════════

/// A sample that can be compared against an expected value: real values by
/// absolute difference, complex values by the modulus of their difference.
pub trait TolerantSample: Copy + Display {
    /// Distance to `expected`.
    fn distance(self, expected: Self) -> f64;

    /// Magnitude that scales the relative tolerance.
    fn magnitude(self) -> f64;
}

impl TolerantSample for f64 {
    fn distance(self, expected: Self) -> f64 {
        (self - expected).abs()
    }

    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl TolerantSample for f32 {
    fn distance(self, expected: Self) -> f64 {
        f64::from((self - expected).abs())
    }

    fn magnitude(self) -> f64 {
        f64::from(self.abs())
    }
}

impl TolerantSample for Complex64 {
    fn distance(self, expected: Self) -> f64 {
        (self - expected).norm()
    }

    fn magnitude(self) -> f64 {
        self.norm()
    }
}

impl TolerantSample for Complex32 {
    fn distance(self, expected: Self) -> f64 {
        f64::from((self - expected).norm())
    }

    fn magnitude(self) -> f64 {
        f64::from(self.norm())
    }
}

/// `distance(actual, expected) <= atol + rtol * |expected|`.
#[must_use]
pub fn within_tolerance<S: TolerantSample>(actual: S, expected: S, atol: f64, rtol: f64) -> bool {
    actual.distance(expected) <= atol + rtol * expected.magnitude()
}

/// Panics unless `actual` is within tolerance of `expected`.
pub fn assert_close<S: TolerantSample>(actual: S, expected: S, atol: f64, rtol: f64) {
    assert!(
        within_tolerance(actual, expected, atol, rtol),
        "assert_close failed: actual={actual} expected={expected} distance={} (atol={atol}, rtol={rtol})",
        actual.distance(expected)
    );
}

/// Element-wise [`assert_close`]; lengths must match.
pub fn assert_close_slice<S: TolerantSample>(actual: &[S], expected: &[S], atol: f64, rtol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "assert_close_slice: length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (idx, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            within_tolerance(a, e, atol, rtol),
            "assert_close_slice[{idx}]: actual={a} expected={e} distance={} (atol={atol}, rtol={rtol})",
            a.distance(e)
        );
    }
}

/// Largest element-wise distance; `f64::INFINITY` on length mismatch.
#[must_use]
pub fn max_abs_diff<S: TolerantSample>(actual: &[S], expected: &[S]) -> f64 {
    if actual.len() != expected.len() {
        return f64::INFINITY;
    }
    actual
        .iter()
        .zip(expected)
        .map(|(&a, &e)| a.distance(e))
        .fold(0.0, f64::max)
}
