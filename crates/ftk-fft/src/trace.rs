//! Per-call transform traces and the caller-owned engine that records them.
//!
//! The free functions in [`crate::transforms`] record nothing. A
//! [`Transformer`] wraps them, owns its options and a bounded
//! [`TraceLedger`], and appends one [`TransformTrace`] per successful call.
//! An explicit worker count gets one thread pool, built on the first fast
//! call and reused by every later one.

use std::collections::VecDeque;
use std::sync::Arc;

use ftk_runtime::RuntimeMode;
use rayon::ThreadPool;
use serde::Serialize;

use crate::backend::BackendKind;
use crate::sample::{Complex, FftFloat};
use crate::transforms::{FftError, FftOptions, build_pool, execute_validated, validate};
use crate::{Normalization, TransformKind};

/// Structured record of one completed transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformTrace {
    pub operation_id: String,
    pub kind: TransformKind,
    pub direction: &'static str,
    pub n: usize,
    pub backend: BackendKind,
    pub mode: RuntimeMode,
    pub normalization: Normalization,
    pub parallel: bool,
    pub timing_ns: u64,
}

impl TransformTrace {
    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Bounded FIFO of transform traces.
///
/// Capacity is at least one. When full, the oldest trace is evicted before
/// a new one is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLedger {
    capacity: usize,
    entries: VecDeque<TransformTrace>,
}

impl TraceLedger {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn record(&mut self, trace: TransformTrace) {
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(trace);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&TransformTrace> {
        self.entries.back()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformTrace> {
        self.entries.iter()
    }

    /// Remove and return every recorded trace, oldest first.
    pub fn drain(&mut self) -> Vec<TransformTrace> {
        self.entries.drain(..).collect()
    }

    /// All traces as newline-separated JSON.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .map(TransformTrace::to_json_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Transform engine bound to one set of options, tracing every call.
#[derive(Debug, Clone)]
pub struct Transformer {
    options: FftOptions,
    ledger: TraceLedger,
    next_operation: u64,
    pool: Option<Arc<ThreadPool>>,
}

impl Transformer {
    #[must_use]
    pub fn new(options: FftOptions, ledger_capacity: usize) -> Self {
        Self {
            options,
            ledger: TraceLedger::new(ledger_capacity),
            next_operation: 1,
            pool: None,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &FftOptions {
        &self.options
    }

    #[must_use]
    pub const fn ledger(&self) -> &TraceLedger {
        &self.ledger
    }

    /// Threads in the dedicated pool, once a fast call has built it.
    #[must_use]
    pub fn pool_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.current_num_threads())
    }

    pub fn take_traces(&mut self) -> Vec<TransformTrace> {
        self.ledger.drain()
    }

    pub fn dft<T: FftFloat>(&mut self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        self.run(TransformKind::Dft, input)
    }

    pub fn idft<T: FftFloat>(&mut self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        self.run(TransformKind::Idft, input)
    }

    pub fn fft<T: FftFloat>(&mut self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        self.run(TransformKind::Fft, input)
    }

    pub fn ifft<T: FftFloat>(&mut self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        self.run(TransformKind::Ifft, input)
    }

    fn run<T: FftFloat>(
        &mut self,
        kind: TransformKind,
        input: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, FftError> {
        validate(kind, input, &self.options)?;
        if kind.backend() == BackendKind::Radix2 && self.pool.is_none() {
            self.pool = build_pool(self.options.workers)?.map(Arc::new);
        }
        let run = execute_validated(kind, input, &self.options, self.pool.as_deref())?;
        let operation_id = format!("ftk-op-{:016x}", self.next_operation);
        self.next_operation += 1;
        self.ledger.record(TransformTrace {
            operation_id,
            kind,
            direction: if kind.is_inverse() {
                "inverse"
            } else {
                "forward"
            },
            n: input.len(),
            backend: run.backend,
            mode: self.options.mode,
            normalization: self.options.normalization,
            parallel: run.parallel,
            timing_ns: run.timing_ns,
        });
        Ok(run.output)
    }
}
