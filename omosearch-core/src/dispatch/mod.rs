//! Parallel evaluation of a graph stream.
//!
//! The [`Dispatcher`] owns a dedicated rayon pool. Graphs are pulled from
//! the stream in rounds of `workers * batch_size` on the dispatching thread
//! and each round is evaluated across the pool, so memory stays bounded and
//! a stream that itself uses rayon (such as [`GraphEnumerator`]) runs its
//! parallel work on the same pool between rounds.
//!
//! Every graph is evaluated exactly once. The counterexample callback may
//! run on several workers at once; reporting through a [`crate::ReportSink`]
//! keeps each report whole. No order between counterexamples is promised.

use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread,
};

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tracing::{debug, info, instrument};

use crate::{
    constraints::ConstraintSpec,
    enumerate::GraphEnumerator,
    error::{DispatchError, ReportError},
    graph::Graph,
};

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Cooperative cancellation flag shared between a dispatcher and its
/// callers. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Graphs already being evaluated finish first.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Self::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Dispatcher settings.
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    workers: usize,
    batch_size: usize,
    cancel: CancelToken,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            batch_size: DEFAULT_BATCH_SIZE,
            cancel: CancelToken::default(),
        }
    }
}

impl DispatchConfig {
    /// Sets the worker thread count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the batch size hint.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the worker thread count.
    #[must_use]
    #[rustfmt::skip]
    pub fn workers(&self) -> usize { self.workers }

    /// Returns the batch size hint.
    #[must_use]
    #[rustfmt::skip]
    pub fn batch_size(&self) -> usize { self.batch_size }

    /// Returns the cancellation token.
    #[must_use]
    #[rustfmt::skip]
    pub fn cancel_token(&self) -> &CancelToken { &self.cancel }
}

/// Totals for one dispatch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Graphs handed to the predicate.
    pub evaluated: u64,
    /// Graphs for which the predicate returned `false`.
    pub counterexamples: u64,
    /// Whether the run stopped because of cancellation.
    pub cancelled: bool,
}

/// Fixed-size worker pool applying a predicate to a graph stream.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use omosearch_core::{ConstraintSpec, DispatchConfig, Dispatcher, GraphEnumerator, is_omo};
///
/// let dispatcher = Dispatcher::new(DispatchConfig::default().with_workers(2))?;
/// let graphs = GraphEnumerator::new(ConstraintSpec::all_graphs(4))?;
/// let found = Mutex::new(Vec::new());
/// let summary = dispatcher.dispatch(graphs, is_omo, |graph| {
///     found.lock().expect("collector").push(graph.to_graph6());
///     Ok(())
/// })?;
/// assert_eq!(summary.evaluated, 10);
/// assert_eq!(summary.counterexamples, found.into_inner()?.len() as u64);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    pool: ThreadPool,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Builds the worker pool.
    ///
    /// # Errors
    /// Returns [`DispatchError::ZeroWorkers`] or
    /// [`DispatchError::ZeroBatchSize`] for unusable settings and
    /// [`DispatchError::PoolBuild`] when the threads cannot be spawned.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        if config.workers == 0 {
            return Err(DispatchError::ZeroWorkers);
        }
        if config.batch_size == 0 {
            return Err(DispatchError::ZeroBatchSize);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|index| format!("omosearch-worker-{index}"))
            .build()
            .map_err(|err| DispatchError::PoolBuild {
                workers: config.workers,
                message: Arc::from(err.to_string()),
            })?;
        Ok(Self { pool, config })
    }

    /// Returns the configuration the pool was built with.
    #[must_use]
    #[rustfmt::skip]
    pub fn config(&self) -> &DispatchConfig { &self.config }

    /// Evaluates every graph of an infallible stream.
    ///
    /// # Errors
    /// Returns the first [`ReportError`] raised by `on_counterexample`,
    /// wrapped in [`DispatchError::Report`].
    pub fn dispatch<I, P, R>(
        &self,
        graphs: I,
        predicate: P,
        on_counterexample: R,
    ) -> Result<DispatchSummary, DispatchError>
    where
        I: IntoIterator<Item = Graph>,
        I::IntoIter: Send,
        P: Fn(&Graph) -> bool + Sync,
        R: Fn(&Graph) -> Result<(), ReportError> + Sync,
    {
        self.try_dispatch(
            graphs.into_iter().map(Ok::<_, std::convert::Infallible>),
            predicate,
            on_counterexample,
        )
    }

    /// Enumerates `spec` with [`GraphEnumerator`] and evaluates the result.
    ///
    /// # Errors
    /// Returns [`DispatchError::Constraint`] for an invalid specification
    /// and otherwise behaves like [`Self::dispatch`].
    pub fn dispatch_family<P, R>(
        &self,
        spec: ConstraintSpec,
        predicate: P,
        on_counterexample: R,
    ) -> Result<DispatchSummary, DispatchError>
    where
        P: Fn(&Graph) -> bool + Sync,
        R: Fn(&Graph) -> Result<(), ReportError> + Sync,
    {
        let graphs = GraphEnumerator::new(spec)?;
        self.dispatch(graphs, predicate, on_counterexample)
    }

    /// Evaluates every graph of a fallible stream.
    ///
    /// # Errors
    /// Returns the first stream error converted into [`DispatchError`], or
    /// the first [`ReportError`] raised by `on_counterexample`. Workers stop
    /// pulling new graphs once either occurs.
    #[instrument(
        name = "core.dispatch",
        err,
        skip_all,
        fields(workers = self.config.workers, batch_size = self.config.batch_size),
    )]
    pub fn try_dispatch<I, E, P, R>(
        &self,
        graphs: I,
        predicate: P,
        on_counterexample: R,
    ) -> Result<DispatchSummary, DispatchError>
    where
        I: IntoIterator<Item = Result<Graph, E>>,
        I::IntoIter: Send,
        E: Into<DispatchError> + Send,
        P: Fn(&Graph) -> bool + Sync,
        R: Fn(&Graph) -> Result<(), ReportError> + Sync,
    {
        let cancel = &self.config.cancel;
        let round = self.config.workers.saturating_mul(self.config.batch_size);
        let evaluated = AtomicU64::new(0);
        let counterexamples = AtomicU64::new(0);
        let mut stream = graphs.into_iter();

        let evaluate = |item: Result<Graph, E>| -> Result<(), DispatchError> {
            if cancel.is_cancelled() {
                return Ok(());
            }
            let graph = match item {
                Ok(graph) => graph,
                Err(err) => return Err(err.into()),
            };
            evaluated.fetch_add(1, Ordering::Relaxed);
            if !predicate(&graph) {
                counterexamples.fetch_add(1, Ordering::Relaxed);
                debug!(graph = %graph, "counterexample");
                on_counterexample(&graph)?;
            }
            Ok(())
        };

        self.pool.install(|| -> Result<(), DispatchError> {
            while !cancel.is_cancelled() {
                let pending: Vec<Result<Graph, E>> = stream.by_ref().take(round).collect();
                if pending.is_empty() {
                    break;
                }
                pending
                    .into_par_iter()
                    .with_min_len(self.config.batch_size)
                    .try_for_each(&evaluate)?;
            }
            Ok(())
        })?;

        let summary = DispatchSummary {
            evaluated: evaluated.into_inner(),
            counterexamples: counterexamples.into_inner(),
            cancelled: cancel.is_cancelled(),
        };
        info!(
            evaluated = summary.evaluated,
            counterexamples = summary.counterexamples,
            cancelled = summary.cancelled,
            "dispatch finished"
        );
        Ok(summary)
    }
}
