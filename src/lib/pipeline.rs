//! Unordered parallel compute with ordered, serialized emit.
//!
//! ```text
//! ┌──────────────┐   bounded   ┌──────────────┐   bounded   ┌──────────────────┐
//! │ Reader       │────────────>│ Workers (N)  │────────────>│ Emitter          │
//! │ (assigns     │  (index,    │ (any order)  │  (index,    │ (ReorderBuffer,  │
//! │  indices)    │   input)    │              │   output)   │  calling thread) │
//! └──────────────┘             └──────────────┘             └──────────────────┘
//! ```
//!
//! The reader numbers inputs in arrival order. Workers process them in whatever order they
//! are scheduled. The emitter, which runs on the calling thread and alone owns the
//! [`ReorderBuffer`], hands outputs to the caller strictly in index order as soon as each
//! next index is available.
//!
//! Failures travel down the pipeline like results: a read error or a failed `work` call
//! is forwarded under the index of its record and restored to input order with
//! everything else. The emitter therefore meets the failure of the earliest bad record
//! first, emits exactly the records before it, stores the error in the shared
//! [`RunContext`] and cancels the run: the reader stops reading and workers stop taking
//! inputs. The reported error and the emitted prefix do not depend on thread timing.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::bounded;
use log::debug;

use crate::errors::{AlnError, Result};
use crate::reorder_buffer::ReorderBuffer;

/// Number of in-flight items per worker on each channel.
const ITEMS_PER_WORKER: usize = 4;

/// Run-scoped state shared by every stage: a cancellation flag and the first error.
#[derive(Debug, Default)]
pub struct RunContext {
    cancelled: AtomicBool,
    first_error: OnceLock<AlnError>,
}

impl RunContext {
    /// Creates a context for a new run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any stage has failed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Records an error and cancels the run. Only the first error is kept.
    pub fn fail(&self, error: AlnError) {
        if let Err(later) = self.first_error.set(error) {
            debug!("Discarding error after cancellation: {later}");
        }
        self.cancelled.store(true, Ordering::Release);
    }

    /// Takes the recorded error, if any.
    pub fn take_error(&mut self) -> Option<AlnError> {
        self.first_error.take()
    }
}

/// Counters for a completed pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Number of outputs emitted.
    pub emitted: u64,
    /// Largest number of outputs held back waiting for an earlier index.
    pub max_buffered: usize,
}

/// Runs `work` over `inputs` on `threads` workers and passes the outputs to `emit` in
/// input order.
///
/// `inputs` is consumed on a dedicated reader thread, which assigns indices from 0.
/// `emit` runs on the calling thread.
///
/// # Errors
///
/// Returns the error of the earliest failing record in input order, whether it came from
/// the input iterator, from `work` or from `emit`. Outputs of every record before it have
/// been emitted; nothing after it is.
pub fn run_ordered<I, In, Out, W, E>(
    inputs: I,
    threads: usize,
    work: W,
    mut emit: E,
) -> Result<PipelineStats>
where
    I: Iterator<Item = Result<In>> + Send,
    In: Send,
    Out: Send,
    W: Fn(u64, In) -> Result<Out> + Sync,
    E: FnMut(Out) -> Result<()>,
{
    let threads = threads.max(1);
    let capacity = threads * ITEMS_PER_WORKER;
    let mut ctx = RunContext::new();
    let mut stats = PipelineStats::default();

    let (input_tx, input_rx) = bounded::<(u64, Result<In>)>(capacity);
    let (output_tx, output_rx) = bounded::<(u64, Result<Out>)>(capacity);

    thread::scope(|scope| {
        let ctx = &ctx;
        let work = &work;

        scope.spawn(move || {
            for (index, input) in (0u64..).zip(inputs) {
                if ctx.is_cancelled() {
                    break;
                }
                // Nothing after a read error can be numbered reliably
                let last = input.is_err();
                if input_tx.send((index, input)).is_err() || last {
                    break;
                }
            }
        });

        for _ in 0..threads {
            let input_rx = input_rx.clone();
            let output_tx = output_tx.clone();
            scope.spawn(move || {
                for (index, input) in input_rx {
                    if ctx.is_cancelled() {
                        break;
                    }
                    let output = input.and_then(|input| work(index, input));
                    if output_tx.send((index, output)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(input_rx);
        drop(output_tx);

        let mut buffer = ReorderBuffer::new();
        'emit: for (index, output) in output_rx {
            buffer.insert(index, output);
            for ready in buffer.drain_ready() {
                if let Err(e) = ready.and_then(&mut emit) {
                    ctx.fail(e);
                    break 'emit;
                }
                stats.emitted += 1;
            }
        }
        stats.max_buffered = buffer.high_water();
    });

    if let Some(error) = ctx.take_error() {
        return Err(error);
    }
    debug!("Pipeline emitted {} items (max {} held back)", stats.emitted, stats.max_buffered);
    Ok(stats)
}
