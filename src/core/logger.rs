//! Logger: emit API, pending queue and the drain worker

use super::{
    config::{clamp_tick_interval_ms, LoggerConfig},
    error::{LoggerError, Result},
    log_entry::{CallSite, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    registry::{Registry, SinkId},
    sink::{Sink, SinkFilter},
};
use chrono::Utc;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Callback invoked on the worker thread when a sink write fails
///
/// Receives the sink name and the error (panics are reported as
/// [`LoggerError::SinkPanicked`]). Runs while the sink registry is locked, so
/// it must not add, remove or configure sinks on the same logger.
pub type SinkFailureCallback = Arc<dyn Fn(&str, &LoggerError) + Send + Sync>;

/// Callback invoked on the worker thread after an expired sink was removed
pub type SinkExpiredCallback = Arc<dyn Fn(SinkId, &str) + Send + Sync>;

/// Messages from the logger handle to its worker
enum Control {
    /// Restart the current wait with the latest tick interval
    Reschedule,
    Shutdown { drain: bool },
}

/// State shared between the logger handle and its worker thread
struct Shared {
    registry: Mutex<Registry>,
    metrics: LoggerMetrics,
    tick_interval_ms: AtomicU64,
    on_sink_failure: Option<SinkFailureCallback>,
    on_sink_expired: Option<SinkExpiredCallback>,
}

impl Shared {
    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.load(Ordering::Relaxed))
    }

    /// One drain tick: take at most one pending entry and route it.
    ///
    /// Returns whether an entry was dequeued.
    fn tick(&self, receiver: &Receiver<LogEntry>) -> bool {
        match receiver.try_recv() {
            Ok(entry) => {
                self.metrics.record_dispatched();
                self.dispatch(&entry);
                true
            }
            Err(_) => false,
        }
    }

    /// Deliver one entry to every live sink that accepts it, then prune the
    /// sinks found expired during the pass.
    fn dispatch(&self, entry: &LogEntry) {
        let now = Utc::now();
        let mut registry = self.registry.lock();
        let mut expired = Vec::new();

        for registered in registry.iter_mut() {
            let filter = registered.sink.filter();
            if filter.is_expired_at(now) {
                expired.push(registered.id);
                continue;
            }
            if !filter.accepts(entry.level()) {
                continue;
            }

            match write_isolated(registered.sink.as_mut(), entry) {
                Ok(()) => {
                    self.metrics.record_delivery();
                }
                Err(e) => self.report_sink_failure(registered.sink.name(), &e),
            }
        }

        if expired.is_empty() {
            return;
        }

        let removed = registry.remove_all(&expired);
        drop(registry);

        for mut registered in removed {
            self.metrics.record_sink_expired();
            if let Err(e) = flush_isolated(registered.sink.as_mut()) {
                eprintln!(
                    "[LOGGER ERROR] Expired sink '{}' failed to flush: {}",
                    registered.sink.name(),
                    e
                );
            }
            if let Some(ref callback) = self.on_sink_expired {
                callback(registered.id, registered.sink.name());
            }
        }
    }

    fn report_sink_failure(&self, sink_name: &str, error: &LoggerError) {
        let previous = self.metrics.record_sink_failure();

        // Alert on first failure and periodically thereafter
        if previous == 0 || (previous + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER ERROR] Sink '{}' failed ({} failures so far): {}. \
                 Other sinks continue to receive entries.",
                sink_name,
                previous + 1,
                error
            );
        }

        if let Some(ref callback) = self.on_sink_failure {
            callback(sink_name, error);
        }
    }

    /// Flush every sink, returning the first error after trying them all
    fn flush_all(&self) -> Result<()> {
        let mut registry = self.registry.lock();
        let mut first_error = None;

        for registered in registry.iter_mut() {
            if let Err(e) = flush_isolated(registered.sink.as_mut()) {
                eprintln!(
                    "[LOGGER ERROR] Sink '{}' flush failed: {}",
                    registered.sink.name(),
                    e
                );
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Call `Sink::write`, turning a panic into an error
fn write_isolated(sink: &mut dyn Sink, entry: &LogEntry) -> Result<()> {
    match catch_unwind(AssertUnwindSafe(|| sink.write(entry))) {
        Ok(result) => result,
        Err(payload) => Err(LoggerError::sink_panicked(
            sink.name(),
            panic_message(payload.as_ref()),
        )),
    }
}

/// Call `Sink::flush`, turning a panic into an error
fn flush_isolated(sink: &mut dyn Sink) -> Result<()> {
    match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
        Ok(result) => result,
        Err(payload) => Err(LoggerError::sink_panicked(
            sink.name(),
            panic_message(payload.as_ref()),
        )),
    }
}

fn run_worker(shared: Arc<Shared>, receiver: Receiver<LogEntry>, control: Receiver<Control>) {
    loop {
        match control.recv_timeout(shared.tick_interval()) {
            Err(RecvTimeoutError::Timeout) => {
                shared.tick(&receiver);
            }
            Ok(Control::Reschedule) => {}
            Ok(Control::Shutdown { drain }) => {
                if drain {
                    while shared.tick(&receiver) {}
                }
                break;
            }
            Err(RecvTimeoutError::Disconnected) => {
                while shared.tick(&receiver) {}
                break;
            }
        }
    }

    // Errors were already reported per sink
    let _ = shared.flush_all();
}

/// Asynchronous dispatcher.
///
/// Emitting only enqueues an entry; a worker thread owned by the logger
/// drains the queue one entry per tick and hands it to every registered sink
/// whose [`SinkFilter`] accepts it. Sinks whose expiration has passed are
/// removed during the tick that notices it.
///
/// # Example
///
/// ```
/// use sink_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .tick_interval(Duration::from_millis(5))
///     .sink(ConsoleSink::new(SinkFilter::new(LogLevel::Warning)))
///     .build();
///
/// logger.warning("disk almost full");
/// ```
pub struct Logger {
    shared: Arc<Shared>,
    sender: Option<Sender<LogEntry>>,
    /// Receiver clone used only to evict under `OverflowPolicy::DropOldest`
    evictor: Option<Receiver<LogEntry>>,
    control: Option<Sender<Control>>,
    worker: Option<thread::JoinHandle<()>>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    drain_on_shutdown: bool,
}

impl Logger {
    /// Start a logger with an initial set of sinks and a tick interval.
    ///
    /// `None` items are skipped. Intervals under one millisecond are raised
    /// to one millisecond.
    #[must_use]
    pub fn new<I>(sinks: I, tick_interval: Duration) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Sink>>>,
    {
        let logger = Self::builder().tick_interval(tick_interval).build();
        logger.set_sinks(sinks);
        logger
    }

    /// Start a logger with no sinks from a [`LoggerConfig`]
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    fn start(
        config: LoggerConfig,
        registry: Registry,
        on_overflow: Option<OverflowCallback>,
        on_sink_failure: Option<SinkFailureCallback>,
        on_sink_expired: Option<SinkExpiredCallback>,
    ) -> Self {
        let config = config.normalized();
        let (sender, receiver) = match config.max_pending {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };
        let (control_sender, control_receiver) = unbounded();

        let shared = Arc::new(Shared {
            registry: Mutex::new(registry),
            metrics: LoggerMetrics::new(),
            tick_interval_ms: AtomicU64::new(config.tick_interval_ms),
            on_sink_failure,
            on_sink_expired,
        });

        let evictor = match (config.max_pending, config.overflow_policy) {
            (Some(_), OverflowPolicy::DropOldest) => Some(receiver.clone()),
            _ => None,
        };

        let worker_shared = Arc::clone(&shared);
        let handle = thread::spawn(move || run_worker(worker_shared, receiver, control_receiver));

        Self {
            shared,
            sender: Some(sender),
            evictor,
            control: Some(control_sender),
            worker: Some(handle),
            overflow_policy: config.overflow_policy,
            on_overflow,
            drain_on_shutdown: config.drain_on_shutdown,
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ------------------------------------------------------------------
    // Emit API
    // ------------------------------------------------------------------

    /// Enqueue an entry; `None` messages and [`LogLevel::None`] are ignored.
    ///
    /// Never blocks. After [`shutdown`](Self::shutdown) this does nothing.
    pub fn emit(&self, level: LogLevel, call_site: CallSite, message: Option<String>) {
        let Some(message) = message else {
            return;
        };
        if !level.is_entry_level() {
            return;
        }

        self.send_entry(LogEntry::new(level, call_site, message));
    }

    pub fn log(&self, level: LogLevel, call_site: CallSite, message: impl Into<String>) {
        self.emit(level, call_site, Some(message.into()));
    }

    fn send_entry(&self, entry: LogEntry) {
        let Some(ref sender) = self.sender else {
            return;
        };

        match sender.try_send(entry) {
            Ok(()) => {
                self.shared.metrics.record_enqueued();
            }
            Err(TrySendError::Full(entry)) => self.handle_overflow(sender, entry),
            Err(TrySendError::Disconnected(_)) => {
                // Worker is gone, silently ignore
            }
        }
    }

    fn handle_overflow(&self, sender: &Sender<LogEntry>, entry: LogEntry) {
        match (self.overflow_policy, &self.evictor) {
            (OverflowPolicy::DropOldest, Some(evictor)) => {
                if evictor.try_recv().is_ok() {
                    let previous = self.shared.metrics.record_evicted();
                    self.alert_on_drop(previous);
                }
                match sender.try_send(entry) {
                    Ok(()) => {
                        self.shared.metrics.record_enqueued();
                    }
                    // Another producer took the freed slot
                    Err(_) => self.alert_dropped(),
                }
            }
            _ => self.alert_dropped(),
        }
    }

    fn alert_dropped(&self) {
        let previous = self.shared.metrics.record_dropped();
        self.alert_on_drop(previous);
    }

    fn alert_on_drop(&self, previous: u64) {
        // Alert on first drop and periodically thereafter
        if previous == 0 || (previous + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Pending queue full ({}), {} entries dropped. \
                 Consider a larger capacity or a shorter tick interval.",
                self.overflow_policy,
                previous + 1
            );

            if let Some(ref callback) = self.on_overflow {
                callback(previous + 1);
            }
        }
    }

    /// Emit at [`LogLevel::Trace`]
    ///
    /// The per-level methods record the caller's file and line but leave the
    /// member blank; the bundled sinks then render the source as
    /// `[Class Line N]`. The level macros (`trace!`, `information!`, ...)
    /// capture the enclosing function as well.
    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, CallSite::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, CallSite::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn information(&self, message: impl Into<String>) {
        self.log(LogLevel::Information, CallSite::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, CallSite::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, CallSite::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, CallSite::caller(), message);
    }

    // ------------------------------------------------------------------
    // Sink registry
    // ------------------------------------------------------------------

    /// Register a sink at the end of the registry
    pub fn add_sink(&self, sink: Box<dyn Sink>) -> SinkId {
        self.shared.registry.lock().insert(sink)
    }

    /// Unregister a sink and hand it back
    pub fn remove_sink(&self, id: SinkId) -> Option<Box<dyn Sink>> {
        self.shared.registry.lock().remove(id)
    }

    /// Replace every registered sink; `None` items are skipped
    pub fn set_sinks<I>(&self, sinks: I) -> Vec<SinkId>
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Sink>>>,
    {
        self.shared.registry.lock().replace(sinks)
    }

    /// Unregister every sink and hand them back in registry order
    pub fn clear_sinks(&self) -> Vec<Box<dyn Sink>> {
        self.shared.registry.lock().clear()
    }

    pub fn sink_count(&self) -> usize {
        self.shared.registry.lock().len()
    }

    pub fn sink_ids(&self) -> Vec<SinkId> {
        self.shared.registry.lock().ids()
    }

    pub fn contains_sink(&self, id: SinkId) -> bool {
        self.shared.registry.lock().contains(id)
    }

    /// Run `f` on a registered sink between drain ticks
    ///
    /// `f` runs while the sink registry is locked, so it must not add,
    /// remove or configure sinks on the same logger; doing so deadlocks.
    pub fn with_sink<R>(&self, id: SinkId, f: impl FnOnce(&mut dyn Sink) -> R) -> Option<R> {
        let mut registry = self.shared.registry.lock();
        registry.get_mut(id).map(|sink| f(sink.as_mut()))
    }

    /// Edit the filter of a registered sink; returns false if it is not registered
    ///
    /// The same locking rule as [`with_sink`](Self::with_sink) applies to `f`.
    pub fn configure_sink(&self, id: SinkId, f: impl FnOnce(&mut SinkFilter)) -> bool {
        self.with_sink(id, |sink| f(sink.filter_mut())).is_some()
    }

    // ------------------------------------------------------------------
    // Configuration and lifecycle
    // ------------------------------------------------------------------

    pub fn tick_interval(&self) -> Duration {
        self.shared.tick_interval()
    }

    /// Change the tick period
    ///
    /// The worker abandons its current wait and starts the next one with the
    /// new interval, so a shorter period takes effect immediately.
    pub fn set_tick_interval(&self, interval: Duration) {
        self.shared
            .tick_interval_ms
            .store(clamp_tick_interval_ms(interval), Ordering::Relaxed);
        if let Some(ref control) = self.control {
            // A closed channel means the worker is already gone
            let _ = control.send(Control::Reschedule);
        }
    }

    /// Entries waiting for a drain tick
    pub fn pending_count(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use sink_logger::Logger;
    ///
    /// let logger = Logger::builder().build();
    /// logger.information("hello");
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.entries_enqueued(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Flush every registered sink
    ///
    /// Fails with [`LoggerError::LoggerStopped`] after shutdown; the worker
    /// already flushed every sink on its way out.
    pub fn flush(&self) -> Result<()> {
        if !self.is_running() {
            return Err(LoggerError::LoggerStopped);
        }
        self.shared.flush_all()
    }

    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }

    /// Stop the drain loop and wait for the worker
    ///
    /// Closes the queue, then the worker delivers what is still pending (when
    /// `drain_on_shutdown` is set, the default), flushes every sink and exits.
    /// Calling it again is a no-op that returns `true`.
    ///
    /// **Note**: When the logger is dropped without calling `shutdown()`
    /// explicitly, it uses [`DEFAULT_SHUTDOWN_TIMEOUT`].
    ///
    /// # Returns
    ///
    /// `true` if the worker finished within `timeout`, `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sink_logger::Logger;
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::builder().build();
    /// logger.information("Important message");
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());
        drop(self.evictor.take());

        if let Some(control) = self.control.take() {
            // A closed channel means the worker is already gone
            let _ = control.send(Control::Shutdown {
                drain: self.drain_on_shutdown,
            });
        }

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatch worker panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Dispatch worker did not finish within {:?}. \
                     Some entries may be lost.",
                    timeout
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.shared.metrics.entries_dropped();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped entries (drop rate: {:.2}%)",
                dropped,
                self.shared.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use sink_logger::prelude::*;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .tick_interval(Duration::from_millis(10))
///     .sink(ConsoleSink::new(SinkFilter::new(LogLevel::Information)))
///     .max_pending(10_000)
///     .overflow_policy(OverflowPolicy::DropOldest)
///     .on_overflow(Arc::new(|count| {
///         eprintln!("ALERT: {} entries dropped", count);
///     }))
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sinks: Vec<Box<dyn Sink>>,
    on_overflow: Option<OverflowCallback>,
    on_sink_failure: Option<SinkFailureCallback>,
    on_sink_expired: Option<SinkExpiredCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sinks: Vec::new(),
            on_overflow: None,
            on_sink_failure: None,
            on_sink_expired: None,
        }
    }

    /// Replace all plain settings at once
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the period between drain ticks (minimum 1 ms)
    #[must_use = "builder methods return a new value"]
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval_ms = clamp_tick_interval_ms(interval);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tick_interval_ms(mut self, millis: u64) -> Self {
        self.config.tick_interval_ms = millis.max(1);
        self
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Add several sinks; `None` items are skipped
    #[must_use = "builder methods return a new value"]
    pub fn sinks<I>(mut self, sinks: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Sink>>>,
    {
        self.sinks.extend(sinks.into_iter().filter_map(Into::into));
        self
    }

    /// Bound the pending queue
    ///
    /// Without this the queue is unbounded.
    #[must_use = "builder methods return a new value"]
    pub fn max_pending(mut self, capacity: usize) -> Self {
        self.config.max_pending = Some(capacity);
        self
    }

    /// Set the overflow policy for a bounded queue
    ///
    /// Default is `DropNewest`. Has no effect on an unbounded queue.
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn drain_on_shutdown(mut self, drain: bool) -> Self {
        self.config.drain_on_shutdown = drain;
        self
    }

    /// Set a callback for overflow notifications
    ///
    /// The parameter is the total count of dropped entries.
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Set a callback invoked for every failed sink write
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_failure(mut self, callback: SinkFailureCallback) -> Self {
        self.on_sink_failure = Some(callback);
        self
    }

    /// Set a callback invoked when an expired sink is removed
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_expired(mut self, callback: SinkExpiredCallback) -> Self {
        self.on_sink_expired = Some(callback);
        self
    }

    /// Build the Logger and start its worker
    pub fn build(self) -> Logger {
        let mut registry = Registry::new();
        for sink in self.sinks {
            registry.insert(sink);
        }

        Logger::start(
            self.config,
            registry,
            self.on_overflow,
            self.on_sink_failure,
            self.on_sink_expired,
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
