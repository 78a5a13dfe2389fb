//! Shared poll timer for all pending probes.

use super::handle::Host;
use super::probe::ReadinessProbe;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Polls every pending [`ReadinessProbe`] from a single recurring timer.
///
/// The timer is started lazily by the first registration and dropped by the
/// first tick that finds nothing left to poll, so an idle scheduler costs
/// nothing and a busy one costs one timer regardless of how many images are
/// in flight.
///
/// Cloning yields another handle to the same scheduler.
pub struct Scheduler<H: Host> {
    inner: Rc<SchedulerState<H>>,
}

struct SchedulerState<H: Host> {
    host: Rc<H>,
    period_ms: u32,
    // Registration order
    active: RefCell<Vec<Rc<ReadinessProbe<H::Image>>>>,
    timer: RefCell<Option<H::Interval>>,
}

impl<H: Host> Clone for Scheduler<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> Scheduler<H> {
    pub fn new(host: Rc<H>, period_ms: u32) -> Self {
        Self {
            inner: Rc::new(SchedulerState {
                host,
                period_ms,
                active: RefCell::new(Vec::new()),
                timer: RefCell::new(None),
            }),
        }
    }

    /// Add a probe to the poll set and make sure the timer is running.
    pub fn register(&self, probe: Rc<ReadinessProbe<H::Image>>) {
        self.inner.active.borrow_mut().push(probe);
        self.ensure_running();
    }

    /// One timer period: drop probes that finished since the last tick,
    /// poll the rest in registration order, and stop the timer once empty.
    ///
    /// Probes registered by callbacks during the pass are kept for the next
    /// tick.
    pub fn tick(&self) {
        let visiting: Vec<_> = self.inner.active.borrow().clone();
        let mut drained = Vec::new();

        for probe in &visiting {
            if probe.is_finished() {
                drained.push(Rc::clone(probe));
            } else {
                probe.poll();
            }
        }

        if !drained.is_empty() {
            self.inner
                .active
                .borrow_mut()
                .retain(|probe| !drained.iter().any(|done| Rc::ptr_eq(done, probe)));
        }

        if self.inner.active.borrow().is_empty() {
            self.stop();
        }
    }

    /// Number of probes still in the poll set.
    pub fn pending(&self) -> usize {
        self.inner.active.borrow().len()
    }

    /// Whether the shared timer is currently running.
    pub fn is_running(&self) -> bool {
        self.inner.timer.borrow().is_some()
    }

    /// Cancel every pending probe and stop the timer. Requests whose probe
    /// was cancelled invoke none of their callbacks afterwards.
    pub fn shutdown(&self) {
        let probes = std::mem::take(&mut *self.inner.active.borrow_mut());
        for probe in &probes {
            probe.cancel();
        }
        self.stop();
    }

    fn ensure_running(&self) {
        if self.is_running() {
            return;
        }

        let state = Rc::downgrade(&self.inner);
        let timer = self.inner.host.set_interval(
            self.inner.period_ms,
            Box::new(move || {
                if let Some(inner) = state.upgrade() {
                    Scheduler { inner }.tick();
                }
            }),
        );
        *self.inner.timer.borrow_mut() = Some(timer);
        debug!("readiness timer started ({}ms)", self.inner.period_ms);
    }

    fn stop(&self) {
        let timer = self.inner.timer.borrow_mut().take();
        if timer.is_some() {
            debug!("readiness timer stopped");
        }
        drop(timer);
    }
}
