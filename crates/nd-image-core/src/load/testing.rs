//! In-memory image and virtual-clock host for driving the loader in tests.

use super::handle::{Host, ImageHandle};
use crate::error::LoadError;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    Load,
    Error,
}

struct Listener {
    id: u64,
    kind: ListenerKind,
    // Taken out while the listener runs
    callback: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct FakeImageState {
    src: RefCell<String>,
    src_history: RefCell<Vec<String>>,
    width: Cell<u32>,
    height: Cell<u32>,
    complete: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
    next_listener: Cell<u64>,
}

/// Image whose size, completion and notifications are set by the test.
#[derive(Clone, Default)]
pub(crate) struct FakeImage {
    state: Rc<FakeImageState>,
}

pub(crate) struct FakeBinding {
    image: Weak<FakeImageState>,
    id: u64,
}

impl Drop for FakeBinding {
    fn drop(&mut self) {
        if let Some(state) = self.image.upgrade() {
            state.listeners.borrow_mut().retain(|l| l.id != self.id);
        }
    }
}

impl FakeImage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_size(width: u32, height: u32) -> Self {
        let image = Self::new();
        image.set_size(width, height);
        image
    }

    pub(crate) fn set_size(&self, width: u32, height: u32) {
        self.state.width.set(width);
        self.state.height.set(height);
    }

    pub(crate) fn set_complete(&self, complete: bool) {
        self.state.complete.set(complete);
    }

    pub(crate) fn src_history(&self) -> Vec<String> {
        self.state.src_history.borrow().clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    pub(crate) fn same_as(&self, other: &FakeImage) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Deliver the load notification to every attached listener.
    pub(crate) fn fire_load(&self) {
        self.fire(ListenerKind::Load);
    }

    /// Deliver the error notification to every attached listener.
    pub(crate) fn fire_error(&self) {
        self.fire(ListenerKind::Error);
    }

    fn fire(&self, kind: ListenerKind) {
        let ids: Vec<u64> = self
            .state
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.id)
            .collect();

        for id in ids {
            let callback = self
                .state
                .listeners
                .borrow_mut()
                .iter_mut()
                .find(|l| l.id == id)
                .and_then(|l| l.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };
            callback();
            // Put it back unless the listener detached itself
            if let Some(listener) = self
                .state
                .listeners
                .borrow_mut()
                .iter_mut()
                .find(|l| l.id == id)
            {
                listener.callback = Some(callback);
            }
        }
    }

    fn attach(&self, kind: ListenerKind, callback: Box<dyn FnMut()>) -> FakeBinding {
        let id = self.state.next_listener.get();
        self.state.next_listener.set(id + 1);
        self.state.listeners.borrow_mut().push(Listener {
            id,
            kind,
            callback: Some(callback),
        });
        FakeBinding {
            image: Rc::downgrade(&self.state),
            id,
        }
    }
}

impl ImageHandle for FakeImage {
    type Binding = FakeBinding;

    fn src(&self) -> String {
        self.state.src.borrow().clone()
    }

    fn set_src(&self, src: &str) {
        *self.state.src.borrow_mut() = src.to_string();
        self.state.src_history.borrow_mut().push(src.to_string());
    }

    fn width(&self) -> u32 {
        self.state.width.get()
    }

    fn height(&self) -> u32 {
        self.state.height.get()
    }

    fn complete(&self) -> bool {
        self.state.complete.get()
    }

    fn on_load(&self, callback: Box<dyn FnMut()>) -> FakeBinding {
        self.attach(ListenerKind::Load, callback)
    }

    fn on_error(&self, callback: Box<dyn FnMut()>) -> FakeBinding {
        self.attach(ListenerKind::Error, callback)
    }
}

struct IntervalEntry {
    id: u64,
    period: u64,
    due: u64,
    callback: Option<Box<dyn FnMut()>>,
}

struct TimeoutEntry {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

enum Due {
    Interval(u64),
    Timeout(u64),
}

#[derive(Default)]
struct HostState {
    now: Cell<u64>,
    next_id: Cell<u64>,
    intervals: RefCell<Vec<IntervalEntry>>,
    timeouts: RefCell<Vec<TimeoutEntry>>,
    queued_images: RefCell<VecDeque<FakeImage>>,
    created_images: Cell<usize>,
    intervals_started: Cell<usize>,
    fail_create: Cell<bool>,
}

impl HostState {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

/// Host whose clock only moves when the test calls [`ManualHost::advance`].
#[derive(Clone, Default)]
pub(crate) struct ManualHost {
    state: Rc<HostState>,
}

pub(crate) struct ManualInterval {
    host: Weak<HostState>,
    id: u64,
}

impl Drop for ManualInterval {
    fn drop(&mut self) {
        if let Some(state) = self.host.upgrade() {
            state.intervals.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }
}

impl ManualHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn now(&self) -> u64 {
        self.state.now.get()
    }

    /// Hand out `image` from the next `create_image` call.
    pub(crate) fn queue_image(&self, image: FakeImage) {
        self.state.queued_images.borrow_mut().push_back(image);
    }

    pub(crate) fn fail_image_creation(&self) {
        self.state.fail_create.set(true);
    }

    pub(crate) fn created_images(&self) -> usize {
        self.state.created_images.get()
    }

    pub(crate) fn intervals_started(&self) -> usize {
        self.state.intervals_started.get()
    }

    pub(crate) fn active_intervals(&self) -> usize {
        self.state.intervals.borrow().len()
    }

    pub(crate) fn pending_timeouts(&self) -> usize {
        self.state.timeouts.borrow().len()
    }

    /// Move the clock forward, firing due timers in (due time, creation) order.
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        while let Some((due, next)) = self.next_due(target) {
            self.state.now.set(due);
            match next {
                Due::Interval(id) => self.run_interval(id),
                Due::Timeout(id) => self.run_timeout(id),
            }
        }
        self.state.now.set(target);
    }

    fn next_due(&self, target: u64) -> Option<(u64, Due)> {
        let interval = self
            .state
            .intervals
            .borrow()
            .iter()
            .filter(|entry| entry.due <= target && entry.callback.is_some())
            .map(|entry| (entry.due, entry.id))
            .min();
        let timeout = self
            .state
            .timeouts
            .borrow()
            .iter()
            .filter(|entry| entry.due <= target)
            .map(|entry| (entry.due, entry.id))
            .min();

        match (interval, timeout) {
            (Some(i), Some(t)) if t < i => Some((t.0, Due::Timeout(t.1))),
            (Some(i), _) => Some((i.0, Due::Interval(i.1))),
            (None, Some(t)) => Some((t.0, Due::Timeout(t.1))),
            (None, None) => None,
        }
    }

    fn run_interval(&self, id: u64) {
        let callback = self
            .state
            .intervals
            .borrow_mut()
            .iter_mut()
            .find(|entry| entry.id == id)
            .and_then(|entry| {
                entry.due += entry.period;
                entry.callback.take()
            });
        let Some(mut callback) = callback else {
            return;
        };
        callback();
        if let Some(entry) = self
            .state
            .intervals
            .borrow_mut()
            .iter_mut()
            .find(|entry| entry.id == id)
        {
            entry.callback = Some(callback);
        }
    }

    fn run_timeout(&self, id: u64) {
        let entry = {
            let mut timeouts = self.state.timeouts.borrow_mut();
            timeouts
                .iter()
                .position(|entry| entry.id == id)
                .map(|index| timeouts.remove(index))
        };
        if let Some(entry) = entry {
            (entry.callback)();
        }
    }
}

impl Host for ManualHost {
    type Image = FakeImage;
    type Interval = ManualInterval;

    fn create_image(&self) -> Result<FakeImage, LoadError> {
        if self.state.fail_create.get() {
            return Err(LoadError::CreateImage("image construction disabled".to_string()));
        }
        self.state
            .created_images
            .set(self.state.created_images.get() + 1);
        let queued = self.state.queued_images.borrow_mut().pop_front();
        Ok(queued.unwrap_or_default())
    }

    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> ManualInterval {
        let id = self.state.next_id();
        let period = u64::from(period_ms);
        self.state.intervals.borrow_mut().push(IntervalEntry {
            id,
            period,
            due: self.now() + period,
            callback: Some(tick),
        });
        self.state
            .intervals_started
            .set(self.state.intervals_started.get() + 1);
        ManualInterval {
            host: Rc::downgrade(&self.state),
            id,
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let id = self.state.next_id();
        self.state.timeouts.borrow_mut().push(TimeoutEntry {
            id,
            due: self.now() + u64::from(delay_ms),
            callback,
        });
    }
}

/// Shared record of which callbacks fired, in order.
#[derive(Clone, Default)]
pub(crate) struct EventLog {
    events: Rc<RefCell<Vec<String>>>,
}

impl EventLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }
}
