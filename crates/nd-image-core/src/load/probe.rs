//! Per-request dimension convergence check.

use super::handle::ImageHandle;
use super::request::ReadyCallback;
use log::trace;
use std::cell::{Cell, RefCell};

/// Watches one image until its dimensions can be trusted.
///
/// The probe snapshots the image's size when created. A poll step resolves
/// it once the width or height has moved away from that snapshot, or once
/// the area exceeds the configured threshold (an image that was already
/// sized when the request started, e.g. loaded elsewhere on the page).
pub struct ReadinessProbe<I: ImageHandle> {
    image: I,
    initial_width: u32,
    initial_height: u32,
    area_threshold: u64,
    finished: Cell<bool>,
    cancelled: Cell<bool>,
    // Present until it has been invoked or the probe was finished without it
    ready: RefCell<Option<ReadyCallback<I>>>,
}

impl<I: ImageHandle> ReadinessProbe<I> {
    /// Snapshot `image`'s current dimensions and wait for them to converge.
    pub fn new(image: I, area_threshold: u64, ready: ReadyCallback<I>) -> Self {
        Self {
            initial_width: image.width(),
            initial_height: image.height(),
            image,
            area_threshold,
            finished: Cell::new(false),
            cancelled: Cell::new(false),
            ready: RefCell::new(Some(ready)),
        }
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    /// Dimensions captured at creation.
    pub fn initial_size(&self) -> (u32, u32) {
        (self.initial_width, self.initial_height)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    /// Whether the probe was abandoned before its image settled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Whether the image's current dimensions count as known.
    pub fn has_converged(&self) -> bool {
        let width = self.image.width();
        let height = self.image.height();

        width != self.initial_width
            || height != self.initial_height
            || u64::from(width) * u64::from(height) > self.area_threshold
    }

    /// Run one poll step. Returns whether the probe is finished.
    pub fn poll(&self) -> bool {
        if !self.is_finished() && self.has_converged() {
            trace!(
                "dimensions converged at {}x{}",
                self.image.width(),
                self.image.height()
            );
            self.resolve();
        }
        self.is_finished()
    }

    /// Finish the probe, invoking `ready` unless it already ran.
    pub fn resolve(&self) {
        self.finished.set(true);
        let ready = self.ready.borrow_mut().take();
        if let Some(ready) = ready {
            ready(&self.image);
        }
    }

    /// Finish the probe without invoking `ready`.
    pub fn finish(&self) {
        self.finished.set(true);
        let ready = self.ready.borrow_mut().take();
        drop(ready);
    }

    /// Drop `ready` and mark the owning request abandoned, so it stays
    /// silent from now on. Has no effect once finished.
    pub fn cancel(&self) {
        if self.is_finished() {
            return;
        }
        self.cancelled.set(true);
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_AREA_THRESHOLD;
    use crate::load::testing::{EventLog, FakeImage};

    fn probe_for(image: &FakeImage, log: &EventLog) -> ReadinessProbe<FakeImage> {
        let log = log.clone();
        ReadinessProbe::new(
            image.clone(),
            DEFAULT_AREA_THRESHOLD,
            Box::new(move |_| log.push("ready")),
        )
    }

    #[test]
    fn test_unchanged_small_image_waits() {
        let image = FakeImage::new();
        let log = EventLog::new();
        let probe = probe_for(&image, &log);

        assert_eq!(probe.initial_size(), (0, 0));
        assert!(!probe.poll());
        assert!(!probe.poll());
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_width_change_resolves() {
        let image = FakeImage::new();
        let log = EventLog::new();
        let probe = probe_for(&image, &log);

        image.set_size(1, 0);
        assert!(probe.poll());
        assert!(probe.is_finished());
        assert_eq!(log.events(), vec!["ready"]);
    }

    #[test]
    fn test_height_change_resolves() {
        let image = FakeImage::with_size(24, 24);
        let log = EventLog::new();
        let probe = probe_for(&image, &log);

        assert!(!probe.poll());
        image.set_size(24, 30);
        assert!(probe.poll());
        assert_eq!(log.count("ready"), 1);
    }

    #[test]
    fn test_area_threshold_is_strict() {
        let log = EventLog::new();

        // 32 x 32 == 1024, not above the threshold
        let image = FakeImage::with_size(32, 32);
        assert!(!probe_for(&image, &log).poll());

        let image = FakeImage::with_size(33, 32);
        assert!(probe_for(&image, &log).poll());
        assert_eq!(log.count("ready"), 1);
    }

    #[test]
    fn test_area_does_not_overflow() {
        let image = FakeImage::with_size(u32::MAX, u32::MAX);
        let log = EventLog::new();
        assert!(probe_for(&image, &log).poll());
    }

    #[test]
    fn test_ready_fires_once() {
        let image = FakeImage::with_size(100, 100);
        let log = EventLog::new();
        let probe = probe_for(&image, &log);

        assert!(probe.poll());
        assert!(probe.poll());
        probe.resolve();
        assert_eq!(log.count("ready"), 1);
    }

    #[test]
    fn test_resolve_forces_ready() {
        let image = FakeImage::new();
        let log = EventLog::new();
        let probe = probe_for(&image, &log);

        probe.resolve();
        assert!(probe.is_finished());
        assert_eq!(log.events(), vec!["ready"]);
    }

    #[test]
    fn test_finish_suppresses_ready() {
        let image = FakeImage::new();
        let log = EventLog::new();
        let probe = probe_for(&image, &log);

        probe.finish();
        image.set_size(640, 480);
        assert!(probe.poll());
        probe.resolve();
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_cancel_differs_from_finish() {
        let image = FakeImage::new();
        let log = EventLog::new();

        let finished = probe_for(&image, &log);
        finished.finish();
        assert!(finished.is_finished());
        assert!(!finished.is_cancelled());

        let cancelled = probe_for(&image, &log);
        cancelled.cancel();
        assert!(cancelled.is_finished());
        assert!(cancelled.is_cancelled());
        cancelled.resolve();
        assert!(log.events().is_empty());

        let resolved = probe_for(&FakeImage::with_size(64, 64), &log);
        assert!(resolved.poll());
        resolved.cancel();
        assert!(!resolved.is_cancelled());
    }

    #[test]
    fn test_custom_threshold() {
        let image = FakeImage::with_size(10, 10);
        let probe = ReadinessProbe::new(image, 99, Box::new(|_| {}));
        assert!(probe.has_converged());
    }
}
