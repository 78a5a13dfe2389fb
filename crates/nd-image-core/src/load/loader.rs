//! Entry point for load requests.

use super::handle::{Host, ImageHandle};
use super::probe::ReadinessProbe;
use super::request::{ErrorCallback, LoadCallback, LoadRequest};
use super::scheduler::Scheduler;
use crate::config::LoaderConfig;
use crate::error::{ConfigError, LoadError};
use log::{debug, trace};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Starts image loads and reports readiness, completion and failure.
///
/// Each loader owns its own [`Scheduler`]; loaders do not share timers with
/// each other.
pub struct Loader<H: Host> {
    host: Rc<H>,
    config: LoaderConfig,
    scheduler: Scheduler<H>,
}

impl<H: Host> Loader<H> {
    /// Create a loader with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot drive a scheduler.
    pub fn new(host: H, config: LoaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(host, config))
    }

    /// Create a loader with the default timings, which always validate.
    pub fn with_defaults(host: H) -> Self {
        Self::build(host, LoaderConfig::default())
    }

    fn build(host: H, config: LoaderConfig) -> Self {
        let host = Rc::new(host);
        let scheduler = Scheduler::new(Rc::clone(&host), config.poll_interval_ms);
        Self {
            host,
            config,
            scheduler,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn scheduler(&self) -> &Scheduler<H> {
        &self.scheduler
    }

    /// Start a load request and return the image it watches.
    ///
    /// An image that is already complete (typically served from cache) is
    /// reported synchronously: `ready`, then `load`, before this returns.
    /// Otherwise one poll step runs immediately and the probe joins the
    /// shared poll set only if that step did not already resolve it.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingSource` when the request has neither a URL
    /// nor a node, and `LoadError::CreateImage` when the host cannot
    /// construct an image. Load failures are reported through the request's
    /// `error` callback, never here.
    pub fn load(&self, request: LoadRequest<H::Image>) -> Result<H::Image, LoadError> {
        let LoadRequest {
            url,
            node,
            ready,
            load,
            error,
        } = request;
        let image = self.acquire(url.as_deref(), node)?;

        if image.complete() {
            debug!("{} already complete", image.src());
            ready(&image);
            if let Some(load) = load {
                load(&image);
            }
            return Ok(image);
        }

        let probe = Rc::new(ReadinessProbe::new(
            image.clone(),
            self.config.area_threshold,
            ready,
        ));
        let pending = Rc::new(PendingLoad {
            probe: Rc::clone(&probe),
            load: RefCell::new(load),
            error: RefCell::new(error),
            bindings: RefCell::new(Vec::new()),
            settled: Cell::new(false),
        });
        self.attach(&image, &pending);

        if probe.poll() {
            trace!("{} resolved on registration", image.src());
        } else {
            self.scheduler.register(probe);
        }

        Ok(image)
    }

    fn acquire(&self, url: Option<&str>, node: Option<H::Image>) -> Result<H::Image, LoadError> {
        match (node, url) {
            (Some(node), url) => {
                if let Some(url) = url {
                    node.set_src(url);
                }
                Ok(node)
            }
            (None, Some(url)) => {
                let image = self.host.create_image()?;
                // Clearing first forces a fresh load instead of stale state
                image.set_src("");
                image.set_src(url);
                Ok(image)
            }
            (None, None) => Err(LoadError::MissingSource),
        }
    }

    fn attach(&self, image: &H::Image, pending: &Rc<PendingLoad<H::Image>>) {
        let on_error = {
            let pending = Rc::clone(pending);
            let host = Rc::clone(&self.host);
            let grace_ms = self.config.error_grace_ms;
            move || {
                let pending = Rc::clone(&pending);
                host.set_timeout(grace_ms, Box::new(move || pending.error_grace_elapsed()));
            }
        };
        let on_load = {
            let pending = Rc::clone(pending);
            move || pending.loaded()
        };

        let bindings = vec![
            image.on_error(Box::new(on_error)),
            image.on_load(Box::new(on_load)),
        ];
        pending.bindings.borrow_mut().extend(bindings);
    }
}

/// Notification state for one request that was not complete at start.
///
/// The listener closures keep this alive through `bindings`; releasing the
/// bindings on settle breaks that cycle.
struct PendingLoad<I: ImageHandle> {
    probe: Rc<ReadinessProbe<I>>,
    load: RefCell<Option<LoadCallback<I>>>,
    error: RefCell<Option<ErrorCallback<I>>>,
    bindings: RefCell<Vec<I::Binding>>,
    settled: Cell<bool>,
}

impl<I: ImageHandle> PendingLoad<I> {
    fn loaded(&self) {
        // Animated images may deliver load repeatedly
        if self.settled.replace(true) || self.abandon_if_cancelled() {
            return;
        }
        self.probe.resolve();
        self.fire_load();
        self.release();
    }

    fn error_grace_elapsed(&self) {
        if !self.settled.replace(true) && !self.abandon_if_cancelled() {
            let image = self.probe.image();
            if image.complete() {
                debug!("{} completed within the error grace period", image.src());
                self.probe.resolve();
                self.fire_load();
            } else {
                self.probe.finish();
                let failure = LoadError::Failed { src: image.src() };
                let error = self.error.borrow_mut().take();
                match error {
                    Some(error) => error(image, failure),
                    None => debug!("{} (no error callback)", failure),
                }
            }
            self.release();
        }
        self.probe.finish();
    }

    /// Drop the callbacks and listeners of a request whose probe was
    /// cancelled. Returns whether it was.
    fn abandon_if_cancelled(&self) -> bool {
        if !self.probe.is_cancelled() {
            return false;
        }
        debug!("{} abandoned after shutdown", self.probe.image().src());
        drop(self.load.borrow_mut().take());
        drop(self.error.borrow_mut().take());
        self.release();
        true
    }

    fn fire_load(&self) {
        let load = self.load.borrow_mut().take();
        if let Some(load) = load {
            load(self.probe.image());
        }
    }

    fn release(&self) {
        let bindings = std::mem::take(&mut *self.bindings.borrow_mut());
        drop(bindings);
    }
}
