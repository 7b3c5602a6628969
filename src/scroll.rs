use std::{cell::Cell, rc::Rc};

use crate::signal::{Subscribers, Subscription};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavPolicy {
    pub threshold_px: f64,
    pub max_blur_px: f64,
}

impl Default for NavPolicy {
    fn default() -> Self {
        Self {
            threshold_px: 100.0,
            max_blur_px: 20.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavChrome {
    pub visible: bool,
    pub opacity: f64,
    pub blur_px: f64,
}

impl NavPolicy {
    fn progress(&self, offset: f64) -> f64 {
        if self.threshold_px <= 0.0 {
            return if offset > 0.0 { 1.0 } else { 0.0 };
        }
        (offset / self.threshold_px).clamp(0.0, 1.0)
    }

    pub fn opacity(&self, offset: f64) -> f64 {
        self.progress(offset)
    }

    pub fn blur_px(&self, offset: f64) -> f64 {
        self.progress(offset) * self.max_blur_px
    }

    /// Shown strictly past the threshold, hidden again at or below it.
    pub fn is_visible(&self, offset: f64) -> bool {
        offset > self.threshold_px
    }

    pub fn chrome(&self, offset: f64) -> NavChrome {
        NavChrome {
            visible: self.is_visible(offset),
            opacity: self.opacity(offset),
            blur_px: self.blur_px(offset),
        }
    }
}

struct ScrollInner {
    offset: Cell<f64>,
    subscribers: Subscribers<f64>,
}

#[derive(Clone)]
pub struct ScrollTracker {
    inner: Rc<ScrollInner>,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScrollInner {
                offset: Cell::new(0.0),
                subscribers: Subscribers::new(),
            }),
        }
    }

    pub fn on_scroll(&self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        self.inner.offset.set(offset);
        self.inner.subscribers.notify(&offset);
    }

    pub fn offset(&self) -> f64 {
        self.inner.offset.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&f64) + 'static) -> Subscription {
        self.inner.subscribers.subscribe(listener)
    }
}
