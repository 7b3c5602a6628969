use std::time::Duration;

pub trait TimerDriver {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Owned pending timer. Dropping it cancels the callback if it has not run.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn disarm(mut self) {
        self.cancel = None;
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct TokioTimers;

#[cfg(not(target_arch = "wasm32"))]
impl TimerDriver for TokioTimers {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let deadline = tokio::time::Instant::now() + delay;
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            callback();
        });

        TimerHandle::new(move || task.abort())
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserTimers;

#[cfg(target_arch = "wasm32")]
impl TimerDriver for BrowserTimers {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        use wasm_bindgen::{closure::Closure, JsCast};

        let Some(window) = web_sys::window() else {
            return TimerHandle::inert();
        };

        // JS owns the closure and frees it after the single call.
        let function = Closure::once_into_js(move || callback());
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        match window
            .set_timeout_with_callback_and_timeout_and_arguments_0(function.unchecked_ref(), delay_ms)
        {
            Ok(timeout_id) => TimerHandle::new(move || {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(timeout_id);
                }
            }),
            Err(_) => {
                crate::telemetry::log_event(
                    crate::telemetry::LogLevel::Info,
                    "timer_schedule_failed",
                    serde_json::json!({ "delay_ms": delay_ms }),
                );
                TimerHandle::inert()
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn callback_runs_after_delay() {
        LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let handle = {
                    let fired = fired.clone();
                    TokioTimers.schedule(Duration::from_millis(500), Box::new(move || fired.set(true)))
                };

                tokio::time::sleep(Duration::from_millis(499)).await;
                assert!(!fired.get());

                tokio::time::sleep(Duration::from_millis(2)).await;
                assert!(fired.get());
                handle.disarm();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_cancels_callback() {
        LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let handle = {
                    let fired = fired.clone();
                    TokioTimers.schedule(Duration::from_millis(100), Box::new(move || fired.set(true)))
                };

                drop(handle);
                tokio::time::sleep(Duration::from_millis(250)).await;

                assert!(!fired.get());
            })
            .await;
    }
}
