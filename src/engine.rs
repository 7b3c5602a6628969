use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::transition::{Style, TransitionDescriptor};

type FrameSink = Rc<dyn Fn(&Style)>;

struct AnimationTask {
    descriptor: TransitionDescriptor,
    started_at: f64,
    current: f64,
    finished: bool,
}

impl AnimationTask {
    fn new(descriptor: TransitionDescriptor, started_at: f64) -> Self {
        let current = descriptor.from;
        Self {
            descriptor,
            started_at,
            current,
            finished: false,
        }
    }

    fn advance(&mut self, now: f64) {
        if self.finished {
            return;
        }
        let (value, finished) = self.descriptor.sample(now - self.started_at);
        self.current = value;
        self.finished = finished;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

pub struct Animation {
    descriptors: Vec<TransitionDescriptor>,
    sink: Option<FrameSink>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Animation {
    pub fn new(descriptors: impl Into<Vec<TransitionDescriptor>>) -> Self {
        Self {
            descriptors: descriptors.into(),
            sink: None,
            on_complete: None,
        }
    }

    pub fn on_frame(mut self, sink: impl Fn(&Style) + 'static) -> Self {
        self.sink = Some(Rc::new(sink));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

struct Track {
    tasks: Vec<AnimationTask>,
    sink: Option<FrameSink>,
    on_complete: Option<Box<dyn FnOnce()>>,
    cancelled: Rc<Cell<bool>>,
}

impl Track {
    fn advance(&mut self, now: f64) -> Style {
        let mut style = Style::new();
        for task in &mut self.tasks {
            task.advance(now);
            style.set(task.descriptor.property, task.current);
        }
        style
    }

    fn is_finished(&self) -> bool {
        self.tasks.iter().all(AnimationTask::is_finished)
    }
}

#[derive(Default)]
struct EngineInner {
    next_id: u64,
    tracks: BTreeMap<u64, Track>,
    waker: Option<Rc<dyn Fn()>>,
}

#[derive(Clone, Default)]
pub struct AnimationEngine {
    inner: Rc<RefCell<EngineInner>>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        self.inner.borrow_mut().waker = Some(Rc::new(waker));
    }

    pub fn start(&self, now: f64, animation: Animation) -> AnimationHandle {
        let Animation {
            descriptors,
            sink,
            on_complete,
        } = animation;

        let cancelled = Rc::new(Cell::new(false));
        let mut track = Track {
            tasks: descriptors
                .into_iter()
                .map(|descriptor| AnimationTask::new(descriptor, now))
                .collect(),
            sink,
            on_complete,
            cancelled: Rc::clone(&cancelled),
        };
        let first_frame = track.advance(now);
        let sink = track.sink.clone();

        let (id, waker) = {
            let mut inner = self.inner.borrow_mut();
            let was_idle = inner.tracks.is_empty();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.tracks.insert(id, track);
            (id, if was_idle { inner.waker.clone() } else { None })
        };

        if let Some(sink) = sink {
            sink(&first_frame);
        }
        if let Some(waker) = waker {
            waker();
        }

        AnimationHandle {
            id,
            cancelled,
            engine: Rc::downgrade(&self.inner),
        }
    }

    /// Sinks and completion callbacks run with the engine unborrowed, so they
    /// may start or drop animations. Returns whether any track still needs
    /// frames.
    pub fn tick(&self, now: f64) -> bool {
        let mut frames: Vec<(FrameSink, Style)> = Vec::new();
        let mut completions: Vec<Box<dyn FnOnce()>> = Vec::new();

        {
            let mut inner = self.inner.borrow_mut();
            inner.tracks.retain(|_, track| !track.cancelled.get());

            for track in inner.tracks.values_mut() {
                let style = track.advance(now);
                if let Some(sink) = track.sink.as_ref() {
                    frames.push((Rc::clone(sink), style));
                }
                if track.is_finished() {
                    if let Some(callback) = track.on_complete.take() {
                        completions.push(callback);
                    }
                }
            }

            inner.tracks.retain(|_, track| !track.is_finished());
        }

        for (sink, style) in frames {
            sink(&style);
        }
        for callback in completions {
            callback();
        }

        !self.is_idle()
    }

    pub fn active_tracks(&self) -> usize {
        self.inner
            .borrow()
            .tracks
            .values()
            .filter(|track| !track.cancelled.get())
            .count()
    }

    pub fn is_idle(&self) -> bool {
        self.active_tracks() == 0
    }
}

/// Owns a running track. Dropping the handle cancels every task on it,
/// including infinite ones.
#[must_use = "dropping an AnimationHandle cancels the animation"]
pub struct AnimationHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>,
    engine: Weak<RefCell<EngineInner>>,
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
        // Removal is eager when possible; otherwise the next tick sweeps it.
        if let Some(inner) = self.engine.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.tracks.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{Easing, Property, Stagger};

    fn recorder() -> (Rc<RefCell<Vec<Style>>>, impl Fn(&Style) + 'static) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let frames = frames.clone();
            move |style: &Style| frames.borrow_mut().push(style.clone())
        };
        (frames, sink)
    }

    fn fade(duration_ms: f64) -> TransitionDescriptor {
        TransitionDescriptor::new(Property::Opacity, 0.0, 1.0)
            .duration_ms(duration_ms)
            .easing(Easing::Linear)
    }

    #[test]
    fn start_emits_initial_frame() {
        let engine = AnimationEngine::new();
        let (frames, sink) = recorder();

        let _handle = engine.start(
            0.0,
            Animation::new(vec![TransitionDescriptor::new(Property::TranslateY, 100.0, 0.0)])
                .on_frame(sink),
        );

        assert_eq!(
            frames.borrow().as_slice(),
            &[[(Property::TranslateY, 100.0)].into_iter().collect::<Style>()]
        );
    }

    #[test]
    fn tick_interpolates_and_completes() {
        let engine = AnimationEngine::new();
        let (frames, sink) = recorder();
        let completed = Rc::new(Cell::new(0));

        let _handle = {
            let completed = completed.clone();
            engine.start(
                1_000.0,
                Animation::new(vec![fade(200.0)])
                    .on_frame(sink)
                    .on_complete(move || completed.set(completed.get() + 1)),
            )
        };

        assert!(engine.tick(1_100.0));
        assert_eq!(frames.borrow().last().and_then(|s| s.get(Property::Opacity)), Some(0.5));
        assert_eq!(completed.get(), 0);

        assert!(!engine.tick(1_250.0));
        assert_eq!(frames.borrow().last().and_then(|s| s.get(Property::Opacity)), Some(1.0));
        assert_eq!(completed.get(), 1);
        assert!(engine.is_idle());

        assert!(!engine.tick(1_300.0));
        assert_eq!(completed.get(), 1);
    }

    #[test]
    fn descriptors_on_one_element_run_concurrently() {
        let engine = AnimationEngine::new();
        let (frames, sink) = recorder();

        let _handle = engine.start(
            0.0,
            Animation::new(vec![
                fade(100.0),
                TransitionDescriptor::new(Property::Scale, 0.0, 1.0)
                    .duration_ms(400.0)
                    .easing(Easing::Linear),
            ])
            .on_frame(sink),
        );

        assert!(engine.tick(200.0));
        let last = frames.borrow().last().cloned().unwrap_or_default();
        assert_eq!(last.get(Property::Opacity), Some(1.0));
        assert_eq!(last.get(Property::Scale), Some(0.5));
    }

    #[test]
    fn infinite_track_runs_until_handle_dropped() {
        let engine = AnimationEngine::new();
        let handle = engine.start(
            0.0,
            Animation::new(vec![TransitionDescriptor::new(Property::Rotate, 0.0, 360.0)
                .duration_ms(1_000.0)
                .looping()]),
        );

        for frame in 1..50 {
            assert!(engine.tick(frame as f64 * 1_000.0));
        }
        assert_eq!(engine.active_tracks(), 1);

        drop(handle);
        assert!(engine.is_idle());
        assert!(!engine.tick(60_000.0));
    }

    #[test]
    fn dropped_handle_stops_frames() {
        let engine = AnimationEngine::new();
        let (frames, sink) = recorder();
        let handle = engine.start(0.0, Animation::new(vec![fade(1_000.0)]).on_frame(sink));

        engine.tick(100.0);
        drop(handle);
        engine.tick(200.0);

        assert_eq!(frames.borrow().len(), 2);
    }

    #[test]
    fn waker_fires_when_idle_engine_gains_work() {
        let engine = AnimationEngine::new();
        let wakes = Rc::new(Cell::new(0));
        {
            let wakes = wakes.clone();
            engine.set_waker(move || wakes.set(wakes.get() + 1));
        }

        let first = engine.start(0.0, Animation::new(vec![fade(100.0)]));
        let second = engine.start(0.0, Animation::new(vec![fade(100.0)]));
        assert_eq!(wakes.get(), 1);

        engine.tick(500.0);
        let third = engine.start(500.0, Animation::new(vec![fade(100.0)]));
        assert_eq!(wakes.get(), 2);
        drop((first, second, third));
    }

    #[test]
    fn completion_callback_may_start_new_animation() {
        let engine = AnimationEngine::new();
        let follow_up: Rc<RefCell<Option<AnimationHandle>>> = Rc::new(RefCell::new(None));

        let _handle = {
            let engine_for_callback = engine.clone();
            let follow_up = follow_up.clone();
            engine.start(
                0.0,
                Animation::new(vec![fade(50.0)]).on_complete(move || {
                    *follow_up.borrow_mut() =
                        Some(engine_for_callback.start(50.0, Animation::new(vec![fade(50.0)])));
                }),
            )
        };

        engine.tick(60.0);

        assert!(follow_up.borrow().is_some());
        assert_eq!(engine.active_tracks(), 1);
    }

    #[test]
    fn staggered_siblings_start_in_index_order() {
        let engine = AnimationEngine::new();
        let stagger = Stagger::new(0.0, 200.0);
        let template = [fade(1_000.0)];
        let starts: Rc<RefCell<Vec<(usize, f64)>>> = Rc::new(RefCell::new(Vec::new()));

        let handles: Vec<AnimationHandle> = (0..5)
            .map(|index| {
                let starts = starts.clone();
                let recorded = Cell::new(false);
                engine.start(
                    0.0,
                    Animation::new(stagger.apply(index, &template)).on_frame(move |style| {
                        if !recorded.get() && style.get(Property::Opacity).is_some_and(|v| v > 0.0) {
                            recorded.set(true);
                            starts.borrow_mut().push((index, 0.0));
                        }
                    }),
                )
            })
            .collect();

        for frame in 1..=100 {
            let now = frame as f64 * 10.0;
            let before = starts.borrow().len();
            engine.tick(now);
            for entry in starts.borrow_mut().iter_mut().skip(before) {
                entry.1 = now;
            }
        }

        let starts = starts.borrow();
        assert_eq!(starts.len(), 5);
        for pair in starts.windows(2) {
            assert!(pair[1].0 > pair[0].0, "siblings revealed out of order: {starts:?}");
            assert!(pair[1].1 >= pair[0].1);
        }
        drop(handles);
    }
}
