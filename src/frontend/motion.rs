use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::{Array, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};
use yew::prelude::*;

use crate::{
    config::SiteConfig,
    engine::{Animation, AnimationEngine, AnimationHandle},
    scroll::ScrollTracker,
    telemetry::{log_event, LogLevel},
    transition::{Style, TransitionDescriptor},
    visibility::{Region, Viewport, VisibilityObserver, VisibilityState},
};

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

fn viewport() -> Viewport {
    let read = |value: Option<JsValue>| value.and_then(|v| v.as_f64()).unwrap_or(0.0);
    let window = window();
    Viewport {
        width: read(window.as_ref().and_then(|w| w.inner_width().ok())),
        height: read(window.as_ref().and_then(|w| w.inner_height().ok())),
    }
}

struct FrameLoop {
    engine: AnimationEngine,
    pending: RefCell<Option<AnimationFrame>>,
}

impl FrameLoop {
    fn install(engine: AnimationEngine) -> Rc<Self> {
        let frames = Rc::new(Self {
            engine: engine.clone(),
            pending: RefCell::new(None),
        });

        let waker: Weak<Self> = Rc::downgrade(&frames);
        engine.set_waker(move || {
            if let Some(frames) = waker.upgrade() {
                frames.request();
            }
        });

        frames
    }

    fn request(self: &Rc<Self>) {
        if self.pending.borrow().is_some() {
            return;
        }

        let frames = Rc::downgrade(self);
        let handle = request_animation_frame(move |timestamp| {
            if let Some(frames) = frames.upgrade() {
                frames.on_frame(timestamp);
            }
        });
        *self.pending.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        self.pending.borrow_mut().take();
        if self.engine.tick(timestamp) {
            self.request();
        }
    }
}

#[derive(Clone)]
pub struct Motion {
    pub engine: AnimationEngine,
    pub scroll: ScrollTracker,
    pub config: Rc<SiteConfig>,
    frames: Rc<FrameLoop>,
}

impl Motion {
    pub fn new(config: SiteConfig) -> Self {
        let engine = AnimationEngine::new();
        let frames = FrameLoop::install(engine.clone());
        Self {
            engine,
            scroll: ScrollTracker::new(),
            config: Rc::new(config),
            frames,
        }
    }
}

impl PartialEq for Motion {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames)
    }
}

#[hook]
pub fn use_motion() -> Motion {
    use_context::<Motion>().unwrap_or_else(|| Motion::new(SiteConfig::default()))
}

fn paint(element: &HtmlElement, style: &Style) {
    let css = element.style();
    for (name, value) in style.declarations() {
        let _ = css.set_property(name, &value);
    }
}

#[derive(Properties, PartialEq)]
pub struct AnimatedProps {
    pub transitions: Vec<TransitionDescriptor>,
    #[prop_or(true)]
    pub active: bool,
    #[prop_or(AttrValue::Static("div"))]
    pub tag: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub style: Option<AttrValue>,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub on_complete: Option<Callback<()>>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Animated)]
pub fn animated(props: &AnimatedProps) -> Html {
    let motion = use_motion();
    let node = use_node_ref();
    let handle = use_mut_ref(|| None::<AnimationHandle>);

    {
        let engine = motion.engine.clone();
        let node = node.clone();
        let handle = handle.clone();
        let on_complete = props.on_complete.clone();
        use_effect_with(
            (props.active, props.transitions.clone()),
            move |(active, transitions)| {
                if *active && !transitions.is_empty() {
                    if let Some(element) = node.cast::<HtmlElement>() {
                        let animation = Animation::new(transitions.clone())
                            .on_frame(move |style| paint(&element, style))
                            .on_complete(move || {
                                if let Some(on_complete) = on_complete {
                                    on_complete.emit(());
                                }
                            });
                        let started = engine.start(now_ms(), animation);
                        *handle.borrow_mut() = Some(started);
                    }
                } else {
                    handle.borrow_mut().take();
                }

                move || {
                    handle.borrow_mut().take();
                }
            },
        );
    }

    let settled = if props.active {
        Style::target(&props.transitions)
    } else {
        Style::initial(&props.transitions)
    };
    let style = match props.style.as_ref() {
        Some(extra) => format!("{} {extra}", settled.to_css()),
        None => settled.to_css(),
    };

    html! {
        <@{props.tag.to_string()}
            ref={node}
            class={props.class.clone()}
            style={style}
            onclick={props.onclick.clone()}
        >
            {props.children.clone()}
        </@>
    }
}

fn intersection_supported() -> bool {
    window().is_some_and(|w| {
        Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    })
}

struct RevealWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealWatch {
    fn start(
        element: &Element,
        margin_px: f64,
        on_seen: Rc<dyn Fn(VisibilityState)>,
    ) -> Option<Self> {
        let latch = Rc::new(RefCell::new(VisibilityObserver::new(margin_px)));
        latch.borrow_mut().attach();

        let callback = {
            let latch = Rc::clone(&latch);
            let on_seen = Rc::clone(&on_seen);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    let viewport = viewport();
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let state = {
                            let mut latch = latch.borrow_mut();
                            let state = latch.report(entry.is_intersecting());
                            if state.is_seen() {
                                state
                            } else {
                                // Engines without `isIntersecting` report
                                // false; measure the entry instead.
                                let rect = entry.bounding_client_rect();
                                let region = Region::new(
                                    rect.top(),
                                    rect.left(),
                                    rect.width(),
                                    rect.height(),
                                );
                                latch.observe(region, viewport)
                            }
                        };
                        if state.is_seen() {
                            observer.disconnect();
                            on_seen(state);
                            return;
                        }
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&format!("{margin_px}px"));

        if !intersection_supported() {
            on_seen(latch.borrow_mut().degrade());
            return None;
        }

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(element);
                Some(Self {
                    observer,
                    _callback: callback,
                })
            }
            Err(_) => {
                on_seen(latch.borrow_mut().degrade());
                None
            }
        }
    }
}

impl Drop for RevealWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// One-shot reveal state for the element behind `node`. Without
/// intersection support the element counts as seen once mounted.
#[hook]
pub fn use_visibility(node: NodeRef, section: &'static str) -> VisibilityState {
    let motion = use_motion();
    let state = use_state_eq(VisibilityState::default);

    {
        let state = state.clone();
        let margin_px = motion.config.reveal_margin_px;
        use_effect_with(node, move |node| {
            let on_seen: Rc<dyn Fn(VisibilityState)> = Rc::new(move |seen: VisibilityState| {
                log_event(
                    LogLevel::Info,
                    "section_revealed",
                    serde_json::json!({ "section": section }),
                );
                state.set(seen);
            });
            let watch = node
                .cast::<Element>()
                .and_then(|element| RevealWatch::start(&element, margin_px, on_seen));

            move || drop(watch)
        });
    }

    *state
}

#[hook]
pub fn use_mounted() -> bool {
    let mounted = use_state_eq(|| false);
    {
        let mounted = mounted.clone();
        use_effect_with((), move |_| {
            mounted.set(true);
            || ()
        });
    }
    *mounted
}
