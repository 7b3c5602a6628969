mod contact;
mod motion;
mod project_modal;
mod sections;

use std::rc::Rc;

use gloo_events::EventListener;
use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

use crate::{
    catalog::catalog,
    config::SiteConfig,
    site::{Section, SiteAction, SiteState},
    telemetry::{log_event, set_min_level, LogLevel},
    theme::Theme,
};
use contact::ContactSection;
use motion::Motion;
use project_modal::ProjectModal;
use sections::{About, Hero, Navigation, Portfolio};

impl Reducible for SiteState {
    type Action = SiteAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).apply(action))
    }
}

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn apply_theme_with_transition(theme: Theme) {
    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    // The browser invokes the update callback asynchronously.
    let callback = Closure::once_into_js(move || apply_theme(theme));

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn scroll_to_section(section: Section) {
    let target = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(section.anchor()));

    let Some(target) = target else {
        log_event(
            LogLevel::Info,
            "scroll_target_missing",
            serde_json::json!({ "anchor": section.anchor() }),
        );
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let motion = use_memo(props.config.clone(), |config| Motion::new((**config).clone()));
    let state = use_reducer_eq(|| SiteState::new(catalog(), Theme::default()));

    {
        let current = state.theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    {
        let scroll = motion.scroll.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                scroll.on_scroll(window.scroll_y().unwrap_or(0.0));
                let target = window.clone();
                EventListener::new(&target, "scroll", move |_| {
                    scroll.on_scroll(window.scroll_y().unwrap_or(0.0));
                })
            });
            move || drop(listener)
        });
    }

    let on_toggle_theme = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            apply_theme_with_transition(state.theme.toggled());
            state.dispatch(SiteAction::ToggleTheme);
        })
    };

    let dispatch = |action: SiteAction| {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(action))
    };

    let on_select = {
        let state = state.clone();
        Callback::from(move |id: u32| state.dispatch(SiteAction::SelectProject(id)))
    };

    let navigate = Callback::from(scroll_to_section);

    html! {
        <ContextProvider<Motion> context={(*motion).clone()}>
            <div class={classes!("site", state.modal.is_rendered().then_some("modal-active"))}>
                <Navigation
                    theme={state.theme}
                    on_toggle_theme={on_toggle_theme}
                    on_navigate={navigate.clone()}
                />
                <main>
                    <Hero on_navigate={navigate} />
                    <About />
                    <Portfolio catalog={state.catalog()} on_select={on_select} />
                    <ContactSection
                        view={state.contact_view}
                        on_show_form={dispatch(SiteAction::ShowContactForm)}
                        on_show_info={dispatch(SiteAction::ShowContactInfo)}
                    />
                </main>
                <ProjectModal
                    state={state.modal}
                    on_close={dispatch(SiteAction::CloseModal)}
                    on_exit_finished={dispatch(SiteAction::ModalExitFinished)}
                />
            </div>
        </ContextProvider<Motion>>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point");

    let config = SiteConfig::from_lookup(|key| root.get_attribute(&format!("data-{key}")));
    set_min_level(config.log_level);
    log_event(
        LogLevel::Info,
        "site_start",
        serde_json::json!({
            "projects": catalog().projects().len(),
            "log_level": config.log_level.as_str(),
            "nav_threshold_px": config.nav_threshold_px,
        }),
    );

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
