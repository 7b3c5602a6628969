use yew::prelude::*;

use super::{
    motion::Animated,
    sections::{GlassButton, GlassVariant, ImageWithFallback},
};
use crate::{
    choreography::modal,
    modal::{ModalPhase, ModalState},
};

const CHALLENGE_COPY: &str = "The primary challenge was creating a seamless user experience while maintaining high performance standards. Our solution involved implementing cutting-edge technologies and design patterns that ensure both aesthetic appeal and functional excellence.";

#[derive(Properties, PartialEq)]
pub struct ProjectModalProps {
    pub state: ModalState,
    pub on_close: Callback<()>,
    pub on_exit_finished: Callback<()>,
}

fn project_link(href: Option<&str>, label: &'static str, variant: GlassVariant) -> Html {
    let button = html! {
        <GlassButton variant={variant} class={classes!("modal-link")}>{label}</GlassButton>
    };
    match href {
        Some(href) => html! {
            <a href={href.to_string()} target="_blank" rel="noopener noreferrer">{button}</a>
        },
        None => button,
    }
}

/// Detail overlay. Stays mounted through the exit animation and reports
/// back once the panel has finished leaving.
#[function_component(ProjectModal)]
pub fn project_modal(props: &ProjectModalProps) -> Html {
    let set = use_memo((), |_| modal::transitions());

    let Some(project) = props.state.selected().filter(|_| props.state.is_rendered()) else {
        return html! {};
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let (overlay, panel, on_complete) = if props.state.phase() == ModalPhase::Open {
        (set.get(modal::OVERLAY).to_vec(), set.get(modal::PANEL).to_vec(), None)
    } else {
        (
            modal::overlay_exit(),
            modal::panel_exit(),
            Some(props.on_exit_finished.clone()),
        )
    };

    html! {
        <div class="modal-root" role="dialog" aria-modal="true" aria-label={project.title.clone()}>
            <Animated class={classes!("modal-backdrop")} transitions={overlay} onclick={close.clone()} />

            <Animated
                class={classes!("modal-panel")}
                transitions={panel}
                on_complete={on_complete}
            >
                <button class="modal-close" type="button" aria-label="Close project details" onclick={close}>
                    {"✕"}
                </button>

                <div class="modal-media">
                    <ImageWithFallback
                        class={classes!("modal-image")}
                        src={project.image.clone()}
                        alt={project.title.clone()}
                    />
                    <div class="modal-media-shade"></div>
                </div>

                <div class="modal-content">
                    <Animated class={classes!("modal-heading")} transitions={set.get(modal::HEADING).to_vec()}>
                        <span class="project-category">{project.category.clone()}</span>
                        <h2>{project.title.clone()}</h2>
                    </Animated>

                    <Animated class={classes!("modal-details")} transitions={set.get(modal::DETAILS).to_vec()}>
                        <div class="modal-story">
                            <h3>{"Project Overview"}</h3>
                            <p>{project.overview().into_owned()}</p>
                            <h3>{"Challenge & Solution"}</h3>
                            <p>{CHALLENGE_COPY}</p>
                        </div>

                        <div class="modal-facts">
                            <h3>{"Technologies"}</h3>
                            <div class="tech-list">
                                { for project.technologies().into_iter().map(|tech| html! {
                                    <span key={tech} class="tech-chip">{tech}</span>
                                }) }
                            </div>

                            <h3>{"Project Links"}</h3>
                            <div class="modal-links">
                                {project_link(project.live_url.as_deref(), "View Live Site", GlassVariant::Primary)}
                                {project_link(project.github_url.as_deref(), "View Source", GlassVariant::Secondary)}
                            </div>
                        </div>
                    </Animated>
                </div>
            </Animated>
        </div>
    }
}
