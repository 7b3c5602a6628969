use yew::prelude::*;

use super::motion::{use_motion, use_mounted, use_visibility, Animated};
use crate::{
    catalog::{Catalog, Project},
    choreography::{about, hero, navigation, portfolio},
    scroll::NavChrome,
    site::Section,
    telemetry::{log_event, LogLevel},
    theme::Theme,
};

const IMAGE_PLACEHOLDER: &str = "data:image/svg+xml;utf8,%3Csvg xmlns='http://www.w3.org/2000/svg' width='88' height='88' viewBox='0 0 88 88' fill='none' stroke='%23999' stroke-width='3.7'%3E%3Crect x='16' y='16' width='56' height='56' rx='6' opacity='.3'/%3E%3Cpath d='m16 58 16-18 32 32' opacity='.3'/%3E%3Ccircle cx='53' cy='35' r='7' opacity='.3'/%3E%3C/svg%3E";

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum GlassVariant {
    #[default]
    Primary,
    Secondary,
}

#[derive(Properties, PartialEq)]
pub struct GlassButtonProps {
    #[prop_or_default]
    pub variant: GlassVariant,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    #[prop_or(AttrValue::Static("button"))]
    pub kind: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(GlassButton)]
pub fn glass_button(props: &GlassButtonProps) -> Html {
    let variant = match props.variant {
        GlassVariant::Primary => "glass-primary",
        GlassVariant::Secondary => "glass-secondary",
    };

    html! {
        <button
            type={props.kind.clone()}
            class={classes!("glass-button", variant, props.class.clone())}
            disabled={props.disabled}
            onclick={props.onclick.clone()}
        >
            <span class="glass-liquid" aria-hidden="true"></span>
            <span class="glass-shine" aria-hidden="true"></span>
            <span class="glass-label">{props.children.clone()}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct ImageProps {
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ImageWithFallback)]
pub fn image_with_fallback(props: &ImageProps) -> Html {
    let failed = use_state_eq(|| false);

    let onerror = {
        let failed = failed.clone();
        let src = props.src.clone();
        Callback::from(move |_: Event| {
            log_event(
                LogLevel::Info,
                "image_fallback",
                serde_json::json!({ "src": src.as_str() }),
            );
            failed.set(true);
        })
    };

    if *failed {
        return html! {
            <div class={classes!("image-fallback", props.class.clone())}>
                <img src={IMAGE_PLACEHOLDER} alt="Error loading image" data-original-url={props.src.clone()} />
            </div>
        };
    }

    html! {
        <img
            class={props.class.clone()}
            src={props.src.clone()}
            alt={props.alt.clone()}
            loading="lazy"
            onerror={onerror}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub theme: Theme,
    pub on_toggle_theme: Callback<()>,
    pub on_navigate: Callback<Section>,
}

#[function_component(Navigation)]
pub fn navigation_bar(props: &NavigationProps) -> Html {
    let motion = use_motion();
    let policy = motion.config.nav_policy();
    let chrome = use_state_eq(|| policy.chrome(motion.scroll.offset()));
    // The bar starts parked off-screen and only animates after its first
    // reveal.
    let revealed = use_state_eq(|| false);
    let items = use_memo((), |_| navigation::transitions(Section::ALL.len()));

    {
        let chrome = chrome.clone();
        let revealed = revealed.clone();
        let scroll = motion.scroll.clone();
        use_effect_with((), move |_| {
            let subscription = scroll.subscribe(move |offset| {
                let next: NavChrome = policy.chrome(*offset);
                if next.visible {
                    revealed.set(true);
                }
                chrome.set(next);
            });
            move || drop(subscription)
        });
    }

    let slide = navigation::slide(!*revealed || chrome.visible);
    let chrome_vars = format!(
        "--nav-opacity: {:.3}; --nav-blur: {:.2}px;",
        chrome.opacity, chrome.blur_px
    );

    let on_toggle = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };
    let on_contact = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Section::Contact))
    };

    html! {
        <Animated
            tag="nav"
            class={classes!("site-nav")}
            transitions={slide}
            active={*revealed}
            style={AttrValue::from(chrome_vars)}
        >
            <div class="nav-inner">
                <div class="nav-logo">{"CREATIVE"}</div>
                <div class="nav-items">
                    { for Section::ALL.iter().enumerate().map(|(index, section)| {
                        let section = *section;
                        let on_navigate = props.on_navigate.clone();
                        html! {
                            <Animated
                                tag="button"
                                class={classes!("nav-item")}
                                transitions={items.item(navigation::ITEM, index).to_vec()}
                                active={*revealed}
                                onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(section))}
                            >
                                {section.nav_label()}
                            </Animated>
                        }
                    }) }
                </div>
                <div class="nav-actions">
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={props.theme.toggle_label()}
                        onclick={on_toggle}
                    >
                        <span aria-hidden="true">{props.theme.icon()}</span>
                    </button>
                    <GlassButton onclick={on_contact}>{"GET IN TOUCH"}</GlassButton>
                </div>
            </div>
        </Animated>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_navigate: Callback<Section>,
}

#[function_component(Hero)]
pub fn hero_section(props: &HeroProps) -> Html {
    let mounted = use_mounted();
    let set = use_memo((), |_| hero::transitions());
    let item = |name: &str| set.get(name).to_vec();

    let jump = |section: Section| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(section))
    };

    html! {
        <section id={Section::Hero.anchor()} class="hero">
            <Animated class={classes!("hero-backdrop")} transitions={item(hero::BACKDROP)} active={mounted} />
            <Animated class={classes!("hero-glow")} transitions={item(hero::GLOW)} active={mounted} />

            <div class="hero-content">
                <Animated tag="h1" class={classes!("hero-title")} transitions={item(hero::TITLE)} active={mounted}>
                    {"CREATIVE"}
                </Animated>
                <Animated tag="h2" class={classes!("hero-subtitle")} transitions={item(hero::SUBTITLE)} active={mounted}>
                    {"PORTFOLIO"}
                </Animated>
                <Animated tag="p" class={classes!("hero-tagline")} transitions={item(hero::TAGLINE)} active={mounted}>
                    {"Crafting digital experiences that blur the line between imagination and reality"}
                </Animated>
                <Animated class={classes!("hero-actions")} transitions={item(hero::ACTIONS)} active={mounted}>
                    <GlassButton onclick={jump(Section::Portfolio)}>{"VIEW MY WORK"}</GlassButton>
                    <GlassButton variant={GlassVariant::Secondary} onclick={jump(Section::Contact)}>
                        {"GET IN TOUCH"}
                    </GlassButton>
                </Animated>
            </div>

            <Animated class={classes!("scroll-indicator")} transitions={item(hero::INDICATOR)} active={mounted}>
                <Animated class={classes!("scroll-ring")} transitions={item(hero::INDICATOR_RING)} active={mounted}>
                    <Animated class={classes!("scroll-dot")} transitions={item(hero::INDICATOR_DOT)} active={mounted} />
                </Animated>
            </Animated>
        </section>
    }
}

#[function_component(About)]
pub fn about_section() -> Html {
    let node = use_node_ref();
    let seen = use_visibility(node.clone(), Section::About.anchor()).is_seen();
    let set = use_memo((), |_| about::transitions());
    let item = |name: &str| set.get(name).to_vec();

    html! {
        <section id={Section::About.anchor()} class="about" ref={node}>
            <Animated class={classes!("about-pattern")} transitions={item(about::PATTERN)} />

            <div class="about-grid">
                <Animated class={classes!("about-text")} transitions={item(about::TEXT_COLUMN)} active={seen}>
                    <Animated tag="h2" class={classes!("section-heading")} transitions={item(about::HEADING)} active={seen}>
                        {"ABOUT"}
                    </Animated>
                    <Animated class={classes!("about-body")} transitions={item(about::BODY)} active={seen}>
                        <p>{"I'm a creative professional passionate about crafting digital experiences that push the boundaries of what's possible."}</p>
                        <p>{"With a keen eye for detail and a love for minimalist design, I specialize in creating clean, impactful solutions that tell compelling stories."}</p>
                        <p>{"Every project is an opportunity to blend artistry with functionality, creating experiences that resonate on both emotional and practical levels."}</p>
                    </Animated>
                    <Animated class={classes!("about-skills")} transitions={item(about::SKILLS)} active={seen}>
                        { for about::SKILL_NAMES.iter().enumerate().map(|(index, skill)| html! {
                            <Animated
                                tag="span"
                                class={classes!("skill-chip")}
                                transitions={set.item(about::SKILL, index).to_vec()}
                                active={seen}
                            >
                                {*skill}
                            </Animated>
                        }) }
                    </Animated>
                </Animated>

                <Animated class={classes!("about-visual")} transitions={item(about::VISUAL)} active={seen}>
                    <div class="ring-stack">
                        { for (0..3).map(|index| html! {
                            <Animated
                                class={classes!("about-ring", format!("about-ring-{index}"))}
                                transitions={set.item(about::RING, index).to_vec()}
                            />
                        }) }
                        <Animated class={classes!("about-core")} transitions={item(about::CORE)} />
                    </div>
                </Animated>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct PortfolioProps {
    pub catalog: &'static Catalog,
    pub on_select: Callback<u32>,
}

#[function_component(Portfolio)]
pub fn portfolio_section(props: &PortfolioProps) -> Html {
    let node = use_node_ref();
    let seen = use_visibility(node.clone(), Section::Portfolio.anchor()).is_seen();
    let catalog: &'static Catalog = props.catalog;
    let projects = catalog.projects();
    let set = use_memo(projects.len(), |count| portfolio::transitions(*count));
    let item = |name: &str| set.get(name).to_vec();

    html! {
        <section id={Section::Portfolio.anchor()} class="portfolio" ref={node}>
            <Animated class={classes!("portfolio-spotlight")} transitions={item(portfolio::SPOTLIGHT)} />

            <Animated class={classes!("portfolio-header")} transitions={item(portfolio::HEADER)} active={seen}>
                <h2 class="section-heading">{"PORTFOLIO"}</h2>
                <p class="section-lede">{"Selected works that showcase the intersection of creativity and technology"}</p>
            </Animated>

            <div class="portfolio-grid">
                { for projects.iter().enumerate().map(|(index, project)| html! {
                    <ProjectCard
                        key={project.id}
                        project={project}
                        transitions={set.item(portfolio::CARD, index).to_vec()}
                        active={seen}
                        on_select={props.on_select.clone()}
                    />
                }) }
            </div>

            <Animated class={classes!("portfolio-footer")} transitions={item(portfolio::FOOTER)} active={seen}>
                <GlassButton>{"VIEW ALL PROJECTS"}</GlassButton>
            </Animated>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: &'static Project,
    transitions: Vec<crate::transition::TransitionDescriptor>,
    active: bool,
    on_select: Callback<u32>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;
    let select = {
        let on_select = props.on_select.clone();
        let id = project.id;
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_select.emit(id);
        })
    };

    html! {
        <Animated
            class={classes!("project-card")}
            transitions={props.transitions.clone()}
            active={props.active}
            onclick={select.clone()}
        >
            <div class="project-media">
                <ImageWithFallback
                    class={classes!("project-image")}
                    src={project.image.clone()}
                    alt={project.title.clone()}
                />
                <div class="project-overlay">
                    <GlassButton onclick={select}>{"VIEW PROJECT"}</GlassButton>
                </div>
            </div>
            <div class="project-copy">
                <span class="project-category">{project.category.clone()}</span>
                <h3 class="project-title">{project.title.clone()}</h3>
                <p class="project-description">{project.description.clone()}</p>
            </div>
        </Animated>
    }
}
