use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{
    motion::{use_motion, use_visibility, Animated},
    sections::{GlassButton, GlassVariant},
};
use crate::{
    choreography::{contact, contact_form},
    form::{ContactForm, Field, FormPhase, FormSnapshot},
    site::{ContactView, Section},
    timer::BrowserTimers,
};

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub view: ContactView,
    pub on_show_form: Callback<()>,
    pub on_show_info: Callback<()>,
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let node = use_node_ref();
    let seen = use_visibility(node.clone(), Section::Contact.anchor()).is_seen();
    let set = use_memo((), |_| contact::transitions());
    let item = |name: &str| set.get(name).to_vec();

    let body = match props.view {
        ContactView::Info => {
            let show_form = props.on_show_form.clone();
            html! {
                <>
                    <Animated tag="p" class={classes!("contact-copy")} transitions={item(contact::COPY)} active={seen}>
                        {"Ready to bring your vision to life? Let's collaborate and create something extraordinary together."}
                    </Animated>
                    <Animated class={classes!("contact-actions")} transitions={item(contact::ACTIONS)} active={seen}>
                        <GlassButton onclick={Callback::from(move |_: MouseEvent| show_form.emit(()))}>
                            {"START A PROJECT"}
                        </GlassButton>
                        <GlassButton variant={GlassVariant::Secondary}>{"DOWNLOAD RESUME"}</GlassButton>
                    </Animated>
                </>
            }
        }
        ContactView::Form => {
            let show_info = props.on_show_info.clone();
            html! {
                <Animated class={classes!("contact-form-panel")} transitions={item(contact::FORM_PANEL)}>
                    <ContactFormView />
                    <Animated class={classes!("contact-back")} transitions={item(contact::BACK)}>
                        <GlassButton
                            variant={GlassVariant::Secondary}
                            onclick={Callback::from(move |_: MouseEvent| show_info.emit(()))}
                        >
                            {"BACK TO CONTACT INFO"}
                        </GlassButton>
                    </Animated>
                </Animated>
            }
        }
    };

    html! {
        <section id={Section::Contact.anchor()} class="contact" ref={node}>
            <Animated class={classes!("contact-grid")} transitions={item(contact::GRID)} />

            <div class="contact-inner">
                <Animated class={classes!("contact-headline")} transitions={item(contact::HEADLINE)} active={seen}>
                    <h2 class="section-heading">{"LET'S CREATE"}</h2>
                    <h3 class="contact-subheading">{"SOMETHING AMAZING"}</h3>
                </Animated>

                {body}

                <Animated class={classes!("contact-info")} transitions={item(contact::INFO_ROW)} active={seen}>
                    { for contact::INFO.iter().enumerate().map(|(index, (label, value))| html! {
                        <Animated
                            class={classes!("info-card")}
                            transitions={set.item(contact::INFO_CARD, index).to_vec()}
                            active={seen}
                        >
                            <div class="info-label">{*label}</div>
                            <div class="info-value">{*value}</div>
                        </Animated>
                    }) }
                </Animated>

                <Animated class={classes!("contact-social")} transitions={item(contact::SOCIAL_ROW)} active={seen}>
                    { for contact::SOCIAL.iter().enumerate().map(|(index, name)| html! {
                        <Animated
                            tag="a"
                            class={classes!("social-link")}
                            transitions={set.item(contact::SOCIAL_LINK, index).to_vec()}
                            active={seen}
                        >
                            {*name}
                        </Animated>
                    }) }
                </Animated>
            </div>

            <Animated class={classes!("contact-footer")} transitions={item(contact::FOOTER)} active={seen}>
                <p>{"© 2025 Creative Portfolio. All rights reserved."}</p>
            </Animated>
        </section>
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Your name",
        Field::Email => "your.email@example.com",
        Field::Subject => "Project collaboration",
        Field::Message => "Tell me about your project and how we can work together...",
    }
}

/// The message form. Its state machine lives as long as the component, so
/// leaving the form view mid-submission cancels the pending delays.
#[function_component(ContactFormView)]
pub fn contact_form_view() -> Html {
    let motion = use_motion();
    let timings = motion.config.form_timings();
    let form = use_memo((), move |_| ContactForm::new(Rc::new(BrowserTimers), timings));
    let snapshot = use_state(|| form.snapshot());
    let error = use_state(|| None::<String>);
    let set = use_memo((), |_| contact_form::transitions());

    {
        let form = form.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let subscription = form.subscribe(move |next: &FormSnapshot| snapshot.set(next.clone()));
            move || drop(subscription)
        });
    }

    let edit = |field: Field| {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |event: InputEvent| {
            let value = match field {
                Field::Message => event.target_unchecked_into::<HtmlTextAreaElement>().value(),
                _ => event.target_unchecked_into::<HtmlInputElement>().value(),
            };
            if form.edit(field, value).is_ok() {
                error.set(None);
            }
        })
    };

    let onsubmit = {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match form.submit() {
                Ok(()) => error.set(None),
                Err(rejected) => error.set(Some(rejected.to_string())),
            }
        })
    };

    if form.phase() == FormPhase::Submitted {
        return html! {
            <Animated class={classes!("form-success")} transitions={set.get(contact_form::SUCCESS).to_vec()}>
                <Animated class={classes!("form-check")} transitions={set.get(contact_form::CHECK).to_vec()}>
                    <span aria-hidden="true">{"✓"}</span>
                </Animated>
                <h3>{"Message Sent!"}</h3>
                <p>{"Thank you for reaching out. I'll get back to you soon."}</p>
            </Animated>
        };
    }

    let busy = !form.can_submit();
    let field_view = |index: usize, field: Field| {
        let id = field.as_str();
        let value = snapshot.fields.get(field).to_string();
        let control = match field {
            Field::Message => html! {
                <textarea
                    id={id}
                    name={id}
                    rows="6"
                    required=true
                    disabled={busy}
                    placeholder={placeholder(field)}
                    value={value}
                    oninput={edit(field)}
                />
            },
            _ => html! {
                <input
                    id={id}
                    name={id}
                    type={if field == Field::Email { "email" } else { "text" }}
                    required=true
                    disabled={busy}
                    placeholder={placeholder(field)}
                    value={value}
                    oninput={edit(field)}
                />
            },
        };

        html! {
            <Animated
                class={classes!("form-field", format!("form-field-{id}"))}
                transitions={set.item(contact_form::FIELD, index).to_vec()}
            >
                <label for={id}>{format!("{} *", field.label())}</label>
                {control}
            </Animated>
        }
    };

    html! {
        <Animated class={classes!("contact-form")} transitions={set.get(contact_form::FORM).to_vec()}>
            <form class="contact-form-fields" onsubmit={onsubmit} novalidate=true>
                <div class="form-row">
                    {field_view(0, Field::Name)}
                    {field_view(1, Field::Email)}
                </div>
                {field_view(2, Field::Subject)}
                {field_view(3, Field::Message)}

                if let Some(message) = (*error).clone() {
                    <p class="form-error" role="alert">{message}</p>
                }

                <Animated class={classes!("form-submit")} transitions={set.get(contact_form::SUBMIT).to_vec()}>
                    <GlassButton
                        kind="submit"
                        disabled={busy}
                        class={classes!(busy.then_some("is-busy"))}
                    >
                        if form.phase() == FormPhase::Submitting {
                            <Animated class={classes!("form-spinner")} transitions={set.get(contact_form::SPINNER).to_vec()} />
                            {"SENDING..."}
                        } else {
                            {"SEND MESSAGE"}
                        }
                    </GlassButton>
                </Animated>
            </form>
        </Animated>
    }
}
