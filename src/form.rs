//! Contact form state machine: Idle → Submitting → Submitted → Idle.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use thiserror::Error;

use crate::{
    signal::{Subscribers, Subscription},
    telemetry::{log_event, LogLevel},
    timer::{TimerDriver, TimerHandle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if let Some(missing) = Field::ALL
            .iter()
            .copied()
            .find(|field| self.get(*field).trim().is_empty())
        {
            return Err(FormError::MissingField(missing));
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }

        Ok(())
    }
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

impl FormPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }

    pub fn accepts_input(self) -> bool {
        self == Self::Idle
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    MissingField(Field),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("form is {} and cannot accept input", .0.as_str())]
    Busy(FormPhase),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormTimings {
    pub submit_latency: Duration,
    pub success_display: Duration,
}

impl Default for FormTimings {
    fn default() -> Self {
        Self {
            submit_latency: Duration::from_millis(2_000),
            success_display: Duration::from_millis(3_000),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub phase: FormPhase,
    pub fields: ContactFields,
}

struct FormInner {
    fields: ContactFields,
    phase: FormPhase,
    pending: Option<TimerHandle>,
    timers: Rc<dyn TimerDriver>,
    timings: FormTimings,
    changes: Subscribers<FormSnapshot>,
}

impl FormInner {
    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            phase: self.phase,
            fields: self.fields.clone(),
        }
    }
}

pub struct ContactForm {
    inner: Rc<RefCell<FormInner>>,
}

impl ContactForm {
    pub fn new(timers: Rc<dyn TimerDriver>, timings: FormTimings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FormInner {
                fields: ContactFields::default(),
                phase: FormPhase::Idle,
                pending: None,
                timers,
                timings,
                changes: Subscribers::new(),
            })),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.inner.borrow().phase
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.inner.borrow().snapshot()
    }

    pub fn can_submit(&self) -> bool {
        self.phase().accepts_input()
    }

    pub fn subscribe(&self, listener: impl Fn(&FormSnapshot) + 'static) -> Subscription {
        self.inner.borrow().changes.subscribe(listener)
    }

    pub fn edit(&self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.phase.accepts_input() {
                return Err(FormError::Busy(inner.phase));
            }
            inner.fields.set(field, value.into());
        }
        self.announce();
        Ok(())
    }

    pub fn submit(&self) -> Result<(), FormError> {
        let (timers, latency) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.phase.accepts_input() {
                return Err(FormError::Busy(inner.phase));
            }
            if let Err(error) = inner.fields.validate() {
                log_event(
                    LogLevel::Debug,
                    "form_rejected",
                    serde_json::json!({ "reason": error.to_string() }),
                );
                return Err(error);
            }
            inner.phase = FormPhase::Submitting;
            (Rc::clone(&inner.timers), inner.timings.submit_latency)
        };

        let handle = timers.schedule(latency, elapsed(Rc::downgrade(&self.inner), FormPhase::Submitting));
        self.inner.borrow_mut().pending = Some(handle);
        log_phase(FormPhase::Submitting);
        self.announce();
        Ok(())
    }

    fn announce(&self) {
        announce(&self.inner);
    }
}

fn announce(inner: &Rc<RefCell<FormInner>>) {
    let (changes, snapshot) = {
        let inner = inner.borrow();
        (inner.changes.clone(), inner.snapshot())
    };
    changes.notify(&snapshot);
}

fn log_phase(phase: FormPhase) {
    log_event(
        LogLevel::Info,
        "form_phase",
        serde_json::json!({ "phase": phase.as_str() }),
    );
}

fn elapsed(form: Weak<RefCell<FormInner>>, expected: FormPhase) -> Box<dyn FnOnce()> {
    Box::new(move || {
        if let Some(inner) = form.upgrade() {
            advance(&inner, expected);
        }
    })
}

fn advance(form: &Rc<RefCell<FormInner>>, expected: FormPhase) {
    let next_delay = {
        let mut inner = form.borrow_mut();
        if inner.phase != expected {
            return;
        }
        if let Some(fired) = inner.pending.take() {
            fired.disarm();
        }

        match expected {
            FormPhase::Submitting => {
                inner.phase = FormPhase::Submitted;
                Some((Rc::clone(&inner.timers), inner.timings.success_display))
            }
            FormPhase::Submitted => {
                inner.phase = FormPhase::Idle;
                inner.fields = ContactFields::default();
                None
            }
            FormPhase::Idle => return,
        }
    };

    if let Some((timers, delay)) = next_delay {
        let handle = timers.schedule(delay, elapsed(Rc::downgrade(form), FormPhase::Submitted));
        form.borrow_mut().pending = Some(handle);
    }

    log_phase(form.borrow().phase);
    announce(form);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::timer::TokioTimers;
    use std::cell::Cell;
    use tokio::task::LocalSet;

    fn form() -> ContactForm {
        ContactForm::new(Rc::new(TokioTimers), FormTimings::default())
    }

    fn fill(form: &ContactForm, name: &str, email: &str, subject: &str, message: &str) {
        for (field, value) in [
            (Field::Name, name),
            (Field::Email, email),
            (Field::Subject, subject),
            (Field::Message, message),
        ] {
            form.edit(field, value).expect("idle form accepts edits");
        }
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[test]
    fn email_shape_check() {
        for valid in ["a@b.com", "first.last@studio.example.org"] {
            assert!(is_plausible_email(valid), "{valid} should pass");
        }
        for invalid in ["", "a", "a@", "@b.com", "a@b", "a@b.", "a@.com", "a b@c.com", "a@b@c.com"] {
            assert!(!is_plausible_email(invalid), "{invalid} should fail");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn any_empty_field_blocks_submission() {
        LocalSet::new()
            .run_until(async {
                for blank in Field::ALL {
                    let form = form();
                    fill(&form, "A", "a@b.com", "S", "M");
                    form.edit(blank, "   ").expect("idle form accepts edits");

                    assert_eq!(form.submit(), Err(FormError::MissingField(blank)));
                    assert_eq!(form.phase(), FormPhase::Idle);
                    assert!(form.can_submit());
                }
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_email_blocks_submission() {
        LocalSet::new()
            .run_until(async {
                let form = form();
                fill(&form, "A", "not-an-email", "S", "M");

                assert_eq!(form.submit(), Err(FormError::InvalidEmail));
                assert_eq!(form.phase(), FormPhase::Idle);
                form.edit(Field::Email, "a@b.com").expect("form stays editable");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn submission_runs_through_every_phase() {
        LocalSet::new()
            .run_until(async {
                let form = form();
                fill(&form, "A", "a@b.com", "S", "M");

                form.submit().expect("valid form submits");
                assert_eq!(form.phase(), FormPhase::Submitting);
                assert!(!form.can_submit());

                sleep_ms(1_999).await;
                assert_eq!(form.phase(), FormPhase::Submitting);

                sleep_ms(2).await;
                assert_eq!(form.phase(), FormPhase::Submitted);
                assert_eq!(form.snapshot().fields.email, "a@b.com");

                sleep_ms(2_998).await;
                assert_eq!(form.phase(), FormPhase::Submitted);

                sleep_ms(2).await;
                assert_eq!(form.phase(), FormPhase::Idle);
                assert_eq!(form.snapshot().fields, ContactFields::default());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn busy_form_rejects_edits_and_duplicate_submits() {
        LocalSet::new()
            .run_until(async {
                let form = form();
                fill(&form, "A", "a@b.com", "S", "M");
                form.submit().expect("valid form submits");

                assert_eq!(form.submit(), Err(FormError::Busy(FormPhase::Submitting)));
                assert_eq!(
                    form.edit(Field::Name, "B"),
                    Err(FormError::Busy(FormPhase::Submitting))
                );

                sleep_ms(2_001).await;
                assert_eq!(form.submit(), Err(FormError::Busy(FormPhase::Submitted)));
                assert_eq!(form.snapshot().fields.name, "A");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_each_phase() {
        LocalSet::new()
            .run_until(async {
                let form = form();
                fill(&form, "A", "a@b.com", "S", "M");
                let phases = Rc::new(RefCell::new(Vec::new()));
                let _subscription = {
                    let phases = phases.clone();
                    form.subscribe(move |snapshot| phases.borrow_mut().push(snapshot.phase))
                };

                form.submit().expect("valid form submits");
                sleep_ms(6_000).await;

                assert_eq!(
                    *phases.borrow(),
                    vec![FormPhase::Submitting, FormPhase::Submitted, FormPhase::Idle]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_form_mid_delay_cancels_timers() {
        LocalSet::new()
            .run_until(async {
                let form = form();
                let notified = Rc::new(Cell::new(0));
                fill(&form, "A", "a@b.com", "S", "M");
                let subscription = {
                    let notified = notified.clone();
                    form.subscribe(move |_| notified.set(notified.get() + 1))
                };

                form.submit().expect("valid form submits");
                let after_submit = notified.get();
                drop(form);
                sleep_ms(10_000).await;

                assert_eq!(notified.get(), after_submit);
                drop(subscription);
            })
            .await;
    }
}
