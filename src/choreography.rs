use crate::transition::{Easing, Property, Stagger, TransitionDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ElementKey {
    name: &'static str,
    index: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionSet {
    entries: Vec<(ElementKey, Vec<TransitionDescriptor>)>,
}

impl TransitionSet {
    fn new() -> Self {
        Self::default()
    }

    fn with(self, name: &'static str, descriptors: Vec<TransitionDescriptor>) -> Self {
        self.with_item(name, 0, descriptors)
    }

    fn with_item(
        mut self,
        name: &'static str,
        index: usize,
        descriptors: Vec<TransitionDescriptor>,
    ) -> Self {
        self.entries.push((ElementKey { name, index }, descriptors));
        self
    }

    fn with_staggered(
        mut self,
        name: &'static str,
        count: usize,
        stagger: Stagger,
        template: Vec<TransitionDescriptor>,
    ) -> Self {
        for index in 0..count {
            self.entries
                .push((ElementKey { name, index }, stagger.apply(index, &template)));
        }
        self
    }

    pub fn item(&self, name: &str, index: usize) -> &[TransitionDescriptor] {
        self.entries
            .iter()
            .find(|(key, _)| key.name == name && key.index == index)
            .map(|(_, descriptors)| descriptors.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, name: &str) -> &[TransitionDescriptor] {
        self.item(name, 0)
    }
}

fn rise(distance: f64, duration_ms: f64, delay_ms: f64) -> Vec<TransitionDescriptor> {
    vec![
        TransitionDescriptor::new(Property::TranslateY, distance, 0.0)
            .duration_ms(duration_ms)
            .delay_ms(delay_ms)
            .easing(Easing::EaseOut),
        fade(duration_ms, delay_ms),
    ]
}

fn slide(distance: f64, duration_ms: f64, delay_ms: f64) -> Vec<TransitionDescriptor> {
    vec![
        TransitionDescriptor::new(Property::TranslateX, distance, 0.0)
            .duration_ms(duration_ms)
            .delay_ms(delay_ms)
            .easing(Easing::EaseOut),
        fade(duration_ms, delay_ms),
    ]
}

fn pop(duration_ms: f64, delay_ms: f64) -> Vec<TransitionDescriptor> {
    vec![
        TransitionDescriptor::new(Property::Scale, 0.0, 1.0)
            .duration_ms(duration_ms)
            .delay_ms(delay_ms)
            .easing(Easing::EaseOut),
        fade(duration_ms, delay_ms),
    ]
}

fn fade(duration_ms: f64, delay_ms: f64) -> TransitionDescriptor {
    TransitionDescriptor::new(Property::Opacity, 0.0, 1.0)
        .duration_ms(duration_ms)
        .delay_ms(delay_ms)
        .easing(Easing::EaseOut)
}

fn spin(duration_ms: f64, turn: f64) -> Vec<TransitionDescriptor> {
    vec![TransitionDescriptor::new(Property::Rotate, 0.0, turn)
        .duration_ms(duration_ms)
        .easing(Easing::Linear)
        .looping()]
}

fn drift(var: &'static str, distance: f64, cycle_ms: f64) -> Vec<TransitionDescriptor> {
    vec![TransitionDescriptor::new(Property::Var(var), 0.0, distance)
        .duration_ms(cycle_ms / 2.0)
        .easing(Easing::Linear)
        .yoyo()]
}

pub mod navigation {
    use super::*;

    pub const ITEM: &str = "nav-item";
    pub const HIDDEN_OFFSET_PX: f64 = -100.0;

    pub fn transitions(item_count: usize) -> TransitionSet {
        TransitionSet::new().with_staggered(
            ITEM,
            item_count,
            Stagger::new(0.0, 100.0),
            rise(-20.0, 300.0, 0.0),
        )
    }

    pub fn slide(visible: bool) -> Vec<TransitionDescriptor> {
        let (from, to) = if visible {
            (HIDDEN_OFFSET_PX, 0.0)
        } else {
            (0.0, HIDDEN_OFFSET_PX)
        };
        vec![TransitionDescriptor::new(Property::TranslateY, from, to)
            .duration_ms(300.0)
            .easing(Easing::EaseOut)]
    }
}

pub mod hero {
    use super::*;

    pub const BACKDROP: &str = "hero-backdrop";
    pub const GLOW: &str = "hero-glow";
    pub const TITLE: &str = "hero-title";
    pub const SUBTITLE: &str = "hero-subtitle";
    pub const TAGLINE: &str = "hero-tagline";
    pub const ACTIONS: &str = "hero-actions";
    pub const INDICATOR: &str = "hero-indicator";
    pub const INDICATOR_RING: &str = "hero-indicator-ring";
    pub const INDICATOR_DOT: &str = "hero-indicator-dot";

    pub fn transitions() -> TransitionSet {
        TransitionSet::new()
            .with(
                BACKDROP,
                vec![TransitionDescriptor::new(Property::Scale, 1.1, 1.0)
                    .duration_ms(2_000.0)
                    .easing(Easing::EaseOut)],
            )
            .with(
                GLOW,
                vec![TransitionDescriptor::new(Property::Var("--glow"), 0.05, 0.1)
                    .duration_ms(2_000.0)
                    .easing(Easing::EaseInOut)
                    .yoyo()],
            )
            .with(TITLE, rise(100.0, 1_200.0, 0.0))
            .with(SUBTITLE, rise(100.0, 1_200.0, 300.0))
            .with(TAGLINE, rise(50.0, 1_000.0, 600.0))
            .with(ACTIONS, rise(50.0, 1_000.0, 900.0))
            .with(INDICATOR, vec![fade(300.0, 2_000.0)])
            .with(
                INDICATOR_RING,
                vec![TransitionDescriptor::new(Property::Var("--ring-alpha"), 0.3, 0.8)
                    .duration_ms(1_000.0)
                    .easing(Easing::EaseInOut)
                    .yoyo()],
            )
            .with(
                INDICATOR_DOT,
                vec![TransitionDescriptor::new(Property::TranslateY, 0.0, 12.0)
                    .duration_ms(750.0)
                    .easing(Easing::EaseInOut)
                    .yoyo()],
            )
    }
}

pub mod about {
    use super::*;

    pub const PATTERN: &str = "about-pattern";
    pub const TEXT_COLUMN: &str = "about-text";
    pub const HEADING: &str = "about-heading";
    pub const BODY: &str = "about-body";
    pub const SKILLS: &str = "about-skills";
    pub const SKILL: &str = "about-skill";
    pub const VISUAL: &str = "about-visual";
    pub const RING: &str = "about-ring";
    pub const CORE: &str = "about-core";

    pub const SKILL_NAMES: [&str; 4] = ["Design", "Development", "Strategy", "Innovation"];

    pub fn transitions() -> TransitionSet {
        TransitionSet::new()
            .with(PATTERN, drift("--drift", 50.0, 20_000.0))
            .with(TEXT_COLUMN, slide(-100.0, 1_000.0, 0.0))
            .with(HEADING, rise(50.0, 1_000.0, 200.0))
            .with(BODY, rise(50.0, 1_000.0, 400.0))
            .with(SKILLS, rise(50.0, 1_000.0, 600.0))
            .with_staggered(
                SKILL,
                SKILL_NAMES.len(),
                Stagger::new(800.0, 100.0),
                pop(500.0, 0.0),
            )
            .with(VISUAL, slide(100.0, 1_000.0, 300.0))
            .with_item(RING, 0, ring(0))
            .with_item(RING, 1, ring(1))
            .with_item(RING, 2, ring(2))
            .with(
                CORE,
                vec![
                    TransitionDescriptor::new(Property::Scale, 1.0, 1.1)
                        .duration_ms(1_500.0)
                        .easing(Easing::EaseInOut)
                        .yoyo(),
                    TransitionDescriptor::new(Property::Opacity, 0.5, 0.8)
                        .duration_ms(1_500.0)
                        .easing(Easing::EaseInOut)
                        .yoyo(),
                ],
            )
    }

    pub fn ring(index: usize) -> Vec<TransitionDescriptor> {
        match index {
            0 => spin(20_000.0, 360.0),
            1 => spin(30_000.0, -360.0),
            _ => spin(40_000.0, 360.0),
        }
    }
}

pub mod portfolio {
    use super::*;

    pub const SPOTLIGHT: &str = "portfolio-spotlight";
    pub const HEADER: &str = "portfolio-header";
    pub const CARD: &str = "portfolio-card";
    pub const FOOTER: &str = "portfolio-footer";

    pub fn transitions(card_count: usize) -> TransitionSet {
        TransitionSet::new()
            .with(
                SPOTLIGHT,
                vec![
                    TransitionDescriptor::new(Property::Var("--spot-x"), 20.0, 80.0)
                        .duration_ms(5_000.0)
                        .easing(Easing::EaseInOut)
                        .yoyo(),
                    TransitionDescriptor::new(Property::Var("--spot-y"), 30.0, 70.0)
                        .duration_ms(5_000.0)
                        .easing(Easing::EaseInOut)
                        .yoyo(),
                ],
            )
            .with(HEADER, rise(100.0, 1_000.0, 0.0))
            .with_staggered(
                CARD,
                card_count,
                Stagger::new(0.0, 200.0),
                rise(100.0, 1_000.0, 0.0),
            )
            .with(FOOTER, rise(50.0, 1_000.0, 800.0))
    }
}

pub mod contact {
    use super::*;

    pub const GRID: &str = "contact-grid";
    pub const HEADLINE: &str = "contact-headline";
    pub const COPY: &str = "contact-copy";
    pub const ACTIONS: &str = "contact-actions";
    pub const FORM_PANEL: &str = "contact-form-panel";
    pub const BACK: &str = "contact-back";
    pub const INFO_ROW: &str = "contact-info-row";
    pub const INFO_CARD: &str = "contact-info-card";
    pub const SOCIAL_ROW: &str = "contact-social-row";
    pub const SOCIAL_LINK: &str = "contact-social-link";
    pub const FOOTER: &str = "contact-footer";

    pub const INFO: [(&str, &str); 3] = [
        ("EMAIL", "hello@creative.portfolio"),
        ("PHONE", "+1 (555) 123-4567"),
        ("LOCATION", "New York, NY"),
    ];
    pub const SOCIAL: [&str; 4] = ["LinkedIn", "Dribbble", "Behance", "Instagram"];

    pub fn transitions() -> TransitionSet {
        TransitionSet::new()
            .with(GRID, drift("--grid-drift", 60.0, 20_000.0))
            .with(HEADLINE, rise(100.0, 1_000.0, 0.0))
            .with(COPY, rise(50.0, 1_000.0, 300.0))
            .with(ACTIONS, rise(50.0, 1_000.0, 600.0))
            .with(FORM_PANEL, rise(50.0, 800.0, 0.0))
            .with(BACK, vec![fade(300.0, 500.0)])
            .with(INFO_ROW, rise(50.0, 1_000.0, 900.0))
            .with_staggered(
                INFO_CARD,
                INFO.len(),
                Stagger::new(1_200.0, 100.0),
                pop(800.0, 0.0),
            )
            .with(SOCIAL_ROW, rise(50.0, 1_000.0, 1_500.0))
            .with_staggered(
                SOCIAL_LINK,
                SOCIAL.len(),
                Stagger::new(1_700.0, 100.0),
                rise(20.0, 500.0, 0.0),
            )
            .with(FOOTER, vec![fade(300.0, 2_000.0)])
    }
}

pub mod contact_form {
    use super::*;

    pub const FORM: &str = "form";
    pub const FIELD: &str = "form-field";
    pub const SUBMIT: &str = "form-submit";
    pub const SPINNER: &str = "form-spinner";
    pub const SUCCESS: &str = "form-success";
    pub const CHECK: &str = "form-check";

    pub fn transitions() -> TransitionSet {
        let field_entrances = [
            slide(-20.0, 300.0, 100.0),
            slide(20.0, 300.0, 200.0),
            rise(20.0, 300.0, 300.0),
            rise(20.0, 300.0, 400.0),
        ];

        let set = field_entrances.into_iter().enumerate().fold(
            TransitionSet::new().with(FORM, rise(50.0, 1_000.0, 0.0)),
            |set, (index, descriptors)| set.with_item(FIELD, index, descriptors),
        );

        set.with(SUBMIT, rise(20.0, 300.0, 500.0))
            .with(SPINNER, spin(1_000.0, 360.0))
            .with(
                SUCCESS,
                vec![
                    TransitionDescriptor::new(Property::Scale, 0.8, 1.0).duration_ms(500.0),
                    fade(500.0, 0.0),
                ],
            )
            .with(
                CHECK,
                vec![TransitionDescriptor::new(Property::Scale, 0.0, 1.0)
                    .duration_ms(600.0)
                    .delay_ms(200.0)
                    .easing(Easing::BackOut)],
            )
    }
}

pub mod modal {
    use super::*;

    pub const OVERLAY: &str = "modal-overlay";
    pub const PANEL: &str = "modal-panel";
    pub const HEADING: &str = "modal-heading";
    pub const DETAILS: &str = "modal-details";

    pub fn transitions() -> TransitionSet {
        TransitionSet::new()
            .with(OVERLAY, overlay(false))
            .with(PANEL, panel(false))
            .with(HEADING, rise(20.0, 300.0, 200.0))
            .with(DETAILS, rise(20.0, 300.0, 300.0))
    }

    pub fn overlay_exit() -> Vec<TransitionDescriptor> {
        overlay(true)
    }

    pub fn panel_exit() -> Vec<TransitionDescriptor> {
        panel(true)
    }

    fn overlay(exit: bool) -> Vec<TransitionDescriptor> {
        let easing = if exit { Easing::EaseIn } else { Easing::EaseOut };
        [(Property::Opacity, 0.0, 1.0), (Property::BackdropBlur, 0.0, 8.0)]
            .into_iter()
            .map(|(property, hidden, shown)| {
                let (from, to) = if exit { (shown, hidden) } else { (hidden, shown) };
                TransitionDescriptor::new(property, from, to)
                    .duration_ms(300.0)
                    .easing(easing)
            })
            .collect()
    }

    fn panel(exit: bool) -> Vec<TransitionDescriptor> {
        let pairs = [
            (Property::Scale, 0.8, 1.0),
            (Property::Opacity, 0.0, 1.0),
            (Property::TranslateY, 50.0, 0.0),
        ];
        pairs
            .into_iter()
            .map(|(property, hidden, shown)| {
                let (from, to) = if exit { (shown, hidden) } else { (hidden, shown) };
                TransitionDescriptor::new(property, from, to)
                    .duration_ms(400.0)
                    .easing(Easing::EaseOut)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{Repeat, Style};

    fn is_infinite(descriptor: &TransitionDescriptor) -> bool {
        descriptor.repeat == Repeat::Infinite
    }

    fn start_delays(set: &TransitionSet, name: &str, count: usize) -> Vec<f64> {
        (0..count)
            .map(|index| {
                set.item(name, index)
                    .iter()
                    .map(|descriptor| descriptor.delay_ms)
                    .fold(f64::INFINITY, f64::min)
            })
            .collect()
    }

    fn assert_non_decreasing(delays: &[f64]) {
        assert!(
            delays.windows(2).all(|pair| pair[1] >= pair[0]),
            "stagger out of order: {delays:?}"
        );
    }

    #[test]
    fn portfolio_cards_cascade_by_index() {
        let set = portfolio::transitions(3);
        let delays = start_delays(&set, portfolio::CARD, 3);

        assert_eq!(delays, vec![0.0, 200.0, 400.0]);
        assert_non_decreasing(&delays);
    }

    #[test]
    fn about_skills_and_contact_lists_cascade() {
        let skills = about::transitions();
        assert_eq!(
            start_delays(&skills, about::SKILL, 4),
            vec![800.0, 900.0, 1_000.0, 1_100.0]
        );

        let cards = contact::transitions();
        assert_non_decreasing(&start_delays(&cards, contact::INFO_CARD, contact::INFO.len()));
        assert_eq!(
            start_delays(&cards, contact::SOCIAL_LINK, contact::SOCIAL.len()),
            vec![1_700.0, 1_800.0, 1_900.0, 2_000.0]
        );
    }

    #[test]
    fn header_rises_into_place() {
        let set = portfolio::transitions(3);

        let hidden = Style::initial(set.get(portfolio::HEADER));
        assert_eq!(hidden.get(Property::TranslateY), Some(100.0));
        assert_eq!(hidden.get(Property::Opacity), Some(0.0));

        let shown = Style::target(set.get(portfolio::HEADER));
        assert_eq!(shown.get(Property::TranslateY), Some(0.0));
        assert_eq!(shown.get(Property::Opacity), Some(1.0));
    }

    #[test]
    fn unknown_elements_have_no_transitions() {
        let set = hero::transitions();

        assert!(set.get("missing").is_empty());
        assert!(set.item(hero::TITLE, 1).is_empty());
    }

    #[test]
    fn decorative_loops_are_infinite() {
        let intro = hero::transitions();
        for name in [hero::GLOW, hero::INDICATOR_RING, hero::INDICATOR_DOT] {
            assert!(intro.get(name).iter().all(is_infinite), "{name}");
        }
        assert!(!intro.get(hero::TITLE).iter().any(is_infinite));

        for index in 0..3 {
            assert!(is_infinite(&about::ring(index)[0]));
        }
        assert_eq!(about::ring(1)[0].to, -360.0);
    }

    #[test]
    fn modal_exit_mirrors_entrance() {
        let entrance = modal::transitions();
        let exit = modal::panel_exit();

        assert_eq!(
            Style::target(entrance.get(modal::PANEL)),
            Style::initial(&exit)
        );
        assert_eq!(
            Style::initial(entrance.get(modal::PANEL)),
            Style::target(&exit)
        );

        let overlay_exit = modal::overlay_exit();
        assert_eq!(
            Style::target(entrance.get(modal::OVERLAY)),
            Style::initial(&overlay_exit)
        );
        assert_eq!(Style::target(&overlay_exit).get(Property::BackdropBlur), Some(0.0));
        assert!(overlay_exit.iter().all(|d| d.easing == Easing::EaseIn));
    }

    #[test]
    fn nav_slide_is_reversible() {
        let show = navigation::slide(true);
        let hide = navigation::slide(false);

        assert_eq!(show[0].from, hide[0].to);
        assert_eq!(show[0].to, hide[0].from);
        assert_eq!(show[0].duration_ms, 300.0);
    }
}
