use std::collections::BTreeMap;

const DEFAULT_DURATION_MS: f64 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    Rotate,
    BackdropBlur,
    Var(&'static str),
}

impl Property {
    fn is_transform(self) -> bool {
        matches!(
            self,
            Self::TranslateX | Self::TranslateY | Self::Scale | Self::Rotate
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    BackOut,
}

impl Easing {
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::BackOut => {
                let overshoot = 1.70158;
                let shifted = t - 1.0;
                1.0 + (overshoot + 1.0) * shifted.powi(3) + overshoot * shifted.powi(2)
            }
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let sample = |p1: f64, p2: f64, t: f64| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        ((a * t + b) * t + c) * t
    };
    let slope = |p1: f64, p2: f64, t: f64| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (3.0 * a * t + 2.0 * b) * t + c
    };

    let mut t = x;
    for _ in 0..8 {
        let error = sample(x1, x2, t) - x;
        if error.abs() < EPSILON {
            return sample(y1, y2, t);
        }
        let derivative = slope(x1, x2, t);
        if derivative.abs() < 1e-6 {
            break;
        }
        t -= error / derivative;
    }

    let (mut low, mut high) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let value = sample(x1, x2, t);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) / 2.0;
    }

    sample(y1, y2, t)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    None,
    /// Extra iterations after the first.
    #[cfg_attr(not(test), allow(dead_code))]
    Count(u32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatMode {
    Loop,
    Reverse,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionDescriptor {
    pub property: Property,
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
    pub repeat: Repeat,
    pub repeat_mode: RepeatMode,
}

impl TransitionDescriptor {
    pub fn new(property: Property, from: f64, to: f64) -> Self {
        Self {
            property,
            from,
            to,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0.0,
            easing: Easing::EaseOut,
            repeat: Repeat::None,
            repeat_mode: RepeatMode::Loop,
        }
    }

    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn looping(self) -> Self {
        self.repeat(Repeat::Infinite)
    }

    pub fn yoyo(mut self) -> Self {
        self.repeat_mode = RepeatMode::Reverse;
        self.repeat(Repeat::Infinite)
    }

    pub fn delayed_by(mut self, extra_ms: f64) -> Self {
        self.delay_ms += extra_ms.max(0.0);
        self
    }

    fn iterations(&self) -> Option<u64> {
        match self.repeat {
            Repeat::None => Some(1),
            Repeat::Count(extra) => Some(u64::from(extra) + 1),
            Repeat::Infinite => None,
        }
    }

    pub fn settled_value(&self) -> f64 {
        match self.iterations() {
            Some(total) => self.iteration_end(total - 1),
            None => self.from,
        }
    }

    pub fn sample(&self, elapsed_ms: f64) -> (f64, bool) {
        let active_ms = elapsed_ms - self.delay_ms;
        if active_ms < 0.0 {
            return (self.from, false);
        }

        let iterations = self.iterations();

        if self.duration_ms <= 0.0 {
            return match iterations {
                Some(_) => (self.settled_value(), true),
                None => (self.to, false),
            };
        }

        let index = (active_ms / self.duration_ms).floor() as u64;
        if let Some(total) = iterations {
            if index >= total {
                return (self.iteration_end(total - 1), true);
            }
        }

        let progress = (active_ms - index as f64 * self.duration_ms) / self.duration_ms;
        let progress = if self.runs_backwards(index) {
            1.0 - progress
        } else {
            progress
        };

        (self.interpolate(progress), false)
    }

    fn runs_backwards(&self, index: u64) -> bool {
        self.repeat_mode == RepeatMode::Reverse && index % 2 == 1
    }

    fn iteration_end(&self, index: u64) -> f64 {
        if self.runs_backwards(index) {
            self.from
        } else {
            self.to
        }
    }

    fn interpolate(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub base_ms: f64,
    pub step_ms: f64,
}

impl Stagger {
    pub fn new(base_ms: f64, step_ms: f64) -> Self {
        Self {
            base_ms: base_ms.max(0.0),
            step_ms: step_ms.max(0.0),
        }
    }

    pub fn delay_for(&self, index: usize) -> f64 {
        self.base_ms + index as f64 * self.step_ms
    }

    pub fn apply(&self, index: usize, template: &[TransitionDescriptor]) -> Vec<TransitionDescriptor> {
        let delay = self.delay_for(index);
        template
            .iter()
            .cloned()
            .map(|descriptor| descriptor.delayed_by(delay))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    values: BTreeMap<Property, f64>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: Property, value: f64) {
        self.values.insert(property, value);
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.values.get(&property).copied()
    }

    pub fn initial(descriptors: &[TransitionDescriptor]) -> Self {
        let mut style = Self::new();
        for descriptor in descriptors {
            style
                .values
                .entry(descriptor.property)
                .or_insert(descriptor.from);
        }
        style
    }

    pub fn target(descriptors: &[TransitionDescriptor]) -> Self {
        descriptors
            .iter()
            .map(|descriptor| (descriptor.property, descriptor.settled_value()))
            .collect()
    }

    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut declarations = Vec::new();

        if let Some(opacity) = self.get(Property::Opacity) {
            declarations.push(("opacity", format!("{:.3}", opacity.clamp(0.0, 1.0))));
        }

        if self.values.keys().any(|property| property.is_transform()) {
            let mut parts = Vec::new();
            let x = self.get(Property::TranslateX);
            let y = self.get(Property::TranslateY);
            if x.is_some() || y.is_some() {
                parts.push(format!(
                    "translate3d({:.2}px, {:.2}px, 0)",
                    x.unwrap_or(0.0),
                    y.unwrap_or(0.0)
                ));
            }
            if let Some(scale) = self.get(Property::Scale) {
                parts.push(format!("scale({scale:.4})"));
            }
            if let Some(rotate) = self.get(Property::Rotate) {
                parts.push(format!("rotate({rotate:.2}deg)"));
            }
            declarations.push(("transform", parts.join(" ")));
        }

        if let Some(blur) = self.get(Property::BackdropBlur) {
            declarations.push(("backdrop-filter", format!("blur({:.2}px)", blur.max(0.0))));
        }

        for (property, value) in &self.values {
            if let Property::Var(name) = property {
                declarations.push((name, format!("{value:.3}")));
            }
        }

        declarations
    }

    pub fn to_css(&self) -> String {
        self.declarations()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<(Property, f64)> for Style {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}
