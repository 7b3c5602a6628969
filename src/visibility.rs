#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityState {
    #[default]
    NotSeen,
    Seen,
}

impl VisibilityState {
    pub fn is_seen(self) -> bool {
        matches!(self, Self::Seen)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// One-shot latch: `Seen` the first time the region touches the viewport
/// grown by `margin_px`, and never `NotSeen` again. Observations before
/// `attach` are ignored.
#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    margin_px: f64,
    attached: bool,
    degraded: bool,
    state: VisibilityState,
}

impl VisibilityObserver {
    pub fn new(margin_px: f64) -> Self {
        Self {
            margin_px,
            attached: false,
            degraded: false,
            state: VisibilityState::NotSeen,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
        if self.degraded {
            self.state = VisibilityState::Seen;
        }
    }

    pub fn observe(&mut self, region: Region, viewport: Viewport) -> VisibilityState {
        self.report(intersects(region, viewport, self.margin_px))
    }

    pub fn report(&mut self, intersecting: bool) -> VisibilityState {
        if self.attached && intersecting {
            self.state = VisibilityState::Seen;
        }
        self.state
    }

    pub fn degrade(&mut self) -> VisibilityState {
        self.degraded = true;
        if self.attached {
            self.state = VisibilityState::Seen;
        }
        self.state
    }
}

fn intersects(region: Region, viewport: Viewport, margin_px: f64) -> bool {
    let (top, bottom) = (-margin_px, viewport.height + margin_px);
    let (left, right) = (-margin_px, viewport.width + margin_px);

    if bottom <= top || right <= left {
        return false;
    }

    // Edge-adjacent regions count, as they do for IntersectionObserver.
    region.top <= bottom && region.bottom() >= top && region.left <= right && region.right() >= left
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn section_at(top: f64) -> Region {
        Region::new(top, 0.0, 1280.0, 900.0)
    }

    #[test]
    fn negative_margin_delays_reveal() {
        let mut observer = VisibilityObserver::new(-100.0);
        observer.attach();

        assert_eq!(observer.observe(section_at(750.0), VIEWPORT), VisibilityState::NotSeen);
        assert_eq!(observer.observe(section_at(701.0), VIEWPORT), VisibilityState::NotSeen);
        assert_eq!(observer.observe(section_at(699.0), VIEWPORT), VisibilityState::Seen);
    }

    #[test]
    fn region_touching_margin_edge_is_seen() {
        let mut observer = VisibilityObserver::new(-100.0);
        observer.attach();

        let edge = VIEWPORT.height - 100.0;
        assert_eq!(observer.observe(section_at(edge), VIEWPORT), VisibilityState::Seen);
    }

    #[test]
    fn reported_intersection_latches_once_attached() {
        let mut observer = VisibilityObserver::new(-100.0);

        assert_eq!(observer.report(true), VisibilityState::NotSeen);
        observer.attach();
        assert_eq!(observer.report(false), VisibilityState::NotSeen);
        assert_eq!(observer.report(true), VisibilityState::Seen);
        assert_eq!(observer.report(false), VisibilityState::Seen);
    }

    #[test]
    fn seen_never_reverts() {
        let mut observer = VisibilityObserver::new(-100.0);
        observer.attach();

        observer.observe(section_at(200.0), VIEWPORT);
        assert_eq!(observer.observe(section_at(5_000.0), VIEWPORT), VisibilityState::Seen);
        assert_eq!(observer.observe(section_at(-5_000.0), VIEWPORT), VisibilityState::Seen);
    }

    #[test]
    fn detached_observer_never_fires() {
        let mut observer = VisibilityObserver::new(0.0);

        assert_eq!(observer.observe(section_at(0.0), VIEWPORT), VisibilityState::NotSeen);

        observer.attach();
        assert_eq!(observer.observe(section_at(0.0), VIEWPORT), VisibilityState::Seen);
    }

    #[test]
    fn region_above_viewport_is_not_visible() {
        let mut observer = VisibilityObserver::new(-100.0);
        observer.attach();

        let above = Region::new(-1_000.0, 0.0, 1280.0, 1_050.0);
        assert_eq!(observer.observe(above, VIEWPORT), VisibilityState::NotSeen);
    }

    #[test]
    fn positive_margin_pre_triggers() {
        let mut observer = VisibilityObserver::new(200.0);
        observer.attach();

        assert_eq!(observer.observe(section_at(950.0), VIEWPORT), VisibilityState::Seen);
    }

    #[test]
    fn degraded_observer_is_seen_once_attached() {
        let mut observer = VisibilityObserver::new(-100.0);

        assert_eq!(observer.degrade(), VisibilityState::NotSeen);
        observer.attach();
        assert_eq!(observer.report(false), VisibilityState::Seen);
    }
}
