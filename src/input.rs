use js_sys::Date;

pub(crate) const SWIPE_MIN_TRAVEL_PX: f32 = 64.0;
pub(crate) const SWIPE_MAX_DURATION_MS: f64 = 600.0;
pub(crate) const SWIPE_AXIS_DOMINANCE: f32 = 1.2;

pub(crate) fn now_ms() -> f64 {
    Date::now()
}

/// Tracks one touch sequence and reports whether it ended as a quick,
/// mostly-vertical downward swipe.
pub(crate) struct SwipeGesture {
    start: [f32; 2],
    last: [f32; 2],
    start_ms: f64,
    active: bool,
}

impl SwipeGesture {
    pub(crate) fn new() -> Self {
        Self {
            start: [0.0, 0.0],
            last: [0.0, 0.0],
            start_ms: 0.0,
            active: false,
        }
    }

    pub(crate) fn arm(&mut self, x: f32, y: f32, now_ms: f64) {
        self.start = [x, y];
        self.last = [x, y];
        self.start_ms = now_ms;
        self.active = true;
    }

    pub(crate) fn update(&mut self, x: f32, y: f32) {
        if self.active {
            self.last = [x, y];
        }
    }

    /// Consumes the gesture; a second call without a new `arm` is false.
    pub(crate) fn finish_down(&mut self, now_ms: f64) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        let dx = (self.last[0] - self.start[0]).abs();
        let dy = self.last[1] - self.start[1];
        let elapsed = (now_ms - self.start_ms).max(0.0);
        dy >= SWIPE_MIN_TRAVEL_PX && dy >= dx * SWIPE_AXIS_DOMINANCE && elapsed <= SWIPE_MAX_DURATION_MS
    }
}
