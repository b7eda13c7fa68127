use crate::{ScheduleDocument, TargetHandle, TimeRange};

/// Schedule seconds advanced per real second: two weeks.
pub const DEFAULT_PLAYBACK_RATE: f64 = 60.0 * 60.0 * 24.0 * 7.0 * 2.0;

/// A play/pause cursor over a schedule's range, for hosts that drive the schedule per frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Playback {
    range: TimeRange,
    time: i64,
    playing: bool,
    rate: f64,
}

impl Playback {
    /// Starts paused at the beginning of `range`.
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            time: range.begin,
            playing: false,
            rate: DEFAULT_PLAYBACK_RATE,
        }
    }

    pub fn with_rate(mut self, schedule_seconds_per_second: f64) -> Self {
        self.rate = schedule_seconds_per_second;
        self
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Moves the cursor, clamped to the range. Landing on the end pauses playback.
    pub fn seek(&mut self, time: i64) {
        self.time = self.range.clamp(time);
        if self.time >= self.range.end {
            self.playing = false;
        }
    }

    /// Advances by `delta_seconds` of real time when playing. Returns the new cursor time.
    pub fn advance(&mut self, delta_seconds: f32) -> i64 {
        if self.playing {
            let step = (f64::from(delta_seconds) * self.rate) as i64;
            self.seek(self.time.saturating_add(step));
        }
        self.time
    }

    pub fn apply<H: TargetHandle>(&self, document: &ScheduleDocument<H>) {
        document.apply_at(self.time);
    }
}
