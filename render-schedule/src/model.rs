/// Inclusive `[begin, end]` span of epoch-seconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimeRange {
    pub begin: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(begin: i64, end: i64) -> Self {
        Self { begin, end }
    }

    pub fn union(self, other: TimeRange) -> TimeRange {
        TimeRange {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(self, time: i64) -> bool {
        time >= self.begin && time <= self.end
    }

    pub fn duration(self) -> i64 {
        self.end.saturating_sub(self.begin)
    }

    pub fn clamp(self, time: i64) -> i64 {
        time.clamp(self.begin, self.end.max(self.begin))
    }
}

/// Folds optional ranges, skipping undefined ones.
pub(crate) fn union_ranges(
    ranges: impl IntoIterator<Item = Option<TimeRange>>,
) -> Option<TimeRange> {
    ranges
        .into_iter()
        .flatten()
        .reduce(|acc, range| acc.union(range))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Normalized `[r, g, b]` in `0.0..=1.0`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
        ]
    }
}

/// One model's worth of element timelines, as read from a schedule document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelTimeline {
    pub model_id: Option<String>,
    pub element_timelines: Vec<ElementTimeline>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementTimeline {
    pub batch_id: Option<u32>,
    pub element_ids: Vec<String>,
    pub color_timeline: Option<Vec<ColorEntry>>,
    pub visibility_timeline: Option<Vec<VisibilityEntry>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorEntry {
    pub time: i64,
    /// `None` reverts the elements to their original appearance.
    pub value: Option<ColorValue>,
}

/// Raw color channels; each must lie in `0..=255`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ColorValue {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VisibilityEntry {
    pub time: i64,
    /// Percent in `0..=100`. Readers fill in [`DEFAULT_VISIBILITY`] when the field is omitted.
    pub value: i32,
}

pub const DEFAULT_VISIBILITY: i32 = 100;

/// Percent at or above which a target is shown.
pub const DEFAULT_VISIBILITY_THRESHOLD: u8 = 50;

/// Options for [`crate::ScheduleDocument::build_with_options`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuildOptions {
    pub visibility_threshold: u8,
    /// Accept a schedule without any keyframes. Its range is reported as `[0, 0]`.
    pub allow_empty: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            allow_empty: false,
        }
    }
}

impl BuildOptions {
    pub fn with_visibility_threshold(mut self, percent: u8) -> Self {
        self.visibility_threshold = percent;
        self
    }

    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), crate::Error> {
        if self.visibility_threshold > 100 {
            return Err(crate::Error::InvalidValue {
                message: format!(
                    "visibility threshold must be a percent in 0..=100, got {}",
                    self.visibility_threshold
                ),
            });
        }
        Ok(())
    }
}
