use crate::TimeRange;

#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<V> {
    pub time: i64,
    pub value: V,
}

impl<V> Keyframe<V> {
    pub fn new(time: i64, value: V) -> Self {
        Self { time, value }
    }
}

/// Keyframes for a single property, sorted by time and read-only once built.
///
/// Evaluation is a step function: the active value at `t` is the value of the last keyframe
/// whose time is `<= t`. Keyframes sharing a time keep their input order, so the later one wins.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTimeline<V> {
    frames: Vec<Keyframe<V>>,
}

impl<V> KeyframeTimeline<V> {
    pub fn new(frames: impl IntoIterator<Item = Keyframe<V>>) -> Self {
        let mut frames: Vec<Keyframe<V>> = frames.into_iter().collect();
        // Stable: equal times stay in input order.
        frames.sort_by_key(|f| f.time);
        Self { frames }
    }

    pub fn frames(&self) -> &[Keyframe<V>] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn interval(&self) -> Option<TimeRange> {
        let first = self.frames.first()?;
        let last = self.frames.last()?;
        Some(TimeRange::new(first.time, last.time))
    }

    /// Index of the last keyframe at or before `time`, or `None` before the first keyframe.
    pub fn frame_index_at(&self, time: i64) -> Option<usize> {
        self.frames
            .partition_point(|f| f.time <= time)
            .checked_sub(1)
    }

    /// Step-evaluates the timeline. `None` means no keyframe applies yet and the caller's
    /// pre-animation default should be used.
    pub fn evaluate(&self, time: i64) -> Option<&V> {
        self.frame_index_at(time).map(|i| &self.frames[i].value)
    }
}

impl<V> FromIterator<Keyframe<V>> for KeyframeTimeline<V> {
    fn from_iter<I: IntoIterator<Item = Keyframe<V>>>(iter: I) -> Self {
        Self::new(iter)
    }
}
