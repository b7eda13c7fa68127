use crate::{
    BuildOptions, ColorEntry, DEFAULT_VISIBILITY_THRESHOLD, ElementResolver, ElementTimeline,
    Error, Keyframe, KeyframeTimeline, Rgb, TargetHandle, TimeRange, VisibilityEntry,
    union_ranges,
};
use std::fmt;

/// Visibility used while no visibility keyframe applies yet.
const UNKEYED_VISIBILITY: u8 = 100;

/// A target handle paired with its appearance from before any animation was applied.
#[derive(Clone)]
pub struct BatchTarget<H: TargetHandle> {
    pub handle: H,
    pub original: H::Appearance,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorState {
    /// The batch has no color timeline; appearances are left alone.
    Unchanged,
    /// Restore every target's original appearance.
    Original,
    Color(Rgb),
}

/// What a batch shows at a point in time, before it is pushed to the handles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BatchState {
    /// `None` when the batch has no visibility timeline.
    pub visible: Option<bool>,
    pub color: ColorState,
}

/// Render targets sharing one color timeline and one visibility timeline.
#[derive(Clone)]
pub struct TimelineBatch<H: TargetHandle> {
    batch_id: Option<u32>,
    targets: Vec<BatchTarget<H>>,
    color_timeline: Option<KeyframeTimeline<Option<Rgb>>>,
    visibility_timeline: Option<KeyframeTimeline<u8>>,
    visibility_threshold: u8,
    interval: Option<TimeRange>,
}

impl<H: TargetHandle> TimelineBatch<H> {
    /// Snapshots every handle and builds the timelines that have at least one keyframe.
    pub fn new(
        handles: impl IntoIterator<Item = H>,
        color_frames: Vec<Keyframe<Option<Rgb>>>,
        visibility_frames: Vec<Keyframe<u8>>,
    ) -> Self {
        let targets = handles
            .into_iter()
            .map(|handle| {
                let original = handle.appearance();
                BatchTarget { handle, original }
            })
            .collect();

        let color_timeline =
            (!color_frames.is_empty()).then(|| KeyframeTimeline::new(color_frames));
        let visibility_timeline =
            (!visibility_frames.is_empty()).then(|| KeyframeTimeline::new(visibility_frames));

        let interval = union_ranges([
            color_timeline.as_ref().and_then(KeyframeTimeline::interval),
            visibility_timeline
                .as_ref()
                .and_then(KeyframeTimeline::interval),
        ]);

        Self {
            batch_id: None,
            targets,
            color_timeline,
            visibility_timeline,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            interval,
        }
    }

    pub fn with_batch_id(mut self, batch_id: Option<u32>) -> Self {
        self.batch_id = batch_id;
        self
    }

    pub fn with_visibility_threshold(mut self, percent: u8) -> Self {
        self.visibility_threshold = percent;
        self
    }

    /// Builds a batch from a schedule record, resolving its element ids through `resolver`.
    ///
    /// Ids that resolve to no handles are skipped; the batch may end up with no targets at all.
    pub fn from_element_timeline<R>(
        record: &ElementTimeline,
        resolver: &R,
        options: &BuildOptions,
    ) -> Result<Self, Error>
    where
        R: ElementResolver<H> + ?Sized,
    {
        options.validate()?;

        let context = match record.batch_id {
            Some(id) => format!("batch {id}"),
            None => format!("element timeline for {:?}", record.element_ids),
        };

        let color_frames = record
            .color_timeline
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|entry| color_keyframe(entry, &context))
            .collect::<Result<Vec<_>, _>>()?;
        let visibility_frames = record
            .visibility_timeline
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|entry| visibility_keyframe(entry, &context))
            .collect::<Result<Vec<_>, _>>()?;

        let mut handles = Vec::new();
        for element_id in &record.element_ids {
            let resolved = resolver.resolve(element_id);
            if resolved.is_empty() {
                log::trace!("{context}: element {element_id} has no render targets");
            }
            handles.extend(resolved);
        }

        let batch = Self::new(handles, color_frames, visibility_frames)
            .with_batch_id(record.batch_id)
            .with_visibility_threshold(options.visibility_threshold);

        log::debug!(
            "{context}: {} targets from {} elements, color keys: {}, visibility keys: {}",
            batch.targets.len(),
            record.element_ids.len(),
            batch.color_timeline.as_ref().map_or(0, KeyframeTimeline::len),
            batch
                .visibility_timeline
                .as_ref()
                .map_or(0, KeyframeTimeline::len),
        );

        Ok(batch)
    }

    pub fn batch_id(&self) -> Option<u32> {
        self.batch_id
    }

    pub fn targets(&self) -> &[BatchTarget<H>] {
        &self.targets
    }

    pub fn color_timeline(&self) -> Option<&KeyframeTimeline<Option<Rgb>>> {
        self.color_timeline.as_ref()
    }

    pub fn visibility_timeline(&self) -> Option<&KeyframeTimeline<u8>> {
        self.visibility_timeline.as_ref()
    }

    /// Union of the color and visibility timeline spans; `None` if the batch has neither.
    pub fn interval(&self) -> Option<TimeRange> {
        self.interval
    }

    pub fn evaluate_at(&self, time: i64) -> BatchState {
        let visible = self.visibility_timeline.as_ref().map(|timeline| {
            let percent = timeline.evaluate(time).copied().unwrap_or(UNKEYED_VISIBILITY);
            percent >= self.visibility_threshold
        });

        let color = match &self.color_timeline {
            None => ColorState::Unchanged,
            Some(timeline) => match timeline.evaluate(time) {
                Some(Some(color)) => ColorState::Color(*color),
                // Before the first key, or an explicit revert.
                Some(None) | None => ColorState::Original,
            },
        };

        BatchState { visible, color }
    }

    /// Pushes the state at `time` to every target.
    ///
    /// Nothing carries over between calls, so times may be applied in any order.
    pub fn apply_at(&self, time: i64) {
        if self.targets.is_empty() {
            return;
        }

        let state = self.evaluate_at(time);

        if let Some(visible) = state.visible {
            for target in &self.targets {
                target.handle.set_visible(visible);
            }
        }

        match state.color {
            ColorState::Unchanged => {}
            ColorState::Original => {
                for target in &self.targets {
                    target.handle.set_appearance(&target.original);
                }
            }
            ColorState::Color(color) => {
                // One appearance shared by the whole batch.
                let colored = self.targets[0].handle.colored(color);
                for target in &self.targets {
                    target.handle.set_appearance(&colored);
                }
            }
        }
    }
}

impl<H: TargetHandle> fmt::Debug for TimelineBatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineBatch")
            .field("batch_id", &self.batch_id)
            .field("targets", &self.targets.len())
            .field("color_timeline", &self.color_timeline)
            .field("visibility_timeline", &self.visibility_timeline)
            .field("visibility_threshold", &self.visibility_threshold)
            .field("interval", &self.interval)
            .finish()
    }
}

fn color_keyframe(entry: &ColorEntry, context: &str) -> Result<Keyframe<Option<Rgb>>, Error> {
    let value = match entry.value {
        None => None,
        Some(value) => {
            let channel = |name: &str, raw: i32| {
                u8::try_from(raw).map_err(|_| Error::MalformedSchedule {
                    context: context.to_string(),
                    message: format!(
                        "color {name} channel {raw} at time {} is outside 0..=255",
                        entry.time
                    ),
                })
            };
            Some(Rgb::new(
                channel("red", value.red)?,
                channel("green", value.green)?,
                channel("blue", value.blue)?,
            ))
        }
    };
    Ok(Keyframe::new(entry.time, value))
}

fn visibility_keyframe(entry: &VisibilityEntry, context: &str) -> Result<Keyframe<u8>, Error> {
    match u8::try_from(entry.value) {
        Ok(percent) if percent <= 100 => Ok(Keyframe::new(entry.time, percent)),
        _ => Err(Error::MalformedSchedule {
            context: context.to_string(),
            message: format!(
                "visibility {} at time {} is outside 0..=100",
                entry.value, entry.time
            ),
        }),
    }
}
