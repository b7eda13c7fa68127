use crate::{
    BuildOptions, ElementResolver, Error, ModelTimeline, TargetHandle, TimeRange, TimelineBatch,
    union_ranges,
};
use std::fmt;

/// A whole render schedule bound to render targets.
///
/// Built once from parsed records and a resolver; afterwards only [`ScheduleDocument::apply_at`]
/// is needed, with any timestamp, in any order.
pub struct ScheduleDocument<H: TargetHandle> {
    batches: Vec<TimelineBatch<H>>,
    range: TimeRange,
}

impl<H: TargetHandle> ScheduleDocument<H> {
    pub fn build<R>(records: &[ModelTimeline], resolver: &R) -> Result<Self, Error>
    where
        R: ElementResolver<H> + ?Sized,
    {
        Self::build_with_options(records, resolver, &BuildOptions::default())
    }

    /// Builds one batch per element timeline of every model timeline, in record order.
    ///
    /// Any malformed record fails the whole build. A schedule without keyframes is rejected
    /// with [`Error::EmptyDocument`] unless `options.allow_empty` is set.
    pub fn build_with_options<R>(
        records: &[ModelTimeline],
        resolver: &R,
        options: &BuildOptions,
    ) -> Result<Self, Error>
    where
        R: ElementResolver<H> + ?Sized,
    {
        options.validate()?;

        let mut batches = Vec::new();
        let mut range: Option<TimeRange> = None;

        for model in records {
            if let Some(model_id) = model.model_id.as_deref() {
                log::debug!(
                    "model {model_id}: {} element timelines",
                    model.element_timelines.len()
                );
            }
            for element_timeline in &model.element_timelines {
                let batch =
                    TimelineBatch::from_element_timeline(element_timeline, resolver, options)?;
                range = union_ranges([range, batch.interval()]);
                batches.push(batch);
            }
        }

        let range = match range {
            Some(range) => range,
            None if options.allow_empty => TimeRange::new(0, 0),
            None => return Err(Error::EmptyDocument),
        };

        log::debug!(
            "schedule built: {} batches, range [{}, {}]",
            batches.len(),
            range.begin,
            range.end
        );

        Ok(Self { batches, range })
    }

    /// Union of every batch interval, fixed at build time.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn begin(&self) -> i64 {
        self.range.begin
    }

    pub fn end(&self) -> i64 {
        self.range.end
    }

    pub fn batches(&self) -> &[TimelineBatch<H>] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.batches.iter().map(|b| b.targets().len()).sum()
    }

    /// Applies every batch at `time`.
    ///
    /// Batches are applied in record order. When two batches share a target the later one
    /// wins; schedules are expected to assign each element to a single batch.
    pub fn apply_at(&self, time: i64) {
        for batch in &self.batches {
            batch.apply_at(time);
        }
    }
}

#[cfg(feature = "json")]
impl<H: TargetHandle> ScheduleDocument<H> {
    pub fn from_json_str<R>(input: &str, resolver: &R) -> Result<Self, Error>
    where
        R: ElementResolver<H> + ?Sized,
    {
        Self::from_json_str_with_options(input, resolver, &BuildOptions::default())
    }

    pub fn from_json_str_with_options<R>(
        input: &str,
        resolver: &R,
        options: &BuildOptions,
    ) -> Result<Self, Error>
    where
        R: ElementResolver<H> + ?Sized,
    {
        let records = crate::json::parse_schedule(input)?;
        Self::build_with_options(&records, resolver, options)
    }
}

impl<H: TargetHandle> fmt::Debug for ScheduleDocument<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleDocument")
            .field("batches", &self.batches)
            .field("range", &self.range)
            .finish()
    }
}
