//! Reader for iTwin-style render schedule JSON (`RenderSchedule.ModelTimelineProps[]`).
//!
//! Only the color and visibility timelines are read. Other timelines in the format
//! (transform, cutting plane) are accepted and ignored.

use crate::{
    ColorEntry, ColorValue, DEFAULT_VISIBILITY, ElementTimeline, Error, ModelTimeline,
    VisibilityEntry,
};
use serde::Deserialize;

/// `Interpolation.Step` in the schedule format. Anything else is evaluated as step too.
const INTERPOLATION_STEP: u32 = 1;

#[derive(Debug, Deserialize)]
struct ModelTimelineDef {
    #[serde(default, rename = "modelId")]
    model_id: Option<String>,
    #[serde(default, rename = "elementTimelines")]
    element_timelines: Vec<ElementTimelineDef>,
}

#[derive(Debug, Deserialize)]
struct ElementTimelineDef {
    #[serde(default, rename = "batchId")]
    batch_id: Option<u32>,
    #[serde(rename = "elementIds")]
    element_ids: Vec<String>,
    #[serde(default, rename = "colorTimeline")]
    color_timeline: Option<Vec<ColorEntryDef>>,
    #[serde(default, rename = "visibilityTimeline")]
    visibility_timeline: Option<Vec<VisibilityEntryDef>>,
}

#[derive(Debug, Deserialize)]
struct ColorEntryDef {
    time: NumberDef,
    #[serde(default)]
    interpolation: Option<u32>,
    #[serde(default)]
    value: Option<ColorValueDef>,
}

#[derive(Debug, Deserialize)]
struct ColorValueDef {
    red: i32,
    green: i32,
    blue: i32,
}

fn default_visibility() -> NumberDef {
    NumberDef::Int(DEFAULT_VISIBILITY as i64)
}

#[derive(Debug, Deserialize)]
struct VisibilityEntryDef {
    time: NumberDef,
    #[serde(default)]
    interpolation: Option<u32>,
    #[serde(default = "default_visibility")]
    value: NumberDef,
}

/// Times and percents are JSON numbers; exporters emit both integers and floats.
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(untagged)]
enum NumberDef {
    Int(i64),
    Float(f64),
}

impl NumberDef {
    fn to_i64(self, context: &str) -> Result<i64, Error> {
        match self {
            Self::Int(v) => Ok(v),
            Self::Float(v) if v.is_finite() => Ok(v.floor() as i64),
            Self::Float(v) => Err(Error::MalformedSchedule {
                context: context.to_string(),
                message: format!("expected a finite number, got {v}"),
            }),
        }
    }

    fn to_i32(self, context: &str) -> Result<i32, Error> {
        let value = self.to_i64(context)?;
        i32::try_from(value).map_err(|_| Error::MalformedSchedule {
            context: context.to_string(),
            message: format!("{value} is out of range"),
        })
    }
}

/// Parses a render schedule into records, filling in the format's defaults.
pub fn parse_schedule(input: &str) -> Result<Vec<ModelTimeline>, Error> {
    let models: Vec<ModelTimelineDef> =
        serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

    models.into_iter().map(convert_model).collect()
}

fn convert_model(model: ModelTimelineDef) -> Result<ModelTimeline, Error> {
    let element_timelines = model
        .element_timelines
        .into_iter()
        .map(|timeline| convert_element_timeline(timeline, model.model_id.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModelTimeline {
        model_id: model.model_id,
        element_timelines,
    })
}

fn convert_element_timeline(
    timeline: ElementTimelineDef,
    model_id: Option<&str>,
) -> Result<ElementTimeline, Error> {
    let context = match (model_id, timeline.batch_id) {
        (Some(model), Some(batch)) => format!("model {model}, batch {batch}"),
        (Some(model), None) => format!("model {model}"),
        (None, Some(batch)) => format!("batch {batch}"),
        (None, None) => "element timeline".to_string(),
    };

    let mut non_step = false;

    let color_timeline = timeline
        .color_timeline
        .map(|entries| {
            entries
                .into_iter()
                .map(|entry| {
                    non_step |= is_non_step(entry.interpolation);
                    Ok::<_, Error>(ColorEntry {
                        time: entry.time.to_i64(&context)?,
                        value: entry.value.map(|v| ColorValue {
                            red: v.red,
                            green: v.green,
                            blue: v.blue,
                        }),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let visibility_timeline = timeline
        .visibility_timeline
        .map(|entries| {
            entries
                .into_iter()
                .map(|entry| {
                    non_step |= is_non_step(entry.interpolation);
                    Ok::<_, Error>(VisibilityEntry {
                        time: entry.time.to_i64(&context)?,
                        value: entry.value.to_i32(&context)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    if non_step {
        log::warn!("{context}: only step interpolation is supported; evaluating as step");
    }

    Ok(ElementTimeline {
        batch_id: timeline.batch_id,
        element_ids: timeline.element_ids,
        color_timeline,
        visibility_timeline,
    })
}

fn is_non_step(interpolation: Option<u32>) -> bool {
    interpolation.is_some_and(|i| i != INTERPOLATION_STEP)
}
