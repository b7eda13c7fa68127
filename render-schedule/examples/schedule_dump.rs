use render_schedule::{Rgb, ScheduleDocument, TargetHandle, resolver_fn};
use serde_json::json;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Clone, Debug, Default, PartialEq)]
struct Appearance {
    color: Option<Rgb>,
}

#[derive(Debug)]
struct ElementState {
    appearance: Appearance,
    visible: bool,
}

/// Stands in for a scene object: every element id gets one.
#[derive(Clone)]
struct RecordingTarget(Rc<RefCell<ElementState>>);

impl TargetHandle for RecordingTarget {
    type Appearance = Appearance;

    fn appearance(&self) -> Appearance {
        self.0.borrow().appearance.clone()
    }

    fn colored(&self, color: Rgb) -> Appearance {
        Appearance { color: Some(color) }
    }

    fn set_appearance(&self, appearance: &Appearance) {
        self.0.borrow_mut().appearance = appearance.clone();
    }

    fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./example-data/animation.json"));
    let time: Option<i64> = args.get(1).and_then(|s| s.parse().ok());

    let json = std::fs::read_to_string(&path).expect("read schedule");

    let elements = RefCell::new(BTreeMap::<String, RecordingTarget>::new());
    let resolver = resolver_fn(|id: &str| {
        let target = elements
            .borrow_mut()
            .entry(id.to_string())
            .or_insert_with(|| {
                RecordingTarget(Rc::new(RefCell::new(ElementState {
                    appearance: Appearance::default(),
                    visible: true,
                })))
            })
            .clone();
        vec![target]
    });

    let document: ScheduleDocument<RecordingTarget> =
        ScheduleDocument::from_json_str(&json, &resolver).expect("build schedule");
    let time = time.unwrap_or(document.begin());
    document.apply_at(time);

    let elements: Vec<_> = elements
        .borrow()
        .iter()
        .map(|(id, target)| {
            let state = target.0.borrow();
            json!({
                "id": id,
                "visible": state.visible,
                "color": state.appearance.color.map(|c| [c.red, c.green, c.blue]),
            })
        })
        .collect();

    let out = json!({
        "time": time,
        "range": { "begin": document.begin(), "end": document.end() },
        "batches": document.len(),
        "elements": elements,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).expect("serialize dump")
    );
}
