use crate::{Rgb, TargetHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub(crate) struct MockMaterial {
    pub name: String,
    pub color: Option<Rgb>,
}

#[derive(Debug)]
pub(crate) struct MockState {
    pub material: Rc<MockMaterial>,
    pub visible: bool,
    pub colored_calls: usize,
}

/// Shared handle to a fake renderer, standing in for a host scene object.
#[derive(Clone, Debug)]
pub(crate) struct MockTarget(pub Rc<RefCell<MockState>>);

impl MockTarget {
    pub fn new(material: &str) -> Self {
        Self(Rc::new(RefCell::new(MockState {
            material: Rc::new(MockMaterial {
                name: material.to_string(),
                color: None,
            }),
            visible: true,
            colored_calls: 0,
        })))
    }

    pub fn material(&self) -> Rc<MockMaterial> {
        self.0.borrow().material.clone()
    }

    pub fn color(&self) -> Option<Rgb> {
        self.0.borrow().material.color
    }

    pub fn visible(&self) -> bool {
        self.0.borrow().visible
    }

    /// (material name, color, visible)
    pub fn snapshot(&self) -> (String, Option<Rgb>, bool) {
        let state = self.0.borrow();
        (
            state.material.name.clone(),
            state.material.color,
            state.visible,
        )
    }
}

impl TargetHandle for MockTarget {
    type Appearance = Rc<MockMaterial>;

    fn appearance(&self) -> Self::Appearance {
        self.material()
    }

    fn colored(&self, color: Rgb) -> Self::Appearance {
        let mut state = self.0.borrow_mut();
        state.colored_calls += 1;
        Rc::new(MockMaterial {
            name: state.material.name.clone(),
            color: Some(color),
        })
    }

    fn set_appearance(&self, appearance: &Self::Appearance) {
        self.0.borrow_mut().material = appearance.clone();
    }

    fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }
}

/// Builds a resolver with one target per element id, named after the id.
pub(crate) fn scene(element_ids: &[&str]) -> HashMap<String, Vec<MockTarget>> {
    element_ids
        .iter()
        .map(|id| (id.to_string(), vec![MockTarget::new(id)]))
        .collect()
}

pub(crate) fn target(scene: &HashMap<String, Vec<MockTarget>>, element_id: &str) -> MockTarget {
    scene[element_id][0].clone()
}

pub(crate) const RED: Rgb = Rgb::new(255, 0, 0);
pub(crate) const GREEN: Rgb = Rgb::new(0, 255, 0);
