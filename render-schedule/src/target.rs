use crate::Rgb;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A reference to an externally owned renderable object.
///
/// Handles are references: the schedule never owns the object behind one, and all mutation
/// goes through `&self`. Typical implementations wrap an `Rc<RefCell<_>>`, an entity id, or
/// an index into a scene owned by the host.
pub trait TargetHandle {
    /// Snapshot of how the target looks (e.g. its material).
    type Appearance: Clone;

    fn appearance(&self) -> Self::Appearance;

    /// Builds a colored appearance derived from this target's current one.
    ///
    /// A batch calls this once per apply, on its first target, and assigns the result to every
    /// target in the batch.
    fn colored(&self, color: Rgb) -> Self::Appearance;

    fn set_appearance(&self, appearance: &Self::Appearance);

    fn set_visible(&self, visible: bool);
}

/// Maps an element id to the handles that render it. Unknown ids resolve to nothing.
pub trait ElementResolver<H> {
    fn resolve(&self, element_id: &str) -> Vec<H>;
}

impl<H: Clone, S: BuildHasher> ElementResolver<H> for HashMap<String, Vec<H>, S> {
    fn resolve(&self, element_id: &str) -> Vec<H> {
        self.get(element_id).cloned().unwrap_or_default()
    }
}

impl<H: Clone> ElementResolver<H> for BTreeMap<String, Vec<H>> {
    fn resolve(&self, element_id: &str) -> Vec<H> {
        self.get(element_id).cloned().unwrap_or_default()
    }
}

impl<H, R: ElementResolver<H> + ?Sized> ElementResolver<H> for &R {
    fn resolve(&self, element_id: &str) -> Vec<H> {
        (**self).resolve(element_id)
    }
}

/// Resolver backed by a closure. See [`resolver_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnResolver<F>(F);

pub fn resolver_fn<H, F>(f: F) -> FnResolver<F>
where
    F: Fn(&str) -> Vec<H>,
{
    FnResolver(f)
}

impl<H, F> ElementResolver<H> for FnResolver<F>
where
    F: Fn(&str) -> Vec<H>,
{
    fn resolve(&self, element_id: &str) -> Vec<H> {
        (self.0)(element_id)
    }
}
