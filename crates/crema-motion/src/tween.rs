//! Tween declarations.

use std::fmt;
use std::sync::Arc;

use crema_core::{Property, PropertySet, Rect};

use crate::ease::Ease;
use crate::position::Position;
use crate::stagger::Stagger;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cached measurement of one target, captured when a timeline is built.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetSnapshot {
    /// Laid-out rectangle of the target in viewport px.
    pub rect: Rect,
    /// Properties of the target before any step touches it.
    pub base: PropertySet,
}

impl TargetSnapshot {
    pub fn new(rect: Rect, base: PropertySet) -> Self {
        Self { rect, base }
    }
}

/// Per-target value function: `(index, snapshot) -> value`.
pub type TargetFn = Arc<dyn Fn(usize, &TargetSnapshot) -> f32 + Send + Sync>;

/// A property value, either shared by the whole group or computed per target.
#[derive(Clone)]
pub enum Value {
    Fixed(f32),
    PerTarget(TargetFn),
}

impl Value {
    pub fn per_target(f: impl Fn(usize, &TargetSnapshot) -> f32 + Send + Sync + 'static) -> Self {
        Value::PerTarget(Arc::new(f))
    }

    pub fn resolve(&self, index: usize, snapshot: &TargetSnapshot) -> f32 {
        match self {
            Value::Fixed(v) => *v,
            Value::PerTarget(f) => f(index, snapshot),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Fixed(v)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Fixed(v) => write!(f, "Fixed({v})"),
            Value::PerTarget(_) => write!(f, "PerTarget(..)"),
        }
    }
}

/// One step of a timeline: a group of targets animated toward (or from)
/// a set of property values.
#[derive(Debug, Clone)]
pub struct Tween {
    pub(crate) target: String,
    pub(crate) from: Vec<(Property, Value)>,
    pub(crate) to: Vec<(Property, Value)>,
    pub(crate) duration: f32,
    pub(crate) ease: Ease,
    pub(crate) stagger: Stagger,
    pub(crate) position: Position,
    pub(crate) immediate_render: bool,
}

impl Tween {
    fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            from: Vec::new(),
            to: Vec::new(),
            duration: 0.5,
            ease: Ease::default(),
            stagger: Stagger::none(),
            position: Position::Append,
            immediate_render: false,
        }
    }

    /// Animate the group from its current values to the given ones.
    pub fn to(target: impl Into<String>) -> Self {
        Self::new(target)
    }

    /// Animate the group from the given values to its current ones.
    /// The start values are shown before the step begins.
    pub fn from(target: impl Into<String>) -> Self {
        Self {
            immediate_render: true,
            ..Self::new(target)
        }
    }

    /// Animate between explicit start and end values.
    pub fn from_to(target: impl Into<String>) -> Self {
        Self::new(target)
    }

    /// Add an end value.
    pub fn set(mut self, prop: Property, value: impl Into<Value>) -> Self {
        self.to.push((prop, value.into()));
        self
    }

    /// Add a start value.
    pub fn start_at(mut self, prop: Property, value: impl Into<Value>) -> Self {
        self.from.push((prop, value.into()));
        self
    }

    /// Add per-target end values for several properties from one trajectory
    /// function returning a whole [`PropertySet`].
    pub fn set_each(
        mut self,
        props: &[Property],
        f: impl Fn(usize, &TargetSnapshot) -> PropertySet + Send + Sync + 'static,
    ) -> Self {
        let f = Arc::new(f);
        for &prop in props {
            let f = Arc::clone(&f);
            self.to
                .push((prop, Value::per_target(move |i, snap| f(i, snap).get(prop))));
        }
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn immediate_render(mut self, immediate: bool) -> Self {
        self.immediate_render = immediate;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Every property this step writes, in declaration order.
    pub(crate) fn properties(&self) -> Vec<Property> {
        let mut props: Vec<Property> = Vec::new();
        for (prop, _) in self.from.iter().chain(self.to.iter()) {
            if !props.contains(prop) {
                props.push(*prop);
            }
        }
        props
    }

    pub(crate) fn from_value(&self, prop: Property) -> Option<&Value> {
        self.from.iter().find(|(p, _)| *p == prop).map(|(_, v)| v)
    }

    pub(crate) fn to_value(&self, prop: Property) -> Option<&Value> {
        self.to.iter().find(|(p, _)| *p == prop).map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_target_value_uses_snapshot() {
        let v = Value::per_target(|i, snap| snap.rect.x + i as f32);
        let snap = TargetSnapshot::new(Rect::new(10.0, 0.0, 4.0, 4.0), PropertySet::default());
        assert_eq!(v.resolve(2, &snap), 12.0);
        assert_eq!(Value::from(3.0).resolve(9, &snap), 3.0);
    }

    #[test]
    fn test_properties_are_deduplicated() {
        let tween = Tween::from_to("a")
            .start_at(Property::Y, -10.0)
            .start_at(Property::Opacity, 1.0)
            .set(Property::Y, 0.0)
            .set(Property::Opacity, 1.0);
        assert_eq!(tween.properties(), vec![Property::Y, Property::Opacity]);
    }

    #[test]
    fn test_set_each_splits_trajectory() {
        let tween = Tween::to("a").set_each(&[Property::X, Property::Rotation], |_, snap| {
            PropertySet {
                x: snap.rect.x * 2.0,
                rotation: 45.0,
                ..PropertySet::default()
            }
        });
        let snap = TargetSnapshot::new(Rect::new(5.0, 0.0, 1.0, 1.0), PropertySet::default());
        let x = tween.to_value(Property::X).map(|v| v.resolve(0, &snap));
        let rot = tween.to_value(Property::Rotation).map(|v| v.resolve(0, &snap));
        assert_eq!(x, Some(10.0));
        assert_eq!(rot, Some(45.0));
    }
}
