//! Animatable visual properties of one element.

/// A single animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Horizontal translation in px.
    X,
    /// Vertical translation in px.
    Y,
    /// Rotation in degrees.
    Rotation,
    /// Uniform scale factor.
    Scale,
    /// Opacity in 0.0-1.0.
    Opacity,
    /// Element height (px, or percent for fill elements).
    Height,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::X,
        Property::Y,
        Property::Rotation,
        Property::Scale,
        Property::Opacity,
        Property::Height,
    ];
}

/// Current value of every animatable property of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertySet {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    pub height: f32,
}

impl Default for PropertySet {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            height: 0.0,
        }
    }
}

impl PropertySet {
    pub fn get(&self, prop: Property) -> f32 {
        match prop {
            Property::X => self.x,
            Property::Y => self.y,
            Property::Rotation => self.rotation,
            Property::Scale => self.scale,
            Property::Opacity => self.opacity,
            Property::Height => self.height,
        }
    }

    pub fn set(&mut self, prop: Property, value: f32) {
        match prop {
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::Rotation => self.rotation = value,
            Property::Scale => self.scale = value,
            Property::Opacity => self.opacity = value,
            Property::Height => self.height = value,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, prop: Property, value: f32) -> Self {
        self.set(prop, value);
        self
    }

    /// An element is visible when it has some opacity and a non-zero scale.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.01 && self.scale > 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_every_property() {
        let mut set = PropertySet::default();
        for (i, prop) in Property::ALL.into_iter().enumerate() {
            set.set(prop, i as f32 + 0.5);
            assert_eq!(set.get(prop), i as f32 + 0.5);
        }
    }

    #[test]
    fn test_visibility() {
        assert!(PropertySet::default().is_visible());
        assert!(!PropertySet::default().with(Property::Opacity, 0.0).is_visible());
        assert!(!PropertySet::default().with(Property::Scale, 0.0).is_visible());
    }
}
