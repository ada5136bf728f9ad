//! Magnetic hover on menu cards: the cup image follows the pointer and the
//! background number drifts the other way.

use crema_core::{Point, Property, PropertySet, Rect, Viewport};
use crema_motion::{Ease, EaseDir, lerp};

/// Image offset per px of pointer offset.
const IMAGE_FOLLOW: f32 = 0.2;
/// Resting lift of the image above the card, in px.
const IMAGE_LIFT: f32 = -50.0;
/// Image tilt in degrees per px of horizontal pointer offset.
const IMAGE_TILT: f32 = 0.05;
/// Number offset per px of pointer offset (opposite direction).
const NUMBER_FOLLOW: f32 = -0.1;

const FOLLOW_SECS: f32 = 0.6;
const RELEASE_SECS: f32 = 1.0;

/// Hovering needs a viewport strictly wider than the mobile breakpoint.
pub fn hover_enabled(viewport: Viewport, mobile_breakpoint: f32) -> bool {
    viewport.width > mobile_breakpoint
}

/// Resting image properties.
pub fn image_rest() -> PropertySet {
    PropertySet::default().with(Property::Y, IMAGE_LIFT)
}

/// Image and number targets for a pointer over `card`.
pub fn magnetic_targets(pointer: Point, card: Rect) -> (PropertySet, PropertySet) {
    let center = card.center();
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    let image = PropertySet {
        x: dx * IMAGE_FOLLOW,
        y: dy * IMAGE_FOLLOW + IMAGE_LIFT,
        rotation: dx * IMAGE_TILT,
        ..PropertySet::default()
    };
    let number = PropertySet {
        x: dx * NUMBER_FOLLOW,
        y: dy * NUMBER_FOLLOW,
        ..PropertySet::default()
    };
    (image, number)
}

/// A short time-driven transition between two property sets.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glide {
    from: PropertySet,
    to: PropertySet,
    started: f32,
    duration: f32,
    ease: Ease,
}

impl Glide {
    fn resting(at: PropertySet) -> Self {
        Self {
            from: at,
            to: at,
            started: 0.0,
            duration: 0.0,
            ease: Ease::None,
        }
    }

    fn at(&self, now: f32) -> PropertySet {
        if self.duration <= 0.0 || now >= self.started + self.duration {
            return self.to;
        }
        let eased = self.ease.apply((now - self.started) / self.duration);
        let mut out = self.to;
        for prop in [Property::X, Property::Y, Property::Rotation] {
            out.set(prop, lerp(self.from.get(prop), self.to.get(prop), eased));
        }
        out
    }

    fn retarget(&mut self, to: PropertySet, now: f32, duration: f32, ease: Ease) {
        *self = Self {
            from: self.at(now),
            to,
            started: now,
            duration,
            ease,
        };
    }
}

/// Hover state of one menu card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticCard {
    rect: Rect,
    hovered: bool,
    image: Glide,
    number: Glide,
}

impl MagneticCard {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            hovered: false,
            image: Glide::resting(image_rest()),
            number: Glide::resting(PropertySet::default()),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move the card's on-screen rectangle as the page scrolls. A resting
    /// pointer is checked against the new rectangle.
    pub fn set_rect(&mut self, rect: Rect, pointer: Option<Point>, now: f32) {
        if rect == self.rect {
            return;
        }
        self.rect = rect;
        if let Some(pointer) = pointer {
            self.pointer_move(pointer, now);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Follow a pointer move; leaving the card releases it.
    pub fn pointer_move(&mut self, pointer: Point, now: f32) {
        if !self.rect.contains(pointer) {
            if self.hovered {
                self.pointer_leave(now);
            }
            return;
        }
        self.hovered = true;
        let (image, number) = magnetic_targets(pointer, self.rect);
        let ease = Ease::power(2, EaseDir::Out);
        self.image.retarget(image, now, FOLLOW_SECS, ease);
        self.number.retarget(number, now, FOLLOW_SECS, ease);
    }

    pub fn pointer_leave(&mut self, now: f32) {
        self.hovered = false;
        self.image.retarget(
            image_rest(),
            now,
            RELEASE_SECS,
            Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
        );
        self.number.retarget(
            PropertySet::default(),
            now,
            RELEASE_SECS,
            Ease::power(2, EaseDir::Out),
        );
    }

    /// Image and number properties at clock time `now`.
    pub fn sample(&self, now: f32) -> (PropertySet, PropertySet) {
        (self.image.at(now), self.number.at(now))
    }
}
