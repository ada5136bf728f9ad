//! Timeline player for the crema landing page.
//!
//! Steps are declared as [`Tween`]s, placed on a [`Timeline`] with
//! [`Position`] parameters and bound to scroll with a [`ScrollTrigger`].
//! Everything is evaluated from explicit inputs (time, scroll offset and the
//! per-target snapshots captured when the timeline was built), so sampling
//! the same input twice always yields the same properties.

mod batch;
mod ease;
mod error;
mod frames;
mod pin;
mod player;
mod position;
mod scrub;
mod stagger;
mod timeline;
mod trigger;
mod tween;

pub use batch::Batch;
pub use ease::{Ease, EaseDir};
pub use error::{MotionError, Result};
pub use frames::{FrameScrubber, FrameSeek, frame_for_progress};
pub use pin::PinSpacer;
pub use player::{Playback, PlayState, ScrubbedTimeline, ToggledTimeline};
pub use position::Position;
pub use scrub::{Scrub, ScrubPlayhead};
pub use stagger::{Stagger, StaggerFrom, StaggerSpacing};
pub use timeline::{Sample, Stage, Timeline};
pub use trigger::{
    Anchor, ScrollTrigger, ToggleAction, ToggleActions, TriggerEdge, TriggerEvent, TriggerState,
};
pub use tween::{TargetFn, TargetSnapshot, Tween, Value, lerp};
