//! Scroll triggers: map a scroll range to progress and toggle events.

use std::str::FromStr;

use crema_core::{Rect, Viewport};
use tracing::debug;

use crate::error::{MotionError, Result};

/// A point along an element or the viewport, measured from its top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    Percent(f32),
    Px(f32),
}

impl Anchor {
    fn offset(self, length: f32) -> f32 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => length / 2.0,
            Anchor::Bottom => length,
            Anchor::Percent(p) => length * p / 100.0,
            Anchor::Px(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || MotionError::InvalidEdge(s.to_string());
        match s {
            "top" => Ok(Anchor::Top),
            "center" => Ok(Anchor::Center),
            "bottom" => Ok(Anchor::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map(Anchor::Percent).map_err(|_| bad())
                } else {
                    s.strip_suffix("px")
                        .unwrap_or(s)
                        .parse()
                        .map(Anchor::Px)
                        .map_err(|_| bad())
                }
            }
        }
    }
}

/// Where a trigger starts or ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerEdge {
    /// When `element` anchor meets `viewport` anchor, e.g. `"top 60%"`.
    Anchored { element: Anchor, viewport: Anchor },
    /// A distance past the resolved start, e.g. `"+=5000"`.
    Relative(f32),
}

impl TriggerEdge {
    /// Scroll offset at which this edge is reached. `element` is in page px.
    pub fn resolve(&self, element: Rect, viewport: Viewport, start: f32) -> f32 {
        match *self {
            TriggerEdge::Anchored {
                element: e,
                viewport: v,
            } => element.y + e.offset(element.height) - v.offset(viewport.height),
            TriggerEdge::Relative(d) => start + d,
        }
    }
}

impl FromStr for TriggerEdge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(rest) = trimmed.strip_prefix("+=") {
            return rest
                .trim()
                .parse()
                .map(TriggerEdge::Relative)
                .map_err(|_| MotionError::InvalidEdge(s.to_string()));
        }
        let mut parts = trimmed.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(e), Some(v), None) => Ok(TriggerEdge::Anchored {
                element: e.parse().map_err(|_| MotionError::InvalidEdge(s.to_string()))?,
                viewport: v.parse().map_err(|_| MotionError::InvalidEdge(s.to_string()))?,
            }),
            _ => Err(MotionError::InvalidEdge(s.to_string())),
        }
    }
}

/// What a toggle event does to the associated playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleAction {
    #[default]
    None,
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
}

impl FromStr for ToggleAction {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(ToggleAction::None),
            "play" => Ok(ToggleAction::Play),
            "pause" => Ok(ToggleAction::Pause),
            "resume" => Ok(ToggleAction::Resume),
            "reverse" => Ok(ToggleAction::Reverse),
            "restart" => Ok(ToggleAction::Restart),
            "reset" => Ok(ToggleAction::Reset),
            "complete" => Ok(ToggleAction::Complete),
            other => Err(MotionError::UnknownToggleAction(other.to_string())),
        }
    }
}

/// Actions for the four toggle events, in `enter leave enter-back leave-back` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl ToggleActions {
    pub fn for_event(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let actions = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<ToggleAction>>>()?;
        match actions.as_slice() {
            &[on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            _ => Err(MotionError::ToggleActionCount(s.to_string())),
        }
    }
}

/// Lifecycle of a trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerState {
    /// Not bound to scroll yet.
    #[default]
    Idle,
    /// Bound, scroll is before the start.
    Armed,
    /// Scroll is inside the range; progress tracks scroll.
    Scrubbing,
    /// Scroll is past the end.
    Complete,
}

/// Crossing of a trigger boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Forward past the start.
    Enter,
    /// Forward past the end.
    Leave,
    /// Backward past the end.
    EnterBack,
    /// Backward past the start.
    LeaveBack,
}

/// A scroll range `[start, end]` with toggle actions and a state machine.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    start: f32,
    end: f32,
    actions: ToggleActions,
    once: bool,
    frozen: bool,
    state: TriggerState,
}

impl ScrollTrigger {
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start,
            end: end.max(start),
            actions: ToggleActions::default(),
            once: false,
            frozen: false,
            state: TriggerState::Idle,
        }
    }

    /// Resolve `start` and `end` edges against an element laid out at
    /// `element` (page px). A missing end means the element's bottom meets
    /// the viewport top.
    pub fn from_edges(
        element: Rect,
        viewport: Viewport,
        start: &TriggerEdge,
        end: Option<&TriggerEdge>,
    ) -> Self {
        let start_px = start.resolve(element, viewport, 0.0);
        let end_px = end
            .copied()
            .unwrap_or(TriggerEdge::Anchored {
                element: Anchor::Bottom,
                viewport: Anchor::Top,
            })
            .resolve(element, viewport, start_px);
        Self::new(start_px, end_px)
    }

    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.actions = actions;
        self
    }

    /// A one-shot trigger stops reacting after its first enter.
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn actions(&self) -> ToggleActions {
        self.actions
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stop reacting to scroll, as a one-shot trigger does after firing.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Region of the range that `scroll` falls in. Pure.
    pub fn region(&self, scroll: f32) -> TriggerState {
        if scroll < self.start {
            TriggerState::Armed
        } else if scroll > self.end || (self.end <= self.start && scroll >= self.start) {
            TriggerState::Complete
        } else {
            TriggerState::Scrubbing
        }
    }

    /// Progress through the range, 0..1. Pure.
    pub fn progress(&self, scroll: f32) -> f32 {
        if self.end <= self.start {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Arm the trigger at the given scroll offset and report the events a
    /// page loaded already scrolled would see.
    pub fn bind(&mut self, scroll: f32) -> Vec<TriggerEvent> {
        if self.state == TriggerState::Idle {
            self.state = TriggerState::Armed;
        }
        self.update(scroll)
    }

    /// Advance the state machine to `scroll`, returning the boundaries crossed.
    pub fn update(&mut self, scroll: f32) -> Vec<TriggerEvent> {
        if self.state == TriggerState::Idle || self.frozen {
            return Vec::new();
        }

        let next = self.region(scroll);
        let events = match (self.state, next) {
            (TriggerState::Armed, TriggerState::Scrubbing) => vec![TriggerEvent::Enter],
            (TriggerState::Armed, TriggerState::Complete) => {
                vec![TriggerEvent::Enter, TriggerEvent::Leave]
            }
            (TriggerState::Scrubbing, TriggerState::Complete) => vec![TriggerEvent::Leave],
            (TriggerState::Scrubbing, TriggerState::Armed) => vec![TriggerEvent::LeaveBack],
            (TriggerState::Complete, TriggerState::Scrubbing) => vec![TriggerEvent::EnterBack],
            (TriggerState::Complete, TriggerState::Armed) => {
                vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
            }
            _ => Vec::new(),
        };

        if !events.is_empty() {
            debug!(
                from = ?self.state,
                to = ?next,
                ?events,
                start = self.start,
                end = self.end,
                "scroll trigger transition"
            );
        }
        self.state = next;

        if self.once && events.contains(&TriggerEvent::Enter) {
            self.frozen = true;
        }
        events
    }
}
