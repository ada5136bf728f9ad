//! Timelines bound to scroll triggers.

use crate::scrub::{Scrub, ScrubPlayhead};
use crate::timeline::{Sample, Timeline};
use crate::trigger::{ScrollTrigger, ToggleAction, TriggerEvent, TriggerState};

/// Direction of a time-driven playhead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Reversing,
    Paused,
}

/// A time-driven playhead that toggle actions steer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    duration: f32,
    time: f32,
    state: PlayState,
    resume_to: PlayState,
    started: bool,
}

impl Playback {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            time: 0.0,
            state: PlayState::Idle,
            resume_to: PlayState::Playing,
            started: false,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            if self.started { 1.0 } else { 0.0 }
        } else {
            self.time / self.duration
        }
    }

    /// Playhead time, or `None` before the first play.
    pub fn position(&self) -> Option<f32> {
        self.started.then_some(self.time)
    }

    /// Time the playhead is heading to once running playback finishes.
    pub fn settled_time(&self) -> f32 {
        match self.state {
            PlayState::Playing => self.duration,
            PlayState::Reversing => 0.0,
            PlayState::Idle | PlayState::Paused => self.time,
        }
    }

    pub fn apply(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::None => {}
            ToggleAction::Play => {
                self.started = true;
                self.state = PlayState::Playing;
            }
            ToggleAction::Reverse => {
                self.started = true;
                self.state = PlayState::Reversing;
            }
            ToggleAction::Restart => {
                self.started = true;
                self.time = 0.0;
                self.state = PlayState::Playing;
            }
            ToggleAction::Reset => {
                self.started = false;
                self.time = 0.0;
                self.state = PlayState::Idle;
            }
            ToggleAction::Complete => {
                self.started = true;
                self.time = self.duration;
                self.state = PlayState::Idle;
            }
            ToggleAction::Pause => {
                if matches!(self.state, PlayState::Playing | PlayState::Reversing) {
                    self.resume_to = self.state;
                }
                self.state = PlayState::Paused;
            }
            ToggleAction::Resume => {
                if self.state == PlayState::Paused {
                    self.state = self.resume_to;
                }
            }
        }
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        match self.state {
            PlayState::Playing => {
                self.time = (self.time + dt).min(self.duration);
                if self.time >= self.duration {
                    self.state = PlayState::Idle;
                }
            }
            PlayState::Reversing => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.state = PlayState::Idle;
                }
            }
            PlayState::Idle | PlayState::Paused => {}
        }
    }
}

/// A timeline played in time, started and reversed by scroll toggle events.
#[derive(Debug, Clone)]
pub struct ToggledTimeline {
    trigger: ScrollTrigger,
    timeline: Timeline,
    playback: Playback,
}

impl ToggledTimeline {
    pub fn new(trigger: ScrollTrigger, timeline: Timeline) -> Self {
        let playback = Playback::new(timeline.duration());
        Self {
            trigger,
            timeline,
            playback,
        }
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn bind(&mut self, scroll: f32) {
        let events = self.trigger.bind(scroll);
        self.dispatch(&events);
    }

    pub fn update(&mut self, scroll: f32) {
        let events = self.trigger.update(scroll);
        self.dispatch(&events);
    }

    fn dispatch(&mut self, events: &[TriggerEvent]) {
        let actions = self.trigger.actions();
        for &event in events {
            self.playback.apply(actions.for_event(event));
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.playback.tick(dt);
    }

    /// Take over the playhead of the same timeline bound under another
    /// layout. A fired one-shot stays fired; a playhead heading the same way
    /// keeps its place instead of starting over.
    pub fn carry_over(&mut self, earlier: &ToggledTimeline) {
        if earlier.trigger.is_frozen() {
            self.trigger.freeze();
            self.playback = earlier.playback;
        } else if earlier.playback.position().is_some()
            && self.playback.position().is_some()
            && earlier.playback.settled_time() == self.playback.settled_time()
        {
            self.playback = earlier.playback;
        }
    }

    /// Properties at the current playhead.
    pub fn sample(&self) -> Sample {
        match self.playback.position() {
            Some(time) => self.timeline.sample(time),
            None => self.timeline.initial(),
        }
    }

    /// Properties once the running playback has finished.
    pub fn settled(&self) -> Sample {
        if self.playback.position().is_none() {
            return self.timeline.initial();
        }
        self.timeline.sample(self.playback.settled_time())
    }
}

/// A timeline whose progress is bound to scroll.
#[derive(Debug, Clone)]
pub struct ScrubbedTimeline {
    trigger: ScrollTrigger,
    timeline: Timeline,
    playhead: ScrubPlayhead,
}

impl ScrubbedTimeline {
    pub fn new(trigger: ScrollTrigger, timeline: Timeline, scrub: Scrub) -> Self {
        Self {
            trigger,
            timeline,
            playhead: ScrubPlayhead::new(scrub),
        }
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> TriggerState {
        self.trigger.state()
    }

    /// Displayed progress, after smoothing.
    pub fn progress(&self) -> f32 {
        self.playhead.current()
    }

    /// Bind to scroll and jump the playhead to the current position.
    pub fn bind(&mut self, scroll: f32) {
        self.trigger.bind(scroll);
        self.playhead.snap(self.trigger.progress(scroll));
    }

    pub fn update(&mut self, scroll: f32, dt: f32) {
        self.trigger.update(scroll);
        self.playhead.advance(self.trigger.progress(scroll), dt);
    }

    /// Properties at the displayed progress.
    pub fn sample(&self) -> Sample {
        self.timeline.sample_progress(self.playhead.current())
    }

    /// Properties at exactly the scroll-derived progress. Pure.
    pub fn sample_at(&self, scroll: f32) -> Sample {
        self.timeline.sample_progress(self.trigger.progress(scroll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::Ease;
    use crate::stagger::Stagger;
    use crate::timeline::Stage;
    use crate::tween::{TargetSnapshot, Tween};
    use crema_core::{Property, PropertySet, Rect};

    fn reveal_group() -> ToggledTimeline {
        let hidden = PropertySet::default()
            .with(Property::Y, 50.0)
            .with(Property::Opacity, 0.0);
        let targets = (0..3)
            .map(|i| TargetSnapshot::new(Rect::new(0.0, i as f32 * 40.0, 300.0, 30.0), hidden))
            .collect();
        let stage = Stage::new().with_group("origins-text", targets);
        let timeline = Timeline::build(
            &[Tween::to("origins-text")
                .set(Property::Y, 0.0)
                .set(Property::Opacity, 1.0)
                .duration(1.0)
                .stagger(Stagger::each(0.2))
                .ease("power3.out".parse().unwrap())],
            &stage,
        );
        let trigger = ScrollTrigger::new(1000.0, 2000.0)
            .toggle_actions("play none none reverse".parse().unwrap());
        ToggledTimeline::new(trigger, timeline)
    }

    #[test]
    fn test_reversible_group_settles_both_ways() {
        let mut group = reveal_group();
        group.bind(0.0);
        for p in &group.settled()["origins-text"] {
            assert_eq!((p.opacity, p.y), (0.0, 50.0));
        }

        group.update(1200.0);
        for p in &group.settled()["origins-text"] {
            assert_eq!((p.opacity, p.y), (1.0, 0.0));
        }

        group.update(400.0);
        for p in &group.settled()["origins-text"] {
            assert_eq!((p.opacity, p.y), (0.0, 50.0));
        }
    }

    #[test]
    fn test_toggled_playback_runs_in_time() {
        let mut group = reveal_group();
        group.bind(0.0);
        group.update(1200.0);
        assert_eq!(group.playback().state(), PlayState::Playing);

        group.tick(0.5);
        let mid = group.sample();
        let first = mid["origins-text"][0];
        assert!(first.opacity > 0.0 && first.opacity < 1.0);

        group.tick(5.0);
        assert_eq!(group.playback().state(), PlayState::Idle);
        assert_eq!(group.sample(), group.settled());
    }

    #[test]
    fn test_carry_over_does_not_replay() {
        let mut earlier = reveal_group();
        earlier.bind(0.0);
        earlier.update(1200.0);
        earlier.tick(5.0);

        let mut rebuilt = reveal_group();
        rebuilt.bind(1200.0);
        assert_eq!(rebuilt.playback().time(), 0.0);
        rebuilt.carry_over(&earlier);
        assert_eq!(rebuilt.playback().state(), PlayState::Idle);
        assert_eq!(rebuilt.sample(), earlier.sample());

        // A rebuild above the trigger still reverses.
        let mut above = reveal_group();
        above.bind(0.0);
        above.carry_over(&earlier);
        assert_eq!(above.playback().position(), None);
    }

    #[test]
    fn test_carry_over_keeps_one_shot_fired() {
        let one_shot = || {
            let group = reveal_group();
            let trigger = group.trigger().clone().once(true);
            ToggledTimeline::new(trigger, group.timeline)
        };
        let mut earlier = one_shot();
        earlier.bind(1200.0);
        earlier.tick(5.0);
        assert!(earlier.trigger().is_frozen());

        let mut rebuilt = one_shot();
        rebuilt.bind(0.0);
        rebuilt.carry_over(&earlier);
        assert!(rebuilt.trigger().is_frozen());
        assert_eq!(rebuilt.sample(), earlier.sample());
        rebuilt.update(1200.0);
        assert_eq!(rebuilt.playback().state(), PlayState::Idle);
    }

    #[test]
    fn test_playback_pause_resume() {
        let mut pb = Playback::new(2.0);
        assert_eq!(pb.position(), None);
        pb.apply(ToggleAction::Reverse);
        pb.apply(ToggleAction::Pause);
        pb.apply(ToggleAction::Resume);
        assert_eq!(pb.state(), PlayState::Reversing);

        pb.apply(ToggleAction::Play);
        pb.tick(0.5);
        pb.apply(ToggleAction::Pause);
        pb.tick(1.0);
        assert_eq!(pb.time(), 0.5);
        assert_eq!(pb.settled_time(), 0.5);
        pb.apply(ToggleAction::Resume);
        assert_eq!(pb.settled_time(), 2.0);

        pb.apply(ToggleAction::Reset);
        assert_eq!(pb.position(), None);
        pb.apply(ToggleAction::Complete);
        assert_eq!(pb.progress(), 1.0);
    }

    #[test]
    fn test_scrubbed_timeline_is_idempotent_per_scroll() {
        let stage = Stage::new().with_group(
            "leaf",
            vec![TargetSnapshot::new(Rect::default(), PropertySet::default())],
        );
        let timeline = Timeline::build(
            &[Tween::to("leaf")
                .set(Property::Y, -200.0)
                .set(Property::Rotation, 15.0)
                .ease(Ease::None)
                .duration(1.0)],
            &stage,
        );
        let mut scrubbed =
            ScrubbedTimeline::new(ScrollTrigger::new(0.0, 1000.0), timeline, Scrub::Smoothed(1.5));
        scrubbed.bind(500.0);
        assert_eq!(scrubbed.state(), TriggerState::Scrubbing);
        assert_eq!(scrubbed.sample_at(500.0), scrubbed.sample_at(500.0));
        assert_eq!(scrubbed.sample_at(500.0)["leaf"][0].y, -100.0);
        assert_eq!(scrubbed.sample(), scrubbed.sample_at(500.0));

        scrubbed.update(1000.0, 0.1);
        let lagging = scrubbed.progress();
        assert!(lagging > 0.5 && lagging < 1.0);
        assert_eq!(scrubbed.sample_at(1000.0)["leaf"][0].rotation, 15.0);
    }
}
