//! Timelines: ordered tweens resolved once against cached target snapshots.

use std::collections::HashMap;

use crema_core::{Property, PropertySet};
use tracing::debug;

use crate::ease::Ease;
use crate::tween::{TargetSnapshot, Tween, lerp};

/// Properties of every target of every group, keyed by group name.
pub type Sample = HashMap<String, Vec<PropertySet>>;

/// Named groups of targets with their cached snapshots.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    groups: Vec<(String, Vec<TargetSnapshot>)>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group. Re-registering a name replaces its targets.
    pub fn add_group(&mut self, name: impl Into<String>, targets: Vec<TargetSnapshot>) {
        let name = name.into();
        match self.groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = targets,
            None => self.groups.push((name, targets)),
        }
    }

    pub fn with_group(mut self, name: impl Into<String>, targets: Vec<TargetSnapshot>) -> Self {
        self.add_group(name, targets);
        self
    }

    pub fn group(&self, name: &str) -> Option<&[TargetSnapshot]> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.as_slice())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|(n, _)| n == name)
    }
}

/// One property of one target across a step.
#[derive(Debug, Clone, Copy)]
struct Track {
    prop: Property,
    from: f32,
    to: f32,
}

#[derive(Debug, Clone)]
struct ResolvedTarget {
    index: usize,
    start: f32,
    tracks: Vec<Track>,
}

#[derive(Debug, Clone)]
struct ResolvedStep {
    group: usize,
    start: f32,
    end: f32,
    duration: f32,
    ease: Ease,
    immediate_render: bool,
    targets: Vec<ResolvedTarget>,
}

impl ResolvedStep {
    /// Write this step's contribution for `target` at `time` into `props`.
    fn apply(&self, target: &ResolvedTarget, time: f32, props: &mut PropertySet) {
        if time < target.start {
            if self.immediate_render {
                for track in &target.tracks {
                    props.set(track.prop, track.from);
                }
            }
            return;
        }
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (time - target.start) / self.duration
        };
        let eased = self.ease.apply(t);
        for track in &target.tracks {
            props.set(track.prop, lerp(track.from, track.to, eased));
        }
    }
}

/// An ordered sequence of steps with every offset and per-target value
/// resolved at construction.
#[derive(Debug, Clone)]
pub struct Timeline {
    names: Vec<String>,
    bases: Vec<Vec<PropertySet>>,
    steps: Vec<ResolvedStep>,
    duration: f32,
}

impl Timeline {
    /// Resolve `tweens` in declaration order against the groups of `stage`.
    ///
    /// Tweens whose group is unknown or empty are skipped and do not move the
    /// timeline end.
    pub fn build(tweens: &[Tween], stage: &Stage) -> Self {
        let names: Vec<String> = stage.groups.iter().map(|(n, _)| n.clone()).collect();
        let bases: Vec<Vec<PropertySet>> = stage
            .groups
            .iter()
            .map(|(_, targets)| targets.iter().map(|t| t.base).collect())
            .collect();

        let mut timeline = Self {
            names,
            bases,
            steps: Vec::with_capacity(tweens.len()),
            duration: 0.0,
        };

        let mut prev_start = 0.0;
        let mut prev_end = 0.0;

        for tween in tweens {
            let Some(group) = stage.index_of(&tween.target) else {
                debug!(group = %tween.target, "tween has no matching group, skipping");
                continue;
            };
            let snapshots = &stage.groups[group].1;
            if snapshots.is_empty() {
                debug!(group = %tween.target, "tween group is empty, skipping");
                continue;
            }

            let start = tween
                .position
                .resolve(timeline.duration, prev_start, prev_end);
            let offsets = tween.stagger.offsets(snapshots.len());
            let props = tween.properties();

            let targets: Vec<ResolvedTarget> = snapshots
                .iter()
                .enumerate()
                .map(|(index, snapshot)| {
                    let target_start = start + offsets[index];
                    let current = timeline.value_at(group, index, target_start);
                    let tracks = props
                        .iter()
                        .map(|&prop| Track {
                            prop,
                            from: tween
                                .from_value(prop)
                                .map(|v| v.resolve(index, snapshot))
                                .unwrap_or_else(|| current.get(prop)),
                            to: tween
                                .to_value(prop)
                                .map(|v| v.resolve(index, snapshot))
                                .unwrap_or_else(|| current.get(prop)),
                        })
                        .collect();
                    ResolvedTarget {
                        index,
                        start: target_start,
                        tracks,
                    }
                })
                .collect();

            let spread = offsets.iter().copied().fold(0.0f32, f32::max);
            let end = start + spread + tween.duration;

            timeline.steps.push(ResolvedStep {
                group,
                start,
                end,
                duration: tween.duration,
                ease: tween.ease,
                immediate_render: tween.immediate_render,
                targets,
            });

            prev_start = start;
            prev_end = end;
            timeline.duration = timeline.duration.max(end);
        }

        timeline
    }

    /// Total length in seconds: the latest end of any step.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Start and end of every resolved step, in declaration order.
    pub fn step_spans(&self) -> Vec<(f32, f32)> {
        self.steps.iter().map(|s| (s.start, s.end)).collect()
    }

    fn value_at(&self, group: usize, index: usize, time: f32) -> PropertySet {
        let mut props = self.bases[group][index];
        for step in self.steps.iter().filter(|s| s.group == group) {
            if let Some(target) = step.targets.iter().find(|t| t.index == index) {
                step.apply(target, time, &mut props);
            }
        }
        props
    }

    /// Properties of every target at `time` seconds.
    pub fn sample(&self, time: f32) -> Sample {
        self.evaluate(time.clamp(0.0, self.duration))
    }

    /// Properties before playback has begun: the bases, with the start values
    /// of immediate-render steps applied.
    pub fn initial(&self) -> Sample {
        self.evaluate(-1.0)
    }

    fn evaluate(&self, time: f32) -> Sample {
        let mut out: Vec<Vec<PropertySet>> = self.bases.clone();
        for step in &self.steps {
            let group = &mut out[step.group];
            for target in &step.targets {
                step.apply(target, time, &mut group[target.index]);
            }
        }
        self.names.iter().cloned().zip(out).collect()
    }

    /// Properties of every target at a progress fraction in 0..1.
    pub fn sample_progress(&self, progress: f32) -> Sample {
        self.sample(progress.clamp(0.0, 1.0) * self.duration)
    }

    /// Base properties, before any step has run.
    pub fn base(&self) -> Sample {
        self.names.iter().cloned().zip(self.bases.clone()).collect()
    }
}
