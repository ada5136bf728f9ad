//! Batched one-shot reveals: elements entering together are staggered together.

use tracing::debug;

use crate::ease::Ease;

/// One-shot enter triggers for a list of elements.
#[derive(Debug, Clone)]
pub struct Batch {
    starts: Vec<f32>,
    entered_at: Vec<Option<f32>>,
    each: f32,
    duration: f32,
    ease: Ease,
}

impl Batch {
    /// `starts` holds the scroll offset at which each element enters.
    pub fn new(starts: Vec<f32>, each: f32, duration: f32, ease: Ease) -> Self {
        let entered_at = vec![None; starts.len()];
        Self {
            starts,
            entered_at,
            each,
            duration,
            ease,
        }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn is_entered(&self, index: usize) -> bool {
        self.entered_at.get(index).is_some_and(Option::is_some)
    }

    /// Record elements reached by `scroll` at clock time `now`. Returns the
    /// newly entered indices; each starts `each` seconds after the previous
    /// one in the same batch.
    pub fn update(&mut self, scroll: f32, now: f32) -> Vec<usize> {
        let entered: Vec<usize> = self
            .starts
            .iter()
            .enumerate()
            .filter(|&(i, &start)| self.entered_at[i].is_none() && scroll >= start)
            .map(|(i, _)| i)
            .collect();

        for (rank, &i) in entered.iter().enumerate() {
            self.entered_at[i] = Some(now + rank as f32 * self.each);
        }
        if !entered.is_empty() {
            debug!(?entered, scroll, "batch entered");
        }
        entered
    }

    /// Keep the enter times of elements that already entered in `earlier`.
    pub fn carry_over(&mut self, earlier: &Batch) {
        for (mine, theirs) in self.entered_at.iter_mut().zip(&earlier.entered_at) {
            if theirs.is_some() {
                *mine = *theirs;
            }
        }
    }

    /// Eased progress of one element at clock time `now`; 0 before it enters.
    pub fn progress(&self, index: usize, now: f32) -> f32 {
        let Some(Some(started)) = self.entered_at.get(index) else {
            return 0.0;
        };
        if self.duration <= 0.0 {
            return if now >= *started { 1.0 } else { 0.0 };
        }
        self.ease.apply((now - started) / self.duration)
    }
}
