//! Distribution of start offsets across a group of targets.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Where the stagger wave starts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StaggerFrom {
    #[default]
    Start,
    End,
    /// Middle targets first, spreading outward.
    Center,
    /// Outermost targets first, converging on the middle.
    Edges,
    /// A seeded random order.
    Random(u64),
    /// Spreading outward from one target.
    Index(usize),
}

/// How far apart consecutive start offsets are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaggerSpacing {
    /// Seconds between neighbouring targets.
    Each(f32),
    /// Total spread between the first and the last target.
    Amount(f32),
}

/// Start-offset policy for a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    pub spacing: StaggerSpacing,
    pub from: StaggerFrom,
}

impl Default for Stagger {
    fn default() -> Self {
        Self::none()
    }
}

impl Stagger {
    /// Every target starts together.
    pub fn none() -> Self {
        Self::each(0.0)
    }

    pub fn each(seconds: f32) -> Self {
        Self {
            spacing: StaggerSpacing::Each(seconds),
            from: StaggerFrom::Start,
        }
    }

    pub fn amount(seconds: f32) -> Self {
        Self {
            spacing: StaggerSpacing::Amount(seconds),
            from: StaggerFrom::Start,
        }
    }

    pub fn from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    /// Start offset of every target, in target order.
    pub fn offsets(&self, count: usize) -> Vec<f32> {
        if count == 0 {
            return Vec::new();
        }

        let last = (count - 1) as f32;
        let mid = last / 2.0;
        let distances: Vec<f32> = match self.from {
            StaggerFrom::Start => (0..count).map(|i| i as f32).collect(),
            StaggerFrom::End => (0..count).map(|i| last - i as f32).collect(),
            StaggerFrom::Center => (0..count).map(|i| (i as f32 - mid).abs()).collect(),
            StaggerFrom::Edges => (0..count).map(|i| mid - (i as f32 - mid).abs()).collect(),
            StaggerFrom::Index(origin) => {
                let origin = origin.min(count - 1) as f32;
                (0..count).map(|i| (i as f32 - origin).abs()).collect()
            }
            StaggerFrom::Random(seed) => {
                let mut order: Vec<usize> = (0..count).collect();
                order.shuffle(&mut StdRng::seed_from_u64(seed));
                let mut ranks = vec![0.0; count];
                for (rank, &target) in order.iter().enumerate() {
                    ranks[target] = rank as f32;
                }
                ranks
            }
        };

        // The first target to start always starts at 0.
        let min = distances.iter().copied().fold(f32::MAX, f32::min);
        let span = distances.iter().copied().fold(0.0f32, f32::max) - min;
        match self.spacing {
            StaggerSpacing::Each(each) => distances.iter().map(|d| (d - min) * each).collect(),
            StaggerSpacing::Amount(amount) => {
                if span <= 0.0 {
                    vec![0.0; count]
                } else {
                    distances.iter().map(|d| (d - min) / span * amount).collect()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_from_start() {
        let offsets = Stagger::each(0.1).offsets(4);
        let expected = [0.0, 0.1, 0.2, 0.3];
        for (o, e) in offsets.iter().zip(expected) {
            assert!((o - e).abs() < 1e-6);
        }
    }

    #[test]
    fn test_center_drops_middle_first() {
        let offsets = Stagger::amount(5.0).from(StaggerFrom::Center).offsets(5);
        assert_eq!(offsets, vec![5.0, 2.5, 0.0, 2.5, 5.0]);
    }

    #[test]
    fn test_edges_is_inverse_of_center() {
        let offsets = Stagger::amount(1.0).from(StaggerFrom::Edges).offsets(5);
        assert_eq!(offsets, vec![0.0, 0.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_amount_bounds_spread() {
        for from in [
            StaggerFrom::Start,
            StaggerFrom::End,
            StaggerFrom::Center,
            StaggerFrom::Edges,
            StaggerFrom::Random(7),
            StaggerFrom::Index(3),
        ] {
            let offsets = Stagger::amount(1.0).from(from).offsets(50);
            let max = offsets.iter().copied().fold(0.0f32, f32::max);
            let min = offsets.iter().copied().fold(f32::MAX, f32::min);
            assert!((max - 1.0).abs() < 1e-5, "{from:?}");
            assert_eq!(min, 0.0, "{from:?}");
        }
    }

    #[test]
    fn test_even_center_starts_both_middle_targets_at_zero() {
        let offsets = Stagger::amount(1.0).from(StaggerFrom::Center).offsets(4);
        assert_eq!(offsets, vec![1.0, 0.0, 0.0, 1.0]);

        let offsets = Stagger::each(0.1).from(StaggerFrom::Center).offsets(4);
        assert_eq!(offsets[1], 0.0);
        assert_eq!(offsets[2], 0.0);
        assert!((offsets[0] - 0.1).abs() < 1e-6);

        let offsets = Stagger::amount(2.0).from(StaggerFrom::Edges).offsets(6);
        assert_eq!(offsets[0], 0.0);
        assert_eq!(offsets[5], 0.0);
        assert_eq!(offsets[2], 2.0);
        assert_eq!(offsets[3], 2.0);
    }

    #[test]
    fn test_random_is_a_seeded_permutation() {
        let a = Stagger::each(1.0).from(StaggerFrom::Random(42)).offsets(10);
        let b = Stagger::each(1.0).from(StaggerFrom::Random(42)).offsets(10);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_by(|x, y| x.total_cmp(y));
        let expected: Vec<f32> = (0..10).map(|i| i as f32).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_single_and_empty_groups() {
        assert!(Stagger::amount(5.0).offsets(0).is_empty());
        assert_eq!(Stagger::amount(5.0).from(StaggerFrom::Center).offsets(1), vec![0.0]);
    }
}
