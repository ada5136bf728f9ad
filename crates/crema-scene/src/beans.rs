//! Coffee-bean particle field: generation and the roll-into-the-drain trajectory.

use crema_config::Config;
use crema_core::{DeviceClass, Point, PropertySet, Rect, Viewport};
use crema_motion::TargetSnapshot;
use rand::Rng;

/// Circumference of a bean in px, used to turn travel into rotation.
pub const BEAN_CIRCUMFERENCE: f32 = 94.0;

/// Extra spin on top of a pure roll.
pub const ROLL_SPIN: f32 = 1.5;

/// How far beans fall into the drain, in px.
pub const DRAIN_DROP: f32 = 300.0;

/// Scale a bean shrinks to inside the drain.
pub const DRAIN_SCALE: f32 = 0.2;

/// Footprint of one bean in px (one terminal cell).
pub const BEAN_SIZE: (f32, f32) = (8.0, 16.0);

/// Stacking index used on narrow viewports.
const MOBILE_Z_INDEX: u8 = 2;

/// One decorative bean resting on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeanParticle {
    /// Horizontal position as a percentage of the container width, 0..100.
    pub left_pct: f32,
    /// Height above the container floor in px.
    pub rest_offset: f32,
    /// Rotation in degrees, 0..360.
    pub rotation: f32,
    /// Scale factor, 0.7..1.2.
    pub scale: f32,
    /// Stacking order; higher beans draw on top.
    pub z_index: u8,
}

impl BeanParticle {
    /// Laid-out rectangle inside `container` (same coordinate space).
    pub fn rect(&self, container: Rect) -> Rect {
        let (w, h) = BEAN_SIZE;
        let x = container.x + container.width * self.left_pct / 100.0;
        let y = container.bottom() - self.rest_offset - h;
        Rect::new(x, y, w, h)
    }

    /// Resting properties before any animation touches the bean.
    pub fn resting(&self) -> PropertySet {
        PropertySet {
            rotation: self.rotation,
            scale: self.scale,
            ..PropertySet::default()
        }
    }
}

/// Rest offset: mostly a low pile, with a sparse scatter on top.
fn sample_rest_offset<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.9) {
        rng.gen_range(0.0..15.0)
    } else {
        rng.gen_range(15.0..40.0)
    }
}

/// Number of floor beans for a viewport.
pub fn bean_count(viewport: Viewport, config: &Config) -> usize {
    config.bean_count(config.device_class(viewport))
}

/// Generate `count` beans.
pub fn generate_field<R: Rng + ?Sized>(
    count: usize,
    device: DeviceClass,
    rng: &mut R,
) -> Vec<BeanParticle> {
    (0..count)
        .map(|_| {
            let left_pct = rng.gen_range(0.0..100.0);
            let rest_offset = sample_rest_offset(rng);
            let rotation = rng.gen_range(0.0..360.0);
            let scale = rng.gen_range(0.7..1.2);
            let z_index = match device {
                DeviceClass::Desktop => rng.gen_range(0..6),
                DeviceClass::Mobile => MOBILE_Z_INDEX,
            };
            BeanParticle {
                left_pct,
                rest_offset,
                rotation,
                scale,
                z_index,
            }
        })
        .collect()
}

/// End state of a bean rolling toward `focal` and dropping into the drain.
///
/// The bean travels horizontally to the focal point and spins by the
/// distance covered over its circumference.
pub fn roll_target(snapshot: &TargetSnapshot, focal: Point) -> PropertySet {
    // Spin uses the same center-to-focal travel as `x`, not the distance from
    // the bean's left edge, so a bean already under the focal point does not turn.
    let travel = focal.x - snapshot.rect.center().x;
    PropertySet {
        x: travel,
        y: DRAIN_DROP,
        rotation: travel / BEAN_CIRCUMFERENCE * 360.0 * ROLL_SPIN,
        scale: DRAIN_SCALE,
        opacity: 0.0,
        height: snapshot.base.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn field(count: usize, seed: u64) -> Vec<BeanParticle> {
        generate_field(count, DeviceClass::Desktop, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_rest_offset_is_bimodal() {
        let beans = field(20_000, 1);
        let low = beans.iter().filter(|b| b.rest_offset < 15.0).count();
        let ratio = low as f32 / beans.len() as f32;
        assert!((ratio - 0.9).abs() < 0.01, "low ratio {ratio}");
        assert!(
            beans
                .iter()
                .all(|b| (0.0..40.0).contains(&b.rest_offset))
        );
        let high: Vec<f32> = beans
            .iter()
            .map(|b| b.rest_offset)
            .filter(|&o| o >= 15.0)
            .collect();
        let mean = high.iter().sum::<f32>() / high.len() as f32;
        assert!((mean - 27.5).abs() < 1.0, "scatter mean {mean}");
    }

    #[test]
    fn test_position_and_rotation_are_uniform() {
        let beans = field(20_000, 2);
        let mut left_bins = [0usize; 10];
        let mut rot_bins = [0usize; 10];
        for b in &beans {
            assert!((0.0..100.0).contains(&b.left_pct));
            assert!((0.0..360.0).contains(&b.rotation));
            assert!((0.7..1.2).contains(&b.scale));
            left_bins[(b.left_pct / 10.0) as usize] += 1;
            rot_bins[(b.rotation / 36.0) as usize] += 1;
        }
        // Each decile should hold about 2000 beans.
        for count in left_bins.iter().chain(rot_bins.iter()) {
            assert!((1800..2200).contains(count), "bin count {count}");
        }
    }

    #[test]
    fn test_stacking_order_by_device() {
        let wide = field(500, 3);
        assert!(wide.iter().all(|b| b.z_index < 6));
        assert!(wide.iter().any(|b| b.z_index != wide[0].z_index));

        let narrow = generate_field(50, DeviceClass::Mobile, &mut StdRng::seed_from_u64(3));
        assert_eq!(narrow.len(), 50);
        assert!(narrow.iter().all(|b| b.z_index == MOBILE_Z_INDEX));
    }

    #[test]
    fn test_bean_count_by_viewport() {
        let config = Config::default();
        assert_eq!(bean_count(Viewport::new(1280.0, 800.0), &config), 180);
        assert_eq!(bean_count(Viewport::new(375.0, 800.0), &config), 50);
    }

    #[test]
    fn test_same_seed_same_field() {
        assert_eq!(field(100, 9), field(100, 9));
        assert_ne!(field(100, 9), field(100, 10));
    }

    #[test]
    fn test_roll_rotation_is_linear_in_distance() {
        let focal = Point::new(400.0, 0.0);
        let rotation_at = |center_x: f32| {
            let rect = Rect::new(center_x - BEAN_SIZE.0 / 2.0, 0.0, BEAN_SIZE.0, BEAN_SIZE.1);
            roll_target(&TargetSnapshot::new(rect, PropertySet::default()), focal).rotation
        };

        let per_px = rotation_at(300.0).abs() / 100.0;
        for p in [0.0, 50.0, 123.0, 399.0, 401.0, 640.0, 800.0] {
            let expected = (focal.x - p).abs() * per_px;
            assert!((rotation_at(p).abs() - expected).abs() < 1e-2, "at {p}");
        }
        assert!((per_px - 360.0 * ROLL_SPIN / BEAN_CIRCUMFERENCE).abs() < 1e-4);
        // Beans left of the focal point roll one way, beans right of it the other.
        assert!(rotation_at(100.0) > 0.0);
        assert!(rotation_at(700.0) < 0.0);
        assert_eq!(rotation_at(400.0), 0.0);
    }

    #[test]
    fn test_roll_target_converges_on_focal_point() {
        let rect = Rect::new(96.0, 500.0, BEAN_SIZE.0, BEAN_SIZE.1);
        let target = roll_target(
            &TargetSnapshot::new(rect, PropertySet::default()),
            Point::new(400.0, 0.0),
        );
        assert_eq!(rect.center().x + target.x, 400.0);
        assert_eq!(target.y, DRAIN_DROP);
        assert_eq!(target.scale, DRAIN_SCALE);
        assert_eq!(target.opacity, 0.0);
    }

    #[test]
    fn test_bean_rect_sits_on_container_floor() {
        let container = Rect::new(0.0, 900.0, 800.0, 100.0);
        let bean = BeanParticle {
            left_pct: 25.0,
            rest_offset: 10.0,
            rotation: 0.0,
            scale: 1.0,
            z_index: 0,
        };
        let rect = bean.rect(container);
        assert_eq!(rect.x, 200.0);
        assert_eq!(rect.bottom(), 990.0);
    }
}
