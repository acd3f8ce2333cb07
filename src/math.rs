//! Small numeric helpers for gameplay code.

use bevy::prelude::Vec3;

/// Rescales `value` from `[min, max]` to `[0, 1]`.
///
/// The bounds map exactly to 0 and 1, even when `min == max`.
pub fn rescale(min: f32, max: f32, value: f32) -> f32 {
    if value == min {
        return 0.0;
    }
    if value == max {
        return 1.0;
    }
    (value - min) / (max - min)
}

/// Rescales `value` from `[min, max]` to `[target_min, target_max]`.
///
/// Uses the distance from `min`, so values below `min` are mirrored above it.
pub fn rescale_range(min: f32, max: f32, value: f32, target_min: f32, target_max: f32) -> f32 {
    let ratio = (target_max - target_min) / (max - min);
    target_min + ratio * (value - min).abs()
}

/// Snaps `value` to the nearest multiple of `snap_to`. Halfway values snap down.
pub fn snap(value: &mut f32, snap_to: f32) {
    let rem = *value % snap_to;
    if rem > snap_to / 2.0 {
        *value += snap_to - rem;
    } else {
        *value -= rem;
    }
}

/// Snaps every component of `vec` to the nearest multiple of `snap_to`.
pub fn snap_vec3(vec: &mut Vec3, snap_to: f32) {
    snap_vec3_by(vec, Vec3::splat(snap_to));
}

/// Snaps every component of `vec` to the nearest multiple of the matching component of `snap_to`.
pub fn snap_vec3_by(vec: &mut Vec3, snap_to: Vec3) {
    snap(&mut vec.x, snap_to.x);
    snap(&mut vec.y, snap_to.y);
    snap(&mut vec.z, snap_to.z);
}

/// Whether `value` lies in `[-epsilon, epsilon]`.
pub fn within_epsilon(value: f32, epsilon: f32) -> bool {
    (-epsilon..=epsilon).contains(&value)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 10.0, 0.0, 0.0)]
    #[case(0.0, 10.0, 10.0, 1.0)]
    #[case(0.0, 10.0, 2.5, 0.25)]
    #[case(5.0, 5.0, 5.0, 0.0)]
    fn rescale_to_unit(#[case] min: f32, #[case] max: f32, #[case] value: f32, #[case] out: f32) {
        assert_eq!(rescale(min, max, value), out);
    }

    #[rstest]
    #[case(0.0, 10.0, 5.0, 100.0, 200.0, 150.0)]
    #[case(0.0, 10.0, -5.0, 100.0, 200.0, 150.0)]
    #[case(10.0, 20.0, 20.0, 0.0, 1.0, 1.0)]
    fn rescale_between_ranges(
        #[case] min: f32,
        #[case] max: f32,
        #[case] value: f32,
        #[case] target_min: f32,
        #[case] target_max: f32,
        #[case] out: f32,
    ) {
        assert_eq!(rescale_range(min, max, value, target_min, target_max), out);
    }

    #[rstest]
    #[case(7.0, 5.0, 5.0)]
    #[case(8.0, 5.0, 10.0)]
    #[case(7.5, 5.0, 5.0)]
    #[case(1.25, 0.5, 1.0)]
    #[case(1.3, 0.5, 1.5)]
    fn snap_to_nearest_multiple(#[case] value: f32, #[case] snap_to: f32, #[case] out: f32) {
        let mut v = value;
        snap(&mut v, snap_to);
        assert!((v - out).abs() < 1e-5, "{value} snapped to {v}, expected {out}");
    }

    #[test]
    fn snap_vectors() {
        let mut v = Vec3::new(1.2, 2.8, 4.0);
        snap_vec3(&mut v, 1.0);
        assert!(v.abs_diff_eq(Vec3::new(1.0, 3.0, 4.0), 1e-5));

        let mut v = Vec3::new(1.2, 2.8, 4.0);
        snap_vec3_by(&mut v, Vec3::new(0.5, 2.0, 3.0));
        assert!(v.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }

    #[rstest]
    #[case(0.0, 0.1, true)]
    #[case(0.1, 0.1, true)]
    #[case(-0.1, 0.1, true)]
    #[case(0.2, 0.1, false)]
    #[case(-0.2, 0.1, false)]
    fn epsilon_range(#[case] value: f32, #[case] epsilon: f32, #[case] inside: bool) {
        assert_eq!(within_epsilon(value, epsilon), inside);
    }
}
