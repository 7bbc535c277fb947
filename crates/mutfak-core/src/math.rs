//! Interpolation helpers used by the per-frame behaviours
//!
//! Angles are in degrees, matching the authoring units of the configs.

use glam::Vec3;

/// Distance under which a moving object counts as having reached its target
pub const REACH_EPSILON: f32 = 0.005;

/// Whether `a` is within `epsilon` of `b`
pub fn reached(a: Vec3, b: Vec3, epsilon: f32) -> bool {
    a.distance(b) < epsilon
}

/// Move `current` toward `target` by at most `max_step`, landing exactly on
/// `target` when it is within reach.
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance == 0.0 || (max_step >= 0.0 && distance <= max_step) {
        return target;
    }
    current + delta / distance * max_step
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries state between frames and must be owned by the caller.
/// The result never crosses `target`; when a step would, it lands on
/// `target` and the velocity is zeroed.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }
    output
}

/// Shortest signed difference from `current` to `target`, in `(-180, 180]`
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Wrap an angle into `(-180, 180]`
pub fn wrap_degrees(angle: f32) -> f32 {
    delta_angle(0.0, angle)
}

/// [`smooth_damp`] for angles, taking the short way around the circle.
///
/// The returned angle is not wrapped; it approaches `current + delta_angle`.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}
