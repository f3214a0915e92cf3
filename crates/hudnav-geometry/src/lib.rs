use std::f64::consts::{PI, TAU};

pub use cgmath::{InnerSpace, MetricSpace, VectorSpace, Zero};

pub type Vec3 = cgmath::Vector3<f64>;
pub type Vec2 = cgmath::Vector2<f64>;

pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

pub fn lerp_vec3(from: Vec3, to: Vec3, t: f64) -> Vec3 {
    from.lerp(to, t)
}

/// Wraps an angle difference into (-PI, PI].
pub fn wrap_angle(delta: f64) -> f64 {
    if !delta.is_finite() {
        return 0.0;
    }
    let wrapped = (delta + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Interpolates `from` toward `to` along the shorter arc. The result stays unwrapped
/// relative to `from`, so an azimuth never jumps by a full turn.
pub fn lerp_angle(from: f64, to: f64, t: f64) -> f64 {
    from + wrap_angle(to - from) * t
}

/// Unit vectors on the ground plane for a camera orbiting at `azimuth`, looking at its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl PlanarBasis {
    pub fn from_azimuth(azimuth: f64) -> Self {
        let (sin, cos) = azimuth.sin_cos();
        Self {
            forward: vec3(-sin, 0.0, -cos),
            right: vec3(cos, 0.0, -sin),
        }
    }

    /// Maps a 2D input (x = strafe right, y = move forward) onto the ground plane.
    pub fn planar(&self, x: f64, y: f64) -> Vec3 {
        self.right * x + self.forward * y
    }
}

/// Camera position for an orbit around `target`: horizontal offset by `radius` at `azimuth`,
/// vertical placement given by the absolute `height`.
pub fn orbit_position(target: Vec3, radius: f64, azimuth: f64, height: f64) -> Vec3 {
    let (sin, cos) = azimuth.sin_cos();
    vec3(target.x + radius * sin, height, target.z + radius * cos)
}

/// Azimuth of `position` seen from `target`, in (-PI, PI].
pub fn azimuth_of(position: Vec3, target: Vec3) -> f64 {
    (position.x - target.x).atan2(position.z - target.z)
}

pub fn is_finite3(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_upper_bound_inclusive() {
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1.0e-12);
    }
}
