//! Motion targets handed over by the host on every move call
//!
//! Poses are homogeneous transforms, joints are per-axis angles in degrees.
//! Neither is computed here; they are only carried and formatted.

use cgmath::{Deg, Matrix4, Vector3};

/// Robot target as a 4x4 homogeneous transform (mm, degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose(pub Matrix4<f64>);

impl Pose {
    pub fn identity() -> Self {
        use cgmath::SquareMatrix;
        Pose(Matrix4::identity())
    }

    /// Build a pose from X, Y, Z (mm) and R, P, W (degrees).
    /// Rotation order is transl * rotz(w) * roty(p) * rotx(r).
    pub fn from_xyzrpw(xyzrpw: [f64; 6]) -> Self {
        let [x, y, z, r, p, w] = xyzrpw;
        Pose(
            Matrix4::from_translation(Vector3::new(x, y, z))
                * Matrix4::from_angle_z(Deg(w))
                * Matrix4::from_angle_y(Deg(p))
                * Matrix4::from_angle_x(Deg(r)),
        )
    }

    /// Inverse of [`Pose::from_xyzrpw`]
    pub fn to_xyzrpw(&self) -> [f64; 6] {
        // cgmath is column major: m[col][row]
        let m = &self.0;
        let (x, y, z) = (m[3][0], m[3][1], m[3][2]);

        let (r, p, w) = if m[0][2] > 1.0 - 1e-6 {
            (0.0, -std::f64::consts::FRAC_PI_2, (-m[2][1]).atan2(m[1][1]))
        } else if m[0][2] < -1.0 + 1e-6 {
            (0.0, std::f64::consts::FRAC_PI_2, m[2][1].atan2(m[1][1]))
        } else {
            let p = (-m[0][2]).atan2((m[0][0] * m[0][0] + m[0][1] * m[0][1]).sqrt());
            let w = m[0][1].atan2(m[0][0]);
            let r = m[1][2].atan2(m[2][2]);
            (r, p, w)
        };

        // + 0.0 folds -0.0 so zero angles never print as "-0.000"
        [
            x,
            y,
            z,
            r.to_degrees() + 0.0,
            p.to_degrees() + 0.0,
            w.to_degrees() + 0.0,
        ]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::identity()
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z, r, p, w] = self.to_xyzrpw();
        write!(
            f,
            "X{:.3} Y{:.3} Z{:.3} R{:.3} P{:.3} W{:.3}",
            x, y, z, r, p, w
        )
    }
}

/// Joint angles in degrees, one per robot axis
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Joints(pub Vec<f64>);

impl Joints {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Joints(values.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

impl From<Vec<f64>> for Joints {
    fn from(values: Vec<f64>) -> Self {
        Joints(values)
    }
}

impl<const N: usize> From<[f64; N]> for Joints {
    fn from(values: [f64; N]) -> Self {
        Joints(values.to_vec())
    }
}

/// Robot configuration flags (rear, lower arm, flip)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfRlf {
    pub rear: bool,
    pub lower: bool,
    pub flip: bool,
}

impl ConfRlf {
    pub fn from_flags(flags: [f64; 3]) -> Self {
        ConfRlf {
            rear: flags[0] != 0.0,
            lower: flags[1] != 0.0,
            flip: flags[2] != 0.0,
        }
    }
}
