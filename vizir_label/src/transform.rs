// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label transforms.
//!
//! A [`Transform`] is an ordered list of SVG-style operations. It renders to an
//! SVG `transform` attribute via `Display` and can be flattened to a
//! [`kurbo::Affine`] for renderers that apply matrices directly.

use core::f64::consts::PI;
use core::fmt;

use kurbo::{Affine, Point};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// One transform operation. Angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Translate by `(x, y)`.
    Translate {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// Scale by `(x, y)`.
    Scale {
        /// Horizontal factor.
        x: f64,
        /// Vertical factor.
        y: f64,
    },
    /// Rotate clockwise, about `center` or the origin.
    Rotate {
        /// Angle in degrees.
        angle: f64,
        /// Center of rotation.
        center: Option<Point>,
    },
    /// Skew along the x axis.
    SkewX(f64),
    /// Skew along the y axis.
    SkewY(f64),
    /// A raw `matrix(a, b, c, d, e, f)`.
    Matrix([f64; 6]),
}

impl TransformOp {
    fn to_affine(self) -> Affine {
        match self {
            Self::Translate { x, y } => Affine::translate((x, y)),
            Self::Scale { x, y } => Affine::scale_non_uniform(x, y),
            Self::Rotate { angle, center } => {
                Affine::rotate_about(to_radians(angle), center.unwrap_or(Point::ORIGIN))
            }
            Self::SkewX(angle) => Affine::skew(to_radians(angle).tan(), 0.0),
            Self::SkewY(angle) => Affine::skew(0.0, to_radians(angle).tan()),
            Self::Matrix(coeffs) => Affine::new(coeffs),
        }
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate { x, y } => write!(f, "translate({x}, {y})"),
            Self::Scale { x, y } => write!(f, "scale({x}, {y})"),
            Self::Rotate {
                angle,
                center: Some(c),
            } => write!(f, "rotate({angle}, {}, {})", c.x, c.y),
            Self::Rotate {
                angle,
                center: None,
            } => write!(f, "rotate({angle})"),
            Self::SkewX(angle) => write!(f, "skewX({angle})"),
            Self::SkewY(angle) => write!(f, "skewY({angle})"),
            Self::Matrix([a, b, c, d, e, g]) => {
                write!(f, "matrix({a}, {b}, {c}, {d}, {e}, {g})")
            }
        }
    }
}

/// An ordered list of transform operations, applied like an SVG `transform` attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    ops: SmallVec<[TransformOp; 2]>,
}

impl Transform {
    /// Creates an empty (identity) transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A translation.
    #[must_use]
    pub fn translate(x: f64, y: f64) -> Self {
        Self::new().then(TransformOp::Translate { x, y })
    }

    /// A non-uniform scale.
    #[must_use]
    pub fn scale(x: f64, y: f64) -> Self {
        Self::new().then(TransformOp::Scale { x, y })
    }

    /// A rotation by `angle` degrees about `center`.
    #[must_use]
    pub fn rotate_about(angle: f64, center: Point) -> Self {
        Self::new().then(TransformOp::Rotate {
            angle,
            center: Some(center),
        })
    }

    /// Appends an operation; it applies after (inside) the existing ones.
    #[must_use]
    pub fn then(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// The operations, outermost first.
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Flattens the operations into a single affine matrix.
    pub fn to_affine(&self) -> Affine {
        self.ops
            .iter()
            .fold(Affine::IDENTITY, |acc, op| acc * op.to_affine())
    }

    /// Combines an optional base transform with a rotation clause about `(x, y)`.
    ///
    /// A zero or absent angle adds nothing; if neither part is present the
    /// result is `None`.
    pub(crate) fn with_rotation(base: Option<Self>, angle: Option<f64>, at: Point) -> Option<Self> {
        let angle = angle.filter(|a| *a != 0.0);
        match (base, angle) {
            (None, None) => None,
            (Some(base), None) => Some(base),
            (base, Some(angle)) => Some(base.unwrap_or_default().then(TransformOp::Rotate {
                angle,
                center: Some(at),
            })),
        }
    }
}

impl From<TransformOp> for Transform {
    fn from(op: TransformOp) -> Self {
        Self::new().then(op)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn renders_svg_transform_list() {
        let t = Transform::translate(10.0, 20.0).then(TransformOp::Rotate {
            angle: 30.0,
            center: Some(Point::new(100.0, 50.0)),
        });
        assert_eq!(t.to_string(), "translate(10, 20) rotate(30, 100, 50)");
    }

    #[test]
    fn rotation_keeps_its_center_fixed() {
        let center = Point::new(100.0, 50.0);
        let affine = Transform::rotate_about(90.0, center).to_affine();
        let moved = affine * center;
        assert!((moved - center).hypot() < 1e-9);

        let p = affine * Point::new(110.0, 50.0);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_clause_only_when_angle_is_nonzero() {
        let at = Point::new(1.0, 2.0);
        assert_eq!(Transform::with_rotation(None, None, at), None);
        assert_eq!(Transform::with_rotation(None, Some(0.0), at), None);

        let base = Transform::scale(2.0, 2.0);
        assert_eq!(
            Transform::with_rotation(Some(base.clone()), Some(0.0), at),
            Some(base.clone())
        );
        let rotated = Transform::with_rotation(Some(base), Some(45.0), at).unwrap();
        assert_eq!(rotated.to_string(), "scale(2, 2) rotate(45, 1, 2)");
    }
}
