// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Datum positioning.
//!
//! Labels attached to data are placed by projecting the datum through the
//! chart's scales. In polar charts the x scale yields an angle (radians) and
//! the y scale a radius, both measured from the chart origin.

extern crate alloc;

use alloc::sync::Arc;
use core::f64::consts::PI;
use core::fmt;

use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A data point in domain units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Datum {
    /// Domain value along the x (or angular) dimension.
    pub x: f64,
    /// Domain value along the y (or radial) dimension.
    pub y: f64,
}

impl Datum {
    /// Creates a datum.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a domain value into range (screen) space.
pub trait PositionScale: Send + Sync {
    /// Maps `value` from domain space into range space.
    fn map(&self, value: f64) -> f64;
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }
}

impl PositionScale for ScaleLinear {
    fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        r0 + (value - d0) / denom * (r1 - r0)
    }
}

/// The pair of scales a datum is projected through.
#[derive(Clone)]
pub struct LabelScales {
    /// The x (or angular) scale.
    pub x: Arc<dyn PositionScale>,
    /// The y (or radial) scale.
    pub y: Arc<dyn PositionScale>,
}

impl LabelScales {
    /// Creates a scale pair.
    pub fn new(x: impl PositionScale + 'static, y: impl PositionScale + 'static) -> Self {
        Self {
            x: Arc::new(x),
            y: Arc::new(y),
        }
    }
}

impl fmt::Debug for LabelScales {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelScales").finish_non_exhaustive()
    }
}

/// How a polar label is oriented relative to its angular position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelPlacement {
    /// Upright text; no rotation.
    #[default]
    Vertical,
    /// Text runs along the circle.
    Parallel,
    /// Text runs along the radius.
    Perpendicular,
}

fn scaled(datum: Datum, scales: Option<&LabelScales>) -> (f64, f64) {
    match scales {
        Some(s) => (s.x.map(datum.x), s.y.map(datum.y)),
        None => (datum.x, datum.y),
    }
}

/// Projects `datum` into screen space.
pub(crate) fn project(datum: Datum, scales: Option<&LabelScales>, polar: bool, origin: Point) -> Point {
    let (a, b) = scaled(datum, scales);
    if polar {
        Point::new(origin.x + b * a.cos(), origin.y - b * a.sin())
    } else {
        Point::new(a, b)
    }
}

/// The angular position of `datum` in degrees, normalized to `[0, 360)`.
pub(crate) fn polar_degrees(datum: Datum, scales: Option<&LabelScales>) -> f64 {
    let (radians, _) = scaled(datum, scales);
    let degrees = radians * (180.0 / PI);
    ((degrees % 360.0) + 360.0) % 360.0
}

/// The label rotation (degrees) for a polar label at angular position `degrees`.
///
/// Labels on the left half of the circle are flipped so they never read upside down.
pub fn polar_label_angle(placement: LabelPlacement, degrees: f64) -> f64 {
    let rotation = match placement {
        LabelPlacement::Vertical => return 0.0,
        LabelPlacement::Parallel => 90.0,
        LabelPlacement::Perpendicular => 0.0,
    };
    let sign = if (degrees > 90.0 && degrees < 180.0) || degrees > 270.0 {
        1.0
    } else {
        -1.0
    };
    let angle = if degrees == 0.0 || degrees == 180.0 {
        90.0
    } else if degrees < 180.0 {
        90.0 - degrees
    } else {
        270.0 - degrees
    };
    angle + sign * rotation
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn cartesian_projection_uses_both_scales() {
        let scales = LabelScales::new(
            ScaleLinear::new((0.0, 10.0), (0.0, 100.0)),
            ScaleLinear::new((0.0, 10.0), (200.0, 0.0)),
        );
        let p = project(Datum::new(5.0, 5.0), Some(&scales), false, Point::ORIGIN);
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn polar_projection_measures_from_origin() {
        let origin = Point::new(100.0, 100.0);
        let p = project(Datum::new(PI / 2.0, 10.0), None, true, origin);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn polar_degrees_are_normalized() {
        let d = polar_degrees(Datum::new(-PI / 2.0, 1.0), None);
        assert!((d - 270.0).abs() < 1e-9);
    }

    #[test]
    fn polar_label_angles() {
        assert_eq!(polar_label_angle(LabelPlacement::Vertical, 45.0), 0.0);
        assert_eq!(polar_label_angle(LabelPlacement::Perpendicular, 45.0), 45.0);
        assert_eq!(polar_label_angle(LabelPlacement::Parallel, 45.0), -45.0);
        assert_eq!(polar_label_angle(LabelPlacement::Parallel, 135.0), 45.0);
        assert_eq!(polar_label_angle(LabelPlacement::Perpendicular, 0.0), 90.0);
    }
}
