//! Axis-aligned bounding boxes
//!
//! Every body in the simulation is an AABB described by its center and half
//! extents. Screen coordinates: +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Overlaps shallower than this are treated as resting contact, not penetration.
/// Keeps float round-off from re-triggering a resolution that already ran.
pub const CONTACT_EPSILON: f32 = 1e-4;

/// Axis along which a penetration is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Minimum translation needed to separate two boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Axis of minimum penetration
    pub axis: Axis,
    /// Overlap depth along `axis` (always positive)
    pub depth: f32,
    /// Unit normal pointing from the other box toward this one
    pub normal: Vec2,
}

impl Penetration {
    /// Offset that moves this box out of the other one
    #[inline]
    pub fn correction(&self) -> Vec2 {
        self.normal * self.depth
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Build from a center point and full width/height
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// A box with positive, finite extents and a finite center
    pub fn is_well_formed(&self) -> bool {
        self.center.is_finite()
            && self.half_extents.is_finite()
            && self.half_extents.x > 0.0
            && self.half_extents.y > 0.0
    }

    /// True if the interiors intersect by more than [`CONTACT_EPSILON`].
    /// Boxes sharing an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x - CONTACT_EPSILON && d.y < reach.y - CONTACT_EPSILON
    }

    /// True if this box sits on top of `other`: bottom edge within
    /// [`CONTACT_EPSILON`] of its top edge, with the horizontal interiors
    /// overlapping.
    pub fn rests_on(&self, other: &Aabb) -> bool {
        let dx = (self.center.x - other.center.x).abs();
        let reach_x = self.half_extents.x + other.half_extents.x;
        dx < reach_x - CONTACT_EPSILON && (self.max().y - other.min().y).abs() <= CONTACT_EPSILON
    }

    /// Check if a point lies inside the box (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Check if `other` lies entirely inside this box (edges inclusive)
    pub fn contains(&self, other: &Aabb) -> bool {
        let (min, max) = (self.min(), self.max());
        let (omin, omax) = (other.min(), other.max());
        omin.x >= min.x && omin.y >= min.y && omax.x <= max.x && omax.y <= max.y
    }

    /// Minimum translation that pushes `self` out of `other`, if they overlap.
    ///
    /// Ties between the two axes resolve vertically, so a body landing exactly
    /// on a platform corner is treated as standing on it.
    pub fn penetration(&self, other: &Aabb) -> Option<Penetration> {
        if !self.overlaps(other) {
            return None;
        }

        let delta = self.center - other.center;
        let reach = self.half_extents + other.half_extents;
        let depth_x = reach.x - delta.x.abs();
        let depth_y = reach.y - delta.y.abs();

        // Centers that coincide on an axis push toward -x / -y (left / up)
        let side = |d: f32| if d > 0.0 { 1.0 } else { -1.0 };

        if depth_x < depth_y {
            Some(Penetration {
                axis: Axis::Horizontal,
                depth: depth_x,
                normal: Vec2::new(side(delta.x), 0.0),
            })
        } else {
            Some(Penetration {
                axis: Axis::Vertical,
                depth: depth_y,
                normal: Vec2::new(0.0, side(delta.y)),
            })
        }
    }
}
