// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain configuration for a partition tree.

use crate::error::PartitionError;

/// Size and resolution of a partition tree.
///
/// The root covers the square `center ± radius` on both axes. Units keep
/// subdividing until their side length no longer exceeds `min_leaf_size`;
/// smaller values give deeper trees with fewer features per chunk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PartitionSettings<D> {
    /// Half the side length of the root.
    pub radius: i32,
    /// Center of the root.
    pub center: D,
    /// Largest side length a chunk may have.
    pub min_leaf_size: i32,
}

impl<D> PartitionSettings<D> {
    /// Create settings without validating them.
    ///
    /// See [`validate`][Self::validate].
    pub const fn new(radius: i32, center: D, min_leaf_size: i32) -> Self {
        Self {
            radius,
            center,
            min_leaf_size,
        }
    }

    /// Check that radius and leaf size are strictly positive.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.radius <= 0 {
            return Err(PartitionError::InvalidRadius(self.radius));
        }
        if self.min_leaf_size <= 0 {
            return Err(PartitionError::InvalidLeafSize(self.min_leaf_size));
        }
        Ok(())
    }

    /// Side length of the root unit.
    #[inline]
    pub fn root_size(&self) -> f64 {
        2.0 * f64::from(self.radius)
    }
}
