#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequence::{Element, Seq};

pub const MAX_DIMS: usize = 6;

/// Raw extents, one per axis.
pub type Sizes = Seq<usize, MAX_DIMS>;

/// Axis descriptors of a shape, first axis first.
pub type Axes = Seq<Axis, MAX_DIMS>;

/// Extent and stride of one axis, both counted in elements.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Axis {
    size: usize,
    stride: usize,
}

impl Axis {
    pub const fn new(size: usize, stride: usize) -> Self {
        assert!(size > 0, "axis size must be positive");
        assert!(stride > 0, "axis stride must be positive");
        Self { size, stride }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Distance covered by a full sweep of the axis; the stride of the next
    /// outer axis in a dense layout.
    pub const fn span(&self) -> usize {
        self.size * self.stride
    }

    pub const fn is_singleton(&self) -> bool {
        self.size == 1
    }

    pub const fn with_size(self, size: usize) -> Self {
        Self::new(size, self.stride)
    }
}

impl Element for Axis {
    const VACANT: Self = Self { size: 0, stride: 0 };
}

impl<const CAP: usize> Seq<Axis, CAP> {
    pub const fn size(&self, axis: usize) -> usize {
        self.pick(axis).size
    }

    pub const fn stride(&self, axis: usize) -> usize {
        self.pick(axis).stride
    }

    pub const fn sizes(&self) -> Seq<usize, CAP> {
        let mut out = Seq::new();
        let mut i = 0;
        while i < self.len() {
            out = out.append(self.pick(i).size);
            i += 1;
        }
        out
    }

    pub const fn strides(&self) -> Seq<usize, CAP> {
        let mut out = Seq::new();
        let mut i = 0;
        while i < self.len() {
            out = out.append(self.pick(i).stride);
            i += 1;
        }
        out
    }

    /// Total number of addressable elements.
    pub const fn array_len(&self) -> usize {
        self.sizes().product()
    }

    /// One past the greatest offset reachable from offset 0.
    pub const fn span(&self) -> usize {
        let mut last = 0;
        let mut i = 0;
        while i < self.len() {
            let axis = self.pick(i);
            last += (axis.size - 1) * axis.stride;
            i += 1;
        }
        last + 1
    }

    /// Marks every axis of size one.
    pub const fn singletons(&self) -> Seq<bool, CAP> {
        let mut out = Seq::new();
        let mut i = 0;
        while i < self.len() {
            out = out.append(self.pick(i).is_singleton());
            i += 1;
        }
        out
    }

    /// `index[axis] * stride(axis)` for every axis.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not hold exactly one entry per axis.
    pub const fn terms(&self, index: &[usize]) -> Seq<usize, CAP> {
        assert!(
            index.len() == self.len(),
            "index length does not match the number of dimensions"
        );

        let mut out = Seq::new();
        let mut i = 0;
        while i < self.len() {
            out = out.append(index[i] * self.pick(i).stride);
            i += 1;
        }
        out
    }

    /// Linear offset of `index`, relative to the first element.
    pub const fn offset(&self, index: &[usize]) -> usize {
        self.terms(index).sum()
    }

    pub const fn fix(self, axis: usize) -> Self {
        self.drop(axis)
    }

    /// Restricts `axis` to `len` positions, keeping its stride.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or larger than the current size of the axis.
    pub const fn narrow(self, axis: usize, len: usize) -> Self {
        let old = self.pick(axis);
        assert!(
            len <= old.size,
            "sub-range cannot be larger than the original axis"
        );
        self.replace(axis, old.with_size(len))
    }

    pub const fn squeeze(self) -> Self {
        let singletons = self.singletons();
        self.remove_marked(&singletons)
    }
}
