//! Compile-time shape and stride algebra for dense multidimensional arrays.
//!
//! A [`Shape`] is a type whose axes, each a `(size, stride)` pair, are known
//! when the program is built. Arrays and views are bound to one shape and
//! derive views of other shapes from it by pinning an axis, narrowing an
//! axis, dropping singleton axes or reversing the axis order. Offsets of
//! constant indices resolve to constants.
//!
//! ```
//! use katachi::{offset, shape, Array, Fixed, NDArray, NDArrayOwned};
//!
//! type X = shape![5, 6, 7, 8];
//!
//! let mut a = Array::<f64, X>::zeros();
//! assert_eq!(a.strides(), [336, 56, 8, 1]);
//! assert_eq!(a.len(), 1680);
//!
//! a[[2, 0, 0, 0]] = 1.0;
//! let v = a.fix_axis::<0>(2);
//! assert_eq!(v.shape(), [6, 7, 8]);
//! assert_eq!(v[[0, 0, 0]], 1.0);
//!
//! const O: usize = offset!(Fixed<X, 0>; 1, 2, 3);
//! assert_eq!(O, 56 + 16 + 3);
//! ```
//!
//! Contract violations in shape derivations are build errors:
//!
//! ```compile_fail
//! use katachi::{shape, Array, NDArrayOwned};
//!
//! type X = shape![5, 6, 7, 8];
//!
//! let a = Array::<f64, X>::zeros();
//! let v = a.sub_range::<0, 6>(0);
//! ```
//!
//! ```compile_fail
//! use katachi::{offset, shape};
//!
//! type X = shape![2, 3];
//!
//! const O: usize = offset!(X; 1, 2, 0);
//! ```
//!
//! ```compile_fail
//! use katachi::{shape, Array, NDArrayOwned};
//!
//! type X = shape![2, 3];
//!
//! let a = Array::<f64, X>::zeros();
//! let v = a.fix_axis::<2>(0);
//! ```
//!
//! Owning arrays only take shapes without gaps:
//!
//! ```compile_fail
//! use katachi::{shape, Array, Narrowed, NDArrayOwned};
//!
//! type X = Narrowed<shape![3, 4], 1, 2>;
//!
//! let a = Array::<f64, X>::zeros();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

mod array;
pub use array::{Array, ArrayBase, ArrayView, ArrayViewMut, Indices, Iter, IterMut};

mod axis;
pub use axis::{Axes, Axis, Sizes, MAX_DIMS};

mod dimension;
pub use dimension::{Const, Dimensionality, NDims, RemoveAxis};

mod error;
pub use error::{Error, Result, ShapeError};

mod order;
pub use order::{column_major, row_major, ColumnMajor, Layout, Order, RowMajor};

mod sequence;
pub use sequence::{Element, Seq, Valued};

mod shape;
pub use shape::{
    offset_of, AxisOf, Dense, Extents, Fixed, IndexOf, Narrowed, Shape, Squeezed, Transposed,
};

pub mod storage;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use num_traits::{One, Zero};

/// Read-only surface shared by owning arrays and views.
pub trait NDArray {
    type Elem;
    type Shape: Shape;

    fn axes(&self) -> Axes {
        <Self::Shape as Shape>::AXES
    }

    /// Returns the element at `index`, or `None` if any entry is out of
    /// range for its axis.
    fn get(&self, index: IndexOf<Self::Shape>) -> Option<&Self::Elem>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Iter<'_, Self::Elem, Self::Shape>;

    fn len(&self) -> usize {
        <Self::Shape as Shape>::LEN
    }

    fn n_dims(&self) -> usize {
        <Self::Shape as Shape>::N_DIMS
    }

    /// Offset of `index` from the first element of the array.
    fn offset(&self, index: IndexOf<Self::Shape>) -> usize {
        <Self::Shape as Shape>::AXES.offset(index.as_ref())
    }

    /// Same as [`offset`](NDArray::offset) for an index whose length is only
    /// known at run time.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not hold exactly one entry per axis.
    fn offset_slice(&self, index: &[usize]) -> usize {
        <Self::Shape as Shape>::AXES.offset(index)
    }

    fn shape(&self) -> Sizes {
        <Self::Shape as Shape>::SIZES
    }

    /// # Panics
    ///
    /// Panics if `axis` is not less than the number of dimensions.
    fn size(&self, axis: usize) -> usize {
        <Self::Shape as Shape>::AXES.size(axis)
    }

    fn size_at<const AXIS: usize>(&self) -> usize {
        AxisOf::<Self::Shape, AXIS>::SIZE
    }

    /// # Panics
    ///
    /// Panics if `axis` is not less than the number of dimensions.
    fn stride(&self, axis: usize) -> usize {
        <Self::Shape as Shape>::AXES.stride(axis)
    }

    fn stride_at<const AXIS: usize>(&self) -> usize {
        AxisOf::<Self::Shape, AXIS>::STRIDE
    }

    fn strides(&self) -> Sizes {
        <Self::Shape as Shape>::STRIDES
    }

    /// Elements in row-major index order.
    fn to_vec(&self) -> Vec<Self::Elem>
    where
        Self::Elem: Clone,
    {
        self.iter().cloned().collect()
    }
}

pub trait NDArrayMut: NDArray {
    /// Overwrites every position addressable under the shape, and nothing
    /// else.
    fn fill(&mut self, value: Self::Elem)
    where
        Self::Elem: Clone;

    fn get_mut(&mut self, index: IndexOf<Self::Shape>) -> Option<&mut Self::Elem>;

    fn iter_mut(&mut self) -> IterMut<'_, Self::Elem, Self::Shape>;

    fn set_one(&mut self)
    where
        Self::Elem: Clone + One,
    {
        self.fill(One::one());
    }

    fn set_zero(&mut self)
    where
        Self::Elem: Clone + Zero,
    {
        self.fill(Zero::zero());
    }
}

pub trait NDArrayOwned: NDArrayMut + Sized {
    fn from_elem(value: Self::Elem) -> Self
    where
        Self::Elem: Clone;

    /// Builds the array by calling `f` once per index, in row-major index
    /// order.
    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(IndexOf<Self::Shape>) -> Self::Elem;

    /// Takes `data` in row-major index order, whatever the layout.
    fn from_shape_vec(data: Vec<Self::Elem>) -> Result<Self>;

    /// Takes `data` as the buffer itself, in storage order.
    fn from_vec(data: Vec<Self::Elem>) -> Result<Self>;

    fn ones() -> Self
    where
        Self::Elem: Clone + One,
    {
        Self::from_elem(One::one())
    }

    fn zeros() -> Self
    where
        Self::Elem: Clone + Zero,
    {
        Self::from_elem(Zero::zero())
    }
}
