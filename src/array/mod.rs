mod fmt;

mod iter;
pub use iter::{Indices, Iter, IterMut};

#[cfg(feature = "serde")]
mod serde;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::{
    storage::{Storage, StorageBase, StorageMut, StorageOwned},
    AxisOf, Fixed, IndexOf, NDArray, NDArrayMut, NDArrayOwned, Narrowed, RemoveAxis, Result,
    Shape, ShapeError, Squeezed, Transposed,
};

/// Buffer `B` addressed through the compile-time shape `S`, starting at
/// `offset`.
pub struct ArrayBase<B, S> {
    storage: B,
    offset: usize,
    phantom: PhantomData<S>,
}

/// Array owning a dense buffer.
pub type Array<T, S> = ArrayBase<StorageBase<Vec<T>>, S>;

/// Array borrowing its buffer for `'a`.
pub type ArrayView<'a, T, S> = ArrayBase<StorageBase<&'a [T]>, S>;

/// Array borrowing its buffer mutably for `'a`.
pub type ArrayViewMut<'a, T, S> = ArrayBase<StorageBase<&'a mut [T]>, S>;

fn in_bounds<S>(index: &[usize]) -> bool
where
    S: Shape,
{
    index
        .iter()
        .zip(S::SIZES.as_slice())
        .all(|(&i, &size)| i < size)
}

fn check_buffer<S>(len: usize) -> Result<()>
where
    S: Shape,
{
    if len < S::SPAN {
        Err(ShapeError::IncompatibleBuffer(format!(
            "buffer of length {} cannot hold a shape spanning {} elements",
            len,
            S::SPAN
        ))
        .into())
    } else {
        Ok(())
    }
}

impl<B, S> ArrayBase<B, S>
where
    S: Shape,
{
    fn from_parts(storage: B, offset: usize) -> Self {
        let () = S::CHECKED;
        Self {
            storage,
            offset,
            phantom: PhantomData,
        }
    }
}

impl<B, S> ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
{
    fn data(&self) -> &[<B as Storage>::Elem] {
        &self.storage.as_slice()[self.offset..]
    }

    pub fn view(&self) -> ArrayView<'_, <B as Storage>::Elem, S> {
        ArrayBase {
            storage: self.storage.view(),
            offset: self.offset,
            phantom: PhantomData,
        }
    }

    /// View with axis `AXIS` pinned at `index`, one dimension lower.
    ///
    /// `index` must be less than the size of the axis; this is only checked
    /// in debug builds.
    pub fn fix_axis<const AXIS: usize>(
        &self,
        index: usize,
    ) -> ArrayView<'_, <B as Storage>::Elem, Fixed<S, AXIS>>
    where
        S::Dimensionality: RemoveAxis,
    {
        self.view().into_fix_axis::<AXIS>(index)
    }

    /// View of `LEN` consecutive positions of axis `AXIS`, from `start` on.
    pub fn sub_range<const AXIS: usize, const LEN: usize>(
        &self,
        start: usize,
    ) -> ArrayView<'_, <B as Storage>::Elem, Narrowed<S, AXIS, LEN>> {
        self.view().into_sub_range::<AXIS, LEN>(start)
    }

    /// View without singleton axes, `N` dimensions remaining.
    pub fn squeeze<const N: usize>(&self) -> ArrayView<'_, <B as Storage>::Elem, Squeezed<S, N>> {
        self.view().into_squeeze::<N>()
    }

    pub fn transpose(&self) -> ArrayView<'_, <B as Storage>::Elem, Transposed<S>> {
        self.view().into_transpose()
    }
}

impl<B, S> ArrayBase<B, S>
where
    B: StorageMut,
    S: Shape,
{
    fn data_mut(&mut self) -> &mut [<B as Storage>::Elem] {
        &mut self.storage.as_mut_slice()[self.offset..]
    }

    pub fn view_mut(&mut self) -> ArrayViewMut<'_, <B as Storage>::Elem, S> {
        ArrayBase {
            storage: self.storage.view_mut(),
            offset: self.offset,
            phantom: PhantomData,
        }
    }

    pub fn fix_axis_mut<const AXIS: usize>(
        &mut self,
        index: usize,
    ) -> ArrayViewMut<'_, <B as Storage>::Elem, Fixed<S, AXIS>>
    where
        S::Dimensionality: RemoveAxis,
    {
        self.view_mut().into_fix_axis::<AXIS>(index)
    }

    pub fn sub_range_mut<const AXIS: usize, const LEN: usize>(
        &mut self,
        start: usize,
    ) -> ArrayViewMut<'_, <B as Storage>::Elem, Narrowed<S, AXIS, LEN>> {
        self.view_mut().into_sub_range::<AXIS, LEN>(start)
    }

    pub fn squeeze_mut<const N: usize>(
        &mut self,
    ) -> ArrayViewMut<'_, <B as Storage>::Elem, Squeezed<S, N>> {
        self.view_mut().into_squeeze::<N>()
    }

    pub fn transpose_mut(&mut self) -> ArrayViewMut<'_, <B as Storage>::Elem, Transposed<S>> {
        self.view_mut().into_transpose()
    }
}

macro_rules! impl_view {
    ($from_slice:ident, [$( $mutability:tt )*]) => {
        impl<'a, T, S> ArrayBase<StorageBase<&'a $( $mutability )* [T]>, S>
        where
            S: Shape,
        {
            /// Views `data` from its first element.
            ///
            /// Fails if `data` is shorter than the span of `S`.
            pub fn $from_slice(data: &'a $( $mutability )* [T]) -> Result<Self> {
                check_buffer::<S>(data.len())?;
                Ok(Self::from_parts(StorageBase(data), 0))
            }

            pub fn into_fix_axis<const AXIS: usize>(
                self,
                index: usize,
            ) -> ArrayBase<StorageBase<&'a $( $mutability )* [T]>, Fixed<S, AXIS>>
            where
                S::Dimensionality: RemoveAxis,
            {
                debug_assert!(
                    index < AxisOf::<S, AXIS>::SIZE,
                    "index {} is out of bounds for axis {} of size {}",
                    index,
                    AXIS,
                    AxisOf::<S, AXIS>::SIZE
                );
                ArrayBase::from_parts(
                    self.storage,
                    self.offset + index * AxisOf::<S, AXIS>::STRIDE,
                )
            }

            pub fn into_sub_range<const AXIS: usize, const LEN: usize>(
                self,
                start: usize,
            ) -> ArrayBase<StorageBase<&'a $( $mutability )* [T]>, Narrowed<S, AXIS, LEN>> {
                debug_assert!(
                    start + LEN <= AxisOf::<S, AXIS>::SIZE,
                    "sub-range {}..{} is out of bounds for axis {} of size {}",
                    start,
                    start + LEN,
                    AXIS,
                    AxisOf::<S, AXIS>::SIZE
                );
                ArrayBase::from_parts(
                    self.storage,
                    self.offset + start * AxisOf::<S, AXIS>::STRIDE,
                )
            }

            pub fn into_squeeze<const N: usize>(
                self,
            ) -> ArrayBase<StorageBase<&'a $( $mutability )* [T]>, Squeezed<S, N>> {
                ArrayBase::from_parts(self.storage, self.offset)
            }

            pub fn into_transpose(
                self,
            ) -> ArrayBase<StorageBase<&'a $( $mutability )* [T]>, Transposed<S>> {
                ArrayBase::from_parts(self.storage, self.offset)
            }
        }
    };
}

impl_view!(from_slice, []);
impl_view!(from_slice_mut, [mut]);

impl<T, S> ArrayBase<StorageBase<Vec<T>>, S>
where
    S: Shape,
{
    fn from_storage(storage: StorageBase<Vec<T>>) -> Self {
        let () = S::CHECKED_DENSE;
        Self::from_parts(storage, 0)
    }

    /// Places elements given in row-major index order at their offsets.
    fn from_logical<I>(elems: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut slots = iter::offsets::<S>().zip(elems).collect::<Vec<_>>();
        slots.sort_unstable_by_key(|&(offset, _)| offset);
        Self::from_storage(slots.into_iter().map(|(_, elem)| elem).collect())
    }

    /// Returns the buffer in storage order.
    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }
}

impl<B, S> Clone for ArrayBase<B, S>
where
    B: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            offset: self.offset,
            phantom: PhantomData,
        }
    }
}

impl<B, S> NDArray for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
{
    type Elem = <B as Storage>::Elem;
    type Shape = S;

    fn get(&self, index: IndexOf<S>) -> Option<&Self::Elem> {
        if in_bounds::<S>(index.as_ref()) {
            self.data().get(S::AXES.offset(index.as_ref()))
        } else {
            None
        }
    }

    #[inline]
    fn iter(&self) -> Iter<'_, Self::Elem, S> {
        Iter::new(self.data())
    }
}

impl<B, S> NDArrayMut for ArrayBase<B, S>
where
    B: StorageMut,
    S: Shape,
{
    fn fill(&mut self, value: Self::Elem)
    where
        Self::Elem: Clone,
    {
        if S::IS_DENSE {
            self.data_mut()[..S::LEN].fill(value);
        } else {
            for elem in self.iter_mut() {
                *elem = value.clone();
            }
        }
    }

    fn get_mut(&mut self, index: IndexOf<S>) -> Option<&mut Self::Elem> {
        if in_bounds::<S>(index.as_ref()) {
            self.data_mut().get_mut(S::AXES.offset(index.as_ref()))
        } else {
            None
        }
    }

    #[inline]
    fn iter_mut(&mut self) -> IterMut<'_, Self::Elem, S> {
        IterMut::new(self.data_mut())
    }
}

impl<T, S> NDArrayOwned for ArrayBase<StorageBase<Vec<T>>, S>
where
    S: Shape,
{
    fn from_elem(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_storage(StorageBase::from_elem(S::LEN, value))
    }

    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(IndexOf<S>) -> T,
    {
        Self::from_logical(Indices::<S>::new().map(f))
    }

    fn from_shape_vec(data: Vec<T>) -> Result<Self> {
        if data.len() != S::LEN {
            return Err(ShapeError::IncompatibleShape(format!(
                "cannot arrange {} elements into shape {:?}",
                data.len(),
                S::SIZES
            ))
            .into());
        }
        Ok(Self::from_logical(data))
    }

    fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.len() != S::LEN {
            return Err(ShapeError::IncompatibleBuffer(format!(
                "buffer of length {} does not match shape {:?} of {} elements",
                data.len(),
                S::SIZES,
                S::LEN
            ))
            .into());
        }
        Ok(Self::from_storage(StorageBase::from(data)))
    }
}

impl<B, S> Index<IndexOf<S>> for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
{
    type Output = <B as Storage>::Elem;

    fn index(&self, index: IndexOf<S>) -> &Self::Output {
        match self.get(index) {
            Some(elem) => elem,
            None => panic!(
                "index {:?} is out of bounds for shape {:?}",
                index,
                S::SIZES
            ),
        }
    }
}

impl<B, S> IndexMut<IndexOf<S>> for ArrayBase<B, S>
where
    B: StorageMut,
    S: Shape,
{
    fn index_mut(&mut self, index: IndexOf<S>) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!(
                "index {:?} is out of bounds for shape {:?}",
                index,
                S::SIZES
            ),
        }
    }
}

impl<B1, B2, S> PartialEq<ArrayBase<B2, S>> for ArrayBase<B1, S>
where
    B1: Storage,
    B2: Storage,
    S: Shape,
    <B1 as Storage>::Elem: PartialEq<<B2 as Storage>::Elem>,
{
    fn eq(&self, other: &ArrayBase<B2, S>) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<B, S> Eq for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
    <B as Storage>::Elem: Eq,
{
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "std"))]
    use alloc::{vec, vec::Vec};

    use super::{Array, ArrayView, ArrayViewMut};
    use crate::{
        shape, ColumnMajor, Error, NDArray, NDArrayMut, NDArrayOwned, Result, Shape, ShapeError,
    };

    type X = shape![5, 6, 7, 8];
    type Y = shape![2, 3; ColumnMajor];
    type Z = shape![3, 4];

    #[test]
    fn zeros_and_ones() {
        let a = Array::<f64, X>::zeros();
        let b = Array::<u8, Z>::ones();

        assert_eq!(a.len(), 1680);
        assert!(!a.is_empty());
        assert!(a.iter().all(|&x| x == 0.0));
        assert_eq!(b.to_vec(), vec![1; 12]);
    }

    #[test]
    fn query_shape() {
        let a = Array::<i32, X>::zeros();

        assert_eq!(a.n_dims(), 4);
        assert_eq!(a.shape(), [5, 6, 7, 8]);
        assert_eq!(a.strides(), [336, 56, 8, 1]);
        assert_eq!(a.size(2), 7);
        assert_eq!(a.stride(1), 56);
        assert_eq!(a.size_at::<0>(), 5);
        assert_eq!(a.stride_at::<2>(), 8);
        assert_eq!(a.axes(), X::AXES);
    }

    #[test]
    #[should_panic]
    fn size_of_axis_out_of_bounds() {
        Array::<i32, Z>::zeros().size(2);
    }

    #[test]
    fn offset_by_index_and_by_slice() {
        let a = Array::<i32, Y>::zeros();

        assert_eq!(a.offset([1, 2]), 5);
        assert_eq!(a.offset_slice(&[1, 2]), 5);
        assert_eq!(a.offset_slice(&[0, 0]), 0);
    }

    #[test]
    #[should_panic]
    fn offset_by_too_long_slice() {
        Array::<i32, Y>::zeros().offset_slice(&[1, 2, 0]);
    }

    #[test]
    fn from_vec_keeps_storage_order() -> Result<()> {
        let a = Array::<i32, Y>::from_vec(vec![0, 1, 2, 3, 4, 5])?;

        assert_eq!(a[[1, 0]], 1);
        assert_eq!(a[[0, 1]], 2);
        assert_eq!(a.to_vec(), vec![0, 2, 4, 1, 3, 5]);
        assert_eq!(a.into_vec(), vec![0, 1, 2, 3, 4, 5]);

        Ok(())
    }

    #[test]
    fn from_shape_vec_takes_index_order() -> Result<()> {
        let a = Array::<i32, Y>::from_shape_vec(vec![0, 1, 2, 3, 4, 5])?;

        assert_eq!(a[[0, 1]], 1);
        assert_eq!(a[[1, 0]], 3);
        assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(a.into_vec(), vec![0, 3, 1, 4, 2, 5]);

        Ok(())
    }

    #[test]
    fn from_vec_with_wrong_length() {
        match Array::<i32, Z>::from_vec(vec![0; 11]) {
            Err(Error::Shape(ShapeError::IncompatibleBuffer(_))) => {}
            _ => panic!("a short buffer must be rejected"),
        }
        match Array::<i32, Z>::from_shape_vec(vec![0; 13]) {
            Err(Error::Shape(ShapeError::IncompatibleShape(_))) => {}
            _ => panic!("a long buffer must be rejected"),
        }
    }

    #[test]
    fn from_fn() {
        let a = Array::<usize, Y>::from_fn(|[i, j]| 10 * i + j);

        assert_eq!(a.to_vec(), vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(a.into_vec(), vec![0, 10, 1, 11, 2, 12]);
    }

    #[test]
    fn get_checks_every_axis() {
        let a = Array::<usize, Z>::from_fn(|[i, j]| 4 * i + j);

        assert_eq!(a.get([2, 3]), Some(&11));
        assert_eq!(a.get([3, 0]), None);
        assert_eq!(a.get([0, 4]), None);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        let a = Array::<usize, Z>::zeros();
        let _ = a[[0, 4]];
    }

    #[test]
    fn write_through_index() {
        let mut a = Array::<usize, Z>::zeros();
        a[[1, 2]] = 7;
        *a.get_mut([2, 0]).unwrap() = 8;

        assert_eq!(a.into_vec(), vec![0, 0, 0, 0, 0, 0, 7, 0, 8, 0, 0, 0]);
    }

    #[test]
    fn fix_axis() {
        let a = Array::<usize, X>::from_fn(|[i, j, k, l]| 1000 * i + 100 * j + 10 * k + l);
        let v = a.fix_axis::<0>(2);

        assert_eq!(v.shape(), [6, 7, 8]);
        assert_eq!(v.strides(), [56, 8, 1]);
        assert_eq!(v[[0, 0, 0]], a[[2, 0, 0, 0]]);
        for (j, k, l) in [(0, 0, 0), (5, 6, 7), (3, 1, 4)] {
            assert_eq!(v[[j, k, l]], a[[2, j, k, l]]);
        }

        let w = a.fix_axis::<2>(5);
        assert_eq!(w.shape(), [5, 6, 8]);
        assert_eq!(w[[4, 3, 2]], a[[4, 3, 5, 2]]);
    }

    #[test]
    fn fix_every_axis() {
        let a = Array::<usize, Z>::from_fn(|[i, j]| 4 * i + j);
        let v = a.fix_axis::<1>(3).into_fix_axis::<0>(2);

        assert_eq!(v.n_dims(), 0);
        assert_eq!(v.len(), 1);
        assert_eq!(v[[]], 11);
    }

    #[test]
    fn sub_range() {
        let a = Array::<usize, X>::zeros();
        let v = a.sub_range::<0, 3>(0);

        assert_eq!(v.shape(), [3, 6, 7, 8]);
        assert_eq!(v.stride(0), 336);
        assert_eq!(v.len(), 1008);

        let b = Array::<usize, Z>::from_fn(|[i, j]| 4 * i + j);
        let w = b.sub_range::<1, 2>(1);
        assert_eq!(w.to_vec(), vec![1, 2, 5, 6, 9, 10]);
    }

    #[test]
    fn squeeze() {
        type W = shape![1, 4, 1, 3];
        let a = Array::<usize, W>::from_fn(|[_, j, _, l]| 3 * j + l);
        let v = a.squeeze::<2>();

        assert_eq!(v.shape(), [4, 3]);
        assert_eq!(v.strides(), [3, 1]);
        assert_eq!(v.to_vec(), a.to_vec());
    }

    #[test]
    fn transpose() {
        let a = Array::<usize, Z>::from_fn(|[i, j]| 4 * i + j);
        let t = a.transpose();

        assert_eq!(t.shape(), [4, 3]);
        assert_eq!(t.strides(), [1, 4]);
        assert_eq!(t[[3, 1]], a[[1, 3]]);
        assert_eq!(t.transpose().to_vec(), a.to_vec());
    }

    #[test]
    fn fill_respects_narrowed_axis() {
        let mut a = Array::<usize, Z>::zeros();
        a.sub_range_mut::<1, 2>(1).fill(1);

        assert_eq!(a.into_vec(), vec![0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn fill_fixed_axis() {
        let mut a = Array::<usize, Z>::zeros();
        a.fix_axis_mut::<1>(2).set_one();
        a.fix_axis_mut::<0>(0).fill(5);

        assert_eq!(a.into_vec(), vec![5, 5, 5, 5, 0, 0, 1, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn fill_dense_view() {
        let mut a = Array::<f32, Z>::ones();
        a.fix_axis_mut::<0>(1).set_zero();
        a.transpose_mut().fix_axis_mut::<0>(0).fill(2.0);

        assert_eq!(
            a.to_vec(),
            vec![2.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0, 0.0, 2.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn iterate_mutably_in_index_order() {
        let mut a = Array::<usize, Y>::zeros();
        for (i, x) in a.iter_mut().enumerate() {
            *x = i;
        }

        assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(a.into_vec(), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn view_from_slice() -> Result<()> {
        let data = (0..20).collect::<Vec<usize>>();
        let v = ArrayView::<_, Z>::from_slice(&data)?;

        assert_eq!(v[[2, 3]], 11);
        assert!(ArrayView::<_, Z>::from_slice(&data[..11]).is_err());

        Ok(())
    }

    #[test]
    fn view_mut_from_slice() -> Result<()> {
        let mut data = vec![0; 6];
        {
            let mut v = ArrayViewMut::<_, Y>::from_slice_mut(&mut data)?;
            v[[1, 2]] = 9;
            v.fix_axis_mut::<0>(0).set_one();
        }

        assert_eq!(data, vec![1, 0, 1, 0, 1, 9]);

        Ok(())
    }

    #[test]
    fn consuming_derivations_keep_the_borrow() -> Result<()> {
        let data = (0..12).collect::<Vec<usize>>();
        let row = {
            let v = ArrayView::<_, Z>::from_slice(&data)?;
            v.into_fix_axis::<0>(1)
        };

        assert_eq!(row.to_vec(), vec![4, 5, 6, 7]);

        Ok(())
    }

    #[test]
    fn compare_arrays_by_elements() -> Result<()> {
        let a = Array::<usize, Z>::from_fn(|[i, j]| 4 * i + j);
        let b = a.clone();
        let data = (0..12).collect::<Vec<usize>>();

        assert_eq!(a, b);
        assert!(a == ArrayView::<_, Z>::from_slice(&data)?);
        assert!(a != Array::<usize, Z>::zeros());

        Ok(())
    }
}
