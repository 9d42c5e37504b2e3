use core::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use crate::{Dimensionality, IndexOf, Shape};

#[inline]
fn increment_indices<S>(maybe_indices: &mut Option<IndexOf<S>>, len: &mut usize)
where
    S: Shape,
{
    if let Some(indices) = maybe_indices {
        for (index, &dim) in indices
            .as_mut()
            .iter_mut()
            .rev()
            .zip(S::SIZES.as_slice().iter().rev())
        {
            *index += 1;
            if *index == dim {
                *index = 0;
            } else {
                break;
            }
        }

        *len -= 1;
    }

    if *len == 0 {
        maybe_indices.take();
    }
}

/// Every index of `S` in row-major order, whatever the layout of `S`.
pub struct Indices<S>
where
    S: Shape,
{
    indices: Option<IndexOf<S>>,
    len: usize,
}

impl<S> Indices<S>
where
    S: Shape,
{
    pub fn new() -> Self {
        Self {
            indices: <S::Dimensionality as Dimensionality>::first_indices(S::SIZES.as_slice()),
            len: S::LEN,
        }
    }
}

impl<S> Default for Indices<S>
where
    S: Shape,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Indices<S>
where
    S: Shape,
{
    fn clone(&self) -> Self {
        Self {
            indices: self.indices,
            len: self.len,
        }
    }
}

impl<S> Iterator for Indices<S>
where
    S: Shape,
{
    type Item = IndexOf<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.indices?;
        increment_indices::<S>(&mut self.indices, &mut self.len);
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<S> ExactSizeIterator for Indices<S> where S: Shape {}

impl<S> FusedIterator for Indices<S> where S: Shape {}

/// Offsets of every index of `S`, in the order of [`Indices`].
pub(crate) fn offsets<S>() -> impl Iterator<Item = usize>
where
    S: Shape,
{
    Indices::<S>::new().map(|index| S::AXES.offset(index.as_ref()))
}

pub struct Iter<'a, T: 'a, S>
where
    S: Shape,
{
    data: &'a [T],
    indices: Indices<S>,
}

impl<'a, T, S> Iter<'a, T, S>
where
    S: Shape,
{
    /// `data` starts at the first element of the array.
    pub(super) fn new(data: &'a [T]) -> Self {
        Self {
            data,
            indices: Indices::new(),
        }
    }
}

impl<'a, T, S> Iterator for Iter<'a, T, S>
where
    S: Shape,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(&self.data[S::AXES.offset(index.as_ref())])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T, S> ExactSizeIterator for Iter<'_, T, S> where S: Shape {}

impl<T, S> FusedIterator for Iter<'_, T, S> where S: Shape {}

pub struct IterMut<'a, T: 'a, S>
where
    S: Shape,
{
    ptr: NonNull<T>,
    indices: Indices<S>,
    phantom: PhantomData<&'a mut T>,
}

impl<'a, T, S> IterMut<'a, T, S>
where
    S: Shape,
{
    /// `data` starts at the first element of the array.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than the span of `S`.
    pub(super) fn new(data: &'a mut [T]) -> Self {
        assert!(
            data.len() >= S::SPAN,
            "buffer of length {} cannot hold a shape spanning {} elements",
            data.len(),
            S::SPAN
        );

        Self {
            ptr: NonNull::from(data).cast(),
            indices: Indices::new(),
            phantom: PhantomData,
        }
    }
}

impl<'a, T, S> Iterator for IterMut<'a, T, S>
where
    S: Shape,
{
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        let offset = S::AXES.offset(index.as_ref());
        debug_assert!(offset < S::SPAN);

        // SAFETY: `offset` is below `S::SPAN`, which fits in the buffer, and
        // every index is visited once and maps to its own offset.
        unsafe { Some(&mut *self.ptr.as_ptr().add(offset)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T, S> ExactSizeIterator for IterMut<'_, T, S> where S: Shape {}

impl<T, S> FusedIterator for IterMut<'_, T, S> where S: Shape {}
