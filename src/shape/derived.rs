use core::marker::PhantomData;

use super::{private::Sealed, Shape};
use crate::{axis::Axes, NDims, RemoveAxis};

/// `S` with axis `AXIS` pinned to one position and removed.
pub struct Fixed<S, const AXIS: usize>(PhantomData<S>);

impl<S, const AXIS: usize> Sealed for Fixed<S, AXIS> {}

impl<S, const AXIS: usize> Shape for Fixed<S, AXIS>
where
    S: Shape,
    S::Dimensionality: RemoveAxis,
{
    type Dimensionality = <S::Dimensionality as RemoveAxis>::Smaller;
    const AXES: Axes = S::AXES.fix(AXIS);
}

/// `S` with axis `AXIS` restricted to `LEN` consecutive positions.
pub struct Narrowed<S, const AXIS: usize, const LEN: usize>(PhantomData<S>);

impl<S, const AXIS: usize, const LEN: usize> Sealed for Narrowed<S, AXIS, LEN> {}

impl<S, const AXIS: usize, const LEN: usize> Shape for Narrowed<S, AXIS, LEN>
where
    S: Shape,
{
    type Dimensionality = S::Dimensionality;
    const AXES: Axes = S::AXES.narrow(AXIS, LEN);
}

/// `S` without its singleton axes; `N` is the number of remaining axes.
pub struct Squeezed<S, const N: usize>(PhantomData<S>);

impl<S, const N: usize> Sealed for Squeezed<S, N> {}

impl<S, const N: usize> Shape for Squeezed<S, N>
where
    S: Shape,
{
    type Dimensionality = NDims<N>;
    const AXES: Axes = S::AXES.squeeze();
}

/// `S` with the order of its axes reversed.
pub struct Transposed<S>(PhantomData<S>);

impl<S> Sealed for Transposed<S> {}

impl<S> Shape for Transposed<S>
where
    S: Shape,
{
    type Dimensionality = S::Dimensionality;
    const AXES: Axes = S::AXES.invert();
}
