mod ops;
pub use ops::RemoveAxis;

use core::{fmt::Debug, hash::Hash};

/// Number of axes, known at the type level.
pub trait Dimensionality: 'static {
    const N_DIMS: usize;
    type Index: AsRef<[usize]>
        + AsMut<[usize]>
        + Clone
        + Copy
        + Debug
        + Eq
        + Hash
        + PartialEq;
    fn zeroed_index() -> Self::Index;

    fn first_indices(sizes: &[usize]) -> Option<Self::Index> {
        if sizes.iter().any(|&x| x == 0) {
            None
        } else {
            Some(Self::zeroed_index())
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NDims<const N: usize>;

impl<const N: usize> Dimensionality for NDims<N> {
    const N_DIMS: usize = N;
    type Index = [usize; N];

    fn zeroed_index() -> Self::Index {
        [0; N]
    }
}

/// Extent of one axis, known at the type level.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Const<const N: usize>;
