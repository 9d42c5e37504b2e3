mod owned;
mod routine;
mod view;

use num_traits::{One, Zero};

/// Linear buffer an array addresses through its shape.
pub trait Storage {
    type Elem;
    fn as_slice(&self) -> &[<Self as Storage>::Elem];

    fn view(&self) -> StorageBase<&[<Self as Storage>::Elem]> {
        StorageBase(self.as_slice())
    }
}

pub trait StorageMut: Storage {
    fn as_mut_slice(&mut self) -> &mut [<Self as Storage>::Elem];

    fn view_mut(&mut self) -> StorageBase<&mut [<Self as Storage>::Elem]> {
        StorageBase(self.as_mut_slice())
    }
}

pub trait StorageOwned: FromIterator<<Self as Storage>::Elem> + StorageMut {
    fn from_elem(len: usize, value: <Self as Storage>::Elem) -> Self
    where
        <Self as Storage>::Elem: Clone;

    fn ones(len: usize) -> Self
    where
        <Self as Storage>::Elem: Clone + One,
    {
        Self::from_elem(len, <Self as Storage>::Elem::one())
    }

    fn zeros(len: usize) -> Self
    where
        <Self as Storage>::Elem: Clone + Zero,
    {
        Self::from_elem(len, <Self as Storage>::Elem::zero())
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct StorageBase<B>(pub(crate) B);
