#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use super::{routine, Storage, StorageBase, StorageMut, StorageOwned};

impl<T> StorageBase<Vec<T>> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for StorageBase<Vec<T>> {
    fn from(data: Vec<T>) -> Self {
        Self(data)
    }
}

impl<T> FromIterator<T> for StorageBase<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(FromIterator::from_iter(iter))
    }
}

impl<T> Storage for StorageBase<Vec<T>> {
    type Elem = T;

    fn as_slice(&self) -> &[<Self as Storage>::Elem] {
        self.0.as_slice()
    }
}

impl<T> StorageMut for StorageBase<Vec<T>> {
    fn as_mut_slice(&mut self) -> &mut [<Self as Storage>::Elem] {
        self.0.as_mut_slice()
    }
}

impl<T> StorageOwned for StorageBase<Vec<T>> {
    fn from_elem(len: usize, value: <Self as Storage>::Elem) -> Self
    where
        <Self as Storage>::Elem: Clone,
    {
        StorageBase(routine::create_buf(len, value))
    }
}
