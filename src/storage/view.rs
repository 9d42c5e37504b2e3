use super::{Storage, StorageBase, StorageMut};

impl<'a, T> From<&'a [T]> for StorageBase<&'a [T]> {
    fn from(data: &'a [T]) -> Self {
        Self(data)
    }
}

impl<'a, T> From<&'a mut [T]> for StorageBase<&'a mut [T]> {
    fn from(data: &'a mut [T]) -> Self {
        Self(data)
    }
}

impl<T> Storage for StorageBase<&[T]> {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self.0
    }
}

impl<T> Storage for StorageBase<&mut [T]> {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self.0
    }
}

impl<T> StorageMut for StorageBase<&mut [T]> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.0
    }
}
