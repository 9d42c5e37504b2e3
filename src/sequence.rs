use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::Index,
    slice,
};

/// A value that can be stored in a [`Seq`].
///
/// `VACANT` fills the unused tail of the backing array so that sequences can
/// be built inside constant expressions.
pub trait Element: Copy {
    const VACANT: Self;
}

impl Element for usize {
    const VACANT: Self = 0;
}

impl Element for bool {
    const VACANT: Self = false;
}

/// An element exposing a scalar value, see [`Seq::sum_valued`].
pub trait Valued {
    fn value(&self) -> usize;
}

impl Valued for usize {
    fn value(&self) -> usize {
        *self
    }
}

impl Valued for bool {
    fn value(&self) -> usize {
        usize::from(*self)
    }
}

/// Ordered sequence with a fixed capacity.
///
/// Every transformation takes the sequence by value and returns a new one,
/// and all of them except [`Seq::remove_if`] and [`Seq::sum_valued`] are
/// `const fn`, so sequences can be derived inside associated constants.
/// Contract violations panic, which turns into a build error when the
/// operation is evaluated in a constant.
#[derive(Clone, Copy)]
pub struct Seq<T, const CAP: usize>
where
    T: Element,
{
    items: [T; CAP],
    len: usize,
}

impl<T, const CAP: usize> Seq<T, CAP>
where
    T: Element,
{
    pub const fn new() -> Self {
        Self {
            items: [T::VACANT; CAP],
            len: 0,
        }
    }

    pub const fn from_array<const N: usize>(items: [T; N]) -> Self {
        assert!(N <= CAP, "sequence capacity exceeded");

        let mut seq = Self::new();
        while seq.len < N {
            seq.items[seq.len] = items[seq.len];
            seq.len += 1;
        }
        seq
    }

    pub const fn from_slice(items: &[T]) -> Self {
        assert!(items.len() <= CAP, "sequence capacity exceeded");

        let mut seq = Self::new();
        while seq.len < items.len() {
            seq.items[seq.len] = items[seq.len];
            seq.len += 1;
        }
        seq
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn as_slice(&self) -> &[T] {
        self.items.split_at(self.len).0
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `[0, len)`.
    pub const fn pick(&self, index: usize) -> T {
        assert!(index < self.len, "sequence index out of bounds");
        self.items[index]
    }

    pub const fn get(&self, index: usize) -> Option<T> {
        if index < self.len {
            Some(self.items[index])
        } else {
            None
        }
    }

    pub const fn append(self, item: T) -> Self {
        assert!(self.len < CAP, "sequence capacity exceeded");

        let mut out = self;
        out.items[out.len] = item;
        out.len += 1;
        out
    }

    pub const fn prepend(self, item: T) -> Self {
        self.concat_into(Self::new().append(item))
    }

    /// Appends all elements of `other` after the elements of `self`.
    pub const fn concat(self, other: Self) -> Self {
        other.concat_into(self)
    }

    /// Returns the elements from position `start` onwards.
    pub const fn skip(self, start: usize) -> Self {
        let mut out = Self::new();
        let mut i = start;
        while i < self.len {
            out = out.append(self.items[i]);
            i += 1;
        }
        out
    }

    /// Removes the element at `index`; later elements move one position
    /// forward.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `[0, len)`.
    pub const fn drop(self, index: usize) -> Self {
        assert!(index < self.len, "sequence index out of bounds");

        let mut prefix = Self::new();
        let mut i = 0;
        while i < index {
            prefix = prefix.append(self.items[i]);
            i += 1;
        }
        prefix.concat(self.skip(index + 1))
    }

    /// Substitutes the element at `index` with `item`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `[0, len)`.
    pub const fn replace(self, index: usize, item: T) -> Self {
        assert!(index < self.len, "sequence index out of bounds");

        let mut prefix = Self::new();
        let mut i = 0;
        while i < index {
            prefix = prefix.append(self.items[i]);
            i += 1;
        }
        prefix.append(item).concat(self.skip(index + 1))
    }

    /// Reverses the order of the elements.
    pub const fn invert(self) -> Self {
        let mut out = Self::new();
        let mut i = 0;
        while i < self.len {
            out = out.prepend(self.items[i]);
            i += 1;
        }
        out
    }

    /// Keeps the elements whose mark is `false`, in their original order.
    ///
    /// This is the constant-evaluable form of [`Seq::remove_if`]: the
    /// predicate results are computed beforehand, one per element.
    ///
    /// # Panics
    ///
    /// Panics if `marked` does not hold exactly one mark per element.
    pub const fn remove_marked(self, marked: &Seq<bool, CAP>) -> Self {
        assert!(
            marked.len == self.len,
            "one mark per element is required"
        );

        let mut kept = Self::new();
        let mut i = 0;
        while i < self.len {
            if !marked.items[i] {
                kept = kept.append(self.items[i]);
            }
            i += 1;
        }
        kept
    }

    /// Keeps the elements for which `pred` returns `false`.
    pub fn remove_if<F>(self, mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let mut marked = Seq::<bool, CAP>::new();
        for item in self.iter() {
            marked = marked.append(pred(item));
        }
        self.remove_marked(&marked)
    }

    /// Sums the scalar value of every element.
    pub fn sum_valued(&self) -> usize
    where
        T: Valued,
    {
        self.iter().map(Valued::value).sum()
    }

    const fn concat_into(self, mut out: Self) -> Self {
        let mut i = 0;
        while i < self.len {
            out = out.append(self.items[i]);
            i += 1;
        }
        out
    }
}

impl<const CAP: usize> Seq<usize, CAP> {
    pub const fn sum(&self) -> usize {
        let mut acc = 0;
        let mut i = 0;
        while i < self.len {
            acc += self.items[i];
            i += 1;
        }
        acc
    }

    pub const fn product(&self) -> usize {
        let mut acc = 1;
        let mut i = 0;
        while i < self.len {
            acc *= self.items[i];
            i += 1;
        }
        acc
    }
}

impl<T, const CAP: usize> AsRef<[T]> for Seq<T, CAP>
where
    T: Element,
{
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const CAP: usize> fmt::Debug for Seq<T, CAP>
where
    T: Element + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, const CAP: usize> Default for Seq<T, CAP>
where
    T: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAP: usize> Eq for Seq<T, CAP> where T: Element + Eq {}

impl<T, const CAP: usize> Hash for Seq<T, CAP>
where
    T: Element + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const CAP: usize> Index<usize> for Seq<T, CAP>
where
    T: Element,
{
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a, T, const CAP: usize> IntoIterator for &'a Seq<T, CAP>
where
    T: Element,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const CAP: usize> PartialEq for Seq<T, CAP>
where
    T: Element + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, const CAP: usize, const N: usize> PartialEq<[T; N]> for Seq<T, CAP>
where
    T: Element + PartialEq,
{
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}
