#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};

use serde::{
    de::{DeserializeSeed, Error as _, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::{Array, ArrayBase};
use crate::{axis::Axis, storage::Storage, NDArrayOwned, Shape};

/// Elements reachable through `axes` from `offset`, as nested sequences.
struct Nested<'a, T> {
    data: &'a [T],
    offset: usize,
    axes: &'a [Axis],
}

impl<T> Serialize for Nested<'_, T>
where
    T: Serialize,
{
    fn serialize<R: Serializer>(&self, serializer: R) -> Result<R::Ok, R::Error> {
        let (axis, rest) = match self.axes.split_first() {
            Some(split) => split,
            None => return self.data[self.offset].serialize(serializer),
        };

        let mut seq = serializer.serialize_seq(Some(axis.size()))?;
        for i in 0..axis.size() {
            seq.serialize_element(&Nested {
                data: self.data,
                offset: self.offset + i * axis.stride(),
                axes: rest,
            })?;
        }
        seq.end()
    }
}

impl<B, S> Serialize for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
    <B as Storage>::Elem: Serialize,
{
    fn serialize<R: Serializer>(&self, serializer: R) -> Result<R::Ok, R::Error> {
        Nested {
            data: self.data(),
            offset: 0,
            axes: S::AXES.as_slice(),
        }
        .serialize(serializer)
    }
}

/// Appends the elements of nested sequences of extents `sizes` to `out`,
/// in row-major index order.
struct NestedSeed<'v, T> {
    out: &'v mut Vec<T>,
    sizes: &'v [usize],
}

impl<'de, T> DeserializeSeed<'de> for NestedSeed<'_, T>
where
    T: Deserialize<'de>,
{
    type Value = ();

    fn deserialize<R: Deserializer<'de>>(self, deserializer: R) -> Result<(), R::Error> {
        if self.sizes.is_empty() {
            self.out.push(T::deserialize(deserializer)?);
            Ok(())
        } else {
            deserializer.deserialize_seq(self)
        }
    }
}

impl<'de, T> Visitor<'de> for NestedSeed<'_, T>
where
    T: Deserialize<'de>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sizes.first() {
            Some(size) => write!(formatter, "a sequence of length {}", size),
            None => formatter.write_str("an element"),
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let NestedSeed { out, sizes } = self;
        let (&size, rest) = match sizes.split_first() {
            Some(split) => split,
            None => return Err(A::Error::custom("unexpected sequence")),
        };

        let mut len = 0;
        while len <= size {
            let seed = NestedSeed {
                out: &mut *out,
                sizes: rest,
            };
            if seq.next_element_seed(seed)?.is_none() {
                break;
            }
            len += 1;
        }

        if len != size {
            return Err(A::Error::custom(format_args!(
                "invalid axis length {}, expected {}",
                len, size
            )));
        }
        Ok(())
    }
}

impl<'de, T, S> Deserialize<'de> for Array<T, S>
where
    T: Deserialize<'de>,
    S: Shape,
{
    fn deserialize<R: Deserializer<'de>>(deserializer: R) -> Result<Self, R::Error> {
        let mut out = Vec::with_capacity(S::LEN);
        NestedSeed {
            out: &mut out,
            sizes: S::SIZES.as_slice(),
        }
        .deserialize(deserializer)?;

        Self::from_shape_vec(out).map_err(R::Error::custom)
    }
}
