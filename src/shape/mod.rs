mod dense;
pub use dense::{Dense, Extents};

mod derived;
pub use derived::{Fixed, Narrowed, Squeezed, Transposed};

use core::marker::PhantomData;

use crate::{
    axis::{Axes, Axis, Sizes},
    Dimensionality,
};

pub(crate) mod private {
    pub trait Sealed {}
}

/// Layout of an array, fully resolved at compile time.
///
/// A shape is a marker type: it never exists as a value, its axes live in
/// the associated constant `AXES`. Derived shapes compute their axes from
/// the axes of their source shape, so any contract violation in a derivation
/// (an axis out of range, a sub-range larger than its axis) is reported when
/// the crate using it is built.
///
/// Every shape maps distinct in-bounds indices to distinct offsets below
/// `SPAN`; mutable iteration relies on it, so the trait is sealed.
pub trait Shape: private::Sealed + 'static {
    type Dimensionality: Dimensionality;
    const AXES: Axes;

    const N_DIMS: usize = <Self::Dimensionality as Dimensionality>::N_DIMS;
    const SIZES: Sizes = Self::AXES.sizes();
    const STRIDES: Sizes = Self::AXES.strides();
    const LEN: usize = Self::AXES.array_len();
    const SPAN: usize = Self::AXES.span();
    const IS_DENSE: bool = Self::SPAN == Self::LEN;

    #[doc(hidden)]
    const CHECKED: () = assert!(
        Self::AXES.len() == Self::N_DIMS,
        "number of axes does not match the dimensionality of the shape"
    );

    #[doc(hidden)]
    const CHECKED_DENSE: () = assert!(
        Self::IS_DENSE,
        "an owning array requires a shape without gaps"
    );
}

/// Index array accepted by arrays of shape `S`.
pub type IndexOf<S> = <<S as Shape>::Dimensionality as Dimensionality>::Index;

/// One axis of `S`, picked at compile time.
pub struct AxisOf<S, const I: usize>(PhantomData<S>);

impl<S, const I: usize> AxisOf<S, I>
where
    S: Shape,
{
    pub const AXIS: Axis = S::AXES.pick(I);
    pub const SIZE: usize = Self::AXIS.size();
    pub const STRIDE: usize = Self::AXIS.stride();
}

/// Offset of `index` in shape `S`, usable in constant expressions.
///
/// # Panics
///
/// Panics if `index` does not hold exactly one entry per axis of `S`.
pub const fn offset_of<S>(index: &[usize]) -> usize
where
    S: Shape,
{
    S::AXES.offset(index)
}

/// Evaluates the offset of a constant index at compile time.
///
/// ```
/// use katachi::{offset, shape};
///
/// type X = shape![5, 6, 7, 8];
///
/// const OFFSET: usize = offset!(X; 0, 1, 2, 2);
/// assert_eq!(OFFSET, 56 + 16 + 2);
/// ```
#[macro_export]
macro_rules! offset {
    ($shape:ty; $( $index:expr ),* $(,)?) => {{
        const OFFSET: usize = $crate::offset_of::<$shape>(&[$( $index ),*]);
        OFFSET
    }};
}

#[cfg(test)]
mod tests {
    use super::{offset_of, AxisOf, Dense, Fixed, Narrowed, Shape, Squeezed, Transposed};
    use crate::{ColumnMajor, Const, RowMajor};

    type X = Dense<(Const<5>, Const<6>, Const<7>, Const<8>), RowMajor>;
    type Y = Dense<(Const<2>, Const<3>), ColumnMajor>;

    fn for_each_index(sizes: &[usize], mut f: impl FnMut(&[usize])) {
        let mut index = [0_usize; crate::MAX_DIMS];
        let index = &mut index[..sizes.len()];
        let len: usize = sizes.iter().product();
        for _ in 0..len {
            f(index);
            for (i, &size) in index.iter_mut().zip(sizes).rev() {
                *i += 1;
                if *i == size {
                    *i = 0;
                } else {
                    break;
                }
            }
        }
    }

    #[test]
    fn shape_by_row_major_extents() {
        assert_eq!(X::N_DIMS, 4);
        assert_eq!(X::AXES.sizes(), [5, 6, 7, 8]);
        assert_eq!(X::AXES.strides(), [336, 56, 8, 1]);
        assert_eq!(X::LEN, 1680);
        assert!(X::IS_DENSE);
    }

    #[test]
    fn shape_by_column_major_extents() {
        assert_eq!(Y::AXES.strides(), [1, 2]);
        assert_eq!(offset_of::<Y>(&[1, 2]), 5);
        assert_eq!(crate::offset!(Y; 1, 2), 5);
    }

    #[test]
    fn shape_by_macro() {
        type Z = crate::shape![2, 3; ColumnMajor];
        type W = crate::shape![4];
        type E = crate::shape![];

        assert_eq!(Z::AXES, Y::AXES);
        assert_eq!(W::AXES.strides(), [1]);
        assert_eq!(E::LEN, 1);
        assert_eq!(E::N_DIMS, 0);
    }

    #[test]
    fn pick_axis_at_compile_time() {
        const SIZE: usize = AxisOf::<X, 1>::SIZE;
        const STRIDE: usize = AxisOf::<X, 1>::STRIDE;

        assert_eq!(SIZE, 6);
        assert_eq!(STRIDE, 56);
    }

    #[test]
    fn constant_and_runtime_offsets_agree() {
        const CONSTANT: usize = crate::offset!(X; 0, 1, 2, 2);
        let index = [0, 1, 2, 2];

        assert_eq!(CONSTANT, X::AXES.offset(&index));
        assert_eq!(CONSTANT, 56 + 2 * 8 + 2);

        for_each_index(X::AXES.sizes().as_slice(), |index| {
            let expected: usize = index
                .iter()
                .zip(X::AXES.strides().iter())
                .map(|(i, s)| i * s)
                .sum();
            assert_eq!(offset_of::<X>(index), expected);
        });
    }

    #[test]
    #[should_panic]
    fn offset_with_wrong_number_of_indices() {
        offset_of::<X>(&[0, 1, 2]);
    }

    #[test]
    fn fixed_shape_drops_axis() {
        type F0 = Fixed<X, 0>;
        type F2 = Fixed<X, 2>;

        assert_eq!(F0::N_DIMS, 3);
        assert_eq!(F0::AXES.sizes(), [6, 7, 8]);
        assert_eq!(F0::AXES.strides(), [56, 8, 1]);
        assert_eq!(F2::AXES.sizes(), [5, 6, 8]);
        assert_eq!(F2::AXES.strides(), [336, 56, 1]);
        assert_eq!(F2::LEN, 5 * 6 * 8);
        assert!(!F2::IS_DENSE);
    }

    #[test]
    fn narrowed_shape_replaces_size() {
        type N = Narrowed<X, 0, 3>;

        assert_eq!(N::N_DIMS, 4);
        assert_eq!(N::AXES.sizes(), [3, 6, 7, 8]);
        assert_eq!(N::AXES.stride(0), 336);
        assert_eq!(N::LEN, 1008);
    }

    #[test]
    fn squeezed_shape_removes_singletons() {
        type S = Squeezed<Dense<(Const<1>, Const<4>, Const<1>, Const<3>)>, 2>;

        assert_eq!(S::AXES.sizes(), [4, 3]);
        assert_eq!(S::AXES.strides(), [3, 1]);
        assert_eq!(<S as Shape>::N_DIMS, 2);
        let () = S::CHECKED;
    }

    #[test]
    fn transposed_shape_inverts_axes() {
        type T = Transposed<X>;

        assert_eq!(T::AXES.sizes(), [8, 7, 6, 5]);
        assert_eq!(T::AXES.strides(), [1, 8, 56, 336]);
        assert_eq!(<Transposed<T> as Shape>::AXES, X::AXES);
    }

    #[test]
    fn derived_shapes_compose() {
        type D = Squeezed<Narrowed<Fixed<X, 1>, 0, 1>, 2>;

        assert_eq!(D::AXES.sizes(), [7, 8]);
        assert_eq!(D::AXES.strides(), [8, 1]);
        assert_eq!(<D as Shape>::N_DIMS, 2);
    }
}
