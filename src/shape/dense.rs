use core::marker::PhantomData;

use super::{private::Sealed, Shape};
use crate::{
    axis::{Axes, Sizes},
    Const, Dimensionality, NDims, Order, RowMajor,
};

/// Raw extents spelled as a tuple of [`Const`].
pub trait Extents: 'static {
    type Dimensionality: Dimensionality;
    const SIZES: Sizes;
}

macro_rules! impl_extents {
    ($( $n:literal => ($( $d:ident ),*) ),+ $(,)?) => {
        $(
            impl<$( const $d: usize ),*> Extents for ($( Const<$d>, )*) {
                type Dimensionality = NDims<$n>;
                const SIZES: Sizes = Sizes::from_array([$( $d ),*]);
            }
        )+
    };
}

impl_extents!(
    0 => (),
    1 => (D0),
    2 => (D0, D1),
    3 => (D0, D1, D2),
    4 => (D0, D1, D2, D3),
    5 => (D0, D1, D2, D3, D4),
    6 => (D0, D1, D2, D3, D4, D5),
);

/// Densely packed shape built from extents `E` in order `O`.
pub struct Dense<E, O = RowMajor>(PhantomData<(E, O)>);

impl<E, O> Sealed for Dense<E, O> {}

impl<E, O> Shape for Dense<E, O>
where
    E: Extents,
    O: Order,
{
    type Dimensionality = E::Dimensionality;
    const AXES: Axes = O::LAYOUT.build(&E::SIZES);
}

/// Spells a [`Dense`] shape from its extents, row-major unless an order is
/// given after a semicolon.
///
/// ```
/// use katachi::{shape, ColumnMajor, Shape};
///
/// type X = shape![5, 6, 7, 8];
/// type Y = shape![2, 3; ColumnMajor];
///
/// assert_eq!(X::AXES.strides(), [336, 56, 8, 1]);
/// assert_eq!(Y::AXES.strides(), [1, 2]);
/// ```
#[macro_export]
macro_rules! shape {
    ($( $size:expr ),* ; $order:ty) => {
        $crate::Dense<($( $crate::Const<{ $size }>, )*), $order>
    };
    ($( $size:expr ),* $(,)?) => {
        $crate::Dense<($( $crate::Const<{ $size }>, )*), $crate::RowMajor>
    };
}
