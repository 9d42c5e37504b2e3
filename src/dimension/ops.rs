use super::{Dimensionality, NDims};

/// Dimensionality with one axis removed.
pub trait RemoveAxis: Dimensionality {
    type Smaller: Dimensionality;
}

macro_rules! impl_remove_axis {
    ($($n:literal => $m:literal),+) => {
        $(
            impl RemoveAxis for NDims<$n> {
                type Smaller = NDims<$m>;
            }
        )+
    };
}

impl_remove_axis!(1 => 0, 2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5);
