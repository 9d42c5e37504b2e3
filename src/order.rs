use crate::{
    axis::{Axes, Axis, Sizes},
    sequence::Seq,
};

pub trait Order: 'static {
    const LAYOUT: Layout;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RowMajor;

impl Order for RowMajor {
    const LAYOUT: Layout = Layout::RowMajor;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ColumnMajor;

impl Order for ColumnMajor {
    const LAYOUT: Layout = Layout::ColumnMajor;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Layout {
    RowMajor,
    ColumnMajor,
}

impl Layout {
    pub const fn build(self, sizes: &Sizes) -> Axes {
        match self {
            Self::RowMajor => row_major(sizes),
            Self::ColumnMajor => column_major(sizes),
        }
    }

    /// Whether `axes` are densely packed in this order. Singleton axes are
    /// ignored since they never move the offset.
    pub const fn matches(self, axes: &Axes) -> bool {
        let len = axes.len();
        let mut stride_expected = 1;
        let mut i = 0;
        while i < len {
            let axis = match self {
                Self::RowMajor => axes.pick(len - 1 - i),
                Self::ColumnMajor => axes.pick(i),
            };
            i += 1;
            if axis.is_singleton() {
                continue;
            }
            if axis.stride() != stride_expected {
                return false;
            }
            stride_expected *= axis.size();
        }
        true
    }

    pub const fn of(axes: &Axes) -> Option<Self> {
        if Self::RowMajor.matches(axes) {
            Some(Self::RowMajor)
        } else if Self::ColumnMajor.matches(axes) {
            Some(Self::ColumnMajor)
        } else {
            None
        }
    }
}

/// Builds axes where the last axis is contiguous: walking from the right,
/// each axis gets the span of its right neighbour as stride.
pub const fn row_major(sizes: &Sizes) -> Axes {
    let mut axes = Seq::new();
    let mut stride = 1;
    let mut i = sizes.len();
    while i > 0 {
        i -= 1;
        let axis = Axis::new(sizes.pick(i), stride);
        stride = axis.span();
        axes = axes.prepend(axis);
    }
    axes
}

/// Builds axes where the first axis is contiguous: each axis gets the
/// product of all earlier sizes as stride.
pub const fn column_major(sizes: &Sizes) -> Axes {
    let mut axes = Seq::new();
    let mut stride = 1;
    let mut i = 0;
    while i < sizes.len() {
        let axis = Axis::new(sizes.pick(i), stride);
        stride = axis.span();
        axes = axes.append(axis);
        i += 1;
    }
    axes
}

#[cfg(test)]
mod tests {
    use super::{column_major, row_major, Layout};
    use crate::axis::{Axes, Axis, Sizes};

    #[test]
    fn convert_sizes_to_strides_with_row_major() {
        let axes = row_major(&Sizes::from_array([5, 6, 7, 8]));

        assert_eq!(axes.sizes(), [5, 6, 7, 8]);
        assert_eq!(axes.strides(), [336, 56, 8, 1]);
    }

    #[test]
    fn convert_sizes_to_strides_with_column_major() {
        let axes = column_major(&Sizes::from_array([2, 3]));

        assert_eq!(axes.sizes(), [2, 3]);
        assert_eq!(axes.strides(), [1, 2]);
    }

    #[test]
    fn strides_follow_neighbouring_spans() {
        let sizes = Sizes::from_array([3, 1, 4, 2, 5]);
        let row = row_major(&sizes);
        let col = column_major(&sizes);
        let n = sizes.len();

        assert_eq!(row.stride(n - 1), 1);
        for i in 0..n - 1 {
            assert_eq!(row.stride(i), row.stride(i + 1) * row.size(i + 1));
        }

        assert_eq!(col.stride(0), 1);
        for i in 1..n {
            assert_eq!(col.stride(i), col.stride(i - 1) * col.size(i - 1));
        }
    }

    #[test]
    fn build_empty_sizes() {
        assert!(row_major(&Sizes::new()).is_empty());
        assert!(column_major(&Sizes::new()).is_empty());
    }

    #[test]
    #[should_panic]
    fn build_with_zero_size() {
        row_major(&Sizes::from_array([2, 0, 4]));
    }

    #[test]
    fn check_whether_axes_are_contiguous_with_row_major() {
        let sizes = Sizes::from_array([2, 3, 4]);

        assert!(Layout::RowMajor.matches(&row_major(&sizes)));
        assert!(!Layout::RowMajor.matches(&column_major(&sizes)));
        assert!(!Layout::RowMajor.matches(&Axes::from_array([
            Axis::new(2, 24),
            Axis::new(3, 4),
            Axis::new(4, 1),
        ])));
    }

    #[test]
    fn check_whether_axes_are_contiguous_with_column_major() {
        let sizes = Sizes::from_array([2, 3, 4]);

        assert!(Layout::ColumnMajor.matches(&column_major(&sizes)));
        assert!(!Layout::ColumnMajor.matches(&row_major(&sizes)));
    }

    #[test]
    fn detect_layout() {
        let sizes = Sizes::from_array([2, 3, 4]);

        assert_eq!(Layout::of(&row_major(&sizes)), Some(Layout::RowMajor));
        assert_eq!(Layout::of(&column_major(&sizes)), Some(Layout::ColumnMajor));
        assert_eq!(
            Layout::of(&row_major(&sizes).narrow(1, 2)),
            None
        );
        assert_eq!(
            Layout::of(&row_major(&Sizes::from_array([1, 4, 1]))),
            Some(Layout::RowMajor)
        );
    }
}
