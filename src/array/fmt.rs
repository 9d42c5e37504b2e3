use core::fmt;

use super::ArrayBase;
use crate::{axis::Axis, storage::Storage, Layout, NDArray, Shape};

const NUM_EDGE_ELEMENTS: usize = 3;
const TRUNCATION_THRESHOLD: usize = 1_000;

struct FormatOption {
    num_edge_elements: usize,
}

impl Default for FormatOption {
    fn default() -> Self {
        Self {
            num_edge_elements: NUM_EDGE_ELEMENTS,
        }
    }
}

impl FormatOption {
    fn new(array_len: usize, truncate: bool) -> Self {
        Self::default().without_truncation(truncate || array_len < TRUNCATION_THRESHOLD)
    }

    fn without_truncation(mut self, valid: bool) -> Self {
        if valid {
            self.num_edge_elements = usize::MAX / 2;
        }
        self
    }
}

/// Writes the elements of `data` reachable through `axes` from `offset`,
/// one bracket level per axis.
fn format_axes<T, F>(
    data: &[T],
    offset: usize,
    axes: &[Axis],
    indent: usize,
    option: &FormatOption,
    f: &mut fmt::Formatter<'_>,
    fmt: &mut F,
) -> fmt::Result
where
    F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let (axis, rest) = match axes.split_first() {
        Some(split) => split,
        None => return fmt(&data[offset], f),
    };
    let n_dims = axes.len();
    let len = axis.size();

    f.write_str("[")?;
    if len > option.num_edge_elements * 2 {
        for i in 0..option.num_edge_elements {
            fmt_indent(i, n_dims, indent, f)?;
            format_axes(data, offset + i * axis.stride(), rest, indent + 1, option, f, fmt)?;
        }
        fmt_indent(1, n_dims, indent, f)?;
        f.write_str("...")?;
        fmt_indent(1, n_dims, indent, f)?;
        for (j, i) in (len - option.num_edge_elements..len).enumerate() {
            fmt_indent(j, n_dims, indent, f)?;
            format_axes(data, offset + i * axis.stride(), rest, indent + 1, option, f, fmt)?;
        }
    } else {
        for i in 0..len {
            fmt_indent(i, n_dims, indent, f)?;
            format_axes(data, offset + i * axis.stride(), rest, indent + 1, option, f, fmt)?;
        }
    }
    f.write_str("]")
}

fn fmt_indent(i: usize, n_dims: usize, indent: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if i != 0 {
        f.write_str(",")?;
        if n_dims > 1 {
            for _ in 0..n_dims - 1 {
                f.write_str("\n")?;
            }
            for _ in 0..indent {
                f.write_str(" ")?;
            }
        } else {
            f.write_str(" ")?;
        }
    }
    Ok(())
}

fn format_array<B, S, F>(array: &ArrayBase<B, S>, f: &mut fmt::Formatter<'_>, mut fmt: F) -> fmt::Result
where
    B: Storage,
    S: Shape,
    F: FnMut(&<B as Storage>::Elem, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let option = FormatOption::new(array.len(), f.alternate());
    format_axes(array.data(), 0, S::AXES.as_slice(), 1, &option, f, &mut fmt)
}

impl<B, S> fmt::Debug for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
    <B as Storage>::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, fmt::Debug::fmt)?;
        write!(f, ", shape={:?}, strides={:?}", S::SIZES, S::STRIDES)?;
        match Layout::of(&S::AXES) {
            Some(layout) => write!(f, ", layout={:?}", layout),
            None => f.write_str(", layout=Strided"),
        }
    }
}

impl<B, S> fmt::Display for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
    <B as Storage>::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, fmt::Display::fmt)
    }
}

impl<B, S> fmt::LowerExp for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
    <B as Storage>::Elem: fmt::LowerExp,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, fmt::LowerExp::fmt)
    }
}

impl<B, S> fmt::UpperExp for ArrayBase<B, S>
where
    B: Storage,
    S: Shape,
    <B as Storage>::Elem: fmt::UpperExp,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, fmt::UpperExp::fmt)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "std"))]
    use alloc::{format, vec, vec::Vec};

    use crate::{shape, Array, ArrayView, ColumnMajor, NDArrayOwned, Result};

    #[test]
    fn format_0d_array() {
        let a0 = Array::<usize, shape![]>::from_elem(1);

        assert_eq!(format!("{}", a0), "1");
    }

    #[test]
    fn format_1d_array() {
        const N: usize = super::TRUNCATION_THRESHOLD + 10;
        let a1 = Array::<usize, shape![N]>::ones();

        assert_eq!(format!("{}", a1), "[1, 1, 1, ..., 1, 1, 1]");
        assert_eq!(format!("{:#}", a1), format!("[{}]", ["1"; N].join(", ")));
    }

    #[test]
    fn format_edges_of_long_axis() {
        const N: usize = super::TRUNCATION_THRESHOLD + 10;
        let a1 = Array::<usize, shape![N]>::from_fn(|[i]| i);

        assert_eq!(format!("{}", a1), "[0, 1, 2, ..., 1007, 1008, 1009]");
    }

    #[test]
    fn format_2d_array() -> Result<()> {
        let a2 = Array::<usize, shape![2, 3; ColumnMajor]>::from_shape_vec(vec![1, 2, 3, 4, 5, 6])?;

        assert_eq!(format!("{}", a2), "[[1, 2, 3],\n [4, 5, 6]]");
        assert_eq!(format!("{}", a2.transpose()), "[[1, 4],\n [2, 5],\n [3, 6]]");

        Ok(())
    }

    #[test]
    fn format_derived_views() {
        let a = Array::<usize, shape![3, 4]>::from_fn(|[i, j]| 4 * i + j);

        assert_eq!(format!("{}", a.fix_axis::<0>(1)), "[4, 5, 6, 7]");
        assert_eq!(format!("{}", a.sub_range::<1, 2>(2)), "[[2, 3],\n [6, 7],\n [10, 11]]");
    }

    #[test]
    fn format_exponents() {
        let a = Array::<f64, shape![2]>::from_fn(|[i]| 1500.0 * (i + 1) as f64);

        assert_eq!(format!("{:e}", a), "[1.5e3, 3e3]");
        assert_eq!(format!("{:E}", a), "[1.5E3, 3E3]");
    }

    #[test]
    fn debug_appends_layout() -> Result<()> {
        let data = (0..12).collect::<Vec<usize>>();
        let v = ArrayView::<_, shape![3, 4]>::from_slice(&data)?;

        assert_eq!(
            format!("{:?}", v.fix_axis::<1>(0)),
            "[0, 4, 8], shape=[3], strides=[4], layout=Strided"
        );
        assert_eq!(
            format!("{:?}", v.fix_axis::<0>(0)),
            "[0, 1, 2, 3], shape=[4], strides=[1], layout=RowMajor"
        );
        assert_eq!(
            format!("{:?}", v.transpose().fix_axis::<0>(0)),
            "[0, 4, 8], shape=[3], strides=[4], layout=Strided"
        );

        Ok(())
    }

    #[test]
    fn format_3d_array() {
        let a3 = Array::<usize, shape![50, 50, 50]>::ones();
        let row = "[1, 1, 1, ..., 1, 1, 1]";
        let block = format!(
            "[{r},\n  {r},\n  {r},\n  ...,\n  {r},\n  {r},\n  {r}]",
            r = row
        );
        let expected = format!(
            "[{b},\n\n {b},\n\n {b},\n\n ...,\n\n {b},\n\n {b},\n\n {b}]",
            b = block
        );

        assert_eq!(format!("{}", a3), expected);
    }
}
