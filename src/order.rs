/// Storage order of a view, derived from its strides.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// The last index varies fastest.
    RowMajor,
    /// The first index varies fastest.
    #[default]
    ColumnMajor,
    /// Neither canonical layout; always the case for gathered views.
    NonSpecific,
}

impl Order {
    /// Classifies a stride vector against the two canonical contiguous layouts.
    ///
    /// Column-major wins when both match, which only happens for rank 0 and 1.
    pub fn of(shape: &[usize], strides: &[isize]) -> Self {
        if is_column_major(shape, strides) {
            Self::ColumnMajor
        } else if is_row_major(shape, strides) {
            Self::RowMajor
        } else {
            Self::NonSpecific
        }
    }

    /// Writes the canonical strides of `shape` starting from `base_stride`.
    ///
    /// `NonSpecific` has no canonical layout and falls back to column-major.
    pub fn convert_shape_to_strides(self, shape: &[usize], base_stride: isize, strides: &mut [isize]) {
        debug_assert_eq!(shape.len(), strides.len());

        match self {
            Self::RowMajor => {
                strides
                    .iter_mut()
                    .zip(shape.iter())
                    .rfold(base_stride, |acc, (stride, &dim)| {
                        *stride = acc;
                        acc * dim as isize
                    });
            }
            Self::ColumnMajor | Self::NonSpecific => {
                strides
                    .iter_mut()
                    .zip(shape.iter())
                    .fold(base_stride, |acc, (stride, &dim)| {
                        *stride = acc;
                        acc * dim as isize
                    });
            }
        }
    }

    pub fn convert_shape_to_default_strides(self, shape: &[usize], strides: &mut [isize]) {
        self.convert_shape_to_strides(shape, 1, strides)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::RowMajor => "row major",
            Self::ColumnMajor => "column major",
            Self::NonSpecific => "non-specific",
        }
    }
}

fn is_column_major(shape: &[usize], strides: &[isize]) -> bool {
    debug_assert_eq!(shape.len(), strides.len());

    let mut stride_expected = 1_isize;
    for (&dim, &stride) in shape.iter().zip(strides) {
        if stride != stride_expected {
            return false;
        }
        stride_expected *= dim as isize;
    }

    true
}

fn is_row_major(shape: &[usize], strides: &[isize]) -> bool {
    debug_assert_eq!(shape.len(), strides.len());

    let mut stride_expected = 1_isize;
    for (&dim, &stride) in shape.iter().rev().zip(strides.iter().rev()) {
        if stride != stride_expected {
            return false;
        }
        stride_expected *= dim as isize;
    }

    true
}
