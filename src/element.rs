use core::fmt::Debug;

use num_complex::Complex;
use num_traits::Num;

/// Type code of an array element.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ComplexFloat,
    ComplexDouble,
}

impl ElementKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::ComplexFloat => "complex float",
            Self::ComplexDouble => "complex double",
        }
    }

    pub const fn size_of(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double | Self::ComplexFloat => 8,
            Self::ComplexDouble => 16,
        }
    }
}

/// A value that can be stored in an array.
pub trait Element: Copy + Debug + Num + 'static {
    const KIND: ElementKind;
}

macro_rules! impl_element {
    ($( $type:ty => $kind:ident ),*) => {
        $(
            impl Element for $type {
                const KIND: ElementKind = ElementKind::$kind;
            }
        )*
    };
}

impl_element!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Complex<f32> => ComplexFloat,
    Complex<f64> => ComplexDouble
);
