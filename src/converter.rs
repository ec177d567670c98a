//! Converters between index characters and their numerical representation.

use serde::{Deserialize, Serialize};

/// Maps the characters of a text to the integer alphabet the index works on.
///
/// The index stores symbols as `u64` internally; a converter decides how a
/// character type is widened to and narrowed from that representation, and
/// how large the alphabet is.
pub trait Converter {
    /// The character type handled by this converter.
    type Char;

    /// Convert a u64 into a character of this type.
    #[allow(clippy::wrong_self_convention)]
    fn from_u64(&self, c: u64) -> Self::Char;

    /// Convert a character of this type into a u64.
    fn to_u64(&self, c: Self::Char) -> u64;

    /// Convert a character of this type into a usize.
    fn to_usize(&self, c: Self::Char) -> usize {
        self.to_u64(c) as usize
    }

    /// Returns the largest value a character may take under this converter.
    fn max_value(&self) -> Self::Char;
}

/// An identity converter: characters already are small integers.
///
/// The maximum value bounds the alphabet; by default it is the maximum of the
/// character type itself.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IdConverter<T> {
    max_value: T,
}

impl<T> IdConverter<T> {
    /// Creates a converter for an alphabet bounded by `max_value` inclusive.
    pub fn new(max_value: T) -> Self {
        IdConverter { max_value }
    }
}

macro_rules! impl_id_converter {
    ($t:ty) => {
        impl Default for IdConverter<$t> {
            fn default() -> Self {
                IdConverter {
                    max_value: <$t>::MAX,
                }
            }
        }

        impl Converter for IdConverter<$t> {
            type Char = $t;
            fn from_u64(&self, c: u64) -> $t {
                c as $t
            }
            fn to_u64(&self, c: $t) -> u64 {
                c as u64
            }
            fn max_value(&self) -> $t {
                self.max_value
            }
        }
    };
}

impl_id_converter!(u64);
impl_id_converter!(u32);
impl_id_converter!(u16);
impl_id_converter!(u8);
impl_id_converter!(usize);
