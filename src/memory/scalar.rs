//! Fixed-width scalar types the typed accessor can move

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value with an exact little-endian byte representation.
///
/// Implemented for the signed and unsigned integers from 8 to 64 bits,
/// for `f32`/`f64`, and for `usize`, which moves as many bytes as a pointer
/// of the host has. The set is closed.
pub trait Scalar: sealed::Sealed + Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Width in bytes
    const WIDTH: usize;

    /// Decodes from exactly `WIDTH` little-endian bytes
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Encodes into exactly `WIDTH` little-endian bytes
    fn write_le(&self, out: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    <$ty>::from_le_bytes(raw)
                }

                fn write_le(&self, out: &mut [u8]) {
                    out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// Pointer widths a chain can be resolved with
pub trait PointerValue: Scalar {
    /// Widens the value to a 64-bit address component
    fn to_address_bits(self) -> u64;
}

impl PointerValue for u32 {
    fn to_address_bits(self) -> u64 {
        u64::from(self)
    }
}

impl PointerValue for u64 {
    fn to_address_bits(self) -> u64 {
        self
    }
}
