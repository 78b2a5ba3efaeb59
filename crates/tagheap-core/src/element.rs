//! Fixed-size element types that can live inside an arena payload.
//!
//! An arena only stores bytes. [`Element`] is the contract an element
//! type fulfils so the typed adapter can construct values into, and
//! destroy values out of, a payload region without any `unsafe` casts.

use std::mem::size_of;

/// A value with a fixed byte encoding of [`Element::SIZE`] bytes.
///
/// `SIZE` is the element byte size used for all allocation arithmetic:
/// a request for `n` elements reserves `n * SIZE` payload bytes.
pub trait Element: Sized {
    /// Encoded size in bytes. Must be non-zero.
    const SIZE: usize;

    /// Write this value's encoding into `out[..SIZE]`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `SIZE`.
    fn encode(&self, out: &mut [u8]);

    /// Rebuild a value from `bytes[..SIZE]`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `SIZE`.
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! impl_element_for_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const SIZE: usize = size_of::<$t>();

                fn encode(&self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
                }

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; size_of::<$t>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$t>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_element_for_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Element for bool {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl<E: Element, const K: usize> Element for [E; K] {
    const SIZE: usize = E::SIZE * K;

    fn encode(&self, out: &mut [u8]) {
        for (item, chunk) in self.iter().zip(out[..Self::SIZE].chunks_exact_mut(E::SIZE)) {
            item.encode(chunk);
        }
    }

    fn decode(bytes: &[u8]) -> Self {
        std::array::from_fn(|i| E::decode(&bytes[i * E::SIZE..(i + 1) * E::SIZE]))
    }
}
