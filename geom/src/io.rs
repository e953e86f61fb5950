//! Binary encoding of value types.
//!
//! Every value is written as a fixed sequence of big-endian scalars with no
//! padding or length prefix:
//!
//! | Type       | Layout                                  |
//! |------------|-----------------------------------------|
//! | point      | components x, y, z, w                   |
//! | vector     | components x, y, z, w                   |
//! | quaternion | components x, y, z, w                   |
//! | matrix     | elements in row-major order             |
//! | ray        | origin, then direction                  |
//! | basis      | axes w, v, u                            |
//! | box        | min corner, then max corner             |
//!
//! `f64` scalars take 8 bytes, `f32` and `i32` scalars 4 bytes.
//! An [`AnyBBox`] is additionally prefixed with a tag byte identifying its
//! scalar type.

use alloc::vec::Vec;

use bytes::{Buf, BufMut};

use rf::geom::Ray;
use rf::math::basis::Basis;
use rf::math::mat::Matrix;
use rf::math::num::Scalar;
use rf::math::point::Point;
use rf::math::quat::Quat;
use rf::math::vec::Vector;

use crate::bbox::{BBox, BBoxf, BBoxi};

/// Error returned when decoding fails.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input ended before the value was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A bounding box tag byte did not match any known scalar type.
    #[error("unknown bounding box tag {0:#04x}")]
    UnknownTag(u8),
}

pub type Result<T> = core::result::Result<T, Error>;

/// A scalar type with a fixed-width binary representation.
pub trait Component: Scalar {
    /// The number of bytes in the encoding.
    const WIDTH: usize;

    fn put(self, buf: &mut impl BufMut);

    /// Reads a value from `buf`. The caller must ensure that `buf` has
    /// at least [`Self::WIDTH`] bytes remaining.
    fn get(buf: &mut impl Buf) -> Self;
}

macro_rules! impl_component {
    ($($t:ty: $w:literal, $put:ident, $get:ident;)*) => {$(
        impl Component for $t {
            const WIDTH: usize = $w;

            #[inline]
            fn put(self, buf: &mut impl BufMut) {
                buf.$put(self)
            }
            #[inline]
            fn get(buf: &mut impl Buf) -> Self {
                buf.$get()
            }
        }
    )*};
}

impl_component! {
    f64: 8, put_f64, get_f64;
    f32: 4, put_f32, get_f32;
    i32: 4, put_i32, get_i32;
}

/// Trait for values that can be written in binary form.
pub trait Encode {
    /// Returns the number of bytes [`encode`][Self::encode] writes.
    fn encoded_len(&self) -> usize;

    /// Writes `self` to `buf`.
    ///
    /// # Panics
    /// If `buf` does not have enough capacity remaining. Growable buffers,
    /// such as `Vec<u8>`, never run out.
    fn encode(&self, buf: &mut impl BufMut);

    /// Returns `self` encoded into a new byte vector.
    fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(self.encoded_len());
        self.encode(&mut v);
        v
    }
}

/// Trait for values that can be read from binary form.
pub trait Decode: Sized {
    /// Reads a value from `buf`, advancing it past the bytes read.
    ///
    /// # Errors
    /// [`Error::Truncated`] if `buf` ends too early. Any bytes remaining
    /// after the value are left unread.
    fn decode(buf: &mut impl Buf) -> Result<Self>;
}

fn ensure(buf: &impl Buf, needed: usize) -> Result<()> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(Error::Truncated { needed, remaining });
    }
    Ok(())
}

fn put_all<Sc: Component>(vals: &[Sc], buf: &mut impl BufMut) {
    for &v in vals {
        v.put(buf);
    }
}

fn get_array<Sc: Component, const N: usize>(
    buf: &mut impl Buf,
) -> Result<[Sc; N]> {
    ensure(buf, N * Sc::WIDTH)?;
    let mut res = [Sc::ZERO; N];
    for v in &mut res {
        *v = Sc::get(buf);
    }
    Ok(res)
}

//
// Impls
//

impl<Sc: Component, Sp, const N: usize> Encode for Vector<[Sc; N], Sp> {
    fn encoded_len(&self) -> usize {
        N * Sc::WIDTH
    }
    fn encode(&self, buf: &mut impl BufMut) {
        put_all(&self.0, buf)
    }
}

impl<Sc: Component, Sp, const N: usize> Decode for Vector<[Sc; N], Sp> {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        get_array(buf).map(Self::new)
    }
}

impl<Sc: Component, Sp, const N: usize> Encode for Point<[Sc; N], Sp> {
    fn encoded_len(&self) -> usize {
        N * Sc::WIDTH
    }
    fn encode(&self, buf: &mut impl BufMut) {
        put_all(&self.0, buf)
    }
}

impl<Sc: Component, Sp, const N: usize> Decode for Point<[Sc; N], Sp> {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        get_array(buf).map(Self::new)
    }
}

impl<Sc: Component> Encode for Quat<Sc> {
    fn encoded_len(&self) -> usize {
        4 * Sc::WIDTH
    }
    fn encode(&self, buf: &mut impl BufMut) {
        put_all(&self.0, buf)
    }
}

impl<Sc: Component> Decode for Quat<Sc> {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        get_array(buf).map(Quat)
    }
}

impl<Sc: Component, M, const N: usize> Encode for Matrix<[[Sc; N]; N], M> {
    fn encoded_len(&self) -> usize {
        N * N * Sc::WIDTH
    }
    fn encode(&self, buf: &mut impl BufMut) {
        for row in &self.0 {
            put_all(row, buf);
        }
    }
}

impl<Sc: Component, M, const N: usize> Decode for Matrix<[[Sc; N]; N], M> {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        ensure(buf, N * N * Sc::WIDTH)?;
        let mut rows = [[Sc::ZERO; N]; N];
        for row in &mut rows {
            *row = get_array(buf)?;
        }
        Ok(Self::new(rows))
    }
}

impl<Sc: Component, Sp, const N: usize> Encode for Ray<Point<[Sc; N], Sp>> {
    fn encoded_len(&self) -> usize {
        self.0.encoded_len() + self.1.encoded_len()
    }
    fn encode(&self, buf: &mut impl BufMut) {
        self.0.encode(buf);
        self.1.encode(buf);
    }
}

impl<Sc: Component, Sp, const N: usize> Decode for Ray<Point<[Sc; N], Sp>> {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        ensure(buf, 2 * N * Sc::WIDTH)?;
        Ok(Ray(Point::decode(buf)?, Vector::decode(buf)?))
    }
}

impl<Sc: Component, B> Encode for Basis<Sc, B> {
    fn encoded_len(&self) -> usize {
        9 * Sc::WIDTH
    }
    fn encode(&self, buf: &mut impl BufMut) {
        self.w.encode(buf);
        self.v.encode(buf);
        self.u.encode(buf);
    }
}

impl<Sc: Component, B> Decode for Basis<Sc, B> {
    /// Reads the three axes of a basis.
    ///
    /// The axes are not checked for orthonormality; use [`Basis::new`] on
    /// the result to validate untrusted input.
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        ensure(buf, 9 * Sc::WIDTH)?;
        let w = Vector::decode(buf)?;
        let v = Vector::decode(buf)?;
        let u = Vector::decode(buf)?;
        Ok(Basis { w, v, u })
    }
}

impl<Sc: Component, B> Encode for BBox<Sc, B> {
    fn encoded_len(&self) -> usize {
        6 * Sc::WIDTH
    }
    fn encode(&self, buf: &mut impl BufMut) {
        self.min().encode(buf);
        self.max().encode(buf);
    }
}

impl<Sc: Component, B> Decode for BBox<Sc, B> {
    /// Reads the min and max corners of a box.
    ///
    /// If the corners are out of order, they are reordered componentwise
    /// as in [`BBox::new`].
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        ensure(buf, 6 * Sc::WIDTH)?;
        let min = Point::decode(buf)?;
        let max = Point::decode(buf)?;
        Ok(BBox::new(min, max))
    }
}

/// A bounding box of any supported scalar type.
///
/// Encoded with a leading tag byte identifying the scalar type, followed
/// by the box itself.
///
/// # Examples
/// ```
/// use rf::math::pt3;
/// use rayform_geom::BBox;
/// use rayform_geom::io::{AnyBBox, Decode, Encode, Error};
///
/// let b = AnyBBox::F32(BBox::new(pt3(0.0, 0.0, 0.0), pt3(1.0, 2.0, 3.0)));
/// let bytes = b.to_bytes();
/// assert_eq!(bytes.len(), 1 + 6 * 4);
/// assert_eq!(bytes[0], AnyBBox::TAG_F32);
/// assert_eq!(AnyBBox::decode(&mut &bytes[..]), Ok(b));
///
/// assert_eq!(AnyBBox::decode(&mut &[9u8][..]), Err(Error::UnknownTag(9)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnyBBox {
    F64(BBox<f64>),
    F32(BBoxf),
    I32(BBoxi),
}

impl AnyBBox {
    pub const TAG_F64: u8 = 1;
    pub const TAG_F32: u8 = 2;
    pub const TAG_I32: u8 = 3;

    /// Returns the tag byte identifying the scalar type of `self`.
    pub fn tag(&self) -> u8 {
        match self {
            Self::F64(_) => Self::TAG_F64,
            Self::F32(_) => Self::TAG_F32,
            Self::I32(_) => Self::TAG_I32,
        }
    }
}

impl Encode for AnyBBox {
    fn encoded_len(&self) -> usize {
        1 + match self {
            Self::F64(b) => b.encoded_len(),
            Self::F32(b) => b.encoded_len(),
            Self::I32(b) => b.encoded_len(),
        }
    }
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.tag());
        match self {
            Self::F64(b) => b.encode(buf),
            Self::F32(b) => b.encode(buf),
            Self::I32(b) => b.encode(buf),
        }
    }
}

impl Decode for AnyBBox {
    /// Reads a tagged bounding box.
    ///
    /// # Errors
    /// [`Error::UnknownTag`] if the tag byte is not one of the `TAG_*`
    /// constants, [`Error::Truncated`] if `buf` ends too early.
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        ensure(buf, 1)?;
        match buf.get_u8() {
            Self::TAG_F64 => BBox::decode(buf).map(Self::F64),
            Self::TAG_F32 => BBox::decode(buf).map(Self::F32),
            Self::TAG_I32 => BBox::decode(buf).map(Self::I32),
            tag => {
                log::debug!("rejecting bounding box with unknown tag {tag}");
                Err(Error::UnknownTag(tag))
            }
        }
    }
}

impl From<BBox<f64>> for AnyBBox {
    fn from(b: BBox<f64>) -> Self {
        Self::F64(b)
    }
}
impl From<BBoxf> for AnyBBox {
    fn from(b: BBoxf) -> Self {
        Self::F32(b)
    }
}
impl From<BBoxi> for AnyBBox {
    fn from(b: BBoxi) -> Self {
        Self::I32(b)
    }
}
