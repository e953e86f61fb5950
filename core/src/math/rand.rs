//! Pseudo-random number generation and sampling distributions.
//!
//! The distributions here are the usual building blocks of Monte Carlo
//! light transport: uniform ranges, points in the unit disk, directions on
//! the unit sphere and hemisphere, cosine-weighted directions, and points on
//! a triangle.

use core::{array, ops::Range};

use crate::error::{Error, Result};
use crate::math::num::{Float, Scalar};
use crate::math::point::Point3;
use crate::math::vec::{Vec2, Vec3, Vector, vec3};

//
// Traits and types
//

/// The PRNG used by default by the distributions in this module.
pub type DefaultRng = Xorshift64;

/// Trait for generating values sampled from a probability distribution.
pub trait Distrib<R = DefaultRng>: Clone {
    /// The type of the elements of the sample space of `Self`, also called
    /// "outcomes".
    type Sample;

    /// Returns a pseudo-random value sampled from `self`.
    fn sample(&self, rng: &mut R) -> Self::Sample;

    /// Returns an iterator that yields samples from `self`.
    fn iter(&self, rng: R) -> Iter<Self, R> {
        Iter(self.clone(), rng)
    }
}

/// A pseudo-random number generator (PRNG) that uses a [Xorshift algorithm][^1]
/// to generate 64 bits of randomness at a time, represented by a `u64`.
///
/// Xorshift is a type of linear-feedback shift register that uses only three
/// right-shifts and three xor operations per generated number, making it very
/// efficient. Xorshift64 has a period of 2<sup>64</sup>-1: it yields every
/// number in the interval [1, 2<sup>64</sup>) exactly once before repeating.
///
/// [^1]: Marsaglia, G. (2003). Xorshift RNGs. Journal of Statistical Software,
///     8(14), 1–6. <https://doi.org/10.18637/jss.v008.i14>
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Xorshift64(pub u64);

/// A uniform distribution of values in a half-open range.
///
/// Construct with [`Uniform::new`], which rejects empty ranges.
#[derive(Clone, Debug)]
pub struct Uniform<T>(Range<T>);

/// A uniform distribution of 2-vectors inside the (closed) unit disk.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnitDisk;

/// A uniform distribution of 3-vectors on the (surface of) the unit sphere.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnitSphere;

/// A uniform distribution of unit 3-vectors in the hemisphere about +z.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnitHemisphere;

/// A distribution of unit 3-vectors in the hemisphere about +z, with density
/// proportional to the cosine of the angle to +z.
///
/// This is the distribution of incoming directions that contribute equally
/// to the radiance reflected by a Lambertian surface.
#[derive(Copy, Clone, Debug, Default)]
pub struct CosineHemisphere;

/// A uniform distribution of points on a triangle.
#[derive(Copy, Clone, Debug)]
pub struct UniformTriangle {
    a: Point3,
    ab: Vec3,
    ac: Vec3,
}

/// A Bernoulli distribution.
///
/// Generates boolean values such that:
/// * P(true) = p
/// * P(false) = 1 - p.
///
/// given a parameter p ∈ [0.0, 1.0].
#[derive(Copy, Clone, Debug)]
pub struct Bernoulli(f64);

/// Iterator returned by the [Distrib::iter()] method.
pub struct Iter<D, R>(D, R);

//
// Inherent impls
//

impl Xorshift64 {
    /// A random 64-bit prime, used to initialize the generator returned by
    /// [`Xorshift64::default()`].
    pub const DEFAULT_SEED: u64 = 378682147834061;

    /// Returns a new `Xorshift64` seeded by the given number.
    ///
    /// Two `Xorshift64` instances generate the same sequence of pseudo-random
    /// numbers if and only if they were created with the same seed.
    ///
    /// # Examples
    /// ```
    /// # use rayform_core::math::rand::Xorshift64;
    /// let mut g = Xorshift64::from_seed(123);
    /// assert_eq!(g.next_bits(), 133101616827);
    /// assert_eq!(g.next_bits(), 12690785413091508870);
    /// assert_eq!(g.next_bits(), 7516749944291143043);
    /// ```
    ///
    /// # Panics
    ///
    /// If `seed` equals 0.
    pub fn from_seed(seed: u64) -> Self {
        assert_ne!(seed, 0, "xorshift seed cannot be zero");
        Self(seed)
    }

    /// Returns a new `Xorshift64` seeded by the current system time.
    ///
    /// Two calls in quick succession *may* return instances seeded by the
    /// same number, depending on the precision of the system clock.
    #[cfg(feature = "std")]
    pub fn from_time() -> Self {
        let t = std::time::SystemTime::UNIX_EPOCH
            .elapsed()
            .unwrap_or_default();
        Self::from_seed((t.as_micros() as u64).max(1))
    }

    /// Returns 64 bits of pseudo-randomness.
    ///
    /// Successive calls to this function (with the same `self`) will yield
    /// every value in the interval [1, 2<sup>64</sup>) exactly once before
    /// starting to repeat the sequence.
    pub fn next_bits(&mut self) -> u64 {
        let Self(x) = self;
        *x ^= *x << 13;
        *x ^= *x >> 7;
        *x ^= *x << 17;
        *x
    }

    /// Returns a uniformly distributed `f64` in the range [0, 1).
    pub fn next_unit(&mut self) -> f64 {
        // Bit repr of a random f64 in range 1.0..2.0
        let bits = 1023 << 52 | self.next_bits() >> 12;
        f64::from_bits(bits) - 1.0
    }
}

macro_rules! impl_uniform_new {
    ($($t:ty)*) => {$(
        impl Uniform<$t> {
            /// Returns a uniform distribution over `range`.
            ///
            /// # Errors
            /// [`Error::InvalidArgument`] if `range` is empty.
            pub fn new(range: Range<$t>) -> Result<Self> {
                if range.start < range.end {
                    Ok(Self(range))
                } else {
                    Err(Error::InvalidArgument("empty sampling range"))
                }
            }
        }
    )*};
}

impl_uniform_new!(f64 f32 i32);

impl<T: PartialOrd, const N: usize> Uniform<[T; N]> {
    /// Returns a uniform distribution over the axis-aligned box `range`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `range` is empty along any axis.
    pub fn new(range: Range<[T; N]>) -> Result<Self> {
        if (0..N).all(|i| range.start[i] < range.end[i]) {
            Ok(Self(range))
        } else {
            Err(Error::InvalidArgument("empty sampling range"))
        }
    }
}

impl<T: PartialOrd, Sp, const N: usize> Uniform<Vector<[T; N], Sp>> {
    /// Returns a uniform distribution over the axis-aligned box `range`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `range` is empty along any axis.
    pub fn new(range: Range<Vector<[T; N], Sp>>) -> Result<Self> {
        let (s, e) = (&range.start.0, &range.end.0);
        if (0..N).all(|i| s[i] < e[i]) {
            Ok(Self(range))
        } else {
            Err(Error::InvalidArgument("empty sampling range"))
        }
    }
}

impl UniformTriangle {
    /// Returns a uniform distribution on the triangle `abc`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the triangle is degenerate, that is,
    /// its vertices are collinear. The test is relative to the lengths of
    /// the edges, so the scale of the triangle does not matter.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Result<Self> {
        let (ab, ac) = (b - a, c - a);
        let area_sqr = ab.cross(&ac).len_sqr();
        if area_sqr <= f64::TOLERANCE * ab.len_sqr() * ac.len_sqr() {
            return Err(Error::InvalidArgument("degenerate triangle"));
        }
        Ok(Self { a, ab, ac })
    }
}

impl Bernoulli {
    /// Returns a Bernoulli distribution with P(true) = `p`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `p` is not in [0, 1].
    pub fn new(p: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&p) {
            Ok(Self(p))
        } else {
            Err(Error::InvalidArgument("probability not in [0, 1]"))
        }
    }
}

//
// Foreign trait impls
//

impl<D: Distrib<R>, R> Iterator for Iter<D, R> {
    type Item = D::Sample;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.sample(&mut self.1))
    }
}

impl Default for Xorshift64 {
    /// Returns a `Xorshift64` seeded with [`Self::DEFAULT_SEED`].
    fn default() -> Self {
        Self::from_seed(Self::DEFAULT_SEED)
    }
}

//
// Local trait impls
//

impl Distrib for Uniform<i32> {
    type Sample = i32;

    /// Returns a uniformly distributed `i32` in the given range.
    fn sample(&self, rng: &mut DefaultRng) -> i32 {
        let Range { start, end } = self.0;
        let span = (i64::from(end) - i64::from(start)) as u64;
        // TODO rem introduces slight bias
        (i64::from(start) + (rng.next_bits() % span) as i64) as i32
    }
}

impl Distrib for Uniform<f64> {
    type Sample = f64;

    /// Returns a uniformly distributed `f64` in the given range.
    fn sample(&self, rng: &mut DefaultRng) -> f64 {
        let Range { start, end } = self.0;
        let u = rng.next_unit();
        // Interpolate without forming `end - start`, which may overflow
        let x = start * (1.0 - u) + end * u;
        x.max(start).min(prev_f64(end))
    }
}

impl Distrib for Uniform<f32> {
    type Sample = f32;

    /// Returns a uniformly distributed `f32` in the given range.
    fn sample(&self, rng: &mut DefaultRng) -> f32 {
        let Range { start, end } = self.0;
        // Bit repr of a random f32 in range 1.0..2.0
        let bits = 127 << 23 | rng.next_bits() >> 41;
        let u = f32::from_bits(bits as u32) - 1.0;
        let x = start * (1.0 - u) + end * u;
        x.max(start).min(prev_f32(end))
    }
}

/// Returns the largest `f64` less than `x`, for finite `x`.
fn prev_f64(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Returns the largest `f32` less than `x`, for finite `x`.
fn prev_f32(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

impl<T, const N: usize> Distrib for Uniform<[T; N]>
where
    T: Copy,
    Uniform<T>: Distrib<Sample = T>,
{
    type Sample = [T; N];

    /// Returns an array of values that represents a uniformly distributed point
    /// within the N-dimensional rectangular volume bounded by `self.0`.
    fn sample(&self, rng: &mut DefaultRng) -> [T; N] {
        array::from_fn(|i| Uniform(self.0.start[i]..self.0.end[i]).sample(rng))
    }
}

impl<Sc, Sp, const DIM: usize> Distrib for Uniform<Vector<[Sc; DIM], Sp>>
where
    Sc: Copy,
    Uniform<[Sc; DIM]>: Distrib<Sample = [Sc; DIM]>,
{
    type Sample = Vector<[Sc; DIM], Sp>;

    /// Returns a uniformly distributed vector within the rectangular volume
    /// bounded by the range `self.0`.
    fn sample(&self, rng: &mut DefaultRng) -> Self::Sample {
        Uniform(self.0.start.0..self.0.end.0)
            .sample(rng)
            .into()
    }
}

impl Distrib for UnitDisk {
    type Sample = Vec2;

    /// Returns a 2-vector uniformly distributed within the unit disk.
    fn sample(&self, rng: &mut DefaultRng) -> Vec2 {
        let d = Uniform([-1.0; 2]..[1.0; 2]);
        loop {
            let v = Vec2::from(d.sample(rng));
            if v.len_sqr() <= 1.0 {
                return v;
            }
        }
    }
}

impl Distrib for UnitSphere {
    type Sample = Vec3;

    /// Returns a vector uniformly distributed on the unit sphere.
    fn sample(&self, rng: &mut DefaultRng) -> Vec3 {
        let d = Uniform([-1.0; 3]..[1.0; 3]);
        loop {
            let v = Vec3::from(d.sample(rng));
            // Points in the ball project uniformly onto the sphere;
            // the corners of the cube would not
            let l = v.len_sqr();
            if l <= 1.0 && l > f64::TOLERANCE {
                return v.normalize();
            }
        }
    }
}

impl Distrib for UnitHemisphere {
    type Sample = Vec3;

    /// Returns a vector uniformly distributed on the unit hemisphere about +z.
    fn sample(&self, rng: &mut DefaultRng) -> Vec3 {
        let [x, y, z] = UnitSphere.sample(rng).0;
        vec3(x, y, Scalar::abs(z))
    }
}

impl Distrib for CosineHemisphere {
    type Sample = Vec3;

    /// Returns a cosine-weighted unit vector in the hemisphere about +z.
    ///
    /// Uses Malley's method: a point uniform in the unit disk, lifted up
    /// onto the hemisphere.
    fn sample(&self, rng: &mut DefaultRng) -> Vec3 {
        let d = UnitDisk.sample(rng);
        let z = Float::sqrt((1.0 - d.len_sqr()).max(0.0));
        vec3(d.x(), d.y(), z)
    }
}

impl Distrib for UniformTriangle {
    type Sample = Point3;

    /// Returns a point uniformly distributed on the triangle.
    fn sample(&self, rng: &mut DefaultRng) -> Point3 {
        let (mut s, mut t) = (rng.next_unit(), rng.next_unit());
        if s + t > 1.0 {
            // Fold the far half of the parallelogram back onto the triangle
            (s, t) = (1.0 - s, 1.0 - t);
        }
        self.a + self.ab * s + self.ac * t
    }
}

impl Distrib for Bernoulli {
    type Sample = bool;

    /// Returns boolean values sampled from a Bernoulli distribution.
    fn sample(&self, rng: &mut DefaultRng) -> bool {
        rng.next_unit() < self.0
    }
}
