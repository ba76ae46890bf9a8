use nd_vector::{impl_ndvector_ops, impl_ndvector_ops_for_dim};

use core::fmt;
use std::ops;

pub type CornerIdx = usize;
pub type VertexIdx = usize;
pub type FaceIdx = usize;


pub trait ConfigType {
    fn default()-> Self;
}


pub trait DataValue:
    Clone + Copy + PartialEq + PartialOrd + fmt::Debug
    + ops::Add<Output=Self> + ops::Sub<Output=Self> + ops::Mul<Output=Self> + ops::Div<Output=Self>
    + ops::AddAssign + ops::SubAssign + ops::MulAssign + ops::DivAssign
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(data: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_data_value {
    ($($t:ty),*) => {
        $(
            impl DataValue for $t {
                fn zero() -> Self {
                    0 as $t
                }

                fn one() -> Self {
                    1 as $t
                }

                fn from_f64(data: f64) -> Self {
                    data as $t
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_data_value!(i64, f32, f64);


pub trait Float: DataValue + ops::Neg<Output=Self> {
    fn sqrt(self)-> Self;
}

impl Float for f32 {
    fn sqrt(self)-> Self {
        self.sqrt()
    }
}

impl Float for f64 {
    fn sqrt(self)-> Self {
        self.sqrt()
    }
}


pub trait Dot {
    type Product;
    fn dot(self, other: Self) -> Self::Product;
}

pub trait Cross {
    fn cross(self, other: Self) -> Self;
}


/// Fixed-size vector. The arithmetic operators are generated per dimension by `nd_vector`.
#[derive(Clone, Copy, PartialEq)]
pub struct NdVector<const N: usize, T> {
    data: [T; N],
}

impl<const N: usize, T: DataValue> NdVector<N, T> {
    pub fn zero() -> Self {
        Self { data: [T::zero(); N] }
    }

    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.data[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.data
    }

    /// Applies `f` to every component.
    pub fn map<U: DataValue>(self, f: impl Fn(T) -> U) -> NdVector<N, U> {
        NdVector { data: self.data.map(f) }
    }
}

impl<const N: usize, T: Float> NdVector<N, T>
    where Self: Dot<Product = T>
{
    pub fn norm(self) -> T {
        self.dot(self).sqrt()
    }

    /// Returns the unit vector, or `None` for the zero vector.
    pub fn normalize(self) -> Option<Self> {
        let norm = self.norm();
        if norm == T::zero() {
            return None;
        }
        Some(self.map(|x| x / norm))
    }
}

impl<const N: usize, T> From<[T;N]> for NdVector<N, T> {
    fn from(data: [T;N]) -> Self {
        NdVector { data }
    }
}

impl<const N: usize, T> fmt::Debug for NdVector<N, T>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.data)
    }
}

impl<T: DataValue> Cross for NdVector<3, T> {
    fn cross(self, other: Self) -> Self {
        let [a0, a1, a2] = self.data;
        let [b0, b1, b2] = other.data;
        NdVector {
            data: [
                a1 * b2 - a2 * b1,
                a2 * b0 - a0 * b2,
                a0 * b1 - a1 * b0,
            ]
        }
    }
}

impl_ndvector_ops!();
