use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use std::env;
use syn::{parse_macro_input, LitInt};

/// Implements the arithmetic of `NdVector<N, T>` for every `N` in `1..=MAX_VECTOR_DIM`.
/// The caller must have `NdVector`, `DataValue`, `Dot` and `impl_ndvector_ops_for_dim` in scope.
#[proc_macro]
pub fn impl_ndvector_ops(_: TokenStream) -> TokenStream {
    let max: usize = env::var("MAX_VECTOR_DIM")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4); // Default max vec size is 4 if missing or invalid
    let max = Literal::usize_unsuffixed(max);

    let expanded = quote! {
        seq_macro::seq!(N in 1..=#max {
            impl_ndvector_ops_for_dim!(N);
        });
    };
    TokenStream::from(expanded)
}

/// Implements the arithmetic of `NdVector<N, T>` for a single dimension `N`.
#[proc_macro]
pub fn impl_ndvector_ops_for_dim(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitInt);
    let n: usize = match lit.base10_parse() {
        Ok(n) => n,
        Err(e) => return e.to_compile_error().into(),
    };

    let add = (0..n).map(|i| quote! { self.data[#i] + rhs.data[#i] });
    let sub = (0..n).map(|i| quote! { self.data[#i] - rhs.data[#i] });
    let mul = (0..n).map(|i| quote! { self.data[#i] * rhs });
    let div = (0..n).map(|i| quote! { self.data[#i] / rhs });
    let add_assign = (0..n).map(|i| quote! { self.data[#i] += rhs.data[#i]; });
    let sub_assign = (0..n).map(|i| quote! { self.data[#i] -= rhs.data[#i]; });
    let dot = (0..n).map(|i| quote! { + self.data[#i] * rhs.data[#i] });

    let expanded = quote! {
        impl<T: DataValue> std::ops::Add for NdVector<#n, T> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                NdVector { data: [#(#add),*] }
            }
        }

        impl<T: DataValue> std::ops::Sub for NdVector<#n, T> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                NdVector { data: [#(#sub),*] }
            }
        }

        impl<T: DataValue> std::ops::Mul<T> for NdVector<#n, T> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: T) -> Self::Output {
                NdVector { data: [#(#mul),*] }
            }
        }

        impl<T: DataValue> std::ops::Div<T> for NdVector<#n, T> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: T) -> Self::Output {
                NdVector { data: [#(#div),*] }
            }
        }

        impl<T: DataValue> std::ops::AddAssign for NdVector<#n, T> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                #(#add_assign)*
            }
        }

        impl<T: DataValue> std::ops::SubAssign for NdVector<#n, T> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                #(#sub_assign)*
            }
        }

        impl<T: DataValue> Dot for NdVector<#n, T> {
            type Product = T;
            #[inline]
            fn dot(self, rhs: Self) -> T {
                T::zero() #(#dot)*
            }
        }
    };

    TokenStream::from(expanded)
}
