//! Declarative macro for deriving [`crate::ParameterInfo`] from a compact table.
//!
//! Writing a `ParameterInfo` impl by hand means three parallel `match`
//! statements (descriptor, getter, setter) that must stay in lockstep as
//! parameters are added or reordered. `impl_params!` generates all three
//! from one table so there's a single place to edit per parameter.
//!
//! # Example
//!
//! ```rust
//! use sonido_core::{ParamDescriptor, ParameterInfo};
//!
//! struct Boost {
//!     gain_db: f32,
//! }
//!
//! sonido_core::impl_params! {
//!     Boost, this {
//!         [0] ParamDescriptor::gain_db("Gain", "Gain", -20.0, 20.0, 0.0),
//!             get: this.gain_db,
//!             set: |v| this.gain_db = v.clamp(-20.0, 20.0);
//!     }
//! }
//!
//! let mut b = Boost { gain_db: 0.0 };
//! assert_eq!(b.param_count(), 1);
//! b.set_param(0, 6.0);
//! assert_eq!(b.get_param(0), 6.0);
//! ```

/// Generates a [`crate::ParameterInfo`] implementation for `$ty` from a table
/// of `[index] descriptor, get: expr, set: |v| stmt;` entries.
///
/// `$this` is bound to `self` (by shared or mutable reference, depending on
/// which generated method is executing) inside each entry's expressions.
#[macro_export]
macro_rules! impl_params {
    ($ty:ty, $this:ident { $( [$idx:expr] $desc:expr, get: $get:expr, set: $set:expr ; )+ }) => {
        impl $crate::param_info::ParameterInfo for $ty {
            fn param_count(&self) -> usize {
                $crate::impl_params!(@count $($idx)+)
            }

            fn param_info(&self, index: usize) -> Option<$crate::param_info::ParamDescriptor> {
                let $this = self;
                match index {
                    $( $idx => Some($desc), )+
                    _ => None,
                }
            }

            fn get_param(&self, index: usize) -> f32 {
                let $this = self;
                match index {
                    $( $idx => $get, )+
                    _ => 0.0,
                }
            }

            fn set_param(&mut self, index: usize, value: f32) {
                let $this = self;
                match index {
                    $( $idx => { ($set)(value); } )+
                    _ => {}
                }
            }
        }
    };
    (@count $($idx:expr)+) => {
        0usize $( + { let _ = $idx; 1usize } )+
    };
}
