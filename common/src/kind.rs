//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// The `case` is the naming convention of its textual representation, in
/// terms of `strum(serialize_all)`.
///
/// # Example
///
/// ```rust
/// # use crate::common::define_kind;
///
/// define_kind! {
///     #[doc = "Travel kind."]
///     #[case = "lowercase"]
///     enum Travel {
///         #[doc = "By car."]
///         Driving = 1,
///
///         #[doc = "On foot."]
///         Walking = 2,
///     }
/// }
///
/// assert_eq!(Travel::Driving.to_string(), "driving");
/// assert_eq!("walking".parse::<Travel>(), Ok(Travel::Walking));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        #[case = $case:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = $case)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants of this kind, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Looks up a variant by its [`u8`] representation.
            #[must_use]
            pub fn from_u8(value: u8) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.u8() == value)
            }
        }
    };
}
