//! Closed enumerations carried on the wire as integer ordinals.
//!
//! Documents written by newer service versions may carry ordinals this crate
//! does not know. Decoding never fails on those: the value degrades to the
//! enumeration's `Unknown` member.

/// An enumeration encoded as an integer ordinal.
pub trait OrdinalEnum: Sized + Copy + PartialEq + 'static {
    /// Member used for unrecognized ordinals.
    const UNKNOWN: Self;

    fn try_from_ordinal(ordinal: i32) -> Option<Self>;

    fn ordinal(self) -> i32;

    fn from_ordinal(ordinal: i32) -> Self {
        match Self::try_from_ordinal(ordinal) {
            Some(value) => value,
            None => {
                tracing::debug!(
                    ordinal,
                    enumeration = std::any::type_name::<Self>(),
                    "unrecognized ordinal, using Unknown"
                );
                Self::UNKNOWN
            }
        }
    }

    fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

/// Declares an [`OrdinalEnum`] with an `Unknown = 0` member. `Display`
/// prints the member name.
///
/// ```
/// hrecord_binding::ordinal_enum! {
///     /// Pain level.
///     pub enum Pain {
///         Mild = 1,
///         Severe = 2,
///     }
/// }
///
/// use hrecord_binding::OrdinalEnum;
/// assert_eq!(Pain::from_ordinal(2), Pain::Severe);
/// assert_eq!(Pain::from_ordinal(7), Pain::Unknown);
/// assert_eq!(Pain::Severe.to_string(), "Severe");
/// ```
#[macro_export]
macro_rules! ordinal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            /// Not specified, or an ordinal this version does not recognize.
            #[default]
            Unknown,
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::OrdinalEnum for $name {
            const UNKNOWN: Self = $name::Unknown;

            fn try_from_ordinal(ordinal: i32) -> Option<Self> {
                match ordinal {
                    0 => Some($name::Unknown),
                    $( $value => Some($name::$variant), )+
                    _ => None,
                }
            }

            fn ordinal(self) -> i32 {
                match self {
                    $name::Unknown => 0,
                    $( $name::$variant => $value, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match self {
                    $name::Unknown => "Unknown",
                    $( $name::$variant => stringify!($variant), )+
                })
            }
        }
    };
}
