//! Declarative macros for unit-only enums that travel as lowercase names
//! (labels, kernel names, monitor kinds).

/// Implements `as_str`, `Display` and `FromStr` for a unit-only enum.
///
/// Parsing is case-insensitive and surrounding whitespace is ignored. The
/// error type is a `String` naming the enum and the rejected input, which
/// callers usually wrap into their own validation error.
///
/// # Example
///
/// ```rust
/// use textops_common::impl_str_conversions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub enum Kernel {
///     Linear,
/// }
///
/// impl_str_conversions!(Kernel {
///     Linear => "linear",
/// });
///
/// assert_eq!(Kernel::Linear.as_str(), "linear");
/// assert_eq!(" LINEAR ".parse::<Kernel>(), Ok(Kernel::Linear));
/// ```
#[macro_export]
macro_rules! impl_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase name of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
