//! Macro for string conversions on unit-only status enums
//!
//! Generates `as_str`, `Display` and a case-insensitive `FromStr` from a
//! single variant table so the wire spelling of a status lives in one place.
//!
//! # Example
//!
//! ```rust
//! use nextup_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Private,
//! }
//!
//! impl_status_conversions!(Visibility {
//!     Public => "public",
//!     Private => "private",
//! });
//!
//! assert_eq!(Visibility::Private.as_str(), "private");
//! assert_eq!("PUBLIC".parse::<Visibility>().unwrap(), Visibility::Public);
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a unit-only enum.
///
/// Parsing ignores ASCII case and surrounding whitespace. Unknown input
/// yields [`NextupError::InvalidInput`](crate::NextupError::InvalidInput)
/// naming the enum.
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase spelling.
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
            type Err = $crate::NextupError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let needle = s.trim();
                $(
                    if needle.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::NextupError::InvalidInput(format!(
                    "invalid {}: {:?}",
                    stringify!($enum_name),
                    s
                )))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::NextupError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shade {
        Light,
        Dark,
    }

    impl_status_conversions!(Shade {
        Light => "light",
        Dark => "dark",
    });

    #[test]
    fn test_display_uses_table_spelling() {
        assert_eq!(Shade::Light.to_string(), "light");
        assert_eq!(Shade::Dark.as_str(), "dark");
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(Shade::from_str("  DARK ").unwrap(), Shade::Dark);
        assert_eq!(Shade::from_str("Light").unwrap(), Shade::Light);
    }

    #[test]
    fn test_parse_unknown_is_invalid_input() {
        let err = Shade::from_str("dim").unwrap_err();
        assert!(matches!(err, NextupError::InvalidInput(ref msg) if msg.contains("Shade")));
    }
}
