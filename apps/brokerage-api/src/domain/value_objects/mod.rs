//! Value objects: the brokerage's fixed, case-sensitive enumerations.

/// Declare a closed enumeration with an exact wire spelling per variant.
///
/// Generates `ALL`, `FIELD`, `as_str`, `allowed_values`, `Display`, `AsRef<str>`, `FromStr`
/// (failing with [`EnumValueError`](crate::domain::EnumValueError)) and serde
/// support using the wire spelling.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire field this enumeration validates.
            pub const FIELD: &'static str = $field;

            /// Exact wire spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Accepted spellings, comma separated.
            #[must_use]
            pub fn allowed_values() -> String {
                [$($wire),+].join(", ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::EnumValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err($crate::domain::EnumValueError::new(
                        Self::FIELD,
                        s,
                        Self::allowed_values(),
                    )),
                }
            }
        }
    };
}

mod instrument;
mod message_type;
mod order;

pub use instrument::{CallPut, OrderAction, QuantityType, SecurityType};
pub use message_type::MessageType;
pub use order::{MarketSession, OrderTerm, OrderType, PriceType};
