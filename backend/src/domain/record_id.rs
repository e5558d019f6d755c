//! Server-generated record identifiers.
//!
//! Each entity gets its own newtype over a positive 64-bit key so a phone id
//! can never be passed where a user id is expected. Path segments that do not
//! parse as a positive integer are rejected with [`RecordIdError`].

/// Failure to interpret a raw path segment as a record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    #[error("record id must be a positive integer, got '{raw}'")]
    Malformed { raw: String },
}

macro_rules! define_record_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a key issued by the store.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw key value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::RecordIdError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err($crate::domain::RecordIdError::Malformed {
                        raw: raw.to_owned(),
                    }),
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use define_record_id;
