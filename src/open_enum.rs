//! Forward-compatible enum wrapper used for every API enum.
//!
//! Wire strings outside the compiled variant table never fail to decode; they
//! are carried verbatim as [`OpenEnum::Unknown`] and written back unchanged,
//! so round-tripping is lossless even for values the client predates. Only an
//! explicit [`OpenEnum::validate`] call rejects unrecognized strings.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::fields::FieldValue;

/// Variant table for a known API enum. Implemented by the [`open_enum!`]
/// macro for every generated enum type.
///
/// [`open_enum!`]: crate::open_enum!
pub trait EnumValues: Sized + Copy + 'static {
    /// Type name used in validation diagnostics.
    const NAME: &'static str;

    /// Every known variant, in declaration order.
    const VALUES: &'static [Self];

    /// Canonical wire string for this variant.
    fn as_str(&self) -> &'static str;

    /// Look a wire string up in the variant table.
    fn from_wire(value: &str) -> Option<Self>;
}

/// An API enum value that is either a known variant or an arbitrary string
/// the compiled table does not recognize.
#[derive(Debug, Clone)]
pub enum OpenEnum<T> {
    Known(T),
    Unknown(String),
}

impl<T: EnumValues> OpenEnum<T> {
    /// Adopt a wire string: table hit yields `Known`, anything else is
    /// carried as `Unknown`. Never fails.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match T::from_wire(&raw) {
            Some(known) => OpenEnum::Known(known),
            None => OpenEnum::Unknown(raw),
        }
    }

    /// The wire string: canonical for `Known`, verbatim for `Unknown`.
    pub fn as_str(&self) -> &str {
        match self {
            OpenEnum::Known(known) => known.as_str(),
            OpenEnum::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            OpenEnum::Known(known) => Some(*known),
            OpenEnum::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, OpenEnum::Known(_))
    }

    /// Opt-in strictness: `Unknown` is `InvalidData`, `Known` passes.
    pub fn validate(&self) -> Result<()> {
        match self {
            OpenEnum::Known(_) => Ok(()),
            OpenEnum::Unknown(raw) => Err(Error::invalid_data(format!(
                "unknown {} value \"{raw}\"",
                T::NAME
            ))),
        }
    }
}

impl<T: EnumValues> From<T> for OpenEnum<T> {
    fn from(known: T) -> Self {
        OpenEnum::Known(known)
    }
}

impl<T: EnumValues> From<&str> for OpenEnum<T> {
    fn from(value: &str) -> Self {
        OpenEnum::from_raw(value)
    }
}

impl<T: EnumValues> From<String> for OpenEnum<T> {
    fn from(value: String) -> Self {
        OpenEnum::from_raw(value)
    }
}

// Equality and hashing go through the wire string, so a Known value and an
// Unknown value carrying the same string compare equal.
impl<T: EnumValues> PartialEq for OpenEnum<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: EnumValues> Eq for OpenEnum<T> {}

impl<T: EnumValues> Hash for OpenEnum<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: EnumValues> fmt::Display for OpenEnum<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: EnumValues> Serialize for OpenEnum<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: EnumValues> Deserialize<'de> for OpenEnum<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(OpenEnum::from_raw(raw))
    }
}

impl<T: EnumValues> FieldValue for OpenEnum<T> {
    const EXPECTED: &'static str = "enum string";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        let raw = value
            .as_str()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))?;
        Ok(OpenEnum::from_raw(raw))
    }

    fn to_json(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

/// Declare a known-variant table for an API enum.
///
/// Generates a plain fieldless enum plus its [`EnumValues`] impl and a
/// `Display` that writes the wire string:
///
/// ```
/// apimodel::open_enum! {
///     /// Lifecycle state of a project.
///     pub enum ProjectState {
///         Active => "active",
///         Archived => "archived",
///     }
/// }
///
/// let state: apimodel::OpenEnum<ProjectState> = "active".into();
/// assert_eq!(state.known(), Some(ProjectState::Active));
/// ```
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $crate::EnumValues for $name {
            const NAME: &'static str = stringify!($name);
            const VALUES: &'static [$name] = &[ $( $name::$variant ),+ ];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            fn from_wire(value: &str) -> ::core::option::Option<Self> {
                match value {
                    $( $wire => ::core::option::Option::Some($name::$variant), )+
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::EnumValues::as_str(self))
            }
        }
    };
}
