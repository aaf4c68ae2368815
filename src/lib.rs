//! Raw-JSON-backed model primitives shared by generated REST API clients.
//!
//! Generated model, params, and enum types are thin wrappers over the small
//! core in this crate:
//!
//! - [`RawObjectBuilder`] / [`RawObject`]: ordered raw storage, mutable only
//!   during construction, frozen into an immutable value-equatable snapshot.
//! - Typed accessors ([`RawObject::get_required`] and friends) covering the
//!   four nullability flavors, with the omit-vs-explicit-null setter
//!   asymmetry PATCH payloads rely on.
//! - [`OpenEnum`]: forward-compatible enums that decode any wire string and
//!   reject unknown values only under explicit validation.
//! - [`ApiModel`]: the shared constructor / copy / `validate()` / equality
//!   contract, plus [`RequestParams`] for header/query/body param sets.
//! - [`Codec`]: explicit serializer configuration — no global state.
//!
//! Decoding never fails for syntactically valid JSON; unknown fields and
//! unknown enum values round-trip losslessly, and strictness is deferred to
//! an opt-in [`ApiModel::validate`] pass.

mod codec;
mod errors;
mod fields;
mod model;
mod open_enum;
mod raw;

pub use codec::Codec;
pub use errors::{Error, Result};
pub use fields::{FieldValue, Nullable};
pub use model::{pretty, ApiModel, RequestParams, RequestParamsBuilder};
pub use open_enum::{EnumValues, OpenEnum};
pub use raw::{RawObject, RawObjectBuilder};
