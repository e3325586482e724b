//! Backend records
//!
//! Read-only snapshots of the rental backend's JSON. Nothing here is
//! created or persisted by this crate; the types only carry what the
//! catalog, review and dashboard units read.
//!
//! - [`Car`], [`Booking`], [`Payment`], [`User`]: one row each
//! - [`BookingStatus`]: case-insensitive booking lifecycle state
//! - [`Snapshot`]: the four collections behind one dashboard load

mod entities;
mod timestamp;

pub use entities::{Booking, BookingStatus, Car, Payment, Snapshot, User};
pub use timestamp::parse_timestamp;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as a missing field.
///
/// The backend serializes unset columns as `null`, which plain
/// `#[serde(default)]` rejects for non-`Option` fields.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
