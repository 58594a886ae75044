// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The narrow contract between domain entities and the persistence layer.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persistable entity: a record type name plus a serialization key.
///
/// The storage layer knows nothing about domain types beyond this trait.
/// Records of the same [`TYPE`](Record::TYPE) share a namespace; `key` must
/// be unique within it. Keys sort lexicographically in listings, so
/// time-ordered identifiers (UUIDv7) yield creation-ordered listings.
pub trait Record: Serialize + DeserializeOwned + Send + 'static {
    /// Namespace this record type is stored under.
    const TYPE: &'static str;

    /// Unique key within the record type's namespace.
    fn key(&self) -> Vec<u8>;
}
