use crate::catalog::CatalogError;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// A COM GUID. Displays in the registry's braced upper-case form,
/// e.g. `{C795D2FE-7776-11D8-9070-00065B840D9C}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(Uuid);

impl Guid {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Guid(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Accepts the hyphenated form with or without surrounding braces, in any
    /// hex case. Other uuid spellings (simple, urn) are rejected.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let s = raw.trim();
        let inner = match (s.strip_prefix('{'), s.ends_with('}')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => s,
            _ => return Err(CatalogError::MalformedGuid(raw.to_string())),
        };
        if inner.len() != 36 {
            return Err(CatalogError::MalformedGuid(raw.to_string()));
        }
        Uuid::try_parse(inner)
            .map(Guid)
            .map_err(|_| CatalogError::MalformedGuid(raw.to_string()))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        f.write_str(self.0.braced().encode_upper(&mut buf))
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Guid(uuid)
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
