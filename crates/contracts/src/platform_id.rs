//! PlatformId - 平台标识
//!
//! 内部使用 Arc<str>；同一平台的所有行共享一次分配。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Platform identifier with cheap cloning.
///
/// Clones share one allocation. The CSV loader interns each distinct
/// platform value once, so every row, partition key and slice of a platform
/// points at the same string.
///
/// Equality, ordering and hashing are those of the underlying `str`, which
/// lets maps keyed by `PlatformId` be queried with `&str`.
///
/// # Examples
/// ```
/// use contracts::PlatformId;
///
/// let id: PlatformId = "market".into();
/// assert_eq!(id, id.clone());
/// assert_eq!(id.as_str(), "market");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(Arc<str>);

impl PlatformId {
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PlatformId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlatformId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlatformId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlatformId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for PlatformId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for PlatformId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for PlatformId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlatformId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
