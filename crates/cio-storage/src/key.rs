//! Storage keys.

use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;

/// Enumerated names of persisted SDK state.
///
/// The raw name is the physical key inside a domain and must never change
/// for an existing variant: installs in the field already store data under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Profile id passed to the last `identify` call.
    IdentifiedProfileId,
    /// Push device token registered for this device.
    PushDeviceToken,
    /// Deadline until which outbound HTTP requests are paused.
    HttpRequestsPauseEnds,
}

impl StorageKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 3] = [
        Self::IdentifiedProfileId,
        Self::PushDeviceToken,
        Self::HttpRequestsPauseEnds,
    ];

    /// The raw name used as the physical key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdentifiedProfileId => "identifiedProfileId",
            Self::PushDeviceToken => "pushDeviceToken",
            Self::HttpRequestsPauseEnds => "httpRequestsPauseEnds",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StorageError::UnknownKey(s.to_owned()))
    }
}
