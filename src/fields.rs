//! Identity field for remote records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::sql::schema::{FieldDescribe, SalesforceFieldType};

const CHECKSUM_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ012345";

/// Opaque record identifier assigned by the remote platform
///
/// Ids come in a 15-character case-sensitive form and an 18-character form
/// whose last three characters encode the case of the first fifteen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SalesforceId(String);

impl SalesforceId {
    pub fn new(id: impl Into<String>) -> Result<Self, BackendError> {
        let id = id.into();
        let valid_len = id.len() == 15 || id.len() == 18;
        if !valid_len || !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(BackendError::InvalidId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 18-character form
    pub fn to_case_insensitive(&self) -> SalesforceId {
        if self.0.len() == 18 {
            return self.clone();
        }
        let bytes = self.0.as_bytes();
        let mut long = self.0.clone();
        for chunk in bytes.chunks(5) {
            let flags = chunk
                .iter()
                .enumerate()
                .filter(|(_, b)| b.is_ascii_uppercase())
                .fold(0usize, |acc, (i, _)| acc | (1 << i));
            long.push(CHECKSUM_ALPHABET[flags] as char);
        }
        SalesforceId(long)
    }

    /// Whether both ids name the same record, whichever form each is in
    pub fn same_record(&self, other: &SalesforceId) -> bool {
        self.to_case_insensitive()
            .0
            .eq_ignore_ascii_case(&other.to_case_insensitive().0)
    }
}

impl fmt::Display for SalesforceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SalesforceId {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SalesforceId::new(s)
    }
}

impl TryFrom<String> for SalesforceId {
    type Error = BackendError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SalesforceId::new(value)
    }
}

impl From<SalesforceId> for String {
    fn from(id: SalesforceId) -> Self {
        id.0
    }
}

impl AsRef<str> for SalesforceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Describe entry for the `Id` primary key every record type carries
pub fn id_field() -> FieldDescribe {
    FieldDescribe::new("Id", SalesforceFieldType::Id)
        .with_max_length(18)
        .with_primary_key()
}
