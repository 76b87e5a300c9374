//! Closed vocabularies accepted by the indicator search API.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed set of string values with a static membership test.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Subject used in validation messages, e.g. `"column"`.
    const FIELD: &'static str;
    /// Members in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn members() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }

    fn is_member(value: &str) -> bool {
        Self::lookup(value).is_some()
    }

    fn lookup(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == value)
    }

    fn invalid() -> SearchError {
        SearchError::InvalidEnum {
            field: Self::FIELD,
            allowed: Self::members(),
        }
    }

    fn validate(value: &str) -> Result<Self> {
        Self::lookup(value).ok_or_else(Self::invalid)
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident as $field:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl Vocabulary for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SearchError;

            fn from_str(s: &str) -> Result<Self> {
                Self::validate(s)
            }
        }
    };
}

vocabulary! {
    /// Columns a search can be ordered by.
    SortColumn as "column" {
        Updated => "UPDATED",
        Created => "CREATED",
        ProcessedAt => "PROCESSED_AT",
    }
}

vocabulary! {
    ObservableType as "observable type" {
        Ip4 => "IP4",
        Ip6 => "IP6",
        Url => "URL",
        Sha1 => "SHA1",
        Sha256 => "SHA256",
        EmailAddress => "EMAIL_ADDRESS",
        PhoneNumber => "PHONE_NUMBER",
        Md5 => "MD5",
        Bitcoin => "BITCOIN",
        Xid => "XID",
        RegistryKey => "REGISTRY_KEY",
        Software => "SOFTWARE",
        CidrBlock => "CIDR_BLOCK",
    }
}

vocabulary! {
    AttributeType as "attribute type" {
        Malware => "MALWARE",
        CoraMalware => "CORA_MALWARE",
        ThreatActor => "THREAT_ACTOR",
        Cve => "CVE",
        MitreTactic => "MITRE_TACTIC",
    }
}

/// Runtime handle over the vocabularies, for callers that pick one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyKind {
    SortColumns,
    ObservableTypes,
    AttributeTypes,
}

impl VocabularyKind {
    pub fn members(self) -> Vec<&'static str> {
        match self {
            VocabularyKind::SortColumns => SortColumn::members(),
            VocabularyKind::ObservableTypes => ObservableType::members(),
            VocabularyKind::AttributeTypes => AttributeType::members(),
        }
    }

    pub fn is_member(self, value: &str) -> bool {
        match self {
            VocabularyKind::SortColumns => SortColumn::is_member(value),
            VocabularyKind::ObservableTypes => ObservableType::is_member(value),
            VocabularyKind::AttributeTypes => AttributeType::is_member(value),
        }
    }
}
