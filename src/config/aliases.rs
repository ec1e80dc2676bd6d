// src/config/aliases.rs
//! Canonical offer fields and the header alias table that maps page column
//! names onto them.
//!
//! The alias table is plain immutable data handed to the header resolver.
//! Swapping it (per test, per deployment, from a JSON file) never touches
//! extraction or selection.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::sanitize::normalize_key;
use crate::error::ConfigError;

/// The ten output columns, in their persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    Id,
    Site,
    Domain,
    Category,
    Sale,
    Conditions,
    MotivationAmount,
    OfferDuration,
    LegalName,
    GreenProbability,
}

impl CanonicalField {
    pub const COUNT: usize = 10;

    pub const ALL: [CanonicalField; Self::COUNT] = [
        Self::Id,
        Self::Site,
        Self::Domain,
        Self::Category,
        Self::Sale,
        Self::Conditions,
        Self::MotivationAmount,
        Self::OfferDuration,
        Self::LegalName,
        Self::GreenProbability,
    ];

    /// Column position in persisted rows.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Site => "site",
            Self::Domain => "domain",
            Self::Category => "category",
            Self::Sale => "sale",
            Self::Conditions => "conditions",
            Self::MotivationAmount => "motivationAmount",
            Self::OfferDuration => "offerDuration",
            Self::LegalName => "legalName",
            Self::GreenProbability => "greenProbability",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Fields the coercing variant turns into numbers.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Id | Self::Sale | Self::MotivationAmount | Self::GreenProbability
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const BUILTIN: [(CanonicalField, &[&str]); CanonicalField::COUNT] = [
    (CanonicalField::Id, &["id", "offer id"]),
    (CanonicalField::Site, &["site", "site name", "сайт"]),
    (CanonicalField::Domain, &["domain", "домен"]),
    (CanonicalField::Category, &["category", "категория"]),
    (CanonicalField::Sale, &["sale", "продажа", "скидка", "комиссия"]),
    (CanonicalField::Conditions, &["conditions", "условия"]),
    (
        CanonicalField::MotivationAmount,
        &["motivationamount", "motivation amount", "reward", "вознаграждение", "мотивация"],
    ),
    (
        CanonicalField::OfferDuration,
        &["offerduration", "offer duration", "duration", "срок", "срок действия", "длительность"],
    ),
    (
        CanonicalField::LegalName,
        &["legalname", "legal name", "legal", "юр. лицо", "юридическое лицо", "юридическое название"],
    ),
    (
        CanonicalField::GreenProbability,
        &["greenprobability", "green probability", "green prob", "green", "вероятность green", "зелёная"],
    ),
];

/// Accepted header spellings per canonical field. Stored normalized
/// (see [`normalize_key`]); aliases that normalize to nothing are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    sets: [Vec<String>; CanonicalField::COUNT],
}

impl AliasTable {
    /// No aliases at all; every header stays unmapped.
    pub fn empty() -> Self {
        Self { sets: Default::default() }
    }

    /// English and Russian spellings seen on the partner page.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .fold(Self::empty(), |table, (field, aliases)| table.with_aliases(*field, aliases.iter().copied()))
    }

    /// Add aliases to `field`, keeping the ones it already has.
    pub fn with_aliases<I, S>(mut self, field: CanonicalField, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = &mut self.sets[field.index()];
        for alias in aliases {
            let key = normalize_key(alias.as_ref());
            if !key.is_empty() && !set.contains(&key) {
                set.push(key);
            }
        }
        self
    }

    /// Normalized aliases of one field.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        &self.sets[field.index()]
    }

    /// Fields with their aliases, in canonical declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &[String])> {
        CanonicalField::ALL.into_iter().map(|f| (f, self.aliases(f)))
    }

    /// Replace the alias set of every field that `other` defines; fields
    /// `other` leaves empty keep their current aliases.
    pub fn overlay(mut self, other: &AliasTable) -> Self {
        for (field, aliases) in other.iter() {
            if !aliases.is_empty() {
                self.sets[field.index()] = aliases.to_vec();
            }
        }
        self
    }

    /// Parse `{ "<canonicalField>": ["alias", ...], ... }`.
    /// Fields not mentioned get no aliases.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(text)?;
        raw.into_iter().try_fold(Self::empty(), |table, (name, aliases)| {
            let field = CanonicalField::from_name(&name).ok_or(ConfigError::UnknownField(name))?;
            Ok(table.with_aliases(field, aliases))
        })
    }

    /// Built-in table overlaid with the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay = Self::from_json(&text)?;
        logd!(path = %path.display(), "alias overlay loaded");
        Ok(Self::builtin().overlay(&overlay))
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}
