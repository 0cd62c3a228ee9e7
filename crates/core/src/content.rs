//! Registry of content kinds that can receive ratings and comments.
//!
//! Ratings and comments point at their target with a `(target_type, target_id)`
//! pair. The type tag is one of the [`ContentKind`] variants below; each kind
//! knows which table holds its rows, so lookups never depend on a string coming
//! straight from a request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// A kind of catalog entity that feedback can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    Product,
    Place,
    LiteraryWork,
}

impl ContentKind {
    /// Every registered kind, in display order.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Article,
        ContentKind::Product,
        ContentKind::Place,
        ContentKind::LiteraryWork,
    ];

    /// Type tag stored in `ratings.target_type` / `comments.target_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Product => "product",
            ContentKind::Place => "place",
            ContentKind::LiteraryWork => "literary_work",
        }
    }

    /// Table holding rows of this kind.
    pub fn table(self) -> &'static str {
        match self {
            ContentKind::Article => "articles",
            ContentKind::Product => "products",
            ContentKind::Place => "places",
            ContentKind::LiteraryWork => "literary_works",
        }
    }

    /// Human-readable entity name used in error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            ContentKind::Article => "Article",
            ContentKind::Product => "Product",
            ContentKind::Place => "Place",
            ContentKind::LiteraryWork => "LiteraryWork",
        }
    }

    /// Whether rows of this kind persist a denormalized `average_rating`.
    pub fn caches_average(self) -> bool {
        matches!(self, ContentKind::Product)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = CoreError;

    /// Accepts the stored tag, plus the hyphenated form used in URLs
    /// (`literary-work`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(ContentKind::Article),
            "product" => Ok(ContentKind::Product),
            "place" => Ok(ContentKind::Place),
            "literary_work" | "literary-work" => Ok(ContentKind::LiteraryWork),
            other => Err(CoreError::Validation(format!(
                "Invalid target_type '{other}'. Must be one of: {}",
                ContentKind::ALL
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// A fully identified feedback target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContentTarget {
    pub kind: ContentKind,
    pub id: DbId,
}

impl ContentTarget {
    pub fn new(kind: ContentKind, id: DbId) -> Self {
        Self { kind, id }
    }

    /// Parse a raw `(type, id)` pair from a request path.
    pub fn parse(target_type: &str, id: DbId) -> Result<Self, CoreError> {
        Ok(Self {
            kind: target_type.parse()?,
            id,
        })
    }

    /// The error returned when the target row does not exist.
    pub fn not_found(&self) -> CoreError {
        CoreError::NotFound {
            entity: self.kind.entity_name(),
            id: self.id,
        }
    }
}
