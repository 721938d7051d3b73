//! The canonical book entity.
//!
//! Books arrive in two completeness levels: a *summary* shape from search
//! results and a *detail* shape from single-item lookups. Both map onto one
//! [`Book`] type; normalization fills missing fields with defined fallbacks
//! and [`Book::merge_detail`] reconciles a detail fetch into an existing
//! cached/favorited record.

use serde::{Deserialize, Serialize};

/// Fallback title for books without one.
pub const FALLBACK_TITLE: &str = "Sin título";

/// Fallback author for books without one.
pub const FALLBACK_AUTHOR: &str = "Autor desconocido";

/// Fallback description applied when neither detail nor cache has one.
pub const FALLBACK_DESC: &str = "Sin descripción disponible.";

/// Placeholder cover image for books without one.
pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/1200x800?text=No+Cover";

/// Description shown while a detail fetch is in flight. A cached record
/// holding this value still needs a detail lookup.
pub const DESC_LOADING_PLACEHOLDER: &str = "Cargando descripción…";

/// Strip U+FFFD replacement characters and ASCII control characters, then trim.
///
/// Upstream book data occasionally carries mojibake and stray control bytes;
/// every text field passes through here before use.
#[must_use]
pub fn clean_text(s: &str) -> String {
    s.chars()
        .filter(|&c| c != '\u{FFFD}' && !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// A book record as received on the wire, before normalization.
///
/// Every field except `id` may be missing; search results and detail lookups
/// differ only in which fields they bother to fill.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBook {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl RawBook {
    /// Build a `RawBook` from an untyped JSON object.
    ///
    /// Snapshot objects submitted by clients may hold anything; known fields
    /// of the expected type are taken, everything else is ignored.
    #[must_use]
    pub fn from_object(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        let tags = map
            .get("tags")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .map(str::to_string)
                    .collect()
            });

        Self {
            id: text("id").unwrap_or_default(),
            title: text("title"),
            author: text("author"),
            year: text("year"),
            cover: text("cover"),
            desc: text("desc"),
            tags,
        }
    }
}

/// The canonical book entity.
///
/// All fields are always present; normalization applies the documented
/// fallbacks so views never deal with missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: String,
    pub cover: String,
    pub desc: String,
    pub tags: Vec<String>,
}

impl Book {
    /// Normalize a search result into the canonical shape.
    ///
    /// Summaries get no description fallback; an empty `desc` marks the
    /// record as needing a detail fetch.
    #[must_use]
    pub fn from_summary(raw: RawBook) -> Self {
        Self::normalize(raw, "")
    }

    /// Normalize a detail lookup into the canonical shape.
    ///
    /// Details apply the [`FALLBACK_DESC`] string when the upstream record
    /// has no description at all.
    #[must_use]
    pub fn from_detail(raw: RawBook) -> Self {
        Self::normalize(raw, FALLBACK_DESC)
    }

    fn normalize(raw: RawBook, desc_fallback: &str) -> Self {
        let title = clean_nonempty(raw.title).unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let author = clean_nonempty(raw.author).unwrap_or_else(|| FALLBACK_AUTHOR.to_string());
        let year = clean_nonempty(raw.year).unwrap_or_default();
        let cover = clean_nonempty(raw.cover).unwrap_or_else(|| PLACEHOLDER_COVER.to_string());
        let desc = clean_nonempty(raw.desc).unwrap_or_else(|| desc_fallback.to_string());
        let tags = raw
            .tags
            .unwrap_or_default()
            .iter()
            .map(|t| clean_text(t))
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            id: raw.id,
            title,
            author,
            year,
            cover,
            desc,
            tags,
        }
    }

    /// A placeholder record displayed while a book is loading.
    #[must_use]
    pub fn loading_placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: "Cargando…".to_string(),
            author: FALLBACK_AUTHOR.to_string(),
            year: String::new(),
            cover: PLACEHOLDER_COVER.to_string(),
            desc: String::new(),
            tags: Vec::new(),
        }
    }

    /// Whether this cached record still needs a detail lookup.
    #[must_use]
    pub fn needs_detail(&self) -> bool {
        self.desc.is_empty() || self.desc == DESC_LOADING_PLACEHOLDER
    }

    /// Merge a freshly fetched detail record into this (search-derived or
    /// favorited) record.
    ///
    /// Precedence:
    /// - `title`/`cover`: detail if non-empty, else existing
    /// - `desc`: detail if non-empty, else existing, else [`FALLBACK_DESC`]
    /// - `tags`: detail's if non-empty, else existing
    /// - `author`/`year`: the *existing* value wins when non-empty; search
    ///   results are treated as more authoritative for these two fields
    ///   than detail lookups (intentional, see DESIGN.md)
    ///
    /// The id is always taken from `self`.
    #[must_use]
    pub fn merge_detail(&self, detail: &Self) -> Self {
        let title = pick(&detail.title, &self.title);
        let cover = pick(&detail.cover, &self.cover);

        let mut desc = pick(&detail.desc, &self.desc);
        if desc.is_empty() {
            desc = FALLBACK_DESC.to_string();
        }

        let tags = if detail.tags.is_empty() {
            self.tags.clone()
        } else {
            detail.tags.clone()
        };

        let mut author = pick(&self.author, &detail.author);
        if author.is_empty() {
            author = FALLBACK_AUTHOR.to_string();
        }

        let year = pick(&self.year, &detail.year);

        Self {
            id: self.id.clone(),
            title,
            author,
            year,
            cover,
            desc,
            tags,
        }
    }
}

/// Clean an optional field, mapping whitespace-only values to `None`.
fn clean_nonempty(value: Option<String>) -> Option<String> {
    value.map(|v| clean_text(&v)).filter(|v| !v.is_empty())
}

/// First of the two cleaned values that is non-empty.
fn pick(preferred: &str, fallback: &str) -> String {
    let cleaned = clean_text(preferred);
    if cleaned.is_empty() {
        clean_text(fallback)
    } else {
        cleaned
    }
}
