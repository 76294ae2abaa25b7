//! Paper: the immutable external entity the graph is built from

use serde::{Deserialize, Serialize};

/// Unique identifier for a paper
///
/// Serializes as a plain string (the search provider's corpus id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(String);

impl PaperId {
    /// Create a PaperId from a string (corpus id)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PaperId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PaperId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An academic paper as returned by the search provider.
///
/// Read-only input to the builders; the core never mutates a Paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Provider corpus id
    pub id: PaperId,
    /// Paper title
    pub title: String,
    /// Author names
    #[serde(default)]
    pub authors: Vec<String>,
    /// Publication year, when known
    #[serde(default)]
    pub year: Option<i32>,
    /// Fields of study assigned by the provider
    #[serde(default)]
    pub fields_of_study: Vec<String>,
    /// How many papers cite this one
    #[serde(default)]
    pub citation_count: u32,
    /// How many papers this one cites
    #[serde(default)]
    pub reference_count: u32,
    /// Provider relevance score for the search that returned this paper
    #[serde(default)]
    pub relevance_score: Option<f64>,
    /// Provider-generated summary
    #[serde(default)]
    pub tldr: Option<String>,
    /// Publication venue type (e.g. "journal", "conference")
    #[serde(default)]
    pub publication_type: Option<String>,
}

impl Paper {
    /// Create a new paper with the given id and title
    pub fn new(id: impl Into<PaperId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: Vec::new(),
            year: None,
            fields_of_study: Vec::new(),
            citation_count: 0,
            reference_count: 0,
            relevance_score: None,
            tldr: None,
            publication_type: None,
        }
    }

    /// Set the author list
    pub fn with_authors(mut self, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Parse authors from a delimiter-separated free-text field
    ///
    /// Empty segments are skipped; surrounding whitespace is trimmed.
    pub fn with_delimited_authors(mut self, raw: &str, delimiter: char) -> Self {
        self.authors = raw
            .split(delimiter)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        self
    }

    /// Set the publication year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the fields of study
    pub fn with_fields_of_study(
        mut self,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.fields_of_study = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the citation count
    pub fn with_citation_count(mut self, count: u32) -> Self {
        self.citation_count = count;
        self
    }

    /// Set the reference count
    pub fn with_reference_count(mut self, count: u32) -> Self {
        self.reference_count = count;
        self
    }

    /// Set the provider relevance score
    pub fn with_relevance_score(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }

    /// Set the tldr summary
    pub fn with_tldr(mut self, tldr: impl Into<String>) -> Self {
        self.tldr = Some(tldr.into());
        self
    }

    /// Set the publication type
    pub fn with_publication_type(mut self, kind: impl Into<String>) -> Self {
        self.publication_type = Some(kind.into());
        self
    }
}

/// Optional user-supplied hints that steer the search and the weighting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInputs {
    /// Keywords to search for (also consumed by the `Keywords` weighting mode)
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Author names of interest
    #[serde(default)]
    pub authors: Vec<String>,
    /// Known reference titles or ids supplied by the user
    #[serde(default)]
    pub references: Vec<String>,
    /// Free-text query; only used when it satisfies the provider length rules
    #[serde(default)]
    pub query_text: Option<String>,
}

impl UserInputs {
    /// Create an empty input set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword list
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the author list
    pub fn with_authors(mut self, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the free-text query
    pub fn with_query_text(mut self, query: impl Into<String>) -> Self {
        self.query_text = Some(query.into());
        self
    }
}
