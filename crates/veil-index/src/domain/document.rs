//! Indexed documents

use std::collections::BTreeSet;

/// A document as the index sees it: an opaque id and its normalized keywords.
///
/// Keywords are captured once at construction; changing a document's text
/// later requires indexing it again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    id: String,
    keywords: BTreeSet<String>,
}

impl Document {
    pub fn new<I, S>(id: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Keywords in lexicographic order.
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// Every unordered keyword pair, each sorted, in lexicographic order.
    pub fn keyword_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.keywords.iter().enumerate().flat_map(move |(i, first)| {
            self.keywords
                .iter()
                .skip(i + 1)
                .map(move |second| (first.as_str(), second.as_str()))
        })
    }
}
