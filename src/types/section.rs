use serde::Deserialize;

/// One product token of a User-Agent header, e.g. `AppleWebKit/537.36 (KHTML, like Gecko)`.
///
/// Produced by an external tokenizer. Position within the header is
/// significant: section 0 is the compatibility token, section 1 usually the
/// rendering engine, section 2 usually the public browser marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Items of the trailing parenthesized remark, trimmed, in order.
    #[serde(default)]
    pub comment: Vec<String>,
}

impl Section {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            comment: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_comment<I, S>(mut self, comment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comment = comment.into_iter().map(Into::into).collect();
        self
    }
}
