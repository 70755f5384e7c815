use super::Rule;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserIdentity {
    pub engine_name: String,
    pub engine_version: String,
    pub browser_name: String,
    pub browser_version: String,
}

impl BrowserIdentity {
    /// Returns `(engine_name, engine_version)`.
    pub fn engine(&self) -> (&str, &str) {
        (&self.engine_name, &self.engine_version)
    }

    /// Returns `(browser_name, browser_version)`.
    pub fn browser(&self) -> (&str, &str) {
        (&self.browser_name, &self.browser_version)
    }

    /// True when nothing could be determined about the browser or its engine.
    pub fn is_unknown(&self) -> bool {
        self.engine_name.is_empty()
            && self.engine_version.is_empty()
            && self.browser_name.is_empty()
            && self.browser_version.is_empty()
    }
}

/// Result of classifying one User-Agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub identity: BrowserIdentity,
    /// Declared Mozilla-compatibility version, empty for formats that are not
    /// Mozilla-compatible (Opera/Presto, Windows services).
    pub mozilla: String,
    pub rule: Rule,
}

impl Classification {
    pub fn engine(&self) -> (&str, &str) {
        self.identity.engine()
    }

    pub fn browser(&self) -> (&str, &str) {
        self.identity.browser()
    }

    pub fn mozilla(&self) -> &str {
        &self.mozilla
    }
}
