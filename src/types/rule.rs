/// The branch of the classifier that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `Opera/9.80 (...) Presto/2.12.388`
    Opera,
    /// `Chrome` without a leading Mozilla token.
    StandaloneChrome,
    /// Windows system services (proxy autoconfig, WNS, NCSI).
    SystemService,
    /// Mozilla token followed by an engine and browser products.
    MultiSection,
    /// A lone Mozilla token; only legacy Internet Explorer is recognized here.
    SingleSection,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opera => "opera",
            Self::StandaloneChrome => "standalone chrome",
            Self::SystemService => "system service",
            Self::MultiSection => "multi section",
            Self::SingleSection => "single section",
        }
    }
}
