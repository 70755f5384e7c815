use super::db::{Rules, ServiceEntry, TridentVersionMap};
use super::error::{Error, Result};
use super::helpers::*;
use super::types::*;
use fancy_regex::Regex;
use rayon::prelude::*;
use std::path::Path;

const APPLE_WEBKIT: &str = "AppleWebKit";
const GECKO: &str = "Gecko";
pub(crate) const CHROME: &str = "Chrome";
pub(crate) const OPERA: &str = "Opera";
const EDGE: &str = "Edge";
const OPERA_REBRAND: &str = "OPR";
const MAIL_AGENT: &str = "MRA";
const LIKE: &str = "like";
const TRIDENT: &str = "Trident";
const INTERNET_EXPLORER: &str = "Internet Explorer";

/// Chrome without a Mozilla token is always Mozilla/5.0 compatible.
const CHROME_MOZILLA_VERSION: &str = "5.0";

/// Pre-compiled patterns for comment tokens of the first section.
struct CommentPatterns {
    trident: Regex,
    rv: Regex,
}

impl CommentPatterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            trident: Regex::new(r"^Trident/([0-9.]+)")?,
            rv: Regex::new(r"^rv:(.+)$")?,
        })
    }
}

/// Which branch handles a header, decided from its first section alone.
enum Dispatch<'r> {
    Opera,
    StandaloneChrome,
    Service(&'r ServiceEntry),
    General,
}

pub struct BrowserClassifier {
    services: Vec<ServiceEntry>,
    trident_versions: TridentVersionMap,
    patterns: CommentPatterns,
}

impl BrowserClassifier {
    /// Build a classifier from the rule tables compiled into the crate.
    pub fn new() -> Result<Self> {
        Self::from_rules(Rules::embedded()?)
    }

    /// Load rule tables from a YAML file with the same layout as the embedded ones.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_rules(Rules::from_path(path)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::from_rules(Rules::from_yaml_str(yaml)?)
    }

    pub fn from_rules(rules: Rules) -> Result<Self> {
        rules.validate()?;
        tracing::debug!(
            services = rules.services.len(),
            trident_versions = rules.trident_versions.len(),
            "loaded browser rules"
        );
        Ok(Self {
            services: rules.services,
            trident_versions: rules.trident_versions,
            patterns: CommentPatterns::compile()?,
        })
    }

    /// Classify the sections of one User-Agent header.
    ///
    /// Every call builds its result from scratch. An unrecognized header is
    /// not an error: it yields an identity with empty fields. The only error
    /// is [`Error::MalformedInput`] for an empty slice.
    pub fn classify(&self, sections: &[Section]) -> Result<Classification> {
        let (primary, rest) = sections.split_first().ok_or(Error::MalformedInput)?;

        let (identity, mozilla, rule) = match self.dispatch(primary) {
            Dispatch::Opera => (opera(primary, rest), String::new(), Rule::Opera),
            Dispatch::StandaloneChrome => (
                standalone_chrome(rest),
                CHROME_MOZILLA_VERSION.to_owned(),
                Rule::StandaloneChrome,
            ),
            Dispatch::Service(service) => {
                (system_service(service, rest), String::new(), Rule::SystemService)
            }
            Dispatch::General => {
                let (identity, rule) = match rest {
                    [] => (self.legacy_internet_explorer(primary), Rule::SingleSection),
                    [engine, tail @ ..] => {
                        (self.multi_section(primary, engine, tail), Rule::MultiSection)
                    }
                };
                (identity, primary.version.clone(), rule)
            }
        };

        tracing::trace!(
            rule = rule.as_str(),
            browser = %identity.browser_name,
            browser_version = %identity.browser_version,
            engine = %identity.engine_name,
            engine_version = %identity.engine_version,
            "classified user agent"
        );

        Ok(Classification {
            identity,
            mozilla,
            rule,
        })
    }

    /// Classify many headers in parallel. Results keep the order of `inputs`.
    pub fn classify_all<S>(&self, inputs: &[S]) -> Vec<Result<Classification>>
    where
        S: AsRef<[Section]> + Sync,
    {
        inputs
            .par_iter()
            .map(|sections| self.classify(sections.as_ref()))
            .collect()
    }

    fn dispatch(&self, primary: &Section) -> Dispatch<'_> {
        match primary.name.as_str() {
            OPERA => Dispatch::Opera,
            CHROME => Dispatch::StandaloneChrome,
            name => self
                .services
                .iter()
                .find(|s| s.product == name)
                .map_or(Dispatch::General, Dispatch::Service),
        }
    }

    /// `Mozilla/5.0 (...) Engine/x.y Product/x.y ...`
    fn multi_section(
        &self,
        primary: &Section,
        engine: &Section,
        tail: &[Section],
    ) -> BrowserIdentity {
        let mut id = BrowserIdentity {
            engine_name: engine.name.clone(),
            engine_version: engine.version.clone(),
            ..Default::default()
        };

        let (Some(public), Some(last)) = (tail.first(), tail.last()) else {
            return id;
        };
        id.browser_version = public.version.clone();

        match engine.name.as_str() {
            APPLE_WEBKIT => match last.name.as_str() {
                EDGE => {
                    id.browser_name = EDGE.to_owned();
                    id.browser_version = last.version.clone();
                    id.engine_name = "EdgeHTML".to_owned();
                    id.engine_version.clear();
                }
                OPERA_REBRAND => {
                    id.browser_name = OPERA.to_owned();
                    id.browser_version = last.version.clone();
                }
                _ if public.name == CHROME => id.browser_name = CHROME.to_owned(),
                _ => id.browser_name = "Safari".to_owned(),
            },
            GECKO => {
                // MRA wraps the real client, which sits two products further on.
                match tail.get(2) {
                    Some(client) if public.name == MAIL_AGENT => {
                        id.browser_name = client.name.clone();
                        id.browser_version = client.version.clone();
                    }
                    _ => id.browser_name = public.name.clone(),
                }
            }
            LIKE if public.name == GECKO => {
                // Internet Explorer 11: `Mozilla/5.0 (...; Trident/7.0; rv:11.0) like Gecko`
                id.engine_name = TRIDENT.to_owned();
                id.browser_name = INTERNET_EXPLORER.to_owned();
                if let Some(version) = find_in_comment(&self.patterns.trident, &primary.comment) {
                    id.engine_version = version.to_owned();
                }
                id.browser_version = find_in_comment(&self.patterns.rv, &primary.comment)
                    .unwrap_or_default()
                    .to_owned();
            }
            _ => {}
        }

        id
    }

    /// `Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0; Trident/4.0)`
    fn legacy_internet_explorer(&self, primary: &Section) -> BrowserIdentity {
        let mut id = BrowserIdentity::default();

        let [marker, ie_token, ..] = primary.comment.as_slice() else {
            return id;
        };
        let is_ie_token = ie_token.starts_with("MSIE") || ie_token.starts_with("IE");
        if marker != "compatible" || !is_ie_token {
            return id;
        }

        id.engine_name = TRIDENT.to_owned();
        id.browser_name = INTERNET_EXPLORER.to_owned();

        // MSIE may report the compatibility-view version; Trident does not.
        if let Some(engine_version) = primary
            .comment
            .iter()
            .find_map(|token| token.strip_prefix("Trident/"))
        {
            id.engine_version = engine_version.to_owned();
            if let Some(version) = self.trident_versions.get(engine_version) {
                id.browser_version = version.clone();
            }
        }

        if id.browser_version.is_empty() {
            id.browser_version = skip_chars(ie_token, 4).trim().to_owned();
        }

        id
    }
}

/// `Opera/9.80 (...) Presto/2.12.388 Version/12.16`
fn opera(primary: &Section, rest: &[Section]) -> BrowserIdentity {
    BrowserIdentity {
        engine_name: "Presto".to_owned(),
        engine_version: rest.first().map(|s| s.version.clone()).unwrap_or_default(),
        browser_name: OPERA.to_owned(),
        browser_version: primary.version.clone(),
    }
}

/// The version arrives in the name slot of the third section.
fn standalone_chrome(rest: &[Section]) -> BrowserIdentity {
    let mut id = BrowserIdentity {
        browser_name: CHROME.to_owned(),
        ..Default::default()
    };
    if let [_, public, ..] = rest {
        id.browser_version = public.name.clone();
        id.engine_name = APPLE_WEBKIT.to_owned();
    }
    id
}

fn system_service(service: &ServiceEntry, rest: &[Section]) -> BrowserIdentity {
    let identified = match &service.requires {
        Some(required) => rest.first().is_some_and(|s| &s.name == required),
        None => true,
    };
    BrowserIdentity {
        browser_name: if identified {
            service.browser.clone()
        } else {
            String::new()
        },
        ..Default::default()
    }
}
