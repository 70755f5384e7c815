use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::classifier::{CHROME, OPERA};
use crate::error::{Error, Result};

/// Rule tables shipped with the crate.
const EMBEDDED_RULES: &str = include_str!("../data/rules.yml");

// ---------------------------------------------------------------------------
// Windows system services  (rules.yml: services)
// ---------------------------------------------------------------------------

/// A product token that identifies a Windows system service rather than a
/// browser. Matched against the name of the first section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceEntry {
    pub product: String,
    pub browser: String,
    /// Name the second section must carry for the entry to identify anything.
    #[serde(default)]
    pub requires: Option<String>,
}

// ---------------------------------------------------------------------------
// Trident versions  (rules.yml: trident_versions)
//
// Format: mapping  trident_version → internet_explorer_version
// ---------------------------------------------------------------------------

/// Uses IndexMap to preserve YAML insertion order.
pub type TridentVersionMap = IndexMap<String, String>;

/// Deserialization target for a rules YAML document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
    #[serde(default)]
    pub trident_versions: TridentVersionMap,
}

impl Rules {
    /// The tables compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_RULES)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if service.product.is_empty() {
                return Err(Error::InvalidRule(format!(
                    "service {:?} has an empty product",
                    service.browser
                )));
            }
            if service.browser.is_empty() {
                return Err(Error::InvalidRule(format!(
                    "service {:?} has an empty browser name",
                    service.product
                )));
            }
            // Opera and Chrome are matched before the service table is consulted.
            if service.product == OPERA || service.product == CHROME {
                return Err(Error::InvalidRule(format!(
                    "service product {:?} is shadowed by a built-in rule",
                    service.product
                )));
            }
            if !seen.insert(service.product.as_str()) {
                return Err(Error::InvalidRule(format!(
                    "service product {:?} is listed more than once",
                    service.product
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables() {
        let rules = Rules::embedded().unwrap();
        let products: Vec<&str> = rules.services.iter().map(|s| s.product.as_str()).collect();
        assert_eq!(
            products,
            ["WinHttp-Autoproxy-Service", "Microsoft-WNS", "Microsoft"]
        );
        assert_eq!(rules.services[2].requires.as_deref(), Some("NCSI"));
        assert_eq!(
            rules.trident_versions.get("6.0").map(String::as_str),
            Some("10.0")
        );
        assert_eq!(rules.trident_versions.len(), 4);
    }

    #[test]
    fn trident_versions_keep_document_order() {
        let rules = Rules::embedded().unwrap();
        let keys: Vec<&str> = rules.trident_versions.keys().map(String::as_str).collect();
        assert_eq!(keys, ["4.0", "5.0", "6.0", "7.0"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let rules = Rules::from_yaml_str("services: []").unwrap();
        assert!(rules.services.is_empty());
        assert!(rules.trident_versions.is_empty());
    }

    #[test]
    fn empty_product_is_rejected() {
        let rules = Rules::from_yaml_str("services:\n  - product: ''\n    browser: X\n").unwrap();
        assert!(matches!(rules.validate(), Err(Error::InvalidRule(_))));
    }

    #[test]
    fn shadowed_products_are_rejected() {
        for product in ["Opera", "Chrome"] {
            let yaml = format!("services:\n  - product: {product}\n    browser: Service\n");
            let rules = Rules::from_yaml_str(&yaml).unwrap();
            assert!(
                matches!(rules.validate(), Err(Error::InvalidRule(_))),
                "{product} should be rejected"
            );
        }
    }

    #[test]
    fn duplicate_products_are_rejected() {
        let rules = Rules::from_yaml_str(
            "services:\n  - product: Microsoft-WNS\n    browser: WNS\n  - product: Microsoft-WNS\n    browser: Other\n",
        )
        .unwrap();
        assert!(matches!(rules.validate(), Err(Error::InvalidRule(_))));
        assert!(Rules::embedded().unwrap().validate().is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Rules::from_path("does/not/exist.yml").unwrap_err();
        assert!(matches!(err, Error::IO(_)));
    }
}
