use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::anchor::{classify_href, LinkTarget};

const SAMPLE_PAGE: &str = include_str!("../../assets/site.toml");

/// A single-page site described in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Navigation links; derived from the sections when empty
    #[serde(default)]
    pub nav: Vec<NavLinkSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinkSpec {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpec {
    pub text: String,
    /// Hidden until first scrolled into view
    #[serde(default)]
    pub reveal: bool,
}

/// Optional page elements; a missing element disables its feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub cursor_light: bool,
    #[serde(default = "default_true")]
    pub to_top: bool,
    #[serde(default = "default_true")]
    pub nav_toggle: bool,
    #[serde(default = "default_true")]
    pub footer_year: bool,
    #[serde(default = "default_true")]
    pub contact_form: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            cursor_light: true,
            to_top: true,
            nav_toggle: true,
            footer_year: true,
            contact_form: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Everything the page controller needs to know about a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageManifest {
    pub section_ids: Vec<String>,
    pub nav_hrefs: Vec<String>,
    pub reveal_ids: Vec<String>,
    pub cursor_light: bool,
    pub to_top: bool,
    pub nav_toggle: bool,
    pub footer_year: bool,
    pub contact_form: bool,
}

/// Non-fatal page problems; the affected feature simply stays inactive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageWarning {
    NoSections,
    DanglingLink { label: String, href: String },
    EmptySection(String),
}

impl fmt::Display for PageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageWarning::NoSections => write!(f, "page has no sections; scroll-spy is inactive"),
            PageWarning::DanglingLink { label, href } => {
                write!(f, "nav link \"{}\" points at {} which matches no section", label, href)
            }
            PageWarning::EmptySection(id) => write!(f, "section \"{}\" has no blocks", id),
        }
    }
}

/// Id of the n-th reveal-marked block in document order
pub fn reveal_id(index: usize) -> String {
    format!("reveal-{}", index)
}

impl PageSpec {
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::PageParse(e.to_string()))
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The built-in demo site
    pub fn sample() -> crate::Result<Self> {
        Self::parse(SAMPLE_PAGE)
    }

    /// Explicit nav links, or one link per section
    pub fn nav_links(&self) -> Vec<NavLinkSpec> {
        if !self.nav.is_empty() {
            return self.nav.clone();
        }
        self.sections
            .iter()
            .map(|s| NavLinkSpec {
                label: s.title.clone(),
                href: format!("#{}", s.id),
            })
            .collect()
    }

    pub fn reveal_ids(&self) -> Vec<String> {
        let count = self
            .sections
            .iter()
            .flat_map(|s| &s.blocks)
            .filter(|b| b.reveal)
            .count();
        (0..count).map(reveal_id).collect()
    }

    pub fn manifest(&self) -> PageManifest {
        PageManifest {
            section_ids: self.sections.iter().map(|s| s.id.clone()).collect(),
            nav_hrefs: self.nav_links().into_iter().map(|l| l.href).collect(),
            reveal_ids: self.reveal_ids(),
            cursor_light: self.features.cursor_light,
            to_top: self.features.to_top,
            nav_toggle: self.features.nav_toggle,
            footer_year: self.features.footer_year,
            contact_form: self.features.contact_form,
        }
    }

    /// Fail on ids that break anchoring, warn about everything else
    pub fn validate(&self) -> crate::Result<Vec<PageWarning>> {
        // Reveal blocks share the id namespace the page is measured by
        let reveal_ids: HashSet<String> = self.reveal_ids().into_iter().collect();
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(crate::Error::InvalidPage(format!(
                    "section \"{}\" has an empty id",
                    section.title
                )));
            }
            if section.id.contains(char::is_whitespace) {
                return Err(crate::Error::InvalidPage(format!(
                    "section id \"{}\" contains whitespace",
                    section.id
                )));
            }
            if reveal_ids.contains(&section.id) {
                return Err(crate::Error::InvalidPage(format!(
                    "section id \"{}\" is taken by a reveal block",
                    section.id
                )));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(crate::Error::InvalidPage(format!(
                    "duplicate section id \"{}\"",
                    section.id
                )));
            }
        }

        let mut warnings = Vec::new();
        if self.sections.is_empty() {
            warnings.push(PageWarning::NoSections);
        }
        for link in self.nav_links() {
            if let LinkTarget::Fragment(anchor) = classify_href(&link.href) {
                if !seen.contains(anchor.id()) {
                    warnings.push(PageWarning::DanglingLink {
                        label: link.label,
                        href: link.href,
                    });
                }
            }
        }
        for section in &self.sections {
            if section.blocks.is_empty() {
                warnings.push(PageWarning::EmptySection(section.id.clone()));
            }
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_page_is_valid() {
        let page = PageSpec::sample().unwrap();
        assert_eq!(page.title, "Northwind Studio");
        assert!(page.validate().unwrap().is_empty());

        let manifest = page.manifest();
        assert_eq!(
            manifest.section_ids,
            vec!["home", "services", "work", "about", "contact"]
        );
        assert_eq!(manifest.nav_hrefs.len(), 6);
        assert!(!manifest.reveal_ids.is_empty());
        assert_eq!(manifest.reveal_ids[0], "reveal-0");
    }

    #[test]
    fn test_nav_derived_from_sections() {
        let page = PageSpec::parse(
            r##"
            title = "T"

            [[sections]]
            id = "one"
            title = "One"

            [[sections]]
            id = "two"
            title = "Two"
            "##,
        )
        .unwrap();

        assert_eq!(
            page.nav_links(),
            vec![
                NavLinkSpec { label: "One".into(), href: "#one".into() },
                NavLinkSpec { label: "Two".into(), href: "#two".into() },
            ]
        );
        assert!(page.features.cursor_light);
    }

    #[test]
    fn test_duplicate_ids_are_errors() {
        let page = PageSpec::parse(
            r##"
            title = "T"

            [[sections]]
            id = "one"
            title = "One"

            [[sections]]
            id = "one"
            title = "Again"
            "##,
        )
        .unwrap();

        assert!(matches!(page.validate(), Err(crate::Error::InvalidPage(_))));
    }

    #[test]
    fn test_dangling_links_are_warnings() {
        let page = PageSpec::parse(
            r##"
            title = "T"

            [[nav]]
            label = "Gone"
            href = "#gone"

            [[nav]]
            label = "Elsewhere"
            href = "https://example.com"

            [[nav]]
            label = "Placeholder"
            href = "#"

            [[sections]]
            id = "one"
            title = "One"

            [[sections.blocks]]
            text = "hi"
            "##,
        )
        .unwrap();

        assert_eq!(
            page.validate().unwrap(),
            vec![PageWarning::DanglingLink {
                label: "Gone".into(),
                href: "#gone".into()
            }]
        );
    }

    #[test]
    fn test_section_id_clashing_with_reveal_block() {
        let page = PageSpec::parse(
            r#"
            title = "T"

            [[sections]]
            id = "intro"
            title = "Intro"

            [[sections.blocks]]
            text = "fades in"
            reveal = true

            [[sections]]
            id = "reveal-0"
            title = "Clash"

            [[sections.blocks]]
            text = "plain"
            "#,
        )
        .unwrap();

        assert_eq!(page.reveal_ids(), vec!["reveal-0".to_string()]);
        assert!(matches!(page.validate(), Err(crate::Error::InvalidPage(_))));

        // Without reveal blocks the same id is free
        let mut plain = page.clone();
        plain.sections[0].blocks[0].reveal = false;
        assert!(plain.validate().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            PageSpec::parse("title = "),
            Err(crate::Error::PageParse(_))
        ));
    }
}
