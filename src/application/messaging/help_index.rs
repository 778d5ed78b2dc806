//! Merged help pages, grouped by plugin

use std::collections::HashMap;

use crate::domain::entities::HelpPage;

/// The help pages one plugin contributed
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub plugin: String,
    pub pages: Vec<HelpPage>,
}

/// A top-level page hidden by a later plugin's page of the same name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    pub page: String,
    pub hidden: String,
    pub visible: String,
}

/// Help tree keyed by plugin.
///
/// When two plugins declare a top-level page with the same name, the one
/// registered later is the one listed and looked up. The earlier page stays
/// in its section but is not reachable by name.
#[derive(Debug, Clone, Default)]
pub struct HelpIndex {
    sections: Vec<HelpSection>,
    owners: HashMap<String, (usize, usize)>,
}

impl HelpIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin's pages, returning every page this shadows
    pub fn insert(&mut self, plugin: impl Into<String>, pages: Vec<HelpPage>) -> Vec<Shadowed> {
        let plugin = plugin.into();
        let section = self.sections.len();
        let mut shadowed = Vec::new();

        for (position, page) in pages.iter().enumerate() {
            let key = page.name.to_ascii_lowercase();
            if let Some((prev_section, _)) = self.owners.insert(key, (section, position)) {
                let hidden = if prev_section == section {
                    plugin.clone()
                } else {
                    self.sections[prev_section].plugin.clone()
                };
                shadowed.push(Shadowed {
                    page: page.name.clone(),
                    hidden,
                    visible: plugin.clone(),
                });
            }
        }

        self.sections.push(HelpSection { plugin, pages });
        shadowed
    }

    pub fn sections(&self) -> &[HelpSection] {
        &self.sections
    }

    fn is_owner(&self, section: usize, position: usize, page: &HelpPage) -> bool {
        self.owners.get(&page.name.to_ascii_lowercase()) == Some(&(section, position))
    }

    /// Reachable top-level pages with their plugin, in registration order
    pub fn list(&self, include_operator: bool) -> Vec<(&str, &HelpPage)> {
        let mut pages = Vec::new();
        for (s, section) in self.sections.iter().enumerate() {
            for (p, page) in section.pages.iter().enumerate() {
                if self.is_owner(s, p, page) && page.is_visible(include_operator) {
                    pages.push((section.plugin.as_str(), page));
                }
            }
        }
        pages
    }

    /// Follow a path of page names from the top level
    pub fn find(&self, path: &[&str], include_operator: bool) -> Option<&HelpPage> {
        let (first, rest) = path.split_first()?;
        let &(s, p) = self.owners.get(&first.to_ascii_lowercase())?;
        let mut page = self.sections.get(s)?.pages.get(p)?;
        if !page.is_visible(include_operator) {
            return None;
        }
        for name in rest {
            page = page.sub_page(name)?;
            if !page.is_visible(include_operator) {
                return None;
            }
        }
        Some(page)
    }

    /// Every reachable page, depth first, with its depth
    pub fn walk(&self, include_operator: bool) -> Vec<(usize, &HelpPage)> {
        fn visit<'a>(
            page: &'a HelpPage,
            depth: usize,
            include_operator: bool,
            out: &mut Vec<(usize, &'a HelpPage)>,
        ) {
            if !page.is_visible(include_operator) {
                return;
            }
            out.push((depth, page));
            for sub in &page.sub_pages {
                visit(sub, depth + 1, include_operator, out);
            }
        }

        let mut out = Vec::new();
        for (_, page) in self.list(include_operator) {
            visit(page, 0, include_operator, &mut out);
        }
        out
    }

    /// Case-insensitive search over names and short descriptions
    pub fn search(&self, query: &str, include_operator: bool) -> Vec<&HelpPage> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.walk(include_operator)
            .into_iter()
            .map(|(_, page)| page)
            .filter(|page| {
                page.name.to_lowercase().contains(&needle)
                    || page.short_description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
