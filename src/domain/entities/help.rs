/// Who may see a help page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Visible to all
    #[default]
    None,
    /// Only shown in operator listings
    Operator,
}

/// A node of human-readable documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpPage {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub sub_pages: Vec<HelpPage>,
    pub permission: Permission,
}

impl HelpPage {
    pub fn new(name: impl Into<String>, short_description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: short_description.into(),
            long_description: String::new(),
            sub_pages: Vec::new(),
            permission: Permission::None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.long_description = body.into();
        self
    }

    pub fn with_sub_page(mut self, page: HelpPage) -> Self {
        self.sub_pages.push(page);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    pub fn is_visible(&self, include_operator: bool) -> bool {
        include_operator || self.permission == Permission::None
    }

    pub fn sub_page(&self, name: &str) -> Option<&HelpPage> {
        self.sub_pages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
