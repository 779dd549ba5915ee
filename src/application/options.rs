//! Rendering options

use crate::domain::{FieldNames, LevelConfig, MenuError, MenuResult, OrphanPolicy};
use crate::infrastructure::{Attributes, TemplateParams};

/// Everything that shapes the rendered menu.
///
/// Container tags, container attributes, the item template and its
/// parameters are [`LevelConfig`]s and may vary by depth independently.
pub struct MenuOptions<R> {
    /// `id` attribute of the top-level container
    pub menu_id: Option<String>,
    /// Identifier and parent-reference field names
    pub fields: FieldNames,
    pub main_container_tag: LevelConfig<String, R>,
    pub main_container_options: LevelConfig<Attributes, R>,
    pub item_container_tag: LevelConfig<String, R>,
    pub item_container_options: LevelConfig<Attributes, R>,
    /// Template reference for one item; required
    pub item_template: Option<LevelConfig<String, R>>,
    pub item_template_params: LevelConfig<TemplateParams, R>,
    /// Handling of records whose parent is missing
    pub orphans: OrphanPolicy,
}

impl<R> Default for MenuOptions<R> {
    fn default() -> Self {
        Self {
            menu_id: None,
            fields: FieldNames::default(),
            main_container_tag: "ul".into(),
            main_container_options: LevelConfig::Constant(Attributes::new()),
            item_container_tag: "li".into(),
            item_container_options: LevelConfig::Constant(Attributes::new()),
            item_template: None,
            item_template_params: LevelConfig::Constant(TemplateParams::new()),
            orphans: OrphanPolicy::default(),
        }
    }
}

impl<R> Clone for MenuOptions<R> {
    fn clone(&self) -> Self {
        Self {
            menu_id: self.menu_id.clone(),
            fields: self.fields.clone(),
            main_container_tag: self.main_container_tag.clone(),
            main_container_options: self.main_container_options.clone(),
            item_container_tag: self.item_container_tag.clone(),
            item_container_options: self.item_container_options.clone(),
            item_template: self.item_template.clone(),
            item_template_params: self.item_template_params.clone(),
            orphans: self.orphans,
        }
    }
}

impl<R> std::fmt::Debug for MenuOptions<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuOptions")
            .field("menu_id", &self.menu_id)
            .field("fields", &self.fields)
            .field("main_container_tag", &self.main_container_tag)
            .field("main_container_options", &self.main_container_options)
            .field("item_container_tag", &self.item_container_tag)
            .field("item_container_options", &self.item_container_options)
            .field("item_template", &self.item_template)
            .field("item_template_params", &self.item_template_params)
            .field("orphans", &self.orphans)
            .finish()
    }
}

impl<R> MenuOptions<R> {
    /// Options with the given item template and defaults elsewhere.
    pub fn with_template(template: impl Into<LevelConfig<String, R>>) -> Self {
        Self {
            item_template: Some(template.into()),
            ..Self::default()
        }
    }

    pub fn menu_id(mut self, id: impl Into<String>) -> Self {
        self.menu_id = Some(id.into());
        self
    }

    /// Check the configuration before rendering.
    ///
    /// # Errors
    /// [`MenuError::Configuration`] if the item template is missing or any
    /// per-level list is empty.
    pub fn validate(&self) -> MenuResult<()> {
        let template = self
            .item_template
            .as_ref()
            .ok_or_else(|| MenuError::config("item template is not defined"))?;

        template.validate("item_template")?;
        self.main_container_tag.validate("main_container_tag")?;
        self.main_container_options
            .validate("main_container_options")?;
        self.item_container_tag.validate("item_container_tag")?;
        self.item_container_options
            .validate("item_container_options")?;
        self.item_template_params.validate("item_template_params")?;
        Ok(())
    }
}
