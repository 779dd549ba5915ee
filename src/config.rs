//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/multimenu/multimenu.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `MULTIMENU_*` prefix
//!
//! A config file looks like this:
//!
//! ```toml
//! [menu]
//! menu_id = "main-menu"
//! parent_field = "parent_id"
//! item_template = "link"
//! main_container_options = { levels = [{ class = "menu" }, { class = "submenu" }] }
//!
//! [templates]
//! link = '<a href="/page/{id}">{title}</a>'
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::application::{ApplicationError, MenuOptions};
use crate::domain::{LevelConfig, MapRecord, OrphanPolicy};
use crate::infrastructure::{Attributes, PlaceholderTemplates, TemplateParams};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "MULTIMENU";

/// Raw menu settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawMenuSettings {
    pub menu_id: Option<String>,
    pub id_field: Option<String>,
    pub parent_field: Option<String>,
    pub main_container_tag: Option<LevelConfig<String, MapRecord>>,
    pub main_container_options: Option<LevelConfig<Attributes, MapRecord>>,
    pub item_container_tag: Option<LevelConfig<String, MapRecord>>,
    pub item_container_options: Option<LevelConfig<Attributes, MapRecord>>,
    pub item_template: Option<LevelConfig<String, MapRecord>>,
    pub item_template_params: Option<LevelConfig<TemplateParams, MapRecord>>,
    pub orphans: Option<OrphanPolicy>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub menu: RawMenuSettings,
    pub templates: BTreeMap<String, String>,
}

/// Unified configuration for multimenu.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Rendering options
    pub menu: MenuOptions<MapRecord>,
    /// Named item templates
    pub templates: BTreeMap<String, String>,
}

/// Get the XDG config directory for multimenu.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "multimenu").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("multimenu.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// - Menu options: overlay wins if specified, otherwise keep base
    /// - Templates: union, overlay wins per name
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let base = &self.menu;
        let raw = &overlay.menu;

        let mut menu = base.clone();
        if let Some(v) = &raw.menu_id {
            menu.menu_id = Some(v.clone());
        }
        if let Some(v) = &raw.id_field {
            menu.fields.id = v.clone();
        }
        if let Some(v) = &raw.parent_field {
            menu.fields.parent = v.clone();
        }
        if let Some(v) = &raw.main_container_tag {
            menu.main_container_tag = v.clone();
        }
        if let Some(v) = &raw.main_container_options {
            menu.main_container_options = v.clone();
        }
        if let Some(v) = &raw.item_container_tag {
            menu.item_container_tag = v.clone();
        }
        if let Some(v) = &raw.item_container_options {
            menu.item_container_options = v.clone();
        }
        if let Some(v) = &raw.item_template {
            menu.item_template = Some(v.clone());
        }
        if let Some(v) = &raw.item_template_params {
            menu.item_template_params = v.clone();
        }
        if let Some(v) = raw.orphans {
            menu.orphans = v;
        }

        let mut templates = self.templates.clone();
        templates.extend(overlay.templates.clone());

        Self { menu, templates }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; it must exist when given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_with(global.as_deref(), local, ENV_PREFIX)
    }

    /// Load settings from explicit sources.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. `global` config file
    /// 3. `local` config file
    /// 4. Environment variables with `env_prefix`
    pub fn load_with(
        global: Option<&Path>,
        local: Option<&Path>,
        env_prefix: &str,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            let raw = load_raw_settings(global_path)?;
            current = current.merge_with(&raw);
        }

        // 3. Local config
        if let Some(local_path) = local {
            let local_path = expand_path(local_path);
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            let raw = load_raw_settings(&local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (replace - explicit override)
        current = Self::apply_env_overrides(current, env_prefix)?;

        Ok(current)
    }

    /// Apply `<prefix>_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env_prefix: &str) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("menu_id") {
            settings.menu.menu_id = Some(val);
        }
        if let Ok(val) = config.get_string("id_field") {
            settings.menu.fields.id = val;
        }
        if let Ok(val) = config.get_string("parent_field") {
            settings.menu.fields.parent = val;
        }
        if let Ok(val) = config.get_string("item_template") {
            settings.menu.item_template = Some(LevelConfig::Constant(val));
        }
        if let Ok(val) = config.get_string("orphans") {
            settings.menu.orphans = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("{}_ORPHANS: {}", env_prefix, e),
            })?;
        }

        Ok(settings)
    }

    /// Template renderer knowing the configured named templates.
    pub fn template_renderer(&self) -> PlaceholderTemplates {
        PlaceholderTemplates::with_templates(self.templates.clone())
    }
}
