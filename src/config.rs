use crate::languages::{builtin_languages, Language, LanguageRegistry};
use crate::models::{default_categories, Category};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a scan: the category table and any language
/// definitions beyond the built-in set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Categories to group markers under, in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Extra language definitions, keyed by file extension without the
    /// leading dot. Entries here extend the built-in table; an entry
    /// reusing a built-in extension replaces it.
    #[serde(default)]
    pub languages: HashMap<String, Language>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            languages: HashMap::new(),
        }
    }
}

impl Config {
    /// Build the immutable language registry: built-ins with this
    /// config's definitions layered on top
    pub fn registry(&self) -> LanguageRegistry {
        let mut languages = builtin_languages();
        for (extension, language) in &self.languages {
            languages.insert(extension.clone(), language.clone());
        }
        LanguageRegistry::new(languages)
    }

    /// Reject category tables the matcher cannot disambiguate
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            bail!("config defines no categories");
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.marker.is_empty() {
                bail!("category \"{}\" has an empty marker", category.name);
            }
            if !seen.insert(category.marker.as_str()) {
                bail!("duplicate marker \"{}\" in category table", category.marker);
            }
        }
        Ok(())
    }
}

/// Load configuration from file or use defaults
///
/// Search order:
/// 1. Custom path if provided via --config
/// 2. .quarryrc in current directory
/// 3. ~/.quarryrc in home directory
/// 4. Built-in defaults
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    // If custom path provided, use it exclusively
    if let Some(path) = custom_path {
        return load_config_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    let current_config = PathBuf::from(".quarryrc");
    if current_config.exists() {
        if let Ok(config) = load_config_from_file(&current_config) {
            return Ok(config);
        }
    }

    if let Some(home_config) = home_config_path() {
        if home_config.exists() {
            if let Ok(config) = load_config_from_file(&home_config) {
                return Ok(config);
            }
        }
    }

    Ok(Config::default())
}

fn load_config_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config.validate()?;
    Ok(config)
}

fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quarryrc"))
}

/// Commented starter config written by `quarry config init`
pub const CONFIG_TEMPLATE: &str = r#"# quarry configuration

# Each category groups one marker keyword. Table order is display order.
[[categories]]
name = "To Do"
marker = "TODO"

[[categories]]
name = "Fix Me"
marker = "FIXME"

# To add or override a language, follow this template:
# [languages.$EXT]   --- replace $EXT with the language's file extension
# name = ""          --- the full name of the language
# inline = ""        --- whatever denotes the start of an inline comment
# block_start = ""   --- whatever denotes the start of a block comment
# block_end = ""     --- whatever denotes the end of a block comment

# [languages.lua]
# name = "Lua"
# inline = "--"
# block_start = "--[["
# block_end = "]]"
"#;

/// Write the starter config, refusing to clobber an existing file
/// unless asked to
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write config to {}", path.display()))?;

    Ok(())
}
