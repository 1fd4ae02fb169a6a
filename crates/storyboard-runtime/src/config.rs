use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use storyboard_engine::{LayoutSettings, ReconcileOptions};
use storyboard_scanner::ScanOptions;
use storyboard_types::{Dimensions, SceneBox, relative_module_prefix};

pub const DEFAULT_SRC_DIR: &str = "src";
pub const DEFAULT_OUTPUT: &str = "utopia/storyboard.js";

/// Keywords the `--include-*` flags take off the ignore list
const UTILS_KEYWORD: &str = "utils";
const INDEX_KEYWORD: &str = "index";

/// Optional TOML overrides. Relative paths resolve against the file's directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub src: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub import_prefix: Option<String>,
    pub ignore: Option<Vec<String>>,
    pub force_include: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub auto_size: Option<bool>,
    pub reconcile: ReconcileOptions,
    pub layout: LayoutSettings,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: ConfigFile = toml::from_str(&content)?;
        validate_layout(&config.layout)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Command-line switches, as parsed by the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFlags {
    pub src: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub include_utils: bool,
    pub include_index: bool,
    pub verbose: bool,
    pub preserve_existing: bool,
    pub prune: bool,
    pub force_regen_missing: bool,
    pub dry_run: bool,
}

impl Default for RunFlags {
    fn default() -> Self {
        Self {
            src: None,
            output: None,
            include_utils: false,
            include_index: false,
            verbose: false,
            preserve_existing: true,
            prune: true,
            force_regen_missing: true,
            dry_run: false,
        }
    }
}

/// Everything one run needs, resolved once before the pipeline starts
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub src_root: PathBuf,
    pub output: PathBuf,
    /// Module specifier prefix used in generated imports, e.g. `../src`
    pub import_prefix: String,
    pub scan: ScanOptions,
    pub reconcile: ReconcileOptions,
    pub layout: LayoutSettings,
    pub verbose: bool,
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(ConfigFile::default(), &RunFlags::default())
    }
}

impl GeneratorConfig {
    /// Layer the flags over the file over the built-in defaults.
    pub fn new(file: ConfigFile, flags: &RunFlags) -> Self {
        let src_root = flags
            .src
            .clone()
            .or_else(|| file.src.as_deref().map(|p| file.resolve(p)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SRC_DIR));
        let output = flags
            .output
            .clone()
            .or_else(|| file.output.as_deref().map(|p| file.resolve(p)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let import_prefix = file.import_prefix.clone().unwrap_or_else(|| {
            let output_dir = output.parent().unwrap_or_else(|| Path::new(""));
            if output_dir.is_absolute() == src_root.is_absolute() {
                relative_module_prefix(output_dir, &src_root)
            } else {
                relative_module_prefix(&absolutize(output_dir), &absolutize(&src_root))
            }
        });

        let defaults = ScanOptions::default();
        let mut scan = ScanOptions {
            ignore_keywords: file.ignore.unwrap_or(defaults.ignore_keywords),
            force_include: file.force_include.unwrap_or(defaults.force_include),
            extensions: file.extensions.unwrap_or(defaults.extensions),
            auto_size: file.auto_size.unwrap_or(defaults.auto_size),
        };
        if flags.include_utils {
            tracing::info!("including utility files");
            scan.ignore_keywords.retain(|k| k != UTILS_KEYWORD);
        }
        if flags.include_index {
            tracing::info!("including index files");
            scan.ignore_keywords.retain(|k| k != INDEX_KEYWORD);
        }

        let reconcile = ReconcileOptions {
            preserve_existing: file.reconcile.preserve_existing && flags.preserve_existing,
            prune: file.reconcile.prune && flags.prune,
            force_regen_missing: file.reconcile.force_regen_missing && flags.force_regen_missing,
        };
        if !reconcile.preserve_existing {
            tracing::info!("creating fresh storyboard without preserving existing positions");
        }
        if !reconcile.prune {
            tracing::info!("pruning of removed components disabled");
        }
        if !reconcile.force_regen_missing {
            tracing::info!("not reporting components with missing scenes");
        }

        Self {
            src_root,
            output,
            import_prefix,
            scan,
            reconcile,
            layout: file.layout,
            verbose: flags.verbose,
            dry_run: flags.dry_run,
        }
    }

    /// Read `path` (when given) and build the config from it and the flags.
    pub fn load(path: Option<&Path>, flags: &RunFlags) -> Result<Self> {
        let file = match path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::default(),
        };
        Ok(Self::new(file, flags))
    }
}

/// Reject layout constants the placement arithmetic cannot work with.
fn validate_layout(layout: &LayoutSettings) -> Result<()> {
    let steps = [
        ("spacing", layout.spacing),
        ("column_spacing", layout.column_spacing),
    ];
    for (name, value) in steps {
        if !Dimensions::side_in_range(value) {
            return Err(Error::Config(format!(
                "layout.{} must be between 1 and {}, got {}",
                name,
                Dimensions::MAX_SIDE,
                value
            )));
        }
    }

    let margins = [
        ("vertical_spacing", layout.vertical_spacing),
        ("gap_margin", layout.gap_margin),
    ];
    for (name, value) in margins {
        if !(0..=Dimensions::MAX_SIDE).contains(&value) {
            return Err(Error::Config(format!(
                "layout.{} must be between 0 and {}, got {}",
                name,
                Dimensions::MAX_SIDE,
                value
            )));
        }
    }

    let sizes = [
        ("default_scene", layout.default_scene),
        ("playground_size", layout.playground_size),
        ("app_size", layout.app_size),
    ];
    for (name, size) in sizes {
        if !size.in_range() {
            return Err(Error::Config(format!(
                "layout.{} must have sides between 1 and {}, got {}",
                name,
                Dimensions::MAX_SIDE,
                size
            )));
        }
    }

    let positions = [
        ("top_row", layout.top_row),
        ("component_column_left", layout.component_column_left),
        ("component_column_top", layout.component_column_top),
        ("sub_folder_column_left", layout.sub_folder_column_left),
        ("playground_left", layout.playground_left),
        ("app_left", layout.app_left),
    ];
    for (name, value) in positions {
        if !SceneBox::coordinate_in_range(value) {
            return Err(Error::Config(format!(
                "layout.{} must be within {} of the origin, got {}",
                name,
                SceneBox::MAX_COORDINATE,
                value
            )));
        }
    }

    Ok(())
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_project_layout() {
        let config = GeneratorConfig::default();
        assert_eq!(config.src_root, PathBuf::from("src"));
        assert_eq!(config.output, PathBuf::from("utopia/storyboard.js"));
        assert_eq!(config.import_prefix, "../src");
        assert!(config.scan.ignore_keywords.contains(&"utils".to_string()));
        assert_eq!(config.reconcile, ReconcileOptions::default());
        assert_eq!(config.layout.spacing, 816);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_include_flags_shrink_ignore_list() {
        let flags = RunFlags {
            include_utils: true,
            include_index: true,
            ..RunFlags::default()
        };
        let config = GeneratorConfig::new(ConfigFile::default(), &flags);
        assert!(!config.scan.ignore_keywords.contains(&"utils".to_string()));
        assert!(!config.scan.ignore_keywords.contains(&"index".to_string()));
        assert!(config.scan.ignore_keywords.contains(&"router".to_string()));
    }

    #[test]
    fn test_flags_can_only_switch_reconcile_options_off() {
        let file = ConfigFile {
            reconcile: ReconcileOptions {
                prune: false,
                ..ReconcileOptions::default()
            },
            ..ConfigFile::default()
        };
        let flags = RunFlags {
            preserve_existing: false,
            ..RunFlags::default()
        };
        let config = GeneratorConfig::new(file, &flags);
        assert!(!config.reconcile.preserve_existing);
        assert!(!config.reconcile.prune);
        assert!(config.reconcile.force_regen_missing);
    }

    #[test]
    fn test_load_file_overrides() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("storyboard.toml");
        std::fs::write(
            &path,
            r#"
src = "app"
output = "preview/board.js"
ignore = ["stories"]
auto_size = false

[layout]
spacing = 900
default_scene = { width = 640, height = 480 }
"#,
        )?;

        let config = GeneratorConfig::load(Some(&path), &RunFlags::default())?;
        assert_eq!(config.src_root, temp_dir.path().join("app"));
        assert_eq!(config.output, temp_dir.path().join("preview/board.js"));
        assert_eq!(config.import_prefix, "../app");
        assert_eq!(config.scan.ignore_keywords, vec!["stories".to_string()]);
        assert!(!config.scan.auto_size);
        assert_eq!(config.layout.spacing, 900);
        assert_eq!(config.layout.default_scene.width, 640);
        // untouched keys keep their defaults
        assert_eq!(config.layout.top_row, 128);
        Ok(())
    }

    #[test]
    fn test_flag_paths_beat_file_paths() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("storyboard.toml");
        std::fs::write(&path, "src = \"app\"\n")?;

        let flags = RunFlags {
            src: Some(PathBuf::from("elsewhere")),
            ..RunFlags::default()
        };
        let config = GeneratorConfig::load(Some(&path), &flags)?;
        assert_eq!(config.src_root, PathBuf::from("elsewhere"));
        Ok(())
    }

    #[test]
    fn test_unknown_keys_are_rejected() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("storyboard.toml");
        std::fs::write(&path, "sauce = \"src\"\n")?;

        let err = GeneratorConfig::load(Some(&path), &RunFlags::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_prefix_with_mixed_relative_and_absolute_paths() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let flags = RunFlags {
            output: Some(cwd.join("preview").join("storyboard.js")),
            ..RunFlags::default()
        };
        let config = GeneratorConfig::new(ConfigFile::default(), &flags);
        assert_eq!(config.import_prefix, "../src");
        Ok(())
    }

    #[test]
    fn test_zero_spacing_is_rejected() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("storyboard.toml");
        std::fs::write(&path, "[layout]\nspacing = 0\n")?;

        let err = GeneratorConfig::load(Some(&path), &RunFlags::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("layout.spacing"));
        Ok(())
    }

    #[test]
    fn test_bad_layout_sizes_are_rejected() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("storyboard.toml");

        for body in [
            "[layout]\ncolumn_spacing = -10\n",
            "[layout]\ndefault_scene = { width = 0, height = 700 }\n",
            "[layout]\napp_size = { width = 744, height = 9223372036854775000 }\n",
            "[layout]\ngap_margin = -1\n",
        ] {
            std::fs::write(&path, body)?;
            let err = ConfigFile::load_from(&path).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "accepted: {}", body);
        }
        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = ConfigFile::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
