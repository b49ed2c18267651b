use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fontset_core::{Error, HeaderFlags, HeaderTemplate};

/// Characters packed when no text is configured.
pub const DEFAULT_TEXT: &str = "滕王高阁临江渚，佩玉鸣鸾罢歌舞。画栋朝飞南浦云，珠帘暮卷西山雨。\
闲云潭影日悠悠，物换星移几度秋。阁中帝子今何在？槛外长江空自流。0123456789#=+-ABCDEFG";

/// File name looked up in the working directory and the config directory.
pub const CONFIG_FILE_NAME: &str = "fontset.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub header: HeaderConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
    /// File this config was read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// TrueType/OpenType file to take outlines from.
    pub path: Option<PathBuf>,
    /// Face within a collection (.ttc); 0 for single-font files.
    pub face_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub file_flag: u8,
    /// Exactly four ASCII bytes, e.g. "1004".
    pub version: String,
    pub font_size: u8,
    pub render_mode: u8,
    pub bold: bool,
    pub italic: bool,
    pub scan_mode: bool,
    pub index_method: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Characters to pack. Ignored when `text_file` is set.
    pub text: String,
    /// Read the characters from this UTF-8 file instead.
    pub text_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Log file; defaults to `fontset_debug.log` next to the executable.
    pub file: Option<PathBuf>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            file_flag: 2,
            version: "1004".to_owned(),
            font_size: 32,
            render_mode: 2,
            bold: false,
            italic: false,
            scan_mode: false,
            index_method: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fontset.bin"),
            text: DEFAULT_TEXT.to_owned(),
            text_file: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

impl HeaderConfig {
    pub fn flags(&self) -> HeaderFlags {
        let mut flags = HeaderFlags::empty();
        flags.set(HeaderFlags::BOLD, self.bold);
        flags.set(HeaderFlags::ITALIC, self.italic);
        flags.set(HeaderFlags::SCAN_MODE, self.scan_mode);
        flags.set(HeaderFlags::INDEX_METHOD, self.index_method);
        flags
    }

    /// Convert to an encoder template, rejecting unusable values.
    pub fn to_template(&self) -> Result<HeaderTemplate, Error> {
        let version: [u8; 4] = self.version.as_bytes().try_into().map_err(|_| {
            Error::InvalidConfig(format!(
                "version must be exactly 4 bytes, got {:?}",
                self.version
            ))
        })?;
        let template = HeaderTemplate {
            file_flag: self.file_flag,
            version,
            font_size: self.font_size,
            render_mode: self.render_mode,
            flags: self.flags(),
        };
        template.validate()?;
        Ok(template)
    }
}

impl OutputConfig {
    /// The characters to pack: `text_file` contents if set, else `text`.
    pub fn resolve_text(&self) -> Result<String, String> {
        match &self.text_file {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read text file {}: {e}", path.display())),
            None => Ok(self.text.clone()),
        }
    }
}

impl LogConfig {
    /// Parsed level; unknown names fall back to `info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Return the platform-specific configuration directory for `fontset`.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("fontset");
        }
        PathBuf::from(".").join("fontset")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("fontset");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("fontset");
        }
        PathBuf::from(".").join("fontset")
    }
}

/// Candidate config files, most specific first.
pub fn default_config_paths() -> [PathBuf; 2] {
    [
        PathBuf::from(CONFIG_FILE_NAME),
        config_dir().join(CONFIG_FILE_NAME),
    ]
}

impl Config {
    /// Load and parse a config file. Relative paths inside it are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let mut cfg: Self =
            toml::from_str(&data).map_err(|e| format!("parse error in {}: {e}", path.display()))?;
        if let Some(base) = path.parent() {
            cfg.resolve_relative(base);
        }
        cfg.source = Some(path.to_path_buf());
        Ok(cfg)
    }

    /// Load `path` if given, else the first default location that exists,
    /// else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = path {
            return Self::load(path);
        }
        for candidate in default_config_paths() {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn resolve_relative(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(p) = self.font.path.as_mut() {
            fix(p);
        }
        fix(&mut self.output.path);
        if let Some(p) = self.output.text_file.as_mut() {
            fix(p);
        }
        if let Some(p) = self.log.file.as_mut() {
            fix(p);
        }
    }

    /// Serialize to pretty TOML (used by `--print-config`).
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize error: {e}"))
    }
}
