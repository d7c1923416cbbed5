use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::preset::{factory_presets, Preset};
use crate::state::ChainState;

const EXTENSION: &str = "xml";

/// A directory of `<name>.xml` preset files.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    /// Use `dir` as-is, without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create `dir` if needed and seed it with the factory bank when it is empty.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)?;
        store.install_factory_presets()?;
        Ok(store)
    }

    /// Per-user preset directory: `<config dir>/Oxide/Presets`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("Oxide").join("Presets"))
    }

    pub fn open_default() -> Result<Self> {
        let dir = Self::default_dir().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no per-user config directory on this platform",
            ))
        })?;
        Self::open(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `state` as `<name>.xml`, replacing any existing file.
    pub fn save(&self, name: &str, state: &ChainState) -> Result<PathBuf> {
        validate_name(name)?;

        let path = self.dir.join(format!("{name}.{EXTENSION}"));
        let document = Preset::new(name, *state).to_xml()?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, document)?;

        tracing::info!(preset = name, path = %path.display(), "preset saved");
        Ok(path)
    }

    /// Load a preset on top of the default state.
    pub fn load(&self, name: &str) -> Result<Preset> {
        self.load_onto(name, &ChainState::default())
    }

    /// Load a preset on top of `base`.
    ///
    /// Lookup order: `<name>.xml`, `name` itself when it already ends in
    /// `.xml`, underscores read as spaces, then a case-insensitive match on
    /// the file stem.
    pub fn load_onto(&self, name: &str, base: &ChainState) -> Result<Preset> {
        let Some(path) = self.resolve(name) else {
            tracing::warn!(preset = name, "preset not found");
            return Err(Error::PresetNotFound(name.to_string()));
        };

        let document = fs::read_to_string(&path)?;
        let mut preset = Preset::from_xml_onto(&document, base)?;
        if preset.name.is_empty() {
            preset.name = stem(&path).unwrap_or_else(|| name.to_string());
        }

        tracing::info!(preset = %preset.name, path = %path.display(), "preset loaded");
        Ok(preset)
    }

    /// Preset names in this directory, sorted. A store with no presets lists `"Default"`.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.preset_files()?.iter().filter_map(|p| stem(p)).collect();
        names.sort();

        if names.is_empty() {
            names.push("Default".to_string());
        }
        Ok(names)
    }

    /// Write the factory bank if the directory holds no files. Returns how many were written.
    pub fn install_factory_presets(&self) -> Result<usize> {
        if self.has_files()? {
            return Ok(0);
        }

        let presets = factory_presets();
        for preset in &presets {
            self.save(&preset.name, &preset.state)?;
        }

        tracing::info!(count = presets.len(), dir = %self.dir.display(), "factory presets installed");
        Ok(presets.len())
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let exact = self.dir.join(format!("{name}.{EXTENSION}"));
        if exact.is_file() {
            return Some(exact);
        }

        if name.ends_with(".xml") {
            let as_given = self.dir.join(name);
            if as_given.is_file() {
                return Some(as_given);
            }
        }

        if name.contains('_') {
            let spaced = name.replace('_', " ");
            let candidate = self.dir.join(format!("{spaced}.{EXTENSION}"));
            if candidate.is_file() {
                return Some(candidate);
            }
            if let Some(found) = self.find_case_insensitive(&spaced) {
                return Some(found);
            }
        }

        self.find_case_insensitive(name)
    }

    fn find_case_insensitive(&self, name: &str) -> Option<PathBuf> {
        let wanted = name.to_lowercase();
        self.preset_files()
            .ok()?
            .into_iter()
            .find(|path| stem(path).is_some_and(|s| s.to_lowercase() == wanted))
    }

    fn preset_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_xml = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));
            if path.is_file() && is_xml {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn has_files(&self) -> Result<bool> {
        match fs::read_dir(&self.dir) {
            Ok(mut entries) => Ok(entries.any(|e| e.map(|e| e.path().is_file()).unwrap_or(false))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || name.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(Error::InvalidPreset(format!("unusable preset name {name:?}")));
    }
    Ok(())
}
