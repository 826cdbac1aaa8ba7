use crate::{error::DetectionError, profile::LangProfile};
use ahash::AHashMap;
use compact_str::CompactString;
use std::{fs, io, path::PathBuf};

/// Resolves (profile set, language code) to a profile record. Consulted
/// only at load and profile-set-switch time, never on the detection path.
pub trait ProfileSource {
    fn read_profile(
        &self,
        profile_set: Option<&str>,
        code: &str,
    ) -> Result<LangProfile, DetectionError>;
}

/// Profile JSON files laid out as `root[/profile_set]/code`.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, profile_set: Option<&str>, code: &str) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(set) = profile_set {
            path.push(set);
        }
        path.push(code);
        path
    }
}

impl ProfileSource for DirSource {
    fn read_profile(
        &self,
        profile_set: Option<&str>,
        code: &str,
    ) -> Result<LangProfile, DetectionError> {
        let path = self.path(profile_set, code);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DetectionError::ProfileNotFound(code.into()));
            }
            Err(e) => return Err(DetectionError::ProfileRead(code.into(), e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| DetectionError::InvalidProfile(code.into(), e))
    }
}

/// In-memory profiles, keyed by (profile set, language code). Used for
/// tests and for deployments embedding their profiles.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    profiles: AHashMap<(Option<CompactString>, CompactString), LangProfile>,
}

impl StaticSource {
    /// Registers `profile` under `profile_set`, keyed by its own name.
    /// Nameless profiles are ignored.
    pub fn insert(&mut self, profile_set: Option<&str>, profile: LangProfile) {
        let Some(name) = profile.name.clone() else {
            return;
        };
        self.profiles
            .insert((profile_set.map(CompactString::from), name), profile);
    }
}

impl ProfileSource for StaticSource {
    fn read_profile(
        &self,
        profile_set: Option<&str>,
        code: &str,
    ) -> Result<LangProfile, DetectionError> {
        self.profiles
            .get(&(profile_set.map(CompactString::from), code.into()))
            .cloned()
            .ok_or_else(|| DetectionError::ProfileNotFound(code.into()))
    }
}
