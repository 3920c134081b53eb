//! The credential store.
//!
//! Authorized profiles, the default profile and path aliases live in a single
//! YAML file (`~/.twurlrc` unless overridden). Every mutating operation saves
//! the file straight away.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const FILE_DESCRIPTION: &str = "rcfile";

/// Credentials for one user under one consumer key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub secret: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// `[username, consumer_key]` of the profile used when none is named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<(String, String)>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
struct RcData {
    #[serde(default)]
    profiles: BTreeMap<String, BTreeMap<String, Profile>>,
    #[serde(default)]
    configuration: Configuration,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct RcFile {
    path: String,
    data: RcData,
}

fn get_reader(path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            FILE_DESCRIPTION.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn get_writer(path: &str) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options
        .open(path)
        .map_err(|e| Error::io_error(FILE_DESCRIPTION.to_string(), path.to_string(), e))
}

impl RcFile {
    /// Loads the credential store at `path`.
    ///
    /// A missing or blank file yields an empty store; nothing is written until
    /// the first change.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or does not hold
    /// the expected YAML structure.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::exists(Path::new(path)) {
            debug!("No rcfile at `{path}`, starting empty");
            return Ok(Self::empty(path));
        }

        let mut contents = String::new();
        get_reader(path)?
            .read_to_string(&mut contents)
            .map_err(|e| Error::io_error(FILE_DESCRIPTION.to_string(), path.to_string(), e))?;

        if contents.trim().is_empty() {
            return Ok(Self::empty(path));
        }

        let data = serde_yaml::from_str(&contents).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                FILE_DESCRIPTION.to_string(),
                path.to_string(),
                e,
            )
        })?;

        Ok(Self {
            path: path.to_string(),
            data,
        })
    }

    /// An empty store that will be written to `path` on the first change.
    #[must_use]
    pub fn empty(path: &str) -> Self {
        Self {
            path: path.to_string(),
            data: RcData::default(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Writes the store back to disk, readable by the owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialization fails.
    pub fn save(&self) -> Result<()> {
        let writer = get_writer(&self.path)?;
        info!("Saving rcfile to `{}`", self.path);

        serde_yaml::to_writer(writer, &self.data).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                FILE_DESCRIPTION.to_string(),
                self.path.clone(),
                e,
            )
        })
    }

    /// True when there are no profiles, no default and no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data == RcData::default()
    }

    #[must_use]
    pub fn profiles(&self) -> &BTreeMap<String, BTreeMap<String, Profile>> {
        &self.data.profiles
    }

    /// All profiles stored for `username`, keyed by consumer key.
    #[must_use]
    pub fn profiles_for(&self, username: &str) -> Option<&BTreeMap<String, Profile>> {
        self.data.profiles.get(username)
    }

    #[must_use]
    pub fn profile(&self, username: &str, consumer_key: &str) -> Option<&Profile> {
        self.profiles_for(username)
            .and_then(|profiles| profiles.get(consumer_key))
    }

    #[must_use]
    pub fn has_profile(&self, username: Option<&str>, consumer_key: Option<&str>) -> bool {
        match (username, consumer_key) {
            (Some(username), Some(consumer_key)) => self.profile(username, consumer_key).is_some(),
            _ => false,
        }
    }

    #[must_use]
    pub fn default_profile(&self) -> Option<(&str, &str)> {
        self.data
            .configuration
            .default_profile
            .as_ref()
            .map(|(username, consumer_key)| (username.as_str(), consumer_key.as_str()))
    }

    /// Makes `(username, consumer_key)` the default profile and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be saved.
    pub fn set_default_profile(&mut self, username: &str, consumer_key: &str) -> Result<()> {
        self.data.configuration.default_profile =
            Some((username.to_string(), consumer_key.to_string()));
        self.save()
    }

    /// Stores `profile`, replacing one with the same user and consumer key.
    ///
    /// The first profile stored also becomes the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be saved.
    pub fn add_profile(&mut self, profile: Profile) -> Result<()> {
        if self.data.configuration.default_profile.is_none() {
            self.data.configuration.default_profile =
                Some((profile.username.clone(), profile.consumer_key.clone()));
        }

        self.data
            .profiles
            .entry(profile.username.clone())
            .or_default()
            .insert(profile.consumer_key.clone(), profile);

        self.save()
    }

    /// Stores `path` under the alias `name` and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be saved.
    pub fn alias(&mut self, name: &str, path: &str) -> Result<()> {
        self.data
            .aliases
            .insert(name.to_string(), path.to_string());
        self.save()
    }

    #[must_use]
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.data.aliases
    }

    #[must_use]
    pub fn alias_from_name(&self, name: &str) -> Option<&str> {
        self.data.aliases.get(name).map(String::as_str)
    }

    /// The path of the first argument that names an alias.
    #[must_use]
    pub fn alias_from_args(&self, args: &[String]) -> Option<&str> {
        args.iter().find_map(|arg| self.alias_from_name(arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str, consumer_key: &str) -> Profile {
        Profile {
            username: username.to_string(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: format!("{consumer_key}-secret"),
            token: format!("{username}-token"),
            secret: format!("{username}-token-secret"),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twurlrc");
        let rcfile = RcFile::load(path.to_str().unwrap()).unwrap();

        assert!(rcfile.is_empty());
        assert!(rcfile.default_profile().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_blank_file_is_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let rcfile = RcFile::load(file.path().to_str().unwrap()).unwrap();
        assert!(rcfile.is_empty());
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "profiles: [not, a, map").unwrap();

        let result = RcFile::load(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_first_profile_becomes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twurlrc");
        let mut rcfile = RcFile::empty(path.to_str().unwrap());

        rcfile.add_profile(profile("alice", "key1")).unwrap();
        rcfile.add_profile(profile("bob", "key2")).unwrap();

        assert_eq!(rcfile.default_profile(), Some(("alice", "key1")));
        assert!(rcfile.has_profile(Some("bob"), Some("key2")));
        assert!(!rcfile.has_profile(Some("bob"), None));
        assert!(!rcfile.is_empty());
    }

    #[test]
    fn test_add_profile_replaces_same_consumer_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twurlrc");
        let mut rcfile = RcFile::empty(path.to_str().unwrap());

        rcfile.add_profile(profile("alice", "key1")).unwrap();
        let mut updated = profile("alice", "key1");
        updated.token = "new-token".to_string();
        rcfile.add_profile(updated).unwrap();
        rcfile.add_profile(profile("alice", "key2")).unwrap();

        let profiles = rcfile.profiles_for("alice").unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles["key1"].token, "new-token");
    }

    #[test]
    fn test_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twurlrc");
        let mut rcfile = RcFile::empty(path.to_str().unwrap());

        rcfile.alias("h", "/1.1/statuses/home_timeline.json").unwrap();
        rcfile.alias("m", "/1.1/statuses/mentions_timeline.json").unwrap();

        assert_eq!(
            rcfile.alias_from_name("h"),
            Some("/1.1/statuses/home_timeline.json")
        );
        assert_eq!(rcfile.alias_from_name("x"), None);

        let args = vec!["nope".to_string(), "m".to_string(), "h".to_string()];
        assert_eq!(
            rcfile.alias_from_args(&args),
            Some("/1.1/statuses/mentions_timeline.json")
        );
        assert_eq!(rcfile.alias_from_args(&[]), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twurlrc");
        let path = path.to_str().unwrap();

        let mut rcfile = RcFile::empty(path);
        rcfile.add_profile(profile("alice", "key1")).unwrap();
        rcfile.alias("h", "/1.1/statuses/home_timeline.json").unwrap();

        let reloaded = RcFile::load(path).unwrap();
        assert_eq!(reloaded.profile("alice", "key1"), Some(&profile("alice", "key1")));
        assert_eq!(reloaded.default_profile(), Some(("alice", "key1")));
        assert_eq!(reloaded.aliases().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twurlrc");
        let mut rcfile = RcFile::empty(path.to_str().unwrap());
        rcfile.alias("h", "/1.1/statuses/home_timeline.json").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
