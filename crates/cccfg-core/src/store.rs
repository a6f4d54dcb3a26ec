use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::model::{Group, Profile, default_group_id};

const APP_DIR_NAME: &str = "cccfg";
const CONFIGS_FILE_NAME: &str = "configs.json";
const GROUPS_FILE_NAME: &str = "groups.json";

/// Application-private directory holding both persisted collections.
pub fn storage_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Path to `configs.json`.
pub fn configs_path() -> PathBuf {
    storage_directory().join(CONFIGS_FILE_NAME)
}

/// Path to `groups.json`.
pub fn groups_path() -> PathBuf {
    storage_directory().join(GROUPS_FILE_NAME)
}

/// Errors that can occur while reading or writing a persisted collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes a JSON array-of-objects document. A missing or empty file is a
/// normal state and decodes to an empty collection.
fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&raw)?)
}

/// Encodes the full collection, overwriting the previous document. The parent
/// directory is created on demand.
fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(items)?;
    fs::write(path, serialized)?;
    Ok(())
}

/// Load a collection, degrading to empty on failure. Corrupt or unreadable
/// documents must never take the application down; the failure is logged and
/// the caller starts from a clean slate.
fn load_or_empty<T: DeserializeOwned>(path: &Path, what: &str) -> Vec<T> {
    match read_collection(path) {
        Ok(items) => items,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to load {what}; starting empty");
            Vec::new()
        }
    }
}

/// Owns the persisted collection of groups.
///
/// The in-memory list is the source of truth between a load and the next
/// save; every mutation rewrites the whole document. Persistence failures are
/// returned to the caller but the in-memory change sticks, so a later save
/// can retry.
#[derive(Debug)]
pub struct GroupStore {
    path: PathBuf,
    groups: Vec<Group>,
}

impl GroupStore {
    /// Opens the store at the standard location, seeding the default group
    /// when the persisted collection is empty or has lost it.
    pub fn open() -> Self {
        Self::open_at(groups_path())
    }

    /// Opens the store against an explicit file, mainly for tests.
    pub fn open_at(path: PathBuf) -> Self {
        let groups = load_or_empty(&path, "groups");
        let mut store = Self { path, groups };
        store.initialize();
        store
    }

    fn initialize(&mut self) {
        let has_default = self.groups.iter().any(Group::is_default);
        if self.groups.is_empty() || !has_default {
            self.groups = vec![Group::default_group()];
            if let Err(err) = self.save() {
                error!(error = %err, "failed to persist the seeded default group");
            }
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Rewrites the persisted document from the in-memory collection.
    pub fn save(&self) -> Result<(), StoreError> {
        write_collection(&self.path, &self.groups)
    }

    /// Appends a group, keeps the list ordered by `sortOrder`, persists.
    pub fn add(&mut self, group: Group) -> Result<(), StoreError> {
        self.groups.push(group);
        self.groups.sort_by_key(|g| g.sort_order);
        self.save()
    }

    /// Removes a group by id and persists. Deleting the default group is a
    /// no-op. Profiles referencing the deleted group are NOT touched; callers
    /// migrate them via [`ProfileStore::reassign_group`].
    pub fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        if id == default_group_id() {
            return Ok(());
        }
        self.groups.retain(|g| g.id != id);
        self.save()
    }

    /// Replaces the group with a matching id and persists. Unknown ids are a
    /// no-op.
    pub fn update(&mut self, group: Group) -> Result<(), StoreError> {
        let Some(slot) = self.groups.iter_mut().find(|g| g.id == group.id) else {
            return Ok(());
        };
        *slot = group;
        self.save()
    }

    pub fn find(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// The permanent fallback group.
    pub fn default_group(&self) -> Group {
        self.find(default_group_id())
            .cloned()
            .unwrap_or_else(Group::default_group)
    }
}

/// Owns the persisted collection of launch profiles.
///
/// Unlike [`GroupStore`] there is no seeding: an empty profile list is a
/// normal, expected state.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn open() -> Self {
        Self::open_at(configs_path())
    }

    pub fn open_at(path: PathBuf) -> Self {
        let profiles = load_or_empty(&path, "profiles");
        Self { path, profiles }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Rewrites the persisted document from the in-memory collection.
    pub fn save(&self) -> Result<(), StoreError> {
        write_collection(&self.path, &self.profiles)
    }

    pub fn add(&mut self, profile: Profile) -> Result<(), StoreError> {
        self.profiles.push(profile);
        self.save()
    }

    /// Replaces the profile with a matching id and persists. Unknown ids are
    /// a no-op.
    pub fn update(&mut self, profile: Profile) -> Result<(), StoreError> {
        let Some(slot) = self.profiles.iter_mut().find(|p| p.id == profile.id) else {
            return Ok(());
        };
        *slot = profile;
        self.save()
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.profiles.retain(|p| p.id != id);
        self.save()
    }

    pub fn find(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Moves every profile filed under `from` into `to`, persisting when
    /// anything changed. This is the migration step a caller runs when
    /// deleting a group; returns how many profiles moved.
    pub fn reassign_group(&mut self, from: Uuid, to: Uuid) -> Result<usize, StoreError> {
        let mut moved = 0;
        for profile in &mut self.profiles {
            if profile.group_id == from {
                profile.group_id = to;
                moved += 1;
            }
        }
        if moved > 0 {
            self.save()?;
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let groups = dir.path().join(GROUPS_FILE_NAME);
        let configs = dir.path().join(CONFIGS_FILE_NAME);
        (dir, groups, configs)
    }

    #[test]
    fn test_group_store_seeds_default_on_first_open() {
        let (_dir, groups_path, _) = scratch();
        let store = GroupStore::open_at(groups_path.clone());
        assert_eq!(store.groups().len(), 1);
        assert!(store.groups()[0].is_default());
        // The seed is persisted immediately.
        assert!(groups_path.exists());

        let reopened = GroupStore::open_at(groups_path);
        assert_eq!(reopened.groups().len(), 1);
        assert!(reopened.groups()[0].is_default());
    }

    #[test]
    fn test_group_store_reseeds_when_default_is_missing() {
        let (_dir, groups_path, _) = scratch();
        let orphan = Group::new("orphan", "green", "folder");
        write_collection(&groups_path, std::slice::from_ref(&orphan)).unwrap();

        let store = GroupStore::open_at(groups_path);
        // The whole collection is replaced by a fresh default group.
        assert_eq!(store.groups().len(), 1);
        assert!(store.groups()[0].is_default());
        assert!(store.find(orphan.id).is_none());
    }

    #[test]
    fn test_group_store_recovers_from_corrupt_document() {
        let (_dir, groups_path, _) = scratch();
        fs::write(&groups_path, "{not json").unwrap();

        let store = GroupStore::open_at(groups_path);
        assert_eq!(store.groups().len(), 1);
        assert!(store.groups()[0].is_default());
    }

    #[test]
    fn test_delete_default_group_is_a_no_op() {
        let (_dir, groups_path, _) = scratch();
        let mut store = GroupStore::open_at(groups_path);
        store.delete(default_group_id()).unwrap();
        assert_eq!(store.groups().len(), 1);
        assert!(store.groups()[0].is_default());
    }

    #[test]
    fn test_add_keeps_groups_sorted_by_sort_order() {
        let (_dir, groups_path, _) = scratch();
        let mut store = GroupStore::open_at(groups_path);

        let mut late = Group::new("late", "red", "folder");
        late.sort_order = 10;
        let mut early = Group::new("early", "green", "folder");
        early.sort_order = -5;
        store.add(late).unwrap();
        store.add(early).unwrap();

        let order: Vec<&str> = store.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(order, vec!["early", "Default", "late"]);
    }

    #[test]
    fn test_update_unknown_group_is_a_no_op() {
        let (_dir, groups_path, _) = scratch();
        let mut store = GroupStore::open_at(groups_path);
        let stranger = Group::new("stranger", "pink", "folder");
        store.update(stranger.clone()).unwrap();
        assert!(store.find(stranger.id).is_none());
        assert_eq!(store.groups().len(), 1);
    }

    #[test]
    fn test_group_update_replaces_in_place() {
        let (_dir, groups_path, _) = scratch();
        let mut store = GroupStore::open_at(groups_path.clone());
        let group = Group::new("servers", "green", "bolt");
        let id = group.id;
        store.add(group).unwrap();

        let mut edited = store.find(id).cloned().unwrap();
        edited.name = "prod servers".to_string();
        edited.color = "red".to_string();
        store.update(edited).unwrap();

        let reopened = GroupStore::open_at(groups_path);
        let found = reopened.find(id).unwrap();
        assert_eq!(found.name, "prod servers");
        assert_eq!(found.color, "red");
    }

    #[test]
    fn test_profile_store_open_without_file_is_empty() {
        let (_dir, _, configs_path) = scratch();
        let store = ProfileStore::open_at(configs_path.clone());
        assert!(store.profiles().is_empty());
        // No seeding for profiles: nothing is written until a mutation.
        assert!(!configs_path.exists());
    }

    #[test]
    fn test_profile_store_degrades_to_empty_on_corrupt_document() {
        let (_dir, _, configs_path) = scratch();
        fs::write(&configs_path, "[{\"id\": 42}]").unwrap();
        let store = ProfileStore::open_at(configs_path);
        assert!(store.profiles().is_empty());
    }

    #[test]
    fn test_profile_crud_round_trip() {
        let (_dir, _, configs_path) = scratch();
        let mut store = ProfileStore::open_at(configs_path.clone());

        let profile = Profile::new("work", "https://api.anthropic.com", "sk-1", "/tmp/a");
        let id = profile.id;
        store.add(profile).unwrap();

        let mut edited = store.find(id).cloned().unwrap();
        edited.model_name = "claude-sonnet-4-5".to_string();
        edited.is_dangerous_mode = true;
        store.update(edited).unwrap();

        let reopened = ProfileStore::open_at(configs_path.clone());
        let found = reopened.find(id).unwrap();
        assert_eq!(found.model_name, "claude-sonnet-4-5");
        assert!(found.is_dangerous_mode);

        let mut store = reopened;
        store.delete(id).unwrap();
        assert!(store.find(id).is_none());
        let reopened = ProfileStore::open_at(configs_path);
        assert!(reopened.profiles().is_empty());
    }

    #[test]
    fn test_deleting_group_does_not_cascade_to_profiles() {
        let (_dir, groups_path, configs_path) = scratch();
        let mut groups = GroupStore::open_at(groups_path);
        let mut profiles = ProfileStore::open_at(configs_path);

        let group = Group::new("doomed", "orange", "folder");
        let group_id = group.id;
        groups.add(group).unwrap();

        let mut profile = Profile::new("p", "https://api.anthropic.com", "sk", "/tmp");
        profile.group_id = group_id;
        let profile_id = profile.id;
        profiles.add(profile).unwrap();

        groups.delete(group_id).unwrap();
        // The profile still carries the dangling group id until the caller
        // runs the migration step.
        assert_eq!(profiles.find(profile_id).unwrap().group_id, group_id);

        let moved = profiles
            .reassign_group(group_id, default_group_id())
            .unwrap();
        assert_eq!(moved, 1);
        assert_eq!(
            profiles.find(profile_id).unwrap().group_id,
            default_group_id()
        );
    }

    #[test]
    fn test_reassign_group_without_matches_does_not_write() {
        let (_dir, _, configs_path) = scratch();
        let mut profiles = ProfileStore::open_at(configs_path.clone());
        let moved = profiles
            .reassign_group(Uuid::new_v4(), default_group_id())
            .unwrap();
        assert_eq!(moved, 0);
        assert!(!configs_path.exists());
    }
}
