use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// API endpoint a freshly created profile points at.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com";

/// Reserved id of the group every profile falls back to. The group with this
/// id always exists and can never be deleted.
pub fn default_group_id() -> Uuid {
    Uuid::nil()
}

/// A named set of connection and launch parameters for the Claude CLI.
///
/// Serialized as a camelCase JSON object inside `configs.json`. The schema has
/// grown additively over time: `modelName`, `isDangerousMode` and `groupId`
/// were added after the first release, so documents written by older versions
/// may omit them and must still decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub api_url: String,
    pub api_key: String,
    pub working_directory: String,
    #[serde(default)]
    pub model_name: String,
    pub is_default: bool,
    #[serde(default)]
    pub is_dangerous_mode: bool,
    #[serde(default = "default_group_id")]
    pub group_id: Uuid,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            working_directory: String::new(),
            model_name: String::new(),
            is_default: false,
            is_dangerous_mode: false,
            group_id: default_group_id(),
        }
    }
}

impl Profile {
    /// Creates a profile with a fresh id, filed under the default group.
    pub fn new(name: &str, api_url: &str, api_key: &str, working_directory: &str) -> Self {
        Self {
            name: name.to_string(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            working_directory: working_directory.to_string(),
            ..Self::default()
        }
    }

    /// Returns every field that currently blocks this profile from launching.
    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.name.is_empty() {
            issues.push(ValidationIssue::NameEmpty);
        }
        if self.api_url.is_empty() {
            issues.push(ValidationIssue::ApiUrlEmpty);
        } else if !self.api_url.starts_with("http") {
            issues.push(ValidationIssue::ApiUrlNotHttp);
        }
        if self.api_key.is_empty() {
            issues.push(ValidationIssue::ApiKeyEmpty);
        }
        if self.working_directory.is_empty() {
            issues.push(ValidationIssue::WorkingDirectoryEmpty);
        }
        issues
    }

    /// True when all required fields are filled in and the launch command can
    /// be built.
    pub fn is_valid(&self) -> bool {
        self.validation_issues().is_empty()
    }
}

/// A single reason a profile fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("name must not be empty")]
    NameEmpty,
    #[error("API URL must not be empty")]
    ApiUrlEmpty,
    #[error("API URL must start with http")]
    ApiUrlNotHttp,
    #[error("API key must not be empty")]
    ApiKeyEmpty,
    #[error("working directory must not be empty")]
    WorkingDirectoryEmpty,
}

/// A named category used to partition profiles.
///
/// Serialized as a camelCase JSON object inside `groups.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub sort_order: i64,
}

impl Group {
    /// Creates a group with a fresh id and sort order 0.
    pub fn new(name: &str, color: &str, icon: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            sort_order: 0,
        }
    }

    /// The permanent fallback group, reconstructed whenever it is missing
    /// from the persisted collection.
    pub fn default_group() -> Self {
        Self {
            id: default_group_id(),
            name: "Default".to_string(),
            color: GroupColor::Blue.name().to_string(),
            icon: "folder".to_string(),
            sort_order: 0,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == default_group_id()
    }

    /// Color used when rendering the group. Unrecognised names are stored
    /// verbatim but display as blue.
    pub fn display_color(&self) -> GroupColor {
        GroupColor::parse(&self.color).unwrap_or(GroupColor::Blue)
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && GroupColor::parse(&self.color).is_some()
    }
}

/// The fixed palette of symbolic group colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColor {
    Blue,
    Green,
    Red,
    Orange,
    Purple,
    Pink,
}

impl GroupColor {
    pub const ALL: [Self; 6] = [
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Orange,
        Self::Purple,
        Self::Pink,
    ];

    /// Case-insensitive lookup of a symbolic color name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "red" => Some(Self::Red),
            "orange" => Some(Self::Orange),
            "purple" => Some(Self::Purple),
            "pink" => Some(Self::Pink),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}
