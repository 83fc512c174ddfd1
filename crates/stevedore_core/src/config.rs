use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Opaque import configuration: setting-group name to group descriptor.
///
/// Groups keep their insertion order, which is the order the panel renders
/// them in. Group descriptors are backend-defined JSON; the panel never
/// interprets them beyond rendering editors for their fields. `clone()` is
/// the structural copy taken at construction and at reset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RagConfig {
    groups: Vec<(String, Value)>,
}

impl RagConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the named group in place, or append it as the newest one.
    pub fn insert(&mut self, group: String, value: Value) {
        match self.groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, slot)) => *slot = value,
            None => self.groups.push((group, value)),
        }
    }

    pub fn get(&self, group: &str) -> Option<&Value> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, group: &str) -> bool {
        self.get(group).is_some()
    }

    /// Groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.groups.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<(String, Value)> for RagConfig {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (group, value) in iter {
            config.insert(group, value);
        }
        config
    }
}

// Serialized as a JSON map so the wire and snapshot shapes stay
// `{group: descriptor}`; the Vec backing only exists to keep group order.
impl Serialize for RagConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, value) in &self.groups {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RagConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = RagConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of group descriptors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut config = RagConfig::new();
                while let Some((group, value)) = access.next_entry()? {
                    config.insert(group, value);
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

/// Theme context forwarded alongside the configuration on every submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeContext {
    pub selected: String,
    pub themes: Value,
}

/// Severity tag of one console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConsoleSeverity {
    Info,
    Warning,
    Success,
    Error,
}

/// One entry of the import console. Inbound entries arrive on the wire as
/// `{"type": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    #[serde(rename = "type")]
    pub severity: ConsoleSeverity,
    pub message: String,
}

impl ConsoleEntry {
    pub fn new(severity: ConsoleSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Connection state of the import socket, tracked from session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closed {
        clean: bool,
    },
}

/// What the primary action submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    /// Stream files and pasted texts to the backend over the socket.
    #[default]
    Import,
    /// Only POST the configuration to the backend.
    ConfigOnly,
}
