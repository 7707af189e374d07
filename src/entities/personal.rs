// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All the user personalization, keyed by Pokémon id
pub type Overrides = BTreeMap<i64, Override>;

/// User supplied personalization for a single Pokémon.
///
/// Unknown fields are kept in `extra` so nothing the user stored is lost on
/// the next write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Override {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Override {
    pub fn nickname(nickname: impl Into<String>) -> Self {
        Self {
            nickname: Some(nickname.into()),
            ..Default::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Shallow merge: every field present in `patch` replaces ours, the rest stays.
    /// Nested values in `extra` are replaced whole.
    pub fn merge(&mut self, patch: &Override) {
        if let Some(nickname) = &patch.nickname {
            self.nickname = Some(nickname.clone());
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        for (key, value) in &patch.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merge_overwrites_present_fields_only() {
        let mut current = Override {
            nickname: Some(String::from("Bulby")),
            description: Some(String::from("first catch")),
            extra: BTreeMap::new(),
        };

        current.merge(&Override::nickname("Sprout"));

        assert_eq!(current.nickname.as_deref(), Some("Sprout"));
        assert_eq!(current.description.as_deref(), Some("first catch"));
    }

    #[test]
    fn merge_replaces_nested_extra_values_whole() {
        let mut current = Override::default();
        current
            .extra
            .insert(String::from("tags"), json!({"team": true, "shiny": false}));

        let mut patch = Override::default();
        patch.extra.insert(String::from("tags"), json!({"shiny": true}));
        current.merge(&patch);

        assert_eq!(current.extra["tags"], json!({"shiny": true}));
    }

    #[test]
    fn serializes_as_a_flat_object() {
        let mut value = Override::nickname("Sparky");
        value.extra.insert(String::from("favorite"), json!(true));

        let encoded = serde_json::to_value(&value).unwrap();
        assert_eq!(encoded, json!({"nickname": "Sparky", "favorite": true}));

        let decoded: Override = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
