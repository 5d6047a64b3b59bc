use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bindings::namespace::resolve_namespace;

/// One (action, input) association within a profile, tagged with the namespace
/// that owns the action.
///
/// `namespace` is derived from `action` at construction time and is never
/// accepted as authoritative input. It is persisted alongside the entry only
/// as denormalized context for humans reading the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingEntry {
    pub action: String,
    pub input_path: String,
    pub namespace: String,
}

impl BindingEntry {
    pub fn new(action: impl Into<String>, input_path: impl Into<String>) -> Self {
        let action = action.into();
        let namespace = resolve_namespace(&action).to_string();
        Self {
            action,
            input_path: input_path.into(),
            namespace,
        }
    }

    pub fn as_pair(&self) -> (String, String) {
        (self.action.clone(), self.input_path.clone())
    }
}

/// Denormalized ownership record for one action: who owned it last and how
/// many competing claims were rejected for it. Purely diagnostic; resolution
/// outcomes never consult it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfo {
    pub namespace: String,
    pub original_action: String,
    pub conflict_count: u32,
}

/// The full binding set for one controller profile.
///
/// `entries` keeps insertion order; it carries no meaning beyond the
/// first-occurrence-wins tie-breaking that produced it. Within one profile an
/// action appears at most once, while several actions may share an input path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileBindings {
    pub profile_id: String,
    pub entries: Vec<BindingEntry>,
    pub namespaces: IndexMap<String, NamespaceInfo>,
}

impl ProfileBindings {
    /// Project the set down to plain (action, inputPath) pairs, in order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.entries.iter().map(BindingEntry::as_pair).collect()
    }

    /// Entries bound to one physical input, in insertion order.
    pub fn entries_for_input<'a>(
        &'a self,
        input_path: &'a str,
    ) -> impl Iterator<Item = &'a BindingEntry> {
        self.entries.iter().filter(move |e| e.input_path == input_path)
    }

    /// All distinct input paths referenced by this profile, in first-seen order.
    pub fn input_paths(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for e in &self.entries {
            if !seen.contains(&e.input_path.as_str()) {
                seen.push(e.input_path.as_str());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_namespace_is_recomputed_from_action() {
        let e = BindingEntry::new("key.modx.jump", "/user/hand/right/input/a/click");
        assert_eq!(e.namespace, "modx");
        let e = BindingEntry::new("no_owner_here", "/user/hand/left/input/trigger");
        assert_eq!(e.namespace, "vivecraft");
    }

    #[test]
    fn input_paths_dedupe_in_first_seen_order() {
        let pb = ProfileBindings {
            profile_id: "/interaction_profiles/oculus/touch_controller".into(),
            entries: vec![
                BindingEntry::new("key.a.one", "/user/hand/right/input/a/click"),
                BindingEntry::new("key.b.two", "/user/hand/right/input/trigger"),
                BindingEntry::new("key.c.three", "/user/hand/right/input/a/click"),
            ],
            namespaces: IndexMap::new(),
        };
        assert_eq!(
            pb.input_paths(),
            vec!["/user/hand/right/input/a/click", "/user/hand/right/input/trigger"]
        );
        assert_eq!(pb.entries_for_input("/user/hand/right/input/a/click").count(), 2);
    }
}
