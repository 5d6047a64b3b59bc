use std::sync::Arc;

use indexmap::IndexMap;

use crate::bindings::entry::{BindingEntry, NamespaceInfo};
use crate::registry_log::RegistryLog;

/// Outcome of deduplicating one profile's raw binding claims.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Surviving entries, one per action, in first-occurrence order.
    pub entries: Vec<BindingEntry>,
    /// Per-action ownership diagnostics (namespace, original claim, rejected
    /// claim count). Never consulted to change outcomes.
    pub namespaces: IndexMap<String, NamespaceInfo>,
    /// action -> input paths that lost to an earlier claim. Reported for
    /// observability; never an error.
    pub conflicts: IndexMap<String, Vec<String>>,
}

impl Resolution {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Deduplicate raw (action, inputPath) claims for one profile.
///
/// Policy is first-occurrence-wins over the order of `raw`: the first claim
/// for an action keeps its input, later claims for the same action are
/// recorded as rejected alternatives and dropped. There is no priority
/// ranking between namespaces. Callers must supply a stable order; feeding
/// this from a hash-ordered collection makes conflicting claims resolve
/// differently run to run.
pub fn resolve_conflicts(
    raw: &[(String, String)],
    profile_id: &str,
    logger: &Arc<dyn RegistryLog>,
) -> Resolution {
    let mut out = Resolution::default();

    for (action, input_path) in raw {
        if let Some(info) = out.namespaces.get_mut(action) {
            info.conflict_count += 1;
            out.conflicts
                .entry(action.clone())
                .or_default()
                .push(input_path.clone());
            continue;
        }

        let entry = BindingEntry::new(action.clone(), input_path.clone());
        out.namespaces.insert(
            action.clone(),
            NamespaceInfo {
                namespace: entry.namespace.clone(),
                original_action: action.clone(),
                conflict_count: 0,
            },
        );
        out.entries.push(entry);
    }

    if out.has_conflicts() {
        for (action, rejected) in &out.conflicts {
            logger.warn(&format!(
                "[resolve_conflicts] {profile_id}: {action} claimed {} time(s) more, rejected {:?}",
                rejected.len(),
                rejected
            ));
        }
    } else {
        logger.debug(&format!(
            "[resolve_conflicts] {profile_id}: {} entries, no conflicts",
            out.entries.len()
        ));
    }

    out
}
