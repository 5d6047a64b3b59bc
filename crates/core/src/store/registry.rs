use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::bindings::conflict::{Resolution, resolve_conflicts};
use crate::bindings::entry::ProfileBindings;
use crate::bindings::input_paths::unify_profile;
use crate::store::profile_store::ProfileStore;
use crate::registry_log::RegistryLog;

/// Supplies a profile's compiled-in default bindings, invoked once per profile
/// at first use. The returned order must be stable across runs; conflict
/// resolution is first-occurrence-wins over it.
pub trait DefaultsProvider {
    fn default_bindings(&self, profile_id: &str) -> Vec<(String, String)>;
}

impl<F> DefaultsProvider for F
where
    F: Fn(&str) -> Vec<(String, String)>,
{
    fn default_bindings(&self, profile_id: &str) -> Vec<(String, String)> {
        self(profile_id)
    }
}

/// Facade over the profile store and conflict resolver.
///
/// Construct one at startup and hand it to every consumer; there is no global
/// instance. A single lock serializes all operations (store I/O included),
/// which is fine at human-interactive call rates. Callers get owned copies
/// and persist edits through `replace`/`seed_if_absent`, never by mutating
/// shared state.
pub struct BindingRegistry {
    store: Mutex<ProfileStore>,
    logger: Arc<dyn RegistryLog>,
}

impl BindingRegistry {
    pub fn new(store: ProfileStore, logger: Arc<dyn RegistryLog>) -> Self {
        Self {
            store: Mutex::new(store),
            logger,
        }
    }

    /// Seed a profile with defaults unless a file already exists for it.
    /// Idempotent: after the first successful save, later calls are no-ops
    /// whatever raw set they carry. Returns whether a seed happened.
    pub fn seed_if_absent(
        &self,
        profile_id: &str,
        raw: &[(String, String)],
    ) -> Result<bool, String> {
        let store = self.store.lock();
        if store.exists(profile_id) {
            self.logger.debug(&format!(
                "bindings for {profile_id} already exist, skipping seed"
            ));
            return Ok(false);
        }
        self.logger.info(&format!(
            "first use of {profile_id}, saving default bindings"
        ));
        let bindings = Self::resolved(profile_id, raw, &self.logger);
        store.save(&bindings, &self.logger)?;
        Ok(true)
    }

    /// Thin projection of the stored set down to (action, inputPath) pairs.
    pub fn get(&self, profile_id: &str) -> Option<Vec<(String, String)>> {
        self.profile(profile_id).map(|pb| pb.pairs())
    }

    /// Full stored record for a profile, including the namespaces index.
    pub fn profile(&self, profile_id: &str) -> Option<ProfileBindings> {
        self.store.lock().load(profile_id, &self.logger)
    }

    /// Resolve conflicts and overwrite the stored set, regardless of prior
    /// existence. Returns the resolution so callers can surface conflicts.
    pub fn replace(
        &self,
        profile_id: &str,
        raw: &[(String, String)],
    ) -> Result<Resolution, String> {
        let store = self.store.lock();
        let resolution = resolve_conflicts(raw, profile_id, &self.logger);
        let bindings = ProfileBindings {
            profile_id: profile_id.to_string(),
            entries: resolution.entries.clone(),
            namespaces: resolution.namespaces.clone(),
        };
        store.save(&bindings, &self.logger)?;
        Ok(resolution)
    }

    /// Load a profile's bindings, seeding from `provider` on first use. The
    /// profile id is unified through the alias table first, so compatible
    /// controllers share one stored layout. This is the host's load path.
    pub fn get_or_seed(
        &self,
        profile_id: &str,
        provider: &dyn DefaultsProvider,
    ) -> Result<Vec<(String, String)>, String> {
        let unified = unify_profile(profile_id);
        if unified != profile_id {
            self.logger
                .debug(&format!("unified {profile_id} -> {unified}"));
        }

        let store = self.store.lock();
        if let Some(pb) = store.load(unified, &self.logger) {
            self.logger.info(&format!(
                "loaded {} saved binding(s) for {unified}",
                pb.entries.len()
            ));
            return Ok(pb.pairs());
        }

        self.logger.info(&format!(
            "no saved bindings for {unified}, seeding host defaults"
        ));
        let raw = provider.default_bindings(unified);
        let bindings = Self::resolved(unified, &raw, &self.logger);
        store.save(&bindings, &self.logger)?;
        Ok(bindings.pairs())
    }

    /// Delete one profile's stored bindings. Missing profile is not an error.
    pub fn delete(&self, profile_id: &str) -> Result<(), String> {
        let store = self.store.lock();
        store.delete(profile_id)?;
        self.logger
            .info(&format!("deleted saved bindings for {profile_id}"));
        Ok(())
    }

    pub fn available_profiles(&self) -> BTreeSet<String> {
        self.store.lock().list_profiles()
    }

    /// Delete every stored profile.
    pub fn clear_all(&self) -> Result<(), String> {
        let store = self.store.lock();
        store.clear()?;
        self.logger.info("cleared all saved bindings");
        Ok(())
    }

    fn resolved(
        profile_id: &str,
        raw: &[(String, String)],
        logger: &Arc<dyn RegistryLog>,
    ) -> ProfileBindings {
        let resolution = resolve_conflicts(raw, profile_id, logger);
        ProfileBindings {
            profile_id: profile_id.to_string(),
            entries: resolution.entries,
            namespaces: resolution.namespaces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry_log::NoopLog;

    const TOUCH: &str = "/interaction_profiles/oculus/touch_controller";

    fn registry(dir: &std::path::Path) -> BindingRegistry {
        BindingRegistry::new(ProfileStore::new(dir.join("bindings")), Arc::new(NoopLog))
    }

    fn raw(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(a, i)| (a.to_string(), i.to_string()))
            .collect()
    }

    #[test]
    fn seed_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        let a = raw(&[("key.vivecraft.jump", "/user/hand/right/input/a/click")]);
        let b = raw(&[("key.vivecraft.jump", "/user/hand/left/input/x/click")]);

        assert!(reg.seed_if_absent(TOUCH, &a).unwrap());
        assert!(!reg.seed_if_absent(TOUCH, &b).unwrap());
        assert!(!reg.seed_if_absent(TOUCH, &a).unwrap());

        assert_eq!(reg.get(TOUCH).unwrap(), a);
    }

    #[test]
    fn replace_then_get_returns_resolved_form() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        let x = raw(&[
            ("key.vivecraft.jump", "/user/hand/right/input/a/click"),
            ("key.vivecraft.jump", "/user/hand/right/input/b/click"),
            ("key.modx.cast", "/user/hand/right/input/b/click"),
        ]);
        let resolution = reg.replace(TOUCH, &x).unwrap();
        assert!(resolution.has_conflicts());

        let got = reg.get(TOUCH).unwrap();
        assert_eq!(
            got,
            raw(&[
                ("key.vivecraft.jump", "/user/hand/right/input/a/click"),
                ("key.modx.cast", "/user/hand/right/input/b/click"),
            ])
        );
    }

    #[test]
    fn replace_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        reg.seed_if_absent(TOUCH, &raw(&[("key.a.one", "/i/1")])).unwrap();
        reg.replace(TOUCH, &raw(&[("key.b.two", "/i/2")])).unwrap();
        assert_eq!(reg.get(TOUCH).unwrap(), raw(&[("key.b.two", "/i/2")]));
    }

    #[test]
    fn get_or_seed_pulls_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        let calls = std::sync::atomic::AtomicUsize::new(0);
        let provider = |_: &str| {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            raw(&[("key.vivecraft.jump", "/user/hand/right/input/a/click")])
        };

        let first = reg.get_or_seed(TOUCH, &provider).unwrap();
        let second = reg.get_or_seed(TOUCH, &provider).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn get_or_seed_unifies_compatible_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        let provider = |_: &str| raw(&[("key.vivecraft.jump", "/user/hand/right/input/a/click")]);
        reg.get_or_seed("/interaction_profiles/samsung/odyssey_controller", &provider)
            .unwrap();

        // The bindings landed under the donor layout, not the Odyssey id.
        let profiles = reg.available_profiles();
        assert!(profiles.contains(TOUCH));
        assert!(!profiles.contains("/interaction_profiles/samsung/odyssey_controller"));
    }

    #[test]
    fn delete_removes_one_profile() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        reg.seed_if_absent(TOUCH, &raw(&[("key.a.one", "/i/1")])).unwrap();
        reg.seed_if_absent(
            "/interaction_profiles/htc/vive_controller",
            &raw(&[("key.b.two", "/i/2")]),
        )
        .unwrap();

        reg.delete(TOUCH).unwrap();
        assert!(reg.get(TOUCH).is_none());
        let profiles = reg.available_profiles();
        assert_eq!(profiles.len(), 1);
        assert!(profiles.contains("/interaction_profiles/htc/vive_controller"));

        // Deleting an already-missing profile stays fine, and the slot can be
        // seeded again afterwards.
        reg.delete(TOUCH).unwrap();
        assert!(reg.seed_if_absent(TOUCH, &raw(&[("key.c.three", "/i/3")])).unwrap());
    }

    #[test]
    fn profiles_list_and_clear_all() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path());

        reg.seed_if_absent(TOUCH, &raw(&[("key.a.one", "/i/1")])).unwrap();
        reg.seed_if_absent(
            "/interaction_profiles/htc/vive_controller",
            &raw(&[("key.a.one", "/i/1")]),
        )
        .unwrap();
        assert_eq!(reg.available_profiles().len(), 2);

        reg.clear_all().unwrap();
        assert!(reg.available_profiles().is_empty());
        assert!(reg.get(TOUCH).is_none());
    }
}
