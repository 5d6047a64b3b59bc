//! Core library for the VR controller binding registry.
//!
//! This crate is UI-agnostic and host-agnostic. It exposes:
//! - `bindings`: the binding model, namespace resolution, first-occurrence-wins
//!   conflict resolution, per-input legality checks, and input path metadata.
//! - `store`: one-file-per-profile persistence plus the `BindingRegistry`
//!   facade (seed on first use, get, replace, enumerate, clear).
//! - `registry_log::RegistryLog`: thin logging trait the host (mod/CLI) can
//!   implement.
//!
//! Import the `prelude` if you want the most common types in scope.

pub mod registry_log;

pub mod bindings;
pub mod store;

/// Convenient re-exports for downstream users (host/CLI/tests).
pub use registry_log::RegistryLog;

pub mod prelude {
    pub use crate::registry_log::{NoopLog, RegistryLog};

    // Binding model
    pub use crate::bindings::conflict::{Resolution, resolve_conflicts};
    pub use crate::bindings::entry::{BindingEntry, NamespaceInfo, ProfileBindings};
    pub use crate::bindings::input_paths::{
        InputDescription, describe, display_name, inputs_for_profile, is_axis_input, unify_profile,
    };
    pub use crate::bindings::namespace::{HOST_NAMESPACE, resolve_namespace};
    pub use crate::bindings::validator::{
        BindingClass, Validation, category_label, classify, validate_input,
    };

    // Persistence + facade
    pub use crate::store::profile_store::{FORMAT_VERSION, ProfileStore, default_bindings_root};
    pub use crate::store::registry::{BindingRegistry, DefaultsProvider};
}
