// Persistence layer: file-backed profile store + the registry facade on top.
pub mod profile_store;
pub mod registry;
