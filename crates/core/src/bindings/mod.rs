// Public API surface of the bindings module.
pub mod conflict;
pub mod entry;
pub mod input_paths;
pub mod namespace;
pub mod validator;
