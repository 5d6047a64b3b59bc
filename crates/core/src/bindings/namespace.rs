use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace reserved for the host itself. Hand-input actions and anything we
/// cannot attribute to an extension land here.
pub const HOST_NAMESPACE: &str = "vivecraft";

/// Prefix of raw OpenXR hand-input paths (`/user/hand/left/input/...`).
pub const HAND_INPUT_PREFIX: &str = "/user/";

// Dotted keybinding ids: key.<owner>.<rest>, e.g. "key.modx.jump" -> "modx".
static KEYBIND_OWNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^key\.([^.\s]+)\..+").expect("keybind owner regex"));

/// Map an action id to the namespace that owns it. First matching rule wins:
/// hand-input paths belong to the host, dotted keybinding ids belong to the
/// owner segment, everything else falls back to the host namespace.
///
/// Total over all inputs (including the empty string); never returns an empty
/// namespace.
pub fn resolve_namespace(action: &str) -> &str {
    if action.starts_with(HAND_INPUT_PREFIX) {
        return HOST_NAMESPACE;
    }
    if let Some(caps) = KEYBIND_OWNER.captures(action) {
        if let Some(owner) = caps.get(1) {
            return owner.as_str();
        }
    }
    HOST_NAMESPACE
}
