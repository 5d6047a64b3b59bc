use crate::bindings::entry::ProfileBindings;

/// How an action weighs in per-input exclusivity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingClass {
    /// `/actions/global/in/...` — must be alone on its input.
    Global,
    /// Gameplay or extension actions (`/actions/ingame/in/`, `/actions/mod/in/`)
    /// — at most one per input.
    Primary,
    /// Contextual, GUI, keyboard and bare keybinding ids — never restricted.
    Unrestricted,
}

const GLOBAL_PREFIX: &str = "/actions/global/in/";
const PRIMARY_PREFIXES: [&str; 2] = ["/actions/ingame/in/", "/actions/mod/in/"];

pub fn classify(action: &str) -> BindingClass {
    if action.starts_with(GLOBAL_PREFIX) {
        return BindingClass::Global;
    }
    if PRIMARY_PREFIXES.iter().any(|p| action.starts_with(p)) {
        return BindingClass::Primary;
    }
    BindingClass::Unrestricted
}

/// Action-set category label for display (mirrors the editing UI's grouping).
pub fn category_label(action: &str) -> &'static str {
    if action.starts_with("/actions/ingame/in/") {
        "Ingame"
    } else if action.starts_with("/actions/mod/in/") {
        "Mod"
    } else if action.starts_with(GLOBAL_PREFIX) {
        "Global"
    } else if action.starts_with("/actions/contextual/in/") {
        "Contextual"
    } else if action.starts_with("/actions/gui/in/") {
        "GUI"
    } else if action.starts_with("/actions/keyboard/in/") {
        "Keyboard"
    } else {
        "Other"
    }
}

/// Result of checking one physical input against a profile's binding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub legal: bool,
    pub reason: Option<&'static str>,
}

impl Validation {
    fn legal() -> Self {
        Self {
            legal: true,
            reason: None,
        }
    }

    fn illegal(reason: &'static str) -> Self {
        Self {
            legal: false,
            reason: Some(reason),
        }
    }
}

pub const REASON_GLOBAL_COEXIST: &str = "global binding cannot coexist with other bindings";
pub const REASON_ONE_PRIMARY: &str = "only one primary binding allowed per input";

/// Check whether the bindings targeting `input_path` are mutually legal:
/// a global action excludes any primary action on the same input, and at most
/// one primary action may target an input. Unrestricted actions coexist with
/// anything.
///
/// Advisory only — the store persists whatever it is given; an illegal set is
/// simply flagged again on the next read.
pub fn validate_input(input_path: &str, bindings: &ProfileBindings) -> Validation {
    let mut has_global = false;
    let mut primary_count = 0usize;

    for entry in bindings.entries_for_input(input_path) {
        match classify(&entry.action) {
            BindingClass::Global => has_global = true,
            BindingClass::Primary => primary_count += 1,
            BindingClass::Unrestricted => {}
        }
    }

    if has_global && primary_count > 0 {
        return Validation::illegal(REASON_GLOBAL_COEXIST);
    }
    if primary_count > 1 {
        return Validation::illegal(REASON_ONE_PRIMARY);
    }
    Validation::legal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::entry::BindingEntry;

    const INPUT: &str = "/user/hand/right/input/a/click";

    fn profile(actions: &[&str]) -> ProfileBindings {
        ProfileBindings {
            profile_id: "/interaction_profiles/oculus/touch_controller".into(),
            entries: actions
                .iter()
                .map(|a| BindingEntry::new(*a, INPUT))
                .collect(),
            namespaces: Default::default(),
        }
    }

    #[test]
    fn classification_follows_action_set() {
        assert_eq!(classify("/actions/global/in/togglemenu"), BindingClass::Global);
        assert_eq!(classify("/actions/ingame/in/key.attack"), BindingClass::Primary);
        assert_eq!(classify("/actions/mod/in/key.modx.cast"), BindingClass::Primary);
        assert_eq!(classify("/actions/gui/in/key.gui.scroll"), BindingClass::Unrestricted);
        assert_eq!(classify("key.vivecraft.jump"), BindingClass::Unrestricted);
    }

    #[test]
    fn global_excludes_primary() {
        let pb = profile(&["/actions/global/in/togglemenu", "/actions/ingame/in/key.attack"]);
        let v = validate_input(INPUT, &pb);
        assert!(!v.legal);
        assert_eq!(v.reason, Some(REASON_GLOBAL_COEXIST));
    }

    #[test]
    fn at_most_one_primary() {
        let pb = profile(&["/actions/ingame/in/key.attack", "/actions/mod/in/key.modx.cast"]);
        let v = validate_input(INPUT, &pb);
        assert!(!v.legal);
        assert_eq!(v.reason, Some(REASON_ONE_PRIMARY));
    }

    #[test]
    fn unrestricted_coexists_with_primary() {
        let pb = profile(&[
            "/actions/ingame/in/key.attack",
            "/actions/gui/in/key.gui.scroll",
            "/actions/keyboard/in/key.keyboard.shift",
            "/actions/contextual/in/key.context.use",
        ]);
        assert!(validate_input(INPUT, &pb).legal);
    }

    #[test]
    fn global_alone_and_other_inputs_are_legal() {
        let pb = profile(&["/actions/global/in/togglemenu"]);
        assert!(validate_input(INPUT, &pb).legal);
        // Nothing bound to this input at all.
        assert!(validate_input("/user/hand/left/input/trigger", &pb).legal);
    }
}
