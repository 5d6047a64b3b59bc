//! Human-readable descriptions for OpenXR input paths, plus the unified
//! profile table that lets compatible controllers share one binding layout.

use std::borrow::Cow;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

pub const TOUCH_PROFILE: &str = "/interaction_profiles/oculus/touch_controller";
pub const VIVE_PROFILE: &str = "/interaction_profiles/htc/vive_controller";
pub const COSMOS_PROFILE: &str = "/interaction_profiles/htc/vive_cosmos_controller";

/// Controllers whose layout is close enough to another one that we store and
/// look up bindings under the donor profile instead.
static UNIFIED_PROFILES: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("/interaction_profiles/samsung/odyssey_controller", TOUCH_PROFILE),
        ("/interaction_profiles/bytedance/pico4_controller", TOUCH_PROFILE),
        ("/interaction_profiles/bytedance/pico_neo3_controller", TOUCH_PROFILE),
    ]
    .into_iter()
    .collect()
});

/// Collapse a profile id onto its donor layout, if it has one.
pub fn unify_profile(profile_id: &str) -> &str {
    UNIFIED_PROFILES
        .get(profile_id)
        .copied()
        .unwrap_or(profile_id)
}

/// One controller input with its descriptive information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDescription {
    pub path: Cow<'static, str>,
    pub hand: Cow<'static, str>,
    pub display_name: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

const fn desc(
    path: &'static str,
    hand: &'static str,
    display_name: &'static str,
    description: &'static str,
) -> InputDescription {
    InputDescription {
        path: Cow::Borrowed(path),
        hand: Cow::Borrowed(hand),
        display_name: Cow::Borrowed(display_name),
        description: Cow::Borrowed(description),
    }
}

static TOUCH_INPUTS: Lazy<Vec<InputDescription>> = Lazy::new(|| {
    vec![
        desc("/user/hand/right/input/trigger", "Right", "Trigger", "Right trigger"),
        desc("/user/hand/right/input/squeeze", "Right", "Grip", "Right grip"),
        desc("/user/hand/right/input/thumbstick", "Right", "Thumbstick", "Right thumbstick (2D axis)"),
        desc("/user/hand/right/input/thumbstick/click", "Right", "Thumbstick Click", "Right thumbstick press"),
        desc("/user/hand/right/input/a/click", "Right", "A Button", "A button"),
        desc("/user/hand/right/input/b/click", "Right", "B Button", "B button"),
        desc("/user/hand/left/input/trigger", "Left", "Trigger", "Left trigger"),
        desc("/user/hand/left/input/squeeze", "Left", "Grip", "Left grip"),
        desc("/user/hand/left/input/thumbstick", "Left", "Thumbstick", "Left thumbstick (2D axis)"),
        desc("/user/hand/left/input/thumbstick/click", "Left", "Thumbstick Click", "Left thumbstick press"),
        desc("/user/hand/left/input/x/click", "Left", "X Button", "X button"),
        desc("/user/hand/left/input/y/click", "Left", "Y Button", "Y button"),
        desc("/user/hand/left/input/menu/click", "Left", "Menu Button", "Left hand menu button"),
    ]
});

static VIVE_INPUTS: Lazy<Vec<InputDescription>> = Lazy::new(|| {
    vec![
        desc("/user/hand/right/input/trigger", "Right", "Trigger", "Right hand trigger"),
        desc("/user/hand/right/input/squeeze", "Right", "Grip", "Right hand grip"),
        desc("/user/hand/right/input/trackpad", "Right", "Trackpad", "Right hand trackpad (2D axis)"),
        desc("/user/hand/right/input/trackpad/click", "Right", "Trackpad Click", "Right hand trackpad press"),
        desc("/user/hand/right/input/menu/click", "Right", "Menu Button", "Right hand menu button"),
        desc("/user/hand/left/input/trigger", "Left", "Trigger", "Left hand trigger"),
        desc("/user/hand/left/input/squeeze", "Left", "Grip", "Left hand grip"),
        desc("/user/hand/left/input/trackpad", "Left", "Trackpad", "Left hand trackpad (2D axis)"),
        desc("/user/hand/left/input/trackpad/click", "Left", "Trackpad Click", "Left hand trackpad press"),
        desc("/user/hand/left/input/menu/click", "Left", "Menu Button", "Left hand menu button"),
    ]
});

static COSMOS_INPUTS: Lazy<Vec<InputDescription>> = Lazy::new(|| {
    vec![
        desc("/user/hand/right/input/trigger", "Right", "Trigger", "Right trigger"),
        desc("/user/hand/right/input/squeeze", "Right", "Grip", "Right hand grip"),
        desc("/user/hand/right/input/thumbstick", "Right", "Thumbstick", "Right hand thumbstick (2D axis)"),
        desc("/user/hand/right/input/thumbstick/click", "Right", "Thumbstick Click", "Right hand thumbstick press"),
        desc("/user/hand/right/input/a/click", "Right", "A Button", "Right hand A button"),
        desc("/user/hand/right/input/b/click", "Right", "B Button", "Right hand B button"),
        desc("/user/hand/left/input/trigger", "Left", "Trigger", "Left hand trigger"),
        desc("/user/hand/left/input/squeeze", "Left", "Grip", "Left hand grip"),
        desc("/user/hand/left/input/thumbstick", "Left", "Thumbstick", "Left hand thumbstick (2D axis)"),
        desc("/user/hand/left/input/thumbstick/click", "Left", "Thumbstick Click", "Left hand thumbstick press"),
        desc("/user/hand/left/input/x/click", "Left", "X Button", "Left hand X button"),
        desc("/user/hand/left/input/y/click", "Left", "Y Button", "Left hand Y button"),
    ]
});

/// Inputs known for an interaction profile (after unification). Unknown
/// profiles fall back to the Vive wand layout for compatibility.
pub fn inputs_for_profile(profile_id: &str) -> &'static [InputDescription] {
    match unify_profile(profile_id) {
        TOUCH_PROFILE => &TOUCH_INPUTS,
        COSMOS_PROFILE => &COSMOS_INPUTS,
        _ => &VIVE_INPUTS,
    }
}

/// Description for one input path; unknown paths get an "Unknown input"
/// record carrying the queried path as its name, so display code never has
/// to special-case.
pub fn describe(profile_id: &str, input_path: &str) -> InputDescription {
    inputs_for_profile(profile_id)
        .iter()
        .find(|d| d.path == input_path)
        .cloned()
        .unwrap_or_else(|| InputDescription {
            path: Cow::Owned(input_path.to_string()),
            hand: Cow::Borrowed("Unknown"),
            display_name: Cow::Owned(input_path.to_string()),
            description: Cow::Borrowed("Unknown input"),
        })
}

pub fn display_name(profile_id: &str, input_path: &str) -> String {
    describe(profile_id, input_path).display_name.into_owned()
}

/// Thumbsticks and trackpads without a `/click` leaf are axes, not buttons.
pub fn is_axis_input(input_path: &str) -> bool {
    (input_path.contains("/thumbstick") || input_path.contains("/trackpad"))
        && !input_path.contains("/click")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odyssey_unifies_to_touch() {
        assert_eq!(
            unify_profile("/interaction_profiles/samsung/odyssey_controller"),
            TOUCH_PROFILE
        );
        assert_eq!(unify_profile(VIVE_PROFILE), VIVE_PROFILE);
    }

    #[test]
    fn touch_layout_has_face_buttons() {
        let inputs = inputs_for_profile(TOUCH_PROFILE);
        assert!(inputs.iter().any(|d| d.path == "/user/hand/right/input/a/click"));
        assert_eq!(
            display_name(TOUCH_PROFILE, "/user/hand/left/input/x/click"),
            "X Button"
        );
    }

    #[test]
    fn unknown_input_falls_back_to_path() {
        let name = display_name(TOUCH_PROFILE, "/user/hand/right/input/weird");
        assert_eq!(name, "/user/hand/right/input/weird");
        let d = describe(TOUCH_PROFILE, "/user/hand/right/input/weird");
        assert_eq!(d.path, "/user/hand/right/input/weird");
        assert_eq!(d.display_name, "/user/hand/right/input/weird");
        assert_eq!(d.hand, "Unknown");
        assert_eq!(d.description, "Unknown input");
    }

    #[test]
    fn axis_detection() {
        assert!(is_axis_input("/user/hand/left/input/thumbstick"));
        assert!(is_axis_input("/user/hand/left/input/trackpad"));
        assert!(!is_axis_input("/user/hand/left/input/thumbstick/click"));
        assert!(!is_axis_input("/user/hand/right/input/a/click"));
    }
}
