//! Toolbar icon derivation for browser actions.
//!
//! Presentation code calls [`browser_action_background_image`] once per
//! extension per render to compute the CSS `background-image` value of the
//! toolbar button. The function is pure and total; anything that cannot be
//! resolved to an icon yields an empty string.

use crate::types::{DefaultIcon, Extension};

/// Sentinel tab id meaning "no tab context": per-tab overrides are skipped.
pub const NO_TAB: i64 = -1;

/// Maps an extension's relative base path to a loadable base URL.
///
/// Owned by the host; resolution is infallible by contract and failure is
/// expressed as `None`. Implemented for any `Fn(&str) -> Option<String>`.
pub trait AssetUrlResolver {
    fn resolve_base(&self, base_path: &str) -> Option<String>;
}

impl<F> AssetUrlResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_base(&self, base_path: &str) -> Option<String> {
        self(base_path)
    }
}

/// Compute the CSS background-image value for an extension's toolbar icon.
///
/// The icon is taken from the tab's browser-action override when `tab_id`
/// names a tab carrying one, otherwise from the extension's `default_icon`.
/// A resolution map contributes a 1x term (key `"19"`, falling back to
/// `"16"`) and a 2x term (key `"38"`, falling back to `"32"`); the legacy
/// single-path form contributes a lone 1x term. Returns an empty string when
/// no icon is representable.
pub fn browser_action_background_image(
    extension: Option<&Extension>,
    tab_id: i64,
    resolver: &impl AssetUrlResolver,
) -> String {
    let Some(extension) = extension else {
        return String::new();
    };
    let Some(action) = extension.browser_action.as_ref() else {
        return String::new();
    };

    let icon = tab_icon_override(extension, tab_id).or(action.default_icon.as_ref());
    let base = resolver
        .resolve_base(&extension.base_path)
        .filter(|base| !base.is_empty());
    let (Some(icon), Some(base)) = (icon, base) else {
        return String::new();
    };

    match icon {
        DefaultIcon::Single(path) => format!("-webkit-image-set(url({base}/{path}) 1x)"),
        DefaultIcon::ByResolution(map) => {
            let small = map.get("19").or_else(|| map.get("16"));
            let medium = map.get("38").or_else(|| map.get("32"));
            if small.is_none() && medium.is_none() {
                return String::new();
            }

            let set: Vec<String> = [(small, "1x"), (medium, "2x")]
                .into_iter()
                .filter_map(|(path, density)| path.map(|p| format!("url({base}/{p}) {density}")))
                .collect();
            format!("-webkit-image-set({})", set.join(", "))
        }
    }
}

/// Icon from the tab's browser-action override, if the tab carries one.
fn tab_icon_override(extension: &Extension, tab_id: i64) -> Option<&DefaultIcon> {
    if tab_id < 0 {
        return None;
    }
    extension
        .tabs
        .as_ref()?
        .get(&tab_id.to_string())?
        .browser_action
        .as_ref()?
        .icon
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BrowserAction;

    fn chrome_url(base_path: &str) -> Option<String> {
        Some(format!("nimbus-extension://{base_path}"))
    }

    fn unresolvable(_base_path: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_extension_yields_empty() {
        assert_eq!(browser_action_background_image(None, NO_TAB, &chrome_url), "");
    }

    #[test]
    fn test_missing_browser_action_yields_empty() {
        let ext = Extension::new("x", "p");
        assert_eq!(
            browser_action_background_image(Some(&ext), NO_TAB, &chrome_url),
            ""
        );
    }

    #[test]
    fn test_missing_icon_yields_empty() {
        let ext = Extension::new("x", "p").with_browser_action(
            BrowserAction::default().with_default_title("No icon here"),
        );
        assert_eq!(
            browser_action_background_image(Some(&ext), NO_TAB, &chrome_url),
            ""
        );
    }

    #[test]
    fn test_unresolvable_base_path_yields_empty() {
        let ext = Extension::new("x", "p").with_browser_action(
            BrowserAction::default()
                .with_default_icon(DefaultIcon::Single("icon.png".to_string())),
        );
        assert_eq!(
            browser_action_background_image(Some(&ext), NO_TAB, &unresolvable),
            ""
        );
    }

    #[test]
    fn test_empty_base_url_yields_empty() {
        let empty = |_: &str| Some(String::new());
        let ext = Extension::new("x", "p").with_browser_action(
            BrowserAction::default()
                .with_default_icon(DefaultIcon::Single("icon.png".to_string())),
        );
        assert_eq!(browser_action_background_image(Some(&ext), NO_TAB, &empty), "");
    }
}
