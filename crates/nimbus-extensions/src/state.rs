//! The extensions slice of the application state tree and its reducer.
//!
//! The host dispatcher is the only writer: it feeds every dispatched action
//! through [`reduce`], serially, and stores the returned state. Everything
//! else reads the slice through the selectors at the bottom of this module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DecodeError;
use crate::types::{Extension, PopupState};

/// State owned by the extensions slice.
///
/// `Default` is the initial state: no extensions, no popup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionsState {
    /// Installed extensions indexed by id, replaced wholesale on every list
    /// sync from the extension platform.
    #[serde(default, rename = "byId")]
    pub by_id: HashMap<String, Extension>,

    /// Currently visible browser-action popup, if any.
    #[serde(default)]
    pub popup: Option<PopupState>,
}

/// Actions understood by this slice.
///
/// The dispatcher forwards every action envelope it receives from the main
/// process; envelopes whose `type` belongs to another slice decode to
/// [`Action::Unknown`], which [`reduce`] maps to the identity transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Action {
    /// Full replacement of the installed-extension list.
    UpdateExtensions { list: Vec<Extension> },
    /// Show the browser-action popup, or hide it when the payload is `null`.
    ShowExtensionPopup(Option<PopupState>),
    /// Any action type owned by another slice.
    Unknown,
}

impl Action {
    /// Decode an action envelope from a host JSON payload.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|source| DecodeError::Action { source })
    }
}

// Envelopes are discriminated on the `type` string; a foreign action type
// must fold into `Unknown`, never fail the dispatch.
impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            payload: serde_json::Value,
        }

        #[derive(Deserialize)]
        struct UpdatePayload {
            list: Vec<Extension>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        match envelope.kind.as_str() {
            "update-extensions" => {
                let UpdatePayload { list } =
                    serde_json::from_value(envelope.payload).map_err(D::Error::custom)?;
                Ok(Action::UpdateExtensions { list })
            }
            "show-extension-popup" => {
                let popup = serde_json::from_value(envelope.payload).map_err(D::Error::custom)?;
                Ok(Action::ShowExtensionPopup(popup))
            }
            _ => Ok(Action::Unknown),
        }
    }
}

/// Apply one action to the slice, returning the next state.
///
/// Total and pure: the input is consumed and rebuilt, never mutated in place,
/// and every action maps to a state. Duplicate ids in an incoming list
/// resolve last-write-wins.
pub fn reduce(state: ExtensionsState, action: &Action) -> ExtensionsState {
    match action {
        Action::UpdateExtensions { list } => {
            let by_id: HashMap<String, Extension> = list
                .iter()
                .map(|ext| (ext.id.clone(), ext.clone()))
                .collect();
            debug!(count = by_id.len(), "extension list replaced");
            ExtensionsState { by_id, ..state }
        }
        Action::ShowExtensionPopup(popup) => {
            debug!(visible = popup.is_some(), "extension popup toggled");
            ExtensionsState {
                popup: popup.clone(),
                ..state
            }
        }
        Action::Unknown => state,
    }
}

/// Access to the extensions slice from a larger state tree.
///
/// The host's root state implements this so the selectors below work against
/// the global tree as well as against a bare slice.
pub trait HasExtensionsState {
    fn extensions(&self) -> &ExtensionsState;
}

impl HasExtensionsState for ExtensionsState {
    fn extensions(&self) -> &ExtensionsState {
        self
    }
}

/// Look up a single extension by id.
pub fn get_extension_by_id<'a>(
    state: &'a impl HasExtensionsState,
    extension_id: &str,
) -> Option<&'a Extension> {
    state.extensions().by_id.get(extension_id)
}

/// The currently visible browser-action popup, if any.
pub fn get_popup(state: &impl HasExtensionsState) -> Option<&PopupState> {
    state.extensions().popup.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(id: &str) -> Extension {
        Extension::new(id, format!("extensions/{id}"))
    }

    fn update(list: Vec<Extension>) -> Action {
        Action::UpdateExtensions { list }
    }

    #[test]
    fn test_update_replaces_whole_list() {
        let state = reduce(
            ExtensionsState::default(),
            &update(vec![ext("a"), ext("b")]),
        );
        assert_eq!(state.by_id.len(), 2);

        // A later sync replaces the map instead of merging into it.
        let state = reduce(state, &update(vec![ext("c")]));
        assert_eq!(state.by_id.len(), 1);
        assert!(state.by_id.contains_key("c"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let action = update(vec![ext("a"), ext("b")]);
        let once = reduce(ExtensionsState::default(), &action);
        let twice = reduce(once.clone(), &action);
        assert_eq!(once.by_id, twice.by_id);
    }

    #[test]
    fn test_duplicate_ids_resolve_last_write_wins() {
        let first = ext("a").with_name("first");
        let last = ext("a").with_name("last");
        let state = reduce(ExtensionsState::default(), &update(vec![first, last]));

        assert_eq!(state.by_id.len(), 1);
        assert_eq!(state.by_id["a"].name.as_deref(), Some("last"));
    }

    #[test]
    fn test_update_carries_popup_over() {
        let popup = PopupState::new("popup.html", 120.0, 36.0);
        let state = reduce(
            ExtensionsState::default(),
            &Action::ShowExtensionPopup(Some(popup.clone())),
        );
        let state = reduce(state, &update(vec![ext("a")]));
        assert_eq!(state.popup, Some(popup));
    }

    #[test]
    fn test_popup_show_and_hide() {
        let popup = PopupState::new("popup.html", 8.0, 30.0).with_size(320.0, 480.0);

        let shown = reduce(
            ExtensionsState::default(),
            &Action::ShowExtensionPopup(Some(popup.clone())),
        );
        assert_eq!(get_popup(&shown), Some(&popup));

        let hidden = reduce(shown, &Action::ShowExtensionPopup(None));
        assert_eq!(get_popup(&hidden), None);

        // Hiding with no popup visible stays hidden.
        let still_hidden = reduce(hidden, &Action::ShowExtensionPopup(None));
        assert_eq!(get_popup(&still_hidden), None);
    }

    #[test]
    fn test_popup_does_not_touch_extensions() {
        let state = reduce(ExtensionsState::default(), &update(vec![ext("a")]));
        let state = reduce(
            state,
            &Action::ShowExtensionPopup(Some(PopupState::new("p.html", 0.0, 0.0))),
        );
        assert!(state.by_id.contains_key("a"));
    }

    #[test]
    fn test_unknown_action_is_identity() {
        let state = reduce(ExtensionsState::default(), &update(vec![ext("a")]));
        let state = reduce(
            state,
            &Action::ShowExtensionPopup(Some(PopupState::new("p.html", 4.0, 4.0))),
        );

        let after = reduce(state.clone(), &Action::Unknown);
        assert_eq!(after, state);
    }

    #[test]
    fn test_get_extension_by_id() {
        let state = reduce(ExtensionsState::default(), &update(vec![ext("a")]));
        assert!(get_extension_by_id(&state, "a").is_some());
        assert!(get_extension_by_id(&state, "missing").is_none());
    }
}
