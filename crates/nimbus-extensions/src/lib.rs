//! Extensions state slice for the Nimbus browser.
//!
//! This crate owns one slice of the application state tree: the set of
//! installed extensions, per-tab browser-action overrides, and the transient
//! browser-action popup. It provides:
//!
//! - a pure reducer, [`reduce`], the sole writer of the slice;
//! - read-only selectors over the slice or the host's global tree;
//! - [`browser_action_background_image`], a pure derivation of the CSS
//!   background-image value for an extension's toolbar icon.
//!
//! The host application owns the state container, dispatch serialization,
//! and asset-URL resolution (see [`AssetUrlResolver`]).
//!
//! # Quick start
//!
//! ```rust
//! use nimbus_extensions::{reduce, Action, Extension, ExtensionsState};
//!
//! let state = ExtensionsState::default();
//! let action = Action::UpdateExtensions {
//!     list: vec![Extension::new("adblock", "extensions/adblock")],
//! };
//! let state = reduce(state, &action);
//! assert!(state.by_id.contains_key("adblock"));
//! ```

pub mod error;
pub mod icon;
pub mod state;
pub mod types;

pub use error::DecodeError;
pub use icon::{browser_action_background_image, AssetUrlResolver, NO_TAB};
pub use state::{
    get_extension_by_id, get_popup, reduce, Action, ExtensionsState, HasExtensionsState,
};
pub use types::{
    BrowserAction, ContextMenuDescriptor, DefaultIcon, Extension, PopupState, TabBrowserAction,
    TabState,
};
