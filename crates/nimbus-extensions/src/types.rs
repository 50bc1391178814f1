//! Extension record types.
//!
//! These mirror the JSON shape the main process uses when it syncs the
//! installed-extension list to the renderer, so every wire-facing type
//! derives serde with the host's field names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// Toolbar icon declaration from an extension manifest.
///
/// Older extensions declare a single path; newer ones declare a map from
/// resolution key (`"16"`, `"19"`, `"32"`, `"38"`) to path. Both wire shapes
/// deserialize into this variant, so downstream code never inspects the raw
/// JSON shape again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultIcon {
    /// Legacy single-path form.
    Single(String),
    /// Resolution key to icon path.
    ByResolution(HashMap<String, String>),
}

/// Browser-action descriptor: what the extension contributes to the toolbar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserAction {
    /// Toolbar icon, if the extension declares one.
    #[serde(default)]
    pub default_icon: Option<DefaultIcon>,
    /// Popup page opened when the action is clicked.
    #[serde(default)]
    pub default_popup: Option<String>,
    /// Tooltip title.
    #[serde(default)]
    pub default_title: Option<String>,
}

impl BrowserAction {
    /// Set the toolbar icon.
    pub fn with_default_icon(mut self, icon: DefaultIcon) -> Self {
        self.default_icon = Some(icon);
        self
    }

    /// Set the popup page.
    pub fn with_default_popup(mut self, popup: impl Into<String>) -> Self {
        self.default_popup = Some(popup.into());
        self
    }

    /// Set the tooltip title.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }
}

/// Context-menu contribution registered by an extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuDescriptor {
    /// Owning extension.
    pub extension_id: String,
    /// Menu item identifier, unique within the extension.
    pub menu_item_id: String,
    /// Free-form item properties as passed by the extension.
    pub properties: Value,
}

/// Tab-scoped browser-action override.
///
/// Fields left `None` fall back to the extension's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabBrowserAction {
    #[serde(default)]
    pub icon: Option<DefaultIcon>,
    #[serde(default)]
    pub popup: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Per-tab state carried on an extension record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    /// Browser-action properties overridden for this tab.
    #[serde(default, rename = "browserAction")]
    pub browser_action: Option<TabBrowserAction>,
}

/// One installed browser extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    /// Unique identifier within the installed set.
    pub id: String,

    /// Whether the extension is currently enabled.
    pub enabled: bool,

    /// True if the user excluded this extension.
    #[serde(default)]
    pub excluded: Option<bool>,

    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Version string from the manifest.
    #[serde(default)]
    pub version: Option<String>,

    /// Root path used to resolve bundled assets.
    pub base_path: String,

    /// Toolbar contribution; absent means no toolbar icon is derivable.
    #[serde(default)]
    pub browser_action: Option<BrowserAction>,

    /// Context-menu contribution.
    #[serde(default, rename = "contextMenus")]
    pub context_menus: Option<ContextMenuDescriptor>,

    /// Raw manifest, carried opaquely for collaborators that need it.
    #[serde(default)]
    pub manifest: Option<Value>,

    /// Tab-id keyed overrides of the browser action.
    #[serde(default)]
    pub tabs: Option<HashMap<String, TabState>>,
}

impl Extension {
    /// Create an enabled extension with the required fields.
    pub fn new(id: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            excluded: None,
            name: None,
            description: None,
            version: None,
            base_path: base_path.into(),
            browser_action: None,
            context_menus: None,
            manifest: None,
            tabs: None,
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Mark the extension as excluded by the user.
    pub fn with_excluded(mut self, excluded: bool) -> Self {
        self.excluded = Some(excluded);
        self
    }

    /// Set the browser-action descriptor.
    pub fn with_browser_action(mut self, action: BrowserAction) -> Self {
        self.browser_action = Some(action);
        self
    }

    /// Set the raw manifest.
    pub fn with_manifest(mut self, manifest: Value) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Attach a tab-scoped browser-action override.
    pub fn with_tab_action(mut self, tab_id: impl Into<String>, action: TabBrowserAction) -> Self {
        self.tabs
            .get_or_insert_with(HashMap::new)
            .insert(tab_id.into(), TabState {
                browser_action: Some(action),
            });
        self
    }

    /// Decode an extension record from a host JSON payload.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|source| DecodeError::Extension { source })
    }
}

/// Transient popup overlay opened from a browser action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupState {
    /// URL rendered inside the overlay.
    pub src: String,
    /// Horizontal offset of the overlay.
    pub left: f64,
    /// Vertical offset of the overlay.
    pub top: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl PopupState {
    /// Create a popup at the given position.
    pub fn new(src: impl Into<String>, left: f64, top: f64) -> Self {
        Self {
            src: src.into(),
            left,
            top,
            width: None,
            height: None,
        }
    }

    /// Set an explicit overlay size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
