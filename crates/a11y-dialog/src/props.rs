#![forbid(unsafe_code)]

//! Dialog props and their registration-time defaults.
//!
//! [`DialogProps`] is the input of one controller. The owner updates it
//! reactively; the controller diffs `open` to drive its state machine.
//! [`PropDefaults`] holds the values props start from, and [`PropOverrides`]
//! lets a plugin installation replace individual defaults.
//!
//! With the `serde` feature, defaults and overrides can be loaded from any
//! serde format:
//!
//! ```ignore
//! let overrides: PropOverrides = serde_json::from_str(r#"{"role":"alertdialog"}"#)?;
//! ```

use std::str::FromStr;

use crate::error::{DialogError, is_valid_id_token};

/// Default prefix of generated instance tokens (`a11y-dialog-<n>`).
pub const DEFAULT_ID_PREFIX: &str = "a11y-dialog";

/// Default accessible label of the close control.
pub const DEFAULT_CLOSE_LABEL: &str = "Close this dialog window";

/// ARIA role of the dialog box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DialogRole {
    #[default]
    Dialog,
    /// Interrupting dialog that requires a response.
    AlertDialog,
}

impl DialogRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dialog => "dialog",
            Self::AlertDialog => "alertdialog",
        }
    }
}

impl FromStr for DialogRole {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dialog" => Ok(Self::Dialog),
            "alertdialog" => Ok(Self::AlertDialog),
            other => Err(DialogError::InvalidRole(other.to_owned())),
        }
    }
}

/// How the host nests backdrop and dialog box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DialogLayout {
    /// A root wrapper (carrying `data-id`) contains the backdrop and the
    /// dialog box as siblings.
    #[default]
    Wrapped,
    /// The backdrop is the outermost element (carrying `data-id`) and wraps
    /// the dialog box.
    BackdropRoot,
}

/// Values every new [`DialogProps`] starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct PropDefaults {
    pub role: DialogRole,
    pub prevent_background_scrolling: bool,
    pub close_button_label: String,
    pub id_prefix: String,
    pub layout: DialogLayout,
}

impl Default for PropDefaults {
    fn default() -> Self {
        Self {
            role: DialogRole::Dialog,
            prevent_background_scrolling: true,
            close_button_label: DEFAULT_CLOSE_LABEL.to_owned(),
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            layout: DialogLayout::Wrapped,
        }
    }
}

impl PropDefaults {
    /// Check that generated ids will be valid id tokens.
    pub fn validate(&self) -> Result<(), DialogError> {
        if !is_valid_id_token(&self.id_prefix) {
            return Err(DialogError::InvalidIdPrefix(self.id_prefix.clone()));
        }
        Ok(())
    }

    /// Replace the defaults named in `overrides`.
    pub fn apply(&mut self, overrides: &PropOverrides) {
        if let Some(role) = overrides.role {
            self.role = role;
        }
        if let Some(prevent) = overrides.prevent_background_scrolling {
            self.prevent_background_scrolling = prevent;
        }
        if let Some(label) = &overrides.close_button_label {
            self.close_button_label.clone_from(label);
        }
        if let Some(prefix) = &overrides.id_prefix {
            self.id_prefix.clone_from(prefix);
        }
        if let Some(layout) = overrides.layout {
            self.layout = layout;
        }
    }
}

/// Partial [`PropDefaults`]; `None` keeps the current default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct PropOverrides {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub role: Option<DialogRole>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub prevent_background_scrolling: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub close_button_label: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id_prefix: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub layout: Option<DialogLayout>,
}

impl PropOverrides {
    pub fn role(mut self, role: DialogRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn prevent_background_scrolling(mut self, prevent: bool) -> Self {
        self.prevent_background_scrolling = Some(prevent);
        self
    }

    pub fn close_button_label(mut self, label: impl Into<String>) -> Self {
        self.close_button_label = Some(label.into());
        self
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }

    pub fn layout(mut self, layout: DialogLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Whether no default is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Props of one dialog instance.
///
/// `open` is owned by the embedding application: the controller reads it and
/// emits [`crate::DialogEvent::Close`] when the user asks to dismiss, but never
/// changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogProps {
    pub open: bool,
    pub role: DialogRole,
    /// Lock document scrolling while the dialog is open.
    pub prevent_background_scrolling: bool,
    /// Explicit instance token; replaces `<id_prefix>-<instance>`.
    pub id: Option<String>,
    /// Explicit title id; replaces `<token>-title`.
    pub title_id: Option<String>,
    pub close_button_label: String,
    pub id_prefix: String,
    pub layout: DialogLayout,
}

impl Default for DialogProps {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DialogProps {
    /// Props built from the built-in defaults.
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self::from_defaults(&PropDefaults::default(), open)
    }

    /// Props built from registration-time defaults.
    #[must_use]
    pub fn from_defaults(defaults: &PropDefaults, open: bool) -> Self {
        Self {
            open,
            role: defaults.role,
            prevent_background_scrolling: defaults.prevent_background_scrolling,
            id: None,
            title_id: None,
            close_button_label: defaults.close_button_label.clone(),
            id_prefix: defaults.id_prefix.clone(),
            layout: defaults.layout,
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn role(mut self, role: DialogRole) -> Self {
        self.role = role;
        self
    }

    pub fn prevent_background_scrolling(mut self, prevent: bool) -> Self {
        self.prevent_background_scrolling = prevent;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title_id(mut self, id: impl Into<String>) -> Self {
        self.title_id = Some(id.into());
        self
    }

    pub fn close_button_label(mut self, label: impl Into<String>) -> Self {
        self.close_button_label = label.into();
        self
    }

    pub fn layout(mut self, layout: DialogLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Host-side prop validation. The controller accepts invalid props and
    /// renders them as given; hosts surface this as a development warning.
    pub fn validate(&self) -> Result<(), DialogError> {
        if !is_valid_id_token(&self.id_prefix) {
            return Err(DialogError::InvalidIdPrefix(self.id_prefix.clone()));
        }
        for id in [&self.id, &self.title_id].into_iter().flatten() {
            if !is_valid_id_token(id) {
                return Err(DialogError::InvalidId(id.clone()));
            }
        }
        Ok(())
    }
}
