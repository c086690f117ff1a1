#![forbid(unsafe_code)]

//! Registration with a host framework.
//!
//! A [`Plugin`] is installed once per host. Installing registers the dialog
//! component under a name, fixes the prop defaults every new dialog starts
//! from, and creates the [`DialogRegistry`] its controllers share.
//!
//! # Invariants
//!
//! - Installation happens at most once; later calls return `Ok(false)` and
//!   change nothing.
//! - Options are validated before anything is registered.

use tracing::{debug, info};

use crate::controller::DialogController;
use crate::dom::Document;
use crate::error::DialogError;
use crate::props::{DialogProps, PropDefaults, PropOverrides};
use crate::registry::DialogRegistry;

/// Name the component is registered under when none is given.
pub const DEFAULT_COMPONENT_NAME: &str = "a11y-dialog";

/// A framework the dialog component can be registered with.
pub trait Host {
    /// Make the component available under `name`, with `defaults` as the
    /// initial prop values.
    fn register_component(&mut self, name: &str, defaults: &PropDefaults);
}

/// Options for [`Plugin::install`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct PluginOptions {
    /// Registration name; `None` or empty selects [`DEFAULT_COMPONENT_NAME`].
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub component_name: Option<String>,
    /// Prop defaults to override.
    pub props: PropOverrides,
}

impl PluginOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = Some(name.into());
        self
    }

    pub fn props(mut self, props: PropOverrides) -> Self {
        self.props = props;
        self
    }
}

/// Installable dialog component.
#[derive(Debug)]
pub struct Plugin {
    installed: bool,
    component_name: String,
    defaults: PropDefaults,
    registry: DialogRegistry,
}

impl Default for Plugin {
    fn default() -> Self {
        Self {
            installed: false,
            component_name: DEFAULT_COMPONENT_NAME.to_owned(),
            defaults: PropDefaults::default(),
            registry: DialogRegistry::new(),
        }
    }
}

impl Plugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the component with `host`.
    ///
    /// Returns `Ok(true)` on the first successful install and `Ok(false)` on
    /// every later call.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::InvalidIdPrefix`] if the overridden id prefix
    /// cannot form element ids. Nothing is registered in that case and a later
    /// install may still succeed.
    pub fn install<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        options: &PluginOptions,
    ) -> Result<bool, DialogError> {
        if self.installed {
            debug!(component = %self.component_name, "plugin already installed");
            return Ok(false);
        }

        let mut defaults = PropDefaults::default();
        defaults.apply(&options.props);
        defaults.validate()?;

        let name = options
            .component_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COMPONENT_NAME);

        host.register_component(name, &defaults);
        self.component_name = name.to_owned();
        self.defaults = defaults;
        self.installed = true;
        info!(component = %self.component_name, "dialog component registered");
        Ok(true)
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    #[must_use]
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    #[must_use]
    pub fn defaults(&self) -> &PropDefaults {
        &self.defaults
    }

    /// The registry shared by every controller this plugin mounts.
    #[must_use]
    pub fn registry(&self) -> &DialogRegistry {
        &self.registry
    }

    /// Props filled with the installed defaults.
    #[must_use]
    pub fn props(&self, open: bool) -> DialogProps {
        DialogProps::from_defaults(&self.defaults, open)
    }

    /// Mount a controller sharing this plugin's registry.
    pub fn mount<D: Document>(&self, props: DialogProps, doc: &mut D) -> DialogController<D::Element> {
        DialogController::mount(props, self.registry.clone(), doc)
    }
}
