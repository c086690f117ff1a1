#![forbid(unsafe_code)]

//! Loading plugin options and prop defaults from JSON.

use a11y_dialog::{DialogLayout, DialogRole, Plugin, PluginOptions, PropDefaults, PropOverrides};

struct NullHost;

impl a11y_dialog::Host for NullHost {
    fn register_component(&mut self, _name: &str, _defaults: &PropDefaults) {}
}

#[test]
fn plugin_options_from_json() {
    let json = r#"{
        "component-name": "confirm-dialog",
        "props": {
            "role": "alertdialog",
            "prevent-background-scrolling": false,
            "close-button-label": "Fermer",
            "id-prefix": "confirm",
            "layout": "backdrop-root"
        }
    }"#;
    let options: PluginOptions = serde_json::from_str(json).expect("valid options");
    assert_eq!(options.component_name.as_deref(), Some("confirm-dialog"));
    assert_eq!(options.props.role, Some(DialogRole::AlertDialog));
    assert_eq!(options.props.layout, Some(DialogLayout::BackdropRoot));

    let mut plugin = Plugin::new();
    assert_eq!(plugin.install(&mut NullHost, &options), Ok(true));
    let props = plugin.props(false);
    assert_eq!(props.role, DialogRole::AlertDialog);
    assert!(!props.prevent_background_scrolling);
    assert_eq!(props.close_button_label, "Fermer");
    assert_eq!(props.id_prefix, "confirm");
}

#[test]
fn missing_fields_keep_defaults() {
    let options: PluginOptions = serde_json::from_str("{}").expect("empty options");
    assert_eq!(options, PluginOptions::default());
    assert!(options.props.is_empty());

    let defaults: PropDefaults = serde_json::from_str(r#"{"role":"alertdialog"}"#).expect("partial defaults");
    assert_eq!(defaults.role, DialogRole::AlertDialog);
    assert!(defaults.prevent_background_scrolling);
    assert_eq!(defaults.id_prefix, PropDefaults::default().id_prefix);
}

#[test]
fn unknown_role_is_a_deserialization_error() {
    let result: Result<PropOverrides, _> = serde_json::from_str(r#"{"role":"menu"}"#);
    assert!(result.is_err());
}

#[test]
fn overrides_serialize_only_set_fields() {
    let overrides = PropOverrides::default().role(DialogRole::AlertDialog);
    let json = serde_json::to_string(&overrides).expect("serialize");
    assert_eq!(json, r#"{"role":"alertdialog"}"#);
}
