//! Class names and ids shared by the stylesheet and the rendered fragments

/// Id of the injected `<style>` element
pub const STYLESHEET_ID: &str = "mini-toastr-styles";

/// Container element class and id
pub const CONTAINER: &str = "mini-toastr";

/// Notification root class
pub const NOTIFICATION: &str = "mini-toastr__notification";

/// Title element class
pub const TITLE: &str = "mini-toastr-notification__title";

/// Icon wrapper base class
pub const ICON: &str = "mini-toastr-notification__icon";

/// Message element class
pub const MESSAGE: &str = "mini-toastr-notification__message";
