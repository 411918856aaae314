//! Animations supplied from JavaScript

use std::rc::Rc;

use toastr_core::animation::{Animation, Completion};
use wasm_bindgen::prelude::*;
use web_sys::Node;

use crate::WebHost;

/// Calls `fn(node, done)`; the function removes the node and calls `done`
///
/// `done` is `undefined` for click dismissals, which report no completion.
pub struct JsAnimation(js_sys::Function);

impl JsAnimation {
    pub fn new(function: js_sys::Function) -> Self {
        Self(function)
    }
}

impl Animation<WebHost> for JsAnimation {
    fn animate(&self, _host: &Rc<WebHost>, node: Node, on_complete: Option<Completion>) {
        let done = on_complete.map_or(JsValue::UNDEFINED, |done| {
            Closure::once_into_js(move || done())
        });
        if let Err(err) = self.0.call2(&JsValue::NULL, &node, &done) {
            log::error!("animation function threw: {err:?}");
        }
    }
}
