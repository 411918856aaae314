//! Browser bindings for toastr-core
//!
//! Exposes [`MiniToastr`] to JavaScript. Configuration objects are passed
//! through `JSON.stringify` and parsed with the core crate's serde support,
//! so they use the same shape as the JSON configuration documented there.
//! DOM nodes and functions cannot travel as JSON and are read off the object
//! directly: `appendTarget`, `node` and `animation` on the `init` config,
//! `node` and `animation` on per-message overrides.
//!
//! ```js
//! import { MiniToastr } from "toastr-wasm";
//!
//! const toastr = new MiniToastr();
//! toastr.init({ timeout: 5000, appendTarget: document.getElementById("app") });
//! toastr.error("Connection lost", "Network").info("Retrying");
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use toastr_core::{
    Animation, ConfigOverride, IconSpec, NotificationRequest, Severity, ToastConfig, ToastError,
    ToastService,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Node;

mod animation;
mod dom;
mod logging;

pub use animation::JsAnimation;
pub use dom::WebHost;

type JsResult<T> = Result<T, JsValue>;

fn to_js(err: ToastError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Serialize a plain JS object, `None` for `undefined` and `null`
fn stringify(value: &JsValue) -> JsResult<Option<String>> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    js_sys::JSON::stringify(value).map(|json| Some(String::from(json)))
}

/// Read `object[name]`, `None` when unset
fn field(object: &JsValue, name: &str) -> JsResult<Option<JsValue>> {
    if !object.is_object() {
        return Ok(None);
    }
    let value = js_sys::Reflect::get(object, &JsValue::from_str(name))?;
    Ok((!value.is_undefined() && !value.is_null()).then_some(value))
}

fn node_field(object: &JsValue, name: &str) -> JsResult<Option<Node>> {
    field(object, name)?
        .map(|value| {
            value
                .dyn_into::<Node>()
                .map_err(|_| js_sys::TypeError::new(&format!("`{name}` must be a DOM node")).into())
        })
        .transpose()
}

fn animation_field(object: &JsValue) -> JsResult<Option<Rc<dyn Animation<WebHost>>>> {
    field(object, "animation")?
        .map(|value| {
            value
                .dyn_into::<js_sys::Function>()
                .map(|function| Rc::new(JsAnimation::new(function)) as Rc<dyn Animation<WebHost>>)
                .map_err(|_| js_sys::TypeError::new("`animation` must be a function").into())
        })
        .transpose()
}

/// Toast notifications for the current page
///
/// Clones share one service, so dispatch methods return the instance for
/// chaining.
#[wasm_bindgen]
#[derive(Default, Clone)]
pub struct MiniToastr {
    inner: Rc<RefCell<Option<ToastService<WebHost>>>>,
}

#[wasm_bindgen]
impl MiniToastr {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject the stylesheet and mount the container
    ///
    /// Outside a browser document this succeeds and leaves the instance
    /// inactive.
    pub fn init(&self, config: JsValue) -> JsResult<()> {
        logging::set_panic_hook();
        logging::init_logging(if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Warn
        });

        let Some(host) = WebHost::from_window() else {
            log::info!("no browser document, notifications disabled");
            return Ok(());
        };
        let parsed = match stringify(&config)? {
            Some(json) => ToastConfig::from_json(&json).map_err(to_js)?,
            None => ToastConfig::default(),
        };

        let mut builder = ToastService::builder(Rc::new(host)).config(parsed);
        if let Some(target) = node_field(&config, "appendTarget")? {
            builder = builder.append_target(target);
        }
        if let Some(container) = node_field(&config, "node")? {
            builder = builder.container(container);
        }
        if let Some(animation) = animation_field(&config)? {
            builder = builder.animation(animation);
        }

        let service = builder.init().map_err(to_js)?;
        *self.inner.borrow_mut() = Some(service);
        Ok(())
    }

    /// Whether `init` mounted a container
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Remove the stylesheet and container so `init` can run again
    pub fn unmount(&self) -> JsResult<()> {
        let service = self.inner.borrow_mut().take();
        match service {
            Some(service) => service.unmount().map_err(to_js),
            None => Ok(()),
        }
    }

    /// Show a notification
    ///
    /// `severity` is one of `error`, `warn`, `success`, `info`; anything else
    /// renders without severity styling. `timeout` is in milliseconds and
    /// `overrides` is a partial configuration object, optionally carrying a
    /// `node` to mount into and an `animation` function.
    #[wasm_bindgen(js_name = showMessage)]
    pub fn show_message(
        &self,
        message: Option<String>,
        title: Option<String>,
        severity: Option<String>,
        timeout: Option<u32>,
        callback: Option<js_sys::Function>,
        overrides: JsValue,
    ) -> JsResult<MiniToastr> {
        let inner = self.inner.borrow();
        let Some(service) = inner.as_ref() else {
            return Ok(self.clone());
        };

        let mut request = NotificationRequest::new(severity.as_deref().unwrap_or_default());
        if let Some(message) = message {
            request = request.message(message);
        }
        if let Some(title) = title {
            request = request.title(title);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(Duration::from_millis(u64::from(timeout)));
        }
        if let Some(callback) = callback {
            request = request.on_complete(move || {
                if let Err(err) = callback.call0(&JsValue::NULL) {
                    log::error!("notification callback threw: {err:?}");
                }
            });
        }
        if let Some(json) = stringify(&overrides)? {
            request = request.overrides(ConfigOverride::from_json(&json).map_err(to_js)?);
        }
        if let Some(container) = node_field(&overrides, "node")? {
            request = request.container(container);
        }
        if let Some(animation) = animation_field(&overrides)? {
            request = request.animation(animation);
        }

        service.show_message(request).map_err(to_js)?;
        Ok(self.clone())
    }

    /// Show an error notification
    pub fn error(
        &self,
        message: Option<String>,
        title: Option<String>,
        timeout: Option<u32>,
        callback: Option<js_sys::Function>,
    ) -> JsResult<MiniToastr> {
        self.typed(Severity::Error, message, title, timeout, callback)
    }

    /// Show a warning notification
    pub fn warn(
        &self,
        message: Option<String>,
        title: Option<String>,
        timeout: Option<u32>,
        callback: Option<js_sys::Function>,
    ) -> JsResult<MiniToastr> {
        self.typed(Severity::Warn, message, title, timeout, callback)
    }

    /// Show a success notification
    pub fn success(
        &self,
        message: Option<String>,
        title: Option<String>,
        timeout: Option<u32>,
        callback: Option<js_sys::Function>,
    ) -> JsResult<MiniToastr> {
        self.typed(Severity::Success, message, title, timeout, callback)
    }

    /// Show an info notification
    pub fn info(
        &self,
        message: Option<String>,
        title: Option<String>,
        timeout: Option<u32>,
        callback: Option<js_sys::Function>,
    ) -> JsResult<MiniToastr> {
        self.typed(Severity::Info, message, title, timeout, callback)
    }

    /// Register the icon shown for a severity
    ///
    /// `nodeType` defaults to `i`. `attrs` is a plain object of string
    /// attributes for the inner element.
    #[wasm_bindgen(js_name = setIcon)]
    pub fn set_icon(
        &self,
        severity: &str,
        node_type: Option<String>,
        class_str: String,
        attrs: JsValue,
    ) -> JsResult<()> {
        let mut inner = self.inner.borrow_mut();
        let Some(service) = inner.as_mut() else {
            return Ok(());
        };
        let severity: Severity = severity.parse().map_err(to_js)?;

        let mut spec = IconSpec::new(class_str);
        if let Some(node_type) = node_type {
            spec = spec.node_type(node_type);
        }
        if let Some(json) = stringify(&attrs)? {
            let attrs: BTreeMap<String, String> = serde_json::from_str(&json)
                .map_err(|err| to_js(ToastError::config(err)))?;
            spec = attrs
                .into_iter()
                .fold(spec, |spec, (name, value)| spec.attr(name, value));
        }

        service.set_icon(severity, spec);
        Ok(())
    }
}

impl MiniToastr {
    fn typed(
        &self,
        severity: Severity,
        message: Option<String>,
        title: Option<String>,
        timeout: Option<u32>,
        callback: Option<js_sys::Function>,
    ) -> JsResult<Self> {
        self.show_message(
            message,
            title,
            Some(severity.tag().to_string()),
            timeout,
            callback,
            JsValue::UNDEFINED,
        )
    }
}
