//! Host implementation over the live browser document

use std::cell::RefCell;
use std::time::Duration;

use toastr_core::host::{self, ClickHandler, Task, TimerHandle, Timers, MAX_DELAY};
use toastr_core::{Result, ToastError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, Window};

/// Convert a thrown JS value into a host error
pub(crate) fn js_error(value: JsValue) -> ToastError {
    ToastError::host(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

fn element(node: &Node) -> Result<&Element> {
    node.dyn_ref::<Element>()
        .ok_or_else(|| ToastError::host("node is not an element"))
}

/// Click listener registered on a node, owned until the node is detached
struct Listener {
    node: Node,
    callback: Closure<dyn FnMut()>,
}

/// `window.document` plus `window.setTimeout`
pub struct WebHost {
    window: Window,
    document: web_sys::Document,
    listeners: RefCell<Vec<Listener>>,
}

impl WebHost {
    /// Bind to the global window, `None` outside a browser
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Number of click listeners still owned by the host
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Unregister and free the listeners of `root` and its descendants
    fn release_listeners(&self, root: &Node) {
        let released: Vec<Listener> = {
            let mut listeners = self.listeners.borrow_mut();
            let (released, kept) = listeners
                .drain(..)
                .partition(|listener| root.contains(Some(&listener.node)));
            *listeners = kept;
            released
        };
        if released.is_empty() {
            return;
        }

        for listener in &released {
            let callback = listener.callback.as_ref().unchecked_ref();
            if let Err(err) = listener
                .node
                .remove_event_listener_with_callback("click", callback)
            {
                log::warn!("failed to remove click listener: {err:?}");
            }
        }

        // The detaching code may be running inside one of these callbacks
        let free = Closure::once_into_js(move || drop(released));
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(free.unchecked_ref(), 0)
        {
            log::warn!("failed to schedule listener cleanup: {err:?}");
        }
    }
}

impl host::Document for WebHost {
    type Node = Node;

    fn create_element(&self, tag: &str) -> Result<Node> {
        self.document
            .create_element(tag)
            .map(Node::from)
            .map_err(js_error)
    }

    fn create_text_node(&self, text: &str) -> Result<Node> {
        Ok(self.document.create_text_node(text).into())
    }

    fn head(&self) -> Result<Node> {
        self.document
            .head()
            .map(Node::from)
            .ok_or_else(|| ToastError::host("document has no head"))
    }

    fn body(&self) -> Result<Node> {
        self.document
            .body()
            .map(Node::from)
            .ok_or_else(|| ToastError::host("document has no body"))
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from)
    }

    fn set_id(&self, node: &Node, id: &str) -> Result<()> {
        element(node)?.set_id(id);
        Ok(())
    }

    fn set_class_name(&self, node: &Node, class_name: &str) -> Result<()> {
        element(node)?.set_class_name(class_name);
        Ok(())
    }

    fn set_attribute(&self, node: &Node, name: &str, value: &str) -> Result<()> {
        element(node)?.set_attribute(name, value).map_err(js_error)
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<()> {
        parent.append_child(child).map(drop).map_err(js_error)
    }

    fn prepend_child(&self, parent: &Node, child: &Node) -> Result<()> {
        parent
            .insert_before(child, parent.first_child().as_ref())
            .map(drop)
            .map_err(js_error)
    }

    fn has_parent(&self, node: &Node) -> bool {
        node.parent_node().is_some()
    }

    fn detach(&self, node: &Node) -> Result<()> {
        if let Some(parent) = node.parent_node() {
            parent.remove_child(node).map_err(js_error)?;
        }
        self.release_listeners(node);
        Ok(())
    }

    fn opacity(&self, node: &Node) -> Option<f64> {
        node.dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value("opacity")
            .ok()?
            .parse()
            .ok()
    }

    fn set_opacity(&self, node: &Node, opacity: f64) -> Result<()> {
        node.dyn_ref::<HtmlElement>()
            .ok_or_else(|| ToastError::host("node is not an html element"))?
            .style()
            .set_property("opacity", &opacity.to_string())
            .map_err(js_error)
    }

    fn on_click(&self, node: &Node, handler: ClickHandler) -> Result<()> {
        let callback = Closure::wrap(handler);
        node.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.listeners.borrow_mut().push(Listener {
            node: node.clone(),
            callback,
        });
        Ok(())
    }
}

impl Timers for WebHost {
    fn schedule_after(&self, delay: Duration, task: Task) -> Result<TimerHandle> {
        if delay > MAX_DELAY {
            return Err(ToastError::host(format!(
                "delay of {delay:?} exceeds the timer limit"
            )));
        }
        let millis = i32::try_from(delay.as_millis())
            .map_err(|_| ToastError::host(format!("timeout {delay:?} out of range")))?;
        let callback = Closure::once_into_js(move || task());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map(TimerHandle)
            .map_err(js_error)
    }
}
