//! In-memory host with a manual clock
//!
//! `MemoryHost` keeps an arena of nodes (a document with `head` and `body`)
//! and a queue of timer tasks that only run when [`MemoryHost::advance`] moves
//! the clock. It backs headless embedders and the test suite.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use super::{ClickHandler, Document, Task, TimerHandle, Timers, MAX_DELAY};
use crate::utils::{Result, ToastError};

/// Index of a node in a [`MemoryHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Default)]
struct NodeData {
    /// `None` for text nodes
    tag: Option<String>,
    text: String,
    id: Option<String>,
    class_name: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    opacity: Option<f64>,
    click_handlers: Vec<ClickHandler>,
}

struct PendingTask {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

/// Headless document and timer service
pub struct MemoryHost {
    nodes: RefCell<Vec<NodeData>>,
    head: NodeId,
    body: NodeId,
    now: Cell<Duration>,
    seq: Cell<u64>,
    pending: RefCell<Vec<PendingTask>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a document containing an empty `head` and `body`
    #[must_use]
    pub fn new() -> Self {
        let element = |tag: &str| NodeData {
            tag: Some(tag.to_string()),
            ..NodeData::default()
        };
        Self {
            nodes: RefCell::new(vec![element("head"), element("body")]),
            head: NodeId(0),
            body: NodeId(1),
            now: Cell::new(Duration::ZERO),
            seq: Cell::new(0),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Current clock value
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks waiting for the clock
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Due time of the earliest pending task
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.borrow().iter().map(|task| task.due).min()
    }

    /// Move the clock forward by `by`, running every task that falls due
    ///
    /// Tasks run in due order (ties in scheduling order). A task scheduled by
    /// another task runs in the same call if it falls due within the window.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            self.now.set(task.due);
            (task.task)();
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Run tasks until the queue is empty or `limit` tasks have run
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut ran = 0;
        while ran < limit {
            let Some(due) = self.next_due() else { break };
            let Some(task) = self.pop_due(due) else { break };
            self.now.set(task.due);
            (task.task)();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<PendingTask> {
        let mut pending = self.pending.borrow_mut();
        let slot = pending
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= target)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(slot, _)| slot)?;
        Some(pending.remove(slot))
    }

    /// Invoke the click handlers registered on `node`
    pub fn click(&self, node: NodeId) {
        let mut handlers = std::mem::take(&mut self.nodes.borrow_mut()[node.0].click_handlers);
        for handler in &mut handlers {
            handler();
        }
        let mut nodes = self.nodes.borrow_mut();
        let slot = &mut nodes[node.0].click_handlers;
        handlers.append(slot);
        *slot = handlers;
    }

    /// Children of `node` in document order
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    /// Parent of `node`
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    /// Tag name of an element, `None` for text nodes
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow()[node.0].tag.clone()
    }

    /// Element id
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow()[node.0].id.clone()
    }

    /// Element class list as a single string
    #[must_use]
    pub fn class_name(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].class_name.clone()
    }

    /// Whether the class list of `node` contains `class`
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0]
            .class_name
            .split_whitespace()
            .any(|name| name == class)
    }

    /// Attribute value
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0]
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    /// Concatenated text of the node and its descendants
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut text = String::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let data = &nodes[current.0];
            if data.tag.is_none() {
                text.push_str(&data.text);
            }
            stack.extend(data.children.iter().rev());
        }
        text
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if node.0 < self.nodes.borrow().len() {
            Ok(())
        } else {
            Err(ToastError::host(format!("unknown node {}", node.0)))
        }
    }

    fn check_element(&self, node: NodeId) -> Result<()> {
        self.check(node)?;
        if self.nodes.borrow()[node.0].tag.is_some() {
            Ok(())
        } else {
            Err(ToastError::host(format!("node {} is not an element", node.0)))
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    fn insert(&self, parent: NodeId, child: NodeId, at_front: bool) -> Result<()> {
        self.check_element(parent)?;
        self.check(child)?;
        if self.is_ancestor(child, parent) {
            return Err(ToastError::host("cannot insert a node into its own subtree"));
        }
        self.detach(&child)?;

        let mut nodes = self.nodes.borrow_mut();
        if at_front {
            nodes[parent.0].children.insert(0, child);
        } else {
            nodes[parent.0].children.push(child);
        }
        nodes[child.0].parent = Some(parent);
        Ok(())
    }

    fn push_node(&self, data: NodeData) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(data);
        NodeId(nodes.len() - 1)
    }
}

impl Document for MemoryHost {
    type Node = NodeId;

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        Ok(self.push_node(NodeData {
            tag: Some(tag.to_string()),
            ..NodeData::default()
        }))
    }

    fn create_text_node(&self, text: &str) -> Result<NodeId> {
        Ok(self.push_node(NodeData {
            text: text.to_string(),
            ..NodeData::default()
        }))
    }

    fn head(&self) -> Result<NodeId> {
        Ok(self.head)
    }

    fn body(&self) -> Result<NodeId> {
        Ok(self.body)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        // Only nodes reachable from the document count as mounted
        [self.head, self.body].into_iter().find_map(|root| {
            let nodes = self.nodes.borrow();
            let mut stack = vec![root];
            while let Some(current) = stack.pop() {
                if nodes[current.0].id.as_deref() == Some(id) {
                    return Some(current);
                }
                stack.extend(nodes[current.0].children.iter().rev());
            }
            None
        })
    }

    fn set_id(&self, node: &NodeId, id: &str) -> Result<()> {
        self.check_element(*node)?;
        self.nodes.borrow_mut()[node.0].id = Some(id.to_string());
        Ok(())
    }

    fn set_class_name(&self, node: &NodeId, class_name: &str) -> Result<()> {
        self.check_element(*node)?;
        self.nodes.borrow_mut()[node.0].class_name = class_name.to_string();
        Ok(())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        self.check_element(*node)?;
        let mut nodes = self.nodes.borrow_mut();
        let attributes = &mut nodes[node.0].attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.insert(*parent, *child, false)
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.insert(*parent, *child, true)
    }

    fn has_parent(&self, node: &NodeId) -> bool {
        self.nodes
            .borrow()
            .get(node.0)
            .is_some_and(|data| data.parent.is_some())
    }

    fn detach(&self, node: &NodeId) -> Result<()> {
        self.check(*node)?;
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|child| child != node);
        }
        Ok(())
    }

    fn opacity(&self, node: &NodeId) -> Option<f64> {
        self.nodes.borrow().get(node.0).and_then(|data| data.opacity)
    }

    fn set_opacity(&self, node: &NodeId, opacity: f64) -> Result<()> {
        self.check_element(*node)?;
        self.nodes.borrow_mut()[node.0].opacity = Some(opacity);
        Ok(())
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler) -> Result<()> {
        self.check_element(*node)?;
        self.nodes.borrow_mut()[node.0].click_handlers.push(handler);
        Ok(())
    }
}

impl Timers for MemoryHost {
    fn schedule_after(&self, delay: Duration, task: Task) -> Result<TimerHandle> {
        if delay > MAX_DELAY {
            return Err(ToastError::host(format!(
                "delay of {delay:?} exceeds the timer limit"
            )));
        }
        let seq = self.seq.get() + 1;
        self.seq.set(seq);
        let handle = TimerHandle(
            i32::try_from(seq).map_err(|_| ToastError::host("timer handles exhausted"))?,
        );
        self.pending.borrow_mut().push(PendingTask {
            due: self.now.get() + delay,
            seq,
            handle,
            task,
        });
        Ok(handle)
    }
}

impl MemoryHost {
    /// Handles of the tasks still waiting, in scheduling order
    #[must_use]
    pub fn pending_handles(&self) -> Vec<TimerHandle> {
        let pending = self.pending.borrow();
        let mut handles: Vec<_> = pending.iter().map(|task| (task.seq, task.handle)).collect();
        handles.sort_by_key(|(seq, _)| *seq);
        handles.into_iter().map(|(_, handle)| handle).collect()
    }
}
