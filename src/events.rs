//! Native pointer listeners with scoped acquisition.
//!
//! The Scene Host forwards raw pointer-down events for an element through
//! [`PointerListeners::dispatch`]. Components subscribe when they are created
//! and hold a [`ListenerGuard`]; dropping the guard unsubscribes.
//!
//! # Example
//!
//! ```ignore
//! let listeners = PointerListeners::new();
//! let guard = listeners.subscribe(ElementId::Node("A".into()), |event| {
//!     println!("down at {}, {}", event.x, event.y);
//! });
//! listeners.dispatch(&ElementId::Node("A".into()), &PointerEvent::at(1.0, 2.0));
//! drop(guard); // listener released
//! ```

use crate::geometry::Point;
use crate::model::NodeKey;
use slint::SharedString;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Button mask bit for the primary (left) button.
pub const PRIMARY_BUTTON: u8 = 1;

/// Element a native listener can be attached to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Root element of a node glyph
    Node(NodeKey),
    /// Invisible hit-area path of an edge, keyed by its element id
    EdgeOverlay(SharedString),
}

/// Low-level pointer event as captured by the rendering surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    /// Bitmask of held buttons ([`PRIMARY_BUTTON`] = 1)
    pub buttons: u8,
    pub shift: bool,
    /// Node the pointer moved into, for leave events
    pub related_node: Option<NodeKey>,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_buttons(mut self, buttons: u8) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_related_node(mut self, node: impl Into<NodeKey>) -> Self {
        self.related_node = Some(node.into());
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn primary_held(&self) -> bool {
        self.buttons & PRIMARY_BUTTON != 0
    }
}

type Handler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    handlers: HashMap<ElementId, Vec<(u64, Handler)>>,
}

/// Registry of native pointer-down listeners, keyed by element.
///
/// Clone this to share it between the editor and the Scene Host.
#[derive(Clone, Default)]
pub struct PointerListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener to an element. The listener lives as long as the guard.
    #[must_use = "dropping the guard immediately detaches the listener"]
    pub fn subscribe<F>(&self, element: ElementId, handler: F) -> ListenerGuard
    where
        F: Fn(&PointerEvent) + 'static,
    {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let id = table.next_id;
        table
            .handlers
            .entry(element.clone())
            .or_default()
            .push((id, Rc::new(handler)));

        ListenerGuard {
            table: Rc::downgrade(&self.table),
            element,
            id,
        }
    }

    /// Deliver an event to every listener on `element`.
    ///
    /// Returns `false` when nothing is listening (e.g. the element was
    /// unmounted between passes).
    pub fn dispatch(&self, element: &ElementId, event: &PointerEvent) -> bool {
        // Handlers may drop guards or subscribe again, so release the table first
        let handlers: Vec<Handler> = match self.table.borrow().handlers.get(element) {
            Some(list) => list.iter().map(|(_, h)| h.clone()).collect(),
            None => Vec::new(),
        };

        tracing::trace!(?element, listeners = handlers.len(), "dispatch pointer event");

        for handler in &handlers {
            handler(event);
        }
        !handlers.is_empty()
    }

    /// Number of listeners attached to `element`.
    pub fn listener_count(&self, element: &ElementId) -> usize {
        self.table
            .borrow()
            .handlers
            .get(element)
            .map_or(0, |list| list.len())
    }

    /// Total number of attached listeners.
    pub fn len(&self) -> usize {
        self.table.borrow().handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a listener attached; detaches it on drop.
pub struct ListenerGuard {
    table: Weak<RefCell<ListenerTable>>,
    element: ElementId,
    id: u64,
}

impl ListenerGuard {
    pub fn element(&self) -> &ElementId {
        &self.element
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let mut table = table.borrow_mut();
        if let Some(list) = table.handlers.get_mut(&self.element) {
            list.retain(|(id, _)| *id != self.id);
            if list.is_empty() {
                table.handlers.remove(&self.element);
            }
        }
    }
}
