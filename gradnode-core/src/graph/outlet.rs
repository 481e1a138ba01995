use crate::types::NodeId;

/// Back-reference from a producer to the single consumer of its value.
///
/// `target` is the consuming node and `slot` the index of this producer in
/// the consumer's input list, which is also the index of the gradient the
/// consumer computes for it. An unconnected outlet marks the graph root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outlet {
    target: Option<NodeId>,
    slot: usize,
}

impl Outlet {
    /// The consuming node, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Input slot of the consumer fed by this outlet. Meaningless while unconnected.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    /// Connects the outlet. Callers check `is_connected` first; an outlet is
    /// connected once per graph and never rewired.
    pub(crate) fn connect(&mut self, target: NodeId, slot: usize) {
        debug_assert!(self.target.is_none(), "outlet connected twice");
        self.target = Some(target);
        self.slot = slot;
    }
}
