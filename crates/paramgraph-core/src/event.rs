//! Selection change notifications for presentation layers

use crate::network::Network;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Change of the active node or active network
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The active node changed; `None` when nothing is selected
    NodeChanged(Option<Node>),
    /// The active network changed
    NetworkChanged(Network),
}

/// Receiver of selection changes.
///
/// Implementors usually override one or both of the typed callbacks and
/// leave [`SelectionObserver::on_event`] to dispatch.
pub trait SelectionObserver: Send + Sync {
    fn active_node_changed(&self, _node: Option<&Node>) {}

    fn active_network_changed(&self, _network: &Network) {}

    fn on_event(&self, event: &SelectionEvent) {
        match event {
            SelectionEvent::NodeChanged(node) => self.active_node_changed(node.as_ref()),
            SelectionEvent::NetworkChanged(network) => self.active_network_changed(network),
        }
    }
}

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Ulid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
