//! Document context: the root network, the active network and node, and the
//! observers that want to hear when either changes

use crate::error::Result;
use crate::event::{SelectionEvent, SelectionObserver, SubscriptionId};
use crate::network::Network;
use crate::node::Node;
use std::sync::Arc;

pub struct Document {
    root: Network,
    active_network: Network,
    observers: Vec<(SubscriptionId, Arc<dyn SelectionObserver>)>,
}

impl Document {
    /// Create a document whose root network is also the active network
    pub fn new() -> Self {
        let root = Network::root();
        Self {
            active_network: root.clone(),
            root,
            observers: Vec::new(),
        }
    }

    pub fn root(&self) -> &Network {
        &self.root
    }

    pub fn active_network(&self) -> &Network {
        &self.active_network
    }

    pub fn active_node(&self) -> Option<Node> {
        self.active_network.active_node()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn SelectionObserver>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.observers.push((id.clone(), observer));
        tracing::trace!(subscription = %id, "selection observer added");
        id
    }

    pub fn unsubscribe(&mut self, id: &SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| existing != id);
        self.observers.len() != before
    }

    /// Switch the active network.
    ///
    /// Publishes [`SelectionEvent::NetworkChanged`], followed by
    /// [`SelectionEvent::NodeChanged`] when the new network's active node
    /// differs from the previous one.
    pub fn set_active_network(&mut self, network: Network) {
        if network == self.active_network {
            return;
        }
        let previous_node = self.active_node();
        self.active_network = network.clone();
        tracing::debug!(network = %network.name(), "active network changed");
        self.publish(&SelectionEvent::NetworkChanged(network));

        let node = self.active_node();
        if node != previous_node {
            self.publish(&SelectionEvent::NodeChanged(node));
        }
    }

    /// Select a node of the active network, or clear the selection.
    ///
    /// Publishes [`SelectionEvent::NodeChanged`] only if the selection
    /// actually changed.
    pub fn set_active_node(&mut self, node: Option<&Node>) -> Result<()> {
        let previous = self.active_node();
        match node {
            Some(node) => self.active_network.set_active_node(node)?,
            None => self.active_network.clear_active_node(),
        }
        let current = self.active_node();
        if current != previous {
            tracing::debug!(node = ?current.as_ref().map(Node::name), "active node changed");
            self.publish(&SelectionEvent::NodeChanged(current));
        }
        Ok(())
    }

    /// Remove a node from whichever network holds it.
    ///
    /// Publishes [`SelectionEvent::NodeChanged`] when the removed node was
    /// the active node of the active network. Returns `false` if the node was
    /// not in a network.
    pub fn remove_node(&mut self, node: &Node) -> bool {
        let Some(network) = node.network() else {
            return false;
        };
        let previous = self.active_node();
        let removed = network.remove_node(node);
        let current = self.active_node();
        if current != previous {
            tracing::debug!(node = %node.name(), "active node removed");
            self.publish(&SelectionEvent::NodeChanged(current));
        }
        removed
    }

    fn publish(&self, event: &SelectionEvent) {
        for (_, observer) in &self.observers {
            observer.on_event(event);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
