//! Networks: containers of uniquely named nodes with one active node

use crate::error::{Error, Result};
use crate::lock;
use crate::name;
use crate::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, Weak};
use ulid::Ulid;

/// Unique identifier for a network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(pub Ulid);

impl NetworkId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
struct NetworkState {
    children: Vec<Node>,
    active: Option<NodeId>,
}

pub(crate) struct NetworkInner {
    id: NetworkId,
    name: String,
    state: RwLock<NetworkState>,
}

/// A container of nodes.
///
/// `Network` is a handle: clones refer to the same network. Removing a node
/// only detaches it; callers that still hold the node keep it alive.
#[derive(Clone)]
pub struct Network {
    inner: Arc<NetworkInner>,
}

impl Network {
    /// Create an empty network
    pub fn new(name: &str) -> Result<Self> {
        name::validate(name)?;
        Ok(Self::unchecked(name))
    }

    /// The top-level network of a document, named with the reserved `root`
    pub(crate) fn root() -> Self {
        Self::unchecked("root")
    }

    fn unchecked(name: &str) -> Self {
        Self {
            inner: Arc::new(NetworkInner {
                id: NetworkId::new(),
                name: name.to_string(),
                state: RwLock::new(NetworkState::default()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<NetworkInner>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> &NetworkId {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Add a node as a child.
    ///
    /// Fails with [`Error::DuplicateName`] if a child already has the node's
    /// name, and with [`Error::NodeAttached`] if the node belongs to another
    /// network.
    pub fn add_node(&self, node: &Node) -> Result<()> {
        let mut state = lock::write(&self.inner.state);
        let mut slot = node.network_slot();
        if let Some(current) = slot.as_ref().and_then(Weak::upgrade) {
            if !Arc::ptr_eq(&current, &self.inner) {
                return Err(Error::NodeAttached {
                    node: node.name(),
                    network: current.name.clone(),
                });
            }
        }
        let node_name = node.name();
        if state.children.iter().any(|child| child.name() == node_name) {
            return Err(Error::DuplicateName {
                network: self.inner.name.clone(),
                name: node_name,
            });
        }
        *slot = Some(Arc::downgrade(&self.inner));
        drop(slot);
        state.children.push(node.clone());
        tracing::debug!(network = %self.inner.name, node = %node_name, "node added");
        Ok(())
    }

    /// Detach a node. Returns `false` if it was not a child.
    ///
    /// The active node is cleared if it was the removed node. This does not
    /// notify selection observers; use [`crate::Document::remove_node`] for
    /// nodes of a document.
    pub fn remove_node(&self, node: &Node) -> bool {
        let mut state = lock::write(&self.inner.state);
        let Some(pos) = state.children.iter().position(|child| child == node) else {
            return false;
        };
        let removed = state.children.remove(pos);
        if state.active.as_ref() == Some(removed.id()) {
            state.active = None;
        }
        removed.detach();
        tracing::debug!(network = %self.inner.name, node = %removed.name(), "node removed");
        true
    }

    /// Child with the given name
    pub fn node(&self, name: &str) -> Option<Node> {
        lock::read(&self.inner.state)
            .children
            .iter()
            .find(|child| child.name() == name)
            .cloned()
    }

    /// Children in insertion order
    pub fn nodes(&self) -> Vec<Node> {
        lock::read(&self.inner.state).children.clone()
    }

    pub fn contains(&self, node: &Node) -> bool {
        lock::read(&self.inner.state)
            .children
            .iter()
            .any(|child| child == node)
    }

    pub fn len(&self) -> usize {
        lock::read(&self.inner.state).children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rename a child, keeping child names unique. Returns `false` if `node`
    /// is no longer a child of this network.
    pub(crate) fn rename_child(&self, node: &Node, name: &str) -> Result<bool> {
        let state = lock::write(&self.inner.state);
        if !state.children.iter().any(|child| child == node) {
            return Ok(false);
        }
        if state
            .children
            .iter()
            .any(|child| child != node && child.name() == name)
        {
            return Err(Error::DuplicateName {
                network: self.inner.name.clone(),
                name: name.to_string(),
            });
        }
        node.rename(name);
        Ok(true)
    }

    /// `base` if no child uses it, otherwise `base` followed by the lowest
    /// free number (`rect1`, `rect2`, ...)
    pub fn unique_name(&self, base: &str) -> String {
        let state = lock::read(&self.inner.state);
        let names: Vec<String> = state.children.iter().map(Node::name).collect();
        if !names.iter().any(|n| n == base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{}{}", base, i))
            .find(|candidate| !names.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Make a child the active node. Only updates the reference; publishing
    /// selection changes is the job of [`crate::Document`].
    pub fn set_active_node(&self, node: &Node) -> Result<()> {
        let mut state = lock::write(&self.inner.state);
        if !state.children.iter().any(|child| child == node) {
            return Err(Error::NodeNotFound(node.name()));
        }
        state.active = Some(node.id().clone());
        Ok(())
    }

    pub fn clear_active_node(&self) {
        lock::write(&self.inner.state).active = None;
    }

    pub fn active_node(&self) -> Option<Node> {
        let state = lock::read(&self.inner.state);
        let active = state.active.as_ref()?;
        state.children.iter().find(|child| child.id() == active).cloned()
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Network {}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::DeclaredKind;
    use crate::node_type::NodeType;

    fn rect_type() -> NodeType {
        let nt = NodeType::new("rect").unwrap();
        nt.add_parameter_type("width", DeclaredKind::Float).unwrap();
        nt
    }

    #[test]
    fn test_network_name_rules() {
        assert!(Network::new("scene").is_ok());
        assert!(Network::new("network").is_err());
        assert_eq!(Network::root().name(), "root");
    }

    #[test]
    fn test_add_and_lookup() {
        let net = Network::new("scene").unwrap();
        let node = rect_type().create_node();
        net.add_node(&node).unwrap();

        assert_eq!(net.len(), 1);
        assert!(net.contains(&node));
        assert_eq!(net.node("rect"), Some(node.clone()));
        assert_eq!(node.network(), Some(net.clone()));
    }

    #[test]
    fn test_duplicate_name() {
        let net = Network::new("scene").unwrap();
        let nt = rect_type();
        let a = nt.create_node();
        let b = nt.create_node();
        net.add_node(&a).unwrap();

        assert_eq!(
            net.add_node(&b),
            Err(Error::DuplicateName {
                network: "scene".into(),
                name: "rect".into()
            })
        );
        assert!(net.add_node(&a).is_err());

        b.set_name(&net.unique_name("rect")).unwrap();
        assert_eq!(b.name(), "rect1");
        net.add_node(&b).unwrap();
        assert_eq!(net.unique_name("rect"), "rect2");
        assert_eq!(net.unique_name("oval"), "oval");
    }

    #[test]
    fn test_rename_inside_network() {
        let net = Network::new("scene").unwrap();
        let nt = rect_type();
        let a = nt.create_node();
        let b = nt.create_node();
        b.set_name("other").unwrap();
        net.add_node(&a).unwrap();
        net.add_node(&b).unwrap();

        assert!(matches!(b.set_name("rect"), Err(Error::DuplicateName { .. })));
        assert!(a.set_name("rect").is_ok());
    }

    #[test]
    fn test_node_belongs_to_one_network() {
        let first = Network::new("first").unwrap();
        let second = Network::new("second").unwrap();
        let node = rect_type().create_node();
        first.add_node(&node).unwrap();

        assert!(matches!(second.add_node(&node), Err(Error::NodeAttached { .. })));
        assert!(first.remove_node(&node));
        second.add_node(&node).unwrap();
    }

    #[test]
    fn test_remove_keeps_node_alive() {
        let net = Network::new("scene").unwrap();
        let node = rect_type().create_node();
        net.add_node(&node).unwrap();
        net.set_active_node(&node).unwrap();

        assert!(net.remove_node(&node));
        assert!(!net.remove_node(&node));
        assert!(net.active_node().is_none());
        assert!(node.network().is_none());

        node.set_value("width", 4.0).unwrap();
        assert_eq!(node.as_float("width").unwrap(), 4.0);
    }

    #[test]
    fn test_active_node() {
        let net = Network::new("scene").unwrap();
        let nt = rect_type();
        let inside = nt.create_node();
        let outside = nt.create_node();
        net.add_node(&inside).unwrap();

        assert!(net.active_node().is_none());
        net.set_active_node(&inside).unwrap();
        assert_eq!(net.active_node(), Some(inside));
        assert!(matches!(
            net.set_active_node(&outside),
            Err(Error::NodeNotFound(_))
        ));

        net.clear_active_node();
        assert!(net.active_node().is_none());
    }

    #[test]
    fn test_concurrent_add_attaches_once() {
        let nt = rect_type();
        for _ in 0..200 {
            let first = Network::new("first").unwrap();
            let second = Network::new("second").unwrap();
            let node = nt.create_node();

            let results: Vec<bool> = std::thread::scope(|s| {
                let a = s.spawn(|| first.add_node(&node).is_ok());
                let b = s.spawn(|| second.add_node(&node).is_ok());
                vec![a.join().unwrap(), b.join().unwrap()]
            });

            assert_eq!(results.iter().filter(|ok| **ok).count(), 1);
            assert_eq!(first.len() + second.len(), 1);
        }
    }

    #[test]
    fn test_concurrent_renames_stay_unique() {
        let nt = rect_type();
        for _ in 0..200 {
            let net = Network::new("scene").unwrap();
            let a = nt.create_node();
            let b = nt.create_node();
            b.set_name("other").unwrap();
            net.add_node(&a).unwrap();
            net.add_node(&b).unwrap();

            std::thread::scope(|s| {
                s.spawn(|| {
                    let _ = a.set_name("shared");
                });
                s.spawn(|| {
                    let _ = b.set_name("shared");
                });
            });

            assert_ne!(a.name(), b.name());
        }
    }
}
