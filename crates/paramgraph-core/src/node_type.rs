//! Node types: named, ordered sets of parameter types that nodes are built from

use crate::error::Result;
use crate::kind::DeclaredKind;
use crate::lock;
use crate::name::{self, InvalidName};
use crate::node::{Node, NodeInner};
use crate::parameter::{ParameterDef, ParameterType};
use std::sync::{Arc, RwLock, Weak};

/// Parameter definitions of one node type plus the nodes built from it.
///
/// All parameter state of a node type sits behind one lock. Code that also
/// needs a node's values takes this lock first.
#[derive(Debug, Default)]
pub(crate) struct TypeState {
    parameters: Vec<ParameterDef>,
    instances: Vec<Weak<NodeInner>>,
}

impl TypeState {
    pub(crate) fn parameter(&self, name: &str) -> Option<&ParameterDef> {
        self.parameters.iter().find(|def| def.name == name)
    }

    pub(crate) fn parameter_mut(&mut self, name: &str) -> Option<&mut ParameterDef> {
        self.parameters.iter_mut().find(|def| def.name == name)
    }

    pub(crate) fn parameters(&self) -> &[ParameterDef] {
        &self.parameters
    }

    fn live_instances(&mut self) -> Vec<Arc<NodeInner>> {
        self.instances.retain(|node| node.strong_count() > 0);
        self.instances.iter().filter_map(Weak::upgrade).collect()
    }

    /// Re-apply a parameter's hard range to every live node
    pub(crate) fn clamp_instances(&mut self, name: &str) {
        self.instances.retain(|node| node.strong_count() > 0);
        let Some(def) = self.parameters.iter().find(|def| def.name == name) else {
            return;
        };
        let clamped = self
            .instances
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|node| node.clamp_value(def))
            .count();
        tracing::debug!(parameter = %name, clamped, "clamped existing node values");
    }
}

pub(crate) struct TypeShared {
    pub(crate) name: String,
    pub(crate) state: RwLock<TypeState>,
}

/// Reusable blueprint of named, typed parameters.
///
/// Nodes created from a node type share its parameter types: changing a
/// parameter's bounding policy affects every node of the type. `clone`
/// produces a fully independent node type with no nodes of its own.
pub struct NodeType {
    shared: Arc<TypeShared>,
}

impl NodeType {
    /// Create an empty node type
    pub fn new(name: &str) -> Result<Self> {
        name::validate(name)?;
        Ok(Self::from_shared(Arc::new(TypeShared {
            name: name.to_string(),
            state: RwLock::new(TypeState::default()),
        })))
    }

    pub(crate) fn from_shared(shared: Arc<TypeShared>) -> Self {
        Self { shared }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Register a parameter type.
    ///
    /// Nodes already created from this type receive the parameter's default.
    pub fn add_parameter_type(&self, name: &str, kind: DeclaredKind) -> Result<ParameterType> {
        name::validate(name)?;
        let mut state = lock::write(&self.shared.state);
        if state.parameter(name).is_some() {
            return Err(InvalidName::Duplicate(name.to_string()).into());
        }
        let def = ParameterDef::new(name, kind);
        for node in state.live_instances() {
            node.insert_default(&def);
        }
        state.parameters.push(def);
        tracing::debug!(node_type = %self.shared.name, parameter = %name, %kind, "parameter registered");
        Ok(ParameterType::new(self.shared.clone(), name))
    }

    pub fn parameter_type(&self, name: &str) -> Option<ParameterType> {
        let state = lock::read(&self.shared.state);
        state
            .parameter(name)
            .map(|def| ParameterType::new(self.shared.clone(), def.name.clone()))
    }

    /// Parameter types in registration order
    pub fn parameter_types(&self) -> Vec<ParameterType> {
        let state = lock::read(&self.shared.state);
        state
            .parameters
            .iter()
            .map(|def| ParameterType::new(self.shared.clone(), def.name.clone()))
            .collect()
    }

    pub fn has_parameter_type(&self, name: &str) -> bool {
        lock::read(&self.shared.state).parameter(name).is_some()
    }

    pub fn parameter_count(&self) -> usize {
        lock::read(&self.shared.state).parameters.len()
    }

    /// Create a node with every parameter at its default value
    pub fn create_node(&self) -> Node {
        let mut state = lock::write(&self.shared.state);
        let values = state
            .parameters
            .iter()
            .map(|def| (def.name.clone(), def.default_value()))
            .collect();
        let node = Node::new(self.shared.clone(), values);
        state.instances.retain(|node| node.strong_count() > 0);
        state.instances.push(node.downgrade());
        tracing::trace!(node_type = %self.shared.name, node = %node.id(), "node created");
        node
    }

    /// Number of live nodes built from this type
    pub fn node_count(&self) -> usize {
        lock::write(&self.shared.state).live_instances().len()
    }
}

impl Clone for NodeType {
    fn clone(&self) -> Self {
        let parameters = lock::read(&self.shared.state).parameters.clone();
        Self::from_shared(Arc::new(TypeShared {
            name: self.shared.name.clone(),
            state: RwLock::new(TypeState {
                parameters,
                instances: Vec::new(),
            }),
        }))
    }
}

impl PartialEq for NodeType {
    /// Two handles are equal when they refer to the same node type
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl std::fmt::Debug for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock::read(&self.shared.state);
        f.debug_struct("NodeType")
            .field("name", &self.shared.name)
            .field(
                "parameters",
                &state.parameters.iter().map(|def| &def.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
