//! Nodes: instances of a node type holding current parameter values

use crate::error::{Error, Result};
use crate::graphics::{Canvas, Color, Group, Image};
use crate::kind::CoreKind;
use crate::lock;
use crate::name;
use crate::network::{Network, NetworkInner};
use crate::node_type::{NodeType, TypeShared};
use crate::parameter::ParameterDef;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard, Weak};
use ulid::Ulid;

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Ulid);

impl NodeId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct NodeInner {
    id: NodeId,
    node_type: Arc<TypeShared>,
    name: RwLock<String>,
    values: RwLock<HashMap<String, Value>>,
    network: RwLock<Option<Weak<NetworkInner>>>,
}

impl NodeInner {
    /// Clamp the stored value for `def`, returning whether it changed
    pub(crate) fn clamp_value(&self, def: &ParameterDef) -> bool {
        let mut values = lock::write(&self.values);
        let Some(current) = values.get_mut(&def.name) else {
            return false;
        };
        let clamped = def.clamp(current.clone());
        if clamped == *current {
            return false;
        }
        tracing::trace!(node = %self.id, parameter = %def.name, from = %current, to = %clamped, "value clamped");
        *current = clamped;
        true
    }

    pub(crate) fn insert_default(&self, def: &ParameterDef) {
        lock::write(&self.values)
            .entry(def.name.clone())
            .or_insert_with(|| def.default_value());
    }
}

/// Instance of a node type.
///
/// `Node` is a handle: clones refer to the same node. Assignments are checked
/// by the owning parameter type, so stored values match the parameter's kind
/// and, under hard bounding, its range.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

impl Node {
    pub(crate) fn new(node_type: Arc<TypeShared>, values: HashMap<String, Value>) -> Self {
        let name = node_type.name.clone();
        Self {
            inner: Arc::new(NodeInner {
                id: NodeId::new(),
                node_type,
                name: RwLock::new(name),
                values: RwLock::new(values),
                network: RwLock::new(None),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<NodeInner> {
        Arc::downgrade(&self.inner)
    }

    pub fn id(&self) -> &NodeId {
        &self.inner.id
    }

    pub fn name(&self) -> String {
        lock::read(&self.inner.name).clone()
    }

    /// Rename the node. Names must stay unique within the enclosing network.
    pub fn set_name(&self, name: &str) -> Result<()> {
        name::validate(name)?;
        loop {
            if let Some(network) = self.network() {
                if network.rename_child(self, name)? {
                    return Ok(());
                }
                // removed from the network in the meantime
                continue;
            }
            let slot = lock::write(&self.inner.network);
            if slot.as_ref().and_then(Weak::upgrade).is_some() {
                continue;
            }
            self.rename(name);
            return Ok(());
        }
    }

    /// Overwrite the name without any checks
    pub(crate) fn rename(&self, name: &str) {
        *lock::write(&self.inner.name) = name.to_string();
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::from_shared(self.inner.node_type.clone())
    }

    /// Network this node has been added to, if any
    pub fn network(&self) -> Option<Network> {
        lock::read(&self.inner.network)
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Network::from_inner)
    }

    /// Write access to the enclosing-network slot. Held across the
    /// membership check and the attach so both happen atomically.
    pub(crate) fn network_slot(&self) -> RwLockWriteGuard<'_, Option<Weak<NetworkInner>>> {
        lock::write(&self.inner.network)
    }

    pub(crate) fn detach(&self) {
        *lock::write(&self.inner.network) = None;
    }

    fn unknown_parameter(&self, parameter: &str) -> Error {
        Error::UnknownParameter {
            node_type: self.inner.node_type.name.clone(),
            parameter: parameter.to_string(),
        }
    }

    /// Assign a parameter value.
    ///
    /// Values of the wrong kind, and numeric values outside a hard range,
    /// are rejected. Ints given to float parameters are stored as floats. On
    /// failure the stored value is left unchanged.
    pub fn set_value(&self, parameter: &str, value: impl Into<Value>) -> Result<()> {
        let state = lock::read(&self.inner.node_type.state);
        let def = state
            .parameter(parameter)
            .ok_or_else(|| self.unknown_parameter(parameter))?;
        let value = def.prepare(value.into())?;
        lock::write(&self.inner.values).insert(parameter.to_string(), value);
        Ok(())
    }

    /// Assign a parameter value, first pulling it into the hard range.
    ///
    /// Values of the wrong kind are rejected, as is NaN under hard bounding.
    pub fn set_value_clamped(&self, parameter: &str, value: impl Into<Value>) -> Result<()> {
        let state = lock::read(&self.inner.node_type.state);
        let def = state
            .parameter(parameter)
            .ok_or_else(|| self.unknown_parameter(parameter))?;
        let value = def.prepare_clamped(value.into())?;
        lock::write(&self.inner.values).insert(parameter.to_string(), value);
        Ok(())
    }

    /// Store a value without clamping or validation.
    ///
    /// Intended for loaders that restore previously validated state. The
    /// parameter must still exist on the node type.
    pub fn force_value(&self, parameter: &str, value: impl Into<Value>) -> Result<()> {
        let state = lock::read(&self.inner.node_type.state);
        if state.parameter(parameter).is_none() {
            return Err(self.unknown_parameter(parameter));
        }
        lock::write(&self.inner.values).insert(parameter.to_string(), value.into());
        Ok(())
    }

    /// Current value, or the parameter default if none is stored
    pub fn value(&self, parameter: &str) -> Result<Value> {
        let state = lock::read(&self.inner.node_type.state);
        let def = state
            .parameter(parameter)
            .ok_or_else(|| self.unknown_parameter(parameter))?;
        let values = lock::read(&self.inner.values);
        Ok(values
            .get(parameter)
            .cloned()
            .unwrap_or_else(|| def.default_value()))
    }

    /// Restore a parameter to its default value
    pub fn reset_value(&self, parameter: &str) -> Result<()> {
        let state = lock::read(&self.inner.node_type.state);
        let def = state
            .parameter(parameter)
            .ok_or_else(|| self.unknown_parameter(parameter))?;
        lock::write(&self.inner.values).insert(parameter.to_string(), def.default_value());
        Ok(())
    }

    /// All values in parameter registration order
    pub fn values(&self) -> Vec<(String, Value)> {
        let state = lock::read(&self.inner.node_type.state);
        let values = lock::read(&self.inner.values);
        state
            .parameters()
            .iter()
            .map(|def| {
                let value = values
                    .get(&def.name)
                    .cloned()
                    .unwrap_or_else(|| def.default_value());
                (def.name.clone(), value)
            })
            .collect()
    }

    fn typed<T>(
        &self,
        parameter: &str,
        expected: CoreKind,
        extract: impl FnOnce(Value) -> Option<T>,
    ) -> Result<T> {
        let value = self.value(parameter)?;
        let found = value.kind();
        extract(value).ok_or_else(|| Error::TypeMismatch {
            parameter: parameter.to_string(),
            expected,
            found,
        })
    }

    pub fn as_int(&self, parameter: &str) -> Result<i64> {
        self.typed(parameter, CoreKind::Int, |value| match value {
            Value::Int(v) => Some(v),
            _ => None,
        })
    }

    pub fn as_float(&self, parameter: &str) -> Result<f64> {
        self.typed(parameter, CoreKind::Float, |value| match value {
            Value::Float(v) => Some(v),
            _ => None,
        })
    }

    /// Int or float value as `f64`
    pub fn as_number(&self, parameter: &str) -> Result<f64> {
        self.typed(parameter, CoreKind::Float, |value| value.as_f64())
    }

    pub fn as_string(&self, parameter: &str) -> Result<String> {
        self.typed(parameter, CoreKind::String, |value| match value {
            Value::String(v) => Some(v),
            _ => None,
        })
    }

    pub fn as_color(&self, parameter: &str) -> Result<Color> {
        self.typed(parameter, CoreKind::Color, |value| match value {
            Value::Color(v) => Some(v),
            _ => None,
        })
    }

    pub fn as_canvas(&self, parameter: &str) -> Result<Canvas> {
        self.typed(parameter, CoreKind::Canvas, |value| match value {
            Value::Canvas(v) => Some(v),
            _ => None,
        })
    }

    pub fn as_group(&self, parameter: &str) -> Result<Group> {
        self.typed(parameter, CoreKind::VectorGroup, |value| match value {
            Value::Group(v) => Some(v),
            _ => None,
        })
    }

    pub fn as_image(&self, parameter: &str) -> Result<Image> {
        self.typed(parameter, CoreKind::Image, |value| match value {
            Value::Image(v) => Some(v),
            _ => None,
        })
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Node {}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.inner.id)
            .field("name", &*lock::read(&self.inner.name))
            .field("node_type", &self.inner.node_type.name)
            .finish()
    }
}
