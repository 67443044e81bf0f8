//! Paramgraph Core - Typed parameters for node-based graphs
//!
//! This crate provides node types built from strongly typed parameter types,
//! the nodes instantiated from them, and the networks and document context
//! that hold those nodes. Every value assigned to a node is validated and,
//! under hard bounding, clamped by the parameter type it belongs to.

pub mod document;
pub mod error;
pub mod event;
pub mod graphics;
pub mod kind;
mod lock;
pub mod name;
pub mod network;
pub mod node;
pub mod node_type;
pub mod parameter;
pub mod value;

pub use document::Document;
pub use error::{Error, Result, ValueError};
pub use event::{SelectionEvent, SelectionObserver, SubscriptionId};
pub use graphics::{Canvas, Color, Group, Image};
pub use kind::{BoundingMethod, CoreKind, DeclaredKind};
pub use name::InvalidName;
pub use network::{Network, NetworkId};
pub use node::{Node, NodeId};
pub use node_type::NodeType;
pub use parameter::ParameterType;
pub use value::Value;
