//! Parameter types: declared kind, default, range and bounding policy

use crate::error::{Error, Result, ValueError};
use crate::kind::{BoundingMethod, CoreKind, DeclaredKind};
use crate::lock;
use crate::name;
use crate::node_type::{NodeType, TypeShared};
use crate::value::Value;
use std::sync::Arc;

/// Stored definition of a parameter, owned by its node type's state
#[derive(Debug, Clone)]
pub(crate) struct ParameterDef {
    pub(crate) name: String,
    pub(crate) declared_kind: DeclaredKind,
    pub(crate) bounding_method: BoundingMethod,
    pub(crate) minimum_value: Option<f64>,
    pub(crate) maximum_value: Option<f64>,
    pub(crate) label: String,
    pub(crate) description: Option<String>,
}

impl ParameterDef {
    pub(crate) fn new(name: &str, declared_kind: DeclaredKind) -> Self {
        Self {
            name: name.to_string(),
            declared_kind,
            bounding_method: BoundingMethod::None,
            minimum_value: None,
            maximum_value: None,
            label: name::display_label(name),
            description: None,
        }
    }

    pub(crate) fn core_kind(&self) -> CoreKind {
        self.declared_kind.core_kind()
    }

    pub(crate) fn default_value(&self) -> Value {
        self.core_kind().default_value()
    }

    pub(crate) fn effective_bounding_method(&self) -> BoundingMethod {
        if self.declared_kind.fixed_range().is_some() {
            BoundingMethod::Hard
        } else {
            self.bounding_method
        }
    }

    /// Range values are clamped into, if the effective policy is hard
    pub(crate) fn hard_range(&self) -> Option<(f64, f64)> {
        if !self.core_kind().is_numeric() {
            return None;
        }
        if let Some(range) = self.declared_kind.fixed_range() {
            return Some(range);
        }
        match self.bounding_method {
            BoundingMethod::Hard => Some((
                self.minimum_value.unwrap_or(f64::NEG_INFINITY),
                self.maximum_value.unwrap_or(f64::INFINITY),
            )),
            BoundingMethod::Soft | BoundingMethod::None => None,
        }
    }

    /// Ints assigned to float parameters are stored as floats
    pub(crate) fn normalize(&self, value: Value) -> Value {
        match (self.core_kind(), value) {
            (CoreKind::Float, Value::Int(v)) => Value::Float(v as f64),
            (_, value) => value,
        }
    }

    pub(crate) fn clamp(&self, value: Value) -> Value {
        let Some((min, max)) = self.hard_range() else {
            return value;
        };
        match value {
            Value::Float(v) if v < min => Value::Float(min),
            Value::Float(v) if v > max => Value::Float(max),
            Value::Int(v) if (v as f64) < min => Value::Int(min.ceil() as i64),
            Value::Int(v) if (v as f64) > max => Value::Int(max.floor() as i64),
            other => other,
        }
    }

    pub(crate) fn validate(&self, value: &Value) -> std::result::Result<(), ValueError> {
        let expected = self.core_kind();
        let found = value.kind();
        let compatible =
            found == expected || (expected == CoreKind::Float && found == CoreKind::Int);
        if !compatible {
            return Err(ValueError::WrongKind {
                parameter: self.name.clone(),
                expected,
                found,
            });
        }
        if let (Some((min, max)), Some(v)) = (self.hard_range(), value.as_f64()) {
            if !(min..=max).contains(&v) {
                return Err(ValueError::OutOfRange {
                    parameter: self.name.clone(),
                    value: v,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Normalize and validate a value about to be stored
    pub(crate) fn prepare(&self, value: Value) -> std::result::Result<Value, ValueError> {
        let value = self.normalize(value);
        self.validate(&value)?;
        Ok(value)
    }

    /// Normalize, clamp and validate a value about to be stored
    pub(crate) fn prepare_clamped(&self, value: Value) -> std::result::Result<Value, ValueError> {
        let value = self.clamp(self.normalize(value));
        self.validate(&value)?;
        Ok(value)
    }

    fn check_range(&self, min: Option<f64>, max: Option<f64>) -> Result<()> {
        let invalid = |reason: String| Error::InvalidRange {
            parameter: self.name.clone(),
            reason,
        };
        if !self.core_kind().is_numeric() {
            return Err(invalid(format!("{} parameters have no range", self.core_kind())));
        }
        if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
            return Err(invalid("bounds cannot be NaN".to_string()));
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(invalid(format!("minimum {} exceeds maximum {}", min, max)));
            }
            if self.core_kind() == CoreKind::Int && min.ceil() > max.floor() {
                return Err(invalid(format!("no integer lies within [{}, {}]", min, max)));
            }
        }
        Ok(())
    }
}

/// Handle to a parameter registered on a node type.
///
/// The definition itself lives in the node type's shared state, so every
/// handle, every node built from the type, and the type itself observe the
/// same bounding policy and range. Cloning the handle does not copy the
/// parameter.
#[derive(Clone)]
pub struct ParameterType {
    owner: Arc<TypeShared>,
    name: String,
}

impl ParameterType {
    pub(crate) fn new(owner: Arc<TypeShared>, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }

    /// Register a new parameter on `owner`.
    ///
    /// Fails with [`Error::InvalidName`] if the name breaks the naming rules
    /// or is already used on this node type.
    pub fn register(owner: &NodeType, name: &str, declared_kind: DeclaredKind) -> Result<Self> {
        owner.add_parameter_type(name, declared_kind)
    }

    fn with_def<R>(&self, f: impl FnOnce(&ParameterDef) -> R) -> R {
        let state = lock::read(&self.owner.state);
        let def = state
            .parameter(&self.name)
            .expect("registered parameters are never removed");
        f(def)
    }

    fn with_def_mut<R>(&self, f: impl FnOnce(&mut ParameterDef) -> R) -> R {
        let mut state = lock::write(&self.owner.state);
        let def = state
            .parameter_mut(&self.name)
            .expect("registered parameters are never removed");
        f(def)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node type this parameter was registered on
    pub fn node_type(&self) -> NodeType {
        NodeType::from_shared(self.owner.clone())
    }

    pub fn declared_kind(&self) -> DeclaredKind {
        self.with_def(|def| def.declared_kind)
    }

    pub fn core_kind(&self) -> CoreKind {
        self.with_def(|def| def.core_kind())
    }

    pub fn default_value(&self) -> Value {
        self.with_def(|def| def.default_value())
    }

    /// Configured bounding method
    pub fn bounding_method(&self) -> BoundingMethod {
        self.with_def(|def| def.bounding_method)
    }

    /// Bounding method actually applied; toggles are always hard
    pub fn effective_bounding_method(&self) -> BoundingMethod {
        self.with_def(|def| def.effective_bounding_method())
    }

    pub fn minimum_value(&self) -> Option<f64> {
        self.with_def(|def| def.minimum_value)
    }

    pub fn maximum_value(&self) -> Option<f64> {
        self.with_def(|def| def.maximum_value)
    }

    pub fn label(&self) -> String {
        self.with_def(|def| def.label.clone())
    }

    pub fn set_label(&self, label: impl Into<String>) {
        let label = label.into();
        self.with_def_mut(|def| def.label = label);
    }

    pub fn description(&self) -> Option<String> {
        self.with_def(|def| def.description.clone())
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.with_def_mut(|def| def.description = Some(description));
    }

    /// Change the bounding policy.
    ///
    /// Switching to [`BoundingMethod::Hard`] immediately clamps this
    /// parameter's value on every live node of the owning type. Leaving hard
    /// bounding keeps values as they are.
    pub fn set_bounding_method(&self, method: BoundingMethod) {
        let mut state = lock::write(&self.owner.state);
        let Some(def) = state.parameter_mut(&self.name) else {
            return;
        };
        let previous = def.bounding_method;
        def.bounding_method = method;
        tracing::debug!(
            node_type = %self.owner.name,
            parameter = %self.name,
            %previous,
            %method,
            "bounding method changed"
        );
        if method == BoundingMethod::Hard && def.declared_kind.fixed_range().is_none() {
            state.clamp_instances(&self.name);
        }
    }

    /// Set the lower bound. Existing node values are not touched.
    pub fn set_minimum_value(&self, value: f64) -> Result<()> {
        self.update_range(Some(value), None)
    }

    /// Set the upper bound. Existing node values are not touched.
    pub fn set_maximum_value(&self, value: f64) -> Result<()> {
        self.update_range(None, Some(value))
    }

    pub fn clear_minimum_value(&self) {
        self.with_def_mut(|def| def.minimum_value = None);
    }

    pub fn clear_maximum_value(&self) {
        self.with_def_mut(|def| def.maximum_value = None);
    }

    fn update_range(&self, min: Option<f64>, max: Option<f64>) -> Result<()> {
        self.with_def_mut(|def| -> Result<()> {
            let new_min = min.or(def.minimum_value);
            let new_max = max.or(def.maximum_value);
            def.check_range(new_min, new_max)?;
            def.minimum_value = new_min;
            def.maximum_value = new_max;
            tracing::debug!(
                parameter = %def.name,
                min = ?new_min,
                max = ?new_max,
                "parameter range changed"
            );
            Ok(())
        })
    }

    /// Check a value against this parameter without modifying it.
    ///
    /// Under hard bounding (always, for toggles) numeric values outside the
    /// range are rejected.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), ValueError> {
        self.with_def(|def| def.validate(value))
    }

    /// Pull numeric values into range when hard bounding is in effect.
    /// Anything else is returned unchanged.
    pub fn clamp(&self, value: Value) -> Value {
        self.with_def(|def| def.clamp(value))
    }
}

impl PartialEq for ParameterType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.owner, &other.owner) && self.name == other.name
    }
}

impl std::fmt::Debug for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_def(|def| {
            f.debug_struct("ParameterType")
                .field("node_type", &self.owner.name)
                .field("name", &def.name)
                .field("declared_kind", &def.declared_kind)
                .field("bounding_method", &def.bounding_method)
                .field("minimum_value", &def.minimum_value)
                .field("maximum_value", &def.maximum_value)
                .finish()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Canvas, Color};

    fn node_type() -> NodeType {
        NodeType::new("number").unwrap()
    }

    #[test]
    fn test_register_defaults() {
        let nt = node_type();
        let pt = ParameterType::register(&nt, "angle", DeclaredKind::Angle).unwrap();

        assert_eq!(pt.name(), "angle");
        assert_eq!(pt.core_kind(), CoreKind::Float);
        assert_eq!(pt.default_value(), Value::Float(0.0));
        assert_eq!(pt.bounding_method(), BoundingMethod::None);
        assert_eq!(pt.minimum_value(), None);
        assert_eq!(pt.maximum_value(), None);
        assert_eq!(pt.label(), "Angle");
        assert_eq!(pt.node_type(), nt);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let nt = node_type();
        ParameterType::register(&nt, "radius", DeclaredKind::Float).unwrap();
        let err = ParameterType::register(&nt, "radius", DeclaredKind::Int).unwrap_err();
        assert_eq!(err, Error::InvalidName(name::InvalidName::Duplicate("radius".into())));
    }

    #[test]
    fn test_validate_float() {
        let pt = node_type().add_parameter_type("float", DeclaredKind::Float).unwrap();
        assert!(pt.validate(&Value::from("A")).is_err());
        assert!(pt.validate(&Value::from(Color::default())).is_err());
        assert!(pt.validate(&Value::from(Canvas::default())).is_err());
        assert!(pt.validate(&Value::from(1.0)).is_ok());
        assert!(pt.validate(&Value::from(2)).is_ok());
    }

    #[test]
    fn test_validate_color() {
        let pt = node_type().add_parameter_type("color", DeclaredKind::Color).unwrap();
        assert!(pt.validate(&Value::from("A")).is_err());
        assert!(pt.validate(&Value::from(2)).is_err());
        assert!(pt.validate(&Value::from(Color::default())).is_ok());
    }

    #[test]
    fn test_toggle_is_always_hard() {
        let pt = node_type().add_parameter_type("toggle", DeclaredKind::Toggle).unwrap();
        for method in [BoundingMethod::None, BoundingMethod::Soft, BoundingMethod::Hard] {
            pt.set_bounding_method(method);
            assert_eq!(pt.effective_bounding_method(), BoundingMethod::Hard);
            assert!(pt.validate(&Value::from("A")).is_err());
            assert!(pt.validate(&Value::from(-1)).is_err());
            assert!(pt.validate(&Value::from(100)).is_err());
            assert!(pt.validate(&Value::from(0)).is_ok());
            assert!(pt.validate(&Value::from(1)).is_ok());
        }
        assert_eq!(pt.clamp(Value::Int(5)), Value::Int(1));
    }

    #[test]
    fn test_soft_bounds_accept_out_of_range() {
        let pt = node_type().add_parameter_type("size", DeclaredKind::Float).unwrap();
        pt.set_bounding_method(BoundingMethod::Soft);
        pt.set_minimum_value(0.0).unwrap();
        pt.set_maximum_value(10.0).unwrap();

        assert!(pt.validate(&Value::Float(50.0)).is_ok());
        assert_eq!(pt.clamp(Value::Float(50.0)), Value::Float(50.0));
    }

    #[test]
    fn test_hard_bounds() {
        let pt = node_type().add_parameter_type("size", DeclaredKind::Float).unwrap();
        pt.set_minimum_value(-1.0).unwrap();
        pt.set_maximum_value(1.0).unwrap();
        pt.set_bounding_method(BoundingMethod::Hard);

        assert!(matches!(
            pt.validate(&Value::Float(1.5)),
            Err(ValueError::OutOfRange { min, max, .. }) if min == -1.0 && max == 1.0
        ));
        assert!(pt.validate(&Value::Float(1.0)).is_ok());
        assert_eq!(pt.clamp(Value::Float(1.5)), Value::Float(1.0));
        assert_eq!(pt.clamp(Value::Float(-3.0)), Value::Float(-1.0));
        assert_eq!(pt.clamp(Value::Float(0.25)), Value::Float(0.25));
        assert_eq!(pt.clamp(Value::from("text")), Value::from("text"));
    }

    #[test]
    fn test_hard_bound_on_one_side() {
        let pt = node_type().add_parameter_type("count", DeclaredKind::Int).unwrap();
        pt.set_minimum_value(0.0).unwrap();
        pt.set_bounding_method(BoundingMethod::Hard);

        assert_eq!(pt.clamp(Value::Int(-4)), Value::Int(0));
        assert_eq!(pt.clamp(Value::Int(i64::MAX)), Value::Int(i64::MAX));
    }

    #[test]
    fn test_int_clamp_rounds_into_range() {
        let pt = node_type().add_parameter_type("count", DeclaredKind::Int).unwrap();
        pt.set_minimum_value(0.5).unwrap();
        pt.set_maximum_value(9.5).unwrap();
        pt.set_bounding_method(BoundingMethod::Hard);

        assert_eq!(pt.clamp(Value::Int(0)), Value::Int(1));
        assert_eq!(pt.clamp(Value::Int(12)), Value::Int(9));
    }

    #[test]
    fn test_int_range_must_hold_an_integer() {
        let pt = node_type().add_parameter_type("count", DeclaredKind::Int).unwrap();
        let node = pt.node_type().create_node();
        node.set_value("count", 5).unwrap();

        pt.set_minimum_value(0.2).unwrap();
        assert!(matches!(
            pt.set_maximum_value(0.8),
            Err(Error::InvalidRange { .. })
        ));
        assert_eq!(pt.maximum_value(), None);
        pt.set_maximum_value(1.0).unwrap();

        pt.set_bounding_method(BoundingMethod::Hard);
        let stored = node.value("count").unwrap();
        assert_eq!(stored, Value::Int(1));
        assert!(pt.validate(&stored).is_ok());
        node.set_value_clamped("count", 5).unwrap();
        assert_eq!(node.as_int("count").unwrap(), 1);
    }

    #[test]
    fn test_invalid_range() {
        let pt = node_type().add_parameter_type("size", DeclaredKind::Float).unwrap();
        pt.set_maximum_value(1.0).unwrap();

        let err = pt.set_minimum_value(5.0).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
        assert_eq!(pt.minimum_value(), None);

        assert!(pt.set_minimum_value(f64::NAN).is_err());
        assert!(pt.set_minimum_value(1.0).is_ok());

        pt.clear_maximum_value();
        assert!(pt.set_minimum_value(5.0).is_ok());
    }

    #[test]
    fn test_range_on_non_numeric() {
        let pt = node_type().add_parameter_type("title", DeclaredKind::Text).unwrap();
        assert!(matches!(
            pt.set_maximum_value(3.0),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_label_and_description() {
        let pt = node_type().add_parameter_type("line_width", DeclaredKind::Float).unwrap();
        assert_eq!(pt.label(), "Line Width");
        pt.set_label("Stroke");
        pt.set_description("Width of the outline");
        assert_eq!(pt.label(), "Stroke");
        assert_eq!(pt.description().as_deref(), Some("Width of the outline"));
    }
}
