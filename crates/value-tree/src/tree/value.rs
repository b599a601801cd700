//! Dynamic values inspected by the tree
//!
//! Arrays and objects are shared, interior-mutable handles. Two handles to the
//! same container compare equal by identity, which is what cycle detection
//! relies on. A value can therefore also reference itself, directly or
//! through descendants, and the tree must refuse to expand such a structure.

use indexmap::IndexMap;
use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

/// Strings accepted as epoch milliseconds
static INTEGER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("valid integer regex"));

/// Shared, mutable container storage
pub type Shared<T> = Rc<RefCell<T>>;

/// Ordered object members (insertion order)
pub type Members = IndexMap<String, Value>;

/// Identity of a container allocation
///
/// Two values with the same `ContainerId` are the same array or object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(usize);

/// A dynamically typed value
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Undefined,
    /// Explicit null
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Elements enumerated by index
    Array(Shared<Vec<Value>>),
    /// Own members enumerated in insertion order
    Object(Shared<Members>),
    /// A callable; never enumerated as a member
    Function(String),
}

impl Value {
    /// Create an array value
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Create an object value, keeping the given member order
    pub fn object<K: Into<String>>(members: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(Rc::new(RefCell::new(
            members.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    /// Create a function value with the given name
    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(name.into())
    }

    /// Returns true for arrays and objects
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Identity of the underlying container, `None` for scalars
    pub fn container_id(&self) -> Option<ContainerId> {
        match self {
            Value::Array(items) => Some(ContainerId(Rc::as_ptr(items) as *const () as usize)),
            Value::Object(members) => Some(ContainerId(Rc::as_ptr(members) as *const () as usize)),
            _ => None,
        }
    }

    /// Access the shared array storage
    pub fn as_array(&self) -> Option<&Shared<Vec<Value>>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Access the shared object storage
    pub fn as_object(&self) -> Option<&Shared<Members>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Number of enumerable members
    ///
    /// Function-valued members are not counted. Returns 0 for scalars.
    pub fn member_count(&self) -> usize {
        match self {
            Value::Array(items) => items.borrow().iter().filter(|v| !v.is_function()).count(),
            Value::Object(members) => members
                .borrow()
                .values()
                .filter(|v| !v.is_function())
                .count(),
            _ => 0,
        }
    }

    /// Snapshot of the enumerable members as `(key, value)` pairs
    ///
    /// Array elements are keyed by their index. Function-valued members are
    /// skipped; the remaining array elements keep their original index.
    pub fn members(&self) -> Vec<(String, Value)> {
        match self {
            Value::Array(items) => items
                .borrow()
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_function())
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect(),
            Value::Object(members) => members
                .borrow()
                .iter()
                .filter(|(_, v)| !v.is_function())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Interpret the value as epoch milliseconds
    ///
    /// Finite numbers qualify, and so do strings made only of digits with an
    /// optional leading `-`. Decimals, exponents, signs and padding do not.
    pub fn as_epoch_millis(&self) -> Option<f64> {
        let millis = match self {
            Value::Number(n) => *n,
            Value::String(s) if INTEGER_TEXT.is_match(s) => s.parse::<f64>().ok()?,
            _ => return None,
        };
        millis.is_finite().then_some(millis)
    }

    /// Name of the runtime type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Function(_) => "Function",
        }
    }
}

/// Format a number the way a browser would print it
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign: `1e+21`, `1.5e-7`
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        n.to_string()
    }
}

// Containers print shallowly so that cyclic values can be debugged.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({})", format_number(*n)),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len={})", items.len()),
                Err(_) => write!(f, "Array(<borrowed>)"),
            },
            Value::Object(members) => match members.try_borrow() {
                Ok(members) => f.debug_set().entries(members.keys()).finish(),
                Err(_) => write!(f, "Object(<borrowed>)"),
            },
            Value::Function(name) => write!(f, "Function({name})"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

// serde_json bounds nesting while parsing, so this conversion cannot run away.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_members_skip_functions() {
        let obj = Value::object([
            ("a", Value::from(1)),
            ("f", Value::function("callback")),
            ("b", Value::from("x")),
        ]);
        let keys: Vec<_> = obj.members().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj.member_count(), 2);

        let arr = Value::array([Value::from(1), Value::function("f"), Value::from(3)]);
        let keys: Vec<_> = arr.members().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "2"]);
    }

    #[test]
    fn test_container_identity() {
        let a = Value::array([]);
        let b = a.clone();
        let c = Value::array([]);
        assert_eq!(a.container_id(), b.container_id());
        assert_ne!(a.container_id(), c.container_id());
        assert_eq!(Value::from(1).container_id(), None);
    }

    #[test]
    fn test_epoch_millis() {
        assert_eq!(Value::from(1505296820331i64).as_epoch_millis(), Some(1505296820331.0));
        assert_eq!(Value::from("1505296820331").as_epoch_millis(), Some(1505296820331.0));
        assert_eq!(Value::from("-42").as_epoch_millis(), Some(-42.0));
        assert_eq!(Value::from(" 42 ").as_epoch_millis(), None);
        assert_eq!(Value::from("+5").as_epoch_millis(), None);
        assert_eq!(Value::from("1.5").as_epoch_millis(), None);
        assert_eq!(Value::from("1e12").as_epoch_millis(), None);
        assert_eq!(Value::from("").as_epoch_millis(), None);
        assert_eq!(Value::from("soon").as_epoch_millis(), None);
        assert_eq!(Value::from("NaN").as_epoch_millis(), None);
        assert_eq!(Value::from(f64::INFINITY).as_epoch_millis(), None);
        assert_eq!(Value::Null.as_epoch_millis(), None);
        assert_eq!(Value::from(true).as_epoch_millis(), None);
    }

    #[test]
    fn test_from_json_keeps_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": [true, null]}));
        let keys: Vec<_> = value.members().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(value.type_name(), "Object");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1505296820331.0), "1505296820331");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e25), "-1.5e+25");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(2.5e-9), "2.5e-9");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_debug_on_cycle_is_shallow() {
        let obj = Value::object(Vec::<(String, Value)>::new());
        obj.as_object()
            .unwrap()
            .borrow_mut()
            .insert("me".to_string(), obj.clone());
        assert_eq!(format!("{obj:?}"), "{\"me\"}");
        // Break the cycle so the allocation is released
        obj.as_object().unwrap().borrow_mut().clear();
    }
}
