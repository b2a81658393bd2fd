//! The tagged value universe. One enum, one constructor per kind, matching
//! the closed set described for the language: dispatch in operators and
//! primitives is a single match on this tag rather than a class hierarchy.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::ast::Block;
use crate::environment::Environment;
use crate::error::RuntimeError;

#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    Str(Rc<String>),
    Boolean(bool),
    Nil,
    List(Rc<Vec<Value>>),
    Set(Rc<Vec<Value>>),
    Dictionary(Rc<Vec<(Value, Value)>>),
    Function(Rc<FunctionValue>),
    Builtin(Rc<BuiltinValue>),
}

/// A user-defined closure, plus any arguments already bound by a previous
/// partial application.
pub struct FunctionValue {
    pub parameters: Vec<String>,
    pub body: Block,
    pub closure: Environment,
    pub bound_args: Vec<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, RuntimeError>;

/// A primitive function, plus any arguments already bound by a previous
/// partial application. `call` is boxed so that composition (`>>`) and
/// bound operators (`+` as a value) can synthesize new builtins at runtime.
pub struct BuiltinValue {
    pub name: String,
    pub arity: Arity,
    pub bound_args: Vec<Value>,
    pub call: Rc<NativeFn>,
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(Rc::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    /// User-visible kind name as it appears in error messages. There is no
    /// separate "Builtin" kind name: both callable variants are reported as
    /// `Function`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::Str(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::Nil => "Nil",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Dictionary(_) => "Dictionary",
            Value::Function(_) | Value::Builtin(_) => "Function",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Nil => false,
            Value::Integer(n) => *n != 0,
            Value::Decimal(d) => *d != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Set(items) => !items.is_empty(),
            Value::Dictionary(pairs) => !pairs.is_empty(),
            Value::Function(_) | Value::Builtin(_) => true,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Integer(_) => 0,
            Value::Decimal(_) => 1,
            Value::Str(_) => 2,
            Value::Boolean(_) => 3,
            Value::Nil => 4,
            Value::List(_) => 5,
            Value::Set(_) => 6,
            Value::Dictionary(_) => 7,
            Value::Function(_) => 8,
            Value::Builtin(_) => 9,
        }
    }

    /// Ascending order used to print Set/Dictionary contents deterministically.
    /// Only numeric, String, Boolean and Nil get a meaningful secondary key;
    /// everything else falls back to a stable tie, which a stable sort
    /// preserves as insertion order.
    pub fn display_cmp(&self, other: &Value) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            _ => Ordering::Equal,
        })
    }

    /// Numeric/string ordering for `< > <= >=`. `None` when the kinds are not
    /// comparable.
    pub fn partial_cmp_for_ordering(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Decimal(b)) => (*a as f64).partial_cmp(b),
            (Value::Decimal(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Decimal(a), Value::Decimal(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x == y))
            }
            (Value::Dictionary(a), Value::Dictionary(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(k2, v2)| k == k2 && v == v2)
                    })
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{}", format_decimal(*d)),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Nil => write!(f, "nil"),
            Value::Str(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Set(items) => {
                let mut sorted: Vec<&Value> = items.iter().collect();
                sorted.sort_by(|a, b| a.display_cmp(b));
                write!(f, "{{")?;
                for (i, item) in sorted.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "}}")
            }
            Value::Dictionary(pairs) => {
                let mut sorted: Vec<&(Value, Value)> = pairs.iter().collect();
                sorted.sort_by(|a, b| a.0.display_cmp(&b.0));
                write!(f, "#{{")?;
                for (i, (k, v)) in sorted.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => {
                write!(f, "|{}| {{ [closure] }}", func.parameters.join(", "))
            }
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
        }
    }
}

/// Renders a Decimal per §6.2: whole numbers print like an Integer; else
/// trailing zeros (and a bare trailing `.`) are stripped.
pub fn format_decimal(value: f64) -> String {
    if value == value.trunc() && value.is_finite() {
        return format!("{}", value.trunc() as i64);
    }
    let mut text = format!("{value}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
