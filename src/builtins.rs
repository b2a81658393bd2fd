//! Arithmetic shared by the `Infix` evaluator and the named `+ - * /`
//! builtins, plus the primitive function table installed into every fresh
//! global environment. Grounded on `evaluator.py`'s `add_values` /
//! `subtract_values` / `multiply_values` / `divide_values` /
//! `builtin_*` methods, generalized into curriable `Value::Builtin`s.

use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::evaluator::{apply_value, OutputBuffer};
use crate::value::{Arity, BuiltinValue, Value};

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Decimal(d) => Some(*d),
        _ => None,
    }
}

pub fn add(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::str(format!("{a}{b}"))),
        (Value::Str(a), other) => Ok(Value::str(format!("{a}{other}"))),
        (other, Value::Str(b)) => Ok(Value::str(format!("{other}{b}"))),
        (Value::List(a), Value::List(b)) => {
            Ok(Value::list(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Set(a), Value::Set(b)) => {
            let mut items = (**a).clone();
            for item in b.iter() {
                if !items.iter().any(|existing| existing == item) {
                    items.push(item.clone());
                }
            }
            Ok(Value::Set(Rc::new(items)))
        }
        (Value::Dictionary(a), Value::Dictionary(b)) => {
            let mut pairs = (**a).clone();
            for (key, value) in b.iter() {
                if let Some(slot) = pairs.iter_mut().find(|(k, _)| k == key) {
                    slot.1 = value.clone();
                } else {
                    pairs.push((key.clone(), value.clone()));
                }
            }
            Ok(Value::Dictionary(Rc::new(pairs)))
        }
        (a, b) => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => Ok(Value::Decimal(x + y)),
            _ => Err(unsupported("+", a, b)),
        },
    }
}

pub fn subtract(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a - b)),
        (a, b) => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => Ok(Value::Decimal(x - y)),
            _ => Err(unsupported("-", a, b)),
        },
    }
}

pub fn multiply(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a * b)),
        (Value::Str(s), Value::Integer(n)) => {
            if *n < 0 {
                return Err(RuntimeError::NegativeStringRepeat);
            }
            Ok(Value::str(s.repeat(*n as usize)))
        }
        (a, b) => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => Ok(Value::Decimal(x * y)),
            _ => Err(unsupported("*", a, b)),
        },
    }
}

pub fn divide(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            if *b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Integer(a / b))
        }
        (a, b) => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => {
                if y == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(Value::Decimal(x / y))
            }
            _ => Err(unsupported("/", a, b)),
        },
    }
}

fn unsupported(op: &'static str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnsupportedOperation {
        op,
        left: left.kind_name(),
        right: right.kind_name(),
    }
}

fn builtin(name: &str, arity: Arity, call: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static) -> Value {
    Value::Builtin(Rc::new(BuiltinValue {
        name: name.to_string(),
        arity,
        bound_args: vec![],
        call: Rc::new(call),
    }))
}

/// Populates a fresh global environment with every primitive the language
/// exposes, per §4.3.9.
pub fn install(env: &Environment, output: OutputBuffer) {
    let puts_output = output.clone();
    env.define(
        "puts",
        builtin("puts", Arity::Variadic, move |args| {
            let mut buffer = puts_output.borrow_mut();
            for arg in args {
                buffer.push_str(&arg.to_string());
                buffer.push(' ');
            }
            buffer.push('\n');
            Ok(Value::Nil)
        }),
        false,
    );

    env.define(
        "push",
        builtin("push", Arity::Fixed(2), |args| {
            let (item, collection) = (&args[0], &args[1]);
            match collection {
                Value::List(items) => {
                    let mut items = (**items).clone();
                    items.push(item.clone());
                    Ok(Value::List(Rc::new(items)))
                }
                Value::Set(items) => {
                    let mut items = (**items).clone();
                    if !items.iter().any(|existing| existing == item) {
                        items.push(item.clone());
                    }
                    Ok(Value::Set(Rc::new(items)))
                }
                other => Err(RuntimeError::CannotPush {
                    kind: other.kind_name(),
                }),
            }
        }),
        false,
    );

    env.define(
        "assoc",
        builtin("assoc", Arity::Fixed(3), |args| {
            let (key, value, dict) = (&args[0], &args[1], &args[2]);
            let Value::Dictionary(pairs) = dict else {
                return Err(RuntimeError::CannotAssoc {
                    kind: dict.kind_name(),
                });
            };
            let mut pairs = (**pairs).clone();
            if let Some(slot) = pairs.iter_mut().find(|(k, _)| k == key) {
                slot.1 = value.clone();
            } else {
                pairs.push((key.clone(), value.clone()));
            }
            Ok(Value::Dictionary(Rc::new(pairs)))
        }),
        false,
    );

    env.define(
        "first",
        builtin("first", Arity::Fixed(1), |args| {
            Ok(match &args[0] {
                Value::List(items) => items.first().cloned().unwrap_or(Value::Nil),
                Value::Set(items) => items.first().cloned().unwrap_or(Value::Nil),
                Value::Str(s) => s.chars().next().map(Value::str).unwrap_or(Value::Nil),
                Value::Dictionary(pairs) => {
                    pairs.first().map(|(k, _)| k.clone()).unwrap_or(Value::Nil)
                }
                _ => Value::Nil,
            })
        }),
        false,
    );

    env.define(
        "rest",
        builtin("rest", Arity::Fixed(1), |args| {
            Ok(match &args[0] {
                Value::List(items) => Value::List(Rc::new(items.iter().skip(1).cloned().collect())),
                Value::Set(items) => Value::Set(Rc::new(items.iter().skip(1).cloned().collect())),
                Value::Str(s) => Value::str(s.chars().skip(1).collect::<String>()),
                Value::Dictionary(pairs) => {
                    Value::Dictionary(Rc::new(pairs.iter().skip(1).cloned().collect()))
                }
                _ => Value::Nil,
            })
        }),
        false,
    );

    env.define(
        "size",
        builtin("size", Arity::Fixed(1), |args| {
            Ok(match &args[0] {
                Value::List(items) => Value::Integer(items.len() as i64),
                Value::Set(items) => Value::Integer(items.len() as i64),
                Value::Dictionary(pairs) => Value::Integer(pairs.len() as i64),
                Value::Str(s) => Value::Integer(s.len() as i64),
                _ => Value::Nil,
            })
        }),
        false,
    );

    {
        let output_map = output.clone();
        env.define(
            "map",
            builtin("map", Arity::Fixed(2), move |args| {
                let (func, list) = (&args[0], &args[1]);
                let Value::List(items) = list else {
                    return Err(RuntimeError::UnexpectedArgument {
                        name: "map",
                        kinds: format!("{}, {}", func.kind_name(), list.kind_name()),
                    });
                };
                if !func.is_callable() {
                    return Err(RuntimeError::UnexpectedArgument {
                        name: "map",
                        kinds: format!("{}, List", func.kind_name()),
                    });
                }
                let mut mapped = Vec::with_capacity(items.len());
                for item in items.iter() {
                    mapped.push(apply_value(func, vec![item.clone()], &output_map)?);
                }
                Ok(Value::list(mapped))
            }),
            false,
        );

        let output_filter = output.clone();
        env.define(
            "filter",
            builtin("filter", Arity::Fixed(2), move |args| {
                let (predicate, list) = (&args[0], &args[1]);
                let Value::List(items) = list else {
                    return Err(RuntimeError::UnexpectedArgument {
                        name: "filter",
                        kinds: format!("{}, {}", predicate.kind_name(), list.kind_name()),
                    });
                };
                if !predicate.is_callable() {
                    return Err(RuntimeError::UnexpectedArgument {
                        name: "filter",
                        kinds: format!("{}, List", predicate.kind_name()),
                    });
                }
                let mut kept = Vec::new();
                for item in items.iter() {
                    let verdict = apply_value(predicate, vec![item.clone()], &output_filter)?;
                    if verdict.is_truthy() {
                        kept.push(item.clone());
                    }
                }
                Ok(Value::list(kept))
            }),
            false,
        );

        let output_fold = output;
        env.define(
            "fold",
            builtin("fold", Arity::Fixed(3), move |args| {
                let (initial, func, list) = (&args[0], &args[1], &args[2]);
                let Value::List(items) = list else {
                    return Err(RuntimeError::UnexpectedArgument {
                        name: "fold",
                        kinds: format!(
                            "{}, {}, {}",
                            initial.kind_name(),
                            func.kind_name(),
                            list.kind_name()
                        ),
                    });
                };
                if !func.is_callable() {
                    return Err(RuntimeError::UnexpectedArgument {
                        name: "fold",
                        kinds: format!("{}, {}, List", initial.kind_name(), func.kind_name()),
                    });
                }
                let mut accumulator = initial.clone();
                for item in items.iter() {
                    accumulator =
                        apply_value(func, vec![accumulator, item.clone()], &output_fold)?;
                }
                Ok(accumulator)
            }),
            false,
        );
    }

    env.define("+", builtin("+", Arity::Fixed(2), |args| add(&args[0], &args[1])), false);
    env.define(
        "-",
        builtin("-", Arity::Fixed(2), |args| subtract(&args[0], &args[1])),
        false,
    );
    env.define(
        "*",
        builtin("*", Arity::Fixed(2), |args| multiply(&args[0], &args[1])),
        false,
    );
    env.define(
        "/",
        builtin("/", Arity::Fixed(2), |args| divide(&args[0], &args[1])),
        false,
    );
}
