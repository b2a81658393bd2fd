//! Single-threaded tree walk over the AST: reduce a `Program` to a final
//! `Value` under an `Environment`, accumulating anything `puts` emits into
//! an output buffer along the way.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::*;
use crate::builtins;
use crate::environment::Environment;
use crate::error::{InterpreterError, RuntimeError};
use crate::parser::Parser;
use crate::value::{Arity, BuiltinValue, FunctionValue, Value};

/// Shared, append-only text the `puts` primitive writes to. `Rc<RefCell<_>>`
/// because it must be visible from inside builtin closures captured by
/// composed functions, not just from the top-level driver.
pub type OutputBuffer = Rc<RefCell<String>>;

/// `source_text -> output_text`, per the external interface: buffered
/// `puts` output followed by the printed form of the final value, or the
/// buffered output so far followed by `[Error] <message>` on failure.
pub fn evaluate_program(source: &str) -> String {
    let output: OutputBuffer = Rc::new(RefCell::new(String::new()));
    match run(source, output.clone()) {
        Ok(value) => {
            let mut text = output.borrow().clone();
            text.push_str(&value.to_string());
            text
        }
        Err(err) => {
            let mut text = output.borrow().clone();
            text.push_str("[Error] ");
            text.push_str(&err.message());
            text
        }
    }
}

fn run(source: &str, output: OutputBuffer) -> Result<Value, InterpreterError> {
    let program = Parser::parse_source(source)?;
    let env = Environment::new_global();
    builtins::install(&env, output.clone());

    let mut result = Value::Nil;
    for statement in &program.statements {
        if let Statement::Expression(expr) = statement {
            result = eval_expression(expr, &env, &output)?;
        }
    }
    Ok(result)
}

fn eval_block(block: &Block, env: &Environment, output: &OutputBuffer) -> Result<Value, RuntimeError> {
    let mut result = Value::Nil;
    for statement in &block.statements {
        if let Statement::Expression(expr) = statement {
            result = eval_expression(expr, env, output)?;
        }
    }
    Ok(result)
}

fn eval_expression(expr: &Expression, env: &Environment, output: &OutputBuffer) -> Result<Value, RuntimeError> {
    match expr {
        Expression::Integer(lit) => {
            let digits = lit.text.replace('_', "");
            Ok(Value::Integer(digits.parse().unwrap_or(0)))
        }
        Expression::Decimal(lit) => {
            let digits = lit.text.replace('_', "");
            Ok(Value::Decimal(digits.parse().unwrap_or(0.0)))
        }
        Expression::Str(lit) => Ok(Value::str(lit.value.clone())),
        Expression::Boolean(lit) => Ok(Value::Boolean(lit.value)),
        Expression::Nil(_) => Ok(Value::Nil),
        Expression::Identifier(id) => env.get(&id.name),
        Expression::Let(node) => {
            let value = eval_expression(&node.value, env, output)?;
            env.define(node.name.clone(), value.clone(), false);
            Ok(value)
        }
        Expression::MutableLet(node) => {
            let value = eval_expression(&node.value, env, output)?;
            env.define(node.name.clone(), value.clone(), true);
            Ok(value)
        }
        Expression::Assignment(node) => {
            let value = eval_expression(&node.value, env, output)?;
            env.assign(&node.name, value.clone())?;
            Ok(value)
        }
        Expression::Infix(node) => eval_infix(node, env, output),
        Expression::Prefix(node) => eval_prefix(node, env, output),
        Expression::Call(node) => {
            let callee = eval_expression(&node.callee, env, output)?;
            let mut args = Vec::with_capacity(node.arguments.len());
            for arg in &node.arguments {
                args.push(eval_expression(arg, env, output)?);
            }
            apply_value(&callee, args, output)
        }
        Expression::Index(node) => {
            let target = eval_expression(&node.target, env, output)?;
            let index = eval_expression(&node.index, env, output)?;
            index_value(&target, &index)
        }
        Expression::List(node) => {
            let mut items = Vec::with_capacity(node.items.len());
            for item in &node.items {
                items.push(eval_expression(item, env, output)?);
            }
            Ok(Value::list(items))
        }
        Expression::Set(node) => {
            let mut items: Vec<Value> = vec![];
            for item_expr in &node.items {
                let item = eval_expression(item_expr, env, output)?;
                if matches!(item, Value::Dictionary(_)) {
                    return Err(RuntimeError::DictionaryInSet);
                }
                if !items.iter().any(|existing| existing == &item) {
                    items.push(item);
                }
            }
            Ok(Value::Set(Rc::new(items)))
        }
        Expression::Dictionary(node) => {
            let mut pairs: Vec<(Value, Value)> = vec![];
            for (key_expr, value_expr) in &node.pairs {
                let key = eval_expression(key_expr, env, output)?;
                let value = eval_expression(value_expr, env, output)?;
                if matches!(key, Value::Dictionary(_)) {
                    return Err(RuntimeError::DictionaryAsKey);
                }
                if let Some(slot) = pairs.iter_mut().find(|(k, _)| k == &key) {
                    slot.1 = value;
                } else {
                    pairs.push((key, value));
                }
            }
            Ok(Value::Dictionary(Rc::new(pairs)))
        }
        Expression::Function(node) => Ok(Value::Function(Rc::new(FunctionValue {
            parameters: node.parameters.clone(),
            body: node.body.clone(),
            closure: env.clone(),
            bound_args: vec![],
        }))),
        Expression::If(node) => {
            let condition = eval_expression(&node.condition, env, output)?;
            if condition.is_truthy() {
                eval_block(&node.consequence, env, output)
            } else if let Some(alternative) = &node.alternative {
                eval_block(alternative, env, output)
            } else {
                Ok(Value::Nil)
            }
        }
        Expression::Composition(node) => {
            let mut functions = node.functions.iter();
            let mut result = eval_expression(functions.next().expect("composition has >= 2 functions"), env, output)?;
            for func_expr in functions {
                let next = eval_expression(func_expr, env, output)?;
                result = compose(result, next, output)?;
            }
            Ok(result)
        }
        Expression::Thread(node) => {
            let mut value = eval_expression(&node.initial, env, output)?;
            for func_expr in &node.functions {
                let func = eval_expression(func_expr, env, output)?;
                if !func.is_callable() {
                    return Err(RuntimeError::NotThreadable {
                        kind: func.kind_name(),
                    });
                }
                value = apply_value(&func, vec![value], output)?;
            }
            Ok(value)
        }
    }
}

/// Evaluating a Call / `map`/`filter`/`fold` / composition / threading all
/// bottom out here: dispatch on callee kind and apply currying uniformly
/// (§4.3.7).
pub fn apply_value(callee: &Value, mut args: Vec<Value>, output: &OutputBuffer) -> Result<Value, RuntimeError> {
    match callee {
        Value::Function(func) => {
            let mut all_args = func.bound_args.clone();
            all_args.append(&mut args);

            if all_args.len() < func.parameters.len() {
                return Ok(Value::Function(Rc::new(FunctionValue {
                    parameters: func.parameters.clone(),
                    body: func.body.clone(),
                    closure: func.closure.clone(),
                    bound_args: all_args,
                })));
            }

            let call_env = func.closure.child();
            for (name, value) in func.parameters.iter().zip(all_args) {
                call_env.define(name.clone(), value, false);
            }
            eval_block(&func.body, &call_env, output)
        }
        Value::Builtin(builtin) => {
            let mut all_args = builtin.bound_args.clone();
            all_args.append(&mut args);

            match builtin.arity {
                Arity::Variadic => (builtin.call)(&all_args),
                Arity::Fixed(arity) => {
                    if all_args.len() < arity {
                        Ok(Value::Builtin(Rc::new(BuiltinValue {
                            name: builtin.name.clone(),
                            arity: builtin.arity,
                            bound_args: all_args,
                            call: builtin.call.clone(),
                        })))
                    } else {
                        (builtin.call)(&all_args[..arity])
                    }
                }
            }
        }
        other => Err(RuntimeError::NotCallable {
            kind: other.kind_name(),
        }),
    }
}

/// `f >> g`: a new unary Builtin whose invocation on `x` returns `g(f(x))`.
fn compose(left: Value, right: Value, output: &OutputBuffer) -> Result<Value, RuntimeError> {
    if !left.is_callable() {
        return Err(RuntimeError::NotComposable {
            kind: left.kind_name(),
        });
    }
    if !right.is_callable() {
        return Err(RuntimeError::NotComposable {
            kind: right.kind_name(),
        });
    }

    let output = output.clone();
    let call = Rc::new(move |args: &[Value]| -> Result<Value, RuntimeError> {
        let intermediate = apply_value(&left, args.to_vec(), &output)?;
        apply_value(&right, vec![intermediate], &output)
    });

    Ok(Value::Builtin(Rc::new(BuiltinValue {
        name: "composed".to_string(),
        arity: Arity::Fixed(1),
        bound_args: vec![],
        call,
    })))
}

fn eval_infix(node: &Infix, env: &Environment, output: &OutputBuffer) -> Result<Value, RuntimeError> {
    let left = eval_expression(&node.left, env, output)?;
    let right = eval_expression(&node.right, env, output)?;

    match node.operator {
        InfixOp::Add => builtins::add(&left, &right),
        InfixOp::Subtract => builtins::subtract(&left, &right),
        InfixOp::Multiply => builtins::multiply(&left, &right),
        InfixOp::Divide => builtins::divide(&left, &right),
        InfixOp::Equal => Ok(Value::Boolean(left == right)),
        InfixOp::NotEqual => Ok(Value::Boolean(left != right)),
        InfixOp::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        InfixOp::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
        InfixOp::GreaterThan => compare(&left, &right).map(|o| Value::Boolean(o.is_gt())),
        InfixOp::LessThan => compare(&left, &right).map(|o| Value::Boolean(o.is_lt())),
        InfixOp::GreaterThanOrEqual => compare(&left, &right).map(|o| Value::Boolean(o.is_ge())),
        InfixOp::LessThanOrEqual => compare(&left, &right).map(|o| Value::Boolean(o.is_le())),
    }
}

fn compare(left: &Value, right: &Value) -> Result<std::cmp::Ordering, RuntimeError> {
    left.partial_cmp_for_ordering(right)
        .ok_or_else(|| RuntimeError::NotComparable {
            left: left.kind_name(),
            right: right.kind_name(),
        })
}

fn eval_prefix(node: &Prefix, env: &Environment, output: &OutputBuffer) -> Result<Value, RuntimeError> {
    let operand = eval_expression(&node.operand, env, output)?;
    match node.operator {
        PrefixOp::Negate => match operand {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            Value::Decimal(d) => Ok(Value::Decimal(-d)),
            other => Err(RuntimeError::UnsupportedPrefix {
                kind: other.kind_name(),
            }),
        },
    }
}

fn index_value(target: &Value, index: &Value) -> Result<Value, RuntimeError> {
    match target {
        Value::Str(s) => {
            let Value::Integer(i) = index else {
                return Err(RuntimeError::BadIndexKind {
                    target: "String",
                    index: index.kind_name(),
                });
            };
            let chars: Vec<char> = s.chars().collect();
            Ok(resolve_index(*i, chars.len())
                .map(|idx| Value::str(chars[idx].to_string()))
                .unwrap_or(Value::Nil))
        }
        Value::List(items) => {
            let Value::Integer(i) = index else {
                return Err(RuntimeError::BadIndexKind {
                    target: "List",
                    index: index.kind_name(),
                });
            };
            Ok(resolve_index(*i, items.len())
                .map(|idx| items[idx].clone())
                .unwrap_or(Value::Nil))
        }
        Value::Dictionary(pairs) => Ok(pairs
            .iter()
            .find(|(key, _)| key == index)
            .map(|(_, value)| value.clone())
            .unwrap_or(Value::Nil)),
        other => Err(RuntimeError::NotIndexable {
            kind: other.kind_name(),
        }),
    }
}

/// Negative indices count from the end; out-of-range (in either direction)
/// reports as absent rather than erroring.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index
    };
    if resolved >= 0 && (resolved as usize) < len {
        Some(resolved as usize)
    } else {
        None
    }
}
