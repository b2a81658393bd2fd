//! A chain of frames, each mapping name to `(value, mutable-flag)`, linked to
//! an optional parent. Closures hold a clone of the `Environment` at their
//! definition site; since a frame is `Rc<RefCell<…>>`, a function captured
//! into a long-lived collection keeps that frame (and its ancestors) alive
//! and mutable in place, unlike a flat scope stack where popping a frame on
//! function return would sever a closure's view of it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::value::Value;

struct Binding {
    value: Value,
    mutable: bool,
}

struct Frame {
    bindings: HashMap<String, Binding>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    pub fn new_global() -> Self {
        Self(Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent: None,
        })))
    }

    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    pub fn define(&self, name: impl Into<String>, value: Value, mutable: bool) {
        self.0
            .borrow_mut()
            .bindings
            .insert(name.into(), Binding { value, mutable });
    }

    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        let frame = self.0.borrow();
        if let Some(binding) = frame.bindings.get(name) {
            return Ok(binding.value.clone());
        }
        match &frame.parent {
            Some(parent) => parent.get(name),
            None => Err(RuntimeError::IdentifierNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Walks outward like `get`, rebinding the first cell it finds. Fails if
    /// that cell is immutable, or if no such binding exists anywhere.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let mut frame = self.0.borrow_mut();
        if let Some(binding) = frame.bindings.get_mut(name) {
            if !binding.mutable {
                return Err(RuntimeError::NotMutable {
                    name: name.to_string(),
                });
            }
            binding.value = value;
            return Ok(());
        }
        match &frame.parent {
            Some(parent) => {
                let parent = parent.clone();
                drop(frame);
                parent.assign(name, value)
            }
            None => Err(RuntimeError::IdentifierNotFound {
                name: name.to_string(),
            }),
        }
    }
}
