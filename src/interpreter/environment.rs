use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{self, Debug},
    rc::Rc,
};

use crate::{
    data::{LoxIdent, LoxValue},
    interpreter::error::RuntimeError,
};

/// A cheap-clone handle to a frame of bindings, optionally chained to an
/// enclosing frame. Closures share frames, so the chains form a DAG kept
/// alive by reference counting.
#[derive(Clone, Default)]
pub struct Environment {
    inner: Rc<RefCell<EnvironmentInner>>,
}

#[derive(Default)]
struct EnvironmentInner {
    bindings: HashMap<String, LoxValue>,
    enclosing: Option<Environment>,
}

impl Environment {
    /// Creates a new standalone environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new environment chained to the given enclosing one.
    pub fn new_enclosed(enclosing: &Environment) -> Self {
        Environment {
            inner: Rc::new(RefCell::new(EnvironmentInner {
                bindings: HashMap::new(),
                enclosing: Some(enclosing.clone()),
            })),
        }
    }

    /// Defines a binding in this frame. Overwriting is permitted; this is
    /// how global redefinition works.
    pub fn define(&self, name: impl Into<String>, value: LoxValue) {
        self.inner.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Reads a binding, walking the chain from this frame outward.
    pub fn get(&self, ident: &LoxIdent) -> Result<LoxValue, RuntimeError> {
        let inner = self.inner.borrow();
        if let Some(value) = inner.bindings.get(&ident.name) {
            return Ok(value.clone());
        }
        match &inner.enclosing {
            Some(enclosing) => enclosing.get(ident),
            None => Err(RuntimeError::UndefinedVariable {
                ident: ident.clone(),
            }),
        }
    }

    /// Assigns to the first frame along the chain that already binds the
    /// name.
    pub fn assign(&self, ident: &LoxIdent, value: LoxValue) -> Result<LoxValue, RuntimeError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(slot) = inner.bindings.get_mut(&ident.name) {
            *slot = value.clone();
            return Ok(value);
        }
        match &inner.enclosing {
            Some(enclosing) => enclosing.assign(ident, value),
            None => Err(RuntimeError::UndefinedVariable {
                ident: ident.clone(),
            }),
        }
    }

    /// Reads a binding from the frame exactly `depth` hops up the chain.
    /// The resolver guarantees the binding exists there.
    pub fn get_at(&self, depth: usize, name: &str) -> LoxValue {
        self.ancestor(depth)
            .inner
            .borrow()
            .bindings
            .get(name)
            .cloned()
            .unwrap_or_else(|| {
                unreachable!("Resolved name `{}` missing at depth {}.", name, depth)
            })
    }

    /// Writes a binding into the frame exactly `depth` hops up the chain.
    pub fn assign_at(&self, depth: usize, ident: &LoxIdent, value: LoxValue) -> LoxValue {
        self.ancestor(depth)
            .inner
            .borrow_mut()
            .bindings
            .insert(ident.name.clone(), value.clone());
        value
    }

    fn ancestor(&self, depth: usize) -> Environment {
        let mut env = self.clone();
        for _ in 0..depth {
            let enclosing = env.inner.borrow().enclosing.clone();
            env = enclosing.unwrap_or_else(|| {
                unreachable!("Environment chain shorter than resolved depth {}.", depth)
            });
        }
        env
    }
}

// Bindings may hold closures whose environments point back here, so the
// debug representation must stay shallow.
impl Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Environment")
            .field("names", &inner.bindings.keys().collect::<Vec<_>>())
            .field("has_enclosing", &inner.enclosing.is_some())
            .finish()
    }
}
