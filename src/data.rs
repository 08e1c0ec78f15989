use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{self, Debug, Display},
    rc::Rc,
};

use crate::{
    ast::{stmt::FunDecl, AstId},
    interpreter::{
        control_flow::ControlFlow, environment::Environment, error::RuntimeError, CFResult,
        Interpreter,
    },
    token::{Token, TokenKind},
};

#[derive(Clone)]
pub enum LoxValue {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    Function(Rc<LoxFunction>),
    NativeFunction(Rc<NativeFunction>),
    Class(Rc<LoxClass>),
    Object(Rc<LoxInstance>),
}

impl LoxValue {
    /// Returns the canonical type name.
    pub fn type_name(&self) -> &'static str {
        use LoxValue::*;
        match self {
            Nil => "nil",
            Boolean(_) => "boolean",
            Number(_) => "number",
            String(_) => "string",
            Function(_) | NativeFunction(_) => "function",
            Class(_) => "class",
            Object(_) => "object",
        }
    }
}

impl Display for LoxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LoxValue::*;
        match self {
            Nil => f.write_str("nil"),
            Boolean(boolean) => Display::fmt(boolean, f),
            Number(number) => {
                if number.floor() == *number {
                    write!(f, "{:.0}", number)
                } else {
                    Display::fmt(number, f)
                }
            }
            String(string) => f.write_str(string),
            Function(fun) => Display::fmt(fun, f),
            NativeFunction(native) => Display::fmt(native, f),
            Class(class) => Display::fmt(class, f),
            Object(instance) => Display::fmt(instance, f),
        }
    }
}

// Instance fields may form reference cycles, so the debug representation
// stays as shallow as the display one.
impl Debug for LoxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LoxValue::*;
        match self {
            String(string) => write!(f, "\"{}\"", string),
            other => Display::fmt(other, f),
        }
    }
}

/// An identifier occurrence in the source program.
#[derive(Debug, Clone)]
pub struct LoxIdent {
    pub name: String,
    pub line: usize,
    pub id: AstId,
}

impl From<Token> for LoxIdent {
    fn from(Token { kind, line }: Token) -> Self {
        let name = match kind {
            TokenKind::Identifier(name) => name,
            TokenKind::This => "this".into(),
            TokenKind::Super => "super".into(),
            unexpected => unreachable!(
                "Invalid `Token` ({:?}) to `LoxIdent` conversion.",
                unexpected
            ),
        };
        LoxIdent {
            name,
            line,
            id: AstId::new(),
        }
    }
}

impl Display for LoxIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub trait LoxCallable: Display + Debug {
    fn call(self: Rc<Self>, interpreter: &mut Interpreter, args: &[LoxValue])
        -> CFResult<LoxValue>;
    fn arity(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct LoxFunction {
    pub decl: Rc<FunDecl>,
    pub closure: Environment,
    pub is_initializer: bool,
}

impl LoxFunction {
    /// Returns a copy of this method whose closure has been extended with a
    /// `this` binding for the given instance.
    pub fn bind(&self, instance: &Rc<LoxInstance>) -> LoxFunction {
        let env = Environment::new_enclosed(&self.closure);
        env.define("this", LoxValue::Object(Rc::clone(instance)));
        LoxFunction {
            decl: Rc::clone(&self.decl),
            closure: env,
            is_initializer: self.is_initializer,
        }
    }

}

impl LoxCallable for LoxFunction {
    fn call(
        self: Rc<Self>,
        interpreter: &mut Interpreter,
        args: &[LoxValue],
    ) -> CFResult<LoxValue> {
        let env = Environment::new_enclosed(&self.closure);
        for (param, value) in self.decl.params.iter().zip(args) {
            env.define(param.name.clone(), value.clone());
        }
        let result = match interpreter.eval_block(&self.decl.body, env) {
            Ok(()) => LoxValue::Nil,
            Err(ControlFlow::Return(value)) => value,
            Err(other) => return Err(other),
        };
        if self.is_initializer {
            // An initializer always yields its instance, even on an early
            // (bare) `return`. The bound `this` lives in the closure itself.
            return Ok(self.closure.get_at(0, "this"));
        }
        Ok(result)
    }

    fn arity(&self) -> usize {
        self.decl.params.len()
    }
}

impl Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn/{}>", self.decl.params.len())
    }
}

pub struct NativeFunction {
    pub name: &'static str,
    pub fn_ptr: fn(args: &[LoxValue]) -> CFResult<LoxValue>,
    pub arity: usize,
}

impl LoxCallable for NativeFunction {
    fn call(self: Rc<Self>, _: &mut Interpreter, args: &[LoxValue]) -> CFResult<LoxValue> {
        (self.fn_ptr)(args)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

#[derive(Debug)]
pub struct LoxClass {
    pub name: LoxIdent,
    pub superclass: Option<Rc<LoxClass>>,
    pub methods: HashMap<String, LoxFunction>,
}

impl LoxClass {
    /// Looks a method up by name, falling back to the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<LoxFunction> {
        self.methods
            .get(name)
            .cloned()
            .or_else(|| {
                self.superclass
                    .as_ref()
                    .and_then(|superclass| superclass.find_method(name))
            })
    }
}

impl LoxCallable for LoxClass {
    fn call(
        self: Rc<Self>,
        interpreter: &mut Interpreter,
        args: &[LoxValue],
    ) -> CFResult<LoxValue> {
        let instance = Rc::new(LoxInstance {
            class: Rc::clone(&self),
            fields: RefCell::new(HashMap::new()),
        });
        if let Some(init) = self.find_method("init") {
            // The initializer's own return value is its instance; a call
            // expression on a class always yields the fresh instance anyway.
            Rc::new(init.bind(&instance)).call(interpreter, args)?;
        }
        Ok(LoxValue::Object(instance))
    }

    fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }
}

impl Display for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.name)
    }
}

#[derive(Debug)]
pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    fields: RefCell<HashMap<String, LoxValue>>,
}

impl LoxInstance {
    /// Reads a property: a field if present, otherwise the class's method
    /// bound to this instance.
    pub fn get(self: &Rc<Self>, ident: &LoxIdent) -> Result<LoxValue, RuntimeError> {
        if let Some(value) = self.fields.borrow().get(&ident.name) {
            return Ok(value.clone());
        }
        match self.class.find_method(&ident.name) {
            Some(method) => Ok(LoxValue::Function(Rc::new(method.bind(self)))),
            None => Err(RuntimeError::UndefinedProperty {
                ident: ident.clone(),
            }),
        }
    }

    /// Inserts or overwrites a field.
    pub fn set(&self, ident: &LoxIdent, value: LoxValue) {
        self.fields
            .borrow_mut()
            .insert(ident.name.clone(), value);
    }
}

impl Display for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name.name)
    }
}
