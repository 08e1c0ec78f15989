use std::{
    collections::HashMap,
    io::{self, Write},
    mem,
    rc::Rc,
};

use smallvec::SmallVec;

use crate::{
    ast::{
        expr::{self, Expr, ExprKind},
        stmt::{self, Stmt, StmtKind},
        AstId,
    },
    data::{LoxCallable, LoxClass, LoxFunction, LoxIdent, LoxValue},
    interpreter::{control_flow::ControlFlow, environment::Environment, error::RuntimeError},
    token::TokenKind,
};

pub mod control_flow;
pub mod environment;
pub mod error;
mod natives;

pub type CFResult<T> = Result<T, ControlFlow<LoxValue, RuntimeError>>;

pub struct Interpreter {
    globals: Environment,
    environment: Environment,
    locals: HashMap<AstId, usize>,
    output: Box<dyn Write>,
}

macro_rules! bin_op_num {
    ( $left:tt $op:tt $right:tt -> $out:ident, $line:expr ) => {
        match ($left, $right) {
            (Number(left), Number(right)) => Ok($out(left $op right)),
            _ => Err(RuntimeError::UnsupportedType {
                message: "Operands must be numbers.".into(),
                line: $line,
            }
            .into()),
        }
    };
}

// The statement evaluator.
impl Interpreter {
    /// Executes the given program. Stops at the first runtime error.
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            if let Err(flow) = self.eval_stmt(stmt) {
                return Err(match flow {
                    ControlFlow::Err(error) => error,
                    ControlFlow::Return(_) => {
                        unreachable!("Top-level `return` is rejected by the resolver.")
                    }
                });
            }
        }
        Ok(())
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> CFResult<()> {
        use StmtKind::*;
        match &stmt.kind {
            Expr(expr_stmt) => {
                self.eval_expr(&expr_stmt.expr)?;
                Ok(())
            }
            Print(print) => {
                let value = self.eval_expr(&print.expr)?;
                writeln!(self.output, "{}", value).expect("Failed to write program output.");
                Ok(())
            }
            VarDecl(var) => {
                let value = match &var.init {
                    Some(init) => self.eval_expr(init)?,
                    None => LoxValue::Nil,
                };
                self.environment.define(var.name.name.clone(), value);
                Ok(())
            }
            Block(block) => self.eval_block(
                &block.stmts,
                Environment::new_enclosed(&self.environment),
            ),
            If(if_stmt) => {
                if is_truthy(&self.eval_expr(&if_stmt.cond)?) {
                    self.eval_stmt(&if_stmt.then_branch)
                } else if let Some(else_branch) = &if_stmt.else_branch {
                    self.eval_stmt(else_branch)
                } else {
                    Ok(())
                }
            }
            While(while_stmt) => {
                while is_truthy(&self.eval_expr(&while_stmt.cond)?) {
                    self.eval_stmt(&while_stmt.body)?;
                }
                Ok(())
            }
            FunDecl(decl) => {
                let function = LoxFunction {
                    decl: Rc::new(decl.clone()),
                    closure: self.environment.clone(),
                    is_initializer: false,
                };
                self.environment
                    .define(decl.name.name.clone(), LoxValue::Function(Rc::new(function)));
                Ok(())
            }
            Return(return_stmt) => {
                let value = match &return_stmt.value {
                    Some(value) => self.eval_expr(value)?,
                    None => LoxValue::Nil,
                };
                Err(ControlFlow::Return(value))
            }
            ClassDecl(class) => self.eval_class_decl(class),
        }
    }

    fn eval_class_decl(&mut self, class: &stmt::ClassDecl) -> CFResult<()> {
        let superclass = match &class.super_name {
            Some(super_name) => match self.lookup_ident(super_name)? {
                LoxValue::Class(superclass) => Some(superclass),
                _ => {
                    return Err(RuntimeError::UnsupportedType {
                        message: "Superclass must be a class.".into(),
                        line: super_name.line,
                    }
                    .into())
                }
            },
            None => None,
        };

        // Two-step declaration: the name enters scope first (as nil) so
        // method bodies may refer to the class once it is assigned below.
        self.environment.define(class.name.name.clone(), LoxValue::Nil);

        let method_env = match &superclass {
            Some(superclass) => {
                let env = Environment::new_enclosed(&self.environment);
                env.define("super", LoxValue::Class(Rc::clone(superclass)));
                env
            }
            None => self.environment.clone(),
        };

        let methods = class
            .methods
            .iter()
            .map(|decl| {
                let function = LoxFunction {
                    decl: Rc::new(decl.clone()),
                    closure: method_env.clone(),
                    is_initializer: decl.name.name == "init",
                };
                (decl.name.name.clone(), function)
            })
            .collect();

        let class_value = LoxValue::Class(Rc::new(LoxClass {
            name: class.name.clone(),
            superclass,
            methods,
        }));
        self.environment.assign(&class.name, class_value)?;
        Ok(())
    }

    /// Evaluates statements against the given environment, restoring the
    /// previous one on every exit path (including unwinding).
    pub fn eval_block(&mut self, stmts: &[Stmt], env: Environment) -> CFResult<()> {
        let previous = mem::replace(&mut self.environment, env);
        let result = stmts.iter().try_for_each(|stmt| self.eval_stmt(stmt));
        self.environment = previous;
        result
    }
}

// The expression evaluator.
impl Interpreter {
    fn eval_expr(&mut self, expr: &Expr) -> CFResult<LoxValue> {
        use ExprKind::*;
        match &expr.kind {
            Lit(lit) => Ok(lit.value.clone()),
            Group(group) => self.eval_expr(&group.expr),
            Unary(unary) => self.eval_unary(unary),
            Binary(binary) => self.eval_binary(binary),
            Logical(logical) => self.eval_logical(logical),
            Var(var) => Ok(self.lookup_ident(&var.name)?),
            This(this) => Ok(self.lookup_ident(&this.name)?),
            Assignment(assignment) => {
                let value = self.eval_expr(&assignment.value)?;
                match self.locals.get(&assignment.name.id) {
                    Some(depth) => {
                        Ok(self.environment.assign_at(*depth, &assignment.name, value))
                    }
                    None => Ok(self.globals.assign(&assignment.name, value)?),
                }
            }
            Call(call) => self.eval_call(call, expr.line),
            Get(get) => {
                let object = self.eval_expr(&get.object)?;
                match object {
                    LoxValue::Object(instance) => Ok(instance.get(&get.name)?),
                    _ => Err(RuntimeError::UnsupportedType {
                        message: "Only instances have properties.".into(),
                        line: get.name.line,
                    }
                    .into()),
                }
            }
            Set(set) => {
                let object = self.eval_expr(&set.object)?;
                let instance = match object {
                    LoxValue::Object(instance) => instance,
                    _ => {
                        return Err(RuntimeError::UnsupportedType {
                            message: "Only instances have fields.".into(),
                            line: set.name.line,
                        }
                        .into())
                    }
                };
                let value = self.eval_expr(&set.value)?;
                instance.set(&set.name, value.clone());
                Ok(value)
            }
            Super(sup) => self.eval_super(sup),
        }
    }

    fn eval_unary(&mut self, unary: &expr::Unary) -> CFResult<LoxValue> {
        let operand = self.eval_expr(&unary.operand)?;
        match &unary.operator.kind {
            TokenKind::Minus => match operand {
                LoxValue::Number(number) => Ok(LoxValue::Number(-number)),
                _ => Err(RuntimeError::UnsupportedType {
                    message: "Operand must be a number.".into(),
                    line: unary.operator.line,
                }
                .into()),
            },
            TokenKind::Bang => Ok(LoxValue::Boolean(!is_truthy(&operand))),
            unexpected => unreachable!("Invalid unary operator ({:?}).", unexpected),
        }
    }

    fn eval_binary(&mut self, binary: &expr::Binary) -> CFResult<LoxValue> {
        use LoxValue::*;
        let left = self.eval_expr(&binary.left)?;
        let right = self.eval_expr(&binary.right)?;
        let line = binary.operator.line;
        match &binary.operator.kind {
            TokenKind::Plus => match (left, right) {
                (Number(left), Number(right)) => Ok(Number(left + right)),
                (String(left), String(right)) => Ok(String(left + &right)),
                _ => Err(RuntimeError::UnsupportedType {
                    message: "Operands must be two numbers or two strings.".into(),
                    line,
                }
                .into()),
            },

            TokenKind::Minus => bin_op_num!(left - right -> Number, line),
            TokenKind::Star => bin_op_num!(left * right -> Number, line),
            // Division by zero follows IEEE 754 (infinity or NaN).
            TokenKind::Slash => bin_op_num!(left / right -> Number, line),

            TokenKind::Greater => bin_op_num!(left > right -> Boolean, line),
            TokenKind::GreaterEqual => bin_op_num!(left >= right -> Boolean, line),
            TokenKind::Less => bin_op_num!(left < right -> Boolean, line),
            TokenKind::LessEqual => bin_op_num!(left <= right -> Boolean, line),

            TokenKind::EqualEqual => Ok(Boolean(lox_value_equal(&left, &right))),
            TokenKind::BangEqual => Ok(Boolean(!lox_value_equal(&left, &right))),

            unexpected => unreachable!("Invalid binary operator ({:?}).", unexpected),
        }
    }

    /// Short-circuiting `and`/`or`. The result is the deciding operand's
    /// value, not a coerced boolean.
    fn eval_logical(&mut self, logical: &expr::Logical) -> CFResult<LoxValue> {
        let left = self.eval_expr(&logical.left)?;
        let truthy = is_truthy(&left);
        match &logical.operator.kind {
            TokenKind::Or if truthy => Ok(left),
            TokenKind::And if !truthy => Ok(left),
            TokenKind::Or | TokenKind::And => self.eval_expr(&logical.right),
            unexpected => unreachable!("Invalid logical operator ({:?}).", unexpected),
        }
    }

    fn eval_call(&mut self, call: &expr::Call, line: usize) -> CFResult<LoxValue> {
        let callee = self.eval_expr(&call.callee)?;
        let mut args: SmallVec<[LoxValue; 4]> = SmallVec::new();
        for arg in &call.args {
            args.push(self.eval_expr(arg)?);
        }

        let callable: Rc<dyn LoxCallable> = match callee {
            LoxValue::Function(function) => function,
            LoxValue::NativeFunction(native) => native,
            LoxValue::Class(class) => class,
            _ => {
                return Err(RuntimeError::UnsupportedType {
                    message: "Can only call functions and classes.".into(),
                    line,
                }
                .into())
            }
        };
        if args.len() != callable.arity() {
            return Err(RuntimeError::BadArity {
                expected: callable.arity(),
                got: args.len(),
                line,
            }
            .into());
        }
        callable.call(self, &args)
    }

    fn eval_super(&mut self, sup: &expr::Super) -> CFResult<LoxValue> {
        let depth = *self
            .locals
            .get(&sup.super_ident.id)
            .unwrap_or_else(|| unreachable!("`super` is always a resolved local."));
        let superclass = match self.environment.get_at(depth, "super") {
            LoxValue::Class(superclass) => superclass,
            unexpected => unreachable!("`super` bound to a non-class ({:?}).", unexpected),
        };
        // `this` lives one scope inside the one binding `super`.
        let instance = match self.environment.get_at(depth - 1, "this") {
            LoxValue::Object(instance) => instance,
            unexpected => unreachable!("`this` bound to a non-instance ({:?}).", unexpected),
        };
        match superclass.find_method(&sup.method.name) {
            Some(method) => Ok(LoxValue::Function(Rc::new(method.bind(&instance)))),
            None => Err(RuntimeError::UndefinedProperty {
                ident: sup.method.clone(),
            }
            .into()),
        }
    }

    fn lookup_ident(&self, ident: &LoxIdent) -> Result<LoxValue, RuntimeError> {
        match self.locals.get(&ident.id) {
            Some(depth) => Ok(self.environment.get_at(*depth, &ident.name)),
            None => self.globals.get(ident),
        }
    }
}

// Construction and resolution bookkeeping.
impl Interpreter {
    /// Creates an interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates an interpreter printing to the given writer.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let globals = Environment::new();
        natives::install(&globals);
        Self {
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records the scope hop count of a resolved identifier occurrence.
    /// Called by the resolver; identifiers without an entry are globals.
    pub fn resolve_local(&mut self, ident: &LoxIdent, depth: usize) {
        self.locals.insert(ident.id, depth);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

//
// Some other utilities.
//

/// Checks the truthiness of a value: `nil` and `false` are falsy, everything
/// else is truthy.
fn is_truthy(value: &LoxValue) -> bool {
    use LoxValue::*;
    match value {
        Boolean(boolean) => *boolean,
        Nil => false,
        _ => true,
    }
}

/// Checks if two values are equal. No type coercion is performed, so values
/// of different types are never equal. Functions, classes and instances
/// compare by identity.
fn lox_value_equal(a: &LoxValue, b: &LoxValue) -> bool {
    use LoxValue::*;
    match (a, b) {
        (Nil, Nil) => true,
        (Boolean(a), Boolean(b)) => a == b,
        (Number(a), Number(b)) => a == b,
        (String(a), String(b)) => a == b,
        (Function(a), Function(b)) => Rc::ptr_eq(a, b),
        (NativeFunction(a), NativeFunction(b)) => Rc::ptr_eq(a, b),
        (Class(a), Class(b)) => Rc::ptr_eq(a, b),
        (Object(a), Object(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
