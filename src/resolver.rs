use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display},
    mem,
};

use crate::{
    ast::{
        expr::{Expr, ExprKind},
        stmt::{self, Stmt, StmtKind},
    },
    data::LoxIdent,
    interpreter::Interpreter,
};

pub struct Resolver<'i> {
    interpreter: &'i mut Interpreter,
    state: ResolverState,
    scopes: Vec<HashMap<String, BindingState>>,
}

type RResult = Result<(), ResolveError>;

impl Resolver<'_> {
    /// Resolves the given program, recording every local variable's scope
    /// depth into the interpreter. The first scope violation aborts.
    pub fn resolve(mut self, stmts: &[Stmt]) -> RResult {
        self.resolve_stmts(stmts)
    }

    //
    // Statements
    //

    fn resolve_stmts(&mut self, stmts: &[Stmt]) -> RResult {
        for stmt in stmts {
            self.resolve_stmt(stmt)?;
        }
        Ok(())
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> RResult {
        use StmtKind::*;
        match &stmt.kind {
            VarDecl(var) => {
                self.declare(&var.name)?;
                if let Some(init) = &var.init {
                    self.resolve_expr(init)?;
                }
                self.define(&var.name);
                Ok(())
            }
            FunDecl(fun) => {
                self.declare(&fun.name)?;
                self.define(&fun.name);
                self.resolve_function(fun, FunctionState::Function)
            }
            ClassDecl(class) => {
                let old_class_state = mem::replace(&mut self.state.class, ClassState::Class);

                self.declare(&class.name)?;
                self.define(&class.name);

                if let Some(super_name) = &class.super_name {
                    if class.name.name == super_name.name {
                        return Err(self.error(
                            super_name.line,
                            "A class can't inherit from itself.",
                        ));
                    }
                    self.state.class = ClassState::Subclass;
                    self.resolve_binding(super_name);

                    // The class's methods close over an extra scope that
                    // binds `super`; it must exist at resolve time too.
                    self.begin_scope();
                    self.initialize("super");
                }

                self.scoped(|this| {
                    this.initialize("this");
                    for method in &class.methods {
                        let state = if method.name.name == "init" {
                            FunctionState::Init
                        } else {
                            FunctionState::Method
                        };
                        this.resolve_function(method, state)?;
                    }
                    Ok(())
                })?;

                if class.super_name.is_some() {
                    self.end_scope();
                }

                self.state.class = old_class_state;
                Ok(())
            }
            If(if_stmt) => {
                self.resolve_expr(&if_stmt.cond)?;
                self.resolve_stmt(&if_stmt.then_branch)?;
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.resolve_stmt(else_branch)?;
                }
                Ok(())
            }
            While(while_stmt) => {
                self.resolve_expr(&while_stmt.cond)?;
                self.resolve_stmt(&while_stmt.body)
            }
            Return(return_stmt) => {
                if self.state.function == FunctionState::None {
                    return Err(self.error(stmt.line, "Can't return from top-level code."));
                }
                if let Some(value) = &return_stmt.value {
                    if self.state.function == FunctionState::Init {
                        return Err(
                            self.error(stmt.line, "Can't return a value from an initializer.")
                        );
                    }
                    self.resolve_expr(value)?;
                }
                Ok(())
            }
            Print(print) => self.resolve_expr(&print.expr),
            Block(block) => self.scoped(|this| this.resolve_stmts(&block.stmts)),
            Expr(expr) => self.resolve_expr(&expr.expr),
        }
    }

    //
    // Expressions
    //

    fn resolve_expr(&mut self, expr: &Expr) -> RResult {
        use ExprKind::*;
        match &expr.kind {
            Lit(_) => Ok(()),
            Group(group) => self.resolve_expr(&group.expr),
            Unary(unary) => self.resolve_expr(&unary.operand),
            Binary(binary) => {
                self.resolve_expr(&binary.left)?;
                self.resolve_expr(&binary.right)
            }
            Logical(logical) => {
                self.resolve_expr(&logical.left)?;
                self.resolve_expr(&logical.right)
            }
            Var(var) => {
                if self.query(&var.name, BindingState::Declared) {
                    return Err(self.error(
                        var.name.line,
                        format!(
                            "Can't read local variable '{}' in its own initializer.",
                            var.name.name
                        ),
                    ));
                }
                self.resolve_binding(&var.name);
                Ok(())
            }
            Assignment(assignment) => {
                self.resolve_expr(&assignment.value)?;
                self.resolve_binding(&assignment.name);
                Ok(())
            }
            Call(call) => {
                self.resolve_expr(&call.callee)?;
                for arg in &call.args {
                    self.resolve_expr(arg)?;
                }
                Ok(())
            }
            // Properties are looked up dynamically by the interpreter, so
            // the resolver only touches the object (and value) expressions.
            Get(get) => self.resolve_expr(&get.object),
            Set(set) => {
                self.resolve_expr(&set.object)?;
                self.resolve_expr(&set.value)
            }
            This(this) => {
                if self.state.class == ClassState::None {
                    return Err(
                        self.error(this.name.line, "Can't use 'this' outside of a class.")
                    );
                }
                self.resolve_binding(&this.name);
                Ok(())
            }
            Super(sup) => {
                match self.state.class {
                    ClassState::None => {
                        return Err(self.error(
                            sup.super_ident.line,
                            "Can't use 'super' outside of a class.",
                        ));
                    }
                    ClassState::Class => {
                        return Err(self.error(
                            sup.super_ident.line,
                            "Can't use 'super' in a class with no superclass.",
                        ));
                    }
                    ClassState::Subclass => {}
                }
                self.resolve_binding(&sup.super_ident);
                Ok(())
            }
        }
    }
}

impl<'i> Resolver<'i> {
    pub fn new(interpreter: &'i mut Interpreter) -> Resolver<'i> {
        Self {
            interpreter,
            state: ResolverState::default(),
            scopes: Vec::new(),
        }
    }

    /// Declares a name in the innermost scope. No-op at the global scope,
    /// where redeclaration is permitted.
    fn declare(&mut self, ident: &LoxIdent) -> RResult {
        if let Some(top) = self.scopes.last_mut() {
            if top.contains_key(&ident.name) {
                return Err(ResolveError {
                    line: ident.line,
                    message: "Already variable with this name in this scope.".into(),
                });
            }
            top.insert(ident.name.clone(), BindingState::Declared);
        }
        Ok(())
    }

    /// Marks a declared name as initialized. No-op at the global scope.
    fn define(&mut self, ident: &LoxIdent) {
        if let Some(top) = self.scopes.last_mut() {
            top.insert(ident.name.clone(), BindingState::Defined);
        }
    }

    /// Inserts a synthetic binding (`this`, `super`) into the innermost
    /// scope, already initialized.
    fn initialize(&mut self, ident: impl Into<String>) {
        self.scopes
            .last_mut()
            .expect("Synthetic bindings require an open scope.")
            .insert(ident.into(), BindingState::Defined);
    }

    /// Checks the innermost scope's binding state for the given name.
    fn query(&self, ident: &LoxIdent, expected: BindingState) -> bool {
        self.scopes.last().and_then(|scope| scope.get(&ident.name)) == Some(&expected)
    }

    /// Scans the scope stack from innermost outward; a hit records the hop
    /// count with the interpreter. A miss means the name is a global.
    fn resolve_binding(&mut self, ident: &LoxIdent) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&ident.name) {
                self.interpreter.resolve_local(ident, depth);
                return;
            }
        }
    }

    fn resolve_function(&mut self, decl: &stmt::FunDecl, state: FunctionState) -> RResult {
        let old_function_state = mem::replace(&mut self.state.function, state);

        self.scoped(|this| {
            for param in &decl.params {
                this.declare(param)?;
                this.define(param);
            }
            this.resolve_stmts(&decl.body)
        })?;

        self.state.function = old_function_state;
        Ok(())
    }

    /// One should ideally use `scoped`. Callers of `begin_scope` must also
    /// call `end_scope`.
    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn scoped<I>(&mut self, inner: I) -> RResult
    where
        I: FnOnce(&mut Self) -> RResult,
    {
        self.begin_scope();
        let res = inner(self);
        self.end_scope();
        res
    }

    fn error(&self, line: usize, message: impl Into<String>) -> ResolveError {
        ResolveError {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
struct ResolverState {
    function: FunctionState,
    class: ClassState,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
enum FunctionState {
    #[default]
    None,
    Init,
    Method,
    Function,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
enum ClassState {
    #[default]
    None,
    Class,
    Subclass,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BindingState {
    Declared,
    Defined,
}

#[derive(Debug)]
pub struct ResolveError {
    pub message: String,
    pub line: usize,
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

impl Error for ResolveError {}
