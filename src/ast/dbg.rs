//! Debug printers behind the REPL's `:lex` and `:ast` toggles.

use crate::{
    ast::{
        expr::{Expr, ExprKind},
        stmt::{Stmt, StmtKind},
    },
    scanner::Scanner,
};

pub fn print_scanned_tokens(src: &str) {
    let (tokens, diagnostics) = Scanner::new(src).scan_tokens();
    for token in &tokens {
        println!("[line {}] {:?}", token.line, token.kind);
    }
    diagnostics.report_all();
}

pub fn print_program_tree(stmts: &[Stmt]) {
    for stmt in stmts {
        print_stmt(stmt, "");
    }
}

fn print_stmt(stmt: &Stmt, indent: &str) {
    use StmtKind::*;
    let next = &format!("{}    ", indent);
    match &stmt.kind {
        Expr(expr) => {
            println!("{}ExprStmt", indent);
            print_expr(&expr.expr, next);
        }
        Print(print) => {
            println!("{}Print", indent);
            print_expr(&print.expr, next);
        }
        VarDecl(var) => {
            println!("{}VarDecl ({})", indent, var.name);
            if let Some(init) = &var.init {
                print_expr(init, next);
            }
        }
        Block(block) => {
            println!("{}Block", indent);
            for stmt in &block.stmts {
                print_stmt(stmt, next);
            }
        }
        If(if_stmt) => {
            println!("{}If", indent);
            print_expr(&if_stmt.cond, next);
            print_stmt(&if_stmt.then_branch, next);
            if let Some(else_branch) = &if_stmt.else_branch {
                print_stmt(else_branch, next);
            }
        }
        While(while_stmt) => {
            println!("{}While", indent);
            print_expr(&while_stmt.cond, next);
            print_stmt(&while_stmt.body, next);
        }
        FunDecl(fun) => {
            println!("{}FunDecl ({} ({}))", indent, fun.name, params(&fun.params));
            for stmt in &fun.body {
                print_stmt(stmt, next);
            }
        }
        Return(return_stmt) => {
            println!("{}Return", indent);
            if let Some(value) = &return_stmt.value {
                print_expr(value, next);
            }
        }
        ClassDecl(class) => {
            match &class.super_name {
                Some(super_name) => {
                    println!("{}ClassDecl ({} < {})", indent, class.name, super_name)
                }
                None => println!("{}ClassDecl ({})", indent, class.name),
            }
            for method in &class.methods {
                println!("{}Method ({} ({}))", next, method.name, params(&method.params));
                for stmt in &method.body {
                    print_stmt(stmt, &format!("{}    ", next));
                }
            }
        }
    }
}

fn print_expr(expr: &Expr, indent: &str) {
    use ExprKind::*;
    let next = &format!("{}    ", indent);
    match &expr.kind {
        Lit(lit) => println!("{}Lit ({:?})", indent, lit.value),
        Group(group) => {
            println!("{}Group", indent);
            print_expr(&group.expr, next);
        }
        Unary(unary) => {
            println!("{}Unary (op: {})", indent, unary.operator.kind);
            print_expr(&unary.operand, next);
        }
        Binary(binary) => {
            println!("{}Binary (op: {})", indent, binary.operator.kind);
            print_expr(&binary.left, next);
            print_expr(&binary.right, next);
        }
        Logical(logical) => {
            println!("{}Logical (op: {})", indent, logical.operator.kind);
            print_expr(&logical.left, next);
            print_expr(&logical.right, next);
        }
        Var(var) => println!("{}Var ({})", indent, var.name),
        Assignment(assignment) => {
            println!("{}Assignment ({})", indent, assignment.name);
            print_expr(&assignment.value, next);
        }
        Call(call) => {
            println!("{}Call", indent);
            print_expr(&call.callee, next);
            for arg in &call.args {
                print_expr(arg, next);
            }
        }
        Get(get) => {
            println!("{}Get ({})", indent, get.name);
            print_expr(&get.object, next);
        }
        Set(set) => {
            println!("{}Set ({})", indent, set.name);
            print_expr(&set.object, next);
            print_expr(&set.value, next);
        }
        This(_) => println!("{}This", indent),
        Super(sup) => println!("{}Super (method: {})", indent, sup.method),
    }
}

fn params(params: &[crate::data::LoxIdent]) -> String {
    params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
