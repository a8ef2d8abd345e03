//! Go text rendering of the conversion IR.
//!
//! Output uses tab indentation and no trailing newline. It is meant for
//! inspection and snapshot tests; a real build would hand the IR to its own
//! emitter.

use crate::ir::{Expr, Stmt};
use crate::resolve::FunctionBinding;

/// Precedence of postfix forms (selectors, calls, index) and atoms.
const PREC_POSTFIX: u8 = 6;
/// Precedence of prefix `*` and `!`.
const PREC_UNARY: u8 = 5;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary { op, .. } => op.precedence(),
        Expr::Deref(_) | Expr::Not(_) => PREC_UNARY,
        _ => PREC_POSTFIX,
    }
}

/// Render one expression.
pub fn render_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(expr, &mut out);
    out
}

/// Render a statement list, one statement per line.
pub fn render_stmts(stmts: &[Stmt]) -> String {
    let mut printer = Printer::default();
    printer.stmts(stmts);
    printer.out
}

/// Render a function binding: the argument preparation followed by the call.
pub fn render_binding(binding: &FunctionBinding) -> String {
    let mut printer = Printer::default();
    printer.stmts(&binding.bindings.stmts);
    printer.line(&render_expr(&binding.call()));
    printer.out
}

fn write_operand(expr: &Expr, min_prec: u8, out: &mut String) {
    if precedence(expr) < min_prec {
        out.push('(');
        write_expr(expr, out);
        out.push(')');
    } else {
        write_expr(expr, out);
    }
}

fn write_args(args: &[Expr], out: &mut String) {
    out.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(arg, out);
    }
    out.push(')');
}

fn write_str_lit(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Ident(name) => out.push_str(name),
        Expr::Int(n) => out.push_str(&n.to_string()),
        Expr::Str(text) => write_str_lit(text, out),
        Expr::Access {
            value,
            accessor,
            args,
        } => {
            write_operand(value, PREC_POSTFIX, out);
            out.push('.');
            out.push_str(accessor.method_name());
            write_args(args, out);
        }
        Expr::Call { func, args } => {
            write_operand(func, PREC_POSTFIX, out);
            write_args(args, out);
        }
        Expr::Cast { ty, expr } => {
            out.push_str(ty);
            out.push('(');
            write_expr(expr, out);
            out.push(')');
        }
        Expr::Field { base, name } => {
            write_operand(base, PREC_POSTFIX, out);
            out.push('.');
            out.push_str(name);
        }
        Expr::Index { base, index } => {
            write_operand(base, PREC_POSTFIX, out);
            out.push('[');
            write_expr(index, out);
            out.push(']');
        }
        Expr::Deref(inner) => {
            out.push('*');
            write_operand(inner, PREC_UNARY, out);
        }
        Expr::Not(inner) => {
            out.push('!');
            write_operand(inner, PREC_UNARY, out);
        }
        Expr::Binary { op, lhs, rhs } => {
            let prec = op.precedence();
            write_operand(lhs, prec, out);
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            // Left-associative: an equal-precedence right operand needs parens.
            write_operand(rhs, prec + 1, out);
        }
        Expr::Kind { pkg, kind } => {
            out.push_str(pkg);
            out.push('.');
            out.push_str(kind.const_name());
        }
        Expr::New(ty) => {
            out.push_str("new(");
            out.push_str(&ty.to_string());
            out.push(')');
        }
        Expr::Make { ty, len } => {
            out.push_str("make(");
            out.push_str(&ty.to_string());
            out.push_str(", ");
            write_expr(len, out);
            out.push(')');
        }
        Expr::Composite(ty) => {
            out.push_str(&ty.to_string());
            out.push_str("{}");
        }
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn block(&mut self, head: String, body: &[Stmt]) {
        self.line(&format!("{head} {{"));
        self.depth += 1;
        self.stmts(body);
        self.depth -= 1;
        self.line("}");
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::If { init, cond, body } => {
                let mut head = String::from("if ");
                match init.as_deref() {
                    Some(simple @ (Stmt::Define { .. } | Stmt::Assign { .. })) => {
                        head.push_str(&simple_stmt(simple));
                        head.push_str("; ");
                    }
                    // Go only allows simple statements in the header; anything
                    // else runs just before the conditional.
                    Some(other) => self.stmt(other),
                    None => {}
                }
                head.push_str(&render_expr(cond));
                self.block(head, body);
            }
            Stmt::CountedLoop {
                counter,
                bound,
                body,
            } => {
                let head = format!(
                    "for {counter} := 0; {counter} < {}; {counter}++",
                    render_expr(bound)
                );
                self.block(head, body);
            }
            simple => {
                let text = simple_stmt(simple);
                self.line(&text);
            }
        }
    }
}

/// Single-line rendering of declarations and assignments.
fn simple_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::VarDecl { name, ty } => format!("var {name} {ty}"),
        Stmt::Define { name, value } => format!("{name} := {}", render_expr(value)),
        Stmt::Assign { target, value } => {
            format!("{} = {}", render_expr(target), render_expr(value))
        }
        Stmt::If { .. } | Stmt::CountedLoop { .. } => render_stmts(std::slice::from_ref(stmt)),
    }
}
