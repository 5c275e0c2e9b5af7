//! Core formatting engine.

use morph_ir::{Ast, ExprId, ExprKind, PathSegment, StmtId, StmtKind};

use crate::emitter::{Emitter, StringEmitter};

/// Format a whole program to canonical source.
pub fn format_program(ast: &Ast) -> String {
    let mut formatter = Formatter::new(ast, StringEmitter::new());
    formatter.format_stmts(ast.root(), 0);
    let mut out = formatter.out;
    out.ensure_trailing_newline();
    out.output()
}

/// Walks statements and expressions, writing to an [`Emitter`].
pub struct Formatter<'a, E: Emitter> {
    ast: &'a Ast,
    out: E,
    indent: usize,
}

impl<'a, E: Emitter> Formatter<'a, E> {
    pub fn new(ast: &'a Ast, out: E) -> Self {
        Formatter { ast, out, indent: 0 }
    }

    pub fn finish(self) -> E {
        self.out
    }

    /// Format one statement starting at the current column. Nested lines are
    /// indented relative to the current level; no trailing newline.
    pub fn format_stmt(&mut self, id: StmtId) {
        match &self.ast.stmt(id).kind {
            StmtKind::Set { target, value } => {
                self.out.emit("set ");
                self.format_expr(*target);
                self.out.emit(" = ");
                self.format_expr(*value);
            }
            StmtKind::When {
                condition,
                consequence,
                alternative,
            } => {
                self.out.emit("when ");
                self.format_expr(*condition);
                self.out.emit(" :: ");
                self.format_stmt(*consequence);
                if let Some(alternative) = alternative {
                    self.out.emit(" else ");
                    self.format_stmt(*alternative);
                }
            }
            StmtKind::Block(stmts) => self.format_block(stmts),
            StmtKind::Expr(expr) => self.format_expr(*expr),
        }
    }

    fn format_block(&mut self, stmts: &[StmtId]) {
        if stmts.is_empty() {
            self.out.emit("{}");
            return;
        }
        self.out.emit("{");
        self.out.emit_newline();
        self.indent += 1;
        self.format_stmts(stmts, self.indent);
        self.indent -= 1;
        self.out.emit_indent(self.indent);
        self.out.emit("}");
    }

    /// One statement per line. Newlines do not end statements, so a
    /// statement followed by an expression statement gets a `;`: otherwise
    /// `-x`, `(x)` or `[x]` on the next line would continue it.
    fn format_stmts(&mut self, stmts: &[StmtId], indent: usize) {
        for (i, &stmt) in stmts.iter().enumerate() {
            self.out.emit_indent(indent);
            self.format_stmt(stmt);
            let ast: &Ast = self.ast;
            let next = stmts.get(i + 1).map(|&next| &ast.stmt(next).kind);
            if matches!(next, Some(StmtKind::Expr(_))) {
                self.out.emit(";");
            }
            self.out.emit_newline();
        }
    }

    pub fn format_expr(&mut self, id: ExprId) {
        match &self.ast.expr(id).kind {
            ExprKind::Int(value) => self.out.emit(&value.to_string()),
            ExprKind::Float(value) => self.out.emit(&float_literal(*value)),
            ExprKind::Bool(true) => self.out.emit("true"),
            ExprKind::Bool(false) => self.out.emit("false"),
            ExprKind::Null => self.out.emit("null"),
            ExprKind::Str(value) => self.out.emit(&quote(value)),
            ExprKind::Array(items) => {
                self.out.emit("[");
                self.format_list(items);
                self.out.emit("]");
            }
            ExprKind::Map(entries) => {
                self.out.emit("{");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.emit(", ");
                    }
                    if is_bare_name(key) {
                        self.out.emit(key);
                    } else {
                        self.out.emit(&quote(key));
                    }
                    self.out.emit(": ");
                    self.format_expr(*value);
                }
                self.out.emit("}");
            }
            ExprKind::Ident(name) => self.out.emit(name),
            ExprKind::Path { head, segment } => {
                self.format_operand(*head);
                match segment {
                    PathSegment::Field(name) if is_bare_name(name) => {
                        self.out.emit(".");
                        self.out.emit(name);
                    }
                    PathSegment::Field(name) => {
                        self.out.emit("[");
                        self.out.emit(&quote(name));
                        self.out.emit("]");
                    }
                    PathSegment::Index(index) => {
                        self.out.emit("[");
                        self.format_expr(*index);
                        self.out.emit("]");
                    }
                }
            }
            ExprKind::Prefix { op, operand } => {
                self.out.emit(op.as_symbol());
                self.format_operand(*operand);
            }
            ExprKind::Binary { op, left, right } => {
                self.format_operand(*left);
                self.out.emit(" ");
                self.out.emit(op.as_symbol());
                self.out.emit(" ");
                self.format_operand(*right);
            }
            ExprKind::Call { name, args } => {
                self.out.emit(name);
                self.out.emit("(");
                self.format_list(args);
                self.out.emit(")");
            }
            ExprKind::NamespacedCall {
                namespace,
                name,
                args,
            } => {
                self.out.emit(namespace);
                self.out.emit(".");
                self.out.emit(name);
                self.out.emit("(");
                self.format_list(args);
                self.out.emit(")");
            }
            ExprKind::Arrow { param, body } => {
                self.out.emit(param);
                self.out.emit(" ~> ");
                self.format_stmt(*body);
            }
        }
    }

    /// Operator operands and path heads: nested operations get parentheses.
    fn format_operand(&mut self, id: ExprId) {
        if matches!(
            self.ast.expr(id).kind,
            ExprKind::Binary { .. } | ExprKind::Prefix { .. }
        ) {
            self.out.emit("(");
            self.format_expr(id);
            self.out.emit(")");
        } else {
            self.format_expr(id);
        }
    }

    fn format_list(&mut self, items: &[ExprId]) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.out.emit(", ");
            }
            self.format_expr(item);
        }
    }
}

/// Shortest round-tripping decimal form that still lexes as a float.
fn float_literal(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `name` can be written without quotes as a map key or field.
fn is_bare_name(name: &str) -> bool {
    let rest = name.strip_prefix('@').unwrap_or(name);
    let mut chars = rest.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
