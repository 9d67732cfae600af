//! Tagged-variant Python syntax tree.
//!
//! Only the node kinds the compliance checks look at are modelled; every other
//! statement lowers to [`Stmt::Other`] and every other expression to
//! [`Expr::Other`].

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// One name in an import statement, with its optional `as` alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `import a.b, c as d`
    Import { names: Vec<Alias>, line: usize },
    /// `from ..a.b import c`; `module` is `None` for `from . import c`.
    ImportFrom {
        module: Option<String>,
        level: usize,
        names: Vec<Alias>,
        line: usize,
    },
    ClassDef {
        name: String,
        bases: Vec<Expr>,
        body: Vec<Stmt>,
        line: usize,
    },
    FunctionDef {
        name: String,
        is_async: bool,
        body: Vec<Stmt>,
        line: usize,
    },
    /// Statements nested in a compound statement (`if`, `try`, `with`, ...).
    Block { body: Vec<Stmt> },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Name(String),
    Attribute { value: Box<Expr>, attr: String },
    Other,
}

impl Expr {
    /// Final component of a name or attribute reference (`a.b.C` → `C`).
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Expr::Name(id) => Some(id),
            Expr::Attribute { attr, .. } => Some(attr),
            Expr::Other => None,
        }
    }
}

/// Visit every statement in `body` and all statements nested inside it,
/// pre-order, in source order.
pub fn walk<'a, F>(body: &'a [Stmt], visit: &mut F)
where
    F: FnMut(&'a Stmt),
{
    for stmt in body {
        visit(stmt);
        match stmt {
            Stmt::ClassDef { body, .. }
            | Stmt::FunctionDef { body, .. }
            | Stmt::Block { body } => walk(body, visit),
            Stmt::Import { .. } | Stmt::ImportFrom { .. } | Stmt::Other => {}
        }
    }
}
