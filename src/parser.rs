use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::ast::{Alias, Expr, Module, Stmt};
use crate::errors::{KitError, Result};

/// Parse Python source into a [`Module`].
///
/// Source that tree-sitter can only recover from (any `ERROR` or missing
/// node) is rejected with [`KitError::Syntax`] pointing at the first problem.
pub fn parse_module(path: &Path, text: &str) -> Result<Module> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::language())?;

    let tree = parser.parse(text, None).ok_or_else(|| KitError::Syntax {
        path: path.to_path_buf(),
        line: 1,
        column: 1,
    })?;
    let root = tree.root_node();

    if let Some(bad) = first_error(root) {
        let pos = bad.start_position();
        return Err(KitError::Syntax {
            path: path.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    if let Some(legacy) = first_legacy_construct(root, text) {
        let pos = legacy.start_position();
        return Err(KitError::Syntax {
            path: path.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    let lowering = Lowering { text };
    Ok(Module {
        body: lowering.statements(root),
    })
}

/// First Python 2 only construct in document order.
///
/// The grammar still accepts `print`/`exec` statements, `<>`, backtick repr
/// and legacy integer literals, none of which are valid Python 3.
fn first_legacy_construct<'t>(root: Node<'t>, text: &str) -> Option<Node<'t>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if is_legacy(node, text) {
            return Some(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn is_legacy(node: Node<'_>, text: &str) -> bool {
    let source = &text[node.byte_range()];
    match node.kind() {
        "print_statement" | "exec_statement" | "<>" => true,
        "string_start" => source.ends_with('`'),
        "integer" => is_legacy_integer(source),
        _ => false,
    }
}

/// `0777`-style octal or an `L` long suffix.
fn is_legacy_integer(literal: &str) -> bool {
    if literal.ends_with(['l', 'L']) {
        return true;
    }
    if literal.ends_with(['j', 'J']) {
        return false;
    }
    let mut chars = literal.chars();
    if chars.next() != Some('0') {
        return false;
    }
    let rest = chars.as_str();
    !rest.is_empty()
        && rest.starts_with(|c: char| c.is_ascii_digit() || c == '_')
        && rest.chars().any(|c| c.is_ascii_digit() && c != '0')
}

/// First `ERROR` or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Compound statements and clauses whose blocks may hold further statements.
fn is_compound(kind: &str) -> bool {
    matches!(
        kind,
        "block"
            | "if_statement"
            | "elif_clause"
            | "else_clause"
            | "for_statement"
            | "while_statement"
            | "try_statement"
            | "except_clause"
            | "except_group_clause"
            | "finally_clause"
            | "with_statement"
            | "match_statement"
            | "case_clause"
    )
}

/// Converts the concrete tree-sitter tree into [`Stmt`]/[`Expr`] values.
struct Lowering<'src> {
    text: &'src str,
}

impl Lowering<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        &self.text[node.byte_range()]
    }

    /// Lower every statement directly under `node` (a module or block).
    fn statements(&self, node: Node<'_>) -> Vec<Stmt> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| self.statement(child))
            .collect()
    }

    fn statement(&self, node: Node<'_>) -> Stmt {
        let line = node.start_position().row + 1;
        match node.kind() {
            "import_statement" => Stmt::Import {
                names: self.aliases(node),
                line,
            },
            "import_from_statement" => self.import_from(node, line),
            "future_import_statement" => Stmt::ImportFrom {
                module: Some("__future__".to_string()),
                level: 0,
                names: self.aliases(node),
                line,
            },
            "class_definition" => self.class_def(node, line),
            "function_definition" => self.function_def(node, line),
            "decorated_definition" => match node.child_by_field_name("definition") {
                Some(definition) => self.statement(definition),
                None => Stmt::Other,
            },
            "block" => Stmt::Block {
                body: self.statements(node),
            },
            kind if is_compound(kind) => {
                let mut cursor = node.walk();
                let body = node
                    .named_children(&mut cursor)
                    .filter(|child| is_compound(child.kind()))
                    .map(|child| self.statement(child))
                    .collect();
                Stmt::Block { body }
            }
            _ => Stmt::Other,
        }
    }

    /// Names bound by `import ...` / `from x import ...` (the `name` field).
    fn aliases(&self, node: Node<'_>) -> Vec<Alias> {
        let mut cursor = node.walk();
        let mut names: Vec<Alias> = node
            .children_by_field_name("name", &mut cursor)
            .filter_map(|child| match child.kind() {
                "aliased_import" => {
                    let name = child.child_by_field_name("name")?;
                    Some(Alias {
                        name: self.dotted(name),
                        asname: child
                            .child_by_field_name("alias")
                            .map(|alias| self.text(alias).to_string()),
                    })
                }
                _ => Some(Alias {
                    name: self.dotted(child),
                    asname: None,
                }),
            })
            .collect();

        let mut cursor = node.walk();
        let wildcard = node
            .named_children(&mut cursor)
            .any(|child| child.kind() == "wildcard_import");
        if wildcard {
            names.push(Alias {
                name: "*".to_string(),
                asname: None,
            });
        }
        names
    }

    fn import_from(&self, node: Node<'_>, line: usize) -> Stmt {
        let (module, level) = match node.child_by_field_name("module_name") {
            Some(target) if target.kind() == "relative_import" => {
                let mut cursor = target.walk();
                let mut module = None;
                let mut level = 0;
                for child in target.named_children(&mut cursor) {
                    match child.kind() {
                        "import_prefix" => {
                            level = self.text(child).chars().filter(|c| *c == '.').count();
                        }
                        "dotted_name" => module = Some(self.dotted(child)),
                        _ => {}
                    }
                }
                (module, level)
            }
            Some(target) => (Some(self.dotted(target)), 0),
            None => (None, 0),
        };
        Stmt::ImportFrom {
            module,
            level,
            names: self.aliases(node),
            line,
        }
    }

    /// `a . b` and `a.b` both normalise to `a.b`.
    fn dotted(&self, node: Node<'_>) -> String {
        if node.kind() != "dotted_name" {
            return self.text(node).to_string();
        }
        let mut cursor = node.walk();
        let parts: Vec<&str> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "identifier")
            .map(|child| self.text(child))
            .collect();
        parts.join(".")
    }

    fn class_def(&self, node: Node<'_>, line: usize) -> Stmt {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();

        let bases = match node.child_by_field_name("superclasses") {
            Some(args) => {
                let mut cursor = args.walk();
                args.named_children(&mut cursor)
                    .filter(|arg| !matches!(arg.kind(), "keyword_argument" | "comment"))
                    .map(|arg| self.expr(arg))
                    .collect()
            }
            None => Vec::new(),
        };

        let body = node
            .child_by_field_name("body")
            .map(|b| self.statements(b))
            .unwrap_or_default();

        Stmt::ClassDef {
            name,
            bases,
            body,
            line,
        }
    }

    fn function_def(&self, node: Node<'_>, line: usize) -> Stmt {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let is_async = node.child(0).is_some_and(|first| first.kind() == "async");
        let body = node
            .child_by_field_name("body")
            .map(|b| self.statements(b))
            .unwrap_or_default();
        Stmt::FunctionDef {
            name,
            is_async,
            body,
            line,
        }
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" => Expr::Name(self.text(node).to_string()),
            "attribute" => {
                let value = node
                    .child_by_field_name("object")
                    .map(|object| self.expr(object))
                    .unwrap_or(Expr::Other);
                match node.child_by_field_name("attribute") {
                    Some(attr) => Expr::Attribute {
                        value: Box::new(value),
                        attr: self.text(attr).to_string(),
                    },
                    None => Expr::Other,
                }
            }
            _ => Expr::Other,
        }
    }
}
