// src/pretty/mod.rs
//! Best-effort PHP reformatter.
//!
//! Walks the concrete syntax tree and re-emits the constructs it knows with
//! canonical spacing and indentation. Tokens without a rendering rule are
//! dropped where a construct re-draws its own delimiters (blocks, parens),
//! so the output is a normalization, not a byte-faithful round trip.

use tree_sitter::Node;

use crate::error::ParseError;
use crate::parser::{self, node_text};

pub struct PrettyPrinter {
    indent: String,
}

impl PrettyPrinter {
    #[must_use]
    pub fn new(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
        }
    }

    /// Parses and reformats a PHP source string.
    ///
    /// # Errors
    /// Returns [`ParseError`] if the parser rejects the input.
    pub fn format(&self, source: &str) -> Result<String, ParseError> {
        let tree = parser::parse(source.as_bytes())?;
        let mut writer = Writer {
            indent: &self.indent,
            source: source.as_bytes(),
            out: String::new(),
            level: 0,
        };
        writer.visit(tree.root_node());
        Ok(writer.out)
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new("    ")
    }
}

struct Writer<'a> {
    indent: &'a str,
    source: &'a [u8],
    out: String,
    level: usize,
}

impl<'a> Writer<'a> {
    fn visit(&mut self, node: Node<'_>) {
        match node.kind() {
            "php_tag" => {
                self.write(self.content(node));
                self.write("\n");
            }

            "echo_statement" | "return_statement" => self.keyword_statement(node),

            "trait_declaration" => self.keyword_prefixed(node, "trait "),
            "interface_declaration" => self.keyword_prefixed(node, "interface "),
            "enum_declaration" => self.keyword_prefixed(node, "enum "),
            "class_declaration" => self.keyword_prefixed(node, "class "),
            "const_declaration" => self.keyword_prefixed(node, "const "),
            "method_declaration" => self.keyword_prefixed(node, "function "),

            "final_modifier" => self.write("final "),
            "abstract_modifier" => self.write("abstract "),
            "readonly_modifier" => self.write("readonly "),
            "static_modifier" => self.write("static "),
            "visibility_modifier" => {
                let text = self.content(node);
                self.write(text);
                self.write(" ");
            }

            "compound_statement" => {
                self.write(" {");
                self.level += 1;
                self.visit_children(node);
                self.level = self.level.saturating_sub(1);
                self.write("}");
            }

            "if_statement" => {
                self.write_line("if ");
                self.visit_children(node);
            }
            "while_statement" => {
                self.write_line("while ");
                self.visit_children(node);
            }
            "for_statement" => {
                self.write("for ");
                self.clauses(node, &["(", ";", ")"]);
            }
            "foreach_statement" => {
                self.write("foreach ");
                self.clauses(node, &["(", "as", ")"]);
            }
            "else_if_clause" => {
                self.write(" elseif ");
                self.visit_children(node);
            }
            "else_clause" => {
                self.write(" else");
                for child in node.children(&mut node.walk()) {
                    if child.kind() == "compound_statement" {
                        self.visit(child);
                    }
                }
            }
            "update_expression" => {
                let text = self.content(node);
                self.write_line(text);
            }

            "parenthesized_expression" => {
                self.write("(");
                self.visit_children(node);
                self.write(")");
            }

            "integer" | "float" | "boolean" | "string" | "encapsed_string" | "variable_name"
            | "name" => self.write(self.content(node)),

            "use_declaration" => {
                self.write("use ");
                self.visit_children(node);
            }

            "array_creation_expression" => {
                if let Some(first) = node.child(0) {
                    self.write(self.content(first));
                }
                for i in 1..node.child_count() {
                    let Some(child) = node.child(i) else { continue };
                    if child.kind() == "," {
                        self.write(", ");
                    } else {
                        self.write(self.content(child));
                    }
                }
            }

            "function_definition" => {
                if let Some(first) = node.child(0) {
                    self.write(self.content(first));
                    self.write(" ");
                }
                for i in 1..node.child_count() {
                    let Some(child) = node.child(i) else { continue };
                    if child.kind() == "name" {
                        self.write(self.content(child));
                    } else {
                        self.visit(child);
                    }
                }
            }
            "formal_parameters" => {
                for child in node.children(&mut node.walk()) {
                    if child.kind() == "," {
                        self.write(", ");
                    } else {
                        self.write(self.content(child));
                    }
                }
            }

            ";" => {
                self.write(";\n");
            }

            kind if is_operator(kind) => {
                self.write(" ");
                self.write(kind);
                self.write(" ");
            }

            _ => self.visit_children(node),
        }
    }

    /// Statements that start with their keyword on a fresh line: the
    /// keyword token, then the rest of the children verbatim except for the
    /// terminating semicolon.
    fn keyword_statement(&mut self, node: Node<'_>) {
        if let Some(first) = node.child(0) {
            let text = self.content(first);
            self.write_line(text);
            self.write(" ");
        }
        for i in 1..node.child_count() {
            let Some(child) = node.child(i) else { continue };
            if child.kind() == ";" {
                self.visit(child);
            } else {
                self.write(self.content(child));
            }
        }
    }

    fn keyword_prefixed(&mut self, node: Node<'_>, keyword: &str) {
        self.write(keyword);
        self.visit_children(node);
    }

    /// Loop headers: separator tokens are written with a trailing space,
    /// everything else is visited.
    fn clauses(&mut self, node: Node<'_>, separators: &[&str]) {
        let mut index = 0;
        for child in node.children(&mut node.walk()) {
            if child.kind() == separators[index] {
                self.write(separators[index]);
                self.write(" ");
                index = (index + 1) % separators.len();
            } else {
                self.visit(child);
            }
        }
    }

    fn visit_children(&mut self, node: Node<'_>) {
        for child in node.children(&mut node.walk()) {
            self.visit(child);
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_line(&mut self, text: &str) {
        self.out.push('\n');
        for _ in 0..self.level {
            self.out.push_str(self.indent);
        }
        self.out.push_str(text);
    }

    fn content(&self, node: Node<'_>) -> &'a str {
        node_text(node, self.source)
    }
}

fn is_operator(kind: &str) -> bool {
    matches!(
        kind,
        "+" | "-"
            | "*"
            | "/"
            | "%"
            | "**"
            | "+="
            | "-="
            | "*="
            | "/="
            | "%="
            | "**="
            | "="
            | "&"
            | "|"
            | "^"
            | "<<"
            | ">>"
            | "&="
            | "|="
            | "^="
            | "<<="
            | ">>="
            | "=="
            | "==="
            | "!="
            | "<>"
            | "!=="
            | "<"
            | "<="
            | ">"
            | ">="
            | "??"
            | "&&"
            | "||"
    )
}
