use itertools::Itertools;

use super::syntax::*;

const INDENT: &str = "    ";

/// Writes Rust source out of [`Item`]s, keeping track of the indentation.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn doc(&mut self, doc: &Option<String>) {
        if let Some(doc) = doc {
            for line in doc.lines() {
                self.line(&format!("/// {}", line));
            }
        }
    }

    fn derives(&mut self, derives: &[&str]) {
        if !derives.is_empty() {
            self.line(&format!("#[derive({})]", derives.join(", ")));
        }
    }

    pub fn items(&mut self, items: &[Item]) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.line("");
            }
            self.item(item);
        }
    }

    fn item(&mut self, item: &Item) {
        match item {
            Item::InnerDoc(lines) => {
                for line in lines {
                    self.line(format!("//! {}", line).trim_end());
                }
            }
            Item::Comment(lines) => {
                for line in lines {
                    if line.is_empty() {
                        self.line("//");
                    } else {
                        self.line(&format!("// {}", line));
                    }
                }
            }
            Item::Use { path, names } => match &names[..] {
                [name] => self.line(&format!("use {}::{};", path, name)),
                _ => self.line(&format!("use {}::{{{}}};", path, names.join(", "))),
            },
            Item::Struct(item) => {
                self.doc(&item.doc);
                self.derives(&item.derives);
                self.open(&format!("pub struct {} {{", item.name));
                for (name, ty) in &item.fields {
                    self.line(&format!("pub {}: {},", name, ty));
                }
                self.close("}");
            }
            Item::Enum(item) => {
                self.doc(&item.doc);
                self.derives(&item.derives);
                self.open(&format!("pub enum {} {{", item.name));
                for variant in &item.variants {
                    if variant.fields.is_empty() {
                        self.line(&format!("{},", variant.name));
                    } else {
                        self.line(&format!("{}({}),", variant.name, variant.fields.join(", ")));
                    }
                }
                self.close("}");
            }
            Item::Impl { trait_name, target, functions } => {
                match trait_name {
                    Some(trait_name) => self.open(&format!("impl {} for {} {{", trait_name, target)),
                    None => self.open(&format!("impl {} {{", target)),
                }
                for (index, function) in functions.iter().enumerate() {
                    if index > 0 {
                        self.line("");
                    }
                    self.function(function);
                }
                self.close("}");
            }
            Item::Function(function) => self.function(function),
        }
    }

    fn function(&mut self, function: &Function) {
        self.doc(&function.doc);
        let mut head = String::new();
        if function.public {
            head.push_str("pub ");
        }
        head.push_str("fn ");
        head.push_str(&function.signature);
        if let Some(returns) = &function.returns {
            head.push_str(" -> ");
            head.push_str(returns);
        }
        if function.bounds.is_empty() {
            self.open(&format!("{} {{", head));
        } else {
            self.line(&head);
            self.open("where");
            for bound in &function.bounds {
                self.line(&format!("{},", bound));
            }
            self.close("{");
            self.depth += 1;
        }
        self.statements(&function.body);
        self.close("}");
    }

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            match statement {
                Statement::Let { name, value } => self.expr(&format!("let {} = ", name), value, ";"),
                Statement::Semi(value) => self.expr("", value, ";"),
                Statement::Tail(value) => self.expr("", value, ""),
            }
        }
    }

    fn expr(&mut self, prefix: &str, expr: &Expr, suffix: &str) {
        match expr {
            Expr::Text(text) => self.line(&format!("{}{}{}", prefix, text, suffix)),
            Expr::Match(item) => {
                self.open(&format!("{}match {} {{", prefix, item.scrutinee));
                for arm in &item.arms {
                    let head = match &arm.guard {
                        Some(guard) => format!("{} if {} => ", arm.pattern, guard),
                        None => format!("{} => ", arm.pattern),
                    };
                    let tail = if matches!(arm.body, Expr::Text(_)) { "," } else { "" };
                    self.expr(&head, &arm.body, tail);
                }
                self.close(&format!("}}{}", suffix));
            }
            Expr::Block(statements) => {
                self.open(&format!("{}{{", prefix));
                self.statements(statements);
                self.close(&format!("}}{}", suffix));
            }
        }
    }
}

/// Renders whole items as source text.
pub fn render(items: &[Item]) -> String {
    let mut printer = Printer::new();
    printer.items(items);
    printer.finish()
}

/// A Rust string literal holding `text`.
pub fn literal(text: &str) -> String {
    format!("{:?}", text)
}

/// `a, b, c` as a list of Rust string literals.
pub fn literal_list<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    texts.into_iter().map(literal).join(", ")
}
