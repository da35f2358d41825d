// Abstract syntax of generated parsers. Expressions that never contain
// nested blocks are kept as plain text.

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    // `//!` lines
    InnerDoc(Vec<String>),
    // `//` lines, an empty string gives a bare `//`
    Comment(Vec<String>),
    Use { path: String, names: Vec<String> },
    Struct(Struct),
    Enum(Enum),
    Impl { trait_name: Option<String>, target: String, functions: Vec<Function> },
    Function(Function),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub doc: Option<String>,
    pub derives: Vec<&'static str>,
    pub name: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub doc: Option<String>,
    pub derives: Vec<&'static str>,
    pub name: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    // Tuple field types, none for a unit variant
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub doc: Option<String>,
    pub public: bool,
    // Everything between `fn ` and the return arrow
    pub signature: String,
    pub returns: Option<String>,
    pub bounds: Vec<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let { name: String, value: Expr },
    // An expression followed by `;`
    Semi(Expr),
    // The value of the enclosing block
    Tail(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Text(String),
    Match(Match),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub scrutinee: String,
    pub arms: Vec<Arm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arm {
    pub pattern: String,
    pub guard: Option<String>,
    pub body: Expr,
}

impl Expr {
    pub fn text(text: impl Into<String>) -> Self {
        Expr::Text(text.into())
    }
}

impl Arm {
    pub fn new(pattern: impl Into<String>, body: Expr) -> Self {
        Arm { pattern: pattern.into(), guard: None, body }
    }

    pub fn guarded(pattern: impl Into<String>, guard: impl Into<String>, body: Expr) -> Self {
        Arm { pattern: pattern.into(), guard: Some(guard.into()), body }
    }
}
