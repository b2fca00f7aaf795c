//! Abstract syntax tree.
//!
//! Two closed node families, expressions and statements. Every node prints
//! back to a canonical textual form via `Display`; reparsing that form
//! yields a tree that prints identically.

use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Identifier(String),
    Integer(i64),
    /// The source literal is kept alongside the parsed value so the
    /// canonical printed form is the original fragment (`0.0` must not
    /// print as `0`).
    Float {
        value: f64,
        literal: String,
    },
    Str(String),
    Boolean(bool),
    Prefix {
        op: String,
        right: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function {
        parameters: Vec<String>,
        body: Block,
    },
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Array(Vec<Expr>),
    /// Key/value pairs in source order.
    Hash(Vec<(Expr, Expr)>),
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Let { name: String, value: Expr },
    Return(Expr),
    Expr(Expr),
}

/// A `{}`-delimited statement list, the body of `if` arms and functions.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block(pub Vec<Stmt>);

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::Integer(value) => write!(f, "{value}"),
            Expr::Float { literal, .. } => write!(f, "{literal}"),
            Expr::Str(value) => write!(f, "{value}"),
            Expr::Boolean(value) => write!(f, "{value}"),
            Expr::Prefix { op, right } => write!(f, "({op}{right})"),
            Expr::Infix { left, op, right } => write!(f, "({left} {op} {right})"),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            Expr::Function { parameters, body } => {
                write!(f, "fn({}){body}", parameters.join(", "))
            }
            Expr::Call {
                function,
                arguments,
            } => {
                let arguments = arguments
                    .iter()
                    .map(Expr::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{function}({arguments})")
            }
            Expr::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(Expr::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{elements}]")
            }
            Expr::Hash(pairs) => {
                let pairs = pairs
                    .iter()
                    .map(|(key, value)| format!("{key}:{value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{pairs}}}")
            }
            Expr::Index { left, index } => write!(f, "({left}[{index}])"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "let {name} = {value};"),
            Stmt::Return(value) => write!(f, "return {value};"),
            Stmt::Expr(expression) => write!(f, "{expression}"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.0 {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
