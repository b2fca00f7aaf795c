//! Runtime values.
//!
//! Everything an evaluation can produce is an [`Object`], circulated behind
//! `Rc` so environments, arrays and closures can share values. Errors are
//! values too; the evaluator short-circuits on them rather than unwinding.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::Block;
use crate::environment::Environment;

#[derive(Debug)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Str(String),
    Null,
    Array(Vec<Rc<Object>>),
    Hash(HashMap<HashKey, HashPair>),
    Function(FunctionObject),
    Builtin(Builtin),
    /// Wraps a value so it can escape nested blocks up to a function
    /// boundary or the top level.
    Return(Rc<Object>),
    Error(String),
}

/// A user function together with the environment its literal was evaluated
/// in. Calling it extends that environment, which is what makes closures
/// work.
pub struct FunctionObject {
    pub parameters: Vec<String>,
    pub body: Block,
    pub env: Rc<Environment>,
}

// The captured environment can reach back to this function through its
// bindings, so Debug elides it.
impl fmt::Debug for FunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionObject")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A hash entry keeps the original key object around so the map can print
/// itself.
#[derive(Debug)]
pub struct HashPair {
    pub key: Rc<Object>,
    pub value: Rc<Object>,
}

/// The closed set of built-in functions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
    Puts,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "len" => Some(Builtin::Len),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),
            "puts" => Some(Builtin::Puts),
            _ => None,
        }
    }
}

/// Key derived from a hashable value: the value's type tag plus a 64-bit
/// digest. Equal values of the same type collide on purpose; values of
/// different types never do.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct HashKey {
    pub kind: &'static str,
    pub value: u64,
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Float(_) => "FLOAT",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Return(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    /// Derive the hash key for this value, or `None` if the value cannot be
    /// used as a hash map key.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(value) => *value as u64,
            Object::Float(value) => value.to_bits(),
            Object::Boolean(value) => u64::from(*value),
            Object::Str(value) => fnv1a(value.as_bytes()),
            _ => return None,
        };
        Some(HashKey {
            kind: self.type_name(),
            value,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

/// FNV-1a over the bytes, 64-bit variant. The exact algorithm is part of
/// the language contract for string hash keys.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
        })
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

/// The canonical null value. One allocation per thread, shared by
/// reference, so identity-based equality holds.
pub fn null() -> Rc<Object> {
    NULL.with(Rc::clone)
}

/// The canonical boolean values, see [`null`].
pub fn boolean(value: bool) -> Rc<Object> {
    if value {
        TRUE.with(Rc::clone)
    } else {
        FALSE.with(Rc::clone)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Float(value) => write!(f, "{value:.6}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::Str(value) => write!(f, "{value}"),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{elements}]")
            }
            Object::Hash(pairs) => {
                let pairs = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{pairs}}}")
            }
            Object::Function(function) => {
                write!(
                    f,
                    "fn({}) {{\n{}\n}}\n",
                    function.parameters.join(", "),
                    function.body
                )
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Return(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}
