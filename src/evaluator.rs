//! Tree-walking evaluator.
//!
//! Walks the AST recursively, threading an [`Environment`] and producing
//! [`Object`] values. Runtime errors are values: any step that produces an
//! `Error` short-circuits the enclosing statement or expression, and nothing
//! after it in source order is evaluated.
//!
//! Evaluation returns `Option<Rc<Object>>`. `None` is the *absent* value,
//! produced by `let` bindings and by `puts`. It is distinct from the Null
//! singleton; callers that print results must skip it.

use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::ast::{Block, Expr, Program, Stmt};
use crate::environment::Environment;
use crate::object::{self, Builtin, FunctionObject, HashPair, Object};

#[derive(Debug)]
pub struct Evaluator<'a, W: Write> {
    /// Sink for `puts`; generic so tests can capture output.
    output: &'a mut W,
}

impl<'a, W: Write> Evaluator<'a, W> {
    pub fn new(output: &'a mut W) -> Evaluator<'a, W> {
        Evaluator { output }
    }

    /// Evaluate a whole program. A `return` at the top level unwraps here;
    /// an error stops execution of the remaining statements.
    pub fn eval_program(
        &mut self,
        program: &Program,
        env: &Rc<Environment>,
    ) -> Option<Rc<Object>> {
        let mut result = None;
        for statement in &program.statements {
            result = self.eval_statement(statement, env);
            match result.as_deref() {
                Some(Object::Return(value)) => return Some(Rc::clone(value)),
                Some(Object::Error(_)) => break,
                _ => {}
            }
        }
        result
    }

    /// Same as [`Evaluator::eval_program`] except a `Return` is *not*
    /// unwrapped: it propagates verbatim so a nested `return` escapes every
    /// enclosing block until a call boundary or the top level.
    fn eval_block(&mut self, block: &Block, env: &Rc<Environment>) -> Option<Rc<Object>> {
        let mut result = None;
        for statement in &block.0 {
            result = self.eval_statement(statement, env);
            if matches!(
                result.as_deref(),
                Some(Object::Return(_) | Object::Error(_))
            ) {
                return result;
            }
        }
        result
    }

    fn eval_statement(&mut self, statement: &Stmt, env: &Rc<Environment>) -> Option<Rc<Object>> {
        match statement {
            Stmt::Let { name, value } => {
                let value = self.eval_expression(value, env);
                if is_error(&value) {
                    return value;
                }
                env.set(name.clone(), value_or_null(value));
                None
            }
            Stmt::Return(value) => {
                let value = self.eval_expression(value, env);
                if is_error(&value) {
                    return value;
                }
                Some(Rc::new(Object::Return(value_or_null(value))))
            }
            Stmt::Expr(expression) => self.eval_expression(expression, env),
        }
    }

    fn eval_expression(&mut self, expression: &Expr, env: &Rc<Environment>) -> Option<Rc<Object>> {
        match expression {
            Expr::Identifier(name) => Some(eval_identifier(name, env)),
            Expr::Integer(value) => Some(Rc::new(Object::Integer(*value))),
            Expr::Float { value, .. } => Some(Rc::new(Object::Float(*value))),
            Expr::Str(value) => Some(Rc::new(Object::Str(value.clone()))),
            Expr::Boolean(value) => Some(object::boolean(*value)),
            Expr::Prefix { op, right } => {
                let right = self.eval_expression(right, env);
                if is_error(&right) {
                    return right;
                }
                Some(eval_prefix(op, &value_or_null(right)))
            }
            Expr::Infix { left, op, right } => {
                let left = self.eval_expression(left, env);
                if is_error(&left) {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if is_error(&right) {
                    return right;
                }
                Some(eval_infix(op, &value_or_null(left), &value_or_null(right)))
            }
            Expr::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if(condition, consequence, alternative.as_ref(), env),
            Expr::Function { parameters, body } => {
                Some(Rc::new(Object::Function(FunctionObject {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(env),
                })))
            }
            Expr::Array(elements) => match self.eval_expressions(elements, env) {
                Ok(elements) => Some(Rc::new(Object::Array(elements))),
                Err(error) => Some(error),
            },
            Expr::Hash(pairs) => self.eval_hash_literal(pairs, env),
            Expr::Call {
                function,
                arguments,
            } => {
                let function = self.eval_expression(function, env);
                if is_error(&function) {
                    return function;
                }
                let arguments = match self.eval_expressions(arguments, env) {
                    Ok(arguments) => arguments,
                    Err(error) => return Some(error),
                };
                self.apply_function(&value_or_null(function), arguments)
            }
            Expr::Index { left, index } => {
                let left = self.eval_expression(left, env);
                if is_error(&left) {
                    return left;
                }
                let index = self.eval_expression(index, env);
                if is_error(&index) {
                    return index;
                }
                Some(eval_index(&value_or_null(left), &value_or_null(index)))
            }
        }
    }

    fn eval_if(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
        env: &Rc<Environment>,
    ) -> Option<Rc<Object>> {
        let condition = self.eval_expression(condition, env);
        if is_error(&condition) {
            return condition;
        }
        if is_truthy(&value_or_null(condition)) {
            self.eval_block(consequence, env)
        } else if let Some(alternative) = alternative {
            self.eval_block(alternative, env)
        } else {
            Some(object::null())
        }
    }

    /// Evaluate expressions left to right; the first error aborts and is
    /// returned alone.
    fn eval_expressions(
        &mut self,
        expressions: &[Expr],
        env: &Rc<Environment>,
    ) -> Result<Vec<Rc<Object>>, Rc<Object>> {
        let mut results = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let value = value_or_null(self.eval_expression(expression, env));
            if value.is_error() {
                return Err(value);
            }
            results.push(value);
        }
        Ok(results)
    }

    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expr, Expr)],
        env: &Rc<Environment>,
    ) -> Option<Rc<Object>> {
        let mut map = HashMap::new();
        for (key_expression, value_expression) in pairs {
            let key = self.eval_expression(key_expression, env);
            if is_error(&key) {
                return key;
            }
            let key = value_or_null(key);
            let hash_key = match key.hash_key() {
                Some(hash_key) => hash_key,
                None => {
                    return Some(new_error(format!(
                        "unusable as hash key: {}",
                        key.type_name()
                    )))
                }
            };
            let value = self.eval_expression(value_expression, env);
            if is_error(&value) {
                return value;
            }
            map.insert(
                hash_key,
                HashPair {
                    key,
                    value: value_or_null(value),
                },
            );
        }
        Some(Rc::new(Object::Hash(map)))
    }

    fn apply_function(
        &mut self,
        function: &Rc<Object>,
        arguments: Vec<Rc<Object>>,
    ) -> Option<Rc<Object>> {
        match function.as_ref() {
            Object::Function(function) => {
                // Excess arguments are ignored; missing ones are an error
                // rather than unbound parameters.
                if arguments.len() < function.parameters.len() {
                    return Some(new_error(format!(
                        "wrong number of arguments. got={}, want={}",
                        arguments.len(),
                        function.parameters.len()
                    )));
                }
                let env = Environment::new_enclosed(Rc::clone(&function.env));
                for (parameter, argument) in function.parameters.iter().zip(arguments) {
                    env.set(parameter.clone(), argument);
                }
                let result = self.eval_block(&function.body, &env)?;
                Some(unwrap_return(result))
            }
            Object::Builtin(builtin) => self.apply_builtin(*builtin, arguments),
            _ => Some(new_error(format!(
                "not a function: {}",
                function.type_name()
            ))),
        }
    }

    fn apply_builtin(
        &mut self,
        builtin: Builtin,
        arguments: Vec<Rc<Object>>,
    ) -> Option<Rc<Object>> {
        match builtin {
            Builtin::Len => Some(builtin_len(&arguments)),
            Builtin::First => Some(builtin_first(&arguments)),
            Builtin::Last => Some(builtin_last(&arguments)),
            Builtin::Rest => Some(builtin_rest(&arguments)),
            Builtin::Push => Some(builtin_push(&arguments)),
            Builtin::Puts => {
                for argument in &arguments {
                    let _ = writeln!(self.output, "{argument}");
                }
                None
            }
        }
    }
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Rc<Object> {
    if let Some(value) = env.get(name) {
        return value;
    }
    if let Some(builtin) = Builtin::lookup(name) {
        return Rc::new(Object::Builtin(builtin));
    }
    new_error(format!("identifier not found: {name}"))
}

fn eval_prefix(op: &str, right: &Rc<Object>) -> Rc<Object> {
    match op {
        "!" => eval_bang(right),
        "-" => eval_minus(right),
        _ => new_error(format!("unknown operator: {op}{}", right.type_name())),
    }
}

fn eval_bang(right: &Rc<Object>) -> Rc<Object> {
    match right.as_ref() {
        Object::Boolean(true) => object::boolean(false),
        Object::Boolean(false) | Object::Null => object::boolean(true),
        _ => object::boolean(false),
    }
}

fn eval_minus(right: &Rc<Object>) -> Rc<Object> {
    match right.as_ref() {
        Object::Integer(value) => Rc::new(Object::Integer(value.wrapping_neg())),
        Object::Float(value) => Rc::new(Object::Float(-value)),
        _ => new_error(format!("unknown operator: -{}", right.type_name())),
    }
}

fn eval_infix(op: &str, left: &Rc<Object>, right: &Rc<Object>) -> Rc<Object> {
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Object::Float(l), Object::Float(r)) => eval_float_infix(op, *l, *r),
        // A mixed pair promotes the integer side, keeping operand order.
        (Object::Integer(l), Object::Float(r)) => eval_float_infix(op, *l as f64, *r),
        (Object::Float(l), Object::Integer(r)) => eval_float_infix(op, *l, *r as f64),
        (Object::Str(l), Object::Str(r)) => eval_string_infix(op, l, r),
        _ => match op {
            // Identity comparison: correct for the shared singletons, and
            // for everything else same-object is the only sameness left.
            "==" => object::boolean(Rc::ptr_eq(left, right)),
            "!=" => object::boolean(!Rc::ptr_eq(left, right)),
            _ if left.type_name() != right.type_name() => new_error(format!(
                "type mismatch: {} {op} {}",
                left.type_name(),
                right.type_name()
            )),
            _ => new_error(format!(
                "unknown operator: {} {op} {}",
                left.type_name(),
                right.type_name()
            )),
        },
    }
}

fn eval_integer_infix(op: &str, left: i64, right: i64) -> Rc<Object> {
    match op {
        "+" => Rc::new(Object::Integer(left.wrapping_add(right))),
        "-" => Rc::new(Object::Integer(left.wrapping_sub(right))),
        "*" => Rc::new(Object::Integer(left.wrapping_mul(right))),
        "/" => {
            if right == 0 {
                new_error("Division by zero".to_string())
            } else {
                Rc::new(Object::Integer(left.wrapping_div(right)))
            }
        }
        "%" => {
            if right == 0 {
                new_error("Division by zero".to_string())
            } else {
                Rc::new(Object::Integer(left.wrapping_rem(right)))
            }
        }
        ">" => object::boolean(left > right),
        ">=" => object::boolean(left >= right),
        "<" => object::boolean(left < right),
        "<=" => object::boolean(left <= right),
        "==" => object::boolean(left == right),
        "!=" => object::boolean(left != right),
        _ => new_error(format!("unknown operator: INTEGER {op} INTEGER")),
    }
}

fn eval_float_infix(op: &str, left: f64, right: f64) -> Rc<Object> {
    match op {
        "+" => Rc::new(Object::Float(left + right)),
        "-" => Rc::new(Object::Float(left - right)),
        "*" => Rc::new(Object::Float(left * right)),
        "/" => {
            if right == 0.0 {
                new_error("Division by zero".to_string())
            } else {
                Rc::new(Object::Float(left / right))
            }
        }
        "%" => Rc::new(Object::Float(left % right)),
        ">" => object::boolean(left > right),
        ">=" => object::boolean(left >= right),
        "<" => object::boolean(left < right),
        "<=" => object::boolean(left <= right),
        "==" => object::boolean(left == right),
        "!=" => object::boolean(left != right),
        _ => new_error(format!("unknown operator: FLOAT {op} FLOAT")),
    }
}

fn eval_string_infix(op: &str, left: &str, right: &str) -> Rc<Object> {
    if op != "+" {
        return new_error(format!("unknown operator: STRING {op} STRING"));
    }
    Rc::new(Object::Str(format!("{left}{right}")))
}

fn eval_index(left: &Rc<Object>, index: &Rc<Object>) -> Rc<Object> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(elements), Object::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                object::null()
            } else {
                Rc::clone(&elements[*i as usize])
            }
        }
        (Object::Hash(pairs), _) => match index.hash_key() {
            Some(hash_key) => pairs
                .get(&hash_key)
                .map(|pair| Rc::clone(&pair.value))
                .unwrap_or_else(object::null),
            None => new_error(format!("unusable as hash key: {}", index.type_name())),
        },
        // Strings index by Unicode scalar, not byte.
        (Object::Str(value), Object::Integer(i)) => {
            if *i < 0 {
                return object::null();
            }
            value
                .chars()
                .nth(*i as usize)
                .map(|ch| Rc::new(Object::Str(ch.to_string())))
                .unwrap_or_else(object::null)
        }
        _ => new_error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn builtin_len(arguments: &[Rc<Object>]) -> Rc<Object> {
    if arguments.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            arguments.len()
        ));
    }
    match arguments[0].as_ref() {
        Object::Array(elements) => Rc::new(Object::Integer(elements.len() as i64)),
        Object::Str(value) => Rc::new(Object::Integer(value.len() as i64)),
        other => new_error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_first(arguments: &[Rc<Object>]) -> Rc<Object> {
    if arguments.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            arguments.len()
        ));
    }
    match arguments[0].as_ref() {
        Object::Array(elements) => elements.first().map(Rc::clone).unwrap_or_else(object::null),
        other => new_error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_last(arguments: &[Rc<Object>]) -> Rc<Object> {
    if arguments.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            arguments.len()
        ));
    }
    match arguments[0].as_ref() {
        Object::Array(elements) => elements.last().map(Rc::clone).unwrap_or_else(object::null),
        other => new_error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_rest(arguments: &[Rc<Object>]) -> Rc<Object> {
    if arguments.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            arguments.len()
        ));
    }
    match arguments[0].as_ref() {
        Object::Array(elements) => {
            if elements.is_empty() {
                object::null()
            } else {
                Rc::new(Object::Array(elements[1..].to_vec()))
            }
        }
        other => new_error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_push(arguments: &[Rc<Object>]) -> Rc<Object> {
    if arguments.len() != 2 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=2",
            arguments.len()
        ));
    }
    match arguments[0].as_ref() {
        Object::Array(elements) => {
            let mut elements = elements.clone();
            elements.push(Rc::clone(&arguments[1]));
            Rc::new(Object::Array(elements))
        }
        other => new_error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Every value except `false` and `null` counts as true, including zero.
fn is_truthy(value: &Object) -> bool {
    !matches!(value, Object::Boolean(false) | Object::Null)
}

fn is_error(value: &Option<Rc<Object>>) -> bool {
    matches!(value.as_deref(), Some(Object::Error(_)))
}

/// Coerce an absent value to the Null singleton where a value is required.
fn value_or_null(value: Option<Rc<Object>>) -> Rc<Object> {
    value.unwrap_or_else(object::null)
}

fn unwrap_return(value: Rc<Object>) -> Rc<Object> {
    match value.as_ref() {
        Object::Return(inner) => Rc::clone(inner),
        _ => value,
    }
}

fn new_error(message: String) -> Rc<Object> {
    Rc::new(Object::Error(message))
}
