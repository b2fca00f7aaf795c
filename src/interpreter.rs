//! API to drive the interpreter.

use std::io::{self, Write};
use std::rc::Rc;

use log::debug;

use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;

/// Ties the pipeline together: source text is lexed, parsed and evaluated
/// against a root environment that persists across calls, which is what
/// gives a REPL session its memory.
///
/// Parser errors are written to the output sink under a `parser errors:`
/// header; evaluation still runs on whatever AST was built. The returned
/// value is `None` when the last statement produced nothing (a `let`
/// binding, a `puts` call); callers must not print it as `null`.
///
/// # Example
///
/// Define a function in one call, use it in later ones:
///
/// ```
/// use holiya::interpreter::Interpreter;
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut interp = Interpreter::new(&mut output);
///
/// let max = r#"
///     let max = fn(x, y) {
///         if (x > y) {
///             return x;
///         }
///         return y;
///     };
/// "#;
/// interp.eval(max).expect("write error");
///
/// interp.eval("puts(max(10, 20));").expect("write error");
/// interp.eval("puts(max(5, 4));").expect("write error");
///
/// assert_eq!(output, b"20\n5\n");
/// ```
#[derive(Debug)]
pub struct Interpreter<'a, W: Write> {
    output: &'a mut W,
    env: Rc<Environment>,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(output: &'a mut W) -> Interpreter<'a, W> {
        Interpreter {
            output,
            env: Environment::new(),
        }
    }

    /// Run `source`, a whole script or a single REPL line, and return the
    /// final value. Language-level errors come back as `Object::Error`
    /// values; the `io::Result` covers the output sink only.
    pub fn eval(&mut self, source: &str) -> io::Result<Option<Rc<Object>>> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        debug!(
            "parsed {} statements, {} errors",
            program.statements.len(),
            parser.errors().len()
        );

        if !parser.errors().is_empty() {
            writeln!(self.output, "parser errors:")?;
            for message in parser.errors() {
                writeln!(self.output, "\t{message}")?;
            }
        }

        let mut evaluator = Evaluator::new(&mut *self.output);
        Ok(evaluator.eval_program(&program, &self.env))
    }
}
