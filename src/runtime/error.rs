use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use thiserror::Error as ThisError;
use crate::{ lang::tokenizing::Token,
             runtime::interpreter::{ CallItem, CallStack } };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The kinds of failure the interpreter can report.  The text of each kind is the message shown to
/// the user.
///
/// The first four are raised by the word set, and a return stack overflow guards against runaway
/// recursion in user defined words.  The rest are reserved for checking the use of compile-only
/// words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ThisError)]
pub enum ErrorKind
{
    #[error("Undefined word")]
    UndefinedWord,

    #[error("Stack underflow")]
    StackUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid memory address")]
    InvalidMemoryAddress,

    #[error("Return stack overflow")]
    ReturnStackOverflow,

    #[error("unstructured")]
    Unstructured,

    #[error("Attempt to use zero-length string as a name")]
    ZeroLengthName,

    #[error("Interpreting a compile-only word")]
    InterpretingCompileOnly,

    #[error("expected dest")]
    ExpectedDest,

    #[error("expected dest, do-dest or scope")]
    ExpectedDoDestOrScope
}



/// Any error that occurs during the evaluation of a line of Forth.
#[derive(Clone)]
pub struct ScriptError
{
    /// The token whose span localizes the failure within the source line.
    token: Token,

    /// What went wrong.
    kind: ErrorKind,

    /// The running error number of the session at the time the error was raised.
    sequence: u64,

    /// The line of source the error was raised while evaluating.
    source: String,

    /// The user defined words the error unwound through, innermost first.
    call_stack: CallStack
}


impl Error for ScriptError
{
}


/// Render the error for the user.  The message is shown along with the session's error number,
/// the source line with the offending span bracketed by `>>>` and `<<<`, and the backtrace.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let span = self.token.span();
        let source = &self.source;

        let before = source.get(..span.start()).unwrap_or(source);
        let marked = span.slice(source);
        let after = source.get(span.end()..).unwrap_or("");

        writeln!(f, ":{}: {}", self.sequence, self.kind)?;
        writeln!(f, "{}>>>{}<<<{}", before, marked, after)?;
        write!(f, "Backtrace:")?;

        for item in self.call_stack.iter()
        {
            write!(f, "\n  {}", item)?;
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(token: Token, kind: ErrorKind, sequence: u64, source: String) -> ScriptError
    {
        ScriptError
            {
                token,
                kind,
                sequence,
                source,
                call_stack: CallStack::new()
            }
    }

    /// The token that localizes the error.
    pub fn token(&self) -> &Token
    {
        &self.token
    }

    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// The session's error number when this error was raised.
    pub fn sequence(&self) -> u64
    {
        self.sequence
    }

    /// The source line the error points into.
    pub fn source_line(&self) -> &str
    {
        &self.source
    }

    /// The user defined words the error unwound through, innermost first.
    pub fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }

    /// Move the error out through a reference to a user defined word.  The reference becomes the
    /// error's token, (so the span points into the calling line rather than the word's body,) and
    /// the word is recorded in the backtrace.
    pub fn through_word(mut self, reference: &Token) -> ScriptError
    {
        self.call_stack.push(CallItem::new(reference.text().to_lowercase()));
        self.token = reference.clone();
        self
    }

    /// Point the error at a different token without recording a call.
    pub fn relabel(mut self, token: &Token) -> ScriptError
    {
        self.token = token.clone();
        self
    }
}



/// Raise an error through the interpreter and wrap it in a Result::Err.  Raising clears the data
/// stack and advances the session's error number.
pub fn script_error<T>(interpreter: &mut dyn Interpreter, token: &Token, kind: ErrorKind) -> Result<T>
{
    Err(interpreter.raise(token, kind))
}
