use crate::{
    lang::{code::NodeList, tokenizing::Token},
    runtime::{
        data_structures::{
            dictionary::Dictionary,
            stack::CellStack,
            symbol_table::SymbolTable,
            value::Number,
        },
        error::{self, ErrorKind, ScriptError},
    },
};
use std::fmt::{self, Display, Formatter};

pub mod forth_interpreter;

/// A call stack item is a record of a user defined word an error unwound through.  These items
/// are read-only and the fields are accessed by member functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallItem {
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String) -> CallItem {
        CallItem { word }
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this item can be nicely displayed to the user in a backtrace.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.word)
    }
}

/// The user defined words an error passed through on its way out of an evaluation.
pub type CallStack = Vec<CallItem>;

/// Trait for managing the interpreter's data stack.  Intended to be called by the built-in words.
///
/// The checked operations take the token of the word doing the popping, so that an underflow can
/// be reported against it.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required, for example by `.s`.
    fn stack(&self) -> &CellStack;

    fn stack_mut(&mut self) -> &mut CellStack;

    /// Push a cell onto the stack.  The cell is not copied.
    fn push(&mut self, cell: Number);

    /// Make sure the stack holds at least `depth` cells, raising a stack underflow otherwise.
    fn require_depth(&mut self, token: &Token, depth: usize) -> error::Result<()>;

    /// Pop the top cell, raising a stack underflow if the stack is empty.
    fn pop(&mut self, token: &Token) -> error::Result<Number>;

    /// Pop the top two cells, returned as `(top, second)`.  The stack is checked for both cells
    /// before anything is removed.
    fn pop_pair(&mut self, token: &Token) -> error::Result<(Number, Number)>;

    /// Get a handle to the top cell without removing it.
    fn peek(&mut self, token: &Token) -> error::Result<Number>;
}

/// Trait for the variable memory model.
pub trait MemoryManagement {
    fn symbol_table(&self) -> &SymbolTable;

    fn symbol_table_mut(&mut self) -> &mut SymbolTable;

    /// Treat the value of a cell as an address and find the cell living there.  Raises an invalid
    /// memory address error if nothing lives at that address.
    fn resolve_address(&mut self, token: &Token, address: &Number) -> error::Result<Number>;
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// The dictionary of user defined words.
    fn dictionary(&self) -> &Dictionary;

    /// Add a colon definition to the dictionary, replacing any earlier word of the same name.
    fn define_word(&mut self, name: &str, source: String, body: NodeList);

    /// Execute the word a token refers to.  Built-in words are tried first, then the user
    /// dictionary.  Returns the word's textual output, if any.
    fn execute_word(&mut self, token: &Token) -> error::Result<Option<String>>;
}

/// Core interpreter trait.
///
/// This trait brings together the data stack, the memory model and word management, along with
/// the error reporting and the little bit of outside interaction the word set needs.
pub trait Interpreter: InterpreterStack + MemoryManagement + WordManagement {
    /// The line currently being evaluated.
    fn current_source(&self) -> &str;

    /// Build an error for the given token.  Raising an error clears the data stack and advances
    /// the session's running error number.
    fn raise(&mut self, token: &Token, kind: ErrorKind) -> ScriptError;

    /// How many errors have been raised over the life of the session.
    fn error_count(&self) -> u64;

    /// Block for one line of outside input.  `None` at the end of input.
    fn read_input_line(&mut self) -> Option<String>;

    /// Stop the session.  The rest of the current line is skipped.
    fn halt(&mut self);

    fn is_halted(&self) -> bool;
}
