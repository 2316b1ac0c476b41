//! A small Forth dialect evaluated a line at a time.
//!
//! The interpreter keeps its data stack, variables and user defined words in a session object,
//! [`ForthInterpreter`], so several sessions can live side by side.  Each call to
//! [`ForthInterpreter::evaluate`] tokenizes, parses and runs one line of source.

/// Module for the managing source code, tokenizing and parsing.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

pub use runtime::{
    data_structures::{symbol_table::Address, value::Number},
    error::{ErrorKind, ScriptError},
    interpreter::{
        Interpreter, InterpreterStack, MemoryManagement, WordManagement,
        forth_interpreter::{Evaluation, ForthInterpreter, InterpreterConfig, LineInput, Status},
    },
};
