/// Module contains the Number cell.  The cell is the one data type of the interpreter, it holds
/// both the values on the data stack and the contents of variables.
pub mod value;

/// The data stack.
pub mod stack;

/// The variable memory model, an arena of addressable cells along with the names bound to them.
pub mod symbol_table;

/// The dictionary module provides the user defined word dictionary.
pub mod dictionary;
