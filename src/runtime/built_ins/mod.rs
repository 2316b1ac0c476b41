use crate::{
    lang::tokenizing::Token,
    runtime::{error, interpreter::Interpreter},
};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Words that manipulate the data stack.
mod stack_words;

/// Arithmetic, comparison and the words that change a cell in place.
mod arithmetic_words;

/// Words that read and write variable memory through addresses.
mod memory_words;

/// Words that produce output or talk to the outside world.
mod io_words;

/// Words that work with words.
mod word_words;

use self::{
    arithmetic_words::register_arithmetic_words, io_words::register_io_words,
    memory_words::register_memory_words, stack_words::register_stack_words,
    word_words::register_word_words,
};

/// The handler of a built-in word.  It gets the interpreter along with the token that referenced
/// the word, (so that errors can point at it,) and returns the word's textual output, if any.
pub type WordHandler = fn(&mut dyn Interpreter, &Token) -> error::Result<Option<String>>;

/// A built-in word along with its documentation.
#[derive(Clone)]
pub struct BuiltInWord {
    pub name: &'static str,
    pub handler: WordHandler,
    pub description: &'static str,
    pub signature: &'static str,
}

/// The table of built-in words, keyed on their lowercase names.
pub type WordTable = HashMap<&'static str, BuiltInWord>;

/// Simplify registering a built-in word in a word table.
///
/// Required parameters are, the table to register with.  The name of the word.  The handler to
/// execute for the word.  A simple description of the word.  As well as the word's stack
/// signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $table:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use $crate::runtime::built_ins::BuiltInWord;

        let _ = $table.insert(
            $name,
            BuiltInWord {
                name: $name,
                handler: $function,
                description: $description,
                signature: $signature,
            },
        );
    }};
}

/// Spelled out names for the symbolic words, each paired with the word it stands for.  Note that
/// `greater` is `<` and `less` is `>`, the names describe the top cell against the one below it.
const WORD_ALIASES: [(&str, &str); 15] = [
    ("dot", "."),
    ("value", "?"),
    ("assign", "!"),
    ("put", "@"),
    ("plusassign", "+!"),
    ("plus", "+"),
    ("minus", "-"),
    ("mul", "*"),
    ("div", "/"),
    ("moddiv", "/mod"),
    ("equals", "="),
    ("greater", "<"),
    ("less", ">"),
    ("dotfour", ".4"),
    ("carriage", "cr"),
];

/// Register every alias under its own name, sharing the handler of the word it stands for.
fn register_aliases(table: &mut WordTable) {
    for (alias, word) in WORD_ALIASES {
        if let Some(original) = table.get(word).cloned() {
            add_native_word!(table, alias, original.handler, original.description, original.signature);
        }
    }
}

lazy_static! {
    /// The built-in words, built once and shared by every interpreter session.
    static ref BUILT_IN_WORDS: WordTable = {
        let mut table = WordTable::new();

        register_stack_words(&mut table);
        register_arithmetic_words(&mut table);
        register_memory_words(&mut table);
        register_io_words(&mut table);
        register_word_words(&mut table);

        register_aliases(&mut table);

        table
    };
}

/// Look up a built-in word by its lowercase name.
pub fn find_built_in(name: &str) -> Option<&'static BuiltInWord> {
    let table: &'static WordTable = &BUILT_IN_WORDS;

    table.get(name)
}

/// The names of every built-in word, sorted.
pub fn built_in_names() -> Vec<&'static str> {
    let table: &'static WordTable = &BUILT_IN_WORDS;
    let mut names: Vec<&'static str> = table.keys().copied().collect();

    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_word_is_registered_under_its_own_name() {
        for name in built_in_names() {
            let word = find_built_in(name).expect("registered word");

            assert_eq!(word.name, name);
            assert!(!word.description.is_empty(), "{}", name);
        }
    }

    #[test]
    fn the_full_word_set_is_present() {
        let expected = [
            ".", ".s", "?", "!", "@", "+!", "+", "-", "*", "/", "mod", "/mod", "=", "<", ">",
            "invert", "dup", "drop", "swap", "nip", "tuck", "rot", "2drop", ".4", "cr", "emit",
            "key", "bye", "words",
        ];

        for name in expected {
            assert!(find_built_in(name).is_some(), "missing {}", name);
        }

        assert_eq!(built_in_names().len(), expected.len() + WORD_ALIASES.len());
    }

    #[test]
    fn aliases_share_their_word_handler() {
        for (alias, word) in WORD_ALIASES {
            let alias_entry = find_built_in(alias).expect("registered alias");
            let word_entry = find_built_in(word).expect("registered word");

            assert_eq!(alias_entry.name, alias);
            assert_eq!(alias_entry.handler as usize, word_entry.handler as usize, "{}", alias);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert!(find_built_in("DUP").is_none());
        assert!(find_built_in("frobnicate").is_none());
    }
}
