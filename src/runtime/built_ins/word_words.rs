use crate::{
    add_native_word,
    lang::tokenizing::Token,
    runtime::{
        built_ins::{WordTable, built_in_names},
        error,
        interpreter::Interpreter,
    },
};

/// List every word the interpreter knows, the built-in words first and then the user defined
/// ones, each group sorted.
fn word_words(interpreter: &mut dyn Interpreter, _token: &Token) -> error::Result<Option<String>> {
    let mut names: Vec<String> = built_in_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    names.extend(interpreter.dictionary().names().into_iter().cloned());

    Ok(Some(names.join(" ")))
}

pub fn register_word_words(table: &mut WordTable) {
    add_native_word!(
        table,
        "words",
        word_words,
        "List the names of every known word.",
        " -- "
    );
}
