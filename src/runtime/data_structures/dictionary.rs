impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

use crate::lang::code::NodeList;
use std::{collections::HashMap, rc::Rc};

/// The information stored in the dictionary for each colon definition.
#[derive(Clone)]
pub struct WordInfo {
    /// The name of the word, lowercased.
    pub name: String,

    /// The body text the word was compiled from.
    pub source: String,

    /// The compiled body of the word.  Shared so that executing the word doesn't need to copy it.
    pub body: Rc<NodeList>,
}

impl WordInfo {
    pub fn new(name: &str, source: String, body: NodeList) -> WordInfo {
        WordInfo {
            name: name.to_lowercase(),
            source,
            body: Rc::new(body),
        }
    }
}

/// The dictionary of user defined words.  It is flat and global to an interpreter session, so
/// defining a word a second time simply replaces the earlier body.  Names are case-insensitive.
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word into the dictionary, replacing any prior word of the same name.
    pub fn insert(&mut self, info: WordInfo) {
        let _ = self.words.insert(info.name.clone(), info);
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.words.contains_key(&name.to_lowercase())
    }

    /// The names of all defined words, sorted.
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.words.keys().collect();

        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{code::Node, source_buffer::SourceSpan, tokenizing::Token};

    fn body(words: &[&str]) -> NodeList {
        words
            .iter()
            .map(|word| Node::WordReference(Token::Word(SourceSpan::default(), word.to_string())))
            .collect()
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(WordInfo::new("Square", "dup *".to_string(), body(&["dup", "*"])));

        assert!(dictionary.contains("SQUARE"));
        assert_eq!(dictionary.try_get("square").map(|word| word.name.as_str()), Some("square"));
    }

    #[test]
    fn redefining_replaces_and_names_stay_sorted() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(WordInfo::new("sq", "dup *".to_string(), body(&["dup", "*"])));
        dictionary.insert(WordInfo::new("nothing", "drop".to_string(), body(&["drop"])));
        dictionary.insert(WordInfo::new("SQ", "dup dup * *".to_string(), body(&["dup", "dup", "*", "*"])));

        assert_eq!(dictionary.names(), vec!["nothing", "sq"]);
        assert_eq!(dictionary.try_get("sq").map(|word| word.body.len()), Some(4));
    }
}
