use clap::Parser;
use std::path::PathBuf;

/// A variable to bind before the first line is evaluated, given as `NAME=VALUE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub value: i64,
}

/// Parse a `NAME=VALUE` pair for `--define`.
pub fn parse_definition(text: &str) -> Result<Definition, String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found '{}'", text))?;

    let name = name.trim();

    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(format!("'{}' is not a usable variable name", name));
    }

    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|error| format!("'{}' is not a number: {}", value.trim(), error))?;

    Ok(Definition {
        name: name.to_string(),
        value,
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "lforth",
    about = "A line at a time Forth interpreter",
    version
)]
pub struct Cli {
    /// Evaluate this file line by line instead of starting the console.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// The number of entered lines kept on screen.
    #[arg(long, value_name = "N", default_value_t = 5, env = "LFORTH_HISTORY")]
    pub history: usize,

    /// Log filter, for example `debug` or `lforth::lexer=trace`.
    #[arg(long, value_name = "LEVEL", env = "LFORTH_LOG")]
    pub log_level: Option<String>,

    /// Bind a variable holding VALUE before anything is evaluated.  May be repeated.
    #[arg(long = "define", value_name = "NAME=VALUE", value_parser = parse_definition)]
    pub definitions: Vec<Definition>,

    /// Don't clear and redraw the screen between lines.
    #[arg(long)]
    pub no_clear: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_parse() {
        assert_eq!(
            parse_definition("limit=10"),
            Ok(Definition {
                name: "limit".to_string(),
                value: 10
            })
        );

        assert_eq!(parse_definition(" x = -3 ").map(|definition| definition.value), Ok(-3));
    }

    #[test]
    fn bad_definitions_are_rejected() {
        assert!(parse_definition("limit").is_err());
        assert!(parse_definition("=10").is_err());
        assert!(parse_definition("limit=ten").is_err());
        assert!(parse_definition("my var=1").is_err());
    }

    #[test]
    fn command_line_parses() {
        let cli = Cli::parse_from([
            "lforth",
            "--history",
            "3",
            "--define",
            "a=1",
            "--define",
            "b=2",
            "--no-clear",
            "script.fs",
        ]);

        assert_eq!(cli.history, 3);
        assert_eq!(cli.definitions.len(), 2);
        assert!(cli.no_clear);
        assert_eq!(cli.script, Some(PathBuf::from("script.fs")));
    }
}
