use lforth::{Evaluation, ForthInterpreter, Interpreter};
use std::{
    collections::VecDeque,
    fs,
    io::{self, BufRead, IsTerminal, Write},
    path::Path,
};
use tracing::{debug, info};

const BANNER: &str = "Type 'bye' to exit";

/// Clear the terminal and put the cursor in the top left corner.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Render an evaluated line the way the console shows it.  The line is followed by its outputs,
/// then either the error on the lines below or a space, and finally the status.
pub fn format_entry(line: &str, evaluation: &Evaluation) -> String {
    let mut entry = line.to_string();

    if evaluation.values().is_some() {
        entry.push(' ');
        entry.push_str(&evaluation.joined_values());
    }

    match evaluation.error() {
        Some(error) => {
            entry.push('\n');
            entry.push_str(&error.to_string());
        }

        None => entry.push(' '),
    }

    entry.push(' ');
    entry.push_str(&evaluation.status().to_string());

    entry
}

/// The interactive console.  The last few entries are kept and redrawn after every line.
pub struct Console {
    history: VecDeque<String>,
    size: usize,
    clear_screen: bool,
}

impl Console {
    pub fn new(size: usize, clear_screen: bool) -> Console {
        Console {
            history: VecDeque::with_capacity(size + 1),
            size,
            clear_screen: clear_screen && io::stdout().is_terminal(),
        }
    }

    fn record(&mut self, entry: String) {
        self.history.push_back(entry);

        while self.history.len() > self.size.max(1) {
            let _ = self.history.pop_front();
        }
    }

    fn clear(&self, out: &mut impl Write) -> io::Result<()> {
        if self.clear_screen {
            write!(out, "{}", CLEAR_SCREEN)?;
        }

        Ok(())
    }

    fn redraw(&self, out: &mut impl Write) -> io::Result<()> {
        self.clear(out)?;

        if self.clear_screen {
            for entry in &self.history {
                writeln!(out, "{}", entry)?;
            }
        } else if let Some(entry) = self.history.back() {
            writeln!(out, "{}", entry)?;
        }

        out.flush()
    }

    /// Read and evaluate lines from stdin until `bye` or the end of input.
    pub fn run(&mut self, interpreter: &mut ForthInterpreter) -> io::Result<()> {
        let mut out = io::stdout();

        self.clear(&mut out)?;
        self.record(BANNER.to_string());
        writeln!(out, "{}", BANNER)?;
        out.flush()?;

        loop {
            let mut line = String::new();

            if io::stdin().lock().read_line(&mut line)? == 0 {
                debug!(target: "lforth::console", "End of input.");
                break;
            }

            let line = line.trim_end_matches(['\r', '\n']);

            if line.trim() == "cls" {
                self.history.clear();
                self.clear(&mut out)?;
                out.flush()?;
                continue;
            }

            let evaluation = interpreter.evaluate(line);

            self.record(format_entry(line, &evaluation));
            self.redraw(&mut out)?;

            if interpreter.is_halted() {
                break;
            }
        }

        info!(target: "lforth::console",
              "Session ended with {} errors.", interpreter.error_count());
        Ok(())
    }
}

/// Evaluate a file a line at a time, printing every entry.  Returns whether every line was
/// evaluated without an error.
pub fn run_script(interpreter: &mut ForthInterpreter, path: &Path) -> io::Result<bool> {
    let source = fs::read_to_string(path)?;
    let mut out = io::stdout().lock();
    let mut clean = true;

    for line in source.lines() {
        let evaluation = interpreter.evaluate(line);

        clean &= evaluation.is_ok();
        writeln!(out, "{}", format_entry(line, &evaluation))?;

        if interpreter.is_halted() {
            break;
        }
    }

    out.flush()?;
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_show_outputs_and_status() {
        let mut interpreter = ForthInterpreter::new();

        let evaluation = interpreter.evaluate("1 2 + .");
        assert_eq!(format_entry("1 2 + .", &evaluation), "1 2 + . 3  ok");

        let evaluation = interpreter.evaluate("7");
        assert_eq!(format_entry("7", &evaluation), "7  ok");
    }

    #[test]
    fn entries_show_errors_below_the_line() {
        let mut interpreter = ForthInterpreter::new();
        let evaluation = interpreter.evaluate("frobnicate");

        assert_eq!(
            format_entry("frobnicate", &evaluation),
            "frobnicate\n:1: Undefined word\n>>>frobnicate<<<\nBacktrace: "
        );
    }

    #[test]
    fn history_keeps_the_latest_entries() {
        let mut console = Console::new(2, false);

        for entry in ["a", "b", "c"] {
            console.record(entry.to_string());
        }

        assert_eq!(console.history, VecDeque::from(["b".to_string(), "c".to_string()]));
    }
}
