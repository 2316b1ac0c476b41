use std::{ fmt::{ self, Display, Formatter },
           io::{ self, BufRead } };
use tracing::{ debug, trace, warn };
use crate::{ lang::{ code::{ Node, NodeList },
                     compilation::parse_source,
                     tokenizing::Token },
             runtime::{ built_ins::find_built_in,
                        data_structures::{ dictionary::{ Dictionary, WordInfo },
                                           stack::CellStack,
                                           symbol_table::{ Address, DEFAULT_HEAP_BASE, SymbolTable },
                                           value::{ Number, ToNumber } },
                        error::{ self, ErrorKind, ScriptError, script_error },
                        interpreter::{ Interpreter,
                                       InterpreterStack,
                                       MemoryManagement,
                                       WordManagement } } };



/// How deep user defined words may call into each other before the evaluation is abandoned.
pub const MAX_CALL_DEPTH: usize = 256;



/// Where `key` gets its input from.
pub enum LineInput
{
    /// The process's standard input.
    Stdin,

    /// Any other source of lines, for example a file or an in memory buffer.
    Reader(Box<dyn BufRead>)
}


impl LineInput
{
    /// Read a single line, including its line ending.  `None` at the end of the input.
    pub fn read_line(&mut self) -> io::Result<Option<String>>
    {
        let mut line = String::new();

        let count = match self
            {
                LineInput::Stdin => io::stdin().read_line(&mut line)?,
                LineInput::Reader(reader) => reader.read_line(&mut line)?
            };

        Ok(if count == 0 { None } else { Some(line) })
    }
}



/// Settings for a new interpreter session.
pub struct InterpreterConfig
{
    /// The address of the first cell of variable memory.
    pub heap_base: Address,

    /// The line source used by `key`.
    pub input: LineInput
}


impl Default for InterpreterConfig
{
    fn default() -> Self
    {
        InterpreterConfig
            {
                heap_base: DEFAULT_HEAP_BASE,
                input: LineInput::Stdin
            }
    }
}



/// The status reported alongside the result of an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status
{
    /// The whole line was evaluated.
    Ok,

    /// The line was cut short by an error.
    Failed
}


/// Shown as `ok` for success and as nothing at all for a failure.
impl Display for Status
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Status::Ok => write!(f, "ok"),
            Status::Failed => write!(f, "")
        }
    }
}



/// The result of evaluating one line of source.
#[derive(Debug)]
pub struct Evaluation
{
    values: Option<Vec<String>>,
    error: Option<ScriptError>,
    status: Status
}


impl Evaluation
{
    fn new(values: Vec<String>, error: Option<ScriptError>) -> Evaluation
    {
        let status = if error.is_some() { Status::Failed } else { Status::Ok };
        let values = if values.is_empty() { None } else { Some(values) };

        Evaluation { values, error, status }
    }

    /// The output of every node that produced some, in order.  `None` if nothing was output.
    pub fn values(&self) -> Option<&Vec<String>>
    {
        self.values.as_ref()
    }

    pub fn error(&self) -> Option<&ScriptError>
    {
        self.error.as_ref()
    }

    pub fn status(&self) -> Status
    {
        self.status
    }

    pub fn is_ok(&self) -> bool
    {
        self.status == Status::Ok
    }

    /// All of the outputs joined by single spaces, or an empty string when there were none.
    pub fn joined_values(&self) -> String
    {
        self.values.as_ref().map(|values| values.join(" ")).unwrap_or_default()
    }

    pub fn into_parts(self) -> ( Option<Vec<String>>, Option<ScriptError>, Status )
    {
        ( self.values, self.error, self.status )
    }
}



/// An interpreter session.  The session owns the data stack, variable memory, the dictionary of
/// user defined words and the running error count.  All of it lives for as long as the session
/// does, and each call to `evaluate` works on it in place.
pub struct ForthInterpreter
{
    /// The data stack.
    stack: CellStack,

    /// Variable memory, along with the names bound to it.
    symbol_table: SymbolTable,

    /// The user defined words.
    dictionary: Dictionary,

    /// The number of errors raised over the life of the session.
    error_count: u64,

    /// The line being evaluated, used to render errors.
    current_source: String,

    /// How many user defined words are currently executing.
    call_depth: usize,

    /// Where `key` reads from.
    input: LineInput,

    /// Set by `bye`.
    halted: bool
}


impl ForthInterpreter
{
    pub fn new() -> ForthInterpreter
    {
        ForthInterpreter::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> ForthInterpreter
    {
        ForthInterpreter
            {
                stack: CellStack::new(),

                symbol_table: SymbolTable::new(config.heap_base),
                dictionary: Dictionary::new(),

                error_count: 0,
                current_source: String::new(),
                call_depth: 0,

                input: config.input,
                halted: false
            }
    }

    /// Evaluate one line of source code.
    ///
    /// A blank line does nothing and succeeds, as does any line given to a session that `bye` has
    /// halted.  Otherwise the line is tokenized, (running any
    /// definitions and declarations it holds,) parsed, and its nodes evaluated in order.  The first
    /// error stops the evaluation of the line, and the outputs of the nodes before it are kept.
    pub fn evaluate(&mut self, source: &str) -> Evaluation
    {
        if source.trim().is_empty()
        {
            return Evaluation::new(Vec::new(), None);
        }

        if self.halted
        {
            debug!(target: "lforth::interpreter", "Session halted, ignoring: {}", source);
            return Evaluation::new(Vec::new(), None);
        }

        self.current_source = source.to_string();
        self.call_depth = 0;

        let code = match parse_source(self, source)
            {
                Ok(code) => code,
                Err(error) =>
                    {
                        debug!(target: "lforth::interpreter", "Line failed to tokenize: {}", error.kind());
                        return Evaluation::new(Vec::new(), Some(error));
                    }
            };

        let mut values = Vec::new();
        let mut error = None;

        for node in code.iter()
        {
            if self.halted
            {
                break;
            }

            match self.visit_node(node)
            {
                Ok(Some(output)) if !output.is_empty() => values.push(output),
                Ok(_) => {},
                Err(failure) =>
                    {
                        error = Some(failure);
                        break;
                    }
            }
        }

        debug!(target: "lforth::interpreter",
               "Evaluated {} nodes, {} outputs, depth {}, {}.",
               code.len(),
               values.len(),
               self.stack.len(),
               if error.is_some() { "failed" } else { "ok" });

        Evaluation::new(values, error)
    }

    /// Bind a variable from outside of Forth code.  Fresh storage is allocated holding the value,
    /// exactly as `variable name` followed by `value name !` would.  The storage address is
    /// returned.
    pub fn define_variable(&mut self, name: &str, value: i64) -> Address
    {
        let address = self.symbol_table.declare_variable(name, value);

        debug!(target: "lforth::interpreter", "Defined variable {} = {} at {}.", name, value, address);
        address
    }

    /// Forget a variable or constant name.  Its storage stays allocated, so addresses taken
    /// before stay valid.
    pub fn forget_variable(&mut self, name: &str) -> Option<Number>
    {
        self.symbol_table.remove(name)
    }

    /// The cell living at an address.
    pub fn cell_at(&self, address: Address) -> Option<&Number>
    {
        self.symbol_table.resolve_by_address(address)
    }

    /// Evaluate a single node, returning its output, if any.
    fn visit_node(&mut self, node: &Node) -> error::Result<Option<String>>
    {
        trace!(target: "lforth::interpreter", "Visiting {:?}.", node);

        match node
        {
            Node::NumberLiteral(token) =>
                {
                    self.stack.push(token.number().unwrap_or_default().to_number());
                    Ok(None)
                },

            Node::StringLiteral(token) => Ok(Some(token.text())),

            Node::WordReference(token) =>
                {
                    let variable = token.word()
                                        .and_then(|name| self.symbol_table.resolve_by_name(name))
                                        .cloned();

                    match variable
                    {
                        Some(cell) =>
                            {
                                self.stack.push(cell);
                                Ok(None)
                            },

                        None => self.execute_word(token)
                    }
                }
        }
    }

    /// Evaluate the body of a user defined word.  The outputs are joined, and `None` is returned
    /// if there were none.
    fn visit_nodes(&mut self, code: &NodeList) -> error::Result<Option<String>>
    {
        let mut outputs = Vec::new();

        for node in code.iter()
        {
            if self.halted
            {
                break;
            }

            if let Some(output) = self.visit_node(node)?
            {
                if !output.is_empty()
                {
                    outputs.push(output);
                }
            }
        }

        Ok(if outputs.is_empty() { None } else { Some(outputs.join(" ")) })
    }
}


impl Default for ForthInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl InterpreterStack for ForthInterpreter
{
    fn stack(&self) -> &CellStack
    {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut CellStack
    {
        &mut self.stack
    }

    fn push(&mut self, cell: Number)
    {
        self.stack.push(cell);
    }

    fn require_depth(&mut self, token: &Token, depth: usize) -> error::Result<()>
    {
        if self.stack.len() < depth
        {
            return script_error(self, token, ErrorKind::StackUnderflow);
        }

        Ok(())
    }

    fn pop(&mut self, token: &Token) -> error::Result<Number>
    {
        match self.stack.pop()
        {
            Some(cell) => Ok(cell),
            None => script_error(self, token, ErrorKind::StackUnderflow)
        }
    }

    fn pop_pair(&mut self, token: &Token) -> error::Result<( Number, Number )>
    {
        match self.stack.pop_n(2)
        {
            Some(cells) =>
                {
                    let mut cells = cells.into_iter();

                    match ( cells.next(), cells.next() )
                    {
                        ( Some(top), Some(second) ) => Ok(( top, second )),
                        _ => script_error(self, token, ErrorKind::StackUnderflow)
                    }
                },

            None => script_error(self, token, ErrorKind::StackUnderflow)
        }
    }

    fn peek(&mut self, token: &Token) -> error::Result<Number>
    {
        match self.stack.peek()
        {
            Some(cell) => Ok(cell.clone()),
            None => script_error(self, token, ErrorKind::StackUnderflow)
        }
    }
}


impl MemoryManagement for ForthInterpreter
{
    fn symbol_table(&self) -> &SymbolTable
    {
        &self.symbol_table
    }

    fn symbol_table_mut(&mut self) -> &mut SymbolTable
    {
        &mut self.symbol_table
    }

    fn resolve_address(&mut self, token: &Token, address: &Number) -> error::Result<Number>
    {
        match self.symbol_table.resolve_by_address(address.value())
        {
            Some(cell) => Ok(cell.clone()),
            None => script_error(self, token, ErrorKind::InvalidMemoryAddress)
        }
    }
}


impl WordManagement for ForthInterpreter
{
    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn define_word(&mut self, name: &str, source: String, body: NodeList)
    {
        if self.dictionary.contains(name)
        {
            debug!(target: "lforth::interpreter", "Redefining word {}.", name);
        }

        self.dictionary.insert(WordInfo::new(name, source, body));
    }

    fn execute_word(&mut self, token: &Token) -> error::Result<Option<String>>
    {
        let name = token.text().to_lowercase();

        if let Some(word) = find_built_in(&name)
        {
            trace!(target: "lforth::interpreter", "Built-in word {}.", word.name);
            return (word.handler)(self, token);
        }

        let body = match self.dictionary.try_get(&name)
            {
                Some(word) => word.body.clone(),
                None => return script_error(self, token, ErrorKind::UndefinedWord)
            };

        if self.call_depth >= MAX_CALL_DEPTH
        {
            warn!(target: "lforth::interpreter", "Word {} nested too deeply.", name);
            return script_error(self, token, ErrorKind::ReturnStackOverflow);
        }

        self.call_depth += 1;
        let result = self.visit_nodes(&body);
        self.call_depth -= 1;

        result.map_err(|error| error.through_word(token))
    }
}


impl Interpreter for ForthInterpreter
{
    fn current_source(&self) -> &str
    {
        &self.current_source
    }

    fn raise(&mut self, token: &Token, kind: ErrorKind) -> ScriptError
    {
        self.stack.clear();
        self.error_count += 1;

        debug!(target: "lforth::interpreter", "Error {}: {} at {}.", self.error_count, kind, token.span());
        ScriptError::new(token.clone(), kind, self.error_count, self.current_source.clone())
    }

    fn error_count(&self) -> u64
    {
        self.error_count
    }

    fn read_input_line(&mut self) -> Option<String>
    {
        match self.input.read_line()
        {
            Ok(line) => line,
            Err(error) =>
                {
                    warn!(target: "lforth::interpreter", "Failed to read input: {}", error);
                    None
                }
        }
    }

    fn halt(&mut self)
    {
        self.halted = true;
    }

    fn is_halted(&self) -> bool
    {
        self.halted
    }
}
