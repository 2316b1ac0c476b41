use core::str::CharIndices;
use std::fmt::{ self,
                Display,
                Formatter };



/// A half open byte range `start..end` into the line of source code a token was cut from.  Spans
/// are used all over the interpreter to point back into the original text, most importantly by the
/// error reporting which brackets the failing span within the line.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceSpan
{
    /// Byte offset of the first character of the span.
    start: usize,

    /// Byte offset one past the last character of the span.
    end: usize
}


/// Used for debugging output to show where in the line a token was found.
impl Display for SourceSpan
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result
    {
        write!(formatter, "{}..{}", self.start, self.end)
    }
}


impl SourceSpan
{
    /// Create a new span.  The end is clamped so that a span never runs backwards.
    pub fn new(start: usize, end: usize) -> SourceSpan
    {
        SourceSpan { start, end: end.max(start) }
    }

    /// Byte offset of the first character of the span.
    pub fn start(&self) -> usize
    {
        self.start
    }

    /// Byte offset one past the last character of the span.
    pub fn end(&self) -> usize
    {
        self.end
    }

    pub fn len(&self) -> usize
    {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool
    {
        self.start == self.end
    }

    /// Get the text the span covers within the given source.  A span that does not fit the text,
    /// or does not fall on character boundaries, yields an empty string.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str
    {
        text.get(self.start..self.end).unwrap_or("")
    }
}



/// A buffer for walking a line of source code.  This acts as a forward only iterator over the
/// characters of the line while keeping track of the byte offset of the cursor.
///
/// The SourceBuffer only holds a reference to the source code, the code is not copied.
pub struct SourceBuffer<'a>
{
    /// The full text being walked, used to report the end offset.
    source: &'a str,

    /// An iterator over the characters of the source along with their byte offsets.
    chars: CharIndices<'a>,

    /// The peeked character, if any, that has not been consumed yet.
    current: Option<(usize, char)>
}


impl<'a> SourceBuffer<'a>
{
    pub fn new(source: &'a str) -> Self
    {
        SourceBuffer
            {
                source,
                chars: source.char_indices(),
                current: None
            }
    }

    /// Take a peek at the next character in the source code without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current.map(|( _, next )| next)
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None          => self.chars.next()
            };

        next.map(|( _, next )| next)
    }

    /// The byte offset of the next unconsumed character, or the length of the source once the
    /// buffer has been exhausted.
    pub fn position(&mut self) -> usize
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        match self.current
        {
            Some(( offset, _ )) => offset,
            None                => self.source.len()
        }
    }
}



/// An ordered list of the non-whitespace runs of a line, along with the span each was found at.
pub type SpanList<'a> = Vec<( SourceSpan, &'a str )>;


/// Check if the given character is considered whitespace.
fn is_whitespace(next: char) -> bool
{
    next.is_whitespace()
}


/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer)
{
    while let Some(next) = buffer.peek_next()
    {
        if !is_whitespace(next)
        {
            break;
        }

        let _ = buffer.next_char();
    }
}


/// Cut a line of text into its contiguous non-whitespace runs, left to right.  Runs never overlap
/// and adjacent runs are never merged.  Empty or all whitespace input yields an empty list.
pub fn segment_source(source: &str) -> SpanList<'_>
{
    let mut buffer = SourceBuffer::new(source);
    let mut spans = SpanList::new();

    loop
    {
        skip_whitespace(&mut buffer);

        let start = buffer.position();

        while let Some(next) = buffer.peek_next()
        {
            if is_whitespace(next)
            {
                break;
            }

            let _ = buffer.next_char();
        }

        let end = buffer.position();

        if start == end
        {
            break;
        }

        let span = SourceSpan::new(start, end);
        spans.push(( span, span.slice(source) ));
    }

    spans
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn segments_skip_whitespace_runs()
    {
        let spans = segment_source("  1 2\t +  ");
        let texts: Vec<&str> = spans.iter().map(|( _, text )| *text).collect();

        assert_eq!(texts, vec![ "1", "2", "+" ]);
        assert_eq!(spans[0].0, SourceSpan::new(2, 3));
        assert_eq!(spans[2].0, SourceSpan::new(7, 8));
    }

    #[test]
    fn empty_input_has_no_spans()
    {
        assert!(segment_source("").is_empty());
        assert!(segment_source(" \t ").is_empty());
    }

    #[test]
    fn spans_use_byte_offsets()
    {
        let source = "é ab";
        let spans = segment_source(source);

        assert_eq!(spans[1].0, SourceSpan::new(3, 5));
        assert_eq!(spans[1].0.slice(source), "ab");
    }
}
