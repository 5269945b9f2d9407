//! S-expression trees for KiCad files.
//!
//! Output is built as a tree of [`Sexpr`] nodes and rendered by a single
//! serializer ([`format_sexpr`]), so nesting and indentation are always
//! balanced. The [`parse`] functions read existing files back into the same
//! tree, which lets callers look up and splice whole nodes by name instead of
//! slicing text.

pub mod kicad;

use std::fmt;

/// An S-expression value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sexpr {
    /// A symbol - unquoted identifier or number
    Symbol(String),
    /// A string - quoted text
    String(String),
    /// A list of S-expressions
    List(Vec<Sexpr>),
}

impl Sexpr {
    /// Create a symbol (unquoted atom)
    pub fn symbol(s: impl Into<String>) -> Self {
        Sexpr::Symbol(s.into())
    }

    /// Create a string (quoted atom)
    pub fn string(s: impl Into<String>) -> Self {
        Sexpr::String(s.into())
    }

    /// Create a numeric atom rendered with [`format_number`]
    pub fn number(value: f64) -> Self {
        Sexpr::Symbol(format_number(value))
    }

    /// Create a `yes`/`no` flag atom
    pub fn yes_no(flag: bool) -> Self {
        Sexpr::symbol(if flag { "yes" } else { "no" })
    }

    /// Start a node `(tag ...)`; attributes and children are appended with [`Sexpr::with`].
    pub fn node(tag: &str) -> Self {
        Sexpr::List(vec![Sexpr::symbol(tag)])
    }

    /// Append one item to this node.
    ///
    /// Appending to an atom turns it into a list headed by that atom.
    pub fn with(self, item: Sexpr) -> Self {
        match self {
            Sexpr::List(mut items) => {
                items.push(item);
                Sexpr::List(items)
            }
            atom => Sexpr::List(vec![atom, item]),
        }
    }

    /// Append several items to this node, in order.
    pub fn with_all(self, items: impl IntoIterator<Item = Sexpr>) -> Self {
        items.into_iter().fold(self, Sexpr::with)
    }

    /// Check if this is an atom (symbol or string)
    pub fn is_atom(&self) -> bool {
        self.as_atom().is_some()
    }

    /// Get the atom value if this is an atom (symbol or string)
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(s) | Sexpr::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value if this is an unquoted symbol
    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value if this is a quoted string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sexpr::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list items if this is a list
    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(items) => Some(items),
            _ => None,
        }
    }

    /// The leading symbol of a list, e.g. `pin` for `(pin input line ...)`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_sym()
    }

    /// First direct child list whose tag is `tag`.
    pub fn child(&self, tag: &str) -> Option<&Sexpr> {
        self.as_list()?
            .iter()
            .skip(1)
            .find(|item| item.tag() == Some(tag))
    }

    /// All direct child lists whose tag is `tag`, in order.
    pub fn children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Sexpr> + 'a {
        self.as_list()
            .unwrap_or_default()
            .iter()
            .skip(1)
            .filter(move |item| item.tag() == Some(tag))
    }
}

/// Parser for S-expressions
pub struct Parser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            chars: input.char_indices().peekable(),
            current_pos: 0,
        }
    }

    /// Parse the input and return the S-expression
    pub fn parse(&mut self) -> Result<Sexpr, ParseError> {
        self.skip_whitespace();
        match self.peek_char() {
            None => Err(ParseError::UnexpectedEof),
            Some('(') => self.parse_list(),
            Some(')') => Err(ParseError::UnexpectedChar(')', '(')),
            Some('"') => self.parse_string(),
            Some(_) => self.parse_symbol(),
        }
    }

    /// Succeeds only if nothing but whitespace and comments is left.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.is_at_end() {
            Ok(())
        } else {
            Err(ParseError::TrailingInput(self.current_pos))
        }
    }

    fn parse_list(&mut self) -> Result<Sexpr, ParseError> {
        let start_pos = self.current_pos;
        self.expect('(')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => return Err(ParseError::UnclosedList),
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(_) => items.push(self.parse()?),
            }

            if items.len() % 1000 == 0 {
                log::trace!("Parsed {} items in list at position {start_pos}", items.len());
            }
        }

        Ok(Sexpr::List(items))
    }

    fn parse_symbol(&mut self) -> Result<Sexpr, ParseError> {
        let start = self.current_pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            self.advance();
        }

        if self.current_pos == start {
            return Err(ParseError::EmptyAtom);
        }

        Ok(Sexpr::Symbol(self.input[start..self.current_pos].to_string()))
    }

    fn parse_string(&mut self) -> Result<Sexpr, ParseError> {
        self.expect('"')?;
        let mut result = String::new();

        loop {
            let ch = self.peek_char().ok_or(ParseError::UnterminatedString)?;
            self.advance();
            match ch {
                '"' => break,
                '\\' => {
                    let escaped = self.peek_char().ok_or(ParseError::UnterminatedString)?;
                    self.advance();
                    result.push(match escaped {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => other,
                    });
                }
                other => result.push(other),
            }
        }

        Ok(Sexpr::String(result))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' {
                // Comment runs to end of line
                while let Some(ch) = self.peek_char() {
                    self.advance();
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn advance(&mut self) {
        if let Some((pos, ch)) = self.chars.next() {
            self.current_pos = pos + ch.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError::UnexpectedChar(ch, expected)),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }
}

/// Parse a string holding exactly one S-expression.
///
/// Anything after the first expression other than whitespace or comments is
/// rejected with [`ParseError::TrailingInput`].
pub fn parse(input: &str) -> Result<Sexpr, ParseError> {
    log::trace!("Parsing S-expression from {} bytes of input", input.len());
    let mut parser = Parser::new(input);
    let result = parser.parse().and_then(|expr| parser.finish().map(|()| expr));
    if let Err(e) = &result {
        log::trace!("Failed to parse S-expression: {e:?}");
    }
    result
}

/// Errors that can occur during parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedEof,
    UnexpectedChar(char, char),
    UnclosedList,
    UnterminatedString,
    EmptyAtom,
    /// Byte offset of the first character after the top-level expression.
    TrailingInput(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ParseError::UnexpectedChar(found, expected) => {
                write!(f, "Expected '{expected}', found '{found}'")
            }
            ParseError::UnclosedList => write!(f, "Unclosed list"),
            ParseError::UnterminatedString => write!(f, "Unterminated string"),
            ParseError::EmptyAtom => write!(f, "Empty atom"),
            ParseError::TrailingInput(pos) => {
                write!(f, "Unexpected input after expression at byte {pos}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Render a coordinate or size the way KiCad writes them: at most four
/// decimals, no trailing zeros, and never `-0`.
pub fn format_number(value: f64) -> String {
    let mut s = format!("{value:.4}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Forms that always render on one line as long as their children do.
const INLINE_FORMS: &[&str] = &[
    "at",
    "xy",
    "pts",
    "start",
    "end",
    "size",
    "diameter",
    "width",
    "type",
    "shape",
    "color",
    "font",
    "effects",
    "justify",
    "stroke",
    "fill",
    "offset",
    "length",
    "pin_names",
    "pin_numbers",
    "name",
    "number",
    "lib_id",
    "uuid",
    "reference",
    "unit",
    "page",
    "path",
    "title",
    "date",
    "rev",
    "comment",
    "paper",
    "version",
    "generator",
    "generator_version",
    "in_bom",
    "on_board",
    "dnp",
    "hide",
    "exclude_from_sim",
    "fields_autoplaced",
    "embedded_fonts",
];

/// Format an S-expression with tab indentation.
///
/// Lists in [`INLINE_FORMS`] (and short atom-only lists) stay on one line.
/// Any other list keeps its leading atoms next to the tag and puts every
/// remaining item on its own line, one level deeper.
pub fn format_sexpr(sexpr: &Sexpr, indent_level: usize) -> String {
    format_sexpr_inner(sexpr, indent_level, true)
}

fn format_sexpr_inner(sexpr: &Sexpr, indent_level: usize, add_indent: bool) -> String {
    let pad = "\t".repeat(indent_level);
    let indent = if add_indent { pad.as_str() } else { "" };

    match sexpr {
        Sexpr::Symbol(s) => format!("{indent}{s}"),
        Sexpr::String(s) => format!("{}\"{}\"", indent, escape_string(s)),
        Sexpr::List(items) if items.is_empty() => format!("{indent}()"),
        Sexpr::List(items) if is_inline_list(items) => {
            let inner: Vec<String> = items
                .iter()
                .map(|item| format_sexpr_inner(item, 0, false))
                .collect();
            format!("{indent}({})", inner.join(" "))
        }
        Sexpr::List(items) => {
            let head_len = items.iter().take_while(|item| item.is_atom()).count().max(1);
            let head: Vec<String> = items[..head_len]
                .iter()
                .map(|item| format_sexpr_inner(item, 0, false))
                .collect();

            let mut result = format!("{indent}({}", head.join(" "));
            for item in &items[head_len..] {
                result.push('\n');
                result.push_str(&format_sexpr_inner(item, indent_level + 1, true));
            }
            result.push('\n');
            result.push_str(&pad);
            result.push(')');
            result
        }
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(ch),
        }
    }
    result
}

fn is_inline_list(items: &[Sexpr]) -> bool {
    match items.first() {
        Some(Sexpr::Symbol(head)) if INLINE_FORMS.contains(&head.as_str()) => {
            items.iter().skip(1).all(|item| match item {
                Sexpr::List(children) => is_inline_list(children),
                _ => true,
            })
        }
        _ => items.len() <= 3 && items.iter().all(Sexpr::is_atom),
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_sexpr(self, 0))
    }
}
