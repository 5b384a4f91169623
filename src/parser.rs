use crate::error::Error;
use crate::interner::Atom;
use crate::language::SExpr;

// ============================================================================
// Reader
// ============================================================================

/// Read one logical input unit (a line or file chunk) into its top-level
/// expressions, in order.
///
/// Any error aborts the whole call; no partial results are returned.
pub fn read(input: &str) -> Result<Vec<SExpr>, Error> {
    Parser::new(input).run()
}

/// Single-pass reader: one cursor over the char buffer, shared by all
/// recursive helpers. No backtracking, no lookahead beyond the current
/// character.
struct Parser {
    source: String,
    input: Vec<char>,
    position: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Parser {
            source: input.to_string(),
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> char {
        if self.position < self.input.len() {
            self.input[self.position]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn is_atom_char(&self) -> bool {
        let c = self.current_char();
        !c.is_whitespace() && c != '(' && c != ')'
    }

    fn err(&self, message: &str) -> Error {
        Error::parse(self.source.clone(), self.position, message)
    }

    fn run(mut self) -> Result<Vec<SExpr>, Error> {
        let mut exprs = Vec::new();
        while !self.is_eof() {
            let c = self.current_char();
            if c.is_whitespace() {
                self.advance();
            } else if c == ')' {
                return Err(self.err("Unexpected ')'"));
            } else if c == '(' {
                self.advance();
                exprs.push(self.parse_list()?);
            } else {
                exprs.push(self.parse_atom());
            }
        }
        Ok(exprs)
    }

    /// The opening `(` has already been consumed; returns after the
    /// matching `)`.
    fn parse_list(&mut self) -> Result<SExpr, Error> {
        let mut elements = Vec::new();
        while !self.is_eof() {
            let c = self.current_char();
            if c.is_whitespace() {
                self.advance();
            } else if c == ')' {
                self.advance();
                return Ok(SExpr::list(elements));
            } else if c == '(' {
                self.advance();
                elements.push(self.parse_list()?);
            } else {
                elements.push(self.parse_atom());
            }
        }
        Err(self.err("Unclosed expression"))
    }

    /// Greedy: an atom token is a maximal run of non-whitespace,
    /// non-parenthesis characters. Numbers are not distinguished.
    fn parse_atom(&mut self) -> SExpr {
        let start = self.position;
        while !self.is_eof() && self.is_atom_char() {
            self.advance();
        }
        let token: String = self.input[start..self.position].iter().collect();
        SExpr::Atom(Atom::new(&token))
    }
}
