// Where the lexer currently is inside the source buffer. Only the lexer
// advances it; errors copy the line/column out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'src> {
    pub index: usize,
    pub line: usize,
    pub column: usize,
    pub source_name: &'src str,
    pub source_text: &'src str,
}

impl<'src> Position<'src> {
    pub fn new(source_name: &'src str, source_text: &'src str) -> Self {
        Self {
            index: 0,
            line: 0,
            column: 0,
            source_name,
            source_text,
        }
    }

    /// Step past `consumed`, the character the cursor was sitting on.
    pub fn advance(&mut self, consumed: char) {
        self.index += 1;

        if consumed == '\n' {
            self.column = 0;
            self.line += 1;
        } else {
            self.column += 1;
        }
    }
}
