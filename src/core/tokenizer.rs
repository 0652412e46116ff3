use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InSingleQuote,
    InDoubleQuote,
}

struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    escaping: bool,
    buffer: String,
    word_open: bool,
    tokens: Vec<String>,
}

impl Tokenizer {
    fn new(line: &str) -> Self {
        Tokenizer {
            input: line.chars().collect(),
            pos: 0,
            state: State::Normal,
            escaping: false,
            buffer: String::new(),
            word_open: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<String> {
        while let Some(ch) = self.read_char() {
            if self.escaping {
                // A pending backslash takes the next character as-is,
                // quotes and whitespace included.
                self.escaping = false;
                self.push(ch);
                continue;
            }
            match self.state {
                State::Normal => self.handle_normal(ch),
                State::InSingleQuote => self.handle_single_quote(ch),
                State::InDoubleQuote => self.handle_double_quote(ch),
            }
        }

        // An open quote at end of input closes itself; a trailing
        // backslash escapes nothing and is dropped.
        self.emit_word();
        self.tokens
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn push(&mut self, ch: char) {
        self.buffer.push(ch);
        self.word_open = true;
    }

    // Entering or leaving a quote starts a word even when nothing has
    // been buffered yet, so a bare '' still emits one empty token.
    fn open_word(&mut self) {
        self.word_open = true;
    }

    fn emit_word(&mut self) {
        if self.word_open {
            self.tokens.push(mem::take(&mut self.buffer));
            self.word_open = false;
        }
    }

    fn handle_normal(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => self.emit_word(),
            '\\' => self.escaping = true,
            '\'' => {
                self.state = State::InSingleQuote;
                self.open_word();
            }
            '"' => {
                self.state = State::InDoubleQuote;
                self.open_word();
            }
            c => self.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        if ch == '\'' {
            self.state = State::Normal;
        } else {
            self.push(ch);
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '"' => self.state = State::Normal,
            '\\' => match self.peek_char() {
                // Inside double quotes only these four are escapable;
                // anywhere else the backslash stays in the token.
                Some(next) if matches!(next, '\\' | '"' | '$' | '\n') => {
                    self.read_char();
                    self.push(next);
                }
                _ => self.push('\\'),
            },
            c => self.push(c),
        }
    }
}

/// Splits a command line into tokens, resolving quoting and escapes.
/// Never fails: unterminated quotes are treated as closed at end of
/// input.
pub fn tokenize(line: &str) -> Vec<String> {
    Tokenizer::new(line).run()
}
