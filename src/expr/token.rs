use crate::error::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Num(f64),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    LParen,
    RParen,
}

/// Tokenizes an expression string.
///
/// Supported forms:
/// - numeric literals: integers (`12`), decimals (`0.5`, `.5`), and
///   scientific notation (`1e-3`, `2.5E4`)
/// - operators `+ - * / ^`, with `**` accepted as a second spelling of
///   the power operator
/// - parentheses
/// - identifiers `[a-zA-Z_][a-zA-Z0-9_]*`, normalized to lowercase;
///   name resolution happens at parse time
///
/// Any other character is an [`EvalError::UnexpectedChar`].
pub fn tokenize(src: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Token::LParen);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Token::RParen);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Token::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Token::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" is the power operator, same as '^'
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Token::Caret);
                    i += 2;
                } else {
                    out.push(Token::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Token::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Token::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiers: [a-zA-Z_][a-zA-Z0-9_]*, lowercase-normalized
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Token::Ident(word.to_lowercase()));
            continue;
        }

        // Numeric literal: digits, optional fraction, optional exponent
        if c.is_ascii_digit() || (c == '.' && matches!(chars.get(i + 1), Some(d) if d.is_ascii_digit()))
        {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            // exponent only when something numeric actually follows,
            // so "2*e" still lexes 'e' as an identifier
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j + 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value: f64 = text
                .parse()
                .map_err(|_| EvalError::InvalidNumber(text.clone()))?;
            out.push(Token::Num(value));
            continue;
        }

        return Err(EvalError::UnexpectedChar(c));
    }

    Ok(out)
}
