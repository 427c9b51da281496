// Shunting-yard -> RPN -> AST.
//
// Identifier resolution happens when the AST is built: `x` is the free
// variable, `pi` and `e` are constants, whitelist names become unary
// function nodes, and anything else is rejected. The grammar has no
// mechanism to resolve names beyond that.

use crate::error::EvalError;
use crate::expr::ast::{Expr, UnaryFunc};
use crate::expr::token::{tokenize, Token};

fn precedence(t: &Token) -> i32 {
    match t {
        Token::Plus | Token::Minus => 1,
        Token::Star | Token::Slash => 2,
        Token::Caret => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Token) -> bool {
    matches!(t, Token::Caret)
}

fn is_function(name: &str) -> bool {
    UnaryFunc::from_name(name).is_some()
}

/// Parses an expression string into an [`Expr`].
pub fn parse(src: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    let rpn = to_rpn(&tokens)?;
    build(&rpn)
}

/// Converts a token stream to RPN (postfix) order.
///
/// Functions stay glued to their argument: a function identifier sits on
/// the operator stack and is emitted right after its closing parenthesis.
/// A '-' seen where no value precedes it is unary; a zero is injected so
/// `-x` becomes `0 x -`.
fn to_rpn(tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
    let mut out: Vec<Token> = Vec::new();
    let mut ops: Vec<Token> = Vec::new();

    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Token::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Token::Ident(name) => {
                if is_function(&name) {
                    ops.push(Token::Ident(name));
                    prev_was_value = false;
                } else {
                    // variable or constant, resolved in build()
                    out.push(Token::Ident(name));
                    prev_was_value = true;
                }
            }

            Token::LParen => {
                ops.push(tok);
                prev_was_value = false;
            }

            Token::RParen => {
                let mut matched = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Token::LParen) {
                        matched = true;
                        break;
                    }
                    out.push(top);
                }
                if !matched {
                    return Err(EvalError::UnbalancedParens);
                }

                // a function on top of the stack belongs to this group
                if let Some(Token::Ident(name)) = ops.last() {
                    if is_function(name.as_str()) {
                        out.push(ops.pop().expect("ident on stack"));
                    }
                }

                prev_was_value = true;
            }

            Token::Minus if !prev_was_value => {
                // unary minus: inject a zero so `-x` becomes `0 x -`.
                // Nothing is popped: the injected zero starts a fresh
                // sub-expression, keeping `2*-x` as `2*(0-x)`.
                out.push(Token::Num(0.0));
                ops.push(Token::Minus);
            }

            Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret => {
                pop_higher(&mut ops, &mut out, &tok);
                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    while let Some(op) = ops.pop() {
        if matches!(op, Token::LParen) {
            return Err(EvalError::UnbalancedParens);
        }
        out.push(op);
    }

    Ok(out)
}

/// Pops operators with higher (or equal, for left-associative `tok`)
/// precedence onto the output. Stops at '(' and at function identifiers.
fn pop_higher(ops: &mut Vec<Token>, out: &mut Vec<Token>, tok: &Token) {
    while let Some(top) = ops.last() {
        if matches!(top, Token::LParen) {
            break;
        }
        if let Token::Ident(name) = top {
            if is_function(name.as_str()) {
                break;
            }
        }

        let should_pop = if is_right_associative(tok) {
            precedence(top) > precedence(tok)
        } else {
            precedence(top) >= precedence(tok)
        };

        if should_pop {
            out.push(ops.pop().expect("operator on stack"));
        } else {
            break;
        }
    }
}

/// Folds an RPN token sequence into an [`Expr`].
fn build(rpn: &[Token]) -> Result<Expr, EvalError> {
    let mut stack: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Token::Num(v) => stack.push(Expr::Num(v)),

            Token::Ident(name) => {
                if let Some(func) = UnaryFunc::from_name(&name) {
                    let arg = stack
                        .pop()
                        .ok_or(EvalError::MissingArgument(func.name()))?;
                    stack.push(Expr::Call(func, Box::new(arg)));
                } else {
                    let atom = match name.as_str() {
                        "x" => Expr::Var,
                        "pi" => Expr::Num(std::f64::consts::PI),
                        "e" => Expr::Num(std::f64::consts::E),
                        _ => return Err(EvalError::UnknownIdentifier(name)),
                    };
                    stack.push(atom);
                }
            }

            Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret => {
                let rhs = stack.pop().ok_or(EvalError::Malformed)?;
                let lhs = stack.pop().ok_or(EvalError::Malformed)?;
                let node = match tok {
                    Token::Plus => Expr::Add(Box::new(lhs), Box::new(rhs)),
                    Token::Minus => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                    Token::Star => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                    Token::Slash => Expr::Div(Box::new(lhs), Box::new(rhs)),
                    Token::Caret => Expr::Pow(Box::new(lhs), Box::new(rhs)),
                    _ => unreachable!(),
                };
                stack.push(node);
            }

            Token::LParen | Token::RParen => return Err(EvalError::Malformed),
        }
    }

    let expr = stack.pop().ok_or(EvalError::Malformed)?;
    if !stack.is_empty() {
        return Err(EvalError::Malformed);
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_power() {
        let e = parse("x**2").unwrap();
        assert_eq!(e.eval(3.0), 9.0);
        assert_eq!(parse("x^2").unwrap(), e);
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(parse("2+3*4").unwrap().eval(0.0), 14.0);
        assert_eq!(parse("(2+3)*4").unwrap().eval(0.0), 20.0);
    }

    #[test]
    fn test_parse_power_right_associative() {
        // 2^3^2 = 2^(3^2) = 512, not (2^3)^2 = 64
        assert_eq!(parse("2^3^2").unwrap().eval(0.0), 512.0);
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(parse("-x").unwrap().eval(3.0), -3.0);
        // -x^2 is -(x^2)
        assert_eq!(parse("-x^2").unwrap().eval(3.0), -9.0);
        assert_eq!(parse("2*-x").unwrap().eval(3.0), -6.0);
    }

    #[test]
    fn test_parse_functions_and_constants() {
        let e = parse("sin(pi/2)").unwrap();
        assert!((e.eval(0.0) - 1.0).abs() < 1e-12);

        let e = parse("log(e)").unwrap();
        assert!((e.eval(0.0) - 1.0).abs() < 1e-12);

        let e = parse("sqrt(abs(x))").unwrap();
        assert_eq!(e.eval(-4.0), 2.0);
    }

    #[test]
    fn test_parse_rejects_unknown_identifiers() {
        assert_eq!(
            parse("y + 1"),
            Err(EvalError::UnknownIdentifier("y".into()))
        );
        assert_eq!(
            parse("__import__"),
            Err(EvalError::UnknownIdentifier("__import__".into()))
        );
        assert_eq!(
            parse("system(x)"),
            Err(EvalError::UnknownIdentifier("system".into()))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse(""), Err(EvalError::Empty));
        assert_eq!(parse("(x"), Err(EvalError::UnbalancedParens));
        assert_eq!(parse("x)"), Err(EvalError::UnbalancedParens));
        assert_eq!(parse("x 2"), Err(EvalError::Malformed));
        assert_eq!(parse("sin()"), Err(EvalError::MissingArgument("sin")));
        assert_eq!(parse("*x"), Err(EvalError::Malformed));
    }
}
