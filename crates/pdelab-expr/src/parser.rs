//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | NAME | NAME '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! `-x^2` is `-(x^2)` and `2^-1` is `2^(-1)`. Both the parser's own
//! recursion and the height of the resulting tree are capped at
//! [`MAX_DEPTH`], so neither parsing nor evaluation can exhaust the stack.

use std::f64::consts::{E, PI};

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::ast::{BinOp, Func, Node};
use crate::error::ExprError;
use crate::eval::MAX_DEPTH;
use crate::token::{tokenize, Token, TokenKind};

/// A subtree with its height.
struct Sub {
    node: Node,
    height: usize,
}

pub(crate) struct Parsed {
    pub root: Node,
    pub variables: IndexSet<String>,
}

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    allowed: &'a [&'a str],
    variables: IndexSet<String>,
}

/// Parse `src`, accepting only variables named in `allowed`.
pub(crate) fn parse(src: &str, allowed: &[&str]) -> Result<Parsed, ExprError> {
    let tokens = tokenize(src)?;
    let mut p = Parser {
        src,
        tokens,
        pos: 0,
        depth: 0,
        allowed,
        variables: IndexSet::new(),
    };
    let sub = p.expr()?;
    if let Some(tok) = p.tokens.get(p.pos) {
        return Err(p.unexpected(tok, "an operator or end of input"));
    }
    Ok(Parsed {
        root: sub.node,
        variables: p.variables,
    })
}

impl Parser<'_> {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn here(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.src.len(), |t| t.pos)
    }

    fn unexpected(&self, tok: &Token, expected: &'static str) -> ExprError {
        ExprError::UnexpectedToken {
            found: tok.text(self.src).to_string(),
            expected,
            pos: tok.pos,
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep {
                limit: MAX_DEPTH,
                pos: self.here(),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn join(&self, op: BinOp, lhs: Sub, rhs: Sub, pos: usize) -> Result<Sub, ExprError> {
        let height = 1 + lhs.height.max(rhs.height);
        if height > MAX_DEPTH {
            return Err(ExprError::TooDeep {
                limit: MAX_DEPTH,
                pos,
            });
        }
        Ok(Sub {
            node: Node::Binary {
                op,
                lhs: Box::new(lhs.node),
                rhs: Box::new(rhs.node),
            },
            height,
        })
    }

    fn expr(&mut self) -> Result<Sub, ExprError> {
        self.enter()?;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => break,
            };
            let pos = self.here();
            self.pos += 1;
            let rhs = self.term()?;
            lhs = self.join(op, lhs, rhs, pos)?;
        }
        self.leave();
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Sub, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => break,
            };
            let pos = self.here();
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = self.join(op, lhs, rhs, pos)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Sub, ExprError> {
        self.enter()?;
        let out = match self.peek() {
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.unary()?
            }
            Some(TokenKind::Minus) => {
                self.pos += 1;
                let inner = self.unary()?;
                Sub {
                    node: Node::Neg(Box::new(inner.node)),
                    height: inner.height + 1,
                }
            }
            _ => self.power()?,
        };
        self.leave();
        Ok(out)
    }

    fn power(&mut self) -> Result<Sub, ExprError> {
        let base = self.primary()?;
        if self.peek() == Some(&TokenKind::Caret) {
            let pos = self.here();
            self.pos += 1;
            let exponent = self.unary()?;
            return self.join(BinOp::Pow, base, exponent, pos);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Sub, ExprError> {
        let Some(tok) = self.tokens.get(self.pos).cloned() else {
            return Err(ExprError::UnexpectedEnd {
                expected: "a number, name, or '('",
            });
        };
        self.pos += 1;
        match tok.kind {
            TokenKind::Number(v) => Ok(Sub {
                node: Node::Num(v),
                height: 1,
            }),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect_close()?;
                Ok(inner)
            }
            TokenKind::Ident(ref raw) => {
                let name = raw.strip_prefix("np.").unwrap_or(raw);
                if self.peek() == Some(&TokenKind::LParen) {
                    self.pos += 1;
                    self.call(name, tok.pos)
                } else {
                    self.name(name, tok.pos)
                }
            }
            _ => Err(self.unexpected(&tok, "a number, name, or '('")),
        }
    }

    fn expect_close(&mut self) -> Result<(), ExprError> {
        if self.peek() == Some(&TokenKind::RParen) {
            self.pos += 1;
            return Ok(());
        }
        match self.tokens.get(self.pos) {
            Some(t) => Err(self.unexpected(t, "')'")),
            None => Err(ExprError::UnexpectedEnd { expected: "')'" }),
        }
    }

    fn name(&mut self, name: &str, pos: usize) -> Result<Sub, ExprError> {
        let node = match name {
            "pi" => Node::Num(PI),
            "e" => Node::Num(E),
            _ if self.allowed.contains(&name) => {
                let (slot, _) = self.variables.insert_full(name.to_string());
                Node::Var(slot)
            }
            _ => {
                return Err(ExprError::UnknownVariable {
                    name: name.to_string(),
                    pos: Some(pos),
                })
            }
        };
        Ok(Sub { node, height: 1 })
    }

    /// Arguments of a call whose `(` has been consumed.
    fn call(&mut self, name: &str, pos: usize) -> Result<Sub, ExprError> {
        let func = Func::from_name(name).ok_or_else(|| ExprError::UnknownFunction {
            name: name.to_string(),
            pos,
        })?;
        let mut args: SmallVec<[Box<Node>; 2]> = SmallVec::new();
        let mut height = 0;
        if self.peek() != Some(&TokenKind::RParen) {
            loop {
                let arg = self.expr()?;
                height = height.max(arg.height);
                args.push(Box::new(arg.node));
                if self.peek() == Some(&TokenKind::Comma) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        self.expect_close()?;
        if args.len() != func.arity() {
            return Err(ExprError::Arity {
                name: func.name(),
                expected: func.arity(),
                got: args.len(),
                pos,
            });
        }
        Ok(Sub {
            node: Node::Call { func, args },
            height: height + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XY: &[&str] = &["x", "y"];

    fn value(src: &str) -> f64 {
        parse(src, XY).unwrap().root.eval(&[])
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(value("1 + 2 * 3"), 7.0);
        assert_eq!(value("(1 + 2) * 3"), 9.0);
        assert_eq!(value("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(value("2 ** 3 ** 2"), 512.0);
        assert_eq!(value("-2 ^ 2"), -4.0);
        assert_eq!(value("2 ^ -1"), 0.5);
        assert_eq!(value("8 / 4 / 2"), 1.0);
        assert_eq!(value("1 - 2 - 3"), -4.0);
        assert_eq!(value("--+3"), 3.0);
    }

    #[test]
    fn constants_and_prefix() {
        assert_eq!(value("pi"), PI);
        assert_eq!(value("np.pi"), PI);
        assert_eq!(value("np.exp(1)"), 1f64.exp());
        assert_eq!(value("e"), E);
        assert_eq!(value("max(1, min(5, 3))"), 3.0);
    }

    #[test]
    fn variables_get_slots_in_order_of_appearance() {
        let p = parse("y * 2 + x + y", XY).unwrap();
        assert_eq!(p.variables.len(), 2);
        assert_eq!(p.variables.get_index(0).map(String::as_str), Some("y"));
        assert_eq!(p.root.eval(&[10.0, 1.0]), 31.0);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(
            parse("x + z", XY).err(),
            Some(ExprError::UnknownVariable {
                name: "z".into(),
                pos: Some(4)
            })
        );
        assert_eq!(
            parse("os.system(1)", XY).err(),
            Some(ExprError::UnknownFunction {
                name: "os.system".into(),
                pos: 0
            })
        );
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            parse("1 +", XY).err(),
            Some(ExprError::UnexpectedEnd {
                expected: "a number, name, or '('"
            })
        );
        assert_eq!(
            parse("(1", XY).err(),
            Some(ExprError::UnexpectedEnd { expected: "')'" })
        );
        assert!(matches!(
            parse("1 2", XY),
            Err(ExprError::UnexpectedToken { pos: 2, .. })
        ));
        assert!(matches!(
            parse("sin(1, 2)", XY),
            Err(ExprError::Arity {
                name: "sin",
                expected: 1,
                got: 2,
                ..
            })
        ));
        assert!(matches!(
            parse("atan2()", XY),
            Err(ExprError::Arity { got: 0, .. })
        ));
        assert!(matches!(
            parse("*", XY),
            Err(ExprError::UnexpectedToken { pos: 0, .. })
        ));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(matches!(parse(&deep, XY), Err(ExprError::TooDeep { .. })));
        let long_sum = vec!["1"; MAX_DEPTH + 2].join("+");
        assert!(matches!(parse(&long_sum, XY), Err(ExprError::TooDeep { .. })));
        let negations = "-".repeat(MAX_DEPTH + 1) + "1";
        assert!(matches!(parse(&negations, XY), Err(ExprError::TooDeep { .. })));
    }

    #[test]
    fn moderate_nesting_is_fine() {
        let nested = format!("{}x{}", "(".repeat(20), ")".repeat(20));
        assert!(parse(&nested, XY).is_ok());
        let sum = vec!["1"; 40].join("+");
        assert_eq!(value(&sum), 40.0);
    }
}
