//! Sandboxed arithmetic for user-defined criticality equations
//!
//! The grammar is deliberately tiny:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | atom
//! atom   := number | identifier | '(' expr ')'
//! ```
//!
//! There are no function calls, attribute access or assignment. Every
//! identifier must belong to a caller-supplied whitelist, checked before
//! evaluation. Input length and nesting depth are bounded.

use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bounds applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EquationLimits {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_length() -> usize {
    512
}

fn default_max_depth() -> usize {
    32
}

impl Default for EquationLimits {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Ident(String),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut end = start;
            let mut prev = c;
            while let Some(&(i, d)) = chars.peek() {
                let exponent_sign = (d == '+' || d == '-') && (prev == 'e' || prev == 'E');
                if d.is_ascii_digit() || d == '.' || d == 'e' || d == 'E' || exponent_sign {
                    end = i + d.len_utf8();
                    prev = d;
                    chars.next();
                } else {
                    break;
                }
            }
            let text = &expr[start..end];
            let value = text.parse::<f64>().map_err(|_| {
                AnalysisError::Equation(format!("Invalid number '{}' in expression: {}", text, expr))
            })?;
            tokens.push(Token::Number(value));
        } else if c.is_ascii_alphabetic() || c == '_' {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_alphanumeric() || d == '_' {
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(expr[start..end].to_string()));
        } else {
            chars.next();
            tokens.push(match c {
                '+' | '-' | '*' | '/' => Token::Op(c),
                '(' => Token::LParen,
                ')' => Token::RParen,
                other => {
                    return Err(AnalysisError::Equation(format!(
                        "Unexpected character '{}' in expression: {}",
                        other, expr
                    )))
                }
            });
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, message: &str) -> AnalysisError {
        AnalysisError::Equation(format!("{} in expression: {}", message, self.source))
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(self.error(&format!("Nesting deeper than {}", self.max_depth)));
        }
        Ok(())
    }

    /// `depth` counts the enclosing parentheses and unary minus signs
    fn expr(&mut self, depth: usize) -> Result<Expr> {
        let mut left = self.term(depth)?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            let op = if *op == '+' { BinaryOp::Add } else { BinaryOp::Sub };
            self.pos += 1;
            let right = self.term(depth)?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn term(&mut self, depth: usize) -> Result<Expr> {
        let mut left = self.unary(depth)?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            let op = if *op == '*' { BinaryOp::Mul } else { BinaryOp::Div };
            self.pos += 1;
            let right = self.unary(depth)?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self, depth: usize) -> Result<Expr> {
        if let Some(Token::Op('-')) = self.peek() {
            self.pos += 1;
            self.check_depth(depth + 1)?;
            return Ok(Expr::Neg(Box::new(self.unary(depth + 1)?)));
        }
        self.atom(depth)
    }

    fn atom(&mut self, depth: usize) -> Result<Expr> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => Ok(Expr::Ident(name)),
            Some(Token::LParen) => {
                self.check_depth(depth + 1)?;
                let inner = self.expr(depth + 1)?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("Missing ')'")),
                }
            }
            Some(token) => Err(self.error(&format!("Unexpected {:?}", token))),
            None => Err(self.error("Unexpected end")),
        }
    }
}

/// Parser and evaluator for user-defined equations
pub struct Evaluator;

impl Evaluator {
    /// Parse an equation. An empty or blank equation is the constant 0.
    pub fn parse(expr: &str, limits: &EquationLimits) -> Result<Expr> {
        if expr.len() > limits.max_length {
            return Err(AnalysisError::Equation(format!(
                "Expression longer than {} characters",
                limits.max_length
            )));
        }
        if expr.trim().is_empty() {
            return Ok(Expr::Number(0.0));
        }
        let mut parser = Parser {
            source: expr,
            tokens: tokenize(expr)?,
            pos: 0,
            max_depth: limits.max_depth,
        };
        let ast = parser.expr(0)?;
        if parser.pos < parser.tokens.len() {
            return Err(parser.error("Trailing input"));
        }
        Ok(ast)
    }

    /// Every identifier an equation references, sorted and deduplicated
    pub fn extract_variables(ast: &Expr) -> Vec<String> {
        let mut vars = Vec::new();
        Self::collect_variables(ast, &mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(ast: &Expr, vars: &mut Vec<String>) {
        match ast {
            Expr::Number(_) => {}
            Expr::Ident(name) => vars.push(name.clone()),
            Expr::Neg(inner) => Self::collect_variables(inner, vars),
            Expr::Binary(_, left, right) => {
                Self::collect_variables(left, vars);
                Self::collect_variables(right, vars);
            }
        }
    }

    /// Reject any identifier outside `valid_names`
    pub fn validate_variables(expr: &str, ast: &Expr, valid_names: &[&str]) -> Result<()> {
        for var in Self::extract_variables(ast) {
            if !valid_names.contains(&var.as_str()) {
                return Err(AnalysisError::Equation(format!(
                    "Undefined variable '{}' in expression: {}",
                    var, expr
                )));
            }
        }
        Ok(())
    }

    /// Evaluate a parsed equation. Division follows IEEE semantics.
    pub fn eval(ast: &Expr, vars: &HashMap<String, f64>) -> Result<f64> {
        Ok(match ast {
            Expr::Number(value) => *value,
            Expr::Ident(name) => *vars.get(name).ok_or_else(|| {
                AnalysisError::Equation(format!("Unbound variable '{}'", name))
            })?,
            Expr::Neg(inner) => -Self::eval(inner, vars)?,
            Expr::Binary(op, left, right) => {
                let l = Self::eval(left, vars)?;
                let r = Self::eval(right, vars)?;
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                }
            }
        })
    }

    /// Parse, validate against `valid_names` and evaluate in one step
    pub fn eval_str(
        expr: &str,
        vars: &HashMap<String, f64>,
        valid_names: &[&str],
        limits: &EquationLimits,
    ) -> Result<f64> {
        let ast = Self::parse(expr, limits)?;
        Self::validate_variables(expr, &ast, valid_names)?;
        Self::eval(&ast, vars)
    }

    /// Fully parenthesised rendering of a parsed equation
    pub fn render(ast: &Expr) -> String {
        match ast {
            Expr::Number(value) => value.to_string(),
            Expr::Ident(name) => name.clone(),
            Expr::Neg(inner) => format!("-{}", Self::render(inner)),
            Expr::Binary(op, left, right) => format!(
                "({} {} {})",
                Self::render(left),
                op.symbol(),
                Self::render(right)
            ),
        }
    }
}
