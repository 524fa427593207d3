//! Calculator tool — evaluates arithmetic expressions.
//!
//! Only the characters `0123456789.+-*/() ` are admitted; anything else is
//! rejected before evaluation. Supports `+`, `-`, `*`, `/`, `//` (floor
//! division), `**` (power), parentheses, decimals and unary signs, parsed by
//! binding power.
//!
//! Integers and floats stay distinct: `/` always yields a float, a float
//! operand makes the result a float, and floats print in shortest
//! round-trip form with a trailing `.0` when integral (`10/2` → `5.0`,
//! `2**10` → `1024`).

use async_trait::async_trait;
use orgassist_core::error::ToolError;
use orgassist_core::tool::{Tool, ToolResult};
use std::fmt;

/// Characters an expression may contain.
pub const ALLOWED_CHARS: &str = "0123456789.+-*/() ";

/// Output for expressions containing a character outside [`ALLOWED_CHARS`].
pub const REJECTED: &str = "Expresión no permitida.";

/// Deepest nesting of parentheses, signs and powers the parser accepts.
pub const MAX_DEPTH: usize = 200;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        crate::CALCULATOR
    }

    fn description(&self) -> &str {
        "Calculadora aritmética básica segura."
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let expr = arguments["expression"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'expression' argument".into()))?;

        Ok(calculate(expr))
    }
}

/// Check, evaluate and format. Never fails: rejections and evaluation
/// errors become the result text.
pub fn calculate(expr: &str) -> ToolResult {
    if !is_allowed(expr) {
        return ToolResult::failed(REJECTED);
    }

    match evaluate(expr) {
        Ok(value) => {
            let mut result = ToolResult::ok(value.to_string());
            result.data = Some(value.to_json());
            result
        }
        Err(e) => ToolResult::failed(format!("Error de cálculo: {e}")),
    }
}

pub fn is_allowed(expr: &str) -> bool {
    expr.chars().all(|c| ALLOWED_CHARS.contains(c))
}

/// A calculator result: exact integer or binary float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i128),
    Float(f64),
}

impl Value {
    fn as_f64(self) -> f64 {
        match self {
            Value::Int(i) => i as f64,
            Value::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Value::Int(i) => i == 0,
            Value::Float(f) => f == 0.0,
        }
    }

    fn negate(self) -> Result<Value, String> {
        match self {
            Value::Int(i) => i.checked_neg().map(Value::Int).ok_or_else(out_of_range),
            Value::Float(f) => Ok(Value::Float(-f)),
        }
    }

    fn to_json(self) -> serde_json::Value {
        match self {
            Value::Int(i) => i64::try_from(i)
                .map(serde_json::Value::from)
                .unwrap_or_else(|_| serde_json::Value::String(i.to_string())),
            Value::Float(f) => serde_json::Value::from(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(x)),
        }
    }
}

/// Shortest round-trip decimal; exponent form outside `[1e-4, 1e16)`.
fn format_float(x: f64) -> String {
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{x:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        };
    }
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn out_of_range() -> String {
    "resultado fuera de rango".into()
}

/// Evaluate an arithmetic expression with the usual precedence:
/// `**` (right-associative) over unary signs over `* / //` over `+ -`.
pub fn evaluate(expr: &str) -> Result<Value, String> {
    let tokens = lex(expr)?;
    if tokens.is_empty() {
        return Err("expresión vacía".into());
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression(0)?;
    if let Some(token) = parser.tokens.get(parser.pos) {
        return Err(format!("símbolo inesperado en la posición {}: {token}", parser.pos));
    }
    if let Value::Float(f) = value
        && !f.is_finite()
    {
        return Err(out_of_range());
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Pow,
}

/// Binding power of a prefix sign: looser than `**`, tighter than `*`.
const PREFIX_BP: u8 = 5;

impl Op {
    /// (left, right) binding powers.
    fn binding_power(self) -> (u8, u8) {
        match self {
            Op::Add | Op::Sub => (1, 2),
            Op::Mul | Op::Div | Op::FloorDiv => (3, 4),
            Op::Pow => (7, 6),
        }
    }

    fn apply(self, lhs: Value, rhs: Value) -> Result<Value, String> {
        match (self, lhs, rhs) {
            (Op::Div, _, r) if r.is_zero() => Err("división por cero".into()),
            (Op::FloorDiv, _, r) if r.is_zero() => Err("división entera por cero".into()),
            (Op::Pow, l, r) if l.is_zero() && r.as_f64() < 0.0 => {
                Err("cero elevado a una potencia negativa".into())
            }
            (Op::Div, l, r) => Ok(Value::Float(l.as_f64() / r.as_f64())),
            (op, Value::Int(a), Value::Int(b)) => op.apply_int(a, b),
            (op, l, r) => Ok(Value::Float(op.apply_float(l.as_f64(), r.as_f64()))),
        }
    }

    fn apply_int(self, a: i128, b: i128) -> Result<Value, String> {
        let exact = match self {
            Op::Add => a.checked_add(b),
            Op::Sub => a.checked_sub(b),
            Op::Mul => a.checked_mul(b),
            Op::FloorDiv => a.checked_div(b).zip(a.checked_rem(b)).map(|(q, r)| {
                if r != 0 && (r < 0) != (b < 0) { q - 1 } else { q }
            }),
            Op::Pow if b < 0 => {
                return Ok(Value::Float(self.apply_float(a as f64, b as f64)));
            }
            Op::Pow => u32::try_from(b).ok().and_then(|e| a.checked_pow(e)),
            Op::Div => return Ok(Value::Float(a as f64 / b as f64)),
        };
        exact.map(Value::Int).ok_or_else(out_of_range)
    }

    fn apply_float(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
            Op::FloorDiv => (a / b).floor(),
            Op::Pow => a.powf(b),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::FloorDiv => "//",
            Op::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Value),
    Op(Op),
    Open,
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n}"),
            Token::Op(op) => f.write_str(op.symbol()),
            Token::Open => f.write_str("("),
            Token::Close => f.write_str(")"),
        }
    }
}

fn lex(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            ' ' => continue,
            '(' => Token::Open,
            ')' => Token::Close,
            '+' => Token::Op(Op::Add),
            '-' => Token::Op(Op::Sub),
            '*' if chars.next_if(|&(_, n)| n == '*').is_some() => Token::Op(Op::Pow),
            '*' => Token::Op(Op::Mul),
            '/' if chars.next_if(|&(_, n)| n == '/').is_some() => Token::Op(Op::FloorDiv),
            '/' => Token::Op(Op::Div),
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start + 1;
                while let Some((i, _)) = chars.next_if(|&(_, n)| n.is_ascii_digit() || n == '.') {
                    end = i + 1;
                }
                Token::Num(number(&input[start..end])?)
            }
            other => return Err(format!("carácter inesperado: '{other}'")),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn number(literal: &str) -> Result<Value, String> {
    if literal.contains('.') {
        literal
            .parse()
            .map(Value::Float)
            .map_err(|_| format!("número inválido: {literal}"))
    } else {
        literal
            .parse()
            .map(Value::Int)
            .map_err(|_| format!("número demasiado grande: {literal}"))
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += usize::from(token.is_some());
        token
    }

    fn expression(&mut self, min_bp: u8) -> Result<Value, String> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err("demasiados niveles de anidación".into());
        }
        let value = self.binary(min_bp);
        self.depth -= 1;
        value
    }

    fn binary(&mut self, min_bp: u8) -> Result<Value, String> {
        let mut lhs = self.operand()?;

        while let Some(Token::Op(op)) = self.tokens.get(self.pos).copied() {
            let (left_bp, right_bp) = op.binding_power();
            if left_bp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.expression(right_bp)?;
            lhs = op.apply(lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn operand(&mut self) -> Result<Value, String> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Op(Op::Add)) => self.expression(PREFIX_BP),
            Some(Token::Op(Op::Sub)) => self.expression(PREFIX_BP)?.negate(),
            Some(Token::Open) => {
                let value = self.expression(0)?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err("falta un paréntesis de cierre".into()),
                }
            }
            Some(token) => Err(format!("símbolo inesperado: {token}")),
            None => Err("fin inesperado de la expresión".into()),
        }
    }
}
