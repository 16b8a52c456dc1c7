use std::fmt;

use tabula_model::{Column, ColumnType, Frame, Value};

use crate::error::EngineError;

/// Unary expression operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric negation (`-x`).
    Neg,
    /// Logical negation (`!x`).
    Not,
}

impl UnaryOp {
    fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Binary expression operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div => 5,
        }
    }
}

const UNARY_PRECEDENCE: u8 = 6;
const ATOM_PRECEDENCE: u8 = 7;

/// An expression over frame columns, evaluated elementwise to produce one
/// value per row.
///
/// Evaluation is deterministic for a fixed frame and expression. `Null`
/// propagates through every operator. The `Display` form is the canonical
/// textual rendering used to auto-name unnamed key expressions, so two
/// structurally different expressions render differently.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Reference to a column by name.
    Column(String),
    /// A constant, broadcast to every row.
    Literal(Value),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn add(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Add, self, rhs)
    }

    pub fn sub(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Sub, self, rhs)
    }

    pub fn mul(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Mul, self, rhs)
    }

    pub fn div(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Div, self, rhs)
    }

    pub fn eq(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Eq, self, rhs)
    }

    pub fn ne(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Ne, self, rhs)
    }

    pub fn lt(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Lt, self, rhs)
    }

    pub fn le(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Le, self, rhs)
    }

    pub fn gt(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Gt, self, rhs)
    }

    pub fn ge(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Ge, self, rhs)
    }

    pub fn and(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::And, self, rhs)
    }

    pub fn or(self, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Or, self, rhs)
    }

    pub fn neg(self) -> Self {
        Self::unary(UnaryOp::Neg, self)
    }

    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    /// Evaluate the expression against `frame`, producing one value per row.
    pub fn eval(&self, frame: &Frame) -> Result<Vec<Value>, EngineError> {
        match self {
            Expr::Column(name) => frame
                .column(name)
                .map(|c| c.values().to_vec())
                .ok_or_else(|| EngineError::UnknownColumn { name: name.clone() }),
            Expr::Literal(value) => Ok(vec![value.clone(); frame.row_count()]),
            Expr::Unary { op, operand } => {
                let values = operand.eval(frame)?;
                values.iter().map(|v| apply_unary(*op, v)).collect()
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(frame)?;
                let rhs = rhs.eval(frame)?;
                lhs.iter()
                    .zip(rhs.iter())
                    .map(|(a, b)| apply_binary(*op, a, b))
                    .collect()
            }
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        match self {
            Expr::Column(name) => f.write_str(name),
            Expr::Literal(value) => match value {
                Value::Null => f.write_str("null"),
                Value::Text(s) => write!(f, "\"{s}\""),
                other => write!(f, "{other}"),
            },
            Expr::Unary { op, operand } => {
                let wrap = UNARY_PRECEDENCE < min_prec;
                if wrap {
                    f.write_str("(")?;
                }
                f.write_str(op.symbol())?;
                operand.fmt_prec(f, UNARY_PRECEDENCE)?;
                if wrap {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Expr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                let wrap = prec < min_prec;
                if wrap {
                    f.write_str("(")?;
                }
                lhs.fmt_prec(f, prec)?;
                write!(f, " {} ", op.symbol())?;
                // Operators are left-associative: the right operand needs
                // parens at equal precedence.
                rhs.fmt_prec(f, prec + 1)?;
                if wrap {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

fn kind_name(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Number => "number",
        ColumnType::Text => "text",
        ColumnType::Bool => "bool",
        ColumnType::DateTime => "datetime",
        ColumnType::List => "list",
    }
}

fn apply_unary(op: UnaryOp, value: &Value) -> Result<Value, EngineError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, other) => Err(EngineError::TypeMismatch {
            op: op.symbol(),
            expected: "number",
            actual: other.value_type().expect("null handled above"),
        }),
        (UnaryOp::Not, other) => Err(EngineError::TypeMismatch {
            op: op.symbol(),
            expected: "bool",
            actual: other.value_type().expect("null handled above"),
        }),
    }
}

fn apply_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EngineError> {
    if lhs.is_null() || rhs.is_null() {
        return Ok(Value::Null);
    }
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            let (a, b) = match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => (*a, *b),
                (Value::Number(_), other) | (other, _) => {
                    return Err(EngineError::TypeMismatch {
                        op: op.symbol(),
                        expected: "number",
                        actual: other.value_type().expect("null handled above"),
                    });
                }
            };
            let out = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                _ => unreachable!(),
            };
            Ok(Value::Number(out))
        }
        BinaryOp::Eq | BinaryOp::Ne => {
            let equal = scalar_eq(op, lhs, rhs)?;
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let Some(ordering) = scalar_cmp(op, lhs, rhs)? else {
                // Incomparable numbers (NaN operands) compare to missing.
                return Ok(Value::Null);
            };
            let out = match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Le => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                BinaryOp::Ge => ordering.is_ge(),
                _ => unreachable!(),
            };
            Ok(Value::Bool(out))
        }
        BinaryOp::And | BinaryOp::Or => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                *a && *b
            } else {
                *a || *b
            })),
            (Value::Bool(_), other) | (other, _) => Err(EngineError::TypeMismatch {
                op: op.symbol(),
                expected: "bool",
                actual: other.value_type().expect("null handled above"),
            }),
        },
    }
}

fn scalar_eq(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool, EngineError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Text(a), Value::Text(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::DateTime(a), Value::DateTime(b)) => Ok(a == b),
        _ => Err(operand_mismatch(op, lhs, rhs)),
    }
}

fn scalar_cmp(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
) -> Result<Option<std::cmp::Ordering>, EngineError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
        (Value::Text(a), Value::Text(b)) => Ok(Some(a.cmp(b))),
        (Value::Bool(a), Value::Bool(b)) => Ok(Some(a.cmp(b))),
        (Value::DateTime(a), Value::DateTime(b)) => Ok(Some(a.cmp(b))),
        _ => Err(operand_mismatch(op, lhs, rhs)),
    }
}

fn operand_mismatch(op: BinaryOp, lhs: &Value, rhs: &Value) -> EngineError {
    let lhs_ty = lhs.value_type().expect("null handled above");
    let rhs_ty = rhs.value_type().expect("null handled above");
    // A list operand is the offender even on the left.
    let (expected, actual) = if lhs_ty == ColumnType::List {
        ("scalar", lhs_ty)
    } else {
        (kind_name(lhs_ty), rhs_ty)
    };
    EngineError::TypeMismatch {
        op: op.symbol(),
        expected,
        actual,
    }
}

/// An optionally named key expression.
///
/// Unnamed expressions take their canonical rendering as the column name, so
/// `KeyExpr::new(Expr::col("x").mul(Expr::lit(2.0)))` materializes a column
/// named `x * 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyExpr {
    name: Option<String>,
    expr: Expr,
}

impl KeyExpr {
    /// An unnamed key expression.
    pub fn new(expr: Expr) -> Self {
        Self { name: None, expr }
    }

    /// A key expression with an explicit output column name.
    pub fn named(name: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: Some(name.into()),
            expr,
        }
    }

    /// A bare column reference; the key column keeps the referenced name.
    pub fn column(name: impl Into<String>) -> Self {
        Self::new(Expr::Column(name.into()))
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The output column name: the explicit name if given, otherwise the
    /// expression's canonical rendering.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.expr.to_string(),
        }
    }

    /// Evaluate against `frame` and wrap the result as a column named
    /// [`display_name`](Self::display_name).
    ///
    /// The output column type is inferred from the produced values; a column
    /// with no non-null witnesses defaults to `Number`.
    pub fn evaluate(&self, frame: &Frame) -> Result<Column, EngineError> {
        let values = self.expr.eval(frame)?;
        let column_type = values
            .iter()
            .find_map(Value::value_type)
            .unwrap_or(ColumnType::Number);
        Ok(Column::new(self.display_name(), column_type, values)?)
    }
}
