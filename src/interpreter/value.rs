use std::{cmp::Ordering, fmt::Display};

use crate::{
    ast::expressions::{BinaryOperator, Number, RelationalOperator, UnaryOperator},
    errors::errors::ErrorImpl,
};

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Str(_) => "STRING",
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn binary(self, operator: BinaryOperator, right: Value) -> Result<Value, ErrorImpl> {
        let invalid = |left: &Value, right: &Value| ErrorImpl::InvalidOperands {
            operator: operator.to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        };

        match (operator, &self, &right) {
            (BinaryOperator::Plus, Value::Str(left), Value::Str(right)) => {
                Ok(Value::Str(format!("{}{}", left, right)))
            }
            (_, Value::Integer(left), Value::Integer(right)) => {
                integer_binary(operator, *left, *right)
            }
            _ => match (self.as_real(), right.as_real()) {
                (Some(left), Some(right)) => real_binary(operator, left, right),
                _ => Err(invalid(&self, &right)),
            },
        }
    }

    pub fn unary(self, operator: UnaryOperator) -> Result<Value, ErrorImpl> {
        match (operator, self) {
            (UnaryOperator::Plus, value @ (Value::Integer(_) | Value::Real(_))) => Ok(value),
            (UnaryOperator::Minus, Value::Integer(value)) => value
                .checked_neg()
                .map(Value::Integer)
                .ok_or(ErrorImpl::IntegerOverflow),
            (UnaryOperator::Minus, Value::Real(value)) => Ok(Value::Real(-value)),
            (operator, value) => Err(ErrorImpl::InvalidOperand {
                operator: operator.to_string(),
                operand: value.type_name().to_string(),
            }),
        }
    }

    /// Orders two values of comparable types. `None` when the values are
    /// unordered (a NaN operand).
    pub fn ordering(
        &self,
        right: &Value,
        operator: &str,
    ) -> Result<Option<Ordering>, ErrorImpl> {
        match (self, right) {
            (Value::Integer(left), Value::Integer(right)) => Ok(Some(left.cmp(right))),
            (Value::Str(left), Value::Str(right)) => Ok(Some(left.cmp(right))),
            _ => match (self.as_real(), right.as_real()) {
                (Some(left), Some(right)) => Ok(left.partial_cmp(&right)),
                _ => Err(ErrorImpl::InvalidOperands {
                    operator: operator.to_string(),
                    left: self.type_name().to_string(),
                    right: right.type_name().to_string(),
                }),
            },
        }
    }

    pub fn compare(&self, operator: RelationalOperator, right: &Value) -> Result<bool, ErrorImpl> {
        let ordering = self.ordering(right, &operator.to_string())?;

        Ok(match operator {
            RelationalOperator::Less => ordering == Some(Ordering::Less),
            RelationalOperator::Greater => ordering == Some(Ordering::Greater),
            RelationalOperator::Equal => ordering == Some(Ordering::Equal),
        })
    }
}

fn integer_binary(operator: BinaryOperator, left: i64, right: i64) -> Result<Value, ErrorImpl> {
    let result = match operator {
        BinaryOperator::Plus => left.checked_add(right),
        BinaryOperator::Minus => left.checked_sub(right),
        BinaryOperator::Multiply => left.checked_mul(right),
        BinaryOperator::IntegerDivide => {
            if right == 0 {
                return Err(ErrorImpl::DivisionByZero);
            }
            // `checked_div` truncates toward zero
            left.checked_div(right)
        }
        BinaryOperator::FloatDivide => return real_binary(operator, left as f64, right as f64),
    };

    result.map(Value::Integer).ok_or(ErrorImpl::IntegerOverflow)
}

fn real_binary(operator: BinaryOperator, left: f64, right: f64) -> Result<Value, ErrorImpl> {
    let result = match operator {
        BinaryOperator::Plus => left + right,
        BinaryOperator::Minus => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::IntegerDivide | BinaryOperator::FloatDivide if right == 0.0 => {
            return Err(ErrorImpl::DivisionByZero)
        }
        BinaryOperator::IntegerDivide => (left / right).trunc(),
        BinaryOperator::FloatDivide => left / right,
    };

    Ok(Value::Real(result))
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(value) => Value::Integer(value),
            Number::Real(value) => Value::Real(value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            // Debug keeps the fractional part: `3.0`, not `3`
            Value::Real(value) => write!(f, "{:?}", value),
            Value::Str(value) => write!(f, "{}", value),
        }
    }
}
