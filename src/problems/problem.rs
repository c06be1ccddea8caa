//! Arithmetic problems.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// The four operations a problem can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// All operators, in draw order.
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Glyph used when rendering equations.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// One generated problem. Immutable once created.
///
/// Generation guarantees:
/// - `Sub`: `operand_a > operand_b`, so the answer is positive
/// - `Div`: `operand_a == operand_b * correct_answer`, so division is exact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    pub operand_a: u32,
    pub operand_b: u32,
    pub operator: Operator,
    pub correct_answer: u32,
}

impl Problem {
    /// Build a problem, computing the answer from the operands.
    ///
    /// Returns `None` for operands that would break the invariants above
    /// (non-positive difference, inexact or zero-divisor division).
    #[must_use]
    pub fn new(operand_a: u32, operand_b: u32, operator: Operator) -> Option<Self> {
        let correct_answer = match operator {
            Operator::Add => operand_a.checked_add(operand_b)?,
            Operator::Sub if operand_a > operand_b => operand_a - operand_b,
            Operator::Sub => return None,
            Operator::Mul => operand_a.checked_mul(operand_b)?,
            Operator::Div if operand_b != 0 && operand_a % operand_b == 0 => operand_a / operand_b,
            Operator::Div => return None,
        };
        Some(Self {
            operand_a,
            operand_b,
            operator,
            correct_answer,
        })
    }

    /// Draw a random problem.
    ///
    /// | op  | a           | b            | answer  |
    /// |-----|-------------|--------------|---------|
    /// | add | 1..=50      | 1..=50       | a + b   |
    /// | sub | 10..=100    | 1..=a-1      | a - b   |
    /// | mul | 1..=12      | 1..=12       | a × b   |
    /// | div | b × answer  | 1..=12       | 1..=12  |
    pub fn generate(rng: &mut GameRng) -> Self {
        let operator = Operator::ALL[rng.gen_range_usize(0..Operator::ALL.len())];

        let (operand_a, operand_b, correct_answer) = match operator {
            Operator::Add => {
                let a = rng.gen_inclusive(1, 50);
                let b = rng.gen_inclusive(1, 50);
                (a, b, a + b)
            }
            Operator::Sub => {
                let a = rng.gen_inclusive(10, 100);
                let b = rng.gen_inclusive(1, a - 1);
                (a, b, a - b)
            }
            Operator::Mul => {
                let a = rng.gen_inclusive(1, 12);
                let b = rng.gen_inclusive(1, 12);
                (a, b, a * b)
            }
            Operator::Div => {
                let b = rng.gen_inclusive(1, 12);
                let quotient = rng.gen_inclusive(1, 12);
                (b * quotient, b, quotient)
            }
        };

        Self {
            operand_a,
            operand_b,
            operator,
            correct_answer,
        }
    }

    /// The solved equation shown after a miss, e.g. `"28 ÷ 7 = 4"`.
    #[must_use]
    pub fn hint(&self) -> String {
        format!("{} = {}", self, self.correct_answer)
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.operand_a, self.operator, self.operand_b)
    }
}
