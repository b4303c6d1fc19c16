//! Symbolic stack values.
//!
//! The evaluator manipulates [`SymbolicValue`]s instead of concrete words: a
//! push becomes a literal, a consumed value the block never produced becomes a
//! numbered stack input, and opcode applications nest into expression trees.
//! Rendering to pseudocode text happens through `Display`, so callers format
//! values with the standard formatting machinery.

use std::{borrow::Cow, fmt};

use primitive_types::U256;

use crate::disassembler::Operator;

/// A symbolic value on the evaluator's stack.
///
/// Values form trees: operands of expressions and opaque applications are
/// themselves symbolic values. A tree's leaves are always literals or stack
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicValue {
    /// A literal pushed by a push-class instruction
    Literal(U256),
    /// A value the block consumed but never produced; `n` counts synthesis
    /// order within the block, starting at 0
    StackInput(usize),
    /// Application of a pure operator to symbolic operands
    Expression {
        /// The operator applied
        operator: Operator,
        /// Operands, in stack pop order
        operands: Vec<SymbolicValue>,
    },
    /// Application of an opcode without a pure operator equivalent, kept as an
    /// uninterpreted call form
    Opaque {
        /// Rendered mnemonic of the opcode
        mnemonic: Cow<'static, str>,
        /// Operands, in stack pop order
        operands: Vec<SymbolicValue>,
    },
}

impl SymbolicValue {
    /// Render the value, wrapping it in parentheses when it is a nested infix
    /// or unary expression that would otherwise read ambiguously.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicValue::Expression { operator, .. } if operator.arity() <= 2 => {
                write!(f, "({self})")
            }
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for SymbolicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicValue::Literal(value) => write!(f, "0x{value:x}"),
            SymbolicValue::StackInput(index) => write!(f, "arg_{index}"),
            SymbolicValue::Expression { operator, operands } => match operands.as_slice() {
                [operand] => {
                    write!(f, "{operator}")?;
                    operand.fmt_operand(f)
                }
                [left, right] if operator.is_infix() => {
                    left.fmt_operand(f)?;
                    write!(f, " {operator} ")?;
                    right.fmt_operand(f)
                }
                _ => {
                    // ternary forms (ADDMOD, MULMOD) render as call syntax
                    write!(f, "{operator}(")?;
                    for (index, operand) in operands.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{operand}")?;
                    }
                    write!(f, ")")
                }
            },
            SymbolicValue::Opaque { mnemonic, operands } => {
                write!(f, "{mnemonic}(")?;
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{operand}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_rendering() {
        assert_eq!(SymbolicValue::Literal(U256::from(5)).to_string(), "0x5");
        assert_eq!(
            SymbolicValue::Literal(U256::from(0xdead_beef_u64)).to_string(),
            "0xdeadbeef"
        );
    }

    #[test]
    fn stack_input_rendering() {
        assert_eq!(SymbolicValue::StackInput(0).to_string(), "arg_0");
        assert_eq!(SymbolicValue::StackInput(7).to_string(), "arg_7");
    }

    #[test]
    fn infix_expression_rendering() {
        let sum = SymbolicValue::Expression {
            operator: Operator::Add,
            operands: vec![
                SymbolicValue::Literal(U256::from(3)),
                SymbolicValue::Literal(U256::from(5)),
            ],
        };
        assert_eq!(sum.to_string(), "0x3 + 0x5");
    }

    #[test]
    fn nested_expression_parenthesized() {
        let inner = SymbolicValue::Expression {
            operator: Operator::Add,
            operands: vec![
                SymbolicValue::StackInput(0),
                SymbolicValue::Literal(U256::from(1)),
            ],
        };
        let outer = SymbolicValue::Expression {
            operator: Operator::Mul,
            operands: vec![inner, SymbolicValue::Literal(U256::from(2))],
        };
        assert_eq!(outer.to_string(), "(arg_0 + 0x1) * 0x2");
    }

    #[test]
    fn unary_expression_rendering() {
        let negated = SymbolicValue::Expression {
            operator: Operator::IsZero,
            operands: vec![SymbolicValue::StackInput(0)],
        };
        assert_eq!(negated.to_string(), "!arg_0");

        let nested = SymbolicValue::Expression {
            operator: Operator::IsZero,
            operands: vec![SymbolicValue::Expression {
                operator: Operator::Eq,
                operands: vec![
                    SymbolicValue::StackInput(0),
                    SymbolicValue::Literal(U256::from(4)),
                ],
            }],
        };
        assert_eq!(nested.to_string(), "!(arg_0 == 0x4)");
    }

    #[test]
    fn ternary_expression_rendering() {
        let addmod = SymbolicValue::Expression {
            operator: Operator::AddMod,
            operands: vec![
                SymbolicValue::StackInput(0),
                SymbolicValue::StackInput(1),
                SymbolicValue::Literal(U256::from(7)),
            ],
        };
        assert_eq!(addmod.to_string(), "ADDMOD(arg_0, arg_1, 0x7)");
    }

    #[test]
    fn opaque_rendering() {
        let load = SymbolicValue::Opaque {
            mnemonic: Cow::Borrowed("CALLDATALOAD"),
            operands: vec![SymbolicValue::Literal(U256::zero())],
        };
        assert_eq!(load.to_string(), "CALLDATALOAD(0x0)");

        let caller = SymbolicValue::Opaque {
            mnemonic: Cow::Borrowed("CALLER"),
            operands: vec![],
        };
        assert_eq!(caller.to_string(), "CALLER()");
    }
}
