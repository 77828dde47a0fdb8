use proptest::prelude::*;
use slotcalc::eval::{evaluate, EvalError, Evaluator, Operator, OverflowPolicy};

proptest! {
    #[test]
    fn division_by_zero_never_yields_a_value(x in any::<i32>()) {
        prop_assert_eq!(evaluate(x, 0, '/'), Err(EvalError::DivisionByZero));
        let checked = Evaluator::new(OverflowPolicy::Checked);
        prop_assert_eq!(checked.evaluate(x, 0, '/'), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn unknown_codes_are_rejected(
        code in any::<char>().prop_filter("not an operator", |c| !"+-*/".contains(*c)),
        a in any::<i32>(),
        b in any::<i32>(),
    ) {
        prop_assert_eq!(evaluate(a, b, code), Err(EvalError::UnsupportedOperation(code)));
    }

    #[test]
    fn small_operands_match_native_arithmetic(a in -10_000i32..10_000, b in -10_000i32..10_000) {
        prop_assert_eq!(evaluate(a, b, '+'), Ok(a + b));
        prop_assert_eq!(evaluate(a, b, '-'), Ok(a - b));
        prop_assert_eq!(evaluate(a, b, '*'), Ok(a * b));
        if b != 0 {
            prop_assert_eq!(evaluate(a, b, '/'), Ok(a / b));
        }
    }

    #[test]
    fn checked_agrees_with_wrapping_when_in_range(a in any::<i32>(), b in any::<i32>()) {
        let checked = Evaluator::new(OverflowPolicy::Checked);
        for op in Operator::ALL {
            match checked.apply(a, b, op) {
                Ok(value) => prop_assert_eq!(Evaluator::default().apply(a, b, op), Ok(value)),
                Err(EvalError::Overflow { .. }) => {
                    prop_assert!(Evaluator::default().apply(a, b, op).is_ok())
                }
                Err(EvalError::DivisionByZero) => prop_assert_eq!((op, b), (Operator::Divide, 0)),
                Err(other) => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}

#[test]
fn reference_table() {
    assert_eq!(evaluate(10, 5, '+'), Ok(15));
    assert_eq!(evaluate(10, 5, '-'), Ok(5));
    assert_eq!(evaluate(10, 5, '*'), Ok(50));
    assert_eq!(evaluate(10, 5, '/'), Ok(2));
}
