//! Per-criterion evaluation.

use serde_json::Value;

use eduforge_schema::{ComparisonOperator, EligibilityField};

/// Result of evaluating one criterion for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Satisfaction {
    /// The student's answer satisfies the program's stored requirement.
    Satisfied,
    /// The comparison ran and failed; the program is filtered out.
    Unsatisfied,
    /// The comparison could not run (unknown operator, missing values,
    /// incomparable types). Passes the filter (fail-open) but does not
    /// count toward the score. Carries the reason for logging.
    Indeterminate(&'static str),
}

/// Evaluate one eligibility field.
///
/// Ordering operators treat the program's stored value as an inclusive
/// bound on the student's answer: `greaterThan`/`greaterThanOrEqual` mean
/// "student ≥ program", `lessThan`/`lessThanOrEqual` mean "student ≤
/// program".
pub fn evaluate(
    field: &EligibilityField,
    student: Option<&Value>,
    program: Option<&Value>,
) -> Satisfaction {
    if field.operator == ComparisonOperator::Unknown {
        return Satisfaction::Indeterminate("unknown operator");
    }
    let Some(student) = non_null(student) else {
        return Satisfaction::Indeterminate("no student answer");
    };
    let Some(program) = non_null(program) else {
        return Satisfaction::Indeterminate("program does not define the field");
    };

    match field.operator {
        ComparisonOperator::Equals => match (scalar_text(student), scalar_text(program)) {
            (Some(a), Some(b)) => satisfied(a == b),
            _ => Satisfaction::Indeterminate("values are not comparable for equality"),
        },
        ComparisonOperator::GreaterThan | ComparisonOperator::GreaterThanOrEqual => {
            match (as_number(student), as_number(program)) {
                (Some(s), Some(p)) => satisfied(s >= p),
                _ => Satisfaction::Indeterminate("values are not numeric"),
            }
        }
        ComparisonOperator::LessThan | ComparisonOperator::LessThanOrEqual => {
            match (as_number(student), as_number(program)) {
                (Some(s), Some(p)) => satisfied(s <= p),
                _ => Satisfaction::Indeterminate("values are not numeric"),
            }
        }
        ComparisonOperator::Unknown => Satisfaction::Indeterminate("unknown operator"),
    }
}

fn satisfied(result: bool) -> Satisfaction {
    if result {
        Satisfaction::Satisfied
    } else {
        Satisfaction::Unsatisfied
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Numbers or numeric strings; everything else is not comparable by order.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Scalars compared as trimmed text (a stored `"3"` equals an answered `3`).
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduforge_schema::FieldType;
    use serde_json::json;

    fn field(operator: ComparisonOperator) -> EligibilityField {
        EligibilityField::new("gpa", "GPA", FieldType::Number, operator)
    }

    #[test]
    fn lower_bound_operators_are_inclusive() {
        let gte = field(ComparisonOperator::GreaterThanOrEqual);
        assert_eq!(evaluate(&gte, Some(&json!(3.8)), Some(&json!(3.5))), Satisfaction::Satisfied);
        assert_eq!(evaluate(&gte, Some(&json!(3.5)), Some(&json!(3.5))), Satisfaction::Satisfied);
        assert_eq!(evaluate(&gte, Some(&json!(3.2)), Some(&json!(3.5))), Satisfaction::Unsatisfied);
    }

    #[test]
    fn upper_bound_operators_are_inclusive() {
        let lte = field(ComparisonOperator::LessThanOrEqual);
        assert_eq!(evaluate(&lte, Some(&json!(40000)), Some(&json!(50000))), Satisfaction::Satisfied);
        assert_eq!(evaluate(&lte, Some(&json!(60000)), Some(&json!(50000))), Satisfaction::Unsatisfied);
    }

    #[test]
    fn equals_compares_scalars_as_text() {
        let eq = EligibilityField::new("country", "Country", FieldType::Text, ComparisonOperator::Equals);
        assert_eq!(evaluate(&eq, Some(&json!("USA")), Some(&json!("USA"))), Satisfaction::Satisfied);
        assert_eq!(evaluate(&eq, Some(&json!("USA")), Some(&json!("UK"))), Satisfaction::Unsatisfied);
        assert_eq!(evaluate(&eq, Some(&json!(3)), Some(&json!("3"))), Satisfaction::Satisfied);
    }

    #[test]
    fn unknown_operator_and_missing_values_are_indeterminate() {
        assert!(matches!(
            evaluate(&field(ComparisonOperator::Unknown), Some(&json!(1)), Some(&json!(1))),
            Satisfaction::Indeterminate(_)
        ));
        assert!(matches!(
            evaluate(&field(ComparisonOperator::Equals), None, Some(&json!(1))),
            Satisfaction::Indeterminate(_)
        ));
        assert!(matches!(
            evaluate(&field(ComparisonOperator::Equals), Some(&json!(1)), None),
            Satisfaction::Indeterminate(_)
        ));
        assert!(matches!(
            evaluate(&field(ComparisonOperator::GreaterThan), Some(&json!("high")), Some(&json!(3))),
            Satisfaction::Indeterminate(_)
        ));
    }
}
