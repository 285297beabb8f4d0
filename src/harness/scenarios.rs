use crate::calculator::{Number, TOLERANCE, add};
use crate::error::{HarnessError, HarnessResult};
use crate::harness::types::{Expectation, Scenario};

/// The fixed cases, in execution order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "addition",
            description: "2 + 2 equals 4",
            summary: "2 + 2 = 4",
            expected: Expectation::Exact(Number::Int(4)),
            compute: || vec![add(2, 2)],
        },
        Scenario {
            name: "addition_negative",
            description: "addition with negative numbers",
            summary: "-1 + 1 = 0",
            expected: Expectation::Exact(Number::Int(0)),
            compute: || vec![add(-1, 1)],
        },
        Scenario {
            name: "addition_zero",
            description: "addition with zero",
            summary: "5 + 0 = 5",
            expected: Expectation::Exact(Number::Int(5)),
            compute: || vec![add(5, 0)],
        },
        Scenario {
            name: "addition_large_numbers",
            description: "addition with large numbers",
            summary: "1000000 + 2000000 = 3000000",
            expected: Expectation::Exact(Number::Int(3_000_000)),
            compute: || vec![add(1_000_000, 2_000_000)],
        },
        Scenario {
            name: "addition_negative_both",
            description: "addition with two negative numbers",
            summary: "-5 + -3 = -8",
            expected: Expectation::Exact(Number::Int(-8)),
            compute: || vec![add(-5, -3)],
        },
        Scenario {
            name: "addition_floats",
            description: "addition with floating point numbers",
            summary: "2.5 + 3.7 = 6.2",
            expected: Expectation::Approx {
                value: Number::Float(6.2),
                tolerance: TOLERANCE,
            },
            compute: || vec![add(2.5, 3.7)],
        },
        Scenario {
            name: "addition_mixed_signs",
            description: "addition with mixed positive and negative",
            summary: "10 + -3 = 7",
            expected: Expectation::Exact(Number::Int(7)),
            compute: || vec![add(10, -3)],
        },
        Scenario {
            name: "addition_zero_both",
            description: "addition with both zeros",
            summary: "0 + 0 = 0",
            expected: Expectation::Exact(Number::Int(0)),
            compute: || vec![add(0, 0)],
        },
        Scenario {
            name: "addition_commutative",
            description: "addition is commutative (a + b = b + a)",
            summary: "Commutative property (7 + 13 = 13 + 7 = 20)",
            expected: Expectation::Exact(Number::Int(20)),
            compute: || vec![add(7, 13), add(13, 7)],
        },
        Scenario {
            name: "addition_multiple",
            description: "multiple additions in sequence",
            summary: "(1 + 2) + 3 = 6",
            expected: Expectation::Exact(Number::Int(6)),
            compute: || vec![add(add(1, 2), 3)],
        },
    ]
}

/// Keeps the named cases in their fixed order. An empty selection keeps all.
pub fn select(scenarios: Vec<Scenario>, names: &[String]) -> HarnessResult<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(scenarios);
    }

    if let Some(unknown) = names
        .iter()
        .find(|name| !scenarios.iter().any(|s| s.name == name.as_str()))
    {
        return Err(HarnessError::UnknownCase(unknown.clone()));
    }

    Ok(scenarios
        .into_iter()
        .filter(|s| names.iter().any(|name| name == s.name))
        .collect())
}
