//! Demo command implementation.
//!
//! Replays the reference sequence against a fresh store and reports what
//! each step observed next to what it should observe.

use crate::error::CliError;
use kvtx_core::{CoreError, CoreResult, TransactionalStore, Value};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// What a step observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    /// Result of a read.
    Read(Option<Value>),
    /// State-changing calls succeeded.
    Ok,
    /// The store rejected a call.
    Error(CoreError),
}

impl From<CoreResult<()>> for Observed {
    fn from(result: CoreResult<()>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(err) => Self::Error(err),
        }
    }
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(Some(value)) => write!(f, "{value}"),
            Self::Read(None) => f.write_str("null"),
            Self::Ok => f.write_str("ok"),
            Self::Error(err) => write!(f, "error: {err}"),
        }
    }
}

/// One scripted step.
struct Step {
    description: &'static str,
    action: fn(&mut TransactionalStore) -> Observed,
    expected: Observed,
}

/// Report for one executed step.
#[derive(Debug, Serialize)]
pub struct StepReport {
    /// 1-based step number.
    pub step: usize,
    /// What the step does.
    pub description: String,
    /// Expected outcome, rendered.
    pub expected: String,
    /// Observed outcome, rendered.
    pub observed: String,
    /// Whether the two agree.
    pub passed: bool,
}

fn reference_steps() -> Vec<Step> {
    vec![
        Step {
            description: "Get key that doesn't exist",
            action: |s| Observed::Read(s.get("A")),
            expected: Observed::Read(None),
        },
        Step {
            description: "Put without transaction",
            action: |s| s.put("A", 5).into(),
            expected: Observed::Error(CoreError::NoActiveTransaction),
        },
        Step {
            description: "Begin transaction and put 'A' = 5",
            action: |s| s.begin_transaction().and_then(|()| s.put("A", 5)).into(),
            expected: Observed::Ok,
        },
        Step {
            description: "Get 'A' inside the transaction",
            action: |s| Observed::Read(s.get("A")),
            expected: Observed::Read(None),
        },
        Step {
            description: "Update 'A' to 6 and commit",
            action: |s| s.put("A", 6).and_then(|()| s.commit()).into(),
            expected: Observed::Ok,
        },
        Step {
            description: "Get 'A' after commit",
            action: |s| Observed::Read(s.get("A")),
            expected: Observed::Read(Some(6)),
        },
        Step {
            description: "Commit without transaction",
            action: |s| s.commit().into(),
            expected: Observed::Error(CoreError::NoActiveTransaction),
        },
        Step {
            description: "Rollback without transaction",
            action: |s| s.rollback().into(),
            expected: Observed::Error(CoreError::NoActiveTransaction),
        },
        Step {
            description: "Get 'B'",
            action: |s| Observed::Read(s.get("B")),
            expected: Observed::Read(None),
        },
        Step {
            description: "Begin transaction, put 'B' = 10, roll back",
            action: |s| {
                s.begin_transaction()
                    .and_then(|()| s.put("B", 10))
                    .and_then(|()| s.rollback())
                    .into()
            },
            expected: Observed::Ok,
        },
        Step {
            description: "Get 'B' after rollback",
            action: |s| Observed::Read(s.get("B")),
            expected: Observed::Read(None),
        },
    ]
}

/// Executes every reference step against `store`.
pub fn execute(store: &mut TransactionalStore) -> Vec<StepReport> {
    reference_steps()
        .into_iter()
        .enumerate()
        .map(|(idx, step)| {
            let observed = (step.action)(store);
            StepReport {
                step: idx + 1,
                description: step.description.to_string(),
                expected: step.expected.to_string(),
                observed: observed.to_string(),
                passed: observed == step.expected,
            }
        })
        .collect()
}

/// Runs the demo command.
pub fn run(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running reference demo");

    let mut store = TransactionalStore::new();
    let reports = execute(&mut store);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        _ => {
            print_text_output(&reports);
        }
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        return Err(CliError::ScenarioFailed { failed }.into());
    }
    Ok(())
}

fn print_text_output(reports: &[StepReport]) {
    for report in reports {
        let mark = if report.passed { "✓" } else { "✗" };
        println!("Step {}: {}", report.step, report.description);
        println!(
            "  {} expected {}, observed {}",
            mark, report.expected, report.observed
        );
    }
    println!();
    println!(
        "{}/{} steps matched",
        reports.iter().filter(|r| r.passed).count(),
        reports.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_steps_all_pass() {
        let mut store = TransactionalStore::new();
        let reports = execute(&mut store);

        assert_eq!(reports.len(), 11);
        for report in &reports {
            assert!(report.passed, "step {} failed: {:?}", report.step, report);
        }
        assert_eq!(store.get("A"), Some(6));
        assert_eq!(store.get("B"), None);
    }

    #[test]
    fn mismatch_is_reported() {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();
        store.put("A", 1).unwrap();
        store.commit().unwrap();

        let reports = execute(&mut store);
        assert!(!reports[0].passed);
        assert_eq!(reports[0].observed, "1");
    }

    #[test]
    fn observed_display() {
        assert_eq!(Observed::Read(None).to_string(), "null");
        assert_eq!(Observed::Read(Some(-3)).to_string(), "-3");
        assert_eq!(
            Observed::Error(CoreError::NoActiveTransaction).to_string(),
            "error: no transaction in progress"
        );
    }

    #[test]
    fn reports_serialize() {
        let mut store = TransactionalStore::new();
        let reports = execute(&mut store);
        let json = serde_json::to_string(&reports).unwrap();
        assert!(json.contains("\"passed\":true"));
    }
}
