use serde_json::Value;
use tracing::debug;

use crate::case::TestCaseSpec;

pub(super) fn run_setup(case: &TestCaseSpec, log: &mut Vec<String>) {
    run_hook(case, "setup", "Setup", log);
}

pub(super) fn run_teardown(case: &TestCaseSpec, log: &mut Vec<String>) {
    run_hook(case, "teardown", "Teardown", log);
}

/// Hooks are advisory: each string action is only written to the step log.
fn run_hook(case: &TestCaseSpec, key: &str, label: &str, log: &mut Vec<String>) {
    match case.variables.get(key) {
        Some(Value::Array(actions)) => {
            for action in actions.iter().filter_map(Value::as_str) {
                log.push(format!("{}: {}", label, action));
            }
        }
        Some(other) if !other.is_null() => {
            debug!("{}: ignoring non-list {} hook", case.label(), key);
        }
        Some(_) | None => {}
    }
}
