//! Shared display helpers for step lists.

use serde_json::{json, Value};

use crate::ui::Table;
use crate::workflow::StepId;

/// Table of steps in order, numbered from 1.
pub fn step_table(steps: &[StepId]) -> Table {
    let mut table = Table::new(vec!["#", "Step", "Title"]);
    for (i, step) in steps.iter().enumerate() {
        let number = (i + 1).to_string();
        table.add_row(vec![number.as_str(), step.as_str(), step.title()]);
    }
    table
}

/// Steps as a JSON array of `{ "id", "title" }` objects.
pub fn steps_json(steps: &[StepId]) -> Value {
    Value::Array(
        steps
            .iter()
            .map(|step| json!({ "id": step.as_str(), "title": step.title() }))
            .collect(),
    )
}
