//! Grouping of Product ECA rows by function and sub-function.

use crate::record::EcaRow;

/// Rows sharing a sub-function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFunctionGroup<'a> {
    pub name: &'a str,
    pub rows: Vec<&'a EcaRow>,
}

/// Sub-function groups sharing a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionGroup<'a> {
    pub name: &'a str,
    pub sub_functions: Vec<SubFunctionGroup<'a>>,
}

impl FunctionGroup<'_> {
    pub fn row_count(&self) -> usize {
        self.sub_functions.iter().map(|s| s.rows.len()).sum()
    }
}

/// Group rows by function then sub-function, in first-seen order.
pub fn group_rows(rows: &[EcaRow]) -> Vec<FunctionGroup<'_>> {
    let mut groups: Vec<FunctionGroup<'_>> = Vec::new();

    for row in rows {
        let function = match groups
            .iter_mut()
            .position(|g| g.name == row.affected_function)
        {
            Some(i) => &mut groups[i],
            None => {
                groups.push(FunctionGroup {
                    name: &row.affected_function,
                    sub_functions: Vec::new(),
                });
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };

        match function
            .sub_functions
            .iter_mut()
            .find(|s| s.name == row.affected_sub_function)
        {
            Some(sub) => sub.rows.push(row),
            None => function.sub_functions.push(SubFunctionGroup {
                name: &row.affected_sub_function,
                rows: vec![row],
            }),
        }
    }

    groups
}
