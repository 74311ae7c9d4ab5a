//! Employee payload rules.
//!
//! The identifier rule for the operation runs first, then the field rules in
//! declaration order. Every rule runs; violations are never short-circuited.

use platform_api::Violation;

use crate::{Employee, EmployeePayload, RESOURCE};

/// Which operation a payload is validated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update { path_id: i64 },
}

type FieldRule = fn(&EmployeePayload) -> Option<Violation>;

const FIELD_RULES: &[FieldRule] = &[
    name_not_empty,
    department_not_empty,
    salary_not_null,
    salary_not_negative,
];

const MIN_SALARY: i32 = 0;

/// Ordered list of violations; empty means the payload is valid for `mode`.
pub fn violations(payload: &EmployeePayload, mode: Mode) -> Vec<Violation> {
    let mut found: Vec<Violation> = id_rule(payload.id, mode).into_iter().collect();
    found.extend(FIELD_RULES.iter().filter_map(|rule| rule(payload)));
    found
}

/// Validate and convert into a typed [`Employee`].
///
/// On update the resulting id is the path id. Absent fields always produce a
/// violation, so the defaults below are never observed.
pub fn validate(payload: EmployeePayload, mode: Mode) -> Result<Employee, Vec<Violation>> {
    let found = violations(&payload, mode);
    if !found.is_empty() {
        return Err(found);
    }
    let EmployeePayload {
        id,
        name,
        salary,
        department,
    } = payload;
    Ok(Employee {
        id,
        name: name.unwrap_or_default(),
        salary: salary.unwrap_or_default(),
        department: department.unwrap_or_default(),
    })
}

fn id_rule(id: Option<i64>, mode: Mode) -> Option<Violation> {
    match (mode, id) {
        (Mode::Create, Some(_)) => Some(violation("id", "MustBeEmpty", "must not be specified")),
        (Mode::Create, None) => None,
        (Mode::Update { .. }, None) => Some(violation("id", "MustNotNull", "must not be null")),
        (Mode::Update { path_id }, Some(id)) if id != path_id => Some(violation(
            "id",
            "MustBeConsistent",
            "must be consistent with the id in the request path",
        )),
        (Mode::Update { .. }, Some(_)) => None,
    }
}

fn name_not_empty(payload: &EmployeePayload) -> Option<Violation> {
    not_empty("name", payload.name.as_deref())
}

fn department_not_empty(payload: &EmployeePayload) -> Option<Violation> {
    not_empty("department", payload.department.as_deref())
}

fn salary_not_null(payload: &EmployeePayload) -> Option<Violation> {
    payload
        .salary
        .is_none()
        .then(|| violation("salary", "NotNull", "must not be null"))
}

fn salary_not_negative(payload: &EmployeePayload) -> Option<Violation> {
    let salary = payload.salary?;
    (salary < MIN_SALARY).then(|| {
        violation(
            "salary",
            "Min",
            format!("must be greater than or equal to {MIN_SALARY}"),
        )
        .with_argument(MIN_SALARY)
    })
}

fn not_empty(field: &'static str, value: Option<&str>) -> Option<Violation> {
    match value {
        Some(text) if !text.is_empty() => None,
        _ => Some(violation(field, "NotEmpty", "must not be empty")),
    }
}

fn violation(field: &'static str, code: &'static str, message: impl Into<String>) -> Violation {
    Violation::new(RESOURCE, field, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_api::MessageCatalog;

    fn payload(id: Option<i64>, name: &str, salary: i32, department: &str) -> EmployeePayload {
        EmployeePayload {
            id,
            name: Some(name.to_string()),
            salary: Some(salary),
            department: Some(department.to_string()),
        }
    }

    fn rendered(found: &[Violation]) -> Vec<String> {
        let catalog = MessageCatalog::default();
        found.iter().map(|v| v.render(&catalog)).collect()
    }

    #[test]
    fn valid_create_yields_employee_without_id() {
        let employee = validate(payload(None, "Foo", 1, "it"), Mode::Create).unwrap();
        assert_eq!(employee, Employee::new("Foo", 1, "it"));
    }

    #[test]
    fn create_rejects_any_id_including_zero() {
        for id in [123, 0] {
            let found = violations(&payload(Some(id), "Foo", 1, "it"), Mode::Create);
            assert_eq!(rendered(&found), vec!["id : must not be specified"]);
        }
    }

    #[test]
    fn collects_every_field_violation() {
        let found = violations(&payload(None, "", -1, ""), Mode::Create);
        assert_eq!(
            rendered(&found),
            vec![
                "name : must not be empty",
                "department : must not be empty",
                "salary : must be greater than or equal to 0",
            ]
        );
    }

    #[test]
    fn missing_fields_are_violations() {
        let found = violations(&EmployeePayload::default(), Mode::Create);
        assert_eq!(
            rendered(&found),
            vec![
                "name : must not be empty",
                "department : must not be empty",
                "salary : must not be null",
            ]
        );
    }

    #[test]
    fn payload_missing_any_field_is_rejected_with_reasons() {
        let full = payload(None, "Foo", 1, "it");
        let partials = [
            EmployeePayload { name: None, ..full.clone() },
            EmployeePayload { salary: None, ..full.clone() },
            EmployeePayload { department: None, ..full.clone() },
        ];
        for partial in partials {
            let found = validate(partial, Mode::Create).unwrap_err();
            assert_eq!(found.len(), 1);
        }
    }

    #[test]
    fn whitespace_counts_as_content() {
        assert!(violations(&payload(None, " ", 0, "\t"), Mode::Create).is_empty());
    }

    #[test]
    fn update_requires_id() {
        let found = violations(&payload(None, "Bar", 1000, "hr"), Mode::Update { path_id: 888 });
        assert_eq!(rendered(&found), vec!["id : must not be null"]);
    }

    #[test]
    fn update_requires_matching_id() {
        let found = violations(
            &payload(Some(777), "Bar", 1000, "hr"),
            Mode::Update { path_id: 888 },
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "MustBeConsistent");
        assert!(rendered(&found)[0].contains("must be consistent"));
    }

    #[test]
    fn id_rule_comes_before_field_rules() {
        let found = violations(&payload(Some(777), "", -5, "hr"), Mode::Update { path_id: 888 });
        let fields: Vec<_> = found.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["id", "name", "salary"]);
    }

    #[test]
    fn valid_update_keeps_path_id() {
        let employee = validate(
            payload(Some(888), "Bar", 1000, "hr"),
            Mode::Update { path_id: 888 },
        )
        .unwrap();
        assert_eq!(employee, Employee::new("Bar", 1000, "hr").with_id(888));
    }
}
