//! Payload validation.

use super::{Field, Registration};
use crate::error::{ValidationErrors, Violation};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Validate an untyped payload into a [`Registration`].
///
/// Every check runs; all violations are reported in field order. No side effects.
pub fn validate(payload: &Value) -> Result<Registration, ValidationErrors> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);
    let mut violations = Vec::new();

    let event = required_text(fields, Field::Event, &mut violations);
    let team_name = required_text(fields, Field::TeamName, &mut violations);
    let team_leader = required_text(fields, Field::TeamLeader, &mut violations);
    let phone_no = required_text(fields, Field::PhoneNo, &mut violations)
        .and_then(|phone| matching(phone, &PHONE_PATTERN, Field::PhoneNo, &mut violations));
    let email = required_text(fields, Field::Email, &mut violations)
        .and_then(|email| matching(email, &EMAIL_PATTERN, Field::Email, &mut violations));
    let roll_no = required_text(fields, Field::RollNo, &mut violations);
    let members = member_names(fields, &mut violations);

    match (event, team_name, team_leader, phone_no, email, roll_no, members) {
        (
            Some(event),
            Some(team_name),
            Some(team_leader),
            Some(phone_no),
            Some(email),
            Some(roll_no),
            Some(members),
        ) if violations.is_empty() => Ok(Registration {
            event: event.to_owned(),
            team_name: team_name.to_owned(),
            team_leader: team_leader.to_owned(),
            phone_no: phone_no.to_owned(),
            email: email.to_owned(),
            roll_no: roll_no.to_owned(),
            members,
        }),
        _ => Err(ValidationErrors::new(violations)),
    }
}

/// Absent, null and empty strings are missing; other non-string values are malformed.
fn required_text<'a>(
    fields: &'a Map<String, Value>,
    field: Field,
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    match fields.get(field.as_str()) {
        None | Some(Value::Null) => {
            violations.push(Violation::MissingField(field));
            None
        }
        Some(Value::String(text)) if text.is_empty() => {
            violations.push(Violation::MissingField(field));
            None
        }
        Some(Value::String(text)) => Some(text),
        Some(_) => {
            violations.push(Violation::InvalidFormat(field));
            None
        }
    }
}

fn matching<'a>(
    text: &'a str,
    pattern: &Regex,
    field: Field,
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    if pattern.is_match(text) {
        Some(text)
    } else {
        violations.push(Violation::InvalidFormat(field));
        None
    }
}

fn member_names(fields: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<Vec<String>> {
    let names = fields
        .get(Field::Members.as_str())
        .and_then(Value::as_array)
        .and_then(|entries| {
            entries
                .iter()
                .map(|entry| {
                    entry
                        .as_str()
                        .filter(|name| !name.trim().is_empty())
                        .map(str::to_owned)
                })
                .collect::<Option<Vec<_>>>()
        })
        .filter(|names| !names.is_empty());

    if names.is_none() {
        violations.push(Violation::InvalidMembers);
    }
    names
}
