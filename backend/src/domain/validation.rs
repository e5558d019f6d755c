//! Field-level request validation.
//!
//! A [`RuleSet`] lists fields in declaration order, each with an ordered list
//! of [`Rule`]s. [`validate`] walks the rules against a JSON field map and
//! either accepts a normalised copy of the declared fields or reports one
//! [`FieldViolation`] per broken rule, in the same order the rules were
//! declared.
//!
//! Evaluation semantics:
//! - a field that is absent, `null` or blank is skipped, unless it is
//!   `required`, in which case only the `required` violation is reported;
//! - a failed type rule (`string`, `integer`) stops the remaining rules for
//!   that field;
//! - `unique` and `exists` consult stored records through [`RecordLookup`];
//!   lookup failures abort validation instead of producing violations.
//!
//! String values are trimmed before the rules run, except for fields declared
//! with [`RuleSet::field_raw`]. Values of fields carrying [`Rule::Email`] are
//! lowercased, so email uniqueness ignores case.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::Error;
use super::ports::{RecordLookup, RecordLookupError};

/// JSON object received from a client.
pub type FieldMap = Map<String, Value>;

/// Stored column that `unique` and `exists` rules look values up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordColumn {
    /// `users.email`
    UserEmail,
    /// `users.id`
    UserId,
    /// `posts.title`
    PostTitle,
}

impl RecordColumn {
    /// Table holding the column.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::UserEmail | Self::UserId => "users",
            Self::PostTitle => "posts",
        }
    }

    /// Column name within [`RecordColumn::table`].
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::UserEmail => "email",
            Self::UserId => "id",
            Self::PostTitle => "title",
        }
    }
}

impl std::fmt::Display for RecordColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table(), self.column())
    }
}

/// Normalised value handed to a [`RecordLookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValue {
    Text(String),
    Integer(i64),
}

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present, non-null and non-blank.
    Required,
    /// The value must be a JSON string.
    String,
    /// The value must be an integer or a string holding one.
    Integer,
    /// The value must look like an email address.
    Email,
    /// Minimum character count for strings, minimum value for integers.
    Min(u32),
    /// Maximum character count for strings, maximum value for integers.
    Max(u32),
    /// No stored record may hold the value (the row being updated excepted).
    Unique(RecordColumn),
    /// A stored record must hold the value.
    Exists(RecordColumn),
    /// `<field>_confirmation` must carry the same value.
    Confirmed,
}

impl Rule {
    /// Stable rule name reported to clients.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Email => "email",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Unique(_) => "unique",
            Self::Exists(_) => "exists",
            Self::Confirmed => "confirmed",
        }
    }

    fn message(self, field: &str) -> String {
        let label = field.replace('_', " ");
        match self {
            Self::Required => format!("The {label} field is required."),
            Self::String => format!("The {label} field must be a string."),
            Self::Integer => format!("The {label} field must be an integer."),
            Self::Email => format!("The {label} field must be a valid email address."),
            Self::Min(min) => format!("The {label} field must be at least {min} characters."),
            Self::Max(max) => {
                format!("The {label} field must not be greater than {max} characters.")
            }
            Self::Unique(_) => format!("The {label} has already been taken."),
            Self::Exists(_) => format!("The selected {label} is invalid."),
            Self::Confirmed => format!("The {label} field confirmation does not match."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldRules {
    field: &'static str,
    rules: Vec<Rule>,
    trim: bool,
}

impl FieldRules {
    fn prepare(&self, raw: &Value) -> Value {
        let Value::String(text) = raw else {
            return raw.clone();
        };
        let text = if self.trim { text.trim() } else { text.as_str() };
        if self.rules.contains(&Rule::Email) {
            Value::String(text.to_lowercase())
        } else {
            Value::String(text.to_owned())
        }
    }
}

/// Ordered rules for every accepted field of a request.
///
/// # Examples
/// ```
/// use postbook::domain::{RecordColumn, Rule, RuleSet};
///
/// let rules = RuleSet::new()
///     .field("title", [Rule::Required, Rule::String, Rule::Unique(RecordColumn::PostTitle)])
///     .field("description", [Rule::Required, Rule::String, Rule::Max(50)]);
/// assert_eq!(rules.fields().collect::<Vec<_>>(), ["title", "description"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    /// Empty rule set; fields not declared are dropped from the input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `field` with its rules in evaluation order.
    #[must_use]
    pub fn field(self, field: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.push(field, rules, true)
    }

    /// Declare `field` whose string value is kept exactly as sent, such as a
    /// password. Blank values still count as absent.
    #[must_use]
    pub fn field_raw(self, field: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.push(field, rules, false)
    }

    fn push(
        mut self,
        field: &'static str,
        rules: impl IntoIterator<Item = Rule>,
        trim: bool,
    ) -> Self {
        self.fields.push(FieldRules {
            field,
            rules: rules.into_iter().collect(),
            trim,
        });
        self
    }

    /// Same rules with `required` removed, for partial updates.
    #[must_use]
    pub fn optional(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|declared| FieldRules {
                    field: declared.field,
                    rules: declared
                        .rules
                        .iter()
                        .copied()
                        .filter(|rule| *rule != Rule::Required)
                        .collect(),
                    trim: declared.trim,
                })
                .collect(),
        }
    }

    /// Declared field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|declared| declared.field)
    }
}

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

/// Ordered list of broken rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    fn push(&mut self, field: &str, rule: Rule) {
        self.0.push(FieldViolation {
            field: field.to_owned(),
            rule: rule.name(),
            message: rule.message(field),
        });
    }

    /// True when no rule was broken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Violations in report order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Human-readable messages in report order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|violation| violation.message.as_str())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_failed("The given data was invalid.")
            .with_details(json!({ "errors": errors.0 }))
    }
}

/// Reason [`validate`] did not accept the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// At least one rule was broken.
    Rejected(ValidationErrors),
    /// A `unique` or `exists` lookup could not be answered.
    Lookup(RecordLookupError),
}

impl From<RecordLookupError> for ValidationFailure {
    fn from(error: RecordLookupError) -> Self {
        Self::Lookup(error)
    }
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::Rejected(errors) => errors.into(),
            ValidationFailure::Lookup(RecordLookupError::Connection { message }) => {
                Self::service_unavailable(format!("record lookup unavailable: {message}"))
            }
            ValidationFailure::Lookup(RecordLookupError::Query { message }) => {
                Self::internal(format!("record lookup failed: {message}"))
            }
        }
    }
}

/// Accepted, normalised field values. Only declared fields survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedFields(FieldMap);

impl ValidatedFields {
    /// String value of `field`, if supplied.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
    }

    /// Integer value of `field`, if supplied.
    #[must_use]
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(Value::as_i64)
    }

    /// String value of a field declared `required`.
    pub fn require_text(&self, field: &str) -> Result<String, Error> {
        self.text(field)
            .ok_or_else(|| Error::internal(format!("validated field `{field}` is missing")))
    }

    /// True when `field` was supplied.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

enum Outcome {
    Pass,
    Fail,
    Halt,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn measure(value: &Value) -> Option<i64> {
    match value {
        Value::String(text) => i64::try_from(text.chars().count()).ok(),
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}

fn lookup_value(value: &Value) -> Option<LookupValue> {
    match value {
        Value::String(text) => Some(LookupValue::Text(text.clone())),
        Value::Number(number) => number.as_i64().map(LookupValue::Integer),
        _ => None,
    }
}

fn pass_if(condition: bool) -> Outcome {
    if condition { Outcome::Pass } else { Outcome::Fail }
}

async fn check<L>(
    rule: Rule,
    declared: &FieldRules,
    value: &mut Value,
    input: &FieldMap,
    lookup: &L,
    ignore_id: Option<i64>,
) -> Result<Outcome, RecordLookupError>
where
    L: RecordLookup + ?Sized,
{
    let outcome = match rule {
        Rule::Required => Outcome::Pass,
        Rule::String => {
            if value.is_string() {
                Outcome::Pass
            } else {
                Outcome::Halt
            }
        }
        Rule::Integer => {
            let parsed = match &*value {
                Value::Number(number) => number.as_i64(),
                Value::String(text) => text.parse::<i64>().ok(),
                _ => None,
            };
            match parsed {
                Some(integer) => {
                    *value = Value::from(integer);
                    Outcome::Pass
                }
                None => Outcome::Halt,
            }
        }
        Rule::Email => pass_if(value.as_str().is_some_and(|text| email_regex().is_match(text))),
        Rule::Min(min) => pass_if(measure(value).is_some_and(|size| size >= i64::from(min))),
        Rule::Max(max) => pass_if(measure(value).is_some_and(|size| size <= i64::from(max))),
        Rule::Unique(column) => match lookup_value(value) {
            Some(candidate) => {
                pass_if(!lookup.value_exists(column, &candidate, ignore_id).await?)
            }
            None => Outcome::Fail,
        },
        Rule::Exists(column) => match lookup_value(value) {
            Some(candidate) => pass_if(lookup.value_exists(column, &candidate, None).await?),
            None => Outcome::Fail,
        },
        Rule::Confirmed => {
            let confirmation = input
                .get(&format!("{}_confirmation", declared.field))
                .map(|raw| declared.prepare(raw));
            pass_if(confirmation.as_ref() == Some(&*value))
        }
    };
    Ok(outcome)
}

/// Validate `input` against `rules`.
///
/// `ignore_id` names the row being updated so that `unique` rules do not
/// collide with the record's own current values.
pub async fn validate<L>(
    rules: &RuleSet,
    input: &FieldMap,
    lookup: &L,
    ignore_id: Option<i64>,
) -> Result<ValidatedFields, ValidationFailure>
where
    L: RecordLookup + ?Sized,
{
    let mut errors = ValidationErrors::default();
    let mut accepted = FieldMap::new();

    for declared in &rules.fields {
        let Some(raw) = input.get(declared.field).filter(|value| !is_blank(value)) else {
            if declared.rules.contains(&Rule::Required) {
                errors.push(declared.field, Rule::Required);
            }
            continue;
        };

        let mut value = declared.prepare(raw);
        for rule in &declared.rules {
            match check(*rule, declared, &mut value, input, lookup, ignore_id).await? {
                Outcome::Pass => {}
                Outcome::Fail => errors.push(declared.field, *rule),
                Outcome::Halt => {
                    errors.push(declared.field, *rule);
                    break;
                }
            }
        }
        accepted.insert(declared.field.to_owned(), value);
    }

    if errors.is_empty() {
        Ok(ValidatedFields(accepted))
    } else {
        Err(ValidationFailure::Rejected(errors))
    }
}

#[cfg(test)]
mod tests;
