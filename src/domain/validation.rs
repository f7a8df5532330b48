//! Field validation as data.
//!
//! Each [`Rule`] pairs a field accessor with a [`Constraint`] and the message
//! shown when the constraint is violated. [`validate`] evaluates a rule set
//! against a [`BindingResult`] and is the only way to obtain a [`Validated`]
//! value.

use std::ops::Deref;

use regex::Regex;

use crate::{
    base::ResourceID,
    error::resource::{ValidationError, ValidationErrorKind, ValidationFieldError},
};

/// Borrowed view of a field, as seen by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(Option<i64>),
}

impl FieldValue<'_> {
    fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => (*text).to_owned(),
            FieldValue::Integer(Some(int)) => int.to_string(),
            FieldValue::Integer(None) => String::new(),
        }
    }
}

/// Absent integers pass every constraint except [`Constraint::Required`].
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Text with at least one non-whitespace character.
    NotBlank,
    /// Value must be present.
    Required,
    /// Inclusive bounds on the number of characters.
    Length { min: u64, max: u64 },
    /// Inclusive bounds on an integer.
    Range { min: i64, max: i64 },
    /// Text must match the whole expression.
    Pattern(&'static Regex),
}

impl Constraint {
    pub fn check(&self, value: &FieldValue<'_>) -> Option<ValidationErrorKind> {
        match (self, value) {
            (Constraint::NotBlank, FieldValue::Text(text)) if text.trim().is_empty() => {
                Some(ValidationErrorKind::Required)
            }
            (Constraint::Required, FieldValue::Integer(None)) => {
                Some(ValidationErrorKind::Required)
            }
            (Constraint::Length { min, max }, FieldValue::Text(text)) => {
                let len = text.chars().count() as u64;
                if len < *min {
                    Some(ValidationErrorKind::MinLength(*min))
                } else if len > *max {
                    Some(ValidationErrorKind::MaxLength(*max))
                } else {
                    None
                }
            }
            (Constraint::Range { min, .. }, FieldValue::Integer(Some(int))) if int < min => {
                Some(ValidationErrorKind::Minimum(*min))
            }
            (Constraint::Range { max, .. }, FieldValue::Integer(Some(int))) if int > max => {
                Some(ValidationErrorKind::Maximum(*max))
            }
            (Constraint::Pattern(regex), FieldValue::Text(text)) if !regex.is_match(text) => {
                Some(ValidationErrorKind::Pattern(regex.as_str().to_owned()))
            }
            _ => None,
        }
    }
}

pub struct Rule<T> {
    /// Field path, as reported in violations.
    pub path: &'static str,
    pub type_id: &'static str,
    pub constraint: Constraint,
    pub message: &'static str,
    field: fn(&T) -> FieldValue<'_>,
}

impl<T> Rule<T> {
    pub fn new<F>(
        path: &'static str,
        field: fn(&T) -> FieldValue<'_>,
        constraint: Constraint,
        message: &'static str,
    ) -> Self
    where
        F: ResourceID,
    {
        Self {
            path,
            type_id: F::resource_id(),
            constraint,
            message,
            field,
        }
    }

    pub fn check(&self, target: &T) -> Option<ValidationFieldError> {
        let value = (self.field)(target);
        self.constraint.check(&value).map(|kind| ValidationFieldError {
            path: self.path.into(),
            value: value.display(),
            type_id: self.type_id,
            kind,
            message: self.message.into(),
        })
    }
}

/// Bound target plus the violations found while binding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingResult<T> {
    pub target: T,
    pub errors: Vec<ValidationFieldError>,
}

impl<T> BindingResult<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            errors: Vec::new(),
        }
    }

    pub fn reject(&mut self, error: ValidationFieldError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_field_error(&self, path: &str) -> bool {
        self.errors.iter().any(|err| err.path == path)
    }
}

/// A value that passed every rule of its rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Runs `rules` over the bound target.
///
/// Fields that already failed binding are not checked again.
pub fn validate<T>(
    mut binding: BindingResult<T>,
    rules: &[Rule<T>],
) -> Result<Validated<T>, ValidationError<T>>
where
    T: ResourceID,
{
    let violations: Vec<_> = rules
        .iter()
        .filter(|rule| !binding.has_field_error(rule.path))
        .filter_map(|rule| rule.check(&binding.target))
        .collect();
    binding.errors.extend(violations);

    if binding.has_errors() {
        return Err(ValidationError::from_resource(
            binding.target,
            binding.errors,
        ));
    }

    Ok(Validated(binding.target))
}

pub mod rules {
    use lazy_static::lazy_static;
    use regex::Regex;

    use super::{Constraint, FieldValue, Rule};
    use crate::domain::entity::User;

    fn name(user: &User) -> FieldValue<'_> {
        FieldValue::Text(&user.name)
    }

    fn age(user: &User) -> FieldValue<'_> {
        FieldValue::Integer(user.age.map(i64::from))
    }

    fn birthday(user: &User) -> FieldValue<'_> {
        FieldValue::Text(&user.birthday)
    }

    lazy_static! {
        static ref BIRTHDAY_PATTERN: Regex =
            Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Expect a valid birthday regex");
        static ref USER_RULES: Vec<Rule<User>> = vec![
            Rule::new::<String>(
                "/name",
                name,
                Constraint::NotBlank,
                "name must not be blank",
            ),
            Rule::new::<String>(
                "/name",
                name,
                Constraint::Length { min: 2, max: 8 },
                "name must be between 2 and 8 characters",
            ),
            Rule::new::<i32>(
                "/age",
                age,
                Constraint::Required,
                "age must not be empty",
            ),
            Rule::new::<i32>(
                "/age",
                age,
                Constraint::Range { min: 0, max: 300 },
                "age must be between 0 and 300",
            ),
            Rule::new::<String>(
                "/birthday",
                birthday,
                Constraint::NotBlank,
                "birthday must not be blank",
            ),
            Rule::new::<String>(
                "/birthday",
                birthday,
                Constraint::Pattern(&*BIRTHDAY_PATTERN),
                "birthday must be formatted as yyyy-MM-dd",
            ),
        ];
    }

    /// Rule set declared for [`User`] form fields.
    pub fn user() -> &'static [Rule<User>] {
        &USER_RULES
    }
}
