use validator::Validate;

use crate::error::AuthServiceError;

pub mod auth;
pub mod health;
pub mod token;
pub mod user;

/// Run derive-based validation on a request body, reporting the first failing field.
pub(crate) fn validate_body<T: Validate>(body: &T) -> Result<(), AuthServiceError> {
    let Err(errors) = body.validate() else {
        return Ok(());
    };
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .unwrap_or_else(|| "Invalid request".to_owned());
    Err(AuthServiceError::InvalidInput(message))
}
