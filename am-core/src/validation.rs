//! Input validation and normalization
//!
//! Every create/update input passes through one of the `validate_*`
//! functions before it reaches storage. They trim text, turn blank optional
//! text into `None`, and reject anything the schema would not accept.

use chrono::{DateTime, NaiveDate};

use crate::constants::{MAX_NAME_LEN, MAX_TEXT_LEN};
use crate::error::{MaintenanceError, MaintenanceResult};
use crate::types::{
    AssetUpdate, MaintenanceLogUpdate, NewAsset, NewMaintenanceLog, NewSchedule, NewUser,
    ScheduleUpdate, UserUpdate,
};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim a required name-like field
pub fn required_name(field: &str, value: &str) -> MaintenanceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MaintenanceError::validation(format!("{field} is required")));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(MaintenanceError::validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

/// Trim optional free text; blank becomes `None`
pub fn optional_text(field: &str, value: Option<String>) -> MaintenanceResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(MaintenanceError::validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(Some(value.to_string()))
}

pub fn validate_username(username: &str) -> MaintenanceResult<String> {
    let username = required_name("username", username)?;
    if username.contains('@') || username.chars().any(char::is_whitespace) {
        return Err(MaintenanceError::validation(
            "username may not contain '@' or whitespace",
        ));
    }
    Ok(username)
}

pub fn validate_email(email: &str) -> MaintenanceResult<String> {
    let email = required_name("email", email)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(MaintenanceError::validation(format!("invalid email: {email}")));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> MaintenanceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(MaintenanceError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_cost(cost: f64) -> MaintenanceResult<f64> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(MaintenanceError::validation(
            "cost must be a non-negative number",
        ));
    }
    Ok(cost)
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is kept
pub fn parse_date(field: &str, value: &str) -> MaintenanceResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            MaintenanceError::validation(format!(
                "{field} must be a date (YYYY-MM-DD), got '{value}'"
            ))
        })
}

pub fn validate_new_user(input: NewUser) -> MaintenanceResult<NewUser> {
    validate_password(&input.password)?;
    Ok(NewUser {
        username: validate_username(&input.username)?,
        email: validate_email(&input.email)?,
        password: input.password,
    })
}

pub fn validate_user_update(input: UserUpdate) -> MaintenanceResult<UserUpdate> {
    if input.is_empty() {
        return Err(MaintenanceError::NoChanges);
    }
    if let Some(password) = &input.password {
        validate_password(password)?;
    }
    Ok(UserUpdate {
        username: input.username.as_deref().map(validate_username).transpose()?,
        email: input.email.as_deref().map(validate_email).transpose()?,
        password: input.password,
    })
}

pub fn validate_new_asset(input: NewAsset) -> MaintenanceResult<NewAsset> {
    Ok(NewAsset {
        name: required_name("name", &input.name)?,
        description: optional_text("description", input.description)?,
    })
}

pub fn validate_asset_update(input: AssetUpdate) -> MaintenanceResult<AssetUpdate> {
    if input.is_empty() {
        return Err(MaintenanceError::NoChanges);
    }
    Ok(AssetUpdate {
        name: input
            .name
            .as_deref()
            .map(|n| required_name("name", n))
            .transpose()?,
        // An explicit blank description is kept as "" so the column is cleared
        description: match input.description {
            Some(d) => Some(optional_text("description", Some(d))?.unwrap_or_default()),
            None => None,
        },
    })
}

pub fn validate_new_log(input: NewMaintenanceLog) -> MaintenanceResult<NewMaintenanceLog> {
    Ok(NewMaintenanceLog {
        asset_id: input.asset_id,
        service_name: required_name("service_name", &input.service_name)?,
        service_date: input.service_date,
        description: optional_text("description", input.description)?,
        cost: input.cost.map(validate_cost).transpose()?,
    })
}

pub fn validate_log_update(input: MaintenanceLogUpdate) -> MaintenanceResult<MaintenanceLogUpdate> {
    if input.is_empty() {
        return Err(MaintenanceError::NoChanges);
    }
    Ok(MaintenanceLogUpdate {
        asset_id: input.asset_id,
        service_name: input
            .service_name
            .as_deref()
            .map(|n| required_name("service_name", n))
            .transpose()?,
        service_date: input.service_date,
        description: match input.description {
            Some(d) => Some(optional_text("description", Some(d))?.unwrap_or_default()),
            None => None,
        },
        cost: input.cost.map(validate_cost).transpose()?,
    })
}

pub fn validate_new_schedule(input: NewSchedule) -> MaintenanceResult<NewSchedule> {
    let due_condition = optional_text("due_condition", input.due_condition)?;
    if input.due_date.is_none() && due_condition.is_none() {
        return Err(MaintenanceError::validation(
            "a schedule needs a due_date or a due_condition",
        ));
    }
    Ok(NewSchedule {
        asset_id: input.asset_id,
        service_name: required_name("service_name", &input.service_name)?,
        due_date: input.due_date,
        due_condition,
        is_completed: input.is_completed,
        log_id: input.log_id,
    })
}

pub fn validate_schedule_update(input: ScheduleUpdate) -> MaintenanceResult<ScheduleUpdate> {
    if input.is_empty() {
        return Err(MaintenanceError::NoChanges);
    }
    Ok(ScheduleUpdate {
        service_name: input
            .service_name
            .as_deref()
            .map(|n| required_name("service_name", n))
            .transpose()?,
        due_date: input.due_date,
        due_condition: input
            .due_condition
            .map(|c| optional_text("due_condition", c))
            .transpose()?,
        is_completed: input.is_completed,
        log_id: input.log_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetId;

    #[test]
    fn test_required_name_trims() {
        assert_eq!(required_name("name", "  Pump  ").unwrap(), "Pump");
        assert!(matches!(
            required_name("name", "   "),
            Err(MaintenanceError::Validation(_))
        ));
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text("d", Some("  ".to_string())).unwrap(), None);
        assert_eq!(optional_text("d", None).unwrap(), None);
        assert_eq!(
            optional_text("d", Some(" x ".to_string())).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("maria").is_ok());
        assert!(validate_username("maria@home").is_err());
        assert!(validate_username("maria silva").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(" a@b.io ").unwrap(), "a@b.io");
        assert!(validate_email("nobody").is_err());
        assert!(validate_email("@b.io").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("d", "2024-03-09").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-03-09T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-03-09T23:30:00-03:00").unwrap(), expected);
        assert!(parse_date("d", "09/03/2024").is_err());
    }

    #[test]
    fn test_cost_rules() {
        assert!(validate_cost(0.0).is_ok());
        assert!(validate_cost(12.5).is_ok());
        assert!(validate_cost(-1.0).is_err());
        assert!(validate_cost(f64::NAN).is_err());
    }

    #[test]
    fn test_empty_updates_rejected() {
        assert!(matches!(
            validate_asset_update(AssetUpdate::default()),
            Err(MaintenanceError::NoChanges)
        ));
        assert!(matches!(
            validate_log_update(MaintenanceLogUpdate::default()),
            Err(MaintenanceError::NoChanges)
        ));
        assert!(matches!(
            validate_schedule_update(ScheduleUpdate::default()),
            Err(MaintenanceError::NoChanges)
        ));
        assert!(matches!(
            validate_user_update(UserUpdate::default()),
            Err(MaintenanceError::NoChanges)
        ));
    }

    #[test]
    fn test_schedule_requires_due_date_or_condition() {
        let input = NewSchedule {
            asset_id: AssetId(1),
            service_name: "Filter".to_string(),
            due_date: None,
            due_condition: Some("   ".to_string()),
            is_completed: false,
            log_id: None,
        };
        assert!(validate_new_schedule(input.clone()).is_err());

        let input = NewSchedule {
            due_condition: Some("every 500 hours".to_string()),
            ..input
        };
        let validated = validate_new_schedule(input).unwrap();
        assert_eq!(validated.due_condition.as_deref(), Some("every 500 hours"));
    }

    #[test]
    fn test_schedule_update_clears_condition() {
        let update = ScheduleUpdate {
            due_condition: Some(Some("  ".to_string())),
            ..Default::default()
        };
        let validated = validate_schedule_update(update).unwrap();
        assert_eq!(validated.due_condition, Some(None));
    }
}
