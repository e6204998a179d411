use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use evently_core::PaginationMeta;

use crate::ownership::OwnedResource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub date_time: DateTime<Utc>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for Event {
    fn owner_id(&self) -> Option<i64> {
        Some(self.user_id)
    }
}

fn validate_future_date(date_time: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date_time <= Utc::now() {
        let mut err = ValidationError::new("future_date");
        err.message = Some("date_time must be in the future".into());
        return Err(err);
    }
    Ok(())
}

/// Body of both create and update: an update replaces every field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct EventRequest {
    #[validate(length(min = 3, max = 100, message = "name must be between 3 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 10,
        max = 500,
        message = "description must be between 10 and 500 characters"
    ))]
    pub description: String,
    #[validate(length(
        min = 3,
        max = 100,
        message = "location must be between 3 and 100 characters"
    ))]
    pub location: String,
    #[serde(alias = "dateTime")]
    #[validate(custom(function = "validate_future_date"))]
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub message: String,
    pub event: Event,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedEventsResponse {
    pub data: Vec<Event>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request() -> EventRequest {
        EventRequest {
            name: "Rust Meetup".to_string(),
            description: "Monthly gathering of Rustaceans".to_string(),
            location: "Lagos".to_string(),
            date_time: Utc::now() + Duration::days(7),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_past_date_rejected() {
        let req = EventRequest {
            date_time: Utc::now() - Duration::minutes(1),
            ..request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("date_time"));
    }

    #[test]
    fn test_length_bounds() {
        let short_name = EventRequest {
            name: "ab".to_string(),
            ..request()
        };
        assert!(short_name.validate().is_err());

        let short_description = EventRequest {
            description: "too short".to_string(),
            ..request()
        };
        assert!(short_description.validate().is_err());

        let long_location = EventRequest {
            location: "x".repeat(101),
            ..request()
        };
        assert!(long_location.validate().is_err());
    }

    #[test]
    fn test_accepts_camel_case_date_time() {
        let json = r#"{
            "name": "Rust Meetup",
            "description": "Monthly gathering of Rustaceans",
            "location": "Lagos",
            "dateTime": "2999-01-01T18:00:00Z"
        }"#;
        let req: EventRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_event_owner() {
        let event = Event {
            id: 1,
            name: "n".into(),
            description: "d".into(),
            location: "l".into(),
            date_time: Utc::now(),
            user_id: 9,
            created_at: Utc::now(),
        };
        assert_eq!(event.owner_id(), Some(9));
    }
}
