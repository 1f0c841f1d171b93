use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::form::{deserialize_optional_f64, deserialize_optional_i32, deserialize_optional_string};
use super::FromSqliteRow;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub goal: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromSqliteRow for UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            full_name: row.get("full_name")?,
            age: row.get("age")?,
            height: row.get("height")?,
            goal: row.get("goal")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub goal: Option<String>,
}

impl UpdateProfile {
    pub fn validate(&self) -> Result<(), &'static str> {
        if matches!(self.age, Some(age) if !(0..=150).contains(&age)) {
            return Err("Age must be between 0 and 150");
        }
        if matches!(self.height, Some(h) if !h.is_finite() || h <= 0.0) {
            return Err("Height must be a positive number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_profile() {
        assert!(UpdateProfile::default().validate().is_ok());

        let form = UpdateProfile {
            age: Some(200),
            ..Default::default()
        };
        assert!(form.validate().is_err());

        let form = UpdateProfile {
            height: Some(0.0),
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }
}
