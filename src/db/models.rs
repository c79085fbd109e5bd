//! DynamoDB data models
//!
//! This module defines the user profile record and its attribute encoding.

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StoreError;

/// Partition key attribute of the users table
pub const USER_ID_ATTR: &str = "UserId";
pub const EMAIL_ATTR: &str = "Email";
pub const AGE_ATTR: &str = "Age";

/// User profile record.
///
/// Stored in the users table with `UserId` as partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier (partition key)
    #[serde(rename = "UserId")]
    pub user_id: String,

    #[serde(rename = "Email")]
    pub email: String,

    /// Stored as a DynamoDB number
    #[serde(rename = "Age")]
    pub age: i32,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            age,
        }
    }

    /// Convert to DynamoDB item
    pub fn to_dynamodb(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert(USER_ID_ATTR.to_string(), AttributeValue::S(self.user_id.clone()));
        item.insert(EMAIL_ATTR.to_string(), AttributeValue::S(self.email.clone()));
        item.insert(AGE_ATTR.to_string(), AttributeValue::N(self.age.to_string()));
        item
    }

    /// Parse from DynamoDB item
    ///
    /// Fails if an attribute is missing or has the wrong type, or if `Age`
    /// is not a valid integer.
    pub fn from_dynamodb(item: &HashMap<String, AttributeValue>) -> Result<Self, StoreError> {
        let age = require_number(item, AGE_ATTR)?;
        let age = age
            .parse::<i32>()
            .map_err(|e| StoreError::Parse(format!("{}: {} ({:?})", AGE_ATTR, e, age)))?;

        Ok(Self {
            user_id: require_string(item, USER_ID_ATTR)?,
            email: require_string(item, EMAIL_ATTR)?,
            age,
        })
    }
}

/// Key map for point lookups and deletes
pub fn user_key(user_id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        USER_ID_ATTR.to_string(),
        AttributeValue::S(user_id.to_string()),
    )])
}

fn require_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::MissingAttribute(key.to_string()))
}

fn require_number<'a>(
    item: &'a HashMap<String, AttributeValue>,
    key: &str,
) -> Result<&'a str, StoreError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .map(|n| n.as_str())
        .ok_or_else(|| StoreError::MissingAttribute(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserProfile {
        UserProfile::new("user123", "test@example.com", 30)
    }

    #[test]
    fn test_user_profile_to_dynamodb() {
        let item = sample().to_dynamodb();
        assert_eq!(item.len(), 3);
        assert_eq!(item.get("UserId").unwrap().as_s().unwrap(), "user123");
        assert_eq!(item.get("Email").unwrap().as_s().unwrap(), "test@example.com");
        assert_eq!(item.get("Age").unwrap().as_n().unwrap(), "30");
    }

    #[test]
    fn test_user_profile_from_dynamodb() {
        let item = HashMap::from([
            ("UserId".to_string(), AttributeValue::S("u-1".to_string())),
            ("Email".to_string(), AttributeValue::S("a@b.c".to_string())),
            ("Age".to_string(), AttributeValue::N("-4".to_string())),
        ]);
        let user = UserProfile::from_dynamodb(&item).unwrap();
        assert_eq!(user, UserProfile::new("u-1", "a@b.c", -4));
    }

    #[test]
    fn test_encode_decode_preserves_profile() {
        let profiles = [
            sample(),
            UserProfile::new("", "", i32::MIN),
            UserProfile::new("ü🎉", "x", i32::MAX),
            UserProfile::new("a", "b", 0),
            UserProfile::new("neg", "négatif@exemple.fr", -1),
            UserProfile::new("用户-42", "user@例え.jp", 42),
        ];

        for profile in profiles {
            let decoded = UserProfile::from_dynamodb(&profile.to_dynamodb()).unwrap();
            assert_eq!(decoded, profile);
        }
    }

    #[test]
    fn test_malformed_age_is_parse_error() {
        let mut item = sample().to_dynamodb();
        item.insert("Age".to_string(), AttributeValue::N("thirty".to_string()));

        let err = UserProfile::from_dynamodb(&item).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_fractional_age_is_parse_error() {
        let mut item = sample().to_dynamodb();
        item.insert("Age".to_string(), AttributeValue::N("30.5".to_string()));

        assert!(matches!(
            UserProfile::from_dynamodb(&item),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_or_mistyped_attribute() {
        let mut item = sample().to_dynamodb();
        item.remove("Email");
        assert!(matches!(
            UserProfile::from_dynamodb(&item),
            Err(StoreError::MissingAttribute(attr)) if attr == "Email"
        ));

        let mut item = sample().to_dynamodb();
        item.insert("Age".to_string(), AttributeValue::S("30".to_string()));
        assert!(matches!(
            UserProfile::from_dynamodb(&item),
            Err(StoreError::MissingAttribute(attr)) if attr == "Age"
        ));
    }

    #[test]
    fn test_user_key() {
        let key = user_key("user123");
        assert_eq!(key.len(), 1);
        assert_eq!(key.get("UserId").unwrap().as_s().unwrap(), "user123");
    }

    #[test]
    fn test_json_uses_attribute_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["UserId"], "user123");
        assert_eq!(json["Age"], 30);
    }
}
