use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    /// None for accounts created through Google sign-in.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
    #[sea_orm(has_many = "super::feedback_review::Entity")]
    FeedbackReviews,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::feedback_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackReviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// "first last" skipping blanks, falling back to the email when both are
/// blank. Recomputed at every write site that touches the name fields.
pub fn full_name(first_name: &str, last_name: &str, email: &str) -> String {
    let joined = [first_name, last_name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        email.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::full_name;

    #[test]
    fn full_name_joins_both_parts() {
        assert_eq!(full_name("Asha", "Shrestha", "a@b.com"), "Asha Shrestha");
    }

    #[test]
    fn full_name_skips_blank_parts() {
        assert_eq!(full_name("Asha", "", "a@b.com"), "Asha");
        assert_eq!(full_name("", "Shrestha", "a@b.com"), "Shrestha");
    }

    #[test]
    fn full_name_falls_back_to_email() {
        assert_eq!(full_name("", "", "a@b.com"), "a@b.com");
    }
}
