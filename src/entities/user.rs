use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "staff")]
    Staff,
    #[sea_orm(string_value = "guide")]
    Guide,
    #[sea_orm(string_value = "it_support")]
    ItSupport,
    #[sea_orm(string_value = "it_assistant")]
    ItAssistant,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "captain")]
    Captain,
}

impl UserRole {
    /// Parse a role name as sent by clients (e.g. "ADMIN", "it_support").
    /// Returns None for names outside the closed role set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Some(UserRole::Customer),
            "STAFF" => Some(UserRole::Staff),
            "GUIDE" => Some(UserRole::Guide),
            "IT_SUPPORT" => Some(UserRole::ItSupport),
            "IT_ASSISTANT" => Some(UserRole::ItAssistant),
            "ADMIN" => Some(UserRole::Admin),
            "CAPTAIN" => Some(UserRole::Captain),
            _ => None,
        }
    }

    /// Roles that work the support desk.
    pub fn is_it_staff(&self) -> bool {
        matches!(self, UserRole::ItSupport | UserRole::ItAssistant)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub second_name: String,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub hire_date: Option<Date>,
    pub certification: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub years_of_experience: Option<i32>,
    pub role: UserRole,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Rebuild this user under a new role: same identity, every shared
    /// profile field carried over, role-specific fields reset. A guide's
    /// specialization does not survive becoming an admin.
    pub fn reassigned(self, new_role: UserRole) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            first_name: Set(self.first_name),
            second_name: Set(self.second_name),
            contact_no: Set(self.contact_no),
            address: Set(self.address),
            city: Set(self.city),
            street: Set(self.street),
            postal_code: Set(self.postal_code),
            hire_date: Set(self.hire_date),
            certification: Set(self.certification),
            department: Set(None),
            specialization: Set(None),
            years_of_experience: Set(None),
            role: Set(new_role),
            created_at: Set(self.created_at),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn guide() -> Model {
        Model {
            id: Uuid::new_v4(),
            email: "maya@boatsafari.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Maya".to_string(),
            second_name: "Perera".to_string(),
            contact_no: Some("0771234567".to_string()),
            address: Some("12 Harbour Rd".to_string()),
            city: Some("Galle".to_string()),
            street: Some("Harbour Rd".to_string()),
            postal_code: Some("80000".to_string()),
            hire_date: None,
            certification: Some("Open Water Diver".to_string()),
            department: None,
            specialization: Some("Whale watching".to_string()),
            years_of_experience: Some(6),
            role: UserRole::Guide,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn parse_accepts_closed_set_case_insensitively() {
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("it_support"), Some(UserRole::ItSupport));
        assert_eq!(UserRole::parse(" Captain "), Some(UserRole::Captain));
        assert_eq!(UserRole::parse("SKIPPER"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn reassignment_preserves_identity_and_shared_fields() {
        let user = guide();
        let id = user.id;

        let updated = user.reassigned(UserRole::Admin);

        assert_eq!(updated.id.unwrap(), id);
        assert_eq!(updated.first_name.unwrap(), "Maya");
        assert_eq!(updated.email.unwrap(), "maya@boatsafari.com");
        assert_eq!(
            updated.certification.unwrap().as_deref(),
            Some("Open Water Diver")
        );
        assert_eq!(updated.role.unwrap(), UserRole::Admin);
    }

    #[test]
    fn reassignment_resets_role_specific_fields() {
        let updated = guide().reassigned(UserRole::Staff);

        assert_eq!(updated.specialization.unwrap(), None);
        assert_eq!(updated.years_of_experience.unwrap(), None);
        assert_eq!(updated.department.unwrap(), None);
    }
}
