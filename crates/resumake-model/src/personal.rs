//! Personal information header

use serde::{Deserialize, Serialize};

/// The header block of a résumé
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Full name
    pub name: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
    /// Current city
    pub city: String,
    /// Target position
    pub position: String,
}

/// Editable fields of [`PersonalInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Phone,
    Email,
    City,
    Position,
}

impl PersonalInfo {
    /// Read a single field
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::Name => &self.name,
            PersonalField::Phone => &self.phone,
            PersonalField::Email => &self.email,
            PersonalField::City => &self.city,
            PersonalField::Position => &self.position,
        }
    }

    /// Mutable access to a single field
    pub fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Email => &mut self.email,
            PersonalField::City => &mut self.city,
            PersonalField::Position => &mut self.position,
        }
    }

    /// Phone, email and city joined the way the preview header shows them.
    ///
    /// Empty parts are skipped so a half-filled header does not render as
    /// `" |  | "`.
    pub fn contact_line(&self) -> String {
        [&self.phone, &self.email, &self.city]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// True when every field is blank
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.email,
            &self.city,
            &self.position,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}
