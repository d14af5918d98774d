use crate::{id::DbId, uac::Role};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: DbId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
    pub manager_id: Option<DbId>,
    pub manager_name: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        match (&self.full_name, &self.first_name, &self.last_name) {
            (Some(full), _, _) if !full.is_empty() => full.clone(),
            (_, Some(first), Some(last)) => format!("{first} {last}"),
            _ => self.email.clone(),
        }
    }
}
