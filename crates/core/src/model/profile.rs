use serde::{Deserialize, Serialize};

/// Average mark of one subject on the 0–20 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMark {
    #[serde(rename = "matiere")]
    pub subject: String,
    #[serde(rename = "note")]
    pub mark: f64,
}

impl SubjectMark {
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.mark >= 10.0
    }
}

/// Academic record of the signed-in student.
///
/// The backend leaves unknown fields empty or null; both decode to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(rename = "nom", default, deserialize_with = "non_empty")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub matricule: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub mention: Option<String>,
    #[serde(rename = "parcours", default, deserialize_with = "non_empty")]
    pub track: Option<String>,
    #[serde(rename = "niveau", default, deserialize_with = "non_empty")]
    pub level: Option<String>,
    #[serde(rename = "annee_universitaire", default, deserialize_with = "non_empty")]
    pub academic_year: Option<String>,
    #[serde(rename = "telephone", default, deserialize_with = "non_empty")]
    pub phone: Option<String>,
    #[serde(rename = "notes", default)]
    pub marks: Vec<SubjectMark>,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
