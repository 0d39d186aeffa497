use campus_core::model::{StudentProfile, SubjectMark};

const NOT_PROVIDED: &str = "Not provided";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkRowVm {
    pub subject: String,
    pub mark: String,
    pub passing: bool,
}

impl From<&SubjectMark> for MarkRowVm {
    fn from(mark: &SubjectMark) -> Self {
        Self {
            subject: mark.subject.clone(),
            mark: format!("{:.1}/20", mark.mark),
            passing: mark.is_passing(),
        }
    }
}

/// Profile fields as label/value pairs, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileVm {
    pub fields: Vec<(&'static str, String)>,
    pub marks: Vec<MarkRowVm>,
}

impl From<&StudentProfile> for ProfileVm {
    fn from(profile: &StudentProfile) -> Self {
        let shown = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_PROVIDED.to_string());
        Self {
            fields: vec![
                ("Name", shown(&profile.full_name)),
                ("Matricule", shown(&profile.matricule)),
                ("Email", shown(&profile.email)),
                ("Mention", shown(&profile.mention)),
                ("Track", shown(&profile.track)),
                ("Level", shown(&profile.level)),
                ("Academic year", shown(&profile.academic_year)),
                ("Phone", shown(&profile.phone)),
            ],
            marks: profile.marks.iter().map(MarkRowVm::from).collect(),
        }
    }
}
