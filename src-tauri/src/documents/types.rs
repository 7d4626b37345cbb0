use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HrDocsError;

/// Kinds of letter the document service can generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Offer,
    Appointment,
    Termination,
    Experience,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Offer,
        DocumentType::Appointment,
        DocumentType::Termination,
        DocumentType::Experience,
    ];

    /// Service path for generation requests of this kind.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Offer => "/generate-offer-letter",
            Self::Appointment => "/generate-appointment-letter",
            Self::Termination => "/generate-termination-letter",
            Self::Experience => "/generate-experience-letter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Offer => "Offer Letter",
            Self::Appointment => "Appointment Letter",
            Self::Termination => "Termination Letter",
            Self::Experience => "Experience Letter",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Appointment => "appointment",
            Self::Termination => "termination",
            Self::Experience => "experience",
        }
    }

    /// Declared field names, in display order.
    pub fn schema(self) -> &'static [&'static str] {
        match self {
            Self::Offer => &[
                "employee_name",
                "employee_address",
                "designation",
                "department",
                "company_name",
                "work_location",
                "reporting_manager",
                "offer_date",
                "joining_date",
                "ctc",
                "probation_months",
                "notice_period",
                "working_hours",
                "hr_name",
            ],
            Self::Appointment => &[
                "employee_name",
                "employee_address",
                "designation",
                "department",
                "company_name",
                "work_location",
                "reporting_manager",
                "appointment_date",
                "joining_date",
                "ctc",
                "probation_months",
                "notice_period",
                "working_hours",
                "hr_name",
            ],
            Self::Termination => &[
                "employee_name",
                "employee_address",
                "designation",
                "department",
                "company_name",
                "reporting_manager",
                "joining_date",
                "termination_date",
                "notice_period",
                "reason",
                "hr_name",
            ],
            Self::Experience => &[
                "employee_name",
                "designation",
                "department",
                "company_name",
                "work_location",
                "joining_date",
                "end_date",
                "hr_name",
            ],
        }
    }

    pub fn has_field(self, field: &str) -> bool {
        self.schema().contains(&field)
    }

    /// Schema with labels and sections, for rendering the editor.
    pub fn info(self) -> DocumentTypeInfo {
        DocumentTypeInfo {
            kind: self,
            label: self.label().to_string(),
            fields: self
                .schema()
                .iter()
                .filter_map(|name| field_spec(name))
                .map(FieldInfo::from)
                .collect(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = HrDocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| HrDocsError::UnknownDocumentType(s.to_string()))
    }
}

/// Editor grouping for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Employee,
    Company,
    DatesAndSalary,
    Terms,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Self::Employee => "Employee Details",
            Self::Company => "Company Details",
            Self::DatesAndSalary => "Dates & Salary",
            Self::Terms => "Terms",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub section: Section,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "employee_name", label: "Employee Name", section: Section::Employee },
    FieldSpec { name: "employee_address", label: "Employee Address", section: Section::Employee },
    FieldSpec { name: "designation", label: "Designation", section: Section::Employee },
    FieldSpec { name: "department", label: "Department", section: Section::Employee },
    FieldSpec { name: "company_name", label: "Company Name", section: Section::Company },
    FieldSpec { name: "work_location", label: "Work Location", section: Section::Company },
    FieldSpec { name: "reporting_manager", label: "Reporting Manager", section: Section::Company },
    FieldSpec { name: "hr_name", label: "HR Name", section: Section::Company },
    FieldSpec { name: "offer_date", label: "Offer Date (YYYY-MM-DD)", section: Section::DatesAndSalary },
    FieldSpec { name: "appointment_date", label: "Appointment Date (YYYY-MM-DD)", section: Section::DatesAndSalary },
    FieldSpec { name: "joining_date", label: "Joining Date (YYYY-MM-DD)", section: Section::DatesAndSalary },
    FieldSpec { name: "termination_date", label: "Termination Date (YYYY-MM-DD)", section: Section::DatesAndSalary },
    FieldSpec { name: "end_date", label: "Last Working Date (YYYY-MM-DD)", section: Section::DatesAndSalary },
    FieldSpec { name: "ctc", label: "CTC (example: 6 LPA)", section: Section::DatesAndSalary },
    FieldSpec { name: "probation_months", label: "Probation Months", section: Section::DatesAndSalary },
    FieldSpec { name: "notice_period", label: "Notice Period (days)", section: Section::Terms },
    FieldSpec { name: "working_hours", label: "Working Hours", section: Section::Terms },
    FieldSpec { name: "reason", label: "Reason", section: Section::Terms },
];

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Serializable field description sent to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub label: String,
    pub section: Section,
    pub section_title: String,
}

impl From<&FieldSpec> for FieldInfo {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            label: spec.label.to_string(),
            section: spec.section,
            section_title: spec.section.title().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentTypeInfo {
    pub kind: DocumentType,
    pub label: String,
    pub fields: Vec<FieldInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_mapping() {
        assert_eq!(DocumentType::Offer.endpoint(), "/generate-offer-letter");
        assert_eq!(DocumentType::Appointment.endpoint(), "/generate-appointment-letter");
        assert_eq!(DocumentType::Termination.endpoint(), "/generate-termination-letter");
        assert_eq!(DocumentType::Experience.endpoint(), "/generate-experience-letter");
    }

    #[test]
    fn test_default_is_offer() {
        assert_eq!(DocumentType::default(), DocumentType::Offer);
    }

    #[test]
    fn test_every_schema_field_has_a_catalog_entry() {
        for kind in DocumentType::ALL {
            for name in kind.schema() {
                assert!(field_spec(name).is_some(), "{} field '{}' has no spec", kind, name);
            }
            assert_eq!(kind.info().fields.len(), kind.schema().len());
        }
    }

    #[test]
    fn test_type_specific_fields() {
        assert!(DocumentType::Termination.has_field("termination_date"));
        assert!(DocumentType::Termination.has_field("reason"));
        assert!(!DocumentType::Offer.has_field("termination_date"));
        assert!(!DocumentType::Offer.has_field("reason"));
        assert!(DocumentType::Experience.has_field("end_date"));
    }

    #[test]
    fn test_schemas_have_no_duplicates() {
        for kind in DocumentType::ALL {
            let mut names = kind.schema().to_vec();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), kind.schema().len(), "{} has duplicate fields", kind);
        }
    }

    #[test]
    fn test_parse_round_trips_wire_names() {
        for kind in DocumentType::ALL {
            assert_eq!(kind.as_str().parse::<DocumentType>().unwrap(), kind);
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::json!(kind.as_str()));
        }
        assert!("resignation".parse::<DocumentType>().is_err());
    }
}
