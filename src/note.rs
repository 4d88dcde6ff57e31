use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::Error;
use crate::model::{Attribution, Field, FieldGroup, ReportModel, Value, Width};

pub const DEFAULT_TITLE: &str = "Progress Note";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Patient {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub email_address: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteAuthor {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub job_title: String,
    pub time_stamp: NaiveDateTime,
}

/// A clinic visit note as captured by the data-entry screens.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressNote {
    pub title: Option<String>,
    pub date_created: Option<NaiveDate>,
    pub patient: Patient,

    pub weight: Option<f64>,
    pub height_feet: Option<i64>,
    pub height_inches: Option<i64>,
    pub bmi: Option<f64>,
    pub waist: Option<f64>,
    pub bp_systole: Option<i64>,
    pub bp_diastole: Option<i64>,
    pub pulse: Option<i64>,
    pub respirations: Option<i64>,
    pub temperature: Option<f64>,
    pub glucose: Option<f64>,
    pub a1c: Option<f64>,

    pub allergic_to_medications: bool,
    pub medical_insurance: bool,
    pub foot_screening: bool,
    pub shoe_size: Option<String>,
    pub smoking: Option<bool>,
    pub ace_or_arb: bool,
    pub allergies: Option<String>,
    pub medications: Option<String>,

    pub nurse_or_dietitian_note: Option<String>,
    pub subjective: Option<String>,
    pub objective: Option<String>,
    pub assessment: Option<String>,
    pub plan: Option<String>,

    /// Edit history, oldest first.
    pub updated_by: Vec<NoteAuthor>,
}

impl ProgressNote {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Height in inches, only when both parts were recorded and the sum is representable.
    pub fn height_in_inches(&self) -> Option<i64> {
        self.height_feet?
            .checked_mul(12)?
            .checked_add(self.height_inches?)
    }

    pub fn blood_pressure(&self) -> Option<String> {
        Some(format!("{}/{}", self.bp_systole?, self.bp_diastole?))
    }

    /// Map the note onto the report's fixed section plan: demographics,
    /// vitals, screening flags, SOAP narrative, then the edit trail.
    pub fn to_report(&self) -> Result<ReportModel, Error> {
        let mut builder = ReportModel::builder()
            .title(self.title.as_deref().unwrap_or(DEFAULT_TITLE))
            .groups(self.demographics()?)
            .groups(self.vitals()?)
            .groups(self.screening()?)
            .groups(self.narrative());

        if let Some(date) = self.date_created {
            builder = builder.created(date);
        }
        for author in &self.updated_by {
            builder = builder.attribution(Attribution {
                name: format!("{} {}", author.first_name, author.last_name),
                job_title: author.job_title.clone(),
                timestamp: author.time_stamp,
            });
        }
        builder.build()
    }

    fn demographics(&self) -> Result<Vec<FieldGroup>, Error> {
        let p = &self.patient;
        let name = format!("{} {}", p.first_name, p.last_name).trim().to_string();
        Ok(vec![
            FieldGroup::single("Patient Name", name),
            FieldGroup::row(vec![
                Field::new("Telephone", p.contact_number.clone()),
                Field::new("DOB", p.birth_date),
            ])?,
            FieldGroup::block("Address", p.address.as_deref(), Width::Narrow),
            FieldGroup::block("Email Address", p.email_address.as_deref(), Width::Narrow),
        ])
    }

    fn vitals(&self) -> Result<Vec<FieldGroup>, Error> {
        Ok(vec![
            FieldGroup::row(vec![
                Field::new("Weight(lbs)", self.weight),
                Field::new("Height(in.)", self.height_in_inches()),
                Field::new("BMI", self.bmi),
            ])?,
            FieldGroup::row(vec![
                Field::new("Waist(in.)", self.waist),
                Field::new("BP", self.blood_pressure()),
                Field::new("Pulse", self.pulse),
                Field::new("Respirations", self.respirations),
            ])?,
            FieldGroup::row(vec![
                Field::new("Temperature", self.temperature),
                Field::new("Glucose", self.glucose),
                Field::new("A1C", self.a1c),
            ])?,
        ])
    }

    fn screening(&self) -> Result<Vec<FieldGroup>, Error> {
        Ok(vec![
            FieldGroup::row(vec![
                Field::new("Allergic to medications", self.allergic_to_medications),
                Field::new("Medical Insurance", self.medical_insurance),
            ])?,
            FieldGroup::row(vec![
                Field::new("Foot Screening", self.foot_screening),
                Field::new("Shoe Size", self.shoe_size.clone()),
            ])?,
            FieldGroup::row(vec![
                Field::new("Smoking", self.smoking),
                Field::new("ACE/ARB", self.ace_or_arb),
            ])?,
            FieldGroup::single("Allergies", Value::from(self.allergies.clone())),
            FieldGroup::block("Medications", self.medications.as_deref(), Width::Narrow),
        ])
    }

    fn narrative(&self) -> Vec<FieldGroup> {
        vec![
            FieldGroup::section("Nurse/Dietitian Note", self.nurse_or_dietitian_note.as_deref()),
            FieldGroup::section("Subjective", self.subjective.as_deref()),
            FieldGroup::section("Objective", self.objective.as_deref()),
            FieldGroup::section("Assessment", self.assessment.as_deref()),
            FieldGroup::section("Plan", self.plan.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = r#"{
        "dateCreated": "2016-04-08",
        "patient": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "birthDate": "1961-03-09",
            "contactNumber": "555-0100"
        },
        "weight": 182.4,
        "heightFeet": 5,
        "heightInches": 7,
        "bpSystole": 128,
        "pulse": 72,
        "footScreening": true,
        "plan": "Recheck A1C in three months.",
        "updatedBy": [
            {"firstName": "Grace", "lastName": "Hopper", "jobTitle": "RN", "timeStamp": "2016-04-08T10:15:30"}
        ]
    }"#;

    #[test]
    fn parses_and_maps_section_plan() {
        let note = ProgressNote::from_json(NOTE).unwrap();
        let report = note.to_report().unwrap();
        assert_eq!(report.title(), DEFAULT_TITLE);
        let labels: Vec<&str> = report.fields().iter().map(|g| g.leading_label()).collect();
        assert_eq!(
            labels,
            [
                "Patient Name",
                "Telephone",
                "Address",
                "Email Address",
                "Weight(lbs)",
                "Waist(in.)",
                "Temperature",
                "Allergic to medications",
                "Foot Screening",
                "Smoking",
                "Allergies",
                "Medications",
                "Nurse/Dietitian Note",
                "Subjective",
                "Objective",
                "Assessment",
                "Plan",
            ]
        );
        assert_eq!(report.attributions().len(), 1);
        assert_eq!(report.attributions()[0].name, "Grace Hopper");
    }

    #[test]
    fn derived_values_need_both_parts() {
        let note = ProgressNote::from_json(NOTE).unwrap();
        assert_eq!(note.height_in_inches(), Some(67));
        // diastole missing
        assert_eq!(note.blood_pressure(), None);
    }

    #[test]
    fn oversized_height_is_missing() {
        let note = ProgressNote {
            height_feet: Some(i64::MAX),
            height_inches: Some(1),
            ..ProgressNote::default()
        };
        assert_eq!(note.height_in_inches(), None);
        let note = ProgressNote {
            height_feet: Some(i64::MAX / 12),
            height_inches: Some(i64::MAX),
            ..ProgressNote::default()
        };
        assert_eq!(note.height_in_inches(), None);
    }

    #[test]
    fn missing_date_is_rejected() {
        let note = ProgressNote::default();
        assert!(matches!(note.to_report(), Err(Error::MissingField("created date"))));
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(ProgressNote::from_json("{"), Err(Error::Json(_))));
    }
}
