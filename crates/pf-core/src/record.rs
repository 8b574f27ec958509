use chrono::NaiveDateTime;
use serde::Serialize;

/// Output column names, in order.
pub const COLUMNS: [&str; 29] = [
    "TaskId",
    "RecordID",
    "Instruction_Code",
    "Building",
    "BuildingName",
    "LocationName",
    "ShortDescription",
    "LongDescription",
    "Reporter",
    "ReporterEmail",
    "Notes",
    "ReportedDate",
    "DueBy",
    "ScheduledFor",
    "Finished",
    "Status",
    "LoggedBy",
    "LoggedOn",
    "ModifiedOn",
    "SLAStatus",
    "CreatedTimestamp",
    "LastUploaded",
    "IsCurrent",
    "Period",
    "PeriodWeek",
    "PeriodYear",
    "StationSection",
    "KPIDescription",
    "KPICategory",
];

/// How the driver asked for a record. Not part of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrigin {
    FiscalYearSpan,
    BucketCoverage,
    Regular,
    /// Anchored near the record with task id `reference`.
    DuplicateProbe { reference: String },
    /// A probe was requested but no record was indexed yet.
    ProbeFallback,
}

impl RecordOrigin {
    pub fn is_probe(&self) -> bool {
        matches!(self, Self::DuplicateProbe { .. })
    }
}

/// One synthesized task. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "TaskId")]
    pub task_id: String,
    #[serde(rename = "RecordID")]
    pub record_id: String,
    #[serde(rename = "Instruction_Code")]
    pub instruction_code: String,
    #[serde(rename = "Building")]
    pub building: String,
    #[serde(rename = "BuildingName")]
    pub building_name: String,
    #[serde(rename = "LocationName")]
    pub location_name: String,
    #[serde(rename = "ShortDescription")]
    pub short_description: String,
    #[serde(rename = "LongDescription")]
    pub long_description: String,
    #[serde(rename = "Reporter")]
    pub reporter: String,
    #[serde(rename = "ReporterEmail")]
    pub reporter_email: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "ReportedDate", with = "timestamp")]
    pub reported: NaiveDateTime,
    #[serde(rename = "DueBy", with = "timestamp")]
    pub due_by: NaiveDateTime,
    #[serde(rename = "ScheduledFor", with = "timestamp")]
    pub scheduled: NaiveDateTime,
    /// `None` only in status snapshots for non-terminal steps.
    #[serde(rename = "Finished", with = "timestamp::option")]
    pub finished: Option<NaiveDateTime>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "LoggedBy")]
    pub logged_by: String,
    #[serde(rename = "LoggedOn", with = "timestamp")]
    pub logged: NaiveDateTime,
    #[serde(rename = "ModifiedOn", with = "timestamp")]
    pub modified: NaiveDateTime,
    #[serde(rename = "SLAStatus")]
    pub sla_status: String,
    #[serde(rename = "CreatedTimestamp", with = "timestamp")]
    pub created: NaiveDateTime,
    #[serde(rename = "LastUploaded", with = "timestamp")]
    pub last_uploaded: NaiveDateTime,
    #[serde(rename = "IsCurrent")]
    pub is_current: u8,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "PeriodWeek")]
    pub period_week: i64,
    #[serde(rename = "PeriodYear")]
    pub period_year: i32,
    #[serde(rename = "StationSection")]
    pub station_section: String,
    #[serde(rename = "KPIDescription")]
    pub kpi_description: String,
    #[serde(rename = "KPICategory")]
    pub kpi_category: String,

    #[serde(skip)]
    pub kpi_code: String,
    /// Drawn duration; may exceed `finished - logged` after the end clamp.
    #[serde(skip)]
    pub duration_hours: u32,
    #[serde(skip)]
    pub bucket: String,
    #[serde(skip)]
    pub origin: RecordOrigin,
}

impl Record {
    /// Column values as text in [`COLUMNS`] order; `None` for an empty cell.
    pub fn values(&self) -> Vec<Option<String>> {
        let ts = |t: &NaiveDateTime| Some(timestamp::format(t));
        vec![
            Some(self.task_id.clone()),
            Some(self.record_id.clone()),
            Some(self.instruction_code.clone()),
            Some(self.building.clone()),
            Some(self.building_name.clone()),
            Some(self.location_name.clone()),
            Some(self.short_description.clone()),
            Some(self.long_description.clone()),
            Some(self.reporter.clone()),
            Some(self.reporter_email.clone()),
            Some(self.notes.clone()),
            ts(&self.reported),
            ts(&self.due_by),
            ts(&self.scheduled),
            self.finished.as_ref().map(timestamp::format),
            Some(self.status.clone()),
            Some(self.logged_by.clone()),
            ts(&self.logged),
            ts(&self.modified),
            Some(self.sla_status.clone()),
            ts(&self.created),
            ts(&self.last_uploaded),
            Some(self.is_current.to_string()),
            Some(self.period.clone()),
            Some(self.period_week.to_string()),
            Some(self.period_year.to_string()),
            Some(self.station_section.clone()),
            Some(self.kpi_description.clone()),
            Some(self.kpi_category.clone()),
        ]
    }
}

/// `YYYY-MM-DD HH:MM:SS` serialisation for record timestamps.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn format(ts: &NaiveDateTime) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            ts: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(t) => serializer.collect_str(&t.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }
    }
}
