use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{HospitalError, Result};

/// Monetary amount with two decimal places, stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }
}

impl FromStr for Money {
    type Err = HospitalError;

    /// Parses `150`, `150.5`, `-3.25`; more than two fractional digits is an error
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| HospitalError::InvalidMoney {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let text = s.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits after the decimal point"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }
        if unsigned.ends_with('.') {
            return Err(invalid("missing decimals after the point"));
        }

        let whole: i64 = whole.parse().map_err(|_| invalid("amount too large"))?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid("bad decimals"))?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Self {
            cents: if negative { -cents } else { cents },
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl TryFrom<String> for Money {
    type Error = HospitalError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

/// Lifecycle state of an appointment, persisted by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }

    /// Whether the appointment still occupies its doctor and room
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = HospitalError;

    /// Exact upper-case name, as written by the CSV export
    fn from_str(s: &str) -> Result<Self> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| HospitalError::UnknownVariant {
                kind: "appointment status",
                value: s.to_string(),
            })
    }
}

/// A booked visit of a patient to a doctor in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub room_id: String,
    pub scheduled_at: NaiveDateTime,
    pub cost: Money,
    status: AppointmentStatus,
    notes: String,
}

impl Appointment {
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::default()
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_status(&mut self, status: AppointmentStatus) {
        self.status = status;
    }

    /// `None` clears the notes
    ///
    /// # Errors
    /// * `MultiLineNotes` - the text contains `\n` or `\r`
    pub fn set_notes(&mut self, notes: Option<String>) -> Result<()> {
        let notes = notes.unwrap_or_default();
        check_single_line(&notes)?;
        self.notes = notes;
        Ok(())
    }
}

/// Notes are written as the last CSV field, so they must stay on one line
fn check_single_line(notes: &str) -> Result<()> {
    if notes.contains(['\n', '\r']) {
        return Err(HospitalError::MultiLineNotes);
    }
    Ok(())
}

/// Builder for [`Appointment`]
///
/// Patient, doctor, room, date-time and cost are required. Status defaults to
/// `Scheduled` and notes to empty. The builder checks presence only; business
/// rules live in `ops::appointment_ops`.
#[derive(Debug, Clone, Default)]
pub struct AppointmentBuilder {
    id: Option<String>,
    patient_id: Option<String>,
    doctor_id: Option<String>,
    room_id: Option<String>,
    scheduled_at: Option<NaiveDateTime>,
    cost: Option<Money>,
    status: Option<AppointmentStatus>,
    notes: Option<String>,
}

impl AppointmentBuilder {
    /// Use a known id instead of generating one (hydration, seeds)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn doctor(mut self, doctor_id: impl Into<String>) -> Self {
        self.doctor_id = Some(doctor_id.into());
        self
    }

    pub fn room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn scheduled_at(mut self, at: NaiveDateTime) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn cost(mut self, cost: Money) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// # Errors
    /// * `MissingField` - a required field was never set
    /// * `MultiLineNotes` - notes contain a line break
    pub fn build(self) -> Result<Appointment> {
        if let Some(notes) = &self.notes {
            check_single_line(notes)?;
        }
        Ok(Appointment {
            id: self.id.unwrap_or_else(|| Uuid::now_v7().to_string()),
            patient_id: self
                .patient_id
                .ok_or(HospitalError::MissingField { field: "patient" })?,
            doctor_id: self
                .doctor_id
                .ok_or(HospitalError::MissingField { field: "doctor" })?,
            room_id: self
                .room_id
                .ok_or(HospitalError::MissingField { field: "room" })?,
            scheduled_at: self
                .scheduled_at
                .ok_or(HospitalError::MissingField { field: "date and time" })?,
            cost: self
                .cost
                .ok_or(HospitalError::MissingField { field: "cost" })?,
            status: self.status.unwrap_or(AppointmentStatus::Scheduled),
            notes: self.notes.unwrap_or_default(),
        })
    }
}
