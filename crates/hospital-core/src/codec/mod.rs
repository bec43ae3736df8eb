//! Text formats for moving appointments in and out of the registry

pub mod appointment_csv;

pub use appointment_csv::{
    export_csv, format_date_time, from_csv_line, import_csv, parse_date_time, to_csv_line,
};
