//! Input record types for risk prediction.
//!
//! Column order matches the order the preprocessing transform was fitted on:
//! Age, SystolicBP, DiastolicBP, BS, BodyTemp, HeartRate.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// A named column of the input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Column {
    Age,
    #[serde(rename = "SystolicBP")]
    SystolicBp,
    #[serde(rename = "DiastolicBP")]
    DiastolicBp,
    #[serde(rename = "BS")]
    Bs,
    BodyTemp,
    HeartRate,
}

impl Column {
    /// All columns in the fixed record order.
    pub const ALL: [Column; 6] = [
        Column::Age,
        Column::SystolicBp,
        Column::DiastolicBp,
        Column::Bs,
        Column::BodyTemp,
        Column::HeartRate,
    ];

    /// Canonical column name as seen by the transform.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::SystolicBp => "SystolicBP",
            Self::DiastolicBp => "DiastolicBP",
            Self::Bs => "BS",
            Self::BodyTemp => "BodyTemp",
            Self::HeartRate => "HeartRate",
        }
    }

    /// Position of this column in the record.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Typed widget state captured when the user presses Predict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormInputs {
    /// Age in years
    pub age: i64,
    /// Systolic blood pressure in mmHg
    pub systolic_bp: i64,
    /// Diastolic blood pressure in mmHg
    pub diastolic_bp: i64,
    /// Blood sugar, passed through in whatever unit the artifacts expect
    pub bs: f64,
    /// Body temperature in °F
    pub body_temp: i64,
    /// Heart rate in beats per minute
    pub heart_rate: i64,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            age: 30,
            systolic_bp: 120,
            diastolic_bp: 80,
            bs: 0.0,
            body_temp: 98,
            heart_rate: 70,
        }
    }
}

impl FormInputs {
    /// Read a value by column.
    #[must_use]
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Age => self.age as f64,
            Column::SystolicBp => self.systolic_bp as f64,
            Column::DiastolicBp => self.diastolic_bp as f64,
            Column::Bs => self.bs,
            Column::BodyTemp => self.body_temp as f64,
            Column::HeartRate => self.heart_rate as f64,
        }
    }

    /// Write a value by column. Integer columns are rounded.
    pub fn set(&mut self, column: Column, value: f64) {
        let int = value.round() as i64;
        match column {
            Column::Age => self.age = int,
            Column::SystolicBp => self.systolic_bp = int,
            Column::DiastolicBp => self.diastolic_bp = int,
            Column::Bs => self.bs = value,
            Column::BodyTemp => self.body_temp = int,
            Column::HeartRate => self.heart_rate = int,
        }
    }
}

/// Single-row record handed to the preprocessing transform.
///
/// Values are stored in `Column::ALL` order, whatever order the widgets were
/// edited in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRecord {
    values: [f64; 6],
}

impl InputRecord {
    /// Assemble a record from the current widget values.
    #[must_use]
    pub fn from_inputs(inputs: &FormInputs) -> Self {
        let mut values = [0.0; 6];
        for column in Column::ALL {
            values[column.index()] = inputs.get(column);
        }
        Self { values }
    }

    /// Values in column order.
    #[must_use]
    pub fn values(&self) -> &[f64; 6] {
        &self.values
    }

    /// Column names in record order.
    #[must_use]
    pub fn column_names(&self) -> [&'static str; 6] {
        Column::ALL.map(Column::name)
    }

    /// Iterate `(column, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, f64)> + '_ {
        Column::ALL.iter().map(move |&c| (c, self.values[c.index()]))
    }
}

impl Serialize for InputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column.name(), &value)?;
        }
        map.end()
    }
}

/// Output of the preprocessing transform.
///
/// Opaque to the form handler; only classifiers read its contents.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_values() {
        let record = InputRecord::from_inputs(&FormInputs::default());
        assert_eq!(record.values(), &[30.0, 120.0, 80.0, 0.0, 98.0, 70.0]);
    }

    #[test]
    fn test_column_order_ignores_edit_order() {
        let mut a = FormInputs::default();
        a.heart_rate = 88;
        a.age = 41;
        a.bs = 7.5;

        let mut b = FormInputs::default();
        b.set(Column::Bs, 7.5);
        b.set(Column::Age, 41.0);
        b.set(Column::HeartRate, 88.0);

        let ra = InputRecord::from_inputs(&a);
        let rb = InputRecord::from_inputs(&b);
        assert_eq!(ra, rb);
        assert_eq!(
            ra.column_names(),
            ["Age", "SystolicBP", "DiastolicBP", "BS", "BodyTemp", "HeartRate"]
        );
        assert_eq!(ra.values(), &[41.0, 120.0, 80.0, 7.5, 98.0, 88.0]);
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = InputRecord::from_inputs(&FormInputs::default());
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(
            json,
            r#"{"Age":30.0,"SystolicBP":120.0,"DiastolicBP":80.0,"BS":0.0,"BodyTemp":98.0,"HeartRate":70.0}"#
        );
    }

    #[test]
    fn test_set_rounds_integer_columns() {
        let mut inputs = FormInputs::default();
        inputs.set(Column::BodyTemp, 100.6);
        inputs.set(Column::Bs, 6.25);
        assert_eq!(inputs.body_temp, 101);
        assert!((inputs.bs - 6.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_column_deserializes_from_canonical_name() {
        let c: Column = serde_json::from_str("\"SystolicBP\"").expect("parse");
        assert_eq!(c, Column::SystolicBp);
        assert_eq!(c.to_string(), "SystolicBP");
    }
}
