//! Form field definitions: labels, bounds, defaults and explanations.

use super::record::Column;

/// Numeric type accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
}

/// How the field is presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    NumberInput,
    Slider,
}

/// Static definition of one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub column: Column,
    pub label: &'static str,
    pub kind: FieldKind,
    pub widget: WidgetKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: f64,
    pub step: f64,
    /// Name shown in the feature explanation panel
    pub explanation_title: &'static str,
    pub explanation: &'static str,
}

/// The six form fields in record order.
pub const FORM_FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        column: Column::Age,
        label: "Age",
        kind: FieldKind::Integer,
        widget: WidgetKind::NumberInput,
        min: Some(0.0),
        max: Some(150.0),
        default: 30.0,
        step: 1.0,
        explanation_title: "Age",
        explanation: "Age of the individual in years.",
    },
    FieldSpec {
        column: Column::SystolicBp,
        label: "Systolic BP",
        kind: FieldKind::Integer,
        widget: WidgetKind::Slider,
        min: Some(80.0),
        max: Some(220.0),
        default: 120.0,
        step: 1.0,
        explanation_title: "Systolic BP",
        explanation: "Systolic Blood Pressure measured in mm Hg.",
    },
    FieldSpec {
        column: Column::DiastolicBp,
        label: "Diastolic BP",
        kind: FieldKind::Integer,
        widget: WidgetKind::NumberInput,
        min: Some(40.0),
        max: Some(211.0),
        default: 80.0,
        step: 1.0,
        explanation_title: "Diastolic BP",
        explanation: "Diastolic Blood Pressure measured in mm Hg.",
    },
    FieldSpec {
        column: Column::Bs,
        label: "Blood Sugar",
        kind: FieldKind::Decimal,
        widget: WidgetKind::NumberInput,
        min: None,
        max: None,
        default: 0.0,
        step: 0.01,
        explanation_title: "Blood Sugar",
        explanation: "Blood sugar level; categories might be Normal, High, or Low.",
    },
    FieldSpec {
        column: Column::BodyTemp,
        label: "Body Temperature (°F)",
        kind: FieldKind::Integer,
        widget: WidgetKind::Slider,
        min: Some(95.0),
        max: Some(106.0),
        default: 98.0,
        step: 1.0,
        explanation_title: "Body Temperature",
        explanation: "Body temperature in degrees Fahrenheit (°F).",
    },
    FieldSpec {
        column: Column::HeartRate,
        label: "Heart Rate",
        kind: FieldKind::Integer,
        widget: WidgetKind::NumberInput,
        min: Some(30.0),
        max: Some(150.0),
        default: 70.0,
        step: 1.0,
        explanation_title: "Heart Rate",
        explanation: "Heart rate measured in beats per minute.",
    },
];

/// Look up the field definition for a column.
#[must_use]
pub fn field_spec(column: Column) -> &'static FieldSpec {
    &FORM_FIELDS[column.index()]
}

impl FieldSpec {
    /// Bring a value into the field's domain: clamp to bounds, round integers.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let mut v = match self.kind {
            FieldKind::Integer => value.round(),
            FieldKind::Decimal => value,
        };
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }

    /// Parse user-entered text. Returns `None` for text the field cannot hold.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        let value = match self.kind {
            FieldKind::Integer => text.parse::<i64>().ok()? as f64,
            FieldKind::Decimal => text.parse::<f64>().ok()?,
        };
        value.is_finite().then(|| self.normalize(value))
    }

    /// Whether `c` may be typed into this field.
    #[must_use]
    pub fn accepts_char(&self, c: char) -> bool {
        match c {
            '0'..='9' => true,
            '-' => self.min.map_or(true, |m| m < 0.0),
            '.' => self.kind == FieldKind::Decimal,
            _ => false,
        }
    }

    /// Format a value the way the widget displays it.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match self.kind {
            FieldKind::Integer => format!("{}", value.round() as i64),
            FieldKind::Decimal => format!("{value:.2}"),
        }
    }

    /// Range hint, e.g. "80-220".
    #[must_use]
    pub fn range_hint(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{min}-{max}"),
            (Some(min), None) => format!(">= {min}"),
            (None, Some(max)) => format!("<= {max}"),
            (None, None) => "any value".to_string(),
        }
    }
}
