//! Attribute lookup with typed defaults
//!
//! Attributes are the only way per-board and per-element customisation gets
//! into the panel generator. Absent attributes yield the caller's default;
//! present-but-unparseable ones are errors.

use super::types::{Attribute, Board, Element};
use crate::error::{PanelError, PanelResult};

/// Anything carrying a list of name/value attributes
pub trait AttributeCarrier {
    fn attributes(&self) -> &[Attribute];

    /// Raw attribute value, if present
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }
}

impl AttributeCarrier for Element {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl AttributeCarrier for Board {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// String value or default. Whitespace is not trimmed, so an attribute can
/// hold just whitespace if someone really wants that.
pub fn attribute_string<C: AttributeCarrier + ?Sized>(c: &C, name: &str, def: &str) -> String {
    c.attribute(name).unwrap_or(def).to_string()
}

pub fn attribute_float<C: AttributeCarrier + ?Sized>(c: &C, name: &str, def: f64) -> PanelResult<f64> {
    match c.attribute(name) {
        None => Ok(def),
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map_err(|_| parse_error(name, value, "floating-point")),
    }
}

pub fn attribute_int<C: AttributeCarrier + ?Sized>(c: &C, name: &str, def: i64) -> PanelResult<i64> {
    match c.attribute(name) {
        None => Ok(def),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| parse_error(name, value, "integer")),
    }
}

/// Accepts `yes`/`true` and `no`/`false`, case insensitive
pub fn attribute_bool<C: AttributeCarrier + ?Sized>(c: &C, name: &str, def: bool) -> PanelResult<bool> {
    let Some(value) = c.attribute(name) else {
        return Ok(def);
    };
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(parse_error(name, value, "boolean")),
    }
}

fn parse_error(name: &str, value: &str, expected: &'static str) -> PanelError {
    PanelError::TypedAttributeParse {
        name: name.to_string(),
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(attrs: &[(&str, &str)]) -> Element {
        Element {
            name: "POT1".to_string(),
            attributes: attrs.iter().map(|(k, v)| Attribute::new(*k, *v)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_string_default() {
        let elem = element(&[("PANEL_LEGEND", "CUTOFF")]);
        assert_eq!(attribute_string(&elem, "PANEL_LEGEND", "x"), "CUTOFF");
        assert_eq!(attribute_string(&elem, "PANEL_LEGEND_LOCATION", "above"), "above");
    }

    #[test]
    fn test_float() {
        let elem = element(&[("PANEL_DRILL_MM", "6.5"), ("BAD", "six")]);
        assert_eq!(attribute_float(&elem, "PANEL_DRILL_MM", -1.0).unwrap(), 6.5);
        assert_eq!(attribute_float(&elem, "ABSENT", -1.0).unwrap(), -1.0);

        let err = attribute_float(&elem, "BAD", 0.0).unwrap_err();
        match err {
            PanelError::TypedAttributeParse { name, value, .. } => {
                assert_eq!(name, "BAD");
                assert_eq!(value, "six");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_int() {
        let elem = element(&[("PANEL_LEGEND_TICKS_COUNT", "5"), ("FRAC", "5.5")]);
        assert_eq!(attribute_int(&elem, "PANEL_LEGEND_TICKS_COUNT", 11).unwrap(), 5);
        assert_eq!(attribute_int(&elem, "ABSENT", 11).unwrap(), 11);
        assert!(attribute_int(&elem, "FRAC", 11).is_err());
    }

    #[test]
    fn test_bool() {
        let elem = element(&[("A", "Yes"), ("B", " FALSE "), ("C", "true"), ("D", "maybe")]);
        assert!(attribute_bool(&elem, "A", false).unwrap());
        assert!(!attribute_bool(&elem, "B", true).unwrap());
        assert!(attribute_bool(&elem, "C", false).unwrap());
        assert!(attribute_bool(&elem, "ABSENT", true).unwrap());
        assert!(matches!(
            attribute_bool(&elem, "D", false),
            Err(PanelError::TypedAttributeParse { .. })
        ));
    }
}
