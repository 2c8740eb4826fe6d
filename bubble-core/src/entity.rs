use serde::{Deserialize, Serialize};

use crate::layout::PointF;

/// Weight used in place of missing, non-finite or sub-unit weights.
pub const FLOOR_WEIGHT: f64 = 1.0;

/// A weighted item to be drawn as a bubble (a token, a stock, ...).
///
/// `meta` is carried through the layout untouched; the renderer decides what
/// to do with it (symbol, logo, color).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<M = ()> {
    pub id: String,
    /// Comparable magnitude, e.g. market cap in a fixed currency.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(flatten)]
    pub meta: M,
}

impl Entity<()> {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight: Some(weight),
            meta: (),
        }
    }
}

impl<M> Entity<M> {
    pub fn with_meta(id: impl Into<String>, weight: Option<f64>, meta: M) -> Self {
        Self {
            id: id.into(),
            weight,
            meta,
        }
    }

    /// Weight as seen by the radius scaler: never below 1, never NaN/inf.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() => w.max(FLOOR_WEIGHT),
            _ => FLOOR_WEIGHT,
        }
    }
}

/// An entity with its computed bubble geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCircle<M = ()> {
    #[serde(flatten)]
    pub entity: Entity<M>,
    /// Rounded to one decimal place.
    pub radius: f64,
    pub center: PointF,
    /// Positioned by the fallback after the spiral search ran out; may overlap.
    pub fallback: bool,
    /// Position of the entity in the caller's input list.
    pub input_index: usize,
}

impl<M> PlacedCircle<M> {
    pub fn id(&self) -> &str {
        &self.entity.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_weight_passes_large_values() {
        assert_eq!(Entity::new("BTC", 1.2e12).effective_weight(), 1.2e12);
    }

    #[test]
    fn test_effective_weight_coerces_degenerate_values() {
        assert_eq!(Entity::new("a", 0.0).effective_weight(), 1.0);
        assert_eq!(Entity::new("b", -50.0).effective_weight(), 1.0);
        assert_eq!(Entity::new("c", 0.25).effective_weight(), 1.0);
        assert_eq!(Entity::new("d", f64::NAN).effective_weight(), 1.0);
        assert_eq!(Entity::new("e", f64::INFINITY).effective_weight(), 1.0);

        let missing: Entity = Entity::with_meta("f", None, ());
        assert_eq!(missing.effective_weight(), 1.0);
    }

    #[test]
    fn test_entity_reads_flattened_metadata() {
        let json = r##"{"id":"eth","weight":4.2e11,"symbol":"ETH","color":"#627eea"}"##;
        let e: Entity<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(json).unwrap();
        assert_eq!(e.id, "eth");
        assert_eq!(e.weight, Some(4.2e11));
        assert_eq!(e.meta["symbol"], "ETH");
        assert_eq!(e.meta["color"], "#627eea");
    }

    #[test]
    fn test_entity_weight_may_be_missing_or_null() {
        let e: Entity<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(r#"{"id":"x","weight":null}"#).unwrap();
        assert_eq!(e.weight, None);
        let e: Entity<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(r#"{"id":"y"}"#).unwrap();
        assert_eq!(e.weight, None);
    }
}
