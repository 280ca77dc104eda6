//! Route shapes entered in the wizard.
//!
//! Stored route blobs come in two known shapes (direct and transit)
//! plus a multimodal placeholder. Anything else decodes into the
//! `Legacy` variant carrying the raw value, so an unknown shape is a
//! typed case rather than a silent absence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Carrier/measurement bundle attached to a route or a route segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteOption {
    pub carrier: String,
    pub incoterm: String,
    pub currency: String,
    pub cargo_type: String,
    pub equipment: String,
    pub units: u32,
    pub net_weight: Decimal,
    pub gross_weight: Decimal,
    pub cbm: Decimal,
    pub chargeable_weight: Decimal,
    pub total_pieces: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectRoute {
    pub port_of_loading: String,
    pub port_of_discharge: String,
    /// One export pass per option; the wizard tracks which is active.
    pub options: Vec<RouteOption>,
}

/// One leg between two consecutive waypoints of a transit route.
/// Segments carry carrier and rate detail only; shipment measurements
/// live in [`TransitRoute::measurements`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteSegment {
    pub from: String,
    pub to: String,
    pub options: Vec<RouteOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitRoute {
    pub port_of_loading: String,
    pub port_of_discharge: String,
    pub stops: Vec<String>,
    pub segments: Vec<RouteSegment>,
    /// Overall measurement bundle for the whole shipment. Known
    /// modeling gap: transit documents do not disaggregate
    /// measurements per leg.
    pub measurements: RouteOption,
}

impl TransitRoute {
    /// Ordered waypoint list `[origin, stops..., destination]`.
    pub fn waypoints(&self) -> Vec<String> {
        let mut points = Vec::with_capacity(self.stops.len() + 2);
        points.push(self.port_of_loading.clone());
        points.extend(self.stops.iter().cloned());
        points.push(self.port_of_discharge.clone());
        points
    }

    /// Rebuilds the segment list after a stop or endpoint change.
    /// Segment `i` spans waypoint `i` to `i + 1`; already-entered
    /// carrier options survive for every index that still exists.
    pub fn recompute_segments(&mut self) {
        let waypoints = self.waypoints();
        let needed = waypoints.len().saturating_sub(1);
        self.segments.truncate(needed);
        while self.segments.len() < needed {
            self.segments.push(RouteSegment::default());
        }
        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.from = waypoints[index].clone();
            segment.to = waypoints[index + 1].clone();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum RoutePlan {
    Direct(DirectRoute),
    Transit(TransitRoute),
    /// No concrete structure defined; kept so the category is
    /// representable, never normalized.
    Multimodal,
    /// Unknown or legacy stored shape, carried verbatim.
    Legacy { raw: serde_json::Value },
}

impl Default for RoutePlan {
    fn default() -> Self {
        Self::Direct(DirectRoute::default())
    }
}

impl RoutePlan {
    /// Display label used in the freight table's Route column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct(_) => "DIRECT",
            Self::Transit(_) => "TRANSIT",
            Self::Multimodal => "MULTIMODAL",
            Self::Legacy { .. } => "-",
        }
    }
}
