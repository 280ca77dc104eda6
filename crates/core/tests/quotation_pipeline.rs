//! End-to-end: a direct-route LCL quote composed through the wizard,
//! built into a document, and checked against the aggregation and
//! formatting contracts.

use rust_decimal::Decimal;

use freightdesk_core::format::grouped_2dp;
use freightdesk_core::{
    build_document, ChargeKind, ChargeLine, ChargeSection, CompanyInfo, DirectRoute, FreightMode,
    RouteOption, RoutePlan, RoutingCategory, WizardEvent, WizardSession,
};

fn company() -> CompanyInfo {
    CompanyInfo {
        name: "Ceylon Freight Lines".to_string(),
        address: "141 Marine Drive, Colombo 03".to_string(),
        phone: "+94 11 234 5678".to_string(),
        logo_path: None,
    }
}

#[test]
fn direct_lcl_quote_flows_through_the_whole_pipeline() {
    let mut session = WizardSession::new();
    session.select(FreightMode::SeaExportLcl, RoutingCategory::Direct);
    session.apply(WizardEvent::Next).expect("mode -> route");

    session.state.meta.quote_number = "Q-2025-11-36".to_string();
    session.state.route_plan = RoutePlan::Direct(DirectRoute {
        port_of_loading: "CMB".to_string(),
        port_of_discharge: "SIN".to_string(),
        options: vec![RouteOption {
            carrier: "WHL".to_string(),
            incoterm: "FOB".to_string(),
            cbm: Decimal::new(450, 2),
            total_pieces: 10,
            ..RouteOption::default()
        }],
    });
    session.apply(WizardEvent::Next).expect("route -> charges");

    session.add_charge(ChargeLine {
        name: "W/M".to_string(),
        unit_type: "per CBM".to_string(),
        number_of_units: Decimal::ONE,
        amount: Decimal::new(2_300, 2),
        currency: "USD".to_string(),
        carrier: "WHL".to_string(),
        transit_time: "10".to_string(),
        frequency: "WEEKLY".to_string(),
        kind: ChargeKind::Freight,
        ..ChargeLine::default()
    });
    session.add_charge(ChargeLine {
        name: "DO CHARGES".to_string(),
        unit_type: "Per BL".to_string(),
        number_of_units: Decimal::ONE,
        amount: Decimal::new(1_800_000, 2),
        currency: "LKR".to_string(),
        section: ChargeSection::Destination,
        kind: ChargeKind::Handling,
        ..ChargeLine::default()
    });
    session.add_charge(ChargeLine {
        name: "Handling Charge".to_string(),
        unit_type: "Per Shipment".to_string(),
        number_of_units: Decimal::ONE,
        amount: Decimal::new(2_500, 2),
        currency: "USD".to_string(),
        kind: ChargeKind::Handling,
        ..ChargeLine::default()
    });

    let outcome = session.apply(WizardEvent::GeneratePdf).expect("terminal generate");
    assert!(!outcome.actions.is_empty());

    let document = build_document(&session.state, &company(), None);

    assert_eq!(
        document.other_charges.get("lkr").expect("lkr bucket").total,
        Decimal::new(1_800_000, 2)
    );
    assert_eq!(
        document.other_charges.get("usd").expect("usd bucket").total,
        Decimal::new(2_500, 2)
    );

    assert_eq!(document.freight_charges.len(), 1);
    let row = &document.freight_charges[0];
    assert_eq!(row.carrier, "WHL");
    assert_eq!(grouped_2dp(row.rate), "23.00");
    assert_eq!(row.transit_time, "10");
    assert_eq!(row.frequency, "WEEKLY");
    assert_eq!(row.route_label, "DIRECT");

    assert_eq!(document.shipment.pol, "CMB");
    assert_eq!(document.shipment.pod, "SIN");
    assert_eq!(document.shipment.delivery_terms, "FOB");
}
