mod common;

use common::{connected_gateway, standard_listing, ScriptedTransport};
use dskylink::gateway::GatewayError;
use dskylink::Gateway;
use serde_json::json;

#[test]
fn test_discovery_partitions_commands_and_telemetry() {
    let (gateway, _) = connected_gateway();
    let maps = gateway.discover().unwrap();

    // Flight-control and autopilot actions are commands, never readable values
    assert_eq!(maps.command_id("throttleZero"), Some("f.throttleZero"));
    assert!(maps.telemetry_id("throttleZero").is_none());
    assert_eq!(maps.command_id("smartassoff"), Some("mj.smartassoff"));
    assert_eq!(maps.command_id("setThrottle"), Some("v.setThrottle"));

    // Body and target scoped values get prefixed names
    assert_eq!(maps.telemetry_id("body_name"), Some("b.name"));
    assert_eq!(maps.telemetry_id("target_mass"), Some("tar.o.mass"));
    assert_eq!(maps.telemetry_id("altitude"), Some("v.altitude"));
}

#[test]
fn test_discovery_when_simulator_offline() {
    let gateway = Gateway::with_transport(ScriptedTransport::offline());

    let result = gateway.discover();
    assert!(matches!(result, Err(GatewayError::SimulatorUnreachable { .. })));
    assert!(!gateway.is_discovered());
}

#[test]
fn test_first_read_triggers_discovery() {
    let (gateway, transport) = connected_gateway();
    transport.set_value("altitude", json!(76543.2));

    assert!(!gateway.is_discovered());
    let value = gateway.get_telemetry("altitude", None).unwrap();

    assert_eq!(value, json!(76543.2));
    assert_eq!(transport.queries(), vec!["api=a.api", "altitude=v.altitude"]);

    // Mappings persist; later reads are a single round trip each
    gateway.get_telemetry("altitude", None).unwrap();
    assert_eq!(transport.queries().len(), 3);
}

#[test]
fn test_get_telemetry_scoped_to_body() {
    let (gateway, transport) = connected_gateway();
    transport.set_value("body_name", json!("Mun"));

    let value = gateway.get_telemetry("body_name", Some(2)).unwrap();

    assert_eq!(value, json!("Mun"));
    assert_eq!(transport.last_query().unwrap(), "body_name=b.name[2]");
}

#[test]
fn test_unknown_telemetry_is_unavailable() {
    let (gateway, _) = connected_gateway();

    let result = gateway.get_telemetry("warpRate", None);
    assert!(matches!(result, Err(GatewayError::TelemetryUnavailable(name)) if name == "warpRate"));
}

#[test]
fn test_rediscovery_replaces_mappings() {
    let (gateway, transport) = connected_gateway();
    transport.set_value("altitude", json!(1000.0));

    gateway.discover().unwrap();
    assert!(gateway.get_telemetry("altitude", None).is_ok());

    let mut listing = standard_listing();
    listing["vessel"]
        .as_array_mut()
        .unwrap()
        .retain(|entry| entry["apistring"] != "v.altitude");
    transport.set_listing(listing);
    gateway.discover().unwrap();

    let result = gateway.get_telemetry("altitude", None);
    assert!(matches!(result, Err(GatewayError::TelemetryUnavailable(_))));
    assert!(gateway.get_telemetry("missionTime", None).is_err_and(|e| {
        !matches!(e, GatewayError::TelemetryUnavailable(_))
    }));
}

#[test]
fn test_snapshot_survives_rediscovery() {
    let (gateway, transport) = connected_gateway();
    let before = gateway.discover().unwrap();

    transport.set_listing(json!({ "vessel": [{ "apistring": "v.altitude" }] }));
    let after = gateway.discover().unwrap();

    assert!(before.telemetry_id("missionTime").is_some());
    assert!(after.telemetry_id("missionTime").is_none());
}

#[test]
fn test_transport_failure_during_read() {
    let (gateway, transport) = connected_gateway();
    gateway.discover().unwrap();
    transport.set_online(false);

    match gateway.get_telemetry("altitude", None) {
        Err(GatewayError::SimulatorUnreachable { query, .. }) => {
            assert_eq!(query, "altitude=v.altitude");
        }
        other => panic!("Expected SimulatorUnreachable, got {:?}", other),
    }
}

#[test]
fn test_response_without_requested_key_is_decode_error() {
    let (gateway, _) = connected_gateway();

    // No value scripted: the simulator answers with an empty object
    let result = gateway.get_telemetry("altitude", None);
    assert!(matches!(result, Err(GatewayError::Decode { .. })));
}

#[test]
fn test_non_numeric_value_is_decode_error() {
    let (gateway, transport) = connected_gateway();
    transport.set_value("altitude", json!("high"));

    match gateway.get_number("altitude") {
        Err(GatewayError::Decode { query, .. }) => assert_eq!(query, "altitude=v.altitude"),
        other => panic!("Expected Decode, got {:?}", other),
    }
}

#[test]
fn test_set_throttle_magnitudes() {
    let (gateway, transport) = connected_gateway();

    gateway.set_throttle(0.0).unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=v.setThrottle[0]");

    gateway.set_throttle(50.0).unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=v.setThrottle[0.5]");

    gateway.set_throttle(100.0).unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=v.setThrottle[1]");
}

#[test]
fn test_throttle_out_of_range_is_clamped() {
    let (gateway, transport) = connected_gateway();

    gateway.set_throttle(150.0).unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=v.setThrottle[1]");

    gateway.set_throttle(-20.0).unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=v.setThrottle[0]");
}

#[test]
fn test_non_finite_throttle_is_rejected() {
    let (gateway, transport) = connected_gateway();

    for percent in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = gateway.set_throttle(percent);
        assert!(matches!(result, Err(GatewayError::InvalidArgument { .. })), "{}", percent);
    }
    assert!(transport.queries().is_empty());
}

#[test]
fn test_cut_throttle_and_autopilot_commands() {
    let (gateway, transport) = connected_gateway();

    gateway.cut_throttle().unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=f.throttleZero");

    gateway.set_autopilot_mode("prograde").unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=mj.prograde");

    gateway.disable_autopilot().unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=mj.smartassoff");
}

#[test]
fn test_unknown_command_is_unavailable() {
    let (gateway, transport) = connected_gateway();

    let result = gateway.set_autopilot_mode("normalplus");
    assert!(matches!(result, Err(GatewayError::CommandUnavailable(name)) if name == "normalplus"));

    // Only the discovery request went out
    assert_eq!(transport.queries(), vec!["api=a.api"]);
}

#[test]
fn test_maneuver_node_arguments() {
    let (gateway, transport) = connected_gateway();

    gateway.add_maneuver_node(1234567.891, [10.0, -5.5, 0.123]).unwrap();
    assert_eq!(
        transport.last_query().unwrap(),
        "command=o.addManeuverNode[1234567.89,10,-5.5,0.12]"
    );

    gateway.update_maneuver_node(1234567.891, [10.0, -5.5, 0.123]).unwrap();
    assert_eq!(
        transport.last_query().unwrap(),
        "command=o.updateManeuverNode[0,1234567.89,10,-5.5,0.12]"
    );

    // Exact ties round to even, like the register formatters
    gateway.add_maneuver_node(100.125, [0.125, 0.0, -0.001]).unwrap();
    assert_eq!(transport.last_query().unwrap(), "command=o.addManeuverNode[100.12,0.12,0,0]");
}

#[test]
fn test_command_fails_when_simulator_goes_away() {
    let (gateway, transport) = connected_gateway();
    gateway.discover().unwrap();
    transport.set_online(false);

    assert!(matches!(gateway.cut_throttle(), Err(GatewayError::SimulatorUnreachable { .. })));
}

#[test]
fn test_check_connection() {
    let (gateway, transport) = connected_gateway();
    assert!(gateway.check_connection());
    assert_eq!(transport.queries(), vec!["paused=p.paused"]);
    assert!(!gateway.is_discovered());

    transport.set_online(false);
    assert!(!gateway.check_connection());
}

#[test]
fn test_sorted_capability_report() {
    let (gateway, _) = connected_gateway();
    let maps = gateway.capabilities().unwrap();

    assert_eq!(maps.sorted_commands(), vec!["prograde", "retrograde", "sas", "setThrottle", "smartassoff", "throttleZero"]);
    let telemetry = maps.sorted_telemetry();
    assert!(telemetry.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(telemetry.contains(&"paused"));
}
