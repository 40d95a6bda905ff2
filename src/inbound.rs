//! Wire ⇄ form conversion for a single inbound.
//!
//! [`parse`] turns a stored (possibly partial or hand-edited) inbound into an
//! editable [`InboundForm`]; [`serialize`] turns a submitted form back into an
//! Xray inbound. Neither direction fails: unusable values are replaced by
//! template defaults and the substitution is logged.

use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, warn};

use crate::form::{InboundForm, defaults};
use crate::protocol::{Network, Protocol, Security};
use crate::xray::reader::{NULL, array_at, assign, object_at, str_at};
use crate::xray::{
    Inbound, Port, ProtocolSettings, SecuritySettings, Sniffing, Sockopt, StreamSettings,
    TransportSettings, non_blank,
};

/// Reads an enum field, falling back to `fallback` when it is missing or
/// unrecognized. Only unrecognized values are worth a warning.
fn enum_or_default<T>(obj: &Value, key: &'static str, fallback: T) -> T
where
    T: FromStr<Err = crate::protocol::UnknownVariant> + std::fmt::Display + Copy,
{
    let Some(raw) = str_at(obj, key) else {
        debug!(field = key, fallback = %fallback, "field missing, using default");
        return fallback;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(err) => {
            warn!(%err, field = key, fallback = %fallback, "unrecognized value replaced by default");
            fallback
        }
    }
}

pub fn parse(wire: &Value) -> InboundForm {
    let protocol = enum_or_default(wire, "protocol", Protocol::Vless);
    let mut form = defaults(protocol);

    assign(&mut form.tag, str_at(wire, "tag"));
    assign(&mut form.listen, str_at(wire, "listen"));
    assign(&mut form.port, str_at(wire, "port"));

    let settings = object_at(wire, "settings").unwrap_or(&NULL);
    if protocol.carries_clients() {
        let clients = array_at(settings, "clients").map_or(0, <[Value]>::len);
        if clients > 0 {
            debug!(clients, "stored clients are not part of the form");
        }
    }
    ProtocolSettings::from_wire(protocol, settings).apply_to_form(&mut form);

    if let Some(sniffing) = object_at(wire, "sniffing") {
        Sniffing::apply_wire_to_form(sniffing, &mut form);
    }

    let stream = object_at(wire, "streamSettings").filter(|_| protocol.has_stream_settings());
    if let Some(stream) = stream {
        let network = enum_or_default(stream, "network", Network::Tcp);
        let security = enum_or_default(stream, "security", Security::None);

        TransportSettings::from_wire(network, stream).apply_to_form(&mut form);
        match SecuritySettings::from_wire(security, stream) {
            Some(security_settings) => security_settings.apply_to_form(&mut form),
            None => form.stream_security = Security::None,
        }
        if let Some(sockopt) = object_at(stream, "sockopt") {
            Sockopt::from_wire(sockopt).apply_to_form(&mut form);
        }
    }

    debug!(
        tag = %form.tag,
        protocol = %form.protocol,
        network = %form.stream_network,
        security = %form.stream_security,
        "parsed inbound"
    );
    form
}

/// Builds the Xray inbound for a submitted form.
///
/// The form is expected to be validated by the caller: an empty tag or an
/// unusable port is emitted as-is (`""` / `0`).
pub fn serialize(form: &InboundForm) -> Inbound {
    let settings = ProtocolSettings::from_form(form);
    let stream_settings = form
        .protocol
        .has_stream_settings()
        .then(|| StreamSettings::from_form(form));

    debug!(
        tag = %form.tag,
        protocol = %form.protocol,
        stream = stream_settings.is_some(),
        "serializing inbound"
    );

    Inbound {
        tag: form.tag.clone(),
        listen: non_blank(&form.listen),
        port: Port::from_form(&form.port),
        protocol: settings.protocol(),
        settings,
        stream_settings,
        sniffing: Sniffing::from_form(form),
    }
}

pub fn serialize_value(form: &InboundForm) -> Result<Value, serde_json::Error> {
    serde_json::to_value(serialize(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::HeaderEntry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scenario_a_wire() -> Value {
        json!({
            "tag": "in1",
            "port": 443,
            "protocol": "vless",
            "settings": { "decryption": "none" },
            "streamSettings": {
                "network": "ws",
                "security": "tls",
                "wsSettings": { "path": "/x", "headers": { "Host": "example.com" } },
                "tlsSettings": { "serverName": "example.com" },
            },
        })
    }

    #[test]
    fn parses_ws_tls_inbound() {
        let form = parse(&scenario_a_wire());
        assert_eq!(form.tag, "in1");
        assert_eq!(form.port, "443");
        assert_eq!(form.protocol, Protocol::Vless);
        assert_eq!(form.vless_decryption, "none");
        assert_eq!(form.stream_network, Network::Ws);
        assert_eq!(form.stream_security, Security::Tls);
        assert_eq!(form.ws_path, "/x");
        assert_eq!(form.ws_host, "example.com");
        assert_eq!(form.ws_headers, vec![HeaderEntry::default()]);
        assert_eq!(form.tls_server_name, "example.com");
        assert!(form.sniffing_enabled);
        assert!(!form.sockopt_enabled);
    }

    #[test]
    fn reserializes_ws_tls_inbound() {
        let value = serialize_value(&parse(&scenario_a_wire())).unwrap();
        assert_eq!(
            value,
            json!({
                "tag": "in1",
                "port": 443,
                "protocol": "vless",
                "settings": { "clients": [], "decryption": "none" },
                "streamSettings": {
                    "network": "ws",
                    "security": "tls",
                    "wsSettings": {
                        "acceptProxyProtocol": false,
                        "path": "/x",
                        "headers": { "Host": "example.com" },
                    },
                    "tlsSettings": { "serverName": "example.com", "rejectUnknownSni": false },
                },
                "sniffing": {
                    "enabled": true,
                    "destOverride": ["http", "tls"],
                    "routeOnly": false,
                    "metadataOnly": false,
                },
            })
        );
    }

    #[test]
    fn unknown_protocol_falls_back_to_vless() {
        let form = parse(&json!({ "tag": "x", "protocol": "wireguard", "port": "1" }));
        assert_eq!(form.protocol, Protocol::Vless);
        assert_eq!(form.tag, "x");
    }

    #[test]
    fn unknown_network_and_security_fall_back() {
        let form = parse(&json!({
            "protocol": "trojan",
            "streamSettings": { "network": "xhttp", "security": "xtls" },
        }));
        assert_eq!(form.stream_network, Network::Tcp);
        assert_eq!(form.stream_security, Security::None);
    }

    #[test]
    fn empty_object_parses_to_template() {
        assert_eq!(parse(&json!({})), defaults(Protocol::Vless));
        assert_eq!(parse(&json!("not an object")), defaults(Protocol::Vless));
    }

    #[test]
    fn string_port_is_preserved() {
        let form = parse(&json!({ "protocol": "socks", "port": "env:SOCKS_PORT" }));
        assert_eq!(form.port, "env:SOCKS_PORT");
        let value = serialize_value(&form).unwrap();
        assert_eq!(value["port"], json!("env:SOCKS_PORT"));
    }

    #[test]
    fn http_and_socks_have_no_stream_settings() {
        for protocol in [Protocol::Http, Protocol::Socks] {
            let mut form = defaults(protocol);
            form.stream_network = Network::Ws;
            form.stream_security = Security::Reality;
            form.sockopt_enabled = true;
            let value = serialize_value(&form).unwrap();
            assert!(value.get("streamSettings").is_none(), "{protocol}");
        }

        let form = parse(&json!({
            "protocol": "http",
            "streamSettings": { "network": "grpc", "grpcSettings": { "serviceName": "s" } },
        }));
        assert_eq!(form.stream_network, Network::Tcp);
        assert_eq!(form.grpc_service_name, "");
    }

    #[test]
    fn sockopt_block_enables_toggle_on_parse() {
        let form = parse(&json!({
            "protocol": "vmess",
            "streamSettings": { "network": "tcp", "sockopt": { "mark": 1 } },
        }));
        assert!(form.sockopt_enabled);
        assert_eq!(form.sockopt_mark, "1");
    }

    #[test]
    fn sniffing_absent_keeps_enabled_default() {
        let form = parse(&json!({ "protocol": "vmess" }));
        assert!(form.sniffing_enabled);
        let form = parse(&json!({ "protocol": "vmess", "sniffing": { "enabled": false } }));
        assert!(!form.sniffing_enabled);
        assert_eq!(form.sniffing_destinations, vec!["http", "tls"]);
    }

    #[test]
    fn stored_clients_are_not_round_tripped() {
        let form = parse(&json!({
            "protocol": "vmess",
            "settings": { "clients": [{ "id": "5783a3e7-e373-51cd-8642-c83782b807c5" }] },
        }));
        let value = serialize_value(&form).unwrap();
        assert_eq!(value["protocol"], json!("vmess"));
        assert_eq!(value["settings"], json!({ "clients": [] }));
    }

    #[test]
    fn blank_listen_and_port_defaults() {
        let mut form = defaults(Protocol::Vmess);
        form.listen = "  ".to_string();
        let value = serialize_value(&form).unwrap();
        assert!(value.get("listen").is_none());
        assert_eq!(value["port"], json!(0));
        assert_eq!(value["tag"], json!(""));
    }
}
