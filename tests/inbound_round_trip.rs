use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use xp_inbound_form::form::{AccountForm, CertificateForm, HeaderEntry};
use xp_inbound_form::headers::{header_map_to_list, list_to_header_map};
use xp_inbound_form::multi_value::{join_multi_value, split_multi_value};
use xp_inbound_form::protocol::{Network, Protocol, Security};
use xp_inbound_form::prune::is_empty_value;
use xp_inbound_form::{defaults, parse, serialize_value};

fn ws_tls_wire() -> Value {
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

/// Every key below `value` except the `clients` placeholder holds something.
fn assert_no_empty_fields(path: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let here = format!("{path}.{k}");
                if k != "clients" {
                    assert!(!is_empty_value(v), "empty field at {here}");
                }
                assert_no_empty_fields(&here, v);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                assert_no_empty_fields(&format!("{path}[{i}]"), v);
            }
        }
        _ => {}
    }
}

#[test]
fn ws_tls_inbound_parses_into_form_fields() {
    let form = parse(&ws_tls_wire());
    assert_eq!(form.ws_path, "/x");
    assert_eq!(form.ws_host, "example.com");
    assert_eq!(form.tls_server_name, "example.com");
    assert_eq!(form.stream_network, Network::Ws);
    assert_eq!(form.stream_security, Security::Tls);
}

#[test]
fn ws_tls_form_reserializes_without_other_transports() {
    let value = serialize_value(&parse(&ws_tls_wire())).unwrap();
    let stream = &value["streamSettings"];
    assert_eq!(stream["wsSettings"]["path"], json!("/x"));
    assert!(stream.get("tcpSettings").is_none());
}

#[test]
fn reality_server_names_serialize_as_list() {
    let mut form = defaults(Protocol::Vless);
    form.stream_security = Security::Reality;
    form.reality_server_names = "a.com\nb.com".to_string();
    let value = serialize_value(&form).unwrap();
    assert_eq!(
        value["streamSettings"]["realitySettings"]["serverNames"],
        json!(["a.com", "b.com"])
    );
}

#[test]
fn disabled_sockopt_is_never_emitted() {
    let mut form = defaults(Protocol::Trojan);
    form.sockopt_enabled = false;
    form.sockopt_accept_proxy_protocol = true;
    form.sockopt_tcp_fast_open = true;
    form.sockopt_mark = "255".to_string();
    form.sockopt_tproxy = "tproxy".to_string();
    form.sockopt_tcp_congestion = "bbr".to_string();
    let value = serialize_value(&form).unwrap();
    assert!(value["streamSettings"].get("sockopt").is_none());

    form.sockopt_enabled = true;
    let value = serialize_value(&form).unwrap();
    assert_eq!(value["streamSettings"]["sockopt"]["mark"], json!(255));
}

#[test]
fn disabled_sniffing_collapses_to_enabled_false() {
    let mut form = defaults(Protocol::Vmess);
    form.sniffing_enabled = false;
    form.sniffing_destinations = vec!["quic".to_string(), "fakedns".to_string()];
    form.sniffing_metadata_only = true;
    let value = serialize_value(&form).unwrap();
    assert_eq!(value["sniffing"], json!({ "enabled": false }));
}

#[test]
fn shadowsocks_settings_carry_no_foreign_fields() {
    let mut form = defaults(Protocol::Shadowsocks);
    form.vless_decryption = "none".to_string();
    form.fallbacks = vec![xp_inbound_form::form::FallbackForm {
        dest: "80".to_string(),
        ..Default::default()
    }];
    form.accounts[0].user = "u".to_string();
    form.http_allow_transparent = true;
    form.socks_udp = true;
    let value = serialize_value(&form).unwrap();
    let settings = value["settings"].as_object().unwrap();
    let mut keys: Vec<&str> = settings.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["clients", "method", "network"]);
}

#[test]
fn every_network_emits_only_its_own_object() {
    for network in Network::ALL {
        let mut form = defaults(Protocol::Vless);
        form.stream_network = network;
        let value = serialize_value(&form).unwrap();
        let stream = value["streamSettings"].as_object().unwrap();
        let transport_keys: Vec<&str> = stream
            .keys()
            .map(String::as_str)
            .filter(|k| k.ends_with("Settings"))
            .collect();
        assert_eq!(transport_keys, vec![network.settings_key()], "{network}");
        assert_eq!(stream["network"], json!(network.as_str()));
    }
}

#[test]
fn serialized_inbounds_carry_no_empty_fields() {
    for protocol in Protocol::ALL {
        for network in Network::ALL {
            for security in Security::ALL {
                let mut form = defaults(protocol);
                form.tag = format!("{protocol}-{network}-{security}");
                form.stream_network = network;
                form.stream_security = security;
                form.sockopt_enabled = true;
                form.accounts = vec![
                    AccountForm {
                        user: "u".to_string(),
                        pass: String::new(),
                    },
                    AccountForm::default(),
                ];
                form.tcp_header_type = "http".to_string();
                form.tls_extra_certificates = vec![CertificateForm::default()];
                let value = serialize_value(&form).unwrap();
                assert_no_empty_fields("", &value);
            }
        }
    }
}

#[test]
fn wire_survives_parse_serialize_parse() {
    let wire = json!({
        "tag": "grpc-reality",
        "listen": "0.0.0.0",
        "port": 8443,
        "protocol": "trojan",
        "settings": {
            "clients": [],
            "fallbacks": [{ "dest": 80, "xver": 1 }],
        },
        "streamSettings": {
            "network": "grpc",
            "security": "reality",
            "grpcSettings": { "serviceName": "tun", "multiMode": true },
            "realitySettings": {
                "show": false,
                "dest": "www.example.com:443",
                "serverNames": ["www.example.com"],
                "privateKey": "key",
                "shortIds": ["0123456789abcdef"],
                "settings": { "publicKey": "pub", "fingerprint": "chrome" },
            },
            "sockopt": { "tcpFastOpen": true, "tcpcongestion": "bbr" },
        },
        "sniffing": { "enabled": true, "destOverride": ["http", "tls", "quic"], "routeOnly": true },
    });

    let form = parse(&wire);
    let first = serialize_value(&form).unwrap();
    let second = serialize_value(&parse(&first)).unwrap();
    assert_eq!(second, first);

    assert_eq!(first["listen"], json!("0.0.0.0"));
    assert_eq!(first["settings"]["fallbacks"], json!([{ "dest": 80, "xver": 1 }]));
    assert_eq!(
        first["streamSettings"]["grpcSettings"],
        json!({ "serviceName": "tun", "multiMode": true })
    );
    assert_eq!(
        first["streamSettings"]["realitySettings"]["settings"],
        json!({ "publicKey": "pub", "fingerprint": "chrome" })
    );
    assert_eq!(first["streamSettings"]["sockopt"]["tcpcongestion"], json!("bbr"));
    assert_eq!(first["sniffing"]["destOverride"], json!(["http", "tls", "quic"]));
}

#[test]
fn normalizing_keeps_operator_intent() {
    let wire = json!({
        "tag": "keep",
        "port": 443,
        "protocol": "vless",
        "settings": { "clients": [], "decryption": "none" },
        "streamSettings": {
            "network": "ws",
            "security": "tls",
            "wsSettings": { "path": "/ws", "headers": { "Host": ["a.com", "b.com"] } },
            "tlsSettings": {
                "certificates": [
                    { "certificate": ["PEM-A"], "key": ["KEY-A"] },
                    { "certificateFile": "/b.crt", "keyFile": "/b.key" },
                ],
            },
        },
    });
    let value = serialize_value(&parse(&wire)).unwrap();
    assert_eq!(
        value["streamSettings"]["wsSettings"]["headers"],
        json!({ "Host": ["a.com", "b.com"] })
    );
    assert_eq!(
        value["streamSettings"]["tlsSettings"]["certificates"],
        wire["streamSettings"]["tlsSettings"]["certificates"]
    );
}

#[test]
fn header_rows_round_trip_through_wire_map() {
    let rows = vec![
        HeaderEntry {
            name: "X-A".to_string(),
            value: "1".to_string(),
        },
        HeaderEntry {
            name: "X-B".to_string(),
            value: "2".to_string(),
        },
        HeaderEntry {
            name: "X-A".to_string(),
            value: "3".to_string(),
        },
    ];
    let map = list_to_header_map(&rows);
    let again = list_to_header_map(&header_map_to_list(map.as_ref()));
    assert_eq!(again, map);
}

#[test]
fn multi_value_round_trip() {
    let values = vec!["a.com".to_string(), "b.com".to_string()];
    assert_eq!(split_multi_value(&join_multi_value(&values)), values);
}
