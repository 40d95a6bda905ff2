//! Flat, UI-bindable form state for one inbound.
//!
//! Every field always holds a concrete value. Only the subset matching the
//! selected protocol, network and security is meaningful at a time; the rest
//! keeps its default so it can be bound to a control without null checks.

use serde::{Deserialize, Serialize};

use crate::protocol::{
    HEADER_TYPE_NONE, Network, Protocol, SOCKS_AUTH_NOAUTH, SS_NETWORK_TCP_UDP,
    SS2022_METHOD_2022_BLAKE3_AES_128_GCM, Security, VLESS_DECRYPTION_NONE,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FallbackForm {
    pub dest: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Comma-separated ALPN list.
    pub alpn: String,
    pub xver: String,
}

/// One TLS certificate. Inline PEM is kept one line per row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateForm {
    pub certificate_file: String,
    pub key_file: String,
    pub certificate: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccountForm {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct InboundForm {
    pub tag: String,
    pub listen: String,
    pub port: String,
    pub protocol: Protocol,

    pub vless_decryption: String,
    pub fallbacks: Vec<FallbackForm>,
    pub ss_method: String,
    pub ss_password: String,
    pub ss_network: String,
    pub accounts: Vec<AccountForm>,
    pub http_allow_transparent: bool,
    pub socks_auth: String,
    pub socks_udp: bool,
    pub socks_ip: String,

    pub sniffing_enabled: bool,
    pub sniffing_destinations: Vec<String>,
    pub sniffing_route_only: bool,
    pub sniffing_metadata_only: bool,

    pub stream_network: Network,
    pub stream_security: Security,

    pub tcp_accept_proxy_protocol: bool,
    pub tcp_header_type: String,
    pub tcp_http_hosts: String,
    pub tcp_http_paths: String,
    pub tcp_http_version: String,
    pub tcp_http_method: String,
    pub tcp_http_headers: Vec<HeaderEntry>,
    pub tcp_http_response_version: String,
    pub tcp_http_response_status: String,
    pub tcp_http_response_reason: String,
    pub tcp_http_response_headers: Vec<HeaderEntry>,

    pub kcp_mtu: String,
    pub kcp_tti: String,
    pub kcp_uplink_capacity: String,
    pub kcp_downlink_capacity: String,
    pub kcp_congestion: bool,
    pub kcp_read_buffer_size: String,
    pub kcp_write_buffer_size: String,
    pub kcp_header_type: String,
    pub kcp_seed: String,

    pub ws_path: String,
    pub ws_host: String,
    pub ws_headers: Vec<HeaderEntry>,
    pub ws_accept_proxy_protocol: bool,

    pub http_hosts: String,
    pub http_path: String,
    pub http_method: String,
    pub http_headers: Vec<HeaderEntry>,

    pub quic_security: String,
    pub quic_key: String,
    pub quic_header_type: String,

    pub grpc_service_name: String,
    pub grpc_authority: String,
    pub grpc_multi_mode: bool,

    pub httpupgrade_path: String,
    pub httpupgrade_host: String,
    pub httpupgrade_headers: Vec<HeaderEntry>,
    pub httpupgrade_accept_proxy_protocol: bool,

    pub splithttp_path: String,
    pub splithttp_host: String,
    pub splithttp_headers: Vec<HeaderEntry>,
    pub splithttp_sc_max_concurrent_posts: String,
    pub splithttp_sc_max_each_post_bytes: String,
    pub splithttp_sc_min_posts_interval_ms: String,
    pub splithttp_x_padding_bytes: String,
    pub splithttp_no_sse_header: bool,

    pub ds_path: String,
    pub ds_abstract: bool,
    pub ds_padding: bool,

    pub tls_server_name: String,
    pub tls_alpn: String,
    pub tls_min_version: String,
    pub tls_max_version: String,
    pub tls_reject_unknown_sni: bool,
    pub tls_certificate_file: String,
    pub tls_key_file: String,
    pub tls_certificate: String,
    pub tls_key: String,
    /// Certificates after the first, carried through unedited.
    pub tls_extra_certificates: Vec<CertificateForm>,

    pub reality_show: bool,
    pub reality_dest: String,
    pub reality_xver: String,
    pub reality_server_names: String,
    pub reality_private_key: String,
    pub reality_short_ids: String,
    pub reality_max_time_diff: String,
    pub reality_min_client_ver: String,
    pub reality_max_client_ver: String,
    pub reality_public_key: String,
    pub reality_fingerprint: String,
    pub reality_spider_x: String,

    pub sockopt_enabled: bool,
    pub sockopt_accept_proxy_protocol: bool,
    pub sockopt_tcp_fast_open: bool,
    pub sockopt_mark: String,
    pub sockopt_tproxy: String,
    pub sockopt_tcp_mptcp: bool,
    pub sockopt_domain_strategy: String,
    pub sockopt_tcp_keep_alive_interval: String,
    pub sockopt_tcp_keep_alive_idle: String,
    pub sockopt_tcp_user_timeout: String,
    pub sockopt_tcp_congestion: String,
    pub sockopt_interface: String,
}

impl Default for InboundForm {
    fn default() -> Self {
        Self {
            tag: String::new(),
            listen: String::new(),
            port: String::new(),
            protocol: Protocol::Vless,

            vless_decryption: VLESS_DECRYPTION_NONE.to_string(),
            fallbacks: Vec::new(),
            ss_method: SS2022_METHOD_2022_BLAKE3_AES_128_GCM.to_string(),
            ss_password: String::new(),
            ss_network: SS_NETWORK_TCP_UDP.to_string(),
            accounts: vec![AccountForm::default()],
            http_allow_transparent: false,
            socks_auth: SOCKS_AUTH_NOAUTH.to_string(),
            socks_udp: false,
            socks_ip: String::new(),

            sniffing_enabled: true,
            sniffing_destinations: vec!["http".to_string(), "tls".to_string()],
            sniffing_route_only: false,
            sniffing_metadata_only: false,

            stream_network: Network::Tcp,
            stream_security: Security::None,

            tcp_accept_proxy_protocol: false,
            tcp_header_type: HEADER_TYPE_NONE.to_string(),
            tcp_http_hosts: String::new(),
            tcp_http_paths: "/".to_string(),
            tcp_http_version: "1.1".to_string(),
            tcp_http_method: "GET".to_string(),
            tcp_http_headers: vec![HeaderEntry::default()],
            tcp_http_response_version: String::new(),
            tcp_http_response_status: String::new(),
            tcp_http_response_reason: String::new(),
            tcp_http_response_headers: vec![HeaderEntry::default()],

            kcp_mtu: "1350".to_string(),
            kcp_tti: "20".to_string(),
            kcp_uplink_capacity: "5".to_string(),
            kcp_downlink_capacity: "20".to_string(),
            kcp_congestion: false,
            kcp_read_buffer_size: "2".to_string(),
            kcp_write_buffer_size: "2".to_string(),
            kcp_header_type: HEADER_TYPE_NONE.to_string(),
            kcp_seed: String::new(),

            ws_path: "/".to_string(),
            ws_host: String::new(),
            ws_headers: vec![HeaderEntry::default()],
            ws_accept_proxy_protocol: false,

            http_hosts: String::new(),
            http_path: "/".to_string(),
            http_method: String::new(),
            http_headers: vec![HeaderEntry::default()],

            quic_security: "none".to_string(),
            quic_key: String::new(),
            quic_header_type: HEADER_TYPE_NONE.to_string(),

            grpc_service_name: String::new(),
            grpc_authority: String::new(),
            grpc_multi_mode: false,

            httpupgrade_path: "/".to_string(),
            httpupgrade_host: String::new(),
            httpupgrade_headers: vec![HeaderEntry::default()],
            httpupgrade_accept_proxy_protocol: false,

            splithttp_path: "/".to_string(),
            splithttp_host: String::new(),
            splithttp_headers: vec![HeaderEntry::default()],
            splithttp_sc_max_concurrent_posts: "100-200".to_string(),
            splithttp_sc_max_each_post_bytes: "1000000".to_string(),
            splithttp_sc_min_posts_interval_ms: "30".to_string(),
            splithttp_x_padding_bytes: "100-1000".to_string(),
            splithttp_no_sse_header: false,

            ds_path: String::new(),
            ds_abstract: false,
            ds_padding: false,

            tls_server_name: String::new(),
            tls_alpn: String::new(),
            tls_min_version: String::new(),
            tls_max_version: String::new(),
            tls_reject_unknown_sni: false,
            tls_certificate_file: String::new(),
            tls_key_file: String::new(),
            tls_certificate: String::new(),
            tls_key: String::new(),
            tls_extra_certificates: Vec::new(),

            reality_show: false,
            reality_dest: String::new(),
            reality_xver: String::new(),
            reality_server_names: String::new(),
            reality_private_key: String::new(),
            reality_short_ids: String::new(),
            reality_max_time_diff: String::new(),
            reality_min_client_ver: String::new(),
            reality_max_client_ver: String::new(),
            reality_public_key: String::new(),
            reality_fingerprint: String::new(),
            reality_spider_x: String::new(),

            sockopt_enabled: false,
            sockopt_accept_proxy_protocol: false,
            sockopt_tcp_fast_open: false,
            sockopt_mark: String::new(),
            sockopt_tproxy: "off".to_string(),
            sockopt_tcp_mptcp: false,
            sockopt_domain_strategy: "AsIs".to_string(),
            sockopt_tcp_keep_alive_interval: String::new(),
            sockopt_tcp_keep_alive_idle: String::new(),
            sockopt_tcp_user_timeout: String::new(),
            sockopt_tcp_congestion: String::new(),
            sockopt_interface: String::new(),
        }
    }
}

/// Builds the editing template for a freshly created inbound of `protocol`.
pub fn defaults(protocol: Protocol) -> InboundForm {
    InboundForm {
        protocol,
        ..InboundForm::default()
    }
}
