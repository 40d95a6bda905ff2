//! Per-transport `streamSettings` objects.
//!
//! [`TransportSettings`] is externally tagged and flattened into
//! `streamSettings`, so the variant name is the wire key (`wsSettings`,
//! `grpcSettings`, ...) and exactly one transport object is ever emitted.

use serde::Serialize;
use serde_json::Value;

use super::non_blank;
use super::reader::{
    NULL, assign, bool_at, object_at, range_at, str_at, string_list_at, u64_at,
};
use crate::form::{HeaderEntry, InboundForm};
use crate::headers::{
    HeaderMap, HeaderValue, header_map_from_wire, header_map_to_list, list_to_header_map,
    take_header,
};
use crate::multi_value::{join_multi_value, parse_optional_u64, split_multi_value};
use crate::protocol::{HEADER_TYPE_HTTP, HEADER_TYPE_NONE, Network};
use crate::prune::is_blank_opt;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum TransportSettings {
    #[serde(rename = "tcpSettings")]
    Tcp(TcpSettings),
    #[serde(rename = "kcpSettings")]
    Kcp(KcpSettings),
    #[serde(rename = "wsSettings")]
    Ws(WsSettings),
    #[serde(rename = "httpSettings")]
    Http(HttpSettings),
    #[serde(rename = "quicSettings")]
    Quic(QuicSettings),
    #[serde(rename = "grpcSettings")]
    Grpc(GrpcSettings),
    #[serde(rename = "httpupgradeSettings")]
    HttpUpgrade(HttpUpgradeSettings),
    #[serde(rename = "splithttpSettings")]
    SplitHttp(SplitHttpSettings),
    #[serde(rename = "dsSettings")]
    DomainSocket(DomainSocketSettings),
}

impl TransportSettings {
    pub fn network(&self) -> Network {
        match self {
            Self::Tcp(_) => Network::Tcp,
            Self::Kcp(_) => Network::Kcp,
            Self::Ws(_) => Network::Ws,
            Self::Http(_) => Network::Http,
            Self::Quic(_) => Network::Quic,
            Self::Grpc(_) => Network::Grpc,
            Self::HttpUpgrade(_) => Network::HttpUpgrade,
            Self::SplitHttp(_) => Network::SplitHttp,
            Self::DomainSocket(_) => Network::DomainSocket,
        }
    }

    pub fn from_form(form: &InboundForm) -> Self {
        match form.stream_network {
            Network::Tcp => Self::Tcp(TcpSettings::from_form(form)),
            Network::Kcp => Self::Kcp(KcpSettings::from_form(form)),
            Network::Ws => Self::Ws(WsSettings::from_form(form)),
            Network::Http => Self::Http(HttpSettings::from_form(form)),
            Network::Quic => Self::Quic(QuicSettings::from_form(form)),
            Network::Grpc => Self::Grpc(GrpcSettings::from_form(form)),
            Network::HttpUpgrade => Self::HttpUpgrade(HttpUpgradeSettings::from_form(form)),
            Network::SplitHttp => Self::SplitHttp(SplitHttpSettings::from_form(form)),
            Network::DomainSocket => Self::DomainSocket(DomainSocketSettings::from_form(form)),
        }
    }

    /// Reads the object for `network` out of `streamSettings`; objects for
    /// other transports are ignored.
    pub fn from_wire(network: Network, stream: &Value) -> Self {
        let v = object_at(stream, network.settings_key()).unwrap_or(&NULL);
        match network {
            Network::Tcp => Self::Tcp(TcpSettings::from_wire(v)),
            Network::Kcp => Self::Kcp(KcpSettings::from_wire(v)),
            Network::Ws => Self::Ws(WsSettings::from_wire(v)),
            Network::Http => Self::Http(HttpSettings::from_wire(v)),
            Network::Quic => Self::Quic(QuicSettings::from_wire(v)),
            Network::Grpc => Self::Grpc(GrpcSettings::from_wire(v)),
            Network::HttpUpgrade => Self::HttpUpgrade(HttpUpgradeSettings::from_wire(v)),
            Network::SplitHttp => Self::SplitHttp(SplitHttpSettings::from_wire(v)),
            Network::DomainSocket => Self::DomainSocket(DomainSocketSettings::from_wire(v)),
        }
    }

    pub fn apply_to_form(&self, form: &mut InboundForm) {
        form.stream_network = self.network();
        match self {
            Self::Tcp(s) => s.apply_to_form(form),
            Self::Kcp(s) => s.apply_to_form(form),
            Self::Ws(s) => s.apply_to_form(form),
            Self::Http(s) => s.apply_to_form(form),
            Self::Quic(s) => s.apply_to_form(form),
            Self::Grpc(s) => s.apply_to_form(form),
            Self::HttpUpgrade(s) => s.apply_to_form(form),
            Self::SplitHttp(s) => s.apply_to_form(form),
            Self::DomainSocket(s) => s.apply_to_form(form),
        }
    }
}

/// `header` object used by kcp and quic (packet obfuscation type).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ObfsHeader {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ObfsHeader {
    fn from_form(kind: &str) -> Option<Self> {
        non_blank(kind).map(|kind| Self { kind })
    }

    fn from_wire(v: &Value) -> Option<Self> {
        object_at(v, "header")
            .and_then(|h| str_at(h, "type"))
            .map(|kind| Self { kind })
    }

    fn kind(header: &Option<Self>) -> Option<String> {
        header.as_ref().map(|h| h.kind.clone())
    }
}

/// Fills a missing dedicated `host` from the first `Host` header value.
/// Any further `Host` values stay in the header map.
fn lift_host_header(
    host: Option<String>,
    mut headers: Option<HeaderMap>,
) -> (Option<String>, Option<HeaderMap>) {
    if host.is_some() {
        return (host, headers);
    }
    let mut values = headers
        .as_mut()
        .and_then(|m| take_header(m, "Host"))
        .map(|h| h.values().to_vec())
        .unwrap_or_default();
    let host = (!values.is_empty()).then(|| values.remove(0));
    if !values.is_empty() {
        headers
            .get_or_insert_with(HeaderMap::new)
            .insert("Host".to_string(), HeaderValue::from_values(values));
    }
    if headers.as_ref().is_some_and(|m| m.is_empty()) {
        headers = None;
    }
    (host, headers)
}

fn host_and_headers(host: &str, rows: &[HeaderEntry]) -> (Option<String>, Option<HeaderMap>) {
    lift_host_header(non_blank(host), list_to_header_map(rows))
}

fn host_and_headers_from_wire(v: &Value) -> (Option<String>, Option<HeaderMap>) {
    lift_host_header(
        str_at(v, "host").and_then(|h| non_blank(&h)),
        header_map_from_wire(v.get("headers")),
    )
}

/// Moves every `Host` header value into `hosts`, skipping duplicates.
fn drain_host_header(headers: &mut HeaderMap, hosts: &mut Vec<String>) {
    if let Some(values) = take_header(headers, "Host") {
        for value in values.values() {
            if !hosts.contains(value) {
                hosts.push(value.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TcpSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<TcpHeader>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TcpHeader {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<TcpHttpRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<TcpHttpResponse>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TcpHttpRequest {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TcpHttpResponse {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
}

impl TcpHttpResponse {
    fn is_empty(&self) -> bool {
        is_blank_opt(&self.version)
            && is_blank_opt(&self.status)
            && is_blank_opt(&self.reason)
            && self.headers.is_none()
    }
}

impl TcpSettings {
    fn from_form(form: &InboundForm) -> Self {
        // A "none" header is Xray's default and is left out.
        let header = (form.tcp_header_type == HEADER_TYPE_HTTP).then(|| {
            let mut headers = list_to_header_map(&form.tcp_http_headers).unwrap_or_default();
            let mut hosts = split_multi_value(&form.tcp_http_hosts);
            drain_host_header(&mut headers, &mut hosts);
            if !hosts.is_empty() {
                headers.insert("Host".to_string(), HeaderValue::Multi(hosts));
            }
            let response = TcpHttpResponse {
                version: non_blank(&form.tcp_http_response_version),
                status: non_blank(&form.tcp_http_response_status),
                reason: non_blank(&form.tcp_http_response_reason),
                headers: list_to_header_map(&form.tcp_http_response_headers),
            };
            TcpHeader {
                kind: HEADER_TYPE_HTTP.to_string(),
                request: Some(TcpHttpRequest {
                    version: non_blank(&form.tcp_http_version),
                    method: non_blank(&form.tcp_http_method),
                    path: split_multi_value(&form.tcp_http_paths),
                    headers: (!headers.is_empty()).then_some(headers),
                }),
                response: (!response.is_empty()).then_some(response),
            }
        });
        Self {
            accept_proxy_protocol: Some(form.tcp_accept_proxy_protocol),
            header,
        }
    }

    fn from_wire(v: &Value) -> Self {
        let header = object_at(v, "header").map(|h| TcpHeader {
            kind: str_at(h, "type").unwrap_or_else(|| HEADER_TYPE_NONE.to_string()),
            request: object_at(h, "request").map(|r| TcpHttpRequest {
                version: str_at(r, "version"),
                method: str_at(r, "method"),
                path: string_list_at(r, "path").unwrap_or_default(),
                headers: header_map_from_wire(r.get("headers")),
            }),
            response: object_at(h, "response").map(|r| TcpHttpResponse {
                version: str_at(r, "version"),
                status: str_at(r, "status"),
                reason: str_at(r, "reason"),
                headers: header_map_from_wire(r.get("headers")),
            }),
        });
        Self {
            accept_proxy_protocol: bool_at(v, "acceptProxyProtocol"),
            header,
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.tcp_accept_proxy_protocol, self.accept_proxy_protocol);
        let Some(header) = &self.header else {
            return;
        };
        form.tcp_header_type = header.kind.clone();
        if let Some(request) = &header.request {
            if !request.path.is_empty() {
                form.tcp_http_paths = join_multi_value(&request.path);
            }
            assign(&mut form.tcp_http_version, request.version.clone());
            assign(&mut form.tcp_http_method, request.method.clone());
            let mut headers = request.headers.clone().unwrap_or_default();
            let mut hosts = Vec::new();
            drain_host_header(&mut headers, &mut hosts);
            form.tcp_http_hosts = join_multi_value(&hosts);
            form.tcp_http_headers = header_map_to_list(Some(&headers));
        }
        if let Some(response) = &header.response {
            assign(&mut form.tcp_http_response_version, response.version.clone());
            assign(&mut form.tcp_http_response_status, response.status.clone());
            assign(&mut form.tcp_http_response_reason, response.reason.clone());
            form.tcp_http_response_headers = header_map_to_list(response.headers.as_ref());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KcpSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tti: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uplink_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downlink_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_buffer_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_buffer_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<ObfsHeader>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub seed: Option<String>,
}

impl KcpSettings {
    fn from_form(form: &InboundForm) -> Self {
        Self {
            mtu: parse_optional_u64(&form.kcp_mtu),
            tti: parse_optional_u64(&form.kcp_tti),
            uplink_capacity: parse_optional_u64(&form.kcp_uplink_capacity),
            downlink_capacity: parse_optional_u64(&form.kcp_downlink_capacity),
            congestion: Some(form.kcp_congestion),
            read_buffer_size: parse_optional_u64(&form.kcp_read_buffer_size),
            write_buffer_size: parse_optional_u64(&form.kcp_write_buffer_size),
            header: ObfsHeader::from_form(&form.kcp_header_type),
            seed: non_blank(&form.kcp_seed),
        }
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            mtu: u64_at(v, "mtu"),
            tti: u64_at(v, "tti"),
            uplink_capacity: u64_at(v, "uplinkCapacity"),
            downlink_capacity: u64_at(v, "downlinkCapacity"),
            congestion: bool_at(v, "congestion"),
            read_buffer_size: u64_at(v, "readBufferSize"),
            write_buffer_size: u64_at(v, "writeBufferSize"),
            header: ObfsHeader::from_wire(v),
            seed: str_at(v, "seed"),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        let num = |n: Option<u64>| n.map(|n| n.to_string());
        assign(&mut form.kcp_mtu, num(self.mtu));
        assign(&mut form.kcp_tti, num(self.tti));
        assign(&mut form.kcp_uplink_capacity, num(self.uplink_capacity));
        assign(&mut form.kcp_downlink_capacity, num(self.downlink_capacity));
        assign(&mut form.kcp_congestion, self.congestion);
        assign(&mut form.kcp_read_buffer_size, num(self.read_buffer_size));
        assign(&mut form.kcp_write_buffer_size, num(self.write_buffer_size));
        assign(&mut form.kcp_header_type, ObfsHeader::kind(&self.header));
        assign(&mut form.kcp_seed, self.seed.clone());
    }
}

/// WebSocket settings. Hosts travel as the `Host` header so older cores
/// without the dedicated `host` field still route by them.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
}

impl WsSettings {
    fn with_hosts(mut hosts: Vec<String>, mut headers: HeaderMap) -> Option<HeaderMap> {
        drain_host_header(&mut headers, &mut hosts);
        if !hosts.is_empty() {
            headers.insert("Host".to_string(), HeaderValue::from_values(hosts));
        }
        (!headers.is_empty()).then_some(headers)
    }

    fn from_form(form: &InboundForm) -> Self {
        Self {
            accept_proxy_protocol: Some(form.ws_accept_proxy_protocol),
            path: non_blank(&form.ws_path),
            headers: Self::with_hosts(
                split_multi_value(&form.ws_host),
                list_to_header_map(&form.ws_headers).unwrap_or_default(),
            ),
        }
    }

    fn from_wire(v: &Value) -> Self {
        let hosts = str_at(v, "host").and_then(|h| non_blank(&h)).into_iter().collect();
        Self {
            accept_proxy_protocol: bool_at(v, "acceptProxyProtocol"),
            path: str_at(v, "path"),
            headers: Self::with_hosts(
                hosts,
                header_map_from_wire(v.get("headers")).unwrap_or_default(),
            ),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.ws_accept_proxy_protocol, self.accept_proxy_protocol);
        assign(&mut form.ws_path, self.path.clone());
        let mut headers = self.headers.clone().unwrap_or_default();
        let mut hosts = Vec::new();
        drain_host_header(&mut headers, &mut hosts);
        if !hosts.is_empty() {
            form.ws_host = join_multi_value(&hosts);
        }
        form.ws_headers = header_map_to_list(Some(&headers));
    }
}

/// HTTP/2 transport.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HttpSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
}

impl HttpSettings {
    fn from_form(form: &InboundForm) -> Self {
        Self {
            host: split_multi_value(&form.http_hosts),
            path: non_blank(&form.http_path),
            method: non_blank(&form.http_method),
            headers: list_to_header_map(&form.http_headers),
        }
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            host: string_list_at(v, "host").unwrap_or_default(),
            path: str_at(v, "path"),
            method: str_at(v, "method"),
            headers: header_map_from_wire(v.get("headers")),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        form.http_hosts = join_multi_value(&self.host);
        assign(&mut form.http_path, self.path.clone());
        assign(&mut form.http_method, self.method.clone());
        form.http_headers = header_map_to_list(self.headers.as_ref());
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QuicSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub security: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<ObfsHeader>,
}

impl QuicSettings {
    fn from_form(form: &InboundForm) -> Self {
        Self {
            security: non_blank(&form.quic_security),
            key: non_blank(&form.quic_key),
            header: ObfsHeader::from_form(&form.quic_header_type),
        }
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            security: str_at(v, "security"),
            key: str_at(v, "key"),
            header: ObfsHeader::from_wire(v),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.quic_security, self.security.clone());
        assign(&mut form.quic_key, self.key.clone());
        assign(&mut form.quic_header_type, ObfsHeader::kind(&self.header));
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrpcSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub authority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_mode: Option<bool>,
}

impl GrpcSettings {
    fn from_form(form: &InboundForm) -> Self {
        Self {
            service_name: non_blank(&form.grpc_service_name),
            authority: non_blank(&form.grpc_authority),
            multi_mode: Some(form.grpc_multi_mode),
        }
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            service_name: str_at(v, "serviceName"),
            authority: str_at(v, "authority"),
            multi_mode: bool_at(v, "multiMode"),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.grpc_service_name, self.service_name.clone());
        assign(&mut form.grpc_authority, self.authority.clone());
        assign(&mut form.grpc_multi_mode, self.multi_mode);
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpUpgradeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
}

impl HttpUpgradeSettings {
    fn from_form(form: &InboundForm) -> Self {
        let (host, headers) = host_and_headers(&form.httpupgrade_host, &form.httpupgrade_headers);
        Self {
            accept_proxy_protocol: Some(form.httpupgrade_accept_proxy_protocol),
            path: non_blank(&form.httpupgrade_path),
            host,
            headers,
        }
    }

    fn from_wire(v: &Value) -> Self {
        let (host, headers) = host_and_headers_from_wire(v);
        Self {
            accept_proxy_protocol: bool_at(v, "acceptProxyProtocol"),
            path: str_at(v, "path"),
            host,
            headers,
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(
            &mut form.httpupgrade_accept_proxy_protocol,
            self.accept_proxy_protocol,
        );
        assign(&mut form.httpupgrade_path, self.path.clone());
        assign(&mut form.httpupgrade_host, self.host.clone());
        form.httpupgrade_headers = header_map_to_list(self.headers.as_ref());
    }
}

/// SplitHTTP transport. The `sc*` and padding fields accept either a number
/// or a `"low-high"` range and are passed through as typed.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SplitHttpSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub sc_max_concurrent_posts: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub sc_max_each_post_bytes: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub sc_min_posts_interval_ms: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub x_padding_bytes: Option<String>,
    #[serde(rename = "noSSEHeader", skip_serializing_if = "Option::is_none")]
    pub no_sse_header: Option<bool>,
}

impl SplitHttpSettings {
    fn from_form(form: &InboundForm) -> Self {
        let (host, headers) = host_and_headers(&form.splithttp_host, &form.splithttp_headers);
        Self {
            path: non_blank(&form.splithttp_path),
            host,
            headers,
            sc_max_concurrent_posts: non_blank(&form.splithttp_sc_max_concurrent_posts),
            sc_max_each_post_bytes: non_blank(&form.splithttp_sc_max_each_post_bytes),
            sc_min_posts_interval_ms: non_blank(&form.splithttp_sc_min_posts_interval_ms),
            x_padding_bytes: non_blank(&form.splithttp_x_padding_bytes),
            no_sse_header: Some(form.splithttp_no_sse_header),
        }
    }

    fn from_wire(v: &Value) -> Self {
        let (host, headers) = host_and_headers_from_wire(v);
        Self {
            path: str_at(v, "path"),
            host,
            headers,
            sc_max_concurrent_posts: range_at(v, "scMaxConcurrentPosts"),
            sc_max_each_post_bytes: range_at(v, "scMaxEachPostBytes"),
            sc_min_posts_interval_ms: range_at(v, "scMinPostsIntervalMs"),
            x_padding_bytes: range_at(v, "xPaddingBytes"),
            no_sse_header: bool_at(v, "noSSEHeader"),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.splithttp_path, self.path.clone());
        assign(&mut form.splithttp_host, self.host.clone());
        form.splithttp_headers = header_map_to_list(self.headers.as_ref());
        assign(
            &mut form.splithttp_sc_max_concurrent_posts,
            self.sc_max_concurrent_posts.clone(),
        );
        assign(
            &mut form.splithttp_sc_max_each_post_bytes,
            self.sc_max_each_post_bytes.clone(),
        );
        assign(
            &mut form.splithttp_sc_min_posts_interval_ms,
            self.sc_min_posts_interval_ms.clone(),
        );
        assign(&mut form.splithttp_x_padding_bytes, self.x_padding_bytes.clone());
        assign(&mut form.splithttp_no_sse_header, self.no_sse_header);
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DomainSocketSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub path: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_namespace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<bool>,
}

impl DomainSocketSettings {
    fn from_form(form: &InboundForm) -> Self {
        Self {
            path: non_blank(&form.ds_path),
            abstract_namespace: Some(form.ds_abstract),
            padding: Some(form.ds_padding),
        }
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            path: str_at(v, "path"),
            abstract_namespace: bool_at(v, "abstract"),
            padding: bool_at(v, "padding"),
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.ds_path, self.path.clone());
        assign(&mut form.ds_abstract, self.abstract_namespace);
        assign(&mut form.ds_padding, self.padding);
    }
}
