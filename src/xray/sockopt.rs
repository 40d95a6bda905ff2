use serde::Serialize;
use serde_json::Value;

use super::non_blank;
use super::reader::{assign, bool_at, i64_at, str_at, u64_at};
use crate::form::InboundForm;
use crate::multi_value::{parse_optional_i64, parse_optional_u64};
use crate::prune::is_blank_opt;

/// `streamSettings.sockopt`. Emitted only when the form enables it.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sockopt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_fast_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<u64>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub tproxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_mptcp: Option<bool>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub domain_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_keep_alive_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_keep_alive_idle: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_user_timeout: Option<i64>,
    #[serde(rename = "tcpcongestion", skip_serializing_if = "is_blank_opt")]
    pub tcp_congestion: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub interface: Option<String>,
}

impl Sockopt {
    pub fn from_form(form: &InboundForm) -> Self {
        Self {
            accept_proxy_protocol: Some(form.sockopt_accept_proxy_protocol),
            tcp_fast_open: Some(form.sockopt_tcp_fast_open),
            mark: parse_optional_u64(&form.sockopt_mark),
            tproxy: non_blank(&form.sockopt_tproxy),
            tcp_mptcp: Some(form.sockopt_tcp_mptcp),
            domain_strategy: non_blank(&form.sockopt_domain_strategy),
            tcp_keep_alive_interval: parse_optional_i64(&form.sockopt_tcp_keep_alive_interval),
            tcp_keep_alive_idle: parse_optional_i64(&form.sockopt_tcp_keep_alive_idle),
            tcp_user_timeout: parse_optional_i64(&form.sockopt_tcp_user_timeout),
            tcp_congestion: non_blank(&form.sockopt_tcp_congestion),
            interface: non_blank(&form.sockopt_interface),
        }
    }

    pub fn from_wire(v: &Value) -> Self {
        Self {
            accept_proxy_protocol: bool_at(v, "acceptProxyProtocol"),
            tcp_fast_open: bool_at(v, "tcpFastOpen"),
            mark: u64_at(v, "mark"),
            tproxy: str_at(v, "tproxy"),
            tcp_mptcp: bool_at(v, "tcpMptcp"),
            domain_strategy: str_at(v, "domainStrategy"),
            tcp_keep_alive_interval: i64_at(v, "tcpKeepAliveInterval"),
            tcp_keep_alive_idle: i64_at(v, "tcpKeepAliveIdle"),
            tcp_user_timeout: i64_at(v, "tcpUserTimeout"),
            tcp_congestion: str_at(v, "tcpcongestion"),
            interface: str_at(v, "interface"),
        }
    }

    /// A stored sockopt block turns the form toggle on.
    pub fn apply_to_form(&self, form: &mut InboundForm) {
        let num = |n: Option<i64>| n.map(|n| n.to_string());
        form.sockopt_enabled = true;
        assign(&mut form.sockopt_accept_proxy_protocol, self.accept_proxy_protocol);
        assign(&mut form.sockopt_tcp_fast_open, self.tcp_fast_open);
        assign(&mut form.sockopt_mark, self.mark.map(|m| m.to_string()));
        assign(&mut form.sockopt_tproxy, self.tproxy.clone());
        assign(&mut form.sockopt_tcp_mptcp, self.tcp_mptcp);
        assign(&mut form.sockopt_domain_strategy, self.domain_strategy.clone());
        assign(
            &mut form.sockopt_tcp_keep_alive_interval,
            num(self.tcp_keep_alive_interval),
        );
        assign(
            &mut form.sockopt_tcp_keep_alive_idle,
            num(self.tcp_keep_alive_idle),
        );
        assign(&mut form.sockopt_tcp_user_timeout, num(self.tcp_user_timeout));
        assign(&mut form.sockopt_tcp_congestion, self.tcp_congestion.clone());
        assign(&mut form.sockopt_interface, self.interface.clone());
    }
}
