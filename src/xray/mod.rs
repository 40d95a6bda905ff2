//! Xray inbound wire model.
//!
//! Field names follow the Xray JSON config schema exactly. Every optional
//! field is skipped when empty (see [`crate::prune`]), so serialized configs
//! carry no noise keys for the config compiler to trip over.

use serde::Serialize;
use serde_json::Value;

use crate::form::InboundForm;
use crate::protocol::{Network, Protocol, Security};
use crate::prune::is_blank_opt;

pub mod reader;
pub mod security;
pub mod settings;
pub mod sockopt;
pub mod transport;

pub use security::SecuritySettings;
pub use settings::ProtocolSettings;
pub use sockopt::Sockopt;
pub use transport::TransportSettings;

use reader::{assign, bool_at, string_list_at};

/// `None` for blank input, the text unchanged otherwise.
pub(crate) fn non_blank(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Listener port: usually a number, but Xray also accepts strings such as
/// port ranges or `env:`/file-descriptor references.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Port {
    Number(u64),
    Text(String),
}

impl Port {
    /// Blank or unusable input becomes `0`; the caller validates ports.
    pub fn from_form(s: &str) -> Self {
        Self::from_form_opt(s).unwrap_or(Self::Number(0))
    }

    pub fn from_form_opt(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<u64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(trimmed.to_string()),
        })
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    pub tag: String,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub listen: Option<String>,
    pub port: Port,
    pub protocol: Protocol,
    pub settings: ProtocolSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamSettings>,
    pub sniffing: Sniffing,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StreamSettings {
    pub network: Network,
    pub security: Security,
    #[serde(flatten)]
    pub transport: TransportSettings,
    #[serde(flatten)]
    pub security_settings: Option<SecuritySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sockopt: Option<Sockopt>,
}

impl StreamSettings {
    pub fn from_form(form: &InboundForm) -> Self {
        Self {
            network: form.stream_network,
            security: form.stream_security,
            transport: TransportSettings::from_form(form),
            security_settings: SecuritySettings::from_form(form),
            sockopt: form.sockopt_enabled.then(|| Sockopt::from_form(form)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sniffing {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dest_override: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_only: Option<bool>,
}

impl Sniffing {
    /// A disabled block collapses to `{"enabled": false}`.
    pub fn from_form(form: &InboundForm) -> Self {
        if !form.sniffing_enabled {
            return Self::default();
        }
        Self {
            enabled: true,
            dest_override: form
                .sniffing_destinations
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
            route_only: Some(form.sniffing_route_only),
            metadata_only: Some(form.sniffing_metadata_only),
        }
    }

    /// Fields missing from the stored block keep their template values, so an
    /// inbound written before sniffing existed still opens with it enabled.
    pub fn apply_wire_to_form(sniffing: &Value, form: &mut InboundForm) {
        assign(&mut form.sniffing_enabled, bool_at(sniffing, "enabled"));
        assign(
            &mut form.sniffing_destinations,
            string_list_at(sniffing, "destOverride"),
        );
        assign(&mut form.sniffing_route_only, bool_at(sniffing, "routeOnly"));
        assign(
            &mut form.sniffing_metadata_only,
            bool_at(sniffing, "metadataOnly"),
        );
    }
}
