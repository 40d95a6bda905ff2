use serde::Serialize;
use serde_json::Value;

use super::non_blank;
use super::reader::{NULL, array_at, assign, bool_at, object_at, str_at, string_list_at, u64_at};
use crate::form::{CertificateForm, InboundForm};
use crate::multi_value::{join_multi_value, parse_optional_u64, split_lines, split_multi_value};
use crate::protocol::Security;
use crate::prune::is_blank_opt;

/// Transport security object; absent for `security: "none"`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum SecuritySettings {
    #[serde(rename = "tlsSettings")]
    Tls(TlsSettings),
    #[serde(rename = "realitySettings")]
    Reality(RealitySettings),
}

impl SecuritySettings {
    pub fn security(&self) -> Security {
        match self {
            Self::Tls(_) => Security::Tls,
            Self::Reality(_) => Security::Reality,
        }
    }

    pub fn from_form(form: &InboundForm) -> Option<Self> {
        match form.stream_security {
            Security::None => None,
            Security::Tls => Some(Self::Tls(TlsSettings::from_form(form))),
            Security::Reality => Some(Self::Reality(RealitySettings::from_form(form))),
        }
    }

    pub fn from_wire(security: Security, stream: &Value) -> Option<Self> {
        match security {
            Security::None => None,
            Security::Tls => Some(Self::Tls(TlsSettings::from_wire(
                object_at(stream, "tlsSettings").unwrap_or(&NULL),
            ))),
            Security::Reality => Some(Self::Reality(RealitySettings::from_wire(
                object_at(stream, "realitySettings").unwrap_or(&NULL),
            ))),
        }
    }

    pub fn apply_to_form(&self, form: &mut InboundForm) {
        form.stream_security = self.security();
        match self {
            Self::Tls(s) => s.apply_to_form(form),
            Self::Reality(s) => s.apply_to_form(form),
        }
    }
}

/// One `certificates` entry: file paths, inline PEM lines, or both.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub certificate_file: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub key_file: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificate: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<String>,
}

impl Certificate {
    fn from_form(c: &CertificateForm) -> Option<Self> {
        let cert = Self {
            certificate_file: non_blank(&c.certificate_file),
            key_file: non_blank(&c.key_file),
            certificate: split_lines(&c.certificate),
            key: split_lines(&c.key),
        };
        (cert != Self::default()).then_some(cert)
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            certificate_file: str_at(v, "certificateFile"),
            key_file: str_at(v, "keyFile"),
            certificate: string_list_at(v, "certificate").unwrap_or_default(),
            key: string_list_at(v, "key").unwrap_or_default(),
        }
    }

    fn to_form(&self) -> CertificateForm {
        CertificateForm {
            certificate_file: self.certificate_file.clone().unwrap_or_default(),
            key_file: self.key_file.clone().unwrap_or_default(),
            certificate: join_multi_value(&self.certificate),
            key: join_multi_value(&self.key),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub min_version: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub max_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_unknown_sni: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<Certificate>,
}

impl TlsSettings {
    fn from_form(form: &InboundForm) -> Self {
        let first = CertificateForm {
            certificate_file: form.tls_certificate_file.clone(),
            key_file: form.tls_key_file.clone(),
            certificate: form.tls_certificate.clone(),
            key: form.tls_key.clone(),
        };
        let certificates = std::iter::once(&first)
            .chain(&form.tls_extra_certificates)
            .filter_map(Certificate::from_form)
            .collect();
        Self {
            server_name: non_blank(&form.tls_server_name),
            alpn: split_multi_value(&form.tls_alpn),
            min_version: non_blank(&form.tls_min_version),
            max_version: non_blank(&form.tls_max_version),
            reject_unknown_sni: Some(form.tls_reject_unknown_sni),
            certificates,
        }
    }

    fn from_wire(v: &Value) -> Self {
        let certificates = array_at(v, "certificates")
            .unwrap_or_default()
            .iter()
            .filter(|c| c.is_object())
            .map(Certificate::from_wire)
            .collect();
        Self {
            server_name: str_at(v, "serverName"),
            alpn: string_list_at(v, "alpn").unwrap_or_default(),
            min_version: str_at(v, "minVersion"),
            max_version: str_at(v, "maxVersion"),
            reject_unknown_sni: bool_at(v, "rejectUnknownSni"),
            certificates,
        }
    }

    /// The first certificate maps onto the flat form fields; the rest ride
    /// along in `tls_extra_certificates`.
    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.tls_server_name, self.server_name.clone());
        form.tls_alpn = join_multi_value(&self.alpn);
        assign(&mut form.tls_min_version, self.min_version.clone());
        assign(&mut form.tls_max_version, self.max_version.clone());
        assign(&mut form.tls_reject_unknown_sni, self.reject_unknown_sni);
        let mut certificates = self.certificates.iter().map(Certificate::to_form);
        if let Some(first) = certificates.next() {
            form.tls_certificate_file = first.certificate_file;
            form.tls_key_file = first.key_file;
            form.tls_certificate = first.certificate;
            form.tls_key = first.key;
        }
        form.tls_extra_certificates = certificates.collect();
    }
}

/// Client-facing REALITY parameters kept next to the server config so share
/// links can be generated from the inbound alone.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RealityClientSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub spider_x: Option<String>,
}

impl RealityClientSettings {
    fn is_empty(&self) -> bool {
        is_blank_opt(&self.public_key)
            && is_blank_opt(&self.fingerprint)
            && is_blank_opt(&self.spider_x)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub dest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xver: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub server_names: Vec<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub min_client_ver: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub max_client_ver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_diff: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub short_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<RealityClientSettings>,
}

impl RealitySettings {
    fn from_form(form: &InboundForm) -> Self {
        let settings = RealityClientSettings {
            public_key: non_blank(&form.reality_public_key),
            fingerprint: non_blank(&form.reality_fingerprint),
            spider_x: non_blank(&form.reality_spider_x),
        };
        Self {
            show: Some(form.reality_show),
            dest: non_blank(&form.reality_dest),
            xver: parse_optional_u64(&form.reality_xver),
            server_names: split_multi_value(&form.reality_server_names),
            private_key: non_blank(&form.reality_private_key),
            min_client_ver: non_blank(&form.reality_min_client_ver),
            max_client_ver: non_blank(&form.reality_max_client_ver),
            max_time_diff: parse_optional_u64(&form.reality_max_time_diff),
            short_ids: split_multi_value(&form.reality_short_ids),
            settings: (!settings.is_empty()).then_some(settings),
        }
    }

    /// Newer cores call `dest` `target`; either is accepted.
    fn from_wire(v: &Value) -> Self {
        let settings = object_at(v, "settings").map(|s| RealityClientSettings {
            public_key: str_at(s, "publicKey"),
            fingerprint: str_at(s, "fingerprint"),
            spider_x: str_at(s, "spiderX"),
        });
        Self {
            show: bool_at(v, "show"),
            dest: str_at(v, "dest").or_else(|| str_at(v, "target")),
            xver: u64_at(v, "xver"),
            server_names: string_list_at(v, "serverNames").unwrap_or_default(),
            private_key: str_at(v, "privateKey"),
            min_client_ver: str_at(v, "minClientVer"),
            max_client_ver: str_at(v, "maxClientVer"),
            max_time_diff: u64_at(v, "maxTimeDiff"),
            short_ids: string_list_at(v, "shortIds").unwrap_or_default(),
            settings,
        }
    }

    fn apply_to_form(&self, form: &mut InboundForm) {
        assign(&mut form.reality_show, self.show);
        assign(&mut form.reality_dest, self.dest.clone());
        assign(&mut form.reality_xver, self.xver.map(|x| x.to_string()));
        form.reality_server_names = join_multi_value(&self.server_names);
        assign(&mut form.reality_private_key, self.private_key.clone());
        assign(&mut form.reality_min_client_ver, self.min_client_ver.clone());
        assign(&mut form.reality_max_client_ver, self.max_client_ver.clone());
        assign(
            &mut form.reality_max_time_diff,
            self.max_time_diff.map(|x| x.to_string()),
        );
        form.reality_short_ids = join_multi_value(&self.short_ids);
        if let Some(settings) = &self.settings {
            assign(&mut form.reality_public_key, settings.public_key.clone());
            assign(&mut form.reality_fingerprint, settings.fingerprint.clone());
            assign(&mut form.reality_spider_x, settings.spider_x.clone());
        }
    }
}
