use serde::Serialize;
use serde_json::Value;

use super::Port;
use super::non_blank;
use super::reader::{array_at, assign, bool_at, str_at, string_list_at, u64_at};
use crate::form::{AccountForm, FallbackForm, InboundForm};
use crate::multi_value::parse_optional_u64;
use crate::protocol::Protocol;
use crate::prune::is_blank_opt;

/// `settings` of an inbound, one variant per protocol.
///
/// Only fields meaningful to the variant's protocol exist on it, so a
/// shadowsocks inbound can never leak `decryption` or `accounts`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ProtocolSettings {
    Vmess(VmessSettings),
    Vless(VlessSettings),
    Trojan(TrojanSettings),
    Shadowsocks(ShadowsocksSettings),
    Http(HttpProxySettings),
    Socks(SocksSettings),
}

impl ProtocolSettings {
    pub fn protocol(&self) -> Protocol {
        match self {
            Self::Vmess(_) => Protocol::Vmess,
            Self::Vless(_) => Protocol::Vless,
            Self::Trojan(_) => Protocol::Trojan,
            Self::Shadowsocks(_) => Protocol::Shadowsocks,
            Self::Http(_) => Protocol::Http,
            Self::Socks(_) => Protocol::Socks,
        }
    }

    pub fn from_form(form: &InboundForm) -> Self {
        match form.protocol {
            Protocol::Vmess => Self::Vmess(VmessSettings::default()),
            Protocol::Vless => Self::Vless(VlessSettings {
                clients: Vec::new(),
                decryption: non_blank(&form.vless_decryption),
                fallbacks: fallbacks_from_form(&form.fallbacks),
            }),
            Protocol::Trojan => Self::Trojan(TrojanSettings {
                clients: Vec::new(),
                fallbacks: fallbacks_from_form(&form.fallbacks),
            }),
            Protocol::Shadowsocks => Self::Shadowsocks(ShadowsocksSettings {
                clients: Vec::new(),
                method: non_blank(&form.ss_method),
                password: non_blank(&form.ss_password),
                network: non_blank(&form.ss_network),
            }),
            Protocol::Http => Self::Http(HttpProxySettings {
                accounts: accounts_from_form(&form.accounts),
                allow_transparent: form.http_allow_transparent,
            }),
            Protocol::Socks => Self::Socks(SocksSettings {
                auth: non_blank(&form.socks_auth),
                accounts: accounts_from_form(&form.accounts),
                udp: form.socks_udp,
                ip: non_blank(&form.socks_ip),
            }),
        }
    }

    /// Reads `settings` for `protocol`. Missing or mistyped fields stay `None`
    /// (or empty) and leave the form template untouched.
    pub fn from_wire(protocol: Protocol, settings: &Value) -> Self {
        match protocol {
            Protocol::Vmess => Self::Vmess(VmessSettings::default()),
            Protocol::Vless => Self::Vless(VlessSettings {
                clients: Vec::new(),
                decryption: str_at(settings, "decryption").and_then(|d| non_blank(&d)),
                fallbacks: fallbacks_from_wire(settings),
            }),
            Protocol::Trojan => Self::Trojan(TrojanSettings {
                clients: Vec::new(),
                fallbacks: fallbacks_from_wire(settings),
            }),
            Protocol::Shadowsocks => Self::Shadowsocks(ShadowsocksSettings {
                clients: Vec::new(),
                method: str_at(settings, "method"),
                password: str_at(settings, "password"),
                network: str_at(settings, "network"),
            }),
            Protocol::Http => Self::Http(HttpProxySettings {
                accounts: accounts_from_wire(settings),
                allow_transparent: bool_at(settings, "allowTransparent").unwrap_or(false),
            }),
            Protocol::Socks => Self::Socks(SocksSettings {
                auth: str_at(settings, "auth"),
                accounts: accounts_from_wire(settings),
                udp: bool_at(settings, "udp").unwrap_or(false),
                ip: str_at(settings, "ip"),
            }),
        }
    }

    pub fn apply_to_form(&self, form: &mut InboundForm) {
        match self {
            Self::Vmess(_) => {}
            Self::Vless(s) => {
                assign(&mut form.vless_decryption, s.decryption.clone());
                form.fallbacks = s.fallbacks.iter().map(Fallback::to_form).collect();
            }
            Self::Trojan(s) => {
                form.fallbacks = s.fallbacks.iter().map(Fallback::to_form).collect();
            }
            Self::Shadowsocks(s) => {
                assign(&mut form.ss_method, s.method.clone());
                assign(&mut form.ss_password, s.password.clone());
                assign(&mut form.ss_network, s.network.clone());
            }
            Self::Http(s) => {
                apply_accounts(&s.accounts, form);
                form.http_allow_transparent = s.allow_transparent;
            }
            Self::Socks(s) => {
                assign(&mut form.socks_auth, s.auth.clone());
                apply_accounts(&s.accounts, form);
                form.socks_udp = s.udp;
                assign(&mut form.socks_ip, s.ip.clone());
            }
        }
    }
}

/// `clients` is always emitted, empty: user entries are provisioned
/// separately from the inbound definition.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VmessSettings {
    pub clients: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VlessSettings {
    pub clients: Vec<Value>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub decryption: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TrojanSettings {
    pub clients: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ShadowsocksSettings {
    pub clients: Vec<Value>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxySettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<Account>,
    pub allow_transparent: bool,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SocksSettings {
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub auth: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<Account>,
    pub udp: bool,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Account {
    pub user: String,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub pass: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Fallback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<Port>,
    #[serde(skip_serializing_if = "is_blank_opt")]
    pub path: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "is_blank_opt")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xver: Option<u64>,
}

impl Fallback {
    fn from_form(f: &FallbackForm) -> Self {
        Self {
            dest: Port::from_form_opt(&f.dest),
            path: non_blank(&f.path),
            kind: non_blank(&f.kind),
            alpn: f
                .alpn
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
            xver: parse_optional_u64(&f.xver),
        }
    }

    fn from_wire(v: &Value) -> Self {
        Self {
            dest: str_at(v, "dest").and_then(|d| Port::from_form_opt(&d)),
            path: str_at(v, "path"),
            kind: str_at(v, "type"),
            alpn: string_list_at(v, "alpn").unwrap_or_default(),
            xver: u64_at(v, "xver"),
        }
    }

    fn to_form(&self) -> FallbackForm {
        FallbackForm {
            dest: self.dest.as_ref().map(Port::to_string).unwrap_or_default(),
            path: self.path.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            alpn: self.alpn.join(","),
            xver: self.xver.map(|x| x.to_string()).unwrap_or_default(),
        }
    }
}

/// Rows without a destination are unfinished editor rows.
fn fallbacks_from_form(rows: &[FallbackForm]) -> Vec<Fallback> {
    rows.iter()
        .map(Fallback::from_form)
        .filter(|f| f.dest.is_some())
        .collect()
}

fn fallbacks_from_wire(settings: &Value) -> Vec<Fallback> {
    array_at(settings, "fallbacks")
        .unwrap_or_default()
        .iter()
        .filter(|v| v.is_object())
        .map(Fallback::from_wire)
        .collect()
}

fn accounts_from_form(rows: &[AccountForm]) -> Vec<Account> {
    rows.iter()
        .filter(|a| !a.user.trim().is_empty())
        .map(|a| Account {
            user: a.user.trim().to_string(),
            pass: non_blank(&a.pass),
        })
        .collect()
}

fn accounts_from_wire(settings: &Value) -> Vec<Account> {
    array_at(settings, "accounts")
        .unwrap_or_default()
        .iter()
        .filter_map(|v| {
            Some(Account {
                user: str_at(v, "user")?,
                pass: str_at(v, "pass"),
            })
        })
        .collect()
}

/// An empty stored list keeps the template's single blank row.
fn apply_accounts(accounts: &[Account], form: &mut InboundForm) {
    if accounts.is_empty() {
        return;
    }
    form.accounts = accounts
        .iter()
        .map(|a| AccountForm {
            user: a.user.clone(),
            pass: a.pass.clone().unwrap_or_default(),
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::defaults;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn wire(form: &InboundForm) -> Value {
        serde_json::to_value(ProtocolSettings::from_form(form)).unwrap()
    }

    #[test]
    fn variant_follows_form_protocol() {
        for protocol in Protocol::ALL {
            assert_eq!(
                ProtocolSettings::from_form(&defaults(protocol)).protocol(),
                protocol
            );
        }
    }

    #[test]
    fn shadowsocks_emits_only_its_fields() {
        let mut form = defaults(Protocol::Shadowsocks);
        form.ss_password = "secret".to_string();
        form.fallbacks = vec![FallbackForm {
            dest: "80".to_string(),
            ..Default::default()
        }];
        form.http_allow_transparent = true;
        assert_eq!(
            wire(&form),
            json!({
                "clients": [],
                "method": "2022-blake3-aes-128-gcm",
                "password": "secret",
                "network": "tcp,udp",
            })
        );
    }

    #[test]
    fn vless_fallbacks_convert_alpn_and_xver() {
        let mut form = defaults(Protocol::Vless);
        form.fallbacks = vec![
            FallbackForm {
                dest: "8080".to_string(),
                path: "/ws".to_string(),
                kind: String::new(),
                alpn: "h2, http/1.1".to_string(),
                xver: "1".to_string(),
            },
            FallbackForm {
                dest: "/dev/shm/h1.sock".to_string(),
                ..Default::default()
            },
            FallbackForm::default(),
        ];
        assert_eq!(
            wire(&form),
            json!({
                "clients": [],
                "decryption": "none",
                "fallbacks": [
                    { "dest": 8080, "path": "/ws", "alpn": ["h2", "http/1.1"], "xver": 1 },
                    { "dest": "/dev/shm/h1.sock" },
                ],
            })
        );
    }

    #[test]
    fn fallbacks_parse_back_to_form_strings() {
        let settings = json!({
            "fallbacks": [
                { "dest": 80, "alpn": ["h2", "http/1.1"], "xver": 2, "type": "tcp" },
                "garbage",
            ]
        });
        let mut form = defaults(Protocol::Trojan);
        ProtocolSettings::from_wire(Protocol::Trojan, &settings).apply_to_form(&mut form);
        assert_eq!(
            form.fallbacks,
            vec![FallbackForm {
                dest: "80".to_string(),
                path: String::new(),
                kind: "tcp".to_string(),
                alpn: "h2,http/1.1".to_string(),
                xver: "2".to_string(),
            }]
        );
    }

    #[test]
    fn missing_decryption_defaults_to_none() {
        let mut form = defaults(Protocol::Vless);
        ProtocolSettings::from_wire(Protocol::Vless, &json!({})).apply_to_form(&mut form);
        assert_eq!(form.vless_decryption, "none");

        let mut form = defaults(Protocol::Vless);
        ProtocolSettings::from_wire(Protocol::Vless, &json!({ "decryption": "" }))
            .apply_to_form(&mut form);
        assert_eq!(form.vless_decryption, "none");
    }

    #[test]
    fn socks_accounts_round_trip() {
        let settings = json!({
            "auth": "password",
            "accounts": [{ "user": "u", "pass": "p" }, { "pass": "orphan" }],
            "udp": true,
            "ip": "127.0.0.1",
        });
        let mut form = defaults(Protocol::Socks);
        ProtocolSettings::from_wire(Protocol::Socks, &settings).apply_to_form(&mut form);
        assert_eq!(form.socks_auth, "password");
        assert_eq!(
            form.accounts,
            vec![AccountForm {
                user: "u".to_string(),
                pass: "p".to_string()
            }]
        );
        assert!(form.socks_udp);
        assert_eq!(
            wire(&form),
            json!({
                "auth": "password",
                "accounts": [{ "user": "u", "pass": "p" }],
                "udp": true,
                "ip": "127.0.0.1",
            })
        );
    }

    #[test]
    fn blank_password_is_omitted() {
        let mut form = defaults(Protocol::Http);
        form.accounts = vec![
            AccountForm {
                user: "open".to_string(),
                pass: "  ".to_string(),
            },
            AccountForm {
                user: "u".to_string(),
                pass: "p".to_string(),
            },
        ];
        assert_eq!(
            wire(&form),
            json!({
                "accounts": [{ "user": "open" }, { "user": "u", "pass": "p" }],
                "allowTransparent": false,
            })
        );

        let mut back = defaults(Protocol::Http);
        ProtocolSettings::from_wire(Protocol::Http, &wire(&form)).apply_to_form(&mut back);
        assert_eq!(back.accounts[0].pass, "");
        assert_eq!(back.accounts[1].pass, "p");
    }

    #[test]
    fn http_blank_account_row_is_omitted() {
        let form = defaults(Protocol::Http);
        assert_eq!(wire(&form), json!({ "allowTransparent": false }));

        let mut form = defaults(Protocol::Http);
        ProtocolSettings::from_wire(Protocol::Http, &json!({ "accounts": [] }))
            .apply_to_form(&mut form);
        assert_eq!(form.accounts, vec![AccountForm::default()]);
    }
}
