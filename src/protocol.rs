use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SS2022_METHOD_2022_BLAKE3_AES_128_GCM: &str = "2022-blake3-aes-128-gcm";
pub const VLESS_DECRYPTION_NONE: &str = "none";
pub const SS_NETWORK_TCP_UDP: &str = "tcp,udp";
pub const SOCKS_AUTH_NOAUTH: &str = "noauth";
pub const HEADER_TYPE_NONE: &str = "none";
pub const HEADER_TYPE_HTTP: &str = "http";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Vmess,
    #[default]
    Vless,
    Trojan,
    Shadowsocks,
    Http,
    Socks,
}

impl Protocol {
    pub const ALL: [Protocol; 6] = [
        Self::Vmess,
        Self::Vless,
        Self::Trojan,
        Self::Shadowsocks,
        Self::Http,
        Self::Socks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vmess => "vmess",
            Self::Vless => "vless",
            Self::Trojan => "trojan",
            Self::Shadowsocks => "shadowsocks",
            Self::Http => "http",
            Self::Socks => "socks",
        }
    }

    /// User entries live in `settings.clients` for these protocols.
    pub fn carries_clients(self) -> bool {
        matches!(
            self,
            Self::Vmess | Self::Vless | Self::Trojan | Self::Shadowsocks
        )
    }

    /// `http` and `socks` inbounds are plain listeners without a stream layer.
    pub fn has_stream_settings(self) -> bool {
        !matches!(self, Self::Http | Self::Socks)
    }
}

impl FromStr for Protocol {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| UnknownVariant {
                kind: "protocol",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport ("stream") kinds understood by the Xray config compiler.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Tcp,
    Kcp,
    Ws,
    Http,
    Quic,
    Grpc,
    HttpUpgrade,
    SplitHttp,
    DomainSocket,
}

impl Network {
    pub const ALL: [Network; 9] = [
        Self::Tcp,
        Self::Kcp,
        Self::Ws,
        Self::Http,
        Self::Quic,
        Self::Grpc,
        Self::HttpUpgrade,
        Self::SplitHttp,
        Self::DomainSocket,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Kcp => "kcp",
            Self::Ws => "ws",
            Self::Http => "http",
            Self::Quic => "quic",
            Self::Grpc => "grpc",
            Self::HttpUpgrade => "httpupgrade",
            Self::SplitHttp => "splithttp",
            Self::DomainSocket => "domainsocket",
        }
    }

    /// Key of the per-transport object inside `streamSettings`.
    pub fn settings_key(self) -> &'static str {
        match self {
            Self::Tcp => "tcpSettings",
            Self::Kcp => "kcpSettings",
            Self::Ws => "wsSettings",
            Self::Http => "httpSettings",
            Self::Quic => "quicSettings",
            Self::Grpc => "grpcSettings",
            Self::HttpUpgrade => "httpupgradeSettings",
            Self::SplitHttp => "splithttpSettings",
            Self::DomainSocket => "dsSettings",
        }
    }
}

impl FromStr for Network {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == s.trim())
            .ok_or_else(|| UnknownVariant {
                kind: "network",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    #[default]
    None,
    Tls,
    Reality,
}

impl Security {
    pub const ALL: [Security; 3] = [Self::None, Self::Tls, Self::Reality];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tls => "tls",
            Self::Reality => "reality",
        }
    }
}

impl FromStr for Security {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| UnknownVariant {
                kind: "security",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Security {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
