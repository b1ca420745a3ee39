//! Run configuration. Built once from CLI arguments and passed down explicitly.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// What to do when a leaf declares a datapoint type with no action table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownDatapointPolicy {
    /// Drop every leaf action document of the enclosing middle-level scan.
    #[default]
    CancelScan,
    /// Drop only the offending leaf's document.
    SkipLeaf,
}

/// Whether parent menus keep links to leaf documents that were not built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    #[default]
    Always,
    BuiltOnly,
}

/// Output flavour. Both phone families read the same menu XML, but RTX
/// handsets expect Latin-6 text and live in their own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    Snom,
    Rtx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Iso8859_10,
}

impl Encoding {
    /// Name written into the XML declaration.
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Iso8859_10 => "iso-8859-10",
        }
    }
}

impl Variant {
    pub fn encoding(self) -> Encoding {
        match self {
            Variant::Snom => Encoding::Utf8,
            Variant::Rtx => Encoding::Iso8859_10,
        }
    }

    /// Directory below the web root, also used in menu URLs.
    pub fn dir_name(self) -> &'static str {
        match self {
            Variant::Snom => "knx_xml",
            Variant::Rtx => "knx_xml_rtx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Title of the root menu.
    pub root_title: String,
    /// Reference of the root document (file stem).
    pub master_name: String,
    /// Prefix for links between menu documents, ends with '/'.
    pub menu_http_root: String,
    /// Prefix for leaf action URLs, ends with '/'.
    pub action_http_root: String,
    pub unknown_datapoint: UnknownDatapointPolicy,
    pub links: LinkPolicy,
}

pub const DEFAULT_ROOT_TITLE: &str = "KNX";
pub const DEFAULT_MASTER_NAME: &str = "knx_multi";
pub const DEFAULT_ACTION_PORT: u16 = 1234;

impl GeneratorConfig {
    /// Standard layout for a gateway host: menus under `http://{host}/{dir}/`,
    /// actions under `http://{host}:{action_port}/`.
    pub fn for_host(host: &str, variant: Variant, action_port: u16) -> Self {
        Self {
            root_title: DEFAULT_ROOT_TITLE.to_string(),
            master_name: DEFAULT_MASTER_NAME.to_string(),
            menu_http_root: format!("http://{}/{}/", host, variant.dir_name()),
            action_http_root: format!("http://{}:{}/", host, action_port),
            unknown_datapoint: UnknownDatapointPolicy::default(),
            links: LinkPolicy::default(),
        }
    }
}

/// Address of the interface that would route to the LAN.
///
/// Connecting a UDP socket sends nothing; the target does not need to exist.
pub fn discover_local_ip() -> IpAddr {
    let probe = || -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect((Ipv4Addr::new(10, 255, 255, 255), 1))?;
        Ok(socket.local_addr()?.ip())
    };
    match probe() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::warn!("local address discovery failed ({}), using loopback", e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}
