// URL safety checks for backlinks, featured images, and job application links.
//
// A link is safe when it is an absolute http(s) URL pointing at a public
// host. Anything that resolves to the local machine or a private network is
// rejected without any DNS lookup — only the literal host is inspected.

use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;
use url::{Host, Url};

/// Why a URL was judged unsafe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsafeUrl {
    #[error("not a valid absolute URL")]
    Unparseable,
    #[error("scheme `{0}` is not http or https")]
    Scheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("host `{0}` is a local name")]
    LocalHost(String),
    #[error("address `{0}` is loopback, private, or otherwise non-public")]
    PrivateAddress(String),
}

/// Host suffixes that only resolve on a local network.
const LOCAL_SUFFIXES: [&str; 3] = [".localhost", ".local", ".internal"];

/// Check that `raw` is a public http(s) URL.
pub fn check_url(raw: &str) -> Result<(), UnsafeUrl> {
    let url = Url::parse(raw.trim()).map_err(|_| UnsafeUrl::Unparseable)?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UnsafeUrl::Scheme(other.to_string())),
    }

    match url.host() {
        None => Err(UnsafeUrl::MissingHost),
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            if domain.is_empty()
                || domain == "localhost"
                || LOCAL_SUFFIXES.iter().any(|s| domain.ends_with(s))
            {
                Err(UnsafeUrl::LocalHost(domain))
            } else {
                Ok(())
            }
        }
        Some(Host::Ipv4(addr)) => {
            if is_public_v4(addr) {
                Ok(())
            } else {
                Err(UnsafeUrl::PrivateAddress(addr.to_string()))
            }
        }
        Some(Host::Ipv6(addr)) => {
            if is_public_v6(addr) {
                Ok(())
            } else {
                Err(UnsafeUrl::PrivateAddress(addr.to_string()))
            }
        }
    }
}

fn is_public_v4(addr: Ipv4Addr) -> bool {
    let [a, b, ..] = addr.octets();
    // 100.64.0.0/10 is carrier-grade NAT shared space
    let shared = a == 100 && (b & 0xc0) == 64;
    let this_network = a == 0;
    !(addr.is_loopback()
        || addr.is_private()
        || addr.is_link_local()
        || addr.is_unspecified()
        || addr.is_broadcast()
        || addr.is_documentation()
        || shared
        || this_network)
}

fn is_public_v6(addr: Ipv6Addr) -> bool {
    if addr.is_loopback() || addr.is_unspecified() {
        return false;
    }
    // Covers both ::ffff:a.b.c.d and the deprecated ::a.b.c.d form
    if let Some(v4) = addr.to_ipv4() {
        return is_public_v4(v4);
    }
    let [first, second, ..] = addr.segments();
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    let site_local = (first & 0xffc0) == 0xfec0;
    let documentation = first == 0x2001 && second == 0x0db8;
    !(unique_local || link_local || site_local || documentation)
}
