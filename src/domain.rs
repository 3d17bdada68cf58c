/// Hostname decomposition using the public suffix list
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A hostname split at its registrable-domain boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDomain {
    pub domain: String,
    pub subdomain: String,
}

impl ParsedDomain {
    fn whole(hostname: String) -> ParsedDomain {
        ParsedDomain {
            domain: hostname,
            subdomain: String::new(),
        }
    }
}

/// Split a hostname into registrable domain and subdomain
///
/// Algorithm:
/// 1. Lowercase and drop a trailing root dot
/// 2. IP literals and empty hosts are returned whole
/// 3. Look up the longest matching public suffix
/// 4. If the suffix is not on the list (localhost, intranet names, made-up TLDs):
///    → Return the whole hostname as the domain
/// 5. Else:
///    → domain = suffix plus one label, subdomain = everything to its left
///
/// Examples:
/// - mail.google.com → ("google.com", "mail")
/// - news.bbc.co.uk → ("bbc.co.uk", "news")
/// - a.b.example.com → ("example.com", "a.b")
/// - localhost → ("localhost", "")
pub fn parse_hostname(hostname: &str) -> ParsedDomain {
    let host = hostname.trim().trim_end_matches('.').to_ascii_lowercase();

    if host.is_empty() || is_ip_literal(&host) {
        return ParsedDomain::whole(host);
    }

    let listed = psl::suffix(host.as_bytes()).is_some_and(|suffix| suffix.is_known());
    if !listed {
        return ParsedDomain::whole(host);
    }

    match psl::domain_str(&host) {
        Some(domain) => {
            let subdomain = host[..host.len() - domain.len()].trim_end_matches('.');
            ParsedDomain {
                domain: domain.to_string(),
                subdomain: subdomain.to_string(),
            }
        }
        // The host is itself a public suffix (e.g. "co.uk")
        None => ParsedDomain::whole(host),
    }
}

/// Check for IPv4, bare IPv6 or bracketed IPv6 hosts
fn is_ip_literal(host: &str) -> bool {
    let unbracketed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    unbracketed.parse::<IpAddr>().is_ok()
}
