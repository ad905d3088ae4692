// src/core/scanner/ssl_scanner.rs

use tracing::{debug, error, info, warn};

use crate::core::config::ScanConfig;
use crate::core::error::TlsProbeError;
use crate::core::knowledge_base::{FindingCode, finding};
use crate::core::models::{Finding, ProbeResult, Target};
use chrono::{DateTime, Utc};
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ProtocolVersion, RootCertStore};
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

/// What a successful handshake tells us.
#[derive(Debug, Clone)]
pub struct TlsObservation {
    pub not_after: DateTime<Utc>,
    pub protocol: String,
}

/// Runs the TLS probe. Returns an empty result for non-https targets.
///
/// On success emits the expiry finding followed by the protocol finding.
/// On failure emits exactly one finding describing the failure.
pub async fn run_ssl_scan(target: &Target, config: &ScanConfig) -> ProbeResult {
    if !target.is_https() {
        debug!(url = %target.url, "Target is not HTTPS, skipping SSL/TLS scan.");
        return Vec::new();
    }

    info!(host = %target.host, port = target.port, "Starting SSL/TLS scan.");
    let findings = match perform_tls_scan(target, config).await {
        Ok(observation) => analyze_observation(&observation, Utc::now(), config),
        Err(e) => {
            warn!(error = %e, "SSL/TLS scan failed.");
            vec![failure_finding(&e, &target.host)]
        }
    };
    info!(findings = %findings.len(), "SSL/TLS scan finished.");
    findings
}

async fn perform_tls_scan(target: &Target, config: &ScanConfig) -> Result<TlsObservation, TlsProbeError> {
    let addrs: Vec<SocketAddr> = resolve_host(&target.host, config)
        .await?
        .into_iter()
        .map(|ip| SocketAddr::new(ip, target.port))
        .collect();
    let stream = connect_any(&addrs, config.timeout()).await?;

    let server_name = ServerName::try_from(target.host.as_str())
        .map(|name| name.to_owned())
        .map_err(|e| TlsProbeError::Other(format!("invalid server name {}: {}", target.host, e)))?;

    debug!(host = %target.host, "Performing TLS handshake.");
    let connector = TlsConnector::from(Arc::new(client_config()?));
    let tls_stream = timeout(config.timeout(), connector.connect(server_name, stream))
        .await
        .map_err(|_| TlsProbeError::Other("TLS handshake timed out".to_string()))?
        .map_err(classify_handshake_error)?;

    let (_, connection) = tls_stream.get_ref();
    let protocol = connection
        .protocol_version()
        .map(protocol_name)
        .unwrap_or_else(|| "unknown".to_string());

    let cert = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| TlsProbeError::Other("server did not provide a certificate".to_string()))?;

    let (_, x509) = parse_x509_certificate(cert.as_ref()).map_err(|e| {
        error!(error = %e, "Failed to parse X.509 certificate");
        TlsProbeError::Other(format!("X.509 parse error: {}", e))
    })?;

    info!(subject = %x509.subject(), issuer = %x509.issuer(), %protocol, "Successfully parsed certificate.");

    Ok(TlsObservation {
        not_after: asn1_time_to_chrono_utc(&x509.validity().not_after),
        protocol,
    })
}

/// Tries each address in order, each with its own timeout. Reports the last
/// failure only once every address has failed.
pub async fn connect_any(addrs: &[SocketAddr], per_attempt: Duration) -> Result<TcpStream, TlsProbeError> {
    let mut last_error = TlsProbeError::Other("no addresses to connect to".to_string());
    for addr in addrs {
        debug!(%addr, "Connecting TCP stream.");
        match timeout(per_attempt, TcpStream::connect(*addr)).await {
            Ok(Ok(stream)) => return Ok(stream),
            Ok(Err(e)) => {
                warn!(%addr, error = %e, "TCP connection failed");
                last_error = TlsProbeError::Other(format!("TCP connection error: {}", e));
            }
            Err(_) => {
                warn!(%addr, "TCP connection timed out");
                last_error = TlsProbeError::Other(format!("connection to {} timed out", addr));
            }
        }
    }
    error!(error = %last_error, "Every address failed to connect");
    Err(last_error)
}

async fn resolve_host(host: &str, config: &ScanConfig) -> Result<Vec<IpAddr>, TlsProbeError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![ip]);
    }

    let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        debug!(error = %e, "System resolver config unavailable, using defaults.");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    });

    debug!(host, "Resolving hostname.");
    let resolve_error = |reason: String| TlsProbeError::Resolve { host: host.to_string(), reason };
    let lookup = timeout(config.timeout(), resolver.lookup_ip(host))
        .await
        .map_err(|_| resolve_error("lookup timed out".to_string()))?
        .map_err(|e| resolve_error(e.to_string()))?;

    let ips: Vec<IpAddr> = lookup.iter().collect();
    if ips.is_empty() {
        return Err(resolve_error("no addresses returned".to_string()));
    }
    debug!(host, addresses = ips.len(), "Hostname resolved.");
    Ok(ips)
}

fn client_config() -> Result<ClientConfig, TlsProbeError> {
    let roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| TlsProbeError::Other(format!("TLS client config error: {}", e)))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(config)
}

/// Handshake errors coming from rustls (alerts, certificate validation) and
/// a clean close mid-handshake are TLS failures. Resets and other plain I/O
/// errors are not.
fn classify_handshake_error(e: std::io::Error) -> TlsProbeError {
    let is_tls = e.get_ref().is_some_and(|inner| inner.is::<rustls::Error>())
        || matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::UnexpectedEof);
    if is_tls {
        error!(error = %e, "TLS handshake failed");
        TlsProbeError::Handshake(e.to_string())
    } else {
        error!(error = %e, "I/O error during TLS handshake");
        TlsProbeError::Other(format!("connection error during handshake: {}", e))
    }
}

/// Names a protocol version the way it is reported in findings.
pub fn protocol_name(version: ProtocolVersion) -> String {
    match version {
        ProtocolVersion::SSLv2 => "SSLv2".to_string(),
        ProtocolVersion::SSLv3 => "SSLv3".to_string(),
        ProtocolVersion::TLSv1_0 => "TLSv1".to_string(),
        ProtocolVersion::TLSv1_1 => "TLSv1.1".to_string(),
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        other => format!("{:?}", other),
    }
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}

/// Whole days until `not_after`, floored. One second past expiry is day -1.
pub fn days_until_expiry(not_after: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    not_after.signed_duration_since(now).num_seconds().div_euclid(86_400)
}

pub fn analyze_observation(observation: &TlsObservation, now: DateTime<Utc>, config: &ScanConfig) -> Vec<Finding> {
    let days = days_until_expiry(observation.not_after, now);
    vec![
        expiry_finding(days, config.expiry_warning_days),
        protocol_finding(&observation.protocol, config),
    ]
}

pub fn expiry_finding(days: i64, warning_days: i64) -> Finding {
    if days < 0 {
        debug!(days, "Certificate is expired, adding Critical finding.");
        finding(FindingCode::SslExpired)
            .with_description(format!("The SSL certificate expired {} days ago.", days.abs()))
    } else if days < warning_days {
        debug!(days, "Certificate is expiring soon, adding Medium finding.");
        finding(FindingCode::SslExpiringSoon)
            .with_description(format!("The SSL certificate will expire in {} days.", days))
    } else {
        finding(FindingCode::SslValid)
            .with_description(format!("SSL certificate is valid for {} more days.", days))
    }
}

pub fn protocol_finding(version: &str, config: &ScanConfig) -> Finding {
    if config.is_deprecated_protocol(version) {
        debug!(version, "Deprecated protocol negotiated, adding High finding.");
        finding(FindingCode::SslProtocolOutdated).with_description(format!(
            "The server supports {} which has known vulnerabilities.",
            version
        ))
    } else {
        Finding::info(
            format!("Using {}", version),
            format!("The connection uses {} protocol.", version),
        )
    }
}

pub fn failure_finding(error: &TlsProbeError, host: &str) -> Finding {
    match error {
        TlsProbeError::Handshake(_) => {
            finding(FindingCode::SslHandshakeFailed).with_description(error.to_string())
        }
        TlsProbeError::Resolve { .. } => finding(FindingCode::SslResolveFailed)
            .with_description(format!("Could not resolve hostname: {}", host)),
        TlsProbeError::Other(message) => finding(FindingCode::SslProbeError)
            .with_description(format!("An error occurred: {}", message)),
    }
}
