//! SMTP banner grab
//!
//! Opens a TCP connection, reads the server greeting, and hangs up. No SMTP
//! command is ever sent.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Upper bound on greeting lines read from a multi-line (`220-`) banner
const MAX_GREETING_LINES: usize = 32;

/// Outcome of a reachability probe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// True only if a greeting code in [200, 400) was received
    pub connected: bool,

    /// Three-digit greeting code, if one was read
    pub code: Option<u16>,

    /// First line of the greeting, without line terminators
    pub banner: Option<String>,
}

impl ProbeResult {
    /// The result for any connect or read failure
    pub fn unreachable() -> Self {
        Self::default()
    }
}

/// Probes `host:port` and classifies the greeting
///
/// `connect_timeout` bounds the TCP handshake and, separately, the wait for
/// the greeting. Every failure is folded into `ProbeResult::unreachable()`.
pub async fn probe_mail_host(host: &str, port: u16, connect_timeout: Duration) -> ProbeResult {
    tracing::debug!("Probing {}:{}", host, port);

    let stream = match timeout(connect_timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            tracing::debug!("Connect to {}:{} failed: {}", host, port, e);
            return ProbeResult::unreachable();
        }
        Err(_) => {
            tracing::debug!("Connect to {}:{} timed out", host, port);
            return ProbeResult::unreachable();
        }
    };

    let lines = match timeout(connect_timeout, read_greeting(stream)).await {
        Ok(Ok(lines)) => lines,
        Ok(Err(e)) => {
            tracing::debug!("Reading greeting from {} failed: {}", host, e);
            return ProbeResult::unreachable();
        }
        Err(_) => {
            tracing::debug!("Greeting from {} timed out", host);
            return ProbeResult::unreachable();
        }
    };

    let result = classify_greeting(&lines);
    tracing::debug!("Probe of {}:{} -> {:?}", host, port, result);
    result
}

/// Reads the greeting, following `NNN-` continuation lines; the stream is
/// dropped (closed) on return
async fn read_greeting(stream: TcpStream) -> std::io::Result<Vec<String>> {
    let mut reader = BufReader::new(stream);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        let continues = line.as_bytes().get(3) == Some(&b'-');
        lines.push(line);

        if !continues || lines.len() >= MAX_GREETING_LINES {
            break;
        }
    }

    Ok(lines)
}

/// Classifies greeting lines already read from a server
///
/// The code comes from the first three characters of the first line. A
/// greeting without a three-digit code counts as a failure.
pub fn classify_greeting(lines: &[String]) -> ProbeResult {
    let Some(first) = lines.first() else {
        return ProbeResult::unreachable();
    };

    let Some(code) = first
        .get(..3)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u16>().ok())
    else {
        return ProbeResult::unreachable();
    };

    ProbeResult {
        connected: (200..400).contains(&code),
        code: Some(code),
        banner: Some(first.clone()),
    }
}
