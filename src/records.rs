use std::{
    fmt,
    net::Ipv4Addr,
};

/// The record types we wait for. The order of [`RecordType::ALL`] is the order in which they are probed.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    MX,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::A, RecordType::NS, RecordType::MX];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::MX => "MX",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single resolved record, reduced to the fields we report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    A(Ipv4Addr),
    Ns { host: String },
    Mx { host: String, preference: u16 },
}

impl Record {
    /// One Markdown bullet line, as it appears in a notification.
    pub fn markdown_line(&self) -> String {
        match self {
            Record::A(ip) => format!("  - `{ip}`\n"),
            Record::Ns { host } => format!("  - `{host}`\n"),
            Record::Mx { host, preference } => format!("  - Host: `{host}`, Pref: {preference}\n"),
        }
    }
}

/// Outcome of one lookup attempt. Lookup errors and empty answers are both [`CheckResult::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Found(Vec<Record>),
    NotFound,
}

impl CheckResult {
    pub fn is_found(&self) -> bool {
        matches!(self, CheckResult::Found(_))
    }
}
