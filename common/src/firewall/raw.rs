//! Free-form rules typed by an operator, e.g. `-A INPUT -p tcp --dport 80 -j ACCEPT`.
//!
//! The text ends up as arguments of a privileged command, so it is tokenized on
//! whitespace and every token is checked against a character allow-list. Options are
//! read the way the filter binary's `getopt_long` reads them. A short option is named by
//! its first letter even with a value attached. Long options are cut at `=` and must be
//! spelled out in full, because the binary expands abbreviations. Only options on the
//! accepted lists pass; table-wide and chain-management flags get a dedicated error.

use std::fmt;
use std::str::FromStr;

use super::RuleError;

const FORBIDDEN_SHORT: &[char] = &['F', 'X', 'Z', 'P', 'N', 'E', 't'];

const FORBIDDEN_LONG: &[&str] = &[
    "--flush",
    "--delete-chain",
    "--zero",
    "--policy",
    "--new-chain",
    "--rename-chain",
    "--table",
    "--modprobe",
];

/// Options that place, match or target a single rule.
const ACCEPTED_SHORT: &[char] = &['A', 'D', 'I', 's', 'd', 'p', 'j', 'i', 'o', 'm'];

const ACCEPTED_LONG: &[&str] = &[
    "--append",
    "--delete",
    "--insert",
    "--source",
    "--destination",
    "--protocol",
    "--jump",
    "--in-interface",
    "--out-interface",
    "--match",
    "--sport",
    "--dport",
    "--sports",
    "--dports",
    "--state",
    "--ctstate",
    "--icmp-type",
    "--syn",
    "--tcp-flags",
    "--comment",
    "--reject-with",
    "--log-prefix",
    "--log-level",
    "--limit",
    "--limit-burst",
    "--mac-source",
    "--src-range",
    "--dst-range",
    "--to-destination",
    "--to-source",
    "--to-ports",
];

/// A validated list of trailing arguments for the filter binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    tokens: Vec<String>,
}

impl RawRule {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl FromStr for RawRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<String> = s.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(RuleError::Empty);
        }

        for token in &tokens {
            if !token.chars().all(is_allowed_char) {
                return Err(RuleError::ForbiddenCharacter(token.clone()));
            }
            if token.starts_with('-') {
                check_option(token)?;
            }
        }

        Ok(Self { tokens })
    }
}

impl fmt::Display for RawRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '/' | ',' | '=' | '!' | '+' | '-')
}

fn check_option(token: &str) -> Result<(), RuleError> {
    if let Some(long) = token.strip_prefix("--") {
        let name: &str = long.split('=').next().unwrap_or_default();
        let flag: String = format!("--{name}");

        // Exact names win over abbreviations (`--delete` vs `--delete-chain`).
        if ACCEPTED_LONG.contains(&flag.as_str()) {
            return Ok(());
        }
        // Any other prefix of a forbidden name is an abbreviation of it.
        if !name.is_empty() && FORBIDDEN_LONG.iter().any(|forbidden| forbidden.starts_with(&flag)) {
            return Err(RuleError::ForbiddenFlag(token.to_string()));
        }
        return Err(RuleError::UnsupportedOption(token.to_string()));
    }

    let mut letters = token.chars().skip(1);
    let Some(letter) = letters.next() else {
        return Err(RuleError::UnsupportedOption(token.to_string()));
    };
    if FORBIDDEN_SHORT.contains(&letter) {
        return Err(RuleError::ForbiddenFlag(token.to_string()));
    }
    // `-vtnat` would read as `-v -t nat`, so short options stand alone.
    if letters.next().is_none() && ACCEPTED_SHORT.contains(&letter) {
        return Ok(());
    }
    Err(RuleError::UnsupportedOption(token.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
