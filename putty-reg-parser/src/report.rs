//! Text renderers for parsed sessions.
//!
//! [`render_summary`] produces the Markdown block attached to a credential
//! finding; [`render_full_dump`] produces the plaintext analysis report that
//! lists every field of every session. Both are deterministic.

use super::types::Session;
use std::fmt::Write;

/// Port PuTTY connects to when a session does not set `PortNumber`.
pub const DEFAULT_PORT: u32 = 22;

/// Shown when a session has no `UserName`.
pub const MISSING_VALUE: &str = "N/A";

const SUMMARY_TITLE: &str = "# PuTTY Sessions Found";
const DUMP_TITLE: &str = "PuTTY Registry Analysis";
const DUMP_MARGIN: &str = "   ";

/// Render a Markdown summary of the sessions that name a host.
///
/// Sessions without `HostName` are skipped. Returns an empty string when no
/// session qualifies.
pub fn render_summary(sessions: &[Session]) -> String {
    let mut out = String::new();

    for session in sessions.iter().filter(|s| s.has_host_name()) {
        if out.is_empty() {
            out.push_str(SUMMARY_TITLE);
            out.push_str("\n\n");
        }

        let port = session
            .port_number()
            .map(ToString::to_string)
            .unwrap_or_else(|| DEFAULT_PORT.to_string());
        let user = session
            .user_name()
            .map(ToString::to_string)
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        // Writing into a String cannot fail.
        let _ = writeln!(out, "## Session: {}", session.session_name);
        if let Some(host) = session.host_name() {
            let _ = writeln!(out, "* **Hostname**: {}", host);
        }
        let _ = writeln!(out, "* **Port**: {}", port);
        let _ = writeln!(out, "* **Username**: {}", user);
        if let Some(key_file) = session.public_key_file() {
            let _ = writeln!(out, "* **Key File**: {}", key_file);
        }
        out.push('\n');
    }

    out
}

/// Render every field of every session as an indented plaintext report.
pub fn render_full_dump(sessions: &[Session]) -> String {
    let mut lines: Vec<String> = vec![
        DUMP_TITLE.to_string(),
        "=".repeat(DUMP_TITLE.len()),
        String::new(),
    ];

    for session in sessions {
        lines.push(format!("Session: {}", session.session_name));
        for (key, value) in &session.fields {
            lines.push(format!("{}{}: {}", DUMP_MARGIN, key, value));
        }
        lines.push(String::new());
    }

    indent(&lines.join("\n"), DUMP_MARGIN)
}

/// Prefix every line that has visible content with `margin`.
/// Whitespace-only lines are left as they are.
fn indent(text: &str, margin: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", margin, line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldValue, HOST_NAME, PORT_NUMBER, PUBLIC_KEY_FILE, USER_NAME};

    fn session(name: &str, fields: &[(&str, FieldValue)]) -> Session {
        let mut s = Session::new(name);
        for (k, v) in fields {
            s.fields.insert(*k, v.clone());
        }
        s
    }

    #[test]
    fn test_summary_full_block() {
        let sessions = vec![session(
            "myhost",
            &[
                (HOST_NAME, "myhost.example.com".into()),
                (PORT_NUMBER, FieldValue::Dword(22)),
                (USER_NAME, "alice".into()),
                (PUBLIC_KEY_FILE, r"C:\keys\alice.ppk".into()),
            ],
        )];
        let expected = "# PuTTY Sessions Found\n\n\
                        ## Session: myhost\n\
                        * **Hostname**: myhost.example.com\n\
                        * **Port**: 22\n\
                        * **Username**: alice\n\
                        * **Key File**: C:\\keys\\alice.ppk\n\n";
        assert_eq!(render_summary(&sessions), expected);
    }

    #[test]
    fn test_summary_defaults() {
        let sessions = vec![session("bare", &[(HOST_NAME, "10.0.0.1".into())])];
        let summary = render_summary(&sessions);
        assert!(summary.contains("* **Port**: 22\n"));
        assert!(summary.contains("* **Username**: N/A\n"));
        assert!(!summary.contains("Key File"));
    }

    #[test]
    fn test_summary_skips_sessions_without_host() {
        let sessions = vec![
            session("Default%20Settings", &[("TermWidth", FieldValue::Dword(80))]),
            session("web", &[(HOST_NAME, "web.example.com".into())]),
        ];
        let summary = render_summary(&sessions);
        assert!(!summary.contains("Default%20Settings"));
        assert!(summary.contains("## Session: web\n"));
    }

    #[test]
    fn test_summary_empty_without_hosts() {
        let sessions = vec![session("defaults", &[("TermWidth", FieldValue::Dword(80))])];
        assert_eq!(render_summary(&sessions), "");
        assert_eq!(render_summary(&[]), "");
    }

    #[test]
    fn test_summary_blocks_separated_by_blank_line() {
        let sessions = vec![
            session("a", &[(HOST_NAME, "a".into())]),
            session("b", &[(HOST_NAME, "b".into())]),
        ];
        let summary = render_summary(&sessions);
        assert!(summary.contains("* **Username**: N/A\n\n## Session: b\n"));
    }

    #[test]
    fn test_full_dump_layout() {
        let sessions = vec![
            session(
                "myhost",
                &[
                    (HOST_NAME, "myhost.example.com".into()),
                    (PORT_NUMBER, FieldValue::Dword(2222)),
                ],
            ),
            session("defaults", &[("TermWidth", FieldValue::Dword(80))]),
        ];
        let expected = "   PuTTY Registry Analysis\n\
                        \x20  =======================\n\
                        \n\
                        \x20  Session: myhost\n\
                        \x20     HostName: myhost.example.com\n\
                        \x20     PortNumber: 2222\n\
                        \n\
                        \x20  Session: defaults\n\
                        \x20     TermWidth: 80\n";
        assert_eq!(render_full_dump(&sessions), expected);
    }

    #[test]
    fn test_full_dump_no_sessions() {
        assert_eq!(
            render_full_dump(&[]),
            "   PuTTY Registry Analysis\n   =======================\n"
        );
    }

    #[test]
    fn test_renderers_are_deterministic() {
        let sessions = vec![session("a", &[(HOST_NAME, "a".into()), (USER_NAME, "u".into())])];
        assert_eq!(render_summary(&sessions), render_summary(&sessions));
        assert_eq!(render_full_dump(&sessions), render_full_dump(&sessions));
    }
}
