pub mod lifecycle;

use serde::{Deserialize, Serialize};

// MODELS

/// What a gate resolves: which flag, and where its cookie text comes from.
///
/// `server_cookie_text` present selects server mode and the gate resolves
/// synchronously against that text; absent selects client mode and the gate
/// defers to the ambient cookie source. Presence is what matters, not the
/// value: `Some("")` is still server mode with no cookies set.
///
/// The query is serializable so a server can embed the exact query it
/// rendered with into its hydration payload, and the client can re-mount
/// from it and reach the same decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagQuery {
    pub flag_name: String,
    pub server_cookie_text: Option<String>,
}

impl FlagQuery {
    /// Query resolved synchronously from a request's raw `Cookie` header
    pub fn server(flag_name: &str, cookie_text: &str) -> Self {
        Self {
            flag_name: flag_name.to_string(),
            server_cookie_text: Some(cookie_text.to_string()),
        }
    }

    /// Query resolved later from the ambient cookie source
    pub fn client(flag_name: &str) -> Self {
        Self {
            flag_name: flag_name.to_string(),
            server_cookie_text: None,
        }
    }
}

/// Where a gate currently stands with its decision.
///
/// Mode and resolution are separate axes on purpose: `ServerResolved` and
/// `ClientResolved` record which path produced the decision, and
/// `Unresolved` only ever exists in client mode, between mount and the
/// deferred read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    ServerResolved { enabled: bool },
    ClientResolved { enabled: bool },
}

impl Resolution {
    /// The decision, if one has been made yet
    pub fn enabled(&self) -> Option<bool> {
        match self {
            Resolution::Unresolved => None,
            Resolution::ServerResolved { enabled } | Resolution::ClientResolved { enabled } => {
                Some(*enabled)
            }
        }
    }

    /// Whether content should render right now; unresolved renders nothing
    pub fn is_enabled(&self) -> bool {
        self.enabled().unwrap_or(false)
    }
}

// HELPER FUNCTIONS

// Validating the flag name before it is used as a cookie name
pub fn validate_flag_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Flag name cannot be empty".to_string());
    }

    if name.len() > 64 {
        return Err("Flag name is too long (Max: 64 characters)".to_string());
    }

    if name
        .chars()
        .any(|c| c == '=' || c == ';' || c.is_whitespace() || c.is_control())
    {
        return Err("Flag name cannot contain '=', ';', whitespace or control characters".to_string());
    }

    Ok(())
}
