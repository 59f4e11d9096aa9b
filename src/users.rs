//! Demo identities and role-gated navigation.
//!
//! Profiles serialize to the same JSON layout the dashboard keeps in browser
//! storage. The server never stores a selection; the client owns it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::InsightError;

// ---

/// Profile key the dashboard starts with when nothing is stored.
pub const DEFAULT_USER_KEY: &str = "admin";

/// Solution areas a profile can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Solution {
    Advisory,
    Cvs,
    Twin,
    Command,
    Sustain,
    Ops,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    // ---
    pub id: u32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub permissions: BTreeSet<Solution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl UserProfile {
    // ---
    pub fn has_permission(&self, solution: Solution) -> bool {
        self.permissions.contains(&solution)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: Solution,
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Sidebar entries in display order.
pub const NAVIGATION: [NavItem; 6] = [
    NavItem {
        id: Solution::Advisory,
        name: "Advisory",
        path: "/advisory",
        description: "Strategic consulting",
    },
    NavItem {
        id: Solution::Cvs,
        name: "CVS",
        path: "/cvs",
        description: "Computer vision",
    },
    NavItem {
        id: Solution::Twin,
        name: "Twin",
        path: "/twin",
        description: "Digital twin",
    },
    NavItem {
        id: Solution::Command,
        name: "Command",
        path: "/command",
        description: "Control center",
    },
    NavItem {
        id: Solution::Sustain,
        name: "Sustain",
        path: "/sustain",
        description: "Sustainability",
    },
    NavItem {
        id: Solution::Ops,
        name: "Ops",
        path: "/ops",
        description: "Operations",
    },
];

/// Sidebar entries visible to `profile`, in display order.
pub fn navigation(profile: &UserProfile) -> Vec<NavItem> {
    NAVIGATION
        .into_iter()
        .filter(|item| profile.has_permission(item.id))
        .collect()
}

/// The fixed set of demo profiles, keyed by the name the login switcher uses.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<(String, UserProfile)>,
}

impl UserDirectory {
    // ---
    pub fn builtin() -> Self {
        // ---
        use Solution::*;

        let users = vec![
            (
                "admin".to_string(),
                profile(
                    1,
                    "InfAIra Admin",
                    "infaira.admin@infaira.com",
                    "Admin",
                    "3b82f6",
                    &[Advisory, Cvs, Twin, Command, Sustain, Ops],
                    None,
                ),
            ),
            (
                "fmOps".to_string(),
                profile(
                    2,
                    "InfAIra FM Ops",
                    "infaira.fmops@infaira.com",
                    "FM Operations",
                    "22c55e",
                    &[Ops, Command, Cvs],
                    None,
                ),
            ),
            (
                "viewer".to_string(),
                profile(
                    3,
                    "InfAIra Viewer",
                    "infaira.viewer@infaira.com",
                    "Viewer",
                    "f59e0b",
                    &[Sustain, Command],
                    Some(true),
                ),
            ),
        ];

        UserDirectory { users }
    }

    /// Exact, case-sensitive key lookup.
    pub fn get(&self, key: &str) -> Result<&UserProfile, InsightError> {
        // ---
        self.users
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
            .ok_or_else(|| InsightError::UnknownUser(key.to_string()))
    }

    pub fn default_user(&self) -> Result<&UserProfile, InsightError> {
        self.get(DEFAULT_USER_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserProfile)> {
        self.users.iter().map(|(k, p)| (k.as_str(), p))
    }
}

fn profile(
    id: u32,
    username: &str,
    email: &str,
    role: &str,
    colour: &str,
    permissions: &[Solution],
    read_only: Option<bool>,
) -> UserProfile {
    // ---
    let avatar = format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff",
        username.replace(' ', "+"),
        colour
    );

    UserProfile {
        id,
        username: username.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        avatar,
        permissions: permissions.iter().copied().collect(),
        read_only,
    }
}
