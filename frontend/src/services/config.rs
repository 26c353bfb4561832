use anyhow::Context;
use serde::Deserialize;
use shared::{DeadlineTime, VolunteerPolicy};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use super::logging::{LogLevel, Logger};

/// Id of the `<script type="application/json">` block holding the page configuration
pub const CONFIG_ELEMENT_ID: &str = "app-config";

const CSRF_COOKIE: &str = "csrftoken";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    User,
    Manager,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        if path.starts_with("/manager") {
            Page::Manager
        } else {
            Page::User
        }
    }
}

/// Page-level settings rendered by the server into the HTML shell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which dashboard to mount; inferred from the URL when absent
    pub page: Option<Page>,
    /// Prefix for every API call, empty for same-origin
    pub api_base_url: String,
    pub poll_interval_ms: u32,
    /// How often the user calendar re-evaluates the deadline
    pub clock_tick_ms: u32,
    pub volunteer_roles: Vec<String>,
    /// Used until the settings endpoint answers
    pub default_deadline: String,
    pub csrf_token: Option<String>,
    pub log_level: LogLevel,
    pub user_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page: None,
            api_base_url: String::new(),
            poll_interval_ms: 10_000,
            clock_tick_ms: 60_000,
            volunteer_roles: VolunteerPolicy::default().roles().to_vec(),
            default_deadline: DeadlineTime::default().to_setting(),
            csrf_token: None,
            log_level: LogLevel::Info,
            user_name: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid app-config JSON")
    }

    /// Read the config block; a missing or broken block falls back to defaults
    pub fn load() -> Self {
        match Self::from_document() {
            Ok(config) => config,
            Err(e) => {
                Logger::warn_with_component("config", &format!("Using default configuration: {:#}", e));
                Self::default()
            }
        }
    }

    fn from_document() -> anyhow::Result<Self> {
        let document = gloo::utils::document();
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Ok(Self::default());
        };
        let text = element.text_content().unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&text)
    }

    pub fn page(&self) -> Page {
        self.page.unwrap_or_else(|| {
            let path = gloo::utils::window().location().pathname().unwrap_or_default();
            Page::from_path(&path)
        })
    }

    pub fn fallback_deadline(&self) -> DeadlineTime {
        self.default_deadline.parse().unwrap_or_else(|e| {
            Logger::warn_with_component("config", &format!("Ignoring default_deadline: {}", e));
            DeadlineTime::default()
        })
    }

    pub fn volunteer_policy(&self) -> VolunteerPolicy {
        VolunteerPolicy::new(self.volunteer_roles.iter().cloned())
    }

    /// Token for mutating calls: explicit config first, then the session cookie
    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token.clone().or_else(|| {
            let document = gloo::utils::document().dyn_into::<HtmlDocument>().ok()?;
            let cookies = document.cookie().ok()?;
            csrf_from_cookies(&cookies)
        })
    }
}

/// Extract the CSRF token from a `document.cookie` string
pub fn csrf_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
