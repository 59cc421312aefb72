//! Workspace configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use vista_navigation::{RouteEntry, RouteTable, UNKNOWN_PAGE_LABEL};
use vista_tabs::TabDescriptor;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Route of the pinned home tab; must also appear in `routes`
    pub home: RouteEntry,
    /// Known application paths and the tab each opens
    pub routes: Vec<RouteEntry>,
    /// Label for tabs opened on paths missing from `routes`
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
}

fn default_fallback_label() -> String {
    UNKNOWN_PAGE_LABEL.to_string()
}

impl Config {
    /// Load a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;

        tracing::info!(
            path = %path.as_ref().display(),
            routes = config.routes.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the immutable route table, checking the home route against it
    pub fn route_table(&self) -> Result<RouteTable> {
        let table = RouteTable::new(self.routes.clone())?
            .with_fallback_label(self.fallback_label.clone());

        match table.lookup(&self.home.path) {
            Some(entry) if entry.key == self.home.key => Ok(table),
            Some(entry) => Err(CoreError::Config(format!(
                "home route {} is keyed {} but the route table keys it {}",
                self.home.path, self.home.key, entry.key
            ))),
            None => Err(CoreError::Config(format!(
                "home route {} is missing from the route table",
                self.home.path
            ))),
        }
    }

    /// Pinned tab the session starts with
    pub fn home_tab(&self) -> Result<TabDescriptor> {
        Ok(TabDescriptor::pinned(
            self.home.key.clone(),
            self.home.label.clone(),
            self.home.path.clone(),
        )?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home: RouteEntry::new("/dashboard", "dashboard", "Dashboard"),
            routes: RouteTable::builtin().entries().to_vec(),
            fallback_label: default_fallback_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_consistent() {
        let config = Config::default();
        let table = config.route_table().unwrap();

        assert_eq!(table.len(), 13);
        assert!(config.home_tab().unwrap().is_pinned());
    }

    #[test]
    fn test_json_round_trip_keeps_routes() {
        let config = Config::default();
        let parsed = Config::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_fallback_label_defaults() {
        let config = Config::from_json(
            r#"{"home":{"path":"/home","key":"home","label":"Home"},
                "routes":[{"path":"/home","key":"home","label":"Home"}]}"#,
        )
        .unwrap();

        assert_eq!(config.fallback_label, UNKNOWN_PAGE_LABEL);
    }

    #[test]
    fn test_missing_home_route_is_config_error() {
        let mut config = Config::default();
        config.home = RouteEntry::new("/start", "start", "Start");

        assert!(matches!(config.route_table(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_mismatched_home_key_is_config_error() {
        let mut config = Config::default();
        config.home.key = "home".to_string();

        assert!(matches!(config.route_table(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Config::load("/nonexistent/vista/config.json");
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
