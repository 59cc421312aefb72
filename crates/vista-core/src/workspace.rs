//! Workspace state container
//!
//! Owns the tab session and wires it to the route table and navigator. The
//! rendered tab strip is derived from here and its events come back here.

use std::sync::Arc;

use vista_navigation::{MenuOutcome, NavigationBinder, Navigator, PathOutcome, RouteTable};
use vista_tabs::{SessionSnapshot, TabSession, TabStripEvent, TabStripView};

use crate::config::Config;
use crate::Result;

pub struct Workspace {
    config: Config,
    binder: NavigationBinder<Arc<dyn Navigator>>,
}

impl Workspace {
    /// Build a workspace whose session starts with the pinned home tab
    pub fn new(config: Config, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let routes = Arc::new(config.route_table()?);
        let session = TabSession::with_home(config.home_tab()?);
        let binder = NavigationBinder::new(session, routes, navigator, config.home.path.clone());

        Ok(Self { config, binder })
    }

    /// Fold the navigator's current path into the session (initial mount)
    pub fn initialize(&self) -> Result<PathOutcome> {
        let outcome = self.binder.sync()?;

        tracing::info!(
            session_id = %self.session().id(),
            created_at = %self.session().created_at(),
            path = ?self.binder.last_seen_path(),
            routes = self.routes().len(),
            "Workspace initialized"
        );

        Ok(outcome)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &TabSession {
        self.binder.session()
    }

    pub fn routes(&self) -> &RouteTable {
        self.binder.routes()
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        self.binder.navigator()
    }

    pub fn binder(&self) -> &NavigationBinder<Arc<dyn Navigator>> {
        &self.binder
    }

    // === Gestures ===

    /// Observe the navigator's current path
    pub fn sync(&self) -> Result<PathOutcome> {
        Ok(self.binder.sync()?)
    }

    pub fn select_menu(&self, menu_key: &str) -> Result<MenuOutcome> {
        Ok(self.binder.select_menu(menu_key)?)
    }

    pub fn handle_strip_event(&self, event: TabStripEvent) -> Result<()> {
        Ok(self.binder.handle_strip_event(event)?)
    }

    // === Views ===

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session().snapshot()
    }

    pub fn strip_view(&self) -> TabStripView {
        TabStripView::from(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_navigation::MemoryNavigator;

    fn workspace(start: &str) -> (Workspace, MemoryNavigator) {
        let nav = MemoryNavigator::new(start);
        let ws = Workspace::new(Config::default(), Arc::new(nav.clone())).unwrap();
        (ws, nav)
    }

    #[test]
    fn test_starts_with_pinned_home() {
        let (ws, _) = workspace("/dashboard");
        ws.initialize().unwrap();

        let view = ws.strip_view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].key, "dashboard");
        assert!(!view.items[0].closable);
        assert!(view.is_active("dashboard"));
    }

    #[test]
    fn test_deep_link_opens_second_tab() {
        let (ws, _) = workspace("/dashboard/chart");
        let outcome = ws.initialize().unwrap();

        assert_eq!(outcome, PathOutcome::Opened("chart".to_string()));
        assert_eq!(ws.snapshot().keys(), vec!["dashboard", "chart"]);
    }

    #[test]
    fn test_gesture_sequence() {
        let (ws, nav) = workspace("/dashboard");
        ws.initialize().unwrap();

        ws.select_menu("/user").unwrap();
        ws.sync().unwrap();
        ws.select_menu("/order").unwrap();
        ws.sync().unwrap();
        ws.handle_strip_event(TabStripEvent::Change("user".to_string()))
            .unwrap();
        ws.sync().unwrap();
        ws.handle_strip_event(TabStripEvent::Close("user".to_string()))
            .unwrap();
        ws.sync().unwrap();

        let snapshot = ws.snapshot();
        assert_eq!(snapshot.keys(), vec!["dashboard", "order"]);
        assert_eq!(snapshot.active_key.as_deref(), Some("order"));
        assert_eq!(nav.current_path(), "/order");
    }

    #[test]
    fn test_invalid_config_fails_at_setup() {
        let mut config = Config::default();
        config.routes.retain(|r| r.path != "/dashboard");

        let nav = Arc::new(MemoryNavigator::new("/dashboard"));
        assert!(Workspace::new(config, nav).is_err());
    }
}
