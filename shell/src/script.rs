//! Gesture scripts
//!
//! A script is a JSON array of steps, each one user gesture or one browser
//! navigation, e.g. `[{"action":"menu","key":"/user"},{"action":"back"}]`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use vista_core::{
    ChartSlot, Dataset, MemoryNavigator, Navigator, RenderOutcome, TabStripEvent, Workspace,
};

use crate::terminal::TextRenderer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Type a path into the address bar
    Visit { path: String },
    /// Click a menu entry
    Menu { key: String },
    /// Click a tab
    Click { key: String },
    /// Click a tab's close button
    Close { key: String },
    CloseAll,
    CloseOthers { key: String },
    Back,
    Forward,
    /// Draw a chart into the shell's chart slot
    Chart { kind: String, data: Dataset },
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::Visit { path } => format!("visit {}", path),
            Step::Menu { key } => format!("menu {}", key),
            Step::Click { key } => format!("click {}", key),
            Step::Close { key } => format!("close {}", key),
            Step::CloseAll => "close all".to_string(),
            Step::CloseOthers { key } => format!("close others {}", key),
            Step::Back => "back".to_string(),
            Step::Forward => "forward".to_string(),
            Step::Chart { kind, data } => {
                format!("chart {} ({} points)", kind, data.points().len())
            }
        }
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)?;
    parse(&json)
}

pub fn parse(json: &str) -> anyhow::Result<Vec<Step>> {
    Ok(serde_json::from_str(json)?)
}

/// Walk through the dashboard when no script is given
pub fn demo() -> Vec<Step> {
    let menu = |key: &str| Step::Menu {
        key: key.to_string(),
    };

    vec![
        menu("/user"),
        menu("/dashboard/chart"),
        Step::Chart {
            kind: "bar".to_string(),
            data: Dataset::from(vec![
                vista_core::DataPoint::new("Mon", 120.0),
                vista_core::DataPoint::new("Tue", 200.0),
                vista_core::DataPoint::new("Wed", 150.0),
            ]),
        },
        menu("/order"),
        Step::Back,
        Step::Click {
            key: "user".to_string(),
        },
        Step::Visit {
            path: "/reports".to_string(),
        },
        menu("https://github.com/MrXujiang"),
        Step::Close {
            key: "reports".to_string(),
        },
        Step::CloseOthers {
            key: "chart".to_string(),
        },
        Step::CloseAll,
    ]
}

/// Replays steps against a workspace
pub struct Runner<'a> {
    workspace: &'a Workspace,
    navigator: MemoryNavigator,
    charts: ChartSlot<TextRenderer>,
}

impl<'a> Runner<'a> {
    pub fn new(workspace: &'a Workspace, navigator: MemoryNavigator) -> anyhow::Result<Self> {
        Ok(Self {
            workspace,
            navigator,
            charts: ChartSlot::new("shell-chart", TextRenderer)?,
        })
    }

    /// Apply one step, then fold the resulting path into the session.
    /// Returns any chart lines drawn by the step.
    pub fn apply(&mut self, step: &Step) -> anyhow::Result<Vec<String>> {
        let mut drawn = Vec::new();

        match step {
            Step::Visit { path } => self.navigator.navigate_to(path),
            Step::Menu { key } => {
                self.workspace.select_menu(key)?;
            }
            Step::Click { key } => self
                .workspace
                .handle_strip_event(TabStripEvent::Change(key.clone()))?,
            Step::Close { key } => self
                .workspace
                .handle_strip_event(TabStripEvent::Close(key.clone()))?,
            Step::CloseAll => self.workspace.handle_strip_event(TabStripEvent::CloseAll)?,
            Step::CloseOthers { key } => self
                .workspace
                .handle_strip_event(TabStripEvent::CloseOthers(key.clone()))?,
            Step::Back => {
                if !self.navigator.back() {
                    tracing::warn!("No earlier history entry");
                }
            }
            Step::Forward => {
                if !self.navigator.forward() {
                    tracing::warn!("No later history entry");
                }
            }
            Step::Chart { kind, data } => {
                if self.charts.render(kind, data) == RenderOutcome::Failed {
                    anyhow::bail!("could not draw {} chart", kind);
                }
                if let Some(chart) = self.charts.handle() {
                    drawn = chart.lines.clone();
                }
            }
        }

        self.workspace.sync()?;
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vista_core::Config;

    fn workspace() -> (Workspace, MemoryNavigator) {
        let nav = MemoryNavigator::new("/dashboard");
        let ws = Workspace::new(Config::default(), Arc::new(nav.clone())).unwrap();
        ws.initialize().unwrap();
        (ws, nav)
    }

    #[test]
    fn test_parse_steps() {
        let steps = parse(
            r#"[{"action":"visit","path":"/user"},
                {"action":"close_others","key":"user"},
                {"action":"close_all"},
                {"action":"chart","kind":"bar","data":[{"name":"a","value":1}]}]"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[1],
            Step::CloseOthers {
                key: "user".to_string()
            }
        );
        assert_eq!(steps[2], Step::CloseAll);
        assert!(parse(r#"[{"action":"teleport"}]"#).is_err());
    }

    #[test]
    fn test_demo_replay_ends_on_home() {
        let (ws, nav) = workspace();
        let mut runner = Runner::new(&ws, nav.clone()).unwrap();

        for step in demo() {
            runner.apply(&step).unwrap();
        }

        let snapshot = ws.snapshot();
        assert_eq!(snapshot.keys(), vec!["dashboard"]);
        assert_eq!(snapshot.active_key.as_deref(), Some("dashboard"));
        assert_eq!(nav.current_path(), "/dashboard");
        assert_eq!(nav.opened_external().len(), 1);
    }

    #[test]
    fn test_back_step_reactivates_previous_tab() {
        let (ws, nav) = workspace();
        let mut runner = Runner::new(&ws, nav).unwrap();

        for step in parse(
            r#"[{"action":"menu","key":"/user"},
                {"action":"menu","key":"/order"},
                {"action":"back"}]"#,
        )
        .unwrap()
        {
            runner.apply(&step).unwrap();
        }

        assert_eq!(ws.snapshot().active_key.as_deref(), Some("user"));
        assert_eq!(ws.snapshot().tabs.len(), 3);
    }

    #[test]
    fn test_chart_step_draws_lines() {
        let (ws, nav) = workspace();
        let mut runner = Runner::new(&ws, nav).unwrap();

        let lines = runner
            .apply(&Step::Chart {
                kind: "bar".to_string(),
                data: Dataset::from(vec![vista_core::DataPoint::new("Q1", 5.0)]),
            })
            .unwrap();
        assert_eq!(lines[0], "# shell-chart");

        let failed = runner.apply(&Step::Chart {
            kind: "radar".to_string(),
            data: Dataset::default(),
        });
        assert!(failed.is_err());
        assert_eq!(ws.session().len(), 1);
    }

    #[test]
    fn test_bundled_demo_files_replay() {
        let config = Config::from_json(include_str!("../../demos/config.json")).unwrap();
        let steps = parse(include_str!("../../demos/gestures.json")).unwrap();

        let nav = MemoryNavigator::new("/dashboard");
        let ws = Workspace::new(config, Arc::new(nav.clone())).unwrap();
        ws.initialize().unwrap();
        let mut runner = Runner::new(&ws, nav.clone()).unwrap();

        for step in &steps {
            runner.apply(step).unwrap();
            if let Step::CloseOthers { .. } = step {
                assert_eq!(ws.snapshot().keys(), vec!["dashboard", "monitor"]);
            }
        }

        assert_eq!(ws.snapshot().keys(), vec!["dashboard"]);
        assert_eq!(nav.current_path(), "/dashboard");
    }
}
