//! Chart slot
//!
//! A slot binds one container id to at most one live chart. Rendering the
//! same kind and data again reuses the live chart; anything else destroys it
//! and draws a new one.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(pub Vec<DataPoint>);

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.0
    }

    /// Cheap identity of the data: length plus the first point
    pub fn fingerprint(&self) -> String {
        match self.0.first() {
            None => "empty".to_string(),
            Some(first) => format!("{}_{}_{}", self.0.len(), first.name, first.value),
        }
    }
}

impl From<Vec<DataPoint>> for Dataset {
    fn from(points: Vec<DataPoint>) -> Self {
        Self(points)
    }
}

/// A drawn chart that must be released explicitly
pub trait ChartHandle {
    fn destroy(&mut self);
}

/// Drawing service that turns a container, chart kind and data into a chart
pub trait ChartRenderer {
    type Handle: ChartHandle;

    fn create(&self, container: &str, kind: &str, data: &[DataPoint]) -> Result<Self::Handle>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Same kind and data as the live chart; nothing redrawn
    Reused,
    Created,
    /// The renderer failed; the slot is now empty
    Failed,
}

struct LiveChart<H> {
    cache_key: String,
    handle: H,
}

pub struct ChartSlot<R: ChartRenderer> {
    id: String,
    renderer: R,
    live: Option<LiveChart<R::Handle>>,
}

impl<R: ChartRenderer> ChartSlot<R> {
    pub fn new(id: impl Into<String>, renderer: R) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ChartError::EmptyContainer);
        }

        Ok(Self {
            id,
            renderer,
            live: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn cache_key(&self, kind: &str, data: &Dataset) -> String {
        format!("{}-{}-{}", self.id, kind, data.fingerprint())
    }

    /// Handle of the live chart, if any
    pub fn handle(&self) -> Option<&R::Handle> {
        self.live.as_ref().map(|l| &l.handle)
    }

    pub fn live_cache_key(&self) -> Option<&str> {
        self.live.as_ref().map(|l| l.cache_key.as_str())
    }

    /// Draw `data` as a `kind` chart, reusing the live chart when nothing changed
    pub fn render(&mut self, kind: &str, data: &Dataset) -> RenderOutcome {
        let cache_key = self.cache_key(kind, data);

        if self.live_cache_key() == Some(cache_key.as_str()) {
            return RenderOutcome::Reused;
        }

        self.clear();

        match self.renderer.create(&self.id, kind, data.points()) {
            Ok(handle) => {
                tracing::debug!(chart = %self.id, cache_key = %cache_key, "Created chart");
                self.live = Some(LiveChart { cache_key, handle });
                RenderOutcome::Created
            }
            Err(e) => {
                tracing::error!(
                    chart = %self.id,
                    kind = %kind,
                    error = %e,
                    "Chart creation failed"
                );
                RenderOutcome::Failed
            }
        }
    }

    /// Destroy the live chart, if any
    pub fn clear(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.handle.destroy();
            tracing::debug!(chart = %self.id, cache_key = %live.cache_key, "Destroyed chart");
        }
    }
}

impl<R: ChartRenderer> Drop for ChartSlot<R> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingHandle {
        name: String,
        log: Log,
    }

    impl ChartHandle for RecordingHandle {
        fn destroy(&mut self) {
            self.log.borrow_mut().push(format!("destroy {}", self.name));
        }
    }

    struct RecordingRenderer {
        log: Log,
    }

    impl ChartRenderer for RecordingRenderer {
        type Handle = RecordingHandle;

        fn create(
            &self,
            container: &str,
            kind: &str,
            data: &[DataPoint],
        ) -> Result<RecordingHandle> {
            if kind == "broken" {
                return Err(ChartError::Render("unsupported chart type".to_string()));
            }
            let name = format!("{}:{}:{}", container, kind, data.len());
            self.log.borrow_mut().push(format!("create {}", name));
            Ok(RecordingHandle {
                name,
                log: Rc::clone(&self.log),
            })
        }
    }

    fn slot() -> (ChartSlot<RecordingRenderer>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let renderer = RecordingRenderer {
            log: Rc::clone(&log),
        };
        (ChartSlot::new("sales", renderer).unwrap(), log)
    }

    fn data(first: f64) -> Dataset {
        Dataset::from(vec![DataPoint::new("Mon", first), DataPoint::new("Tue", 12.0)])
    }

    #[test]
    fn test_fingerprint() {
        assert_eq!(Dataset::default().fingerprint(), "empty");
        assert_eq!(data(3.0).fingerprint(), "2_Mon_3");
        assert_eq!(data(2.5).fingerprint(), "2_Mon_2.5");
    }

    #[test]
    fn test_same_data_reuses_chart() {
        let (mut slot, log) = slot();

        assert_eq!(slot.render("line", &data(3.0)), RenderOutcome::Created);
        assert_eq!(slot.render("line", &data(3.0)), RenderOutcome::Reused);

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(slot.live_cache_key(), Some("sales-line-2_Mon_3"));
    }

    #[test]
    fn test_changed_kind_replaces_chart() {
        let (mut slot, log) = slot();
        slot.render("line", &data(3.0));
        slot.render("bar", &data(3.0));

        assert_eq!(
            *log.borrow(),
            vec![
                "create sales:line:2".to_string(),
                "destroy sales:line:2".to_string(),
                "create sales:bar:2".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_failure_leaves_slot_empty() {
        let (mut slot, log) = slot();
        slot.render("line", &data(3.0));

        assert_eq!(slot.render("broken", &data(3.0)), RenderOutcome::Failed);
        assert!(!slot.is_live());
        assert_eq!(log.borrow().last().unwrap(), "destroy sales:line:2");

        assert_eq!(slot.render("line", &data(3.0)), RenderOutcome::Created);
    }

    #[test]
    fn test_drop_destroys_live_chart() {
        let (mut slot, log) = slot();
        slot.render("pie", &data(1.0));
        drop(slot);

        assert_eq!(log.borrow().last().unwrap(), "destroy sales:pie:2");
    }

    #[test]
    fn test_empty_container_rejected() {
        let renderer = RecordingRenderer {
            log: Rc::new(RefCell::new(Vec::new())),
        };
        assert!(matches!(
            ChartSlot::new(" ", renderer),
            Err(ChartError::EmptyContainer)
        ));
    }

    #[test]
    fn test_dataset_from_json() {
        let dataset =
            Dataset::from_json(r#"[{"name":"Q1","value":120},{"name":"Q2","value":98.5}]"#)
                .unwrap();
        assert_eq!(dataset.points().len(), 2);
        assert_eq!(dataset.points()[1].value, 98.5);
        assert!(Dataset::from_json("{}").is_err());
    }
}
