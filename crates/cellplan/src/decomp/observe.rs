//! Build events and observers.
//!
//! The build reports what it does through an explicit observer instead of
//! global debug state. `()` ignores everything; `EventLog` keeps a copy.

use super::types::{CellId, Cut, EdgeId};
use crate::geom2::{Extension, Point};

#[derive(Clone, Debug, PartialEq)]
pub enum BuildEvent {
    VertexVisited {
        vertex: Point,
        extension: Extension,
    },
    RayHit {
        from: Point,
        edge: EdgeId,
        at: Point,
    },
    CutOpened(Cut),
    CellClosed {
        cell: CellId,
        upper: EdgeId,
        lower: EdgeId,
    },
    /// Two cuts with the same key met at the same x; consumed without a cell.
    DegeneratePair {
        upper: EdgeId,
        lower: EdgeId,
        x: f64,
    },
    CutUnmatched(Cut),
    /// Raw (pre-compaction) node ids.
    NodesMerged {
        survivor: usize,
        dropped: usize,
    },
}

pub trait BuildObserver {
    fn on_event(&mut self, event: &BuildEvent);
}

impl BuildObserver for () {
    #[inline]
    fn on_event(&mut self, _event: &BuildEvent) {}
}

/// Records every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<BuildEvent>,
}

impl EventLog {
    pub fn count(&self, pred: impl Fn(&BuildEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl BuildObserver for EventLog {
    fn on_event(&mut self, event: &BuildEvent) {
        self.events.push(event.clone());
    }
}
