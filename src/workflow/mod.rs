//! The guided workflow: canonical step catalog and navigation dispatch.

pub mod dispatch;
pub mod step;

pub use dispatch::{Dispatcher, NavAction, RouteMap};
pub use step::{Step, StepSequence, WorkflowStep};
