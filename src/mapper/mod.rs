//! Control mapper
//!
//! Walks an object schema and produces one `ControlDescription` per
//! property. Pure: no I/O, no shared state, fresh output per call.

mod control;
#[allow(clippy::module_inception)]
mod mapper;

pub use control::{
    literal_text, ControlConstraints, ControlDescription, ControlOption, Step, WidgetKind,
};
pub use mapper::{map_object, map_schema};
