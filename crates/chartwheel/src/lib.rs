//! Wheel chart engine.
//!
//! Places bodies around a chart wheel without overlap, finds the aspects
//! between them and animates a chart from one state to the next. Drawing is
//! left to a [`chart::ChartRenderer`] supplied by the host.

pub mod aspects;
pub mod chart;
pub mod geometry;
pub mod layout;

pub use aspects::{AspectCalculator, AspectDefinition, AspectMatch};
pub use chart::{
    ChartAnimation, ChartData, ChartRenderer, ChartSettings, PositionEntry, Positions,
    RadixChart, TransitChart,
};
pub use layout::{LayoutError, LocatedPoint, Universe};
