pub mod config;
pub mod controls;
pub mod dsp;
pub mod engine; // Block processing and the control hand-off
pub mod graph; // Effect blocks and the two topologies

pub use config::{ConfigError, EngineConfig, Topology};
pub use controls::{ControlSource, KnobPages, PageId};
pub use engine::{ControlHandle, ControlMessage, Froggers, ModulationTap};
pub use graph::{CombEq, DelayBump, GraphNode, ToneStage};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
