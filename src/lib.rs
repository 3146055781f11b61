pub mod config;
pub mod icons;
pub mod relocate;
pub mod server;
pub mod utils;

pub use config::{FileMove, IconConfig, IconPalette, RelocationPlan, ServerConfig};
pub use icons::{generate_icons, IconOutcome, IconWriter};
pub use relocate::{relocate, LocalFs, RelocationReport};
pub use utils::error::{Result, ToolError};
