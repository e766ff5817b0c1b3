//! rolemap - command line access to security role mappings
//!
//! The binary is a thin layer over `rolemap-rs`:
//! ```bash
//! rolemap --url https://localhost:9200 get --pretty
//! rolemap create readall --backend-role ops --user alice
//! rolemap bulk-upsert --body mappings.patch.json
//! ```

pub use rolemap_core;

pub mod cli;
pub mod commands;
pub mod telemetry;
