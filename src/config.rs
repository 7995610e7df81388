//! Configuration file parsing and validation

pub mod kanafold_toml;

pub use kanafold_toml::{
    CONFIG_FILE_NAME, ColorOption, Config, KanafoldMeta, OutputConfig, OutputFormat, RulesConfig,
};
