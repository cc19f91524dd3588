//! sky-core: Core library for keeping the Sky map dump table up to date
//!
//! This library provides functionality to:
//! - Parse the level list into map identifiers
//! - Parse `Localizable.strings` files into translation maps
//! - Read the Markdown dump table, keeping the prose around it
//! - Merge new identifiers and backfill blank name/key cells
//! - Write the table back in identifier order

pub mod config;
pub mod error;
pub mod identifiers;
pub mod merger;
pub mod parser;
pub mod sync;
pub mod table;
pub mod translations;
pub mod writer;

pub use config::{clean_prompt_input, InputRole, SyncConfig, SyncPaths};
pub use error::{Error, Result};
pub use identifiers::{load_identifiers, parse_identifiers, read_identifiers};
pub use merger::{merge, resolve_key, MergeReport, Resolution};
pub use parser::{load_table, parse_table, read_table};
pub use sync::{error_chain, sync_table, SyncOutcome, SyncReport};
pub use table::{Column, Record, Table, DEFAULT_HEADERS};
pub use translations::{load_translations, read_translations, TranslationMap};
pub use writer::{render_table, write_table};
