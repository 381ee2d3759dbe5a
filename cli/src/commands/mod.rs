pub mod call;
pub mod config;
pub mod debug;
pub mod logs;
pub mod query;
pub mod read;
pub mod serve;

use color_eyre::eyre::Result;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
