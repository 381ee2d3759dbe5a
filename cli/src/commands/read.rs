use color_eyre::eyre::Result;

use crate::commands::print_json;
use crate::config::{SourceKind, UserConfig};
use crate::source::open_reader;

pub fn run(config: &UserConfig, source: SourceKind, compact: bool) -> Result<()> {
    let reader = open_reader(config, source)?;
    print_json(&reader.read_snapshot(), compact)
}
