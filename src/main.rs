//! # masspool CLI
//!
//! A command-line tool for pooling compound libraries onto microplates and
//! flagging exact-mass collisions within wells.
//!
//! ## Usage
//!
//! ```bash
//! # Pool a compound table, 10 compounds per well on 384-well plates
//! masspool pool compounds.tsv -c 10
//!
//! # Pool into a fixed number of wells with a tighter threshold
//! masspool pool compounds.tsv -w 48 -t 0.05
//!
//! # Generate demo data
//! masspool demo demo_compounds.tsv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
