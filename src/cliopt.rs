use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "snaplink", about = "snaplink command line arguments")]
pub struct CliOpt {
    #[structopt(
        long = "config",
        short = "c",
        default_value = ".snaplink.json",
        help = "Path to the JSON config file"
    )]
    pub config: PathBuf,

    #[structopt(
        long = "verbose",
        short = "v",
        parse(from_occurrences),
        help = "Raise log verbosity (-v debug, -vv trace)"
    )]
    pub verbose: u8,
}
