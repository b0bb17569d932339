use std::io::{self, BufReader};

use log::{error, info};
use structopt::StructOpt;

use snaplink::cliopt::CliOpt;
use snaplink::config::Config;
use snaplink::error::Result;
use snaplink::input::{JsonLineSource, MessageSource};
use snaplink::output::HttpSink;
use snaplink::pipeline::{BatchPipeline, RecordTransformer};
use snaplink::plugin::ParserRegistry;

fn main() -> Result<()> {
    let opt = CliOpt::from_args();

    let level = match opt.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Config errors are fatal before any message is consumed.
    let config = Config::load(&opt.config)?;
    info!(
        "forwarding topic '{}' to database '{}' at {}",
        config.kafka.topic, config.influxdb.db_name, config.influxdb.address
    );

    let transformer = RecordTransformer::new(ParserRegistry::with_default_plugins());
    let sink = HttpSink::new(&config.influxdb);
    let mut pipeline = BatchPipeline::new(transformer, Box::new(sink), &config.influxdb);

    let source = JsonLineSource::new(BufReader::new(io::stdin()));
    drain(source, &mut pipeline)?;

    Ok(())
}

fn drain(source: impl MessageSource, pipeline: &mut BatchPipeline) -> Result<()> {
    for message in source {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                // The message never reached the core; skip it and keep
                // consuming.
                error!("skipping undecodable message: {}", e);
                continue;
            }
        };

        // A failed write ends the run; redelivery is the queue's call.
        let outcome = pipeline.process(&message)?;
        info!(
            "message processed: {} points written, {} records dropped",
            outcome.written, outcome.dropped
        );
    }

    Ok(())
}
