#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod fmt;
mod logbook;
mod prelude;
mod quantity;
mod report;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, forecast, reference, report},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Forecast(args) => forecast(&args)?,
        Command::Reference(args) => reference(&args),
        Command::Report(args) => report(*args).await?,
    }

    info!("done!");
    Ok(())
}
