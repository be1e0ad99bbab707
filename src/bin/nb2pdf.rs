//! nb2pdf - Convert a notebook to HTML and then to PDF.
//!
//! Needs `jupyter nbconvert` and `wkhtmltopdf` on the path. The HTML and PDF files are written
//! next to the notebook.

use clap::{crate_version, value_parser, Arg, Command};
use skewt::{Conversion, SkewTErr, SystemRunner};
use std::{error::Error, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut err: &dyn Error = e;
        while let Some(cause) = err.source() {
            println!("caused by: {}", cause);
            err = cause;
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), SkewTErr> {
    let matches = Command::new("nb2pdf")
        .about("Convert a notebook to HTML, then to PDF.")
        .version(crate_version!())
        .arg(
            Arg::new("input")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Notebook to convert"),
        )
        .after_help("Set RUST_LOG to control logging, e.g. RUST_LOG=debug.")
        .get_matches();

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .map_err(|err| SkewTErr::GeneralError(err.to_string()))?;

    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or_else(|| SkewTErr::GeneralError("missing input".to_owned()))?;

    let conversion = Conversion::for_notebook(input);
    conversion.run(&mut SystemRunner)?;

    println!("{}", conversion.pdf.display());

    Ok(())
}
