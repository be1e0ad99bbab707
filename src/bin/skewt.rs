//! skewt - Plot a Skew-T/log-P diagram of an upper air sounding.
//!
//! Fetches the sounding from the University of Wyoming archive, then either saves the chart to a
//! file or shows it in a window.

use skewt::{save_figure, show, SkewTArgs, SkewTErr, SkewTFigure, WyomingClient};
use std::error::Error;

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
    let args = SkewTArgs::parse()?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(args.log_level())
            .finish(),
    )
    .map_err(|err| SkewTErr::GeneralError(err.to_string()))?;

    let client = WyomingClient::new(args.server_url(), args.timeout())?;
    let snd = client.request_data(args.time(), args.station())?;

    let fig = SkewTFigure::compose(&snd, args.station(), args.time())?;
    tracing::info!(message = "parcel analysis", summary = %fig.summary());

    if args.save_fig() {
        save_figure(&fig, &args.output_path(), args.img_format())
    } else {
        show(&fig)
    }
}
