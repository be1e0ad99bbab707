//! Convert a notebook to HTML and then to PDF with external tools.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Command,
};

use crate::errors::SkewTErr;

/// Something that can run an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, returning an error unless it exits successfully.
    fn run(&mut self, program: &str, args: &[&OsStr]) -> Result<(), SkewTErr>;
}

/// Runs programs as child processes of this one, inheriting stdout and stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&OsStr]) -> Result<(), SkewTErr> {
        tracing::debug!(message = "running", program, args = ?args);

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|err| SkewTErr::GeneralError(format!("unable to run {}: {}", program, err)))?;

        if status.success() {
            Ok(())
        } else {
            Err(SkewTErr::ExternalTool {
                program: program.to_owned(),
                status,
            })
        }
    }
}

/// The files involved in converting one notebook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    /// The notebook.
    pub input: PathBuf,
    /// Written by the first step, next to the notebook.
    pub html: PathBuf,
    /// Written by the second step, next to the notebook.
    pub pdf: PathBuf,
}

impl Conversion {
    const NBCONVERT: &'static str = "jupyter";
    const HTML_TO_PDF: &'static str = "wkhtmltopdf";

    /// Plan the conversion of `input`, the outputs replace its extension.
    pub fn for_notebook<P: AsRef<Path>>(input: P) -> Self {
        let input = input.as_ref().to_path_buf();
        let html = input.with_extension("html");
        let pdf = input.with_extension("pdf");

        Conversion { input, html, pdf }
    }

    /// Convert to HTML, then to PDF. The second step only runs if the first succeeded.
    pub fn run<R: CommandRunner>(&self, runner: &mut R) -> Result<(), SkewTErr> {
        runner.run(
            Self::NBCONVERT,
            &[
                OsStr::new("nbconvert"),
                OsStr::new("--to"),
                OsStr::new("html"),
                self.input.as_os_str(),
            ],
        )?;
        tracing::info!(message = "converted to html", path = %self.html.display());

        runner.run(
            Self::HTML_TO_PDF,
            &[self.html.as_os_str(), self.pdf.as_os_str()],
        )?;
        tracing::info!(message = "converted to pdf", path = %self.pdf.display());

        Ok(())
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
