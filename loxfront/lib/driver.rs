//! Runs sources through the front end and renders the result.

use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    compiler::{self, AstPrinter, Diagnostics},
    config::{DriverConfig, Emit},
    LoxfrontError, LoxfrontResult,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Scans and parses scripts or prompt lines according to a [`DriverConfig`].
///
/// The driver never executes anything. It prints either the tokens or the parsed program, and
/// hands every lexical or parse error back to the caller.
///
/// ## Examples
///
/// ```
/// use loxfront::{config::DriverConfig, Driver};
///
/// let driver = Driver::new(DriverConfig::default());
/// assert_eq!(driver.render("print -1;").unwrap(), "print -1;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: DriverConfig,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Driver {
    /// Creates a new driver.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Returns the driver's configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Scans, and unless only tokens are wanted parses, `source`, returning the printed output.
    pub fn render(&self, source: &str) -> LoxfrontResult<String> {
        self.config.check_source_size(source)?;

        match self.config.get_emit() {
            Emit::Tokens => {
                let scanned = compiler::scan(source);
                if !scanned.errors.is_empty() {
                    return Err(LoxfrontError::Syntax(Diagnostics {
                        lex: scanned.errors,
                        parse: Vec::new(),
                    }));
                }

                let lines: Vec<String> = scanned.tokens.iter().map(|t| t.to_string()).collect();
                Ok(lines.join("\n"))
            }
            Emit::Ast => {
                let program = compiler::parse_source(source)?;
                Ok(AstPrinter::new().print_program(&program))
            }
        }
    }

    /// Reads the script at `path` and renders it.
    pub async fn run_file(&self, path: impl AsRef<Path>) -> LoxfrontResult<String> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "running script");

        let source = tokio::fs::read_to_string(path).await?;
        self.render(&source)
    }

    /// Runs an interactive session, one source per line.
    ///
    /// The session ends on an empty line or end of input. Errors on a line are passed to
    /// `on_error` and the session continues; only I/O errors end it early.
    pub async fn run_prompt<R, W>(
        &self,
        input: R,
        mut output: W,
        mut on_error: impl FnMut(&LoxfrontError),
    ) -> LoxfrontResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        loop {
            output.write_all(self.config.get_prompt().as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            if line.is_empty() {
                break;
            }

            match self.render(&line) {
                Ok(rendered) if rendered.is_empty() => {}
                Ok(rendered) => {
                    output.write_all(rendered.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                Err(LoxfrontError::Io(error)) => return Err(error.into()),
                Err(error) => on_error(&error),
            }
        }

        tracing::debug!("prompt session ended");
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
