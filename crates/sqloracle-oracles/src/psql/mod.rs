//! psql CLI round-trip oracle.

pub mod classify;

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use sqloracle_core::errors::OracleError;
use sqloracle_core::types::{Language, PgVersion, Prediction, Statement};
use sqloracle_core::Oracle;

use crate::service::ComposeService;

pub use classify::{classify_failure, detect_invalidity, InvalidityEvidence};

/// Pipes each statement into a fresh psql process with `ON_ERROR_STOP=on`.
///
/// The statement goes through stdin rather than `--command`: `COPY FROM
/// STDIN` and meta-commands only behave like a real script that way. Every
/// call owns its own subprocess, so concurrent calls are safe.
#[derive(Debug, Clone)]
pub struct PsqlOracle {
    name: String,
    program: String,
    args: Vec<String>,
}

impl PsqlOracle {
    /// psql inside the compose service for `version`.
    pub fn for_service(service: &ComposeService) -> Self {
        let mut args = service.compose_args();
        args.extend(
            [
                "exec",
                "-T",
                service.name(),
                "psql",
                "--username=postgres",
                "--set=ON_ERROR_STOP=on",
            ]
            .map(String::from),
        );
        Self {
            name: Self::oracle_name(service.version()),
            program: service.program().to_string(),
            args,
        }
    }

    /// Any program speaking psql's exit-code/stderr conventions.
    pub fn with_command(
        name: impl Into<String>,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn oracle_name(version: PgVersion) -> String {
        format!("psql {version}")
    }

    fn run(&self, text: &str) -> Result<std::process::Output, OracleError> {
        let spawn_error = |source| OracleError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdin = child.stdin.take();
        std::thread::scope(|scope| {
            // Feed stdin concurrently so a chatty child cannot deadlock on
            // a full stdout pipe while we are still writing.
            let feeder = scope.spawn(move || match stdin {
                Some(mut stdin) => match stdin.write_all(text.as_bytes()) {
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                },
                None => Ok(()),
            });
            let output = child.wait_with_output().map_err(spawn_error)?;
            match feeder.join() {
                Ok(Ok(())) => Ok(output),
                Ok(Err(e)) => Err(spawn_error(e)),
                Err(_) => Err(spawn_error(std::io::Error::other("stdin feeder panicked"))),
            }
        })
    }
}

impl Oracle for PsqlOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        if language != Language::Psql {
            return Err(OracleError::UnsupportedLanguage {
                oracle: self.name.clone(),
                language: language.to_string(),
            });
        }

        let output = self.run(&statement.text)?;
        if output.status.success() {
            // Exit 0 is only "no error raised": `\if false ... \endif` hides
            // arbitrary garbage, so this stays Unknown.
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            return Ok(Prediction::unknown(statement.id, language, stdout));
        }

        // Most failures are ON_ERROR_STOP tripping over objects that do not
        // exist in the empty scratch database; only some prove invalidity.
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let failure = if stderr.trim().is_empty() {
            output.status.to_string()
        } else {
            stderr
        };
        let verdict = classify_failure(&failure);
        Ok(Prediction::failed(statement.id, language, verdict, failure))
    }
}
