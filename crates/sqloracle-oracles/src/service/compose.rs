//! docker-compose managed postgres services, one per dialect version.

use std::process::{Command, Output, Stdio};

use sqloracle_core::config::ServiceConfig;
use sqloracle_core::errors::ServiceError;
use sqloracle_core::types::PgVersion;

use super::readiness::{poll_until_ready, ReadinessPolicy};

/// The `pg-<version>` compose service. Name and DSN are fixed at
/// construction; the value is immutable and cheap to share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeService {
    version: PgVersion,
    name: String,
    dsn: String,
    program: String,
    compose_file: Option<String>,
}

impl ComposeService {
    pub fn new(version: PgVersion, config: &ServiceConfig, program: impl Into<String>) -> Self {
        let dsn = format!(
            "host={} user={} password={} port={}{} sslmode=disable",
            config.effective_host(),
            config.effective_user(),
            config.effective_password(),
            config.effective_port_prefix(),
            version,
        );
        Self {
            version,
            name: format!("pg-{version}"),
            dsn,
            program: program.into(),
            compose_file: config
                .compose_file
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn version(&self) -> PgVersion {
        self.version
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Leading arguments shared by every compose invocation.
    pub fn compose_args(&self) -> Vec<String> {
        match &self.compose_file {
            Some(file) => vec!["-f".to_string(), file.clone()],
            None => Vec::new(),
        }
    }

    /// `up -d`, then poll `pg_isready` inside the service.
    pub fn start(&self, policy: ReadinessPolicy) -> Result<RunningService, ServiceError> {
        tracing::info!(service = %self.name, "starting service");
        self.compose(&["up", "-d", &self.name])?;
        let running = RunningService {
            service: self.clone(),
        };
        self.wait_until_ready(policy)?;
        Ok(running)
    }

    pub fn wait_until_ready(&self, policy: ReadinessPolicy) -> Result<u32, ServiceError> {
        let attempts = poll_until_ready(&self.name, policy, || {
            let output = self.compose_output(&["exec", "-T", &self.name, "pg_isready"])?;
            Ok(output.status.success())
        })?;
        tracing::info!(service = %self.name, attempts, "service ready");
        Ok(attempts)
    }

    pub fn stop(&self) -> Result<(), ServiceError> {
        tracing::info!(service = %self.name, "stopping service");
        self.compose(&["down"])
    }

    fn compose_output(&self, args: &[&str]) -> Result<Output, ServiceError> {
        Command::new(&self.program)
            .args(self.compose_args())
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ServiceError::CommandFailed {
                command: self.describe(args),
                message: e.to_string(),
            })
    }

    fn compose(&self, args: &[&str]) -> Result<(), ServiceError> {
        let output = self.compose_output(args)?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(ServiceError::CommandFailed {
            command: self.describe(args),
            message: if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            },
        })
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.compose_args());
        parts.extend(args.iter().map(|a| a.to_string()));
        parts.join(" ")
    }
}

/// A started service; stopped when dropped.
#[derive(Debug)]
pub struct RunningService {
    service: ComposeService,
}

impl RunningService {
    pub fn service(&self) -> &ComposeService {
        &self.service
    }
}

impl Drop for RunningService {
    fn drop(&mut self) {
        if let Err(e) = self.service.stop() {
            tracing::warn!(service = %self.service.name(), error = %e, "failed to stop service");
        }
    }
}
