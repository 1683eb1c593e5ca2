//! Admin command line for the course store.
//!
//! Every command opens the SQLite database named by `--db`, runs one
//! operation and returns its JSON rendering for stdout.

pub mod seed;

use clap::{Parser, Subcommand};
use courses_core::{
    AddTeacherRequest, CourseInstanceId, CoursesService, RepoError, RequestError, ServiceError,
    SqliteUnitOfWork, TeacherType,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "courses_cli", version, about = "Course store administration")]
pub struct Cli {
    /// SQLite database file; created and migrated when missing.
    #[arg(long, default_value = "courses.db")]
    pub db: PathBuf,
    /// Log level for stderr diagnostics.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Imports persons, templates, instances and teachers from a JSON file.
    Seed { file: PathBuf },
    /// Lists course instances of a semester.
    List {
        #[arg(long)]
        semester: Option<String>,
    },
    /// Shows one course instance with its students.
    Show { id: CourseInstanceId },
    /// Registers a person as teacher of a course instance.
    AddTeacher {
        course_id: CourseInstanceId,
        ssn: String,
        /// Register as assistant instead of main teacher.
        #[arg(long)]
        assistant: bool,
    },
}

#[derive(Debug)]
pub enum CliError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Request(RequestError),
    Service(ServiceError),
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Service(ServiceError::Repo(_)) | Self::Io { .. } => 2,
            _ => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::Request(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Request(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RequestError> for CliError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Service(value.into())
    }
}

/// Runs one parsed command and returns its pretty-printed JSON output.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let mut uow = SqliteUnitOfWork::open(&cli.db)?;

    match &cli.command {
        Command::Seed { file } => {
            let text = std::fs::read_to_string(file).map_err(|source| CliError::Io {
                path: file.clone(),
                source,
            })?;
            let data = serde_json::from_str(&text)?;
            let summary = seed::apply_seed(&mut uow, data)?;
            render(&summary)
        }
        Command::List { semester } => {
            let service = CoursesService::new(uow);
            render(&service.list_course_instances(semester.as_deref())?)
        }
        Command::Show { id } => {
            let service = CoursesService::new(uow);
            render(&service.get_course_by_id(*id)?)
        }
        Command::AddTeacher {
            course_id,
            ssn,
            assistant,
        } => {
            let kind = if *assistant {
                TeacherType::AssistantTeacher
            } else {
                TeacherType::MainTeacher
            };
            let request = AddTeacherRequest::new(ssn.as_str(), kind);
            request.validate()?;

            let mut service = CoursesService::new(uow);
            render(&service.add_teacher_to_course(*course_id, &request)?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
