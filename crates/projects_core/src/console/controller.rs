//! Menu-driven interaction controller.
//!
//! # Responsibility
//! - Print the menu, read one selection, dispatch, repeat.
//! - Prompt for each field an operation needs and call the service.
//! - Own the session's current selection.
//!
//! # Invariants
//! - A blank line at the menu ends the session; blank field input never does.
//! - `InvalidInput` and store errors are reported and the loop continues.
//! - Update keeps the selected id and re-fetches the committed record.
//! - Deleting the selected project clears the selection.

use crate::console::input::{
    parse_optional_decimal, parse_optional_integer, parse_optional_string, InputError,
};
use crate::model::project::{Hours, Project, ProjectId};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use crate::service::project_service::ProjectService;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const OPERATIONS: [&str; 5] = [
    "1) Add a project",
    "2) List projects",
    "3) Select a project",
    "4) Update project details",
    "5) Delete a project",
];

/// Console failure.
///
/// `InvalidInput` and `Store` are recoverable and reported inside the loop;
/// the remaining variants end the session.
#[derive(Debug)]
pub enum ConsoleError {
    InvalidInput(InputError),
    Store(RepoError),
    /// Input ended while an operation was waiting for a field.
    InputClosed,
    Io(io::Error),
}

impl ConsoleError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Store(_))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Store(_) => "store",
            Self::InputClosed => "input_closed",
            Self::Io(_) => "io",
        }
    }
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InputClosed => write!(f, "input closed before the operation finished"),
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InputClosed => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<InputError> for ConsoleError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for ConsoleError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Menu entry chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Exit,
    Create,
    List,
    Select,
    Update,
    Delete,
    Unknown(i64),
}

impl MenuAction {
    /// Maps a parsed selection; `None` (blank line) means exit.
    pub fn from_selection(selection: Option<i64>) -> Self {
        match selection {
            None => Self::Exit,
            Some(1) => Self::Create,
            Some(2) => Self::List,
            Some(3) => Self::Select,
            Some(4) => Self::Update,
            Some(5) => Self::Delete,
            Some(other) => Self::Unknown(other),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Exit => "exit",
            Self::Create => "create",
            Self::List => "list",
            Self::Select => "select",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Outcome of one menu iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Session state for the interactive project console.
pub struct ProjectsConsole<R: ProjectRepository, I, O> {
    service: ProjectService<R>,
    input: I,
    output: O,
    current_project: Option<Project>,
}

impl<R: ProjectRepository, I: BufRead, O: Write> ProjectsConsole<R, I, O> {
    /// Creates a session with no project selected.
    pub fn new(service: ProjectService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
            current_project: None,
        }
    }

    /// The project the session is working with, if any.
    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Runs menu iterations until the user exits.
    ///
    /// # Errors
    /// - Only unrecoverable failures: `InputClosed` and `Io`.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        info!("event=console_session module=console status=start");
        loop {
            if self.step()? == Flow::Exit {
                info!("event=console_session module=console status=ok");
                return Ok(());
            }
        }
    }

    /// Runs one menu iteration, reporting recoverable errors to the user.
    pub fn step(&mut self) -> Result<Flow, ConsoleError> {
        match self.dispatch() {
            Ok(flow) => Ok(flow),
            Err(err) if err.is_recoverable() => {
                warn!(
                    "event=console_error module=console status=error kind={}",
                    err.kind()
                );
                writeln!(self.output, "\nError: {err}. Try again.")?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(err),
        }
    }

    /// Prints the menu and reads the user's choice.
    ///
    /// A blank line, or end of input, selects `MenuAction::Exit`.
    pub fn get_selection(&mut self) -> Result<MenuAction, ConsoleError> {
        self.print_operations()?;
        let selection = match self.read_line("Enter a menu selection")? {
            Some(line) => parse_optional_integer::<i64>(&line)?,
            None => None,
        };
        Ok(MenuAction::from_selection(selection))
    }

    /// Prompts for every field and stores a new project.
    ///
    /// Blank fields stay absent. A missing name is passed through and
    /// rejected by the store.
    pub fn create_project(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_string("Enter the project name")?;
        let estimated_hours = self.prompt_decimal("Enter the estimated hours")?;
        let actual_hours = self.prompt_decimal("Enter the actual hours")?;
        let difficulty = self.prompt_integer("Enter the project difficulty (1-5)")?;
        let notes = self.prompt_string("Enter the project notes")?;

        let project = Project {
            id: None,
            name,
            estimated_hours,
            actual_hours,
            difficulty,
            notes,
        };

        let committed = self.service.add_project(&project)?;
        writeln!(
            self.output,
            "You have successfully created project: {committed}"
        )?;
        Ok(())
    }

    /// Prints `  <id>: <name>` for every project, in store order.
    pub fn list_projects(&mut self) -> Result<(), ConsoleError> {
        let projects = self.service.fetch_all_projects()?;

        writeln!(self.output, "\nProjects:")?;
        for project in &projects {
            writeln!(
                self.output,
                "  {}: {}",
                project.id.unwrap_or_default(),
                project.name.as_deref().unwrap_or_default()
            )?;
        }
        Ok(())
    }

    /// Lists projects, then makes the chosen one current.
    ///
    /// An unknown or blank id clears the selection without failing.
    pub fn select_project(&mut self) -> Result<(), ConsoleError> {
        self.list_projects()?;
        let id = self.prompt_integer::<ProjectId>("Enter a project ID to select a project")?;

        self.current_project = None;
        if let Some(id) = id {
            self.current_project = self.service.fetch_project_by_id(id)?;
        }

        if self.current_project.is_none() {
            writeln!(self.output, "\nThat is not a valid project.")?;
        }
        Ok(())
    }

    /// Edits the current project field by field.
    ///
    /// Each prompt shows the field's current value; a blank answer keeps it.
    pub fn update_project_details(&mut self) -> Result<(), ConsoleError> {
        let Some(current) = self.current_project.clone() else {
            writeln!(self.output, "\nPlease select a project.")?;
            return Ok(());
        };
        let id = current.id.ok_or(RepoError::MissingId)?;

        let name_prompt = with_hint("Enter the project name", current.name.as_ref());
        let estimated_prompt =
            with_hint("Enter the estimated hours", current.estimated_hours.as_ref());
        let actual_prompt = with_hint("Enter the actual hours", current.actual_hours.as_ref());
        let difficulty_prompt = with_hint(
            "Enter the project difficulty (1-5)",
            current.difficulty.as_ref(),
        );
        let notes_prompt = with_hint("Enter the project notes", current.notes.as_ref());

        let name = self.prompt_string(&name_prompt)?;
        let estimated_hours = self.prompt_decimal(&estimated_prompt)?;
        let actual_hours = self.prompt_decimal(&actual_prompt)?;
        let difficulty = self.prompt_integer(&difficulty_prompt)?;
        let notes = self.prompt_string(&notes_prompt)?;

        let updated = Project {
            id: Some(id),
            name: name.or(current.name),
            estimated_hours: estimated_hours.or(current.estimated_hours),
            actual_hours: actual_hours.or(current.actual_hours),
            difficulty: difficulty.or(current.difficulty),
            notes: notes.or(current.notes),
        };

        self.service.modify_project_details(&updated)?;
        self.current_project = self.service.fetch_project_by_id(id)?;
        Ok(())
    }

    /// Lists projects, then deletes the chosen id.
    pub fn delete_project(&mut self) -> Result<(), ConsoleError> {
        self.list_projects()?;
        let Some(id) =
            self.prompt_integer::<ProjectId>("Enter the ID of the project to delete")?
        else {
            writeln!(self.output, "\nNo project ID entered.")?;
            return Ok(());
        };

        self.service.delete_project(id)?;
        writeln!(self.output, "Project {id} was deleted successfully.")?;

        if self
            .current_project
            .as_ref()
            .is_some_and(|project| project.id == Some(id))
        {
            self.current_project = None;
        }
        Ok(())
    }

    fn dispatch(&mut self) -> Result<Flow, ConsoleError> {
        let action = self.get_selection()?;
        debug!(
            "event=menu_dispatch module=console action={}",
            action.as_str()
        );

        match action {
            MenuAction::Exit => {
                self.current_project = None;
                writeln!(self.output, "Exiting the menu.")?;
                return Ok(Flow::Exit);
            }
            MenuAction::Create => self.create_project()?,
            MenuAction::List => self.list_projects()?,
            MenuAction::Select => self.select_project()?,
            MenuAction::Update => self.update_project_details()?,
            MenuAction::Delete => self.delete_project()?,
            MenuAction::Unknown(selection) => writeln!(
                self.output,
                "\n{selection} is not a valid selection. Try again."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn print_operations(&mut self) -> Result<(), ConsoleError> {
        writeln!(
            self.output,
            "\nThese are the available selections. Press the Enter key to quit:"
        )?;
        for line in OPERATIONS {
            writeln!(self.output, "  {line}")?;
        }

        match &self.current_project {
            Some(project) => writeln!(self.output, "\nYou are working with project:{project}")?,
            None => writeln!(self.output, "\nYou are not working with a project.")?,
        }
        Ok(())
    }

    fn prompt_string(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        Ok(parse_optional_string(&self.prompt(prompt)?))
    }

    fn prompt_decimal(&mut self, prompt: &str) -> Result<Option<Hours>, ConsoleError> {
        Ok(parse_optional_decimal(&self.prompt(prompt)?)?)
    }

    fn prompt_integer<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>, ConsoleError> {
        Ok(parse_optional_integer(&self.prompt(prompt)?)?)
    }

    /// Reads a field value; end of input here is fatal.
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.read_line(prompt)?.ok_or(ConsoleError::InputClosed)
    }

    /// Prints `<prompt>: ` and reads one line. `None` at end of input.
    ///
    /// Invalid UTF-8 is replaced, not rejected, so the parsers report it as
    /// malformed input and the session continues.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

fn with_hint<T: Display>(prompt: &str, current: Option<&T>) -> String {
    match current {
        Some(value) => format!("{prompt} [{value}]"),
        None => format!("{prompt} []"),
    }
}
