use crate::app_error::AppError;
use crate::file_updater::write_action_file;
use crate::response_parser::{Action, ActionKind};
use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionReport {
    pub executed: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct Executor<R, W> {
    input: R,
    output: W,
    dry_run: bool,
}

impl<R: BufRead, W: Write> Executor<R, W> {
    pub fn new(input: R, output: W, dry_run: bool) -> Self {
        Self {
            input,
            output,
            dry_run,
        }
    }

    pub fn run(&mut self, actions: &[Action]) -> Result<ExecutionReport, AppError> {
        let mut report = ExecutionReport::default();

        if actions.is_empty() {
            writeln!(self.output, "No actions suggested.")?;
            return Ok(report);
        }

        self.render(actions)?;

        if self.dry_run {
            report.skipped = actions
                .iter()
                .filter(|a| a.kind() != ActionKind::Explanation)
                .count();
            return Ok(report);
        }

        for action in actions {
            if action.kind() == ActionKind::Explanation {
                writeln!(self.output, "{}", action.content())?;
                continue;
            }

            if !self.confirm()? {
                report.skipped += 1;
                continue;
            }

            match self.perform(action) {
                Ok(()) => report.executed += 1,
                Err(e) => {
                    tracing::warn!("Failed to {}: {}", describe(action), e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    pub fn render(&mut self, actions: &[Action]) -> Result<(), AppError> {
        writeln!(self.output, "Suggested actions:")?;
        for (i, action) in actions.iter().enumerate() {
            write!(self.output, "{}. ", i + 1)?;
            match action.kind() {
                ActionKind::CreateFile | ActionKind::ModifyFile => {
                    let path = action.path().map(|p| p.display().to_string()).unwrap_or_default();
                    writeln!(self.output, "{}: {}", action.kind().label(), path)?;
                    writeln!(self.output, "Content:-\n{}", action.content())?;
                }
                ActionKind::Command => writeln!(self.output, "Execute:- {}", action.content())?,
                ActionKind::Explanation => writeln!(self.output, "Note:- {}", action.content())?,
            }
        }
        Ok(())
    }

    fn confirm(&mut self) -> Result<bool, AppError> {
        write!(self.output, "Execute this action? (y/n): ")?;
        self.output.flush()?;

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => Ok(answer.trim() == "y"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {e}");
                Ok(false)
            }
        }
    }

    fn perform(&mut self, action: &Action) -> Result<(), AppError> {
        match action.kind() {
            ActionKind::CreateFile | ActionKind::ModifyFile => {
                let path = write_action_file(action)?;
                writeln!(self.output, "File {}: {}", verb(action.kind()), path.display())?;
            }
            ActionKind::Command => run_shell(action.content())?,
            ActionKind::Explanation => {}
        }
        Ok(())
    }
}

fn verb(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::CreateFile => "create",
        ActionKind::ModifyFile => "modify",
        ActionKind::Command => "execute",
        ActionKind::Explanation => "note",
    }
}

fn describe(action: &Action) -> String {
    match action.kind() {
        ActionKind::Command => format!("execute command `{}`", action.content()),
        kind => {
            let path = action.path().map(|p| p.display().to_string()).unwrap_or_default();
            format!("{} {}", verb(kind), path)
        }
    }
}

pub fn run_shell(command: &str) -> Result<(), AppError> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| AppError::Command(format!("Failed to start `sh`: {e}")))?;

    if !status.success() {
        return Err(AppError::Command(format!(
            "`{command}` exited with {status}"
        )));
    }
    Ok(())
}
