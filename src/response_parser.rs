use std::mem;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    CreateFile,
    ModifyFile,
    Command,
    Explanation,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::CreateFile => "CREATE_FILE",
            ActionKind::ModifyFile => "MODIFY_FILE",
            ActionKind::Command => "COMMAND",
            ActionKind::Explanation => "EXPLANATION",
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, ActionKind::CreateFile | ActionKind::ModifyFile)
    }
}

// File actions always carry a non-empty path. Nothing else carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    path: Option<PathBuf>,
    content: String,
}

impl Action {
    /// Returns `None` if `kind` is not a file kind or `path` is empty.
    pub fn file(
        kind: ActionKind,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Option<Self> {
        let path = path.into();
        if !kind.is_file() || path.as_os_str().is_empty() {
            return None;
        }
        Some(Self {
            kind,
            path: Some(path),
            content: content.into(),
        })
    }

    pub fn command(content: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Command,
            path: None,
            content: content.into(),
        }
    }

    pub fn explanation(content: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Explanation,
            path: None,
            content: content.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

const FENCE: &str = "```";

const DIRECTIVES: &[(&str, ActionKind)] = &[
    ("CREATE_FILE:", ActionKind::CreateFile),
    ("MODIFY_FILE:", ActionKind::ModifyFile),
];

const COMMAND_PREFIXES: &[&str] = &["$", "go "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Directive { kind: ActionKind, path: &'a str },
    /// A directive prefix with no usable path. Ignored entirely.
    MalformedDirective,
    Fence,
    /// The full line; a leading `"$ "` is stripped only when it becomes an action.
    Command(&'a str),
    Prose(&'a str),
}

type LineRule = for<'a> fn(&'a str) -> Option<Line<'a>>;

// Evaluated in order; the first rule that matches wins. Anything unmatched is prose.
const LINE_RULES: &[LineRule] = &[classify_directive, classify_fence, classify_command];

pub(crate) fn classify(line: &str) -> Line<'_> {
    LINE_RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or(Line::Prose(line))
}

fn classify_directive(line: &str) -> Option<Line<'_>> {
    let (_, kind) = DIRECTIVES
        .iter()
        .find(|(prefix, _)| line.starts_with(*prefix))?;

    // keyword, path, inline remainder. The remainder is not used.
    let path = line.splitn(3, ':').nth(1).map(str::trim).unwrap_or("");
    if path.is_empty() {
        return Some(Line::MalformedDirective);
    }
    Some(Line::Directive { kind: *kind, path })
}

fn classify_fence(line: &str) -> Option<Line<'_>> {
    (line == FENCE).then_some(Line::Fence)
}

fn classify_command(line: &str) -> Option<Line<'_>> {
    COMMAND_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(*prefix))
        .then_some(Line::Command(line))
}

fn command_text(line: &str) -> &str {
    line.strip_prefix("$ ").unwrap_or(line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParserState {
    Idle,
    InFence,
    InFileAction,
    InFileActionAndFence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    Skip,
    /// Drop whatever a bare fenced block captured.
    Discard,
    Open { kind: ActionKind, path: &'a str },
    FlushAndOpen { kind: ActionKind, path: &'a str },
    Flush,
    Append(&'a str),
    EmitCommand(&'a str),
    EmitExplanation(&'a str),
}

impl ParserState {
    pub(crate) fn transition<'a>(self, line: Line<'a>) -> (ParserState, Step<'a>) {
        use ParserState::*;

        match (self, line) {
            (_, Line::MalformedDirective) => (self, Step::Skip),

            (Idle | InFence, Line::Directive { kind, path }) => {
                (InFileAction, Step::Open { kind, path })
            }
            (InFileAction | InFileActionAndFence, Line::Directive { kind, path }) => {
                (InFileAction, Step::FlushAndOpen { kind, path })
            }

            (Idle, Line::Fence) => (InFence, Step::Skip),
            (InFence, Line::Fence) => (Idle, Step::Discard),
            (InFileAction, Line::Fence) => (InFileActionAndFence, Step::Skip),
            (InFileActionAndFence, Line::Fence) => (Idle, Step::Flush),

            (Idle, Line::Command(text)) => (Idle, Step::EmitCommand(command_text(text))),
            (Idle, Line::Prose(text)) => (Idle, Step::EmitExplanation(text)),

            // Inside a fence or a file action every other line is body text,
            // kept as it appeared.
            (_, Line::Command(text) | Line::Prose(text)) => (self, Step::Append(text)),
        }
    }
}

struct Parser {
    state: ParserState,
    open: Option<(ActionKind, PathBuf)>,
    buffer: String,
    actions: Vec<Action>,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: ParserState::Idle,
            open: None,
            buffer: String::new(),
            actions: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        let (next, step) = self.state.transition(classify(line));

        match step {
            Step::Skip => {}
            Step::Discard => self.buffer.clear(),
            Step::Open { kind, path } => self.open(kind, path),
            Step::FlushAndOpen { kind, path } => {
                self.flush();
                self.open(kind, path);
            }
            Step::Flush => self.flush(),
            Step::Append(text) => {
                self.buffer.push_str(text);
                self.buffer.push('\n');
            }
            Step::EmitCommand(command) => self.actions.push(Action::command(command)),
            Step::EmitExplanation(text) => self.actions.push(Action::explanation(text)),
        }

        self.state = next;
    }

    fn open(&mut self, kind: ActionKind, path: &str) {
        self.buffer.clear();
        self.open = Some((kind, PathBuf::from(path)));
    }

    fn flush(&mut self) {
        if let Some((kind, path)) = self.open.take() {
            let content = mem::take(&mut self.buffer);
            self.actions.extend(Action::file(kind, path, content));
        }
    }

    fn finish(mut self) -> Vec<Action> {
        // An unterminated file action keeps whatever it accumulated.
        self.flush();
        self.actions
    }
}

pub fn parse_response(text: &str) -> Vec<Action> {
    let mut parser = Parser::new();
    for line in text.trim().lines().map(str::trim).filter(|l| !l.is_empty()) {
        parser.feed(line);
    }
    parser.finish()
}
