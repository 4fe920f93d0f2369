/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Weather,
    Wikipedia,
    Ai,
    News,
    Note,
    ShowNotes,
    WhoAmI,
    Help,
    Exit,
    Unknown,
}

/// One classified line. `argument` is empty for commands that take none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub argument: String,
}

impl Command {
    fn new(kind: CommandKind, argument: &str) -> Self {
        Self {
            kind,
            argument: argument.trim().to_string(),
        }
    }

    fn bare(kind: CommandKind) -> Self {
        Self::new(kind, "")
    }
}

pub const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

/// Classifies one raw input line.
///
/// The line is trimmed and lower-cased, then checked against the rules in
/// order; the first match wins. Prefix commands take the rest of the line,
/// trimmed, as their argument.
pub fn classify(raw: &str) -> Command {
    let line = raw.trim().to_lowercase();
    let line = line.as_str();

    if let Some(rest) = line.strip_prefix("weather") {
        return Command::new(CommandKind::Weather, rest);
    }
    if let Some(rest) = line.strip_prefix("wikipedia") {
        return Command::new(CommandKind::Wikipedia, rest);
    }
    // `ai ` needs the space so "air" stays unknown. A typed "ai " arrives here
    // as "ai" because of the trim, so the bare word counts too.
    if line == "ai" || line.starts_with("ai ") {
        return Command::new(CommandKind::Ai, &line[2..]);
    }
    if line == "news" {
        return Command::bare(CommandKind::News);
    }
    if line.starts_with("note ") {
        return Command::new(CommandKind::Note, &line[4..]);
    }
    match line {
        "show notes" => Command::bare(CommandKind::ShowNotes),
        "whoami" => Command::bare(CommandKind::WhoAmI),
        "help" => Command::bare(CommandKind::Help),
        _ if EXIT_WORDS.contains(&line) => Command::bare(CommandKind::Exit),
        _ => Command::bare(CommandKind::Unknown),
    }
}
