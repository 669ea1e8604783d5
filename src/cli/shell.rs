use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::application::{AppError, Applied, Event, Session};
use crate::domain::{ExpenseField, ExpenseId, ExpenseUpdate, coerce_amount, format_currency};
use crate::io::Exporter;

use super::render;

/// One line of shell input
#[derive(Parser, Debug)]
#[command(name = "splitbills", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Friend management commands
    #[command(subcommand)]
    Friend(FriendCommands),

    /// List friends with their indexes
    Friends,

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Record how much of the shared total you have paid
    Pay {
        /// Friend name
        friend: String,

        /// Amount you paid (clamped to the shared total)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Switch the display language
    Lang,

    /// Show the summary for one friend, or everything
    Show {
        /// Friend name (omit for all friends)
        friend: Option<String>,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export
        #[arg(value_enum)]
        kind: ExportKind,

        /// Output file (printed if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
pub enum FriendCommands {
    /// Add a friend
    Add {
        /// Friend name (must be unique)
        name: String,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Remove a friend and everything shared with them
    Remove {
        /// Position in the friend list (see `friends`)
        index: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add an empty expense shared with a friend
    Add {
        /// Friend name
        friend: String,
    },

    /// Change one field of an expense
    Set {
        /// Expense ID
        id: ExpenseId,

        /// Field: description, amount, paidBy, splitWith
        field: ExpenseField,

        /// New value (words are joined with spaces; empty clears a description)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        value: Vec<String>,
    },

    /// Remove an expense
    Remove {
        /// Expense ID
        id: ExpenseId,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportKind {
    /// Per-friend totals and balances (CSV)
    Summaries,
    /// All expenses (CSV)
    Expenses,
    /// Full state (JSON)
    Snapshot,
}

/// Whether the shell should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Split a line into words. Single or double quotes group words.
pub fn tokenize(line: &str) -> Result<Vec<String>, AppError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(AppError::InvalidCommand(format!(
            "unterminated quote in: {}",
            line
        )));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellLine>, clap::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let tokens = tokenize(trimmed).map_err(|e| {
        clap::Error::raw(clap::error::ErrorKind::InvalidValue, format!("{}\n", e))
    })?;
    ShellLine::try_parse_from(tokens).map(Some)
}

/// Interprets shell lines against a session, writing results to `out`.
pub struct Shell<'a, W: Write> {
    session: &'a mut Session,
    out: W,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(session: &'a mut Session, out: W) -> Self {
        Self { session, out }
    }

    /// Run one line of input.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, AppError> {
        match parse_line(line) {
            Ok(Some(parsed)) => self.execute(parsed.command),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                use clap::error::ErrorKind;
                match e.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        write!(self.out, "{}", e.render())?;
                        Ok(Flow::Continue)
                    }
                    _ => Err(AppError::Usage(e.render().to_string())),
                }
            }
        }
    }

    /// Read lines until end of input or `quit`. Errors are reported and
    /// the loop continues.
    pub fn run_interactive<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<(), AppError> {
        if prompt {
            self.prompt()?;
        }
        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                // Usage errors come pre-rendered by clap
                Err(AppError::Usage(usage)) => writeln!(self.out, "{}", usage.trim_end())?,
                Err(e) => writeln!(self.out, "error: {}", e)?,
            }
            if prompt {
                self.prompt()?;
            }
        }
        Ok(())
    }

    /// Run a script; the first failing line aborts with its line number.
    pub fn run_script<R: BufRead>(&mut self, input: R) -> Result<(), AppError> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    return Err(AppError::InvalidCommand(format!(
                        "line {}: {}",
                        index + 1,
                        e.to_string().trim_end()
                    )));
                }
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}> ", self.session.language())?;
        self.out.flush()
    }

    fn require_partner(&self, friend: &str) -> Result<(), AppError> {
        if self.session.ledger().split_partners().any(|f| f.name == friend) {
            Ok(())
        } else {
            Err(AppError::FriendNotFound(friend.to_string()))
        }
    }

    fn require_friend(&self, friend: &str) -> Result<(), AppError> {
        match self.session.ledger().friend(friend) {
            Some(_) => Ok(()),
            None => Err(AppError::FriendNotFound(friend.to_string())),
        }
    }

    fn report_ignored(&mut self, command: &str, reason: &str) -> io::Result<()> {
        warn!(command, reason, "event ignored");
        writeln!(self.out, "Ignored: {}", reason)
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<Flow, AppError> {
        match command {
            ShellCommand::Friend(FriendCommands::Add { name, image }) => {
                let trimmed = name.trim().to_string();
                let applied = self.session.apply(Event::AddFriend { name, image });
                if applied.is_ignored() {
                    self.report_ignored("friend add", "name is blank or already taken")?;
                } else {
                    writeln!(self.out, "Added friend: {}", trimmed)?;
                }
            }

            ShellCommand::Friend(FriendCommands::Remove { index }) => {
                let name = self
                    .session
                    .ledger()
                    .friends()
                    .get(index)
                    .map(|f| f.name.clone());
                let applied = self.session.apply(Event::RemoveFriend { index });
                match (applied, name) {
                    (Applied::Changed, Some(name)) => {
                        writeln!(self.out, "Removed friend: {}", name)?
                    }
                    _ => {
                        self.report_ignored("friend remove", "no removable friend at that index")?
                    }
                }
            }

            ShellCommand::Friends => render::render_friends(self.session, &mut self.out)?,

            ShellCommand::Expense(ExpenseCommands::Add { friend }) => {
                self.require_partner(&friend)?;
                if let Applied::ExpenseAdded(id) = self.session.apply(Event::AddExpense {
                    friend: friend.clone(),
                }) {
                    writeln!(self.out, "Added expense #{} shared with {}", id, friend)?;
                }
            }

            ShellCommand::Expense(ExpenseCommands::Set { id, field, value }) => {
                let update = ExpenseUpdate::parse(field, &value.join(" "));
                match &update {
                    ExpenseUpdate::SplitWith(name) => self.require_partner(name)?,
                    ExpenseUpdate::PaidBy(name) => self.require_friend(name)?,
                    _ => {}
                }
                if self
                    .session
                    .apply(Event::UpdateExpense { id, update })
                    .is_ignored()
                {
                    self.report_ignored("expense set", "no expense with that ID")?;
                } else {
                    writeln!(self.out, "Updated expense #{} ({})", id, field)?;
                }
            }

            ShellCommand::Expense(ExpenseCommands::Remove { id }) => {
                if self.session.apply(Event::RemoveExpense { id }).is_ignored() {
                    self.report_ignored("expense remove", "no expense with that ID")?;
                } else {
                    writeln!(self.out, "Removed expense #{}", id)?;
                }
            }

            ShellCommand::Pay { friend, amount } => {
                self.require_partner(&friend)?;
                let amount = coerce_amount(&amount);
                if let Applied::PaymentSet(stored) = self.session.apply(Event::SetDirectPayment {
                    friend: friend.clone(),
                    amount,
                }) {
                    let currency = &self.session.settings().currency_symbol;
                    writeln!(
                        self.out,
                        "Your payment with {}: {}",
                        friend,
                        format_currency(currency, stored)
                    )?;
                }
            }

            ShellCommand::Lang => {
                self.session.apply(Event::ToggleLanguage);
                writeln!(self.out, "Language: {}", self.session.language())?;
            }

            ShellCommand::Show { friend: Some(friend) } => {
                let report = self.session.require_report(&friend)?;
                render::render_report(self.session, &report, &mut self.out)?;
            }

            ShellCommand::Show { friend: None } => render::render_all(self.session, &mut self.out)?,

            ShellCommand::Export { kind, output } => self.export(kind, output)?,

            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn export(&mut self, kind: ExportKind, output: Option<PathBuf>) -> Result<(), AppError> {
        let exporter = Exporter::new(self.session.ledger());

        let writer: Box<dyn Write + '_> = match &output {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(&mut self.out),
        };

        let message = match kind {
            ExportKind::Summaries => {
                format!("Exported {} summaries", exporter.export_reports_csv(writer)?)
            }
            ExportKind::Expenses => {
                format!("Exported {} expenses", exporter.export_expenses_csv(writer)?)
            }
            ExportKind::Snapshot => {
                let snapshot = exporter.export_snapshot_json(writer)?;
                format!(
                    "Exported snapshot: {} friends, {} expenses",
                    snapshot.friends.len(),
                    snapshot.expenses.len()
                )
            }
        };

        match output {
            Some(path) => writeln!(self.out, "{} to {}", message, path.display())?,
            None => writeln!(self.out)?,
        }
        Ok(())
    }
}
