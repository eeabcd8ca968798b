//! Line-oriented command shell on top of [`FileSystem`].
//!
//! The shell tokenizes and validates every line before it reaches the file system, so the core
//! only ever sees well-formed names and sizes. Results are rendered as plain text.

use std::io::{BufRead, Write};

use log::{debug, warn};
use thiserror::Error;

use crate::core::{FsBackend, Result, utils};
use crate::vfs::FileSystem;

pub const HELP: &str = "\
RO-FiS Commands:
  create <name> <content>   Create a file (or replace its content)
  read <name>               Display the content of a file
  list | ls                 List files and directories in the current directory
  mkdir <name>              Create a directory
  rm <name>                 Delete a file
  rmdir <name>              Delete an empty directory
  cd <name> | cd ..         Enter a subdirectory or go up one level
  pwd                       Print the current path
  disk <command>            Manage partitions (see `disk help`)
  help                      Show this help
  exit | quit               Save and exit";

pub const DISK_HELP: &str = "\
Disk Commands:
  disk create <id> <size>   Create a partition
  disk delete <id>          Delete a partition
  disk resize <id> <size>   Change the size of a partition
  disk list                 List partitions and free space
  disk help                 Show this help";

/// Reasons a line is rejected before reaching the file system.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument <{arg}>, usage: {usage}")]
    MissingArgument { arg: &'static str, usage: &'static str },
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("invalid size: {0:?}, expected a non-negative integer")]
    InvalidSize(String),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { name: String, content: String },
    Read { name: String },
    List,
    Mkdir { name: String },
    Rm { name: String },
    Rmdir { name: String },
    Cd { segment: String },
    Pwd,
    Disk(DiskCommand),
    Help,
    Exit,
}

/// A parsed `disk` sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskCommand {
    Create { id: String, size: u64 },
    Delete { id: String },
    Resize { id: String, size: u64 },
    List,
    Help,
}

/// Splits off the first whitespace-delimited token; the remainder keeps its inner spacing.
fn next_token(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }
    match line.find(char::is_whitespace) {
        Some(pos) => Some((&line[..pos], line[pos..].trim_start())),
        None => Some((line, "")),
    }
}

fn require<'a>(
    rest: &'a str,
    arg: &'static str,
    usage: &'static str,
) -> std::result::Result<(&'a str, &'a str), ParseError> {
    next_token(rest).ok_or(ParseError::MissingArgument { arg, usage })
}

fn name_arg(
    rest: &str,
    usage: &'static str,
) -> std::result::Result<(String, String), ParseError> {
    let (name, rest) = require(rest, "name", usage)?;
    if !utils::is_valid_name(name) {
        return Err(ParseError::InvalidName(name.to_string()));
    }
    Ok((name.to_string(), rest.to_string()))
}

fn size_arg(rest: &str, usage: &'static str) -> std::result::Result<u64, ParseError> {
    let (size, _) = require(rest, "size", usage)?;
    size.parse()
        .map_err(|_| ParseError::InvalidSize(size.to_string()))
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> std::result::Result<Command, ParseError> {
        let (word, rest) = next_token(line).ok_or(ParseError::Empty)?;

        let command = match word {
            "create" => {
                let usage = "create <name> <content>";
                let (name, rest) = name_arg(rest, usage)?;
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        arg: "content",
                        usage,
                    });
                }
                Command::Create {
                    name,
                    content: rest.to_string(),
                }
            }
            "read" => Command::Read {
                name: name_arg(rest, "read <name>")?.0,
            },
            "list" | "ls" => Command::List,
            "mkdir" => Command::Mkdir {
                name: name_arg(rest, "mkdir <name>")?.0,
            },
            "rm" => Command::Rm {
                name: name_arg(rest, "rm <name>")?.0,
            },
            "rmdir" => Command::Rmdir {
                name: name_arg(rest, "rmdir <name>")?.0,
            },
            "cd" => {
                let (segment, _) = require(rest, "name", "cd <name> | cd ..")?;
                if segment != utils::PARENT && !utils::is_valid_name(segment) {
                    return Err(ParseError::InvalidName(segment.to_string()));
                }
                Command::Cd {
                    segment: segment.to_string(),
                }
            }
            "pwd" => Command::Pwd,
            "disk" => Command::Disk(DiskCommand::parse(rest)?),
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

impl DiskCommand {
    /// Parses the arguments following `disk`.
    pub fn parse(args: &str) -> std::result::Result<DiskCommand, ParseError> {
        let Some((word, rest)) = next_token(args) else {
            return Ok(DiskCommand::Help);
        };

        let command = match word {
            "create" => {
                let usage = "disk create <id> <size>";
                let (id, rest) = require(rest, "id", usage)?;
                DiskCommand::Create {
                    id: id.to_string(),
                    size: size_arg(rest, usage)?,
                }
            }
            "delete" => {
                let (id, _) = require(rest, "id", "disk delete <id>")?;
                DiskCommand::Delete { id: id.to_string() }
            }
            "resize" => {
                let usage = "disk resize <id> <size>";
                let (id, rest) = require(rest, "id", usage)?;
                DiskCommand::Resize {
                    id: id.to_string(),
                    size: size_arg(rest, usage)?,
                }
            }
            "list" => DiskCommand::List,
            "help" => DiskCommand::Help,
            other => return Err(ParseError::UnknownCommand(format!("disk {}", other))),
        };
        Ok(command)
    }
}

/// Whether the read-eval loop goes on after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read-eval-print loop over a [`FileSystem`].
pub struct Shell {
    fs: FileSystem,
    prompt: String,
}

impl Shell {
    pub fn new<S: Into<String>>(fs: FileSystem, prompt: S) -> Self {
        Self {
            fs,
            prompt: prompt.into(),
        }
    }

    pub fn file_system(&self) -> &FileSystem {
        &self.fs
    }

    pub fn into_file_system(self) -> FileSystem {
        self.fs
    }

    /// Prompt for the next line, e.g. `RO-FiS:root/docs> `.
    pub fn prompt(&self) -> String {
        format!("{}:{}> ", self.prompt, self.fs.tree().current_path())
    }

    /// Runs commands from `input` until `exit` or end of input.
    /// Lines that are not valid UTF-8 are rejected and the loop goes on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", HELP)?;

        let mut lines = input.split(b'\n');
        loop {
            write!(output, "{}", self.prompt())?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                debug!("end of input");
                break;
            };
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let Ok(line) = String::from_utf8(line) else {
                writeln!(output, "Error: input is not valid UTF-8")?;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Ok(command) => {
                    if self.execute(command, &mut output)? == Flow::Exit {
                        break;
                    }
                }
                Err(ParseError::UnknownCommand(word)) => {
                    writeln!(output, "Unknown command: {}", word)?;
                    writeln!(output, "Type `help` for the list of commands.")?;
                }
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
        }
        Ok(())
    }

    /// Applies one command and renders its outcome to `output`.
    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<Flow> {
        debug!("execute {:?}", command);
        let tree = self.fs.tree_mut();

        match command {
            Command::Create { name, content } => {
                tree.create_file(&name, content.as_bytes());
            }
            Command::Read { name } => match tree.read_file(&name) {
                Some(content) => writeln!(
                    output,
                    "Content of {}: {}",
                    name,
                    String::from_utf8_lossy(content)
                )?,
                None => writeln!(output, "File not found")?,
            },
            Command::List => {
                let listing = tree.list_contents();
                if listing.is_empty() {
                    writeln!(output, "(empty)")?;
                }
                for dir in &listing.directories {
                    writeln!(output, "{}/", dir)?;
                }
                for file in &listing.files {
                    writeln!(output, "{}", file)?;
                }
            }
            Command::Mkdir { name } => {
                if !tree.create_directory(&name) {
                    writeln!(output, "Directory already exists: {}", name)?;
                }
            }
            Command::Rm { name } => {
                if !tree.delete_file(&name) {
                    writeln!(output, "File not found")?;
                }
            }
            Command::Rmdir { name } => {
                if !tree.delete_directory(&name) {
                    writeln!(output, "Directory not found or not empty: {}", name)?;
                }
            }
            Command::Cd { segment } => {
                if !tree.change_directory(&segment) {
                    writeln!(output, "No such directory: {}", segment)?;
                }
            }
            Command::Pwd => writeln!(output, "{}", tree.current_path())?,
            Command::Disk(command) => self.execute_disk(command, output)?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn execute_disk<W: Write>(&mut self, command: DiskCommand, output: &mut W) -> Result<()> {
        let disk = self.fs.disk_mut();

        match command {
            DiskCommand::Create { id, size } => {
                if disk.create_partition(&id, size) {
                    writeln!(output, "Partition {} created ({} units)", id, size)?;
                } else {
                    writeln!(output, "Not enough disk space ({} units free)", disk.free())?;
                }
            }
            DiskCommand::Delete { id } => {
                if disk.delete_partition(&id) {
                    writeln!(output, "Partition {} deleted", id)?;
                } else {
                    writeln!(output, "Partition not found: {}", id)?;
                }
            }
            DiskCommand::Resize { id, size } => {
                if disk.get(&id).is_none() {
                    writeln!(output, "Partition not found: {}", id)?;
                } else if disk.resize_partition(&id, size) {
                    writeln!(output, "Partition {} resized to {} units", id, size)?;
                } else {
                    writeln!(output, "Not enough disk space ({} units free)", disk.free())?;
                }
            }
            DiskCommand::List => {
                for p in disk.list_partitions() {
                    writeln!(output, "{}\tsize {}\tused {}", p.id(), p.size(), p.used())?;
                }
                writeln!(
                    output,
                    "{} of {} units allocated, {} free",
                    disk.allocated(),
                    disk.capacity(),
                    disk.free()
                )?;
            }
            DiskCommand::Help => writeln!(output, "{}", DISK_HELP)?,
        }
        Ok(())
    }

    /// Loads the snapshot, reporting a failure as a diagnostic only.
    pub fn restore<P: AsRef<std::path::Path>>(&mut self, path: P) {
        if let Err(e) = self.fs.load_snapshot(path) {
            warn!("snapshot not restored: {:#}", e);
        }
    }

    /// Saves the snapshot, reporting a failure as a diagnostic only.
    pub fn persist<P: AsRef<std::path::Path>>(&self, path: P) {
        if let Err(e) = self.fs.save_snapshot(path) {
            warn!("snapshot not saved: {:#}", e);
        }
    }
}
