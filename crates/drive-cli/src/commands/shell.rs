//! Interactive file manager.
//!
//! Reads one command per line and drives a single long-lived
//! [`FileManager`], so the clipboard, breadcrumbs and rename drafts persist
//! between commands the way they do in a graphical file browser.

use std::path::PathBuf;

use drive_core::config::ClientConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::FileEntry;
use drive_manager::upload::local::dropped_from_path;
use drive_manager::{Activation, DispatchOutcome, DropFeedback, FileManager, MenuAction};

use crate::output::{self, OutputFormat};
use crate::session;

use super::download::save_stream;
use super::list::print_entries;
use super::remove::confirm_delete;
use super::upload;

const HELP: &str = "\
ls                      list the open folder
cd PATH                 change folder (.. and / work)
open NAME               open a folder or preview a file
pwd                     print the open folder
mkdir NAME              create a folder
rm NAME                 delete an entry
rename NAME NEW         rename an entry
cut NAME | copy NAME    put an entry on the clipboard
paste                   paste the clipboard here
clip                    show the clipboard
drag NAME FOLDER        drag an entry onto a folder row
menu [NAME]             context menu for an entry, or for the folder
put PATH...             upload local files or directories
get NAME [LOCAL]        download a file
cat NAME                print a text file
help                    this text
exit                    leave";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    ChangeDir(String),
    Open(String),
    Pwd,
    Mkdir(String),
    Remove(String),
    Rename(String, String),
    Cut(String),
    Copy(String),
    Paste,
    Clipboard,
    Drag(String, String),
    Menu(Option<String>),
    Put(Vec<PathBuf>),
    Get(String, Option<PathBuf>),
    Cat(String),
    Help,
    Exit,
}

/// Split a line into words. Double quotes group words containing spaces.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}

/// Parse one line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let words = tokenize(line);
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let one = |usage: &str| -> Result<String, String> {
        match rest {
            [arg] => Ok(arg.clone()),
            _ => Err(format!("usage: {usage}")),
        }
    };

    let command = match head.as_str() {
        "ls" | "dir" => ShellCommand::List,
        "cd" => ShellCommand::ChangeDir(rest.first().cloned().unwrap_or_else(|| "/".into())),
        "open" => ShellCommand::Open(one("open NAME")?),
        "pwd" => ShellCommand::Pwd,
        "mkdir" => ShellCommand::Mkdir(one("mkdir NAME")?),
        "rm" | "del" => ShellCommand::Remove(one("rm NAME")?),
        "rename" | "mv" => match rest {
            [name, new_name] => ShellCommand::Rename(name.clone(), new_name.clone()),
            _ => return Err("usage: rename NAME NEW".into()),
        },
        "cut" => ShellCommand::Cut(one("cut NAME")?),
        "copy" | "cp" => ShellCommand::Copy(one("copy NAME")?),
        "paste" => ShellCommand::Paste,
        "clip" => ShellCommand::Clipboard,
        "drag" => match rest {
            [name, folder] => ShellCommand::Drag(name.clone(), folder.clone()),
            _ => return Err("usage: drag NAME FOLDER".into()),
        },
        "menu" => match rest {
            [] => ShellCommand::Menu(None),
            [name] => ShellCommand::Menu(Some(name.clone())),
            _ => return Err("usage: menu [NAME]".into()),
        },
        "put" | "upload" if !rest.is_empty() => {
            ShellCommand::Put(rest.iter().map(PathBuf::from).collect())
        }
        "put" | "upload" => return Err("usage: put PATH...".into()),
        "get" | "download" => match rest {
            [name] => ShellCommand::Get(name.clone(), None),
            [name, local] => ShellCommand::Get(name.clone(), Some(PathBuf::from(local))),
            _ => return Err("usage: get NAME [LOCAL]".into()),
        },
        "cat" => ShellCommand::Cat(one("cat NAME")?),
        "help" | "?" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

/// Execute the shell command
pub async fn execute(config: &ClientConfig, format: OutputFormat) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    println!("Connected. Type 'help' for commands.");

    loop {
        let prompt = format!("drive:{}", manager.navigation().display_path());
        let line: String = match dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => break,
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                output::print_warning(&usage);
                continue;
            }
        };
        if command == ShellCommand::Exit {
            break;
        }

        manager.take_notice();
        match run(&mut manager, command, config, format).await {
            Ok(()) => output::print_notice(manager.take_notice().as_ref()),
            Err(e) => match manager.take_notice() {
                Some(notice) => output::print_error(&notice.text),
                None => output::print_error(&e.message),
            },
        }
    }
    Ok(())
}

/// Run one parsed command against the manager.
pub async fn run(
    manager: &mut FileManager,
    command: ShellCommand,
    config: &ClientConfig,
    format: OutputFormat,
) -> AppResult<()> {
    match command {
        ShellCommand::List => {
            manager.refresh().await?;
            print_entries(manager.entries(), format);
        }
        ShellCommand::ChangeDir(path) => session::change_dir(manager, &path).await?,
        ShellCommand::Open(name) => {
            let entry = entry_named(manager, &name)?;
            if let Activation::Preview(text) = manager.activate(&entry).await? {
                println!("{text}");
            }
        }
        ShellCommand::Pwd => println!("{}", manager.navigation().display_path()),
        ShellCommand::Mkdir(name) => {
            manager.create_folder(&name).await?;
        }
        ShellCommand::Remove(name) => {
            let entry = entry_named(manager, &name)?;
            if confirm_delete(&entry.name, entry.is_folder)? {
                manager.delete(&entry).await?;
            }
        }
        ShellCommand::Rename(name, new_name) => {
            let entry = entry_named(manager, &name)?;
            manager.rename_entry(&entry, &new_name).await?;
        }
        ShellCommand::Cut(name) => {
            let entry = entry_named(manager, &name)?;
            manager.cut(&entry);
        }
        ShellCommand::Copy(name) => {
            let entry = entry_named(manager, &name)?;
            manager.copy(&entry);
        }
        ShellCommand::Paste => {
            manager.paste().await?;
        }
        ShellCommand::Clipboard => match manager.clipboard().slot() {
            Some(slot) => output::print_kv(&format!("{:?}", slot.mode), &slot.entry.name),
            None => println!("Clipboard is empty"),
        },
        ShellCommand::Drag(name, folder) => {
            let entry = entry_named(manager, &name)?;
            let target = entry_named(manager, &folder)?;
            manager.drag_start(&entry);
            if manager.drag_over(&target) == DropFeedback::Reject {
                output::print_warning(&format!("'{}' does not accept drops", target.name));
            }
            manager.drop_on(&target).await?;
        }
        ShellCommand::Menu(name) => {
            let target = name.map(|n| entry_named(manager, &n)).transpose()?;
            run_menu(manager, target.as_ref()).await?;
        }
        ShellCommand::Put(paths) => {
            let mut items = Vec::with_capacity(paths.len());
            for path in &paths {
                items.push(dropped_from_path(path, config.upload.directory_page_size).await?);
            }
            let result = manager.upload_drop(items).await?;
            upload::report(&result, format);
        }
        ShellCommand::Get(name, local) => {
            let entry = entry_named(manager, &name)?;
            let stream = manager.download(&entry).await?;
            let target = local.unwrap_or_else(|| PathBuf::from(&entry.name));
            let written = save_stream(stream, &target).await?;
            output::print_kv("saved", &format!("{} ({written} bytes)", target.display()));
        }
        ShellCommand::Cat(name) => {
            let entry = entry_named(manager, &name)?;
            println!("{}", manager.preview(&entry).await?);
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Exit => {}
    }
    Ok(())
}

async fn run_menu(manager: &mut FileManager, target: Option<&FileEntry>) -> AppResult<()> {
    manager.open_menu(0, 0, target);
    let items = manager.menu_items();
    let labels: Vec<String> = items
        .iter()
        .map(|item| {
            if item.enabled {
                item.action.label().to_string()
            } else {
                format!("{} (unavailable)", item.action.label())
            }
        })
        .chain(std::iter::once("Cancel".to_string()))
        .collect();

    let choice = dialoguer::Select::new()
        .with_prompt(target.map(|t| t.name.as_str()).unwrap_or("This folder"))
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

    let Some(item) = items.get(choice) else {
        manager.close_menu();
        return Ok(());
    };
    let action: MenuAction = item.action;

    match manager.dispatch(action).await? {
        DispatchOutcome::RenameStarted(entry) => {
            let name: String = dialoguer::Input::new()
                .with_prompt("New name")
                .with_initial_text(entry.name.clone())
                .interact_text()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
            manager.set_rename_draft(name)?;
            manager.commit_rename().await?;
        }
        DispatchOutcome::Downloaded { entry, stream } => {
            let target = PathBuf::from(&entry.name);
            save_stream(stream, &target).await?;
        }
        DispatchOutcome::Copied(_)
        | DispatchOutcome::Cut(_)
        | DispatchOutcome::Pasted(_)
        | DispatchOutcome::Deleted(_) => {}
    }
    Ok(())
}

fn entry_named(manager: &FileManager, name: &str) -> AppResult<FileEntry> {
    manager
        .find(name)
        .cloned()
        .ok_or_else(|| AppError::validation(format!("No such file or folder: {name}")))
}
