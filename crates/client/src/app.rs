//! Glue between parsed commands and the edit session.

use anyhow::Result;
use runtime::{EditSession, SessionError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{Command, HELP};
use crate::view::{CatalogList, SheetList, SheetView, StatisticsView};

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct App {
    session: EditSession,
}

impl App {
    pub fn new(session: EditSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Reads commands from `input` until it ends or `quit` is entered,
    /// writing every response to `output`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Client starting...");
        let mut lines = input.lines();
        output.write_all(b"Type `help` for commands.\n> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                output.write_all(b"> ").await?;
                output.flush().await?;
                continue;
            }
            match self.handle_line(&line) {
                Flow::Continue(text) => {
                    output.write_all(text.as_bytes()).await?;
                    if !text.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                    output.write_all(b"> ").await?;
                    output.flush().await?;
                }
                Flow::Quit => break,
            }
        }

        if self.session.is_dirty() {
            tracing::warn!("Exiting with unsaved edits");
        }
        tracing::info!("Client stopped");
        Ok(())
    }

    /// Parses and executes one line.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => return Flow::Continue(format!("error: {error}")),
        };
        if command == Command::Quit {
            return Flow::Quit;
        }
        match self.execute(command) {
            Ok(text) => Flow::Continue(text),
            Err(error) => Flow::Continue(format!("error: {error}")),
        }
    }

    fn execute(&mut self, command: Command) -> Result<String, SessionError> {
        let session = &mut self.session;
        let text = match command {
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
            Command::Show => render_sheet(session),
            Command::Stats => match session.statistics() {
                Some(stats) => StatisticsView(&stats).to_string(),
                None => "no sheet selected".to_string(),
            },
            Command::Catalogs => CatalogList(&session.snapshot()).to_string(),
            Command::Sheets => SheetList(&session.snapshot()).to_string(),

            Command::AddCatalog(name) => {
                session.add_catalog(&name)?;
                format!("added catalog {name:?}")
            }
            Command::RenameCatalog(name) => {
                session.rename_catalog(&name)?;
                format!("renamed catalog to {name:?}")
            }
            Command::RemoveCatalog => {
                session.remove_catalog()?;
                CatalogList(&session.snapshot()).to_string()
            }
            Command::SelectCatalog(index) => {
                session.select_catalog(index)?;
                SheetList(&session.snapshot()).to_string()
            }

            Command::SelectSheet(index) => {
                session.select_sheet(index)?;
                render_sheet(session)
            }
            Command::NewSheet(name) => {
                session.set_new_sheet_name(&name)?;
                let pending = session.snapshot().new_sheet_name().to_string();
                session.add_new_sheet(&pending)?;
                format!("created {pending:?}")
            }
            Command::Save => {
                session.save()?;
                "saved".to_string()
            }
            Command::Delete => {
                session.delete()?;
                SheetList(&session.snapshot()).to_string()
            }
            Command::Discard => {
                session.discard()?;
                render_sheet(session)
            }

            Command::Rename(name) => {
                session.set_name(&name)?;
                "ok".to_string()
            }
            Command::Stat(stat, text) => parsed(session.set_stat_text(stat, &text)?, &text),
            Command::Abilities(text) => {
                session.set_abilities(&text)?;
                "ok".to_string()
            }
            Command::Tag(text) => {
                session.set_current_tag(&text)?;
                if let Err(error) = session.add_tag() {
                    session.set_current_tag("")?;
                    return Err(error);
                }
                "ok".to_string()
            }
            Command::Untag(index) => {
                session.remove_tag(index)?;
                "ok".to_string()
            }

            Command::AddColumn => {
                session.add_result_column()?;
                "ok".to_string()
            }
            Command::RemoveColumn(column) => {
                session.remove_result_column(column)?;
                "ok".to_string()
            }
            Command::Column {
                field,
                column,
                text,
            } => parsed(session.set_column_text(field, column, &text)?, &text),

            Command::AddWeapon => {
                let index = session.add_weapon()?;
                format!("added weapon [{index}]")
            }
            Command::RemoveWeapon(weapon) => {
                session.remove_weapon(weapon)?;
                "ok".to_string()
            }
            Command::WeaponName { weapon, name } => {
                session.set_weapon_name(weapon, &name)?;
                "ok".to_string()
            }
            Command::Weapon {
                field,
                weapon,
                column,
                text,
            } => parsed(
                session.set_weapon_text(field, weapon, column, &text)?,
                &text,
            ),
        };
        Ok(text)
    }
}

fn render_sheet(session: &EditSession) -> String {
    match session.working_sheet() {
        Some(sheet) => SheetView {
            sheet,
            dirty: session.is_dirty(),
        }
        .to_string(),
        None => "no sheet selected".to_string(),
    }
}

fn parsed(accepted: bool, text: &str) -> String {
    if accepted {
        "ok".to_string()
    } else {
        format!("ignored {text:?}: not a number")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::InMemoryCatalogRepository;

    fn app() -> App {
        let mut session = EditSession::new(Box::new(InMemoryCatalogRepository::new()));
        session.load().unwrap();
        App::new(session)
    }

    fn text(flow: Flow) -> String {
        match flow {
            Flow::Continue(text) => text,
            Flow::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn edits_stay_in_draft_until_saved() {
        let mut app = app();
        app.handle_line("new Intercessors");
        assert_eq!(text(app.handle_line("stat health 2")), "ok");
        assert!(app.session().is_dirty());
        assert_eq!(app.session().selected_sheet().unwrap().health, 0);

        assert_eq!(text(app.handle_line("save")), "saved");
        assert_eq!(app.session().selected_sheet().unwrap().health, 2);
    }

    #[test]
    fn unparsable_cell_text_is_ignored() {
        let mut app = app();
        app.handle_line("new Scouts");
        let reply = text(app.handle_line("weapon attacks 0 0 lots"));
        assert!(reply.starts_with("ignored"));
        assert!(!app.session().is_dirty());
    }

    #[test]
    fn session_errors_are_reported_not_fatal() {
        let mut app = app();
        assert_eq!(text(app.handle_line("save")), "error: no datasheet is selected");
        assert!(text(app.handle_line("catalog remove")).starts_with("error:"));
        assert!(text(app.handle_line("dance")).starts_with("error: unknown command"));
    }

    #[test]
    fn rejected_tag_leaves_no_pending_input() {
        let mut app = app();
        assert_eq!(
            text(app.handle_line("tag Infantry")),
            "error: no datasheet is selected"
        );
        assert_eq!(app.session().snapshot().current_tag(), "");

        app.handle_line("new Scouts");
        assert_eq!(text(app.handle_line("tag Infantry")), "ok");
        assert_eq!(app.session().working_sheet().unwrap().tags, ["Infantry"]);
    }

    #[test]
    fn quit_stops_the_loop() {
        assert_eq!(app().handle_line("quit"), Flow::Quit);
    }

    #[tokio::test]
    async fn run_processes_lines_until_quit() {
        let mut app = app();
        let input: &[u8] = b"new Boyz\nweapon name 0 Choppa\nsave\nquit\nnew Ignored\n";
        let mut output = Vec::new();

        app.run(input, &mut output).await.unwrap();

        let catalog = app.session().selected_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.datasheets()[0].stat_table.weapons()[0].name, "Choppa");
        assert!(String::from_utf8(output).unwrap().contains("saved"));
    }
}
