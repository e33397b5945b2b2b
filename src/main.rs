use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use sat_planner::{
    cli::{self, Cli},
    config::{self, Settings},
    logging::{self, LogTarget},
    tui::{self, app::App, keymap::keymap_from, theme::theme_of},
    DataFile, Session,
};

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data = DataFile::new(config::data_path(cli.file.as_deref()));

    let Some(command) = cli.command.clone() else {
        // stdout belongs to the UI; only log when a file is given
        if let Some(path) = cli.log_file.as_deref() {
            logging::init(LogTarget::File(path)).context("init logging")?;
        }
        tracing::debug!(?cli, "parsed cli");
        let settings = Settings::load(cli.config.as_deref());
        let theme = theme_of(cli.theme.unwrap_or(settings.theme));
        let (session, load_err) = Session::open(data);
        let app = App::new(
            session,
            load_err,
            theme,
            keymap_from(&settings.keys),
            settings.rating_step,
        );
        if let Some(err) = tui::run(app)? {
            return Err(anyhow::Error::new(err).context("study data was not saved on exit"));
        }
        return Ok(());
    };

    logging::init(LogTarget::Stderr).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");
    cli::run_command(data, command)
}
