use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use traktshow::{cli, config, logging};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Print diagnostic logs to stderr
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store your Trakt.tv client id and secret
    Config(ConfigOptions),

    /// Authenticate with Trakt.tv
    Login(LoginOptions),

    /// Forget the stored access token
    Logout,

    /// Show or export your watch history
    History(HistoryOptions),

    /// Show watch progress for shows with unwatched episodes
    Progress(ProgressOptions),

    /// Show your watch statistics
    Stats(UserOptions),

    /// Show your profile
    Profile(UserOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigOptions {
    /// Client ID of your Trakt API application
    #[clap(long)]
    pub client_id: Option<String>,

    /// Client secret of your Trakt API application
    #[clap(long)]
    pub client_secret: Option<String>,

    /// Redirect URI registered for the application
    #[clap(long)]
    pub redirect_uri: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    /// Authorize in the browser and exchange the code instead of using a device code
    #[clap(long)]
    pub manual: bool,

    /// Capture the code with a local listener on the redirect URI (requires --manual)
    #[clap(long, requires = "manual")]
    pub listen: bool,

    /// Don't try to open a browser
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    /// Number of records to fetch
    #[clap(long, default_value_t = 25)]
    pub limit: u32,

    /// Page to fetch
    #[clap(long, default_value_t = 1)]
    pub page: u32,

    /// Export the whole history to the cache directory
    #[clap(long, conflicts_with = "cached")]
    pub export: bool,

    /// Include full show, episode and movie details
    #[clap(long)]
    pub extended: bool,

    /// Show the last export instead of querying Trakt
    #[clap(long)]
    pub cached: bool,

    #[clap(flatten)]
    pub user: UserOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct ProgressOptions {
    /// Include shows that are fully watched
    #[clap(long)]
    pub all: bool,

    #[clap(flatten)]
    pub user: UserOptions,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UserOptions {
    /// Trakt user slug (defaults to TRAKT_USER or "me")
    #[clap(long)]
    pub user: Option<String>,
}

impl UserOptions {
    fn resolve(self) -> String {
        self.user.unwrap_or_else(config::default_user)
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);
    config::load_env();

    match cli.command {
        Command::Config(opt) => {
            cli::config(opt.client_id, opt.client_secret, opt.redirect_uri).await
        }
        Command::Login(opt) => cli::login(opt.manual, opt.listen, opt.no_browser).await,
        Command::Logout => cli::logout().await,
        Command::History(opt) => {
            cli::history(
                opt.user.resolve(),
                opt.limit,
                opt.page,
                opt.export,
                opt.extended,
                opt.cached,
            )
            .await
        }
        Command::Progress(opt) => cli::progress(opt.user.resolve(), opt.all).await,
        Command::Stats(opt) => cli::stats(opt.resolve()).await,
        Command::Profile(opt) => cli::profile(opt.resolve()).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
