use crate::commands::Commands;

use clap::Parser;
use funnel_config::Config;

#[derive(Parser)]
#[command(name = "funnel")]
#[command(about = "Innovation funnel board CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Backend base URL (overrides config and FUNNEL_BASE_URL)
    #[arg(long, global = true)]
    pub(crate) server: Option<String>,

    /// Bearer token (overrides config and FUNNEL_TOKEN)
    #[arg(long, global = true)]
    pub(crate) token: Option<String>,

    /// Company id sent with every request
    #[arg(long, global = true)]
    pub(crate) company_id: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}

impl Cli {
    /// Flags win over config file and environment
    pub(crate) fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref server) = self.server {
            config.client.base_url = server.clone();
        }
        if let Some(ref token) = self.token {
            config.auth.token = Some(token.clone());
        }
        if let Some(ref company_id) = self.company_id {
            config.auth.company_id = Some(company_id.clone());
        }
    }
}
