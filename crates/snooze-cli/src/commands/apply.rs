use std::path::Path;

use clap::{Args, ValueEnum};
use snooze_core::monitoring::{MonitoringClient, SnoozeEmitter, TokenSource, DEFAULT_ENDPOINT};
use snooze_core::{load_schedule, runner};

#[derive(Clone, Copy, ValueEnum)]
pub enum TokenSourceArg {
    /// GOOGLE_OAUTH_ACCESS_TOKEN if set, otherwise gcloud
    Auto,
    /// `gcloud auth print-access-token`
    Gcloud,
    /// GCE / Cloud Run metadata server
    Metadata,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Where to get the API access token
    #[arg(long, value_enum, default_value_t = TokenSourceArg::Auto)]
    token_source: TokenSourceArg,
    /// Use this access token instead of a token source
    #[arg(long)]
    access_token: Option<String>,
    /// Monitoring API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

impl ApplyArgs {
    fn token_source(&self) -> TokenSource {
        match (&self.access_token, self.token_source) {
            (Some(token), _) => TokenSource::Static(token.clone()),
            (None, TokenSourceArg::Auto) => TokenSource::from_env(),
            (None, TokenSourceArg::Gcloud) => TokenSource::Gcloud,
            (None, TokenSourceArg::Metadata) => TokenSource::Metadata,
        }
    }
}

pub fn run(config: &Path, args: ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Parse everything before touching the network.
    let schedule = load_schedule(config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = MonitoringClient::connect(&args.endpoint, &args.token_source()).await?;
        let emitter = SnoozeEmitter::new(client);
        let mut stdout = std::io::stdout();
        runner::apply(&schedule, &emitter, &mut stdout).await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
