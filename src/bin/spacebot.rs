//! The hackerspace bot: `/status` reports the space status, `/sprachassistentin`
//! babbles a sentence learned from the group's chat history.
#[macro_use]
extern crate log;

use std::{process, time::Duration};

use spacebot::{
    api::SetMyCommandsRequest,
    bot::{self, SpaceBot},
    config::{self, Args, Config},
    markov::{self, SentenceGenerator},
    status::HttpStatusSource,
    Client, API,
};

const NAME: &str = "spacebot";

#[tokio::main]
async fn main() {
    spacebot::init_logger();

    let config = match Config::from_args(argh::from_env::<Args>()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}\n\n{}", err, config::usage(NAME));
            process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        error!("{:#}", err);
        process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting {}...", NAME);

    // getMe fails on a bad token, so check credentials before doing any work.
    let me = API::new(Client::new(config.api_token.clone()))
        .get_me()
        .await
        .map_err(|err| anyhow::anyhow!("Can't connect to Telegram: {}", err))?;
    let username = me.username.unwrap_or_default();
    info!("Logged in as @{}", username);

    let chain = markov::load_chain(&config.chat_history_file);
    let status = HttpStatusSource::new(&config.status_url, config.fetch_timeout)?;
    info!("Reporting status from {} for {}", status.url(), config.sensor_location);
    let bot = SpaceBot::new(chain, status, &config.sensor_location)
        .with_generator(SentenceGenerator::new().with_max_tokens(config.max_tokens));

    // Leave the long poll some slack before the HTTP request gives up.
    let client = Client::new(config.api_token)
        .with_request_timeout(Duration::from_secs(
            config.poll_timeout_s.unsigned_abs().saturating_add(30),
        ));
    let mut router = bot::router(client, bot)
        .with_poll_timeout_s(config.poll_timeout_s)
        .with_bot_username(username);

    if let Err(err) = router
        .api
        .set_my_commands(&SetMyCommandsRequest {
            commands: bot::commands(),
            ..Default::default()
        })
        .await
    {
        warn!("Can't register commands: {}", err);
    }

    let (_, shutdown_tx) = router.shutdown();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            _ = shutdown_tx.send(()).await;
        }
    });

    router.start().await;
    info!("Bye.");
    Ok(())
}
