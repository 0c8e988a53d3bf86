use bot::{Bot, Pacing, QuestionBank, VerifyingKey};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{convert::Infallible, env, net::Ipv4Addr, pin::pin};
use tokio::{net::TcpListener, runtime::Runtime};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port: u16 = env::var("PORT")?.parse()?;
    let token = env::var("TOKEN")?;
    let questions = env::var("QUESTIONS")?;

    let mut key = [0; 32];
    hex::decode_to_slice(env::var("PUB_KEY")?, &mut key)?;
    let key = VerifyingKey::from_bytes(&key)?;

    let pacing = match (env::var("SHORT_WAIT_SECS"), env::var("LONG_WAIT_SECS")) {
        (Ok(short), Ok(long)) => Pacing::from_secs(short.parse()?, long.parse()?),
        _ => Pacing::default(),
    };

    let username = env::var("PG_USERNAME")?;
    let password = env::var("PG_PASSWORD")?;
    let hostname = env::var("PG_HOSTNAME")?;
    let database = env::var("PG_DATABASE")?;
    let db_port = match env::var("PG_PORT") {
        Ok(value) => value.parse()?,
        _ => 5432,
    };

    let runtime = Runtime::new()?;
    runtime.block_on(async {
        let mut config = bot::db::Config::new();
        config.user(&username).password(&password).host(&hostname).port(db_port).dbname(&database);
        let (client, connection) = config.connect(bot::db::NoTls).await?;
        drop(config);
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                log::error!("lost the database connection: {err}");
            }
        });

        // Games do not survive a restart; settle the markers before serving.
        let db = bot::db::Database::from(client);
        let Ok(stale) = db.sweep_playing().await else {
            anyhow::bail!("failed to sweep stale in-progress markers");
        };
        for guild in stale {
            log::warn!("discarding the unfinished game in guild {guild}; it must be restarted manually");
        }

        let bot = Bot::new(token, db, QuestionBank::new(questions), pacing);
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        log::info!("listening on port {port}");

        let mut shutdown = pin!(tokio::signal::ctrl_c());
        loop {
            let accepted = tokio::select! {
                accepted = listener.accept() => accepted,
                result = &mut shutdown => {
                    result?;
                    break;
                }
            };

            let (stream, addr) = match accepted {
                Ok(pair) => pair,
                Err(err) => {
                    log::error!("could not accept a connection: {err}");
                    continue;
                }
            };

            log::debug!("new connection from {addr}");
            let io = TokioIo::new(stream);
            let bot = bot.clone();
            tokio::spawn(async move {
                let service = service_fn(|req| {
                    let bot = bot.clone();
                    async move { Ok::<_, Infallible>(bot::relay::respond(req, &key, &bot).await) }
                });
                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    log::error!("connection error: {err}");
                }
            });
        }

        log::info!("shutting down");
        anyhow::Ok(())
    })
}
