use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verifika::routers::create_routes;
use verifika::{load_config, AnalysisRequester, AnalysisService, AppState, SessionHolder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    // Настройка структурированного логирования
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("verifika=info,warn"));

    // Guard должен жить до конца main, иначе файловый лог не сбрасывается
    let (file_layer, _log_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "verifika.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true))
        .with(file_layer)
        .init();

    let requester = AnalysisRequester::new(&config)?;
    tracing::info!("Классификатор: {}", requester.endpoint());

    let state = AppState {
        analysis: AnalysisService::new(SessionHolder::new(config.preview_chars()), requester),
    };

    let addr: SocketAddr = config.bind_address.parse()?;
    let app = create_routes(state);
    tracing::info!("Сервер запущен на http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
