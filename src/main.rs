use movie_finder::{app::App, config::Config, logging::init_logging, services::ResultView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env()?;
    let app = App::start(&config).await?;

    match app.session.view() {
        ResultView::Featured => println!("Featured Movies"),
        ResultView::Search { term } => println!("Search Results for \"{}\"", term),
    }
    for movie in app.session.displayed() {
        let marker = if app.is_favorite(&movie.id) { "*" } else { " " };
        println!("{} {} ({}) [{}]", marker, movie.title, movie.year, movie.id);
    }

    tracing::info!(
        favorites = app.favorites.len(),
        theme = %app.theme.mode(),
        "Session ready"
    );

    Ok(())
}
