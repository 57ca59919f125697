//! Read-only HTTP status page.
//!
//! Serves `GET /games` as an HTML snapshot of active and finished
//! games: word, attempts, hints, and (for finished games) the result.
//! Never mutates anything; the only lock it takes is a read lock on
//! the game registry, released before the response is written.
//!
//! The endpoint is a single fixed path, so this is a minimal
//! hand-rolled HTTP/1.1 responder rather than a web framework.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info};

use wordgame_core::GamesSnapshot;

use crate::types::SharedGames;

const PAGE_HEAD: &str = "<html>\
<head><title>Game Status</title>\
<style>\
body { font-family: 'Courier New', monospace; background-color: #f4f4f9; padding: 20px; }\
h1, h2 { color: #333; }\
.container { display: flex; justify-content: space-between; }\
.game-section { width: 48%; }\
.game-table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }\
.game-table th, .game-table td { border: 1px solid #ddd; padding: 8px; }\
.game-table th { background-color: #888888; color: white; text-align: left; }\
.game-table tr:nth-child(even) { background-color: #f2f2f2; }\
</style></head><body>";

/// Serve the status page until the process exits.
pub(crate) async fn run_status_server(port: u16, games: SharedGames) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    info!("status page available at http://localhost:{}/games", port);

    loop {
        let (stream, _) = listener.accept().await?;
        let games = games.clone();

        tokio::spawn(async move {
            if let Err(e) = serve_request(stream, games).await {
                debug!(error = %e, "status request failed");
            }
        });
    }
}

async fn serve_request(mut stream: TcpStream, games: SharedGames) -> std::io::Result<()> {
    let mut buf = [0u8; 1024];
    let n = stream.read(&mut buf).await?;

    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request.split_whitespace().nth(1).unwrap_or("/");

    let (status_line, body) = if path == "/games" {
        let snapshot = {
            let guard = games.read().await;
            guard.snapshot()
        };
        ("HTTP/1.1 200 OK", render_games_page(&snapshot))
    } else {
        (
            "HTTP/1.1 404 Not Found",
            "<html><body>not found</body></html>".to_string(),
        )
    };

    let response = format!(
        "{status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

fn render_games_page(snapshot: &GamesSnapshot) -> String {
    let mut html = String::from(PAGE_HEAD);
    html.push_str("<h1>Game Status</h1><div class=\"container\">");

    html.push_str(
        "<div class=\"game-section\"><h2>Active Games</h2>\
         <table class=\"game-table\"><thead><tr><th>Game</th><th>Details</th></tr></thead><tbody>",
    );
    for (key, game) in &snapshot.active {
        html.push_str(&format!(
            "<tr><td>Game between players with ID {} and {}</td><td>\
             <p>Word to guess: {}</p><p>Attempts: {}</p><p>Hints: {}</p></td></tr>",
            key.challenger,
            key.opponent,
            escape(&game.word),
            escape(&game.attempts.join(", ")),
            escape(&game.hints.join(", ")),
        ));
    }
    html.push_str("</tbody></table></div>");

    html.push_str(
        "<div class=\"game-section\"><h2>Finished Games</h2>\
         <table class=\"game-table\"><thead><tr><th>Game</th><th>Details</th></tr></thead><tbody>",
    );
    for (key, history) in &snapshot.completed {
        for game in history {
            let result = game
                .result
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            html.push_str(&format!(
                "<tr><td>Game between players with ID {} and {}</td><td>\
                 <p>Word to guess: {}</p><p>Attempts: {}</p><p>Hints: {}</p>\
                 <p>Result: {}</p></td></tr>",
                key.challenger,
                key.opponent,
                escape(&game.word),
                escape(&game.attempts.join(", ")),
                escape(&game.hints.join(", ")),
                result,
            ));
        }
    }
    html.push_str("</tbody></table></div></div></body></html>");

    html
}

/// Words, guesses, and hints are client-supplied text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
