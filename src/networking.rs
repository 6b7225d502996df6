use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use serde::Deserialize;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::config::GameConfig;
use crate::game_logic::Difficulty;

#[derive(Debug, Error)]
pub enum SessionClientError {
    #[error("session request failed: {0}")]
    Request(#[from] ureq::Error),

    #[error("server returned an empty game id")]
    EmptyGameId,
}

#[derive(Deserialize, Debug)]
struct CreateGameResponse {
    gameid: String,
}

/// Ask the server for a new game id. Blocking.
pub fn create_game(server_url: &str, difficulty: Difficulty) -> Result<String, SessionClientError> {
    let url = format!("{}/api/createGame", server_url);
    let mut response = ureq::get(&url)
        .query("difficulty", difficulty.as_str())
        .call()?;
    let body: CreateGameResponse = response.body_mut().read_json()?;

    if body.gameid.is_empty() {
        return Err(SessionClientError::EmptyGameId);
    }
    Ok(body.gameid)
}

/// Game id issued by the server, if any. Gameplay never waits on it.
#[derive(Resource)]
pub struct SessionLink {
    pub game_id: Option<String>,
    sender: Arc<Mutex<Sender<Result<String, String>>>>,
    receiver: Arc<Mutex<Receiver<Result<String, String>>>>,
}

impl Default for SessionLink {
    fn default() -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            game_id: None,
            sender: Arc::new(Mutex::new(sender)),
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }
}

/// Fire-and-forget: the request runs on the IO pool and reports back
/// through the link's channel.
pub fn request_session(link: &SessionLink, config: &GameConfig, difficulty: Difficulty) {
    if !config.create_session {
        return;
    }

    let sender = link.sender.lock().unwrap().clone();
    let server_url = config.server_url.clone();

    IoTaskPool::get()
        .spawn(async move {
            let outcome = create_game(&server_url, difficulty).map_err(|e| e.to_string());
            let _ = sender.send(outcome);
        })
        .detach();
}

pub fn poll_session_link(mut link: ResMut<SessionLink>) {
    let outcome = {
        let receiver = link.receiver.lock().unwrap();
        receiver.try_recv().ok()
    };

    match outcome {
        Some(Ok(game_id)) => {
            info!("Session created: {}", game_id);
            link.game_id = Some(game_id);
        }
        Some(Err(e)) => {
            warn!("Error creating game: {}", e);
        }
        None => {}
    }
}

pub struct NetworkingPlugin;

impl Plugin for NetworkingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionLink>()
            .add_systems(Update, poll_session_link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// One-shot loopback server answering with `body`. The join handle
    /// yields the request head it received.
    fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut byte = [0u8; 1];
            while !head.ends_with(b"\r\n\r\n") {
                if stream.read(&mut byte).unwrap() == 0 {
                    break;
                }
                head.push(byte[0]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (url, handle)
    }

    #[test]
    fn test_create_game_returns_server_id() {
        let (url, server) = serve_once(r#"{"gameid":"abc"}"#);

        let result = create_game(&url, Difficulty::Hard);
        let head = server.join().unwrap();

        assert_eq!(result.unwrap(), "abc");
        assert!(head.starts_with("GET /api/createGame?difficulty=hard "));
    }

    #[test]
    fn test_empty_game_id_is_an_error() {
        let (url, server) = serve_once(r#"{"gameid":""}"#);

        let result = create_game(&url, Difficulty::Easy);
        server.join().unwrap();

        assert!(matches!(result, Err(SessionClientError::EmptyGameId)));
    }

    #[test]
    fn test_poll_keeps_id_only_on_success() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SessionLink>()
            .add_systems(Update, poll_session_link);

        let sender = app.world().resource::<SessionLink>().sender.lock().unwrap().clone();

        sender.send(Err("boom".to_string())).unwrap();
        app.update();
        assert_eq!(app.world().resource::<SessionLink>().game_id, None);

        sender.send(Ok("abc".to_string())).unwrap();
        app.update();
        assert_eq!(
            app.world().resource::<SessionLink>().game_id.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_unreachable_server_is_an_error() {
        // nothing listens on the discard port locally
        let result = create_game("http://127.0.0.1:9", Difficulty::Hard);
        assert!(matches!(result, Err(SessionClientError::Request(_))));
    }

    #[test]
    fn test_disabled_session_sends_nothing() {
        let link = SessionLink::default();
        let config = GameConfig {
            server_url: "http://127.0.0.1:9".to_string(),
            create_session: false,
            quick_start: None,
        };

        request_session(&link, &config, Difficulty::Easy);
        assert!(link.receiver.lock().unwrap().try_recv().is_err());
    }
}
