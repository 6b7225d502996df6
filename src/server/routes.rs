use bevy::prelude::*;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::config::ServerConfig;
use crate::difficulty::Difficulty;
use crate::http::{HttpRequest, HttpResponse, content_type_for};
use crate::sessions::{SessionError, SessionStore};
use crate::types::{CreateGameResponse, ErrorResponse, GameInfoResponse, PingResponse};
use crate::utils::now_iso8601;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("missing query parameter {0}")]
    MissingParam(&'static str),

    #[error("no such file {0}")]
    FileNotFound(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl RouteError {
    fn into_response(self) -> HttpResponse {
        match self {
            RouteError::Session(SessionError::NotFound(gameid)) => HttpResponse::json(
                404,
                &ErrorResponse {
                    error: "game not found".to_string(),
                    gameid: Some(gameid),
                },
            ),
            RouteError::MissingParam(name) => HttpResponse::json(
                404,
                &ErrorResponse {
                    error: "game not found".to_string(),
                    gameid: None,
                },
            ),
            RouteError::FileNotFound(_) => HttpResponse::text(404, "Not Found"),
            RouteError::MethodNotAllowed(_) => HttpResponse::text(405, "Method Not Allowed"),
            RouteError::Io { .. } => HttpResponse::text(500, "Internal Server Error"),
        }
    }
}

/// Answer one request. Errors become JSON or plain-text error responses.
pub fn route(request: &HttpRequest, store: &mut SessionStore, config: &ServerConfig) -> HttpResponse {
    let result = if request.method != "GET" {
        Err(RouteError::MethodNotAllowed(request.method.clone()))
    } else {
        match request.path.as_str() {
            "/api/createGame" => Ok(create_game(request, store)),
            "/api/gameInfo" => game_info(request, store),
            "/api/ping" => Ok(ping()),
            path => serve_static(&config.static_root, path),
        }
    };

    result.unwrap_or_else(|e| {
        warn!("{} {} failed: {}", request.method, request.path, e);
        e.into_response()
    })
}

fn create_game(request: &HttpRequest, store: &mut SessionStore) -> HttpResponse {
    let difficulty = Difficulty::parse_or_default(request.query_param("difficulty"));
    let gameid = store.create(difficulty);
    info!("Created game {} ({}), {} sessions stored", gameid, difficulty, store.len());
    HttpResponse::json(200, &CreateGameResponse { gameid })
}

fn game_info(request: &HttpRequest, store: &SessionStore) -> Result<HttpResponse, RouteError> {
    let gameid = request
        .query_param("gameid")
        .ok_or(RouteError::MissingParam("gameid"))?;
    let session = store.info(gameid)?;
    Ok(HttpResponse::json(
        200,
        &GameInfoResponse {
            difficulty: session.difficulty,
        },
    ))
}

fn ping() -> HttpResponse {
    HttpResponse::json(
        200,
        &PingResponse {
            ok: true,
            time: now_iso8601(),
        },
    )
}

fn serve_static(root: &Path, request_path: &str) -> Result<HttpResponse, RouteError> {
    let file = resolve_static_path(root, request_path)
        .ok_or_else(|| RouteError::FileNotFound(request_path.to_string()))?;

    if !file.is_file() {
        return Err(RouteError::FileNotFound(request_path.to_string()));
    }

    match std::fs::read(&file) {
        Ok(body) => Ok(HttpResponse::file(
            content_type_for(&file.to_string_lossy()),
            body,
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RouteError::FileNotFound(request_path.to_string()))
        }
        Err(source) => Err(RouteError::Io {
            path: file.to_string_lossy().into_owned(),
            source,
        }),
    }
}

/// Map a URL path below `root`. `/` is `index.html`; anything that tries to
/// climb out of the root is refused.
pub fn resolve_static_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() { "index.html" } else { relative };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_config(root: PathBuf) -> ServerConfig {
        ServerConfig {
            static_root: root,
            ..Default::default()
        }
    }

    fn body_json(response: &HttpResponse) -> serde_json::Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn test_create_game_then_game_info() {
        let mut store = SessionStore::default();
        let config = ServerConfig::default();

        let created = route(&HttpRequest::get("/api/createGame?difficulty=hard"), &mut store, &config);
        assert_eq!(created.status, 200);
        let CreateGameResponse { gameid } = serde_json::from_slice(&created.body).unwrap();
        assert!(Uuid::parse_str(&gameid).is_ok());

        let info = route(
            &HttpRequest::get(&format!("/api/gameInfo?gameid={}", gameid)),
            &mut store,
            &config,
        );
        assert_eq!(info.status, 200);
        assert_eq!(body_json(&info), serde_json::json!({ "difficulty": "hard" }));
    }

    #[test]
    fn test_create_game_defaults_to_medium() {
        let mut store = SessionStore::default();
        let config = ServerConfig::default();

        for target in ["/api/createGame", "/api/createGame?difficulty=extreme"] {
            let created = route(&HttpRequest::get(target), &mut store, &config);
            let CreateGameResponse { gameid } = serde_json::from_slice(&created.body).unwrap();
            assert_eq!(store.info(&gameid).unwrap().difficulty, Difficulty::Medium);
        }
    }

    #[test]
    fn test_unknown_game_is_not_found() {
        let mut store = SessionStore::default();
        let response = route(
            &HttpRequest::get("/api/gameInfo?gameid=doesNotExist"),
            &mut store,
            &ServerConfig::default(),
        );

        assert_eq!(response.status, 404);
        assert_eq!(
            body_json(&response),
            serde_json::json!({ "error": "game not found", "gameid": "doesNotExist" })
        );
    }

    #[test]
    fn test_missing_gameid_is_not_found() {
        let mut store = SessionStore::default();
        let response = route(&HttpRequest::get("/api/gameInfo"), &mut store, &ServerConfig::default());
        assert_eq!(response.status, 404);
        assert_eq!(body_json(&response), serde_json::json!({ "error": "game not found" }));
    }

    #[test]
    fn test_ping() {
        let mut store = SessionStore::default();
        let response = route(&HttpRequest::get("/api/ping"), &mut store, &ServerConfig::default());

        assert_eq!(response.status, 200);
        let PingResponse { ok, time } = serde_json::from_slice(&response.body).unwrap();
        assert!(ok);
        assert!(time.ends_with('Z'));
        assert_eq!(time.len(), "1970-01-01T00:00:00.000Z".len());
    }

    #[test]
    fn test_non_get_is_rejected() {
        let mut store = SessionStore::default();
        let mut request = HttpRequest::get("/api/createGame");
        request.method = "POST".to_string();

        let response = route(&request, &mut store, &ServerConfig::default());
        assert_eq!(response.status, 405);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_static_paths() {
        let root = Path::new("public");
        assert_eq!(resolve_static_path(root, "/"), Some(root.join("index.html")));
        assert_eq!(
            resolve_static_path(root, "/sprites/sprite1.png"),
            Some(root.join("sprites").join("sprite1.png"))
        );
        assert_eq!(resolve_static_path(root, "/../Cargo.toml"), None);
        assert_eq!(resolve_static_path(root, "/sprites/../../secret"), None);
    }

    #[test]
    fn test_serves_files_from_root() {
        let root = std::env::temp_dir().join(format!("racers_static_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("index.html"), "<h1>Tapioca</h1>").unwrap();
        let config = test_config(root.clone());
        let mut store = SessionStore::default();

        let index = route(&HttpRequest::get("/"), &mut store, &config);
        assert_eq!(index.status, 200);
        assert_eq!(index.content_type, "text/html; charset=utf-8");
        assert_eq!(index.body, b"<h1>Tapioca</h1>");

        let missing = route(&HttpRequest::get("/nope.js"), &mut store, &config);
        assert_eq!(missing.status, 404);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
